//! The engine the driver constructs: storage bootstrap, the batch insert
//! pipeline (chunk -> extract -> merge -> index), and query dispatch.

pub mod config;
pub mod merge;

pub use config::EngineConfig;

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use extract::{ExtractedEntity, ExtractedRelationship, Extractor, ExtractorConfig};
use ingest::{Chunker, ChunkerConfig, Document};
use llm::{CompletionClient, EmbeddingClient, ResponseCache};
use prompts::PromptLibrary;
use query::{QueryEngine, QueryParams};
use store::{GraphStats, GraphStore, VectorPoint, VectorStore};

#[derive(Debug, Default, Clone, Serialize)]
pub struct InsertReport {
    pub documents: usize,
    pub chunks: usize,
    pub entities: usize,
    pub relationships: usize,
}

pub struct RagEngine {
    config: EngineConfig,
    llm: CompletionClient,
    embedder: EmbeddingClient,
    graph: Arc<GraphStore>,
    chunks_vdb: Arc<VectorStore>,
    entities_vdb: Arc<VectorStore>,
    relationships_vdb: Arc<VectorStore>,
    chunker: Chunker,
    extractor: Extractor,
    query_engine: QueryEngine,
    library: PromptLibrary,
}

impl RagEngine {
    pub fn new(
        config: EngineConfig,
        llm: CompletionClient,
        embedder: EmbeddingClient,
        graph: GraphStore,
        chunks_vdb: VectorStore,
        entities_vdb: VectorStore,
        relationships_vdb: VectorStore,
    ) -> Self {
        let (llm, embedder) = if config.enable_llm_cache {
            let cache = Arc::new(ResponseCache::new(10_000));
            (
                llm.with_cache(cache.clone()),
                embedder.with_cache(cache),
            )
        } else {
            (llm, embedder)
        };

        let graph = Arc::new(graph);
        let chunks_vdb = Arc::new(chunks_vdb);
        let entities_vdb = Arc::new(entities_vdb);
        let relationships_vdb = Arc::new(relationships_vdb);

        let chunker = Chunker::new(ChunkerConfig {
            chunk_token_size: config.chunk_token_size,
            chunk_overlap_token_size: config.chunk_overlap_token_size,
        });

        let extractor = Extractor::new(
            llm.clone(),
            ExtractorConfig {
                language: config.language.clone(),
                entity_types: config.entity_types.clone(),
                example_number: config.example_number,
                max_gleaning: config.entity_extract_max_gleaning,
            },
        );

        let query_engine = QueryEngine::new(
            graph.clone(),
            chunks_vdb.clone(),
            entities_vdb.clone(),
            relationships_vdb.clone(),
            embedder.clone(),
            llm.clone(),
        );

        Self {
            config,
            llm,
            embedder,
            graph,
            chunks_vdb,
            entities_vdb,
            relationships_vdb,
            chunker,
            extractor,
            query_engine,
            library: PromptLibrary::new(),
        }
    }

    /// Bring up the storage backends: vector collections and graph schema.
    pub async fn initialize(&self) -> Result<()> {
        let dim = self.embedder.dimension();
        self.chunks_vdb.ensure_collection(dim).await?;
        self.entities_vdb.ensure_collection(dim).await?;
        self.relationships_vdb.ensure_collection(dim).await?;
        self.graph.init_schema().await?;
        info!("storage backends initialized");
        Ok(())
    }

    /// Insert a batch of documents: chunk, index chunk vectors, extract
    /// entities and relationships, merge them into the graph, and index
    /// their vectors. Documents in one batch are processed sequentially.
    pub async fn insert(&self, docs: &[Document]) -> Result<InsertReport> {
        let mut report = InsertReport {
            documents: docs.len(),
            ..Default::default()
        };

        let mut entity_groups: HashMap<String, Vec<(ExtractedEntity, String)>> = HashMap::new();
        let mut rel_groups: HashMap<(String, String), Vec<(ExtractedRelationship, String)>> =
            HashMap::new();

        for doc in docs {
            let chunks = self
                .chunker
                .chunk_document(&doc.id, &doc.text, &doc.file_path);
            info!(doc_id = %doc.id, chunks = chunks.len(), "chunked document");

            for chunk in &chunks {
                self.index_chunk(doc, chunk).await?;

                let records = self
                    .extractor
                    .extract_chunk(&chunk.text)
                    .await
                    .with_context(|| format!("extraction failed for chunk {}", chunk.chunk_id))?;

                debug!(
                    chunk_id = %chunk.chunk_id,
                    entities = records.entities.len(),
                    relationships = records.relationships.len(),
                    "extracted chunk"
                );

                for entity in records.entities {
                    entity_groups
                        .entry(entity.name.clone())
                        .or_default()
                        .push((entity, chunk.chunk_id.clone()));
                }
                for rel in records.relationships {
                    rel_groups
                        .entry((rel.source.clone(), rel.target.clone()))
                        .or_default()
                        .push((rel, chunk.chunk_id.clone()));
                }
            }

            report.chunks += chunks.len();
        }

        // Deterministic merge order keeps repeated runs convergent.
        let mut entity_names: Vec<String> = entity_groups.keys().cloned().collect();
        entity_names.sort();
        for name in entity_names {
            let group = entity_groups.remove(&name).unwrap_or_default();
            self.merge_and_index_entity(&name, group).await?;
            report.entities += 1;
        }

        let mut pairs: Vec<(String, String)> = rel_groups.keys().cloned().collect();
        pairs.sort();
        for pair in pairs {
            let group = rel_groups.remove(&pair).unwrap_or_default();
            self.merge_and_index_relationship(&pair.0, &pair.1, group)
                .await?;
            report.relationships += 1;
        }

        info!(
            documents = report.documents,
            chunks = report.chunks,
            entities = report.entities,
            relationships = report.relationships,
            "insert batch complete"
        );
        Ok(report)
    }

    pub async fn query(&self, question: &str, params: &QueryParams) -> Result<String> {
        self.query_engine.query(question, params).await
    }

    pub async fn stats(&self) -> Result<GraphStats> {
        self.graph.stats().await
    }

    /// Drop everything from the vector collections and the graph.
    pub async fn purge(&self) -> Result<()> {
        self.chunks_vdb.drop_collection().await?;
        self.entities_vdb.drop_collection().await?;
        self.relationships_vdb.drop_collection().await?;
        self.graph.drop_all().await?;
        info!("all stored data purged");
        Ok(())
    }

    async fn index_chunk(&self, doc: &Document, chunk: &ingest::Chunk) -> Result<()> {
        let vector = self
            .embedder
            .embed(&chunk.text)
            .await
            .context("failed to embed chunk")?;

        let mut payload = HashMap::from([
            ("doc_id".to_string(), serde_json::json!(chunk.doc_id)),
            ("text".to_string(), serde_json::json!(chunk.text)),
            ("file_path".to_string(), serde_json::json!(chunk.file_path)),
            ("index".to_string(), serde_json::json!(chunk.index)),
        ]);
        if let Some(metadata) = &doc.metadata {
            payload.insert("project".to_string(), serde_json::json!(metadata.project));
        }

        self.chunks_vdb
            .upsert(vec![VectorPoint {
                id: chunk.chunk_id.clone(),
                vector,
                payload,
            }])
            .await
    }

    async fn merge_and_index_entity(
        &self,
        name: &str,
        group: Vec<(ExtractedEntity, String)>,
    ) -> Result<()> {
        let existing = self.graph.get_entity(name).await?;
        let mut merged = merge::merge_entity(existing, name, &group);

        if merge::fragment_count(&merged.description) >= self.config.force_summary_fragment_count {
            merged.description = self.summarize_description(name, &merged.description).await?;
        }

        self.graph.upsert_entity(&merged).await?;

        let content = format!(
            "{}\n{}",
            merged.name,
            merge::description_fragments(&merged.description).join("\n")
        );
        let vector = self.embedder.embed(&content).await?;

        self.entities_vdb
            .upsert(vec![VectorPoint {
                id: format!("ent::{}", merged.name),
                vector,
                payload: HashMap::from([
                    ("name".to_string(), serde_json::json!(merged.name)),
                    ("type".to_string(), serde_json::json!(merged.entity_type)),
                    (
                        "description".to_string(),
                        serde_json::json!(merged.description),
                    ),
                ]),
            }])
            .await
    }

    async fn merge_and_index_relationship(
        &self,
        source: &str,
        target: &str,
        group: Vec<(ExtractedRelationship, String)>,
    ) -> Result<()> {
        let existing = self.graph.get_relationship(source, target).await?;
        let merged = merge::merge_relationship(existing, source, target, &group);

        self.graph.upsert_relationship(&merged).await?;

        let content = format!(
            "{}\n{} {}\n{}",
            merged.keywords.join(", "),
            merged.source,
            merged.target,
            merge::description_fragments(&merged.description).join("\n")
        );
        let vector = self.embedder.embed(&content).await?;

        self.relationships_vdb
            .upsert(vec![VectorPoint {
                id: format!("rel::{}::{}", merged.source, merged.target),
                vector,
                payload: HashMap::from([
                    ("source".to_string(), serde_json::json!(merged.source)),
                    ("target".to_string(), serde_json::json!(merged.target)),
                    (
                        "description".to_string(),
                        serde_json::json!(merged.description),
                    ),
                    (
                        "keywords".to_string(),
                        serde_json::json!(merged.keywords.join(", ")),
                    ),
                ]),
            }])
            .await
    }

    /// Condense an over-grown fragment list into one description via the
    /// summarization prompt.
    async fn summarize_description(&self, name: &str, description: &str) -> Result<String> {
        let fragments = merge::description_fragments(description).join("\n");
        let prompt = self.library.render(
            "summarize_entity_descriptions",
            &[
                ("language", self.config.language.as_str()),
                ("entity_name", name),
                ("description_list", &fragments),
            ],
        )?;

        let summary = self
            .llm
            .complete(&prompt)
            .await
            .context("description summarization failed")?;

        debug!(entity = name, "re-summarized merged description");
        Ok(summary.trim().to_string())
    }
}
