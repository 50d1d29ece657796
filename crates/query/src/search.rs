use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

use llm::{CompletionClient, EmbeddingClient};
use prompts::PromptLibrary;
use store::{GraphStore, VectorStore};

use crate::context::ContextData;
use crate::keywords::{QueryKeywords, extract_keywords};
use crate::params::{QueryMode, QueryParams};

// Bounds on what gets interpolated into a response prompt.
const MAX_CONTEXT_ENTITIES: usize = 30;
const MAX_CONTEXT_RELATIONSHIPS: usize = 30;
const MAX_CONTEXT_CHUNKS: usize = 12;

pub struct QueryEngine {
    graph: Arc<GraphStore>,
    chunks_vdb: Arc<VectorStore>,
    entities_vdb: Arc<VectorStore>,
    relationships_vdb: Arc<VectorStore>,
    embedder: EmbeddingClient,
    llm: CompletionClient,
    library: PromptLibrary,
}

impl QueryEngine {
    pub fn new(
        graph: Arc<GraphStore>,
        chunks_vdb: Arc<VectorStore>,
        entities_vdb: Arc<VectorStore>,
        relationships_vdb: Arc<VectorStore>,
        embedder: EmbeddingClient,
        llm: CompletionClient,
    ) -> Self {
        Self {
            graph,
            chunks_vdb,
            entities_vdb,
            relationships_vdb,
            embedder,
            llm,
            library: PromptLibrary::new(),
        }
    }

    /// Answer a question under the given retrieval mode. An empty
    /// retrieval context short-circuits to the fail response without
    /// calling the model.
    pub async fn query(&self, question: &str, params: &QueryParams) -> Result<String> {
        info!(mode = %params.mode, "running query");

        let context = match params.mode {
            QueryMode::Naive => self.naive_context(question, params).await?,
            QueryMode::Local | QueryMode::Global | QueryMode::Hybrid => {
                self.graph_context(question, params).await?
            }
        };

        if context.is_empty() {
            return Ok(self.library.get("fail_response")?.to_string());
        }

        let template = match params.mode {
            QueryMode::Naive => "naive_rag_response",
            _ => "rag_response",
        };
        let context_json = match params.mode {
            QueryMode::Naive => context.chunks_json(),
            _ => context.to_json(),
        };
        let context_key = match params.mode {
            QueryMode::Naive => "content_data",
            _ => "context_data",
        };

        let prompt = self
            .library
            .render(
                template,
                &[
                    ("history", params.history_text().as_str()),
                    (context_key, &context_json),
                    ("response_type", &params.response_type),
                    ("user_prompt", params.user_prompt_text()),
                ],
            )
            .context("failed to render response prompt")?;

        self.llm
            .complete(&prompt)
            .await
            .context("answer generation failed")
    }

    async fn naive_context(&self, question: &str, params: &QueryParams) -> Result<ContextData> {
        let mut context = ContextData::default();
        self.add_question_chunks(question, params, &mut context).await?;
        context.truncate(0, 0, MAX_CONTEXT_CHUNKS);
        Ok(context)
    }

    /// Context for the knowledge-graph modes. Local retrieves through
    /// entities (low-level keywords), global through relationships
    /// (high-level keywords), hybrid through both; every mode also pulls
    /// question-similar chunks as grounding text.
    async fn graph_context(&self, question: &str, params: &QueryParams) -> Result<ContextData> {
        let keywords = extract_keywords(
            &self.llm,
            &self.library,
            question,
            &params.history_text(),
        )
        .await?;

        if keywords.is_empty() {
            debug!("no keywords extracted from query");
        }

        let mut context = ContextData::default();

        if matches!(params.mode, QueryMode::Local | QueryMode::Hybrid) {
            self.add_entity_neighborhood(&keywords, params, &mut context)
                .await?;
        }
        if matches!(params.mode, QueryMode::Global | QueryMode::Hybrid) {
            self.add_relationship_context(&keywords, params, &mut context)
                .await?;
        }

        self.add_question_chunks(question, params, &mut context).await?;

        context.truncate(
            MAX_CONTEXT_ENTITIES,
            MAX_CONTEXT_RELATIONSHIPS,
            MAX_CONTEXT_CHUNKS,
        );
        Ok(context)
    }

    /// Low-level keywords -> entities collection -> one-hop graph expansion.
    async fn add_entity_neighborhood(
        &self,
        keywords: &QueryKeywords,
        params: &QueryParams,
        context: &mut ContextData,
    ) -> Result<()> {
        if keywords.low_level.is_empty() {
            return Ok(());
        }

        let needle = keywords.low_level.join(", ");
        let vector = self.embedder.embed(&needle).await?;
        let hits = self.entities_vdb.search(vector, params.top_k).await?;

        let names: Vec<String> = hits
            .iter()
            .map(|hit| hit.payload_str("name").to_string())
            .filter(|name| !name.is_empty())
            .collect();

        debug!(seeds = names.len(), "entity seeds from vector search");

        let (entities, relationships) = self.graph.neighborhood(&names).await?;
        context.add_entities(entities);
        context.add_relationships(relationships);
        Ok(())
    }

    /// High-level keywords -> relationships collection -> edges with endpoints.
    async fn add_relationship_context(
        &self,
        keywords: &QueryKeywords,
        params: &QueryParams,
        context: &mut ContextData,
    ) -> Result<()> {
        if keywords.high_level.is_empty() {
            return Ok(());
        }

        let needle = keywords.high_level.join(", ");
        let vector = self.embedder.embed(&needle).await?;
        let hits = self.relationships_vdb.search(vector, params.top_k).await?;

        let pairs: Vec<(String, String)> = hits
            .iter()
            .map(|hit| {
                (
                    hit.payload_str("source").to_string(),
                    hit.payload_str("target").to_string(),
                )
            })
            .filter(|(s, t)| !s.is_empty() && !t.is_empty())
            .collect();

        debug!(pairs = pairs.len(), "relationship seeds from vector search");

        let (entities, relationships) = self.graph.relationships_with_endpoints(&pairs).await?;
        context.add_entities(entities);
        context.add_relationships(relationships);
        Ok(())
    }

    async fn add_question_chunks(
        &self,
        question: &str,
        params: &QueryParams,
        context: &mut ContextData,
    ) -> Result<()> {
        let vector = self.embedder.embed(question).await?;
        let top_k = params.top_k.min(MAX_CONTEXT_CHUNKS);
        let hits = self.chunks_vdb.search(vector, top_k).await?;

        for hit in hits {
            context.add_chunk(
                hit.payload_str("id").to_string(),
                hit.payload_str("text").to_string(),
                hit.payload_str("file_path").to_string(),
                hit.score,
            );
        }
        Ok(())
    }
}
