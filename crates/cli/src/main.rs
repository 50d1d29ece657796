mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use config::AppConfig;
use engine::{EngineConfig, RagEngine};
use ingest::Document;
use llm::{CompletionClient, EmbeddingClient};
use query::{QueryMode, QueryParams};
use store::{GraphStore, VectorStore};

#[derive(Parser)]
#[command(name = "graphloom", about = "Knowledge-graph RAG over a JSON document corpus")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover JSON documents under a directory and insert them in batches.
    Ingest {
        /// Corpus root to walk for *.json files.
        #[arg(long)]
        dir: PathBuf,
        /// Project tag attached to every document of this run.
        #[arg(long)]
        project: Option<String>,
        #[arg(long, default_value_t = 5)]
        batch_size: usize,
    },
    /// Answer a question under one or more retrieval modes.
    Query {
        question: String,
        /// naive, local, global or hybrid; repeatable.
        #[arg(long = "mode", default_values_t = vec!["hybrid".to_string()])]
        modes: Vec<String>,
        #[arg(long, default_value_t = 60)]
        top_k: usize,
    },
    /// Print entity and relationship counts from the graph.
    Stats,
    /// Remove ALL data from the vector collections and the graph.
    Purge {
        /// Skip the interactive confirmation.
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // The driver refuses to start without its dotenv file: every
    // credential is expected to come from there.
    dotenvy::dotenv().context("can't load the .env file")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let app_config = AppConfig::from_env()?;

    println!("Initializing engine ...");
    let engine = build_engine(&app_config).await?;
    engine.initialize().await?;

    match cli.command {
        Commands::Ingest {
            dir,
            project,
            batch_size,
        } => run_ingest(&engine, &dir, project.as_deref(), batch_size).await,
        Commands::Query {
            question,
            modes,
            top_k,
        } => run_query(&engine, &question, &modes, top_k).await,
        Commands::Stats => run_stats(&engine).await,
        Commands::Purge { yes } => run_purge(&engine, yes).await,
    }
}

async fn build_engine(app: &AppConfig) -> Result<RagEngine> {
    let engine_config = EngineConfig::default();

    let llm = CompletionClient::new(
        app.llm_api_base_url.clone(),
        app.llm_api_key.clone(),
        app.llm_model.clone(),
    );
    let embedder = EmbeddingClient::new(
        app.llm_api_base_url.clone(),
        app.llm_api_key.clone(),
        app.embedding_model.clone(),
        app.embedding_dim,
    );

    let threshold = engine_config.cosine_better_than_threshold;
    let chunks_vdb = VectorStore::new(
        app.qdrant_url.clone(),
        engine_config.chunks_collection(),
        threshold,
    );
    let entities_vdb = VectorStore::new(
        app.qdrant_url.clone(),
        engine_config.entities_collection(),
        threshold,
    );
    let relationships_vdb = VectorStore::new(
        app.qdrant_url.clone(),
        engine_config.relationships_collection(),
        threshold,
    );

    let graph = GraphStore::connect(&app.neo4j_uri, &app.neo4j_user, &app.neo4j_password).await?;

    tracing::info!(
        model = %app.llm_model,
        embedding_model = %app.embedding_model,
        embedding_dim = app.embedding_dim,
        "engine configured"
    );

    Ok(RagEngine::new(
        engine_config,
        llm,
        embedder,
        graph,
        chunks_vdb,
        entities_vdb,
        relationships_vdb,
    ))
}

async fn run_ingest(
    engine: &RagEngine,
    dir: &PathBuf,
    project: Option<&str>,
    batch_size: usize,
) -> Result<()> {
    println!("Ingesting documents from {} ...", dir.display());

    let files = ingest::json_files(dir)?;
    println!("Found {} JSON files", files.len());

    let total = files.len();
    let batches = ingest::batched(files, batch_size);
    let batch_count = batches.len();
    let mut processed = 0usize;

    for (i, batch) in batches.into_iter().enumerate() {
        println!("\n=== Processing batch {} of {}", i + 1, batch_count);

        let mut docs = Vec::with_capacity(batch.len());
        for file in &batch {
            println!("Processing file: {}", file.display());
            let doc = Document::load(file, project).await?;
            println!("  File ID: {}", doc.id);
            println!("  Text character length: {}", doc.char_len());
            docs.push(doc);
        }

        engine.insert(&docs).await?;

        processed += batch.len();
        println!(
            "Finished processing batch. Files remaining: {}",
            total - processed
        );
    }

    Ok(())
}

async fn run_query(engine: &RagEngine, question: &str, modes: &[String], top_k: usize) -> Result<()> {
    println!("\n--- Querying: {}\n", question);

    for mode_name in modes {
        let mode: QueryMode = mode_name.parse()?;
        print!("{}", mode_banner(mode));

        let mut params = QueryParams::new(mode);
        params.top_k = top_k;

        let answer = engine.query(question, &params).await?;
        println!("\n--- Query: {}", question);
        println!("--- Answer: {}", answer);
    }

    Ok(())
}

async fn run_stats(engine: &RagEngine) -> Result<()> {
    let stats = engine.stats().await?;
    println!("Entities:      {}", stats.entity_count);
    println!("Relationships: {}", stats.relationship_count);
    Ok(())
}

async fn run_purge(engine: &RagEngine, yes: bool) -> Result<()> {
    if !yes {
        print!(
            "\n!!! Are you sure you want to PURGE ALL DATA from vector DB and graph DB? \
             This action cannot be undone. Type 'yes' to confirm: "
        );
        std::io::stdout().flush()?;

        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;
        if !answer.trim().eq_ignore_ascii_case("yes") {
            println!("Data clearing aborted.");
            return Ok(());
        }
    }

    println!("Clearing vector DB...");
    println!("Clearing graph DB...");
    engine.purge().await?;
    println!("All data cleared");
    Ok(())
}

fn mode_banner(mode: QueryMode) -> String {
    let label = capitalize(mode.as_str());
    let bar = "-".repeat(label.len());
    format!("\n\n+-{}-+\n| {} |\n+-{}-+\n\n", bar, label, bar)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_frames_the_mode_name() {
        let banner = mode_banner(QueryMode::Hybrid);
        assert!(banner.contains("| Hybrid |"));
        assert!(banner.contains("+--------+"));
    }

    #[test]
    fn capitalize_only_touches_first_letter() {
        assert_eq!(capitalize("naive"), "Naive");
        assert_eq!(capitalize(""), "");
    }
}
