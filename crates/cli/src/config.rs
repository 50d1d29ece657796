use anyhow::{Context, Result};
use std::env;

/// Connection settings, all sourced from the environment (after the
/// dotenv file has been loaded).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub llm_api_base_url: String,
    pub llm_api_key: String,
    pub llm_model: String,
    pub embedding_model: String,
    pub embedding_dim: usize,
    pub neo4j_uri: String,
    pub neo4j_user: String,
    pub neo4j_password: String,
    pub qdrant_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            llm_api_base_url: required("LLM_API_BASE_URL")?,
            llm_api_key: required("LLM_API_KEY")?,
            llm_model: required("LLM_MODEL")?,
            embedding_model: required("EMBEDDING_MODEL")?,
            embedding_dim: optional("EMBEDDING_DIM", "1024")
                .parse()
                .context("EMBEDDING_DIM must be a number")?,
            neo4j_uri: optional("NEO4J_URI", "bolt://localhost:7687"),
            neo4j_user: optional("NEO4J_USER", "neo4j"),
            neo4j_password: required("NEO4J_PASSWORD")?,
            qdrant_url: optional("QDRANT_URL", "http://localhost:6333"),
        })
    }
}

fn required(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("missing required environment variable {}", name))
}

fn optional(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}
