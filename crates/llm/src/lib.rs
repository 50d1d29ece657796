//! Clients for the managed model API: chat completions and embeddings,
//! with retry and an optional response cache.

pub mod cache;
pub mod client;
pub mod embeddings;
pub mod retry;

pub use cache::ResponseCache;
pub use client::{ChatMessage, CompletionClient};
pub use embeddings::EmbeddingClient;
pub use retry::RetryPolicy;
