use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::cache::ResponseCache;
use crate::retry::RetryPolicy;

/// Embedding client for the same OpenAI-compatible API surface.
/// The dimensionality is fixed at construction and every response is
/// checked against it.
#[derive(Clone)]
pub struct EmbeddingClient {
    base_url: String,
    api_key: String,
    model: String,
    dimension: usize,
    /// Inputs longer than this (estimated) are truncated before sending.
    max_token_size: usize,
    client: reqwest::Client,
    retry: RetryPolicy,
    cache: Option<std::sync::Arc<ResponseCache>>,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

impl EmbeddingClient {
    pub fn new(base_url: String, api_key: String, model: String, dimension: usize) -> Self {
        Self {
            base_url,
            api_key,
            model,
            dimension,
            max_token_size: 8192,
            client: reqwest::Client::new(),
            retry: RetryPolicy::default(),
            cache: None,
        }
    }

    pub fn with_max_token_size(mut self, max_token_size: usize) -> Self {
        self.max_token_size = max_token_size;
        self
    }

    pub fn with_cache(mut self, cache: std::sync::Arc<ResponseCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let text = truncate_to_tokens(text, self.max_token_size);

        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get_embedding(&text) {
                return Ok(hit);
            }
        }

        let embedding = self.retry.run("embedding", || self.send(&text)).await?;

        if embedding.len() != self.dimension {
            bail!(
                "embedding dimension mismatch: expected {}, got {}",
                self.dimension,
                embedding.len()
            );
        }

        if let Some(cache) = &self.cache {
            cache.put_embedding(&text, embedding.clone());
        }

        Ok(embedding)
    }

    async fn send(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/embeddings", self.base_url.trim_end_matches('/'));
        let request = EmbeddingRequest {
            model: &self.model,
            input: text,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("failed to send embedding request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("embedding request failed: {} {}", status, body);
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .context("failed to parse embedding response")?;

        match parsed.data.into_iter().next() {
            Some(data) => Ok(data.embedding),
            None => bail!("embedding response contained no data"),
        }
    }
}

/// Word-estimate truncation (~1.3 tokens per word).
fn truncate_to_tokens(text: &str, max_tokens: usize) -> String {
    let max_words = (((max_tokens as f64) / 1.3) as usize).max(1);
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= max_words {
        text.to_string()
    } else {
        words[..max_words].join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_input_is_untouched() {
        assert_eq!(truncate_to_tokens("a b c", 100), "a b c");
    }

    #[test]
    fn long_input_is_cut_to_word_budget() {
        let text = (0..100).map(|i| i.to_string()).collect::<Vec<_>>().join(" ");
        let cut = truncate_to_tokens(&text, 13); // ~10 words
        assert_eq!(cut.split_whitespace().count(), 10);
        assert!(cut.starts_with("0 1 2"));
    }
}

