use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::cache::ResponseCache;
use crate::retry::RetryPolicy;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Chat-completion client for an OpenAI-compatible managed API.
#[derive(Clone)]
pub struct CompletionClient {
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
    retry: RetryPolicy,
    cache: Option<std::sync::Arc<ResponseCache>>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl CompletionClient {
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        Self {
            base_url,
            api_key,
            model,
            client: reqwest::Client::new(),
            retry: RetryPolicy::default(),
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache: std::sync::Arc<ResponseCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Single-turn completion.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        self.complete_messages(&[ChatMessage::user(prompt)]).await
    }

    /// Multi-turn completion; the gleaning loop appends to the same
    /// conversation across rounds.
    pub async fn complete_messages(&self, messages: &[ChatMessage]) -> Result<String> {
        let cache_key = messages
            .iter()
            .map(|m| format!("{}:{}", m.role, m.content))
            .collect::<Vec<_>>()
            .join("\n");

        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get_completion(&cache_key) {
                return Ok(hit);
            }
        }

        let content = self
            .retry
            .run("chat_completion", || self.send(messages))
            .await?;

        if let Some(cache) = &self.cache {
            cache.put_completion(&cache_key, content.clone());
        }

        Ok(content)
    }

    async fn send(&self, messages: &[ChatMessage]) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let request = ChatRequest {
            model: &self.model,
            messages,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("failed to send completion request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("completion request failed: {} {}", status, body);
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .context("failed to parse completion response")?;

        match parsed.choices.into_iter().next() {
            Some(choice) => Ok(choice.message.content),
            None => bail!("completion response contained no choices"),
        }
    }
}
