use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    /// Chunk vector search only, no knowledge graph.
    Naive,
    /// Entity-centric: low-level keywords into the entities collection.
    Local,
    /// Relationship-centric: high-level keywords into the relationships collection.
    Global,
    /// Union of local and global context.
    Hybrid,
}

impl QueryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryMode::Naive => "naive",
            QueryMode::Local => "local",
            QueryMode::Global => "global",
            QueryMode::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "naive" => Ok(QueryMode::Naive),
            "local" => Ok(QueryMode::Local),
            "global" => Ok(QueryMode::Global),
            "hybrid" => Ok(QueryMode::Hybrid),
            other => bail!("unknown query mode: {}", other),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryTurn {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryParams {
    pub mode: QueryMode,
    pub top_k: usize,
    pub response_type: String,
    #[serde(default)]
    pub history: Vec<HistoryTurn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_prompt: Option<String>,
}

impl QueryParams {
    pub fn new(mode: QueryMode) -> Self {
        Self {
            mode,
            top_k: 60,
            response_type: prompts::DEFAULT_RESPONSE_TYPE.to_string(),
            history: Vec::new(),
            user_prompt: None,
        }
    }

    /// The `{history}` blob the response templates expect.
    pub fn history_text(&self) -> String {
        self.history
            .iter()
            .map(|turn| format!("{}: {}", turn.role, turn.content))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn user_prompt_text(&self) -> &str {
        self.user_prompt
            .as_deref()
            .unwrap_or(prompts::DEFAULT_USER_PROMPT)
    }
}

impl Default for QueryParams {
    fn default() -> Self {
        Self::new(QueryMode::Hybrid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_strings_round_trip() {
        for mode in [
            QueryMode::Naive,
            QueryMode::Local,
            QueryMode::Global,
            QueryMode::Hybrid,
        ] {
            assert_eq!(mode.as_str().parse::<QueryMode>().unwrap(), mode);
        }
        assert!("telepathic".parse::<QueryMode>().is_err());
    }

    #[test]
    fn defaults_match_driver_expectations() {
        let params = QueryParams::default();
        assert_eq!(params.mode, QueryMode::Hybrid);
        assert_eq!(params.top_k, 60);
        assert_eq!(params.response_type, "Multiple Paragraphs");
        assert_eq!(params.user_prompt_text(), "n/a");
    }

    #[test]
    fn history_text_joins_turns() {
        let mut params = QueryParams::default();
        params.history.push(HistoryTurn {
            role: "user".to_string(),
            content: "hi".to_string(),
        });
        params.history.push(HistoryTurn {
            role: "assistant".to_string(),
            content: "hello".to_string(),
        });
        assert_eq!(params.history_text(), "user: hi\nassistant: hello");
    }
}
