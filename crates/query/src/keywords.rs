use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use llm::CompletionClient;
use prompts::PromptLibrary;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryKeywords {
    #[serde(default, rename = "high_level_keywords")]
    pub high_level: Vec<String>,
    #[serde(default, rename = "low_level_keywords")]
    pub low_level: Vec<String>,
}

impl QueryKeywords {
    pub fn is_empty(&self) -> bool {
        self.high_level.is_empty() && self.low_level.is_empty()
    }
}

/// Run the keyword-extraction prompt over the query (and history) and
/// parse the JSON the model was told to emit.
pub async fn extract_keywords(
    llm: &CompletionClient,
    library: &PromptLibrary,
    query: &str,
    history: &str,
) -> Result<QueryKeywords> {
    let examples = prompts::keyword_examples(3);
    let prompt = library
        .render(
            "keywords_extraction",
            &[
                ("examples", examples.as_str()),
                ("history", history),
                ("query", query),
            ],
        )
        .context("failed to render keyword extraction prompt")?;

    let response = llm
        .complete(&prompt)
        .await
        .context("keyword extraction call failed")?;

    let keywords = parse_keywords(&response)?;
    debug!(
        high = keywords.high_level.len(),
        low = keywords.low_level.len(),
        "extracted query keywords"
    );
    Ok(keywords)
}

/// Models wrap JSON in fences or prose often enough that we cut to the
/// outermost braces before handing it to serde.
fn parse_keywords(response: &str) -> Result<QueryKeywords> {
    let start = response.find('{');
    let end = response.rfind('}');

    let json = match (start, end) {
        (Some(start), Some(end)) if start < end => &response[start..=end],
        _ => anyhow::bail!("keyword extraction returned no JSON object"),
    };

    serde_json::from_str(json).context("keyword extraction returned unparseable JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_json() {
        let kw = parse_keywords(
            r#"{"high_level_keywords": ["quality control"], "low_level_keywords": ["CNC", "laser scanner"]}"#,
        )
        .unwrap();
        assert_eq!(kw.high_level, vec!["quality control"]);
        assert_eq!(kw.low_level, vec!["CNC", "laser scanner"]);
    }

    #[test]
    fn parses_fenced_json() {
        let kw = parse_keywords(
            "```json\n{\"high_level_keywords\": [\"a\"], \"low_level_keywords\": []}\n```",
        )
        .unwrap();
        assert_eq!(kw.high_level, vec!["a"]);
        assert!(kw.low_level.is_empty());
    }

    #[test]
    fn missing_keys_default_to_empty() {
        let kw = parse_keywords(r#"{"high_level_keywords": ["x"]}"#).unwrap();
        assert!(kw.low_level.is_empty());
    }

    #[test]
    fn no_json_is_an_error() {
        assert!(parse_keywords("I could not find any keywords.").is_err());
    }
}
