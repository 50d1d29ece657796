use anyhow::{Context, Result};
use tracing::debug;

use llm::{ChatMessage, CompletionClient};
use prompts::PromptLibrary;

use crate::parser::RecordParser;
use crate::schema::ExtractionRecords;

pub struct ExtractorConfig {
    pub language: String,
    pub entity_types: Vec<String>,
    /// How many few-shot examples get interpolated into the prompt.
    pub example_number: usize,
    /// Extra "you missed some" rounds after the first pass.
    pub max_gleaning: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            language: prompts::DEFAULT_LANGUAGE.to_string(),
            entity_types: prompts::DEFAULT_ENTITY_TYPES
                .iter()
                .map(|t| t.to_string())
                .collect(),
            example_number: 2,
            max_gleaning: 1,
        }
    }
}

/// Runs the extraction conversation for one chunk: initial pass, then up
/// to `max_gleaning` continuation rounds, each gated by a YES/NO check on
/// whether entities are still missing.
pub struct Extractor {
    llm: CompletionClient,
    library: PromptLibrary,
    parser: RecordParser,
    config: ExtractorConfig,
}

impl Extractor {
    pub fn new(llm: CompletionClient, config: ExtractorConfig) -> Self {
        Self {
            llm,
            library: PromptLibrary::new(),
            parser: RecordParser::default(),
            config,
        }
    }

    pub async fn extract_chunk(&self, text: &str) -> Result<ExtractionRecords> {
        let entity_types = prompts::entity_types_field(
            &self
                .config
                .entity_types
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>(),
        );

        let delimiter_vars = [
            ("tuple_delimiter", prompts::DEFAULT_TUPLE_DELIMITER),
            ("record_delimiter", prompts::DEFAULT_RECORD_DELIMITER),
            ("completion_delimiter", prompts::DEFAULT_COMPLETION_DELIMITER),
        ];

        let examples = prompts::render(
            &prompts::extraction_examples(self.config.example_number),
            &delimiter_vars,
        );

        let prompt = self
            .library
            .render(
                "entity_extraction",
                &[
                    ("examples", examples.as_str()),
                    ("language", &self.config.language),
                    ("entity_types", &entity_types),
                    ("tuple_delimiter", prompts::DEFAULT_TUPLE_DELIMITER),
                    ("record_delimiter", prompts::DEFAULT_RECORD_DELIMITER),
                    ("completion_delimiter", prompts::DEFAULT_COMPLETION_DELIMITER),
                    ("input_text", text),
                ],
            )
            .context("failed to render extraction prompt")?;

        let mut messages = vec![ChatMessage::user(prompt)];
        let response = self
            .llm
            .complete_messages(&messages)
            .await
            .context("extraction call failed")?;

        let mut records = self.parser.parse(&response);
        debug!(
            entities = records.entities.len(),
            relationships = records.relationships.len(),
            "initial extraction pass"
        );
        messages.push(ChatMessage::assistant(response));

        let continue_prompt = self.library.render(
            "entity_continue_extraction",
            &[
                ("entity_types", entity_types.as_str()),
                ("language", &self.config.language),
                ("tuple_delimiter", prompts::DEFAULT_TUPLE_DELIMITER),
                ("record_delimiter", prompts::DEFAULT_RECORD_DELIMITER),
                ("completion_delimiter", prompts::DEFAULT_COMPLETION_DELIMITER),
            ],
        )?;

        for round in 0..self.config.max_gleaning {
            // Ask whether another round is worth it, except before the
            // very first gleaning pass (the prompt already asserts misses).
            if round > 0 && !self.more_entities_expected(&messages).await? {
                break;
            }

            messages.push(ChatMessage::user(continue_prompt.clone()));
            let response = self
                .llm
                .complete_messages(&messages)
                .await
                .context("gleaning call failed")?;

            let gleaned = self.parser.parse(&response);
            debug!(
                round,
                entities = gleaned.entities.len(),
                relationships = gleaned.relationships.len(),
                "gleaning pass"
            );
            messages.push(ChatMessage::assistant(response));
            records.extend(gleaned);
        }

        Ok(records)
    }

    async fn more_entities_expected(&self, messages: &[ChatMessage]) -> Result<bool> {
        let mut check = messages.to_vec();
        check.push(ChatMessage::user(
            self.library.get("entity_if_loop_extraction")?,
        ));
        let answer = self.llm.complete_messages(&check).await?;
        let answer = answer
            .trim()
            .trim_matches(&['"', '`', '\''][..])
            .to_lowercase();
        Ok(answer == "yes")
    }
}
