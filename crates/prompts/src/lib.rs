//! Prompt template library.
//!
//! Templates are static strings keyed by name, loaded once into a lookup
//! table. Placeholders use `{name}` tokens and are substituted at call
//! time; tokens with no supplied value are left untouched, since several
//! template bodies contain literal braces the LLM is meant to see.

pub mod defaults;
pub mod templates;

pub use defaults::{
    DEFAULT_COMPLETION_DELIMITER, DEFAULT_ENTITY_TYPES, DEFAULT_LANGUAGE,
    DEFAULT_RECORD_DELIMITER, DEFAULT_RESPONSE_TYPE, DEFAULT_TUPLE_DELIMITER,
    DEFAULT_USER_PROMPT, GRAPH_FIELD_SEP, entity_types_field,
};

use anyhow::{Result, bail};
use std::collections::HashMap;

pub struct PromptLibrary {
    templates: HashMap<&'static str, &'static str>,
}

impl PromptLibrary {
    pub fn new() -> Self {
        let mut map = HashMap::new();
        map.insert("entity_extraction", templates::ENTITY_EXTRACTION);
        map.insert("entity_continue_extraction", templates::ENTITY_CONTINUE_EXTRACTION);
        map.insert("entity_if_loop_extraction", templates::ENTITY_IF_LOOP_EXTRACTION);
        map.insert("summarize_entity_descriptions", templates::SUMMARIZE_ENTITY_DESCRIPTIONS);
        map.insert("keywords_extraction", templates::KEYWORDS_EXTRACTION);
        map.insert("rag_response", templates::RAG_RESPONSE);
        map.insert("naive_rag_response", templates::NAIVE_RAG_RESPONSE);
        map.insert("fail_response", templates::FAIL_RESPONSE);
        Self { templates: map }
    }

    pub fn get(&self, name: &str) -> Result<&'static str> {
        match self.templates.get(name) {
            Some(body) => Ok(body),
            None => bail!("unknown prompt template: {}", name),
        }
    }

    /// Look up a template and substitute placeholders in one step.
    /// Pairs are applied in order, so a value containing placeholders of
    /// its own (the examples block does) must come before the pairs that
    /// resolve them.
    pub fn render(&self, name: &str, vars: &[(&str, &str)]) -> Result<String> {
        Ok(render(self.get(name)?, vars))
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.templates.keys().copied().collect();
        names.sort();
        names
    }
}

impl Default for PromptLibrary {
    fn default() -> Self {
        Self::new()
    }
}

/// Substitute `{key}` tokens. Unknown tokens stay literal.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (key, value) in vars {
        let token = format!("{{{}}}", key);
        out = out.replace(&token, value);
    }
    out
}

/// Join the first `n` extraction examples, each already a complete
/// delimiter-parameterized block.
pub fn extraction_examples(n: usize) -> String {
    templates::ENTITY_EXTRACTION_EXAMPLES
        .iter()
        .take(n.max(1))
        .copied()
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn keyword_examples(n: usize) -> String {
    templates::KEYWORDS_EXTRACTION_EXAMPLES
        .iter()
        .take(n.max(1))
        .copied()
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_has_all_templates() {
        let lib = PromptLibrary::new();
        for name in [
            "entity_extraction",
            "entity_continue_extraction",
            "entity_if_loop_extraction",
            "summarize_entity_descriptions",
            "keywords_extraction",
            "rag_response",
            "naive_rag_response",
            "fail_response",
        ] {
            assert!(lib.get(name).is_ok(), "missing template {}", name);
        }
        assert_eq!(lib.names().len(), 8);
        assert!(lib.get("similarity_check").is_err());
    }

    #[test]
    fn render_substitutes_supplied_keys() {
        let out = render("a {x} b {y} c {x}", &[("x", "1"), ("y", "2")]);
        assert_eq!(out, "a 1 b 2 c 1");
    }

    #[test]
    fn render_leaves_unknown_tokens() {
        let out = render(r#"{"high_level_keywords": {x}}"#, &[("x", "[]")]);
        assert_eq!(out, r#"{"high_level_keywords": []}"#);
    }

    #[test]
    fn extraction_template_carries_wire_format() {
        let lib = PromptLibrary::new();
        let body = lib.get("entity_extraction").unwrap();
        assert!(body.contains(
            r#"("entity"{tuple_delimiter}<entity_name>{tuple_delimiter}<entity_type>{tuple_delimiter}<entity_description>)"#
        ));
        assert!(body.contains(
            r#"("relationship"{tuple_delimiter}<source_entity>{tuple_delimiter}<target_entity>{tuple_delimiter}<relationship_description>{tuple_delimiter}<relationship_keywords>{tuple_delimiter}<relationship_strength>)"#
        ));
        assert!(body.contains(r#"("content_keywords"{tuple_delimiter}<high_level_keywords>)"#));
        assert!(body.contains("{completion_delimiter}"));
    }

    #[test]
    fn example_selection_is_bounded() {
        let two = extraction_examples(2);
        assert!(two.contains("Example 1:"));
        assert!(two.contains("Example 2:"));
        assert!(!two.contains("Example 3:"));

        // Asking for more than exist yields all of them, and zero yields one.
        let all = extraction_examples(99);
        assert!(all.contains("Example 3:"));
        assert!(extraction_examples(0).contains("Example 1:"));
    }

    #[test]
    fn rendered_extraction_prompt_resolves_delimiters() {
        let lib = PromptLibrary::new();
        let examples = render(
            &extraction_examples(2),
            &[
                ("tuple_delimiter", DEFAULT_TUPLE_DELIMITER),
                ("record_delimiter", DEFAULT_RECORD_DELIMITER),
                ("completion_delimiter", DEFAULT_COMPLETION_DELIMITER),
            ],
        );
        let prompt = lib
            .render(
                "entity_extraction",
                &[
                    ("examples", &examples),
                    ("language", DEFAULT_LANGUAGE),
                    ("entity_types", "organization, device"),
                    ("tuple_delimiter", DEFAULT_TUPLE_DELIMITER),
                    ("record_delimiter", DEFAULT_RECORD_DELIMITER),
                    ("completion_delimiter", DEFAULT_COMPLETION_DELIMITER),
                    ("input_text", "some document text"),
                ],
            )
            .unwrap();

        assert!(!prompt.contains("{tuple_delimiter}"));
        assert!(!prompt.contains("{input_text}"));
        assert!(prompt.contains("<|COMPLETE|>"));
        assert!(prompt.contains("some document text"));
    }
}
