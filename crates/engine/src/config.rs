use serde::{Deserialize, Serialize};

/// Fixed parameters of the pipeline. Defaults mirror the values the
/// reference driver pins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub chunk_token_size: usize,
    pub chunk_overlap_token_size: usize,
    pub entity_extract_max_gleaning: usize,
    /// Few-shot examples interpolated into the extraction prompt.
    pub example_number: usize,
    pub language: String,
    pub entity_types: Vec<String>,
    /// Vector hits scoring below this cosine similarity are discarded.
    pub cosine_better_than_threshold: f32,
    /// Re-summarize a merged description once it holds this many fragments.
    pub force_summary_fragment_count: usize,
    pub enable_llm_cache: bool,
    /// Prefix for the three vector collections.
    pub collection_prefix: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            chunk_token_size: 1200,
            chunk_overlap_token_size: 100,
            entity_extract_max_gleaning: 1,
            example_number: 2,
            language: prompts::DEFAULT_LANGUAGE.to_string(),
            entity_types: prompts::DEFAULT_ENTITY_TYPES
                .iter()
                .map(|t| t.to_string())
                .collect(),
            cosine_better_than_threshold: 0.2,
            force_summary_fragment_count: 6,
            enable_llm_cache: false,
            collection_prefix: "graphloom".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn chunks_collection(&self) -> String {
        format!("{}_chunks", self.collection_prefix)
    }

    pub fn entities_collection(&self) -> String {
        format!("{}_entities", self.collection_prefix)
    }

    pub fn relationships_collection(&self) -> String {
        format!("{}_relationships", self.collection_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_driver_parameters() {
        let config = EngineConfig::default();
        assert_eq!(config.chunk_token_size, 1200);
        assert_eq!(config.chunk_overlap_token_size, 100);
        assert_eq!(config.entity_extract_max_gleaning, 1);
        assert_eq!(config.example_number, 2);
        assert_eq!(config.cosine_better_than_threshold, 0.2);
        assert!(!config.enable_llm_cache);
    }

    #[test]
    fn collection_names_carry_prefix() {
        let config = EngineConfig::default();
        assert_eq!(config.chunks_collection(), "graphloom_chunks");
        assert_eq!(config.entities_collection(), "graphloom_entities");
        assert_eq!(config.relationships_collection(), "graphloom_relationships");
    }
}
