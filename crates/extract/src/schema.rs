use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedEntity {
    pub name: String,
    pub entity_type: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedRelationship {
    pub source: String,
    pub target: String,
    pub description: String,
    pub keywords: Vec<String>,
    /// 1..=10, clamped at parse time.
    pub strength: f32,
}

/// Everything one extraction pass (or gleaning round) produced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionRecords {
    pub entities: Vec<ExtractedEntity>,
    pub relationships: Vec<ExtractedRelationship>,
    pub content_keywords: Vec<String>,
}

impl ExtractionRecords {
    pub fn extend(&mut self, other: ExtractionRecords) {
        self.entities.extend(other.entities);
        self.relationships.extend(other.relationships);
        for keyword in other.content_keywords {
            if !self.content_keywords.contains(&keyword) {
                self.content_keywords.push(keyword);
            }
        }
    }
}
