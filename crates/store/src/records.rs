use serde::{Deserialize, Serialize};

/// A graph node. `description` may hold several fragments joined by the
/// graph field separator; merging happens before the record reaches the
/// store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityRecord {
    pub name: String,
    pub entity_type: String,
    pub description: String,
    pub source_chunk_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipRecord {
    pub source: String,
    pub target: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub strength: f32,
    pub source_chunk_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphStats {
    pub entity_count: usize,
    pub relationship_count: usize,
}
