use serde::Serialize;
use store::{EntityRecord, RelationshipRecord};

/// The JSON document interpolated into `{context_data}` of the response
/// templates (and `{content_data}` for naive mode, chunks only).
#[derive(Debug, Default, Serialize)]
pub struct ContextData {
    pub entities: Vec<ContextEntity>,
    pub relationships: Vec<ContextRelationship>,
    pub chunks: Vec<ContextChunk>,
}

#[derive(Debug, Serialize)]
pub struct ContextEntity {
    pub name: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct ContextRelationship {
    pub source: String,
    pub target: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub strength: f32,
}

#[derive(Debug, Serialize)]
pub struct ContextChunk {
    pub id: String,
    pub text: String,
    pub file_path: String,
    pub relevance: f32,
}

impl ContextData {
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.relationships.is_empty() && self.chunks.is_empty()
    }

    pub fn add_entities(&mut self, records: Vec<EntityRecord>) {
        for record in records {
            if self.entities.iter().any(|e| e.name == record.name) {
                continue;
            }
            self.entities.push(ContextEntity {
                name: record.name,
                entity_type: record.entity_type,
                description: record.description,
            });
        }
    }

    pub fn add_relationships(&mut self, records: Vec<RelationshipRecord>) {
        for record in records {
            if self
                .relationships
                .iter()
                .any(|r| r.source == record.source && r.target == record.target)
            {
                continue;
            }
            self.relationships.push(ContextRelationship {
                source: record.source,
                target: record.target,
                description: record.description,
                keywords: record.keywords,
                strength: record.strength,
            });
        }
    }

    pub fn add_chunk(&mut self, id: String, text: String, file_path: String, relevance: f32) {
        if self.chunks.iter().any(|c| c.id == id) {
            return;
        }
        self.chunks.push(ContextChunk {
            id,
            text,
            file_path,
            relevance,
        });
    }

    /// Bound what gets interpolated into the prompt.
    pub fn truncate(&mut self, max_entities: usize, max_relationships: usize, max_chunks: usize) {
        self.entities.truncate(max_entities);
        self.relationships.truncate(max_relationships);
        self.chunks.truncate(max_chunks);
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Chunks-only rendering for the naive template's `{content_data}`.
    pub fn chunks_json(&self) -> String {
        serde_json::to_string_pretty(&self.chunks).unwrap_or_else(|_| "[]".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(name: &str) -> EntityRecord {
        EntityRecord {
            name: name.to_string(),
            entity_type: "device".to_string(),
            description: "d".to_string(),
            source_chunk_ids: vec![],
        }
    }

    #[test]
    fn entities_dedup_by_name() {
        let mut ctx = ContextData::default();
        ctx.add_entities(vec![entity("LHC"), entity("LHC"), entity("CERN")]);
        assert_eq!(ctx.entities.len(), 2);
    }

    #[test]
    fn chunks_dedup_by_id() {
        let mut ctx = ContextData::default();
        ctx.add_chunk("c1".into(), "text".into(), "f.json".into(), 0.9);
        ctx.add_chunk("c1".into(), "text".into(), "f.json".into(), 0.8);
        assert_eq!(ctx.chunks.len(), 1);
    }

    #[test]
    fn json_serializes_entity_type_as_type() {
        let mut ctx = ContextData::default();
        ctx.add_entities(vec![entity("LHC")]);
        let json = ctx.to_json();
        assert!(json.contains(r#""type": "device""#));
        assert!(!json.contains("entity_type"));
    }

    #[test]
    fn truncate_bounds_each_section() {
        let mut ctx = ContextData::default();
        ctx.add_entities((0..10).map(|i| entity(&format!("e{}", i))).collect());
        ctx.truncate(3, 3, 3);
        assert_eq!(ctx.entities.len(), 3);
    }
}
