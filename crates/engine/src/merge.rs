//! Merging freshly extracted records into what the graph already holds.
//!
//! Descriptions accumulate as fragments joined by the graph field
//! separator; the engine re-summarizes them once they pile up.

use std::collections::HashMap;

use extract::{ExtractedEntity, ExtractedRelationship};
use prompts::GRAPH_FIELD_SEP;
use store::{EntityRecord, RelationshipRecord};

/// Join two (possibly multi-fragment) descriptions, deduplicating
/// fragments while keeping first-seen order.
pub fn merge_descriptions(existing: &str, incoming: &str) -> String {
    let mut fragments: Vec<String> = Vec::new();
    for part in existing.split(GRAPH_FIELD_SEP).chain(incoming.split(GRAPH_FIELD_SEP)) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        if !fragments.iter().any(|f| f == part) {
            fragments.push(part.to_string());
        }
    }
    fragments.join(GRAPH_FIELD_SEP)
}

pub fn fragment_count(description: &str) -> usize {
    description
        .split(GRAPH_FIELD_SEP)
        .filter(|f| !f.trim().is_empty())
        .count()
}

pub fn description_fragments(description: &str) -> Vec<&str> {
    description
        .split(GRAPH_FIELD_SEP)
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect()
}

/// Fold a batch of same-name extracted entities (plus whatever the graph
/// already knows) into one record. The entity type is decided by
/// majority vote over the non-placeholder types seen.
pub fn merge_entity(
    existing: Option<EntityRecord>,
    name: &str,
    extracted: &[(ExtractedEntity, String)],
) -> EntityRecord {
    let mut description = existing
        .as_ref()
        .map(|e| e.description.clone())
        .unwrap_or_default();
    let mut source_chunk_ids = existing
        .as_ref()
        .map(|e| e.source_chunk_ids.clone())
        .unwrap_or_default();

    let mut type_votes: HashMap<String, usize> = HashMap::new();
    if let Some(existing) = &existing {
        if existing.entity_type != "UNKNOWN" && !existing.entity_type.is_empty() {
            *type_votes.entry(existing.entity_type.clone()).or_insert(0) += 1;
        }
    }

    for (entity, chunk_id) in extracted {
        description = merge_descriptions(&description, &entity.description);
        if !entity.entity_type.is_empty() {
            *type_votes.entry(entity.entity_type.clone()).or_insert(0) += 1;
        }
        if !source_chunk_ids.contains(chunk_id) {
            source_chunk_ids.push(chunk_id.clone());
        }
    }

    let entity_type = type_votes
        .into_iter()
        .max_by_key(|(_, count)| *count)
        .map(|(t, _)| t)
        .unwrap_or_else(|| "UNKNOWN".to_string());

    EntityRecord {
        name: name.to_string(),
        entity_type,
        description,
        source_chunk_ids,
    }
}

/// Same folding for an edge: descriptions accumulate, keywords union,
/// strength keeps the strongest observation.
pub fn merge_relationship(
    existing: Option<RelationshipRecord>,
    source: &str,
    target: &str,
    extracted: &[(ExtractedRelationship, String)],
) -> RelationshipRecord {
    let mut description = existing
        .as_ref()
        .map(|r| r.description.clone())
        .unwrap_or_default();
    let mut keywords = existing
        .as_ref()
        .map(|r| r.keywords.clone())
        .unwrap_or_default();
    let mut strength = existing.as_ref().map(|r| r.strength).unwrap_or(1.0);
    let mut source_chunk_ids = existing
        .as_ref()
        .map(|r| r.source_chunk_ids.clone())
        .unwrap_or_default();

    for (rel, chunk_id) in extracted {
        description = merge_descriptions(&description, &rel.description);
        for keyword in &rel.keywords {
            if !keywords.contains(keyword) {
                keywords.push(keyword.clone());
            }
        }
        strength = strength.max(rel.strength);
        if !source_chunk_ids.contains(chunk_id) {
            source_chunk_ids.push(chunk_id.clone());
        }
    }

    RelationshipRecord {
        source: source.to_string(),
        target: target.to_string(),
        description,
        keywords,
        strength,
        source_chunk_ids,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(entity_type: &str, description: &str) -> ExtractedEntity {
        ExtractedEntity {
            name: "LHC".to_string(),
            entity_type: entity_type.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn descriptions_merge_with_field_sep_and_dedup() {
        let merged = merge_descriptions("A particle accelerator.", "Located at CERN.");
        assert_eq!(
            merged,
            format!("A particle accelerator.{}Located at CERN.", GRAPH_FIELD_SEP)
        );

        let again = merge_descriptions(&merged, "A particle accelerator.");
        assert_eq!(again, merged);
        assert_eq!(fragment_count(&again), 2);
    }

    #[test]
    fn empty_fragments_are_dropped() {
        assert_eq!(merge_descriptions("", "Only one."), "Only one.");
        assert_eq!(fragment_count(""), 0);
    }

    #[test]
    fn entity_type_is_majority_vote() {
        let merged = merge_entity(
            None,
            "LHC",
            &[
                (entity("device", "First."), "c1".to_string()),
                (entity("device", "Second."), "c2".to_string()),
                (entity("organization", "Third."), "c3".to_string()),
            ],
        );
        assert_eq!(merged.entity_type, "device");
        assert_eq!(merged.source_chunk_ids, vec!["c1", "c2", "c3"]);
        assert_eq!(fragment_count(&merged.description), 3);
    }

    #[test]
    fn entity_merge_respects_existing_record() {
        let existing = EntityRecord {
            name: "LHC".to_string(),
            entity_type: "device".to_string(),
            description: "Known already.".to_string(),
            source_chunk_ids: vec!["c0".to_string()],
        };
        let merged = merge_entity(
            Some(existing),
            "LHC",
            &[(entity("device", "New detail."), "c1".to_string())],
        );
        assert!(merged.description.starts_with("Known already."));
        assert_eq!(merged.source_chunk_ids, vec!["c0", "c1"]);
    }

    #[test]
    fn relationship_strength_keeps_maximum() {
        let rel = |strength: f32| ExtractedRelationship {
            source: "A".to_string(),
            target: "B".to_string(),
            description: format!("seen at {}", strength),
            keywords: vec!["k".to_string()],
            strength,
        };
        let merged = merge_relationship(
            None,
            "A",
            "B",
            &[(rel(3.0), "c1".to_string()), (rel(8.0), "c2".to_string())],
        );
        assert_eq!(merged.strength, 8.0);
        assert_eq!(merged.keywords, vec!["k"]);
    }
}
