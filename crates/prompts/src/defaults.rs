//! Delimiter constants and default knobs for the prompt protocol.
//!
//! The tuple and record delimiters define the wire format the LLM is
//! instructed to emit during extraction. Changing them changes what the
//! parser in `extract` must accept, so they live in one place.

/// Separator joining description fragments accumulated on a graph node or edge.
pub const GRAPH_FIELD_SEP: &str = "<SEP>";

pub const DEFAULT_LANGUAGE: &str = "English";
pub const DEFAULT_TUPLE_DELIMITER: &str = "<|>";
pub const DEFAULT_RECORD_DELIMITER: &str = "##";
pub const DEFAULT_COMPLETION_DELIMITER: &str = "<|COMPLETE|>";

pub const DEFAULT_RESPONSE_TYPE: &str = "Multiple Paragraphs";
pub const DEFAULT_USER_PROMPT: &str = "n/a";

/// Entity types offered to the extraction prompt. Parenthesized notes are
/// part of the data: the LLM sees them as inline type descriptions.
pub const DEFAULT_ENTITY_TYPES: &[&str] = &[
    "organization",
    "person_or_title (specific business title/role or person name)",
    "document (id or title of any concrete complete physical or electronic document, not just its fragment)",
    "process (a high-level process, procedure, plan, or any set of steps/tasks/activities; e.g. change management process, Corrective Procedure etc.)",
    "activity (any task, activity or event; e.g. Quality Validation, QA Inspection, machine downtime, etc.)",
    "device (any kind of machine, device, tool, device component ...)",
    "object (any kind of physical object not used to do work)",
    "material_or_substance",
    "other (any other relevant specific manufacturing-related entity)",
];

/// Join the entity type list the way templates expect it inside `[{entity_types}]`.
pub fn entity_types_field(types: &[&str]) -> String {
    types.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimiters_are_distinct() {
        assert_ne!(DEFAULT_TUPLE_DELIMITER, DEFAULT_RECORD_DELIMITER);
        assert_ne!(DEFAULT_RECORD_DELIMITER, DEFAULT_COMPLETION_DELIMITER);
        assert_ne!(GRAPH_FIELD_SEP, DEFAULT_TUPLE_DELIMITER);
    }

    #[test]
    fn entity_types_join() {
        let joined = entity_types_field(&["a", "b (note)"]);
        assert_eq!(joined, "a, b (note)");
    }
}
