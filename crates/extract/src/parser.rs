use regex::Regex;
use tracing::warn;

use crate::schema::{ExtractedEntity, ExtractedRelationship, ExtractionRecords};

/// Parser for the delimited-tuple protocol the extraction prompts ask
/// the LLM to emit:
///
/// ```text
/// ("entity"<|>name<|>type<|>description)##
/// ("relationship"<|>source<|>target<|>description<|>keywords<|>strength)##
/// ("content_keywords"<|>kw1, kw2)<|COMPLETE|>
/// ```
///
/// Malformed records are skipped with a warning; one bad tuple must not
/// throw away an otherwise good extraction round.
pub struct RecordParser {
    tuple_delimiter: String,
    record_delimiter: String,
    completion_delimiter: String,
    paren_capture: Regex,
}

impl RecordParser {
    pub fn new(tuple_delimiter: &str, record_delimiter: &str, completion_delimiter: &str) -> Self {
        Self {
            tuple_delimiter: tuple_delimiter.to_string(),
            record_delimiter: record_delimiter.to_string(),
            completion_delimiter: completion_delimiter.to_string(),
            // (?s): descriptions may span lines within a record
            paren_capture: Regex::new(r"(?s)\((.*)\)").expect("static regex"),
        }
    }

    pub fn parse(&self, raw: &str) -> ExtractionRecords {
        let body = match raw.split(&self.completion_delimiter).next() {
            Some(head) => head,
            None => raw,
        };

        let mut records = ExtractionRecords::default();

        for piece in body.split(&self.record_delimiter) {
            let piece = piece.trim();
            if piece.is_empty() {
                continue;
            }

            let inner = match self.paren_capture.captures(piece) {
                Some(caps) => caps.get(1).map(|m| m.as_str()).unwrap_or(""),
                None => continue, // prose between records, not a tuple
            };

            let fields: Vec<String> = inner
                .split(&self.tuple_delimiter)
                .map(clean_field)
                .collect();

            match fields.first().map(String::as_str) {
                Some("entity") => self.parse_entity(&fields, &mut records),
                Some("relationship") => self.parse_relationship(&fields, &mut records),
                Some("content_keywords") => self.parse_content_keywords(&fields, &mut records),
                Some(other) => {
                    warn!(kind = other, "skipping record of unknown kind");
                }
                None => {}
            }
        }

        records
    }

    fn parse_entity(&self, fields: &[String], records: &mut ExtractionRecords) {
        if fields.len() != 4 {
            warn!(fields = fields.len(), "skipping malformed entity record");
            return;
        }
        if fields[1].is_empty() {
            warn!("skipping entity record with empty name");
            return;
        }
        records.entities.push(ExtractedEntity {
            name: fields[1].clone(),
            entity_type: fields[2].clone(),
            description: fields[3].clone(),
        });
    }

    fn parse_relationship(&self, fields: &[String], records: &mut ExtractionRecords) {
        if fields.len() != 6 {
            warn!(fields = fields.len(), "skipping malformed relationship record");
            return;
        }
        let strength = match fields[5].parse::<f32>() {
            Ok(value) => value.clamp(1.0, 10.0),
            Err(_) => {
                warn!(raw = %fields[5], "skipping relationship with non-numeric strength");
                return;
            }
        };
        if fields[1].is_empty() || fields[2].is_empty() {
            warn!("skipping relationship record with empty endpoint");
            return;
        }
        records.relationships.push(ExtractedRelationship {
            source: fields[1].clone(),
            target: fields[2].clone(),
            description: fields[3].clone(),
            keywords: split_keywords(&fields[4]),
            strength,
        });
    }

    fn parse_content_keywords(&self, fields: &[String], records: &mut ExtractionRecords) {
        if fields.len() != 2 {
            warn!(fields = fields.len(), "skipping malformed content_keywords record");
            return;
        }
        for keyword in split_keywords(&fields[1]) {
            if !records.content_keywords.contains(&keyword) {
                records.content_keywords.push(keyword);
            }
        }
    }
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::new(
            prompts::DEFAULT_TUPLE_DELIMITER,
            prompts::DEFAULT_RECORD_DELIMITER,
            prompts::DEFAULT_COMPLETION_DELIMITER,
        )
    }
}

fn clean_field(field: &str) -> String {
    field.trim().trim_matches('"').trim().to_string()
}

fn split_keywords(field: &str) -> Vec<String> {
    field
        .split(',')
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_output() -> String {
        [
            r#"("entity"<|>"CERN"<|>"organization"<|>"European physics laboratory.")"#,
            r#"("entity"<|>"LHC"<|>"device"<|>"A particle accelerator at CERN.")"#,
            r#"("relationship"<|>"LHC"<|>"CERN"<|>"The LHC is operated at CERN."<|>"research, accelerator"<|>9)"#,
            r#"("content_keywords"<|>"particle physics, research infrastructure")"#,
        ]
        .join("##\n")
            + "<|COMPLETE|>"
    }

    #[test]
    fn entity_fields_parse_in_fixed_order() {
        let records = RecordParser::default().parse(&sample_output());

        assert_eq!(records.entities.len(), 2);
        let first = &records.entities[0];
        assert_eq!(first.name, "CERN");
        assert_eq!(first.entity_type, "organization");
        assert_eq!(first.description, "European physics laboratory.");
    }

    #[test]
    fn relationship_fields_parse_with_keywords_and_strength() {
        let records = RecordParser::default().parse(&sample_output());

        assert_eq!(records.relationships.len(), 1);
        let rel = &records.relationships[0];
        assert_eq!(rel.source, "LHC");
        assert_eq!(rel.target, "CERN");
        assert_eq!(rel.keywords, vec!["research", "accelerator"]);
        assert_eq!(rel.strength, 9.0);
    }

    #[test]
    fn content_keywords_collect_once() {
        let records = RecordParser::default().parse(&sample_output());
        assert_eq!(
            records.content_keywords,
            vec!["particle physics", "research infrastructure"]
        );
    }

    #[test]
    fn text_after_completion_delimiter_is_ignored() {
        let raw = format!(
            "{}\n##(\"entity\"<|>\"Ghost\"<|>\"other\"<|>\"Should not appear.\")",
            sample_output()
        );
        let records = RecordParser::default().parse(&raw);
        assert!(records.entities.iter().all(|e| e.name != "Ghost"));
    }

    #[test]
    fn malformed_records_are_skipped_not_fatal() {
        let raw = [
            r#"("entity"<|>"Good"<|>"device"<|>"Fine.")"#,
            r#"("entity"<|>"TooFewFields")"#,
            r#"("relationship"<|>"A"<|>"B"<|>"desc"<|>"kw"<|>not_a_number)"#,
            r#"("mystery"<|>"What")"#,
            "chatty model prose with no tuple",
        ]
        .join("##");

        let records = RecordParser::default().parse(&raw);
        assert_eq!(records.entities.len(), 1);
        assert_eq!(records.entities[0].name, "Good");
        assert!(records.relationships.is_empty());
    }

    #[test]
    fn strength_is_clamped_into_range() {
        let raw = r#"("relationship"<|>"A"<|>"B"<|>"d"<|>"k"<|>42)"#;
        let records = RecordParser::default().parse(raw);
        assert_eq!(records.relationships[0].strength, 10.0);
    }

    #[test]
    fn multiline_descriptions_stay_in_one_record() {
        let raw = "(\"entity\"<|>\"Widget\"<|>\"device\"<|>\"Line one.\nLine two.\")";
        let records = RecordParser::default().parse(raw);
        assert_eq!(records.entities[0].description, "Line one.\nLine two.");
    }
}
