//! Entity/relationship extraction: the delimited-tuple record parser and
//! the LLM conversation that produces those records from a chunk.

pub mod extractor;
pub mod parser;
pub mod schema;

pub use extractor::{Extractor, ExtractorConfig};
pub use parser::RecordParser;
pub use schema::{ExtractedEntity, ExtractedRelationship, ExtractionRecords};
