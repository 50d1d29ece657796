//! Storage backends: the Neo4j knowledge graph and the Qdrant vector
//! collections (chunks, entities, relationships).

pub mod graph;
pub mod records;
pub mod vector;

pub use graph::GraphStore;
pub use records::{EntityRecord, GraphStats, RelationshipRecord};
pub use vector::{ScoredPoint, VectorPoint, VectorStore};
