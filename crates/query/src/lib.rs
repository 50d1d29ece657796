//! Query-time retrieval: keyword extraction, the four retrieval modes,
//! context assembly, and answer generation.

pub mod context;
pub mod keywords;
pub mod params;
pub mod search;

pub use context::ContextData;
pub use keywords::{QueryKeywords, extract_keywords};
pub use params::{HistoryTurn, QueryMode, QueryParams};
pub use search::QueryEngine;
