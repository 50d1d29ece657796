//! Corpus handling: JSON document discovery, loading, and chunking.

pub mod chunk;
pub mod chunker;
pub mod discover;
pub mod document;

pub use chunk::Chunk;
pub use chunker::{Chunker, ChunkerConfig};
pub use discover::json_files;
pub use document::{DocMetadata, Document, doc_id_from_path};

/// Group items into fixed-size batches, preserving order.
pub fn batched<T>(items: Vec<T>, batch_size: usize) -> Vec<Vec<T>> {
    let batch_size = batch_size.max(1);
    let mut batches = Vec::new();
    let mut current = Vec::with_capacity(batch_size);

    for item in items {
        current.push(item);
        if current.len() == batch_size {
            batches.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        batches.push(current);
    }
    batches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batching_groups_in_fives() {
        let batches = batched((0..12).collect(), 5);
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0], vec![0, 1, 2, 3, 4]);
        assert_eq!(batches[2], vec![10, 11]);
    }

    #[test]
    fn batching_preserves_order() {
        let flat: Vec<i32> = batched((0..23).collect(), 5).into_iter().flatten().collect();
        assert_eq!(flat, (0..23).collect::<Vec<_>>());
    }

    #[test]
    fn zero_batch_size_is_clamped() {
        let batches = batched(vec![1, 2], 0);
        assert_eq!(batches.len(), 2);
    }
}
