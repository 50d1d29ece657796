use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub doc_id: String,
    pub chunk_id: String,
    /// Position of this chunk within its document.
    pub index: usize,
    pub text: String,
    pub file_path: String,
}

impl Chunk {
    pub fn new(doc_id: String, index: usize, text: String, file_path: String) -> Self {
        let chunk_id = generate_chunk_id(&doc_id, index, &text);
        Self {
            doc_id,
            chunk_id,
            index,
            text,
            file_path,
        }
    }

    /// Rough token count: ~1.3 tokens per whitespace-separated word.
    pub fn estimated_tokens(&self) -> usize {
        estimate_tokens(&self.text)
    }
}

pub fn estimate_tokens(text: &str) -> usize {
    let word_count = text.split_whitespace().count();
    (word_count as f64 * 1.3) as usize
}

fn generate_chunk_id(doc_id: &str, index: usize, text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(doc_id.as_bytes());
    hasher.update(index.to_le_bytes());
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest[..16])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_ids_are_stable_and_distinct() {
        let a = Chunk::new("doc".into(), 0, "hello world".into(), "doc.json".into());
        let b = Chunk::new("doc".into(), 0, "hello world".into(), "doc.json".into());
        let c = Chunk::new("doc".into(), 1, "hello world".into(), "doc.json".into());

        assert_eq!(a.chunk_id, b.chunk_id);
        assert_ne!(a.chunk_id, c.chunk_id);
        assert_eq!(a.chunk_id.len(), 32);
    }

    #[test]
    fn token_estimate_tracks_words() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("one two three four"), 5); // 4 * 1.3 = 5.2
    }
}
