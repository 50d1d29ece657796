use dashmap::DashMap;
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Keyed by SHA-256 of the request text. Off by default: the driver
/// disables response caching, but the knob exists.
pub struct ResponseCache {
    completions: Arc<DashMap<String, String>>,
    embeddings: Arc<DashMap<String, Vec<f32>>>,
    max_entries: usize,
}

impl ResponseCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            completions: Arc::new(DashMap::new()),
            embeddings: Arc::new(DashMap::new()),
            max_entries,
        }
    }

    pub fn get_completion(&self, prompt: &str) -> Option<String> {
        self.completions.get(&hash_key(prompt)).map(|r| r.value().clone())
    }

    pub fn put_completion(&self, prompt: &str, response: String) {
        evict_if_full(&self.completions, self.max_entries);
        self.completions.insert(hash_key(prompt), response);
    }

    pub fn get_embedding(&self, text: &str) -> Option<Vec<f32>> {
        self.embeddings.get(&hash_key(text)).map(|r| r.value().clone())
    }

    pub fn put_embedding(&self, text: &str, embedding: Vec<f32>) {
        evict_if_full(&self.embeddings, self.max_entries);
        self.embeddings.insert(hash_key(text), embedding);
    }

    pub fn clear(&self) {
        self.completions.clear();
        self.embeddings.clear();
    }

    pub fn len(&self) -> usize {
        self.completions.len() + self.embeddings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn hash_key(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

/// Drop a quarter of the entries when the map is full.
fn evict_if_full<V>(map: &DashMap<String, V>, max_entries: usize) {
    if map.len() < max_entries {
        return;
    }
    let to_remove: Vec<String> = map
        .iter()
        .take(max_entries / 4 + 1)
        .map(|r| r.key().clone())
        .collect();
    for key in to_remove {
        map.remove(&key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_round_trip() {
        let cache = ResponseCache::new(16);
        assert!(cache.get_completion("p").is_none());
        cache.put_completion("p", "answer".to_string());
        assert_eq!(cache.get_completion("p").unwrap(), "answer");
        assert!(cache.get_completion("other").is_none());
    }

    #[test]
    fn eviction_keeps_map_bounded() {
        let cache = ResponseCache::new(8);
        for i in 0..100 {
            cache.put_completion(&format!("p{}", i), "x".to_string());
        }
        assert!(cache.completions.len() <= 8);
    }

    #[test]
    fn embedding_round_trip() {
        let cache = ResponseCache::new(16);
        cache.put_embedding("t", vec![0.1, 0.2]);
        assert_eq!(cache.get_embedding("t").unwrap(), vec![0.1, 0.2]);
    }

    #[test]
    fn clear_empties_both_maps() {
        let cache = ResponseCache::new(16);
        cache.put_completion("p", "r".to_string());
        cache.put_embedding("t", vec![1.0]);
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }
}
