use anyhow::{Context, Result, bail};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use tracing::info;

/// One named Qdrant collection, driven over the REST API.
pub struct VectorStore {
    base_url: String,
    collection: String,
    score_threshold: f32,
    client: reqwest::Client,
}

#[derive(Debug, Clone)]
pub struct VectorPoint {
    /// Application-level id (chunk id, entity name, relationship pair key).
    pub id: String,
    pub vector: Vec<f32>,
    pub payload: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct ScoredPoint {
    pub score: f32,
    pub payload: HashMap<String, serde_json::Value>,
}

impl ScoredPoint {
    pub fn payload_str(&self, key: &str) -> &str {
        self.payload.get(key).and_then(|v| v.as_str()).unwrap_or("")
    }
}

#[derive(Serialize)]
struct CreateCollection {
    vectors: VectorParams,
}

#[derive(Serialize)]
struct VectorParams {
    size: usize,
    distance: String,
}

#[derive(Serialize)]
struct UpsertPoints {
    points: Vec<PointBody>,
}

#[derive(Serialize)]
struct PointBody {
    id: u64,
    vector: Vec<f32>,
    payload: HashMap<String, serde_json::Value>,
}

impl VectorStore {
    pub fn new(base_url: String, collection: String, score_threshold: f32) -> Self {
        Self {
            base_url,
            collection,
            score_threshold,
            client: reqwest::Client::new(),
        }
    }

    /// Create the collection if it does not exist yet (cosine distance).
    pub async fn ensure_collection(&self, dimension: usize) -> Result<()> {
        let url = format!("{}/collections", self.base_url);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            bail!("failed to list collections: {}", response.status());
        }

        let info: serde_json::Value = response.json().await?;
        let exists = info["result"]["collections"]
            .as_array()
            .map(|cols| {
                cols.iter()
                    .any(|c| c["name"].as_str() == Some(self.collection.as_str()))
            })
            .unwrap_or(false);

        if exists {
            return Ok(());
        }

        info!(collection = %self.collection, dimension, "creating vector collection");

        let url = format!("{}/collections/{}", self.base_url, self.collection);
        let body = CreateCollection {
            vectors: VectorParams {
                size: dimension,
                distance: "Cosine".to_string(),
            },
        };

        let response = self.client.put(&url).json(&body).send().await?;
        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            bail!("failed to create collection {}: {}", self.collection, error_text);
        }

        Ok(())
    }

    pub async fn upsert(&self, points: Vec<VectorPoint>) -> Result<()> {
        if points.is_empty() {
            return Ok(());
        }

        let body = UpsertPoints {
            points: points
                .into_iter()
                .map(|p| {
                    let mut payload = p.payload;
                    payload.insert("id".to_string(), serde_json::json!(p.id));
                    PointBody {
                        id: point_id(&p.id),
                        vector: p.vector,
                        payload,
                    }
                })
                .collect(),
        };

        let url = format!(
            "{}/collections/{}/points?wait=true",
            self.base_url, self.collection
        );
        let response = self.client.put(&url).json(&body).send().await?;
        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            bail!("failed to upsert points into {}: {}", self.collection, error_text);
        }

        Ok(())
    }

    /// Top-k similarity search; hits under the cosine threshold are dropped.
    pub async fn search(&self, vector: Vec<f32>, top_k: usize) -> Result<Vec<ScoredPoint>> {
        let url = format!(
            "{}/collections/{}/points/search",
            self.base_url, self.collection
        );

        let body = serde_json::json!({
            "vector": vector,
            "limit": top_k,
            "with_payload": true,
            "score_threshold": self.score_threshold,
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("failed to send vector search request")?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            bail!("vector search on {} failed: {}", self.collection, error_text);
        }

        let result: serde_json::Value = response
            .json()
            .await
            .context("failed to parse vector search response")?;

        let hits = result["result"]
            .as_array()
            .context("unexpected vector search response shape")?;

        let mut points = Vec::new();
        for hit in hits {
            let score = hit["score"].as_f64().unwrap_or(0.0) as f32;
            let payload = hit["payload"]
                .as_object()
                .map(|m| m.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
                .unwrap_or_default();
            points.push(ScoredPoint { score, payload });
        }

        Ok(points)
    }

    pub async fn drop_collection(&self) -> Result<()> {
        let url = format!("{}/collections/{}", self.base_url, self.collection);
        let response = self.client.delete(&url).send().await?;
        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            bail!("failed to drop collection {}: {}", self.collection, error_text);
        }
        Ok(())
    }
}

/// Stable numeric point id: first 8 bytes of SHA-256 over the record id.
/// Process-local hashers are not reproducible across runs, which would
/// break upsert-by-id.
fn point_id(id: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(id.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_ids_are_stable() {
        assert_eq!(point_id("chunk-1"), point_id("chunk-1"));
        assert_ne!(point_id("chunk-1"), point_id("chunk-2"));
    }

    #[test]
    fn payload_str_tolerates_missing_keys() {
        let point = ScoredPoint {
            score: 0.5,
            payload: HashMap::from([("text".to_string(), serde_json::json!("hello"))]),
        };
        assert_eq!(point.payload_str("text"), "hello");
        assert_eq!(point.payload_str("missing"), "");
    }
}
