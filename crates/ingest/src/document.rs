use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

/// A document as handed to the insert pipeline: loaded once, inserted, discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
    pub file_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DocMetadata>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocMetadata {
    pub project: String,
}

/// Shape of the corpus files on disk: JSON with the document body under `content`.
#[derive(Deserialize)]
struct CorpusFile {
    content: String,
}

impl Document {
    /// Load a corpus JSON file. The document text is the `content` field,
    /// whitespace-trimmed; the id is the path with its leading directory
    /// component stripped.
    pub async fn load(path: &Path, project: Option<&str>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read corpus file {}", path.display()))?;

        let parsed: CorpusFile = serde_json::from_str(&raw)
            .with_context(|| format!("corpus file {} has no usable `content` field", path.display()))?;

        let id = doc_id_from_path(path);

        Ok(Self {
            id: id.clone(),
            text: parsed.content.trim().to_string(),
            file_path: id,
            metadata: project.map(|p| DocMetadata { project: p.to_string() }),
        })
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Strip the leading path component: `data/AS9100/doc.json` -> `AS9100/doc.json`.
/// A path with a single component is used as-is.
pub fn doc_id_from_path(path: &Path) -> String {
    let full = path.to_string_lossy();
    match full.split_once('/') {
        Some((_, rest)) if !rest.is_empty() => rest.to_string(),
        _ => full.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn doc_id_strips_leading_component() {
        assert_eq!(
            doc_id_from_path(&PathBuf::from("data/AS9100/report.json")),
            "AS9100/report.json"
        );
        assert_eq!(doc_id_from_path(&PathBuf::from("alone.json")), "alone.json");
    }

    #[tokio::test]
    async fn load_trims_content_and_tags_project() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        tokio::fs::write(&path, r#"{"content": "  some text \n"}"#)
            .await
            .unwrap();

        let doc = Document::load(&path, Some("AS9100")).await.unwrap();
        assert_eq!(doc.text, "some text");
        assert_eq!(doc.metadata.unwrap().project, "AS9100");
    }

    #[tokio::test]
    async fn load_rejects_missing_content_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        tokio::fs::write(&path, r#"{"body": "text"}"#).await.unwrap();

        assert!(Document::load(&path, None).await.is_err());
    }
}
