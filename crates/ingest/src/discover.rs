use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recursively collect all `.json` files under `dir`.
///
/// The result is sorted lexicographically so that two runs over an
/// unchanged tree always see the same files in the same order; walkdir's
/// own ordering is filesystem-dependent.
pub fn json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir) {
        let entry = entry.with_context(|| format!("failed to walk {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str()) == Some("json") {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn discovery_is_recursive_and_json_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sub/deeper")).unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        fs::write(dir.path().join("sub/b.json"), "{}").unwrap();
        fs::write(dir.path().join("sub/deeper/c.json"), "{}").unwrap();
        fs::write(dir.path().join("sub/readme.txt"), "no").unwrap();

        let files = json_files(dir.path()).unwrap();
        assert_eq!(files.len(), 3);
        assert!(files.iter().all(|f| f.extension().unwrap() == "json"));
    }

    #[test]
    fn discovery_is_order_stable() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["z.json", "a.json", "m.json"] {
            fs::write(dir.path().join(name), "{}").unwrap();
        }

        let first = json_files(dir.path()).unwrap();
        let second = json_files(dir.path()).unwrap();
        assert_eq!(first, second);

        let names: Vec<_> = first
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.json", "m.json", "z.json"]);
    }
}
