//! JSON loading and atomic file operations

use serde::de::DeserializeOwned;
use std::path::Path;

/// Read a whole JSON document from disk
pub fn read_json<T: DeserializeOwned>(path: &Path) -> std::io::Result<T> {
    let contents = std::fs::read_to_string(path)?;
    let value = serde_json::from_str(&contents)?;
    Ok(value)
}

/// Write data atomically using temp file + rename
pub fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let temp_path = path.with_extension("tmp");
    std::fs::write(&temp_path, data)?;
    std::fs::rename(temp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Overlay {
        start: String,
        label: String,
    }

    #[test]
    fn test_read_json() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("overlays.json");
        std::fs::write(&path, r#"[{"start":"10:00","label":"Intro"}]"#).unwrap();

        let overlays: Vec<Overlay> = read_json(&path).unwrap();
        assert_eq!(
            overlays,
            vec![Overlay {
                start: "10:00".to_string(),
                label: "Intro".to_string(),
            }]
        );
    }

    #[test]
    fn test_read_json_malformed() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();

        let result: std::io::Result<Vec<Overlay>> = read_json(&path);
        assert!(result.is_err());
    }

    #[test]
    fn test_atomic_write() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("report.json");

        atomic_write(&path, b"{}").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"{}");
        assert!(!path.with_extension("tmp").exists());
    }
}
