//! Source post records.

use std::path::{Path, PathBuf};

use super::IngestError;

/// One post to turn into an article.
#[derive(Debug, Clone)]
pub struct SourceRecord {
    /// File stem, used to name the generated article
    pub name: String,
    /// Post text handed to the prompt
    pub text: String,
}

impl SourceRecord {
    /// Read a record from a JSON file.
    ///
    /// Uses the `text` field when it is a string, otherwise the whole
    /// document serialized back to JSON.
    pub fn load(path: &Path) -> Result<Self, IngestError> {
        let name = record_name(path)?.to_string();

        let content = std::fs::read_to_string(path).map_err(|e| IngestError::ReadRecord {
            path: path.to_path_buf(),
            source: e,
        })?;

        let value: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| IngestError::ParseRecord {
                path: path.to_path_buf(),
                source: e,
            })?;

        let text = match value.get("text") {
            Some(serde_json::Value::String(text)) => text.clone(),
            _ => value.to_string(),
        };

        Ok(Self { name, text })
    }
}

/// The record's name: its file stem.
pub fn record_name(path: &Path) -> Result<&str, IngestError> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| IngestError::RecordName(path.to_path_buf()))
}

/// List `*.json` files in the source directory, sorted by path.
pub fn discover_records(dir: &Path) -> Result<Vec<PathBuf>, IngestError> {
    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::ReadSourceDir {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|e| e == "json"))
        .collect();
    paths.sort();

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_text_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tuit_1.json");
        std::fs::write(&path, r#"{"id": 1, "text": "Rain expected tomorrow"}"#).unwrap();

        let record = SourceRecord::load(&path).unwrap();
        assert_eq!(record.name, "tuit_1");
        assert_eq!(record.text, "Rain expected tomorrow");
    }

    #[test]
    fn test_load_without_text_uses_whole_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tuit_2.json");
        std::fs::write(&path, r#"{"body": "no text field"}"#).unwrap();

        let record = SourceRecord::load(&path).unwrap();
        assert_eq!(record.text, r#"{"body":"no text field"}"#);
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            SourceRecord::load(&path),
            Err(IngestError::ParseRecord { .. })
        ));
    }

    #[test]
    fn test_discover_records() {
        let dir = tempfile::tempdir().unwrap();
        for file in ["b.json", "a.json", "notes.txt"] {
            std::fs::write(dir.path().join(file), "{}").unwrap();
        }
        std::fs::create_dir(dir.path().join("images")).unwrap();

        let paths = discover_records(dir.path()).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
    }
}
