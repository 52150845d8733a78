//! Key-value JSON file backend.
//!
//! The file holds one JSON object. Saved filter sets live as an array
//! under [`SAVED_FILTERS_KEY`]; other keys are preserved on write. A
//! missing file reads as an empty store.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::StorageError;
use crate::record::SavedFilterSet;
use crate::traits::{check_name, FilterSetStore};

/// Key under which saved filter sets are stored.
pub const SAVED_FILTERS_KEY: &str = "prisma-saved-filters";

#[derive(Debug, Clone)]
pub struct JsonFileFilterStore {
    path: PathBuf,
}

impl JsonFileFilterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileFilterStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn read_document(&self) -> Result<Map<String, Value>, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no saved filters file yet");
                return Ok(Map::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };
        if text.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&text)? {
            Value::Object(map) => Ok(map),
            other => Err(StorageError::Backend(format!(
                "{} must contain a JSON object, found {}",
                self.path.display(),
                json_kind(&other)
            ))),
        }
    }

    fn write_document(&self, doc: &Map<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let text = serde_json::to_string_pretty(doc)?;
        fs::write(&self.path, text).map_err(|e| self.io_error(e))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl FilterSetStore for JsonFileFilterStore {
    fn save(&mut self, set: SavedFilterSet) -> Result<(), StorageError> {
        check_name(&set)?;
        let mut doc = self.read_document()?;
        let mut sets = sets_from(&doc)?;
        info!(name = %set.name, path = %self.path.display(), "filter set saved");
        sets.push(set);
        doc.insert(SAVED_FILTERS_KEY.to_string(), serde_json::to_value(&sets)?);
        self.write_document(&doc)
    }

    fn list(&self) -> Result<Vec<SavedFilterSet>, StorageError> {
        sets_from(&self.read_document()?)
    }
}

fn sets_from(doc: &Map<String, Value>) -> Result<Vec<SavedFilterSet>, StorageError> {
    match doc.get(SAVED_FILTERS_KEY) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => Ok(serde_json::from_value(value.clone())?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prisma_catalog::FilterSpec;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileFilterStore::new(dir.path().join("absent.json"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn save_creates_parent_dirs_and_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("filters.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"theme": "dark"}"#).unwrap();

        let mut store = JsonFileFilterStore::new(&path);
        store
            .save(SavedFilterSet::new("fresh", FilterSpec::default().with_freshness(3)))
            .unwrap();

        let doc: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc["theme"], "dark");
        assert_eq!(doc[SAVED_FILTERS_KEY][0]["name"], "fresh");
        assert_eq!(doc[SAVED_FILTERS_KEY][0]["filters"]["freshness"], 3);
    }

    #[test]
    fn non_object_document_is_a_backend_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filters.json");
        fs::write(&path, "[1, 2]").unwrap();
        let err = JsonFileFilterStore::new(&path).list().unwrap_err();
        assert!(matches!(err, StorageError::Backend(_)), "{err}");
    }

    #[test]
    fn corrupt_json_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filters.json");
        fs::write(&path, "{not json").unwrap();
        let err = JsonFileFilterStore::new(&path).list().unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)), "{err}");
    }
}
