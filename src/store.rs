//! String key-value persistence for the tour flag and the notes buffer.
//!
//! Callers share one store as `Rc<dyn KeyValueStore>`. Reads never fail: a
//! missing key is the normal first-run answer. Writes can fail and callers
//! decide whether that matters; the desktop logs and carries on.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("store file {path} is not a JSON string map: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Process-local store. Nothing survives the session.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// On-disk document: one flat JSON object of string values.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct StoreFile(BTreeMap<String, String>);

/// A JSON object of strings on disk, read once and written through on every
/// change.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: RefCell<StoreFile>,
}

impl JsonFileStore {
    /// Loads `path`. A file that does not exist yet yields an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => StoreFile::default(),
            Ok(text) => serde_json::from_str(&text).map_err(|source| StoreError::Format {
                path: path.clone(),
                source,
            })?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => StoreFile::default(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        tracing::debug!(path = %path.display(), keys = entries.0.len(), "loaded store");
        Ok(Self {
            path,
            entries: RefCell::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(&*self.entries.borrow()).map_err(|source| {
            StoreError::Format {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, text).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().0.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .0
            .insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let removed = self.entries.borrow_mut().0.remove(key);
        if removed.is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_get_set_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k"), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn json_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("absent.json")).unwrap();
        assert_eq!(store.get("bill_tour_complete"), None);
    }

    #[test]
    fn json_store_writes_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        {
            let store = JsonFileStore::open(&path).unwrap();
            store.set("bill_notes_content", "hello\nworld").unwrap();
            store.set("bill_tour_complete", "true").unwrap();
            store.remove("bill_tour_complete").unwrap();
        }
        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("bill_notes_content").as_deref(),
            Some("hello\nworld")
        );
        assert_eq!(reopened.get("bill_tour_complete"), None);
    }

    #[test]
    fn json_store_file_is_a_flat_string_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let store = JsonFileStore::open(&path).unwrap();
        store.set("bill_tour_complete", "true").unwrap();
        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw, serde_json::json!({ "bill_tour_complete": "true" }));

        fs::write(&path, r#"{"bill_notes_content": "from elsewhere"}"#).unwrap();
        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("bill_notes_content").as_deref(),
            Some("from elsewhere")
        );
    }

    #[test]
    fn json_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "[1, 2]").unwrap();
        assert!(matches!(
            JsonFileStore::open(&path),
            Err(StoreError::Format { .. })
        ));
    }

    #[test]
    fn json_store_reports_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("missing/dir/store.json")).unwrap();
        let err = store.set("k", "v").unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        // In-memory value is kept even though the write failed.
        assert_eq!(store.get("k").as_deref(), Some("v"));
    }
}
