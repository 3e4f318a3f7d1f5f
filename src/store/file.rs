//! File-backed document store
//!
//! Persists the full document set as one JSON file, rewritten after every
//! mutation. Suited to the single-user, single-threaded host environment.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{DocStore, Document, StoreError, WriteAck};

/// Document store persisted as a JSON file on disk.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    docs: BTreeMap<String, Document>,
}

impl FileStore {
    /// Open a store at `path`, loading any existing document set.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let docs = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let list: Vec<Document> = serde_json::from_str(&contents)?;
            list.into_iter().map(|d| (d.id.clone(), d)).collect()
        } else {
            BTreeMap::new()
        };
        log::info!("Opened document store at {:?} ({} documents)", path, docs.len());
        Ok(Self { path, docs })
    }

    /// Open the store at the default location under the user config directory.
    pub fn open_default() -> Result<Self, StoreError> {
        let dir = Self::default_dir().ok_or(StoreError::NoConfigDir)?;
        fs::create_dir_all(&dir)?;
        Self::open(dir.join("documents.json"))
    }

    /// Default storage directory under the user config directory.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("PresetVault");
            p
        })
    }

    /// Path this store persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let list: Vec<&Document> = self.docs.values().collect();
        let json = serde_json::to_string_pretty(&list)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl DocStore for FileStore {
    fn get(&self, id: &str) -> Option<Document> {
        self.docs.get(id).cloned()
    }

    fn put(&mut self, mut doc: Document) -> Result<WriteAck, StoreError> {
        let current = self.docs.get(&doc.id).map(|d| d.rev).unwrap_or(0);
        if doc.rev != current {
            return Err(StoreError::Conflict(doc.id));
        }
        doc.rev = current + 1;
        let ack = WriteAck {
            id: doc.id.clone(),
            rev: doc.rev,
        };
        self.docs.insert(doc.id.clone(), doc);
        self.flush()?;
        Ok(ack)
    }

    fn remove(&mut self, id: &str) -> Result<(), StoreError> {
        if self.docs.remove(id).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn all_docs(&self, prefix: &str) -> Vec<Document> {
        self.docs
            .values()
            .filter(|d| d.id.starts_with(prefix))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_path(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join("documents.json")
    }

    #[test]
    fn test_open_missing_file_starts_empty() {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(test_path(&dir)).unwrap();
        assert!(store.all_docs("").is_empty());
    }

    #[test]
    fn test_reopen_serves_same_documents() {
        let dir = tempfile::tempdir().unwrap();
        let path = test_path(&dir);

        let mut store = FileStore::open(&path).unwrap();
        store.put(Document::new("preset-1", json!({"a": true}))).unwrap();
        store.put(Document::new("default", json!({"b": 2}))).unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("preset-1").unwrap().data, json!({"a": true}));
        assert_eq!(reopened.get("default").unwrap().rev, 1);
        assert_eq!(reopened.all_docs("preset").len(), 1);
    }

    #[test]
    fn test_revision_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = test_path(&dir);

        let mut store = FileStore::open(&path).unwrap();
        store.put(Document::new("preset-1", json!(1))).unwrap();

        // A stale write against the reopened store must still conflict.
        let mut reopened = FileStore::open(&path).unwrap();
        let err = reopened.put(Document::new("preset-1", json!(2))).unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[test]
    fn test_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = test_path(&dir);

        let mut store = FileStore::open(&path).unwrap();
        store.put(Document::new("preset-1", json!(1))).unwrap();
        store.remove("preset-1").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert!(reopened.get("preset-1").is_none());
    }
}
