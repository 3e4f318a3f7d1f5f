//! In-memory document store
//!
//! The default backing store for tests and embedded use.

use std::collections::BTreeMap;

use super::{DocStore, Document, StoreError, WriteAck};

/// Document store backed by an in-process map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: BTreeMap<String, Document>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Whether the store holds no documents
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

impl DocStore for MemoryStore {
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
        Ok(ack)
    }

    fn remove(&mut self, id: &str) -> Result<(), StoreError> {
        self.docs.remove(id);
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

    #[test]
    fn test_put_and_get() {
        let mut store = MemoryStore::new();
        let ack = store
            .put(Document::new("doc-1", json!({"x": 1})))
            .unwrap();
        assert_eq!(ack.id, "doc-1");
        assert_eq!(ack.rev, 1);

        let doc = store.get("doc-1").unwrap();
        assert_eq!(doc.rev, 1);
        assert_eq!(doc.data, json!({"x": 1}));
    }

    #[test]
    fn test_put_stale_revision_conflicts() {
        let mut store = MemoryStore::new();
        store.put(Document::new("doc-1", json!(1))).unwrap();

        // A second write that does not carry the stored revision is rejected
        // and the stored document stays untouched.
        let err = store.put(Document::new("doc-1", json!(2))).unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(store.get("doc-1").unwrap().data, json!(1));
    }

    #[test]
    fn test_put_with_current_revision_replaces() {
        let mut store = MemoryStore::new();
        store.put(Document::new("doc-1", json!(1))).unwrap();

        let mut doc = store.get("doc-1").unwrap();
        doc.data = json!(2);
        let ack = store.put(doc).unwrap();
        assert_eq!(ack.rev, 2);
        assert_eq!(store.get("doc-1").unwrap().data, json!(2));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut store = MemoryStore::new();
        assert!(store.remove("nothing-here").is_ok());
    }

    #[test]
    fn test_all_docs_scopes_by_prefix() {
        let mut store = MemoryStore::new();
        store.put(Document::new("preset-1", json!(1))).unwrap();
        store.put(Document::new("preset-2", json!(2))).unwrap();
        store.put(Document::new("default", json!(3))).unwrap();

        assert_eq!(store.len(), 3);
        assert!(!store.is_empty());

        let docs = store.all_docs("preset");
        assert_eq!(docs.len(), 2);
        assert!(docs.iter().all(|d| d.id.starts_with("preset")));
    }
}
