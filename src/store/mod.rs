//! Document store contract
//!
//! The narrow get/put/remove/all-docs surface the preset layer is built on,
//! mirroring the host-provided embedded document database.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors reported by a document store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("document update conflict: {0}")]
    Conflict(String),
    #[error("document not found: {0}")]
    NotFound(String),
    #[error("could not find config directory")]
    NoConfigDir,
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single document as the store persists it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document identifier, unique within the store
    #[serde(rename = "_id")]
    pub id: String,
    /// Revision counter; 0 means the document has never been persisted
    #[serde(rename = "_rev", default)]
    pub rev: u64,
    /// Document body
    #[serde(default)]
    pub data: Value,
}

impl Document {
    /// Create a fresh, never-persisted document
    pub fn new(id: impl Into<String>, data: Value) -> Self {
        Self {
            id: id.into(),
            rev: 0,
            data,
        }
    }
}

/// Acknowledgement returned by a successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteAck {
    /// Id of the written document
    pub id: String,
    /// Revision the document now carries
    pub rev: u64,
}

/// The document database surface consumed by the preset layer.
///
/// `put` enforces optimistic concurrency: the incoming document must carry
/// the currently stored revision (or 0 for a new document) or the write is
/// rejected with [`StoreError::Conflict`]. `remove` of an unknown id is a
/// no-op success.
pub trait DocStore {
    /// Point lookup
    fn get(&self, id: &str) -> Option<Document>;

    /// Insert or replace a document
    fn put(&mut self, doc: Document) -> Result<WriteAck, StoreError>;

    /// Delete a document if present
    fn remove(&mut self, id: &str) -> Result<(), StoreError>;

    /// All documents whose id starts with `prefix`; order is store-defined
    fn all_docs(&self, prefix: &str) -> Vec<Document>;
}
