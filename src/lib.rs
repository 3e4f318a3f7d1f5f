//! Preset Vault
//!
//! Core of a small plugin-host application: a key-value preset store with a
//! single "default" slot, built on a narrow embedded document-database
//! contract.
//!
//! The preset layer guarantees at most one preset is flagged default at any
//! time and keeps the singleton default-pointer document consistent with the
//! preset it names. The multi-write default swap is sequential, not
//! transactional; see [`PresetStore::set_default`]. All failures are returned
//! as values; the error's `Display` text is the message a caller shows.

pub mod host;
pub mod preset;
pub mod store;
pub mod view;

// Re-export commonly used types
pub use host::{EnterEvent, HostSession};
pub use preset::{DefaultPointer, PresetEnvelope, PresetError, PresetOption, PresetStore};
pub use store::{DocStore, Document, FileStore, MemoryStore, StoreError, WriteAck};
pub use view::View;
