//! Preset storage
//!
//! CRUD over prefix-scoped preset documents plus the single "default" slot.

mod default_slot;
mod repository;

pub use default_slot::DefaultPointer;
pub use repository::PresetStore;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::store::StoreError;

/// Prefix every preset document id starts with.
pub const PRESET_PREFIX: &str = "preset";

/// Well-known id of the default-pointer document. Deliberately outside the
/// preset prefix so `all_docs(PRESET_PREFIX)` never returns it.
pub const DEFAULT_POINTER_ID: &str = "default";

/// Errors surfaced by preset operations.
#[derive(Error, Debug)]
pub enum PresetError {
    /// update/save/set-default called with an envelope that was never added
    #[error("no preset is currently selected")]
    NoSelection,
    /// set-default targeted the preset that is already the default
    #[error("preset {0} is already the default")]
    AlreadyDefault(String),
    /// Underlying store failure, propagated verbatim
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The persisted shape of a preset payload.
///
/// `data` carries the caller's arbitrary settings blob; the surrounding
/// fields are stamped and read by the preset layer only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresetEnvelope {
    /// Preset id, stamped at creation; `None` until first persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Whether this preset is the current default; written only by the
    /// default selector
    #[serde(rename = "isDefault", default)]
    pub is_default: bool,
    /// Opaque caller payload
    #[serde(default)]
    pub data: Value,
}

impl PresetEnvelope {
    /// Wrap a payload that has not been persisted yet
    pub fn new(data: Value) -> Self {
        Self {
            data,
            ..Default::default()
        }
    }

    /// Decode an envelope from a stored document body
    pub(crate) fn from_value(value: &Value) -> Result<Self, StoreError> {
        Ok(serde_json::from_value(value.clone())?)
    }

    /// Encode the envelope into a document body
    pub(crate) fn to_value(&self) -> Result<Value, StoreError> {
        Ok(serde_json::to_value(self)?)
    }
}

/// One row of the preset picker: label, preset id, default flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetOption {
    /// Display label, empty when the preset never carried one
    pub label: String,
    /// Preset id
    pub value: String,
    /// Whether this preset is the current default
    pub checked: bool,
}
