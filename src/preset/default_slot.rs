//! Default slot selector
//!
//! Maintains the singleton default-pointer document and the invariant that at
//! most one preset carries the default flag.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{PresetEnvelope, PresetError, DEFAULT_POINTER_ID};
use crate::store::{DocStore, Document, StoreError, WriteAck};

/// Body of the singleton pointer document naming the current default preset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultPointer {
    /// Id of the preset currently flagged default
    #[serde(
        rename = "currentDefaultId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub current_default_id: Option<String>,
}

/// Id of the preset the pointer currently names, if the pointer exists.
pub fn current_default_id<S: DocStore>(store: &S) -> Option<String> {
    let doc = store.get(DEFAULT_POINTER_ID)?;
    serde_json::from_value::<DefaultPointer>(doc.data)
        .ok()
        .and_then(|p| p.current_default_id)
}

/// Make `envelope`'s preset the single default.
///
/// Promotes the target, demotes the previous default, then repoints the
/// pointer document. The three writes are sequential, not transactional: a
/// failure partway through can leave the flags and the pointer briefly
/// inconsistent. A previous default whose document has vanished is skipped
/// silently; any store failure is returned as-is.
pub fn set_default<S: DocStore>(
    store: &mut S,
    envelope: &mut PresetEnvelope,
) -> Result<WriteAck, PresetError> {
    let id = envelope.id.clone().ok_or(PresetError::NoSelection)?;

    let pointer_doc = store.get(DEFAULT_POINTER_ID);
    let pointer = match &pointer_doc {
        Some(doc) => serde_json::from_value::<DefaultPointer>(doc.data.clone())
            .map_err(StoreError::from)?,
        None => DefaultPointer::default(),
    };

    if pointer.current_default_id.as_deref() == Some(id.as_str()) {
        return Err(PresetError::AlreadyDefault(id));
    }

    // Promote the new default first; the pointer is only rewritten once this
    // write has succeeded.
    envelope.is_default = true;
    let mut target = store
        .get(&id)
        .ok_or_else(|| StoreError::NotFound(id.clone()))?;
    target.data = envelope.to_value()?;
    store.put(target)?;

    // Demote the previous default. A vanished document is skipped; a failing
    // write is not.
    if let Some(previous_id) = pointer.current_default_id.as_deref() {
        match store.get(previous_id) {
            Some(mut previous) => {
                let mut demoted = PresetEnvelope::from_value(&previous.data)?;
                demoted.is_default = false;
                previous.data = demoted.to_value()?;
                store.put(previous)?;
            }
            None => {
                log::warn!(
                    "Previous default {} no longer exists, skipping demote",
                    previous_id
                );
            }
        }
    }

    let mut pointer_doc =
        pointer_doc.unwrap_or_else(|| Document::new(DEFAULT_POINTER_ID, Value::Null));
    pointer_doc.data = serde_json::to_value(DefaultPointer {
        current_default_id: Some(id.clone()),
    })
    .map_err(StoreError::from)?;
    let ack = store.put(pointer_doc)?;
    log::info!("Default preset is now {}", id);
    Ok(ack)
}
