//! Preset repository
//!
//! Owns id generation, prefix scoping, and the CRUD surface over preset
//! documents.

use std::time::{SystemTime, UNIX_EPOCH};

use super::{default_slot, PresetEnvelope, PresetError, PresetOption, PRESET_PREFIX};
use crate::store::{DocStore, Document, StoreError, WriteAck};

/// Preset CRUD layer over a document store.
pub struct PresetStore<S> {
    store: S,
}

impl<S: DocStore> PresetStore<S> {
    /// Wrap a document store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the repository, returning the underlying store
    pub fn into_store(self) -> S {
        self.store
    }

    /// Create a new preset: stamps a fresh id and the label into `envelope`
    /// and persists it.
    pub fn add(
        &mut self,
        label: impl Into<String>,
        envelope: &mut PresetEnvelope,
    ) -> Result<WriteAck, PresetError> {
        let id = self.generate_id();
        envelope.label = Some(label.into());
        envelope.id = Some(id.clone());
        let ack = self.store.put(Document::new(id, envelope.to_value()?))?;
        log::info!("Added preset {}", ack.id);
        Ok(ack)
    }

    /// Rename and replace an existing preset.
    ///
    /// Fails with [`PresetError::NoSelection`] when the envelope was never
    /// added.
    pub fn update(
        &mut self,
        label: impl Into<String>,
        envelope: &mut PresetEnvelope,
    ) -> Result<WriteAck, PresetError> {
        let id = envelope.id.clone().ok_or(PresetError::NoSelection)?;
        envelope.label = Some(label.into());
        self.replace(&id, envelope)
    }

    /// Replace an existing preset's payload wholesale, keeping whatever label
    /// the envelope carries. Same failure modes as [`update`](Self::update).
    pub fn save(&mut self, envelope: &PresetEnvelope) -> Result<WriteAck, PresetError> {
        let id = envelope.id.clone().ok_or(PresetError::NoSelection)?;
        self.replace(&id, envelope)
    }

    fn replace(&mut self, id: &str, envelope: &PresetEnvelope) -> Result<WriteAck, PresetError> {
        let mut doc = self
            .store
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        // The default flag is owned by the selector; a stale copy in the
        // caller's envelope must not move it.
        let stored = PresetEnvelope::from_value(&doc.data).unwrap_or_default();
        let mut next = envelope.clone();
        next.is_default = stored.is_default;
        doc.data = next.to_value()?;
        let ack = self.store.put(doc)?;
        log::info!("Saved preset {}", ack.id);
        Ok(ack)
    }

    /// Delete a preset document. Deleting an unknown id is a no-op success.
    ///
    /// Does not touch the default pointer even when it names `id`; the
    /// pointer is only rewritten by [`set_default`](Self::set_default).
    pub fn remove(&mut self, id: &str) -> Result<(), PresetError> {
        self.store.remove(id)?;
        log::info!("Removed preset {}", id);
        Ok(())
    }

    /// Point lookup of a preset document
    pub fn get(&self, id: &str) -> Option<Document> {
        self.store.get(id)
    }

    /// Every preset document in the store; order is store-defined
    pub fn list_all(&self) -> Vec<Document> {
        self.store.all_docs(PRESET_PREFIX)
    }

    /// Picker rows derived from [`list_all`](Self::list_all)
    pub fn list_all_options(&self) -> Vec<PresetOption> {
        self.list_all()
            .iter()
            .map(|doc| {
                let envelope = PresetEnvelope::from_value(&doc.data).unwrap_or_default();
                PresetOption {
                    label: envelope.label.unwrap_or_default(),
                    value: envelope.id.unwrap_or_else(|| doc.id.clone()),
                    checked: envelope.is_default,
                }
            })
            .collect()
    }

    /// Flag `envelope`'s preset as the single default, demoting the previous
    /// one and repointing the default-pointer document.
    pub fn set_default(&mut self, envelope: &mut PresetEnvelope) -> Result<WriteAck, PresetError> {
        default_slot::set_default(&mut self.store, envelope)
    }

    /// Id of the preset currently flagged default, if any
    pub fn current_default_id(&self) -> Option<String> {
        default_slot::current_default_id(&self.store)
    }

    fn generate_id(&self) -> String {
        let mut millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        // Two adds can land in the same millisecond; ids must stay unique.
        loop {
            let id = format!("{}-{}", PRESET_PREFIX, millis);
            if self.store.get(&id).is_none() {
                return id;
            }
            millis += 1;
        }
    }
}
