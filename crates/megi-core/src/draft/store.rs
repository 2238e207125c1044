use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::DraftKey;
use crate::constants::DRAFT_SCHEMA_VERSION;
use crate::model::FormData;

/// Snapshot persistido. `data` se guarda como `Value` crudo: lo que vuelve de
/// un backend puede estar corrupto y se sanea al restaurar, no al leer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub key: DraftKey,
    pub flow: String,
    pub definition_hash: String,
    pub data: Value,
    pub saved_at: DateTime<Utc>,
    pub schema_version: u32,
}

impl Draft {
    pub fn new(key: DraftKey, flow: &str, definition_hash: &str, data: &FormData) -> Self {
        Self { key,
               flow: flow.to_string(),
               definition_hash: definition_hash.to_string(),
               data: data.to_value(),
               saved_at: Utc::now(),
               schema_version: DRAFT_SCHEMA_VERSION }
    }
}

#[derive(Debug, Error)]
pub enum DraftStoreError {
    #[error("draft backend error: {0}")]
    Backend(String),
    #[error("draft serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for DraftStoreError {
    fn from(e: serde_json::Error) -> Self {
        DraftStoreError::Serialization(e.to_string())
    }
}

/// Contrato de persistencia de drafts. Un solo escritor y un solo lector por
/// clave (la sesión activa); no se exige nada de concurrencia.
pub trait DraftStore {
    /// Devuelve el draft guardado para `key`, si existe.
    fn load(&self, key: &DraftKey) -> Result<Option<Draft>, DraftStoreError>;
    /// Guarda (sobrescribe) el draft bajo `draft.key`.
    fn save(&mut self, draft: &Draft) -> Result<(), DraftStoreError>;
    /// Elimina el draft. Borrar una clave inexistente no es error.
    fn clear(&mut self, key: &DraftKey) -> Result<(), DraftStoreError>;
}

impl<T: DraftStore + ?Sized> DraftStore for Box<T> {
    fn load(&self, key: &DraftKey) -> Result<Option<Draft>, DraftStoreError> {
        (**self).load(key)
    }
    fn save(&mut self, draft: &Draft) -> Result<(), DraftStoreError> {
        (**self).save(draft)
    }
    fn clear(&mut self, key: &DraftKey) -> Result<(), DraftStoreError> {
        (**self).clear(key)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryDraftStore {
    pub inner: HashMap<DraftKey, Draft>,
}

impl InMemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Inserta un draft arbitrario (p. ej. uno corrupto en tests).
    pub fn seed(&mut self, draft: Draft) {
        self.inner.insert(draft.key.clone(), draft);
    }
}

impl DraftStore for InMemoryDraftStore {
    fn load(&self, key: &DraftKey) -> Result<Option<Draft>, DraftStoreError> {
        Ok(self.inner.get(key).cloned())
    }
    fn save(&mut self, draft: &Draft) -> Result<(), DraftStoreError> {
        self.inner.insert(draft.key.clone(), draft.clone());
        Ok(())
    }
    fn clear(&mut self, key: &DraftKey) -> Result<(), DraftStoreError> {
        self.inner.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_round_trips_data() {
        let key = DraftKey::singleton("job_posting").unwrap();
        let data = FormData::new().with("title", "Build a CRM").with("budgetAmount", 500);
        let mut store = InMemoryDraftStore::new();
        store.save(&Draft::new(key.clone(), "job_posting", "h", &data)).unwrap();

        let loaded = store.load(&key).unwrap().expect("draft");
        assert_eq!(FormData::from_value(loaded.data), Some(data));
        assert_eq!(loaded.schema_version, DRAFT_SCHEMA_VERSION);
    }

    #[test]
    fn save_overwrites_and_clear_removes() {
        let key = DraftKey::scoped("dispute", "c1").unwrap();
        let mut store = InMemoryDraftStore::new();
        store.save(&Draft::new(key.clone(), "dispute", "h", &FormData::new().with("reason", "a")))
             .unwrap();
        store.save(&Draft::new(key.clone(), "dispute", "h", &FormData::new().with("reason", "b")))
             .unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.load(&key).unwrap().unwrap().data["reason"], "b");

        store.clear(&key).unwrap();
        assert!(store.load(&key).unwrap().is_none());
        // idempotente
        store.clear(&key).unwrap();
    }
}
