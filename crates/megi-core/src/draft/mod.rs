//! Drafts: snapshots persistidos de `FormData` en progreso.
//!
//! - `DraftKey`: clave con namespace por flujo.
//! - `Draft` + trait `DraftStore`: contrato load/save/clear que consume el
//!   engine (inyectado; el motor no conoce el backend).
//! - `InMemoryDraftStore`: backend en memoria (tests, CLI sin persistencia).
//! - `restore`: fusión campo a campo de un draft sobre los defaults.

mod key;
pub mod restore;
mod store;

pub use key::DraftKey;
pub use restore::{restore_fields, RestoreReport};
pub use store::{Draft, DraftStore, DraftStoreError, InMemoryDraftStore};
