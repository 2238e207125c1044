//! Errores de persistencia.
//! Mapea errores de Diesel, del pool y del sistema de archivos a variantes
//! semánticas; el engine sólo ve `DraftStoreError`.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use megi_core::draft::DraftStoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("check violation: {0}")]
    CheckViolation(String),
    #[error("serialization conflict (retryable)")]
    SerializationConflict,
    #[error("transient IO / connection pool error: {0}")]
    TransientIo(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("payload error: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("unknown database error: {0}")]
    Unknown(String),
}

impl From<DieselError> for PersistenceError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(kind, info) => match kind {
                DatabaseErrorKind::CheckViolation => Self::CheckViolation(info.message().to_string()),
                DatabaseErrorKind::SerializationFailure => Self::SerializationConflict,
                DatabaseErrorKind::ClosedConnection => Self::TransientIo(info.message().to_string()),
                other => Self::Unknown(format!("db error kind {:?}: {}", other, info.message())),
            },
            DieselError::DeserializationError(e) => Self::Unknown(format!("deser: {e}")),
            DieselError::SerializationError(e) => Self::Unknown(format!("ser: {e}")),
            DieselError::BrokenTransactionManager => Self::TransientIo("broken transaction manager".into()),
            DieselError::QueryBuilderError(e) => Self::Unknown(format!("query builder: {e}")),
            other => Self::Unknown(format!("unhandled diesel error: {other:?}")),
        }
    }
}

impl From<PersistenceError> for DraftStoreError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::Payload(e) => DraftStoreError::Serialization(e.to_string()),
            other => DraftStoreError::Backend(other.to_string()),
        }
    }
}
