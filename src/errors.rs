use thiserror::Error;

use megi_client::ClientError;
use megi_core::draft::DraftStoreError;
use megi_core::WizardError;
use megi_flows::UnknownFlow;
use megi_persistence::PersistenceError;

/// Errores de la CLI. Cada variante tiene su código de salida.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Archivo de respuestas inválido: {0}")]
    Answers(String),
    #[error(transparent)]
    UnknownFlow(#[from] UnknownFlow),
    #[error("Error del wizard: {0}")]
    Wizard(#[from] WizardError),
    #[error("Error de persistencia: {0}")]
    Persistence(#[from] PersistenceError),
    #[error("Error del store de drafts: {0}")]
    DraftStore(#[from] DraftStoreError),
    #[error("Error del cliente HTTP: {0}")]
    Client(#[from] ClientError),
}

impl AppError {
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Config(_) | AppError::Answers(_) | AppError::UnknownFlow(_) => 2,
            AppError::Wizard(_) => 4,
            AppError::Io(_) | AppError::Persistence(_) | AppError::DraftStore(_) | AppError::Client(_) => 5,
        }
    }
}
