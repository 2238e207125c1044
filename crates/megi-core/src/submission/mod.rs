//! Contrato del cliente de envío (colaborador externo).
//!
//! El motor sólo necesita una función asíncrona `create(payload)`. No hay
//! reintentos ni backoff dentro del motor: un fallo deja la sesión en estado
//! `error` y el caller decide si reintentar.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::step::ValidationFailure;

/// Identificador devuelto por el backend al crear la entidad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub id: String,
}

impl SubmissionReceipt {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// El backend respondió con error (4xx/5xx) y un mensaje legible.
    #[error("rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("request timed out")]
    Timeout,
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl SubmissionError {
    /// Mensaje para mostrar al usuario junto al botón de reintento.
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::Rejected { message, .. } if !message.trim().is_empty() => message.clone(),
            SubmissionError::Rejected { .. } => "The server rejected the request.".to_string(),
            SubmissionError::Transport(_) | SubmissionError::Timeout => {
                "Could not reach the server. Please try again.".to_string()
            }
            SubmissionError::Decode(_) => "Unexpected response from the server.".to_string(),
        }
    }
}

/// Cliente de envío. Puede suspender (red); el engine lo trata como falible.
#[async_trait]
pub trait SubmissionClient: Send + Sync {
    async fn create(&self, payload: &Value) -> Result<SubmissionReceipt, SubmissionError>;
}

/// Resultado de `WizardEngine::submit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Creado; la sesión queda en `success` y el draft fue borrado.
    Submitted(SubmissionReceipt),
    /// Algún paso no valida; no se llamó al cliente.
    Invalid(ValidationFailure),
    /// El cliente falló; la sesión queda en `error` y el draft se conserva.
    Failed(SubmissionError),
}

impl SubmissionOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmissionOutcome::Submitted(_))
    }

    pub fn receipt(&self) -> Option<&SubmissionReceipt> {
        match self {
            SubmissionOutcome::Submitted(r) => Some(r),
            _ => None,
        }
    }
}
