//! Tipos de evento de una sesión de wizard.
//!
//! Cada operación del `WizardEngine` que cambia el estado de una sesión deja
//! un evento en el `EventStore`. El diario no se usa para reconstruir la
//! sesión (la sesión es del caller); sirve para auditoría y diagnóstico:
//! qué pasos bloquearon, cuántos envíos fallaron, de qué draft se restauró.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WizardEventKind {
    /// Primer evento de una sesión. `restored_fields`/`rejected_fields`
    /// describen la fusión del draft (vacíos si no había draft).
    SessionInitialized {
        flow: String,
        definition_hash: String,
        step_count: usize,
        draft_key: String,
        restored_fields: Vec<String>,
        rejected_fields: Vec<String>,
    },
    /// Merge de campos (sólo nombres; los valores viven en el draft).
    DataUpdated { fields: Vec<String> },
    StepAdvanced { from: usize, to: usize, step_id: String },
    StepRetreated { from: usize, to: usize, step_id: String },
    /// Un validador bloqueó el avance o el envío.
    ValidationFailed {
        step_index: usize,
        step_id: String,
        fields: Vec<String>,
    },
    /// Se llamó al cliente de envío. `payload_hash` = hash canónico del
    /// payload, para correlacionar reintentos sin loguear datos del usuario.
    SubmissionStarted { payload_hash: String },
    SubmissionSucceeded { receipt_id: String },
    SubmissionFailed { message: String },
    /// `error` → `idle` a pedido del usuario.
    SubmissionRetried,
    DraftCleared { draft_key: String },
    /// La sesión fue reemplazada por `next_session_id`.
    SessionReset { next_session_id: Uuid },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardEvent {
    pub seq: u64, // orden de append dentro de la sesión
    pub session_id: Uuid,
    pub kind: WizardEventKind,
    pub ts: DateTime<Utc>,
}

impl WizardEventKind {
    /// Letra compacta por variante (útil en tests y logs de una línea).
    pub fn code(&self) -> &'static str {
        match self {
            WizardEventKind::SessionInitialized { .. } => "I",
            WizardEventKind::DataUpdated { .. } => "D",
            WizardEventKind::StepAdvanced { .. } => "N",
            WizardEventKind::StepRetreated { .. } => "P",
            WizardEventKind::ValidationFailed { .. } => "V",
            WizardEventKind::SubmissionStarted { .. } => "S",
            WizardEventKind::SubmissionSucceeded { .. } => "C",
            WizardEventKind::SubmissionFailed { .. } => "X",
            WizardEventKind::SubmissionRetried => "R",
            WizardEventKind::DraftCleared { .. } => "K",
            WizardEventKind::SessionReset { .. } => "Z",
        }
    }
}
