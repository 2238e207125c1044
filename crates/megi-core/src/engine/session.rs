//! Sesión de wizard: el estado vivo de una interacción.
//!
//! Los campos son privados al crate: sólo el `WizardEngine` mueve el cursor o
//! el estado de envío, así se mantiene la invariante de que el usuario sólo
//! puede estar en el paso N si los pasos 0..N-1 pasaron su validador en
//! algún momento de la sesión.
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::draft::DraftKey;
use crate::model::FormData;
use crate::step::FieldErrors;
use crate::submission::SubmissionReceipt;

/// Estado de envío de la sesión.
///
/// Transiciones válidas:
/// - `Idle` -> `Submitting` (submit con todos los pasos válidos)
/// - `Submitting` -> `Success` | `Error`
/// - `Error` -> `Idle` (retry)
/// - `Success` -> nueva sesión (reset)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionState {
    Idle,
    Submitting,
    Success,
    Error,
}

impl SubmissionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Success => "success",
            SubmissionState::Error => "error",
        }
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WizardSession {
    pub(crate) id: Uuid,
    pub(crate) draft_key: DraftKey,
    pub(crate) data: FormData,
    pub(crate) errors: FieldErrors,
    pub(crate) current_step: usize,
    pub(crate) submission: SubmissionState,
    pub(crate) passed: Vec<bool>,
    pub(crate) last_receipt: Option<SubmissionReceipt>,
    pub(crate) last_error: Option<String>,
}

impl WizardSession {
    pub(crate) fn new(draft_key: DraftKey, data: FormData, step_count: usize) -> Self {
        Self { id: Uuid::new_v4(),
               draft_key,
               data,
               errors: FieldErrors::new(),
               current_step: 0,
               submission: SubmissionState::Idle,
               passed: vec![false; step_count],
               last_receipt: None,
               last_error: None }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn draft_key(&self) -> &DraftKey {
        &self.draft_key
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    /// Errores del último intento de validación (reemplazados, nunca mezclados).
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn current_step_index(&self) -> usize {
        self.current_step
    }

    pub fn submission_state(&self) -> SubmissionState {
        self.submission
    }

    pub fn is_submitting(&self) -> bool {
        self.submission == SubmissionState::Submitting
    }

    /// `true` si el validador del paso pasó al menos una vez en esta sesión.
    pub fn has_passed(&self, index: usize) -> bool {
        self.passed.get(index).copied().unwrap_or(false)
    }

    /// Índices fuera del rango de la definición que creó la sesión se ignoran.
    pub(crate) fn mark_passed(&mut self, index: usize) {
        if let Some(p) = self.passed.get_mut(index) {
            *p = true;
        }
    }

    pub fn last_receipt(&self) -> Option<&SubmissionReceipt> {
        self.last_receipt.as_ref()
    }

    /// Mensaje legible del último envío fallido.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
