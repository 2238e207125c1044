//! Errores del motor de wizards.
//!
//! Los validadores nunca producen errores: devuelven un `ValidationResult`.
//! `WizardError` cubre violaciones de contrato (definición inválida,
//! navegación prohibida, estado de envío incompatible) y transporta el
//! `ValidationFailure` cuando la navegación hacia adelante queda bloqueada.

use thiserror::Error;

use crate::engine::SubmissionState;
use crate::step::ValidationFailure;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum WizardError {
    #[error("wizard definition has no steps")]
    EmptyDefinition,
    #[error("wizard definition needs a flow name")]
    MissingFlowName,
    #[error("duplicate step id: {0}")]
    DuplicateStepId(String),
    #[error("unknown step: {0}")]
    UnknownStep(String),
    #[error("cannot jump forward to step '{target}' from step index {current}")]
    ForwardJumpRejected { target: String, current: usize },
    #[error("a submission is in progress")]
    SubmissionInProgress,
    #[error("operation '{op}' is not allowed while the session is {state}")]
    InvalidState { op: &'static str, state: SubmissionState },
    #[error("invalid draft key: {0}")]
    InvalidDraftKey(String),
    #[error("{0}")]
    Validation(ValidationFailure),
}

impl WizardError {
    /// Devuelve el fallo de validación si el error es de ese tipo.
    pub fn as_validation(&self) -> Option<&ValidationFailure> {
        match self {
            WizardError::Validation(f) => Some(f),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_state_mentions_operation_and_state() {
        let err = WizardError::InvalidState { op: "retry", state: SubmissionState::Idle };
        assert_eq!(err.to_string(), "operation 'retry' is not allowed while the session is idle");
    }

    #[test]
    fn forward_jump_format() {
        let err = WizardError::ForwardJumpRejected { target: "review".into(), current: 1 };
        assert_eq!(err.to_string(), "cannot jump forward to step 'review' from step index 1");
        assert!(err.as_validation().is_none());
    }
}
