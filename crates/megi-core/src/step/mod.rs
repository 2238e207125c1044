//! Definiciones relacionadas a Steps del wizard.
//!
//! Un Step es una pantalla de campos más su validador. El motor sólo conoce:
//! - `WizardStep`: interfaz neutral (id, título, token de render, validate).
//! - `StepSpec`: implementación basada en closures para definiciones ad-hoc.
//! - `ValidationResult` / `ValidationFailure`: resultado de validar.
//! - `StepStatus` / `StepView`: vista de progreso para la capa de presentación.

pub mod definition;
pub mod spec;
mod status;
pub mod validation;

pub use definition::WizardStep;
pub use spec::StepSpec;
pub use status::{StepStatus, StepView};
pub use validation::{FieldErrors, ValidationFailure, ValidationResult};
