//! megi-flows: los wizards concretos de MegiLance sobre `megi-core`.
//!
//! Este crate provee:
//! - Un módulo por flujo (`job_posting`, `proposal`, `gig`, `dispute`,
//!   `payment`) con sus pasos, esquema de campos y defaults.
//! - Predicados de validación compartidos (`rules`).
//! - El catálogo `FlowKind` para elegir un flujo por nombre.
//!
//! Los pasos son structs unitarios declarados con `wizard_step!`; el core
//! sólo ve `dyn WizardStep`.

#[macro_use]
mod macros;

pub mod catalog;
pub mod flows;
pub mod rules;

pub use catalog::{DraftScope, FlowKind, UnknownFlow};

#[doc(hidden)]
pub mod __private {
    pub use megi_core::model::FormData;
    pub use megi_core::step::{ValidationResult, WizardStep};
}
