//! Engine module: `WizardEngine`, su builder y la sesión mutable.
//!
//! El engine es dueño de la definición y de los stores (drafts + diario); la
//! sesión es del caller y se pasa por `&mut` a cada operación.

pub mod builder;
pub mod core;
pub mod session;

pub use self::builder::EngineBuilder;
pub use self::core::WizardEngine;
pub use self::session::{SubmissionState, WizardSession};
