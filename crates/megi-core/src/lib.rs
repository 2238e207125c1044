//! megi-core: motor de wizards multi-paso (estado finito, drafts, envío)
pub mod constants;
pub mod definition;
pub mod draft;
pub mod engine;
pub mod errors;
pub mod event;
pub mod hashing;
pub mod model;
pub mod step;
pub mod submission;

pub use definition::WizardDefinition;
pub use draft::{Draft, DraftKey, DraftStore, DraftStoreError, InMemoryDraftStore};
pub use engine::{EngineBuilder, SubmissionState, WizardEngine, WizardSession};
pub use errors::WizardError;
pub use event::{EventStore, InMemoryEventStore, WizardEvent, WizardEventKind};
pub use model::{FieldKind, FieldSchema, FormData};
pub use step::{FieldErrors, StepSpec, StepStatus, StepView, ValidationFailure, ValidationResult, WizardStep};
pub use submission::{SubmissionClient, SubmissionError, SubmissionOutcome, SubmissionReceipt};
