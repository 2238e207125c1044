//! Builder para `WizardEngine`.
//!
//! Acumula pasos en orden y el esquema de campos; `build` construye la
//! `WizardDefinition` (que verifica las invariantes) y el engine con los
//! stores dados.
//!
//! ```ignore
//! let engine = WizardEngine::builder("job_posting", InMemoryDraftStore::new(), InMemoryEventStore::default())
//!     .step(DetailsStep)
//!     .step(ScopeStep)
//!     .step(StepSpec::new("review"))
//!     .build()?;
//! ```

use crate::definition::WizardDefinition;
use crate::draft::DraftStore;
use crate::engine::WizardEngine;
use crate::errors::WizardError;
use crate::event::EventStore;
use crate::model::FieldSchema;
use crate::step::WizardStep;

pub struct EngineBuilder<D: DraftStore, E: EventStore> {
    flow: String,
    drafts: D,
    events: E,
    steps: Vec<Box<dyn WizardStep>>,
    schema: FieldSchema,
}

impl<D: DraftStore, E: EventStore> EngineBuilder<D, E> {
    pub(crate) fn new(flow: String, drafts: D, events: E) -> Self {
        Self { flow,
               drafts,
               events,
               steps: Vec::new(),
               schema: FieldSchema::new() }
    }

    /// Añade el siguiente paso del wizard.
    #[inline]
    pub fn step<S>(mut self, step: S) -> Self
        where S: WizardStep + 'static
    {
        self.steps.push(Box::new(step));
        self
    }

    #[inline]
    pub fn schema(mut self, schema: FieldSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Falla si no hay pasos, hay ids repetidos o el flujo no tiene nombre.
    pub fn build(self) -> Result<WizardEngine<D, E>, WizardError> {
        let definition = WizardDefinition::new(self.flow, self.steps, self.schema)?;
        Ok(WizardEngine::new(definition, self.drafts, self.events))
    }
}
