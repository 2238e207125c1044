//! Definición inmutable de un wizard: flujo, pasos ordenados y esquema de
//! campos.
//!
//! Invariantes verificadas en construcción:
//! - al menos un paso;
//! - ids de paso únicos;
//! - nombre de flujo no vacío (se usa como namespace de drafts).
use std::collections::HashSet;
use std::fmt;

use serde_json::json;

use crate::constants::ENGINE_VERSION;
use crate::errors::WizardError;
use crate::hashing::hash_value;
use crate::model::FieldSchema;
use crate::step::WizardStep;

pub struct WizardDefinition {
    flow: String,
    steps: Vec<Box<dyn WizardStep>>,
    schema: FieldSchema,
    definition_hash: String,
}

impl WizardDefinition {
    pub fn new(flow: impl Into<String>,
               steps: Vec<Box<dyn WizardStep>>,
               schema: FieldSchema)
               -> Result<Self, WizardError> {
        let flow = flow.into();
        if flow.trim().is_empty() {
            return Err(WizardError::MissingFlowName);
        }
        if steps.is_empty() {
            return Err(WizardError::EmptyDefinition);
        }
        let mut seen = HashSet::with_capacity(steps.len());
        for s in &steps {
            if !seen.insert(s.id()) {
                return Err(WizardError::DuplicateStepId(s.id().to_string()));
            }
        }
        let ids: Vec<&str> = steps.iter().map(|s| s.id()).collect();
        let definition_hash = definition_hash_for(&flow, &ids);
        Ok(Self { flow,
                  steps,
                  schema,
                  definition_hash })
    }

    pub fn flow(&self) -> &str {
        &self.flow
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Siempre falso para definiciones construidas con `new`.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    pub fn steps(&self) -> &[Box<dyn WizardStep>] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<&dyn WizardStep> {
        self.steps.get(index).map(|s| s.as_ref())
    }

    pub fn index_of(&self, step_id: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.id() == step_id)
    }

    pub fn step_ids(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.id()).collect()
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    pub fn definition_hash(&self) -> &str {
        &self.definition_hash
    }
}

impl fmt::Debug for WizardDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WizardDefinition")
         .field("flow", &self.flow)
         .field("steps", &self.step_ids())
         .field("definition_hash", &self.definition_hash)
         .finish()
    }
}

/// Hash de la forma de un wizard (versión del motor + flujo + ids en orden).
pub fn definition_hash_for(flow: &str, step_ids: &[&str]) -> String {
    hash_value(&json!({
        "engine_version": ENGINE_VERSION,
        "flow": flow,
        "steps": step_ids,
    }))
}
