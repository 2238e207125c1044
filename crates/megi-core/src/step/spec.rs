//! `StepSpec`: paso construido a partir de datos + un closure validador.
//!
//! Los flujos concretos suelen implementar `WizardStep` directamente; esta
//! variante sirve para wizards armados en runtime y para tests.

use std::fmt;

use crate::model::FormData;

use super::{ValidationResult, WizardStep};

type ValidatorFn = dyn Fn(&FormData) -> ValidationResult + Send + Sync;

pub struct StepSpec {
    id: String,
    title: String,
    render_token: String,
    validator: Option<Box<ValidatorFn>>,
}

impl StepSpec {
    /// Paso sin validador; título y token de render iguales al id.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self { title: id.clone(),
               render_token: id.clone(),
               id,
               validator: None }
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn render_with(mut self, token: impl Into<String>) -> Self {
        self.render_token = token.into();
        self
    }

    pub fn validated_by<F>(mut self, validator: F) -> Self
        where F: Fn(&FormData) -> ValidationResult + Send + Sync + 'static
    {
        self.validator = Some(Box::new(validator));
        self
    }

    pub fn has_validator(&self) -> bool {
        self.validator.is_some()
    }
}

impl fmt::Debug for StepSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepSpec")
         .field("id", &self.id)
         .field("title", &self.title)
         .field("render_token", &self.render_token)
         .field("has_validator", &self.validator.is_some())
         .finish()
    }
}

impl WizardStep for StepSpec {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn render_token(&self) -> &str {
        &self.render_token
    }

    fn validate(&self, data: &FormData) -> ValidationResult {
        match &self.validator {
            Some(v) => v(data),
            None => ValidationResult::valid(),
        }
    }
}
