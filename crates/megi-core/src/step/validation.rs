//! Resultado de validación por paso.
//!
//! No hay validez parcial: un paso es válido sólo con `field_errors` vacío.
//! Por campo se conserva el primer mensaje registrado, así un validador puede
//! encadenar "requerido" antes que "longitud mínima" y el usuario ve el más
//! básico.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Campo → mensaje legible. Ordenado por inserción.
pub type FieldErrors = IndexMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub field_errors: FieldErrors,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.field_errors.is_empty()
    }

    /// Registra un error (si el campo ya tenía uno, se conserva el primero).
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.field_errors.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn error(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.add(field, message);
        self
    }

    /// Agrega el error sólo si `ok` es falso.
    pub fn check(self, ok: bool, field: impl Into<String>, message: impl Into<String>) -> Self {
        if ok {
            self
        } else {
            self.error(field, message)
        }
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.field_errors.contains_key(field)
    }

    pub fn message(&self, field: &str) -> Option<&str> {
        self.field_errors.get(field).map(String::as_str)
    }
}

/// Paso que bloqueó el avance (o el envío), con sus errores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailure {
    pub step_index: usize,
    pub step_id: String,
    pub field_errors: FieldErrors,
}

impl ValidationFailure {
    pub fn message(&self, field: &str) -> Option<&str> {
        self.field_errors.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> Vec<String> {
        self.field_errors.keys().cloned().collect()
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.field_errors.keys().map(String::as_str).collect();
        write!(f,
               "step '{}' (index {}) failed validation: {}",
               self.step_id,
               self.step_index,
               fields.join(", "))
    }
}
