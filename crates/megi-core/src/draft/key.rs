use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::WizardError;

/// Clave de un draft. Siempre lleva el nombre del flujo como prefijo para
/// que dos flujos no colisionen:
/// - flujos singleton (publicar un trabajo): `"{flow}_draft"`
/// - flujos por entidad (disputa de un contrato): `"{flow}_{instance}"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftKey(String);

impl DraftKey {
    pub fn singleton(flow: &str) -> Result<Self, WizardError> {
        check_segment(flow, "flow")?;
        Ok(Self(format!("{flow}_draft")))
    }

    pub fn scoped(flow: &str, instance: &str) -> Result<Self, WizardError> {
        check_segment(flow, "flow")?;
        check_segment(instance, "instance")?;
        Ok(Self(format!("{flow}_{instance}")))
    }

    /// Reconstruye una clave ya formada (lecturas desde un backend).
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Caracteres que un backend de archivos no puede usar tal cual en un nombre.
const PATH_UNSAFE: [char; 3] = ['/', '\\', ':'];

fn check_segment(segment: &str, what: &str) -> Result<(), WizardError> {
    if segment.is_empty() || segment.chars().any(char::is_whitespace) {
        return Err(WizardError::InvalidDraftKey(format!("{what} segment {segment:?} must be non-empty without whitespace")));
    }
    if segment.chars().any(|c| c.is_control() || PATH_UNSAFE.contains(&c)) {
        return Err(WizardError::InvalidDraftKey(format!("{what} segment {segment:?} contains a path separator")));
    }
    Ok(())
}

impl fmt::Display for DraftKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
