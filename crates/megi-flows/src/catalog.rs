//! Catálogo de flujos conocidos.
//!
//! `FlowKind` es el punto de entrada para la CLI y para quien arme engines
//! por nombre: definición, defaults, esquema, endpoint REST y regla de clave
//! de draft de cada flujo.

use std::fmt;
use std::str::FromStr;

use megi_core::draft::{DraftKey, DraftStore};
use megi_core::event::EventStore;
use megi_core::model::{FieldSchema, FormData};
use megi_core::{WizardDefinition, WizardEngine, WizardError};

use crate::flows::{dispute, gig, job_posting, payment, proposal};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowKind {
    JobPosting,
    Proposal,
    Gig,
    Dispute,
    Payment,
}

/// Cómo se arma la clave del draft de un flujo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftScope {
    /// Un draft por usuario: `"{flow}_draft"`.
    Singleton,
    /// Un draft por entidad (trabajo, contrato): `"{flow}_{instance}"`.
    PerInstance,
}

impl FlowKind {
    pub const ALL: [FlowKind; 5] = [FlowKind::JobPosting,
                                    FlowKind::Proposal,
                                    FlowKind::Gig,
                                    FlowKind::Dispute,
                                    FlowKind::Payment];

    pub fn as_str(&self) -> &'static str {
        match self {
            FlowKind::JobPosting => job_posting::FLOW,
            FlowKind::Proposal => proposal::FLOW,
            FlowKind::Gig => gig::FLOW,
            FlowKind::Dispute => dispute::FLOW,
            FlowKind::Payment => payment::FLOW,
        }
    }

    /// Recurso REST relativo a la URL base del backend.
    pub fn endpoint(&self) -> &'static str {
        match self {
            FlowKind::JobPosting => job_posting::ENDPOINT,
            FlowKind::Proposal => proposal::ENDPOINT,
            FlowKind::Gig => gig::ENDPOINT,
            FlowKind::Dispute => dispute::ENDPOINT,
            FlowKind::Payment => payment::ENDPOINT,
        }
    }

    pub fn scope(&self) -> DraftScope {
        match self {
            FlowKind::JobPosting | FlowKind::Gig => DraftScope::Singleton,
            FlowKind::Proposal | FlowKind::Dispute | FlowKind::Payment => DraftScope::PerInstance,
        }
    }

    /// Clave del draft. Los flujos por entidad exigen `instance`; los
    /// singleton lo ignoran.
    pub fn draft_key(&self, instance: Option<&str>) -> Result<DraftKey, WizardError> {
        match (self.scope(), instance) {
            (DraftScope::Singleton, _) => DraftKey::singleton(self.as_str()),
            (DraftScope::PerInstance, Some(id)) => DraftKey::scoped(self.as_str(), id),
            (DraftScope::PerInstance, None) => {
                Err(WizardError::InvalidDraftKey(format!("flow '{}' needs an instance id", self.as_str())))
            }
        }
    }

    pub fn definition(&self) -> Result<WizardDefinition, WizardError> {
        match self {
            FlowKind::JobPosting => job_posting::definition(),
            FlowKind::Proposal => proposal::definition(),
            FlowKind::Gig => gig::definition(),
            FlowKind::Dispute => dispute::definition(),
            FlowKind::Payment => payment::definition(),
        }
    }

    /// Defaults del caller; `instance` se copia al campo de entidad del
    /// payload cuando el flujo lo tiene.
    pub fn defaults(&self, instance: Option<&str>) -> FormData {
        match self {
            FlowKind::JobPosting => job_posting::defaults(),
            FlowKind::Proposal => proposal::defaults(instance),
            FlowKind::Gig => gig::defaults(),
            FlowKind::Dispute => dispute::defaults(instance),
            FlowKind::Payment => payment::defaults(instance),
        }
    }

    pub fn schema(&self) -> FieldSchema {
        match self {
            FlowKind::JobPosting => job_posting::schema(),
            FlowKind::Proposal => proposal::schema(),
            FlowKind::Gig => gig::schema(),
            FlowKind::Dispute => dispute::schema(),
            FlowKind::Payment => payment::schema(),
        }
    }

    /// Engine del flujo sobre los stores dados.
    pub fn engine<D, E>(&self, drafts: D, events: E) -> Result<WizardEngine<D, E>, WizardError>
        where D: DraftStore,
              E: EventStore
    {
        Ok(WizardEngine::new(self.definition()?, drafts, events))
    }
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFlow(pub String);

impl fmt::Display for UnknownFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown flow '{}'", self.0)
    }
}

impl std::error::Error for UnknownFlow {}

impl FromStr for FlowKind {
    type Err = UnknownFlow;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FlowKind::ALL.into_iter()
                     .find(|k| k.as_str() == s)
                     .ok_or_else(|| UnknownFlow(s.to_string()))
    }
}
