//! Cableado de la CLI: backend de drafts, cliente de envío y ejecución de un
//! wizard a partir de un archivo de respuestas.

use std::path::Path;

use log::info;
use serde::Serialize;
use serde_json::Value;

use megi_core::draft::DraftStore;
use megi_core::{FormData, InMemoryDraftStore, InMemoryEventStore, SubmissionClient, SubmissionOutcome,
                ValidationFailure, WizardEngine, WizardError, WizardSession, WizardStep};
use megi_flows::FlowKind;
use megi_persistence::{build_dev_pool_from_env, FileDraftStore, PgDraftStore, PoolProvider};

use crate::config::DraftBackend;
use crate::errors::AppError;

/// Abre el store configurado.
pub fn open_store(backend: &DraftBackend) -> Result<Box<dyn DraftStore>, AppError> {
    Ok(match backend {
        DraftBackend::Postgres => {
            let pool = build_dev_pool_from_env()?;
            Box::new(PgDraftStore::new(PoolProvider { pool }))
        }
        DraftBackend::Directory(dir) => Box::new(FileDraftStore::open(dir)?),
        DraftBackend::Memory => Box::new(InMemoryDraftStore::new()),
    })
}

/// Respuestas de un archivo: un objeto (todas las respuestas juntas) o una
/// lista de objetos, uno por paso.
pub fn parse_answers(raw: &str) -> Result<Vec<FormData>, AppError> {
    let value: Value = serde_json::from_str(raw).map_err(|e| AppError::Answers(e.to_string()))?;
    match value {
        Value::Object(map) => Ok(vec![FormData::from(map)]),
        Value::Array(items) => items.into_iter()
                                    .enumerate()
                                    .map(|(i, item)| {
                                        FormData::from_value(item).ok_or_else(|| {
                                                                      AppError::Answers(format!("entry {i} is not an object"))
                                                                  })
                                    })
                                    .collect(),
        _ => Err(AppError::Answers("expected an object or a list of objects".into())),
    }
}

pub fn read_answers(path: &Path) -> Result<Vec<FormData>, AppError> {
    parse_answers(&std::fs::read_to_string(path)?)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    /// Un paso no valida; el draft queda guardado.
    Blocked { step_id: String, errors: Vec<(String, String)> },
    /// Todos los pasos validan; no se envió nada.
    DryRun,
    Submitted { id: String },
    /// El backend falló; el draft queda guardado.
    Failed { message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub flow: String,
    pub draft_key: String,
    pub final_step: String,
    pub outcome: RunOutcome,
    /// Códigos compactos del diario de la sesión.
    pub events: Vec<&'static str>,
}

impl RunReport {
    pub fn exit_code(&self) -> i32 {
        match self.outcome {
            RunOutcome::Submitted { .. } | RunOutcome::DryRun => 0,
            RunOutcome::Blocked { .. } => 3,
            RunOutcome::Failed { .. } => 4,
        }
    }
}

fn blocked(failure: ValidationFailure) -> RunOutcome {
    RunOutcome::Blocked { step_id: failure.step_id,
                          errors: failure.field_errors.into_iter().collect() }
}

/// Ejecuta un wizard de punta a punta: restaura el draft, aplica cada tanda
/// de respuestas y avanza; con todo válido envía (o no, con `client = None`).
pub async fn run_flow<D>(kind: FlowKind,
                         instance: Option<&str>,
                         answers: Vec<FormData>,
                         drafts: D,
                         client: Option<&dyn SubmissionClient>)
                         -> Result<RunReport, AppError>
    where D: DraftStore
{
    let mut engine: WizardEngine<D> = kind.engine(drafts, InMemoryEventStore::default())?;
    let key = kind.draft_key(instance)?;
    let mut session = engine.initialize(key, kind.defaults(instance));
    let last = engine.definition().last_index();

    let mut outcome = None;
    for batch in answers {
        engine.update_data(&mut session, batch)?;
        if session.current_step_index() == last {
            continue;
        }
        match engine.go_next(&mut session) {
            Ok(_) => {}
            Err(WizardError::Validation(failure)) => {
                outcome = Some(blocked(failure));
                break;
            }
            Err(other) => return Err(other.into()),
        }
    }
    // respuestas agrupadas en un solo objeto: avanzar mientras valide
    while outcome.is_none() && session.current_step_index() < last {
        if let Err(err) = engine.go_next(&mut session) {
            match err {
                WizardError::Validation(failure) => outcome = Some(blocked(failure)),
                other => return Err(other.into()),
            }
        }
    }

    let outcome = match (outcome, client) {
        (Some(o), _) => o,
        (None, None) => {
            // misma revalidación completa que submit, sin tocar la sesión
            match first_invalid(&engine, &session) {
                Some(failure) => blocked(failure),
                None => RunOutcome::DryRun,
            }
        }
        (None, Some(client)) => match engine.submit(&mut session, client).await? {
            SubmissionOutcome::Submitted(receipt) => RunOutcome::Submitted { id: receipt.id },
            SubmissionOutcome::Invalid(failure) => blocked(failure),
            SubmissionOutcome::Failed(err) => RunOutcome::Failed { message: err.user_message() },
        },
    };

    let final_step = engine.current_step(&session).map(|s| s.id().to_string()).unwrap_or_default();
    info!("run flow={} key={} step={} outcome={:?}",
          kind,
          session.draft_key(),
          final_step,
          outcome);
    Ok(RunReport { flow: kind.to_string(),
                   draft_key: session.draft_key().to_string(),
                   final_step,
                   outcome,
                   events: engine.event_codes(session.id()) })
}

/// Primer paso inválido sin tocar la sesión.
fn first_invalid<D: DraftStore>(engine: &WizardEngine<D>, session: &WizardSession) -> Option<ValidationFailure> {
    engine.definition().steps().iter().enumerate().find_map(|(index, step)| {
        let res = step.validate(session.data());
        (!res.is_valid()).then(|| ValidationFailure { step_index: index,
                                                      step_id: step.id().to_string(),
                                                      field_errors: res.field_errors })
    })
}
