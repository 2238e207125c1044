//! Core WizardEngine implementation

use log::{debug, info, warn};
use uuid::Uuid;

use crate::definition::WizardDefinition;
use crate::draft::{restore_fields, Draft, DraftKey, DraftStore, InMemoryDraftStore, RestoreReport};
use crate::engine::{EngineBuilder, SubmissionState, WizardSession};
use crate::errors::WizardError;
use crate::event::{EventStore, InMemoryEventStore, WizardEvent, WizardEventKind};
use crate::hashing::hash_value;
use crate::model::FormData;
use crate::step::{StepStatus, StepView, ValidationFailure, WizardStep};
use crate::submission::{SubmissionClient, SubmissionOutcome};

/// Controlador de estados finito de un wizard.
///
/// Secuencia pasos, bloquea el avance con el validador del paso actual,
/// permite retroceder sin validar, persiste drafts en cada edición y orquesta
/// el envío final revalidando todos los pasos.
#[derive(Debug)]
pub struct WizardEngine<D, E = InMemoryEventStore>
    where D: DraftStore,
          E: EventStore
{
    definition: WizardDefinition,
    drafts: D,
    events: E,
}

impl WizardEngine<InMemoryDraftStore, InMemoryEventStore> {
    /// Engine con stores en memoria.
    pub fn in_memory(definition: WizardDefinition) -> Self {
        Self::new(definition, InMemoryDraftStore::new(), InMemoryEventStore::default())
    }
}

impl<D, E> WizardEngine<D, E>
    where D: DraftStore,
          E: EventStore
{
    /// Crea un builder para declarar pasos y esquema.
    #[inline]
    pub fn builder(flow: impl Into<String>, drafts: D, events: E) -> EngineBuilder<D, E> {
        EngineBuilder::new(flow.into(), drafts, events)
    }

    pub fn new(definition: WizardDefinition, drafts: D, events: E) -> Self {
        Self { definition,
               drafts,
               events }
    }

    pub fn definition(&self) -> &WizardDefinition {
        &self.definition
    }

    pub fn draft_store(&self) -> &D {
        &self.drafts
    }

    pub fn draft_store_mut(&mut self) -> &mut D {
        &mut self.drafts
    }

    pub fn event_store(&self) -> &E {
        &self.events
    }

    /// Eventos de una sesión, en orden.
    pub fn events_for(&self, session_id: Uuid) -> Vec<WizardEvent> {
        self.events.list(session_id)
    }

    /// Variante compacta de los eventos de una sesión (ver `WizardEventKind::code`).
    pub fn event_codes(&self, session_id: Uuid) -> Vec<&'static str> {
        self.events.list(session_id).iter().map(|e| e.kind.code()).collect()
    }

    // ------------------------------------------------------------------
    // Ciclo de vida de la sesión
    // ------------------------------------------------------------------

    /// Abre una sesión para `key`, restaurando el draft guardado si existe.
    /// Un error del store se degrada a "sin draft".
    pub fn initialize(&mut self, key: DraftKey, initial: FormData) -> WizardSession {
        let restored = match self.drafts.load(&key) {
            Ok(d) => d,
            Err(e) => {
                warn!("initialize: draft load failed key={key} err={e}; using defaults");
                None
            }
        };
        self.initialize_with_draft(key, initial, restored)
    }

    /// Abre una sesión en el paso 0, `idle`, fusionando `restored` (si hay)
    /// sobre `initial` campo a campo.
    pub fn initialize_with_draft(&mut self,
                                 key: DraftKey,
                                 initial: FormData,
                                 restored: Option<Draft>)
                                 -> WizardSession {
        let (data, report) = match &restored {
            Some(draft) => {
                if draft.definition_hash != self.definition.definition_hash() {
                    info!("initialize: draft {key} was saved by another definition ({}); restoring field by field",
                          draft.definition_hash);
                }
                restore_fields(&initial, &draft.data, self.definition.schema())
            }
            None => (initial, RestoreReport::default()),
        };
        self.open_session(key, data, report)
    }

    fn open_session(&mut self, key: DraftKey, data: FormData, report: RestoreReport) -> WizardSession {
        let session = WizardSession::new(key, data, self.definition.len());
        self.events.append_kind(session.id,
                                WizardEventKind::SessionInitialized { flow: self.definition.flow().to_string(),
                                                                      definition_hash: self.definition
                                                                                           .definition_hash()
                                                                                           .to_string(),
                                                                      step_count: self.definition.len(),
                                                                      draft_key: session.draft_key.to_string(),
                                                                      restored_fields: report.restored,
                                                                      rejected_fields: report.rejected });
        debug!("open_session flow={} session={} key={}",
               self.definition.flow(),
               session.id,
               session.draft_key);
        session
    }

    /// Sesión nueva (otro id) para la misma clave, desde `initial`.
    /// Tras un envío exitoso el draft ya fue borrado; desde `idle`/`error`
    /// el draft se conserva (usar `discard` para borrarlo).
    pub fn reset(&mut self, session: &WizardSession, initial: FormData) -> Result<WizardSession, WizardError> {
        if session.is_submitting() {
            return Err(WizardError::SubmissionInProgress);
        }
        Ok(self.replace_session(session, initial))
    }

    /// Cancelar y descartar: borra el draft y devuelve una sesión nueva.
    pub fn discard(&mut self, session: &WizardSession, initial: FormData) -> Result<WizardSession, WizardError> {
        if session.is_submitting() {
            return Err(WizardError::SubmissionInProgress);
        }
        self.clear_draft(session);
        Ok(self.replace_session(session, initial))
    }

    fn replace_session(&mut self, old: &WizardSession, initial: FormData) -> WizardSession {
        let fresh = self.open_session(old.draft_key.clone(), initial, RestoreReport::default());
        self.events
            .append_kind(old.id, WizardEventKind::SessionReset { next_session_id: fresh.id });
        fresh
    }

    // ------------------------------------------------------------------
    // Edición y navegación
    // ------------------------------------------------------------------

    /// Edición y navegación sólo desde `idle`; desde `error` la sesión vuelve
    /// primero a `idle` (el usuario está corrigiendo).
    fn begin_edit(&mut self, session: &mut WizardSession, op: &'static str) -> Result<(), WizardError> {
        match session.submission {
            SubmissionState::Idle => Ok(()),
            SubmissionState::Error => {
                self.back_to_idle(session);
                Ok(())
            }
            SubmissionState::Submitting => Err(WizardError::SubmissionInProgress),
            SubmissionState::Success => Err(WizardError::InvalidState { op,
                                                                        state: SubmissionState::Success }),
        }
    }

    /// Merge shallow de `partial` sobre los datos y escritura del draft.
    /// No valida. Un fallo del store se loguea y no interrumpe al usuario.
    /// Editar tras un envío fallido vuelve la sesión a `idle`.
    pub fn update_data(&mut self, session: &mut WizardSession, partial: FormData) -> Result<(), WizardError> {
        self.begin_edit(session, "update_data")?;
        let fields = session.data.merge(partial);
        self.save_draft(session);
        self.events.append_kind(session.id, WizardEventKind::DataUpdated { fields });
        Ok(())
    }

    /// Valida el paso actual y avanza uno si es válido (no-op en el último).
    /// Devuelve el índice resultante.
    pub fn go_next(&mut self, session: &mut WizardSession) -> Result<usize, WizardError> {
        self.begin_edit(session, "go_next")?;
        let from = session.current_step;
        if let Some(failure) = self.validate_step(from, &session.data) {
            session.errors = failure.field_errors.clone();
            self.record_failure(session.id, &failure);
            return Err(WizardError::Validation(failure));
        }
        session.errors.clear();
        session.mark_passed(from);

        let to = (from + 1).min(self.definition.last_index());
        if to != from {
            session.current_step = to;
            let step_id = self.step_id(to);
            self.events
                .append_kind(session.id, WizardEventKind::StepAdvanced { from, to, step_id });
        }
        Ok(to)
    }

    /// Retrocede un paso (piso 0). Nunca valida; descarta los errores del
    /// paso que se abandona.
    pub fn go_previous(&mut self, session: &mut WizardSession) -> Result<usize, WizardError> {
        self.begin_edit(session, "go_previous")?;
        session.errors.clear();
        let from = session.current_step;
        if from == 0 {
            return Ok(0);
        }
        Ok(self.retreat(session, from - 1))
    }

    /// Salta a un paso ya completado (índice estrictamente menor al actual).
    /// Saltar hacia adelante se rechaza: el avance sólo ocurre con `go_next`.
    pub fn go_to_step(&mut self, session: &mut WizardSession, target_id: &str) -> Result<usize, WizardError> {
        self.begin_edit(session, "go_to_step")?;
        let target = self.definition
                         .index_of(target_id)
                         .ok_or_else(|| WizardError::UnknownStep(target_id.to_string()))?;
        if target >= session.current_step {
            return Err(WizardError::ForwardJumpRejected { target: target_id.to_string(),
                                                          current: session.current_step });
        }
        session.errors.clear();
        Ok(self.retreat(session, target))
    }

    fn retreat(&mut self, session: &mut WizardSession, to: usize) -> usize {
        let from = session.current_step;
        session.current_step = to;
        let step_id = self.step_id(to);
        self.events
            .append_kind(session.id, WizardEventKind::StepRetreated { from, to, step_id });
        to
    }

    // ------------------------------------------------------------------
    // Envío
    // ------------------------------------------------------------------

    /// Envía la sesión.
    ///
    /// Revalida todos los pasos en orden (las ediciones hechas tras
    /// retroceder no pasaron por ningún validador); el primer paso inválido
    /// reposiciona el cursor y devuelve `Invalid` sin tocar la red. Los
    /// errores del cliente se convierten en estado `error` y en
    /// `SubmissionOutcome::Failed`; nunca se propagan como `Err`.
    ///
    /// `Err` sólo indica que el estado de la sesión no permite enviar.
    pub async fn submit<C>(&mut self,
                           session: &mut WizardSession,
                           client: &C)
                           -> Result<SubmissionOutcome, WizardError>
        where C: SubmissionClient + ?Sized
    {
        match session.submission {
            SubmissionState::Idle => {}
            SubmissionState::Submitting => return Err(WizardError::SubmissionInProgress),
            other => return Err(WizardError::InvalidState { op: "submit", state: other }),
        }

        for index in 0..self.definition.len() {
            if let Some(failure) = self.validate_step(index, &session.data) {
                session.current_step = index;
                session.errors = failure.field_errors.clone();
                self.record_failure(session.id, &failure);
                debug!("submit: blocked at step {} session={}", failure.step_id, session.id);
                return Ok(SubmissionOutcome::Invalid(failure));
            }
            session.mark_passed(index);
        }

        session.errors.clear();
        session.submission = SubmissionState::Submitting;
        let payload = session.data.to_value();
        self.events
            .append_kind(session.id,
                         WizardEventKind::SubmissionStarted { payload_hash: hash_value(&payload) });

        match client.create(&payload).await {
            Ok(receipt) => {
                session.submission = SubmissionState::Success;
                session.last_error = None;
                session.last_receipt = Some(receipt.clone());
                self.events
                    .append_kind(session.id,
                                 WizardEventKind::SubmissionSucceeded { receipt_id: receipt.id.clone() });
                self.clear_draft(session);
                info!("submit: flow={} session={} created id={}",
                      self.definition.flow(),
                      session.id,
                      receipt.id);
                Ok(SubmissionOutcome::Submitted(receipt))
            }
            Err(err) => {
                session.submission = SubmissionState::Error;
                session.last_error = Some(err.user_message());
                self.events
                    .append_kind(session.id, WizardEventKind::SubmissionFailed { message: err.to_string() });
                warn!("submit: flow={} session={} failed: {err}", self.definition.flow(), session.id);
                Ok(SubmissionOutcome::Failed(err))
            }
        }
    }

    /// `error` → `idle`, para que el usuario vuelva a intentar el envío.
    pub fn retry(&mut self, session: &mut WizardSession) -> Result<(), WizardError> {
        if session.submission != SubmissionState::Error {
            return Err(WizardError::InvalidState { op: "retry",
                                                   state: session.submission });
        }
        self.back_to_idle(session);
        Ok(())
    }

    fn back_to_idle(&mut self, session: &mut WizardSession) {
        session.submission = SubmissionState::Idle;
        session.last_error = None;
        self.events.append_kind(session.id, WizardEventKind::SubmissionRetried);
    }

    // ------------------------------------------------------------------
    // Vistas
    // ------------------------------------------------------------------

    pub fn current_step(&self, session: &WizardSession) -> Option<&dyn WizardStep> {
        self.definition.step(session.current_step)
    }

    pub fn step_statuses(&self, session: &WizardSession) -> Vec<StepStatus> {
        self.step_views(session).into_iter().map(|v| v.status).collect()
    }

    /// Estado de cada paso para la capa de presentación.
    pub fn step_views(&self, session: &WizardSession) -> Vec<StepView> {
        self.definition
            .steps()
            .iter()
            .enumerate()
            .map(|(index, step)| {
                let status = if index == session.current_step {
                    if session.errors.is_empty() {
                        StepStatus::Current
                    } else {
                        StepStatus::Blocked
                    }
                } else if session.has_passed(index) {
                    StepStatus::Passed
                } else {
                    StepStatus::Pending
                };
                StepView { index,
                           id: step.id().to_string(),
                           title: step.title().to_string(),
                           render_token: step.render_token().to_string(),
                           status }
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Helpers internos
    // ------------------------------------------------------------------

    fn validate_step(&self, index: usize, data: &FormData) -> Option<ValidationFailure> {
        let step = self.definition.step(index)?;
        let result = step.validate(data);
        if result.is_valid() {
            return None;
        }
        Some(ValidationFailure { step_index: index,
                                 step_id: step.id().to_string(),
                                 field_errors: result.field_errors })
    }

    fn record_failure(&mut self, session_id: Uuid, failure: &ValidationFailure) {
        self.events
            .append_kind(session_id,
                         WizardEventKind::ValidationFailed { step_index: failure.step_index,
                                                             step_id: failure.step_id.clone(),
                                                             fields: failure.fields() });
    }

    fn step_id(&self, index: usize) -> String {
        self.definition.step(index).map(|s| s.id().to_string()).unwrap_or_default()
    }

    fn save_draft(&mut self, session: &WizardSession) {
        let draft = Draft::new(session.draft_key.clone(),
                               self.definition.flow(),
                               self.definition.definition_hash(),
                               &session.data);
        if let Err(e) = self.drafts.save(&draft) {
            warn!("draft save failed key={} err={e}", session.draft_key);
        }
    }

    fn clear_draft(&mut self, session: &WizardSession) {
        match self.drafts.clear(&session.draft_key) {
            Ok(()) => {
                self.events
                    .append_kind(session.id,
                                 WizardEventKind::DraftCleared { draft_key: session.draft_key.to_string() });
            }
            Err(e) => warn!("draft clear failed key={} err={e}", session.draft_key),
        }
    }
}
