//! Propiedades del motor de wizards sobre el flujo de publicación de trabajos.

use async_trait::async_trait;
use megi_core::draft::{Draft, DraftKey, DraftStore, DraftStoreError};
use megi_core::{FormData, InMemoryDraftStore, InMemoryEventStore, SubmissionClient, SubmissionError,
                SubmissionOutcome, SubmissionReceipt, SubmissionState, WizardEngine, WizardError};
use megi_flows::FlowKind;
use serde_json::{json, Value};

struct FailingClient;

#[async_trait]
impl SubmissionClient for FailingClient {
    async fn create(&self, _payload: &Value) -> Result<SubmissionReceipt, SubmissionError> {
        Err(SubmissionError::Transport("network unreachable".into()))
    }
}

struct OkClient;

#[async_trait]
impl SubmissionClient for OkClient {
    async fn create(&self, _payload: &Value) -> Result<SubmissionReceipt, SubmissionError> {
        Ok(SubmissionReceipt::new("job-1"))
    }
}

fn job_engine() -> WizardEngine<InMemoryDraftStore> {
    FlowKind::JobPosting.engine(InMemoryDraftStore::new(), InMemoryEventStore::default())
                        .expect("job posting definition")
}

fn job_key() -> DraftKey {
    FlowKind::JobPosting.draft_key(None).unwrap()
}

fn complete_job() -> FormData {
    FlowKind::JobPosting.defaults(None)
                        .with("title", "Build a CRM")
                        .with("category", "Web Development")
                        .with("description", "We need a CRM with contacts, pipelines, reporting and email sync.")
                        .with("skills", json!(["Rust"]))
                        .with("budgetAmount", 500)
                        .with("timeline", "1-2 weeks")
}

#[test]
fn validation_gates_forward_navigation() {
    let mut engine = job_engine();
    let mut s = engine.initialize(job_key(), FlowKind::JobPosting.defaults(None));
    for _ in 0..3 {
        assert!(matches!(engine.go_next(&mut s), Err(WizardError::Validation(_))));
        assert_eq!(s.current_step_index(), 0);
    }
    assert!(!s.errors().is_empty());
}

#[test]
fn backward_navigation_never_validates() {
    let mut engine = job_engine();
    let mut s = engine.initialize(job_key(), complete_job());
    engine.go_next(&mut s).unwrap();
    engine.go_next(&mut s).unwrap();
    // invalida el paso actual y el anterior; retroceder sigue permitido
    engine.update_data(&mut s, FormData::new().with("budgetAmount", 0).with("skills", json!([]))).unwrap();
    assert_eq!(engine.go_previous(&mut s), Ok(1));
    assert_eq!(engine.go_previous(&mut s), Ok(0));
    assert_eq!(engine.go_previous(&mut s), Ok(0));
    assert!(s.errors().is_empty());
}

#[test]
fn no_forward_skip_via_go_to_step() {
    let mut engine = job_engine();
    let mut s = engine.initialize(job_key(), complete_job());
    assert!(matches!(engine.go_to_step(&mut s, "review"), Err(WizardError::ForwardJumpRejected { .. })));
    engine.go_next(&mut s).unwrap();
    assert!(matches!(engine.go_to_step(&mut s, "scope"), Err(WizardError::ForwardJumpRejected { .. })));
    assert_eq!(engine.go_to_step(&mut s, "details"), Ok(0));
}

#[test]
fn draft_round_trip_restores_data() {
    let mut engine = job_engine();
    let mut s = engine.initialize(job_key(), FlowKind::JobPosting.defaults(None));
    engine.update_data(&mut s, FormData::new().with("title", "Draft title").with("skills", json!(["Go"])))
          .unwrap();

    let restored = engine.initialize(job_key(), FlowKind::JobPosting.defaults(None));
    assert_eq!(restored.data().text("title"), "Draft title");
    assert_eq!(restored.data().list_len("skills"), 1);
    assert_eq!(restored.current_step_index(), 0);
    assert_eq!(restored.submission_state(), SubmissionState::Idle);
}

#[test]
fn submit_revalidates_steps_edited_after_passing() {
    let mut engine = job_engine();
    let mut s = engine.initialize(job_key(), complete_job());
    for _ in 0..3 {
        engine.go_next(&mut s).unwrap();
    }
    assert_eq!(s.current_step_index(), 3);
    // details ya pasó; se edita desde review sin volver a validarlo
    engine.update_data(&mut s, FormData::new().with("title", "")).unwrap();

    let outcome = tokio_test::block_on(engine.submit(&mut s, &OkClient)).unwrap();
    match outcome {
        SubmissionOutcome::Invalid(f) => {
            assert_eq!(f.step_id, "details");
            assert_eq!(f.message("title"), Some("Job title is required."));
        }
        other => panic!("expected Invalid, got {other:?}"),
    }
    assert_eq!(s.current_step_index(), 0);
    assert_eq!(s.error_for("title"), Some("Job title is required."));
    assert_eq!(s.submission_state(), SubmissionState::Idle);
}

#[tokio::test]
async fn successful_submit_clears_draft() {
    let mut engine = job_engine();
    let mut s = engine.initialize(job_key(), FlowKind::JobPosting.defaults(None));
    engine.update_data(&mut s, complete_job()).unwrap();
    assert!(engine.draft_store().load(&job_key()).unwrap().is_some());

    let outcome = engine.submit(&mut s, &OkClient).await.unwrap();
    assert!(outcome.is_submitted());
    assert!(engine.draft_store().load(&job_key()).unwrap().is_none());
    assert_eq!(s.last_receipt().map(|r| r.id.as_str()), Some("job-1"));
}

#[test]
fn details_scenario() {
    let mut engine = job_engine();
    let initial = FlowKind::JobPosting.defaults(None).with("category", "Web Development");
    let mut s = engine.initialize(job_key(), initial);

    let err = engine.go_next(&mut s).unwrap_err();
    let failure = err.as_validation().expect("validation failure");
    assert_eq!(failure.field_errors.len(), 1);
    assert_eq!(failure.message("title"), Some("Job title is required."));
    assert_eq!(s.current_step_index(), 0);

    engine.update_data(&mut s, FormData::new().with("title", "Build a CRM").with("category", "Web Development"))
          .unwrap();
    assert_eq!(engine.go_next(&mut s), Ok(1));
    assert_eq!(engine.current_step(&s).map(|st| st.id()), Some("scope"));
}

#[test]
fn budget_scenario() {
    let mut engine = job_engine();
    let mut s = engine.initialize(job_key(), complete_job().with("budgetAmount", 0));
    engine.go_next(&mut s).unwrap();
    engine.go_next(&mut s).unwrap();

    let err = engine.go_next(&mut s).unwrap_err();
    assert_eq!(err.as_validation().and_then(|f| f.message("budgetAmount")),
               Some("Please enter a valid budget amount."));

    engine.update_data(&mut s, FormData::new().with("budgetAmount", 500).with("timeline", "1-2 weeks"))
          .unwrap();
    assert_eq!(engine.go_next(&mut s), Ok(3));
}

#[test]
fn failed_submit_retains_data_and_draft() {
    let mut engine = job_engine();
    let mut s = engine.initialize(job_key(), FlowKind::JobPosting.defaults(None));
    engine.update_data(&mut s, complete_job()).unwrap();
    let before = s.data().text("title").to_string();

    let outcome = tokio_test::block_on(engine.submit(&mut s, &FailingClient)).unwrap();
    assert!(matches!(outcome, SubmissionOutcome::Failed(_)));
    assert_eq!(s.submission_state(), SubmissionState::Error);
    assert_eq!(s.data().text("title"), before);
    let draft = engine.draft_store().load(&job_key()).unwrap().expect("draft kept");
    assert_eq!(draft.data["title"], json!(before));
    assert!(s.last_error().is_some());
}

/// Store que falla en todas las operaciones.
struct BrokenStore;

impl DraftStore for BrokenStore {
    fn load(&self, _key: &DraftKey) -> Result<Option<Draft>, DraftStoreError> {
        Err(DraftStoreError::Backend("disk on fire".into()))
    }
    fn save(&mut self, _draft: &Draft) -> Result<(), DraftStoreError> {
        Err(DraftStoreError::Backend("disk on fire".into()))
    }
    fn clear(&mut self, _key: &DraftKey) -> Result<(), DraftStoreError> {
        Err(DraftStoreError::Backend("disk on fire".into()))
    }
}

#[test]
fn draft_store_failures_never_block_the_user() {
    let mut engine = FlowKind::JobPosting.engine(BrokenStore, InMemoryEventStore::default()).unwrap();
    let mut s = engine.initialize(job_key(), FlowKind::JobPosting.defaults(None));
    engine.update_data(&mut s, complete_job()).unwrap();
    engine.go_next(&mut s).unwrap();
    let outcome = tokio_test::block_on(engine.submit(&mut s, &OkClient)).unwrap();
    assert!(outcome.is_submitted());
    // sin DraftCleared porque el clear falló
    assert!(!engine.event_codes(s.id()).contains(&"K"));
}

#[test]
fn stale_definition_hash_still_restores_fields() {
    let mut store = InMemoryDraftStore::new();
    let data = FormData::new().with("title", "Old draft");
    store.seed(Draft::new(job_key(), "job_posting", "stale-hash", &data));
    let mut engine = FlowKind::JobPosting.engine(store, InMemoryEventStore::default()).unwrap();
    let s = engine.initialize(job_key(), FlowKind::JobPosting.defaults(None));
    assert_eq!(s.data().text("title"), "Old draft");
    assert_eq!(s.data().text("budgetType"), "fixed");
}
