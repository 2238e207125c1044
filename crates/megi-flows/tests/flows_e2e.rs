//! Recorridos completos de los flujos sobre stores en memoria.

use async_trait::async_trait;
use megi_core::draft::DraftStore;
use megi_core::{FormData, InMemoryDraftStore, InMemoryEventStore, SubmissionClient, SubmissionError,
                SubmissionOutcome, SubmissionReceipt, SubmissionState};
use megi_flows::FlowKind;
use serde_json::{json, Value};
use std::sync::Mutex;

/// Cliente que guarda los payloads recibidos.
#[derive(Default)]
struct RecordingClient {
    payloads: Mutex<Vec<Value>>,
}

#[async_trait]
impl SubmissionClient for RecordingClient {
    async fn create(&self, payload: &Value) -> Result<SubmissionReceipt, SubmissionError> {
        let mut guard = self.payloads.lock().expect("lock");
        guard.push(payload.clone());
        Ok(SubmissionReceipt::new(format!("srv-{}", guard.len())))
    }
}

#[test]
fn job_posting_walkthrough_submits_and_clears_draft() {
    let kind = FlowKind::JobPosting;
    let mut engine = kind.engine(InMemoryDraftStore::new(), InMemoryEventStore::default()).unwrap();
    let key = kind.draft_key(None).unwrap();
    let mut session = engine.initialize(key.clone(), kind.defaults(None));

    engine.update_data(&mut session,
                       FormData::new().with("title", "Build a CRM").with("category", "Web Development"))
          .unwrap();
    assert_eq!(engine.go_next(&mut session), Ok(1));

    engine.update_data(&mut session,
                       FormData::new().with("description", "A CRM for a small agency with contacts, deals and reports.")
                                      .with("skills", json!(["Rust", "PostgreSQL"])))
          .unwrap();
    assert_eq!(engine.go_next(&mut session), Ok(2));

    engine.update_data(&mut session,
                       FormData::new().with("budgetAmount", 500).with("timeline", "1-2 weeks"))
          .unwrap();
    assert_eq!(engine.go_next(&mut session), Ok(3));

    let client = RecordingClient::default();
    let outcome = tokio_test::block_on(engine.submit(&mut session, &client)).unwrap();
    assert_eq!(outcome, SubmissionOutcome::Submitted(SubmissionReceipt::new("srv-1")));
    assert_eq!(session.submission_state(), SubmissionState::Success);
    assert!(engine.draft_store().load(&key).unwrap().is_none());

    let sent = client.payloads.lock().unwrap();
    assert_eq!(sent[0]["title"], "Build a CRM");
    assert_eq!(sent[0]["budgetType"], "fixed");
}

#[test]
fn dispute_blocks_on_unacknowledged_review() {
    let kind = FlowKind::Dispute;
    let mut engine = kind.engine(InMemoryDraftStore::new(), InMemoryEventStore::default()).unwrap();
    let key = kind.draft_key(Some("c-17")).unwrap();
    let mut session = engine.initialize(key, kind.defaults(Some("c-17")));

    assert_eq!(engine.go_next(&mut session), Ok(1));
    engine.update_data(&mut session, FormData::new().with("reason", "Missed deadline")).unwrap();
    engine.go_next(&mut session).unwrap();
    engine.update_data(&mut session,
                       FormData::new().with("description", "The freelancer stopped answering two weeks before the deadline."))
          .unwrap();
    assert_eq!(engine.go_next(&mut session), Ok(3));

    let client = RecordingClient::default();
    let outcome = tokio_test::block_on(engine.submit(&mut session, &client)).unwrap();
    match outcome {
        SubmissionOutcome::Invalid(failure) => {
            assert_eq!(failure.step_id, "review");
            assert_eq!(failure.message("acknowledged"),
                       Some("You must confirm the information is accurate."));
        }
        other => panic!("expected Invalid, got {other:?}"),
    }
    assert!(client.payloads.lock().unwrap().is_empty());
}

#[test]
fn payment_draft_restores_per_contract() {
    let kind = FlowKind::Payment;
    let mut engine = kind.engine(InMemoryDraftStore::new(), InMemoryEventStore::default()).unwrap();
    let a = kind.draft_key(Some("a")).unwrap();
    let b = kind.draft_key(Some("b")).unwrap();

    let mut s = engine.initialize(a.clone(), kind.defaults(Some("a")));
    engine.update_data(&mut s, FormData::new().with("amount", "120").with("method", "card")).unwrap();

    let restored = engine.initialize(a, kind.defaults(Some("a")));
    assert_eq!(restored.data().text("method"), "card");
    let other = engine.initialize(b, kind.defaults(Some("b")));
    assert_eq!(other.data().text("method"), "");
}

#[test]
fn corrupted_choice_in_draft_falls_back_to_default() {
    let kind = FlowKind::JobPosting;
    let mut engine = kind.engine(InMemoryDraftStore::new(), InMemoryEventStore::default()).unwrap();
    let key = kind.draft_key(None).unwrap();
    let mut s = engine.initialize(key.clone(), kind.defaults(None));
    engine.update_data(&mut s, FormData::new().with("title", "Kept").with("category", "Web Development")).unwrap();

    let mut draft = engine.draft_store().load(&key).unwrap().unwrap();
    draft.data["category"] = json!("Underwater Basket Weaving");
    draft.data["budgetType"] = json!(42);
    engine.draft_store_mut().save(&draft).unwrap();

    let restored = engine.initialize(key, kind.defaults(None));
    assert_eq!(restored.data().text("title"), "Kept");
    assert_eq!(restored.data().text("category"), "");
    assert_eq!(restored.data().text("budgetType"), "fixed");
}
