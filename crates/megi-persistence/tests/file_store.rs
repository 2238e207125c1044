use megi_core::draft::{Draft, DraftKey, DraftStore};
use megi_core::{FormData, InMemoryEventStore};
use megi_flows::FlowKind;
use megi_persistence::FileDraftStore;

#[test]
fn save_load_clear_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = FileDraftStore::open(dir.path().join("drafts")).expect("open");
    let key = FlowKind::Dispute.draft_key(Some("c-42")).unwrap();

    assert!(store.load(&key).unwrap().is_none());
    let draft = Draft::new(key.clone(), "dispute", "h1", &FormData::new().with("reason", "Other"));
    store.save(&draft).unwrap();

    let loaded = store.load(&key).unwrap().expect("saved draft");
    assert_eq!(loaded, draft);
    assert_eq!(store.keys().unwrap(), vec!["dispute_c-42".to_string()]);

    store.clear(&key).unwrap();
    assert!(store.load(&key).unwrap().is_none());
    // borrar dos veces no es error
    store.clear(&key).unwrap();
}

#[test]
fn corrupted_file_is_reported_not_panicked() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileDraftStore::open(dir.path()).expect("open");
    let key = FlowKind::JobPosting.draft_key(None).unwrap();
    std::fs::write(store.path_for(&key), b"{not json").unwrap();
    assert!(store.load(&key).is_err());
}

#[test]
fn engine_survives_restart_with_file_store() {
    let dir = tempfile::tempdir().expect("tempdir");
    let kind = FlowKind::JobPosting;
    let key = kind.draft_key(None).unwrap();
    {
        let store = FileDraftStore::open(dir.path()).unwrap();
        let mut engine = kind.engine(store, InMemoryEventStore::default()).unwrap();
        let mut s = engine.initialize(key.clone(), kind.defaults(None));
        engine.update_data(&mut s, FormData::new().with("title", "Persisted title")).unwrap();
    }
    let store = FileDraftStore::open(dir.path()).unwrap();
    let mut engine = kind.engine(store, InMemoryEventStore::default()).unwrap();
    let s = engine.initialize(key, kind.defaults(None));
    assert_eq!(s.data().text("title"), "Persisted title");
}

#[test]
fn corrupted_file_degrades_to_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let kind = FlowKind::Gig;
    let key = kind.draft_key(None).unwrap();
    let store = FileDraftStore::open(dir.path()).unwrap();
    std::fs::write(store.path_for(&key), b"garbage").unwrap();

    let mut engine = kind.engine(store, InMemoryEventStore::default()).unwrap();
    let s = engine.initialize(key, kind.defaults(None));
    assert_eq!(s.data(), &kind.defaults(None));
}

#[test]
fn distinct_keys_never_share_a_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = FileDraftStore::open(dir.path()).expect("open");
    let slashed = DraftKey::from_raw("dispute_c/1");
    let dashed = FlowKind::Dispute.draft_key(Some("c-1")).unwrap();
    assert_ne!(store.path_for(&slashed), store.path_for(&dashed));

    store.save(&Draft::new(slashed.clone(), "dispute", "h1", &FormData::new().with("reason", "from-a")))
         .unwrap();
    assert!(store.load(&dashed).unwrap().is_none());

    store.clear(&dashed).unwrap();
    let kept = store.load(&slashed).unwrap().expect("untouched draft");
    assert_eq!(kept.data["reason"], "from-a");
    assert_eq!(store.keys().unwrap(), vec!["dispute_c/1".to_string()]);
}

#[test]
fn draft_under_foreign_file_name_is_ignored() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = FileDraftStore::open(dir.path()).expect("open");
    let a = FlowKind::Dispute.draft_key(Some("c-1")).unwrap();
    let b = FlowKind::Dispute.draft_key(Some("c-2")).unwrap();
    store.save(&Draft::new(a.clone(), "dispute", "h1", &FormData::new().with("reason", "Other")))
         .unwrap();
    std::fs::copy(store.path_for(&a), store.path_for(&b)).unwrap();
    assert!(store.load(&b).unwrap().is_none());
}
