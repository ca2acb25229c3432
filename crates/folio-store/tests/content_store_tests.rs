//! ContentStore persistence, listeners and session baselines on disk.

use folio_core::errors::ExErrorKind;
use folio_core::folio_core_types::schema::{EVENT_END, EVENT_END_ERROR};
use folio_core::logging_facility::test_capture::init_test_capture;
use folio_core::sync::{CommitSyncRequest, CommitSyncResponse};
use folio_core::{EditSession, FieldPath, MoveDirection, Node, TypographyOverrides};
use folio_store::ContentStore;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> ContentStore {
    ContentStore::open(dir.path().join("folio.db")).unwrap()
}

fn home_title(store: &ContentStore) -> Option<String> {
    store
        .document()
        .section("home")
        .and_then(|s| s.get("title"))
        .and_then(Node::as_str)
        .map(str::to_string)
}

#[test]
fn test_changes_survive_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let mut store = store_in(&dir);
        store
            .patch_section("home", Node::from(json!({"title": "Persisted"})))
            .unwrap();
        let overrides: TypographyOverrides = [("home.title", "serif")].into_iter().collect();
        store.patch_typography(&overrides).unwrap();
    }

    let store = store_in(&dir);
    assert_eq!(home_title(&store).as_deref(), Some("Persisted"));
    assert_eq!(store.document().typography().get("home.title"), Some("serif"));
}

#[test]
fn test_record_operations_go_through_edit() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    let path = FieldPath::key("about").child_key("stats");

    let id = store
        .edit("add_stat", |doc| {
            let mut fields = folio_core::Record::new();
            fields.insert("value".to_string(), Node::from("42"));
            doc.add_record(&path, "stat", fields)
        })
        .unwrap();
    let moved = store
        .edit("move_stat", |doc| doc.move_record(&path, &id, MoveDirection::Up))
        .unwrap();
    assert!(moved);

    let count = store
        .document()
        .get_path(&path)
        .and_then(Node::as_list)
        .map(<[Node]>::len)
        .unwrap();

    let reopened = store_in(&dir);
    let moved_to = reopened
        .document()
        .get_path(&path.child_index(count - 2))
        .and_then(Node::record_id)
        .map(str::to_string);
    assert_eq!(moved_to, Some(id));
}

#[test]
fn test_import_rejects_incomplete_file() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    let file = dir.path().join("partial.json");
    std::fs::write(&file, r#"{"home": {}}"#).unwrap();

    let err = store.import_file(&file).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::MissingField);
    assert_eq!(err.op(), Some("validate_import"));
}

#[test]
fn test_missing_import_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    let err = store.import_file(dir.path().join("absent.json")).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Io);
}

#[test]
fn test_export_then_import_restores_content() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("export.json");

    let mut store = store_in(&dir);
    store
        .patch_section("home", Node::from(json!({"title": "Exported"})))
        .unwrap();
    store.export_file(&file).unwrap();

    store.reset().unwrap();
    assert_ne!(home_title(&store).as_deref(), Some("Exported"));

    store.import_file(&file).unwrap();
    assert_eq!(home_title(&store).as_deref(), Some("Exported"));
}

#[test]
fn test_listeners_fire_once_per_change() {
    let mut store = ContentStore::open_in_memory().unwrap();
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    store.on_change(move |_| *counter.borrow_mut() += 1);

    store
        .patch_section("about", Node::from(json!({"title": "x"})))
        .unwrap();
    store.reset().unwrap();
    let _ = store.patch_section("blog", Node::from(json!({})));

    assert_eq!(*calls.borrow(), 2);
}

#[test]
fn test_saved_baseline_resumes_session() {
    let dir = TempDir::new().unwrap();
    {
        let store = store_in(&dir);
        let session = EditSession::start(store.document());
        store.save_session(&session).unwrap();
    }

    let mut store = store_in(&dir);
    store
        .patch_section("about", Node::from(json!({"title": "Changed"})))
        .unwrap();

    let mut session = store.load_session().unwrap().unwrap();
    assert_eq!(
        session.refresh_draft(store.document()).message(),
        "Update About (about.title)"
    );
}

#[test]
fn test_resumed_session_keeps_its_id_across_processes() {
    let dir = TempDir::new().unwrap();
    let started = {
        let store = store_in(&dir);
        let session = EditSession::start(store.document());
        store.save_session(&session).unwrap();
        session.id().clone()
    };

    let request = CommitSyncRequest::new("main", "Update Home (home.title)").unwrap();
    for _ in 0..2 {
        let store = store_in(&dir);
        let session = store.load_session().unwrap().unwrap();
        assert_eq!(session.id(), &started);
        store
            .record_sync(session.id(), &request, &CommitSyncResponse::failed("push rejected"))
            .unwrap();
    }

    let history = store_in(&dir).sync_history(10).unwrap();
    assert_eq!(history.len(), 2);
    assert!(history.iter().all(|e| e.session_id == started.as_str()));
}

#[test]
fn test_sync_history_newest_first() {
    let store = ContentStore::open_in_memory().unwrap();
    let session = EditSession::start(store.document());

    let first = CommitSyncRequest::new("main", "Update Home (home.title)").unwrap();
    store
        .record_sync(session.id(), &first, &CommitSyncResponse::failed("push rejected"))
        .unwrap();
    let second = CommitSyncRequest::new("main", "Update About (about.title)").unwrap();
    let ok = CommitSyncResponse {
        success: true,
        ..CommitSyncResponse::default()
    };
    store.record_sync(session.id(), &second, &ok).unwrap();

    let history = store.sync_history(10).unwrap();
    assert_eq!(history.len(), 2);
    assert!(history[0].success);
    assert_eq!(history[0].outcome, "Committed and pushed to main.");
    assert_eq!(history[1].outcome, "push rejected");
    assert_eq!(history[1].session_id, session.id().as_str());
}

#[test]
fn test_edit_logs_end_and_end_error() {
    let capture = init_test_capture();
    let mut store = ContentStore::open_in_memory().unwrap();

    store
        .patch_section("home", Node::from(json!({"title": "t"})))
        .unwrap();
    let _ = store.patch_section("blog", Node::from(json!({})));

    capture.assert_event_exists("patch_section", EVENT_END);
    capture.assert_event_exists("patch_section", EVENT_END_ERROR);
}
