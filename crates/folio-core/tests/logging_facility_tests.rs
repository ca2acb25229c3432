#![allow(clippy::unwrap_used, clippy::expect_used)]

use folio_core::errors::{ExErrorKind, FolioError, Result};
use folio_core::folio_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use folio_core::logging_facility::test_capture::init_test_capture;
use folio_core::sync::{BranchList, CommitSyncRequest, CommitSyncResponse, ContentBackend};
use folio_core::{log_op_end, log_op_error, log_op_start};
use folio_core::{ContentDocument, EditSession, Node};
use serde_json::json;
use std::cell::RefCell;

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    let start_events = capture.count_events(|e| {
        e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_START)
    });
    assert_eq!(start_events, 1);
}

#[test]
fn test_log_op_end_macro_carries_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events_for(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END));
    assert_eq!(events[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_macro_records_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = FolioError::MissingSection {
        key: "projects".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 7);

    let events = capture.events_for(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END_ERROR));
    assert_eq!(events[0].field("err_code"), Some(ExErrorKind::MissingField.code()));
}

/// Backend double that records requests and replies with a fixed outcome.
struct FakeBackend {
    succeed: bool,
    requests: RefCell<Vec<CommitSyncRequest>>,
}

impl ContentBackend for FakeBackend {
    fn commit_sync(&self, request: &CommitSyncRequest) -> Result<CommitSyncResponse> {
        self.requests.borrow_mut().push(request.clone());
        Ok(CommitSyncResponse {
            success: self.succeed,
            branch: Some(request.branch_name.clone()),
            ..CommitSyncResponse::default()
        })
    }

    fn list_branches(&self) -> Result<BranchList> {
        Ok(BranchList::default())
    }

    fn publish(&self, _document: &ContentDocument) -> Result<()> {
        Ok(())
    }

    fn fetch_current(&self) -> Result<Option<Node>> {
        Ok(None)
    }
}

#[test]
fn test_session_commit_logs_and_clears_draft() {
    let capture = init_test_capture();
    let mut current =
        ContentDocument::try_from(Node::from(json!({"home": {"title": "a"}}))).unwrap();
    let mut session = EditSession::start(&current);
    current
        .patch_section("home", Node::from(json!({"title": "b"})))
        .unwrap();
    session.refresh_draft(&current);

    let backend = FakeBackend {
        succeed: true,
        requests: RefCell::new(Vec::new()),
    };
    let response = session.commit(&backend, " main ").unwrap();

    assert!(response.success);
    assert_eq!(session.draft().message(), "");
    let sent = backend.requests.borrow();
    assert_eq!(sent[0].branch_name, "main");
    assert_eq!(sent[0].commit_message, "Update Home (home.title)");

    let events = capture.events_for_session("commit_sync", session.id().as_str());
    let starts = events
        .iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_START))
        .count();
    assert_eq!(starts, 1);
    capture.assert_event_exists("commit_sync", EVENT_END);
}

#[test]
fn test_session_commit_failure_keeps_draft() {
    let mut current =
        ContentDocument::try_from(Node::from(json!({"home": {"title": "a"}}))).unwrap();
    let mut session = EditSession::start(&current);
    current
        .patch_section("home", Node::from(json!({"title": "b"})))
        .unwrap();
    session.refresh_draft(&current);

    let backend = FakeBackend {
        succeed: false,
        requests: RefCell::new(Vec::new()),
    };
    let response = session.commit(&backend, "main").unwrap();
    assert!(!response.success);
    assert_eq!(session.draft().message(), "Update Home (home.title)");
}

#[test]
fn test_session_commit_without_changes_is_rejected() {
    let capture = init_test_capture();
    let current = ContentDocument::try_from(Node::from(json!({}))).unwrap();
    let mut session = EditSession::start(&current);
    let backend = FakeBackend {
        succeed: true,
        requests: RefCell::new(Vec::new()),
    };

    let err = session.commit(&backend, "main").unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    assert!(backend.requests.borrow().is_empty());
    capture.assert_event_exists("commit_sync", EVENT_END_ERROR);
}
