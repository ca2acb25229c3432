//! Editing session: snapshot baseline plus the commit message draft.
//!
//! The draft follows the auto-generated summary until the user types over
//! it. Typing text equal to the current summary hands control back to the
//! generator.

use crate::diff::{section_changes, summarize_changes, SectionChange, TrackedSection};
use crate::diff::DEFAULT_TRACKED_SECTIONS;
use crate::document::{ContentDocument, Snapshot};
use crate::errors::{ExError, Result};
use crate::sync::{CommitSyncRequest, CommitSyncResponse, ContentBackend};
use crate::{log_op_end, log_op_error, log_op_start};
use folio_core_types::SessionId;
use std::time::Instant;

/// Commit message being prepared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitDraft {
    message: String,
    manual: bool,
    auto_summary: String,
}

impl CommitDraft {
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the user has typed over the generated summary.
    pub fn is_manual(&self) -> bool {
        self.manual
    }

    pub fn auto_summary(&self) -> &str {
        &self.auto_summary
    }
}

/// One admin editing session.
#[derive(Debug, Clone)]
pub struct EditSession {
    id: SessionId,
    snapshot: Snapshot,
    tracked: &'static [TrackedSection],
    draft: CommitDraft,
}

impl EditSession {
    /// Capture the baseline for a new session.
    pub fn start(document: &ContentDocument) -> Self {
        Self::resume(SessionId::new(), document.snapshot())
    }

    /// Continue session `id` from its previously captured baseline.
    pub fn resume(id: SessionId, snapshot: Snapshot) -> Self {
        Self {
            id,
            snapshot,
            tracked: DEFAULT_TRACKED_SECTIONS,
            draft: CommitDraft::default(),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Changed tracked sections with their field labels.
    pub fn changes(&self, current: &ContentDocument) -> Vec<SectionChange> {
        section_changes(self.tracked, self.snapshot.sections(), current.sections())
    }

    /// Recompute the generated summary and apply it to the draft if the
    /// user has not taken over.
    pub fn refresh_draft(&mut self, current: &ContentDocument) -> &CommitDraft {
        self.draft.auto_summary = summarize_changes(&self.changes(current));
        if !self.draft.manual {
            self.draft.message = self.draft.auto_summary.clone();
        } else if self.draft.message == self.draft.auto_summary {
            self.draft.manual = false;
        }
        &self.draft
    }

    /// Replace the draft with user text.
    pub fn edit_draft(&mut self, text: impl Into<String>) {
        self.draft.message = text.into();
        self.draft.manual = self.draft.message != self.draft.auto_summary;
    }

    pub fn draft(&self) -> &CommitDraft {
        &self.draft
    }

    /// Build the commit-sync body from `branch` and the current draft.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the branch or the draft is blank.
    pub fn commit_request(&self, branch: &str) -> Result<CommitSyncRequest> {
        CommitSyncRequest::new(branch, &self.draft.message).map_err(|e| {
            ExError::from(e).with_session_id(self.id.clone())
        })
    }

    /// Clear the draft after a successful sync.
    pub fn mark_committed(&mut self) {
        self.draft.message.clear();
        self.draft.manual = false;
    }

    /// Send the draft to `backend` on `branch`, clearing it on success.
    ///
    /// # Errors
    ///
    /// Validation failures and transport errors. A server-side failure
    /// comes back as `Ok` with `success: false` and leaves the draft alone.
    pub fn commit<B: ContentBackend + ?Sized>(
        &mut self,
        backend: &B,
        branch: &str,
    ) -> Result<CommitSyncResponse> {
        log_op_start!("commit_sync", session_id = %self.id);
        let start = Instant::now();

        let result = self
            .commit_request(branch)
            .and_then(|request| backend.commit_sync(&request))
            .map_err(|e| {
                log_op_error!(
                    "commit_sync",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                e
            })?;

        if result.success {
            self.mark_committed();
        }

        log_op_end!(
            "commit_sync",
            duration_ms = start.elapsed().as_millis() as u64,
            success = result.success,
            steps = result.steps.len()
        );

        Ok(result)
    }
}
