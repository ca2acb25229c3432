//! Commit-sync and publish wire model.
//!
//! The backend runs Git on the server; the console only sends a branch and
//! a message and shows back the step log it receives.

use crate::document::ContentDocument;
use crate::errors::{FolioError, Result};
use crate::node::Node;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/git/commit-sync`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitSyncRequest {
    pub branch_name: String,
    pub commit_message: String,
}

impl CommitSyncRequest {
    /// Trim both parts and require them to be non-empty.
    ///
    /// # Errors
    ///
    /// `IncompleteCommitRequest` if either part is blank.
    pub fn new(branch_name: &str, commit_message: &str) -> std::result::Result<Self, FolioError> {
        let branch_name = branch_name.trim();
        let commit_message = commit_message.trim();
        if branch_name.is_empty() || commit_message.is_empty() {
            return Err(FolioError::IncompleteCommitRequest);
        }
        Ok(Self {
            branch_name: branch_name.to_string(),
            commit_message: commit_message.to_string(),
        })
    }
}

/// One Git step the server ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitStep {
    pub step: String,
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
    #[serde(default)]
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Reply to a commit-sync call. Missing fields default, so error bodies
/// and partial payloads still parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSyncResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default)]
    pub steps: Vec<CommitStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// HTTP status of a failed call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl CommitSyncResponse {
    /// Failure carrying only a transport error message.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// One-line outcome for display.
    pub fn outcome(&self, requested_branch: &str) -> String {
        if self.success {
            format!(
                "Committed and pushed to {}.",
                self.branch.as_deref().unwrap_or(requested_branch)
            )
        } else {
            self.error
                .as_deref()
                .or(self.message.as_deref())
                .unwrap_or("Git sync failed.")
                .to_string()
        }
    }
}

/// Reply to `GET /api/git/branches`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchList {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub branches: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body of `POST /api/publish`.
#[derive(Debug, Clone, Serialize)]
pub struct PublishRequest<'a> {
    pub data: &'a ContentDocument,
}

/// Reply to `GET /api/current`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentData {
    #[serde(default)]
    pub data: Option<Node>,
}

/// Server side of commit-sync, publish and reload.
///
/// The CLI talks HTTP; tests substitute an in-memory fake.
pub trait ContentBackend {
    /// Ask the server to commit and push the published content.
    ///
    /// # Errors
    ///
    /// Transport failures only. A reply with `success: false` is `Ok`.
    fn commit_sync(&self, request: &CommitSyncRequest) -> Result<CommitSyncResponse>;

    /// # Errors
    ///
    /// Transport or decoding failures.
    fn list_branches(&self) -> Result<BranchList>;

    /// Write the document into the public site's data file.
    ///
    /// # Errors
    ///
    /// Transport failures or a non-success status.
    fn publish(&self, document: &ContentDocument) -> Result<()>;

    /// Document the public site currently ships, if the server has one.
    ///
    /// # Errors
    ///
    /// Transport or decoding failures.
    fn fetch_current(&self) -> Result<Option<Node>>;
}
