//! HTTP backend for commit-sync, publish and reload.
//!
//! Every request carries the shared admin password in `x-admin-password`.
//! One attempt per call, no retries.

use folio_core::errors::{ExError, ExErrorKind, Result};
use folio_core::folio_core_types::{RequestId, Sensitive};
use folio_core::sync::{
    BranchList, CommitSyncRequest, CommitSyncResponse, ContentBackend, CurrentData,
    PublishRequest,
};
use folio_core::{ContentDocument, Node};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

pub const PASSWORD_HEADER: &str = "x-admin-password";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const COMMIT_SYNC_PATH: &str = "/api/git/commit-sync";
const BRANCHES_PATH: &str = "/api/git/branches";
const PUBLISH_PATH: &str = "/api/publish";
const CURRENT_PATH: &str = "/api/current";

#[derive(Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    password: Sensitive<String>,
}

/// A backend answer, tagged with the id its request went out under.
struct Reply {
    request_id: RequestId,
    status: StatusCode,
    text: String,
}

fn transport_error(op: &str, err: reqwest::Error) -> ExError {
    ExError::new(ExErrorKind::ExternalService)
        .with_op(op.to_string())
        .with_message(err.to_string())
}

fn status_error(op: &str, reply: Reply, fallback: &str) -> ExError {
    let status = reply.status;
    let kind = if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        ExErrorKind::Unauthorised
    } else {
        ExErrorKind::ExternalService
    };
    let message = if reply.text.trim().is_empty() {
        fallback.to_string()
    } else {
        reply.text
    };
    ExError::new(kind)
        .with_op(op.to_string())
        .with_request_id(reply.request_id)
        .with_message(format!("{message} (HTTP {})", status.as_u16()))
}

fn decode_error(op: &str, kind: ExErrorKind, reply: &Reply, err: serde_json::Error) -> ExError {
    ExError::new(kind)
        .with_op(op.to_string())
        .with_request_id(reply.request_id.clone())
        .with_message(format!("Unexpected reply from the backend: {err}"))
}

/// Decode a reply body the way the console does: a non-object body counts
/// as empty, and an explicit `success` in the body wins over the status.
///
/// An object whose fields have the wrong types is an `ExternalService`
/// error rather than an empty reply.
fn merge_reply<T: DeserializeOwned + Default>(op: &str, reply: &Reply) -> Result<(T, bool)> {
    let payload = serde_json::from_str::<Value>(&reply.text)
        .ok()
        .filter(Value::is_object)
        .unwrap_or_else(|| Value::Object(Default::default()));
    let success = payload
        .get("success")
        .and_then(Value::as_bool)
        .unwrap_or_else(|| reply.status.is_success());
    let body = serde_json::from_value(payload)
        .map_err(|e| decode_error(op, ExErrorKind::ExternalService, reply, e))?;
    Ok((body, success))
}

impl ApiClient {
    /// # Errors
    ///
    /// `ExternalService` if the HTTP client cannot be built.
    pub fn new(base_url: &str, password: Sensitive<String>) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| transport_error("build_client", e))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            password,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.client
            .get(self.url(path))
            .header(PASSWORD_HEADER, self.password.expose().as_str())
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.client
            .post(self.url(path))
            .header(PASSWORD_HEADER, self.password.expose().as_str())
    }

    /// Send one request under a fresh [`RequestId`]. The id goes out in
    /// `x-request-id`, into the debug log and onto any transport error.
    fn send(&self, op: &str, request: RequestBuilder) -> Result<Reply> {
        let request_id = RequestId::new();
        tracing::debug!(op, request_id = %request_id, "backend request");

        let response: Response = request
            .header(REQUEST_ID_HEADER, request_id.as_str())
            .send()
            .map_err(|e| transport_error(op, e).with_request_id(request_id.clone()))?;
        let status = response.status();
        let text = response
            .text()
            .map_err(|e| transport_error(op, e).with_request_id(request_id.clone()))?;
        tracing::debug!(
            op,
            request_id = %request_id,
            status = status.as_u16(),
            bytes = text.len(),
            "backend reply"
        );
        Ok(Reply {
            request_id,
            status,
            text,
        })
    }
}

impl ContentBackend for ApiClient {
    fn commit_sync(&self, request: &CommitSyncRequest) -> Result<CommitSyncResponse> {
        let reply = self.send("commit_sync", self.post(COMMIT_SYNC_PATH).json(request))?;
        let (mut response, success): (CommitSyncResponse, bool) =
            merge_reply("commit_sync", &reply)?;
        response.success = success;
        if !reply.status.is_success() {
            response.status = Some(reply.status.as_u16());
        }
        Ok(response)
    }

    fn list_branches(&self) -> Result<BranchList> {
        let reply = self.send("list_branches", self.get(BRANCHES_PATH))?;
        let (mut branches, success): (BranchList, bool) = merge_reply("list_branches", &reply)?;
        branches.success = success;
        if !success && branches.error.is_none() {
            branches.error = Some("Unable to load Git branches.".to_string());
        }
        Ok(branches)
    }

    fn publish(&self, document: &ContentDocument) -> Result<()> {
        let body = PublishRequest { data: document };
        let reply = self.send("publish", self.post(PUBLISH_PATH).json(&body))?;
        if !reply.status.is_success() {
            return Err(status_error("publish", reply, "Failed to publish"));
        }
        Ok(())
    }

    fn fetch_current(&self) -> Result<Option<Node>> {
        let reply = self.send("fetch_current", self.get(CURRENT_PATH))?;
        if !reply.status.is_success() {
            return Err(status_error(
                "fetch_current",
                reply,
                "Failed to load current frontend data",
            ));
        }
        let payload: CurrentData = serde_json::from_str(&reply.text)
            .map_err(|e| decode_error("fetch_current", ExErrorKind::Serialization, &reply, e))?;
        Ok(payload.data)
    }
}
