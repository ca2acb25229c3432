//! Commit-sync attempt log

use crate::errors::{from_rusqlite, Result};
use folio_core::folio_core_types::SessionId;
use folio_core::sync::{CommitSyncRequest, CommitSyncResponse};
use rusqlite::Connection;

/// One row of `sync_log`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncLogEntry {
    pub session_id: String,
    pub branch: String,
    pub commit_message: String,
    pub success: bool,
    pub outcome: String,
    /// Unix seconds
    pub created_at: i64,
}

/// # Errors
///
/// Persistence errors only.
pub fn record_sync(
    conn: &Connection,
    session_id: &SessionId,
    request: &CommitSyncRequest,
    response: &CommitSyncResponse,
) -> Result<()> {
    conn.execute(
        "INSERT INTO sync_log (session_id, branch, commit_message, success, outcome, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![
            session_id.as_str(),
            request.branch_name,
            request.commit_message,
            if response.success { 1 } else { 0 },
            response.outcome(&request.branch_name),
            chrono::Utc::now().timestamp(),
        ],
    )
    .map_err(from_rusqlite)?;
    Ok(())
}

/// Newest first, at most `limit` rows.
///
/// # Errors
///
/// Persistence errors only.
pub fn recent(conn: &Connection, limit: usize) -> Result<Vec<SyncLogEntry>> {
    let mut stmt = conn
        .prepare(
            "SELECT session_id, branch, commit_message, success, outcome, created_at
             FROM sync_log ORDER BY id DESC LIMIT ?1",
        )
        .map_err(from_rusqlite)?;
    let rows = stmt
        .query_map([limit as i64], |row| {
            Ok(SyncLogEntry {
                session_id: row.get(0)?,
                branch: row.get(1)?,
                commit_message: row.get(2)?,
                success: row.get::<_, i64>(3)? != 0,
                outcome: row.get(4)?,
                created_at: row.get(5)?,
            })
        })
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(rows)
}
