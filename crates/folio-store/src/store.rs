//! The persisted content document.
//!
//! [`ContentStore`] owns the live [`ContentDocument`] and mirrors every
//! accepted mutation into SQLite before notifying listeners. A failed
//! mutation leaves both the in-memory document and the database untouched.

use crate::db;
use crate::errors::{corrupt_document, from_rusqlite, io_error, Result};
use crate::migrations::apply_migrations;
use crate::sync_log::{self, SyncLogEntry};
use folio_core::errors::{ExError, FolioError};
use folio_core::folio_core_types::SessionId;
use folio_core::sync::{CommitSyncRequest, CommitSyncResponse};
use folio_core::{log_op_end, log_op_error, log_op_start};
use folio_core::{ContentDocument, EditSession, Node, Record, TypographyOverrides};
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::time::Instant;

const CURRENT_SLOT: &str = "current";
const SNAPSHOT_SLOT: &str = "snapshot";

/// Handle returned by [`ContentStore::on_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&ContentDocument)>;

pub struct ContentStore {
    conn: Connection,
    document: ContentDocument,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl std::fmt::Debug for ContentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentStore")
            .field("sections", &self.document.sections().len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ContentStore {
    /// Open (or create) a store file, seeding it with the default document.
    ///
    /// # Errors
    ///
    /// Persistence errors from SQLite or the migration runner, and
    /// `Serialization` if the stored document no longer parses.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = db::open(path)?;
        db::configure(&conn)?;
        Self::from_connection(conn)
    }

    /// Open a throwaway store backed by an in-memory database.
    ///
    /// # Errors
    ///
    /// See [`ContentStore::open`].
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(db::open_in_memory()?)
    }

    fn from_connection(mut conn: Connection) -> Result<Self> {
        apply_migrations(&mut conn)?;

        let document = match read_slot(&conn, CURRENT_SLOT)? {
            Some(sections) => ContentDocument::from_sections(sections),
            None => {
                let seeded = ContentDocument::default();
                write_slot(&conn, CURRENT_SLOT, seeded.sections(), None)?;
                tracing::debug!(slot = CURRENT_SLOT, "seeded default document");
                seeded
            }
        };

        Ok(Self {
            conn,
            document,
            listeners: Vec::new(),
            next_listener: 0,
        })
    }

    pub fn document(&self) -> &ContentDocument {
        &self.document
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Register a listener called with the new document after each change.
    pub fn on_change(&mut self, listener: impl FnMut(&ContentDocument) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Unregister a listener. Returns false if it was already gone.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Apply `change` to a copy of the document, persist it, then publish it.
    ///
    /// # Errors
    ///
    /// Whatever `change` returns, converted to `ExError`, or a persistence
    /// error. Either way nothing is stored and no listener runs.
    pub fn edit<T>(
        &mut self,
        op: &'static str,
        change: impl FnOnce(&mut ContentDocument) -> std::result::Result<T, FolioError>,
    ) -> Result<T> {
        log_op_start!(op);
        let start = Instant::now();

        let mut next = self.document.clone();
        let outcome = change(&mut next)
            .map_err(ExError::from)
            .and_then(|value| {
                write_slot(&self.conn, CURRENT_SLOT, next.sections(), None)?;
                Ok(value)
            })
            .map_err(|e| {
                log_op_error!(op, e.clone(), duration_ms = start.elapsed().as_millis() as u64);
                if e.op().is_none() {
                    e.with_op(op)
                } else {
                    e
                }
            })?;

        self.document = next;
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.document);
        }

        log_op_end!(
            op,
            duration_ms = start.elapsed().as_millis() as u64,
            listeners = self.listeners.len()
        );
        Ok(outcome)
    }

    /// Shallow-merge `partial` into one section.
    ///
    /// # Errors
    ///
    /// `UnknownSection` for a key outside the document, or a persistence error.
    pub fn patch_section(&mut self, key: &str, partial: Node) -> Result<()> {
        self.edit("patch_section", |doc| doc.patch_section(key, partial))
    }

    /// Merge font selections into the override map.
    ///
    /// # Errors
    ///
    /// Persistence errors only.
    pub fn patch_typography(&mut self, updates: &TypographyOverrides) -> Result<()> {
        self.edit("patch_typography", |doc| {
            doc.patch_typography(updates);
            Ok(())
        })
    }

    /// Swap in a whole document.
    ///
    /// # Errors
    ///
    /// Persistence errors only.
    pub fn replace(&mut self, document: ContentDocument) -> Result<()> {
        self.edit("replace_document", |doc| {
            *doc = document;
            Ok(())
        })
    }

    /// Go back to the default document.
    ///
    /// # Errors
    ///
    /// Persistence errors only.
    pub fn reset(&mut self) -> Result<()> {
        self.edit("reset_document", |doc| {
            *doc = ContentDocument::default();
            Ok(())
        })
    }

    /// Validate an imported tree and lay it over the defaults.
    ///
    /// # Errors
    ///
    /// Import validation errors (`InvalidDocument`, `MissingField`) or a
    /// persistence error.
    pub fn import(&mut self, node: Node) -> Result<()> {
        self.edit("import_document", |doc| {
            *doc = ContentDocument::import(node)?;
            Ok(())
        })
    }

    /// [`ContentStore::import`] from a JSON file on disk.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read, `Serialization` if it is not JSON,
    /// then as [`ContentStore::import`].
    pub fn import_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let text = std::fs::read_to_string(path).map_err(|e| io_error("import_document", e))?;
        let node: Node = serde_json::from_str(&text)
            .map_err(|e| ExError::from(FolioError::from(e)).with_op("import_document"))?;
        self.import(node)
    }

    /// Write the document as pretty JSON.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be written.
    pub fn export_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let text = self.document.to_json_pretty().map_err(ExError::from)?;
        std::fs::write(path, text).map_err(|e| io_error("export_document", e))
    }

    /// Persist a session's baseline and id so a later process can resume
    /// the same session.
    ///
    /// # Errors
    ///
    /// Persistence errors only.
    pub fn save_session(&self, session: &EditSession) -> Result<()> {
        write_slot(
            &self.conn,
            SNAPSHOT_SLOT,
            session.snapshot().sections(),
            Some(session.id()),
        )
    }

    /// The saved session, if any, carrying the id it was saved with.
    ///
    /// A baseline stored without an id gets a fresh one, which is written
    /// back so every later resume agrees on it.
    ///
    /// # Errors
    ///
    /// Persistence errors, or `Serialization` for an unreadable body.
    pub fn load_session(&self) -> Result<Option<EditSession>> {
        let Some(sections) = read_slot(&self.conn, SNAPSHOT_SLOT)? else {
            return Ok(None);
        };
        let stored: Option<String> = self
            .conn
            .query_row(
                "SELECT session_id FROM documents WHERE slot = ?1",
                [SNAPSHOT_SLOT],
                |row| row.get(0),
            )
            .map_err(from_rusqlite)?;

        let snapshot = ContentDocument::from_sections(sections).snapshot();
        match stored {
            Some(id) => Ok(Some(EditSession::resume(SessionId::from_string(id), snapshot))),
            None => {
                let session = EditSession::resume(SessionId::new(), snapshot);
                self.save_session(&session)?;
                Ok(Some(session))
            }
        }
    }

    /// Drop the saved session. Returns false if none was stored.
    ///
    /// # Errors
    ///
    /// Persistence errors only.
    pub fn clear_session(&self) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM documents WHERE slot = ?1", [SNAPSHOT_SLOT])
            .map_err(from_rusqlite)?;
        Ok(removed > 0)
    }

    /// Append a commit-sync attempt to the log.
    ///
    /// # Errors
    ///
    /// Persistence errors only.
    pub fn record_sync(
        &self,
        session_id: &SessionId,
        request: &CommitSyncRequest,
        response: &CommitSyncResponse,
    ) -> Result<()> {
        sync_log::record_sync(&self.conn, session_id, request, response)
    }

    /// Most recent commit-sync attempts, newest first.
    ///
    /// # Errors
    ///
    /// Persistence errors only.
    pub fn sync_history(&self, limit: usize) -> Result<Vec<SyncLogEntry>> {
        sync_log::recent(&self.conn, limit)
    }
}

fn read_slot(conn: &Connection, slot: &str) -> Result<Option<Record>> {
    let body: Option<String> = conn
        .query_row("SELECT body FROM documents WHERE slot = ?1", [slot], |row| {
            row.get(0)
        })
        .optional()
        .map_err(from_rusqlite)?;

    let Some(body) = body else {
        return Ok(None);
    };
    let node: Node = serde_json::from_str(&body).map_err(|e| corrupt_document(slot, e))?;
    match ContentDocument::try_from(node) {
        Ok(document) => Ok(Some(document.sections().clone())),
        Err(e) => Err(ExError::from(e).with_op("load_document")),
    }
}

fn write_slot(
    conn: &Connection,
    slot: &str,
    sections: &Record,
    session_id: Option<&SessionId>,
) -> Result<()> {
    let body = Node::Record(sections.clone()).canonical();
    conn.execute(
        "INSERT INTO documents (slot, body, updated_at, session_id) VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(slot) DO UPDATE SET
            body = excluded.body,
            updated_at = excluded.updated_at,
            session_id = excluded.session_id",
        rusqlite::params![
            slot,
            body,
            chrono::Utc::now().timestamp(),
            session_id.map(SessionId::as_str)
        ],
    )
    .map_err(from_rusqlite)?;
    Ok(())
}
