//! Folio Core - change tracking and typography overrides for site content
//!
//! This crate provides the in-memory model and operations behind the admin
//! console, including:
//! - A tagged-union node model over the schemaless content document
//! - Field paths with display and flattened renderings
//! - Section and field diffs against a session snapshot
//! - Commit message summaries built from those diffs
//! - Per-field font override resolution and override targets
//! - Content document editing operations and import validation
//! - The editing session and commit-sync wire model

pub mod auth;
pub mod defaults;
pub mod diff;
pub mod document;
pub mod errors;
pub mod ids;
pub mod logging_facility;
pub mod node;
pub mod path;
pub mod session;
pub mod sync;
pub mod typography;

pub use folio_core_types;

// Re-export commonly used types
pub use document::{ContentDocument, MoveDirection, Snapshot};
pub use errors::{ExError, ExErrorKind, FolioError, Result};
pub use node::{Node, Record};
pub use path::{FieldPath, PathSegment};
pub use session::{CommitDraft, EditSession};
pub use typography::{resolve_font, FontId, TypographyOverrides};
