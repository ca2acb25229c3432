//! Change tracking between a session snapshot and the live document.
//!
//! ## Entry point
//!
//! ```ignore
//! use folio_core::diff::{section_changes, summarize_changes, DEFAULT_TRACKED_SECTIONS};
//!
//! let changes = section_changes(DEFAULT_TRACKED_SECTIONS, &snapshot, &current);
//! let message = summarize_changes(&changes);
//! ```
//!
//! ## Guarantees
//!
//! - **Total**: every pair of nodes, including absent ones, yields a change record.
//! - **Pure**: neither side is mutated.
//! - **Ordered**: labels appear in traversal order, de-duplicated on first sight.

pub mod engine;
pub mod human_summary;
pub mod model;
pub mod sections;

pub use engine::{compute_changed_paths, compute_changed_paths_at};
pub use human_summary::summarize_changes;
pub use model::{ChangeKind, ChangeRecord, FieldChange, SectionChange, TrackedSection};
pub use sections::{changed_sections, section_changed, section_changes, DEFAULT_TRACKED_SECTIONS};
