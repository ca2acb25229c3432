//! Folio Store - SQLite persistence for the content document
//!
//! This crate provides:
//! - Connection management and embedded SQL migrations
//! - [`ContentStore`], the persisted document with change listeners
//! - Session snapshot persistence and a commit-sync log

pub mod db;
pub mod errors;
pub mod migrations;
pub mod store;
pub mod sync_log;

pub use errors::Result;
pub use store::{ContentStore, ListenerId};
pub use sync_log::SyncLogEntry;
