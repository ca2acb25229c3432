//! Publish and reload commands

use super::{backend, open_store, CommandResult};
use crate::config::FolioConfig;
use folio_core::sync::ContentBackend;
use folio_core::{ContentDocument, Node};

/// Push the stored document to the public site's data file.
pub fn execute_publish(config: &FolioConfig) -> CommandResult {
    let store = open_store(config)?;
    backend(config)?.publish(store.document())?;
    println!("Published the current document.");
    Ok(())
}

/// Replace the stored document with what the public site currently ships.
pub fn execute_pull(config: &FolioConfig) -> CommandResult {
    let mut store = open_store(config)?;
    match backend(config)?.fetch_current()? {
        Some(Node::Record(sections)) => {
            store.replace(ContentDocument::merge_over_defaults(sections))?;
            println!("Loaded current frontend dataset.");
            Ok(())
        }
        _ => Err("Unexpected response from server.".into()),
    }
}
