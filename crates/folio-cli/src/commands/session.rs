//! Editing session commands
//!
//! A session is the baseline saved in the store by `folio session start`.
//! Every later command diffs the live document against it.

use super::{open_store, CommandResult};
use crate::config::FolioConfig;
use clap::{Args, Subcommand};
use folio_core::EditSession;
use folio_store::ContentStore;

pub const NO_SESSION: &str = "No editing session. Run `folio session start` first.";

#[derive(Debug, Args)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// Record the current document as the baseline
    Start {
        /// Replace an existing baseline
        #[arg(long)]
        force: bool,
    },
    /// Show changed sections and the suggested commit message
    Status,
    /// Forget the baseline
    Discard,
}

/// Resume the saved session, with its draft brought up to date.
pub fn resume(store: &ContentStore) -> Result<EditSession, Box<dyn std::error::Error>> {
    let mut session = store.load_session()?.ok_or(NO_SESSION)?;
    session.refresh_draft(store.document());
    Ok(session)
}

pub fn execute(args: SessionArgs, config: &FolioConfig) -> CommandResult {
    let store = open_store(config)?;

    match args.command {
        SessionCommand::Start { force } => {
            if !force && store.load_session()?.is_some() {
                return Err("An editing session is already open. Use --force to restart it.".into());
            }
            let session = EditSession::start(store.document());
            store.save_session(&session)?;
            println!("Session started.");
        }
        SessionCommand::Status => {
            let session = resume(&store)?;
            let changes = session.changes(store.document());
            if changes.is_empty() {
                println!("No changes since the session started.");
                return Ok(());
            }
            for change in &changes {
                println!("{} ({})", change.label, change.key);
                for field in &change.fields {
                    println!("  - {}", field);
                }
            }
            println!();
            println!("Suggested message: {}", session.draft().message());
        }
        SessionCommand::Discard => {
            if store.clear_session()? {
                println!("Session discarded.");
            } else {
                println!("No editing session to discard.");
            }
        }
    }

    Ok(())
}
