//! Git sync commands
//!
//! Usage: folio sync <commit|branches|history> ...

use super::{backend, open_store, session, CommandResult};
use crate::config::FolioConfig;
use clap::{Args, Subcommand};
use folio_core::sync::{CommitSyncResponse, ContentBackend};
use folio_core::EditSession;

#[derive(Debug, Args)]
pub struct SyncArgs {
    #[command(subcommand)]
    pub command: SyncCommand,
}

#[derive(Debug, Subcommand)]
pub enum SyncCommand {
    /// Commit and push the published content
    Commit {
        /// Target branch
        #[arg(long)]
        branch: String,

        /// Commit message (default: the session's suggested message)
        #[arg(long, short)]
        message: Option<String>,
    },
    /// List remote branches
    Branches,
    /// Show recent sync attempts
    History {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

pub fn execute(args: SyncArgs, config: &FolioConfig) -> CommandResult {
    match args.command {
        SyncCommand::Commit { branch, message } => execute_commit(&branch, message, config),
        SyncCommand::Branches => {
            let branches = backend(config)?.list_branches()?;
            if !branches.success {
                return Err(branches
                    .error
                    .unwrap_or_else(|| "Unable to load Git branches.".to_string())
                    .into());
            }
            for name in &branches.branches {
                let marker = if branches.current.as_deref() == Some(name.as_str()) {
                    "*"
                } else {
                    " "
                };
                println!("{} {}", marker, name);
            }
            Ok(())
        }
        SyncCommand::History { limit } => {
            let store = open_store(config)?;
            for entry in store.sync_history(limit)? {
                let status = if entry.success { "ok" } else { "failed" };
                println!(
                    "{} {:<6} {} \"{}\" {}",
                    entry.created_at, status, entry.branch, entry.commit_message, entry.outcome
                );
            }
            Ok(())
        }
    }
}

fn execute_commit(branch: &str, message: Option<String>, config: &FolioConfig) -> CommandResult {
    let store = open_store(config)?;
    let mut session = session::resume(&store)?;
    if let Some(text) = message {
        session.edit_draft(text);
    }

    let request = session.commit_request(branch)?;
    let api = backend(config)?;
    let response = match session.commit(&api, branch) {
        Ok(response) => response,
        Err(e) => {
            let failed = CommitSyncResponse::failed(e.to_string());
            store.record_sync(session.id(), &request, &failed)?;
            return Err(e.into());
        }
    };
    store.record_sync(session.id(), &request, &response)?;

    for step in &response.steps {
        let mark = if step.ok { "ok" } else { "!!" };
        println!("[{}] {}: {}", mark, step.step, step.command);
        if let Some(note) = &step.message {
            println!("     {}", note);
        }
    }

    let outcome = response.outcome(&request.branch_name);
    if !response.success {
        return Err(outcome.into());
    }

    // The pushed document becomes the new baseline
    store.save_session(&EditSession::start(store.document()))?;
    println!("{}", outcome);
    Ok(())
}
