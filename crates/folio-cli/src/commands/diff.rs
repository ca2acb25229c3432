//! Diff command
//!
//! Usage: folio diff <BEFORE> <AFTER> [--sections | --summary]

use super::CommandResult;
use clap::Args;
use folio_core::diff::{
    compute_changed_paths, section_changes, summarize_changes, DEFAULT_TRACKED_SECTIONS,
};
use folio_core::{ContentDocument, Node};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Baseline JSON file
    pub before: PathBuf,

    /// Edited JSON file
    pub after: PathBuf,

    /// Group field changes by tracked section
    #[arg(long, conflicts_with = "summary")]
    pub sections: bool,

    /// Print only the commit summary line
    #[arg(long)]
    pub summary: bool,
}

fn read_node(path: &Path) -> Result<Node, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("{}: {e}", path.display()))?;
    serde_json::from_str(&text).map_err(|e| format!("{}: {e}", path.display()).into())
}

pub fn execute(args: DiffArgs) -> CommandResult {
    let before = read_node(&args.before)?;
    let after = read_node(&args.after)?;

    if !args.sections && !args.summary {
        let changes = compute_changed_paths(Some(&before), Some(&after));
        if changes.is_empty() {
            println!("No changes.");
        }
        for label in changes.labels() {
            println!("{}", label);
        }
        return Ok(());
    }

    let before = ContentDocument::try_from(before)?;
    let after = ContentDocument::try_from(after)?;
    let changes = section_changes(DEFAULT_TRACKED_SECTIONS, before.sections(), after.sections());

    if args.summary {
        println!("{}", summarize_changes(&changes));
        return Ok(());
    }

    if changes.is_empty() {
        println!("No changes.");
    }
    for change in &changes {
        println!("{} ({})", change.label, change.key);
        for field in &change.fields {
            println!("  - {}", field);
        }
    }
    Ok(())
}
