//! Typography override commands
//!
//! Usage: folio font <list|resolve|targets|set> ...

use super::{open_store, CommandResult};
use crate::config::FolioConfig;
use clap::{Args, Subcommand};
use folio_core::typography::{
    apply_font, build_font_targets, font_label, resolve_font, FontId, DEFAULT_FALLBACK,
    FONT_OPTIONS,
};

#[derive(Debug, Args)]
pub struct FontArgs {
    #[command(subcommand)]
    pub command: FontCommand,
}

#[derive(Debug, Subcommand)]
pub enum FontCommand {
    /// List the available fonts
    List,
    /// Print the font family a field renders with
    Resolve(ResolveArgs),
    /// List the fields that accept an override, with their current font
    Targets(TargetsArgs),
    /// Set the font for one or more fields
    Set(SetArgs),
}

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Flattened field key, e.g. about.stats.stat-1.label
    pub field: String,

    /// Font id used when the field has no valid override
    #[arg(long, default_value = DEFAULT_FALLBACK)]
    pub fallback: String,
}

#[derive(Debug, Args)]
pub struct TargetsArgs {
    /// Only show this section
    #[arg(long)]
    pub section: Option<String>,
}

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Font id (display, sans, serif, poppins, cormorant, workSans, crimson)
    pub font: FontId,

    /// Flattened field keys
    #[arg(required = true)]
    pub fields: Vec<String>,
}

pub fn execute(args: FontArgs, config: &FolioConfig) -> CommandResult {
    match args.command {
        FontCommand::List => {
            for option in FONT_OPTIONS {
                println!("{:<10} {:<18} {}", option.id.as_str(), option.label, option.family);
            }
            Ok(())
        }
        FontCommand::Resolve(resolve) => {
            let store = open_store(config)?;
            let overrides = store.document().typography();
            println!("{}", resolve_font(&overrides, &resolve.field, &resolve.fallback));
            Ok(())
        }
        FontCommand::Targets(targets) => execute_targets(targets, config),
        FontCommand::Set(set) => {
            let mut store = open_store(config)?;
            let count = set.fields.len();
            store.edit("apply_font", |doc| {
                apply_font(doc, &set.fields, set.font);
                Ok(())
            })?;
            println!("Set {} field(s) to {}.", count, set.font.label());
            Ok(())
        }
    }
}

fn execute_targets(args: TargetsArgs, config: &FolioConfig) -> CommandResult {
    let store = open_store(config)?;
    let overrides = store.document().typography();

    for section in build_font_targets(store.document()) {
        if args.section.as_deref().is_some_and(|s| s != section.key) {
            continue;
        }
        println!("{}", section.label);
        for field in &section.fields {
            let current = font_label(overrides.get(&field.key).unwrap_or(""));
            println!("  {:<40} {:<10} {} | {}", field.key, current, field.label, field.hint);
        }
    }
    Ok(())
}
