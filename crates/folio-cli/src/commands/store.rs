//! Content store commands
//!
//! Usage: folio store <show|get|patch|add|update|remove|move|import|export|reset> ...

use super::{open_store, parse_json_arg, CommandResult};
use crate::config::FolioConfig;
use clap::{Args, Subcommand};
use folio_core::{FieldPath, MoveDirection, Node, Record};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct StoreArgs {
    #[command(subcommand)]
    pub command: StoreCommand,
}

#[derive(Debug, Subcommand)]
pub enum StoreCommand {
    /// Print the document, or one section, as JSON
    Show {
        #[arg(long)]
        section: Option<String>,
    },
    /// Print the value at a flattened path, e.g. about.stats.stat-1.value
    Get { path: String },
    /// Shallow-merge a JSON value into a section
    Patch { section: String, json: String },
    /// Append a record to the list at a path and print its id
    Add(AddArgs),
    /// Shallow-merge JSON fields into a record
    Update { path: String, id: String, json: String },
    /// Remove a record from the list at a path
    Remove { path: String, id: String },
    /// Move a record one place up or down
    Move {
        path: String,
        id: String,
        direction: MoveDirection,
    },
    /// Replace the document with a JSON file laid over the defaults
    Import { file: PathBuf },
    /// Write the document to a JSON file
    Export { file: PathBuf },
    /// Restore the default document
    Reset,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Flattened list path (collections, projects and contact.entries get
    /// their own defaults)
    pub path: String,

    /// Initial fields as a JSON object
    #[arg(long, default_value = "{}")]
    pub json: String,

    /// Id prefix for other lists
    #[arg(long, default_value = "item")]
    pub prefix: String,
}

fn parse_fields(raw: &str) -> Result<Record, Box<dyn std::error::Error>> {
    match parse_json_arg(raw)? {
        Node::Record(fields) => Ok(fields),
        other => Err(format!("expected a JSON object, got {}", other.kind_name()).into()),
    }
}

fn print_json(node: Node) -> CommandResult {
    println!("{}", serde_json::to_string_pretty(&node)?);
    Ok(())
}

pub fn execute(args: StoreArgs, config: &FolioConfig) -> CommandResult {
    let mut store = open_store(config)?;

    match args.command {
        StoreCommand::Show { section: None } => {
            println!("{}", store.document().to_json_pretty()?);
        }
        StoreCommand::Show {
            section: Some(key),
        } => {
            let section = store
                .document()
                .section(&key)
                .cloned()
                .ok_or_else(|| format!("No section named {key}"))?;
            print_json(section)?;
        }
        StoreCommand::Get { path } => {
            let value = store
                .document()
                .get_path(&FieldPath::parse_flattened(&path))
                .cloned()
                .ok_or_else(|| format!("Nothing at {path}"))?;
            print_json(value)?;
        }
        StoreCommand::Patch { section, json } => {
            store.patch_section(&section, parse_json_arg(&json)?)?;
            println!("Updated {}.", section);
        }
        StoreCommand::Add(add) => {
            let fields = parse_fields(&add.json)?;
            let path = FieldPath::parse_flattened(&add.path);
            let id = store.edit("add_record", |doc| match add.path.as_str() {
                "collections" => doc.add_collection(fields),
                "projects" => doc.add_project(fields),
                "contact.entries" => doc.add_contact_entry(fields),
                _ => doc.add_record(&path, &add.prefix, fields),
            })?;
            println!("{}", id);
        }
        StoreCommand::Update { path, id, json } => {
            let partial = parse_fields(&json)?;
            let path = FieldPath::parse_flattened(&path);
            store.edit("update_record", |doc| doc.update_record(&path, &id, partial))?;
            println!("Updated {}.", id);
        }
        StoreCommand::Remove { path, id } => {
            let list = FieldPath::parse_flattened(&path);
            store.edit("remove_record", |doc| {
                if path == "collections" {
                    doc.remove_collection(&id)
                } else {
                    doc.remove_record(&list, &id)
                }
            })?;
            println!("Removed {}.", id);
        }
        StoreCommand::Move {
            path,
            id,
            direction,
        } => {
            let path = FieldPath::parse_flattened(&path);
            let moved = store.edit("move_record", |doc| doc.move_record(&path, &id, direction))?;
            if moved {
                println!("Moved {}.", id);
            } else {
                println!("{} is already at the edge.", id);
            }
        }
        StoreCommand::Import { file } => {
            store.import_file(&file)?;
            println!("Imported {}.", file.display());
        }
        StoreCommand::Export { file } => {
            store.export_file(&file)?;
            println!("Exported to {}.", file.display());
        }
        StoreCommand::Reset => {
            store.reset()?;
            println!("Restored the default document.");
        }
    }

    Ok(())
}
