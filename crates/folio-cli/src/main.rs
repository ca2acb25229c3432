//! Folio CLI
//!
//! Command-line console for the portfolio content document

use clap::{Parser, Subcommand};
use config::FolioConfig;
use folio_core::logging_facility;
use std::path::PathBuf;

mod api;
mod commands;
mod config;

#[derive(Debug, Parser)]
#[command(name = "folio")]
#[command(about = "Folio - edit, diff and publish portfolio content", long_about = None)]
struct Cli {
    /// Config file (default: ./folio.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Store database, overriding config and environment
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Diff two JSON documents
    Diff(commands::diff::DiffArgs),
    /// Typography overrides
    Font(commands::font::FontArgs),
    /// Read and edit the stored document
    Store(commands::store::StoreArgs),
    /// Editing session baseline and commit message
    Session(commands::session::SessionArgs),
    /// Commit and push through the admin backend
    Sync(commands::sync::SyncArgs),
    /// Publish the stored document to the public site
    Publish,
    /// Replace the stored document with the published one
    Pull,
    /// Check the admin password
    Auth(commands::auth::AuthArgs),
}

fn run(cli: Cli) -> commands::CommandResult {
    let mut config = FolioConfig::load(cli.config.as_deref())?;
    if let Some(store) = cli.store {
        config.store_path = store;
    }
    logging_facility::init(config.log_profile);

    match cli.command {
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::Font(args) => commands::font::execute(args, &config),
        Commands::Store(args) => commands::store::execute(args, &config),
        Commands::Session(args) => commands::session::execute(args, &config),
        Commands::Sync(args) => commands::sync::execute(args, &config),
        Commands::Publish => commands::publish::execute_publish(&config),
        Commands::Pull => commands::publish::execute_pull(&config),
        Commands::Auth(args) => commands::auth::execute(args, &config),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
