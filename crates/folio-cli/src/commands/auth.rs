//! Shared-password check
//!
//! Usage: folio auth --password <PASSWORD>

use super::CommandResult;
use crate::config::FolioConfig;
use clap::Args;
use folio_core::auth::verify_password;

#[derive(Debug, Args)]
pub struct AuthArgs {
    /// Password to check against FOLIO_ADMIN_PASSWORD
    #[arg(long)]
    pub password: String,
}

pub fn execute(args: AuthArgs, config: &FolioConfig) -> CommandResult {
    verify_password(&config.admin_password, &args.password)?;
    println!("Password accepted.");
    Ok(())
}
