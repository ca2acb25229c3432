pub mod auth;
pub mod diff;
pub mod font;
pub mod publish;
pub mod session;
pub mod store;
pub mod sync;

use crate::api::ApiClient;
use crate::config::FolioConfig;
use folio_store::ContentStore;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Open the configured store, creating its directory on first use.
pub fn open_store(config: &FolioConfig) -> Result<ContentStore, Box<dyn std::error::Error>> {
    if let Some(parent) = config.store_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(ContentStore::open(&config.store_path)?)
}

pub fn backend(config: &FolioConfig) -> Result<ApiClient, Box<dyn std::error::Error>> {
    Ok(ApiClient::new(
        &config.api_base_url,
        config.admin_password.clone(),
    )?)
}

/// Parse a JSON argument into a node.
pub fn parse_json_arg(raw: &str) -> Result<folio_core::Node, Box<dyn std::error::Error>> {
    serde_json::from_str(raw).map_err(|e| format!("invalid JSON argument: {e}").into())
}
