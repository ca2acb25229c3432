//! CLI configuration
//!
//! Layers, lowest to highest: built-in defaults, `folio.toml`, environment
//! (a `.env` file is loaded first if present), then command-line flags.

use folio_core::errors::{ExError, ExErrorKind};
use folio_core::folio_core_types::Sensitive;
use folio_core::logging_facility::Profile;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "folio.toml";
pub const DEFAULT_STORE_PATH: &str = ".folio/store.db";
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5175";

pub const ENV_API_BASE_URL: &str = "FOLIO_API_BASE_URL";
pub const ENV_STORE_PATH: &str = "FOLIO_STORE_PATH";
pub const ENV_ADMIN_PASSWORD: &str = "FOLIO_ADMIN_PASSWORD";
pub const ENV_LOG_PROFILE: &str = "FOLIO_LOG_PROFILE";

/// On-disk shape of `folio.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    api_base_url: Option<String>,
    store_path: Option<PathBuf>,
    log_profile: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FolioConfig {
    pub api_base_url: String,
    pub store_path: PathBuf,
    pub log_profile: Profile,
    pub admin_password: Sensitive<String>,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            log_profile: Profile::Development,
            admin_password: Sensitive::new(String::new()),
        }
    }
}

fn config_error(message: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::Config)
        .with_op("load_config")
        .with_message(message)
}

fn parse_profile(raw: &str) -> Result<Profile, ExError> {
    raw.parse::<Profile>().map_err(config_error)
}

impl FolioConfig {
    /// Parse `folio.toml` text over the defaults.
    ///
    /// # Errors
    ///
    /// `Config` for malformed TOML, unknown keys or an unknown log profile.
    pub fn from_toml_str(text: &str) -> Result<Self, ExError> {
        let file: FileConfig =
            toml::from_str(text).map_err(|e| config_error(format!("folio.toml: {e}")))?;
        let mut config = Self::default();
        if let Some(url) = file.api_base_url {
            config.api_base_url = url;
        }
        if let Some(path) = file.store_path {
            config.store_path = path;
        }
        if let Some(profile) = file.log_profile {
            config.log_profile = parse_profile(&profile)?;
        }
        Ok(config)
    }

    /// Read the config file, or fall back to defaults when it is absent and
    /// was not asked for explicitly.
    ///
    /// # Errors
    ///
    /// `Config` for an explicit path that cannot be read, or see
    /// [`FolioConfig::from_toml_str`].
    pub fn from_file(path: Option<&Path>) -> Result<Self, ExError> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        match std::fs::read_to_string(&path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(e) if !explicit && e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(config_error(format!("{}: {e}", path.display()))),
        }
    }

    /// Overlay values from a variable lookup.
    ///
    /// # Errors
    ///
    /// `Config` for an unknown log profile.
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, ExError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_BASE_URL) {
            self.api_base_url = url;
        }
        if let Some(path) = lookup(ENV_STORE_PATH) {
            self.store_path = PathBuf::from(path);
        }
        if let Some(password) = lookup(ENV_ADMIN_PASSWORD) {
            self.admin_password = Sensitive::new(password);
        }
        if let Some(profile) = lookup(ENV_LOG_PROFILE) {
            self.log_profile = parse_profile(&profile)?;
        }
        Ok(self)
    }

    /// Full load: `.env`, then the config file, then the process environment.
    ///
    /// # Errors
    ///
    /// See [`FolioConfig::from_file`] and [`FolioConfig::apply_env`].
    pub fn load(path: Option<&Path>) -> Result<Self, ExError> {
        // A missing .env is normal
        let _ = dotenvy::dotenv();
        Self::from_file(path)?.apply_env(|key| std::env::var(key).ok())
    }
}
