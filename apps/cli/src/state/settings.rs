//! # Application Settings
//!
//! Where the store lives and which key holds the rate table.
//!
//! ## Sources (Priority Order)
//! 1. `--db <PATH>` flag
//! 2. Environment variables (`HAUL_DB_PATH`, `HAUL_CONFIG_KEY`)
//! 3. Defaults (this file): platform data dir, `haul_cfg_v1`

use std::path::PathBuf;

use directories::ProjectDirs;
use haul_core::RATE_CONFIG_KEY;

use crate::error::{CliError, CliResult};

/// Store file name inside the platform data directory.
pub const DB_FILE_NAME: &str = "haul.db";

/// Resolved startup settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    /// Explicit store path; `None` means the platform data directory.
    pub db_path: Option<PathBuf>,

    /// Key of the persisted rate table in the store.
    pub config_key: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            db_path: None,
            config_key: RATE_CONFIG_KEY.to_string(),
        }
    }
}

impl AppSettings {
    /// Reads settings from the process environment.
    ///
    /// ## Environment Variables
    /// - `HAUL_DB_PATH`: store file path
    /// - `HAUL_CONFIG_KEY`: rate table key
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`. Blank values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = AppSettings::default();
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(path) = non_blank("HAUL_DB_PATH") {
            settings.db_path = Some(PathBuf::from(path));
        }

        if let Some(key) = non_blank("HAUL_CONFIG_KEY") {
            settings.config_key = key;
        }

        settings
    }

    /// Applies the `--db` flag, which beats the environment.
    pub fn with_db_path(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.db_path = path;
        }
        self
    }

    /// Resolves the store file path, creating its directory when needed.
    ///
    /// ## Platform Default
    /// - **Linux**: `~/.local/share/quote/haul.db`
    /// - **macOS**: `~/Library/Application Support/com.haul.quote/haul.db`
    /// - **Windows**: `%APPDATA%\haul\quote\data\haul.db`
    pub fn database_path(&self) -> CliResult<PathBuf> {
        let path = match &self.db_path {
            Some(path) => path.clone(),
            None => ProjectDirs::from("com", "haul", "quote")
                .ok_or_else(|| CliError::internal("Could not determine app data directory"))?
                .data_dir()
                .join(DB_FILE_NAME),
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        Ok(path)
    }
}
