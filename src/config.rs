//! TOML-based configuration for the console core.
//!
//! Everything defaults to the values the console shipped with; a config
//! file only needs the sections it overrides.
//!
//! Example configuration:
//! ```toml
//! [catalog]
//! page_size = 200
//! max_pages = 50
//!
//! [history]
//! page_size = 10
//!
//! [query]
//! max_rows = 1000
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub catalog: CatalogSettings,
    pub history: HistorySettings,
    pub query: QuerySettings,
}

/// Catalog paging.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Rows fetched per metadata page.
    pub page_size: u32,
    /// Page-count ceiling for paged loads; hitting it sets the load's
    /// `truncated` flag.
    pub max_pages: u32,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            page_size: 100,
            max_pages: 50,
        }
    }
}

/// History browsing.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HistorySettings {
    pub page_size: u64,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { page_size: 5 }
    }
}

/// Query execution.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct QuerySettings {
    /// Row cap sent with every execution request.
    pub max_rows: u32,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self { max_rows: 1000 }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }
        let raw = fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}
