//! # Configuration
//!
//! Creel configuration is loaded with [`confique`] from layered sources.
//!
//! ## Storage Hierarchy
//!
//! Values are resolved in priority order:
//! 1. **Environment variables**: `CREEL_TABLE_FILE`, `CREEL_PHOTOS_DIR`, etc.
//! 2. **Config file**: `<data dir>/creel.toml`.
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `table_file` | `catches.csv` | Catch table file name inside the data directory |
//! | `photos_dir` | `photos` | Attachments directory inside the data directory |
//! | `default_species` | `Bar` | Species used when `add` is given none |
//! | `default_spot` | `Le Havre` | Spot used when `add` is given none |
//!
//! ## CLI Usage
//!
//! - `creel config`: show the effective values and where the data lives.
//! - `creel config gen`: print a sample `creel.toml`.

use crate::error::{CreelError, Result};
use confique::toml::FormatOptions;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE: &str = "creel.toml";

/// Configuration for creel, stored in `creel.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CreelConfig {
    /// Catch table file name, relative to the data directory.
    #[config(default = "catches.csv", env = "CREEL_TABLE_FILE")]
    pub table_file: String,

    /// Directory holding photo attachments, relative to the data directory.
    #[config(default = "photos", env = "CREEL_PHOTOS_DIR")]
    pub photos_dir: String,

    /// Species prefilled when logging a catch.
    #[config(default = "Bar", env = "CREEL_DEFAULT_SPECIES")]
    pub default_species: String,

    /// Spot prefilled when logging a catch.
    #[config(default = "Le Havre", env = "CREEL_DEFAULT_SPOT")]
    pub default_spot: String,
}

impl Default for CreelConfig {
    fn default() -> Self {
        Self {
            table_file: "catches.csv".to_string(),
            photos_dir: "photos".to_string(),
            default_species: "Bar".to_string(),
            default_spot: "Le Havre".to_string(),
        }
    }
}

impl CreelConfig {
    /// Loads the layered configuration for `data_dir`. A missing file is fine.
    pub fn load(data_dir: &Path) -> Result<Self> {
        Self::builder()
            .env()
            .file(data_dir.join(CONFIG_FILE))
            .load()
            .map_err(|e| CreelError::Config(e.to_string()))
    }

    /// A commented sample `creel.toml`.
    pub fn template() -> String {
        confique::toml::template::<CreelConfig>(FormatOptions::default())
    }
}
