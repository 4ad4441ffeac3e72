//! # Data Directory and Startup
//!
//! Everything creel stores lives in one data directory: the catch table, the
//! photo attachments and an optional `creel.toml`.
//!
//! ## Data Directory Resolution
//!
//! [`resolve_data_dir`] picks, in order:
//! 1. The explicit override (`--data <dir>` on the command line).
//! 2. The `CREEL_DATA` environment variable.
//! 3. The OS-appropriate data directory (via the `directories` crate).
//!
//! ## Startup
//!
//! [`initialize`] resolves the directory, loads [`CreelConfig`] from it and builds a
//! [`CreelApi`] over a [`FileStore`]. Nothing is created on disk until the first
//! write. A broken config file does not block the log: it is reported and the
//! compiled defaults are used.

use crate::api::CreelApi;
use crate::commands::CreelPaths;
use crate::config::{CreelConfig, CONFIG_FILE};
use crate::error::{CreelError, Result};
use crate::store::backend::StorageBackend;
use crate::store::fs::FileStore;
use crate::store::fs_backend::FsBackend;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::{debug, warn};

pub const DATA_ENV: &str = "CREEL_DATA";

pub struct CreelContext {
    pub api: CreelApi<FsBackend>,
    pub config: CreelConfig,
    /// Set when the config file could not be read and defaults were used.
    pub config_error: Option<String>,
}

pub fn resolve_data_dir(data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = data_override {
        return Ok(path);
    }
    if let Some(path) = std::env::var_os(DATA_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    ProjectDirs::from("", "", "creel")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| CreelError::Config("Could not determine a data directory".to_string()))
}

/// Builds the production context for `data_override` (or the default data directory).
pub fn initialize(data_override: Option<PathBuf>) -> Result<CreelContext> {
    let data_dir = resolve_data_dir(data_override)?;
    debug!(data_dir = %data_dir.display(), "Using data directory");

    let (config, config_error) = match CreelConfig::load(&data_dir) {
        Ok(config) => (config, None),
        Err(e) => {
            warn!("{}; using defaults", e);
            (CreelConfig::default(), Some(e.to_string()))
        }
    };

    let store = FileStore::from_config(data_dir.clone(), &config);
    let paths = CreelPaths {
        table: store.backend().table_path(),
        photos: store.backend().photos_root(),
        config: data_dir.join(CONFIG_FILE),
        data_dir,
    };
    let api = CreelApi::new(store, paths, config.clone());

    Ok(CreelContext {
        api,
        config,
        config_error,
    })
}
