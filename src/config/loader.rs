//! Configuration file discovery and loading.
//!
//! Only one file is ever loaded; there is no merging. The lookup order is:
//! 1. An explicit `--config <FILE>` (must exist)
//! 2. `.xshot-setup.yml` in each search directory, first match wins
//! 3. Built-in defaults

use crate::config::schema::{SetupConfig, CONFIG_FILE_NAME};
use crate::error::{Result, SetupError};
use std::fs;
use std::path::{Path, PathBuf};

/// Load a single config file and parse it into SetupConfig.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<SetupConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SetupError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            SetupError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into SetupConfig.
///
/// An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<SetupConfig> {
    if content.trim().is_empty() {
        return Ok(SetupConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| SetupError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Find the first `.xshot-setup.yml` among `search_dirs`.
pub fn find_config_file(search_dirs: &[PathBuf]) -> Option<PathBuf> {
    search_dirs
        .iter()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|path| path.is_file())
}

/// Resolve the effective configuration.
///
/// An explicit path is loaded as-is and must exist. Otherwise the search
/// directories are checked in order and the defaults are used when none
/// holds a config file.
pub fn resolve_config(explicit: Option<&Path>, search_dirs: &[PathBuf]) -> Result<SetupConfig> {
    if let Some(path) = explicit {
        tracing::debug!("Loading config from {}", path.display());
        return load_config_file(path);
    }

    match find_config_file(search_dirs) {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            load_config_file(&path)
        }
        None => {
            tracing::debug!("No config file found, using defaults");
            Ok(SetupConfig::default())
        }
    }
}
