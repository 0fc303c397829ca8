//! Install record.
//!
//! Install writes the configuration it used to a fixed file under the home
//! directory. Uninstall and verify read it back, so a custom `install_dir`,
//! `config_dir` or an external `--config` file is honored after the source
//! tree is gone.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::loader::load_config_file;
use crate::config::schema::SetupConfig;
use crate::error::{Result, SetupError};

/// Location of the record, relative to the home directory.
pub const INSTALL_RECORD: &str = ".local/share/xshot/install.yml";

/// Path of the install record for a home directory.
pub fn install_record_path(home: &Path) -> PathBuf {
    home.join(INSTALL_RECORD)
}

/// Write `config` as the install record.
///
/// Directory settings are stored as absolute paths so the record does not
/// depend on how the original config spelled them.
pub fn write_install_record(home: &Path, config: &SetupConfig) -> Result<PathBuf> {
    let resolved = SetupConfig {
        install_dir: Some(config.install_dir_in(home)),
        config_dir: Some(config.config_dir_in(home)),
        ..config.clone()
    };
    let yaml = serde_yaml::to_string(&resolved).map_err(|e| SetupError::Other(e.into()))?;

    let path = install_record_path(home);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, yaml)?;
    tracing::debug!("Wrote install record {}", path.display());
    Ok(path)
}

/// Read the install record, if one exists.
pub fn read_install_record(home: &Path) -> Result<Option<SetupConfig>> {
    let path = install_record_path(home);
    if !path.is_file() {
        return Ok(None);
    }
    tracing::debug!("Loading install record {}", path.display());
    load_config_file(&path).map(Some)
}

/// Delete the install record. Returns whether a file was removed.
pub fn remove_install_record(home: &Path) -> Result<bool> {
    match fs::remove_file(install_record_path(home)) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}
