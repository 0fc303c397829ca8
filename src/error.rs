//! Error types for xshot-setup operations.
//!
//! This module defines [`SetupError`], the primary error type used throughout
//! the installer, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `SetupError` for fatal conditions that abort the run with exit code 1
//! - Advisory failures (package manager errors, font download errors) are not
//!   errors at all: they are recorded on the report and printed as warnings
//! - Use `anyhow::Error` (via `SetupError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for xshot-setup operations.
#[derive(Debug, Error)]
pub enum SetupError {
    /// No recognizable OS descriptor was found.
    #[error("Unsupported platform: no OS descriptor found (checked {checked})")]
    UnknownPlatform { checked: String },

    /// Neither the versioned nor the unversioned runtime command was found.
    #[error("Python runtime not found (looked for {candidates}). Please install Python 3 and try again.")]
    MissingRuntime { candidates: String },

    /// Neither the versioned nor the unversioned installer command was found.
    #[error("Package installer not found (looked for {candidates}). Please install pip and try again.")]
    MissingInstaller { candidates: String },

    /// The directory to stage into the install directory does not exist.
    #[error("Source directory not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// Explicitly requested configuration file does not exist.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// The home directory could not be determined.
    #[error("Could not determine home directory (HOME is not set)")]
    HomeNotFound,

    /// An external command failed in a context where failure is fatal.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// Downloading a remote asset failed.
    #[error("Download failed for {url}: {message}")]
    DownloadFailed { url: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for xshot-setup operations.
pub type Result<T> = std::result::Result<T, SetupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_platform_lists_checked_paths() {
        let err = SetupError::UnknownPlatform {
            checked: "/etc/os-release".into(),
        };
        assert!(err.to_string().contains("/etc/os-release"));
    }

    #[test]
    fn missing_runtime_lists_candidates() {
        let err = SetupError::MissingRuntime {
            candidates: "python3, python".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("python3, python"));
        assert!(msg.contains("install Python"));
    }

    #[test]
    fn missing_installer_lists_candidates() {
        let err = SetupError::MissingInstaller {
            candidates: "pip3, pip".into(),
        };
        assert!(err.to_string().contains("pip3, pip"));
    }

    #[test]
    fn source_not_found_displays_path() {
        let err = SetupError::SourceNotFound {
            path: PathBuf::from("/tmp/missing"),
        };
        assert!(err.to_string().contains("/tmp/missing"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = SetupError::ConfigParseError {
            path: PathBuf::from("/config.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/config.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = SetupError::CommandFailed {
            command: "apt install -y imagemagick".into(),
            code: Some(100),
        };
        let msg = err.to_string();
        assert!(msg.contains("apt install -y imagemagick"));
        assert!(msg.contains("100"));
    }

    #[test]
    fn download_failed_displays_url() {
        let err = SetupError::DownloadFailed {
            url: "https://example.com/font.ttf".into(),
            message: "HTTP 404".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("https://example.com/font.ttf"));
        assert!(msg.contains("HTTP 404"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: SetupError = io_err.into();
        assert!(matches!(err, SetupError::Io(_)));
    }

    #[test]
    fn anyhow_error_converts() {
        let err: SetupError = anyhow::anyhow!("boom").into();
        assert_eq!(err.to_string(), "boom");
    }
}
