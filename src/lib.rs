//! xshot-setup - Installer for the XShot screenshot styling tool.
//!
//! Detects the host platform and package manager, installs the system
//! packages XShot needs, copies the XShot sources into place, registers a
//! launcher, and fetches the bundled font. Uninstallation reverses it with
//! per-directory confirmation.
//!
//! # Modules
//!
//! - [`assets`] - Font download
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - `.xshot-setup.yml` loading
//! - [`error`] - Error types and result aliases
//! - [`launcher`] - Launcher shim
//! - [`layout`] - Install directory layout and source staging
//! - [`packages`] - Package manager registry and tool lookup
//! - [`platform`] - Host platform detection
//! - [`provision`] - Install and uninstall sequences
//! - [`shell`] - Command execution and shell profile edits
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//! - [`verify`] - Post-install checks
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use xshot_setup::config::SetupConfig;
//! use xshot_setup::layout::InstallLayout;
//! use xshot_setup::platform::PlatformKind;
//!
//! let layout = InstallLayout::resolve(
//!     &SetupConfig::default(),
//!     Path::new("/home/me"),
//!     PlatformKind::GenericLinux,
//!     Path::new("/usr"),
//! );
//! assert_eq!(layout.launcher_path, Path::new("/home/me/.local/bin/xshot"));
//! ```

pub mod assets;
pub mod cli;
pub mod config;
pub mod error;
pub mod launcher;
pub mod layout;
pub mod packages;
pub mod platform;
pub mod provision;
pub mod shell;
pub mod ui;
pub mod verify;

pub use error::{Result, SetupError};
