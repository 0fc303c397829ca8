//! Configuration loading for xshot-setup.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - The install record read by uninstall and verify in [`record`]
//!
//! # Example
//!
//! ```
//! use xshot_setup::config::{resolve_config, CONFIG_FILE_NAME};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(CONFIG_FILE_NAME), "font:\n  skip: true\n").unwrap();
//!
//! let config = resolve_config(None, &[temp.path().to_path_buf()]).unwrap();
//! assert!(config.font.skip);
//! assert_eq!(config.launcher_name, "xshot");
//! ```

pub mod loader;
pub mod record;
pub mod schema;

pub use loader::{find_config_file, load_config_file, parse_config, resolve_config};
pub use record::{
    install_record_path, read_install_record, remove_install_record, write_install_record,
    INSTALL_RECORD,
};
pub use schema::{
    DependencyConfig, FontConfig, SetupConfig, CONFIG_FILE_NAME, DEFAULT_FONT_FILE,
    DEFAULT_FONT_URL,
};
