//! System package managers.
//!
//! - [`probe`] locates executables on PATH
//! - [`registry`] describes each supported package manager
//! - [`installer`] installs the system dependencies

pub mod installer;
pub mod probe;
pub mod registry;

pub use installer::{dependency_commands, install_dependencies};
pub use probe::{resolve_first, resolve_tool_path, ResolvedCommand};
pub use registry::{detect_package_manager, Dependency, ManagerSpec, PackageManager, MANAGERS};
