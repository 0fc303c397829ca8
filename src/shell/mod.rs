//! External command execution and shell environment edits.

pub mod command;
pub mod mock;
pub mod platform;
pub mod profile;

pub use command::{run_checked, CommandResult, CommandRunner, CommandSpec, SystemRunner};
pub use mock::RecordingRunner;
pub use platform::{is_ci, is_elevated};
pub use profile::{ensure_line_present, path_export_line};
