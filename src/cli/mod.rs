//! Command-line interface for xshot-setup.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, CompletionsArgs, InstallArgs, UninstallArgs, VerifyArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
