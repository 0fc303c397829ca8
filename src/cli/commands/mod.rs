//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands are
//! routed by [`CommandDispatcher`], which also resolves the configuration
//! file and builds the real command runner and font fetcher.

pub mod completions;
pub mod dispatcher;
pub mod install;
pub mod uninstall;
pub mod verify;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
