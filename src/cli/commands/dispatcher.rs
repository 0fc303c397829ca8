//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::assets::HttpFetcher;
use crate::cli::args::{Cli, Commands, InstallArgs};
use crate::config::{read_install_record, resolve_config, SetupConfig};
use crate::error::{Result, SetupError};
use crate::platform::HostEnv;
use crate::shell::SystemRunner;
use crate::ui::{OutputMode, UserInterface};

use super::completions::CompletionsCommand;
use super::install::InstallCommand;
use super::uninstall::UninstallCommand;
use super::verify::VerifyCommand;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    env: HostEnv,
    config_path: Option<PathBuf>,
    output_mode: OutputMode,
}

impl CommandDispatcher {
    /// Create a new dispatcher over the given host environment.
    pub fn new(env: HostEnv, config_path: Option<PathBuf>, output_mode: OutputMode) -> Self {
        Self {
            env,
            config_path,
            output_mode,
        }
    }

    /// The host environment commands run against.
    pub fn env(&self) -> &HostEnv {
        &self.env
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Install(args)) => self.install(args, ui),
            None => self.install(&InstallArgs::default(), ui),
            Some(Commands::Uninstall(args)) => {
                let config = self.installed_config()?;
                let runner = SystemRunner::new();
                let cmd = UninstallCommand::new(&self.env, config, Box::new(runner), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Verify(args)) => {
                let config = self.installed_config()?;
                let runner = SystemRunner::new();
                let cmd = VerifyCommand::new(&self.env, config, Box::new(runner), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
        }
    }

    fn install(&self, args: &InstallArgs, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let source = match &args.source {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        let config = self.load_config(std::slice::from_ref(&source))?;
        let runner = if self.output_mode.shows_command_output() {
            SystemRunner::streaming()
        } else {
            SystemRunner::new()
        };
        let fetcher = HttpFetcher::new()?;

        let cmd = InstallCommand::new(
            &self.env,
            config,
            Box::new(runner),
            Box::new(fetcher),
            &source,
            args.clone(),
        );
        cmd.execute(ui)
    }

    /// Config for commands that act on an existing installation.
    ///
    /// An explicit `--config` wins. Otherwise the install record written by
    /// the last install is used, then the default install directory.
    fn installed_config(&self) -> Result<SetupConfig> {
        let home = self.env.home_dir().ok_or(SetupError::HomeNotFound)?;
        if self.config_path.is_none() {
            if let Some(config) = read_install_record(&home)? {
                return Ok(config);
            }
        }
        let install_dir = SetupConfig::default().install_dir_in(&home);
        self.load_config(&[install_dir])
    }

    fn load_config(&self, search_dirs: &[PathBuf]) -> Result<SetupConfig> {
        resolve_config(self.config_path.as_deref().map(Path::new), search_dirs)
    }
}
