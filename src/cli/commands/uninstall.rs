//! Uninstall command implementation.
//!
//! The `xshot-setup uninstall` command removes XShot.

use std::time::Instant;

use crate::cli::args::UninstallArgs;
use crate::config::SetupConfig;
use crate::error::Result;
use crate::platform::HostEnv;
use crate::provision::{DeprovisionOutcome, Deprovisioner, DirectoryRemoval, Removal};
use crate::shell::CommandRunner;
use crate::ui::{RunSummary, StatusKind, StepSummary, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The uninstall command implementation.
pub struct UninstallCommand<'a> {
    env: &'a HostEnv,
    config: SetupConfig,
    runner: Box<dyn CommandRunner>,
    args: UninstallArgs,
}

impl<'a> UninstallCommand<'a> {
    /// Create a new uninstall command.
    pub fn new(
        env: &'a HostEnv,
        config: SetupConfig,
        runner: Box<dyn CommandRunner>,
        args: UninstallArgs,
    ) -> Self {
        Self {
            env,
            config,
            runner,
            args,
        }
    }
}

fn removal_step(name: &str, dir: &DirectoryRemoval) -> StepSummary {
    let (status, detail) = match dir.removal {
        Removal::Deleted => (StatusKind::Success, "removed"),
        Removal::Kept => (StatusKind::Skipped, "kept"),
        Removal::Absent => (StatusKind::Skipped, "not present"),
    };
    StepSummary {
        name: name.to_string(),
        status,
        detail: Some(format!("{} ({})", dir.path.display(), detail)),
    }
}

impl Command for UninstallCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let started = Instant::now();
        ui.show_header(&format!("{} Uninstaller", self.config.app_name));

        let outcome = Deprovisioner::new(self.env, &self.config, self.runner.as_ref())
            .assume_yes(self.args.yes)
            .deprovision(ui)?;

        let DeprovisionOutcome::Completed {
            launcher_removed,
            config_dir,
            install_dir,
            advisories,
        } = outcome
        else {
            return Ok(CommandResult::success());
        };

        let package = if advisories.is_empty() {
            StepSummary {
                name: "Python package".into(),
                status: StatusKind::Success,
                detail: Some(self.config.package_name.clone()),
            }
        } else {
            StepSummary {
                name: "Python package".into(),
                status: StatusKind::Warning,
                detail: advisories.first().cloned(),
            }
        };
        let launcher = StepSummary {
            name: "Launcher".into(),
            status: if launcher_removed {
                StatusKind::Success
            } else {
                StatusKind::Skipped
            },
            detail: None,
        };

        ui.show_summary(&RunSummary {
            title: "Uninstallation".into(),
            steps: vec![
                package,
                launcher,
                removal_step("Config directory", &config_dir),
                removal_step("Install directory", &install_dir),
            ],
            total_duration: started.elapsed(),
            success: true,
        });

        Ok(CommandResult::success())
    }
}
