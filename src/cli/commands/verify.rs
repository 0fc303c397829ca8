//! Verify command implementation.
//!
//! The `xshot-setup verify` command checks an existing installation
//! without changing anything. Besides the filesystem layout it asks the
//! Python runtime to import the installed package.

use crate::cli::args::VerifyArgs;
use crate::config::SetupConfig;
use crate::error::{Result, SetupError};
use crate::layout::InstallLayout;
use crate::packages::resolve_first;
use crate::platform::{detect_kind_lenient, platform_prefix, HostEnv};
use crate::shell::CommandRunner;
use crate::ui::UserInterface;
use crate::verify::{import_checks, verify, CheckStatus, VerificationReport};

use super::dispatcher::{Command, CommandResult};

/// The verify command implementation.
pub struct VerifyCommand<'a> {
    env: &'a HostEnv,
    config: SetupConfig,
    runner: Box<dyn CommandRunner>,
    args: VerifyArgs,
}

impl<'a> VerifyCommand<'a> {
    /// Create a new verify command.
    pub fn new(
        env: &'a HostEnv,
        config: SetupConfig,
        runner: Box<dyn CommandRunner>,
        args: VerifyArgs,
    ) -> Self {
        Self {
            env,
            config,
            runner,
            args,
        }
    }

    /// Run the checks.
    ///
    /// Platform detection is lenient here: verifying needs only the layout,
    /// not a working runtime.
    pub fn report(&self) -> Result<VerificationReport> {
        let home = self.env.home_dir().ok_or(SetupError::HomeNotFound)?;
        let kind = detect_kind_lenient(self.env);
        let prefix = platform_prefix(kind, self.env);
        let layout = InstallLayout::resolve(&self.config, &home, kind, &prefix);

        let runtime = resolve_first(&self.config.runtime_candidates, &self.env.path_entries());
        let imports = import_checks(
            self.runner.as_ref(),
            runtime.as_ref(),
            &self.config.runtime_candidates,
            &self.config.package_dir,
        );
        Ok(verify(&layout).with_checks(imports))
    }
}

impl Command for VerifyCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let report = self.report()?;

        if self.args.json {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| SetupError::Other(e.into()))?;
            println!("{}", json);
        } else {
            ui.show_header(&format!("{} Installation Check", self.config.app_name));
            for check in &report.checks {
                let line = match &check.detail {
                    Some(detail) => format!("{}: {} ({})", check.name, check.path.display(), detail),
                    None => format!("{}: {}", check.name, check.path.display()),
                };
                match check.status {
                    CheckStatus::Pass => ui.success(&line),
                    CheckStatus::Warn => ui.warning(&line),
                    CheckStatus::Fail => ui.error(&line),
                }
            }

            if report.passed {
                ui.success("Installation looks good");
            } else {
                ui.error(&format!(
                    "{} required check(s) failed. Run `xshot-setup install` to repair.",
                    report.count(CheckStatus::Fail)
                ));
            }
        }

        if report.passed {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}
