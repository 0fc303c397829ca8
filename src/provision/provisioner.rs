//! The installation sequence.

use std::path::Path;
use std::time::Instant;

use crate::assets::{ensure_font, AssetFetcher, FontOutcome};
use crate::config::{write_install_record, SetupConfig};
use crate::error::Result;
use crate::launcher::{launcher_script, write_launcher};
use crate::layout::{ensure_source_exists, InstallLayout, StageOutcome};
use crate::packages::install_dependencies;
use crate::packages::probe::path_contains;
use crate::platform::{detect_profile, HostEnv, PlatformProfile};
use crate::shell::{
    ensure_line_present, path_export_line, run_checked, CommandRunner, CommandSpec,
};
use crate::ui::UserInterface;

use super::report::{ProvisionReport, Step, StepStatus};

/// Switches that change which steps run and how failures count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProvisionOptions {
    /// Skip system package installation.
    pub skip_deps: bool,
    /// Skip the font download.
    pub skip_font: bool,
    /// Treat package manager and pip failures as fatal.
    pub strict: bool,
}

impl ProvisionOptions {
    /// Combine CLI switches with the config file. Either source can enable a switch.
    pub fn merged_with(self, config: &SetupConfig) -> Self {
        Self {
            skip_deps: self.skip_deps || config.dependencies.skip,
            skip_font: self.skip_font || config.font.skip,
            strict: self.strict || config.dependencies.strict,
        }
    }
}

/// Installs XShot from a source tree.
pub struct Provisioner<'a> {
    env: &'a HostEnv,
    config: &'a SetupConfig,
    runner: &'a dyn CommandRunner,
    fetcher: &'a dyn AssetFetcher,
    options: ProvisionOptions,
}

impl<'a> Provisioner<'a> {
    /// Create a provisioner.
    pub fn new(
        env: &'a HostEnv,
        config: &'a SetupConfig,
        runner: &'a dyn CommandRunner,
        fetcher: &'a dyn AssetFetcher,
        options: ProvisionOptions,
    ) -> Self {
        Self {
            env,
            config,
            runner,
            fetcher,
            options: options.merged_with(config),
        }
    }

    /// Run the full installation.
    ///
    /// Detection and the source check happen before anything is written,
    /// so a fatal detection error leaves the filesystem untouched. Later
    /// failures are not rolled back.
    pub fn provision(
        &self,
        source_dir: &Path,
        ui: &mut dyn UserInterface,
    ) -> Result<ProvisionReport> {
        let started = Instant::now();

        let profile = detect_profile(self.env, self.config, self.runner)?;
        ensure_source_exists(source_dir)?;
        self.show_profile(&profile, ui);

        let layout = InstallLayout::for_profile(&profile, self.config);
        let mut report = ProvisionReport::new(layout.clone());

        self.install_system_packages(&profile, &mut report, ui)?;

        layout.create()?;
        write_install_record(&profile.home, self.config)?;
        report.record(Step::Layout, StepStatus::Done, None);
        ui.success(&format!("Created {}", layout.install_dir.display()));

        let mut spinner = ui.start_spinner("Copying files...");
        match layout.stage_source(source_dir)? {
            StageOutcome::Copied { files } => {
                spinner.finish_success(&format!("Copied {} files", files));
                report.record(Step::Stage, StepStatus::Done, Some(format!("{} files", files)));
            }
            StageOutcome::InPlace => {
                spinner.finish_skipped("Already running from the install directory");
                report.record(Step::Stage, StepStatus::Skipped, Some("in place".into()));
            }
        }

        self.install_application(&profile, &layout, &mut report, ui)?;

        let script = launcher_script(
            profile.kind,
            &profile.prefix,
            &profile.runtime.name,
            &self.config.module_entry,
        );
        write_launcher(&layout.launcher_path, &script)?;
        report.record(
            Step::Launcher,
            StepStatus::Done,
            Some(layout.launcher_path.display().to_string()),
        );
        ui.success(&format!("Launcher installed at {}", layout.launcher_path.display()));

        self.register_path(&profile, &layout, &mut report, ui);
        self.fetch_font(&layout, &mut report, ui);

        for advisory in &report.advisories {
            ui.warning(advisory);
        }

        report.duration = started.elapsed();
        tracing::info!(
            "Provisioning finished in {:?} with {} advisories",
            report.duration,
            report.advisories.len()
        );
        Ok(report)
    }

    fn show_profile(&self, profile: &PlatformProfile, ui: &mut dyn UserInterface) {
        ui.message(&format!(
            "Detected {} ({}), package manager: {}",
            profile.os.name,
            profile.kind.name(),
            profile.package_manager_name()
        ));
        let version = profile
            .runtime_version
            .as_deref()
            .map(|v| format!(" {}", v))
            .unwrap_or_default();
        ui.message(&format!(
            "Using {}{} and {}",
            profile.runtime.name, version, profile.installer.name
        ));
    }

    fn install_system_packages(
        &self,
        profile: &PlatformProfile,
        report: &mut ProvisionReport,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        if self.options.skip_deps {
            report.record(Step::Dependencies, StepStatus::Skipped, Some("disabled".into()));
            return Ok(());
        }

        let Some(manager) = profile.package_manager else {
            report.advise(
                Step::Dependencies,
                "No supported package manager found. Install Python 3, ImageMagick and pip manually.",
            );
            return Ok(());
        };

        let mut spinner = ui.start_spinner(&format!("Installing system packages with {}...", manager));
        match install_dependencies(self.runner, manager.spec(), profile) {
            Ok(()) => {
                spinner.finish_success("System packages installed");
                report.record(Step::Dependencies, StepStatus::Done, Some(manager.to_string()));
                Ok(())
            }
            Err(e) if self.options.strict => {
                spinner.finish_warning("System package installation failed");
                Err(e)
            }
            Err(e) => {
                spinner.finish_warning("System package installation failed");
                report.advise(Step::Dependencies, format!("System package installation failed: {}", e));
                Ok(())
            }
        }
    }

    fn install_application(
        &self,
        profile: &PlatformProfile,
        layout: &InstallLayout,
        report: &mut ProvisionReport,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let pip_install = || {
            CommandSpec::new(profile.installer.name.as_str())
                .arg("install")
                .args(self.config.installer_args.iter().cloned())
                .cwd(&layout.install_dir)
        };

        let requirements = layout.install_dir.join(&self.config.requirements_file);
        if requirements.is_file() {
            let spec = pip_install()
                .arg("-r")
                .arg(requirements.display().to_string());
            self.run_app_command(&spec, "Installing Python requirements...", report, ui)?;
        } else {
            report.advise(
                Step::AppInstall,
                format!("Requirements file not found: {}", requirements.display()),
            );
        }

        let spec = pip_install()
            .arg("-e")
            .arg(layout.install_dir.display().to_string());
        self.run_app_command(
            &spec,
            &format!("Installing {} package...", self.config.app_name),
            report,
            ui,
        )
    }

    fn run_app_command(
        &self,
        spec: &CommandSpec,
        label: &str,
        report: &mut ProvisionReport,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let mut spinner = ui.start_spinner(label);
        let failure = match run_checked(self.runner, spec) {
            Ok(_) => {
                spinner.finish_success(&spec.to_string());
                report.record(Step::AppInstall, StepStatus::Done, None);
                return Ok(());
            }
            Err(e) => e,
        };

        spinner.finish_warning(&format!("{} failed", spec));
        if self.options.strict {
            return Err(failure);
        }
        report.advise(Step::AppInstall, failure.to_string());
        Ok(())
    }

    fn register_path(
        &self,
        profile: &PlatformProfile,
        layout: &InstallLayout,
        report: &mut ProvisionReport,
        ui: &mut dyn UserInterface,
    ) {
        if profile.kind.uses_prefix_bin() {
            report.record(Step::ShellPath, StepStatus::Skipped, Some("prefix bin".into()));
            return;
        }
        if path_contains(&profile.path_entries, layout.launcher_dir()) {
            report.record(Step::ShellPath, StepStatus::Skipped, Some("already on PATH".into()));
            return;
        }

        let rc = self.config.shell_profile_in(&profile.home);
        let line = path_export_line(layout.launcher_dir(), &profile.home);
        match ensure_line_present(&rc, &line) {
            Ok(true) => {
                report.record(Step::ShellPath, StepStatus::Done, Some(rc.display().to_string()));
                ui.message(&format!(
                    "Added {} to PATH in {}. Restart your shell or run: source {}",
                    layout.launcher_dir().display(),
                    rc.display(),
                    rc.display()
                ));
            }
            Ok(false) => {
                report.record(Step::ShellPath, StepStatus::Skipped, Some("already configured".into()));
            }
            Err(e) => {
                report.advise(
                    Step::ShellPath,
                    format!("Could not update {}: {}", rc.display(), e),
                );
            }
        }
    }

    fn fetch_font(
        &self,
        layout: &InstallLayout,
        report: &mut ProvisionReport,
        ui: &mut dyn UserInterface,
    ) {
        if self.options.skip_font {
            report.record(Step::Font, StepStatus::Skipped, Some("disabled".into()));
            return;
        }

        let mut spinner = ui.start_spinner("Downloading font...");
        match ensure_font(self.fetcher, &self.config.font, &layout.font_path) {
            Ok(FontOutcome::Downloaded { bytes, .. }) => {
                spinner.finish_success("Font downloaded");
                report.record(Step::Font, StepStatus::Done, Some(format!("{} bytes", bytes)));
            }
            Ok(FontOutcome::AlreadyPresent) => {
                spinner.finish_skipped("Font already present");
                report.record(Step::Font, StepStatus::Skipped, Some("already present".into()));
            }
            Err(e) => {
                spinner.finish_warning("Font download failed");
                report.advise(
                    Step::Font,
                    format!(
                        "{}. Download it manually into {}",
                        e,
                        layout.asset_dir.display()
                    ),
                );
            }
        }
    }
}
