//! Install command implementation.
//!
//! The `xshot-setup install` command provisions XShot from a source tree.

use std::path::{Path, PathBuf};

use crate::assets::AssetFetcher;
use crate::cli::args::InstallArgs;
use crate::config::SetupConfig;
use crate::error::Result;
use crate::platform::HostEnv;
use crate::provision::{ProvisionOptions, Provisioner};
use crate::shell::CommandRunner;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The install command implementation.
pub struct InstallCommand<'a> {
    env: &'a HostEnv,
    config: SetupConfig,
    runner: Box<dyn CommandRunner>,
    fetcher: Box<dyn AssetFetcher>,
    source: PathBuf,
    args: InstallArgs,
}

impl<'a> InstallCommand<'a> {
    /// Create a new install command.
    pub fn new(
        env: &'a HostEnv,
        config: SetupConfig,
        runner: Box<dyn CommandRunner>,
        fetcher: Box<dyn AssetFetcher>,
        source: &Path,
        args: InstallArgs,
    ) -> Self {
        Self {
            env,
            config,
            runner,
            fetcher,
            source: source.to_path_buf(),
            args,
        }
    }

    fn options(&self) -> ProvisionOptions {
        ProvisionOptions {
            skip_deps: self.args.skip_deps,
            skip_font: self.args.skip_font,
            strict: self.args.strict,
        }
    }
}

impl Command for InstallCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.show_header(&format!("{} Installer", self.config.app_name));

        let provisioner = Provisioner::new(
            self.env,
            &self.config,
            self.runner.as_ref(),
            self.fetcher.as_ref(),
            self.options(),
        );
        let report = provisioner.provision(&self.source, ui)?;

        ui.show_summary(&report.to_summary("Installation"));
        ui.message(&format!(
            "Run `{} --help` to get started.",
            self.config.launcher_name
        ));

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packages::probe::tests::create_fake_binary;
    use crate::shell::RecordingRunner;
    use crate::ui::{MockUI, StatusKind};
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    struct NoNetwork;

    impl AssetFetcher for NoNetwork {
        fn fetch(&self, url: &str, _timeout: Duration) -> anyhow::Result<Vec<u8>> {
            anyhow::bail!("network disabled: {}", url)
        }
    }

    fn host() -> (TempDir, HostEnv) {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("etc")).unwrap();
        fs::write(root.path().join("etc/os-release"), "ID=arch\nNAME=\"Arch Linux\"\n").unwrap();
        let bin = root.path().join("usr/bin");
        create_fake_binary(&bin.join("python3"));
        create_fake_binary(&bin.join("pip3"));
        fs::create_dir_all(root.path().join("home")).unwrap();
        let env = HostEnv::new(root.path())
            .with_var("HOME", root.path().join("home").display().to_string())
            .with_var("PATH", bin.display().to_string());
        (root, env)
    }

    #[test]
    fn install_shows_summary_with_advisories() {
        let (root, env) = host();
        let source = TempDir::new().unwrap();
        fs::write(source.path().join("setup.py"), "").unwrap();

        let cmd = InstallCommand::new(
            &env,
            SetupConfig::default(),
            Box::new(RecordingRunner::new()),
            Box::new(NoNetwork),
            source.path(),
            InstallArgs::default(),
        );
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert_eq!(ui.headers(), ["XShot Installer"]);
        let summary = &ui.summaries()[0];
        assert!(summary.success);
        // no package manager, no requirements.txt, font unreachable
        assert_eq!(summary.count(StatusKind::Warning), 3);
        assert!(ui.has_message("xshot --help"));
        assert!(root.path().join("home/.local/bin/xshot").is_file());
    }

    #[test]
    fn missing_source_propagates_error() {
        let (root, env) = host();
        let cmd = InstallCommand::new(
            &env,
            SetupConfig::default(),
            Box::new(RecordingRunner::new()),
            Box::new(NoNetwork),
            &root.path().join("missing"),
            InstallArgs::default(),
        );
        let mut ui = MockUI::new();

        assert!(cmd.execute(&mut ui).is_err());
        assert!(ui.summaries().is_empty());
    }
}
