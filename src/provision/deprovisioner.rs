//! The uninstall sequence.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{remove_install_record, SetupConfig};
use crate::error::Result;
use crate::launcher::remove_launcher;
use crate::layout::InstallLayout;
use crate::platform::{detect_profile, HostEnv};
use crate::shell::{CommandRunner, CommandSpec};
use crate::ui::{Prompt, UserInterface};

/// Prompt key for the top-level confirmation.
pub const UNINSTALL_PROMPT: &str = "uninstall";
/// Prompt key for removing the config directory.
pub const REMOVE_CONFIG_PROMPT: &str = "remove_config";
/// Prompt key for removing the install directory.
pub const REMOVE_INSTALL_PROMPT: &str = "remove_install";

/// What happened to a directory offered for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Removal {
    /// Confirmed and deleted.
    Deleted,
    /// Declined; left on disk.
    Kept,
    /// Did not exist. No prompt was shown.
    Absent,
}

/// Final state of one directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryRemoval {
    pub path: PathBuf,
    pub removal: Removal,
}

/// Result of an uninstall run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DeprovisionOutcome {
    /// The top-level confirmation was declined. Nothing changed.
    Declined,
    /// Uninstall ran.
    Completed {
        /// Whether a launcher file was deleted.
        launcher_removed: bool,
        config_dir: DirectoryRemoval,
        install_dir: DirectoryRemoval,
        advisories: Vec<String>,
    },
}

/// Removes an XShot installation.
pub struct Deprovisioner<'a> {
    env: &'a HostEnv,
    config: &'a SetupConfig,
    runner: &'a dyn CommandRunner,
    assume_yes: bool,
}

impl<'a> Deprovisioner<'a> {
    pub fn new(env: &'a HostEnv, config: &'a SetupConfig, runner: &'a dyn CommandRunner) -> Self {
        Self {
            env,
            config,
            runner,
            assume_yes: false,
        }
    }

    /// Answer yes to every prompt without asking.
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    /// Run the uninstall.
    ///
    /// Detection failures are fatal, the same as for installation.
    pub fn deprovision(&self, ui: &mut dyn UserInterface) -> Result<DeprovisionOutcome> {
        let profile = detect_profile(self.env, self.config, self.runner)?;
        let layout = InstallLayout::for_profile(&profile, self.config);

        let question = format!("Remove {}?", self.config.app_name);
        if !self.ask(ui, UNINSTALL_PROMPT, &question)? {
            tracing::info!("Uninstall declined");
            ui.message("Uninstall cancelled.");
            return Ok(DeprovisionOutcome::Declined);
        }

        let mut advisories = Vec::new();

        let spec = CommandSpec::new(profile.installer.name.as_str())
            .args(["uninstall", "-y"])
            .arg(self.config.package_name.as_str());
        let mut spinner = ui.start_spinner(&format!("Uninstalling {}...", self.config.package_name));
        match self.runner.run(&spec) {
            Ok(result) if result.success => spinner.finish_success(&spec.to_string()),
            Ok(result) => {
                spinner.finish_warning(&format!("{} failed", spec));
                advisories.push(format!(
                    "{} exited with {}",
                    spec,
                    result
                        .exit_code
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| "a signal".to_string())
                ));
            }
            Err(e) => {
                spinner.finish_warning(&format!("{} failed", spec));
                advisories.push(e.to_string());
            }
        }

        let launcher_removed = remove_launcher(&layout.launcher_path)?;
        if launcher_removed {
            ui.success(&format!("Removed {}", layout.launcher_path.display()));
        } else {
            ui.message(&format!(
                "Launcher {} was already absent",
                layout.launcher_path.display()
            ));
        }

        let config_dir = self.offer_removal(
            ui,
            REMOVE_CONFIG_PROMPT,
            "Remove configuration directory",
            &layout.config_dir,
        )?;
        let install_dir = self.offer_removal(
            ui,
            REMOVE_INSTALL_PROMPT,
            "Remove installation directory",
            &layout.install_dir,
        )?;
        if install_dir.removal != Removal::Kept && remove_install_record(&profile.home)? {
            tracing::debug!("Removed install record");
        }

        for advisory in &advisories {
            tracing::warn!("{}", advisory);
            ui.warning(advisory);
        }

        Ok(DeprovisionOutcome::Completed {
            launcher_removed,
            config_dir,
            install_dir,
            advisories,
        })
    }

    fn ask(&self, ui: &mut dyn UserInterface, key: &str, question: &str) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }
        ui.confirm(&Prompt::confirm(key, question, false))
    }

    fn offer_removal(
        &self,
        ui: &mut dyn UserInterface,
        key: &str,
        label: &str,
        dir: &Path,
    ) -> Result<DirectoryRemoval> {
        let removal = if !dir.exists() {
            ui.message(&format!("{} is already absent", dir.display()));
            Removal::Absent
        } else if self.ask(ui, key, &format!("{} {}?", label, dir.display()))? {
            remove_dir(dir)?;
            ui.success(&format!("Removed {}", dir.display()));
            Removal::Deleted
        } else {
            ui.message(&format!("Kept {}", dir.display()));
            Removal::Kept
        };

        tracing::debug!("{}: {:?}", dir.display(), removal);
        Ok(DirectoryRemoval {
            path: dir.to_path_buf(),
            removal,
        })
    }
}

fn remove_dir(dir: &Path) -> Result<()> {
    match fs::remove_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{install_record_path, write_install_record};
    use crate::error::SetupError;
    use crate::packages::probe::tests::create_fake_binary;
    use crate::shell::RecordingRunner;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    struct Installed {
        root: TempDir,
        env: HostEnv,
    }

    impl Installed {
        fn new() -> Self {
            let root = TempDir::new().unwrap();
            let etc = root.path().join("etc");
            fs::create_dir_all(&etc).unwrap();
            fs::write(etc.join("os-release"), "ID=fedora\n").unwrap();
            let bin = root.path().join("usr/bin");
            create_fake_binary(&bin.join("python3"));
            create_fake_binary(&bin.join("pip3"));

            let home = root.path().join("home");
            fs::create_dir_all(home.join(".xshot/xshot_py")).unwrap();
            fs::write(home.join(".xshot/setup.py"), "").unwrap();
            fs::create_dir_all(home.join(".config/xshot/themes")).unwrap();
            fs::create_dir_all(home.join(".local/bin")).unwrap();
            fs::write(home.join(".local/bin/xshot"), "#!/bin/sh\n").unwrap();

            let env = HostEnv::new(root.path())
                .with_var("HOME", home.display().to_string())
                .with_var("PATH", bin.display().to_string());
            Self { root, env }
        }

        fn home(&self) -> PathBuf {
            self.root.path().join("home")
        }

        fn snapshot(&self) -> Vec<PathBuf> {
            let mut paths: Vec<PathBuf> = walkdir::WalkDir::new(self.home())
                .into_iter()
                .map(|e| e.unwrap().into_path())
                .collect();
            paths.sort();
            paths
        }
    }

    #[test]
    fn declined_confirmation_changes_nothing() {
        let host = Installed::new();
        let before = host.snapshot();
        let config = SetupConfig::default();
        let runner = RecordingRunner::new();
        let mut ui = MockUI::new();

        let outcome = Deprovisioner::new(&host.env, &config, &runner)
            .deprovision(&mut ui)
            .unwrap();

        assert_eq!(outcome, DeprovisionOutcome::Declined);
        assert_eq!(host.snapshot(), before);
        assert!(!runner.ran("uninstall"));
        assert_eq!(ui.prompts_shown(), [UNINSTALL_PROMPT]);
    }

    #[test]
    fn accepted_removes_launcher_and_keeps_declined_dirs() {
        let host = Installed::new();
        let config = SetupConfig::default();
        let runner = RecordingRunner::new();
        let mut ui = MockUI::new();
        ui.set_prompt_response(UNINSTALL_PROMPT, true);
        ui.set_prompt_response(REMOVE_CONFIG_PROMPT, true);

        let outcome = Deprovisioner::new(&host.env, &config, &runner)
            .deprovision(&mut ui)
            .unwrap();

        let DeprovisionOutcome::Completed {
            launcher_removed,
            config_dir,
            install_dir,
            advisories,
        } = outcome
        else {
            panic!("expected completed outcome");
        };
        assert!(launcher_removed);
        assert_eq!(config_dir.removal, Removal::Deleted);
        assert_eq!(install_dir.removal, Removal::Kept);
        assert!(advisories.is_empty());

        assert!(!host.home().join(".local/bin/xshot").exists());
        assert!(!host.home().join(".config/xshot").exists());
        assert!(host.home().join(".xshot/setup.py").exists());
        assert!(runner.ran("pip3 uninstall -y xshot"));
    }

    #[test]
    fn assume_yes_removes_everything_without_prompts() {
        let host = Installed::new();
        let config = SetupConfig::default();
        let runner = RecordingRunner::new();
        let mut ui = MockUI::new();

        let outcome = Deprovisioner::new(&host.env, &config, &runner)
            .assume_yes(true)
            .deprovision(&mut ui)
            .unwrap();

        assert!(matches!(outcome, DeprovisionOutcome::Completed { .. }));
        assert!(ui.prompts_shown().is_empty());
        assert!(!host.home().join(".xshot").exists());
        assert!(!host.home().join(".config/xshot").exists());
    }

    #[test]
    fn absent_directories_are_reported_without_prompt() {
        let host = Installed::new();
        fs::remove_dir_all(host.home().join(".config/xshot")).unwrap();
        fs::remove_file(host.home().join(".local/bin/xshot")).unwrap();
        let config = SetupConfig::default();
        let runner = RecordingRunner::new();
        let mut ui = MockUI::new();
        ui.set_prompt_response(UNINSTALL_PROMPT, true);

        let outcome = Deprovisioner::new(&host.env, &config, &runner)
            .deprovision(&mut ui)
            .unwrap();

        let DeprovisionOutcome::Completed {
            launcher_removed,
            config_dir,
            ..
        } = outcome
        else {
            panic!("expected completed outcome");
        };
        assert!(!launcher_removed);
        assert_eq!(config_dir.removal, Removal::Absent);
        assert_eq!(ui.prompts_shown(), [UNINSTALL_PROMPT, REMOVE_INSTALL_PROMPT]);
    }

    #[test]
    fn pip_failure_is_advisory() {
        let host = Installed::new();
        let config = SetupConfig::default();
        let runner = RecordingRunner::new();
        runner.fail_when("uninstall");
        let mut ui = MockUI::new();

        let outcome = Deprovisioner::new(&host.env, &config, &runner)
            .assume_yes(true)
            .deprovision(&mut ui)
            .unwrap();

        let DeprovisionOutcome::Completed { advisories, .. } = outcome else {
            panic!("expected completed outcome");
        };
        assert_eq!(advisories.len(), 1);
        assert!(ui.has_warning("pip3 uninstall -y xshot"));
    }

    #[test]
    fn detection_failure_is_fatal_before_prompting() {
        let host = Installed::new();
        fs::remove_file(host.root.path().join("usr/bin/pip3")).unwrap();
        let before = host.snapshot();
        let config = SetupConfig::default();
        let runner = RecordingRunner::new();
        let mut ui = MockUI::new();

        let result = Deprovisioner::new(&host.env, &config, &runner)
            .assume_yes(true)
            .deprovision(&mut ui);

        assert!(matches!(result, Err(SetupError::MissingInstaller { .. })));
        assert!(ui.prompts_shown().is_empty());
        assert_eq!(host.snapshot(), before);
    }

    #[test]
    fn outcome_serializes_with_tag() {
        let json = serde_json::to_value(DeprovisionOutcome::Declined).unwrap();
        assert_eq!(json["outcome"], "declined");
    }

    #[test]
    fn install_record_follows_install_dir() {
        let host = Installed::new();
        let config = SetupConfig::default();
        write_install_record(&host.home(), &config).unwrap();
        let record = install_record_path(&host.home());

        let mut ui = MockUI::new();
        ui.set_prompt_response(UNINSTALL_PROMPT, true);
        Deprovisioner::new(&host.env, &config, &RecordingRunner::new())
            .deprovision(&mut ui)
            .unwrap();
        assert!(record.is_file());

        Deprovisioner::new(&host.env, &config, &RecordingRunner::new())
            .assume_yes(true)
            .deprovision(&mut MockUI::new())
            .unwrap();
        assert!(!record.exists());
    }

    #[test]
    fn custom_install_dir_is_removed() {
        let host = Installed::new();
        let custom = host.home().join("apps/xshot");
        fs::create_dir_all(custom.join("xshot_py")).unwrap();
        let config = SetupConfig {
            install_dir: Some(custom.clone()),
            ..Default::default()
        };
        let mut ui = MockUI::new();

        let outcome = Deprovisioner::new(&host.env, &config, &RecordingRunner::new())
            .assume_yes(true)
            .deprovision(&mut ui)
            .unwrap();

        let DeprovisionOutcome::Completed { install_dir, .. } = outcome else {
            panic!("expected completed outcome");
        };
        assert_eq!(install_dir.path, custom);
        assert_eq!(install_dir.removal, Removal::Deleted);
        assert!(!custom.exists());
        assert!(host.home().join(".xshot").exists());
    }
}
