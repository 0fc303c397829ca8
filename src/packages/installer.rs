//! System dependency installation through the detected package manager.

use crate::error::Result;
use crate::platform::PlatformProfile;
use crate::shell::{run_checked, CommandRunner, CommandSpec};

use super::registry::{Dependency, ManagerSpec};

/// Commands that install every [`Dependency`] with `spec`, in order.
///
/// Managers that need root are wrapped in `sudo` when the process is not
/// root and `sudo` is available. Without `sudo` the commands run as-is and
/// will most likely fail, which is reported as an advisory.
pub fn dependency_commands(spec: &ManagerSpec, profile: &PlatformProfile) -> Vec<CommandSpec> {
    let use_sudo = spec.needs_root && !profile.is_root && profile.has_tool("sudo");

    spec.update_command()
        .into_iter()
        .chain(spec.install_command(&Dependency::ALL))
        .map(|cmd| if use_sudo { cmd.with_sudo() } else { cmd })
        .collect()
}

/// Run the dependency commands.
///
/// Every command is attempted even after a failure, since a failed index
/// refresh often still leaves packages installable. The first failure is
/// returned so the caller can decide whether it is fatal.
pub fn install_dependencies(
    runner: &dyn CommandRunner,
    spec: &ManagerSpec,
    profile: &PlatformProfile,
) -> Result<()> {
    let mut first_failure = None;

    for cmd in dependency_commands(spec, profile) {
        tracing::info!("Running {}", cmd);
        if let Err(err) = run_checked(runner, &cmd) {
            tracing::warn!("{}", err);
            first_failure.get_or_insert(err);
        }
    }

    first_failure.map_or(Ok(()), Err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SetupError;
    use crate::packages::probe::tests::create_fake_binary;
    use crate::packages::probe::ResolvedCommand;
    use crate::packages::PackageManager;
    use crate::platform::{OsRelease, PlatformKind};
    use crate::shell::RecordingRunner;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn profile(kind: PlatformKind, path_entries: Vec<PathBuf>, is_root: bool) -> PlatformProfile {
        PlatformProfile {
            kind,
            os: OsRelease::parse("ID=test\n"),
            package_manager: None,
            runtime: ResolvedCommand {
                name: "python3".into(),
                path: PathBuf::from("/usr/bin/python3"),
            },
            installer: ResolvedCommand {
                name: "pip3".into(),
                path: PathBuf::from("/usr/bin/pip3"),
            },
            runtime_version: None,
            prefix: PathBuf::from("/usr"),
            home: PathBuf::from("/home/u"),
            path_entries,
            is_root,
        }
    }

    #[test]
    fn apt_uses_sudo_when_available_and_not_root() {
        let temp = TempDir::new().unwrap();
        create_fake_binary(&temp.path().join("sudo"));
        let p = profile(PlatformKind::GenericLinux, vec![temp.path().to_path_buf()], false);

        let cmds: Vec<String> = dependency_commands(PackageManager::Apt.spec(), &p)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            cmds,
            vec![
                "sudo apt update",
                "sudo apt install -y python3 imagemagick python3-pip"
            ]
        );
    }

    #[test]
    fn root_skips_sudo() {
        let temp = TempDir::new().unwrap();
        create_fake_binary(&temp.path().join("sudo"));
        let p = profile(PlatformKind::GenericLinux, vec![temp.path().to_path_buf()], true);

        let cmds = dependency_commands(PackageManager::Apt.spec(), &p);
        assert!(cmds.iter().all(|c| c.program == "apt"));
    }

    #[test]
    fn no_sudo_binary_runs_plain() {
        let temp = TempDir::new().unwrap();
        let p = profile(PlatformKind::GenericLinux, vec![temp.path().to_path_buf()], false);

        let cmds = dependency_commands(PackageManager::Dnf.spec(), &p);
        assert_eq!(cmds.len(), 1);
        assert_eq!(
            cmds[0].to_string(),
            "dnf install -y python3 ImageMagick python3-pip"
        );
    }

    #[test]
    fn termux_never_uses_sudo() {
        let temp = TempDir::new().unwrap();
        create_fake_binary(&temp.path().join("sudo"));
        let p = profile(PlatformKind::Termux, vec![temp.path().to_path_buf()], false);

        let cmds: Vec<String> = dependency_commands(PackageManager::Pkg.spec(), &p)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            cmds,
            vec!["pkg update -y", "pkg install -y python imagemagick termux-api"]
        );
    }

    #[test]
    fn install_continues_after_update_failure() {
        let p = profile(PlatformKind::GenericLinux, vec![], true);
        let runner = RecordingRunner::new();
        runner.fail_when("apt update");

        let err = install_dependencies(&runner, PackageManager::Apt.spec(), &p).unwrap_err();
        assert!(matches!(err, SetupError::CommandFailed { code: Some(1), .. }));
        assert!(err.to_string().contains("apt update"));
        assert!(runner.ran("apt install -y"));
    }

    #[test]
    fn install_succeeds_when_all_commands_succeed() {
        let p = profile(PlatformKind::MacOs, vec![], false);
        let runner = RecordingRunner::new();

        install_dependencies(&runner, PackageManager::Brew.spec(), &p).unwrap();
        assert_eq!(
            runner.invocations(),
            vec!["brew update", "brew install python imagemagick"]
        );
    }

    #[test]
    fn pacman_runs_a_single_transaction() {
        let p = profile(PlatformKind::GenericLinux, vec![], true);
        let runner = RecordingRunner::new();

        install_dependencies(&runner, PackageManager::Pacman.spec(), &p).unwrap();
        assert_eq!(
            runner.invocations(),
            vec!["pacman -Syu --needed --noconfirm python imagemagick python-pip"]
        );
    }
}
