//! The detected platform profile.
//!
//! [`detect_profile`] is the detection routine shared by install and
//! uninstall. It runs every probe once and fails before anything on disk
//! is touched when the runtime or the package installer is missing.

use std::path::PathBuf;

use crate::config::SetupConfig;
use crate::error::{Result, SetupError};
use crate::packages::probe::{extract_version, resolve_first, resolve_tool_path, ResolvedCommand};
use crate::packages::{detect_package_manager, PackageManager};
use crate::shell::{CommandRunner, CommandSpec};

use super::detection::{detect_platform, OsRelease, PlatformKind, TERMUX_DEFAULT_PREFIX};
use super::HostEnv;

/// Everything learned about the host before provisioning starts.
#[derive(Debug, Clone)]
pub struct PlatformProfile {
    /// Platform family.
    pub kind: PlatformKind,
    /// OS identification.
    pub os: OsRelease,
    /// Detected system package manager, if any.
    pub package_manager: Option<PackageManager>,
    /// Python runtime.
    pub runtime: ResolvedCommand,
    /// Python package installer.
    pub installer: ResolvedCommand,
    /// Runtime version, when it could be determined.
    pub runtime_version: Option<String>,
    /// Filesystem prefix (`$PREFIX` on Termux).
    pub prefix: PathBuf,
    /// User home directory.
    pub home: PathBuf,
    /// PATH entries at detection time.
    pub path_entries: Vec<PathBuf>,
    /// Whether the process runs as root.
    pub is_root: bool,
}

impl PlatformProfile {
    /// Whether `tool` is executable somewhere on PATH.
    pub fn has_tool(&self, tool: &str) -> bool {
        resolve_tool_path(tool, &self.path_entries).is_some()
    }

    /// Display name of the package manager.
    pub fn package_manager_name(&self) -> &'static str {
        self.package_manager.map(|m| m.name()).unwrap_or("unknown")
    }
}

/// Filesystem prefix for a platform.
pub fn platform_prefix(kind: PlatformKind, env: &HostEnv) -> PathBuf {
    match kind {
        PlatformKind::Termux => PathBuf::from(env.var("PREFIX").unwrap_or(TERMUX_DEFAULT_PREFIX)),
        PlatformKind::GenericLinux => PathBuf::from("/usr"),
        PlatformKind::MacOs => PathBuf::from("/usr/local"),
    }
}

/// Detect platform, package manager, runtime and installer.
///
/// # Errors
///
/// - `UnknownPlatform` when no OS descriptor exists
/// - `HomeNotFound` when the home directory cannot be determined
/// - `MissingRuntime` / `MissingInstaller` when no candidate is on PATH
pub fn detect_profile(
    env: &HostEnv,
    config: &SetupConfig,
    runner: &dyn CommandRunner,
) -> Result<PlatformProfile> {
    let platform = detect_platform(env)?;
    tracing::debug!(
        "Platform {} ({}) via {}",
        platform.kind.name(),
        platform.os.id,
        platform.detected_via.display()
    );

    let home = env.home_dir().ok_or(SetupError::HomeNotFound)?;
    let path_entries = env.path_entries();
    let package_manager = detect_package_manager(platform.kind, &path_entries);

    let runtime = resolve_first(&config.runtime_candidates, &path_entries).ok_or_else(|| {
        SetupError::MissingRuntime {
            candidates: config.runtime_candidates.join(", "),
        }
    })?;
    let installer =
        resolve_first(&config.installer_candidates, &path_entries).ok_or_else(|| {
            SetupError::MissingInstaller {
                candidates: config.installer_candidates.join(", "),
            }
        })?;
    tracing::debug!(
        "Runtime {} at {}, installer {} at {}",
        runtime.name,
        runtime.path.display(),
        installer.name,
        installer.path.display()
    );

    let runtime_version = probe_version(runner, &runtime);

    Ok(PlatformProfile {
        kind: platform.kind,
        os: platform.os,
        package_manager,
        runtime,
        installer,
        runtime_version,
        prefix: platform_prefix(platform.kind, env),
        home,
        path_entries,
        is_root: env.is_elevated(),
    })
}

/// Older Pythons print `--version` to stderr, so both streams are checked.
fn probe_version(runner: &dyn CommandRunner, runtime: &ResolvedCommand) -> Option<String> {
    let spec = CommandSpec::new(runtime.name.as_str()).arg("--version");
    match runner.run(&spec) {
        Ok(result) if result.success => {
            extract_version(&result.stdout).or_else(|| extract_version(&result.stderr))
        }
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("Could not query runtime version: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packages::probe::tests::create_fake_binary;
    use crate::shell::RecordingRunner;
    use std::fs;
    use tempfile::TempDir;

    fn linux_env(root: &TempDir) -> HostEnv {
        let etc = root.path().join("etc");
        fs::create_dir_all(&etc).unwrap();
        fs::write(etc.join("os-release"), "ID=debian\nNAME=\"Debian\"\n").unwrap();
        let bin = root.path().join("bin");
        fs::create_dir_all(&bin).unwrap();
        HostEnv::new(root.path())
            .with_var("HOME", root.path().join("home").display().to_string())
            .with_var("PATH", bin.display().to_string())
    }

    #[test]
    fn detects_full_profile() {
        let root = TempDir::new().unwrap();
        let env = linux_env(&root);
        let bin = root.path().join("bin");
        create_fake_binary(&bin.join("apt"));
        create_fake_binary(&bin.join("python3"));
        create_fake_binary(&bin.join("pip3"));

        let runner = RecordingRunner::new();
        runner.respond_with("python3 --version", "Python 3.11.2\n");

        let profile = detect_profile(&env, &SetupConfig::default(), &runner).unwrap();
        assert_eq!(profile.kind, PlatformKind::GenericLinux);
        assert_eq!(profile.package_manager, Some(PackageManager::Apt));
        assert_eq!(profile.runtime.name, "python3");
        assert_eq!(profile.installer.name, "pip3");
        assert_eq!(profile.runtime_version.as_deref(), Some("3.11.2"));
        assert_eq!(profile.prefix, PathBuf::from("/usr"));
        assert_eq!(profile.home, root.path().join("home"));
    }

    #[test]
    fn falls_back_to_unversioned_names() {
        let root = TempDir::new().unwrap();
        let env = linux_env(&root);
        let bin = root.path().join("bin");
        create_fake_binary(&bin.join("python"));
        create_fake_binary(&bin.join("pip"));

        let profile =
            detect_profile(&env, &SetupConfig::default(), &RecordingRunner::new()).unwrap();
        assert_eq!(profile.runtime.name, "python");
        assert_eq!(profile.installer.name, "pip");
        assert!(profile.package_manager.is_none());
        assert_eq!(profile.package_manager_name(), "unknown");
    }

    #[test]
    fn missing_runtime_is_fatal() {
        let root = TempDir::new().unwrap();
        let env = linux_env(&root);
        create_fake_binary(&root.path().join("bin").join("pip3"));

        let err =
            detect_profile(&env, &SetupConfig::default(), &RecordingRunner::new()).unwrap_err();
        match err {
            SetupError::MissingRuntime { candidates } => {
                assert_eq!(candidates, "python3, python")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_installer_is_fatal() {
        let root = TempDir::new().unwrap();
        let env = linux_env(&root);
        create_fake_binary(&root.path().join("bin").join("python3"));

        let err =
            detect_profile(&env, &SetupConfig::default(), &RecordingRunner::new()).unwrap_err();
        assert!(matches!(err, SetupError::MissingInstaller { .. }));
    }

    #[test]
    fn missing_home_is_fatal() {
        let root = TempDir::new().unwrap();
        let mut env = linux_env(&root);
        env.set_var("HOME", "");

        let err =
            detect_profile(&env, &SetupConfig::default(), &RecordingRunner::new()).unwrap_err();
        assert!(matches!(err, SetupError::HomeNotFound));
    }

    #[test]
    fn version_failure_is_not_fatal() {
        let root = TempDir::new().unwrap();
        let env = linux_env(&root);
        let bin = root.path().join("bin");
        create_fake_binary(&bin.join("python3"));
        create_fake_binary(&bin.join("pip3"));
        let runner = RecordingRunner::new();
        runner.fail_when("--version");

        let profile = detect_profile(&env, &SetupConfig::default(), &runner).unwrap();
        assert!(profile.runtime_version.is_none());
    }

    #[test]
    fn termux_prefix_from_env_or_default() {
        let env = HostEnv::new("/").with_var("PREFIX", "/custom/prefix");
        assert_eq!(
            platform_prefix(PlatformKind::Termux, &env),
            PathBuf::from("/custom/prefix")
        );
        assert_eq!(
            platform_prefix(PlatformKind::Termux, &HostEnv::new("/")),
            PathBuf::from(TERMUX_DEFAULT_PREFIX)
        );
        assert_eq!(
            platform_prefix(PlatformKind::MacOs, &HostEnv::new("/")),
            PathBuf::from("/usr/local")
        );
    }
}
