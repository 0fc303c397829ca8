//! Post-install verification.
//!
//! [`verify`] reads the filesystem only. [`import_checks`] asks the Python
//! runtime to import the installed package. Each expected artifact or
//! module becomes a [`Check`]; the installation passes when every required
//! check passes.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::layout::InstallLayout;
use crate::packages::probe::{is_executable, ResolvedCommand};
use crate::shell::{CommandRunner, CommandSpec};

/// Package subdirectories every installation must contain.
pub const PACKAGE_SUBDIRS: &[&str] = &["core", "config", "themes", "ui", "assets"];

/// Modules that must import after installation, relative to the package.
/// The empty entry is the package itself.
pub const IMPORT_MODULES: &[&str] = &[
    "",
    "core.app",
    "config.config_manager",
    "themes.theme_manager",
    "core.image_processor",
    "core.file_watcher",
    "ui.app_ui",
    "ui.base_ui",
];

/// Outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    /// An optional artifact is missing.
    Warn,
    /// A required artifact is missing.
    Fail,
}

/// One verified artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Check {
    pub name: String,
    pub path: PathBuf,
    pub status: CheckStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// All checks for one layout.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    pub checks: Vec<Check>,
    pub passed: bool,
}

impl VerificationReport {
    /// Checks that did not pass.
    pub fn problems(&self) -> impl Iterator<Item = &Check> {
        self.checks.iter().filter(|c| c.status != CheckStatus::Pass)
    }

    /// Number of checks with the given status.
    pub fn count(&self, status: CheckStatus) -> usize {
        self.checks.iter().filter(|c| c.status == status).count()
    }

    /// Append more checks and recompute the verdict.
    pub fn with_checks(mut self, extra: Vec<Check>) -> Self {
        self.checks.extend(extra);
        self.passed = self.checks.iter().all(|c| c.status != CheckStatus::Fail);
        self
    }
}

/// Inspect an installation.
pub fn verify(layout: &InstallLayout) -> VerificationReport {
    let mut checks = vec![
        dir_check("Install directory", &layout.install_dir),
        dir_check("Package directory", &layout.package_dir),
    ];
    for sub in PACKAGE_SUBDIRS {
        checks.push(dir_check(
            &format!("Package {}/", sub),
            &layout.package_dir.join(sub),
        ));
    }
    checks.push(dir_check("Config directory", &layout.config_dir));
    checks.push(launcher_check(&layout.launcher_path));
    checks.push(font_check(&layout.font_path));

    let passed = checks.iter().all(|c| c.status != CheckStatus::Fail);
    tracing::debug!("Verified {} checks, passed: {}", checks.len(), passed);
    VerificationReport { checks, passed }
}

/// Fully qualified module names for a package.
pub fn import_targets(package: &str) -> Vec<String> {
    IMPORT_MODULES
        .iter()
        .map(|module| {
            if module.is_empty() {
                package.to_string()
            } else {
                format!("{}.{}", package, module)
            }
        })
        .collect()
}

/// Import every module of `package` with the runtime, one check each.
///
/// Without a runtime a single failing `Runtime` check is returned, named
/// after the first candidate.
pub fn import_checks(
    runner: &dyn CommandRunner,
    runtime: Option<&ResolvedCommand>,
    candidates: &[String],
    package: &str,
) -> Vec<Check> {
    let Some(runtime) = runtime else {
        let name = candidates.first().map(String::as_str).unwrap_or("python3");
        let detail = format!("none of {} found on PATH", candidates.join(", "));
        return vec![check("Runtime", Path::new(name), CheckStatus::Fail, Some(&detail))];
    };

    import_targets(package)
        .into_iter()
        .map(|module| {
            let name = format!("Import {}", module);
            let spec = CommandSpec::new(&runtime.name)
                .arg("-c")
                .arg(format!("import {}", module));
            match runner.run(&spec) {
                Ok(result) if result.success => {
                    check(&name, &runtime.path, CheckStatus::Pass, None)
                }
                Ok(result) => {
                    let reason = result
                        .stderr
                        .lines()
                        .rev()
                        .map(str::trim)
                        .find(|line| !line.is_empty())
                        .unwrap_or("import failed");
                    check(&name, &runtime.path, CheckStatus::Fail, Some(reason))
                }
                Err(err) => check(
                    &name,
                    &runtime.path,
                    CheckStatus::Fail,
                    Some(&err.to_string()),
                ),
            }
        })
        .collect()
}

fn check(name: &str, path: &Path, status: CheckStatus, detail: Option<&str>) -> Check {
    Check {
        name: name.to_string(),
        path: path.to_path_buf(),
        status,
        detail: detail.map(str::to_string),
    }
}

fn dir_check(name: &str, path: &Path) -> Check {
    if path.is_dir() {
        check(name, path, CheckStatus::Pass, None)
    } else if path.exists() {
        check(name, path, CheckStatus::Fail, Some("not a directory"))
    } else {
        check(name, path, CheckStatus::Fail, Some("missing"))
    }
}

fn launcher_check(path: &Path) -> Check {
    if !path.is_file() {
        check("Launcher", path, CheckStatus::Fail, Some("missing"))
    } else if !is_executable(path) {
        check("Launcher", path, CheckStatus::Fail, Some("not executable"))
    } else {
        check("Launcher", path, CheckStatus::Pass, None)
    }
}

fn font_check(path: &Path) -> Check {
    let present = path.metadata().map(|m| m.is_file() && m.len() > 0).unwrap_or(false);
    if present {
        check("Font", path, CheckStatus::Pass, None)
    } else {
        check("Font", path, CheckStatus::Warn, Some("missing; rendering falls back to the default font"))
    }
}
