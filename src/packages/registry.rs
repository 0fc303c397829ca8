//! Package manager registry.
//!
//! Each supported system package manager is described by a
//! [`ManagerSpec`] capability record: the binary to probe for, how to
//! refresh its index, how to install packages, and what each required
//! dependency is called in its repositories. Detection walks
//! [`MANAGERS`] in order and picks the first manager whose binary is on
//! PATH, so the order of that table is the priority order. Supporting a
//! new manager means adding a record, not a new branch.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::platform::PlatformKind;
use crate::shell::CommandSpec;

use super::probe::resolve_tool_path;

/// A system-level dependency of XShot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dependency {
    /// The Python interpreter.
    Runtime,
    /// ImageMagick.
    ImageLibrary,
    /// pip.
    PackageInstaller,
    /// Platform integration tools (Termux:API on Android).
    PlatformHelper,
}

impl Dependency {
    /// Every dependency, in install order.
    pub const ALL: [Dependency; 4] = [
        Dependency::Runtime,
        Dependency::ImageLibrary,
        Dependency::PackageInstaller,
        Dependency::PlatformHelper,
    ];

    /// Human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Dependency::Runtime => "Python runtime",
            Dependency::ImageLibrary => "ImageMagick",
            Dependency::PackageInstaller => "pip",
            Dependency::PlatformHelper => "platform helper tools",
        }
    }
}

/// Known system package managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Pkg,
    Apt,
    Dnf,
    Yum,
    Pacman,
    Zypper,
    Apk,
    Brew,
}

impl PackageManager {
    /// The capability record for this manager.
    pub fn spec(&self) -> &'static ManagerSpec {
        MANAGERS
            .iter()
            .find(|m| m.manager == *self)
            .unwrap_or(&MANAGERS[0])
    }

    /// Display name (also the binary name).
    pub fn name(&self) -> &'static str {
        self.spec().binary
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How to drive one package manager.
#[derive(Debug)]
pub struct ManagerSpec {
    /// Which manager this describes.
    pub manager: PackageManager,
    /// Binary probed on PATH.
    pub binary: &'static str,
    /// Platforms this manager is considered on.
    pub platforms: &'static [PlatformKind],
    /// Index refresh arguments, if the manager needs a separate refresh.
    pub update: Option<&'static [&'static str]>,
    /// Install arguments; package names are appended.
    pub install: &'static [&'static str],
    /// Package names per dependency. Missing entries need no package.
    pub packages: &'static [(Dependency, &'static str)],
    /// Whether install commands need root.
    pub needs_root: bool,
}

const LINUX: &[PlatformKind] = &[PlatformKind::GenericLinux];

/// Supported managers in probe priority order.
pub const MANAGERS: &[ManagerSpec] = &[
    ManagerSpec {
        manager: PackageManager::Pkg,
        binary: "pkg",
        platforms: &[PlatformKind::Termux],
        update: Some(&["update", "-y"]),
        install: &["install", "-y"],
        packages: &[
            (Dependency::Runtime, "python"),
            (Dependency::ImageLibrary, "imagemagick"),
            (Dependency::PlatformHelper, "termux-api"),
        ],
        needs_root: false,
    },
    ManagerSpec {
        manager: PackageManager::Apt,
        binary: "apt",
        platforms: LINUX,
        update: Some(&["update"]),
        install: &["install", "-y"],
        packages: &[
            (Dependency::Runtime, "python3"),
            (Dependency::ImageLibrary, "imagemagick"),
            (Dependency::PackageInstaller, "python3-pip"),
        ],
        needs_root: true,
    },
    ManagerSpec {
        manager: PackageManager::Dnf,
        binary: "dnf",
        platforms: LINUX,
        update: None,
        install: &["install", "-y"],
        packages: &[
            (Dependency::Runtime, "python3"),
            (Dependency::ImageLibrary, "ImageMagick"),
            (Dependency::PackageInstaller, "python3-pip"),
        ],
        needs_root: true,
    },
    ManagerSpec {
        manager: PackageManager::Yum,
        binary: "yum",
        platforms: LINUX,
        update: None,
        install: &["install", "-y"],
        packages: &[
            (Dependency::Runtime, "python3"),
            (Dependency::ImageLibrary, "ImageMagick"),
            (Dependency::PackageInstaller, "python3-pip"),
        ],
        needs_root: true,
    },
    ManagerSpec {
        manager: PackageManager::Pacman,
        binary: "pacman",
        platforms: LINUX,
        // Syncing without upgrading leaves a partial upgrade behind.
        update: None,
        install: &["-Syu", "--needed", "--noconfirm"],
        packages: &[
            (Dependency::Runtime, "python"),
            (Dependency::ImageLibrary, "imagemagick"),
            (Dependency::PackageInstaller, "python-pip"),
        ],
        needs_root: true,
    },
    ManagerSpec {
        manager: PackageManager::Zypper,
        binary: "zypper",
        platforms: LINUX,
        update: Some(&["refresh"]),
        install: &["install", "-y"],
        packages: &[
            (Dependency::Runtime, "python3"),
            (Dependency::ImageLibrary, "ImageMagick"),
            (Dependency::PackageInstaller, "python3-pip"),
        ],
        needs_root: true,
    },
    ManagerSpec {
        manager: PackageManager::Apk,
        binary: "apk",
        platforms: LINUX,
        update: Some(&["update"]),
        install: &["add"],
        packages: &[
            (Dependency::Runtime, "python3"),
            (Dependency::ImageLibrary, "imagemagick"),
            (Dependency::PackageInstaller, "py3-pip"),
        ],
        needs_root: true,
    },
    ManagerSpec {
        manager: PackageManager::Brew,
        binary: "brew",
        platforms: &[PlatformKind::MacOs, PlatformKind::GenericLinux],
        update: Some(&["update"]),
        install: &["install"],
        packages: &[
            (Dependency::Runtime, "python"),
            (Dependency::ImageLibrary, "imagemagick"),
        ],
        needs_root: false,
    },
];

impl ManagerSpec {
    /// Manager-specific package names for `deps`, in order, without duplicates.
    pub fn package_names(&self, deps: &[Dependency]) -> Vec<&'static str> {
        let mut names = Vec::new();
        for dep in deps {
            if let Some((_, name)) = self.packages.iter().find(|(d, _)| d == dep) {
                if !names.contains(name) {
                    names.push(*name);
                }
            }
        }
        names
    }

    /// Index refresh command, if this manager has one.
    pub fn update_command(&self) -> Option<CommandSpec> {
        self.update
            .map(|args| CommandSpec::new(self.binary).args(args.iter().copied()))
    }

    /// Install command for `deps`, or `None` if nothing maps to a package.
    pub fn install_command(&self, deps: &[Dependency]) -> Option<CommandSpec> {
        let names = self.package_names(deps);
        if names.is_empty() {
            return None;
        }
        Some(
            CommandSpec::new(self.binary)
                .args(self.install.iter().copied())
                .args(names),
        )
    }

    /// Whether this manager is considered on `kind`.
    pub fn supports(&self, kind: PlatformKind) -> bool {
        self.platforms.contains(&kind)
    }
}

/// Detect the package manager for a platform.
///
/// Returns the first manager in [`MANAGERS`] that supports `kind` and whose
/// binary is executable somewhere on `path_entries`.
pub fn detect_package_manager(
    kind: PlatformKind,
    path_entries: &[PathBuf],
) -> Option<PackageManager> {
    for spec in MANAGERS.iter().filter(|m| m.supports(kind)) {
        if let Some(path) = resolve_tool_path(spec.binary, path_entries) {
            tracing::debug!("Found package manager {} at {}", spec.binary, path.display());
            return Some(spec.manager);
        }
    }
    tracing::debug!("No known package manager found for {}", kind.name());
    None
}
