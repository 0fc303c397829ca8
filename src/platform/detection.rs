//! Platform detection.
//!
//! Decides which platform family the installer is running on by
//! checking, in order:
//! 1. The Termux marker directory (or a Termux `PREFIX`)
//! 2. `/etc/os-release`, then `/usr/lib/os-release`
//! 3. The macOS system version descriptor
//!
//! If none of these exist the platform is unknown and installation
//! cannot proceed.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::{Result, SetupError};

use super::HostEnv;

/// Marker directory present on every Termux install.
pub const TERMUX_MARKER: &str = "/data/data/com.termux";

/// Default Termux `PREFIX` when the variable is not exported.
pub const TERMUX_DEFAULT_PREFIX: &str = "/data/data/com.termux/files/usr";

/// OS descriptor files, in lookup order.
pub const OS_RELEASE_PATHS: &[&str] = &["/etc/os-release", "/usr/lib/os-release"];

/// macOS version descriptor.
pub const MACOS_DESCRIPTOR: &str = "/System/Library/CoreServices/SystemVersion.plist";

/// Platform family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlatformKind {
    /// Any Linux distribution with an os-release file.
    GenericLinux,
    /// Termux on Android. Binaries live under `$PREFIX`, not `/usr`.
    Termux,
    /// macOS.
    MacOs,
}

impl PlatformKind {
    /// Short display name.
    pub fn name(&self) -> &'static str {
        match self {
            PlatformKind::GenericLinux => "generic-linux",
            PlatformKind::Termux => "termux",
            PlatformKind::MacOs => "macos",
        }
    }

    /// Whether the launcher goes into `$PREFIX/bin` instead of `~/.local/bin`.
    pub fn uses_prefix_bin(&self) -> bool {
        matches!(self, PlatformKind::Termux)
    }
}

/// Identification fields from an os-release style descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OsRelease {
    /// Machine-readable id (`ubuntu`, `arch`, `termux`, ...).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Version, when the descriptor carries one.
    pub version_id: Option<String>,
}

impl OsRelease {
    /// Parse `KEY=value` lines, stripping optional quotes.
    pub fn parse(content: &str) -> Self {
        let mut id = None;
        let mut name = None;
        let mut version_id = None;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim().trim_matches('"').trim_matches('\'').to_string();
            match key.trim() {
                "ID" => id = Some(value),
                "NAME" => name = Some(value),
                "VERSION_ID" => version_id = Some(value),
                _ => {}
            }
        }

        Self {
            id: id.unwrap_or_else(|| "linux".to_string()),
            name: name.unwrap_or_else(|| "Linux".to_string()),
            version_id,
        }
    }

    fn termux() -> Self {
        Self {
            id: "termux".to_string(),
            name: "Termux".to_string(),
            version_id: None,
        }
    }

    fn macos() -> Self {
        Self {
            id: "macos".to_string(),
            name: "macOS".to_string(),
            version_id: None,
        }
    }
}

/// Result of platform detection.
#[derive(Debug, Clone)]
pub struct DetectedPlatform {
    /// Platform family.
    pub kind: PlatformKind,
    /// Identification of the OS.
    pub os: OsRelease,
    /// The file or directory that decided the platform.
    pub detected_via: PathBuf,
}

/// Detect the platform family from OS descriptors.
pub fn detect_platform(env: &HostEnv) -> Result<DetectedPlatform> {
    let marker = env.host_path(TERMUX_MARKER);
    if marker.is_dir() {
        return Ok(DetectedPlatform {
            kind: PlatformKind::Termux,
            os: OsRelease::termux(),
            detected_via: marker,
        });
    }
    if env.var("PREFIX").is_some_and(|p| p.contains("com.termux")) {
        return Ok(DetectedPlatform {
            kind: PlatformKind::Termux,
            os: OsRelease::termux(),
            detected_via: PathBuf::from("$PREFIX"),
        });
    }

    for candidate in OS_RELEASE_PATHS {
        let path = env.host_path(candidate);
        if path.is_file() {
            let content = fs::read_to_string(&path)?;
            return Ok(DetectedPlatform {
                kind: PlatformKind::GenericLinux,
                os: OsRelease::parse(&content),
                detected_via: path,
            });
        }
    }

    let mac = env.host_path(MACOS_DESCRIPTOR);
    if mac.is_file() {
        return Ok(DetectedPlatform {
            kind: PlatformKind::MacOs,
            os: OsRelease::macos(),
            detected_via: mac,
        });
    }

    let mut checked: Vec<&str> = vec![TERMUX_MARKER];
    checked.extend(OS_RELEASE_PATHS);
    checked.push(MACOS_DESCRIPTOR);
    Err(SetupError::UnknownPlatform {
        checked: checked.join(", "),
    })
}

/// Platform kind for read-only commands, which should work even when no
/// OS descriptor can be found.
pub fn detect_kind_lenient(env: &HostEnv) -> PlatformKind {
    detect_platform(env)
        .map(|p| p.kind)
        .unwrap_or(PlatformKind::GenericLinux)
}
