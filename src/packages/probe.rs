//! Command probing on PATH.
//!
//! Tool lookup walks the PATH entries captured in the profile instead of
//! shelling out to `which`, whose behavior varies across systems and is
//! sometimes a shell builtin with inconsistent error handling.

use std::path::{Path, PathBuf};

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    for dir in path_entries {
        let candidate = dir.join(tool);
        if candidate.is_file() && is_executable(&candidate) {
            return Some(candidate);
        }
    }
    None
}

/// A command name resolved to a binary on PATH.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommand {
    /// The name as it should be invoked (`python3`).
    pub name: String,
    /// Where it was found.
    pub path: PathBuf,
}

/// Resolve the first candidate present on PATH.
///
/// Candidate order is significant: `["python3", "python"]` prefers the
/// versioned name even when both exist.
pub fn resolve_first<S: AsRef<str>>(
    candidates: &[S],
    path_entries: &[PathBuf],
) -> Option<ResolvedCommand> {
    candidates.iter().find_map(|name| {
        let name = name.as_ref();
        resolve_tool_path(name, path_entries).map(|path| ResolvedCommand {
            name: name.to_string(),
            path,
        })
    })
}

/// Whether a directory appears in PATH.
///
/// Trailing slashes are ignored.
pub fn path_contains(path_entries: &[PathBuf], dir: &Path) -> bool {
    let wanted = dir.components().collect::<PathBuf>();
    path_entries
        .iter()
        .any(|entry| entry.components().collect::<PathBuf>() == wanted)
}

/// Extract a version number from command output.
pub fn extract_version(output: &str) -> Option<String> {
    let patterns = [r"(\d+\.\d+\.\d+)", r"version\s+(\d+\.\d+)", r"v?(\d+\.\d+)"];

    for pattern in &patterns {
        if let Ok(re) = regex::Regex::new(pattern) {
            if let Some(caps) = re.captures(output) {
                if let Some(m) = caps.get(1) {
                    return Some(m.as_str().to_string());
                }
            }
        }
    }

    None
}
