//! Shell startup file edits.
//!
//! The only edit the installer makes is adding the launcher directory to
//! PATH. The edit is an "ensure line present" operation: running it any
//! number of times leaves exactly one copy of the line.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use crate::error::Result;

/// Comment written above lines this tool adds.
pub const MARKER_COMMENT: &str = "# Added by xshot-setup";

/// Build the export line that puts `bin_dir` on PATH.
///
/// Directories under `home` are written relative to `$HOME` so the line
/// keeps working if the home directory moves.
pub fn path_export_line(bin_dir: &Path, home: &Path) -> String {
    let dir = match bin_dir.strip_prefix(home) {
        Ok(rel) if !rel.as_os_str().is_empty() => format!("$HOME/{}", rel.display()),
        _ => bin_dir.display().to_string(),
    };
    format!("export PATH=\"{}:$PATH\"", dir)
}

/// Whether `file` already contains `line` (ignoring surrounding whitespace).
pub fn contains_line(file: &Path, line: &str) -> Result<bool> {
    match fs::read_to_string(file) {
        Ok(content) => Ok(content.lines().any(|l| l.trim() == line.trim())),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Append `line` to `file` unless it is already there.
///
/// Creates the file when missing. Returns `true` when the line was added.
pub fn ensure_line_present(file: &Path, line: &str) -> Result<bool> {
    if contains_line(file, line)? {
        tracing::debug!("{} already contains PATH export", file.display());
        return Ok(false);
    }

    let needs_newline = match fs::read(file) {
        Ok(bytes) => !bytes.is_empty() && !bytes.ends_with(b"\n"),
        Err(e) if e.kind() == ErrorKind::NotFound => false,
        Err(e) => return Err(e.into()),
    };

    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut handle = OpenOptions::new().create(true).append(true).open(file)?;
    if needs_newline {
        writeln!(handle)?;
    }
    writeln!(handle, "{}", MARKER_COMMENT)?;
    writeln!(handle, "{}", line)?;

    tracing::info!("Appended PATH export to {}", file.display());
    Ok(true)
}
