//! Launcher shim.
//!
//! The launcher is a two-line shell script that runs the application
//! module with whichever runtime was detected at install time.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::Result;
use crate::platform::PlatformKind;

/// Render the launcher script.
///
/// Termux has no `/bin/sh`, so the interpreter comes from the prefix there.
pub fn launcher_script(kind: PlatformKind, prefix: &Path, runtime: &str, module: &str) -> String {
    let shell = if kind.uses_prefix_bin() {
        prefix.join("bin").join("sh").display().to_string()
    } else {
        "/bin/sh".to_string()
    };
    format!("#!{shell}\nexec {runtime} -m {module} \"$@\"\n")
}

/// Write the launcher and mark it executable (0755).
pub fn write_launcher(path: &Path, script: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, script)?;
    set_executable(path)?;
    tracing::debug!("Wrote launcher {}", path.display());
    Ok(())
}

/// Delete the launcher. Returns `false` when it did not exist.
pub fn remove_launcher(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

#[cfg(unix)]
fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn linux_script_uses_bin_sh() {
        let script = launcher_script(
            PlatformKind::GenericLinux,
            Path::new("/usr"),
            "python3",
            "xshot_py.main",
        );
        assert_eq!(script, "#!/bin/sh\nexec python3 -m xshot_py.main \"$@\"\n");
    }

    #[test]
    fn termux_script_uses_prefix_shell() {
        let script = launcher_script(
            PlatformKind::Termux,
            Path::new("/data/data/com.termux/files/usr"),
            "python",
            "xshot_py.main",
        );
        assert!(script.starts_with("#!/data/data/com.termux/files/usr/bin/sh\n"));
        assert!(script.contains("exec python -m xshot_py.main"));
    }

    #[cfg(unix)]
    #[test]
    fn written_launcher_is_executable() {
        use std::os::unix::fs::PermissionsExt;
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".local/bin/xshot");

        write_launcher(&path, "#!/bin/sh\n").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn rewrite_replaces_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("xshot");
        write_launcher(&path, "old").unwrap();
        write_launcher(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn remove_missing_launcher_is_ok() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("xshot");
        assert!(!remove_launcher(&path).unwrap());

        fs::write(&path, "x").unwrap();
        assert!(remove_launcher(&path).unwrap());
        assert!(!path.exists());
    }
}
