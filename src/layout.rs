//! Installation directory layout.
//!
//! [`InstallLayout`] is derived from the home directory and platform kind
//! alone, so install, uninstall and verify all agree on where things live.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::config::SetupConfig;
use crate::error::{Result, SetupError};
use crate::platform::{PlatformKind, PlatformProfile};

/// Where every installed artifact lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallLayout {
    /// Copy of the application source tree.
    pub install_dir: PathBuf,
    /// Python package inside the install dir.
    pub package_dir: PathBuf,
    /// User configuration directory.
    pub config_dir: PathBuf,
    /// User themes, inside the config dir.
    pub themes_dir: PathBuf,
    /// Launcher shim.
    pub launcher_path: PathBuf,
    /// Font assets.
    pub asset_dir: PathBuf,
    /// Downloaded font file.
    pub font_path: PathBuf,
}

/// Result of staging the source tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    /// Files were copied.
    Copied { files: usize },
    /// The source already is the install dir.
    InPlace,
}

impl InstallLayout {
    /// Compute the layout for a home directory and platform.
    pub fn resolve(config: &SetupConfig, home: &Path, kind: PlatformKind, prefix: &Path) -> Self {
        let install_dir = config.install_dir_in(home);
        let package_dir = install_dir.join(&config.package_dir);
        let config_dir = config.config_dir_in(home);
        let asset_dir = package_dir.join("assets").join("fonts");

        let bin_dir = if kind.uses_prefix_bin() {
            prefix.join("bin")
        } else {
            home.join(".local").join("bin")
        };

        Self {
            font_path: asset_dir.join(&config.font.file_name),
            themes_dir: config_dir.join("themes"),
            launcher_path: bin_dir.join(&config.launcher_name),
            install_dir,
            package_dir,
            config_dir,
            asset_dir,
        }
    }

    /// Compute the layout for a detected profile.
    pub fn for_profile(profile: &PlatformProfile, config: &SetupConfig) -> Self {
        Self::resolve(config, &profile.home, profile.kind, &profile.prefix)
    }

    /// Directory holding the launcher.
    pub fn launcher_dir(&self) -> &Path {
        self.launcher_path.parent().unwrap_or(Path::new("/"))
    }

    /// Create every directory of the layout.
    ///
    /// Existing directories are left alone, so this is safe to repeat.
    pub fn create(&self) -> Result<()> {
        for dir in [
            &self.install_dir,
            &self.config_dir,
            &self.themes_dir,
            &self.asset_dir,
        ] {
            fs::create_dir_all(dir)?;
            tracing::debug!("Ensured directory {}", dir.display());
        }
        Ok(())
    }

    /// Copy the source tree into the install dir, overwriting existing files.
    ///
    /// The install dir is excluded from the walk when it sits inside the
    /// source tree.
    pub fn stage_source(&self, source: &Path) -> Result<StageOutcome> {
        ensure_source_exists(source)?;
        fs::create_dir_all(&self.install_dir)?;

        let source = source.canonicalize()?;
        let install = self.install_dir.canonicalize()?;
        if source == install {
            tracing::info!("Source is the install directory, skipping copy");
            return Ok(StageOutcome::InPlace);
        }

        let mut files = 0;
        let walker = WalkDir::new(&source)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| !e.path().starts_with(&install));

        for entry in walker {
            let entry = entry.map_err(io::Error::from)?;
            let rel = match entry.path().strip_prefix(&source) {
                Ok(rel) if !rel.as_os_str().is_empty() => rel,
                _ => continue,
            };
            let target = install.join(rel);
            let file_type = entry.file_type();

            if file_type.is_dir() {
                fs::create_dir_all(&target)?;
            } else if file_type.is_symlink() {
                copy_symlink(entry.path(), &target)?;
                files += 1;
            } else {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::copy(entry.path(), &target)?;
                files += 1;
            }
        }

        tracing::info!("Copied {} files into {}", files, install.display());
        Ok(StageOutcome::Copied { files })
    }
}

/// Fail with `SourceNotFound` unless `source` is a directory.
pub fn ensure_source_exists(source: &Path) -> Result<()> {
    if source.is_dir() {
        Ok(())
    } else {
        Err(SetupError::SourceNotFound {
            path: source.to_path_buf(),
        })
    }
}

#[cfg(unix)]
fn copy_symlink(link: &Path, target: &Path) -> Result<()> {
    let dest = fs::read_link(link)?;
    match fs::symlink_metadata(target) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(target)?,
        Ok(_) => fs::remove_file(target)?,
        Err(_) => {}
    }
    std::os::unix::fs::symlink(dest, target)?;
    Ok(())
}

#[cfg(not(unix))]
fn copy_symlink(link: &Path, target: &Path) -> Result<()> {
    if link.is_file() {
        fs::copy(link, target)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn layout_in(home: &Path) -> InstallLayout {
        InstallLayout::resolve(
            &SetupConfig::default(),
            home,
            PlatformKind::GenericLinux,
            Path::new("/usr"),
        )
    }

    #[test]
    fn linux_layout_paths() {
        let layout = layout_in(Path::new("/home/u"));
        assert_eq!(layout.install_dir, PathBuf::from("/home/u/.xshot"));
        assert_eq!(layout.package_dir, PathBuf::from("/home/u/.xshot/xshot_py"));
        assert_eq!(layout.config_dir, PathBuf::from("/home/u/.config/xshot"));
        assert_eq!(layout.themes_dir, PathBuf::from("/home/u/.config/xshot/themes"));
        assert_eq!(layout.launcher_path, PathBuf::from("/home/u/.local/bin/xshot"));
        assert_eq!(
            layout.asset_dir,
            PathBuf::from("/home/u/.xshot/xshot_py/assets/fonts")
        );
        assert!(layout.font_path.ends_with("JetBrains Mono Medium Nerd Font Complete.ttf"));
    }

    #[test]
    fn termux_launcher_goes_into_prefix() {
        let layout = InstallLayout::resolve(
            &SetupConfig::default(),
            Path::new("/data/data/com.termux/files/home"),
            PlatformKind::Termux,
            Path::new("/data/data/com.termux/files/usr"),
        );
        assert_eq!(
            layout.launcher_path,
            PathBuf::from("/data/data/com.termux/files/usr/bin/xshot")
        );
        assert_eq!(
            layout.launcher_dir(),
            Path::new("/data/data/com.termux/files/usr/bin")
        );
    }

    #[test]
    fn create_is_idempotent() {
        let home = TempDir::new().unwrap();
        let layout = layout_in(home.path());

        layout.create().unwrap();
        fs::write(layout.themes_dir.join("custom.json"), "{}").unwrap();
        layout.create().unwrap();

        assert!(layout.install_dir.is_dir());
        assert!(layout.themes_dir.is_dir());
        assert!(layout.asset_dir.is_dir());
        assert!(layout.themes_dir.join("custom.json").exists());
    }

    #[test]
    fn stage_copies_tree_and_overwrites() {
        let home = TempDir::new().unwrap();
        let src = TempDir::new().unwrap();
        fs::create_dir_all(src.path().join("xshot_py/core")).unwrap();
        fs::write(src.path().join("setup.py"), "new").unwrap();
        fs::write(src.path().join("xshot_py/core/a.py"), "print(1)").unwrap();

        let layout = layout_in(home.path());
        fs::create_dir_all(&layout.install_dir).unwrap();
        fs::write(layout.install_dir.join("setup.py"), "old").unwrap();
        fs::write(layout.install_dir.join("extra.txt"), "kept").unwrap();

        let outcome = layout.stage_source(src.path()).unwrap();
        assert_eq!(outcome, StageOutcome::Copied { files: 2 });
        assert_eq!(
            fs::read_to_string(layout.install_dir.join("setup.py")).unwrap(),
            "new"
        );
        assert!(layout.install_dir.join("xshot_py/core/a.py").is_file());
        assert!(layout.install_dir.join("extra.txt").is_file());
    }

    #[test]
    fn stage_in_place_is_skipped() {
        let home = TempDir::new().unwrap();
        let layout = layout_in(home.path());
        fs::create_dir_all(&layout.install_dir).unwrap();
        fs::write(layout.install_dir.join("setup.py"), "x").unwrap();

        let outcome = layout.stage_source(&layout.install_dir).unwrap();
        assert_eq!(outcome, StageOutcome::InPlace);
    }

    #[test]
    fn stage_skips_install_dir_nested_in_source() {
        let src = TempDir::new().unwrap();
        fs::write(src.path().join("setup.py"), "x").unwrap();
        let config = SetupConfig {
            install_dir: Some(src.path().join("build/.xshot")),
            ..SetupConfig::default()
        };
        let layout = InstallLayout::resolve(
            &config,
            src.path(),
            PlatformKind::GenericLinux,
            Path::new("/usr"),
        );

        layout.stage_source(src.path()).unwrap();
        layout.stage_source(src.path()).unwrap();

        assert!(layout.install_dir.join("setup.py").is_file());
        assert!(!layout.install_dir.join("build/.xshot").exists());
    }

    #[test]
    fn missing_source_is_error() {
        let home = TempDir::new().unwrap();
        let layout = layout_in(home.path());
        let err = layout
            .stage_source(&home.path().join("does-not-exist"))
            .unwrap_err();
        assert!(matches!(err, SetupError::SourceNotFound { .. }));
        assert!(!layout.install_dir.exists());
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_recreated() {
        let home = TempDir::new().unwrap();
        let src = TempDir::new().unwrap();
        fs::write(src.path().join("real.txt"), "x").unwrap();
        std::os::unix::fs::symlink("real.txt", src.path().join("link.txt")).unwrap();

        let layout = layout_in(home.path());
        layout.stage_source(src.path()).unwrap();
        layout.stage_source(src.path()).unwrap();

        let link = layout.install_dir.join("link.txt");
        assert_eq!(fs::read_link(&link).unwrap(), PathBuf::from("real.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_replaces_existing_directory() {
        let home = TempDir::new().unwrap();
        let src = TempDir::new().unwrap();
        fs::create_dir_all(src.path().join("real")).unwrap();
        std::os::unix::fs::symlink("real", src.path().join("themes")).unwrap();

        let layout = layout_in(home.path());
        fs::create_dir_all(layout.install_dir.join("themes/old")).unwrap();
        fs::write(layout.install_dir.join("themes/old/a.json"), "{}").unwrap();

        layout.stage_source(src.path()).unwrap();

        let link = layout.install_dir.join("themes");
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_link(&link).unwrap(), PathBuf::from("real"));
    }
}
