//! Configuration schema for `.xshot-setup.yml`.
//!
//! Every field has a default, so an empty file (or no file at all) yields
//! the stock XShot installation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default font download location.
pub const DEFAULT_FONT_URL: &str = "https://github.com/ryanoasis/nerd-fonts/raw/v2.1.0/patched-fonts/JetBrainsMono/Ligatures/Medium/complete/JetBrains%20Mono%20Medium%20Nerd%20Font%20Complete.ttf";

/// Default font file name inside the asset directory.
pub const DEFAULT_FONT_FILE: &str = "JetBrains Mono Medium Nerd Font Complete.ttf";

/// Config file name looked up next to the source tree or install dir.
pub const CONFIG_FILE_NAME: &str = ".xshot-setup.yml";

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    /// Application name (for display purposes)
    pub app_name: String,

    /// Python distribution name, used for `pip uninstall`
    pub package_name: String,

    /// Install directory. Relative paths resolve against the home directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_dir: Option<PathBuf>,

    /// Config directory. Relative paths resolve against the home directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_dir: Option<PathBuf>,

    /// File name of the launcher shim
    pub launcher_name: String,

    /// Python package directory inside the install dir
    pub package_dir: String,

    /// Module executed by the launcher (`python -m <module_entry>`)
    pub module_entry: String,

    /// Requirements manifest, relative to the install dir
    pub requirements_file: String,

    /// Runtime names to probe, in preference order
    pub runtime_candidates: Vec<String>,

    /// Package installer names to probe, in preference order
    pub installer_candidates: Vec<String>,

    /// Extra arguments passed to every `pip install`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub installer_args: Vec<String>,

    /// Shell startup file receiving the PATH export, relative to home
    pub shell_profile: PathBuf,

    /// System dependency settings
    pub dependencies: DependencyConfig,

    /// Font asset settings
    pub font: FontConfig,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            app_name: "XShot".to_string(),
            package_name: "xshot".to_string(),
            install_dir: None,
            config_dir: None,
            launcher_name: "xshot".to_string(),
            package_dir: "xshot_py".to_string(),
            module_entry: "xshot_py.main".to_string(),
            requirements_file: "requirements.txt".to_string(),
            runtime_candidates: vec!["python3".to_string(), "python".to_string()],
            installer_candidates: vec!["pip3".to_string(), "pip".to_string()],
            installer_args: Vec::new(),
            shell_profile: PathBuf::from(".bashrc"),
            dependencies: DependencyConfig::default(),
            font: FontConfig::default(),
        }
    }
}

impl SetupConfig {
    /// Install directory for a home directory.
    pub fn install_dir_in(&self, home: &Path) -> PathBuf {
        resolve_under(home, self.install_dir.as_deref(), ".xshot")
    }

    /// Config directory for a home directory.
    pub fn config_dir_in(&self, home: &Path) -> PathBuf {
        resolve_under(home, self.config_dir.as_deref(), ".config/xshot")
    }

    /// Shell startup file for a home directory.
    pub fn shell_profile_in(&self, home: &Path) -> PathBuf {
        home.join(&self.shell_profile)
    }
}

fn resolve_under(home: &Path, configured: Option<&Path>, default: &str) -> PathBuf {
    match configured {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => home.join(path),
        None => home.join(default),
    }
}

/// System dependency installation settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DependencyConfig {
    /// Treat dependency and pip failures as fatal
    #[serde(skip_serializing_if = "is_false")]
    pub strict: bool,

    /// Skip system package installation entirely
    #[serde(skip_serializing_if = "is_false")]
    pub skip: bool,
}

/// Font asset settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Download URL
    pub url: String,

    /// File name inside the asset directory
    pub file_name: String,

    /// Download timeout in seconds
    #[serde(default = "default_font_timeout")]
    pub timeout_secs: u64,

    /// Expected SHA-256 of the file, hex encoded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,

    /// Skip the download
    #[serde(skip_serializing_if = "is_false")]
    pub skip: bool,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_FONT_URL.to_string(),
            file_name: DEFAULT_FONT_FILE.to_string(),
            timeout_secs: default_font_timeout(),
            sha256: None,
            skip: false,
        }
    }
}

fn default_font_timeout() -> u64 {
    60
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_gives_defaults() {
        let config: SetupConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, SetupConfig::default());
        assert_eq!(config.runtime_candidates, vec!["python3", "python"]);
        assert_eq!(config.font.timeout_secs, 60);
    }

    #[test]
    fn partial_font_section_keeps_other_defaults() {
        let yaml = "font:\n  timeout_secs: 5\n  sha256: abc123\n";
        let config: SetupConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.font.timeout_secs, 5);
        assert_eq!(config.font.sha256.as_deref(), Some("abc123"));
        assert_eq!(config.font.url, DEFAULT_FONT_URL);
        assert!(!config.font.skip);
    }

    #[test]
    fn dependency_flags_parse() {
        let yaml = "dependencies:\n  strict: true\n";
        let config: SetupConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.dependencies.strict);
        assert!(!config.dependencies.skip);
    }

    #[test]
    fn default_dirs_live_under_home() {
        let config = SetupConfig::default();
        let home = Path::new("/home/u");
        assert_eq!(config.install_dir_in(home), PathBuf::from("/home/u/.xshot"));
        assert_eq!(
            config.config_dir_in(home),
            PathBuf::from("/home/u/.config/xshot")
        );
        assert_eq!(
            config.shell_profile_in(home),
            PathBuf::from("/home/u/.bashrc")
        );
    }

    #[test]
    fn relative_install_dir_resolves_against_home() {
        let config: SetupConfig = serde_yaml::from_str("install_dir: apps/xshot").unwrap();
        assert_eq!(
            config.install_dir_in(Path::new("/home/u")),
            PathBuf::from("/home/u/apps/xshot")
        );
    }

    #[test]
    fn absolute_install_dir_is_kept() {
        let config: SetupConfig = serde_yaml::from_str("install_dir: /opt/xshot").unwrap();
        assert_eq!(
            config.install_dir_in(Path::new("/home/u")),
            PathBuf::from("/opt/xshot")
        );
    }

    #[test]
    fn serialization_omits_unset_options() {
        let yaml = serde_yaml::to_string(&SetupConfig::default()).unwrap();
        assert!(!yaml.contains("install_dir"));
        assert!(!yaml.contains("sha256"));
        assert!(yaml.contains("launcher_name: xshot"));
    }
}
