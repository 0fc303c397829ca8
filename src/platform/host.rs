//! Snapshot of the host process environment.
//!
//! Every detection routine reads environment variables and probes
//! well-known files through a [`HostEnv`] rather than through
//! `std::env` directly. Tests build a `HostEnv` over a temporary
//! directory so OS descriptors and marker directories can be faked.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Environment variables and filesystem root used for probing.
#[derive(Debug, Clone)]
pub struct HostEnv {
    vars: HashMap<String, String>,
    root: PathBuf,
    elevated: bool,
}

impl HostEnv {
    /// Capture the current process environment, probing the real `/`.
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
            root: PathBuf::from("/"),
            elevated: crate::shell::is_elevated(),
        }
    }

    /// Create an empty environment rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            vars: HashMap::new(),
            root: root.into(),
            elevated: false,
        }
    }

    /// Builder-style variable assignment.
    pub fn with_var(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set_var(key, value);
        self
    }

    /// Set or replace a variable.
    pub fn set_var(&mut self, key: &str, value: impl Into<String>) {
        self.vars.insert(key.to_string(), value.into());
    }

    /// Mark the environment as running with root privileges.
    pub fn with_elevated(mut self, elevated: bool) -> Self {
        self.elevated = elevated;
        self
    }

    /// Look up a variable. Empty values count as unset.
    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Filesystem root that absolute probe paths are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve an absolute host path (e.g. `/etc/os-release`) under the root.
    pub fn host_path(&self, absolute: &str) -> PathBuf {
        self.root.join(absolute.trim_start_matches('/'))
    }

    /// Whether the process runs as root.
    pub fn is_elevated(&self) -> bool {
        self.elevated
    }

    /// The user's home directory.
    ///
    /// `HOME` wins. When probing the real root and `HOME` is unset, falls
    /// back to the platform lookup.
    pub fn home_dir(&self) -> Option<PathBuf> {
        if let Some(home) = self.var("HOME") {
            return Some(PathBuf::from(home));
        }
        if self.root == Path::new("/") {
            return dirs::home_dir();
        }
        None
    }

    /// The PATH variable split into directories, in order.
    pub fn path_entries(&self) -> Vec<PathBuf> {
        self.var("PATH")
            .map(|path| std::env::split_paths(path).collect())
            .unwrap_or_default()
    }
}
