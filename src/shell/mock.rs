//! Recording command runner for testing.
//!
//! `RecordingRunner` implements [`CommandRunner`] without spawning
//! processes. Every invocation is captured for later assertion, and
//! invocations can be configured to fail by program or by argument.
//!
//! # Example
//!
//! ```
//! use xshot_setup::shell::{CommandRunner, CommandSpec, RecordingRunner};
//!
//! let runner = RecordingRunner::new();
//! runner.fail_when("apt");
//!
//! let result = runner.run(&CommandSpec::new("apt").arg("update")).unwrap();
//! assert!(!result.success);
//! assert_eq!(runner.invocations(), vec!["apt update".to_string()]);
//! ```

use std::cell::RefCell;
use std::time::Duration;

use crate::error::Result;

use super::command::{CommandResult, CommandRunner, CommandSpec};

/// Command runner that records invocations instead of executing them.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: RefCell<Vec<CommandSpec>>,
    failing: RefCell<Vec<String>>,
    stdout: RefCell<Vec<(String, String)>>,
}

impl RecordingRunner {
    /// Create a runner where every command succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make any command whose rendered form contains `needle` exit 1.
    pub fn fail_when(&self, needle: &str) {
        self.failing.borrow_mut().push(needle.to_string());
    }

    /// Return `stdout` for commands whose rendered form contains `needle`.
    pub fn respond_with(&self, needle: &str, stdout: &str) {
        self.stdout
            .borrow_mut()
            .push((needle.to_string(), stdout.to_string()));
    }

    /// All invocations so far.
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }

    /// All invocations rendered as command lines.
    pub fn invocations(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.to_string()).collect()
    }

    /// Whether any invocation contains `needle`.
    pub fn ran(&self, needle: &str) -> bool {
        self.invocations().iter().any(|c| c.contains(needle))
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandResult> {
        self.calls.borrow_mut().push(spec.clone());
        let rendered = spec.to_string();

        let stdout = self
            .stdout
            .borrow()
            .iter()
            .find(|(needle, _)| rendered.contains(needle.as_str()))
            .map(|(_, out)| out.clone())
            .unwrap_or_default();

        let fails = self
            .failing
            .borrow()
            .iter()
            .any(|needle| rendered.contains(needle.as_str()));

        if fails {
            Ok(CommandResult::failure(
                Some(1),
                stdout,
                "simulated failure".to_string(),
                Duration::ZERO,
            ))
        } else {
            Ok(CommandResult::success(stdout, String::new(), Duration::ZERO))
        }
    }
}
