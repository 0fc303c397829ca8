//! Non-interactive UI for CI/headless environments.

use std::collections::HashMap;

use crate::error::Result;

use super::theme::XShotTheme;
use super::{
    format_duration, parse_answer, OutputMode, Prompt, RunSummary, SpinnerHandle, StatusKind,
    UserInterface,
};

/// Prefix of environment variables that answer prompts.
pub const PROMPT_ENV_PREFIX: &str = "XSHOT_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Prompts are answered from `XSHOT_PROMPT_<KEY>` variables, falling back
/// to each prompt's default.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self {
            mode,
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn confirm(&mut self, prompt: &Prompt) -> Result<bool> {
        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, prompt.key.to_uppercase());
        if let Some(value) = self.env_overrides.get(&env_key) {
            match parse_answer(value) {
                Some(answer) => return Ok(answer),
                None => tracing::warn!(
                    "Ignoring {}={:?}: expected yes or no",
                    env_key,
                    value
                ),
            }
        }

        Ok(prompt.default)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            println!("  {}", message);
        }
        Box::new(NoopSpinner {
            show: self.mode.shows_status(),
        })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", title);
        }
    }

    fn show_summary(&mut self, summary: &RunSummary) {
        if !self.mode.shows_status() {
            return;
        }

        println!();
        println!("  ┌─ Summary ──────────────────────────");
        for step in &summary.steps {
            println!(
                "  │ {} {:<20} {}",
                step.status.bracketed(),
                step.name,
                step.detail.as_deref().unwrap_or("")
            );
        }
        println!("  ├────────────────────────────────────");
        println!(
            "  │ Total: {} · {} warnings · {} skipped",
            format_duration(summary.total_duration),
            summary.count(StatusKind::Warning),
            summary.count(StatusKind::Skipped),
        );
        println!("  └────────────────────────────────────");

        if summary.success {
            println!("  ✓ {} complete!", summary.title);
        } else {
            eprintln!("  ✗ {} failed", summary.title);
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner that prints only the final line (for non-interactive mode).
struct NoopSpinner {
    show: bool,
}

impl SpinnerHandle for NoopSpinner {
    fn finish_success(&mut self, msg: &str) {
        if self.show {
            println!("  {}", XShotTheme::plain().format_success(msg));
        }
    }

    fn finish_warning(&mut self, msg: &str) {
        if self.show {
            println!("  {}", XShotTheme::plain().format_warning(msg));
        }
    }

    fn finish_skipped(&mut self, msg: &str) {
        if self.show {
            println!("  {}", XShotTheme::plain().format_skipped(msg));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ui_with(pairs: &[(&str, &str)]) -> NonInteractiveUI {
        let overrides = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        NonInteractiveUI::with_overrides(OutputMode::Silent, overrides)
    }

    #[test]
    fn non_interactive_is_not_interactive() {
        assert!(!ui_with(&[]).is_interactive());
    }

    #[test]
    fn confirm_uses_default() {
        let mut ui = ui_with(&[]);
        assert!(!ui
            .confirm(&Prompt::confirm("uninstall", "Remove?", false))
            .unwrap());
        assert!(ui
            .confirm(&Prompt::confirm("uninstall", "Remove?", true))
            .unwrap());
    }

    #[test]
    fn confirm_uses_env_override() {
        let mut ui = ui_with(&[("XSHOT_PROMPT_REMOVE_CONFIG", "yes")]);
        let answer = ui
            .confirm(&Prompt::confirm("remove_config", "Remove config?", false))
            .unwrap();
        assert!(answer);
    }

    #[test]
    fn override_can_answer_no() {
        let mut ui = ui_with(&[("XSHOT_PROMPT_UNINSTALL", "n")]);
        let answer = ui
            .confirm(&Prompt::confirm("uninstall", "Remove?", true))
            .unwrap();
        assert!(!answer);
    }

    #[test]
    fn unparseable_override_falls_back_to_default() {
        let mut ui = ui_with(&[("XSHOT_PROMPT_UNINSTALL", "perhaps")]);
        let answer = ui
            .confirm(&Prompt::confirm("uninstall", "Remove?", false))
            .unwrap();
        assert!(!answer);
    }
}
