//! Provisioning report.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::layout::InstallLayout;
use crate::ui::{RunSummary, StatusKind, StepSummary};

/// A provisioning step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Dependencies,
    Layout,
    Stage,
    AppInstall,
    Launcher,
    ShellPath,
    Font,
}

impl Step {
    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Step::Dependencies => "System packages",
            Step::Layout => "Directories",
            Step::Stage => "Copy files",
            Step::AppInstall => "Python package",
            Step::Launcher => "Launcher",
            Step::ShellPath => "Shell PATH",
            Step::Font => "Font",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a step ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Completed.
    Done,
    /// Not needed or disabled.
    Skipped,
    /// Failed without aborting the run.
    Advisory,
}

impl From<StepStatus> for StatusKind {
    fn from(status: StepStatus) -> Self {
        match status {
            StepStatus::Done => StatusKind::Success,
            StepStatus::Skipped => StatusKind::Skipped,
            StepStatus::Advisory => StatusKind::Warning,
        }
    }
}

/// Outcome of one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub step: Step,
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Result of a completed provisioning run.
#[derive(Debug, Clone, Serialize)]
pub struct ProvisionReport {
    /// Where everything was installed.
    pub layout: InstallLayout,
    /// Step outcomes, in execution order.
    pub steps: Vec<StepRecord>,
    /// Advisory messages, in the order they occurred.
    pub advisories: Vec<String>,
    /// Wall time.
    #[serde(skip)]
    pub duration: Duration,
}

impl ProvisionReport {
    /// Start an empty report.
    pub fn new(layout: InstallLayout) -> Self {
        Self {
            layout,
            steps: Vec::new(),
            advisories: Vec::new(),
            duration: Duration::ZERO,
        }
    }

    /// Record a finished step.
    pub fn record(&mut self, step: Step, status: StepStatus, detail: Option<String>) {
        self.steps.push(StepRecord {
            step,
            status,
            detail,
        });
    }

    /// Record a step as advisory and keep its message.
    pub fn advise(&mut self, step: Step, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{}: {}", step, message);
        self.advisories.push(message.clone());
        self.record(step, StepStatus::Advisory, Some(message));
    }

    /// Final status of a step, if it ran.
    ///
    /// A step recorded more than once reports its worst outcome.
    pub fn status_of(&self, step: Step) -> Option<StepStatus> {
        let mut statuses = self.steps.iter().filter(|r| r.step == step).map(|r| r.status);
        let first = statuses.next()?;
        Some(statuses.fold(first, |acc, s| {
            if s == StepStatus::Advisory || acc == StepStatus::Advisory {
                StepStatus::Advisory
            } else if s == StepStatus::Done || acc == StepStatus::Done {
                StepStatus::Done
            } else {
                StepStatus::Skipped
            }
        }))
    }

    /// Whether any advisory was recorded.
    pub fn has_advisories(&self) -> bool {
        !self.advisories.is_empty()
    }

    /// Convert into a UI summary.
    pub fn to_summary(&self, title: &str) -> RunSummary {
        RunSummary {
            title: title.to_string(),
            steps: self
                .steps
                .iter()
                .map(|r| StepSummary {
                    name: r.step.name().to_string(),
                    status: r.status.into(),
                    detail: r.detail.clone(),
                })
                .collect(),
            total_duration: self.duration,
            success: true,
        }
    }
}
