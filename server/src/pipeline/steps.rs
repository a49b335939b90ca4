//! The ten pipeline steps and the progress events they emit

use serde::{Deserialize, Serialize};
use std::fmt;

/// Event name used for progress updates on the broadcaster
pub const PROGRESS_EVENT: &str = "startup:progress";

/// Ordered pipeline steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Plan,
    SearchA,
    SearchB,
    Analyze,
    Ideate,
    Select,
    Tagline,
    Pricing,
    Email,
    Finalize,
}

impl Step {
    /// Every step in execution order
    pub const ALL: [Step; 10] = [
        Step::Plan,
        Step::SearchA,
        Step::SearchB,
        Step::Analyze,
        Step::Ideate,
        Step::Select,
        Step::Tagline,
        Step::Pricing,
        Step::Email,
        Step::Finalize,
    ];

    /// 1-based position in the pipeline
    pub fn number(self) -> u8 {
        match self {
            Step::Plan => 1,
            Step::SearchA => 2,
            Step::SearchB => 3,
            Step::Analyze => 4,
            Step::Ideate => 5,
            Step::Select => 6,
            Step::Tagline => 7,
            Step::Pricing => 8,
            Step::Email => 9,
            Step::Finalize => 10,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Step::Plan => "Plan",
            Step::SearchA => "Search A",
            Step::SearchB => "Search B",
            Step::Analyze => "Analysis",
            Step::Ideate => "Ideation",
            Step::Select => "Selection",
            Step::Tagline => "Tagline",
            Step::Pricing => "Pricing",
            Step::Email => "Email",
            Step::Finalize => "Finalize",
        }
    }

    pub fn category(self) -> ProgressCategory {
        match self {
            Step::Plan => ProgressCategory::Plan,
            Step::SearchA | Step::SearchB => ProgressCategory::Execute,
            Step::Analyze => ProgressCategory::Analyze,
            Step::Ideate | Step::Select | Step::Tagline | Step::Pricing | Step::Email => {
                ProgressCategory::Result
            }
            Step::Finalize => ProgressCategory::Complete,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {} ({})", self.number(), self.name())
    }
}

/// Tag attached to every progress line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgressCategory {
    Init,
    Plan,
    Execute,
    Analyze,
    Result,
    Complete,
    Error,
}

impl ProgressCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ProgressCategory::Init => "INIT",
            ProgressCategory::Plan => "PLAN",
            ProgressCategory::Execute => "EXECUTE",
            ProgressCategory::Analyze => "ANALYZE",
            ProgressCategory::Result => "RESULT",
            ProgressCategory::Complete => "COMPLETE",
            ProgressCategory::Error => "ERROR",
        }
    }
}

/// Event payload for progress updates
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    /// Identifies the pipeline run the event belongs to
    pub run_id: String,
    /// Step number (absent for run-level events)
    pub step: Option<u8>,
    pub step_name: Option<String>,
    pub category: ProgressCategory,
    pub message: String,
    pub timestamp: String,
}

impl ProgressEvent {
    /// Human readable log line, e.g. `[EXECUTE] Step 2 (Search A): Searching query 1...`
    pub fn log_line(&self) -> String {
        match (self.step, &self.step_name) {
            (Some(number), Some(name)) => format!(
                "[{}] Step {} ({}): {}",
                self.category.as_str(),
                number,
                name,
                self.message
            ),
            _ => format!("[{}] {}", self.category.as_str(), self.message),
        }
    }
}
