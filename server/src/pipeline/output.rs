// Result types returned by a pipeline run

use super::steps::Step;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message used when a failure carries no text of its own
pub const FALLBACK_ERROR: &str = "Agent workflow failed";

/// Everything a successful run produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestigationOutput {
    pub analysis: String,
    pub brand_name: String,
    pub tagline: String,
    /// Pricing table as CSV text
    pub pricing: String,
    /// The full transcript of the run
    pub pitch: String,
    pub email: String,
}

/// Fields computed before a run failed.
///
/// Filled in the order analysis, brand name, tagline, pricing, email; a field
/// is only set once every earlier one has been.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl PartialOutput {
    /// Drop empty values; an empty reply counts as nothing computed
    pub fn without_empty(self) -> Self {
        fn keep(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }
        Self {
            analysis: keep(self.analysis),
            brand_name: keep(self.brand_name),
            tagline: keep(self.tagline),
            pricing: keep(self.pricing),
            email: keep(self.email),
        }
    }
}

/// A run that stopped early
#[derive(Debug, Clone, Error)]
#[error("{failed_step} failed: {error}")]
pub struct PartialFailure {
    /// Failure message reported to the caller
    pub error: String,
    /// Step whose collaborator call failed
    pub failed_step: Step,
    pub partial: PartialOutput,
}

impl PartialFailure {
    pub fn new(failed_step: Step, error: impl Into<String>, partial: PartialOutput) -> Self {
        let error = error.into();
        let error = if error.trim().is_empty() {
            FALLBACK_ERROR.to_string()
        } else {
            error
        };
        Self {
            error,
            failed_step,
            partial: partial.without_empty(),
        }
    }
}
