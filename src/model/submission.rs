//! Submission lifecycle state

use super::report::AnalysisReport;

/// Where the current analysis attempt stands
///
/// Exactly one variant is active. `Loading` is left only by a completed
/// attempt, which always lands in `Succeeded` or `Failed`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Loading,
    Succeeded(AnalysisReport),
    Failed(String),
}

impl SubmissionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SubmissionState::Loading)
    }

    pub fn report(&self) -> Option<&AnalysisReport> {
        match self {
            SubmissionState::Succeeded(report) => Some(report),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SubmissionState::Failed(message) => Some(message),
            _ => None,
        }
    }
}
