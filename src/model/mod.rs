//! Model layer - page state
//!
//! - `FileSelector` - current resume selection or its validation error
//! - `SubmissionState` - request lifecycle and the received report
//! - `ModalStack` - modal overlay management

pub mod file;
pub mod modal;
pub mod report;
pub mod submission;

pub use file::{DocumentType, FileCandidate, FileSelector, SelectedFile};
pub use report::{AnalysisReport, AnalyzeResponse, Recommendation, ScoreBand, Severity};
pub use submission::SubmissionState;
