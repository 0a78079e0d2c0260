//! External service interactions
//!
//! - Resume analysis HTTP client
//! - Submission lifecycle on a background runtime

pub mod analyzer;
pub mod submission;

#[cfg(test)]
pub(crate) mod fake;

pub use analyzer::{Analyzer, HttpAnalyzer};
pub use submission::SubmissionController;
