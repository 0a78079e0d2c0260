//! Error types for file selection and resume submission
//!
//! The `Display` strings double as the messages shown in the error slot,
//! so keep them short and user-facing.

use reqwest::StatusCode;
use thiserror::Error;

/// Message shown when a file of the wrong type is chosen
pub const UNSUPPORTED_TYPE_MESSAGE: &str = "Please upload a PDF or DOCX file";

/// Message shown for any non-2xx response from the analysis service
pub const REJECTED_MESSAGE: &str = "Failed to analyze resume";

/// A candidate file could not become the current selection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Declared media type is neither PDF nor DOCX
    #[error("{}", UNSUPPORTED_TYPE_MESSAGE)]
    UnsupportedType { declared: String },
    /// Typed path does not point at a regular file
    #[error("File not found: {0}")]
    NotFound(String),
}

/// A submission attempt ended without a report
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The service answered with a non-success status
    #[error("{}", REJECTED_MESSAGE)]
    Rejected(StatusCode),
    /// No usable response (connect failure, timeout, broken body)
    #[error("{0}")]
    Transport(String),
    /// The selected document could not be read from disk
    #[error("{0}")]
    Io(String),
    /// The body was not the expected `{ "analysis": ... }` JSON
    #[error("{0}")]
    Decode(String),
}

impl From<reqwest::Error> for SubmitError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SubmitError::Decode(err.to_string())
        } else {
            SubmitError::Transport(err.to_string())
        }
    }
}
