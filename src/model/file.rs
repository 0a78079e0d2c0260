//! Resume file selection
//!
//! Holds either the current valid selection or the validation message that
//! replaced it. Only the declared media type is checked, never the contents.

use crate::error::ValidationError;
use std::path::{Path, PathBuf};

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Document formats the analysis service accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentType {
    Pdf,
    Docx,
}

impl DocumentType {
    /// Match a declared media type exactly
    pub fn from_mime(mime: &str) -> Option<DocumentType> {
        match mime {
            PDF_MIME => Some(DocumentType::Pdf),
            DOCX_MIME => Some(DocumentType::Docx),
            _ => None,
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            DocumentType::Pdf => PDF_MIME,
            DocumentType::Docx => DOCX_MIME,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::Pdf => "PDF",
            DocumentType::Docx => "DOCX",
        }
    }
}

/// A file the user pointed at, before validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub path: PathBuf,
    /// Media type as declared by the file's extension
    pub declared_type: String,
}

impl FileCandidate {
    pub fn new(path: impl Into<PathBuf>, declared_type: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            declared_type: declared_type.into(),
        }
    }

    /// Build a candidate from a path, declaring its type from the extension
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let declared = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or("application/octet-stream");
        Self::new(path, declared)
    }
}

/// The current, validated resume document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub file_name: String,
    pub doc_type: DocumentType,
}

impl SelectedFile {
    pub fn media_type(&self) -> &'static str {
        self.doc_type.mime()
    }
}

/// Holds the selection or the error that replaced it
#[derive(Debug, Default)]
pub struct FileSelector {
    selected: Option<SelectedFile>,
    error: Option<ValidationError>,
}

impl FileSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a candidate and make it the current selection
    ///
    /// On failure any previous selection is dropped so it cannot be
    /// resubmitted by accident.
    pub fn select(&mut self, candidate: FileCandidate) -> Result<&SelectedFile, ValidationError> {
        let Some(doc_type) = DocumentType::from_mime(&candidate.declared_type) else {
            let err = ValidationError::UnsupportedType {
                declared: candidate.declared_type,
            };
            tracing::info!(path = %candidate.path.display(), "rejected resume selection: {err:?}");
            return Err(self.reject(err));
        };

        let file_name = candidate
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| candidate.path.display().to_string());

        tracing::info!(path = %candidate.path.display(), kind = doc_type.label(), "selected resume");
        self.error = None;
        Ok(&*self.selected.insert(SelectedFile {
            path: candidate.path,
            file_name,
            doc_type,
        }))
    }

    /// Record a validation failure raised outside `select`
    pub fn reject(&mut self, err: ValidationError) -> ValidationError {
        self.selected = None;
        self.error = Some(err.clone());
        err
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_pdf_and_docx() {
        let mut selector = FileSelector::new();

        let selected = selector
            .select(FileCandidate::new("/home/me/resume.pdf", PDF_MIME))
            .unwrap();
        assert_eq!(selected.doc_type, DocumentType::Pdf);
        assert_eq!(selected.file_name, "resume.pdf");

        let selected = selector
            .select(FileCandidate::new("cv.docx", DOCX_MIME))
            .unwrap();
        assert_eq!(selected.doc_type, DocumentType::Docx);
        assert_eq!(selector.selected().unwrap().file_name, "cv.docx");
        assert!(selector.error().is_none());
    }

    #[test]
    fn test_rejects_other_types_and_clears_selection() {
        let mut selector = FileSelector::new();
        selector
            .select(FileCandidate::new("resume.pdf", PDF_MIME))
            .unwrap();

        let err = selector
            .select(FileCandidate::new("resume.txt", "text/plain"))
            .unwrap_err();

        assert!(matches!(err, ValidationError::UnsupportedType { .. }));
        assert!(selector.selected().is_none());
        assert_eq!(
            selector.error().map(|e| e.to_string()).as_deref(),
            Some("Please upload a PDF or DOCX file")
        );
    }

    #[test]
    fn test_type_match_is_exact() {
        let mut selector = FileSelector::new();
        for declared in ["application/PDF", "application/msword", "", "application/pdf "] {
            assert!(selector
                .select(FileCandidate::new("resume", declared))
                .is_err());
        }
    }

    #[test]
    fn test_valid_selection_clears_previous_error() {
        let mut selector = FileSelector::new();
        let _ = selector.select(FileCandidate::new("notes.md", "text/markdown"));
        assert!(selector.error().is_some());

        selector
            .select(FileCandidate::new("resume.pdf", PDF_MIME))
            .unwrap();
        assert!(selector.error().is_none());
        assert!(selector.selected().is_some());
    }

    #[test]
    fn test_candidate_type_comes_from_extension() {
        assert_eq!(FileCandidate::from_path("a/resume.pdf").declared_type, PDF_MIME);
        assert_eq!(FileCandidate::from_path("resume.docx").declared_type, DOCX_MIME);
        assert_eq!(FileCandidate::from_path("resume.txt").declared_type, "text/plain");
        assert_eq!(
            FileCandidate::from_path("resume").declared_type,
            "application/octet-stream"
        );
    }
}
