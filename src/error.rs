//! Error types for the pdfa11y library.

use std::io;
use thiserror::Error;

/// Result type alias for pdfa11y operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors that abort processing of a document.
///
/// Recoverable failures (a block that fails to classify, an image whose
/// OCR and captioning both fail) never surface here; they are recorded as
/// [`Warning`] diagnostics on the analysis result instead.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The primitive stream is not well formed (e.g. a span assigned to
    /// the wrong page). The document is rejected as a whole.
    #[error("Invalid primitive stream: {0}")]
    InvalidInput(String),

    /// An internal invariant was violated during scoring. This signals a
    /// defect in the analysis pipeline, not bad input.
    #[error("Scoring inconsistency: {0}")]
    ScoringInconsistency(String),

    /// Error serializing or deserializing JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error during rendering (HTML, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

/// A recovered, non-fatal diagnostic produced during analysis.
///
/// Warnings are tool-health signals: they describe where the pipeline had
/// to degrade or fall back. They are distinct from accessibility
/// [`Issue`](crate::report::Issue)s, which describe the document itself.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Warning {
    /// Category of the recovered failure
    pub kind: WarningKind,

    /// Human-readable description
    pub message: String,

    /// Page the failure occurred on, if page-scoped
    pub page: Option<usize>,
}

impl Warning {
    /// Create a new warning.
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            page: None,
        }
    }

    /// Attach the page index the warning originated from.
    pub fn on_page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }
}

/// Categories of recovered failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// A block or page could not be classified and was skipped.
    ExtractionDegraded,

    /// OCR and captioning both failed for an image; fallback text was used.
    ImageResolutionFailure,

    /// An image task exceeded its deadline; fallback text was used.
    ImageTimeout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("span on page 3 claims page 7".into());
        assert_eq!(
            err.to_string(),
            "Invalid primitive stream: span on page 3 claims page 7"
        );

        let err = Error::ScoringInconsistency("heading level 9".into());
        assert!(err.to_string().contains("heading level 9"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_warning_on_page() {
        let warning = Warning::new(WarningKind::ImageTimeout, "image 2 timed out").on_page(4);
        assert_eq!(warning.page, Some(4));
        assert_eq!(warning.kind, WarningKind::ImageTimeout);
    }
}
