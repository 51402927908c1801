//! Error types for Pergament.
//!
//! All fallible operations in the library return [`Result`], built on
//! [`PergamentError`]. Error chains are preserved with `#[source]` attributes
//! so callers can walk back to the underlying cause.
//!
//! # Error Handling Philosophy
//!
//! **System errors bubble up unchanged:**
//! - `PergamentError::Io` (from `std::io::Error`) — file system errors,
//!   subprocess spawn failures, permission errors. These indicate real system
//!   problems and are never wrapped or suppressed.
//!
//! **Application errors are wrapped with context:**
//! - `Parsing` — structurally unreadable documents, corrupt streams
//! - `Ocr` — OCR engine failures
//! - `Validation` — invalid inputs or an extraction result that violates a
//!   construction invariant (e.g. a document with no text at all)
//!
//! Page-local and image-local failures inside the extraction pipeline are not
//! errors at this level: they are logged through `tracing` and recovered from
//! in place, so a degraded extraction still returns `Ok`.
use thiserror::Error;

/// Result type alias using `PergamentError`.
pub type Result<T> = std::result::Result<T, PergamentError>;

/// Main error type for all Pergament operations.
#[derive(Debug, Error)]
pub enum PergamentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parsing error: {message}")]
    Parsing {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("OCR error: {message}")]
    Ocr {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),
}

impl PergamentError {
    /// Create a Parsing error.
    pub fn parsing<S: Into<String>>(message: S) -> Self {
        Self::Parsing {
            message: message.into(),
            source: None,
        }
    }

    /// Create a Parsing error with source.
    pub fn parsing_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Parsing {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an Ocr error.
    pub fn ocr<S: Into<String>>(message: S) -> Self {
        Self::Ocr {
            message: message.into(),
            source: None,
        }
    }

    /// Create an Ocr error with source.
    pub fn ocr_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Ocr {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a Validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
            source: None,
        }
    }
}

impl From<crate::pdf::error::PdfError> for PergamentError {
    fn from(err: crate::pdf::error::PdfError) -> Self {
        PergamentError::Parsing {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<crate::ocr::OcrError> for PergamentError {
    fn from(err: crate::ocr::OcrError) -> Self {
        PergamentError::Ocr {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}
