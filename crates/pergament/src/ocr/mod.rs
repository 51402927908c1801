//! OCR engine abstraction.
//!
//! The pipeline talks to OCR through the [`OcrEngine`] trait so the engine can
//! be swapped (or mocked) without touching extraction logic. The default
//! implementation, [`TesseractCli`], shells out to the `tesseract` executable.

mod tesseract;

pub use tesseract::TesseractCli;

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Language used when the requested OCR language is not installed.
pub const DEFAULT_OCR_LANGUAGE: &str = "eng";

pub type OcrResult<T> = std::result::Result<T, OcrError>;

/// Errors surfaced by OCR engines.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR engine unavailable: {0}")]
    EngineUnavailable(String),

    #[error("recognition failed: {0}")]
    RecognitionFailed(String),

    #[error("OCR timed out after {0} seconds")]
    Timeout(u64),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// An OCR engine that recognizes text in image files.
///
/// # Thread Safety
///
/// Engines must be `Send + Sync`. Language selection is passed per call, so a
/// single engine instance may serve concurrent extractions.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Languages the engine has models installed for.
    async fn available_languages(&self) -> OcrResult<Vec<String>>;

    /// Recognize text in the image at `path` using `language`.
    async fn recognize_file(&self, path: &Path, language: &str) -> OcrResult<String>;
}
