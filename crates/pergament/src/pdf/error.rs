use thiserror::Error;

/// PDF-layer errors.
///
/// These stay local to the PDF module; at the crate boundary they are wrapped
/// into `PergamentError::Parsing` with the chain preserved.
#[derive(Debug, Clone, Error)]
pub enum PdfError {
    #[error("invalid PDF: {0}")]
    InvalidPdf(String),

    #[error("PDF is encrypted")]
    Encrypted,

    #[error("text extraction failed: {0}")]
    TextExtractionFailed(String),

    #[error("metadata extraction failed: {0}")]
    MetadataExtractionFailed(String),

    #[error("image enumeration failed on page {page}: {message}")]
    ImageEnumerationFailed { page: u32, message: String },

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<lopdf::Error> for PdfError {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(io_err) => PdfError::Io(io_err.to_string()),
            _ => PdfError::InvalidPdf(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, PdfError>;
