//! Pergament - Document Extraction Pipeline
//!
//! Pergament ingests raw document bytes and produces structured extracted
//! content for downstream indexing: full text, bibliographic metadata,
//! reconstructed tables, and embedded figures.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pergament::{ExtractionConfig, ParserRegistry, PDF_MIME_TYPE};
//!
//! # async fn run() -> pergament::Result<()> {
//! let registry = ParserRegistry::with_default_parsers(ExtractionConfig::default());
//!
//! let bytes = std::fs::read("paper.pdf")?;
//! let document = registry.extract(PDF_MIME_TYPE, &bytes).await?;
//! println!("{} characters extracted", document.text.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Parser registry** (`registry`): content-type dispatch to registered
//!   parsers; last registration per content type wins
//! - **PDF pipeline** (`pdf`): per-page orchestration of text, tables, and
//!   figures over a structural reader
//! - **Fallback text extraction**: native structural text, then an external
//!   conversion tool, then OCR — cheapest first, stopping at the first stage
//!   with usable output
//! - **External collaborators** (`convert`, `ocr`): the layout conversion
//!   tool and the OCR engine run as subprocesses behind injectable seams
//!
//! Degraded extractions (failed pages, skipped images, fallback stages) are
//! reported through `tracing` while still returning a successful result;
//! only an unreadable document, an unsupported content type, or a fully
//! empty extraction fail the call.

#![deny(unsafe_code)]

pub mod config;
pub mod convert;
pub mod error;
pub mod mime;
pub mod ocr;
pub mod pdf;
pub mod registry;
pub mod types;

pub use config::ExtractionConfig;
pub use convert::LayoutTool;
pub use error::{PergamentError, Result};
pub use mime::{detect_content_type, PDF_MIME_TYPE};
pub use ocr::{OcrEngine, TesseractCli, DEFAULT_OCR_LANGUAGE};
pub use pdf::PdfParser;
pub use registry::{Parser, ParserRegistry};
pub use types::{Citation, ExtractedDocument, Figure, Metadata, Table};
