//! PDF extraction pipeline.
//!
//! Orchestrates per-page extraction over a structural reader: the fallback
//! text chain, layout-based table reconstruction, and figure extraction, then
//! assembles the final document. Reader construction is the only fatal step —
//! metadata and per-page operations are individually fault-isolated, so one
//! bad page (or one bad concern on a page) never aborts the rest.

pub mod error;

mod fallback;
mod figures;
mod layout;
mod metadata;
mod reader;
#[cfg(test)]
mod testutil;

use crate::config::ExtractionConfig;
use crate::convert::LayoutTool;
use crate::mime::PDF_MIME_TYPE;
use crate::ocr::{OcrEngine, TesseractCli};
use crate::registry::Parser;
use crate::types::{ExtractedDocument, Metadata};
use crate::Result;
use async_trait::async_trait;
use self::fallback::{LayoutCache, Stage};
use self::reader::PdfReader;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Parser for `application/pdf` documents.
pub struct PdfParser {
    config: ExtractionConfig,
    tool: LayoutTool,
    ocr: Arc<dyn OcrEngine>,
}

impl PdfParser {
    /// Create a parser with the default Tesseract CLI OCR engine.
    pub fn new(config: ExtractionConfig) -> Self {
        let ocr = Arc::new(TesseractCli::from_config(&config));
        Self::with_ocr_engine(config, ocr)
    }

    /// Create a parser with a custom OCR engine.
    pub fn with_ocr_engine(config: ExtractionConfig, ocr: Arc<dyn OcrEngine>) -> Self {
        let tool = LayoutTool::from_config(&config);
        Self { config, tool, ocr }
    }

    /// Extract text, metadata, tables, and figures from PDF bytes.
    pub async fn parse_document(&self, data: &[u8]) -> Result<ExtractedDocument> {
        let reader = PdfReader::open(data)?;
        debug!(pages = reader.page_count(), "opened PDF document");

        let mut document_metadata = match metadata::extract_metadata(&reader) {
            Ok(extracted) => extracted,
            Err(e) => {
                warn!(error = %e, "metadata extraction failed, continuing with empty metadata");
                Metadata::default()
            }
        };

        let mut layout = LayoutCache::new(&self.tool, data);
        let mut text = String::new();
        let mut degraded_pages = 0usize;

        for page_no in reader.pages() {
            match fallback::extract_page_text(
                &reader,
                page_no,
                &mut layout,
                self.ocr.as_ref(),
                &self.config,
            )
            .await
            {
                Ok(page) => {
                    if page.stage != Stage::Native {
                        degraded_pages += 1;
                    }
                    debug!(
                        page = page_no,
                        stage = page.stage.name(),
                        chars = page.text.chars().count(),
                        "page text extracted"
                    );
                    text.push_str(&page.text);
                }
                Err(e) => {
                    degraded_pages += 1;
                    warn!(page = page_no, error = %e, "text extraction failed for page");
                }
            }

            if let Some(document_layout) = layout.get().await {
                if let Some(table) = document_layout
                    .page(page_no)
                    .and_then(layout::reconstruct_table)
                {
                    document_metadata.tables.push(table);
                }
            }

            match figures::extract_figures(&reader, page_no) {
                Ok(figures) => document_metadata.figures.extend(figures),
                Err(e) => {
                    warn!(page = page_no, error = %e, "figure extraction failed for page");
                }
            }
        }

        if degraded_pages > 0 {
            info!(
                degraded_pages,
                total_pages = reader.page_count(),
                "document extracted with fallback or failed pages"
            );
        }

        ExtractedDocument::new(text, document_metadata, None)
    }
}

#[async_trait]
impl Parser for PdfParser {
    fn supported_content_types(&self) -> &[&str] {
        &[PDF_MIME_TYPE]
    }

    async fn parse(&self, data: &[u8]) -> Result<ExtractedDocument> {
        self.parse_document(data).await
    }
}
