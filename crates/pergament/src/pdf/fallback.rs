//! Per-page fallback text extraction.
//!
//! Text for a page comes from a linear chain of stages, ordered cheapest
//! first: native structural extraction, then the external conversion tool,
//! then OCR over the page's embedded images. The first stage producing more
//! than [`MIN_USEFUL_TEXT_CHARS`] characters wins and no later stage runs.
//! Stage errors are soft — logged and answered by advancing the chain —
//! except in the terminal OCR stage, whose errors surface as the page's
//! failure.

use crate::config::ExtractionConfig;
use crate::convert::{LayoutTool, TempFile};
use crate::error::{PergamentError, Result};
use crate::ocr::{OcrEngine, DEFAULT_OCR_LANGUAGE};
use crate::pdf::layout::{self, DocumentLayout};
use crate::pdf::reader::PdfReader;
use image::ImageFormat;
use tracing::{debug, warn};

/// Minimum number of characters a stage must produce to be useful.
const MIN_USEFUL_TEXT_CHARS: usize = 10;

/// Which stage of the fallback chain produced a page's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stage {
    Native,
    Tool,
    Ocr,
}

impl Stage {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Stage::Native => "native",
            Stage::Tool => "tool",
            Stage::Ocr => "ocr",
        }
    }
}

/// Accepted text for one page, tagged with the stage that produced it.
#[derive(Debug)]
pub(crate) struct PageText {
    pub text: String,
    pub stage: Stage,
}

/// Lazily computed, per-document cache of the conversion tool's output.
///
/// The tool converts the whole document at once, so the first page that needs
/// it pays for the subprocess and every later consumer (tool stage, table
/// reconstruction) reuses the parsed result. A conversion failure is memoized
/// the same way and warned about once.
pub(crate) struct LayoutCache<'a> {
    tool: &'a LayoutTool,
    data: &'a [u8],
    state: CacheState,
}

enum CacheState {
    Pending,
    Ready(DocumentLayout),
    Failed,
}

impl<'a> LayoutCache<'a> {
    pub(crate) fn new(tool: &'a LayoutTool, data: &'a [u8]) -> Self {
        Self {
            tool,
            data,
            state: CacheState::Pending,
        }
    }

    pub(crate) async fn get(&mut self) -> Option<&DocumentLayout> {
        if matches!(self.state, CacheState::Pending) {
            self.state = match self.convert().await {
                Ok(parsed) => CacheState::Ready(parsed),
                Err(e) => {
                    warn!(error = %e, "layout conversion failed");
                    CacheState::Failed
                }
            };
        }
        match &self.state {
            CacheState::Ready(parsed) => Some(parsed),
            _ => None,
        }
    }

    async fn convert(&self) -> Result<DocumentLayout> {
        let xml = self.tool.convert(self.data).await?;
        let parsed = layout::parse_layout(&xml)?;
        debug!(pages = parsed.page_count(), "layout conversion parsed");
        Ok(parsed)
    }
}

/// Run the fallback chain for one page.
pub(crate) async fn extract_page_text(
    reader: &PdfReader,
    page_no: u32,
    layout: &mut LayoutCache<'_>,
    ocr: &dyn OcrEngine,
    config: &ExtractionConfig,
) -> Result<PageText> {
    match reader.page_text(page_no) {
        Ok(text) if is_useful(&text) => {
            return Ok(PageText {
                text,
                stage: Stage::Native,
            });
        }
        Ok(_) => {
            debug!(page = page_no, stage = Stage::Native.name(), "no usable text, falling back");
        }
        Err(e) => {
            warn!(page = page_no, stage = Stage::Native.name(), error = %e, "stage failed, falling back");
        }
    }

    let tool_text = tool_attempt(layout, page_no).await;
    if is_useful(&tool_text) {
        return Ok(PageText {
            text: tool_text,
            stage: Stage::Tool,
        });
    }
    debug!(page = page_no, stage = Stage::Tool.name(), "no usable text, falling back");

    let text = ocr_attempt(reader, page_no, ocr, config).await?;
    Ok(PageText {
        text,
        stage: Stage::Ocr,
    })
}

/// Tool stage: this page's fragment text from the converted layout.
///
/// Conversion failures were already logged by the cache; here they simply
/// look like an empty page.
async fn tool_attempt(layout: &mut LayoutCache<'_>, page_no: u32) -> String {
    match layout.get().await {
        Some(document_layout) => document_layout
            .page(page_no)
            .map(layout::page_text)
            .unwrap_or_default(),
        None => String::new(),
    }
}

/// OCR stage: recognize every JPEG/PNG image embedded on the page.
///
/// Images in any other format (or that fail to decode) are skipped
/// individually. An OCR engine error is terminal for the page.
async fn ocr_attempt(
    reader: &PdfReader,
    page_no: u32,
    ocr: &dyn OcrEngine,
    config: &ExtractionConfig,
) -> Result<String> {
    let images = reader.page_images(page_no)?;
    if images.is_empty() {
        return Ok(String::new());
    }

    let language = resolve_language(ocr, &config.ocr_language).await;

    let mut text = String::new();
    for image in &images {
        let Some(format) = accepted_format(&image.data) else {
            warn!(
                page = page_no,
                xobject = %image.name,
                "embedded image is neither JPEG nor PNG, skipping"
            );
            continue;
        };
        if image::load_from_memory_with_format(&image.data, format).is_err() {
            warn!(
                page = page_no,
                xobject = %image.name,
                "embedded image failed to decode, skipping"
            );
            continue;
        }

        let temp = TempFile::create(&image.data, extension(format)).await?;
        let recognized = ocr
            .recognize_file(temp.path(), &language)
            .await
            .map_err(|e| {
                PergamentError::ocr_with_source(
                    format!("OCR failed for image {} on page {}", image.name, page_no),
                    e,
                )
            })?;
        text.push_str(&recognized);
        text.push('\n');
    }
    Ok(text)
}

/// Use the requested language when the engine has it installed, otherwise
/// fall back to the default.
async fn resolve_language(ocr: &dyn OcrEngine, requested: &str) -> String {
    match ocr.available_languages().await {
        Ok(languages) if languages.iter().any(|l| l == requested) => requested.to_string(),
        Ok(_) => {
            warn!(
                language = requested,
                fallback = DEFAULT_OCR_LANGUAGE,
                "requested OCR language not available"
            );
            DEFAULT_OCR_LANGUAGE.to_string()
        }
        Err(e) => {
            warn!(
                error = %e,
                fallback = DEFAULT_OCR_LANGUAGE,
                "listing OCR languages failed"
            );
            DEFAULT_OCR_LANGUAGE.to_string()
        }
    }
}

fn accepted_format(data: &[u8]) -> Option<ImageFormat> {
    match image::guess_format(data) {
        Ok(ImageFormat::Jpeg) => Some(ImageFormat::Jpeg),
        Ok(ImageFormat::Png) => Some(ImageFormat::Png),
        _ => None,
    }
}

fn extension(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Jpeg => "jpg",
        _ => "png",
    }
}

fn is_useful(text: &str) -> bool {
    text.chars().count() > MIN_USEFUL_TEXT_CHARS
}
