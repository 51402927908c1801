//! Structural PDF reader.
//!
//! Thin wrapper over `lopdf` exposing exactly what the pipeline needs: page
//! enumeration in page-number order, per-page structural text, embedded image
//! payloads, and the document info dictionary.

use super::error::{PdfError, Result};
use lopdf::{Dictionary, Document, Object, Stream};
use tracing::warn;

/// An embedded image payload read off a page.
///
/// For DCTDecode streams the payload is the complete JPEG body; for other
/// streams it is the decoded stream content, with no further format guarantee.
pub(crate) struct EmbeddedImage {
    pub name: String,
    pub data: Vec<u8>,
}

/// Raw text strings from the document info dictionary.
pub(crate) struct InfoStrings {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub author: Option<String>,
    pub keywords: Option<String>,
}

pub(crate) struct PdfReader {
    doc: Document,
}

impl PdfReader {
    /// Open a structural reader over raw PDF bytes.
    pub fn open(data: &[u8]) -> Result<Self> {
        let doc = Document::load_mem(data)?;
        if doc.trailer.get(b"Encrypt").is_ok() {
            return Err(PdfError::Encrypted);
        }
        Ok(Self { doc })
    }

    /// Page numbers in ascending order, starting at 1.
    pub fn pages(&self) -> Vec<u32> {
        self.doc.get_pages().keys().copied().collect()
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Extract text from the page's content streams.
    pub fn page_text(&self, page_no: u32) -> Result<String> {
        self.doc
            .extract_text(&[page_no])
            .map_err(|e| PdfError::TextExtractionFailed(format!("page {}: {}", page_no, e)))
    }

    /// Document info strings, or `None` when the document carries no info
    /// dictionary. A present-but-malformed info dictionary is an error.
    pub fn info_strings(&self) -> Result<Option<InfoStrings>> {
        let Ok(info_obj) = self.doc.trailer.get(b"Info") else {
            return Ok(None);
        };
        let info = self.resolve(info_obj).as_dict().map_err(|e| {
            PdfError::MetadataExtractionFailed(format!("info dictionary unreadable: {}", e))
        })?;

        Ok(Some(InfoStrings {
            title: self.text_entry(info, b"Title"),
            subject: self.text_entry(info, b"Subject"),
            author: self.text_entry(info, b"Author"),
            keywords: self.text_entry(info, b"Keywords"),
        }))
    }

    /// Embedded raster images on a page, in traversal order.
    ///
    /// A failure reading one image's bytes is logged and that image is
    /// skipped; a failure enumerating the page's XObjects is an error.
    pub fn page_images(&self, page_no: u32) -> Result<Vec<EmbeddedImage>> {
        let enumeration_error = |message: String| PdfError::ImageEnumerationFailed {
            page: page_no,
            message,
        };

        let pages = self.doc.get_pages();
        let page_id = *pages
            .get(&page_no)
            .ok_or_else(|| enumeration_error("page not found".to_string()))?;
        let page = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| enumeration_error(e.to_string()))?;

        let Ok(resources_obj) = page.get(b"Resources") else {
            return Ok(Vec::new());
        };
        let resources = self
            .resolve(resources_obj)
            .as_dict()
            .map_err(|e| enumeration_error(format!("resources: {}", e)))?;

        let Ok(xobjects_obj) = resources.get(b"XObject") else {
            return Ok(Vec::new());
        };
        let xobjects = self
            .resolve(xobjects_obj)
            .as_dict()
            .map_err(|e| enumeration_error(format!("xobjects: {}", e)))?;

        let mut images = Vec::new();
        for (raw_name, entry) in xobjects.iter() {
            let name = String::from_utf8_lossy(raw_name).into_owned();
            let stream = self
                .resolve(entry)
                .as_stream()
                .map_err(|e| enumeration_error(format!("xobject {}: {}", name, e)))?;
            if !is_image_stream(&stream.dict) {
                continue;
            }
            match image_payload(stream) {
                Ok(data) => images.push(EmbeddedImage { name, data }),
                Err(e) => {
                    warn!(
                        page = page_no,
                        xobject = %name,
                        error = %e,
                        "failed to read embedded image bytes, skipping"
                    );
                }
            }
        }
        Ok(images)
    }

    fn text_entry(&self, dict: &Dictionary, key: &[u8]) -> Option<String> {
        match self.resolve(dict.get(key).ok()?) {
            Object::String(bytes, _) => {
                let text = decode_text_string(bytes);
                (!text.is_empty()).then_some(text)
            }
            _ => None,
        }
    }

    fn resolve<'a>(&'a self, object: &'a Object) -> &'a Object {
        match object {
            Object::Reference(id) => self.doc.get_object(*id).unwrap_or(object),
            _ => object,
        }
    }
}

fn is_image_stream(dict: &Dictionary) -> bool {
    matches!(dict.get(b"Subtype"), Ok(Object::Name(name)) if name.as_slice() == b"Image")
}

fn stream_filters(dict: &Dictionary) -> Vec<Vec<u8>> {
    match dict.get(b"Filter") {
        Ok(Object::Name(name)) => vec![name.clone()],
        Ok(Object::Array(filters)) => filters
            .iter()
            .filter_map(|entry| match entry {
                Object::Name(name) => Some(name.clone()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn image_payload(stream: &Stream) -> std::result::Result<Vec<u8>, lopdf::Error> {
    let filters = stream_filters(&stream.dict);
    if filters.is_empty() || filters.iter().any(|f| f.as_slice() == b"DCTDecode") {
        return Ok(stream.content.clone());
    }
    stream.decompressed_content()
}

/// Decode a PDF text string: UTF-16BE when it carries a BOM, byte text
/// otherwise.
fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(body) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = body
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    }
}
