//! Content-type constants and byte-level detection.
//!
//! The parser registry dispatches on exact content-type strings. Callers that
//! only hold raw bytes can use [`detect_content_type`] to produce the dispatch
//! key.

/// MIME type for PDF documents.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Detect a content type from leading magic bytes.
///
/// Returns `None` when the bytes match no known signature; detection is a
/// convenience, not a gate — callers with a trusted content type should pass
/// it through unchanged.
pub fn detect_content_type(data: &[u8]) -> Option<&'static str> {
    infer::get(data).map(|kind| kind.mime_type())
}
