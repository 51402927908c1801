//! Parser registration and content-type dispatch.
//!
//! A [`ParserRegistry`] maps content-type strings to [`Parser`]
//! implementations. Registries are built during startup and treated as
//! immutable afterwards; pass them by reference (or behind an `Arc`) into
//! whatever owns the extraction entry point rather than keeping a global.

use crate::config::ExtractionConfig;
use crate::types::ExtractedDocument;
use crate::Result;
use crate::{pdf::PdfParser, PergamentError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// A document parser for one or more content types.
///
/// # Thread Safety
///
/// Parsers must be `Send + Sync`; one instance serves concurrent extraction
/// calls and must not keep per-call state.
#[async_trait]
pub trait Parser: Send + Sync {
    /// Content types this parser handles, as exact MIME strings.
    fn supported_content_types(&self) -> &[&str];

    /// Parse raw document bytes into an extracted document.
    async fn parse(&self, data: &[u8]) -> Result<ExtractedDocument>;
}

impl std::fmt::Debug for dyn Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Parser")
    }
}

/// Registry of parsers keyed by content type.
#[derive(Default)]
pub struct ParserRegistry {
    parsers: HashMap<String, Arc<dyn Parser>>,
}

impl ParserRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in parsers registered.
    ///
    /// Currently that is the PDF parser; other formats register their own
    /// parsers on top.
    pub fn with_default_parsers(config: ExtractionConfig) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PdfParser::new(config)));
        registry
    }

    /// Register a parser for every content type it declares.
    ///
    /// Later registrations for the same content type overwrite earlier ones,
    /// so composition (or a test) can override a built-in parser by
    /// registering after it.
    pub fn register(&mut self, parser: Arc<dyn Parser>) {
        for content_type in parser.supported_content_types() {
            let previous = self
                .parsers
                .insert((*content_type).to_string(), Arc::clone(&parser));
            if previous.is_some() {
                debug!(content_type, "replacing previously registered parser");
            }
        }
    }

    /// Look up the parser registered for `content_type`.
    ///
    /// Matching is exact; there is no wildcard or prefix fallback.
    pub fn lookup(&self, content_type: &str) -> Result<Arc<dyn Parser>> {
        self.parsers
            .get(content_type)
            .cloned()
            .ok_or_else(|| PergamentError::UnsupportedContentType(content_type.to_string()))
    }

    /// Look up and parse in one call. Parser errors propagate unchanged.
    pub async fn extract(&self, content_type: &str, data: &[u8]) -> Result<ExtractedDocument> {
        let parser = self.lookup(content_type)?;
        parser.parse(data).await
    }

    /// Convenience wrapper returning only the extracted text.
    pub async fn extract_text(&self, content_type: &str, data: &[u8]) -> Result<String> {
        Ok(self.extract(content_type, data).await?.text)
    }

    /// All content types with a registered parser, in no particular order.
    pub fn supported_content_types(&self) -> Vec<String> {
        self.parsers.keys().cloned().collect()
    }
}
