//! Core data types produced by the extraction pipeline.

use crate::{PergamentError, Result};
use serde::{Deserialize, Serialize};

/// Maximum length of a single keyword accepted by [`Metadata::validate`].
const MAX_KEYWORD_LENGTH: usize = 50;

/// Fully extracted document content, ready for downstream indexing.
///
/// Produced exactly once per successful pipeline run. Construction enforces
/// that the extracted text is non-empty; a document where every page failed to
/// yield text is a validation error, not an empty success.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractedDocument {
    pub text: String,
    pub metadata: Metadata,
    /// Dense vector representation, filled in by a downstream embedding step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embeddings: Option<Vec<f32>>,
}

impl ExtractedDocument {
    /// Create a new document from extracted text and metadata.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error if `text` is empty.
    pub fn new(text: String, metadata: Metadata, embeddings: Option<Vec<f32>>) -> Result<Self> {
        if text.is_empty() {
            return Err(PergamentError::validation("document text cannot be empty"));
        }
        Ok(Self {
            text,
            metadata,
            embeddings,
        })
    }

    /// Replace text and metadata, re-checking the non-empty-text invariant.
    pub fn update(&mut self, text: String, metadata: Metadata) -> Result<()> {
        if text.is_empty() {
            return Err(PergamentError::validation("document text cannot be empty"));
        }
        self.text = text;
        self.metadata = metadata;
        Ok(())
    }
}

/// Bibliographic metadata plus structured content extracted from a document.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,

    #[serde(default, rename = "abstract", skip_serializing_if = "String::is_empty")]
    pub abstract_text: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub citations: Vec<Citation>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<Table>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub figures: Vec<Figure>,
}

impl Metadata {
    /// Append a citation after validating it.
    pub fn add_citation(&mut self, citation: Citation) -> Result<()> {
        citation.validate()?;
        self.citations.push(citation);
        Ok(())
    }

    /// Remove the citation at `index`.
    ///
    /// An out-of-range index is a hard error, not a no-op.
    pub fn remove_citation(&mut self, index: usize) -> Result<()> {
        if index >= self.citations.len() {
            return Err(PergamentError::validation(format!(
                "citation index {} out of range (have {})",
                index,
                self.citations.len()
            )));
        }
        self.citations.remove(index);
        Ok(())
    }

    /// Validate bibliographic fields for downstream persistence.
    ///
    /// The pipeline itself does not call this: extraction has value even with
    /// incomplete metadata. Callers that persist documents run it before
    /// accepting user- or document-supplied fields.
    pub fn validate(&self) -> Result<()> {
        if self.title.is_empty() {
            return Err(PergamentError::validation("title cannot be empty"));
        }
        if self.authors.is_empty() {
            return Err(PergamentError::validation("authors cannot be empty"));
        }
        for keyword in &self.keywords {
            if keyword.chars().count() > MAX_KEYWORD_LENGTH {
                return Err(PergamentError::validation(format!(
                    "keyword '{}' is too long",
                    keyword
                )));
            }
            if !is_valid_keyword(keyword) {
                return Err(PergamentError::validation(format!(
                    "keyword '{}' contains invalid characters",
                    keyword
                )));
            }
        }
        Ok(())
    }
}

fn is_valid_keyword(keyword: &str) -> bool {
    keyword
        .chars()
        .all(|c| c.is_alphanumeric() || c.is_whitespace())
}

/// A bibliographic citation.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Citation {
    pub text: String,
    pub author: String,
    pub year: i32,
    pub title: String,
}

impl Citation {
    fn validate(&self) -> Result<()> {
        if self.text.is_empty() {
            return Err(PergamentError::validation("citation text cannot be empty"));
        }
        if self.author.is_empty() {
            return Err(PergamentError::validation("citation author cannot be empty"));
        }
        if self.year < 0 {
            return Err(PergamentError::validation("citation year must not be negative"));
        }
        if self.title.is_empty() {
            return Err(PergamentError::validation("citation title cannot be empty"));
        }
        Ok(())
    }
}

/// A table reconstructed from page layout.
///
/// Rows are vertical clusters of text fragments, not true grid cells; column
/// boundaries are not detected.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// A table with no rows carries no information and is discarded before it
    /// reaches [`Metadata`].
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// An embedded raster image pulled off a page.
///
/// The payload is opaque: these are bytes that originated from an embedded
/// image object, with no decoding guarantee beyond that.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Figure {
    pub image_bytes: Vec<u8>,
}
