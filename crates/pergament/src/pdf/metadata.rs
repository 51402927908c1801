//! Document-level metadata from the PDF info dictionary.

use super::error::Result;
use super::reader::PdfReader;
use crate::types::Metadata;
use tracing::debug;

/// Map the info dictionary onto bibliographic metadata.
///
/// Title maps to title, Subject to the abstract; Author and Keywords are
/// split into lists on commas and semicolons. A document without an info
/// dictionary yields empty metadata.
pub(crate) fn extract_metadata(reader: &PdfReader) -> Result<Metadata> {
    let Some(info) = reader.info_strings()? else {
        debug!("document carries no info dictionary");
        return Ok(Metadata::default());
    };

    Ok(Metadata {
        title: info.title.unwrap_or_default(),
        abstract_text: info.subject.unwrap_or_default(),
        authors: info.author.as_deref().map(split_name_list).unwrap_or_default(),
        keywords: info.keywords.as_deref().map(split_name_list).unwrap_or_default(),
        ..Default::default()
    })
}

fn split_name_list(value: &str) -> Vec<String> {
    value
        .split([',', ';'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::testutil::{build_pdf, InfoFixture, PageFixture};
    use super::*;

    #[test]
    fn test_extract_metadata_maps_info_fields() {
        let data = build_pdf(
            &[PageFixture::with_text("body")],
            Some(&InfoFixture {
                title: "On Tables",
                author: "Ada Lovelace, Charles Babbage",
                subject: "A short abstract.",
                keywords: "layout; tables; pdf",
            }),
        );
        let reader = PdfReader::open(&data).unwrap();

        let metadata = extract_metadata(&reader).unwrap();
        assert_eq!(metadata.title, "On Tables");
        assert_eq!(metadata.abstract_text, "A short abstract.");
        assert_eq!(metadata.authors, vec!["Ada Lovelace", "Charles Babbage"]);
        assert_eq!(metadata.keywords, vec!["layout", "tables", "pdf"]);
        assert!(metadata.tables.is_empty());
        assert!(metadata.figures.is_empty());
    }

    #[test]
    fn test_extract_metadata_without_info() {
        let data = build_pdf(&[PageFixture::with_text("body")], None);
        let reader = PdfReader::open(&data).unwrap();
        assert_eq!(extract_metadata(&reader).unwrap(), Metadata::default());
    }

    #[test]
    fn test_split_name_list() {
        assert_eq!(split_name_list("a, b; c"), vec!["a", "b", "c"]);
        assert_eq!(split_name_list("  solo  "), vec!["solo"]);
        assert!(split_name_list(" ;, ").is_empty());
    }
}
