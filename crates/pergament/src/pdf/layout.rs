//! Positioned-text layout parsing and table reconstruction.
//!
//! The external conversion tool emits a pdfminer-style XML stream:
//! `<pages><page><textbox bbox="x0,y0,x1,y1">…</textbox></page></pages>`.
//! Each textbox becomes one positioned fragment. Table reconstruction clusters
//! a page's fragments into rows by vertical proximity; it does not detect
//! column boundaries, so rows are clustered text, not true cell grids.

use crate::error::{PergamentError, Result};
use crate::types::Table;

/// Vertical distance beyond which two fragments belong to different rows.
const ROW_BREAK_THRESHOLD: f32 = 15.0;

/// Previous-baseline sentinel, far outside any real page coordinate.
const BASELINE_SENTINEL: f32 = -1000.0;

/// A text fragment with its layout origin, as emitted by the conversion tool.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TextFragment {
    pub text: String,
    #[allow(dead_code)]
    pub x0: f32,
    pub y0: f32,
}

/// All fragments of one page, in emission order.
#[derive(Debug, Clone, Default)]
pub(crate) struct PageLayout {
    pub fragments: Vec<TextFragment>,
}

/// Parsed layout of a whole document.
#[derive(Debug, Clone, Default)]
pub(crate) struct DocumentLayout {
    pages: Vec<PageLayout>,
}

impl DocumentLayout {
    /// Layout of page `page_no` (1-based), if the stream contained it.
    pub fn page(&self, page_no: u32) -> Option<&PageLayout> {
        if page_no == 0 {
            return None;
        }
        self.pages.get(page_no as usize - 1)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Parse the conversion tool's XML stream into per-page fragment lists.
///
/// Textboxes without a parseable `bbox` attribute or without any text are
/// dropped; pages without textboxes yield an empty layout.
pub(crate) fn parse_layout(xml: &str) -> Result<DocumentLayout> {
    let document = roxmltree::Document::parse(xml)
        .map_err(|e| PergamentError::parsing_with_source("layout XML is not well-formed", e))?;

    let mut pages = Vec::new();
    for page_node in document
        .root()
        .descendants()
        .filter(|node| node.has_tag_name("page"))
    {
        let mut fragments = Vec::new();
        for textbox in page_node
            .descendants()
            .filter(|node| node.has_tag_name("textbox"))
        {
            let Some((x0, y0)) = textbox.attribute("bbox").and_then(parse_bbox_origin) else {
                continue;
            };
            let text = collect_text(&textbox);
            if text.is_empty() {
                continue;
            }
            fragments.push(TextFragment { text, x0, y0 });
        }
        pages.push(PageLayout { fragments });
    }
    Ok(DocumentLayout { pages })
}

/// Join a page's fragment texts into plain text for the tool fallback stage.
pub(crate) fn page_text(page: &PageLayout) -> String {
    page.fragments
        .iter()
        .map(|fragment| fragment.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Cluster a page's fragments into rows by vertical gap.
///
/// Walks fragments in emission order against a previous-baseline `y0`; a jump
/// larger than the row-break threshold closes the current row. A page yields
/// at most one table; a page without fragments yields none.
pub(crate) fn reconstruct_table(page: &PageLayout) -> Option<Table> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut current_row: Vec<String> = Vec::new();
    let mut previous_y = BASELINE_SENTINEL;

    for fragment in &page.fragments {
        if (fragment.y0 - previous_y).abs() > ROW_BREAK_THRESHOLD && !current_row.is_empty() {
            rows.push(std::mem::take(&mut current_row));
        }
        current_row.push(fragment.text.clone());
        previous_y = fragment.y0;
    }
    if !current_row.is_empty() {
        rows.push(current_row);
    }

    if rows.is_empty() {
        None
    } else {
        Some(Table { rows })
    }
}

fn parse_bbox_origin(bbox: &str) -> Option<(f32, f32)> {
    let mut parts = bbox.split(',');
    let x0 = parts.next()?.trim().parse().ok()?;
    let y0 = parts.next()?.trim().parse().ok()?;
    Some((x0, y0))
}

fn collect_text(node: &roxmltree::Node<'_, '_>) -> String {
    let raw: String = node
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(text: &str, y0: f32) -> TextFragment {
        TextFragment {
            text: text.to_string(),
            x0: 0.0,
            y0,
        }
    }

    #[test]
    fn test_parse_layout_pdfminer_stream() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<pages>
  <page id="1" bbox="0,0,595,842">
    <textbox id="0" bbox="56.8,724.1,290.9,741.9">
      <textline bbox="56.8,724.1,290.9,741.9">
        <text>Q</text><text>1</text><text> </text><text>R</text><text>e</text><text>v</text>
      </textline>
    </textbox>
    <textbox id="1" bbox="320.0,724.5,380.0,741.9">
      <textline><text>4</text><text>2</text></textline>
    </textbox>
  </page>
  <page id="2" bbox="0,0,595,842">
  </page>
</pages>"#;

        let layout = parse_layout(xml).unwrap();
        assert_eq!(layout.page_count(), 2);

        let page_one = layout.page(1).unwrap();
        assert_eq!(page_one.fragments.len(), 2);
        assert_eq!(page_one.fragments[0].text, "Q1 Rev");
        assert!((page_one.fragments[0].y0 - 724.1).abs() < 0.01);
        assert!((page_one.fragments[0].x0 - 56.8).abs() < 0.01);
        assert_eq!(page_one.fragments[1].text, "42");

        assert!(layout.page(2).unwrap().fragments.is_empty());
        assert!(layout.page(3).is_none());
        assert!(layout.page(0).is_none());
    }

    #[test]
    fn test_parse_layout_rejects_malformed_xml() {
        assert!(parse_layout("<pages><page>").is_err());
    }

    #[test]
    fn test_parse_layout_skips_boxes_without_bbox() {
        let xml = r#"<pages><page>
            <textbox><text>orphan</text></textbox>
            <textbox bbox="not,numbers"><text>bad</text></textbox>
            <textbox bbox="10.0,20.0,100.0,35.0"><text>kept</text></textbox>
        </page></pages>"#;
        let layout = parse_layout(xml).unwrap();
        let page = layout.page(1).unwrap();
        assert_eq!(page.fragments.len(), 1);
        assert_eq!(page.fragments[0].text, "kept");
    }

    #[test]
    fn test_page_text_joins_fragments() {
        let page = PageLayout {
            fragments: vec![fragment("first line", 700.0), fragment("second line", 680.0)],
        };
        assert_eq!(page_text(&page), "first line\nsecond line");
        assert_eq!(page_text(&PageLayout::default()), "");
    }

    #[test]
    fn test_reconstruct_rows_split_on_vertical_gap() {
        let page = PageLayout {
            fragments: vec![
                fragment("a", 100.0),
                fragment("b", 102.0),
                fragment("c", 140.0),
                fragment("d", 141.0),
            ],
        };
        let table = reconstruct_table(&page).unwrap();
        assert_eq!(
            table.rows,
            vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["c".to_string(), "d".to_string()],
            ]
        );
    }

    #[test]
    fn test_reconstruct_single_row_within_threshold() {
        let page = PageLayout {
            fragments: vec![
                fragment("a", 100.0),
                fragment("b", 110.0),
                fragment("c", 98.0),
            ],
        };
        let table = reconstruct_table(&page).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0], vec!["a", "b", "c"]);
    }

    #[test]
    fn test_reconstruct_empty_page_yields_no_table() {
        assert!(reconstruct_table(&PageLayout::default()).is_none());
    }

    #[test]
    fn test_reconstruct_every_row_has_a_cell() {
        let page = PageLayout {
            fragments: vec![
                fragment("only", 500.0),
                fragment("cells", 400.0),
                fragment("here", 300.0),
            ],
        };
        let table = reconstruct_table(&page).unwrap();
        assert_eq!(table.rows.len(), 3);
        assert!(table.rows.iter().all(|row| !row.is_empty()));
    }
}
