//! Figure extraction.
//!
//! Every embedded image whose bytes could be read becomes a [`Figure`], in
//! page traversal order. Per-image read failures are logged and skipped by
//! the reader; only a page-level enumeration failure surfaces here.

use super::error::Result;
use super::reader::PdfReader;
use crate::types::Figure;

pub(crate) fn extract_figures(reader: &PdfReader, page_no: u32) -> Result<Vec<Figure>> {
    let images = reader.page_images(page_no)?;
    Ok(images
        .into_iter()
        .map(|image| Figure {
            image_bytes: image.data,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::super::testutil::{build_pdf, tiny_jpeg, tiny_png, ImageFixture, PageFixture};
    use super::*;

    #[test]
    fn test_figures_in_page_order() {
        let jpeg = tiny_jpeg();
        let png = tiny_png();
        let data = build_pdf(
            &[PageFixture::with_text("body")
                .image(ImageFixture::jpeg(jpeg.clone()))
                .image(ImageFixture::png(png.clone()))],
            None,
        );
        let reader = PdfReader::open(&data).unwrap();

        let figures = extract_figures(&reader, 1).unwrap();
        assert_eq!(figures.len(), 2);
        assert_eq!(figures[0].image_bytes, jpeg);
        assert_eq!(figures[1].image_bytes, png);
    }

    #[test]
    fn test_unreadable_image_does_not_abort_others() {
        let data = build_pdf(
            &[PageFixture::with_text("body")
                .image(ImageFixture::broken_flate())
                .image(ImageFixture::jpeg(tiny_jpeg()))],
            None,
        );
        let reader = PdfReader::open(&data).unwrap();

        let figures = extract_figures(&reader, 1).unwrap();
        assert_eq!(figures.len(), 1);
    }

    #[test]
    fn test_page_without_images_yields_no_figures() {
        let data = build_pdf(&[PageFixture::with_text("body")], None);
        let reader = PdfReader::open(&data).unwrap();
        assert!(extract_figures(&reader, 1).unwrap().is_empty());
    }
}
