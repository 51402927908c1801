//! Synthetic PDF fixtures for tests.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};

pub(crate) struct PageFixture {
    text: Option<String>,
    images: Vec<ImageFixture>,
}

impl PageFixture {
    pub(crate) fn empty() -> Self {
        Self {
            text: None,
            images: Vec::new(),
        }
    }

    pub(crate) fn with_text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            images: Vec::new(),
        }
    }

    pub(crate) fn image(mut self, image: ImageFixture) -> Self {
        self.images.push(image);
        self
    }
}

pub(crate) struct ImageFixture {
    data: Vec<u8>,
    filter: Option<&'static str>,
}

impl ImageFixture {
    /// A DCTDecode XObject whose raw content is a complete JPEG payload.
    pub(crate) fn jpeg(data: Vec<u8>) -> Self {
        Self {
            data,
            filter: Some("DCTDecode"),
        }
    }

    /// An unfiltered XObject whose raw content is a complete PNG payload.
    pub(crate) fn png(data: Vec<u8>) -> Self {
        Self { data, filter: None }
    }

    /// An unfiltered XObject carrying raw (non-JPEG, non-PNG) bytes.
    pub(crate) fn raw(data: Vec<u8>) -> Self {
        Self { data, filter: None }
    }

    /// A FlateDecode XObject whose content is not valid zlib data, so reading
    /// its bytes fails.
    pub(crate) fn broken_flate() -> Self {
        Self {
            data: vec![0xDE, 0xAD, 0xBE, 0xEF],
            filter: Some("FlateDecode"),
        }
    }
}

pub(crate) struct InfoFixture<'a> {
    pub title: &'a str,
    pub author: &'a str,
    pub subject: &'a str,
    pub keywords: &'a str,
}

/// Encode a small solid-color JPEG.
pub(crate) fn tiny_jpeg() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(4, 4, image::Rgb([180, 40, 40]));
    let mut cursor = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut cursor, image::ImageFormat::Jpeg)
        .unwrap();
    cursor.into_inner()
}

/// Encode a small solid-color PNG.
pub(crate) fn tiny_png() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(4, 4, image::Rgb([40, 40, 180]));
    let mut cursor = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut cursor, image::ImageFormat::Png)
        .unwrap();
    cursor.into_inner()
}

/// Build a complete PDF with the given pages and optional info dictionary.
pub(crate) fn build_pdf(pages: &[PageFixture], info: Option<&InfoFixture<'_>>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids = Vec::new();
    for page in pages {
        let mut operations = Vec::new();
        if let Some(text) = &page.text {
            operations.extend([
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![50.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(text.as_str())]),
                Operation::new("ET", vec![]),
            ]);
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));

        let mut resources = dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        };
        if !page.images.is_empty() {
            let mut xobjects = Dictionary::new();
            for (index, image) in page.images.iter().enumerate() {
                let mut dict = dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => 4,
                    "Height" => 4,
                    "ColorSpace" => "DeviceRGB",
                    "BitsPerComponent" => 8,
                };
                if let Some(filter) = image.filter {
                    dict.set("Filter", Object::Name(filter.as_bytes().to_vec()));
                }
                let image_id = doc.add_object(Stream::new(dict, image.data.clone()));
                xobjects.set(format!("Im{}", index), Object::Reference(image_id));
            }
            resources.set("XObject", Object::Dictionary(xobjects));
        }

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            "Contents" => content_id,
            "Resources" => resources,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    if let Some(info) = info {
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(info.title),
            "Author" => Object::string_literal(info.author),
            "Subject" => Object::string_literal(info.subject),
            "Keywords" => Object::string_literal(info.keywords),
        });
        doc.trailer.set("Info", info_id);
    }

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}
