//! Single-page PDF construction around a raster image.
//!
//! The page is A4-wide and as tall as the image's aspect ratio requires, so a
//! long resume stretches one page instead of paginating.

use std::io::{Cursor, Write};

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use thiserror::Error;

/// A4 width in PDF points.
pub const A4_WIDTH_PT: f32 = 595.28;
const JPEG_QUALITY: u8 = 92;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("captured image is empty")]
    EmptyImage,

    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("PDF construction failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("PDF write failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

/// Portrait page of A4 width whose height keeps the image's aspect ratio.
pub fn page_size_for(image_width: u32, image_height: u32) -> PageSize {
    PageSize {
        width: A4_WIDTH_PT,
        height: image_height as f32 * A4_WIDTH_PT / image_width as f32,
    }
}

/// Embeds `image` as the sole content of a one-page PDF and returns the file bytes.
pub fn image_to_pdf(image: &DynamicImage) -> Result<(Vec<u8>, PageSize), PdfError> {
    let (mut doc, page) = build_document(image)?;
    let mut bytes = Vec::new();
    write_document(&mut doc, &mut bytes)?;
    Ok((bytes, page))
}

/// Serializes `doc` into `writer`, flushing so a failed sink surfaces as an error.
pub fn write_document<W: Write>(doc: &mut Document, writer: &mut W) -> Result<(), PdfError> {
    doc.save_to(writer)?;
    writer.flush()?;
    Ok(())
}

fn build_document(image: &DynamicImage) -> Result<(Document, PageSize), PdfError> {
    let (px_width, px_height) = image.dimensions();
    if px_width == 0 || px_height == 0 {
        return Err(PdfError::EmptyImage);
    }
    let page = page_size_for(px_width, px_height);

    let mut jpeg = Vec::new();
    image
        .to_rgb8()
        .write_with_encoder(JpegEncoder::new_with_quality(Cursor::new(&mut jpeg), JPEG_QUALITY))?;

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => px_width as i64,
            "Height" => px_height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        },
        jpeg,
    ));

    // Scale the unit image square to the full page.
    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    page.width.into(),
                    Object::Integer(0),
                    Object::Integer(0),
                    page.height.into(),
                    Object::Integer(0),
                    Object::Integer(0),
                ],
            ),
            Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let resources_id = doc.add_object(dictionary! {
        "XObject" => dictionary! {
            "Im0" => image_id,
        },
    });

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            page.width.into(),
            page.height.into(),
        ],
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(dictionary! {
        "Producer" => Object::string_literal("resume-studio"),
    });
    doc.trailer.set("Info", info_id);

    Ok((doc, page))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::io;

    /// A sink that refuses every write, like a full disk.
    pub(crate) struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("no space left on device"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::other("no space left on device"))
        }
    }

    pub(crate) fn failed_write() -> PdfError {
        let (mut doc, _) = build_document(&solid(32, 32)).unwrap();
        write_document(&mut doc, &mut FullDisk).unwrap_err()
    }

    fn solid(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([240, 240, 240])))
    }

    #[test]
    fn test_page_height_follows_aspect_ratio() {
        let page = page_size_for(1588, 2246);
        assert!((page.width - A4_WIDTH_PT).abs() < f32::EPSILON);
        assert!((page.height - 2246.0 * A4_WIDTH_PT / 1588.0).abs() < 0.01);
    }

    #[test]
    fn test_tall_content_stretches_single_page() {
        let page = page_size_for(1000, 5000);
        assert!((page.height - A4_WIDTH_PT * 5.0).abs() < 0.01);
    }

    #[test]
    fn test_pdf_has_exactly_one_page() {
        let (bytes, page) = image_to_pdf(&solid(200, 400)).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
        assert!((page.height - A4_WIDTH_PT * 2.0).abs() < 0.01);
    }

    #[test]
    fn test_image_is_embedded_as_jpeg() {
        let (bytes, _) = image_to_pdf(&solid(64, 64)).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let has_jpeg_image = doc.objects.values().any(|obj| match obj {
            Object::Stream(stream) => matches!(
                stream.dict.get(b"Filter"),
                Ok(Object::Name(name)) if name == b"DCTDecode"
            ),
            _ => false,
        });
        assert!(has_jpeg_image);
    }

    #[test]
    fn test_empty_image_is_rejected() {
        let err = image_to_pdf(&solid(0, 0)).unwrap_err();
        assert!(matches!(err, PdfError::EmptyImage));
    }

    #[test]
    fn test_failed_write_is_io_error() {
        let err = failed_write();
        assert!(matches!(err, PdfError::Io(_)));
        assert_eq!(err.to_string(), "PDF write failed: no space left on device");
    }
}
