use crate::error::ToolError;
use crate::input::InputFile;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use tracing::info;

/// Build a one-page PDF showing the image at its native pixel size
/// (one pixel per point).
pub fn image_to_pdf(input: &InputFile) -> Result<Document, ToolError> {
    let decoded = image::load_from_memory(&input.bytes)
        .map_err(|e| ToolError::document_load(&input.name, e))?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        },
        rgb.into_raw(),
    ));

    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    (width as i64).into(),
                    0.into(),
                    0.into(),
                    (height as i64).into(),
                    0.into(),
                    0.into(),
                ],
            ),
            Operation::new("Do", vec!["Im0".into()]),
            Operation::new("Q", vec![]),
        ],
    };
    let encoded = content
        .encode()
        .map_err(|e| ToolError::unexpected("Failed to encode page content", e))?;
    let content_id = doc.add_object(Stream::new(lopdf::Dictionary::new(), encoded));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(width as i64),
            Object::Integer(height as i64),
        ],
        "Resources" => dictionary! {
            "XObject" => dictionary! { "Im0" => image_id },
        },
        "Contents" => content_id,
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    info!(name = %input.name, width, height, "embedded image in PDF");
    Ok(doc)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    pub(crate) fn encode_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 10) as u8, (y * 10) as u8, 128])
        });
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
        bytes
    }

    fn media_box(doc: &Document) -> Vec<i64> {
        let (_, page_id) = doc.get_pages().into_iter().next().unwrap();
        let page = doc.get_dictionary(page_id).unwrap();
        page.get(b"MediaBox")
            .unwrap()
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o.as_i64().unwrap())
            .collect()
    }

    #[test]
    fn test_png_to_pdf() {
        let input = InputFile::new("pic.png", encode_image(20, 10, ImageFormat::Png));
        let doc = image_to_pdf(&input).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
        assert_eq!(media_box(&doc), vec![0, 0, 20, 10]);
    }

    #[test]
    fn test_jpeg_to_pdf() {
        let input = InputFile::new("pic.jpg", encode_image(16, 32, ImageFormat::Jpeg));
        let doc = image_to_pdf(&input).unwrap();
        assert_eq!(media_box(&doc), vec![0, 0, 16, 32]);
    }

    #[test]
    fn test_image_stream_is_compressed() {
        let input = InputFile::new("pic.png", encode_image(64, 64, ImageFormat::Png));
        let doc = image_to_pdf(&input).unwrap();
        let image = doc
            .objects
            .values()
            .filter_map(|o| o.as_stream().ok())
            .find(|s| {
                s.dict
                    .get(b"Subtype")
                    .and_then(Object::as_name)
                    .map(|n| n == b"Image")
                    .unwrap_or(false)
            })
            .unwrap();
        assert!(image.dict.has(b"Filter"));
    }

    #[test]
    fn test_not_an_image() {
        let input = InputFile::new("pic.png", b"definitely not png".to_vec());
        assert!(matches!(
            image_to_pdf(&input),
            Err(ToolError::DocumentLoad { .. })
        ));
    }
}
