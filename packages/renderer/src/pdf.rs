//! Single-page PDF export.
//!
//! The diagram is rasterised and embedded as a Flate-compressed RGB image
//! XObject on a page sized to the diagram's intrinsic dimensions
//! (1 SVG unit = 1 pt).

use crate::errors::RasterError;
use crate::raster::{rasterize, RasterImage, RasterOptions};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::io::Write;

const IMAGE_NAME: &str = "Im0";

/// Rasterise `svg` and wrap it in a one-page PDF document
pub fn svg_to_pdf(svg: &str, options: RasterOptions) -> Result<Vec<u8>, RasterError> {
    let image = rasterize(svg, options)?;
    encode_pdf(&image)
}

fn deflate(bytes: &[u8]) -> Result<Vec<u8>, RasterError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(bytes)
        .map_err(|e| RasterError::Pdf(e.to_string()))?;
    encoder.finish().map_err(|e| RasterError::Pdf(e.to_string()))
}

fn encode_pdf(image: &RasterImage) -> Result<Vec<u8>, RasterError> {
    let (page_width, page_height) = image.source_size;

    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();

    let pixels = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(image.width),
            "Height" => i64::from(image.height),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "FlateDecode",
        },
        deflate(&image.rgb())?,
    )
    .with_compression(false);
    let image_id = doc.add_object(pixels);

    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    page_width.into(),
                    0.into(),
                    0.into(),
                    page_height.into(),
                    0.into(),
                    0.into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(IMAGE_NAME.as_bytes().to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let encoded = content.encode().map_err(|e| RasterError::Pdf(e.to_string()))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), page_width.into(), page_height.into()],
        "Resources" => dictionary! {
            "XObject" => dictionary! { IMAGE_NAME => image_id },
        },
        "Contents" => content_id,
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

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).map_err(|e| RasterError::Pdf(e.to_string()))?;
    Ok(bytes)
}
