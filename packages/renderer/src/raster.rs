//! SVG → PNG conversion for export.

use crate::errors::RasterError;
use image::codecs::png::PngEncoder;
use image::ImageEncoder;
use resvg::tiny_skia::{Color, Pixmap, Transform};
use resvg::usvg::{Options, Tree};

/// Largest edge, in pixels, a rasterised export may have
pub const MAX_DIMENSION: u32 = 8192;

/// Options for rasterising an artifact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterOptions {
    /// Device pixel ratio applied to the SVG's intrinsic size
    pub scale: f32,
    /// Opaque background painted under the diagram
    pub background: [u8; 3],
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 2.0,
            background: [255, 255, 255],
        }
    }
}

/// RGBA pixels of a rasterised SVG
#[derive(Debug, Clone)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    /// Intrinsic SVG size in user units, before scaling
    pub source_size: (f32, f32),
    pub rgba: Vec<u8>,
}

impl RasterImage {
    /// Pixels without the alpha channel
    pub fn rgb(&self) -> Vec<u8> {
        self.rgba
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect()
    }
}

/// Rasterise `svg` onto an opaque background
pub fn rasterize(svg: &str, options: RasterOptions) -> Result<RasterImage, RasterError> {
    let mut usvg_options = Options::default();
    usvg_options.fontdb_mut().load_system_fonts();

    let tree = Tree::from_str(svg, &usvg_options).map_err(|e| RasterError::Parse(e.to_string()))?;

    let size = tree.size();
    let scale = if options.scale > 0.0 { options.scale } else { 1.0 };
    let width = (size.width() * scale).ceil() as u32;
    let height = (size.height() * scale).ceil() as u32;

    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(RasterError::InvalidSize { width, height });
    }

    let mut pixmap =
        Pixmap::new(width, height).ok_or(RasterError::InvalidSize { width, height })?;
    let [r, g, b] = options.background;
    pixmap.fill(Color::from_rgba8(r, g, b, 255));

    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    tracing::debug!("rasterised SVG to {}x{}", width, height);

    Ok(RasterImage {
        width,
        height,
        source_size: (size.width(), size.height()),
        rgba: pixmap.take(),
    })
}

/// Rasterise `svg` and encode it as PNG
pub fn svg_to_png(svg: &str, options: RasterOptions) -> Result<Vec<u8>, RasterError> {
    let image = rasterize(svg, options)?;

    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(
            &image.rgba,
            image.width,
            image.height,
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| RasterError::Encode(e.to_string()))?;

    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10"><rect width="20" height="10" fill="#ff0000"/></svg>"##;

    #[test]
    fn test_rasterize_scales() {
        let image = rasterize(SQUARE, RasterOptions::default()).unwrap();
        assert_eq!((image.width, image.height), (40, 20));
        assert_eq!(image.source_size, (20.0, 10.0));
        assert_eq!(&image.rgba[0..4], &[255, 0, 0, 255]);
        assert_eq!(image.rgb().len(), 40 * 20 * 3);
    }

    #[test]
    fn test_png_signature() {
        let png = svg_to_png(SQUARE, RasterOptions::default()).unwrap();
        assert_eq!(&png[0..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_garbage_is_a_parse_error() {
        let err = svg_to_png("not svg", RasterOptions::default()).unwrap_err();
        assert!(matches!(err, RasterError::Parse(_)));
    }
}
