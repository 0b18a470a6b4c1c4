use std::fs;
use std::io::Cursor;
use std::path::Path;

use anyhow::Result;
use image::{DynamicImage, ImageFormat, RgbImage};

use crate::atlas::Atlas;
use crate::cli::CompressionLevel;
use crate::error::TexpackError;

/// Save atlas image as PNG, optionally with compression
pub fn save_atlas_image(
    atlas: &Atlas,
    path: &Path,
    opaque: bool,
    compress: Option<CompressionLevel>,
) -> Result<()> {
    let png_data = encode_png(atlas, opaque).map_err(|e| TexpackError::ImageSave {
        path: path.to_path_buf(),
        source: e,
    })?;

    let output_data = if let Some(level) = compress {
        // Compress with oxipng
        let opts = match level {
            CompressionLevel::Level(n) => oxipng::Options::from_preset(n),
            CompressionLevel::Max => oxipng::Options::max_compression(),
        };
        oxipng::optimize_from_memory(&png_data, &opts).map_err(|e| TexpackError::PngCompress {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
    } else {
        png_data
    };

    fs::write(path, output_data).map_err(|e| TexpackError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Encode the atlas to PNG bytes in memory
fn encode_png(atlas: &Atlas, opaque: bool) -> Result<Vec<u8>, image::ImageError> {
    let mut png_data = Cursor::new(Vec::new());
    if opaque {
        let rgb: RgbImage = DynamicImage::ImageRgba8(atlas.image.clone()).into_rgb8();
        rgb.write_to(&mut png_data, ImageFormat::Png)?;
    } else {
        atlas.image.write_to(&mut png_data, ImageFormat::Png)?;
    }
    Ok(png_data.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packing::CanvasSize;

    #[test]
    fn test_encode_png_round_trips_dimensions() {
        let atlas = Atlas::new(CanvasSize::new(8, 4));

        for opaque in [false, true] {
            let bytes = encode_png(&atlas, opaque).unwrap();
            let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (8, 4));
            assert_eq!(decoded.color().has_alpha(), !opaque);
        }
    }
}
