use image::RgbaImage;

use crate::packing::CanvasSize;
use crate::sprite::PackedSprite;

/// A completed texture atlas
#[derive(Debug)]
pub struct Atlas {
    /// Atlas width
    pub width: u32,
    /// Atlas height
    pub height: u32,
    /// Rendered atlas image
    pub image: RgbaImage,
    /// All sprites packed into this atlas, in descriptor order
    pub sprites: Vec<PackedSprite>,
    /// Share of the canvas covered by sprite pixels (0.0 to 1.0)
    pub occupancy: f64,
}

impl Atlas {
    pub fn new(canvas: CanvasSize) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            image: RgbaImage::new(canvas.width, canvas.height),
            sprites: Vec::new(),
            occupancy: 0.0,
        }
    }
}
