use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::packing::{RectangleRecord, TrimInfo};

/// Represents a source image before packing
#[derive(Debug, Clone)]
pub struct SourceSprite {
    /// Original file path
    pub path: PathBuf,
    /// Display name (file name without extension)
    pub name: String,
    /// Decoded image data, cropped once trimming has run
    pub image: RgbaImage,
}

impl SourceSprite {
    /// Width of the sprite (after trimming)
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height of the sprite (after trimming)
    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Result of placing a sprite in the atlas
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackedSprite {
    /// Reference to source sprite name
    pub name: String,
    /// Position of the image content in the atlas (x coordinate)
    pub x: u32,
    /// Position of the image content in the atlas (y coordinate)
    pub y: u32,
    /// Width in atlas
    pub width: u32,
    /// Height in atlas
    pub height: u32,
    /// Original trim info for offset calculation
    pub trim_info: TrimInfo,
}

impl From<&RectangleRecord> for PackedSprite {
    fn from(record: &RectangleRecord) -> Self {
        Self {
            name: record.name.clone(),
            x: record.content_x(),
            y: record.content_y(),
            width: record.raw_width,
            height: record.raw_height,
            trim_info: record.trim,
        }
    }
}
