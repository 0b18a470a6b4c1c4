use serde::{Deserialize, Serialize};

use super::Rect;

/// Largest border accepted from the command line or a config file
pub const MAX_BORDER: u32 = 1 << 16;

/// Largest padded side a placer accepts. Any position on a canvas that can
/// hold such a box, plus the box side, stays within `u32`.
pub const MAX_PADDED_SIZE: u32 = u32::MAX / 2;

/// Opaque bounding box of an image, right/bottom exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Bounds {
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }
}

/// Trimming information to reconstruct original sprite positioning
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TrimInfo {
    /// Whether a transparent margin was removed
    pub trimmed: bool,
    /// Pixels trimmed from left edge
    pub offset_x: u32,
    /// Pixels trimmed from top edge
    pub offset_y: u32,
    /// Original width before trimming
    pub frame_width: u32,
    /// Original height before trimming
    pub frame_height: u32,
}

impl TrimInfo {
    /// Create TrimInfo for an untrimmed image
    pub fn untrimmed(width: u32, height: u32) -> Self {
        Self {
            trimmed: false,
            offset_x: 0,
            offset_y: 0,
            frame_width: width,
            frame_height: height,
        }
    }
}

/// Geometry and placement of one input image.
///
/// Records live in an arena ordered by input; `index` is the position in
/// that arena and never changes. Placers only ever write `x` and `y`, and
/// only once, when a complete layout has been found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RectangleRecord {
    /// Position in the original input order
    pub index: usize,
    /// Display name used in descriptors
    pub name: String,
    /// Pixel width after trimming, before border
    pub raw_width: u32,
    /// Pixel height after trimming, before border
    pub raw_height: u32,
    /// Border added on every side of the raw box
    pub border: u32,
    /// Left edge of the padded box in the canvas
    pub x: u32,
    /// Top edge of the padded box in the canvas
    pub y: u32,
    pub trim: TrimInfo,
}

impl RectangleRecord {
    pub fn new(index: usize, name: impl Into<String>, width: u32, height: u32, border: u32) -> Self {
        Self {
            index,
            name: name.into(),
            raw_width: width,
            raw_height: height,
            border,
            x: 0,
            y: 0,
            trim: TrimInfo::untrimmed(width, height),
        }
    }

    /// Raw width plus the border on both sides, saturating at `u32::MAX`
    pub fn padded_width(&self) -> u32 {
        self.raw_width.saturating_add(self.border.saturating_mul(2))
    }

    pub fn padded_height(&self) -> u32 {
        self.raw_height.saturating_add(self.border.saturating_mul(2))
    }

    /// Whether both padded sides are within `MAX_PADDED_SIZE`
    pub fn is_packable(&self) -> bool {
        self.padded_width() <= MAX_PADDED_SIZE && self.padded_height() <= MAX_PADDED_SIZE
    }

    pub fn padded_area(&self) -> u64 {
        u64::from(self.padded_width()) * u64::from(self.padded_height())
    }

    /// Padded box at the record's current position
    pub fn padded_rect(&self) -> Rect {
        self.padded_rect_at(self.x, self.y)
    }

    /// Padded box if the record were placed at `(x, y)`
    pub fn padded_rect_at(&self, x: u32, y: u32) -> Rect {
        Rect::new(x, y, self.padded_width(), self.padded_height())
    }

    /// Left edge of the image content (inside the border)
    pub fn content_x(&self) -> u32 {
        self.x + self.border
    }

    /// Top edge of the image content (inside the border)
    pub fn content_y(&self) -> u32 {
        self.y + self.border
    }

    /// Shrink the raw box to `bounds`, given relative to the current raw box.
    ///
    /// Returns false and leaves the record untouched when `bounds` covers the
    /// whole raw box. Repeated trims keep the first pre-trim frame size and
    /// accumulate offsets.
    pub fn apply_trim(&mut self, bounds: Bounds) -> bool {
        let full = Bounds::new(0, 0, self.raw_width, self.raw_height);
        if bounds == full || bounds.width() == 0 || bounds.height() == 0 {
            return false;
        }

        self.trim.trimmed = true;
        self.trim.offset_x += bounds.left;
        self.trim.offset_y += bounds.top;
        self.raw_width = bounds.width();
        self.raw_height = bounds.height();
        true
    }
}
