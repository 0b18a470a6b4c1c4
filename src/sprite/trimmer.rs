use image::RgbaImage;

use crate::packing::Bounds;

/// Bounding box of the pixels with non-zero alpha.
///
/// Returns `None` for an empty or fully transparent image.
pub fn opaque_bounds(image: &RgbaImage) -> Option<Bounds> {
    let (width, height) = image.dimensions();

    let mut min_x = width;
    let mut min_y = height;
    let mut max_x = 0u32;
    let mut max_y = 0u32;

    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel[3] > 0 {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    if max_x < min_x || max_y < min_y {
        return None;
    }

    Some(Bounds::new(min_x, min_y, max_x + 1, max_y + 1))
}

/// Copy the region described by `bounds` out of `image`
pub fn crop_to_bounds(image: &RgbaImage, bounds: Bounds) -> RgbaImage {
    image::imageops::crop_imm(image, bounds.left, bounds.top, bounds.width(), bounds.height())
        .to_image()
}
