use anyhow::Result;
use image::imageops;
use log::{debug, info};

use super::Atlas;
use crate::error::TexpackError;
use crate::packing::{
    Bounds, CanvasSize, PackMode, RectangleRecord, descriptor_order, placement_order,
    trim_records,
};
use crate::sprite::{PackedSprite, SourceSprite, crop_to_bounds, opaque_bounds};

/// Configuration for atlas building
pub struct AtlasBuilder {
    pub border: u32,
    pub mode: PackMode,
    pub trim: bool,
    pub sort: bool,
}

impl Default for AtlasBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AtlasBuilder {
    pub fn new() -> Self {
        Self {
            border: 2,
            mode: PackMode::Blf,
            trim: false,
            sort: true,
        }
    }

    pub fn border(mut self, border: u32) -> Self {
        self.border = border;
        self
    }

    pub fn mode(mut self, mode: PackMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn sort(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }

    /// Build an atlas from the given sprites, in input order
    pub fn build(&self, mut sprites: Vec<SourceSprite>) -> Result<Atlas> {
        if sprites.is_empty() {
            return Err(TexpackError::NoImages.into());
        }

        let mut records: Vec<RectangleRecord> = sprites
            .iter()
            .enumerate()
            .map(|(i, sprite)| {
                RectangleRecord::new(
                    i,
                    sprite.name.clone(),
                    sprite.width(),
                    sprite.height(),
                    self.border,
                )
            })
            .collect();

        if self.trim {
            self.trim_sprites(&mut sprites, &mut records);
        }

        let order = placement_order(&records, self.sort);
        let canvas = self.mode.pack(&mut records, &order)?;

        let atlas = self.compose(canvas, &sprites, &records);

        info!(
            "Atlas: {}x{} with {} sprites ({:.1}% efficiency, {:?})",
            atlas.width,
            atlas.height,
            atlas.sprites.len(),
            atlas.occupancy * 100.0,
            self.mode,
        );

        Ok(atlas)
    }

    /// Shrink each record to its opaque pixels and crop the image to match
    fn trim_sprites(&self, sprites: &mut [SourceSprite], records: &mut [RectangleRecord]) {
        let bounds: Vec<Option<Bounds>> = sprites.iter().map(|s| opaque_bounds(&s.image)).collect();
        let trimmed = trim_records(records, |i| bounds[i]);

        for record in records.iter().filter(|r| r.trim.trimmed) {
            let crop = Bounds::new(
                record.trim.offset_x,
                record.trim.offset_y,
                record.trim.offset_x + record.raw_width,
                record.trim.offset_y + record.raw_height,
            );
            let sprite = &mut sprites[record.index];
            sprite.image = crop_to_bounds(&sprite.image, crop);
        }

        info!("Trimmed {} of {} sprites", trimmed, records.len());
    }

    /// Render the placed sprites and list them in descriptor order
    fn compose(
        &self,
        canvas: CanvasSize,
        sprites: &[SourceSprite],
        records: &[RectangleRecord],
    ) -> Atlas {
        let mut atlas = Atlas::new(canvas);

        for record in records {
            imageops::overlay(
                &mut atlas.image,
                &sprites[record.index].image,
                i64::from(record.content_x()),
                i64::from(record.content_y()),
            );
        }

        // Paths compare as strings so sprites from sibling directories
        // interleave the way a plain text sort lists them
        let order = descriptor_order(records, self.sort, |r| {
            sprites[r.index].path.to_string_lossy().into_owned()
        });

        for record in order.iter().map(|&i| &records[i]) {
            debug!(
                "{:4} {} x,y,w,h={},{},{}({}),{}({}){}",
                record.index,
                record.name,
                record.x,
                record.y,
                record.padded_width(),
                record.raw_width,
                record.padded_height(),
                record.raw_height,
                if record.trim.trimmed {
                    format!(
                        " trim fX,fY,fW,fH={},{},{},{}",
                        record.trim.offset_x,
                        record.trim.offset_y,
                        record.trim.frame_width,
                        record.trim.frame_height
                    )
                } else {
                    String::new()
                }
            );
        }

        atlas.sprites = order
            .into_iter()
            .map(|i| PackedSprite::from(&records[i]))
            .collect();

        let used: u64 = records
            .iter()
            .map(|r| u64::from(r.raw_width) * u64::from(r.raw_height))
            .sum();
        atlas.occupancy = used as f64 / canvas.area() as f64;

        atlas
    }
}
