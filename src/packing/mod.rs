//! Rectangle bin packing: records, preprocessing and the two placers.
//!
//! Both placers share one contract: they take the record arena plus a
//! placement order (indices into the arena), start on a 2x2 canvas and
//! double it until every record fits, then write the final positions back
//! into the records and return the canvas size.

mod blf;
mod canvas;
mod next_fit;
mod preprocess;
mod record;
mod rect;

pub use blf::pack_blf;
pub use canvas::CanvasSize;
pub use next_fit::pack_next_fit;
pub use preprocess::{descriptor_order, placement_order, trim_records};
pub use record::{Bounds, MAX_BORDER, MAX_PADDED_SIZE, RectangleRecord, TrimInfo};
pub use rect::Rect;

use clap::ValueEnum;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::TexpackError;

/// Placement algorithm
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackMode {
    /// Bottom-Left-Fill over stable points (denser)
    #[default]
    #[value(name = "blf")]
    Blf,
    /// Shelf packing, one row after another (faster)
    #[value(name = "next-fit", alias = "nextfit")]
    NextFit,
}

impl PackMode {
    /// Pack `records` in `order` with this algorithm
    pub fn pack(
        self,
        records: &mut [RectangleRecord],
        order: &[usize],
    ) -> Result<CanvasSize, TexpackError> {
        match self {
            PackMode::Blf => pack_blf(records, order),
            PackMode::NextFit => pack_next_fit(records, order),
        }
    }
}

/// Position chosen for one record during a placement attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Placement {
    pub index: usize,
    pub x: u32,
    pub y: u32,
}

/// A single placement attempt on a fixed canvas. `None` asks for a larger canvas.
type Attempt = fn(&[RectangleRecord], &[usize], CanvasSize) -> Option<Vec<Placement>>;

/// Shared driver: validate input, grow until `attempt` succeeds, commit positions.
fn run_packer(
    records: &mut [RectangleRecord],
    order: &[usize],
    attempt: Attempt,
) -> Result<CanvasSize, TexpackError> {
    if records.is_empty() {
        return Err(TexpackError::NoImages);
    }
    check_order(records.len(), order)?;
    if let Some(record) = records.iter().find(|r| !r.is_packable()) {
        return Err(TexpackError::RectangleTooLarge {
            name: record.name.clone(),
            width: record.raw_width,
            height: record.raw_height,
            border: record.border,
        });
    }

    let (canvas, placements) = canvas::grow_until_placed(|size| attempt(records, order, size))?;

    for placement in &placements {
        let record = &mut records[placement.index];
        record.x = placement.x;
        record.y = placement.y;
        debug!(
            "{:4} {} at {},{} ({}x{})",
            record.index,
            record.name,
            record.x,
            record.y,
            record.padded_width(),
            record.padded_height()
        );
    }

    check_layout(records, canvas)?;
    Ok(canvas)
}

/// The placement order must visit every record exactly once
fn check_order(len: usize, order: &[usize]) -> Result<(), TexpackError> {
    let mut seen = vec![false; len];
    for &i in order {
        match seen.get_mut(i) {
            Some(slot) if !*slot => *slot = true,
            _ => {
                return Err(TexpackError::LayoutViolation(format!(
                    "placement order repeats or exceeds record index {}",
                    i
                )));
            }
        }
    }
    if order.len() != len {
        return Err(TexpackError::LayoutViolation(format!(
            "placement order covers {} of {} records",
            order.len(),
            len
        )));
    }
    Ok(())
}

/// Verify the packing invariants for a finished layout:
/// power-of-two canvas, every padded box inside it, no two boxes overlapping.
pub fn check_layout(records: &[RectangleRecord], canvas: CanvasSize) -> Result<(), TexpackError> {
    if !canvas.is_power_of_two() {
        return Err(TexpackError::LayoutViolation(format!(
            "canvas {}x{} is not a power of two",
            canvas.width, canvas.height
        )));
    }

    for (i, a) in records.iter().enumerate() {
        let rect = a.padded_rect();
        if !rect.fits_within(canvas.width, canvas.height) {
            return Err(TexpackError::LayoutViolation(format!(
                "{} at {},{} exceeds canvas {}x{}",
                a.name, rect.x, rect.y, canvas.width, canvas.height
            )));
        }

        if let Some(b) = records[i + 1..]
            .iter()
            .find(|b| rect.intersects(&b.padded_rect()))
        {
            return Err(TexpackError::LayoutViolation(format!(
                "{} overlaps {}",
                a.name, b.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn records(sizes: &[(u32, u32)], border: u32) -> Vec<RectangleRecord> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, &(w, h))| RectangleRecord::new(i, format!("r{}", i), w, h, border))
            .collect()
    }

    fn assert_valid(records: &[RectangleRecord], canvas: CanvasSize) {
        check_layout(records, canvas).unwrap();
        let used: u64 = records.iter().map(RectangleRecord::padded_area).sum();
        assert!(used <= canvas.area());
    }

    fn mixed_sizes() -> Vec<(u32, u32)> {
        vec![
            (30, 20),
            (25, 15),
            (40, 10),
            (15, 35),
            (20, 20),
            (7, 3),
            (1, 1),
            (12, 40),
            (33, 9),
            (5, 5),
            (16, 16),
            (64, 2),
        ]
    }

    #[test]
    fn test_empty_input_is_an_error() {
        for mode in [PackMode::Blf, PackMode::NextFit] {
            let result = mode.pack(&mut [], &[]);
            assert!(matches!(result, Err(TexpackError::NoImages)));
        }
    }

    #[test]
    fn test_bad_order_is_rejected() {
        let mut recs = records(&[(2, 2), (2, 2)], 0);

        assert!(matches!(
            PackMode::Blf.pack(&mut recs, &[0, 0]),
            Err(TexpackError::LayoutViolation(_))
        ));
        assert!(matches!(
            PackMode::NextFit.pack(&mut recs, &[0]),
            Err(TexpackError::LayoutViolation(_))
        ));
        assert!(matches!(
            PackMode::NextFit.pack(&mut recs, &[0, 5]),
            Err(TexpackError::LayoutViolation(_))
        ));
    }

    #[test]
    fn test_oversized_border_is_rejected() {
        for mode in [PackMode::Blf, PackMode::NextFit] {
            let mut recs = records(&[(4, 4)], u32::MAX / 2);

            let result = mode.pack(&mut recs, &[0]);

            assert!(matches!(
                result,
                Err(TexpackError::RectangleTooLarge { border, .. }) if border == u32::MAX / 2
            ));
            assert_eq!((recs[0].x, recs[0].y), (0, 0));
        }
    }

    #[test]
    fn test_both_modes_produce_valid_layouts() {
        for border in [0, 1, 2] {
            for sort in [true, false] {
                for mode in [PackMode::Blf, PackMode::NextFit] {
                    let mut recs = records(&mixed_sizes(), border);
                    let order = placement_order(&recs, sort);
                    let canvas = mode.pack(&mut recs, &order).unwrap();
                    assert_valid(&recs, canvas);
                }
            }
        }
    }

    #[test]
    fn test_packing_is_deterministic() {
        for mode in [PackMode::Blf, PackMode::NextFit] {
            let mut first = records(&mixed_sizes(), 1);
            let mut second = records(&mixed_sizes(), 1);
            let order = placement_order(&first, true);

            let a = mode.pack(&mut first, &order).unwrap();
            let b = mode.pack(&mut second, &order).unwrap();

            assert_eq!(a, b);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_blf_is_not_larger_than_next_fit_for_uniform_tiles() {
        let sizes = vec![(8, 8); 16];
        let mut blf = records(&sizes, 0);
        let mut shelf = records(&sizes, 0);
        let order = placement_order(&blf, true);

        let blf_canvas = PackMode::Blf.pack(&mut blf, &order).unwrap();
        let shelf_canvas = PackMode::NextFit.pack(&mut shelf, &order).unwrap();

        assert_eq!(blf_canvas, CanvasSize::new(32, 32));
        assert_eq!(shelf_canvas, CanvasSize::new(32, 32));
    }

    #[test]
    fn test_check_layout_detects_overlap() {
        let mut recs = records(&[(2, 2), (2, 2)], 0);
        recs[1].x = 1;

        assert!(check_layout(&recs, CanvasSize::new(4, 4)).is_err());
    }

    #[test]
    fn test_check_layout_detects_escape() {
        let mut recs = records(&[(2, 2)], 0);
        recs[0].x = 3;

        assert!(check_layout(&recs, CanvasSize::new(4, 4)).is_err());
        assert!(check_layout(&recs, CanvasSize::new(8, 4)).is_ok());
        assert!(check_layout(&recs, CanvasSize::new(6, 4)).is_err());
    }
}
