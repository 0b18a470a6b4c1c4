use log::debug;

use super::Placement;
use crate::error::TexpackError;

/// Destination canvas dimensions, always powers of two
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    /// Every packing run starts from this size
    pub const INITIAL: CanvasSize = CanvasSize {
        width: 2,
        height: 2,
    };

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Next candidate size: double the height while the canvas is at least
    /// as wide as it is tall, otherwise double the width.
    pub fn grow(self) -> Result<CanvasSize, TexpackError> {
        let overflow = TexpackError::CanvasOverflow {
            width: self.width,
            height: self.height,
        };

        if self.width >= self.height {
            let height = self.height.checked_mul(2).ok_or(overflow)?;
            Ok(CanvasSize::new(self.width, height))
        } else {
            let width = self.width.checked_mul(2).ok_or(overflow)?;
            Ok(CanvasSize::new(width, self.height))
        }
    }

    pub fn is_power_of_two(&self) -> bool {
        self.width >= 2
            && self.height >= 2
            && self.width.is_power_of_two()
            && self.height.is_power_of_two()
    }
}

/// Run `attempt` against growing canvases until it places everything.
///
/// Each attempt starts from scratch; `None` means some rectangle did not
/// fit and the whole set must be retried on the next size.
pub(crate) fn grow_until_placed<F>(
    mut attempt: F,
) -> Result<(CanvasSize, Vec<Placement>), TexpackError>
where
    F: FnMut(CanvasSize) -> Option<Vec<Placement>>,
{
    let mut canvas = CanvasSize::INITIAL;

    loop {
        if let Some(placements) = attempt(canvas) {
            return Ok((canvas, placements));
        }

        canvas = canvas.grow()?;
        debug!("Growing canvas to {}x{}", canvas.width, canvas.height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grow_alternates_height_then_width() {
        let mut canvas = CanvasSize::INITIAL;
        let mut sizes = Vec::new();
        for _ in 0..5 {
            canvas = canvas.grow().unwrap();
            sizes.push((canvas.width, canvas.height));
        }

        assert_eq!(sizes, vec![(2, 4), (4, 4), (4, 8), (8, 8), (8, 16)]);
    }

    #[test]
    fn test_grow_strictly_increases_area() {
        let mut canvas = CanvasSize::INITIAL;
        for _ in 0..20 {
            let next = canvas.grow().unwrap();
            assert!(next.area() > canvas.area());
            assert!(next.is_power_of_two());
            canvas = next;
        }
    }

    #[test]
    fn test_grow_reports_overflow() {
        let canvas = CanvasSize::new(1 << 31, 1 << 31);
        assert!(matches!(
            canvas.grow(),
            Err(TexpackError::CanvasOverflow { .. })
        ));
    }

    #[test]
    fn test_grow_until_placed_restarts_each_round() {
        let mut seen = Vec::new();
        let (canvas, placements) = grow_until_placed(|size| {
            seen.push(size);
            (size.area() >= 16).then(Vec::new)
        })
        .unwrap();

        assert_eq!(canvas, CanvasSize::new(4, 4));
        assert!(placements.is_empty());
        assert_eq!(
            seen,
            vec![
                CanvasSize::new(2, 2),
                CanvasSize::new(2, 4),
                CanvasSize::new(4, 4)
            ]
        );
    }
}
