use super::{CanvasSize, Placement, RectangleRecord, run_packer};
use crate::error::TexpackError;

/// Pack records into rows (shelves), left to right, top to bottom.
///
/// Space to the right of a closed row is never revisited. Returns the final
/// canvas size; every record's `x`/`y` is set on success.
pub fn pack_next_fit(
    records: &mut [RectangleRecord],
    order: &[usize],
) -> Result<CanvasSize, TexpackError> {
    run_packer(records, order, place_rows)
}

/// Cursor state for the row being filled
#[derive(Debug, Default)]
struct Shelf {
    /// Next free x in the current row
    dx: u32,
    /// Top of the current row
    dy: u32,
    /// Tallest box placed in the current row so far
    row_height: u32,
}

impl Shelf {
    fn fits(&self, width: u32, height: u32, canvas: CanvasSize) -> bool {
        self.dx + width <= canvas.width && self.dy + height <= canvas.height
    }

    fn advance(&mut self, width: u32, height: u32) {
        self.dx += width;
        self.row_height = self.row_height.max(height);
    }

    fn next_row(&mut self) {
        self.dx = 0;
        self.dy += self.row_height;
        self.row_height = 0;
    }
}

fn place_rows(
    records: &[RectangleRecord],
    order: &[usize],
    canvas: CanvasSize,
) -> Option<Vec<Placement>> {
    let mut shelf = Shelf::default();
    let mut placements = Vec::with_capacity(order.len());

    for &index in order {
        let record = &records[index];
        let (w, h) = (record.padded_width(), record.padded_height());

        if !shelf.fits(w, h, canvas) {
            shelf.next_row();
            if !shelf.fits(w, h, canvas) {
                return None;
            }
        }

        placements.push(Placement {
            index,
            x: shelf.dx,
            y: shelf.dy,
        });
        shelf.advance(w, h);
    }

    Some(placements)
}
