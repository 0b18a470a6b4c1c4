use super::{CanvasSize, Placement, Rect, RectangleRecord, run_packer};
use crate::error::TexpackError;

/// Pack records with Bottom-Left-Fill.
///
/// Each record goes to the candidate anchor with the smallest `y`, then the
/// smallest `x`, that keeps it inside the canvas and clear of every record
/// placed before it. Returns the final canvas size; every record's `x`/`y`
/// is set on success.
pub fn pack_blf(
    records: &mut [RectangleRecord],
    order: &[usize],
) -> Result<CanvasSize, TexpackError> {
    run_packer(records, order, place_bottom_left)
}

/// Candidate anchor for the top-left corner of a future box.
///
/// `bound_w`/`bound_h` come from the gap that produced the point. A box
/// smaller than the bound in either direction skips the point; this only
/// prunes the search, the collision test still decides validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StablePoint {
    x: u32,
    y: u32,
    bound_w: u32,
    bound_h: u32,
}

impl StablePoint {
    const ORIGIN: StablePoint = StablePoint::new(0, 0, 0, 0);

    const fn new(x: u32, y: u32, bound_w: u32, bound_h: u32) -> Self {
        Self {
            x,
            y,
            bound_w,
            bound_h,
        }
    }

    fn admits(&self, width: u32, height: u32) -> bool {
        width >= self.bound_w && height >= self.bound_h
    }
}

/// Placement state for one attempt on a fixed canvas
struct BlfState<'a> {
    records: &'a [RectangleRecord],
    canvas: CanvasSize,
    points: Vec<StablePoint>,
    placed: Vec<Rect>,
    placements: Vec<Placement>,
}

impl<'a> BlfState<'a> {
    fn new(records: &'a [RectangleRecord], canvas: CanvasSize) -> Self {
        Self {
            records,
            canvas,
            points: vec![StablePoint::ORIGIN],
            placed: Vec::with_capacity(records.len()),
            placements: Vec::with_capacity(records.len()),
        }
    }

    fn collides(&self, rect: &Rect) -> bool {
        self.placed.iter().any(|p| p.intersects(rect))
    }

    /// Index into `points` of the bottom-most, then left-most, usable anchor
    fn find_anchor(&self, width: u32, height: u32) -> Option<usize> {
        let mut best: Option<(usize, u32, u32)> = None;

        for (i, point) in self.points.iter().enumerate() {
            if !point.admits(width, height) {
                continue;
            }

            let better = best.is_none_or(|(_, bx, by)| (point.y, point.x) < (by, bx));
            if !better {
                continue;
            }

            let rect = Rect::new(point.x, point.y, width, height);
            if !rect.fits_within(self.canvas.width, self.canvas.height) || self.collides(&rect) {
                continue;
            }

            best = Some((i, point.x, point.y));
        }

        best.map(|(i, _, _)| i)
    }

    /// Place `records[index]`, or `None` if no anchor can hold it
    fn place(&mut self, index: usize) -> Option<()> {
        let record = &self.records[index];
        let (width, height) = (record.padded_width(), record.padded_height());

        let anchor = self.points.remove(self.find_anchor(width, height)?);
        let rect = Rect::new(anchor.x, anchor.y, width, height);

        self.placed.push(rect);
        self.placements.push(Placement {
            index,
            x: rect.x,
            y: rect.y,
        });

        let candidates = self.candidates_around(&rect);
        self.admit_points(candidates);
        Some(())
    }

    /// Corners exposed by `c` against the canvas edges and every placed box
    fn candidates_around(&self, c: &Rect) -> Vec<StablePoint> {
        let (cx1, cy1, cx2, cy2) = (c.x, c.y, c.right(), c.bottom());

        let mut points = vec![
            StablePoint::new(cx2, 0, 0, cy1),
            StablePoint::new(0, cy2, cx1, 0),
        ];

        for p in &self.placed {
            let (px1, py1, px2, py2) = (p.x, p.y, p.right(), p.bottom());

            // c left of p
            if cx2 <= px1 && cy2 > py2 {
                points.push(StablePoint::new(
                    cx2,
                    py2,
                    px1 - cx2,
                    cy1.saturating_sub(py2),
                ));
            }

            // c right of p
            if px2 <= cx1 && py2 > cy2 {
                points.push(StablePoint::new(
                    px2,
                    cy2,
                    cx1 - px2,
                    py1.saturating_sub(cy2),
                ));
            }

            // c above p
            if cy2 <= py1 && cx2 > px2 {
                points.push(StablePoint::new(
                    px2,
                    cy2,
                    cx1.saturating_sub(px2),
                    py1 - cy2,
                ));
            }

            // c below p
            if py2 <= cy1 && px2 > cx2 {
                points.push(StablePoint::new(
                    cx2,
                    py2,
                    px1.saturating_sub(cx2),
                    cy1 - py2,
                ));
            }
        }

        points
    }

    /// Keep candidates that lie on the canvas and outside every placed box
    fn admit_points(&mut self, candidates: Vec<StablePoint>) {
        for point in candidates {
            if point.x >= self.canvas.width || point.y >= self.canvas.height {
                continue;
            }
            if self.placed.iter().any(|p| p.contains_point(point.x, point.y)) {
                continue;
            }
            self.points.push(point);
        }
    }
}

fn place_bottom_left(
    records: &[RectangleRecord],
    order: &[usize],
    canvas: CanvasSize,
) -> Option<Vec<Placement>> {
    let mut state = BlfState::new(records, canvas);
    for &index in order {
        state.place(index)?;
    }
    Some(state.placements)
}
