use std::cmp::Reverse;

use log::debug;

use super::{Bounds, RectangleRecord};

/// Trim every record to the box reported by `bounding_box(index)`.
///
/// `None` means the image has no opaque pixel at all; such records keep a
/// single pixel at their top-left corner. Returns how many records shrank.
pub fn trim_records<F>(records: &mut [RectangleRecord], mut bounding_box: F) -> usize
where
    F: FnMut(usize) -> Option<Bounds>,
{
    let mut count = 0;
    for record in records.iter_mut() {
        let bounds = bounding_box(record.index).unwrap_or_else(|| Bounds::new(0, 0, 1, 1));
        if record.apply_trim(bounds) {
            debug!(
                "Trimmed {} to {}x{} (offset {},{})",
                record.name,
                record.raw_width,
                record.raw_height,
                record.trim.offset_x,
                record.trim.offset_y
            );
            count += 1;
        }
    }
    count
}

/// Order in which placers visit the records.
///
/// With `sort`, tallest padded boxes come first and ties go to the wider
/// box; equal boxes keep their input order.
pub fn placement_order(records: &[RectangleRecord], sort: bool) -> Vec<usize> {
    let mut order: Vec<usize> = (0..records.len()).collect();
    if sort {
        order.sort_by_key(|&i| {
            let record = &records[i];
            Reverse((record.padded_height(), record.padded_width()))
        });
    }
    order
}

/// Order in which records are written to descriptors.
///
/// A sorted run lists records by `key` (the source path) so the output
/// reads predictably; an unsorted run keeps input order.
pub fn descriptor_order<K, F>(records: &[RectangleRecord], sorted: bool, key: F) -> Vec<usize>
where
    K: Ord,
    F: Fn(&RectangleRecord) -> K,
{
    let mut order: Vec<usize> = (0..records.len()).collect();
    if sorted {
        order.sort_by_key(|&i| key(&records[i]));
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packing::tests::records;

    #[test]
    fn test_sort_by_height_descending() {
        let recs = records(&[(1, 5), (1, 1), (1, 3)], 0);

        assert_eq!(placement_order(&recs, true), vec![0, 2, 1]);
        assert_eq!(placement_order(&recs, false), vec![0, 1, 2]);
    }

    #[test]
    fn test_sort_breaks_height_ties_by_width() {
        let recs = records(&[(2, 4), (6, 4), (4, 4), (1, 8)], 1);

        assert_eq!(placement_order(&recs, true), vec![3, 1, 2, 0]);
    }

    #[test]
    fn test_sort_keeps_input_order_for_equal_boxes() {
        let recs = records(&[(3, 3), (3, 3), (5, 5), (3, 3)], 0);

        assert_eq!(placement_order(&recs, true), vec![2, 0, 1, 3]);
    }

    #[test]
    fn test_descriptor_order_restores_names() {
        let mut recs = records(&[(1, 1), (1, 1), (1, 1)], 0);
        recs[0].name = "c".to_string();
        recs[1].name = "a".to_string();
        recs[2].name = "b".to_string();

        let sorted = descriptor_order(&recs, true, |r| r.name.clone());
        assert_eq!(sorted, vec![1, 2, 0]);

        let unsorted = descriptor_order(&recs, false, |r| r.name.clone());
        assert_eq!(unsorted, vec![0, 1, 2]);
    }

    #[test]
    fn test_trim_records_counts_changes() {
        let mut recs = records(&[(4, 4), (4, 4), (4, 4)], 0);

        let trimmed = trim_records(&mut recs, |i| match i {
            0 => Some(Bounds::new(1, 1, 3, 3)),
            1 => Some(Bounds::new(0, 0, 4, 4)),
            _ => None,
        });

        assert_eq!(trimmed, 2);
        assert_eq!((recs[0].raw_width, recs[0].raw_height), (2, 2));
        assert!(!recs[1].trim.trimmed);
        // Fully transparent image keeps one pixel
        assert_eq!((recs[2].raw_width, recs[2].raw_height), (1, 1));
        assert_eq!(recs[2].trim.frame_width, 4);
    }
}
