//! Bulk-loaded R*-tree over catalog metric positions.
//!
//! The tree is built once from the full point set with `RTree::bulk_load`
//! (an OMT packing, better balanced than repeated insertion) and only ever
//! queried afterward. Queries use `locate_in_envelope_intersecting`, so only
//! the subtrees whose envelopes touch the query box are visited:
//! O(log n + k) for k hits instead of a scan over every point.
//!
//! Points carry the catalog slot of their entry rather than the identifier
//! string, which keeps the tree compact and lets results map straight back
//! into the catalog.

use forage_types::bbox::MetricBBox;
use forage_types::point::MetricPoint;
use rstar::{AABB, Point as RstarPoint, RTree};

/// A catalog position stored in the R-tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedPoi {
    pub x: f64,
    pub y: f64,
    /// Position of the entry in its catalog.
    pub slot: usize,
}

impl IndexedPoi {
    pub fn new(slot: usize, point: MetricPoint) -> Self {
        Self {
            x: point.x(),
            y: point.y(),
            slot,
        }
    }

    fn corner(x: f64, y: f64) -> Self {
        Self { x, y, slot: 0 }
    }
}

impl RstarPoint for IndexedPoi {
    type Scalar = f64;
    const DIMENSIONS: usize = 2;

    fn generate(mut generator: impl FnMut(usize) -> Self::Scalar) -> Self {
        Self {
            x: generator(0),
            y: generator(1),
            slot: 0,
        }
    }

    fn nth(&self, index: usize) -> Self::Scalar {
        match index {
            0 => self.x,
            1 => self.y,
            _ => unreachable!(),
        }
    }

    fn nth_mut(&mut self, index: usize) -> &mut Self::Scalar {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => unreachable!(),
        }
    }
}

/// Immutable bounding-box index over metric points.
#[derive(Clone)]
pub struct SpatialIndex {
    tree: RTree<IndexedPoi>,
}

impl std::fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialIndex")
            .field("len", &self.len())
            .finish()
    }
}

impl SpatialIndex {
    /// Bulk-build the index from `(slot, position)` pairs.
    ///
    /// ```
    /// use forage::spatial_index::SpatialIndex;
    /// use forage_types::{MetricBBox, MetricPoint};
    ///
    /// let index = SpatialIndex::build([
    ///     (0, MetricPoint::new(0.0, 0.0)),
    ///     (1, MetricPoint::new(500.0, 500.0)),
    /// ]);
    /// let hits = index.query_bbox(&MetricBBox::new(-10.0, -10.0, 10.0, 10.0));
    /// assert_eq!(hits, vec![0]);
    /// ```
    pub fn build<I>(points: I) -> Self
    where
        I: IntoIterator<Item = (usize, MetricPoint)>,
    {
        let points: Vec<IndexedPoi> = points
            .into_iter()
            .map(|(slot, point)| IndexedPoi::new(slot, point))
            .collect();
        Self {
            tree: RTree::bulk_load(points),
        }
    }

    /// An index with no points. Every query on it is empty.
    pub fn empty() -> Self {
        Self { tree: RTree::new() }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Slots of every point inside the closed box.
    ///
    /// A box with a non-finite bound is rejected and yields no slots.
    pub fn query_bbox(&self, bbox: &MetricBBox) -> Vec<usize> {
        self.locate(bbox).map(|point| point.slot).collect()
    }

    /// Points inside the closed box, with their coordinates.
    pub fn locate<'a>(
        &'a self,
        bbox: &MetricBBox,
    ) -> Box<dyn Iterator<Item = &'a IndexedPoi> + 'a> {
        if !bbox.is_finite() {
            log::warn!("Rejecting bounding box query with non-finite coordinates");
            return Box::new(std::iter::empty());
        }

        let envelope = AABB::from_corners(
            IndexedPoi::corner(bbox.min_x(), bbox.min_y()),
            IndexedPoi::corner(bbox.max_x(), bbox.max_y()),
        );
        Box::new(self.tree.locate_in_envelope_intersecting(&envelope))
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(n: usize, spacing: f64) -> SpatialIndex {
        SpatialIndex::build((0..n * n).map(|i| {
            let x = (i % n) as f64 * spacing;
            let y = (i / n) as f64 * spacing;
            (i, MetricPoint::new(x, y))
        }))
    }

    fn sorted(mut slots: Vec<usize>) -> Vec<usize> {
        slots.sort_unstable();
        slots
    }

    #[test]
    fn test_empty_index() {
        let index = SpatialIndex::build(std::iter::empty());
        assert!(index.is_empty());
        assert!(
            index
                .query_bbox(&MetricBBox::new(-1e9, -1e9, 1e9, 1e9))
                .is_empty()
        );
        assert!(
            SpatialIndex::empty()
                .query_bbox(&MetricBBox::new(0.0, 0.0, 1.0, 1.0))
                .is_empty()
        );
    }

    #[test]
    fn test_box_is_closed() {
        let index = grid(3, 10.0);
        // Box edges sit exactly on grid lines.
        let hits = sorted(index.query_bbox(&MetricBBox::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(hits, vec![0, 1, 3, 4]);
    }

    #[test]
    fn test_inverted_bounds_are_normalised() {
        let index = grid(3, 10.0);
        let forward = sorted(index.query_bbox(&MetricBBox::new(5.0, 5.0, 25.0, 25.0)));
        let inverted = sorted(index.query_bbox(&MetricBBox::new(25.0, 25.0, 5.0, 5.0)));
        assert_eq!(forward, vec![4, 5, 7, 8]);
        assert_eq!(forward, inverted);
    }

    #[test]
    fn test_non_finite_box_rejected() {
        let index = grid(3, 10.0);
        assert!(
            index
                .query_bbox(&MetricBBox::new(f64::NEG_INFINITY, 0.0, 10.0, 10.0))
                .is_empty()
        );
        assert!(
            index
                .query_bbox(&MetricBBox::new(0.0, f64::INFINITY, 10.0, 10.0))
                .is_empty()
        );
    }

    #[test]
    fn test_matches_linear_scan() {
        let n = 40;
        let index = grid(n, 7.5);
        assert_eq!(index.len(), n * n);

        let boxes = [
            MetricBBox::new(0.0, 0.0, 0.0, 0.0),
            MetricBBox::new(-100.0, -100.0, 12.0, 300.0),
            MetricBBox::new(33.3, 44.4, 155.5, 166.6),
            MetricBBox::new(290.0, 290.0, 1000.0, 1000.0),
        ];
        for bbox in boxes {
            let expected: Vec<usize> = (0..n * n)
                .filter(|&i| {
                    let p = MetricPoint::new((i % n) as f64 * 7.5, (i / n) as f64 * 7.5);
                    bbox.contains(&p)
                })
                .collect();
            assert_eq!(sorted(index.query_bbox(&bbox)), expected, "box {bbox:?}");
        }
    }

    #[test]
    fn test_duplicate_positions_are_all_returned() {
        let p = MetricPoint::new(1.0, 1.0);
        let index = SpatialIndex::build([(0, p), (1, p), (2, p)]);
        assert_eq!(
            sorted(index.query_bbox(&MetricBBox::around(p, 0.0))),
            vec![0, 1, 2]
        );
    }
}
