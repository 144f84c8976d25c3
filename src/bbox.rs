//! Axis-aligned bounding boxes over point coordinates.
//!
//! A box is two corners, accumulated with running per-dimension min/max.
//! An empty box carries `+∞` mins and `−∞` maxes, so the first inserted
//! point always replaces them and no "first point" flag is needed.
//!
//! ```rust
//! use lineament::BoundingBox;
//!
//! let mut b = BoundingBox::empty(2);
//! b.add_point(&[0.0, 1.0]);
//! b.add_point(&[3.0, -3.0]);
//! assert_eq!(b.size(0), 3.0);
//! assert_eq!(b.diagonal(), 5.0);
//! ```

use crate::error::{Error, Result};
use crate::point::{PointSet, END_X, END_Y, START_X, START_Y};
use ndarray::ArrayView1;

/// Running min/max extent per dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    min: Vec<f64>,
    max: Vec<f64>,
}

impl BoundingBox {
    /// Empty box of the given dimension.
    pub fn empty(dim: usize) -> Self {
        Self {
            min: vec![f64::INFINITY; dim],
            max: vec![f64::NEG_INFINITY; dim],
        }
    }

    /// Degenerate box around one point.
    pub fn from_point(coords: &[f64]) -> Self {
        Self {
            min: coords.to_vec(),
            max: coords.to_vec(),
        }
    }

    /// Box covering every point of a set.
    pub fn from_points(points: &PointSet) -> Self {
        let mut b = Self::empty(points.dim());
        for p in points.iter() {
            b.add_view(p.coords);
        }
        b
    }

    /// Planar extent of a segment set.
    ///
    /// The x range covers both start and end x, the y range both start and
    /// end y, giving the real area the segments occupy.
    pub fn segment_extent(points: &PointSet) -> Result<Self> {
        if points.dim() <= END_Y {
            return Err(Error::DimensionMismatch {
                expected: END_Y + 1,
                found: points.dim(),
            });
        }
        let mut b = Self::empty(2);
        for p in points.iter() {
            b.add_point(&[p.coords[START_X], p.coords[START_Y]]);
            b.add_point(&[p.coords[END_X], p.coords[END_Y]]);
        }
        Ok(b)
    }

    #[inline]
    fn include(&mut self, i: usize, c: f64) {
        if c < self.min[i] {
            self.min[i] = c;
        }
        if c > self.max[i] {
            self.max[i] = c;
        }
    }

    /// Grow the box to contain a point of the same dimension.
    pub fn add_point(&mut self, coords: &[f64]) {
        debug_assert_eq!(coords.len(), self.dim(), "dimension mismatch");
        for (i, &c) in coords.iter().enumerate().take(self.dim()) {
            self.include(i, c);
        }
    }

    /// Grow the box to contain a coordinate row.
    pub fn add_view(&mut self, coords: ArrayView1<'_, f64>) {
        debug_assert_eq!(coords.len(), self.dim(), "dimension mismatch");
        for (i, &c) in coords.iter().enumerate().take(self.dim()) {
            self.include(i, c);
        }
    }

    /// Grow the box to contain another box.
    pub fn add_box(&mut self, other: &BoundingBox) {
        if other.is_empty() {
            return;
        }
        self.add_point(&other.min);
        self.add_point(&other.max);
    }

    /// Union of two boxes as a new box.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let mut out = Self::empty(self.dim());
        out.add_box(self);
        out.add_box(other);
        out
    }

    /// Number of dimensions.
    pub fn dim(&self) -> usize {
        self.min.len()
    }

    /// Whether no point has been inserted yet.
    pub fn is_empty(&self) -> bool {
        self.min.iter().zip(&self.max).any(|(lo, hi)| lo > hi)
    }

    /// Lower bound in dimension `i`.
    pub fn min(&self, i: usize) -> f64 {
        self.min[i]
    }

    /// Upper bound in dimension `i`.
    pub fn max(&self, i: usize) -> f64 {
        self.max[i]
    }

    /// Lower corner.
    pub fn min_corner(&self) -> &[f64] {
        &self.min
    }

    /// Upper corner.
    pub fn max_corner(&self) -> &[f64] {
        &self.max
    }

    /// Extent in dimension `i`. `−∞` on an empty box.
    pub fn size(&self, i: usize) -> f64 {
        self.max[i] - self.min[i]
    }

    /// Euclidean norm of the per-dimension sizes.
    pub fn diagonal(&self) -> f64 {
        (0..self.dim())
            .map(|i| self.size(i).powi(2))
            .sum::<f64>()
            .sqrt()
    }

    /// Diagonal with each size scaled by a coordinate weight.
    ///
    /// `None` is the same as [`diagonal`](Self::diagonal).
    pub fn weighted_diagonal(&self, weights: Option<&[f64]>) -> Result<f64> {
        let Some(w) = weights else {
            return Ok(self.diagonal());
        };
        if w.len() != self.dim() {
            return Err(Error::DimensionMismatch {
                expected: self.dim(),
                found: w.len(),
            });
        }
        Ok((0..self.dim())
            .map(|i| (self.size(i) * w[i]).powi(2))
            .sum::<f64>()
            .sqrt())
    }

    /// Diagonal over the first two dimensions only.
    pub fn planar_diagonal(&self) -> f64 {
        self.size(0).hypot(self.size(1))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::point::Segment;
    use proptest::prelude::*;

    #[test]
    fn empty_box_has_sentinel_extent() {
        let b = BoundingBox::empty(3);
        assert!(b.is_empty());
        assert_eq!(b.min(0), f64::INFINITY);
        assert_eq!(b.max(2), f64::NEG_INFINITY);
        assert_eq!(b.size(1), f64::NEG_INFINITY);
    }

    #[test]
    fn add_point_never_shrinks() {
        let mut b = BoundingBox::empty(2);
        b.add_point(&[1.0, 1.0]);
        assert!(!b.is_empty());
        assert_eq!(b.size(0), 0.0);

        b.add_point(&[-1.0, 4.0]);
        b.add_point(&[0.0, 2.0]);
        assert_eq!(b.min_corner(), &[-1.0, 1.0]);
        assert_eq!(b.max_corner(), &[1.0, 4.0]);
    }

    #[test]
    fn weighted_diagonal_scales_sizes() {
        let mut b = BoundingBox::from_point(&[0.0, 0.0]);
        b.add_point(&[3.0, 2.0]);
        let d = b.weighted_diagonal(Some(&[1.0, 2.0])).unwrap();
        assert!((d - 5.0).abs() < 1e-12);
        assert_eq!(b.weighted_diagonal(None).unwrap(), b.diagonal());
        assert!(b.weighted_diagonal(Some(&[1.0])).is_err());
    }

    #[test]
    fn segment_extent_merges_start_and_end() {
        let set = PointSet::from_segments(&[
            Segment::between("a", [0.0, 5.0], [10.0, 1.0]),
            Segment::between("b", [-2.0, 3.0], [4.0, 7.0]),
        ])
        .unwrap();
        let b = BoundingBox::segment_extent(&set).unwrap();
        assert_eq!(b.min_corner(), &[-2.0, 1.0]);
        assert_eq!(b.max_corner(), &[10.0, 7.0]);
        assert!((b.planar_diagonal() - 12.0f64.hypot(6.0)).abs() < 1e-12);
    }

    #[test]
    fn union_with_empty_is_identity() {
        let mut b = BoundingBox::empty(2);
        b.add_point(&[1.0, 2.0]);
        assert_eq!(b.union(&BoundingBox::empty(2)), b);
        assert_eq!(BoundingBox::empty(2).union(&b), b);
    }

    fn boxes(n: usize) -> impl Strategy<Value = Vec<Vec<[f64; 2]>>> {
        proptest::collection::vec(
            proptest::collection::vec([-1e3f64..1e3, -1e3f64..1e3], 1..6),
            n,
        )
    }

    fn build(points: &[[f64; 2]]) -> BoundingBox {
        let mut b = BoundingBox::empty(2);
        for p in points {
            b.add_point(p);
        }
        b
    }

    proptest! {
        #[test]
        fn union_is_commutative_and_associative(groups in boxes(3)) {
            let b1 = build(&groups[0]);
            let b2 = build(&groups[1]);
            let b3 = build(&groups[2]);

            let left = b1.union(&b2).union(&b3);
            let right = b1.union(&b2.union(&b3));
            let swapped = b3.union(&b1).union(&b2);
            prop_assert_eq!(&left, &right);
            prop_assert_eq!(&left, &swapped);

            let all: Vec<[f64; 2]> = groups.iter().flatten().copied().collect();
            prop_assert_eq!(&left, &build(&all));
        }
    }
}
