//! Point storage for clustering.
//!
//! A [`PointSet`] is the global vertex array every other component indexes
//! into. Coordinates are immutable once pushed and live in one row-major
//! `ndarray::Array2<f64>`; per-point assignment state ([`PointState`]) lives
//! next to it and is rewritten by the facility-location engine.
//!
//! # Line-segment layout
//!
//! Line data uses the first [`LINE_DIM`] coordinates:
//!
//! ```text
//! [ start_x, start_y, end_x, end_y, azimuth, length, ...extra ]
//! ```
//!
//! Extra trailing coordinates are allowed; they take part in distances but
//! not in the buffer-zone test.

use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView1};

/// Index of the start-point x coordinate.
pub const START_X: usize = 0;
/// Index of the start-point y coordinate.
pub const START_Y: usize = 1;
/// Index of the end-point x coordinate.
pub const END_X: usize = 2;
/// Index of the end-point y coordinate.
pub const END_Y: usize = 3;
/// Index of the azimuth, in degrees.
pub const AZIMUTH: usize = 4;
/// Index of the segment length.
pub const LENGTH: usize = 5;
/// Number of coordinates a line segment occupies.
pub const LINE_DIM: usize = 6;

/// A line segment observation before it is placed into a [`PointSet`].
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Identifier carried through to reports.
    pub id: String,
    /// Start point `(x, y)`.
    pub start: [f64; 2],
    /// End point `(x, y)`.
    pub end: [f64; 2],
    /// Azimuth in degrees. Only its value modulo 180 matters.
    pub azimuth: f64,
    /// Segment length as reported by the source data.
    pub length: f64,
}

impl Segment {
    /// Create a segment with explicit azimuth and length.
    pub fn new(
        id: impl Into<String>,
        start: [f64; 2],
        end: [f64; 2],
        azimuth: f64,
        length: f64,
    ) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            azimuth,
            length,
        }
    }

    /// Create a segment deriving azimuth and length from its endpoints.
    ///
    /// The azimuth is the direction angle of `end - start` measured in the
    /// frame of the coordinates, folded into `[0, 180)`.
    pub fn between(id: impl Into<String>, start: [f64; 2], end: [f64; 2]) -> Self {
        let dx = end[0] - start[0];
        let dy = end[1] - start[1];
        let azimuth = dy.atan2(dx).to_degrees().rem_euclid(180.0);
        Self::new(id, start, end, azimuth, dx.hypot(dy))
    }

    /// Coordinates in the [`LINE_DIM`] layout.
    pub fn to_coords(&self) -> [f64; LINE_DIM] {
        [
            self.start[0],
            self.start[1],
            self.end[0],
            self.end[1],
            self.azimuth,
            self.length,
        ]
    }
}

/// Mutable per-point clustering state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointState {
    /// Contribution scale of this point. Defaults to 1.
    pub weight: f64,
    /// Representative index of the facility this point belongs to.
    pub facility: Option<usize>,
    /// Whether this point is an open facility's representative.
    pub is_facility: bool,
    /// Cached metric distance to the facility. Valid only while
    /// `facility` is set; 0 for representatives.
    pub weighted_distance: f64,
}

impl Default for PointState {
    fn default() -> Self {
        Self {
            weight: 1.0,
            facility: None,
            is_facility: false,
            weighted_distance: 0.0,
        }
    }
}

impl PointState {
    /// Cached distance with this point's own weight divided out.
    ///
    /// A zero weight returns the weighted distance unchanged.
    pub fn non_weighted_distance(&self) -> f64 {
        if self.weight > 0.0 {
            self.weighted_distance / self.weight
        } else {
            self.weighted_distance
        }
    }
}

/// Borrowed view of one point: coordinates plus weight.
#[derive(Debug, Clone, Copy)]
pub struct PointRef<'a> {
    /// Index into the owning [`PointSet`].
    pub index: usize,
    /// Coordinate row.
    pub coords: ArrayView1<'a, f64>,
    /// Point weight.
    pub weight: f64,
}

impl PointRef<'_> {
    /// Number of coordinates.
    pub fn dim(&self) -> usize {
        self.coords.len()
    }

    /// Start point of a line segment.
    #[inline]
    pub fn start(&self) -> [f64; 2] {
        [self.coords[START_X], self.coords[START_Y]]
    }

    /// End point of a line segment.
    #[inline]
    pub fn end(&self) -> [f64; 2] {
        [self.coords[END_X], self.coords[END_Y]]
    }

    /// Azimuth of a line segment, in degrees.
    #[inline]
    pub fn azimuth(&self) -> f64 {
        self.coords[AZIMUTH]
    }

    /// Length stored in the length field.
    #[inline]
    pub fn length(&self) -> f64 {
        self.coords[LENGTH]
    }
}

/// The global array of points being clustered.
#[derive(Debug, Clone)]
pub struct PointSet {
    coords: Array2<f64>,
    ids: Vec<String>,
    states: Vec<PointState>,
}

impl PointSet {
    /// Create an empty set of `dim`-dimensional points.
    pub fn with_dim(dim: usize) -> Self {
        Self {
            coords: Array2::zeros((0, dim)),
            ids: Vec::new(),
            states: Vec::new(),
        }
    }

    /// Build from coordinate rows. Ids default to the row index.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let first = rows.first().ok_or(Error::EmptyInput)?;
        let mut set = Self::with_dim(first.len());
        for (i, row) in rows.iter().enumerate() {
            let _ = set.push(i.to_string(), row)?;
        }
        Ok(set)
    }

    /// Build from line segments.
    pub fn from_segments(segments: &[Segment]) -> Result<Self> {
        if segments.is_empty() {
            return Err(Error::EmptyInput);
        }
        let mut set = Self::with_dim(LINE_DIM);
        for seg in segments {
            let _ = set.push(seg.id.clone(), &seg.to_coords())?;
        }
        Ok(set)
    }

    /// Append a point and return its index.
    pub fn push(&mut self, id: impl Into<String>, coords: &[f64]) -> Result<usize> {
        let index = self.len();
        if coords.len() != self.dim() {
            return Err(Error::DimensionMismatch {
                expected: self.dim(),
                found: coords.len(),
            });
        }
        if let Some(pos) = coords.iter().position(|c| !c.is_finite()) {
            return Err(Error::InvalidInput {
                index,
                message: format!("coordinate {pos} is not finite"),
            });
        }
        self.coords
            .push_row(ArrayView1::from(coords))
            .map_err(|e| Error::Other(e.to_string()))?;
        self.ids.push(id.into());
        self.states.push(PointState::default());
        Ok(index)
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the set has no points.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Coordinate dimension shared by every point.
    pub fn dim(&self) -> usize {
        self.coords.ncols()
    }

    /// View of point `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn get(&self, index: usize) -> PointRef<'_> {
        PointRef {
            index,
            coords: self.coords.row(index),
            weight: self.states[index].weight,
        }
    }

    /// Coordinates of point `index`.
    pub fn coords(&self, index: usize) -> ArrayView1<'_, f64> {
        self.coords.row(index)
    }

    /// Identifier of point `index`.
    pub fn id(&self, index: usize) -> &str {
        &self.ids[index]
    }

    /// Clustering state of point `index`.
    pub fn state(&self, index: usize) -> &PointState {
        &self.states[index]
    }

    /// All point states, in index order.
    pub fn states(&self) -> &[PointState] {
        &self.states
    }

    /// Iterate over all points.
    pub fn iter(&self) -> impl Iterator<Item = PointRef<'_>> + '_ {
        (0..self.len()).map(move |i| self.get(i))
    }

    /// Set the weight of point `index`.
    pub fn set_weight(&mut self, index: usize, weight: f64) -> Result<()> {
        if index >= self.len() {
            return Err(Error::InvalidInput {
                index,
                message: format!("no such point (set has {})", self.len()),
            });
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::InvalidParameter {
                name: "weight",
                message: "must be finite and non-negative",
            });
        }
        self.states[index].weight = weight;
        Ok(())
    }

    /// Clear every assignment, keeping weights.
    pub fn reset_assignments(&mut self) {
        for state in &mut self.states {
            *state = PointState {
                weight: state.weight,
                ..PointState::default()
            };
        }
    }

    /// Make `index` the representative of its own facility.
    pub(crate) fn open_at(&mut self, index: usize) {
        let state = &mut self.states[index];
        state.facility = Some(index);
        state.is_facility = true;
        state.weighted_distance = 0.0;
    }

    /// Assign `index` to the facility represented by `facility`.
    pub(crate) fn assign(&mut self, index: usize, facility: usize, weighted_distance: f64) {
        let state = &mut self.states[index];
        state.facility = Some(facility);
        state.is_facility = false;
        state.weighted_distance = weighted_distance;
    }

    /// Detach `index` from its facility, keeping its weight.
    pub(crate) fn unassign(&mut self, index: usize) {
        let state = &mut self.states[index];
        state.facility = None;
        state.is_facility = false;
        state.weighted_distance = 0.0;
    }
}
