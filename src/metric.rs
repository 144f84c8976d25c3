//! Metrics comparing two points.
//!
//! A [`Metric`] answers "how far is `candidate` from `reference`, if it is
//! comparable at all". The answer is a [`Reach`]: either a finite distance
//! or [`Reach::Unreachable`]. Unreachable pairs never turn into an infinite
//! float, so no caller can accidentally add or compare one.
//!
//! # The directional line-buffer metric
//!
//! [`LineBufferMetric`] compares line segments. The reference segment A
//! spans a rotated rectangle (its buffer zone):
//!
//! ```text
//!            across
//!      ┌───────────────────┐
//!      │                   │
//! along│  s ───────────> e │along
//!      │                   │
//!      └───────────────────┘
//!            across
//! ```
//!
//! Candidate B is reachable only if
//!
//! 1. its azimuth lies within `±azimuth` of A's, on a 180°-periodic scale
//!    (segments have no forward/backward sense), and
//! 2. both of its endpoints lie inside A's rectangle.
//!
//! Reachable pairs get the weighted Euclidean distance over all coordinates,
//! scaled by A's weight:
//!
//! ```text
//! d(A, B) = weight(A) · sqrt( Σᵢ (wᵢ · (Bᵢ − Aᵢ))² )
//! ```
//!
//! The metric is **not symmetric**: a long A can contain a short B whose own
//! buffer is too short to contain A.

use crate::error::{Error, Result};
use crate::point::{PointRef, LINE_DIM};
use ndarray::ArrayView1;

/// Segments shorter than this have no usable direction.
const DEGENERATE_LENGTH: f64 = 1e-12;

/// Relative tolerance of the buffer-rectangle projections.
const PROJECTION_EPS: f64 = 1e-9;

/// Outcome of comparing two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reach {
    /// Comparable, at this (finite) distance.
    Within(f64),
    /// Not comparable.
    Unreachable,
}

impl Reach {
    /// The distance, if reachable.
    #[inline]
    pub fn distance(self) -> Option<f64> {
        match self {
            Reach::Within(d) => Some(d),
            Reach::Unreachable => None,
        }
    }

    /// Whether the pair is comparable.
    #[inline]
    pub fn is_reachable(self) -> bool {
        matches!(self, Reach::Within(_))
    }
}

/// A pluggable, possibly asymmetric, comparison between points.
pub trait Metric {
    /// Compare `candidate` against `reference`.
    fn reach(&self, reference: PointRef<'_>, candidate: PointRef<'_>) -> Reach;

    /// Reject point dimensions this metric cannot work with.
    fn check_dimension(&self, _dim: usize) -> Result<()> {
        Ok(())
    }

    /// Per-coordinate weights, if any.
    fn coord_weights(&self) -> Option<&[f64]> {
        None
    }
}

impl<M: Metric + ?Sized> Metric for &M {
    fn reach(&self, reference: PointRef<'_>, candidate: PointRef<'_>) -> Reach {
        (**self).reach(reference, candidate)
    }

    fn check_dimension(&self, dim: usize) -> Result<()> {
        (**self).check_dimension(dim)
    }

    fn coord_weights(&self) -> Option<&[f64]> {
        (**self).coord_weights()
    }
}

/// Euclidean distance with optional per-coordinate weights.
#[inline]
pub fn weighted_euclidean(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>, w: Option<&[f64]>) -> f64 {
    match w {
        None => a
            .iter()
            .zip(b.iter())
            .map(|(x, y)| (y - x).powi(2))
            .sum::<f64>()
            .sqrt(),
        Some(w) => a
            .iter()
            .zip(b.iter())
            .zip(w)
            .map(|((x, y), wi)| ((y - x) * wi).powi(2))
            .sum::<f64>()
            .sqrt(),
    }
}

/// Distance between the start points of two segments.
pub fn planar_distance(a: PointRef<'_>, b: PointRef<'_>) -> f64 {
    let [ax, ay] = a.start();
    let [bx, by] = b.start();
    (bx - ax).hypot(by - ay)
}

/// Whether two azimuths (degrees) differ by at most `tolerance` modulo 180.
#[inline]
pub fn azimuth_within(a: f64, b: f64, tolerance: f64) -> bool {
    let diff = (a - b).rem_euclid(180.0);
    diff.min(180.0 - diff) <= tolerance
}

fn check_weights(weights: Option<&[f64]>, dim: usize) -> Result<()> {
    let Some(w) = weights else {
        return Ok(());
    };
    if w.len() != dim {
        return Err(Error::DimensionMismatch {
            expected: dim,
            found: w.len(),
        });
    }
    if w.iter().any(|x| !x.is_finite() || *x < 0.0) {
        return Err(Error::InvalidParameter {
            name: "coord_weights",
            message: "weights must be finite and non-negative",
        });
    }
    Ok(())
}

/// Tolerances of the directional buffer zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferConfig {
    /// Along-track extension beyond each end of the reference segment.
    pub along: f64,
    /// Cross-track half-width.
    pub across: f64,
    /// Azimuth half-window, in degrees.
    pub azimuth: f64,
    /// Lower bound of the length-relative along-track extension.
    pub min_along: f64,
    /// Along-track extension as a percentage of the reference length.
    /// Zero disables the relative extension.
    pub along_percent: f64,
}

impl BufferConfig {
    /// Create absolute tolerances.
    pub fn new(along: f64, across: f64, azimuth: f64) -> Self {
        Self {
            along,
            across,
            azimuth,
            min_along: 0.0,
            along_percent: 0.0,
        }
    }

    /// Extend the along-track tolerance with a share of the reference length.
    ///
    /// The effective extension becomes
    /// `max(along, min_along, length * percent / 100)`.
    pub fn with_relative_along(mut self, min_along: f64, percent: f64) -> Self {
        self.min_along = min_along;
        self.along_percent = percent;
        self
    }

    /// Effective along-track extension for a reference of `length`.
    #[inline]
    pub fn along_for(&self, length: f64) -> f64 {
        if self.along_percent > 0.0 {
            self.along
                .max(self.min_along)
                .max(length * self.along_percent / 100.0)
        } else {
            self.along
        }
    }

    /// Check every tolerance.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("along", self.along),
            ("across", self.across),
            ("azimuth", self.azimuth),
            ("min_along", self.min_along),
            ("along_percent", self.along_percent),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidParameter {
                    name,
                    message: "must be finite and non-negative",
                });
            }
        }
        Ok(())
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

/// Directional buffer-zone metric for line segments.
#[derive(Debug, Clone, PartialEq)]
pub struct LineBufferMetric {
    buffer: BufferConfig,
    weights: Option<Vec<f64>>,
}

impl LineBufferMetric {
    /// Create the metric with the given tolerances and no coordinate weights.
    pub fn new(buffer: BufferConfig) -> Self {
        Self {
            buffer,
            weights: None,
        }
    }

    /// Weight each coordinate in the distance.
    pub fn with_coord_weights(mut self, weights: Vec<f64>) -> Self {
        self.weights = Some(weights);
        self
    }

    /// The buffer tolerances.
    pub fn buffer(&self) -> &BufferConfig {
        &self.buffer
    }

    /// Whether both endpoints of `candidate` lie in `reference`'s buffer.
    ///
    /// A zero-length reference has no direction. It contains only candidates
    /// whose endpoints both coincide with its start point.
    pub fn in_buffer(&self, reference: PointRef<'_>, candidate: PointRef<'_>) -> bool {
        let [sx, sy] = reference.start();
        let [ex, ey] = reference.end();
        let (dx, dy) = (ex - sx, ey - sy);
        let len = dx.hypot(dy);

        let endpoints = [candidate.start(), candidate.end()];

        if len <= DEGENERATE_LENGTH {
            return endpoints.iter().all(|[px, py]| {
                (px - sx).abs() <= DEGENERATE_LENGTH && (py - sy).abs() <= DEGENERATE_LENGTH
            });
        }

        let (ux, uy) = (dx / len, dy / len);
        let along = self.buffer.along_for(len);
        let across = self.buffer.across;
        // rounding slack, so a segment always lies in its own zero-width buffer
        let eps = PROJECTION_EPS * len.max(1.0);

        endpoints.iter().all(|[px, py]| {
            let rx = px - sx;
            let ry = py - sy;
            // projection on the direction, then on the left normal (-uy, ux)
            let t = rx * ux + ry * uy;
            let s = -rx * uy + ry * ux;
            t >= -along - eps && t <= len + along + eps && s.abs() <= across + eps
        })
    }
}

impl Metric for LineBufferMetric {
    fn reach(&self, reference: PointRef<'_>, candidate: PointRef<'_>) -> Reach {
        if !azimuth_within(reference.azimuth(), candidate.azimuth(), self.buffer.azimuth) {
            return Reach::Unreachable;
        }
        if !self.in_buffer(reference, candidate) {
            return Reach::Unreachable;
        }
        let d = weighted_euclidean(reference.coords, candidate.coords, self.weights.as_deref());
        Reach::Within(reference.weight * d)
    }

    fn check_dimension(&self, dim: usize) -> Result<()> {
        self.buffer.validate()?;
        if dim < LINE_DIM {
            return Err(Error::DimensionMismatch {
                expected: LINE_DIM,
                found: dim,
            });
        }
        check_weights(self.weights.as_deref(), dim)
    }

    fn coord_weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }
}

/// Weighted Euclidean distance; every pair is reachable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightedEuclidean {
    weights: Option<Vec<f64>>,
}

impl WeightedEuclidean {
    /// Unweighted coordinates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Weight each coordinate in the distance.
    pub fn with_coord_weights(mut self, weights: Vec<f64>) -> Self {
        self.weights = Some(weights);
        self
    }
}

impl Metric for WeightedEuclidean {
    fn reach(&self, reference: PointRef<'_>, candidate: PointRef<'_>) -> Reach {
        let d = weighted_euclidean(reference.coords, candidate.coords, self.weights.as_deref());
        Reach::Within(reference.weight * d)
    }

    fn check_dimension(&self, dim: usize) -> Result<()> {
        check_weights(self.weights.as_deref(), dim)
    }

    fn coord_weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }
}

/// Weighted Manhattan distance; every pair is reachable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightedManhattan {
    weights: Option<Vec<f64>>,
}

impl WeightedManhattan {
    /// Unweighted coordinates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Weight each coordinate in the distance.
    pub fn with_coord_weights(mut self, weights: Vec<f64>) -> Self {
        self.weights = Some(weights);
        self
    }
}

impl Metric for WeightedManhattan {
    fn reach(&self, reference: PointRef<'_>, candidate: PointRef<'_>) -> Reach {
        let a = reference.coords;
        let b = candidate.coords;
        let d: f64 = match self.weights.as_deref() {
            None => a.iter().zip(b.iter()).map(|(x, y)| (y - x).abs()).sum(),
            Some(w) => a
                .iter()
                .zip(b.iter())
                .zip(w)
                .map(|((x, y), wi)| (y - x).abs() * wi)
                .sum(),
        };
        Reach::Within(reference.weight * d)
    }

    fn check_dimension(&self, dim: usize) -> Result<()> {
        check_weights(self.weights.as_deref(), dim)
    }

    fn coord_weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }
}
