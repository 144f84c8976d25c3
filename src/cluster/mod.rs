//! Facility-location clustering of points and line segments.
//!
//! ## Facilities
//!
//! A **facility** is a point chosen to represent a group. Every other point
//! is served by exactly one facility, at the cost the [`Metric`] reports
//! between the facility's representative and the point. Opening a facility
//! has a fixed price (the "cluster size"), so the algorithm balances the
//! number of groups against how far points are from their representative.
//!
//! ```text
//! cost = f · |F| + Σₚ d(F(p), p)
//! ```
//!
//! ## Feasibility
//!
//! Unlike k-means, the metric may refuse a pair outright
//! ([`Reach::Unreachable`]). For line segments this is the directional
//! buffer zone: a segment can only be served by a representative whose
//! azimuth and buffer rectangle admit it. Assignments never violate it.
//!
//! ## Usage
//!
//! ```rust
//! use lineament::cluster::{FacilityLocation, OpeningCost};
//! use lineament::{BoundingBox, BufferConfig, LineBufferMetric, PointSet, Segment};
//!
//! let mut points = PointSet::from_segments(&[
//!     Segment::between("a", [0.0, 0.0], [10.0, 0.0]),
//!     Segment::between("b", [12.0, 0.5], [22.0, 0.5]),
//!     Segment::between("c", [5.0, -5.0], [5.0, 5.0]),
//! ])
//! .unwrap();
//! let bounds = BoundingBox::from_points(&points);
//!
//! let engine = FacilityLocation::new(LineBufferMetric::new(BufferConfig::new(15.0, 2.0, 10.0)))
//!     .with_opening_cost(OpeningCost::Absolute(100.0));
//! let solution = engine.compute_clustering(&mut points, &bounds).unwrap();
//!
//! let labels = solution.labels();
//! assert_eq!(labels[0], labels[1]); // collinear, within the buffer
//! assert_ne!(labels[0], labels[2]); // perpendicular
//! ```
//!
//! [`Metric`]: crate::metric::Metric
//! [`Reach::Unreachable`]: crate::metric::Reach::Unreachable

mod facility;
mod facility_location;
mod traits;

pub use facility::Facility;
pub use facility_location::{FacilityLocation, OpeningCost, Solution, VisitOrder};
pub use traits::Clustering;
