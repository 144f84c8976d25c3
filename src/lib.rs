//! # lineament
//!
//! Groups short line segments (fault traces, fractures, linear features
//! picked from imagery) into **lineaments** by facility-location clustering
//! under a directional buffer-zone metric.
//!
//! A segment can only join a cluster whose representative points the same
//! way (within an azimuth tolerance) and whose buffer rectangle contains
//! both of its endpoints. Among feasible assignments the algorithm trades
//! the number of clusters against the distance of members to their
//! representative.
//!
//! The library is split into point storage ([`point`], [`bbox`]), the
//! comparison between segments ([`metric`]), the clustering engine
//! ([`cluster`]), and file handling ([`io`], [`config`]). The `cli` feature
//! (on by default) builds the `lineament` binary.

pub mod bbox;
pub mod cluster;
pub mod config;
/// Error types used across `lineament`.
pub mod error;
pub mod io;
pub mod metric;
pub mod point;
pub mod stats;

pub use bbox::BoundingBox;
pub use cluster::{Clustering, Facility, FacilityLocation, OpeningCost, Solution, VisitOrder};
pub use config::{RunConfig, RunSummary};
pub use error::{Error, Result};
pub use io::CoordSystem;
pub use metric::{BufferConfig, LineBufferMetric, Metric, Reach, WeightedEuclidean, WeightedManhattan};
pub use point::{PointRef, PointSet, PointState, Segment};
pub use stats::{ClusterStatistics, GeoStatistics};
