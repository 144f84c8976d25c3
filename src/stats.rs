//! Cluster statistics for reporting.
//!
//! Distances here are planar (start point to start point), independent of
//! the metric used for clustering, so clusters from different runs compare
//! on the same scale.

use crate::bbox::BoundingBox;
use crate::cluster::{Facility, Solution};
use crate::metric::planar_distance;
use crate::point::PointSet;

/// Summary of one facility's members.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterStatistics {
    /// Representative point.
    pub representative: usize,
    /// Number of members (representative excluded).
    pub members: usize,
    /// Largest planar distance from the representative to a member.
    pub max_distance: f64,
    /// Member at `max_distance`.
    pub farthest: Option<usize>,
    /// Per-coordinate range over the members. Empty without members.
    pub extent: BoundingBox,
}

impl ClusterStatistics {
    /// Statistics of `facility` over `points`.
    pub fn of(points: &PointSet, facility: &Facility) -> Self {
        let rep = points.get(facility.representative());
        let mut stats = Self {
            representative: facility.representative(),
            members: facility.len(),
            max_distance: 0.0,
            farthest: None,
            extent: BoundingBox::empty(points.dim()),
        };
        for &m in facility.members() {
            let member = points.get(m);
            let d = planar_distance(rep, member);
            if stats.farthest.is_none() || d > stats.max_distance {
                stats.max_distance = d;
                stats.farthest = Some(m);
            }
            stats.extent.add_view(member.coords);
        }
        stats
    }
}

/// Statistics aggregated over every facility.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoStatistics {
    /// Number of facilities.
    pub clusters: usize,
    /// Members over all facilities.
    pub members: usize,
    /// Largest planar member distance of any facility.
    pub max_distance: f64,
    /// Member at `max_distance`.
    pub farthest: Option<usize>,
    /// Per-coordinate range over all members.
    pub extent: BoundingBox,
}

impl GeoStatistics {
    /// Aggregate statistics of `facilities` over `points`.
    pub fn of(points: &PointSet, facilities: &[Facility]) -> Self {
        let mut geo = Self {
            clusters: facilities.len(),
            members: 0,
            max_distance: 0.0,
            farthest: None,
            extent: BoundingBox::empty(points.dim()),
        };
        for fac in facilities {
            let s = ClusterStatistics::of(points, fac);
            geo.members += s.members;
            if s.farthest.is_some() && (geo.farthest.is_none() || s.max_distance > geo.max_distance) {
                geo.max_distance = s.max_distance;
                geo.farthest = s.farthest;
            }
            geo.extent.add_box(&s.extent);
        }
        geo
    }
}

impl Solution {
    /// Per-facility statistics, in facility order.
    pub fn statistics(&self, points: &PointSet) -> Vec<ClusterStatistics> {
        self.facilities()
            .iter()
            .map(|f| ClusterStatistics::of(points, f))
            .collect()
    }

    /// Statistics over the whole solution.
    pub fn geo_statistics(&self, points: &PointSet) -> GeoStatistics {
        GeoStatistics::of(points, self.facilities())
    }
}
