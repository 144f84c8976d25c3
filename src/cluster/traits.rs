//! Clustering traits.

use crate::error::Result;
use crate::point::PointSet;

/// Trait for hard clustering algorithms over a [`PointSet`].
pub trait Clustering {
    /// Fit the model to the points and return cluster assignments.
    ///
    /// Returns a vector of cluster labels, one per input point.
    fn fit_predict(&self, points: &PointSet) -> Result<Vec<usize>>;

    /// Get the number of clusters.
    ///
    /// Algorithms that discover the number of clusters return 0.
    fn n_clusters(&self) -> usize;
}
