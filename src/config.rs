//! Run configuration.
//!
//! [`RunConfig`] holds everything one clustering run needs: where to read
//! and write, the buffer tolerances, and the cost model. It is built once,
//! validated, then turned into a metric and an engine.
//!
//! ```rust,no_run
//! use lineament::{config, BufferConfig, OpeningCost, RunConfig};
//!
//! let cfg = RunConfig::new("faults.csv", "faults_clusters.csv", BufferConfig::new(50.0, 10.0, 5.0))
//!     .with_opening_cost(OpeningCost::Absolute(500.0))
//!     .with_size_filter(3);
//! let summary = config::run(&cfg)?;
//! println!("{} clusters", summary.clusters_written);
//! # Ok::<(), lineament::Error>(())
//! ```

use crate::cluster::{FacilityLocation, OpeningCost, VisitOrder};
use crate::error::{Error, Result};
use crate::io::{load_segments, save_report, CoordSystem, ReportOptions};
use crate::metric::{BufferConfig, LineBufferMetric, Metric};
use crate::point::LINE_DIM;
use std::path::PathBuf;

/// Parameters of one clustering run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Segment file to read.
    pub input: PathBuf,
    /// Report file to write.
    pub output: PathBuf,
    /// Buffer-zone tolerances.
    pub buffer: BufferConfig,
    /// Cost of opening a facility.
    pub opening_cost: OpeningCost,
    /// Per-coordinate distance weights; `None` weighs all coordinates 1.
    pub coord_weights: Option<Vec<f64>>,
    /// Minimum reported cluster size; 0 reports all.
    pub size_filter: usize,
    /// Frame of the input and output files.
    pub coord_system: CoordSystem,
    /// Maximum refinement passes.
    pub refinement_passes: usize,
    /// Shuffle seed for the greedy pass; `None` keeps input order.
    pub seed: Option<u64>,
}

impl RunConfig {
    /// Configuration with default cost model and reporting.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, buffer: BufferConfig) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            buffer,
            opening_cost: OpeningCost::default(),
            coord_weights: None,
            size_filter: 0,
            coord_system: CoordSystem::default(),
            refinement_passes: 2,
            seed: None,
        }
    }

    /// Set the opening cost.
    pub fn with_opening_cost(mut self, opening_cost: OpeningCost) -> Self {
        self.opening_cost = opening_cost;
        self
    }

    /// Set per-coordinate distance weights.
    pub fn with_coord_weights(mut self, weights: Vec<f64>) -> Self {
        self.coord_weights = Some(weights);
        self
    }

    /// Set the minimum reported cluster size.
    pub fn with_size_filter(mut self, size_filter: usize) -> Self {
        self.size_filter = size_filter;
        self
    }

    /// Set the file coordinate frame.
    pub fn with_coord_system(mut self, coord_system: CoordSystem) -> Self {
        self.coord_system = coord_system;
        self
    }

    /// Set the maximum number of refinement passes.
    pub fn with_refinement_passes(mut self, passes: usize) -> Self {
        self.refinement_passes = passes;
        self
    }

    /// Shuffle the greedy pass with `seed`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the parameters that do not depend on the data.
    pub fn validate(&self) -> Result<()> {
        self.metric().check_dimension(LINE_DIM)?;
        match self.opening_cost {
            OpeningCost::Absolute(c) | OpeningCost::DiagonalFraction(c)
                if !c.is_finite() || c < 0.0 =>
            {
                Err(Error::InvalidParameter {
                    name: "opening_cost",
                    message: "must be finite and non-negative",
                })
            }
            _ => Ok(()),
        }
    }

    /// The line metric described by this configuration.
    pub fn metric(&self) -> LineBufferMetric {
        let metric = LineBufferMetric::new(self.buffer);
        match &self.coord_weights {
            Some(w) => metric.with_coord_weights(w.clone()),
            None => metric,
        }
    }

    /// The clustering engine described by this configuration.
    pub fn engine(&self) -> FacilityLocation {
        let order = self.seed.map_or(VisitOrder::Input, VisitOrder::Shuffled);
        FacilityLocation::new(self.metric())
            .with_opening_cost(self.opening_cost)
            .with_refinement_passes(self.refinement_passes)
            .with_order(order)
    }

    /// Report options described by this configuration.
    pub fn report_options(&self) -> ReportOptions {
        ReportOptions::default()
            .with_size_filter(self.size_filter)
            .with_coord_system(self.coord_system)
    }
}

/// Counts from a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Segments loaded.
    pub points: usize,
    /// Facilities opened.
    pub facilities: usize,
    /// Clusters that passed the size filter.
    pub clusters_written: usize,
}

/// Load, cluster, and report.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    config.validate()?;
    let (mut points, bounds) = load_segments(&config.input, config.coord_system)?;
    let solution = config.engine().compute_clustering(&mut points, &bounds)?;
    let clusters_written = save_report(&config.output, &points, &solution, &config.report_options())?;
    Ok(RunSummary {
        points: points.len(),
        facilities: solution.len(),
        clusters_written,
    })
}
