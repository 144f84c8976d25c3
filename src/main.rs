//! Lineament extraction from line segments.
//!
//! Usage:
//!     lineament faults.csv 50 10 5 faults_clusters.csv
//!     lineament faults.csv 50 10 5 out.csv --cluster-size 400 --size-filter 3
//!     lineament picks.txt 20 5 8 out.csv --mathematical --along-percent 25 -v

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use lineament::config::{self, RunConfig};
use lineament::{BufferConfig, CoordSystem, OpeningCost};

/// Cluster line segments into lineaments
#[derive(Parser, Debug)]
#[command(name = "lineament")]
#[command(version)]
#[command(about = "Facility-location clustering of line segments", long_about = None)]
struct Cli {
    /// Segment file (ID;A.X;A.Y;B.X;B.Y;AZ;LEN)
    input: PathBuf,

    /// Along-track buffer extension beyond each segment end
    buffer_x: f64,

    /// Cross-track buffer half-width
    buffer_y: f64,

    /// Azimuth tolerance in degrees (90 or more disables the gate)
    buffer_azimuth: f64,

    /// Report file
    output: PathBuf,

    /// Absolute facility opening cost
    #[arg(long, conflicts_with = "cluster_fraction")]
    cluster_size: Option<f64>,

    /// Opening cost as a fraction of the weighted bounding-box diagonal
    #[arg(long, default_value = "0.1")]
    cluster_fraction: f64,

    /// Only report clusters with at least this many segments (0 = all)
    #[arg(long, default_value = "0")]
    size_filter: usize,

    /// Per-coordinate distance weights, comma separated (6 values)
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    weights: Option<Vec<f64>>,

    /// Maximum refinement passes after the greedy pass
    #[arg(long, default_value = "2")]
    passes: usize,

    /// Shuffle the greedy pass with this seed
    #[arg(long)]
    seed: Option<u64>,

    /// Files are already in the mathematical frame
    #[arg(long)]
    mathematical: bool,

    /// Lower bound of the length-relative along-track extension
    #[arg(long, default_value = "0")]
    min_along: f64,

    /// Along-track extension as a percentage of segment length (0 = off)
    #[arg(long, default_value = "0")]
    along_percent: f64,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn into_config(self) -> RunConfig {
        let buffer = BufferConfig::new(self.buffer_x, self.buffer_y, self.buffer_azimuth)
            .with_relative_along(self.min_along, self.along_percent);
        let opening_cost = match self.cluster_size {
            Some(c) => OpeningCost::Absolute(c),
            None => OpeningCost::DiagonalFraction(self.cluster_fraction),
        };
        let coord_system = if self.mathematical {
            CoordSystem::Mathematical
        } else {
            CoordSystem::Geomatic
        };

        let mut cfg = RunConfig::new(self.input, self.output, buffer)
            .with_opening_cost(opening_cost)
            .with_size_filter(self.size_filter)
            .with_coord_system(coord_system)
            .with_refinement_passes(self.passes);
        if let Some(w) = self.weights {
            cfg = cfg.with_coord_weights(w);
        }
        if let Some(seed) = self.seed {
            cfg = cfg.with_seed(seed);
        }
        cfg
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: logging disabled: {e}");
    }

    let cfg = cli.into_config();
    match config::run(&cfg) {
        Ok(summary) => {
            println!(
                "{} segments, {} clusters ({} reported) saved in {}",
                summary.points,
                summary.facilities,
                summary.clusters_written,
                cfg.output.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) if e.is_configuration() => {
            eprintln!("invalid configuration: {e}");
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
