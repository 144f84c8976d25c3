//! Writing cluster reports.
//!
//! One block per reported cluster:
//!
//! ```text
//! C;ID;A.X;A.Y;B.X;B.Y;AZ;LEN;
//! *;12;5120.50;-730.00;5180.50;-731.20;88.90;60.00;
//! 12;15;5119.00;-728.40;5170.00;-729.90;89.10;51.00;
//! 12;40;...
//! ```
//!
//! The `*` line is the facility; each following line is a member, prefixed
//! with its facility's id.

use super::{CoordSystem, COLUMNS};
use crate::cluster::{Facility, Solution};
use crate::error::{Error, Result};
use crate::point::{PointSet, END_X, END_Y, LINE_DIM, START_X, START_Y};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// How a report is filtered and formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Minimum cluster size (representative included) to report; 0 reports all.
    pub size_filter: usize,
    /// Frame to write coordinates in.
    pub coord_system: CoordSystem,
    /// Decimal places.
    pub precision: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            size_filter: 0,
            coord_system: CoordSystem::Geomatic,
            precision: 2,
        }
    }
}

impl ReportOptions {
    /// Set the minimum reported cluster size.
    pub fn with_size_filter(mut self, size_filter: usize) -> Self {
        self.size_filter = size_filter;
        self
    }

    /// Set the output frame.
    pub fn with_coord_system(mut self, coord_system: CoordSystem) -> Self {
        self.coord_system = coord_system;
        self
    }

    /// Set the number of decimal places.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Whether a facility passes the size filter.
    pub fn accepts(&self, facility: &Facility) -> bool {
        self.size_filter == 0 || facility.cluster_size() >= self.size_filter
    }
}

fn write_point<W: Write>(
    w: &mut W,
    points: &PointSet,
    index: usize,
    opts: &ReportOptions,
) -> Result<()> {
    let mut coords = points.coords(index).to_vec();
    let start = opts.coord_system.to_file([coords[START_X], coords[START_Y]]);
    let end = opts.coord_system.to_file([coords[END_X], coords[END_Y]]);
    coords[START_X] = start[0];
    coords[START_Y] = start[1];
    coords[END_X] = end[0];
    coords[END_Y] = end[1];

    write!(w, "{};", points.id(index))?;
    for c in &coords {
        write!(w, "{:.*};", opts.precision, c)?;
    }
    writeln!(w)?;
    Ok(())
}

/// Write the report. Returns the number of clusters written.
pub fn write_report<W: Write>(
    mut w: W,
    points: &PointSet,
    solution: &Solution,
    opts: &ReportOptions,
) -> Result<usize> {
    if points.dim() < LINE_DIM {
        return Err(Error::DimensionMismatch {
            expected: LINE_DIM,
            found: points.dim(),
        });
    }

    write!(w, "C;")?;
    for name in COLUMNS {
        write!(w, "{name};")?;
    }
    writeln!(w)?;

    let mut written = 0;
    for fac in solution.facilities().iter().filter(|f| opts.accepts(f)) {
        let rep = fac.representative();
        write!(w, "*;")?;
        write_point(&mut w, points, rep, opts)?;
        for &m in fac.members() {
            write!(w, "{};", points.id(rep))?;
            write_point(&mut w, points, m, opts)?;
        }
        written += 1;
    }
    w.flush()?;
    Ok(written)
}

/// Write the report to a file.
pub fn save_report(
    path: impl AsRef<Path>,
    points: &PointSet,
    solution: &Solution,
    opts: &ReportOptions,
) -> Result<usize> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| Error::Io(format!("{}: {e}", path.display())))?;
    let written = write_report(BufWriter::new(file), points, solution, opts)?;
    tracing::info!(
        path = %path.display(),
        clusters = written,
        size_filter = opts.size_filter,
        "report written"
    );
    Ok(written)
}
