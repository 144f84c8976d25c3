//! Delimited text input and output.
//!
//! Segment files are plain text, one segment per line, fields separated by
//! `;` or tabs:
//!
//! ```text
//! ID;A.X;A.Y;B.X;B.Y;AZ;LEN
//! 1;5120.5;-730.0;5180.5;-731.2;88.9;60.0
//! ```
//!
//! Field data usually arrives in a geomatic frame (x north, y east). The
//! clustering works in the mathematical frame; [`CoordSystem`] converts
//! between the two on the way in and out.

mod load;
mod report;

pub use load::{load_segments, read_points, read_segments, COLUMNS};
pub use report::{save_report, write_report, ReportOptions};

/// Coordinate frame of a segment file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordSystem {
    /// Geodetic/geomatic axes; converted on load and on report.
    #[default]
    Geomatic,
    /// Already in the working (mathematical) frame.
    Mathematical,
}

impl CoordSystem {
    /// Convert a file point into the working frame.
    #[inline]
    pub fn to_working(self, p: [f64; 2]) -> [f64; 2] {
        match self {
            CoordSystem::Geomatic => swap_negate(p),
            CoordSystem::Mathematical => p,
        }
    }

    /// Convert a working-frame point back into the file's frame.
    #[inline]
    pub fn to_file(self, p: [f64; 2]) -> [f64; 2] {
        // the geomatic conversion is its own inverse
        self.to_working(p)
    }
}

/// `(x, y) -> (-y, -x)`.
#[inline]
fn swap_negate([x, y]: [f64; 2]) -> [f64; 2] {
    [-y, -x]
}
