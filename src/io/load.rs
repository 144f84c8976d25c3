//! Reading segment files.

use super::CoordSystem;
use crate::bbox::BoundingBox;
use crate::error::{Error, Result};
use crate::point::{PointSet, Segment};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Column names of a segment file, in order.
pub const COLUMNS: [&str; 7] = ["ID", "A.X", "A.Y", "B.X", "B.Y", "AZ", "LEN"];

fn is_separator(c: char) -> bool {
    c == ';' || c == '\t'
}

fn parse_line(line: &str, line_no: usize, system: CoordSystem) -> Result<Segment> {
    let tokens: Vec<&str> = line
        .split(is_separator)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.len() < COLUMNS.len() {
        return Err(Error::Parse {
            line: line_no,
            message: format!(
                "expected {} fields, found {}",
                COLUMNS.len(),
                tokens.len()
            ),
        });
    }

    let mut values = [0.0f64; 6];
    for (k, value) in values.iter_mut().enumerate() {
        let tok = tokens[k + 1];
        *value = tok.parse().map_err(|_| Error::Parse {
            line: line_no,
            message: format!("field {} ('{tok}') is not a number", COLUMNS[k + 1]),
        })?;
    }
    let [ax, ay, bx, by, azimuth, length] = values;

    Ok(Segment::new(
        tokens[0],
        system.to_working([ax, ay]),
        system.to_working([bx, by]),
        azimuth,
        length,
    ))
}

/// Read segments from a delimited source. The first line is a header.
pub fn read_segments<R: BufRead>(reader: R, system: CoordSystem) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if i == 0 || line.trim().is_empty() {
            continue;
        }
        segments.push(parse_line(&line, i + 1, system)?);
    }
    tracing::debug!(segments = segments.len(), ?system, "segments read");
    Ok(segments)
}

/// Read segments into a point set and the bounding box covering it.
pub fn read_points<R: BufRead>(reader: R, system: CoordSystem) -> Result<(PointSet, BoundingBox)> {
    let segments = read_segments(reader, system)?;
    let points = PointSet::from_segments(&segments)?;
    let bounds = BoundingBox::from_points(&points);
    Ok((points, bounds))
}

/// Load a segment file.
pub fn load_segments(
    path: impl AsRef<Path>,
    system: CoordSystem,
) -> Result<(PointSet, BoundingBox)> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::Io(format!("{}: {e}", path.display())))?;
    let (points, bounds) = read_points(BufReader::new(file), system)?;
    tracing::info!(path = %path.display(), points = points.len(), "loaded segments");
    Ok((points, bounds))
}
