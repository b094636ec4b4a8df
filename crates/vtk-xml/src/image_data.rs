//! VTK XML ImageData (`.vti`) reader.

use std::path::Path;
use std::str::FromStr;

use crate::document::VtkDocument;
use crate::{VtkError, VtkResult};
use contour_common::ImageGrid;
use tracing::{debug, warn};

const IDENTITY: [f64; 9] = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];

/// Read the active point scalars of a `.vti` file as a 2D grid.
///
/// Volumes with more than one z slice are accepted with a warning; only the
/// first slice is kept.
pub fn read_image_data<P: AsRef<Path>>(path: P) -> VtkResult<ImageGrid> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let xml = std::str::from_utf8(&bytes).map_err(|_| {
        VtkError::unsupported(format!(
            "{} is not UTF-8 (raw appended data is not supported)",
            path.display()
        ))
    })?;

    debug!(path = %path.display(), size = bytes.len(), "Parsing ImageData file");
    parse_image_data(xml)
}

/// Parse an in-memory `.vti` document.
pub fn parse_image_data(xml: &str) -> VtkResult<ImageGrid> {
    let doc = VtkDocument::parse(xml)?;
    if doc.file_type != "ImageData" {
        return Err(VtkError::invalid_format(format!(
            "expected ImageData file, found {}",
            doc.file_type
        )));
    }

    let extent_raw = doc
        .dataset
        .get("WholeExtent")
        .or_else(|| doc.piece.get("Extent"))
        .ok_or_else(|| VtkError::missing("WholeExtent"))?;
    let extent: Vec<i64> = parse_numbers(extent_raw, 6, "WholeExtent")?;

    let mut dims = [0usize; 3];
    for axis in 0..3 {
        let (lo, hi) = (extent[2 * axis], extent[2 * axis + 1]);
        if hi < lo {
            return Err(VtkError::invalid_format(format!(
                "WholeExtent axis {axis} is inverted ({lo} > {hi})"
            )));
        }
        dims[axis] = hi
            .checked_sub(lo)
            .and_then(|span| span.checked_add(1))
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| {
                VtkError::invalid_format(format!("WholeExtent axis {axis} is too large ({lo}..{hi})"))
            })?;
    }
    let [nx, ny, nz] = dims;

    let origin = optional_vector(&doc, "Origin", [0.0; 3])?;
    let spacing = optional_vector(&doc, "Spacing", [1.0; 3])?;
    let direction = match doc.dataset.get("Direction") {
        Some(raw) => {
            let d: Vec<f64> = parse_numbers(raw, 9, "Direction")?;
            let mut m = [0.0; 9];
            m.copy_from_slice(&d);
            Some(m).filter(|m| *m != IDENTITY)
        }
        None => None,
    };

    let active = doc
        .sections
        .get("PointData")
        .and_then(|attrs| attrs.get("Scalars"))
        .map(String::as_str);
    let array = match active {
        Some(name) => doc
            .array("PointData", name)
            .ok_or_else(|| VtkError::missing(format!("point scalars '{name}'")))?,
        None => doc
            .arrays_in("PointData")
            .next()
            .ok_or_else(|| VtkError::missing("point data array"))?,
    };

    let components = array.components()?;
    let expected = nx
        .checked_mul(ny)
        .and_then(|n| n.checked_mul(nz))
        .and_then(|n| n.checked_mul(components))
        .ok_or_else(|| {
            VtkError::invalid_format(format!(
                "{nx}x{ny}x{nz} points with {components} components overflows the value count"
            ))
        })?;
    let raw = array.decode(doc.byte_order, doc.header_type)?;
    if raw.len() != expected {
        return Err(VtkError::invalid_format(format!(
            "array {:?} holds {} values, expected {} ({}x{}x{} points, {} components)",
            array.name(),
            raw.len(),
            expected,
            nx,
            ny,
            nz,
            components
        )));
    }

    if nz != 1 {
        warn!(nz, "Z dimension is {nz}, expected 1 for a 2D slice; using the first slice");
    }

    // First component of each tuple in the z = 0 slice.
    let values: Vec<f64> = raw.iter().step_by(components).take(nx * ny).copied().collect();

    debug!(
        nx,
        ny,
        nz,
        array = array.name().unwrap_or("<unnamed>"),
        components,
        "Read ImageData scalars"
    );

    let mut grid = ImageGrid::new(nx, ny, origin, spacing, values)?
        .with_extent_offset([extent[0], extent[2], extent[4]])
        .with_depth(nz);
    if let Some(direction) = direction {
        grid = grid.with_direction(direction);
    }
    Ok(grid)
}

fn optional_vector(doc: &VtkDocument, key: &str, default: [f64; 3]) -> VtkResult<[f64; 3]> {
    match doc.dataset.get(key) {
        None => Ok(default),
        Some(raw) => {
            let v: Vec<f64> = parse_numbers(raw, 3, key)?;
            Ok([v[0], v[1], v[2]])
        }
    }
}

fn parse_numbers<T: FromStr>(raw: &str, expected: usize, what: &str) -> VtkResult<Vec<T>> {
    let values = raw
        .split_ascii_whitespace()
        .map(|token| token.parse::<T>())
        .collect::<Result<Vec<T>, _>>()
        .map_err(|_| VtkError::invalid_format(format!("{what} '{raw}'")))?;
    if values.len() != expected {
        return Err(VtkError::invalid_format(format!(
            "{what} has {} values, expected {expected}",
            values.len()
        )));
    }
    Ok(values)
}
