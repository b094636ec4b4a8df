//! Per-cell contour construction.

use crate::crossing::edge_crossing;
use contour_common::{Position, ScalarField};
use serde::{Deserialize, Serialize};

/// A line segment between two crossing points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Position,
    pub end: Position,
}

/// One quadrilateral of the grid, identified by its lower-left index.
///
/// Corners are stored counter-clockwise: bottom-left `(i, j)`, bottom-right
/// `(i+1, j)`, top-right `(i+1, j+1)`, top-left `(i, j+1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub i: usize,
    pub j: usize,
    pub corners: [Position; 4],
    pub values: [f64; 4],
}

/// Index offsets of the four corners, in CCW order.
const CORNER_OFFSETS: [(usize, usize); 4] = [(0, 0), (1, 0), (1, 1), (0, 1)];

impl Cell {
    /// Gather the corners of cell `(i, j)` from a field.
    ///
    /// Requires `i < nx - 1` and `j < ny - 1`.
    pub fn from_field<F: ScalarField + ?Sized>(field: &F, i: usize, j: usize) -> Self {
        let corners = CORNER_OFFSETS.map(|(di, dj)| field.point(i + di, j + dj));
        let values = CORNER_OFFSETS.map(|(di, dj)| field.scalar(i + di, j + dj));
        Self {
            i,
            j,
            corners,
            values,
        }
    }

    /// Flat point IDs of the corners for a grid with `nx` points per row.
    pub fn corner_point_ids(&self, nx: usize) -> [usize; 4] {
        CORNER_OFFSETS.map(|(di, dj)| (self.j + dj) * nx + self.i + di)
    }

    /// Crossing points on the four edges `0→1, 1→2, 2→3, 3→0`, in that order.
    pub fn crossings(&self, isovalue: f64) -> Vec<Position> {
        (0..4)
            .filter_map(|k| {
                let next = (k + 1) % 4;
                edge_crossing(
                    &self.corners[k],
                    self.values[k],
                    &self.corners[next],
                    self.values[next],
                    isovalue,
                )
            })
            .collect()
    }
}

/// What a single cell contributes to the contour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellOutcome {
    /// Isovalue does not cross the cell boundary.
    Empty,
    /// Exactly one edge crossed; nothing to connect.
    SingleCrossing,
    /// All four edges crossed. Pairing is ambiguous so the cell is skipped.
    Saddle,
    /// Two edges crossed.
    Segment(Segment),
}

/// Classify a cell and build its segment, if any.
///
/// # Panics
///
/// Panics on three crossings. A closed quadrilateral always changes sign an
/// even number of times, so an odd count above one means a logic defect.
pub fn classify_cell(cell: &Cell, isovalue: f64) -> CellOutcome {
    let mut crossings = cell.crossings(isovalue);

    match crossings.len() {
        0 => CellOutcome::Empty,
        1 => CellOutcome::SingleCrossing,
        2 => {
            order_by_angle(&mut crossings);
            CellOutcome::Segment(Segment {
                start: crossings[0],
                end: crossings[1],
            })
        }
        4 => CellOutcome::Saddle,
        n => panic!(
            "cell ({}, {}) has {n} edge crossings at isovalue {isovalue}; values {:?}",
            cell.i, cell.j, cell.values
        ),
    }
}

/// Segment for a cell, or `None` when the cell is empty, touched once, or a saddle.
pub fn build_segment(cell: &Cell, isovalue: f64) -> Option<Segment> {
    match classify_cell(cell, isovalue) {
        CellOutcome::Segment(segment) => Some(segment),
        _ => None,
    }
}

/// Sort points by their angle around the XY centroid.
///
/// Stable, so points at equal angles keep their edge order.
fn order_by_angle(points: &mut [Position]) {
    if points.is_empty() {
        return;
    }

    let n = points.len() as f64;
    let cx = points.iter().map(|p| p.x).sum::<f64>() / n;
    let cy = points.iter().map(|p| p.y).sum::<f64>() / n;

    points.sort_by(|a, b| {
        let angle_a = (a.y - cy).atan2(a.x - cx);
        let angle_b = (b.y - cy).atan2(b.x - cx);
        angle_a.total_cmp(&angle_b)
    });
}
