//! Indexed point/line mesh produced by contour extraction.

use crate::{BoundingBox, Position};
use serde::{Deserialize, Serialize};

/// A 2-point line cell, holding indices into [`ContourMesh::points`].
pub type LineCell = [usize; 2];

/// Finalized contour geometry.
///
/// Points are never shared between line cells: each segment owns its own
/// pair, so `points.len() == 2 * lines.len()` for meshes built by extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContourMesh {
    points: Vec<Position>,
    lines: Vec<LineCell>,
}

impl ContourMesh {
    /// Assemble a mesh from its parts.
    ///
    /// # Panics
    ///
    /// Panics if a line cell references a point that does not exist.
    pub fn new(points: Vec<Position>, lines: Vec<LineCell>) -> Self {
        if let Some(bad) = lines.iter().flatten().find(|&&idx| idx >= points.len()) {
            panic!(
                "line cell references point {bad} but mesh has {} points",
                points.len()
            );
        }
        Self { points, lines }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[Position] {
        &self.points
    }

    pub fn lines(&self) -> &[LineCell] {
        &self.lines
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.lines.is_empty()
    }

    /// Endpoints of line cell `k`.
    pub fn segment(&self, k: usize) -> Option<(Position, Position)> {
        self.lines
            .get(k)
            .map(|&[a, b]| (self.points[a], self.points[b]))
    }

    /// Iterate over all segments in emission order.
    pub fn segments(&self) -> impl Iterator<Item = (Position, Position)> + '_ {
        self.lines
            .iter()
            .map(move |&[a, b]| (self.points[a], self.points[b]))
    }

    /// XY extent of all points, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.points.iter().map(|p| (p.x, p.y)))
    }

    /// Total length of all segments.
    pub fn total_length(&self) -> f64 {
        self.segments()
            .map(|(a, b)| {
                ((b.x - a.x).powi(2) + (b.y - a.y).powi(2) + (b.z - a.z).powi(2)).sqrt()
            })
            .sum()
    }
}
