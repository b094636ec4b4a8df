//! Append-only builder for the output mesh.

use crate::cell::Segment;
use contour_common::{ContourMesh, LineCell, Position};

/// Collects segments into an indexed point/line mesh.
///
/// Every segment gets a fresh point pair. Coincident endpoints of
/// neighbouring cells are not welded.
#[derive(Debug, Default)]
pub struct MeshAccumulator {
    points: Vec<Position>,
    lines: Vec<LineCell>,
}

impl MeshAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size for roughly `segments` segments.
    pub fn with_capacity(segments: usize) -> Self {
        Self {
            points: Vec::with_capacity(segments * 2),
            lines: Vec::with_capacity(segments),
        }
    }

    /// Append one segment as two new points and one line cell.
    pub fn add(&mut self, segment: &Segment) {
        let a = self.points.len();
        self.points.push(segment.start);
        self.points.push(segment.end);
        self.lines.push([a, a + 1]);
    }

    /// Append segments in iteration order.
    pub fn extend<'a, I>(&mut self, segments: I)
    where
        I: IntoIterator<Item = &'a Segment>,
    {
        for segment in segments {
            self.add(segment);
        }
    }

    pub fn segment_count(&self) -> usize {
        self.lines.len()
    }

    /// Hand over the accumulated mesh.
    pub fn finalize(self) -> ContourMesh {
        ContourMesh::new(self.points, self.lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(x0: f64, x1: f64) -> Segment {
        Segment {
            start: Position::new(x0, 0.0, 0.0),
            end: Position::new(x1, 0.0, 0.0),
        }
    }

    #[test]
    fn test_empty_accumulator() {
        let mesh = MeshAccumulator::new().finalize();
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_points_are_not_welded() {
        let mut acc = MeshAccumulator::new();
        acc.add(&seg(0.0, 1.0));
        acc.add(&seg(1.0, 2.0));
        let mesh = acc.finalize();

        assert_eq!(mesh.point_count(), 4);
        assert_eq!(mesh.lines(), &[[0, 1], [2, 3]]);
        assert_eq!(mesh.points()[1], mesh.points()[2]);
    }

    #[test]
    fn test_extend_preserves_order() {
        let segments = vec![seg(0.0, 1.0), seg(5.0, 6.0), seg(2.0, 3.0)];
        let mut acc = MeshAccumulator::with_capacity(segments.len());
        acc.extend(&segments);
        assert_eq!(acc.segment_count(), 3);

        let mesh = acc.finalize();
        let starts: Vec<f64> = mesh.segments().map(|(a, _)| a.x).collect();
        assert_eq!(starts, vec![0.0, 5.0, 2.0]);
    }
}
