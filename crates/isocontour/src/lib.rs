//! Isocontour extraction for 2D scalar grids.
//!
//! Walks every cell of a [`ScalarField`](contour_common::ScalarField) in
//! row-major order, interpolates where the isovalue crosses each cell edge
//! and emits one line segment per cell with exactly two crossings.
//! Saddle cells (four crossings) are skipped rather than disambiguated.
//!
//! ```
//! use contour_common::ImageGrid;
//!
//! let grid = ImageGrid::unit(2, 2, vec![0.0, 10.0, 0.0, 10.0]).unwrap();
//! let mesh = isocontour::extract(&grid, 5.0).unwrap();
//! assert_eq!(mesh.line_count(), 1);
//! assert_eq!(mesh.point_count(), 2);
//! ```

pub mod accumulator;
pub mod cell;
pub mod crossing;
pub mod extract;

pub use accumulator::MeshAccumulator;
pub use cell::{build_segment, classify_cell, Cell, CellOutcome, Segment};
pub use crossing::{crossing_parameter, edge_crossing};
pub use extract::{extract, extract_parallel, extract_with_stats, ExtractionStats};
