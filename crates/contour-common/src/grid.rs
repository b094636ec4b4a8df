//! Grid model for 2D scalar fields.

use crate::{ContourError, ContourResult, Position};
use serde::Serialize;

/// Read-only view over a 2D grid of scalar samples.
///
/// Callers only ever pass indices produced by cell iteration, so
/// `0 <= i < nx` and `0 <= j < ny` is a precondition of `point` and `scalar`.
/// Implementations may panic when it is violated.
pub trait ScalarField {
    /// Number of points along x and y.
    fn dimensions(&self) -> (usize, usize);

    /// World position of grid point `(i, j)`.
    fn point(&self, i: usize, j: usize) -> Position;

    /// Scalar sample at grid point `(i, j)`.
    fn scalar(&self, i: usize, j: usize) -> f64;
}

/// Regular grid with VTK ImageData semantics.
///
/// Holds a single `z` slice. Point `(i, j)` sits at
/// `origin + direction * ((index + extent_offset) * spacing)`.
///
/// Only built through [`ImageGrid::new`], so the sample count always matches
/// the dimensions.
#[derive(Debug, Clone, Serialize)]
pub struct ImageGrid {
    nx: usize,
    ny: usize,
    /// Z dimension of the source data (only slice 0 is kept)
    nz: usize,
    origin: [f64; 3],
    spacing: [f64; 3],
    /// Lower corner of the index extent (VTK `WholeExtent` minimum)
    extent_offset: [i64; 3],
    /// Row-major 3x3 orientation matrix, `None` for axis-aligned grids
    direction: Option<[f64; 9]>,
    /// Samples in row-major order, index `j * nx + i`
    values: Vec<f64>,
}

impl ImageGrid {
    /// Create an axis-aligned grid with zero extent offset.
    pub fn new(
        nx: usize,
        ny: usize,
        origin: [f64; 3],
        spacing: [f64; 3],
        values: Vec<f64>,
    ) -> ContourResult<Self> {
        if nx < 2 || ny < 2 {
            return Err(ContourError::degenerate(nx, ny));
        }
        if values.len() != nx * ny {
            return Err(ContourError::SampleCountMismatch {
                expected: nx * ny,
                actual: values.len(),
            });
        }
        for (axis, &value) in spacing.iter().enumerate() {
            if !value.is_finite() || value <= 0.0 {
                return Err(ContourError::InvalidSpacing { axis, value });
            }
        }

        Ok(Self {
            nx,
            ny,
            nz: 1,
            origin,
            spacing,
            extent_offset: [0; 3],
            direction: None,
            values,
        })
    }

    /// Unit-spaced grid anchored at the origin.
    pub fn unit(nx: usize, ny: usize, values: Vec<f64>) -> ContourResult<Self> {
        Self::new(nx, ny, [0.0; 3], [1.0; 3], values)
    }

    /// Set the index extent lower corner.
    pub fn with_extent_offset(mut self, offset: [i64; 3]) -> Self {
        self.extent_offset = offset;
        self
    }

    /// Set the orientation matrix (row-major).
    pub fn with_direction(mut self, direction: [f64; 9]) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Record the z dimension of the source volume.
    pub fn with_depth(mut self, nz: usize) -> Self {
        self.nz = nz;
        self
    }

    /// Z dimension of the source volume.
    pub fn nz(&self) -> usize {
        self.nz
    }

    pub fn origin(&self) -> [f64; 3] {
        self.origin
    }

    pub fn spacing(&self) -> [f64; 3] {
        self.spacing
    }

    pub fn extent_offset(&self) -> [i64; 3] {
        self.extent_offset
    }

    pub fn direction(&self) -> Option<[f64; 9]> {
        self.direction
    }

    /// Flat index for a 2D grid position.
    pub fn flat_index(&self, i: usize, j: usize) -> usize {
        j * self.nx + i
    }

    /// Total number of grid points.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of cells, `(nx - 1) * (ny - 1)`.
    pub fn cell_count(&self) -> usize {
        (self.nx - 1) * (self.ny - 1)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Finite min/max of the samples, `None` when no sample is finite.
    pub fn scalar_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

impl ScalarField for ImageGrid {
    fn dimensions(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    fn point(&self, i: usize, j: usize) -> Position {
        debug_assert!(i < self.nx && j < self.ny, "grid point ({i}, {j}) out of bounds");

        // Float index math; extents near i64::MAX must not overflow.
        let local = [
            (i as f64 + self.extent_offset[0] as f64) * self.spacing[0],
            (j as f64 + self.extent_offset[1] as f64) * self.spacing[1],
            self.extent_offset[2] as f64 * self.spacing[2],
        ];

        let rotated = match &self.direction {
            None => local,
            Some(d) => [
                d[0] * local[0] + d[1] * local[1] + d[2] * local[2],
                d[3] * local[0] + d[4] * local[1] + d[5] * local[2],
                d[6] * local[0] + d[7] * local[1] + d[8] * local[2],
            ],
        };

        Position::new(
            self.origin[0] + rotated[0],
            self.origin[1] + rotated[1],
            self.origin[2] + rotated[2],
        )
    }

    fn scalar(&self, i: usize, j: usize) -> f64 {
        debug_assert!(i < self.nx && j < self.ny, "grid point ({i}, {j}) out of bounds");
        self.values[self.flat_index(i, j)]
    }
}
