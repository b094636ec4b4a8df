//! Error types for contour extraction.

use thiserror::Error;

/// Result type alias using ContourError.
pub type ContourResult<T> = Result<T, ContourError>;

/// Errors raised while building a grid or running extraction on it.
///
/// Only precondition violations are reported here. Ambiguous cells are not
/// errors, and internal invariant failures panic instead.
#[derive(Debug, Error)]
pub enum ContourError {
    /// Grid has fewer than two points along an axis, so it has no cells.
    #[error("Degenerate grid: {nx}x{ny} points, need at least 2x2")]
    DegenerateGrid { nx: usize, ny: usize },

    /// Number of samples does not match the grid dimensions.
    #[error("Sample count mismatch: expected {expected}, got {actual}")]
    SampleCountMismatch { expected: usize, actual: usize },

    /// Spacing along an axis is zero, negative or not finite.
    #[error("Invalid spacing on axis {axis}: {value}")]
    InvalidSpacing { axis: usize, value: f64 },

    /// Isovalue cannot define a level set.
    #[error("Invalid isovalue: {0}")]
    InvalidIsovalue(f64),
}

impl ContourError {
    /// Create a DegenerateGrid error.
    pub fn degenerate(nx: usize, ny: usize) -> Self {
        Self::DegenerateGrid { nx, ny }
    }

    /// Whether the error comes from invalid grid geometry rather than the
    /// extraction request.
    pub fn is_grid_error(&self) -> bool {
        matches!(
            self,
            ContourError::DegenerateGrid { .. }
                | ContourError::SampleCountMismatch { .. }
                | ContourError::InvalidSpacing { .. }
        )
    }
}
