//! Common types shared by the isocontour crates.
//!
//! - [`grid`]: the read-only scalar grid model contoured by the core
//! - [`mesh`]: the indexed point/line mesh produced by extraction
//! - [`position`]: 3D positions and linear interpolation
//! - [`bbox`]: 2D extents of a point set

pub mod bbox;
pub mod error;
pub mod grid;
pub mod mesh;
pub mod position;

pub use bbox::BoundingBox;
pub use error::{ContourError, ContourResult};
pub use grid::{ImageGrid, ScalarField};
pub use mesh::{ContourMesh, LineCell};
pub use position::Position;
