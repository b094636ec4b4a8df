//! VTK XML file support for the contour pipeline.
//!
//! Reads scalar grids from `.vti` (ImageData) files and writes contour
//! meshes as `.vtp` (PolyData) files. Only uncompressed inline data arrays
//! are handled, in `ascii` or base64 `binary` format.

mod document;

pub mod data_array;
pub mod error;
pub mod image_data;
pub mod poly_data;

pub use data_array::{ByteOrder, DataType, HeaderType};
pub use error::{VtkError, VtkResult};
pub use image_data::{parse_image_data, read_image_data};
pub use poly_data::{parse_poly_data, read_poly_data, Encoding, PolyDataWriter};
