//! Error types for VTK XML reading and writing.

use contour_common::ContourError;
use thiserror::Error;

/// Result type for VTK XML operations.
pub type VtkResult<T> = Result<T, VtkError>;

/// Error types for VTK XML files.
#[derive(Error, Debug)]
pub enum VtkError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed XML
    #[error("XML error: {0}")]
    Xml(String),

    /// Well-formed XML that is not a valid VTK document
    #[error("Invalid VTK format: {0}")]
    InvalidFormat(String),

    /// Missing required element, attribute or array
    #[error("Missing required data: {0}")]
    MissingData(String),

    /// Valid VTK feature this reader does not handle
    #[error("Unsupported VTK feature: {0}")]
    Unsupported(String),

    /// Bad base64 payload in a binary data array
    #[error("Base64 decode error: {0}")]
    Base64(String),

    /// Grid described by the file is not contourable
    #[error("Invalid grid: {0}")]
    Grid(#[from] ContourError),
}

impl VtkError {
    /// Create an InvalidFormat error.
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        Self::InvalidFormat(msg.into())
    }

    /// Create a MissingData error.
    pub fn missing(msg: impl Into<String>) -> Self {
        Self::MissingData(msg.into())
    }

    /// Create an Unsupported error.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }
}

impl From<quick_xml::Error> for VtkError {
    fn from(err: quick_xml::Error) -> Self {
        VtkError::Xml(err.to_string())
    }
}

impl From<base64::DecodeError> for VtkError {
    fn from(err: base64::DecodeError) -> Self {
        VtkError::Base64(err.to_string())
    }
}
