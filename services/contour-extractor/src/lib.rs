//! Isocontour extraction service.
//!
//! Reads a scalar grid from a `.vti` file, extracts the isocontour at a
//! requested isovalue and writes the segments to a `.vtp` file.

pub mod config;
pub mod pipeline;

pub use config::ExtractorConfig;
pub use pipeline::{run, RunReport};
