//! Configuration for the contour extractor.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use vtk_xml::Encoding;

/// Settings for one extraction run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Input `.vti` file.
    pub input: PathBuf,

    /// Output `.vtp` file, overwritten if present.
    pub output: PathBuf,

    /// Scalar level to trace.
    pub isovalue: f64,

    /// Data array encoding of the output file.
    pub encoding: Encoding,

    /// Split the grid into row bands and contour them on the rayon pool.
    pub parallel: bool,

    /// Rayon pool size. `None` uses one thread per core.
    pub threads: Option<usize>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: PathBuf::from("contour.vtp"),
            isovalue: 0.0,
            encoding: Encoding::Binary,
            parallel: false,
            threads: None,
        }
    }
}

impl ExtractorConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables keep their defaults; call
    /// [`validate`](Self::validate) before use.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("CONTOUR_INPUT") {
            config.input = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("CONTOUR_OUTPUT") {
            config.output = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("CONTOUR_ISOVALUE") {
            if let Ok(iso) = val.trim().parse() {
                config.isovalue = iso;
            }
        }

        if let Ok(val) = std::env::var("CONTOUR_ENCODING") {
            if let Ok(encoding) = val.parse() {
                config.encoding = encoding;
            }
        }

        if let Ok(val) = std::env::var("CONTOUR_PARALLEL") {
            config.parallel = val.to_lowercase() == "true" || val == "1";
        }

        if let Ok(val) = std::env::var("CONTOUR_THREADS") {
            if let Ok(threads) = val.parse() {
                config.threads = Some(threads);
            }
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.input.as_os_str().is_empty() {
            return Err("input path must not be empty".to_string());
        }

        if self.output.as_os_str().is_empty() {
            return Err("output path must not be empty".to_string());
        }

        if !self.isovalue.is_finite() {
            return Err(format!("isovalue must be finite, got {}", self.isovalue));
        }

        if self.threads == Some(0) {
            return Err("threads must be > 0".to_string());
        }

        Ok(())
    }
}
