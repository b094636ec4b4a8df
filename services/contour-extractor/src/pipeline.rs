//! Read → extract → write orchestration.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use contour_common::{BoundingBox, ScalarField};
use isocontour::ExtractionStats;
use serde::Serialize;
use tracing::{debug, info, warn};
use vtk_xml::{read_image_data, Encoding, PolyDataWriter};

use crate::config::ExtractorConfig;

/// Summary of one extraction run, printed with `--report`.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub isovalue: f64,
    /// Grid points along x, y and z
    pub dimensions: [usize; 3],
    /// Finite min/max of the samples
    pub scalar_range: Option<(f64, f64)>,
    /// `true` when the isovalue lies inside `scalar_range`
    pub isovalue_in_range: bool,
    pub encoding: Encoding,
    pub parallel: bool,
    pub points: usize,
    pub segments: usize,
    pub bounds: Option<BoundingBox>,
    pub total_length: f64,
    pub stats: ExtractionStats,
    pub elapsed_ms: u64,
}

/// Run one extraction as described by `config`.
///
/// The config is validated first. Extraction runs on the current rayon pool
/// when `config.parallel` is set.
pub fn run(config: &ExtractorConfig) -> Result<RunReport> {
    config
        .validate()
        .map_err(|msg| anyhow::anyhow!("invalid configuration: {msg}"))?;

    let start = Instant::now();

    let grid = read_image_data(&config.input)
        .with_context(|| format!("failed to read grid from {}", config.input.display()))?;

    let (nx, ny) = grid.dimensions();
    let scalar_range = grid.scalar_range();
    info!(
        input = %config.input.display(),
        nx,
        ny,
        nz = grid.nz(),
        range = ?scalar_range,
        "Loaded scalar grid"
    );

    let isovalue_in_range = match scalar_range {
        Some((lo, hi)) => (lo..=hi).contains(&config.isovalue),
        None => false,
    };
    if !isovalue_in_range {
        warn!(
            isovalue = config.isovalue,
            range = ?scalar_range,
            "Isovalue lies outside the data range; the contour will be empty"
        );
    }

    let extracted = if config.parallel {
        debug!(threads = rayon::current_num_threads(), "Extracting in parallel");
        isocontour::extract_parallel(&grid, config.isovalue)
    } else {
        isocontour::extract_with_stats(&grid, config.isovalue)
    };
    let (mesh, stats) = extracted
        .with_context(|| format!("failed to extract contour at {}", config.isovalue))?;

    PolyDataWriter::new(config.encoding)
        .write_file(&mesh, &config.output)
        .with_context(|| format!("failed to write contour to {}", config.output.display()))?;

    info!(
        points = mesh.point_count(),
        segments = mesh.line_count(),
        saddles = stats.saddle_cells,
        "Contour at {} written to {}",
        config.isovalue,
        config.output.display()
    );

    Ok(RunReport {
        input: config.input.clone(),
        output: config.output.clone(),
        isovalue: config.isovalue,
        dimensions: [nx, ny, grid.nz()],
        scalar_range,
        isovalue_in_range,
        encoding: config.encoding,
        parallel: config.parallel,
        points: mesh.point_count(),
        segments: mesh.line_count(),
        bounds: mesh.bounds(),
        total_length: mesh.total_length(),
        stats,
        elapsed_ms: start.elapsed().as_millis() as u64,
    })
}
