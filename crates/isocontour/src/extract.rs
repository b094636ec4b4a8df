//! Grid traversal and extraction entry points.

use std::ops::Range;

use crate::accumulator::MeshAccumulator;
use crate::cell::{classify_cell, Cell, CellOutcome, Segment};
use contour_common::{ContourError, ContourMesh, ContourResult, ScalarField};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-run counters describing how cells were handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    pub cells_visited: usize,
    pub segments: usize,
    pub empty_cells: usize,
    pub single_crossing_cells: usize,
    /// Four-crossing cells skipped without a segment
    pub saddle_cells: usize,
}

impl ExtractionStats {
    fn record(&mut self, outcome: &CellOutcome) {
        self.cells_visited += 1;
        match outcome {
            CellOutcome::Empty => self.empty_cells += 1,
            CellOutcome::SingleCrossing => self.single_crossing_cells += 1,
            CellOutcome::Saddle => self.saddle_cells += 1,
            CellOutcome::Segment(_) => self.segments += 1,
        }
    }

    /// Add another partition's counters to these.
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.cells_visited += other.cells_visited;
        self.segments += other.segments;
        self.empty_cells += other.empty_cells;
        self.single_crossing_cells += other.single_crossing_cells;
        self.saddle_cells += other.saddle_cells;
    }
}

/// Extract the isocontour of `field` at `isovalue`.
///
/// Cells are visited row by row (`j` outer, `i` inner) and segments appear in
/// the mesh in that order.
pub fn extract<F>(field: &F, isovalue: f64) -> ContourResult<ContourMesh>
where
    F: ScalarField + ?Sized,
{
    extract_with_stats(field, isovalue).map(|(mesh, _)| mesh)
}

/// Like [`extract`], also returning per-cell counters.
pub fn extract_with_stats<F>(
    field: &F,
    isovalue: f64,
) -> ContourResult<(ContourMesh, ExtractionStats)>
where
    F: ScalarField + ?Sized,
{
    let (nx, ny) = validate(field, isovalue)?;

    let (segments, stats) = contour_rows(field, isovalue, 0..ny - 1);

    let mut accumulator = MeshAccumulator::with_capacity(segments.len());
    accumulator.extend(&segments);

    log_stats(nx, ny, isovalue, &stats);
    Ok((accumulator.finalize(), stats))
}

/// Parallel variant of [`extract_with_stats`].
///
/// Cell rows are split into contiguous bands, each band is contoured
/// independently on the rayon pool, and the bands are concatenated in row
/// order. The result is identical to the serial extraction.
pub fn extract_parallel<F>(
    field: &F,
    isovalue: f64,
) -> ContourResult<(ContourMesh, ExtractionStats)>
where
    F: ScalarField + Sync + ?Sized,
{
    let (nx, ny) = validate(field, isovalue)?;

    let cell_rows = ny - 1;
    let band = (cell_rows / rayon::current_num_threads()).max(1);
    let bands: Vec<Range<usize>> = (0..cell_rows)
        .step_by(band)
        .map(|start| start..(start + band).min(cell_rows))
        .collect();

    // Indexed collect keeps band order.
    let partials: Vec<(Vec<Segment>, ExtractionStats)> = bands
        .into_par_iter()
        .map(|rows| contour_rows(field, isovalue, rows))
        .collect();

    let total: usize = partials.iter().map(|(segments, _)| segments.len()).sum();
    let mut accumulator = MeshAccumulator::with_capacity(total);
    let mut stats = ExtractionStats::default();
    for (segments, partial) in &partials {
        accumulator.extend(segments);
        stats.merge(partial);
    }

    log_stats(nx, ny, isovalue, &stats);
    Ok((accumulator.finalize(), stats))
}

fn validate<F>(field: &F, isovalue: f64) -> ContourResult<(usize, usize)>
where
    F: ScalarField + ?Sized,
{
    let (nx, ny) = field.dimensions();
    if nx < 2 || ny < 2 {
        return Err(ContourError::degenerate(nx, ny));
    }
    if !isovalue.is_finite() {
        return Err(ContourError::InvalidIsovalue(isovalue));
    }
    Ok((nx, ny))
}

/// Contour the cells whose lower-left row index lies in `rows`.
fn contour_rows<F>(field: &F, isovalue: f64, rows: Range<usize>) -> (Vec<Segment>, ExtractionStats)
where
    F: ScalarField + ?Sized,
{
    let (nx, _) = field.dimensions();
    let mut segments = Vec::new();
    let mut stats = ExtractionStats::default();

    for j in rows {
        for i in 0..nx - 1 {
            let cell = Cell::from_field(field, i, j);
            let outcome = classify_cell(&cell, isovalue);
            stats.record(&outcome);
            if let CellOutcome::Segment(segment) = outcome {
                segments.push(segment);
            }
        }
    }

    (segments, stats)
}

fn log_stats(nx: usize, ny: usize, isovalue: f64, stats: &ExtractionStats) {
    tracing::debug!(
        nx,
        ny,
        isovalue,
        cells = stats.cells_visited,
        segments = stats.segments,
        saddle_cells = stats.saddle_cells,
        single_crossing_cells = stats.single_crossing_cells,
        "Extracted isocontour"
    );
}
