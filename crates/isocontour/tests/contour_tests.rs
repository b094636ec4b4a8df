//! Tests for isocontour extraction.

use contour_common::{ContourError, ImageGrid, Position, ScalarField};
use isocontour::{
    build_segment, crossing_parameter, edge_crossing, extract, extract_parallel,
    extract_with_stats, Cell, CellOutcome,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use test_utils::{
    assert_approx_eq, assert_coords_approx_eq, checkerboard, constant_field, linear_ramp_x,
    radial_peak, wavy_field,
};

fn unit_cell(values: [f64; 4]) -> Cell {
    let grid = ImageGrid::unit(2, 2, vec![values[0], values[1], values[3], values[2]]).unwrap();
    Cell::from_field(&grid, 0, 0)
}

// ============================================================================
// Edge crossing tests
// ============================================================================

#[test]
fn test_crossing_lies_on_edge() {
    let mut rng = StdRng::seed_from_u64(7);
    let a = Position::new(-2.0, 3.0, 1.0);
    let b = Position::new(5.0, -1.0, 4.0);

    for _ in 0..500 {
        let va: f64 = rng.gen_range(-100.0..100.0);
        let vb: f64 = rng.gen_range(-100.0..100.0);
        let iso: f64 = rng.gen_range(-100.0..100.0);

        match crossing_parameter(va, vb, iso) {
            Some(t) => {
                assert!((va - iso) * (vb - iso) < 0.0);
                assert!(t > 0.0 && t < 1.0, "t = {t}");

                let p = edge_crossing(&a, va, &b, vb, iso).unwrap();
                let expected = a.lerp(&b, t);
                assert_coords_approx_eq!((p.x, p.y, p.z), (expected.x, expected.y, expected.z), 1e-12);
                assert!(p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x));
                assert!(p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y));
            }
            None => assert!((va - iso) * (vb - iso) >= 0.0),
        }
    }
}

#[test]
fn test_crossing_interpolates_linearly() {
    let a = Position::new(0.0, 0.0, 0.0);
    let b = Position::new(0.0, 10.0, 0.0);
    let p = edge_crossing(&a, 100.0, &b, 200.0, 125.0).unwrap();
    assert_approx_eq!(p.y, 2.5, 1e-12);
}

// ============================================================================
// Cell builder tests
// ============================================================================

#[test]
fn test_cell_entirely_above_or_below() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let values: [f64; 4] = std::array::from_fn(|_| rng.gen_range(6.0..50.0));
        assert!(build_segment(&unit_cell(values), 5.0).is_none());

        let values: [f64; 4] = std::array::from_fn(|_| rng.gen_range(-50.0..4.0));
        assert!(build_segment(&unit_cell(values), 5.0).is_none());
    }
}

#[test]
fn test_saddle_skipped_for_every_permutation() {
    for values in [
        [10.0, 0.0, 10.0, 0.0],
        [0.0, 10.0, 0.0, 10.0],
        [7.0, 1.0, 9.0, 2.0],
        [-3.0, 8.0, -1.0, 6.0],
    ] {
        let cell = unit_cell(values);
        assert_eq!(cell.crossings(5.0).len(), 4);
        assert_eq!(isovalue_outcome(&cell), CellOutcome::Saddle);
    }
}

fn isovalue_outcome(cell: &Cell) -> CellOutcome {
    isocontour::classify_cell(cell, 5.0)
}

#[test]
fn test_two_crossings_connect_interpolated_points() {
    // Only bottom-right is high: edges 0→1 and 1→2 cross.
    let cell = unit_cell([0.0, 10.0, 0.0, 0.0]);
    let seg = build_segment(&cell, 2.5).unwrap();

    let mut endpoints = [seg.start, seg.end];
    endpoints.sort_by(|a, b| a.x.total_cmp(&b.x));
    assert_coords_approx_eq!((endpoints[0].x, endpoints[0].y, endpoints[0].z), (0.25, 0.0, 0.0), 1e-12);
    assert_coords_approx_eq!((endpoints[1].x, endpoints[1].y, endpoints[1].z), (1.0, 0.75, 0.0), 1e-12);
}

#[test]
fn test_corner_equal_to_isovalue() {
    // Corner exactly at the isovalue blocks both adjacent edges.
    let cell = unit_cell([5.0, 10.0, 10.0, 0.0]);
    // Edges: 5→10 no, 10→10 no, 10→0 yes, 0→5 no.
    assert_eq!(isovalue_outcome(&cell), CellOutcome::SingleCrossing);
}

// ============================================================================
// Scenario tests
// ============================================================================

#[test]
fn test_single_cell_scenario() {
    // Corners BL, BR, TR, TL = 0, 10, 10, 0 on the unit square, isovalue 5.
    // Edge 0→1 crosses at (0.5, 0); edge 2→3 crosses at (0.5, 1).
    // Edges 1→2 (10, 10) and 3→0 (0, 0) do not straddle.
    let grid = ImageGrid::unit(2, 2, vec![0.0, 10.0, 0.0, 10.0]).unwrap();
    let mesh = extract(&grid, 5.0).unwrap();

    assert_eq!(mesh.point_count(), 2);
    assert_eq!(mesh.lines(), &[[0, 1]]);

    let (a, b) = mesh.segment(0).unwrap();
    assert_eq!(a, Position::new(0.5, 0.0, 0.0));
    assert_eq!(b, Position::new(0.5, 1.0, 0.0));
}

#[test]
fn test_uniform_at_isovalue_is_empty() {
    let grid = ImageGrid::unit(6, 4, constant_field(6, 4, 3.25)).unwrap();
    let mesh = extract(&grid, 3.25).unwrap();
    assert_eq!(mesh.point_count(), 0);
    assert_eq!(mesh.line_count(), 0);
}

#[test]
fn test_center_peak_scenario() {
    #[rustfmt::skip]
    let data = vec![
        0.0, 0.0, 0.0,
        0.0, 10.0, 0.0,
        0.0, 0.0, 0.0,
    ];
    let grid = ImageGrid::unit(3, 3, data).unwrap();
    let (mesh, stats) = extract_with_stats(&grid, 5.0).unwrap();

    assert_eq!(mesh.line_count(), 4);
    assert_eq!(mesh.point_count(), 8);
    assert_eq!(stats.segments, 4);
    assert_eq!(stats.saddle_cells, 0);

    // Every endpoint sits halfway between the peak and a neighbour.
    for p in mesh.points() {
        let dist = ((p.x - 1.0).powi(2) + (p.y - 1.0).powi(2)).sqrt();
        assert_approx_eq!(dist, 0.5, 1e-12);
    }

    // First emitted segment belongs to cell (0, 0).
    let (a, b) = mesh.segment(0).unwrap();
    assert_eq!(a, Position::new(1.0, 0.5, 0.0));
    assert_eq!(b, Position::new(0.5, 1.0, 0.0));
}

#[test]
fn test_peak_with_uniform_cells() {
    // Peak in a corner cell; the far cells are uniform and contribute nothing.
    #[rustfmt::skip]
    let data = vec![
        10.0, 0.0, 0.0,
        0.0, 0.0, 0.0,
        0.0, 0.0, 0.0,
    ];
    let grid = ImageGrid::unit(3, 3, data).unwrap();
    let (mesh, stats) = extract_with_stats(&grid, 5.0).unwrap();
    assert_eq!(mesh.line_count(), 1);
    assert_eq!(stats.empty_cells, 3);
}

#[test]
fn test_checkerboard_is_all_saddles() {
    let grid = ImageGrid::unit(5, 5, checkerboard(5, 5, 0.0, 1.0)).unwrap();
    let (mesh, stats) = extract_with_stats(&grid, 0.5).unwrap();
    assert!(mesh.is_empty());
    assert_eq!(stats.saddle_cells, 16);
}

#[test]
fn test_tiny_sample_differences_do_not_break_cells() {
    // Corner differences around 1e-200 multiply to zero in f64.
    let grid = ImageGrid::unit(2, 2, vec![1e-200, -1e-200, -1.0, 1.0]).unwrap();
    let (mesh, stats) = extract_with_stats(&grid, 0.0).unwrap();
    assert!(mesh.is_empty());
    assert_eq!(stats.saddle_cells, 1);

    let grid = ImageGrid::unit(2, 2, vec![1e-200, -1e-200, 1.0, -1.0]).unwrap();
    let mesh = extract(&grid, 0.0).unwrap();
    assert_eq!(mesh.line_count(), 1);
    let (start, end) = mesh.segment(0).unwrap();
    assert_approx_eq!(start.y, 0.0, 1e-12);
    assert_approx_eq!(end.y, 1.0, 1e-12);
}

#[test]
fn test_ramp_emits_row_major_order() {
    let grid = ImageGrid::unit(4, 5, linear_ramp_x(4, 5, 1.0)).unwrap();
    let mesh = extract(&grid, 1.5).unwrap();

    // One vertical segment per cell row, at x = 1.5.
    assert_eq!(mesh.line_count(), 4);
    let ys: Vec<f64> = mesh.segments().map(|(a, b)| a.y.min(b.y)).collect();
    assert_eq!(ys, vec![0.0, 1.0, 2.0, 3.0]);
    for (a, b) in mesh.segments() {
        assert_eq!(a.x, 1.5);
        assert_eq!(b.x, 1.5);
    }
}

#[test]
fn test_isovalue_out_of_range_is_empty() {
    let grid = ImageGrid::unit(8, 8, wavy_field(8, 8)).unwrap();
    assert!(extract(&grid, -1438.0).unwrap().is_empty());
    assert!(extract(&grid, 630.0).unwrap().is_empty());
}

#[test]
fn test_spacing_and_origin_flow_into_points() {
    let grid = ImageGrid::new(2, 2, [10.0, -4.0, 2.0], [2.0, 0.5, 1.0], vec![0.0, 10.0, 0.0, 10.0])
        .unwrap();
    let mesh = extract(&grid, 5.0).unwrap();
    let (a, b) = mesh.segment(0).unwrap();
    assert_eq!(a, Position::new(11.0, -4.0, 2.0));
    assert_eq!(b, Position::new(11.0, -3.5, 2.0));
}

#[test]
fn test_degenerate_grid_rejected() {
    struct Strip;
    impl ScalarField for Strip {
        fn dimensions(&self) -> (usize, usize) {
            (5, 1)
        }
        fn point(&self, i: usize, _j: usize) -> Position {
            Position::new(i as f64, 0.0, 0.0)
        }
        fn scalar(&self, i: usize, _j: usize) -> f64 {
            i as f64
        }
    }

    let err = extract(&Strip, 2.5).unwrap_err();
    assert!(matches!(err, ContourError::DegenerateGrid { nx: 5, ny: 1 }));
}

#[test]
fn test_sheared_field() {
    // Non-axis-aligned grid: each row is shifted right by half a column.
    struct Sheared {
        values: Vec<f64>,
    }
    impl ScalarField for Sheared {
        fn dimensions(&self) -> (usize, usize) {
            (3, 2)
        }
        fn point(&self, i: usize, j: usize) -> Position {
            Position::new(i as f64 + 0.5 * j as f64, j as f64, 0.0)
        }
        fn scalar(&self, i: usize, j: usize) -> f64 {
            self.values[j * 3 + i]
        }
    }

    let field = Sheared {
        values: linear_ramp_x(3, 2, 2.0),
    };
    let mesh = extract(&field, 1.0).unwrap();
    assert_eq!(mesh.line_count(), 1);

    let (a, b) = mesh.segment(0).unwrap();
    let mut xs = [a.x, b.x];
    xs.sort_by(f64::total_cmp);
    assert_approx_eq!(xs[0], 0.5, 1e-12);
    assert_approx_eq!(xs[1], 1.0, 1e-12);
}

// ============================================================================
// Determinism and parallel equivalence
// ============================================================================

#[test]
fn test_extraction_is_deterministic() {
    let grid = ImageGrid::unit(40, 30, wavy_field(40, 30)).unwrap();
    let first = extract(&grid, 55.0).unwrap();
    let second = extract(&grid, 55.0).unwrap();
    assert_eq!(first, second);
    assert!(!first.is_empty());

    let a = serde_json::to_vec(&first).unwrap();
    let b = serde_json::to_vec(&second).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_parallel_matches_serial_on_noisy_fields() {
    let mut rng = StdRng::seed_from_u64(2024);

    for (nx, ny) in [(2, 2), (3, 17), (64, 5), (97, 113)] {
        let data: Vec<f64> = wavy_field(nx, ny)
            .into_iter()
            .map(|v| v + rng.gen_range(-5.0..5.0))
            .collect();
        let grid = ImageGrid::unit(nx, ny, data).unwrap();

        for iso in [20.0, 50.0, 71.5] {
            let (serial, serial_stats) = extract_with_stats(&grid, iso).unwrap();
            let (parallel, parallel_stats) = extract_parallel(&grid, iso).unwrap();
            assert_eq!(serial, parallel, "mesh mismatch for {nx}x{ny} at {iso}");
            assert_eq!(serial_stats, parallel_stats);
        }
    }
}

#[test]
fn test_radial_peak_segments_stay_inside_grid() {
    let grid = ImageGrid::unit(21, 21, radial_peak(21, 21, 100.0)).unwrap();
    let mesh = extract(&grid, 60.0).unwrap();
    assert!(mesh.line_count() > 8);
    assert_eq!(mesh.point_count(), 2 * mesh.line_count());

    let bounds = mesh.bounds().unwrap();
    assert!(bounds.min_x > 0.0 && bounds.max_x < 20.0);
    assert!(bounds.min_y > 0.0 && bounds.max_y < 20.0);
}
