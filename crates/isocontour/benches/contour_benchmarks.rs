//! Benchmarks for isocontour extraction.
//!
//! Run with: cargo bench --package isocontour --bench contour_benchmarks

use contour_common::{ImageGrid, Position};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use isocontour::{build_segment, extract, extract_parallel, Cell};
use rand::Rng;

/// Smooth field with hills and valleys, values roughly in [0, 100].
fn generate_smooth_field(width: usize, height: usize) -> Vec<f64> {
    let mut data = vec![0.0f64; width * height];

    for y in 0..height {
        for x in 0..width {
            let fx = x as f64 / width as f64;
            let fy = y as f64 / height as f64;

            let v1 = (fx * std::f64::consts::PI * 4.0).sin() * 20.0;
            let v2 = (fy * std::f64::consts::PI * 4.0).sin() * 20.0;
            let v3 = ((fx + fy) * std::f64::consts::PI * 2.0).sin() * 10.0;

            data[y * width + x] = 50.0 + v1 + v2 + v3;
        }
    }
    data
}

/// Smooth field plus noise (more crossings, more saddles).
fn generate_noisy_field(width: usize, height: usize) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    let base = generate_smooth_field(width, height);
    base.iter().map(|&v| v + rng.gen_range(-5.0..5.0)).collect()
}

// =============================================================================
// CELL BUILDER BENCHMARKS
// =============================================================================

fn bench_build_segment(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_segment");

    let corners = [
        Position::new(0.0, 0.0, 0.0),
        Position::new(1.0, 0.0, 0.0),
        Position::new(1.0, 1.0, 0.0),
        Position::new(0.0, 1.0, 0.0),
    ];
    let cases = [
        ("empty", [1.0, 2.0, 3.0, 4.0]),
        ("segment", [0.0, 10.0, 10.0, 0.0]),
        ("saddle", [10.0, 0.0, 10.0, 0.0]),
    ];

    for (name, values) in cases {
        let cell = Cell {
            i: 0,
            j: 0,
            corners,
            values,
        };
        group.bench_with_input(BenchmarkId::new("cell", name), &cell, |b, cell| {
            b.iter(|| build_segment(black_box(cell), black_box(5.0)));
        });
    }

    group.finish();
}

// =============================================================================
// EXTRACTION BENCHMARKS
// =============================================================================

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");

    let sizes = [(64, 64), (128, 128), (256, 256), (500, 500)];

    for (width, height) in sizes {
        let smooth = ImageGrid::unit(width, height, generate_smooth_field(width, height))
            .expect("valid grid");
        let noisy = ImageGrid::unit(width, height, generate_noisy_field(width, height))
            .expect("valid grid");

        group.throughput(Throughput::Elements((width * height) as u64));

        group.bench_with_input(
            BenchmarkId::new("smooth_serial", format!("{}x{}", width, height)),
            &smooth,
            |b, grid| {
                b.iter(|| extract(black_box(grid), black_box(50.0)));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("noisy_serial", format!("{}x{}", width, height)),
            &noisy,
            |b, grid| {
                b.iter(|| extract(black_box(grid), black_box(50.0)));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("noisy_parallel", format!("{}x{}", width, height)),
            &noisy,
            |b, grid| {
                b.iter(|| extract_parallel(black_box(grid), black_box(50.0)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_build_segment, bench_extract);
criterion_main!(benches);
