//! Synthetic scalar fields with known isocontours.
//!
//! All generators return samples in row-major order (`j * nx + i`), the
//! layout expected by `ImageGrid`.

/// Field equal to `value` everywhere.
pub fn constant_field(nx: usize, ny: usize, value: f64) -> Vec<f64> {
    vec![value; nx * ny]
}

/// Linear ramp along x: sample `(i, j)` is `i * step`.
///
/// Every isovalue strictly between two columns produces one vertical
/// segment per cell row.
///
/// # Example
///
/// ```
/// use test_utils::linear_ramp_x;
///
/// let field = linear_ramp_x(3, 2, 10.0);
/// assert_eq!(field, vec![0.0, 10.0, 20.0, 0.0, 10.0, 20.0]);
/// ```
pub fn linear_ramp_x(nx: usize, ny: usize, step: f64) -> Vec<f64> {
    let mut data = Vec::with_capacity(nx * ny);
    for _j in 0..ny {
        for i in 0..nx {
            data.push(i as f64 * step);
        }
    }
    data
}

/// Cone with `peak` at the grid center falling off linearly with distance.
///
/// Isovalues in `(0, peak)` trace a closed loop around the center.
pub fn radial_peak(nx: usize, ny: usize, peak: f64) -> Vec<f64> {
    let cx = (nx as f64 - 1.0) / 2.0;
    let cy = (ny as f64 - 1.0) / 2.0;
    let max_dist = (cx * cx + cy * cy).sqrt().max(f64::EPSILON);

    let mut data = Vec::with_capacity(nx * ny);
    for j in 0..ny {
        for i in 0..nx {
            let dx = i as f64 - cx;
            let dy = j as f64 - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            data.push(peak * (1.0 - dist / max_dist));
        }
    }
    data
}

/// Checkerboard of `low`/`high` samples.
///
/// Any isovalue between the two makes every cell a saddle.
pub fn checkerboard(nx: usize, ny: usize, low: f64, high: f64) -> Vec<f64> {
    let mut data = Vec::with_capacity(nx * ny);
    for j in 0..ny {
        for i in 0..nx {
            data.push(if (i + j) % 2 == 0 { low } else { high });
        }
    }
    data
}

/// Smooth field with several hills and valleys, values roughly in `[0, 100]`.
pub fn wavy_field(nx: usize, ny: usize) -> Vec<f64> {
    use std::f64::consts::PI;

    let mut data = Vec::with_capacity(nx * ny);
    for j in 0..ny {
        for i in 0..nx {
            let fx = i as f64 / nx as f64;
            let fy = j as f64 / ny as f64;
            let v1 = (fx * PI * 4.0).sin() * 20.0;
            let v2 = (fy * PI * 4.0).sin() * 20.0;
            let v3 = ((fx + fy) * PI * 2.0).sin() * 10.0;
            data.push(50.0 + v1 + v2 + v3);
        }
    }
    data
}
