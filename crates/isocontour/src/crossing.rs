//! Edge crossing solver.

use contour_common::Position;

/// Interpolation parameter of the isovalue along an edge with endpoint
/// values `val_a` and `val_b`.
///
/// Returns `None` unless the endpoints lie strictly on opposite sides of the
/// isovalue. An endpoint exactly equal to the isovalue never produces a
/// crossing. Non-finite samples (NaN, infinities) never do either, since
/// they have no meaningful interpolation parameter.
pub fn crossing_parameter(val_a: f64, val_b: f64, isovalue: f64) -> Option<f64> {
    if !val_a.is_finite() || !val_b.is_finite() {
        return None;
    }
    // Compare signs directly; the product of two tiny differences underflows to zero.
    let straddles =
        (val_a < isovalue && val_b > isovalue) || (val_a > isovalue && val_b < isovalue);
    if !straddles {
        return None;
    }

    // Implied by the strict sign test; guards the division below.
    assert!(
        val_a != val_b,
        "edge crossing with equal endpoint values ({val_a}) at isovalue {isovalue}"
    );

    let mut t = (isovalue - val_a) / (val_b - val_a);
    if !t.is_finite() {
        // Both differences overflowed; halve before subtracting.
        t = (isovalue * 0.5 - val_a * 0.5) / (val_b * 0.5 - val_a * 0.5);
    }
    debug_assert!(
        (0.0..=1.0).contains(&t),
        "crossing parameter {t} outside [0, 1] for values {val_a}, {val_b} at {isovalue}"
    );
    Some(t)
}

/// Position where the isovalue crosses edge A→B, if it does.
pub fn edge_crossing(
    pos_a: &Position,
    val_a: f64,
    pos_b: &Position,
    val_b: f64,
    isovalue: f64,
) -> Option<Position> {
    crossing_parameter(val_a, val_b, isovalue).map(|t| pos_a.lerp(pos_b, t))
}
