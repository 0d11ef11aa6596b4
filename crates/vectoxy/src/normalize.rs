//! Rescales aggregated coordinates into the `[-1, 1]` interval.

use crate::extract::CoordinateArrays;

/// Remaps each axis independently so the smallest value lands on -1 and the
/// largest on 1: `x' = 2·(x - min)/(max - min) - 1`.
///
/// The axes are scaled independently, so aspect ratio is not preserved.
///
/// An axis whose values are all identical has no extent to scale; every
/// coordinate on that axis maps to 0 instead of dividing by zero, so no
/// non-finite value ever reaches the output.
pub fn normalize(coordinates: CoordinateArrays) -> CoordinateArrays {
    CoordinateArrays {
        xs: normalize_axis(&coordinates.xs),
        ys: normalize_axis(&coordinates.ys),
    }
}

fn normalize_axis(values: &[f64]) -> Vec<f64> {
    let (min, max) = match axis_bounds(values) {
        Some(bounds) => bounds,
        None => return Vec::new(),
    };

    if max == min {
        return vec![0.0; values.len()];
    }

    let extent = max - min;
    values.iter().map(|v| 2.0 * (v - min) / extent - 1.0).collect()
}

fn axis_bounds(values: &[f64]) -> Option<(f64, f64)> {
    let mut iter = values.iter();
    let first = *iter.next()?;
    let mut min = first;
    let mut max = first;
    for &v in iter {
        min = min.min(v);
        max = max.max(v);
    }
    Some((min, max))
}

#[test]
fn range_and_extremes() {
    let raw = CoordinateArrays {
        xs: vec![0.0, 10.0, 10.0],
        ys: vec![0.0, 0.0, 10.0],
    };
    let normalized = normalize(raw);

    assert_eq!(normalized.xs, vec![-1.0, 1.0, 1.0]);
    assert_eq!(normalized.ys, vec![-1.0, -1.0, 1.0]);
}

#[test]
fn values_stay_in_range() {
    let raw = CoordinateArrays {
        xs: vec![3.0, -7.5, 12.25, 0.0, 5.5],
        ys: vec![100.0, 0.5, -3.0, 42.0, 7.0],
    };
    let normalized = normalize(raw);

    for v in normalized.xs.iter().chain(&normalized.ys) {
        assert!(*v >= -1.0 && *v <= 1.0);
        assert!(v.is_finite());
    }
    assert!(normalized.xs.contains(&-1.0) && normalized.xs.contains(&1.0));
    assert!(normalized.ys.contains(&-1.0) && normalized.ys.contains(&1.0));
}

#[test]
fn idempotent() {
    let raw = CoordinateArrays {
        xs: vec![2.0, 4.0, 8.0],
        ys: vec![-3.0, 0.0, 3.0],
    };
    let once = normalize(raw);
    let twice = normalize(once.clone());

    assert_eq!(once, twice);
}

#[test]
fn degenerate_axis_maps_to_zero() {
    let raw = CoordinateArrays {
        xs: vec![5.0, 5.0, 5.0],
        ys: vec![0.0, 1.0, 2.0],
    };
    let normalized = normalize(raw);

    assert_eq!(normalized.xs, vec![0.0, 0.0, 0.0]);
    assert_eq!(normalized.ys, vec![-1.0, 0.0, 1.0]);

    // Degenerate output is itself a fixed point.
    assert_eq!(normalize(normalized.clone()), normalized);
}

#[test]
fn single_point() {
    let raw = CoordinateArrays {
        xs: vec![3.0],
        ys: vec![4.0],
    };
    let normalized = normalize(raw);

    assert_eq!(normalized.xs, vec![0.0]);
    assert_eq!(normalized.ys, vec![0.0]);
}
