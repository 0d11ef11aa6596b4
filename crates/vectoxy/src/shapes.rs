//! Point extraction for the basic SVG shape elements.
//!
//! These shapes produce their outlines directly, without going through the
//! path parser or the curve flattener.

use std::f64::consts::PI;

use crate::math::{point, Point};
use crate::FlattenConfig;

/// The outline of a rectangle as exactly 5 points: the four corners in
/// clockwise order starting at `(x, y)`, closing back onto `(x, y)`.
pub fn rect_points(x: f64, y: f64, width: f64, height: f64) -> [Point; 5] {
    [
        point(x, y),
        point(x + width, y),
        point(x + width, y + height),
        point(x, y + height),
        point(x, y),
    ]
}

/// Samples an ellipse outline with `config` points evenly spaced by angle
/// over `[0, 2π)`. The final angle is exclusive so the seam point is not
/// emitted twice. A circle passes the same radius for both axes.
pub fn ellipse_points(cx: f64, cy: f64, rx: f64, ry: f64, config: &FlattenConfig) -> Vec<Point> {
    let n = config.samples();
    let step = 2.0 * PI / n as f64;
    (0..n)
        .map(|i| {
            let angle = i as f64 * step;
            point(cx + rx * angle.cos(), cy + ry * angle.sin())
        })
        .collect()
}

/// Parses a `polygon`/`polyline` `points` attribute into its literal vertex
/// list, in document order, with no resampling.
///
/// Numbers are separated by any mix of whitespace and commas. Returns `None`
/// when a token does not parse as a finite number; a trailing unpaired
/// number is dropped.
pub fn polygon_points(points: &str) -> Option<Vec<Point>> {
    let mut values = Vec::new();
    for token in points.split(|c: char| c.is_whitespace() || c == ',') {
        if token.is_empty() {
            continue;
        }
        let value = token.parse::<f64>().ok()?;
        if !value.is_finite() {
            return None;
        }
        values.push(value);
    }

    Some(
        values
            .chunks_exact(2)
            .map(|pair| point(pair[0], pair[1]))
            .collect(),
    )
}

#[test]
fn rect_cardinality() {
    let points = rect_points(1.0, 2.0, 10.0, 5.0);

    assert_eq!(
        points,
        [
            point(1.0, 2.0),
            point(11.0, 2.0),
            point(11.0, 7.0),
            point(1.0, 7.0),
            point(1.0, 2.0),
        ]
    );

    // Degenerate sizes still produce the 5-point outline.
    assert_eq!(rect_points(0.0, 0.0, 0.0, 0.0).len(), 5);
}

#[test]
fn ellipse_seam_exclusive() {
    let config = FlattenConfig::new(4);
    let points = ellipse_points(0.0, 0.0, 2.0, 1.0, &config);

    assert_eq!(points.len(), 4);
    let expected = [
        point(2.0, 0.0),
        point(0.0, 1.0),
        point(-2.0, 0.0),
        point(0.0, -1.0),
    ];
    for (p, e) in points.iter().zip(&expected) {
        assert!((p.x - e.x).abs() < 1e-9 && (p.y - e.y).abs() < 1e-9);
    }
}

#[test]
fn polygon_vertex_list() {
    assert_eq!(
        polygon_points("0,0 10,0 10,10"),
        Some(vec![
            point(0.0, 0.0),
            point(10.0, 0.0),
            point(10.0, 10.0),
        ])
    );

    // Whitespace separators and a dropped trailing value.
    assert_eq!(
        polygon_points(" 1 2\n3,4 5 "),
        Some(vec![point(1.0, 2.0), point(3.0, 4.0)])
    );

    assert_eq!(polygon_points(""), Some(Vec::new()));
    assert_eq!(polygon_points("1,oops"), None);
    assert_eq!(polygon_points("1,1e999"), None);
}
