use crate::arc::Arc;
use crate::cubic_bezier::CubicBezierSegment;
use crate::line::LineSegment;
use crate::math::Point;
use crate::quadratic_bezier::QuadraticBezierSegment;

/// Minimum number of points approximating a flattened curve.
pub const MIN_SAMPLES_PER_CURVE: u32 = 2;

/// A single drawable primitive: a straight line between two points, or one
/// of the supported parametric curves.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Segment {
    Line(LineSegment),
    Quadratic(QuadraticBezierSegment),
    Cubic(CubicBezierSegment),
    Arc(Arc),
}

impl Segment {
    /// Sample the segment at t (expecting t between 0 and 1).
    pub fn sample(&self, t: f64) -> Point {
        match self {
            Segment::Line(segment) => segment.sample(t),
            Segment::Quadratic(segment) => segment.sample(t),
            Segment::Cubic(segment) => segment.sample(t),
            Segment::Arc(segment) => segment.sample(t),
        }
    }

    /// Approximates the segment with `samples` points evenly spaced in the
    /// parametric domain, inclusive of both endpoints.
    ///
    /// Values below 2 are clamped to 2, which degenerates to the segment's
    /// endpoints (a deliberately coarse flattening mode, not an error).
    pub fn flatten(&self, samples: u32) -> Vec<Point> {
        let samples = samples.max(MIN_SAMPLES_PER_CURVE);
        let last = (samples - 1) as f64;
        (0..samples)
            .map(|i| self.sample(i as f64 / last))
            .collect()
    }
}

#[cfg(test)]
use crate::math::point;

#[test]
fn flatten_cardinality() {
    let curve = Segment::Cubic(CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(0.0, 1.0),
        ctrl2: point(1.0, 1.0),
        to: point(1.0, 0.0),
    });

    for n in 2..10 {
        let points = curve.flatten(n);
        assert_eq!(points.len(), n as usize);
        assert_eq!(points.first().copied(), Some(point(0.0, 0.0)));
        assert_eq!(points.last().copied(), Some(point(1.0, 0.0)));
    }
}

#[test]
fn flatten_clamps_samples() {
    let line = Segment::Line(LineSegment {
        from: point(0.0, 0.0),
        to: point(2.0, 2.0),
    });

    assert_eq!(line.flatten(0), vec![point(0.0, 0.0), point(2.0, 2.0)]);
    assert_eq!(line.flatten(1), vec![point(0.0, 0.0), point(2.0, 2.0)]);
    assert_eq!(line.flatten(2), vec![point(0.0, 0.0), point(2.0, 2.0)]);
    assert_eq!(line.flatten(3).len(), 3);
}
