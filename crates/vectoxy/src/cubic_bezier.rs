use crate::math::Point;

/// A 2d curve segment defined by four points: the beginning of the segment, two control
/// points and the end of the segment.
///
/// The curve is defined by equation:
/// `∀ t ∈ [0..1],  P(t) = (1 - t)³ * from + 3 * (1 - t)² * t * ctrl1 + 3 * t² * (1 - t) * ctrl2 + t³ * to`
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CubicBezierSegment {
    pub from: Point,
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub to: Point,
}

impl CubicBezierSegment {
    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: f64) -> Point {
        let t2 = t * t;
        let t3 = t2 * t;
        let one_t = 1.0 - t;
        let one_t2 = one_t * one_t;
        let one_t3 = one_t2 * one_t;

        self.from * one_t3
            + self.ctrl1.to_vector() * 3.0 * one_t2 * t
            + self.ctrl2.to_vector() * 3.0 * one_t * t2
            + self.to.to_vector() * t3
    }

    /// Sample the x coordinate of the curve at t (expecting t between 0 and 1).
    pub fn x(&self, t: f64) -> f64 {
        let t2 = t * t;
        let t3 = t2 * t;
        let one_t = 1.0 - t;
        let one_t2 = one_t * one_t;
        let one_t3 = one_t2 * one_t;

        self.from.x * one_t3
            + self.ctrl1.x * 3.0 * one_t2 * t
            + self.ctrl2.x * 3.0 * one_t * t2
            + self.to.x * t3
    }

    /// Sample the y coordinate of the curve at t (expecting t between 0 and 1).
    pub fn y(&self, t: f64) -> f64 {
        let t2 = t * t;
        let t3 = t2 * t;
        let one_t = 1.0 - t;
        let one_t2 = one_t * one_t;
        let one_t3 = one_t2 * one_t;

        self.from.y * one_t3
            + self.ctrl1.y * 3.0 * one_t2 * t
            + self.ctrl2.y * 3.0 * one_t * t2
            + self.to.y * t3
    }
}

#[cfg(test)]
use crate::math::point;

#[test]
fn cubic_sample() {
    let curve = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(0.0, 1.0),
        ctrl2: point(1.0, 1.0),
        to: point(1.0, 0.0),
    };

    assert_eq!(curve.sample(0.0), curve.from);
    assert_eq!(curve.sample(1.0), curve.to);
    assert_eq!(curve.sample(0.5), point(0.5, 0.75));
    assert_eq!(curve.x(0.5), 0.5);
    assert_eq!(curve.y(0.5), 0.75);
}
