use crate::math::Point;

/// A 2d curve segment defined by three points: the beginning of the segment, a control
/// point and the end of the segment.
///
/// The curve is defined by equation:
/// `∀ t ∈ [0..1],  P(t) = (1 - t)² * from + 2 * (1 - t) * t * ctrl + t² * to`
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct QuadraticBezierSegment {
    pub from: Point,
    pub ctrl: Point,
    pub to: Point,
}

impl QuadraticBezierSegment {
    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: f64) -> Point {
        let t2 = t * t;
        let one_t = 1.0 - t;
        let one_t2 = one_t * one_t;

        self.from * one_t2 + self.ctrl.to_vector() * 2.0 * one_t * t + self.to.to_vector() * t2
    }

    /// Sample the x coordinate of the curve at t (expecting t between 0 and 1).
    pub fn x(&self, t: f64) -> f64 {
        let t2 = t * t;
        let one_t = 1.0 - t;
        let one_t2 = one_t * one_t;

        self.from.x * one_t2 + self.ctrl.x * 2.0 * one_t * t + self.to.x * t2
    }

    /// Sample the y coordinate of the curve at t (expecting t between 0 and 1).
    pub fn y(&self, t: f64) -> f64 {
        let t2 = t * t;
        let one_t = 1.0 - t;
        let one_t2 = one_t * one_t;

        self.from.y * one_t2 + self.ctrl.y * 2.0 * one_t * t + self.to.y * t2
    }
}

#[cfg(test)]
use crate::math::point;

#[test]
fn quadratic_sample() {
    let curve = QuadraticBezierSegment {
        from: point(0.0, 0.0),
        ctrl: point(1.0, 1.0),
        to: point(2.0, 0.0),
    };

    assert_eq!(curve.sample(0.0), curve.from);
    assert_eq!(curve.sample(1.0), curve.to);
    assert_eq!(curve.sample(0.5), point(1.0, 0.5));
    assert_eq!(curve.x(0.5), 1.0);
    assert_eq!(curve.y(0.5), 0.5);
}
