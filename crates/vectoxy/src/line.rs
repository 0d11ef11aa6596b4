use crate::math::Point;

/// A line segment going from `from` to `to`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LineSegment {
    pub from: Point,
    pub to: Point,
}

impl LineSegment {
    /// Sample the segment at t (expecting t between 0 and 1).
    #[inline]
    pub fn sample(&self, t: f64) -> Point {
        self.from.lerp(self.to, t)
    }
}

#[cfg(test)]
use crate::math::point;

#[test]
fn line_sample() {
    let segment = LineSegment {
        from: point(1.0, 2.0),
        to: point(3.0, 6.0),
    };

    assert_eq!(segment.sample(0.0), point(1.0, 2.0));
    assert_eq!(segment.sample(0.5), point(2.0, 4.0));
    assert_eq!(segment.sample(1.0), point(3.0, 6.0));
}
