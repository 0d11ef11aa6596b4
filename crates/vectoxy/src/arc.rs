//! Elliptic arc related maths and tools.

use std::f64::consts::PI;

use crate::math::{point, vector, Angle, Point, Rotation, Vector};

/// The two flags of an SVG arc command, selecting one of the four candidate
/// arcs between a pair of endpoints.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ArcFlags {
    /// Pick one of the two arcs spanning more than half a turn.
    pub large_arc: bool,
    /// Pick one of the two arcs going in the direction of increasing angles.
    pub sweep: bool,
}

/// An elliptic arc in endpoint parameterization, as written in SVG path data.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SvgArc {
    pub from: Point,
    pub to: Point,
    pub radii: Vector,
    pub x_rotation: Angle,
    pub flags: ArcFlags,
}

/// An elliptic arc in center parameterization.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Arc {
    pub center: Point,
    pub radii: Vector,
    pub start_angle: Angle,
    pub sweep_angle: Angle,
    pub x_rotation: Angle,
}

impl SvgArc {
    /// Per the SVG spec, arcs with a zero radius or coincident endpoints are
    /// rendered as straight line segments.
    pub fn is_straight_line(&self) -> bool {
        self.radii.x.abs() <= f64::EPSILON
            || self.radii.y.abs() <= f64::EPSILON
            || self.from == self.to
    }

    /// Converts to an arc in center parameterization.
    ///
    /// The endpoints must not be coincident and the radii must not be zero
    /// (check [`SvgArc::is_straight_line`] first).
    pub fn to_arc(&self) -> Arc {
        Arc::from_svg_arc(self)
    }
}

impl Arc {
    /// Converts from endpoint to center parameterization, following the
    /// conversion published in the SVG implementation notes (F.6.5), with the
    /// out-of-range radii correction of F.6.6 applied first.
    pub fn from_svg_arc(arc: &SvgArc) -> Arc {
        debug_assert!(!arc.from.x.is_nan());
        debug_assert!(!arc.from.y.is_nan());
        debug_assert!(!arc.to.x.is_nan());
        debug_assert!(!arc.to.y.is_nan());
        debug_assert!(!arc.radii.x.is_nan());
        debug_assert!(!arc.radii.y.is_nan());
        debug_assert!(!arc.x_rotation.get().is_nan());
        debug_assert!(!arc.is_straight_line());

        let mut rx = arc.radii.x.abs();
        let mut ry = arc.radii.y.abs();

        let xr = arc.x_rotation.get() % (2.0 * PI);
        let cos_phi = xr.cos();
        let sin_phi = xr.sin();
        let hd_x = (arc.from.x - arc.to.x) / 2.0;
        let hd_y = (arc.from.y - arc.to.y) / 2.0;
        let hs_x = (arc.from.x + arc.to.x) / 2.0;
        let hs_y = (arc.from.y + arc.to.y) / 2.0;

        // F6.5.1
        let p = point(
            cos_phi * hd_x + sin_phi * hd_y,
            -sin_phi * hd_x + cos_phi * hd_y,
        );

        // F6.6: radii too small for the endpoints are scaled up uniformly
        // until the ellipse can reach both.
        let lambda = (p.x * p.x) / (rx * rx) + (p.y * p.y) / (ry * ry);
        if lambda > 1.0 {
            let scale = lambda.sqrt();
            rx *= scale;
            ry *= scale;
        }

        let rxry = rx * ry;
        let rxpy = rx * p.y;
        let rypx = ry * p.x;
        let sum_of_sq = rxpy * rxpy + rypx * rypx;

        // F6.5.2. The max(0) guards against a slightly negative value when
        // the radii were corrected and rounding leaves the operand below zero.
        let sign_coe = if arc.flags.large_arc == arc.flags.sweep {
            -1.0
        } else {
            1.0
        };
        let coe = sign_coe * (((rxry * rxry - sum_of_sq) / sum_of_sq).max(0.0)).sqrt();

        let transformed_cx = coe * rxpy / ry;
        let transformed_cy = -coe * rypx / rx;

        // F6.5.3
        let center = point(
            cos_phi * transformed_cx - sin_phi * transformed_cy + hs_x,
            sin_phi * transformed_cx + cos_phi * transformed_cy + hs_y,
        );

        let u = vector((p.x - transformed_cx) / rx, (p.y - transformed_cy) / ry);
        let v = vector((-p.x - transformed_cx) / rx, (-p.y - transformed_cy) / ry);

        // F6.5.5
        let start_angle = directed_angle(vector(1.0, 0.0), u);

        // F6.5.6
        let mut sweep_angle = directed_angle(u, v) % (2.0 * PI);
        if !arc.flags.sweep && sweep_angle > 0.0 {
            sweep_angle -= 2.0 * PI;
        } else if arc.flags.sweep && sweep_angle < 0.0 {
            sweep_angle += 2.0 * PI;
        }

        Arc {
            center,
            radii: vector(rx, ry),
            start_angle: Angle::radians(start_angle),
            sweep_angle: Angle::radians(sweep_angle),
            x_rotation: arc.x_rotation,
        }
    }

    /// Sample the curve at t (expecting t between 0 and 1).
    #[inline]
    pub fn sample(&self, t: f64) -> Point {
        let angle = self.get_angle(t);
        self.center + sample_ellipse(self.radii, self.x_rotation, angle).to_vector()
    }

    /// Sample the curve's angle at t (expecting t between 0 and 1).
    #[inline]
    pub fn get_angle(&self, t: f64) -> Angle {
        self.start_angle + Angle::radians(self.sweep_angle.get() * t)
    }

    #[inline]
    pub fn end_angle(&self) -> Angle {
        self.start_angle + self.sweep_angle
    }

    #[inline]
    pub fn from(&self) -> Point {
        self.sample(0.0)
    }

    #[inline]
    pub fn to(&self) -> Point {
        self.sample(1.0)
    }
}

fn sample_ellipse(radii: Vector, x_rotation: Angle, angle: Angle) -> Point {
    Rotation::new(x_rotation).transform_point(point(
        radii.x * angle.get().cos(),
        radii.y * angle.get().sin(),
    ))
}

/// Signed angle from `a` to `b`, in `(-2π, 2π)`.
fn directed_angle(a: Vector, b: Vector) -> f64 {
    b.y.atan2(b.x) - a.y.atan2(a.x)
}

#[cfg(test)]
fn assert_approx_eq(a: Point, b: Point) {
    if (a.x - b.x).abs() > 1e-9 || (a.y - b.y).abs() > 1e-9 {
        panic!("{:?} != {:?}", a, b);
    }
}

#[test]
fn quarter_circle_sweep() {
    let arc = SvgArc {
        from: point(1.0, 0.0),
        to: point(0.0, 1.0),
        radii: vector(1.0, 1.0),
        x_rotation: Angle::radians(0.0),
        flags: ArcFlags {
            large_arc: false,
            sweep: true,
        },
    }
    .to_arc();

    assert_approx_eq(arc.center, point(0.0, 0.0));
    assert!((arc.sweep_angle.get() - PI / 2.0).abs() < 1e-9);
    assert_approx_eq(arc.from(), point(1.0, 0.0));
    assert_approx_eq(arc.to(), point(0.0, 1.0));
    let half_sqrt2 = std::f64::consts::SQRT_2 / 2.0;
    assert_approx_eq(arc.sample(0.5), point(half_sqrt2, half_sqrt2));
}

#[test]
fn quarter_circle_negative_sweep() {
    let arc = SvgArc {
        from: point(1.0, 0.0),
        to: point(0.0, 1.0),
        radii: vector(1.0, 1.0),
        x_rotation: Angle::radians(0.0),
        flags: ArcFlags {
            large_arc: false,
            sweep: false,
        },
    }
    .to_arc();

    assert_approx_eq(arc.center, point(1.0, 1.0));
    assert!((arc.sweep_angle.get() + PI / 2.0).abs() < 1e-9);
    assert_approx_eq(arc.from(), point(1.0, 0.0));
    assert_approx_eq(arc.to(), point(0.0, 1.0));
    let half_sqrt2 = std::f64::consts::SQRT_2 / 2.0;
    assert_approx_eq(arc.sample(0.5), point(1.0 - half_sqrt2, 1.0 - half_sqrt2));
}

#[test]
fn large_arc() {
    let arc = SvgArc {
        from: point(1.0, 0.0),
        to: point(0.0, 1.0),
        radii: vector(1.0, 1.0),
        x_rotation: Angle::radians(0.0),
        flags: ArcFlags {
            large_arc: true,
            sweep: true,
        },
    }
    .to_arc();

    assert_approx_eq(arc.center, point(1.0, 1.0));
    assert!((arc.sweep_angle.get() - 3.0 * PI / 2.0).abs() < 1e-9);
    assert_approx_eq(arc.from(), point(1.0, 0.0));
    assert_approx_eq(arc.to(), point(0.0, 1.0));
    // The large arc passes on the far side of the center.
    assert_approx_eq(arc.sample(1.0 / 3.0), point(2.0, 1.0));
    assert_approx_eq(arc.sample(2.0 / 3.0), point(1.0, 2.0));
}

#[test]
fn half_circle() {
    let arc = SvgArc {
        from: point(0.0, 0.0),
        to: point(2.0, 0.0),
        radii: vector(1.0, 1.0),
        x_rotation: Angle::radians(0.0),
        flags: ArcFlags {
            large_arc: false,
            sweep: true,
        },
    }
    .to_arc();

    assert_approx_eq(arc.center, point(1.0, 0.0));
    assert!((arc.sweep_angle.get() - PI).abs() < 1e-9);
    assert_approx_eq(arc.sample(0.5), point(1.0, -1.0));
}

#[test]
fn corrected_radii() {
    // The requested unit radii cannot reach both endpoints, F6.6 scales them.
    let arc = SvgArc {
        from: point(0.0, 0.0),
        to: point(4.0, 0.0),
        radii: vector(1.0, 1.0),
        x_rotation: Angle::radians(0.0),
        flags: ArcFlags {
            large_arc: false,
            sweep: true,
        },
    }
    .to_arc();

    assert!((arc.radii.x - 2.0).abs() < 1e-9);
    assert!((arc.radii.y - 2.0).abs() < 1e-9);
    assert_approx_eq(arc.center, point(2.0, 0.0));
    assert_approx_eq(arc.from(), point(0.0, 0.0));
    assert_approx_eq(arc.to(), point(4.0, 0.0));
}

#[test]
fn straight_line_arcs() {
    let flags = ArcFlags::default();
    let zero_radius = SvgArc {
        from: point(0.0, 0.0),
        to: point(1.0, 1.0),
        radii: vector(0.0, 2.0),
        x_rotation: Angle::radians(0.0),
        flags,
    };
    assert!(zero_radius.is_straight_line());

    let coincident = SvgArc {
        from: point(1.0, 1.0),
        to: point(1.0, 1.0),
        radii: vector(2.0, 2.0),
        x_rotation: Angle::radians(0.0),
        flags,
    };
    assert!(coincident.is_straight_line());
}
