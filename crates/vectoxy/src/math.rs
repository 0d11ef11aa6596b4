//! f64 aliases of the euclid types used everywhere in this crate.

/// Alias for `euclid::default::Point2D<f64>`.
pub type Point = euclid::default::Point2D<f64>;

/// Alias for `euclid::default::Vector2D<f64>`.
pub type Vector = euclid::default::Vector2D<f64>;

/// Alias for `euclid::default::Rotation2D<f64>`.
pub type Rotation = euclid::default::Rotation2D<f64>;

/// An angle in radians (f64).
pub type Angle = euclid::Angle<f64>;

/// Shorthand for `Point::new(x, y)`.
#[inline]
pub fn point(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Shorthand for `Vector::new(x, y)`.
#[inline]
pub fn vector(x: f64, y: f64) -> Vector {
    Vector::new(x, y)
}
