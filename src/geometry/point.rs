//! A ready-made planar point type.
//!
//! The triangulator accepts any [`Coordinate2D`] implementor; [`Point`] is the
//! crate's own convenience type for callers that have no point type of their
//! own (tests, examples, serialized meshes).
//!
//! # Special Floating-Point Equality Semantics
//!
//! `NaN` coordinates compare equal to themselves so that `Point` can implement
//! `Eq`. Compare the raw coordinates if IEEE 754 semantics are required.

#![forbid(unsafe_code)]

use crate::geometry::traits::coordinate::{Coordinate2D, CoordinateScalar};
use serde::{Deserialize, Serialize};

/// A point in the plane with coordinates of scalar type `T`.
///
/// # Examples
///
/// ```rust
/// use planar_delaunay::geometry::point::Point;
/// use planar_delaunay::geometry::traits::coordinate::Coordinate2D;
///
/// let p = Point::new([1.0, 2.0]);
/// assert_eq!(p.coords(), &[1.0, 2.0]);
/// assert_eq!(p.x(), 1.0);
/// ```
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: CoordinateScalar"))]
pub struct Point<T = f64>
where
    T: CoordinateScalar,
{
    coords: [T; 2],
}

impl<T> Point<T>
where
    T: CoordinateScalar,
{
    /// Creates a new point from its `[x, y]` coordinates.
    #[inline]
    #[must_use]
    pub const fn new(coords: [T; 2]) -> Self {
        Self { coords }
    }

    /// Returns a reference to the point's coordinates.
    #[inline]
    #[must_use]
    pub const fn coords(&self) -> &[T; 2] {
        &self.coords
    }

    /// Returns the origin `(0, 0)`.
    #[must_use]
    pub fn origin() -> Self {
        Self::new([T::zero(), T::zero()])
    }
}

impl<T> Coordinate2D for Point<T>
where
    T: CoordinateScalar,
{
    type Scalar = T;

    #[inline]
    fn x(&self) -> T {
        self.coords[0]
    }

    #[inline]
    fn y(&self) -> T {
        self.coords[1]
    }
}

impl<T> PartialEq for Point<T>
where
    T: CoordinateScalar,
{
    fn eq(&self, other: &Self) -> bool {
        self.coords
            .iter()
            .zip(other.coords.iter())
            .all(|(a, b)| a.ordered_eq(b))
    }
}

impl<T> Eq for Point<T> where T: CoordinateScalar {}

impl<T> From<[T; 2]> for Point<T>
where
    T: CoordinateScalar,
{
    fn from(coords: [T; 2]) -> Self {
        Self::new(coords)
    }
}

impl<T> From<(T, T)> for Point<T>
where
    T: CoordinateScalar,
{
    fn from((x, y): (T, T)) -> Self {
        Self::new([x, y])
    }
}

impl<T> From<Point<T>> for [T; 2]
where
    T: CoordinateScalar,
{
    fn from(point: Point<T>) -> Self {
        point.coords
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_conversions() {
        let p: Point<f64> = (1.0, 2.0).into();
        let q: Point<f64> = [1.0, 2.0].into();
        assert_eq!(p, q);

        let coords: [f64; 2] = p.into();
        assert_eq!(coords, [1.0, 2.0]);
        assert_eq!(Point::<f32>::origin().coords(), &[0.0, 0.0]);
    }

    #[test]
    fn point_nan_equality() {
        let a = Point::new([f64::NAN, 1.0]);
        let b = Point::new([f64::NAN, 1.0]);
        assert_eq!(a, b);
        assert!(a.validate().is_err());
    }

    #[test]
    fn point_serde_roundtrip() {
        let p = Point::new([0.5_f64, -3.25]);
        let json = serde_json::to_string(&p).unwrap();
        let back: Point<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
