//! Coordinate traits for planar geometric computations.
//!
//! This module provides the traits that let the triangulator work with any
//! caller-supplied point type. The core is generic over [`Coordinate2D`], a
//! two-accessor capability, so callers never have to convert their points
//! into a crate-specific type.
//!
//! # Overview
//!
//! - **`Coordinate2D`**: Main abstraction: anything exposing `x()` and `y()`
//! - **`CoordinateScalar`**: Trait alias consolidating all scalar type requirements
//! - **`FiniteCheck`**: Validation of coordinate values (no NaN or infinity)
//! - **`OrderedEq`**: NaN-aware equality that treats NaN values as equal to themselves
//!
//! # Usage Examples
//!
//! ```rust
//! use planar_delaunay::geometry::traits::coordinate::*;
//!
//! // Arrays and tuples implement Coordinate2D out of the box
//! let a = [1.0_f64, 2.0];
//! let b = (3.0_f32, 4.0_f32);
//! assert_eq!(a.x(), 1.0);
//! assert_eq!(b.y(), 4.0);
//!
//! // All accessors can be read as f64 for the predicates
//! assert_eq!(b.to_xy(), [3.0, 4.0]);
//! assert!(a.validate().is_ok());
//!
//! let bad = [f64::NAN, 0.0];
//! assert!(bad.validate().is_err());
//! ```

use num_traits::{Float, cast};
use ordered_float::OrderedFloat;
use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Debug;

/// Errors that can occur during coordinate validation.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum CoordinateValidationError {
    /// A coordinate value is invalid (NaN or infinite).
    #[error("Invalid coordinate at axis {axis}: {coordinate_value}")]
    InvalidCoordinate {
        /// Axis of the invalid coordinate (0 for x, 1 for y).
        axis: usize,
        /// Value of the invalid coordinate, as a string.
        coordinate_value: String,
    },
}

// =============================================================================
// SUPPORTING TRAITS
// =============================================================================

/// Helper trait for checking finiteness of coordinates.
///
/// # Examples
///
/// ```
/// use planar_delaunay::geometry::traits::coordinate::FiniteCheck;
///
/// assert!(3.14f64.is_finite_generic());
/// assert!(!f64::NAN.is_finite_generic());
/// assert!(!f32::INFINITY.is_finite_generic());
/// ```
pub trait FiniteCheck {
    /// Returns true if the value is finite (not NaN or infinite).
    fn is_finite_generic(&self) -> bool;
}

macro_rules! impl_finite_check {
    (float: $($t:ty),*) => {
        $(
            impl FiniteCheck for $t {
                #[inline(always)]
                fn is_finite_generic(&self) -> bool {
                    self.is_finite()
                }
            }
        )*
    };
}

impl_finite_check!(float: f32, f64);

/// Helper trait for `OrderedFloat`-based equality comparison that handles NaN properly.
///
/// # Examples
///
/// ```
/// use planar_delaunay::geometry::traits::coordinate::OrderedEq;
///
/// assert!(1.0f64.ordered_eq(&1.0f64));
/// assert!(f64::NAN.ordered_eq(&f64::NAN));
/// assert!(0.0f64.ordered_eq(&(-0.0f64)));
/// ```
pub trait OrderedEq {
    /// Compares two values for equality, treating NaN as equal to itself.
    fn ordered_eq(&self, other: &Self) -> bool;
}

macro_rules! impl_ordered_eq {
    (float: $($t:ty),*) => {
        $(
            impl OrderedEq for $t {
                #[inline(always)]
                fn ordered_eq(&self, other: &Self) -> bool {
                    OrderedFloat(*self) == OrderedFloat(*other)
                }
            }
        )*
    };
}

impl_ordered_eq!(float: f32, f64);

/// Trait alias for the scalar type requirements of point coordinates.
///
/// # Required Traits
///
/// - `Float`: Floating-point arithmetic operations
/// - `OrderedEq`: NaN-aware equality comparison
/// - `FiniteCheck`: Validation of coordinate values
/// - `Default`, `Debug`, `Serialize`, `DeserializeOwned`
///
/// # Usage
///
/// ```rust
/// use planar_delaunay::geometry::traits::coordinate::CoordinateScalar;
///
/// fn widen<T: CoordinateScalar>(value: T) -> f64 {
///     value.to_f64_lossy()
/// }
/// assert_eq!(widen(1.5_f32), 1.5);
/// ```
pub trait CoordinateScalar:
    Float + OrderedEq + FiniteCheck + Default + Debug + Serialize + DeserializeOwned
{
    /// Widens the scalar to `f64`, which is the precision all predicates run at.
    ///
    /// Every `Float` type the crate supports converts losslessly (or by
    /// rounding, for wider types) to `f64`; a failed cast is reported as NaN
    /// so that coordinate validation rejects it.
    #[inline]
    fn to_f64_lossy(self) -> f64 {
        cast::<Self, f64>(self).unwrap_or(f64::NAN)
    }
}

impl CoordinateScalar for f32 {}

impl CoordinateScalar for f64 {}

// =============================================================================
// COORDINATE2D TRAIT
// =============================================================================

/// A planar point: anything exposing an `x` and a `y` coordinate.
///
/// This is the only capability the triangulator needs from caller points.
/// Implement it for your own point type to triangulate it in place, without
/// copying into a crate-specific representation.
///
/// # Examples
///
/// ```
/// use planar_delaunay::geometry::traits::coordinate::Coordinate2D;
/// use planar_delaunay::triangulate;
///
/// struct Site {
///     lon: f64,
///     lat: f64,
/// }
///
/// impl Coordinate2D for Site {
///     type Scalar = f64;
///     fn x(&self) -> f64 {
///         self.lon
///     }
///     fn y(&self) -> f64 {
///         self.lat
///     }
/// }
///
/// let sites = vec![
///     Site { lon: 0.0, lat: 0.0 },
///     Site { lon: 1.0, lat: 0.0 },
///     Site { lon: 0.0, lat: 1.0 },
/// ];
/// let dt = triangulate(&sites).unwrap();
/// assert_eq!(dt.number_of_triangles(), 1);
/// ```
pub trait Coordinate2D {
    /// The scalar type of both coordinates.
    type Scalar: CoordinateScalar;

    /// Returns the x coordinate.
    fn x(&self) -> Self::Scalar;

    /// Returns the y coordinate.
    fn y(&self) -> Self::Scalar;

    /// Returns both coordinates widened to `f64`.
    #[inline]
    fn to_xy(&self) -> [f64; 2] {
        [self.x().to_f64_lossy(), self.y().to_f64_lossy()]
    }

    /// Validates that both coordinates are finite.
    ///
    /// # Errors
    ///
    /// Returns `CoordinateValidationError::InvalidCoordinate` naming the first
    /// axis holding NaN or an infinity.
    fn validate(&self) -> Result<(), CoordinateValidationError> {
        for (axis, value) in [self.x(), self.y()].into_iter().enumerate() {
            if !value.is_finite_generic() {
                return Err(CoordinateValidationError::InvalidCoordinate {
                    axis,
                    coordinate_value: format!("{value:?}"),
                });
            }
        }
        Ok(())
    }
}

impl<T: CoordinateScalar> Coordinate2D for [T; 2] {
    type Scalar = T;

    #[inline]
    fn x(&self) -> T {
        self[0]
    }

    #[inline]
    fn y(&self) -> T {
        self[1]
    }
}

impl<T: CoordinateScalar> Coordinate2D for (T, T) {
    type Scalar = T;

    #[inline]
    fn x(&self) -> T {
        self.0
    }

    #[inline]
    fn y(&self) -> T {
        self.1
    }
}

impl<C: Coordinate2D> Coordinate2D for &C {
    type Scalar = C::Scalar;

    #[inline]
    fn x(&self) -> C::Scalar {
        (*self).x()
    }

    #[inline]
    fn y(&self) -> C::Scalar {
        (*self).y()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_widening() {
        assert_eq!(0.5_f32.to_f64_lossy(), 0.5);
        assert!(f32::NAN.to_f64_lossy().is_nan());
    }

    #[test]
    fn test_array_and_tuple_accessors() {
        let a = [1.5_f64, -2.0];
        let t = (0.25_f32, 8.0_f32);

        assert_eq!(a.to_xy(), [1.5, -2.0]);
        assert_eq!(t.to_xy(), [0.25, 8.0]);
        assert_eq!((&a).x(), 1.5);
    }

    #[test]
    fn test_validate_reports_axis() {
        let err = [1.0_f64, f64::INFINITY].validate().unwrap_err();
        assert_eq!(
            err,
            CoordinateValidationError::InvalidCoordinate {
                axis: 1,
                coordinate_value: "inf".to_string(),
            }
        );

        let err = (f32::NAN, 0.0_f32).validate().unwrap_err();
        assert!(matches!(
            err,
            CoordinateValidationError::InvalidCoordinate { axis: 0, .. }
        ));
    }

    #[test]
    fn test_ordered_eq_nan() {
        assert!(f32::NAN.ordered_eq(&f32::NAN));
        assert!(!1.0_f32.ordered_eq(&2.0));
    }
}
