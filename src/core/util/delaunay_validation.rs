//! Structural and Delaunay-property validation of a finished triangulation.
//!
//! These checks are diagnostics: the build never calls them. They recompute
//! what the triangulator maintained incrementally and compare.

#![forbid(unsafe_code)]

use crate::core::triangulation_data_structure::{EMPTY, Tds, next_halfedge};
use crate::geometry::algorithms::convex_hull::convex_hull_coords;
use crate::geometry::predicates::{circumcenter, oriented_area};
use crate::geometry::traits::coordinate::Coordinate2D;
use crate::geometry::util::{polygon_area, polygon_perimeter, squared_distance};
use thiserror::Error;

/// Absolute tolerance of the hull comparisons, scaled by `max(1, magnitude)`.
pub const HULL_TOLERANCE: f64 = 1e-9;

/// Relative slack of the empty-circumcircle test: a point counts as inside
/// only when its squared distance to the centre is below `r² (1 - slack)`.
/// Points on the circle, as in any regular grid, are not violations.
pub const CIRCUMCIRCLE_SLACK: f64 = 1e-9;

/// Errors reported by triangulation validation.
///
/// # Examples
///
/// ```rust
/// use planar_delaunay::core::util::delaunay_validation::ValidationError;
///
/// let err = ValidationError::DelaunayViolation { triangle: 3, point: 8 };
/// assert!(err.to_string().contains("triangle 3"));
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum ValidationError {
    /// A half-edge array entry points outside the array.
    #[error("Half-edge {halfedge} references {opposite}, outside 0..{len}")]
    HalfedgeOutOfRange {
        /// Offending half-edge.
        halfedge: usize,
        /// Stored opposite.
        opposite: usize,
        /// Number of half-edges.
        len: usize,
    },
    /// A triangle corner references a point that does not exist.
    #[error("Half-edge {halfedge} starts at point {point}, outside 0..{len}")]
    PointOutOfRange {
        /// Offending half-edge.
        halfedge: usize,
        /// Stored point index.
        point: usize,
        /// Number of points.
        len: usize,
    },
    /// `halfedges[halfedges[e]] != e`, or opposite half-edges join different points.
    #[error(
        "Half-edge {halfedge} and its opposite {opposite} disagree (opposite links back to {back})"
    )]
    AsymmetricHalfedge {
        /// Offending half-edge.
        halfedge: usize,
        /// Its stored opposite.
        opposite: usize,
        /// What the opposite links back to.
        back: usize,
    },
    /// Hull area, triangle area and recomputed hull area differ.
    #[error(
        "Area mismatch: hull polygon {hull_area}, triangles {triangle_area}, expected {expected_area}"
    )]
    HullAreaMismatch {
        /// Area of the reported hull polygon.
        hull_area: f64,
        /// Sum of the triangle areas.
        triangle_area: f64,
        /// Area of an independently computed convex hull.
        expected_area: f64,
    },
    /// Hull perimeter differs from the recomputed hull perimeter.
    #[error("Perimeter mismatch: hull polygon {hull_perimeter}, expected {expected_perimeter}")]
    HullPerimeterMismatch {
        /// Perimeter of the reported hull polygon.
        hull_perimeter: f64,
        /// Perimeter of an independently computed convex hull.
        expected_perimeter: f64,
    },
    /// A triangle's circumcircle strictly contains another point.
    #[error("Delaunay violation: triangle {triangle} has point {point} inside its circumcircle")]
    DelaunayViolation {
        /// Index of the offending triangle.
        triangle: usize,
        /// Input index of a point inside its circumcircle.
        point: usize,
    },
}

// =============================================================================
// STRUCTURAL VALIDATION
// =============================================================================

/// Checks index ranges and half-edge symmetry.
///
/// # Errors
///
/// Returns the first range or symmetry violation found.
pub fn validate_halfedges(tds: &Tds, number_of_points: usize) -> Result<(), ValidationError> {
    let triangles = tds.triangles();
    let halfedges = tds.halfedges();
    let len = halfedges.len();

    for (halfedge, &point) in triangles.iter().enumerate() {
        if point >= number_of_points {
            return Err(ValidationError::PointOutOfRange {
                halfedge,
                point,
                len: number_of_points,
            });
        }
    }

    for (halfedge, &opposite) in halfedges.iter().enumerate() {
        if opposite == EMPTY {
            continue;
        }
        if opposite >= len {
            return Err(ValidationError::HalfedgeOutOfRange {
                halfedge,
                opposite,
                len,
            });
        }
        let back = halfedges[opposite];
        let same_edge = triangles[halfedge] == triangles[next_halfedge(opposite)]
            && triangles[opposite] == triangles[next_halfedge(halfedge)];
        if back != halfedge || !same_edge {
            return Err(ValidationError::AsymmetricHalfedge {
                halfedge,
                opposite,
                back,
            });
        }
    }
    Ok(())
}

fn within_tolerance(value: f64, expected: f64) -> bool {
    (value - expected).abs() <= HULL_TOLERANCE * expected.abs().max(1.0)
}

/// Full structural check of a triangulation of `points`.
///
/// Runs [`validate_halfedges`], then compares the area and perimeter of
/// `hull` and the summed triangle area against a convex hull computed from
/// scratch.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found.
pub fn validate_triangulation<P: Coordinate2D>(
    points: &[P],
    tds: &Tds,
    hull: &[usize],
) -> Result<(), ValidationError> {
    validate_halfedges(tds, points.len())?;
    if let Some(&point) = hull.iter().find(|&&i| i >= points.len()) {
        return Err(ValidationError::PointOutOfRange {
            halfedge: EMPTY,
            point,
            len: points.len(),
        });
    }

    let hull_coords: Vec<[f64; 2]> = hull.iter().map(|&i| points[i].to_xy()).collect();
    let expected_coords = convex_hull_coords(points);

    let hull_area = polygon_area(&hull_coords);
    let expected_area = polygon_area(&expected_coords);
    let triangle_area: f64 = tds
        .triangles()
        .chunks_exact(3)
        .map(|t| oriented_area(points[t[0]].to_xy(), points[t[1]].to_xy(), points[t[2]].to_xy()))
        .sum::<f64>()
        / 2.0;

    if !within_tolerance(hull_area, expected_area) || !within_tolerance(triangle_area, expected_area)
    {
        return Err(ValidationError::HullAreaMismatch {
            hull_area,
            triangle_area,
            expected_area,
        });
    }

    let hull_perimeter = polygon_perimeter(&hull_coords);
    let expected_perimeter = polygon_perimeter(&expected_coords);
    if !within_tolerance(hull_perimeter, expected_perimeter) {
        return Err(ValidationError::HullPerimeterMismatch {
            hull_perimeter,
            expected_perimeter,
        });
    }

    Ok(())
}

// =============================================================================
// DELAUNAY PROPERTY VALIDATION
// =============================================================================

/// First point strictly inside the circumcircle of triangle `t`, if any.
fn point_inside_circumcircle(coords: &[[f64; 2]], corners: [usize; 3]) -> Option<usize> {
    let [a, b, c] = corners.map(|i| coords[i]);
    // Flat triangles have no finite circle to violate.
    let center = circumcenter(a, b, c)?;
    let radius_squared = squared_distance(center, a);
    let limit = radius_squared * (1.0 - CIRCUMCIRCLE_SLACK);

    coords
        .iter()
        .enumerate()
        .find(|&(i, &p)| !corners.contains(&i) && squared_distance(center, p) < limit)
        .map(|(i, _)| i)
}

fn violations<P: Coordinate2D>(points: &[P], tds: &Tds) -> impl Iterator<Item = (usize, usize)> {
    let coords: Vec<[f64; 2]> = points.iter().map(Coordinate2D::to_xy).collect();
    let corners: Vec<[usize; 3]> = tds
        .triangles()
        .chunks_exact(3)
        .map(|t| [t[0], t[1], t[2]])
        .collect();
    corners
        .into_iter()
        .enumerate()
        .filter_map(move |(t, corners)| {
            point_inside_circumcircle(&coords, corners).map(|point| (t, point))
        })
}

/// Triangles whose circumcircle strictly contains another point. O(T·N).
///
/// # Examples
///
/// ```rust
/// use planar_delaunay::core::util::delaunay_validation::find_delaunay_violations;
/// use planar_delaunay::triangulate;
///
/// let points = [[0.0, 0.0], [3.0, 0.0], [3.0, 2.0], [0.0, 2.0], [1.0, 1.0]];
/// let dt = triangulate(&points).unwrap();
/// assert!(find_delaunay_violations(&points, dt.tds()).is_empty());
/// ```
#[must_use]
pub fn find_delaunay_violations<P: Coordinate2D>(points: &[P], tds: &Tds) -> Vec<usize> {
    violations(points, tds).map(|(t, _)| t).collect()
}

/// Checks the empty-circumcircle property of every triangle.
///
/// # Errors
///
/// Returns [`ValidationError::DelaunayViolation`] for the first offending triangle.
pub fn validate_delaunay<P: Coordinate2D>(points: &[P], tds: &Tds) -> Result<(), ValidationError> {
    match violations(points, tds).next() {
        Some((triangle, point)) => Err(ValidationError::DelaunayViolation { triangle, point }),
        None => Ok(()),
    }
}
