//! Geometric utility functions: distances, bounding boxes and polygon measures.
//!
//! These helpers operate on `[f64; 2]` coordinates, the precision every
//! predicate in the crate runs at. Use [`Coordinate2D::to_xy`] to obtain
//! them from caller points.
//!
//! [`Coordinate2D::to_xy`]: crate::geometry::traits::coordinate::Coordinate2D::to_xy

use crate::geometry::traits::coordinate::Coordinate2D;

/// Squared Euclidean distance between `a` and `b`.
#[inline]
#[must_use]
pub fn squared_distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    dx * dx + dy * dy
}

/// Euclidean distance between `a` and `b`, computed with `hypot` to avoid
/// intermediate overflow.
///
/// # Example
///
/// ```
/// use planar_delaunay::geometry::util::distance;
///
/// assert_eq!(distance([0.0, 0.0], [3.0, 4.0]), 5.0);
/// ```
#[inline]
#[must_use]
pub fn distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    (a[0] - b[0]).hypot(a[1] - b[1])
}

/// Centre of the axis-aligned bounding box of `points`.
///
/// Returns `None` for an empty slice.
///
/// # Example
///
/// ```
/// use planar_delaunay::geometry::util::bounding_box_center;
///
/// let points = [[0.0, 0.0], [4.0, 1.0], [2.0, -3.0]];
/// assert_eq!(bounding_box_center(&points), Some([2.0, -1.0]));
/// ```
#[must_use]
pub fn bounding_box_center<P: Coordinate2D>(points: &[P]) -> Option<[f64; 2]> {
    let mut iter = points.iter().map(Coordinate2D::to_xy);
    let first = iter.next()?;
    let (min, max) = iter.fold((first, first), |(min, max), [x, y]| {
        ([min[0].min(x), min[1].min(y)], [max[0].max(x), max[1].max(y)])
    });
    Some([(min[0] + max[0]) / 2.0, (min[1] + max[1]) / 2.0])
}

/// Signed area of a closed polygon (shoelace formula).
///
/// The polygon is given without a repeated closing vertex. The area is
/// positive for counter-clockwise polygons. Vertices are taken relative to
/// the first one, so the result stays accurate for polygons far from the
/// origin.
///
/// # Example
///
/// ```
/// use planar_delaunay::geometry::util::polygon_area;
///
/// let square = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
/// assert_eq!(polygon_area(&square), 1.0);
/// ```
#[must_use]
pub fn polygon_area(vertices: &[[f64; 2]]) -> f64 {
    let Some(&origin) = vertices.first() else {
        return 0.0;
    };
    let relative = |p: [f64; 2]| [p[0] - origin[0], p[1] - origin[1]];
    // The closing edge back to `origin` contributes zero.
    let twice: f64 = vertices
        .windows(2)
        .map(|pair| {
            let p = relative(pair[0]);
            let q = relative(pair[1]);
            p[0] * q[1] - q[0] * p[1]
        })
        .sum();
    twice / 2.0
}

/// Perimeter of a closed polygon given without a repeated closing vertex.
///
/// # Example
///
/// ```
/// use planar_delaunay::geometry::util::polygon_perimeter;
///
/// let square = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
/// assert_eq!(polygon_perimeter(&square), 4.0);
/// assert_eq!(polygon_perimeter(&[]), 0.0);
/// ```
#[must_use]
pub fn polygon_perimeter(vertices: &[[f64; 2]]) -> f64 {
    let Some(&last) = vertices.last() else {
        return 0.0;
    };
    let mut previous = last;
    let mut total = 0.0;
    for &p in vertices {
        total += distance(previous, p);
        previous = p;
    }
    total
}
