//! Convex hull of a planar point set, computed independently of the triangulation.
//!
//! This is Andrew's monotone-chain algorithm in O(n log n). The triangulator
//! maintains its own hull incrementally; this module exists so that
//! [`validate`](crate::core::delaunay_triangulation::DelaunayTriangulation::validate)
//! can compare that hull against one built from scratch.
//!
//! Collinear points on hull edges are dropped, so the result is the minimal
//! counter-clockwise vertex sequence. Coincident points contribute a single
//! vertex (the one with the lowest input index).

use crate::geometry::predicates::oriented_area;
use crate::geometry::traits::coordinate::Coordinate2D;
use ordered_float::OrderedFloat;

/// Computes the convex hull of `points` as counter-clockwise input indices.
///
/// The sequence starts at the lowest-leftmost point and does not repeat it at
/// the end. Degenerate inputs return what hull exists: an empty vector for no
/// points, one index when all points coincide, and the two extreme indices
/// when all points are collinear.
///
/// # Example
///
/// ```
/// use planar_delaunay::geometry::algorithms::convex_hull::convex_hull_indices;
///
/// let points = [[0.0, 0.0], [2.0, 0.0], [1.0, 1.0], [2.0, 2.0], [0.0, 2.0], [1.0, 0.0]];
/// assert_eq!(convex_hull_indices(&points), vec![0, 1, 3, 4]);
/// ```
#[must_use]
pub fn convex_hull_indices<P: Coordinate2D>(points: &[P]) -> Vec<usize> {
    let coords: Vec<[f64; 2]> = points.iter().map(Coordinate2D::to_xy).collect();

    let mut order: Vec<usize> = (0..coords.len()).collect();
    order.sort_by_key(|&i| (OrderedFloat(coords[i][0]), OrderedFloat(coords[i][1]), i));
    order.dedup_by(|later, earlier| coords[*later] == coords[*earlier]);

    if order.len() < 3 {
        return order;
    }

    let mut hull: Vec<usize> = Vec::with_capacity(order.len() + 1);

    // Lower chain
    for &i in &order {
        while hull.len() >= 2
            && oriented_area(
                coords[hull[hull.len() - 2]],
                coords[hull[hull.len() - 1]],
                coords[i],
            ) <= 0.0
        {
            hull.pop();
        }
        hull.push(i);
    }

    // Upper chain
    let lower_len = hull.len() + 1;
    for &i in order.iter().rev().skip(1) {
        while hull.len() >= lower_len
            && oriented_area(
                coords[hull[hull.len() - 2]],
                coords[hull[hull.len() - 1]],
                coords[i],
            ) <= 0.0
        {
            hull.pop();
        }
        hull.push(i);
    }

    // The last point pushed is the first point again.
    hull.pop();
    hull
}

/// Convenience wrapper returning the hull vertices as `[f64; 2]` coordinates.
#[must_use]
pub fn convex_hull_coords<P: Coordinate2D>(points: &[P]) -> Vec<[f64; 2]> {
    convex_hull_indices(points)
        .into_iter()
        .map(|i| points[i].to_xy())
        .collect()
}
