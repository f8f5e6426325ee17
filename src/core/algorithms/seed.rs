//! Seed triangle selection and the spatial insertion order.
//!
//! The build starts from a small, well-shaped triangle near the middle of the
//! point set and then visits the remaining points in order of increasing
//! distance from that triangle's circumcentre. Distance order guarantees that
//! every point lies outside the hull built so far, which is what lets
//! insertion walk the hull instead of searching the mesh.
//!
//! # Algorithm
//!
//! 1. `p0` is the point nearest the centre of the bounding box.
//! 2. `p1` is the point nearest `p0` at a strictly positive distance.
//! 3. `p2` minimises the circumradius of `(p0, p1, p2)`.
//! 4. The seed is reordered to be counter-clockwise.
//!
//! Ties are broken by the lowest input index, so the result is deterministic.

use crate::geometry::predicates::{
    INFINITY, circumcenter, circumradius_squared, oriented_area, pseudo_angle,
};
use crate::geometry::util::{bounding_box_center, squared_distance};
use ordered_float::OrderedFloat;

/// Errors raised when no seed triangle exists.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum SeedError {
    /// Fewer than three points were supplied.
    #[error("Need at least 3 points to select a seed triangle, found {found}")]
    TooFewPoints {
        /// Number of points supplied.
        found: usize,
    },
    /// Every point has the same coordinates.
    #[error("All points are coincident")]
    AllCoincident,
    /// Every point lies on a single line.
    #[error("All points are collinear")]
    AllCollinear,
}

/// The initial triangle and the centre the insertion order is built around.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Seed {
    /// Input indices of the seed vertices, counter-clockwise.
    pub vertices: [usize; 3],
    /// Circumcentre of the seed triangle.
    pub center: [f64; 2],
}

/// Index of the point nearest `target`, restricted to points accepted by `filter`.
fn nearest_point<F>(coords: &[[f64; 2]], target: [f64; 2], mut filter: F) -> Option<usize>
where
    F: FnMut(usize, f64) -> bool,
{
    let mut best = None;
    let mut best_distance = INFINITY;
    for (i, &p) in coords.iter().enumerate() {
        let d = squared_distance(target, p);
        if filter(i, d) && (best.is_none() || d < best_distance) {
            best = Some(i);
            best_distance = d;
        }
    }
    best
}

/// Selects the seed triangle of `coords`.
///
/// # Errors
///
/// Returns [`SeedError::TooFewPoints`] for fewer than three points,
/// [`SeedError::AllCoincident`] when no second distinct point exists, and
/// [`SeedError::AllCollinear`] when every candidate third point is collinear
/// with the first two.
///
/// # Examples
///
/// ```rust
/// use planar_delaunay::core::algorithms::seed::select_seed;
/// use planar_delaunay::geometry::predicates::oriented_area;
///
/// let coords = [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [5.0, 4.0]];
/// let seed = select_seed(&coords).unwrap();
///
/// // The point nearest the bounding-box centre is always a seed vertex.
/// assert!(seed.vertices.contains(&4));
/// let [a, b, c] = seed.vertices.map(|i| coords[i]);
/// assert!(oriented_area(a, b, c) > 0.0);
/// ```
pub fn select_seed(coords: &[[f64; 2]]) -> Result<Seed, SeedError> {
    if coords.len() < 3 {
        return Err(SeedError::TooFewPoints {
            found: coords.len(),
        });
    }

    let too_few = SeedError::TooFewPoints {
        found: coords.len(),
    };
    let center = bounding_box_center(coords).ok_or_else(|| too_few.clone())?;

    let i0 = nearest_point(coords, center, |_, _| true).ok_or(too_few)?;
    let p0 = coords[i0];

    let i1 = nearest_point(coords, p0, |i, d| i != i0 && d > 0.0)
        .ok_or(SeedError::AllCoincident)?;
    let p1 = coords[i1];

    let mut i2 = None;
    let mut min_radius = INFINITY;
    for (i, &p) in coords.iter().enumerate() {
        if i == i0 || i == i1 {
            continue;
        }
        let r = circumradius_squared(p0, p1, p);
        if r < min_radius {
            i2 = Some(i);
            min_radius = r;
        }
    }
    let mut i2 = i2.ok_or(SeedError::AllCollinear)?;
    let mut i1 = i1;

    if oriented_area(p0, coords[i1], coords[i2]) < 0.0 {
        std::mem::swap(&mut i1, &mut i2);
    }

    let center = circumcenter(p0, coords[i1], coords[i2]).ok_or(SeedError::AllCollinear)?;

    tracing::debug!(
        "Seed triangle ({i0}, {i1}, {i2}) with circumradius² {min_radius:e} around ({:e}, {:e})",
        center[0],
        center[1]
    );

    Ok(Seed {
        vertices: [i0, i1, i2],
        center,
    })
}

/// All point indices ordered by squared distance from `center`.
///
/// Ties are broken by pseudo-angle around `center`, then by index.
///
/// # Examples
///
/// ```rust
/// use planar_delaunay::core::algorithms::seed::insertion_order;
///
/// let coords = [[3.0, 0.0], [0.0, 1.0], [-2.0, 0.0], [0.0, -1.0]];
/// assert_eq!(insertion_order(&coords, [0.0, 0.0]), vec![3, 1, 2, 0]);
/// ```
#[must_use]
pub fn insertion_order(coords: &[[f64; 2]], center: [f64; 2]) -> Vec<usize> {
    let keys: Vec<(OrderedFloat<f64>, OrderedFloat<f64>)> = coords
        .iter()
        .map(|&p| {
            (
                OrderedFloat(squared_distance(center, p)),
                OrderedFloat(pseudo_angle(p[0] - center[0], p[1] - center[1])),
            )
        })
        .collect();

    let mut order: Vec<usize> = (0..coords.len()).collect();
    order.sort_unstable_by_key(|&i| (keys[i].0, keys[i].1, i));
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_seed_of_square_is_ccw_with_circumcenter() {
        let coords = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        let seed = select_seed(&coords).unwrap();

        // Every corner is equidistant from the centre; the lowest index wins.
        assert_eq!(seed.vertices[0], 0);
        let [a, b, c] = seed.vertices.map(|i| coords[i]);
        assert!(oriented_area(a, b, c) > 0.0);
        assert_relative_eq!(seed.center[0], 0.5);
        assert_relative_eq!(seed.center[1], 0.5);
    }

    #[test]
    fn test_seed_skips_coincident_second_point() {
        let coords = [[0.0, 0.0], [0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
        let seed = select_seed(&coords).unwrap();
        assert!(!(seed.vertices.contains(&0) && seed.vertices.contains(&1)));
    }

    #[test]
    fn test_seed_degenerate_inputs() {
        assert_eq!(
            select_seed(&[[0.0, 0.0], [1.0, 1.0]]),
            Err(SeedError::TooFewPoints { found: 2 })
        );
        assert_eq!(
            select_seed(&[[2.0, 2.0], [2.0, 2.0], [2.0, 2.0]]),
            Err(SeedError::AllCoincident)
        );
        assert_eq!(
            select_seed(&[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [3.0, 3.0]]),
            Err(SeedError::AllCollinear)
        );
        assert_eq!(
            select_seed(&[[0.0, 0.0], [1.0, 0.0], [1.0, 0.0], [0.0, 0.0]]),
            Err(SeedError::AllCollinear)
        );
    }

    #[test]
    fn test_insertion_order_is_nondecreasing_permutation() {
        let coords = [
            [0.3, 0.9],
            [-1.2, 0.4],
            [2.0, -2.0],
            [0.0, 0.0],
            [0.0, 0.0],
            [1.1, 1.1],
        ];
        let center = [0.1, 0.2];
        let order = insertion_order(&coords, center);

        let mut sorted = order.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..coords.len()).collect::<Vec<_>>());

        for pair in order.windows(2) {
            let d0 = squared_distance(center, coords[pair[0]]);
            let d1 = squared_distance(center, coords[pair[1]]);
            assert!(d0 <= d1);
        }

        // Coincident points end up adjacent, lowest index first.
        let first_dup = order.iter().position(|&i| i == 3).unwrap();
        assert_eq!(order[first_dup + 1], 4);
    }
}
