//! Hull-walking location of the edge a new point attaches to.
//!
//! Points are inserted in increasing distance from the seed circumcentre, so
//! each new point lies outside the current convex hull and sees at least one
//! hull edge. Finding that edge replaces point location inside the mesh:
//! the angular hash proposes a nearby hull point and a short walk along the
//! hull finishes the job.
//!
//! # Algorithm
//!
//! 1. Ask the hull hash for a live hull point near `p` in angle.
//! 2. Step back one point, so an edge that starts just before the candidate
//!    is not missed.
//! 3. Walk `next` until an edge `(e, next(e))` has `p` strictly on its outer
//!    (right-hand) side.
//!
//! A full lap without a visible edge means the outside-the-hull invariant was
//! broken, typically by floating-point trouble with near-duplicate input.

use crate::core::hull::Hull;
use crate::geometry::predicates::oriented_area;

/// Error during hull-edge location.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum LocateError {
    /// No hull edge is visible from the point.
    #[error("No visible hull edge found for point {point_index}")]
    NoVisibleEdge {
        /// Input index of the point being inserted.
        point_index: usize,
    },
}

/// The first visible hull edge found for a point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct VisibleEdge {
    /// Hull point where the visible edge starts; the edge is `(start, hull.next(start))`.
    pub(crate) start: usize,
    /// Whether the walk found the edge where it began, in which case earlier
    /// edges may be visible too and insertion must also walk backwards.
    pub(crate) walk_back: bool,
}

/// Finds a hull edge visible from point `i`.
///
/// # Errors
///
/// Returns [`LocateError::NoVisibleEdge`] when a full lap of the hull finds no
/// visible edge.
pub(crate) fn find_visible_edge(
    coords: &[[f64; 2]],
    hull: &Hull,
    i: usize,
) -> Result<VisibleEdge, LocateError> {
    let p = coords[i];
    let start = hull.prev(hull.start_candidate(p));

    let mut e = start;
    loop {
        let q = hull.next(e);
        if oriented_area(p, coords[e], coords[q]) < 0.0 {
            break;
        }
        e = q;
        if e == start {
            return Err(LocateError::NoVisibleEdge { point_index: i });
        }
    }

    Ok(VisibleEdge {
        start: e,
        walk_back: e == start,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (Vec<[f64; 2]>, Hull) {
        let coords = vec![[0.0, 0.0], [4.0, 0.0], [0.0, 4.0], [5.0, 5.0], [1.0, 1.0], [2.0, -3.0]];
        let hull = Hull::new(&coords, [2.0, 2.0], [0, 1, 2]);
        (coords, hull)
    }

    #[test]
    fn test_visible_edge_outside_hypotenuse() {
        let (coords, hull) = fixture();
        let edge = find_visible_edge(&coords, &hull, 3).unwrap();
        assert_eq!(edge.start, 1);
        assert_eq!(hull.next(edge.start), 2);
    }

    #[test]
    fn test_visible_edge_below_base() {
        let (coords, hull) = fixture();
        let edge = find_visible_edge(&coords, &hull, 5).unwrap();
        assert_eq!(edge.start, 0);
    }

    #[test]
    fn test_interior_point_has_no_visible_edge() {
        let (coords, hull) = fixture();
        assert_eq!(
            find_visible_edge(&coords, &hull, 4),
            Err(LocateError::NoVisibleEdge { point_index: 4 })
        );
    }
}
