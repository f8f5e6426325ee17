//! Lawson edge flips restoring the Delaunay condition after an insertion.
//!
//! Each triangle added during insertion may violate the empty-circumcircle
//! property with its neighbour across one edge. [`legalize`] checks that edge
//! and, when the neighbour's far vertex lies strictly inside the circumcircle,
//! replaces the shared diagonal with the other one (a 2↔2 flip). The two outer
//! edges of the neighbour that changed triangles are then checked in turn,
//! using an explicit stack instead of recursion.
//!
//! ```text
//!           pl                    pl
//!          /||\                  /  \
//!       al/ || \bl            al/    \a
//!        /  ||  \              /      \
//!       /  a||b  \    flip    /___ar___\
//!     p0\   ||   /p1   =>   p0\---bl---/p1
//!        \  ||  /              \      /
//!       ar\ || /br             b\    /br
//!          \||/                  \  /
//!           pr                    pr
//! ```
//!
//! Flips only ever rewrite existing half-edge slots, so the triangle count is
//! unchanged. A flip budget bounds the cascade: floating-point predicates can,
//! on pathological input, disagree with themselves and flip forever.
//!
//! # References
//! - C. L. Lawson, "Software for C1 surface interpolation", 1977.
//! - L. Guibas and J. Stolfi, "Primitives for the manipulation of general
//!   subdivisions and the computation of Voronoi diagrams", 1985.

use thiserror::Error;

use crate::core::collections::EdgeStack;
use crate::core::hull::Hull;
use crate::core::triangulation_data_structure::{EMPTY, Tds, next_halfedge, prev_halfedge};
use crate::geometry::predicates::in_circumcircle;

/// Lower bound of the flip budget of a single legalization.
pub const DEFAULT_MIN_FLIP_BUDGET: usize = 128;

/// Errors raised during legalization.
///
/// # Examples
///
/// ```rust
/// use planar_delaunay::core::algorithms::flips::FlipError;
///
/// let err = FlipError::FlipLoop { max_flips: 128, point_index: 7 };
/// assert!(err.to_string().contains("128"));
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum FlipError {
    /// The flip cascade did not settle within its budget.
    #[error("Legalization exceeded {max_flips} flips while inserting point {point_index}")]
    FlipLoop {
        /// Flip budget that was exceeded.
        max_flips: usize,
        /// Input index of the point being inserted.
        point_index: usize,
    },
}

/// Flip budget of one legalization in a mesh of `triangle_count` triangles.
///
/// Four flips per half-edge slot, never less than `min_budget`.
///
/// # Examples
///
/// ```rust
/// use planar_delaunay::core::algorithms::flips::default_max_flips;
///
/// assert_eq!(default_max_flips(1, 128), 128);
/// assert_eq!(default_max_flips(100, 128), 1200);
/// ```
#[must_use]
pub const fn default_max_flips(triangle_count: usize, min_budget: usize) -> usize {
    let base = triangle_count.saturating_mul(3).saturating_mul(4);
    if base > min_budget { base } else { min_budget }
}

/// Outcome of a successful legalization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct LegalizeOutcome {
    /// The half-edge the walk ended on. When legalization starts from the
    /// edge opposite a new point, this is the hull edge leaving that point.
    pub(crate) edge: usize,
    /// Number of flips performed.
    pub(crate) flips: usize,
    /// Deepest the pending-edge stack grew.
    pub(crate) max_stack_depth: usize,
}

/// Restores the Delaunay condition around half-edge `a`.
///
/// `stack` is scratch space reused across calls; it is empty on return.
/// `point_index` only labels the error.
///
/// # Errors
///
/// Returns [`FlipError::FlipLoop`] when more than `max_flips` flips are needed.
pub(crate) fn legalize(
    tds: &mut Tds,
    hull: &mut Hull,
    coords: &[[f64; 2]],
    mut a: usize,
    max_flips: usize,
    point_index: usize,
    stack: &mut EdgeStack,
) -> Result<LegalizeOutcome, FlipError> {
    stack.clear();
    let mut outcome = LegalizeOutcome::default();

    loop {
        let b = tds.halfedges()[a];
        let ar = prev_halfedge(a);
        outcome.edge = ar;

        if b == EMPTY {
            match stack.pop() {
                Some(pending) => {
                    a = pending;
                    continue;
                }
                None => break,
            }
        }

        let al = next_halfedge(a);
        let bl = prev_halfedge(b);

        let triangles = tds.triangles();
        let p0 = triangles[ar];
        let pr = triangles[a];
        let pl = triangles[al];
        let p1 = triangles[bl];

        if !in_circumcircle(coords[p0], coords[pr], coords[pl], coords[p1]) {
            match stack.pop() {
                Some(pending) => {
                    a = pending;
                    continue;
                }
                None => break,
            }
        }

        outcome.flips += 1;
        if outcome.flips > max_flips {
            tracing::warn!(
                "Legalization of point {point_index} exceeded {max_flips} flips; aborting"
            );
            stack.clear();
            return Err(FlipError::FlipLoop {
                max_flips,
                point_index,
            });
        }

        tds.set_start(a, p1);
        tds.set_start(b, p0);

        let hbl = tds.halfedges()[bl];
        let har = tds.halfedges()[ar];

        // bl was a hull edge and now lives at slot a.
        if hbl == EMPTY {
            hull.replace_tri(bl, a);
        }

        tds.link(a, hbl);
        tds.link(b, har);
        tds.link(ar, bl);

        // `a` is re-examined next; its former neighbour's far edge waits.
        stack.push(next_halfedge(b));
        outcome.max_stack_depth = outcome.max_stack_depth.max(stack.len());
    }

    Ok(outcome)
}
