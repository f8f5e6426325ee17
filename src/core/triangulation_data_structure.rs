//! Half-edge storage for planar triangulations.
//!
//! This module provides the `Tds` (Triangulation Data Structure): two parallel
//! flat arrays describing every triangle and how triangles meet.
//!
//! # Layout
//!
//! - **`triangles`**: entry `e` is the point index where half-edge `e` starts.
//!   Half-edges `3t`, `3t + 1`, `3t + 2` form triangle `t`, in
//!   counter-clockwise order.
//! - **`halfedges`**: entry `e` is the opposite half-edge (the same edge
//!   traversed in the other direction, in the neighbouring triangle), or
//!   [`EMPTY`] when `e` lies on the convex hull.
//!
//! Half-edge `e` ends where `next_halfedge(e)` starts. Because the two arrays
//! hold nothing but indices, a `Tds` never borrows the points it describes.
//!
//! # Topological Invariants
//!
//! - `halfedges[halfedges[e]] == e` for every interior half-edge `e`.
//! - Opposite half-edges run between the same two points in opposite directions.
//!
//! # Examples
//!
//! ```rust
//! use planar_delaunay::core::triangulation_data_structure::{EMPTY, Tds, next_halfedge};
//! use planar_delaunay::triangulate;
//!
//! let points = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
//! let tds: Tds = triangulate(&points).unwrap().into_tds();
//!
//! assert_eq!(tds.number_of_triangles(), 2);
//! for (e, &opposite) in tds.halfedges().iter().enumerate() {
//!     if opposite != EMPTY {
//!         assert_eq!(tds.triangles()[e], tds.triangles()[next_halfedge(opposite)]);
//!     }
//! }
//! ```

use crate::core::collections::SmallBuffer;
use serde::{Deserialize, Serialize};

/// Sentinel for "no opposite half-edge": the half-edge lies on the hull.
///
/// Also used as the "no entry" marker of the per-build working arrays.
pub const EMPTY: usize = usize::MAX;

/// The half-edge following `e` within its triangle.
///
/// # Examples
///
/// ```
/// use planar_delaunay::core::triangulation_data_structure::next_halfedge;
///
/// assert_eq!(next_halfedge(3), 4);
/// assert_eq!(next_halfedge(5), 3);
/// ```
#[inline]
#[must_use]
pub const fn next_halfedge(e: usize) -> usize {
    if e % 3 == 2 { e - 2 } else { e + 1 }
}

/// The half-edge preceding `e` within its triangle.
///
/// # Examples
///
/// ```
/// use planar_delaunay::core::triangulation_data_structure::prev_halfedge;
///
/// assert_eq!(prev_halfedge(3), 5);
/// assert_eq!(prev_halfedge(5), 4);
/// ```
#[inline]
#[must_use]
pub const fn prev_halfedge(e: usize) -> usize {
    if e % 3 == 0 { e + 2 } else { e - 1 }
}

/// The triangle containing half-edge `e`.
#[inline]
#[must_use]
pub const fn triangle_of_edge(e: usize) -> usize {
    e / 3
}

/// Flat half-edge representation of a planar triangulation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tds {
    triangles: Vec<usize>,
    halfedges: Vec<usize>,
}

impl Tds {
    /// Creates an empty structure.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            triangles: Vec::new(),
            halfedges: Vec::new(),
        }
    }

    /// Creates an empty structure with room for `max_triangles` triangles.
    #[must_use]
    pub fn with_capacity(max_triangles: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(max_triangles * 3),
            halfedges: Vec::with_capacity(max_triangles * 3),
        }
    }

    /// Start point of every half-edge, three per triangle.
    #[inline]
    #[must_use]
    pub fn triangles(&self) -> &[usize] {
        &self.triangles
    }

    /// Opposite of every half-edge, [`EMPTY`] on the hull.
    #[inline]
    #[must_use]
    pub fn halfedges(&self) -> &[usize] {
        &self.halfedges
    }

    /// Number of half-edges (three per triangle).
    #[inline]
    #[must_use]
    pub fn number_of_halfedges(&self) -> usize {
        self.triangles.len()
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn number_of_triangles(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Opposite of half-edge `e`, or `None` on the hull or when `e` is out of range.
    #[must_use]
    pub fn halfedge(&self, e: usize) -> Option<usize> {
        self.halfedges.get(e).copied().filter(|&opposite| opposite != EMPTY)
    }

    /// The three point indices of triangle `t`, or `None` when out of range.
    #[must_use]
    pub fn triangle_vertex_indices(&self, t: usize) -> Option<[usize; 3]> {
        let e = t.checked_mul(3)?;
        match self.triangles.get(e..e + 3)? {
            &[a, b, c] => Some([a, b, c]),
            _ => None,
        }
    }

    /// Appends triangle `(i0, i1, i2)` and links its half-edges to `a`, `b`, `c`.
    ///
    /// Half-edge `t` runs `i0 → i1` and is linked to `a`, `t + 1` runs
    /// `i1 → i2` and is linked to `b`, `t + 2` runs `i2 → i0` and is linked
    /// to `c`. Pass [`EMPTY`] for an edge with no neighbour yet.
    ///
    /// Returns `t`, the first half-edge of the new triangle.
    pub(crate) fn add_triangle(
        &mut self,
        [i0, i1, i2]: [usize; 3],
        [a, b, c]: [usize; 3],
    ) -> usize {
        let t = self.triangles.len();
        self.triangles.extend([i0, i1, i2]);
        self.halfedges.extend([EMPTY; 3]);
        self.link(t, a);
        self.link(t + 1, b);
        self.link(t + 2, c);
        t
    }

    /// Makes `a` and `b` opposite half-edges.
    ///
    /// When `b` is [`EMPTY`], `a` becomes a hull edge and nothing else changes.
    #[inline]
    pub(crate) fn link(&mut self, a: usize, b: usize) {
        self.halfedges[a] = b;
        if b != EMPTY {
            self.halfedges[b] = a;
        }
    }

    /// Rewrites the start point of half-edge `e`.
    #[inline]
    pub(crate) fn set_start(&mut self, e: usize, point: usize) {
        self.triangles[e] = point;
    }

    /// Releases excess capacity once the build is complete.
    pub(crate) fn shrink_to_fit(&mut self) {
        self.triangles.shrink_to_fit();
        self.halfedges.shrink_to_fit();
    }

    /// Half-edges ending at the point where `start` ends, walking
    /// counter-clockwise around it.
    ///
    /// `start` must be an incoming half-edge of the point. The walk stops when it
    /// returns to `start` (interior point) or reaches the hull. For a hull point,
    /// start from its most clockwise incoming half-edge to obtain the full fan.
    ///
    /// # Examples
    ///
    /// ```
    /// use planar_delaunay::core::triangulation_data_structure::next_halfedge;
    /// use planar_delaunay::triangulate;
    ///
    /// // A centre point surrounded by four corners has four incoming half-edges.
    /// let points = [[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0], [1.0, 1.0]];
    /// let dt = triangulate(&points).unwrap();
    /// let tds = dt.into_tds();
    /// let start = (0..tds.number_of_halfedges())
    ///     .find(|&e| tds.triangles()[next_halfedge(e)] == 4)
    ///     .unwrap();
    /// assert_eq!(tds.edges_around_point(start).len(), 4);
    /// ```
    #[must_use]
    pub fn edges_around_point(&self, start: usize) -> Vec<usize> {
        let mut result = Vec::new();
        if start >= self.halfedges.len() {
            return result;
        }
        let mut incoming = start;
        loop {
            result.push(incoming);
            let outgoing = next_halfedge(incoming);
            incoming = self.halfedges[outgoing];
            if incoming == EMPTY || incoming == start {
                break;
            }
        }
        result
    }

    /// Triangles sharing an edge with triangle `t`.
    #[must_use]
    pub fn triangles_adjacent_to_triangle(&self, t: usize) -> SmallBuffer<usize, 3> {
        let first = t * 3;
        (first..first + 3)
            .filter_map(|e| self.halfedge(e))
            .map(triangle_of_edge)
            .collect()
    }
}
