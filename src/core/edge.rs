//! Lazy iteration over the undirected edges of a triangulation.
//!
//! Edges are not stored explicitly; they are read off the half-edge arrays.
//! Every interior edge has two half-edges and is reported from the one whose
//! start index is the smaller of its two endpoints. A hull edge has a single
//! half-edge and is reported only when hull edges were requested.
//!
//! ## Ordering
//!
//! Edges come out in half-edge order, which is deterministic for a given
//! input but otherwise unspecified.

use crate::core::triangulation_data_structure::{EMPTY, Tds, next_halfedge};

/// Iterator over undirected edges as `(start, end)` point-index pairs.
///
/// # Examples
///
/// ```rust
/// use planar_delaunay::triangulate;
///
/// let points = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
/// let dt = triangulate(&points).unwrap();
///
/// let mut edges: Vec<(usize, usize)> = dt
///     .edge_indices(true)
///     .map(|(a, b)| (a.min(b), a.max(b)))
///     .collect();
/// edges.sort_unstable();
/// assert_eq!(edges, vec![(0, 1), (0, 2), (1, 2)]);
/// ```
#[derive(Clone, Debug)]
pub struct EdgeIndices<'tds> {
    tds: &'tds Tds,
    next: usize,
    include_hull: bool,
}

impl<'tds> EdgeIndices<'tds> {
    /// Creates an iterator over the edges of `tds`.
    #[must_use]
    pub(crate) const fn new(tds: &'tds Tds, include_hull: bool) -> Self {
        Self {
            tds,
            next: 0,
            include_hull,
        }
    }
}

impl Iterator for EdgeIndices<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let triangles = self.tds.triangles();
        let halfedges = self.tds.halfedges();

        while self.next < triangles.len() {
            let e = self.next;
            self.next += 1;

            let start = triangles[e];
            let end = triangles[next_halfedge(e)];
            let reported = if halfedges[e] == EMPTY {
                self.include_hull
            } else {
                start < end
            };
            if reported {
                return Some((start, end));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.tds.number_of_halfedges() - self.next))
    }
}

/// Iterator over undirected edges as pairs of point references.
#[derive(Clone, Debug)]
pub struct Edges<'tds, 'p, P> {
    points: &'p [P],
    indices: EdgeIndices<'tds>,
}

impl<'tds, 'p, P> Edges<'tds, 'p, P> {
    /// Creates an iterator over the edges of `tds`, resolved against `points`.
    ///
    /// `tds` must index into `points`; only a triangulation built from
    /// `points` hands these out.
    #[must_use]
    pub(crate) const fn new(points: &'p [P], tds: &'tds Tds, include_hull: bool) -> Self {
        Self {
            points,
            indices: EdgeIndices::new(tds, include_hull),
        }
    }
}

impl<'p, P> Iterator for Edges<'_, 'p, P> {
    type Item = (&'p P, &'p P);

    fn next(&mut self) -> Option<Self::Item> {
        let points = self.points;
        self.indices
            .next()
            .map(|(start, end)| (&points[start], &points[end]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}
