//! The advancing convex hull of a triangulation under construction.
//!
//! The hull is a circular doubly linked list threaded through index arrays of
//! length N (one slot per input point), so that splicing a point in or out is
//! O(1) and no node is ever allocated. Alongside the links, `tri[i]` records
//! the half-edge of the triangulation that runs along the hull edge starting at
//! point `i`; new triangles link to it.
//!
//! A point removed from the hull is marked by `next[i] == i`. Points that were
//! never on the hull keep [`EMPTY`] links.

use crate::core::collections::hull_hash::HullHash;
use crate::core::triangulation_data_structure::EMPTY;

/// Circular linked list of hull point indices, counter-clockwise.
#[derive(Clone, Debug)]
pub(crate) struct Hull {
    next: Vec<usize>,
    prev: Vec<usize>,
    tri: Vec<usize>,
    start: usize,
    hash: HullHash,
}

impl Hull {
    /// Creates the hull of the counter-clockwise seed triangle `seed`.
    ///
    /// `coords` holds every input point; `center` is the seed circumcentre the
    /// angular hash is keyed around.
    pub(crate) fn new(coords: &[[f64; 2]], center: [f64; 2], seed: [usize; 3]) -> Self {
        let n = coords.len();
        let [i0, i1, i2] = seed;
        let mut hull = Self {
            next: vec![EMPTY; n],
            prev: vec![EMPTY; n],
            tri: vec![EMPTY; n],
            start: i0,
            hash: HullHash::new(center, n),
        };

        hull.next[i0] = i1;
        hull.prev[i2] = i1;
        hull.next[i1] = i2;
        hull.prev[i0] = i2;
        hull.next[i2] = i0;
        hull.prev[i1] = i0;

        hull.tri[i0] = 0;
        hull.tri[i1] = 1;
        hull.tri[i2] = 2;

        for i in seed {
            hull.hash.insert(coords[i], i);
        }
        hull
    }

    #[inline]
    pub(crate) fn next(&self, i: usize) -> usize {
        self.next[i]
    }

    #[inline]
    pub(crate) fn prev(&self, i: usize) -> usize {
        self.prev[i]
    }

    /// Half-edge running along the hull edge `i → next(i)`.
    #[inline]
    pub(crate) fn tri(&self, i: usize) -> usize {
        self.tri[i]
    }

    #[inline]
    pub(crate) fn set_tri(&mut self, i: usize, e: usize) {
        self.tri[i] = e;
    }

    /// First point of the counter-clockwise walk.
    #[cfg(test)]
    pub(crate) const fn start(&self) -> usize {
        self.start
    }

    /// Whether `i` is currently a hull point.
    #[inline]
    pub(crate) fn contains(&self, i: usize) -> bool {
        let next = self.next[i];
        next != EMPTY && next != i
    }

    /// Marks `i` as no longer on the hull.
    #[inline]
    pub(crate) fn remove(&mut self, i: usize) {
        self.next[i] = i;
    }

    /// Links `p` between `left` and `right`, which become its neighbours.
    ///
    /// Every point strictly between `left` and `right` must already have been
    /// removed. `left` becomes the new start of the walk.
    pub(crate) fn splice(&mut self, left: usize, p: usize, right: usize) {
        self.prev[p] = left;
        self.next[left] = p;
        self.prev[right] = p;
        self.next[p] = right;
        self.start = left;
    }

    /// Records `i` (at `point`) in the angular hash.
    #[inline]
    pub(crate) fn hash_point(&mut self, point: [f64; 2], i: usize) {
        self.hash.insert(point, i);
    }

    /// A live hull point near `point` in angle, to start the visibility walk from.
    ///
    /// Falls back to the walk start when every hashed entry is stale.
    pub(crate) fn start_candidate(&self, point: [f64; 2]) -> usize {
        self.hash
            .start_candidate(point, |i| self.contains(i))
            .unwrap_or(self.start)
    }

    /// Replaces the hull half-edge `old` with `new` after a flip moved it.
    ///
    /// Walks backwards from the start, where recently inserted edges sit.
    /// Returns whether a hull point referenced `old`.
    pub(crate) fn replace_tri(&mut self, old: usize, new: usize) -> bool {
        let mut e = self.start;
        loop {
            if self.tri[e] == old {
                self.tri[e] = new;
                return true;
            }
            e = self.prev[e];
            if e == self.start || e == EMPTY {
                return false;
            }
        }
    }

    /// Hull point indices in counter-clockwise order, starting at `start`.
    pub(crate) fn indices(&self) -> Vec<usize> {
        let mut result = Vec::new();
        let mut e = self.start;
        // A well-formed hull never has more points than the input.
        for _ in 0..self.next.len() {
            result.push(e);
            e = self.next[e];
            if e == self.start || e == EMPTY {
                break;
            }
        }
        result
    }

    /// Number of hull points.
    pub(crate) fn len(&self) -> usize {
        self.indices().len()
    }
}
