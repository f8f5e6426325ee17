//! Angular hash over the points of the advancing convex hull.
//!
//! The table is ephemeral state local to a single build: it maps a bucket of
//! pseudo-angle around the seed circumcentre to the last hull point hashed into
//! it. It only accelerates the search for a visible hull edge. A stale entry
//! (a point since removed from the hull) is skipped by the caller's liveness
//! check, and an empty table simply means the walk starts from wherever the
//! first live entry is, so correctness never depends on it.

use crate::core::triangulation_data_structure::EMPTY;
use crate::geometry::predicates::pseudo_angle;

/// Fixed-size table of hull point indices keyed by pseudo-angle.
#[derive(Clone, Debug)]
pub(in crate::core) struct HullHash {
    center: [f64; 2],
    buckets: Vec<usize>,
}

impl HullHash {
    /// Creates an empty table sized `⌈√n⌉` (at least one bucket) around `center`.
    pub(in crate::core) fn new(center: [f64; 2], n: usize) -> Self {
        let root = n.isqrt();
        let size = (if root * root < n { root + 1 } else { root }).max(1);
        Self {
            center,
            buckets: vec![EMPTY; size],
        }
    }

    /// Number of buckets.
    #[cfg(test)]
    pub(in crate::core) const fn size(&self) -> usize {
        self.buckets.len()
    }

    /// Bucket of `point`: `floor(pseudo_angle(point - center) * size) mod size`.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub(in crate::core) fn key(&self, point: [f64; 2]) -> usize {
        let angle = pseudo_angle(point[0] - self.center[0], point[1] - self.center[1]);
        let size = self.buckets.len();
        ((angle * size as f64).floor() as usize) % size
    }

    /// Records `index` as the most recent hull point in the bucket of `point`.
    pub(in crate::core) fn insert(&mut self, point: [f64; 2], index: usize) {
        let key = self.key(point);
        self.buckets[key] = index;
    }

    /// Probes buckets from the key of `point` forward and returns the first
    /// entry accepted by `is_live`.
    ///
    /// Returns `None` only when no bucket holds a live hull point.
    pub(in crate::core) fn start_candidate<F>(&self, point: [f64; 2], mut is_live: F) -> Option<usize>
    where
        F: FnMut(usize) -> bool,
    {
        let size = self.buckets.len();
        let key = self.key(point);
        (0..size)
            .map(|j| self.buckets[(key + j) % size])
            .find(|&candidate| candidate != EMPTY && is_live(candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hull_hash_sizing() {
        assert_eq!(HullHash::new([0.0, 0.0], 0).size(), 1);
        assert_eq!(HullHash::new([0.0, 0.0], 1).size(), 1);
        assert_eq!(HullHash::new([0.0, 0.0], 9).size(), 3);
        assert_eq!(HullHash::new([0.0, 0.0], 10).size(), 4);
        assert_eq!(HullHash::new([0.0, 0.0], 1000).size(), 32);
    }

    #[test]
    fn test_hull_hash_keys_stay_in_range() {
        let hash = HullHash::new([1.0, 1.0], 50);
        for point in [
            [0.0, 1.0],
            [0.0, 1.0 + 1e-300],
            [2.0, 1.0],
            [1.0, 2.0],
            [1.0, 0.0],
            [1.0, 1.0],
        ] {
            assert!(hash.key(point) < hash.size());
        }
    }

    #[test]
    fn test_hull_hash_probe_skips_empty_and_dead_entries() {
        let mut hash = HullHash::new([0.0, 0.0], 16);
        assert_eq!(hash.start_candidate([1.0, 0.0], |_| true), None);

        // East and north land in different buckets.
        hash.insert([1.0, 0.0], 7);
        hash.insert([0.0, 1.0], 9);
        assert_ne!(hash.key([1.0, 0.0]), hash.key([0.0, 1.0]));

        assert_eq!(hash.start_candidate([1.0, 0.0], |_| true), Some(7));
        assert_eq!(hash.start_candidate([1.0, 0.0], |i| i != 7), Some(9));
        assert_eq!(hash.start_candidate([1.0, 0.0], |_| false), None);
    }

    #[test]
    fn test_hull_hash_insert_overwrites_bucket() {
        let mut hash = HullHash::new([0.0, 0.0], 4);
        hash.insert([1.0, 0.0], 3);
        hash.insert([2.0, 0.0], 5);
        assert_eq!(hash.start_candidate([1.0, 0.0], |_| true), Some(5));
    }
}
