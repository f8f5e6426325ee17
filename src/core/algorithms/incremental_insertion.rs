//! Incremental insertion by hull sweeping.
//!
//! Points arrive in increasing distance from the seed circumcentre, so each
//! one lies outside the mesh built so far. Inserting it means:
//! 1. Locate a hull edge visible from the point (hull walking)
//! 2. Fan new triangles from the point to every visible hull edge, walking
//!    forwards and, when needed, backwards along the hull
//! 3. Legalize each new triangle with Lawson flips
//! 4. Splice the point into the hull in place of the points it hid

use serde::{Deserialize, Serialize};

use crate::core::algorithms::flips::{FlipError, LegalizeOutcome, default_max_flips, legalize};
use crate::core::algorithms::locate::{LocateError, find_visible_edge};
use crate::core::collections::EdgeStack;
use crate::core::hull::Hull;
use crate::core::triangulation_data_structure::{EMPTY, Tds};
use crate::geometry::predicates::oriented_area;

/// Error during incremental insertion.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum InsertionError {
    /// No hull edge was visible from the point
    #[error("Location error: {0}")]
    Location(#[from] LocateError),

    /// Legalization did not settle
    #[error("Legalization error: {0}")]
    Flip(#[from] FlipError),
}

/// Counters collected while building a triangulation.
///
/// # Examples
///
/// ```rust
/// use planar_delaunay::triangulate;
///
/// let points = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 1.0]];
/// let dt = triangulate(&points).unwrap();
/// let stats = dt.statistics();
/// assert_eq!(stats.points_inserted, 4);
/// assert_eq!(stats.duplicates_skipped, 1);
/// assert_eq!(stats.triangles_created, 2);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertionStatistics {
    /// Points that became vertices, seed triangle included.
    pub points_inserted: usize,
    /// Points skipped because they coincide with an earlier point.
    pub duplicates_skipped: usize,
    /// Triangles in the finished mesh.
    pub triangles_created: usize,
    /// Edge flips performed by legalization.
    pub flips_performed: usize,
    /// Deepest the legalization stack grew during any single insertion.
    pub max_flip_stack_depth: usize,
}

impl InsertionStatistics {
    /// Total number of input points seen.
    #[must_use]
    pub const fn points_processed(&self) -> usize {
        self.points_inserted + self.duplicates_skipped
    }

    /// Average number of flips per inserted point.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_flips_per_point(&self) -> f64 {
        if self.points_inserted == 0 {
            0.0
        } else {
            self.flips_performed as f64 / self.points_inserted as f64
        }
    }

    fn record(&mut self, outcome: LegalizeOutcome) {
        self.flips_performed += outcome.flips;
        self.max_flip_stack_depth = self.max_flip_stack_depth.max(outcome.max_stack_depth);
    }
}

/// How many flips a single legalization may perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FlipBudget {
    /// Fixed budget; when `None` it scales with the mesh.
    pub(crate) fixed: Option<usize>,
    /// Lower bound of the scaled budget.
    pub(crate) minimum: usize,
}

impl FlipBudget {
    fn for_mesh(self, triangle_count: usize) -> usize {
        self.fixed
            .unwrap_or_else(|| default_max_flips(triangle_count, self.minimum))
    }
}

/// Working state of one build: the mesh, its advancing hull and scratch space.
pub(crate) struct HullSweep<'c> {
    coords: &'c [[f64; 2]],
    tds: Tds,
    hull: Hull,
    stack: EdgeStack,
    budget: FlipBudget,
    stats: InsertionStatistics,
}

impl<'c> HullSweep<'c> {
    /// Starts from the counter-clockwise seed triangle `seed` with circumcentre `center`.
    pub(crate) fn new(
        coords: &'c [[f64; 2]],
        seed: [usize; 3],
        center: [f64; 2],
        budget: FlipBudget,
    ) -> Self {
        // An N-point triangulation has at most 2N - 5 triangles.
        let max_triangles = coords.len().saturating_mul(2).saturating_sub(5).max(1);
        let mut tds = Tds::with_capacity(max_triangles);
        tds.add_triangle(seed, [EMPTY; 3]);

        let stats = InsertionStatistics {
            points_inserted: 3,
            ..InsertionStatistics::default()
        };

        Self {
            coords,
            tds,
            hull: Hull::new(coords, center, seed),
            stack: EdgeStack::new(),
            budget,
            stats,
        }
    }

    /// Records a point skipped as a duplicate.
    pub(crate) const fn skip_duplicate(&mut self) {
        self.stats.duplicates_skipped += 1;
    }

    fn legalize(&mut self, a: usize, point_index: usize) -> Result<usize, FlipError> {
        let max_flips = self.budget.for_mesh(self.tds.number_of_triangles());
        let outcome = legalize(
            &mut self.tds,
            &mut self.hull,
            self.coords,
            a,
            max_flips,
            point_index,
            &mut self.stack,
        )?;
        self.stats.record(outcome);
        Ok(outcome.edge)
    }

    /// Adds point `i`, which must lie outside the current hull.
    ///
    /// # Errors
    ///
    /// Returns [`InsertionError::Location`] when no hull edge is visible from
    /// the point and [`InsertionError::Flip`] when legalization exceeds its
    /// flip budget. The sweep must be abandoned after either.
    pub(crate) fn insert(&mut self, i: usize) -> Result<(), InsertionError> {
        let coords = self.coords;
        let p = coords[i];

        let visible = find_visible_edge(coords, &self.hull, i)?;
        let mut e = visible.start;
        let mut n = self.hull.next(e);

        // Triangle on the first visible edge.
        let t = self
            .tds
            .add_triangle([e, i, n], [EMPTY, EMPTY, self.hull.tri(e)]);
        let edge = self.legalize(t + 2, i)?;
        self.hull.set_tri(i, edge);
        self.hull.set_tri(e, t);

        // Forward along the hull.
        loop {
            let q = self.hull.next(n);
            if oriented_area(p, coords[n], coords[q]) >= 0.0 {
                break;
            }
            let t = self
                .tds
                .add_triangle([n, i, q], [self.hull.tri(i), EMPTY, self.hull.tri(n)]);
            let edge = self.legalize(t + 2, i)?;
            self.hull.set_tri(i, edge);
            self.hull.remove(n);
            n = q;
        }

        // Backward, only if the visible run may extend before the walk start.
        if visible.walk_back {
            loop {
                let q = self.hull.prev(e);
                if q == n || oriented_area(p, coords[q], coords[e]) >= 0.0 {
                    break;
                }
                let t = self
                    .tds
                    .add_triangle([q, i, e], [EMPTY, self.hull.tri(e), self.hull.tri(q)]);
                self.legalize(t + 2, i)?;
                self.hull.set_tri(q, t);
                self.hull.remove(e);
                e = q;
            }
        }

        self.hull.splice(e, i, n);
        self.hull.hash_point(p, i);
        self.hull.hash_point(coords[e], e);
        self.stats.points_inserted += 1;
        Ok(())
    }

    /// Current hull size.
    pub(crate) fn hull_len(&self) -> usize {
        self.hull.len()
    }

    /// Finishes the sweep, returning the mesh, the counter-clockwise hull and
    /// the statistics.
    pub(crate) fn finish(self) -> (Tds, Vec<usize>, InsertionStatistics) {
        let Self {
            mut tds,
            hull,
            mut stats,
            ..
        } = self;
        tds.shrink_to_fit();
        stats.triangles_created = tds.number_of_triangles();
        (tds, hull.indices(), stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::triangulation_data_structure::next_halfedge;

    const BUDGET: FlipBudget = FlipBudget {
        fixed: None,
        minimum: 128,
    };

    fn assert_consistent(coords: &[[f64; 2]], tds: &Tds) {
        for (e, &opposite) in tds.halfedges().iter().enumerate() {
            if opposite != EMPTY {
                assert_eq!(tds.halfedges()[opposite], e);
                assert_eq!(tds.triangles()[e], tds.triangles()[next_halfedge(opposite)]);
            }
        }
        for t in 0..tds.number_of_triangles() {
            let [a, b, c] = tds.triangle_vertex_indices(t).unwrap().map(|i| coords[i]);
            assert!(oriented_area(a, b, c) > 0.0, "triangle {t} is not counter-clockwise");
        }
    }

    #[test]
    fn test_sweep_adds_fan_for_each_point() {
        let coords = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0], [-1.0, -1.0]];
        let mut sweep = HullSweep::new(&coords, [0, 1, 2], [0.5, 0.5], BUDGET);
        assert_eq!(sweep.hull_len(), 3);

        sweep.insert(3).unwrap();
        assert_eq!(sweep.hull_len(), 4);

        // (-1, -1) sees both edges touching the origin, which leaves the hull.
        sweep.insert(4).unwrap();
        let (tds, hull, stats) = sweep.finish();

        assert_eq!(tds.number_of_triangles(), 4);
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&0));
        assert_eq!(stats.points_inserted, 5);
        assert_eq!(stats.triangles_created, 4);
        assert_consistent(&coords, &tds);
    }

    #[test]
    fn test_sweep_rejects_point_inside_hull() {
        let coords = [[0.0, 0.0], [4.0, 0.0], [0.0, 4.0], [1.0, 1.0]];
        let mut sweep = HullSweep::new(&coords, [0, 1, 2], [2.0, 2.0], BUDGET);
        assert_eq!(
            sweep.insert(3),
            Err(InsertionError::Location(LocateError::NoVisibleEdge {
                point_index: 3
            }))
        );
    }

    #[test]
    fn test_statistics_helpers() {
        let stats = InsertionStatistics {
            points_inserted: 4,
            duplicates_skipped: 2,
            triangles_created: 2,
            flips_performed: 2,
            max_flip_stack_depth: 1,
        };
        assert_eq!(stats.points_processed(), 6);
        assert!((stats.mean_flips_per_point() - 0.5).abs() < f64::EPSILON);
        assert!(InsertionStatistics::default().mean_flips_per_point().abs() < f64::EPSILON);
    }

    #[test]
    fn test_statistics_serde_roundtrip() {
        let stats = InsertionStatistics {
            points_inserted: 10,
            flips_performed: 3,
            ..InsertionStatistics::default()
        };
        let json = serde_json::to_string(&stats).unwrap();
        let back: InsertionStatistics = serde_json::from_str(&json).unwrap();
        assert_eq!(stats, back);
    }
}
