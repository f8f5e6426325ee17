//! Delaunay triangulation of a planar point set.
//!
//! [`DelaunayTriangulation`] is the result of one build: it borrows the caller's
//! points and owns the half-edge arrays describing the triangles over them,
//! together with the convex hull polygon. The build itself is a single call:
//!
//! 1. Validate the input (at least three points, all coordinates finite)
//! 2. Select a seed triangle and sort the points by distance from its
//!    circumcentre - [`select_seed`], [`insertion_order`]
//! 3. Sweep the sorted points into the mesh, skipping coincident points and
//!    legalizing after every insertion
//! 4. Extract the counter-clockwise hull
//!
//! All working state is local to the build. On error nothing is returned but
//! the error; there is no partially built triangulation.
//!
//! # Examples
//!
//! ```rust
//! use planar_delaunay::prelude::*;
//!
//! let points = vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.5, 0.4]];
//! let dt = DelaunayTriangulation::new(&points).unwrap();
//!
//! assert_eq!(dt.number_of_triangles(), 4);
//! assert_eq!(dt.hull().len(), 4);
//! assert!(dt.validate().is_ok());
//! ```
//!
//! [`select_seed`]: crate::core::algorithms::seed::select_seed
//! [`insertion_order`]: crate::core::algorithms::seed::insertion_order

use std::ops::ControlFlow;

use ordered_float::OrderedFloat;
use thiserror::Error;

use crate::core::algorithms::flips::{DEFAULT_MIN_FLIP_BUDGET, FlipError};
use crate::core::algorithms::incremental_insertion::{
    FlipBudget, HullSweep, InsertionError, InsertionStatistics,
};
use crate::core::algorithms::locate::LocateError;
use crate::core::algorithms::seed::{SeedError, insertion_order, select_seed};
use crate::core::edge::{EdgeIndices, Edges};
use crate::core::triangulation_data_structure::Tds;
use crate::core::util::delaunay_validation::{
    ValidationError, find_delaunay_violations, validate_delaunay, validate_triangulation,
};
use crate::geometry::predicates::EPSILON;
use crate::geometry::traits::coordinate::{Coordinate2D, CoordinateValidationError};

// =============================================================================
// ERRORS
// =============================================================================

/// Errors that can occur while building a triangulation.
///
/// `InsufficientPoints`, `DegenerateInput` and `InvalidCoordinate` describe
/// input the algorithm cannot triangulate. `NoVisibleEdge` and `FlipLoop`
/// indicate an internal invariant failure (usually floating-point trouble on
/// adversarial input) and are worth reporting.
///
/// # Examples
///
/// ```rust
/// use planar_delaunay::prelude::*;
///
/// let err = triangulate(&[[0.0, 0.0], [1.0, 0.0]]).unwrap_err();
/// assert_eq!(err, TriangulationError::InsufficientPoints { found: 2 });
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum TriangulationError {
    /// Fewer than three distinct points were supplied.
    #[error("Need at least 3 distinct points, found {found}")]
    InsufficientPoints {
        /// Number of (distinct) points available.
        found: usize,
    },
    /// The points admit no triangle of positive area.
    #[error("Degenerate input: {reason}")]
    DegenerateInput {
        /// What makes the input degenerate.
        reason: String,
    },
    /// No hull edge was visible from a point during insertion.
    #[error("No visible hull edge found for point {point_index}")]
    NoVisibleEdge {
        /// Input index of the point being inserted.
        point_index: usize,
    },
    /// Legalization did not settle within its flip budget.
    #[error("Legalization exceeded {max_flips} flips while inserting point {point_index}")]
    FlipLoop {
        /// Flip budget that was exceeded.
        max_flips: usize,
        /// Input index of the point being inserted.
        point_index: usize,
    },
    /// A point has a NaN or infinite coordinate.
    #[error("Invalid coordinate in point {index}: {source}")]
    InvalidCoordinate {
        /// Input index of the offending point.
        index: usize,
        /// The underlying coordinate validation error.
        #[source]
        source: CoordinateValidationError,
    },
}

impl From<InsertionError> for TriangulationError {
    fn from(err: InsertionError) -> Self {
        match err {
            InsertionError::Location(LocateError::NoVisibleEdge { point_index }) => {
                Self::NoVisibleEdge { point_index }
            }
            InsertionError::Flip(FlipError::FlipLoop {
                max_flips,
                point_index,
            }) => Self::FlipLoop {
                max_flips,
                point_index,
            },
        }
    }
}

// =============================================================================
// OPTIONS
// =============================================================================

/// Tunables of a triangulation build.
///
/// The defaults suit nearly all input; [`triangulate`] and
/// [`DelaunayTriangulation::new`] use them.
///
/// # Examples
///
/// ```rust
/// use planar_delaunay::prelude::*;
///
/// let options = TriangulationOptionsBuilder::default()
///     .duplicate_tolerance(1e-9)
///     .max_flips_per_insertion(10_000_usize)
///     .build()
///     .unwrap();
///
/// // The last point is visited right after the one it nearly repeats.
/// let points = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [3.0, 3.0], [3.0 + 1e-12, 3.0]];
/// let dt = DelaunayTriangulation::with_options(&points, &options).unwrap();
/// assert_eq!(dt.statistics().duplicates_skipped, 1);
/// ```
#[derive(Builder, Clone, Copy, Debug, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct TriangulationOptions {
    /// Per-axis distance within which a point coincides with the point sorted
    /// before it (or with a seed vertex) and is skipped.
    #[builder(default = "EPSILON")]
    pub duplicate_tolerance: f64,
    /// Fixed flip budget of each legalization. When `None` the budget scales
    /// with the mesh size, never dropping below `min_flip_budget`.
    #[builder(setter(into, strip_option), default)]
    pub max_flips_per_insertion: Option<usize>,
    /// Lower bound of the scaled flip budget.
    #[builder(default = "DEFAULT_MIN_FLIP_BUDGET")]
    pub min_flip_budget: usize,
}

impl TriangulationOptionsBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.duplicate_tolerance {
            Some(tolerance) if !(tolerance.is_finite() && tolerance >= 0.0) => Err(format!(
                "duplicate_tolerance must be finite and non-negative, got {tolerance}"
            )),
            _ => Ok(()),
        }
    }
}

impl Default for TriangulationOptions {
    fn default() -> Self {
        Self {
            duplicate_tolerance: EPSILON,
            max_flips_per_insertion: None,
            min_flip_budget: DEFAULT_MIN_FLIP_BUDGET,
        }
    }
}

impl TriangulationOptions {
    const fn flip_budget(&self) -> FlipBudget {
        FlipBudget {
            fixed: self.max_flips_per_insertion,
            minimum: self.min_flip_budget,
        }
    }

    fn coincide(&self, a: [f64; 2], b: [f64; 2]) -> bool {
        (a[0] - b[0]).abs() <= self.duplicate_tolerance
            && (a[1] - b[1]).abs() <= self.duplicate_tolerance
    }
}

// =============================================================================
// TRIANGULATION
// =============================================================================

/// Delaunay triangulation of a borrowed point sequence.
///
/// Triangles are stored as point indices into [`points`](Self::points),
/// three per triangle, counter-clockwise. Points skipped as duplicates appear
/// in no triangle.
///
/// # Type Parameters
/// - `P`: the caller's point type, anything implementing [`Coordinate2D`]
#[derive(Clone, Debug)]
pub struct DelaunayTriangulation<'a, P> {
    points: &'a [P],
    tds: Tds,
    hull: Vec<usize>,
    statistics: InsertionStatistics,
}

/// Triangulates `points` with default options.
///
/// # Errors
///
/// See [`DelaunayTriangulation::with_options`].
///
/// # Examples
///
/// ```rust
/// use planar_delaunay::triangulate;
///
/// let points = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
/// let dt = triangulate(&points).unwrap();
/// assert_eq!(dt.number_of_triangles(), 2);
/// assert_eq!(dt.hull().len(), 4);
/// ```
pub fn triangulate<P: Coordinate2D>(
    points: &[P],
) -> Result<DelaunayTriangulation<'_, P>, TriangulationError> {
    DelaunayTriangulation::new(points)
}

impl<'a, P> DelaunayTriangulation<'a, P>
where
    P: Coordinate2D,
{
    /// Triangulates `points` with default options.
    ///
    /// # Errors
    ///
    /// See [`with_options`](Self::with_options).
    pub fn new(points: &'a [P]) -> Result<Self, TriangulationError> {
        Self::with_options(points, &TriangulationOptions::default())
    }

    /// Triangulates `points`.
    ///
    /// # Errors
    ///
    /// - [`TriangulationError::InsufficientPoints`] for fewer than three
    ///   (distinct) points
    /// - [`TriangulationError::InvalidCoordinate`] for a NaN or infinite coordinate
    /// - [`TriangulationError::DegenerateInput`] when all points coincide or
    ///   are collinear
    /// - [`TriangulationError::NoVisibleEdge`] or [`TriangulationError::FlipLoop`]
    ///   when floating-point error breaks an invariant of the sweep
    pub fn with_options(
        points: &'a [P],
        options: &TriangulationOptions,
    ) -> Result<Self, TriangulationError> {
        if points.len() < 3 {
            return Err(TriangulationError::InsufficientPoints {
                found: points.len(),
            });
        }

        let coords = points
            .iter()
            .enumerate()
            .map(|(index, point)| {
                point
                    .validate()
                    .map(|()| point.to_xy())
                    .map_err(|source| TriangulationError::InvalidCoordinate { index, source })
            })
            .collect::<Result<Vec<[f64; 2]>, _>>()?;

        let seed = select_seed(&coords).map_err(|err| seed_failure(&coords, err))?;
        let order = insertion_order(&coords, seed.center);

        let mut sweep = HullSweep::new(&coords, seed.vertices, seed.center, options.flip_budget());
        let mut previous: Option<[f64; 2]> = None;

        for i in order {
            let p = coords[i];
            let repeats_previous = previous.is_some_and(|q| options.coincide(p, q));
            previous = Some(p);

            if seed.vertices.contains(&i) {
                continue;
            }
            if repeats_previous || seed.vertices.iter().any(|&s| options.coincide(p, coords[s])) {
                tracing::debug!("Skipping point {i}: coincides with an earlier point");
                sweep.skip_duplicate();
                continue;
            }

            sweep.insert(i).map_err(|err| {
                if let InsertionError::Location(_) = err {
                    tracing::warn!(
                        "Insertion of point {i} failed with hull of {} points: {err}",
                        sweep.hull_len()
                    );
                }
                TriangulationError::from(err)
            })?;
        }

        let (tds, hull, statistics) = sweep.finish();
        tracing::debug!(
            "Triangulated {} points: {} inserted, {} duplicates, {} triangles, {} flips, hull of {}",
            points.len(),
            statistics.points_inserted,
            statistics.duplicates_skipped,
            statistics.triangles_created,
            statistics.flips_performed,
            hull.len()
        );

        Ok(Self {
            points,
            tds,
            hull,
            statistics,
        })
    }

    /// The caller's points.
    #[must_use]
    pub const fn points(&self) -> &'a [P] {
        self.points
    }

    /// Point indices, three per triangle, counter-clockwise.
    #[must_use]
    pub fn triangles(&self) -> &[usize] {
        self.tds.triangles()
    }

    /// Opposite half-edges, parallel to [`triangles`](Self::triangles);
    /// [`EMPTY`](crate::core::triangulation_data_structure::EMPTY) on the hull.
    #[must_use]
    pub fn halfedges(&self) -> &[usize] {
        self.tds.halfedges()
    }

    /// Opposite of half-edge `e`, or `None` on the hull or out of range.
    #[must_use]
    pub fn halfedge(&self, e: usize) -> Option<usize> {
        self.tds.halfedge(e)
    }

    /// Point indices of the convex hull, counter-clockwise, not closed.
    #[must_use]
    pub fn hull(&self) -> &[usize] {
        &self.hull
    }

    /// The hull points themselves, counter-clockwise.
    pub fn convex_hull(&self) -> impl ExactSizeIterator<Item = &'a P> + '_ {
        let points = self.points;
        self.hull.iter().map(move |&i| &points[i])
    }

    /// Number of triangles.
    #[must_use]
    pub fn number_of_triangles(&self) -> usize {
        self.tds.number_of_triangles()
    }

    /// Point indices of triangle `t`, or `None` when out of range.
    #[must_use]
    pub fn triangle_vertex_indices(&self, t: usize) -> Option<[usize; 3]> {
        self.tds.triangle_vertex_indices(t)
    }

    /// The three points of triangle `t`, counter-clockwise, or `None` when out of range.
    #[must_use]
    pub fn triangle_vertices(&self, t: usize) -> Option<[&'a P; 3]> {
        let points = self.points;
        self.triangle_vertex_indices(t)
            .map(|indices| indices.map(|i| &points[i]))
    }

    /// Every undirected edge once, as point-index pairs.
    ///
    /// Hull edges are included only when `include_hull` is set.
    #[must_use]
    pub fn edge_indices(&self, include_hull: bool) -> EdgeIndices<'_> {
        EdgeIndices::new(&self.tds, include_hull)
    }

    /// Every undirected edge once, as point pairs.
    ///
    /// The iterator is lazy; stop early with the usual adapters.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use planar_delaunay::triangulate;
    ///
    /// let points = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
    /// let dt = triangulate(&points).unwrap();
    /// assert_eq!(dt.edges(true).count(), 5);
    /// assert_eq!(dt.edges(false).count(), 1);
    /// ```
    #[must_use]
    pub fn edges(&self, include_hull: bool) -> Edges<'_, 'a, P> {
        Edges::new(self.points, &self.tds, include_hull)
    }

    /// Calls `visitor` with the endpoints of every undirected edge until it
    /// returns [`ControlFlow::Break`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::ops::ControlFlow;
    /// use planar_delaunay::triangulate;
    ///
    /// let points = [[0.0_f64, 0.0], [4.0, 0.0], [4.0, 3.0], [0.0, 3.0]];
    /// let dt = triangulate(&points).unwrap();
    ///
    /// // Find any edge longer than 4.5 (the diagonal, length 5).
    /// let found = dt.for_each_edge(false, |a, b| {
    ///     let length = (a[0] - b[0]).hypot(a[1] - b[1]);
    ///     if length > 4.5 { ControlFlow::Break(length) } else { ControlFlow::Continue(()) }
    /// });
    /// assert_eq!(found, ControlFlow::Break(5.0));
    /// ```
    pub fn for_each_edge<B, F>(&self, include_hull: bool, mut visitor: F) -> ControlFlow<B>
    where
        F: FnMut(&'a P, &'a P) -> ControlFlow<B>,
    {
        for (a, b) in self.edges(include_hull) {
            visitor(a, b)?;
        }
        ControlFlow::Continue(())
    }

    /// Checks the structure against an independent recomputation.
    ///
    /// Verifies half-edge symmetry, and that the hull polygon's area and
    /// perimeter, and the summed triangle areas, match a convex hull computed
    /// from scratch. Intended for tests and debugging.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_triangulation(self.points, &self.tds, &self.hull)
    }

    /// Checks the empty-circumcircle property of every triangle. O(T·N).
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DelaunayViolation`] for the first triangle
    /// whose circumcircle strictly contains another point.
    pub fn validate_delaunay(&self) -> Result<(), ValidationError> {
        validate_delaunay(self.points, &self.tds)
    }

    /// Triangles whose circumcircle strictly contains another input point.
    #[must_use]
    pub fn find_delaunay_violations(&self) -> Vec<usize> {
        find_delaunay_violations(self.points, &self.tds)
    }

    /// `true` when both [`validate`](Self::validate) and
    /// [`validate_delaunay`](Self::validate_delaunay) pass.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok() && self.validate_delaunay().is_ok()
    }

    /// Counters collected during the build.
    #[must_use]
    pub const fn statistics(&self) -> InsertionStatistics {
        self.statistics
    }

    /// The underlying half-edge structure.
    #[must_use]
    pub const fn tds(&self) -> &Tds {
        &self.tds
    }

    /// Releases the borrow of the points, keeping only the half-edge structure.
    #[must_use]
    pub fn into_tds(self) -> Tds {
        self.tds
    }
}

/// Maps a seed failure to the error reported to the caller.
fn seed_failure(coords: &[[f64; 2]], err: SeedError) -> TriangulationError {
    match err {
        SeedError::TooFewPoints { found } => TriangulationError::InsufficientPoints { found },
        SeedError::AllCoincident => TriangulationError::DegenerateInput {
            reason: "all points are coincident".to_string(),
        },
        SeedError::AllCollinear => {
            let distinct = count_distinct(coords);
            if distinct < 3 {
                TriangulationError::InsufficientPoints { found: distinct }
            } else {
                TriangulationError::DegenerateInput {
                    reason: format!("all {distinct} distinct points are collinear"),
                }
            }
        }
    }
}

fn count_distinct(coords: &[[f64; 2]]) -> usize {
    let mut keys: Vec<[OrderedFloat<f64>; 2]> = coords
        .iter()
        .map(|&[x, y]| [OrderedFloat(x), OrderedFloat(y)])
        .collect();
    keys.sort_unstable();
    keys.dedup();
    keys.len()
}
