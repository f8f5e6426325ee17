//! # planar-delaunay
//!
//! Fast, deterministic Delaunay triangulation of points in the plane.
//!
//! The triangulator is a radial sweep: it picks a small seed triangle near the
//! centre of the input, sorts the remaining points by distance from the seed's
//! circumcentre and inserts them one by one outside a growing convex hull,
//! restoring the empty-circumcircle property with edge flips after each
//! insertion. The result is a compact half-edge mesh made of two flat index
//! arrays.
//!
//! # Features
//!
//! - Works on any caller point type implementing
//!   [`Coordinate2D`](geometry::traits::coordinate::Coordinate2D), including
//!   `[f64; 2]`, `(f32, f32)` and [`Point`](geometry::point::Point)
//! - Half-edge output: `triangles` and `halfedges` arrays with O(1) neighbour
//!   lookup
//! - Counter-clockwise convex hull as a by-product
//! - Coincident points are skipped, not rejected
//! - Serialization of the mesh with [serde](https://serde.rs)
//!
//! # Basic Usage
//!
//! ```rust
//! use planar_delaunay::prelude::*;
//!
//! let points = vec![[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0], [1.0, 0.8]];
//! let dt = triangulate(&points).unwrap();
//!
//! assert_eq!(dt.number_of_triangles(), 4);
//! assert_eq!(dt.hull().len(), 4);
//!
//! // Each undirected edge once, hull edges included.
//! assert_eq!(dt.edge_indices(true).count(), 8);
//! ```
//!
//! # Half-edge layout
//!
//! Triangle `t` owns half-edges `3t`, `3t + 1` and `3t + 2`. Half-edge `e`
//! starts at point `triangles[e]` and ends at `triangles[next_halfedge(e)]`.
//! `halfedges[e]` is the opposite half-edge in the neighbouring triangle, or
//! [`EMPTY`](core::triangulation_data_structure::EMPTY) on the hull.
//!
//! ```rust
//! use planar_delaunay::prelude::*;
//!
//! let points = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
//! let dt = triangulate(&points).unwrap();
//!
//! for (e, &opposite) in dt.halfedges().iter().enumerate() {
//!     if opposite != EMPTY {
//!         assert_eq!(dt.halfedges()[opposite], e);
//!         assert_eq!(dt.triangles()[e], dt.triangles()[next_halfedge(opposite)]);
//!     }
//! }
//! ```
//!
//! # Invariants and Validation
//!
//! A successful build satisfies:
//!
//! - **Half-edge symmetry**: `halfedges[halfedges[e]] == e` for every interior edge
//! - **Winding**: every triangle is counter-clockwise (y-up)
//! - **Coverage**: the triangles tile the convex hull exactly
//! - **Delaunay property**: no point lies strictly inside any circumcircle
//!
//! These are diagnostics, not part of the build. Check them with
//! [`DelaunayTriangulation::validate`](core::delaunay_triangulation::DelaunayTriangulation::validate)
//! and
//! [`DelaunayTriangulation::validate_delaunay`](core::delaunay_triangulation::DelaunayTriangulation::validate_delaunay).
//!
//! # Limitations
//!
//! Predicates use plain `f64` arithmetic. Adversarial near-degenerate input
//! can therefore fail with
//! [`TriangulationError::NoVisibleEdge`](core::delaunay_triangulation::TriangulationError::NoVisibleEdge)
//! or
//! [`TriangulationError::FlipLoop`](core::delaunay_triangulation::TriangulationError::FlipLoop)
//! rather than loop or return a corrupt mesh.

// Forbid unsafe code throughout the entire crate
#![forbid(unsafe_code)]

#[macro_use]
extern crate derive_builder;

/// The `core` module contains the triangulation itself: the half-edge mesh,
/// the sweep that builds it and the diagnostics that check it.
pub mod core {
    /// Building blocks of the sweep: seeding, hull search, insertion and flips
    pub mod algorithms {
        /// Lawson edge flips restoring the empty-circumcircle property
        pub mod flips;
        /// Per-point insertion outside the current hull
        pub mod incremental_insertion;
        /// Visible hull edge search
        pub mod locate;
        /// Seed triangle selection and insertion order
        pub mod seed;
    }
    /// Small collection types used as per-build scratch
    pub mod collections;
    pub mod delaunay_triangulation;
    /// Edge iterators over a finished mesh
    pub mod edge;
    pub(crate) mod hull;
    pub mod triangulation_data_structure;
    /// Diagnostics over finished triangulations
    pub mod util {
        pub mod delaunay_validation;
        pub use delaunay_validation::*;
    }
    // Re-export the `core` modules.
    pub use delaunay_triangulation::*;
    pub use edge::*;
    pub use triangulation_data_structure::*;
    // Note: collections module not re-exported here to avoid namespace pollution
}

/// Contains geometric types including the `Point` struct and geometry predicates.
///
/// The geometry module provides the point abstraction through the
/// `Coordinate2D` trait, so the triangulator can read caller-owned points
/// without conversion. All predicates run at `f64` precision.
pub mod geometry {
    /// Geometric algorithms independent of the triangulation
    pub mod algorithms {
        /// Monotone-chain convex hull
        pub mod convex_hull;
        pub use convex_hull::*;
    }
    pub mod point;
    pub mod predicates;
    pub mod util;
    /// Traits module containing the coordinate abstraction.
    ///
    /// `Coordinate2D` is the only capability required of input points.
    /// Supporting traits cover validation (`FiniteCheck`) and NaN-aware
    /// equality (`OrderedEq`) of floating-point coordinate values.
    pub mod traits {
        pub mod coordinate;
        pub use coordinate::*;
    }
    pub use algorithms::*;
    pub use point::*;
    pub use predicates::*;
    pub use traits::*;
    pub use util::*;
}

pub use crate::core::delaunay_triangulation::triangulate;

/// A prelude module that re-exports commonly used types and functions.
/// This makes it easier to import the most commonly used items from the crate.
pub mod prelude {
    // Re-export from core
    pub use crate::core::{
        algorithms::incremental_insertion::InsertionStatistics,
        delaunay_triangulation::*,
        edge::*,
        triangulation_data_structure::*,
        util::delaunay_validation::ValidationError,
    };

    // Re-export from geometry
    pub use crate::geometry::{
        algorithms::convex_hull::*, point::*, predicates::*, traits::coordinate::*, util::*,
    };
}

/// The function `is_normal` checks that structs implement `auto` traits.
/// Traits are checked at compile time, so this function is only used for
/// testing.
#[must_use]
pub const fn is_normal<T: Sized + Send + Sync + Unpin>() -> bool {
    true
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{
        core::{
            algorithms::incremental_insertion::InsertionStatistics,
            delaunay_triangulation::{DelaunayTriangulation, TriangulationOptions},
            triangulation_data_structure::Tds,
        },
        geometry::Point,
        is_normal,
    };

    // =============================================================================
    // TYPE SAFETY TESTS
    // =============================================================================

    #[test]
    fn normal_types() {
        assert!(is_normal::<Point<f64>>());
        assert!(is_normal::<Point<f32>>());
        assert!(is_normal::<Tds>());
        assert!(is_normal::<InsertionStatistics>());
        assert!(is_normal::<TriangulationOptions>());
        assert!(is_normal::<DelaunayTriangulation<'static, [f64; 2]>>());
        assert!(is_normal::<DelaunayTriangulation<'static, Point<f32>>>());
    }

    #[test]
    fn test_prelude_exports() {
        use crate::prelude::*;

        let points = vec![
            Point::new([0.0, 0.0]),
            Point::new([1.0, 0.0]),
            Point::new([0.0, 1.0]),
        ];
        let dt = triangulate(&points).unwrap();
        assert_eq!(dt.number_of_triangles(), 1);
        assert_eq!(dt.halfedges(), &[EMPTY; 3]);
        assert_eq!(next_halfedge(2), 0);

        let hull = convex_hull_indices(&points);
        assert_eq!(hull.len(), 3);
        assert_eq!(
            orientation(points[0].to_xy(), points[1].to_xy(), points[2].to_xy()),
            Orientation::POSITIVE
        );
    }
}
