//! Integration tests on seeded random point clouds.
//!
//! Each distribution is generated from a fixed `StdRng` seed, so failures
//! reproduce exactly. Covered distributions:
//! - Uniform in a square
//! - Gaussian (Box-Muller)
//! - Integer grid (many cocircular quadruples)
//! - Ring around a centre point (all but one point near the hull)

#![allow(missing_docs)]

use std::f64::consts::TAU;
use std::sync::Once;

use approx::assert_relative_eq;
use planar_delaunay::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

static INIT: Once = Once::new();

fn init_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

// =============================================================================
// GENERATORS
// =============================================================================

fn uniform_points(n: usize, seed: u64) -> Vec<[f64; 2]> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| [rng.random_range(-1000.0..1000.0), rng.random_range(-1000.0..1000.0)])
        .collect()
}

fn gaussian_points(n: usize, seed: u64) -> Vec<[f64; 2]> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            // 1 - u keeps the logarithm's argument in (0, 1].
            let u1: f64 = 1.0 - rng.random::<f64>();
            let u2: f64 = rng.random();
            let r = (-2.0 * u1.ln()).sqrt();
            [r * (TAU * u2).cos(), r * (TAU * u2).sin()]
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn grid_points(n: usize, _seed: u64) -> Vec<[f64; 2]> {
    let side = n.isqrt();
    (0..side * side)
        .map(|k| {
            let (i, j) = (k / side, k % side);
            [i as f64, j as f64]
        })
        .collect()
}

fn ring_points(n: usize, seed: u64) -> Vec<[f64; 2]> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut points: Vec<[f64; 2]> = (0..n - 1)
        .map(|_| {
            let angle = rng.random_range(0.0..TAU);
            let radius = rng.random_range(95.0..105.0);
            [radius * angle.cos(), radius * angle.sin()]
        })
        .collect();
    points.push([0.0, 0.0]);
    points
}

// =============================================================================
// DISTRIBUTION TESTS
// =============================================================================

/// Macro to generate a full-check test per distribution and size.
macro_rules! test_point_cloud {
    ($generator:ident, $n:literal, $seed:literal) => {
        pastey::paste! {
            #[test]
            fn [<test_ $generator _ $n>]() {
                init_tracing();
                let points = $generator($n, $seed);

                let dt = triangulate(&points).unwrap_or_else(|err| {
                    panic!("{} with {} points failed: {err}", stringify!($generator), $n)
                });

                let statistics = dt.statistics();
                let n = statistics.points_inserted;
                let h = dt.hull().len();
                assert_eq!(statistics.points_processed(), points.len());
                assert_eq!(statistics.duplicates_skipped, 0);
                assert_eq!(statistics.triangles_created, dt.number_of_triangles());
                assert_eq!(dt.number_of_triangles(), 2 * n - h - 2);

                assert_eq!(dt.validate(), Ok(()));
                assert_eq!(dt.validate_delaunay(), Ok(()));
            }
        }
    };
}

test_point_cloud!(uniform_points, 10, 1);
test_point_cloud!(uniform_points, 100, 2);
test_point_cloud!(uniform_points, 2000, 3);
test_point_cloud!(gaussian_points, 100, 4);
test_point_cloud!(gaussian_points, 2000, 5);
test_point_cloud!(grid_points, 100, 0);
test_point_cloud!(grid_points, 900, 0);
test_point_cloud!(ring_points, 64, 6);
test_point_cloud!(ring_points, 500, 7);

// =============================================================================
// AGGREGATE CHECKS
// =============================================================================

#[test]
fn test_grid_triangle_areas_are_uniform() {
    let points = grid_points(400, 0);
    let dt = triangulate(&points).unwrap();

    // A 20 x 20 grid has 19 x 19 unit cells, each split into two halves.
    assert_eq!(dt.number_of_triangles(), 2 * 19 * 19);
    assert_eq!(dt.hull().len(), 4 * 19);
    for t in 0..dt.number_of_triangles() {
        let [a, b, c] = dt.triangle_vertices(t).unwrap();
        assert_relative_eq!(oriented_area(*a, *b, *c), 1.0);
    }
}

#[test]
fn test_large_uniform_statistics() {
    init_tracing();
    let points = uniform_points(10_000, 42);
    let dt = triangulate(&points).unwrap();

    let statistics = dt.statistics();
    assert_eq!(statistics.points_inserted, points.len());
    assert!(statistics.flips_performed > 0);
    assert!(statistics.mean_flips_per_point() < 10.0);
    assert!(statistics.max_flip_stack_depth >= 1);

    let triangle_area: f64 = (0..dt.number_of_triangles())
        .map(|t| {
            let [a, b, c] = dt.triangle_vertices(t).unwrap();
            oriented_area(*a, *b, *c) / 2.0
        })
        .sum();
    let hull: Vec<[f64; 2]> = dt.convex_hull().copied().collect();
    assert_relative_eq!(triangle_area, polygon_area(&hull), max_relative = 1e-9);
    assert_eq!(dt.validate(), Ok(()));
}

#[test]
fn test_same_seed_same_mesh() {
    let a = triangulate(&gaussian_points(500, 99)).map(|dt| dt.into_tds());
    let b = triangulate(&gaussian_points(500, 99)).map(|dt| dt.into_tds());
    assert_eq!(a.unwrap(), b.unwrap());
}

#[test]
fn test_appended_copies_are_skipped() {
    let mut points = uniform_points(200, 11);
    let extra: Vec<[f64; 2]> = points[..20].to_vec();
    points.extend(extra);

    let dt = triangulate(&points).unwrap();
    assert_eq!(dt.statistics().duplicates_skipped, 20);
    assert_eq!(dt.statistics().points_inserted, 200);
    assert!(dt.is_valid());
}
