//! Geometric predicates for planar triangulation.
//!
//! This module contains the orientation and in-circle tests that drive the
//! triangulator, together with the circumcircle helpers used for seed
//! selection. All predicates work on `[f64; 2]` coordinates and use ordinary
//! floating-point arithmetic; there is no adaptive or exact fallback.
//!
//! Winding follows the usual mathematical (y-up) convention: a positive
//! oriented area means the three points are in counter-clockwise order.

/// Smallest representable gap above `1.0`.
///
/// Used to clamp [`pseudo_angle`] below `1.0` and as the default per-axis
/// tolerance for coincident-point filtering.
pub const EPSILON: f64 = f64::EPSILON;

/// Sentinel radius of a degenerate triangle, which has no finite circumcircle.
pub const INFINITY: f64 = f64::INFINITY;

/// Represents the orientation of a triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// The vertices are in clockwise order (oriented area < 0)
    NEGATIVE,
    /// The vertices are collinear or coincident (oriented area == 0)
    DEGENERATE,
    /// The vertices are in counter-clockwise order (oriented area > 0)
    POSITIVE,
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NEGATIVE => write!(f, "NEGATIVE"),
            Self::DEGENERATE => write!(f, "DEGENERATE"),
            Self::POSITIVE => write!(f, "POSITIVE"),
        }
    }
}

/// Twice the signed area of the triangle `a`, `b`, `c`.
///
/// Computed as the cross product `(b - a) × (c - a)`. The result is positive
/// when the vertices are counter-clockwise, negative when clockwise and zero
/// when they are collinear. It doubles as the sidedness test: the sign tells
/// on which side of the directed line `a → b` the point `c` lies.
///
/// # Example
///
/// ```
/// use planar_delaunay::geometry::predicates::oriented_area;
///
/// assert_eq!(oriented_area([0.0, 0.0], [1.0, 0.0], [0.0, 1.0]), 1.0);
/// assert_eq!(oriented_area([0.0, 0.0], [0.0, 1.0], [1.0, 0.0]), -1.0);
/// assert_eq!(oriented_area([0.0, 0.0], [1.0, 1.0], [2.0, 2.0]), 0.0);
/// ```
#[inline]
#[must_use]
pub fn oriented_area(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> f64 {
    (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
}

/// Classifies the winding of `a`, `b`, `c` from the sign of [`oriented_area`].
///
/// # Example
///
/// ```
/// use planar_delaunay::geometry::predicates::{Orientation, orientation};
///
/// assert_eq!(orientation([0.0, 0.0], [1.0, 0.0], [1.0, 1.0]), Orientation::POSITIVE);
/// assert_eq!(orientation([0.0, 0.0], [1.0, 0.0], [2.0, 0.0]), Orientation::DEGENERATE);
/// ```
#[inline]
#[must_use]
pub fn orientation(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> Orientation {
    let area = oriented_area(a, b, c);
    if area > 0.0 {
        Orientation::POSITIVE
    } else if area < 0.0 {
        Orientation::NEGATIVE
    } else {
        Orientation::DEGENERATE
    }
}

/// Returns `true` iff `p` lies strictly inside the circle through `a`, `b`, `c`.
///
/// Uses the standard 3×3 determinant expansion with `p` translated to the
/// origin:
///
/// ```text
/// | ax-px  ay-py  (ax-px)²+(ay-py)² |
/// | bx-px  by-py  (bx-px)²+(by-py)² |
/// | cx-px  cy-py  (cx-px)²+(cy-py)² |
/// ```
///
/// The determinant is positive for an inside point when `a`, `b`, `c` are
/// counter-clockwise; its sign is corrected for clockwise input. A degenerate
/// triangle (collinear or coincident vertices) has no finite circle and
/// always yields `false`, so legalization never flips against it.
///
/// # Example
///
/// ```
/// use planar_delaunay::geometry::predicates::in_circumcircle;
///
/// let (a, b, c) = ([0.0, 0.0], [1.0, 0.0], [0.0, 1.0]);
/// assert!(in_circumcircle(a, b, c, [0.5, 0.5]));
/// assert!(!in_circumcircle(a, b, c, [2.0, 2.0]));
/// // Clockwise input gives the same answer
/// assert!(in_circumcircle(a, c, b, [0.5, 0.5]));
/// // Points on the circle are not strictly inside
/// assert!(!in_circumcircle(a, b, c, [1.0, 1.0]));
/// ```
#[must_use]
pub fn in_circumcircle(a: [f64; 2], b: [f64; 2], c: [f64; 2], p: [f64; 2]) -> bool {
    let area = oriented_area(a, b, c);
    if area == 0.0 || !area.is_finite() {
        return false;
    }

    let dx = a[0] - p[0];
    let dy = a[1] - p[1];
    let ex = b[0] - p[0];
    let ey = b[1] - p[1];
    let fx = c[0] - p[0];
    let fy = c[1] - p[1];

    let ap = dx * dx + dy * dy;
    let bp = ex * ex + ey * ey;
    let cp = fx * fx + fy * fy;

    let det = dx * (ey * cp - bp * fy) - dy * (ex * cp - bp * fx) + ap * (ex * fy - ey * fx);

    if area > 0.0 { det > 0.0 } else { det < 0.0 }
}

/// Offset of the circumcentre from `a`, or `None` when `a`, `b`, `c` are collinear.
#[inline]
fn circumcenter_offset(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> Option<[f64; 2]> {
    let dx = b[0] - a[0];
    let dy = b[1] - a[1];
    let ex = c[0] - a[0];
    let ey = c[1] - a[1];

    let bl = dx * dx + dy * dy;
    let cl = ex * ex + ey * ey;
    let d = dx * ey - dy * ex;

    if d == 0.0 || bl == 0.0 || cl == 0.0 {
        return None;
    }

    let x = (ey * bl - dy * cl) * 0.5 / d;
    let y = (dx * cl - ex * bl) * 0.5 / d;
    Some([x, y])
}

/// Squared circumradius of the triangle `a`, `b`, `c`.
///
/// Returns [`INFINITY`] for a degenerate triangle (collinear or coincident
/// vertices), signalling that it has no finite circumcircle and must not be
/// chosen as a seed.
///
/// # Example
///
/// ```
/// use planar_delaunay::geometry::predicates::{INFINITY, circumradius_squared};
///
/// let r2 = circumradius_squared([0.0, 0.0], [2.0, 0.0], [0.0, 2.0]);
/// assert!((r2 - 2.0).abs() < 1e-12);
/// assert_eq!(circumradius_squared([0.0, 0.0], [1.0, 0.0], [2.0, 0.0]), INFINITY);
/// ```
#[must_use]
pub fn circumradius_squared(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> f64 {
    match circumcenter_offset(a, b, c) {
        Some([x, y]) => {
            let r = x * x + y * y;
            if r == 0.0 || !r.is_finite() {
                INFINITY
            } else {
                r
            }
        }
        None => INFINITY,
    }
}

/// Circumcentre of the triangle `a`, `b`, `c`, or `None` when it is degenerate.
///
/// # Example
///
/// ```
/// use planar_delaunay::geometry::predicates::circumcenter;
///
/// let c = circumcenter([0.0, 0.0], [2.0, 0.0], [0.0, 2.0]).unwrap();
/// assert!((c[0] - 1.0).abs() < 1e-12 && (c[1] - 1.0).abs() < 1e-12);
/// assert!(circumcenter([0.0, 0.0], [1.0, 1.0], [2.0, 2.0]).is_none());
/// ```
#[must_use]
pub fn circumcenter(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> Option<[f64; 2]> {
    circumcenter_offset(a, b, c).map(|[x, y]| [a[0] + x, a[1] + y])
}

/// A cheap, monotonic stand-in for the polar angle of `(dx, dy)`.
///
/// Maps a direction to `[0, 1)`, increasing with the counter-clockwise angle
/// measured from the negative x axis, without any trigonometry. Only used for
/// approximate ordering (hash bucketing, sort tie breaking), never for exact
/// geometric decisions. The result is clamped to `1 - EPSILON` so that the
/// `0/1` seam never produces an out-of-range bucket; the zero vector maps to
/// `0`.
///
/// # Example
///
/// ```
/// use planar_delaunay::geometry::predicates::pseudo_angle;
///
/// let east = pseudo_angle(1.0, 0.0);
/// let north = pseudo_angle(0.0, 1.0);
/// let south = pseudo_angle(0.0, -1.0);
/// assert!(south < east && east < north);
/// assert!(pseudo_angle(-1.0, 1e-300) < 1.0);
/// ```
#[must_use]
pub fn pseudo_angle(dx: f64, dy: f64) -> f64 {
    let sum = dx.abs() + dy.abs();
    if sum == 0.0 || !sum.is_finite() {
        return 0.0;
    }
    let p = dx / sum;
    let angle = if dy > 0.0 { (3.0 - p) / 4.0 } else { (1.0 + p) / 4.0 };
    angle.clamp(0.0, 1.0 - EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_oriented_area_sign() {
        let a = [0.0, 0.0];
        let b = [4.0, 0.0];
        let c = [0.0, 3.0];
        assert_relative_eq!(oriented_area(a, b, c), 12.0);
        assert_relative_eq!(oriented_area(a, c, b), -12.0);
        assert_eq!(orientation(a, b, c), Orientation::POSITIVE);
        assert_eq!(orientation(a, c, b), Orientation::NEGATIVE);
        assert_eq!(format!("{}", orientation(a, a, b)), "DEGENERATE");
    }

    #[test]
    fn test_in_circumcircle_degenerate_is_false() {
        let a = [0.0, 0.0];
        let b = [1.0, 0.0];
        let c = [2.0, 0.0];
        assert!(!in_circumcircle(a, b, c, [1.0, 0.1]));
        assert!(!in_circumcircle(a, a, a, [0.0, 0.0]));
    }

    #[test]
    fn test_in_circumcircle_unit_circle() {
        let a = [1.0, 0.0];
        let b = [0.0, 1.0];
        let c = [-1.0, 0.0];
        assert!(in_circumcircle(a, b, c, [0.0, 0.0]));
        assert!(in_circumcircle(a, b, c, [0.0, -0.99]));
        assert!(!in_circumcircle(a, b, c, [0.0, -1.01]));
        assert!(!in_circumcircle(a, b, c, [5.0, 5.0]));
    }

    #[test]
    fn test_circumcircle_helpers_agree() {
        let a = [0.3, -1.2];
        let b = [2.5, 0.7];
        let c = [-0.4, 1.9];
        let center = circumcenter(a, b, c).unwrap();
        let r2 = circumradius_squared(a, b, c);
        for p in [a, b, c] {
            let d2 = (p[0] - center[0]).powi(2) + (p[1] - center[1]).powi(2);
            assert_relative_eq!(d2, r2, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_circumradius_coincident_is_infinite() {
        assert_eq!(circumradius_squared([1.0, 1.0], [1.0, 1.0], [2.0, 3.0]), INFINITY);
        assert_eq!(circumradius_squared([1.0, 1.0], [2.0, 3.0], [1.0, 1.0]), INFINITY);
    }

    #[test]
    fn test_pseudo_angle_monotonic() {
        let steps = 64;
        let mut previous = -1.0;
        // Start just past the negative x axis and sweep counter-clockwise.
        for i in 1..steps {
            let theta = std::f64::consts::PI + f64::from(i) * std::f64::consts::TAU / f64::from(steps);
            let angle = pseudo_angle(theta.cos(), theta.sin());
            assert!(angle > previous, "pseudo angle must increase at step {i}");
            assert!((0.0..1.0).contains(&angle));
            previous = angle;
        }
    }

    #[test]
    fn test_pseudo_angle_edges() {
        assert_eq!(pseudo_angle(0.0, 0.0), 0.0);
        assert_eq!(pseudo_angle(-1.0, 0.0), 0.0);
        assert!(pseudo_angle(-1.0, f64::MIN_POSITIVE) <= 1.0 - EPSILON);
        assert_relative_eq!(pseudo_angle(1.0, 0.0), 0.5);
        assert_relative_eq!(pseudo_angle(0.0, 1.0), 0.75);
        assert_relative_eq!(pseudo_angle(0.0, -1.0), 0.25);
    }
}
