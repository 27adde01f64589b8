//! Polygon construction and area measurement.

use super::types::{signed_double_area, Point};
use std::collections::HashSet;

/// Why a point sequence could not be turned into a polygon.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    #[error("duplicate vertex {0}")]
    DuplicateVertex(Point),
    #[error("edges {first} and {second} intersect")]
    SelfIntersecting { first: usize, second: usize },
    #[error("polygon encloses zero area")]
    Degenerate,
}

/// Builds a closed polygon from an ordered point sequence and measures it.
///
/// Implementations must reject inputs that do not describe a simple polygon
/// with at least three vertices.
pub trait GeometryOracle: Send + Sync {
    /// Returns the enclosed area, or the reason the polygon is invalid.
    fn polygon_area(&self, points: &[Point]) -> Result<f64, GeometryError>;
}

impl<G: GeometryOracle + ?Sized> GeometryOracle for &G {
    fn polygon_area(&self, points: &[Point]) -> Result<f64, GeometryError> {
        (**self).polygon_area(points)
    }
}

/// Exact lattice oracle: simple-polygon check followed by the shoelace
/// formula.
///
/// Edge `i` runs from vertex `i` to vertex `i + 1` (wrapping). Non-adjacent
/// edges may not touch at all; adjacent edges may only share their common
/// vertex.
///
/// # Complexity
/// O(n²) edge-pair checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShoelaceOracle;

impl GeometryOracle for ShoelaceOracle {
    fn polygon_area(&self, points: &[Point]) -> Result<f64, GeometryError> {
        let n = points.len();
        if n < 3 {
            return Err(GeometryError::TooFewVertices(n));
        }

        let mut seen = HashSet::with_capacity(n);
        for p in points {
            if !seen.insert(*p) {
                return Err(GeometryError::DuplicateVertex(*p));
            }
        }

        if let Some((first, second)) = find_intersection(points) {
            return Err(GeometryError::SelfIntersecting { first, second });
        }

        let double_area = signed_double_area(points).abs();
        if double_area == 0 {
            return Err(GeometryError::Degenerate);
        }
        Ok(double_area as f64 / 2.0)
    }
}

/// Returns the first offending edge pair, if any.
fn find_intersection(points: &[Point]) -> Option<(usize, usize)> {
    let n = points.len();
    let edge = |i: usize| (points[i], points[(i + 1) % n]);

    for i in 0..n {
        for j in (i + 1)..n {
            let (a0, a1) = edge(i);
            let (b0, b1) = edge(j);
            let bad = if j == i + 1 {
                // shared vertex a1 == b0
                folds_back(a1, a0, b1)
            } else if i == 0 && j == n - 1 {
                // shared vertex b1 == a0
                folds_back(a0, a1, b0)
            } else {
                segments_touch(a0, a1, b0, b1)
            };
            if bad {
                return Some((i, j));
            }
        }
    }
    None
}

/// Two edges leaving `shared` towards `p` and `q` overlap when they are
/// collinear and point the same way.
fn folds_back(shared: Point, p: Point, q: Point) -> bool {
    shared.cross(p, q) == 0 && shared.dot(p, q) > 0
}

/// Closed-segment intersection test, endpoints included.
fn segments_touch(a0: Point, a1: Point, b0: Point, b1: Point) -> bool {
    let d1 = a0.cross(a1, b0).signum();
    let d2 = a0.cross(a1, b1).signum();
    let d3 = b0.cross(b1, a0).signum();
    let d4 = b0.cross(b1, a1).signum();

    if d1 * d2 < 0 && d3 * d4 < 0 {
        return true;
    }

    (d1 == 0 && on_segment(a0, a1, b0))
        || (d2 == 0 && on_segment(a0, a1, b1))
        || (d3 == 0 && on_segment(b0, b1, a0))
        || (d4 == 0 && on_segment(b0, b1, a1))
}

/// `p` is known to be collinear with `a`–`b`; checks it lies between them.
fn on_segment(a: Point, b: Point, p: Point) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}
