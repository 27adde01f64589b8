//! Points and polygons on the integer lattice.

use rand::Rng;
use std::fmt;
use std::fmt::Write as _;
use std::ops::RangeInclusive;

/// A 2D point with integer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Cross product `(b - self) × (c - self)`.
    ///
    /// Positive for a counter-clockwise turn, negative for clockwise,
    /// zero when the three points are collinear. Computed in `i128`, so it
    /// is exact for coordinates of magnitude up to `2^61`.
    pub fn cross(self, b: Point, c: Point) -> i128 {
        let (bx, by) = self.offset(b);
        let (cx, cy) = self.offset(c);
        bx * cy - by * cx
    }

    /// Dot product `(b - self) · (c - self)`, exact like [`Point::cross`].
    pub fn dot(self, b: Point, c: Point) -> i128 {
        let (bx, by) = self.offset(b);
        let (cx, cy) = self.offset(c);
        bx * cx + by * cy
    }

    fn offset(self, other: Point) -> (i128, i128) {
        (
            i128::from(other.x) - i128::from(self.x),
            i128::from(other.y) - i128::from(self.y),
        )
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

impl From<(i64, i64)> for Point {
    fn from((x, y): (i64, i64)) -> Self {
        Self::new(x, y)
    }
}

/// An ordered, implicitly closed sequence of vertices.
///
/// No validity is enforced on construction; see
/// [`GeometryOracle`](super::GeometryOracle) for the checks applied before
/// an area is reported.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Twice the signed shoelace area. Positive for counter-clockwise order.
    pub fn signed_double_area(&self) -> i128 {
        signed_double_area(&self.vertices)
    }

    /// Renders the polygon as a standalone SVG document.
    ///
    /// The drawing is scaled to fit `width × height` with a small margin and
    /// flipped vertically so that +y points up.
    pub fn to_svg(&self, width: u32, height: u32) -> String {
        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        );
        let _ = writeln!(
            svg,
            r#"  <rect width="{width}" height="{height}" fill="white"/>"#
        );

        if let Some(frame) = Frame::fit(&self.vertices, width as f64, height as f64) {
            let points: Vec<String> = self
                .vertices
                .iter()
                .map(|p| {
                    let (x, y) = frame.project(*p);
                    format!("{x:.2},{y:.2}")
                })
                .collect();
            let _ = writeln!(
                svg,
                r#"  <polygon points="{}" fill="lightsteelblue" stroke="darkslategrey" stroke-width="2"/>"#,
                points.join(" ")
            );
            for p in &self.vertices {
                let (x, y) = frame.project(*p);
                let _ = writeln!(
                    svg,
                    r#"  <circle cx="{x:.2}" cy="{y:.2}" r="3" fill="steelblue"/>"#
                );
                let _ = writeln!(
                    svg,
                    r#"  <text x="{:.2}" y="{:.2}" font-family="monospace" font-size="11" fill="darkslategrey">{p}</text>"#,
                    x + 5.0,
                    y - 5.0
                );
            }
        }

        svg.push_str("</svg>\n");
        svg
    }
}

impl From<Vec<Point>> for Polygon {
    fn from(vertices: Vec<Point>) -> Self {
        Self::new(vertices)
    }
}

/// Twice the signed shoelace area of a closed vertex ring.
/// Terms are fanned out from the first vertex.
pub(crate) fn signed_double_area(vertices: &[Point]) -> i128 {
    let Some(&origin) = vertices.first() else {
        return 0;
    };
    vertices
        .windows(2)
        .map(|edge| origin.cross(edge[0], edge[1]))
        .sum()
}

/// Generates a random triangle with coordinates drawn from `range`
/// (inclusive on both ends).
pub fn random_triangle<R: Rng>(range: RangeInclusive<i64>, rng: &mut R) -> [Point; 3] {
    let mut point = || {
        let x = rng.random_range(range.clone());
        let y = rng.random_range(range.clone());
        Point::new(x, y)
    };
    [point(), point(), point()]
}

/// Affine map from lattice coordinates into an SVG viewport.
struct Frame {
    min_x: f64,
    max_y: f64,
    scale: f64,
    margin: f64,
}

impl Frame {
    const MARGIN: f64 = 24.0;

    fn fit(points: &[Point], width: f64, height: f64) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut max_x) = (first.x, first.x);
        let (mut min_y, mut max_y) = (first.y, first.y);
        for p in points {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }
        let span_x = ((max_x - min_x) as f64).max(1.0);
        let span_y = ((max_y - min_y) as f64).max(1.0);
        let usable_w = (width - 2.0 * Self::MARGIN).max(1.0);
        let usable_h = (height - 2.0 * Self::MARGIN).max(1.0);
        Some(Self {
            min_x: min_x as f64,
            max_y: max_y as f64,
            scale: (usable_w / span_x).min(usable_h / span_y),
            margin: Self::MARGIN,
        })
    }

    fn project(&self, p: Point) -> (f64, f64) {
        (
            self.margin + (p.x as f64 - self.min_x) * self.scale,
            self.margin + (self.max_y - p.y as f64) * self.scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_cross_orientation() {
        let o = Point::new(0, 0);
        assert!(o.cross(Point::new(1, 0), Point::new(0, 1)) > 0);
        assert!(o.cross(Point::new(0, 1), Point::new(1, 0)) < 0);
        assert_eq!(o.cross(Point::new(1, 1), Point::new(3, 3)), 0);
    }

    #[test]
    fn test_signed_area_orientation() {
        let ccw = Polygon::new(vec![
            Point::new(0, 0),
            Point::new(4, 0),
            Point::new(4, 3),
        ]);
        assert_eq!(ccw.signed_double_area(), 12);

        let cw = Polygon::new(ccw.vertices().iter().rev().copied().collect());
        assert_eq!(cw.signed_double_area(), -12);
    }

    #[test]
    fn test_products_exact_for_large_coordinates() {
        let h = 1_i64 << 61;
        let o = Point::new(-h, -h);
        let b = Point::new(h, -h);
        let c = Point::new(-h, h);
        let side = 2 * i128::from(h);
        assert_eq!(o.cross(b, c), side * side);
        assert_eq!(o.dot(b, c), 0);
    }

    #[test]
    fn test_signed_area_far_from_origin() {
        let base = 4_000_000_000_000;
        let square = Polygon::new(vec![
            Point::new(base, base),
            Point::new(base + 10, base),
            Point::new(base + 10, base + 10),
            Point::new(base, base + 10),
        ]);
        assert_eq!(square.signed_double_area(), 200);
    }

    #[test]
    fn test_display() {
        assert_eq!(Point::new(3, -7).to_string(), "[3, -7]");
    }

    #[test]
    fn test_random_triangle_in_range() {
        let mut rng = create_rng(42);
        for _ in 0..500 {
            for p in random_triangle(0..=100, &mut rng) {
                assert!((0..=100).contains(&p.x), "x out of range: {p}");
                assert!((0..=100).contains(&p.y), "y out of range: {p}");
            }
        }
    }

    #[test]
    fn test_random_triangle_reaches_upper_bound() {
        let mut rng = create_rng(3);
        let hit = (0..5000)
            .flat_map(|_| random_triangle(0..=4, &mut rng))
            .any(|p| p.x == 4 || p.y == 4);
        assert!(hit, "inclusive upper bound never sampled");
    }

    #[test]
    fn test_svg_contains_vertices() {
        let poly = Polygon::new(vec![
            Point::new(98, 99),
            Point::new(92, 4),
            Point::new(1, 10),
        ]);
        let svg = poly.to_svg(400, 300);
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("<polygon"));
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains("[92, 4]"));
    }

    #[test]
    fn test_svg_empty_polygon() {
        let svg = Polygon::default().to_svg(100, 100);
        assert!(!svg.contains("<polygon"));
    }
}
