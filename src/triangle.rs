use std::error::Error;
use std::fmt::Display;
use std::hash::{Hash, Hasher};

use crate::{math, Circle, Color, DrawSurface, Point2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The error type used when constructing a [Triangle].
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum TriangleError {
    /// A triangle was built from a number of points other than three.
    WrongPointCount(usize),

    /// At least two of the given points are equal.
    DuplicatePoints,
}

impl Display for TriangleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriangleError::WrongPointCount(count) => {
                write!(f, "a triangle requires exactly 3 points, got {}", count)
            }
            TriangleError::DuplicatePoints => write!(f, "a triangle requires 3 distinct points"),
        }
    }
}

impl Error for TriangleError {}

/// A triangle with a display color.
///
/// The order of the three points carries no meaning: two triangles are equal if they are made
/// of the same points, regardless of their order, and equal triangles always share their hash.
/// The color is not part of a triangle's identity. It can be changed at any time while the
/// points are fixed once the triangle has been created.
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct Triangle {
    points: [Point2<f64>; 3],
    color: Color,
}

impl Triangle {
    /// Creates a new, uncolored triangle.
    ///
    /// Fails if any two points are equal.
    pub fn new(p1: Point2<f64>, p2: Point2<f64>, p3: Point2<f64>) -> Result<Self, TriangleError> {
        if p1 == p2 || p2 == p3 || p3 == p1 {
            return Err(TriangleError::DuplicatePoints);
        }
        Ok(Self {
            points: [p1, p2, p3],
            color: Color::default(),
        })
    }

    /// Creates a triangle from a slice that must contain exactly three distinct points.
    pub fn from_points(points: &[Point2<f64>]) -> Result<Self, TriangleError> {
        match points {
            [p1, p2, p3] => Self::new(*p1, *p2, *p3),
            _ => Err(TriangleError::WrongPointCount(points.len())),
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn points(&self) -> [Point2<f64>; 3] {
        self.points
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Returns `true` if `point` is one of this triangle's vertices.
    pub fn has_point(&self, point: Point2<f64>) -> bool {
        self.points.contains(&point)
    }

    /// Returns the number of vertices shared with another triangle.
    pub fn count_common_points(&self, other: &Triangle) -> usize {
        self.points
            .iter()
            .filter(|point| other.has_point(**point))
            .count()
    }

    /// Returns `true` if both triangles share at least one vertex.
    pub fn has_common_points(&self, other: &Triangle) -> bool {
        self.points.iter().any(|point| other.has_point(*point))
    }

    /// Returns `true` if both triangles share at least two vertices, which means they share an edge.
    pub fn has_common_sides(&self, other: &Triangle) -> bool {
        self.count_common_points(other) >= 2
    }

    /// Returns the triangle's three edges: `(p1, p2)`, `(p2, p3)` and `(p3, p1)`.
    pub fn edges(&self) -> [[Point2<f64>; 2]; 3] {
        let [p1, p2, p3] = self.points;
        [[p1, p2], [p2, p3], [p3, p1]]
    }

    /// Returns the circumscribed circle or `None` for a degenerate (collinear) triangle.
    pub fn circumcircle(&self) -> Option<Circle> {
        math::circumcircle(self.points)
    }

    pub fn area(&self) -> f64 {
        math::triangle_area(self.points)
    }

    /// Returns the triangle's center of gravity.
    pub fn centroid(&self) -> Point2<f64> {
        math::centroid(self.points)
    }

    /// Returns `true` if the point lies inside the triangle or on its boundary.
    pub fn contains_point(&self, point: Point2<f64>) -> bool {
        math::contained_in_triangle(self.points, point)
    }

    /// Draws the triangle as filled polygon using its current color.
    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        surface.draw_polygon(&self.points, self.color);
    }

    fn hash_key(&self) -> [(i64, i64); 3] {
        let mut key = self.points.map(|point| point.rounded());
        key.sort_unstable();
        key
    }
}

impl PartialEq for Triangle {
    fn eq(&self, other: &Self) -> bool {
        // Each point has to be matched by a different point of the other triangle.
        let mut unmatched: Vec<Point2<f64>> = other.points.to_vec();
        for point in &self.points {
            match unmatched.iter().position(|candidate| candidate == point) {
                Some(index) => {
                    unmatched.swap_remove(index);
                }
                None => return false,
            }
        }
        true
    }
}

impl Eq for Triangle {}

impl Hash for Triangle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_key().hash(state);
    }
}

#[cfg(test)]
mod test {
    use super::{Triangle, TriangleError};
    use crate::{Color, DrawCall, Point2, RecordingSurface};
    use approx::assert_relative_eq;
    use hashbrown::HashSet;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(triangle: &Triangle) -> u64 {
        let mut hasher = DefaultHasher::new();
        triangle.hash(&mut hasher);
        hasher.finish()
    }

    fn points() -> [Point2<f64>; 3] {
        [
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(3.0, 7.5),
        ]
    }

    #[test]
    fn test_construction_errors() {
        let [a, b, c] = points();
        assert!(Triangle::new(a, b, c).is_ok());
        assert_eq!(Triangle::new(a, b, a).unwrap_err(), TriangleError::DuplicatePoints);
        assert_eq!(
            Triangle::from_points(&[a, b]).unwrap_err(),
            TriangleError::WrongPointCount(2)
        );
        assert_eq!(
            Triangle::from_points(&[a, b, c, c]).unwrap_err(),
            TriangleError::WrongPointCount(4)
        );
        assert_eq!(Triangle::from_points(&[c, b, a]).unwrap(), Triangle::new(a, b, c).unwrap());
    }

    #[test]
    fn test_permutation_invariance() {
        let [a, b, c] = points();
        let orderings = [
            [a, b, c],
            [a, c, b],
            [b, a, c],
            [b, c, a],
            [c, a, b],
            [c, b, a],
        ];
        let reference = Triangle::new(a, b, c).unwrap();
        let expected_hash = hash_of(&reference);
        for [p1, p2, p3] in orderings {
            let permuted = Triangle::new(p1, p2, p3).unwrap();
            assert_eq!(permuted, reference);
            assert_eq!(reference, permuted);
            assert_eq!(hash_of(&permuted), expected_hash);
        }

        let set: HashSet<Triangle> = orderings
            .iter()
            .map(|[p1, p2, p3]| Triangle::new(*p1, *p2, *p3).unwrap())
            .collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_equality_ignores_color() {
        let [a, b, c] = points();
        let white = Triangle::new(a, b, c).unwrap();
        let red = Triangle::new(c, a, b)
            .unwrap()
            .with_color(Color::from_rgb(255, 0, 0));
        assert_eq!(white, red);
        assert_eq!(hash_of(&white), hash_of(&red));
    }

    #[test]
    fn test_equality_is_injective() {
        let [a, b, c] = points();
        let d = Point2::new(-4.0, 2.0);
        let t1 = Triangle::new(a, b, c).unwrap();
        let t2 = Triangle::new(a, b, d).unwrap();
        assert_ne!(t1, t2);
        assert_ne!(t2, t1);
    }

    #[test]
    fn test_common_points_and_sides() {
        let [a, b, c] = points();
        let d = Point2::new(5.0, -6.0);
        let e = Point2::new(20.0, 20.0);
        let f = Point2::new(-20.0, 20.0);

        let t = Triangle::new(a, b, c).unwrap();
        let shares_edge = Triangle::new(b, a, d).unwrap();
        let shares_vertex = Triangle::new(c, e, f).unwrap();
        let disjoint = Triangle::new(d, e, f).unwrap();

        assert!(t.has_common_points(&shares_edge));
        assert!(t.has_common_sides(&shares_edge));
        assert!(shares_edge.has_common_sides(&t));

        assert!(t.has_common_points(&shares_vertex));
        assert!(shares_vertex.has_common_points(&t));
        assert!(!t.has_common_sides(&shares_vertex));

        assert!(!t.has_common_points(&disjoint));
        assert!(!disjoint.has_common_points(&t));
        assert_eq!(t.count_common_points(&t), 3);
    }

    #[test]
    fn test_geometry() {
        let t = Triangle::new(
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 4.0),
        )
        .unwrap();
        assert_relative_eq!(t.area(), 8.0);
        assert!(t.contains_point(Point2::new(1.0, 1.0)));
        assert!(!t.contains_point(Point2::new(3.0, 3.0)));
        let circle = t.circumcircle().unwrap();
        assert_eq!(circle.center(), Point2::new(2.0, 2.0));
        assert_eq!(t.edges()[1], [Point2::new(4.0, 0.0), Point2::new(0.0, 4.0)]);
    }

    #[test]
    fn test_draw() {
        let [a, b, c] = points();
        let blue = Color::from_rgb(0, 0, 255);
        let t = Triangle::new(a, b, c).unwrap().with_color(blue);
        let mut surface = RecordingSurface::new();
        t.draw(&mut surface);
        assert_eq!(
            surface.calls(),
            &[DrawCall::Polygon {
                points: vec![a, b, c],
                fill: blue
            }]
        );
    }
}
