use crate::{Circle, MeshNum, Point2};

/// Distance added to the radius of a rectangle's bounding circle.
pub const BOUNDING_CIRCLE_MARGIN: f64 = 1.0;

fn to_robust_coord<S: MeshNum>(point: Point2<S>) -> robust::Coord<f64> {
    let point = point.to_f64();
    robust::Coord {
        x: point.x,
        y: point.y,
    }
}

/// Returns a value greater than zero if `p1`, `p2` and `query_point` are ordered counterclockwise,
/// a value less than zero if they are ordered clockwise and zero if they are collinear.
///
/// The sign is exact.
pub fn orientation<S: MeshNum>(p1: Point2<S>, p2: Point2<S>, query_point: Point2<S>) -> f64 {
    robust::orient2d(
        to_robust_coord(p1),
        to_robust_coord(p2),
        to_robust_coord(query_point),
    )
}

pub fn is_collinear<S: MeshNum>(positions: [Point2<S>; 3]) -> bool {
    let [v0, v1, v2] = positions;
    orientation(v0, v1, v2) == 0.0
}

/// Computes the circumscribed circle of a triangle.
///
/// Returns `None` if the vertices are collinear, in which case no such circle exists.
pub fn circumcircle(positions: [Point2<f64>; 3]) -> Option<Circle> {
    let [p1, p2, p3] = positions;
    let (x1, y1) = (p1.x, p1.y);
    let (x2, y2) = (p2.x, p2.y);
    let (x3, y3) = (p3.x, p3.y);

    let c = 2.0 * ((x2 - x1) * (y3 - y1) - (y2 - y1) * (x3 - x1));
    if c == 0.0 || is_collinear(positions) {
        return None;
    }

    let m1 = x2 * x2 - x1 * x1 + y2 * y2 - y1 * y1;
    let m2 = x3 * x3 - x1 * x1 + y3 * y3 - y1 * y1;
    let center = Point2::new(
        ((y3 - y1) * m1 + (y1 - y2) * m2) / c,
        ((x1 - x3) * m1 + (x2 - x1) * m2) / c,
    );
    if !center.is_finite() {
        return None;
    }

    Some(Circle::new(center, center.distance(p1)))
}

/// Returns the circle centered on the rectangle `[0, width] x [0, height]` that contains all
/// of its corners with a margin of [BOUNDING_CIRCLE_MARGIN].
pub fn rectangle_bounding_circle(width: f64, height: f64) -> Circle {
    let start = Point2::new(0.0, 0.0);
    let end = Point2::new(width, height);
    let center = Point2::new((end.x - start.x).abs() / 2.0, (end.y - start.y).abs() / 2.0);
    Circle::new(center, center.distance(start) + BOUNDING_CIRCLE_MARGIN)
}

/// Returns the vertices of the equilateral triangle circumscribing a circle.
///
/// The circle's center is the triangle's centroid, each side has a length of `2 * sqrt(3) * r`.
pub fn equilateral_triangle_around(circle: &Circle) -> [Point2<f64>; 3] {
    let center = circle.center();
    let r = circle.radius();
    let sqrt_3 = 3.0f64.sqrt();
    [
        Point2::new(center.x - sqrt_3 * r, center.y - r),
        Point2::new(center.x + sqrt_3 * r, center.y - r),
        Point2::new(center.x, center.y + 2.0 * r),
    ]
}

pub fn centroid<S: MeshNum>(positions: [Point2<S>; 3]) -> Point2<S> {
    let [v0, v1, v2] = positions;
    let three: S = 3.0f32.into();
    v0.add(v1).add(v2).mul(three.recip())
}

pub fn triangle_area<S: MeshNum>(positions: [Point2<S>; 3]) -> S {
    let [v0, v1, v2] = positions;
    let b = v1.sub(v0);
    let c = v2.sub(v0);
    let half: S = 0.5f32.into();
    (b.x * c.y - b.y * c.x).abs() * half
}

/// Returns `true` if `point` lies inside the triangle or on its boundary.
pub fn contained_in_triangle<S: MeshNum>(positions: [Point2<S>; 3], point: Point2<S>) -> bool {
    let [v0, v1, v2] = positions;
    let sides = [
        orientation(v0, v1, point),
        orientation(v1, v2, point),
        orientation(v2, v0, point),
    ];
    let has_left = sides.iter().any(|side| *side > 0.0);
    let has_right = sides.iter().any(|side| *side < 0.0);
    !(has_left && has_right)
}

/// Returns the cosine of the angle between two vectors, or `None` if one of them has length zero.
pub fn cosine_similarity<S: MeshNum>(a: Point2<S>, b: Point2<S>) -> Option<S> {
    let lengths = (a.length2() * b.length2()).sqrt();
    if lengths == S::zero() || !lengths.is_finite() {
        None
    } else {
        Some(a.dot(b) / lengths)
    }
}
