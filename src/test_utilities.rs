use rand::SeedableRng;

use crate::{triangulate, Point2, PointSampler, Triangle, TriangleMesh};

pub const SEED: &[u8; 32] = b"wPYxAkIiHcEmSBAxQFoXFrpYToCe1B71";
pub const SEED2: &[u8; 32] = b"14LzG37Y9EHTcmLW8vBDqWwtYsCeVVyF";

pub fn random_points_in_rectangle(
    size: usize,
    width: f64,
    height: f64,
    seed: &[u8; 32],
) -> Vec<Point2<f64>> {
    let mut rng = rand::rngs::StdRng::from_seed(*seed);
    let sampler = PointSampler {
        min_distance: 20.0,
        ..Default::default()
    };
    sampler
        .sample(&mut rng, width, height, size)
        .expect("test point density is feasible")
}

pub fn random_mesh(size: usize, seed: &[u8; 32]) -> TriangleMesh {
    let points = random_points_in_rectangle(size, 600.0, 300.0, seed);
    triangulate(600.0, 300.0, &points)
}

fn triangle(points: [(f64, f64); 3]) -> Triangle {
    let [a, b, c] = points;
    Triangle::new(a.into(), b.into(), c.into()).unwrap()
}

/// Two triangles sharing the edge from (10, 0) to (0, 10).
pub fn two_triangle_mesh() -> TriangleMesh {
    TriangleMesh::new(vec![
        triangle([(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)]),
        triangle([(10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]),
    ])
}

/// Four triangles around the origin, each sharing an edge with its two neighbors.
pub fn fan_mesh() -> TriangleMesh {
    TriangleMesh::new(vec![
        triangle([(0.0, 0.0), (10.0, -10.0), (10.0, 10.0)]),
        triangle([(0.0, 0.0), (10.0, 10.0), (-10.0, 10.0)]),
        triangle([(0.0, 0.0), (-10.0, 10.0), (-10.0, -10.0)]),
        triangle([(0.0, 0.0), (-10.0, -10.0), (10.0, -10.0)]),
    ])
}

/// Five triangles around the origin. Triangle `i` shares an edge with `i - 1` and `i + 1`
/// (mod 5), so the adjacency graph is an odd cycle.
pub fn five_fan_mesh() -> TriangleMesh {
    let corner = |i: usize| {
        let angle = std::f64::consts::TAU * (i % 5) as f64 / 5.0;
        (10.0 * angle.cos(), 10.0 * angle.sin())
    };
    let triangles = (0..5)
        .map(|i| triangle([(0.0, 0.0), corner(i), corner(i + 1)]))
        .collect();
    TriangleMesh::new(triangles)
}

/// A strip of `count` triangles where triangle `i` shares an edge with `i - 1` and `i + 1`.
pub fn strip_mesh(count: usize) -> TriangleMesh {
    let bottom = |i: usize| (10.0 * i as f64, 0.0);
    let top = |i: usize| (10.0 * i as f64 + 5.0, 10.0);
    let triangles = (0..count)
        .map(|i| {
            let k = i / 2;
            if i % 2 == 0 {
                triangle([bottom(k), bottom(k + 1), top(k)])
            } else {
                triangle([bottom(k + 1), top(k + 1), top(k)])
            }
        })
        .collect();
    TriangleMesh::new(triangles)
}

/// Returns the number of points on the convex hull (monotone chain).
pub fn convex_hull_size(points: &[Point2<f64>]) -> usize {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));

    let cross = |o: Point2<f64>, a: Point2<f64>, b: Point2<f64>| {
        (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
    };

    let mut hull: Vec<Point2<f64>> = Vec::new();
    for pass in 0..2 {
        let start = hull.len();
        let iter: Box<dyn Iterator<Item = &Point2<f64>>> = if pass == 0 {
            Box::new(sorted.iter())
        } else {
            Box::new(sorted.iter().rev())
        };
        for p in iter {
            while hull.len() >= start + 2
                && cross(hull[hull.len() - 2], hull[hull.len() - 1], *p) <= 0.0
            {
                hull.pop();
            }
            hull.push(*p);
        }
        hull.pop();
    }
    hull.len()
}
