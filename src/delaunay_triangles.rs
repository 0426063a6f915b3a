use hashbrown::hash_map::Entry;
use hashbrown::HashMap;

use crate::{math, Circle, DrawSurface, Point2, Triangle, TriangleMesh, POINT_TOLERANCE};

/// Candidate triangles produced while inserting a single point.
///
/// A candidate that is produced twice lies on an edge shared by two removed triangles and
/// must not be part of the triangulation. Candidates keep the order in which they were
/// first produced.
#[derive(Debug, Default)]
struct RedundancyMap {
    positions: HashMap<Triangle, usize>,
    candidates: Vec<(Triangle, bool)>,
}

impl RedundancyMap {
    fn add(&mut self, triangle: Triangle) {
        match self.positions.entry(triangle) {
            Entry::Occupied(entry) => {
                self.candidates[*entry.get()].1 = false;
            }
            Entry::Vacant(entry) => {
                self.candidates.push((entry.key().clone(), true));
                entry.insert(self.candidates.len() - 1);
            }
        }
    }

    fn into_unique(self) -> impl Iterator<Item = Triangle> {
        self.candidates
            .into_iter()
            .filter_map(|(triangle, keep)| keep.then_some(triangle))
    }
}

/// Returns `true` if `point` lies within or on the circumcircle.
///
/// Degenerate triangles have no circumcircle and are never violated.
fn is_violated(circumcircle: Option<Circle>, point: Point2<f64>) -> bool {
    circumcircle.map_or(false, |circle| circle.contains(point))
}

/// Computes Delaunay triangulations of points within the rectangle `[0, width] x [0, height]`.
///
/// The triangulation is built incrementally (Bowyer–Watson): starting from a single triangle
/// enclosing the whole rectangle, points are inserted one after another. Every triangle whose
/// circumcircle contains the new point is removed and the resulting hole is filled with
/// triangles connecting the point to the hole's boundary. Finally, all triangles touching the
/// enclosing triangle are discarded.
///
/// # Example
/// ```
/// use shape_and_color::{DelaunayTriangles, Point2};
///
/// let points = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(100.0, 0.0),
///     Point2::new(0.0, 100.0),
///     Point2::new(100.0, 100.0),
///     Point2::new(50.0, 50.0),
/// ];
///
/// let mut delaunay = DelaunayTriangles::new(100.0, 100.0);
/// let triangles = delaunay.triangulate(&points);
/// assert_eq!(triangles.len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct DelaunayTriangles {
    width: f64,
    height: f64,
    // Working set, circumcircles[i] belongs to triangles[i].
    triangles: Vec<Triangle>,
    circumcircles: Vec<Option<Circle>>,
    // Inserted points, bucketed by their rounded coordinates.
    inserted: HashMap<(i64, i64), Vec<Point2<f64>>>,
    skipped_points: usize,
}

impl DelaunayTriangles {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            triangles: Vec::new(),
            circumcircles: Vec::new(),
            inserted: HashMap::new(),
            skipped_points: 0,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Returns the equilateral triangle enclosing the whole rectangle.
    pub fn huge_triangle(&self) -> Triangle {
        let circle = math::rectangle_bounding_circle(self.width, self.height);
        let [p1, p2, p3] = math::equilateral_triangle_around(&circle);
        Triangle::new(p1, p2, p3).expect("bounding triangle vertices are distinct")
    }

    /// Triangulates the given points, replacing any previous result.
    ///
    /// Points are inserted in the given order. Points with non-finite coordinates and points
    /// equal to an already inserted point are skipped.
    pub fn triangulate(&mut self, points: &[Point2<f64>]) -> &[Triangle] {
        let huge_triangle = self.huge_triangle();
        self.triangles.clear();
        self.circumcircles.clear();
        self.inserted.clear();
        self.skipped_points = 0;
        self.push(huge_triangle.clone());

        for point in points {
            self.insert(*point);
        }

        let (triangles, circumcircles): (Vec<_>, Vec<_>) = std::mem::take(&mut self.triangles)
            .into_iter()
            .zip(std::mem::take(&mut self.circumcircles))
            .filter(|(triangle, _)| !huge_triangle.has_common_points(triangle))
            .unzip();
        self.triangles = triangles;
        self.circumcircles = circumcircles;

        tracing::debug!(
            points = points.len(),
            skipped = self.skipped_points,
            triangles = self.triangles.len(),
            "triangulation finished"
        );
        &self.triangles
    }

    fn push(&mut self, triangle: Triangle) {
        let circumcircle = triangle.circumcircle();
        if circumcircle.is_none() {
            tracing::trace!(points = ?triangle.points(), "degenerate triangle is never violated");
        }
        self.triangles.push(triangle);
        self.circumcircles.push(circumcircle);
    }

    /// Remembers `point` and returns `false` if an equal point was inserted before.
    ///
    /// Points that are equal within [POINT_TOLERANCE] can round to neighboring cells, so all
    /// cells covered by the tolerance box around `point` are searched.
    fn record(&mut self, point: Point2<f64>) -> bool {
        let (min_x, min_y) =
            Point2::new(point.x - POINT_TOLERANCE, point.y - POINT_TOLERANCE).rounded();
        let (max_x, max_y) =
            Point2::new(point.x + POINT_TOLERANCE, point.y + POINT_TOLERANCE).rounded();
        for x in min_x..=max_x {
            for y in min_y..=max_y {
                let cell = self.inserted.get(&(x, y));
                if cell.map_or(false, |points| points.contains(&point)) {
                    return false;
                }
            }
        }
        self.inserted.entry(point.rounded()).or_default().push(point);
        true
    }

    fn insert(&mut self, point: Point2<f64>) {
        if !point.is_finite() {
            tracing::warn!(?point, "skipping point with non-finite coordinates");
            self.skipped_points += 1;
            return;
        }
        if !self.record(point) {
            tracing::warn!(?point, "skipping duplicate point");
            self.skipped_points += 1;
            return;
        }

        let mut redundancies = RedundancyMap::default();
        let previous_triangles = std::mem::take(&mut self.triangles);
        let previous_circumcircles = std::mem::take(&mut self.circumcircles);
        for (triangle, circumcircle) in previous_triangles.into_iter().zip(previous_circumcircles) {
            if !is_violated(circumcircle, point) {
                self.triangles.push(triangle);
                self.circumcircles.push(circumcircle);
                continue;
            }

            let [v1, v2, v3] = triangle.points();
            for [a, b] in [[v1, v2], [v2, v3], [v3, v1]] {
                match Triangle::new(point, a, b) {
                    Ok(candidate) => redundancies.add(candidate),
                    Err(error) => tracing::trace!(?point, %error, "dropping candidate"),
                }
            }
        }

        for triangle in redundancies.into_unique() {
            self.push(triangle);
        }
    }

    /// Returns the triangles of the last triangulation.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Returns the circumcircles of all non degenerate triangles of the last triangulation.
    pub fn circumcircles(&self) -> impl Iterator<Item = Circle> + '_ {
        self.circumcircles.iter().flatten().copied()
    }

    /// Returns the number of points skipped by the last triangulation.
    pub fn skipped_points(&self) -> usize {
        self.skipped_points
    }

    /// Consumes the engine and returns the finished mesh.
    pub fn into_mesh(self) -> TriangleMesh {
        TriangleMesh::new(self.triangles)
    }

    /// Draws all triangles of the last triangulation. Used for debugging.
    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        for triangle in &self.triangles {
            triangle.draw(surface);
        }
    }

    /// Draws the circumcircles of all triangles of the last triangulation. Used for debugging.
    pub fn draw_circumcircles(&self, surface: &mut dyn DrawSurface) {
        for circle in self.circumcircles() {
            circle.draw(surface);
        }
    }
}

/// Triangulates `points` within the rectangle `[0, width] x [0, height]`.
pub fn triangulate(width: f64, height: f64, points: &[Point2<f64>]) -> TriangleMesh {
    let mut delaunay = DelaunayTriangles::new(width, height);
    delaunay.triangulate(points);
    delaunay.into_mesh()
}
