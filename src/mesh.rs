use std::cell::OnceCell;

use crate::{AdjacencyGraph, Color, DrawSurface, Point2, Triangle};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A stable reference to a triangle of a [TriangleMesh].
///
/// Handles are plain indices into the mesh's triangle list. They stay valid as long as the
/// mesh they were created for exists, since a mesh never adds or removes triangles.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct FixedTriangleHandle {
    index: u32,
}

impl FixedTriangleHandle {
    pub fn new(index: usize) -> Self {
        Self {
            index: index
                .try_into()
                .expect("Index too big - at most 2^32 triangles supported"),
        }
    }

    pub fn index(&self) -> usize {
        self.index as usize
    }
}

impl std::fmt::Debug for FixedTriangleHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedTriangleHandle")
            .field("index", &self.index)
            .finish()
    }
}

/// A finished triangulation.
///
/// The mesh owns its triangles in a flat list and hands out [FixedTriangleHandle]s to refer
/// to them. The set of triangles and their geometry cannot change anymore, only their colors.
/// This is what allows the adjacency graph to be computed lazily once and reused for the
/// lifetime of the mesh.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    triangles: Vec<Triangle>,
    adjacency: OnceCell<AdjacencyGraph>,
}

impl TriangleMesh {
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self {
            triangles,
            adjacency: OnceCell::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn triangle(&self, handle: FixedTriangleHandle) -> &Triangle {
        &self.triangles[handle.index()]
    }

    /// Iterates over the handles of all triangles in ascending order.
    pub fn handles(&self) -> impl ExactSizeIterator<Item = FixedTriangleHandle> {
        (0..self.triangles.len()).map(FixedTriangleHandle::new)
    }

    pub fn color(&self, handle: FixedTriangleHandle) -> Color {
        self.triangle(handle).color()
    }

    pub fn set_color(&mut self, handle: FixedTriangleHandle, color: Color) {
        self.triangles[handle.index()].set_color(color);
    }

    /// Resets every triangle to the uncolored state.
    pub fn clear_colors(&mut self) {
        for triangle in &mut self.triangles {
            triangle.set_color(Color::default());
        }
    }

    /// Returns the adjacency graph, building it on first access.
    pub fn adjacency(&self) -> &AdjacencyGraph {
        self.adjacency
            .get_or_init(|| AdjacencyGraph::build(&self.triangles))
    }

    /// Returns `true` if the adjacency graph has already been built.
    pub fn has_adjacency(&self) -> bool {
        self.adjacency.get().is_some()
    }

    /// Returns the triangles sharing an edge with `handle`.
    pub fn get_adjacent(&self, handle: FixedTriangleHandle) -> &[FixedTriangleHandle] {
        self.adjacency().get_adjacent(handle)
    }

    /// Returns a triangle containing the given point, if any.
    ///
    /// Points on an edge shared by two triangles resolve to the triangle with the lower handle.
    pub fn locate(&self, point: Point2<f64>) -> Option<FixedTriangleHandle> {
        self.triangles
            .iter()
            .position(|triangle| triangle.contains_point(point))
            .map(FixedTriangleHandle::new)
    }

    /// Returns the mean of all triangle centroids, or `None` for an empty mesh.
    pub fn centroid(&self) -> Option<Point2<f64>> {
        if self.triangles.is_empty() {
            return None;
        }
        let sum = self
            .triangles
            .iter()
            .map(Triangle::centroid)
            .fold(Point2::new(0.0, 0.0), |acc, c| acc.add(c));
        Some(sum.mul(1.0 / self.triangles.len() as f64))
    }

    pub fn total_area(&self) -> f64 {
        self.triangles.iter().map(Triangle::area).sum()
    }

    /// Draws all triangles with their current colors.
    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        for triangle in &self.triangles {
            triangle.draw(surface);
        }
    }
}

impl From<Vec<Triangle>> for TriangleMesh {
    fn from(triangles: Vec<Triangle>) -> Self {
        Self::new(triangles)
    }
}
