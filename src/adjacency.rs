use smallvec::SmallVec;

use crate::{FixedTriangleHandle, Triangle};

/// Neighbor list of a single triangle. Triangles of a proper mesh have at most three neighbors.
pub type NeighborList = SmallVec<[FixedTriangleHandle; 3]>;

/// Maps every triangle of a mesh to the triangles it shares an edge with.
///
/// The graph is computed once from a fixed list of triangles and is read only afterwards.
/// Changing the triangle list requires building a new graph; only changing triangle
/// colors does not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyGraph {
    neighbors: Vec<NeighborList>,
}

impl AdjacencyGraph {
    /// Builds the graph by testing every pair of triangles for a common side.
    ///
    /// This takes `O(n²)` time for `n` triangles. Neighbors are listed in ascending handle order.
    pub fn build(triangles: &[Triangle]) -> Self {
        let mut neighbors = vec![NeighborList::new(); triangles.len()];
        for (i, triangle) in triangles.iter().enumerate() {
            for (j, other) in triangles.iter().enumerate().skip(i + 1) {
                if triangle.has_common_sides(other) {
                    neighbors[i].push(FixedTriangleHandle::new(j));
                    neighbors[j].push(FixedTriangleHandle::new(i));
                }
            }
        }

        let graph = Self { neighbors };
        tracing::debug!(
            triangles = graph.num_triangles(),
            shared_edges = graph.num_shared_edges(),
            "built adjacency graph"
        );
        graph
    }

    /// Returns the triangles sharing an edge with `triangle`.
    ///
    /// Unknown handles have no neighbors.
    pub fn get_adjacent(&self, triangle: FixedTriangleHandle) -> &[FixedTriangleHandle] {
        self.neighbors
            .get(triangle.index())
            .map(|list| list.as_slice())
            .unwrap_or(&[])
    }

    pub fn are_adjacent(&self, a: FixedTriangleHandle, b: FixedTriangleHandle) -> bool {
        self.get_adjacent(a).contains(&b)
    }

    pub fn num_triangles(&self) -> usize {
        self.neighbors.len()
    }

    /// Returns the number of edges shared by two triangles.
    pub fn num_shared_edges(&self) -> usize {
        self.neighbors.iter().map(|list| list.len()).sum::<usize>() / 2
    }

    /// Iterates over all triangles together with their neighbors.
    pub fn iter(&self) -> impl Iterator<Item = (FixedTriangleHandle, &[FixedTriangleHandle])> {
        self.neighbors
            .iter()
            .enumerate()
            .map(|(index, list)| (FixedTriangleHandle::new(index), list.as_slice()))
    }
}
