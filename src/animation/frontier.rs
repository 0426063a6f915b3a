use hashbrown::{HashMap, HashSet};
use rand::RngCore;

use super::{random_color, Animator};
use crate::math::cosine_similarity;
use crate::{Color, FixedTriangleHandle, Point2, TriangleMesh, UNCOLORED};

/// Direction used to pick the first triangle of a [FrontierAnimator].
///
/// The chosen triangle is the one whose centroid, seen from the mesh centroid, points most
/// closely into this direction.
pub const SEED_DIRECTION: Point2<f64> = Point2::new(1.0, 1.0);

/// Returns the triangle whose centroid direction relative to the mesh centroid has the
/// largest cosine similarity with `direction`.
///
/// Ties resolve to the lowest handle. Triangles whose centroid coincides with the mesh
/// centroid are only chosen if no other triangle has a direction at all.
pub fn seed_triangle(mesh: &TriangleMesh, direction: Point2<f64>) -> Option<FixedTriangleHandle> {
    let center = mesh.centroid()?;
    let mut best: Option<(FixedTriangleHandle, f64)> = None;
    for (index, triangle) in mesh.triangles().iter().enumerate() {
        let similarity =
            cosine_similarity(triangle.centroid().sub(center), direction).unwrap_or(f64::MIN);
        match best {
            Some((_, best_similarity)) if similarity <= best_similarity => {}
            _ => best = Some((FixedTriangleHandle::new(index), similarity)),
        }
    }
    best.map(|(handle, _)| handle)
}

#[derive(Debug, Clone)]
struct FrontierEntry {
    triangle: FixedTriangleHandle,
    predecessors: HashSet<FixedTriangleHandle>,
}

/// Spreads a color from a seed triangle outwards over the adjacency graph.
///
/// The animator keeps a frontier: the triangles colored in the previous tick together with
/// the triangles they were reached from. Each tick every frontier triangle toggles the color
/// of its neighbors (except its predecessors). Afterwards all triangles of that frontier are
/// reset to [UNCOLORED] and the toggled neighbors that are still colored form the next
/// frontier. The animation is over once the
/// frontier runs empty.
#[derive(Debug, Clone)]
pub struct FrontierAnimator {
    palette: Vec<Color>,
    seed: Option<(FixedTriangleHandle, Option<Color>)>,
    frontier: Vec<FrontierEntry>,
    ticks: usize,
}

impl Default for FrontierAnimator {
    fn default() -> Self {
        Self::new(Color::default_palette().to_vec())
    }
}

impl FrontierAnimator {
    pub fn new(palette: Vec<Color>) -> Self {
        Self {
            palette,
            seed: None,
            frontier: Vec::new(),
            ticks: 0,
        }
    }

    /// Starts the animation at `triangle` instead of the triangle picked by [seed_triangle].
    ///
    /// If `color` is `None`, a random palette color is used.
    pub fn with_seed(mut self, triangle: FixedTriangleHandle, color: Option<Color>) -> Self {
        self.seed = Some((triangle, color));
        self
    }

    /// Returns the triangles of the current frontier in the order they were reached.
    pub fn frontier(&self) -> impl Iterator<Item = FixedTriangleHandle> + '_ {
        self.frontier.iter().map(|entry| entry.triangle)
    }

    /// Returns the triangles the given frontier triangle was reached from.
    pub fn predecessors(&self, triangle: FixedTriangleHandle) -> Option<&HashSet<FixedTriangleHandle>> {
        self.frontier
            .iter()
            .find(|entry| entry.triangle == triangle)
            .map(|entry| &entry.predecessors)
    }

    pub fn is_exhausted(&self) -> bool {
        self.frontier.is_empty()
    }

    /// Number of updates since the last initialization.
    pub fn ticks(&self) -> usize {
        self.ticks
    }
}

impl Animator for FrontierAnimator {
    fn initialize(&mut self, mesh: &mut TriangleMesh, rng: &mut dyn RngCore) {
        self.frontier.clear();
        self.ticks = 0;

        let (triangle, color) = match self.seed {
            Some((triangle, color)) if triangle.index() < mesh.len() => (triangle, color),
            Some((triangle, _)) => {
                tracing::warn!(?triangle, "seed triangle is not part of the mesh");
                return;
            }
            None => match seed_triangle(mesh, SEED_DIRECTION) {
                Some(triangle) => (triangle, None),
                None => return,
            },
        };

        let color = color.unwrap_or_else(|| random_color(&self.palette, rng));
        mesh.set_color(triangle, color);
        self.frontier.push(FrontierEntry {
            triangle,
            predecessors: HashSet::new(),
        });
        tracing::debug!(?triangle, %color, "seeded frontier");
    }

    fn update(&mut self, mesh: &mut TriangleMesh, _rng: &mut dyn RngCore) {
        if self.frontier.is_empty() {
            return;
        }

        let mut next: Vec<FrontierEntry> = Vec::new();
        let mut positions: HashMap<FixedTriangleHandle, usize> = HashMap::new();
        let current_frontier = std::mem::take(&mut self.frontier);

        for entry in &current_frontier {
            let current = entry.triangle;
            let color = mesh.color(current);
            let neighbors: Vec<_> = mesh
                .get_adjacent(current)
                .iter()
                .copied()
                .filter(|neighbor| !entry.predecessors.contains(neighbor))
                .collect();

            for neighbor in neighbors {
                let toggled = if mesh.color(neighbor) == color {
                    UNCOLORED
                } else {
                    color
                };
                mesh.set_color(neighbor, toggled);

                let position = *positions.entry(neighbor).or_insert_with(|| {
                    next.push(FrontierEntry {
                        triangle: neighbor,
                        predecessors: HashSet::new(),
                    });
                    next.len() - 1
                });
                next[position].predecessors.insert(current);
            }
        }

        // Frontier triangles are reset only after every entry toggled its neighbors.
        for entry in &current_frontier {
            mesh.set_color(entry.triangle, UNCOLORED);
        }

        next.retain(|entry| mesh.color(entry.triangle).is_colored());
        self.frontier = next;
        self.ticks += 1;

        tracing::debug!(
            tick = self.ticks,
            frontier = self.frontier.len(),
            "advanced frontier"
        );
    }
}
