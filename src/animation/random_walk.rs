use rand::seq::{index, SliceRandom};
use rand::RngCore;
use smallvec::SmallVec;

use super::{random_color, Animator};
use crate::{Color, FixedTriangleHandle, TriangleMesh, UNCOLORED};

/// A colored marker walking over the mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub current: FixedTriangleHandle,
    pub previous: Option<FixedTriangleHandle>,
    pub color: Color,
}

/// Moves a fixed number of colored tokens randomly over the adjacency graph.
///
/// Each tick every token steps to a uniformly chosen uncolored neighbor that is not the
/// triangle it just came from. The token's color moves along and the vacated triangle is
/// reset to [UNCOLORED]. A token without any such neighbor is dropped and its last triangle
/// keeps its color.
#[derive(Debug, Clone)]
pub struct RandomWalkAnimator {
    palette: Vec<Color>,
    token_count: usize,
    tokens: Vec<Token>,
}

impl RandomWalkAnimator {
    pub fn new(token_count: usize) -> Self {
        Self::with_palette(token_count, Color::default_palette().to_vec())
    }

    pub fn with_palette(token_count: usize, palette: Vec<Color>) -> Self {
        Self {
            palette,
            token_count,
            tokens: Vec::new(),
        }
    }

    /// The number of tokens placed by [Animator::initialize].
    pub fn token_count(&self) -> usize {
        self.token_count
    }

    /// Returns the tokens that are still walking.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Places tokens on the given triangles instead of random ones.
    ///
    /// Each token takes a random palette color. Previously placed tokens are removed.
    pub fn place_tokens(
        &mut self,
        mesh: &mut TriangleMesh,
        triangles: &[FixedTriangleHandle],
        rng: &mut dyn RngCore,
    ) {
        self.tokens.clear();
        for &current in triangles {
            let color = random_color(&self.palette, rng);
            mesh.set_color(current, color);
            self.tokens.push(Token {
                current,
                previous: None,
                color,
            });
        }
    }
}

impl Animator for RandomWalkAnimator {
    fn initialize(&mut self, mesh: &mut TriangleMesh, rng: &mut dyn RngCore) {
        let count = self.token_count.min(mesh.len());
        if count < self.token_count {
            tracing::warn!(
                requested = self.token_count,
                triangles = mesh.len(),
                "fewer triangles than tokens"
            );
        }

        let triangles: Vec<_> = index::sample(rng, mesh.len(), count)
            .into_iter()
            .map(FixedTriangleHandle::new)
            .collect();
        self.place_tokens(mesh, &triangles, rng);
    }

    fn update(&mut self, mesh: &mut TriangleMesh, rng: &mut dyn RngCore) {
        let before = self.tokens.len();
        let mut walking = Vec::with_capacity(before);

        for mut token in std::mem::take(&mut self.tokens) {
            let candidates: SmallVec<[FixedTriangleHandle; 3]> = mesh
                .get_adjacent(token.current)
                .iter()
                .copied()
                .filter(|&neighbor| {
                    Some(neighbor) != token.previous && !mesh.color(neighbor).is_colored()
                })
                .collect();

            let Some(&next) = candidates.choose(rng) else {
                tracing::trace!(triangle = ?token.current, "token got stuck");
                continue;
            };

            mesh.set_color(token.current, UNCOLORED);
            mesh.set_color(next, token.color);
            token.previous = Some(token.current);
            token.current = next;
            walking.push(token);
        }

        self.tokens = walking;
        tracing::debug!(
            dropped = before - self.tokens.len(),
            tokens = self.tokens.len(),
            "moved tokens"
        );
    }
}
