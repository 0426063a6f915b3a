//! Color animations over the triangles of a [TriangleMesh].
//!
//! Every animation is a walk over the adjacency graph of the mesh. An animation only changes
//! triangle colors, never the triangles themselves.

mod display;
mod frontier;
mod random_walk;

pub use display::DisplayAnimator;
pub use frontier::{seed_triangle, FrontierAnimator, SEED_DIRECTION};
pub use random_walk::{RandomWalkAnimator, Token};

use rand::seq::SliceRandom;
use rand::RngCore;

use crate::{Color, TriangleMesh};

/// A color animation.
///
/// `initialize` is called once before the first frame, `update` once per tick. Both draw
/// their randomness from the given generator so that a seeded generator replays the same
/// animation.
pub trait Animator {
    fn initialize(&mut self, mesh: &mut TriangleMesh, rng: &mut dyn RngCore);

    fn update(&mut self, mesh: &mut TriangleMesh, rng: &mut dyn RngCore);
}

/// The available animations.
#[derive(Debug, Clone)]
pub enum AnimatorKind {
    Display(DisplayAnimator),
    Frontier(FrontierAnimator),
    RandomWalk(RandomWalkAnimator),
}

impl Animator for AnimatorKind {
    fn initialize(&mut self, mesh: &mut TriangleMesh, rng: &mut dyn RngCore) {
        match self {
            AnimatorKind::Display(animator) => animator.initialize(mesh, rng),
            AnimatorKind::Frontier(animator) => animator.initialize(mesh, rng),
            AnimatorKind::RandomWalk(animator) => animator.initialize(mesh, rng),
        }
    }

    fn update(&mut self, mesh: &mut TriangleMesh, rng: &mut dyn RngCore) {
        match self {
            AnimatorKind::Display(animator) => animator.update(mesh, rng),
            AnimatorKind::Frontier(animator) => animator.update(mesh, rng),
            AnimatorKind::RandomWalk(animator) => animator.update(mesh, rng),
        }
    }
}

impl From<DisplayAnimator> for AnimatorKind {
    fn from(animator: DisplayAnimator) -> Self {
        AnimatorKind::Display(animator)
    }
}

impl From<FrontierAnimator> for AnimatorKind {
    fn from(animator: FrontierAnimator) -> Self {
        AnimatorKind::Frontier(animator)
    }
}

impl From<RandomWalkAnimator> for AnimatorKind {
    fn from(animator: RandomWalkAnimator) -> Self {
        AnimatorKind::RandomWalk(animator)
    }
}

/// Picks a random palette color. An empty palette falls back to black.
fn random_color(palette: &[Color], rng: &mut dyn RngCore) -> Color {
    palette.choose(rng).copied().unwrap_or(Color::BLACK)
}
