use rand::RngCore;

use super::{random_color, Animator};
use crate::{Color, TriangleMesh};

/// Fills every triangle with a random palette color once and never changes it afterwards.
#[derive(Debug, Clone)]
pub struct DisplayAnimator {
    palette: Vec<Color>,
}

impl Default for DisplayAnimator {
    fn default() -> Self {
        Self::new(Color::default_palette().to_vec())
    }
}

impl DisplayAnimator {
    pub fn new(palette: Vec<Color>) -> Self {
        Self { palette }
    }
}

impl Animator for DisplayAnimator {
    fn initialize(&mut self, mesh: &mut TriangleMesh, rng: &mut dyn RngCore) {
        for handle in mesh.handles() {
            mesh.set_color(handle, random_color(&self.palette, rng));
        }
    }

    fn update(&mut self, _mesh: &mut TriangleMesh, _rng: &mut dyn RngCore) {}
}

#[cfg(test)]
mod test {
    use super::DisplayAnimator;
    use crate::animation::Animator;
    use crate::test_utilities::{fan_mesh, SEED};
    use crate::Color;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_fills_every_triangle() {
        let mut mesh = fan_mesh();
        let palette = vec![Color::from_rgb(1, 2, 3), Color::from_rgb(4, 5, 6)];
        let mut animator = DisplayAnimator::new(palette.clone());
        let mut rng = StdRng::from_seed(*SEED);

        animator.initialize(&mut mesh, &mut rng);
        let colors: Vec<_> = mesh.triangles().iter().map(|t| t.color()).collect();
        assert!(colors.iter().all(|color| palette.contains(color)));

        animator.update(&mut mesh, &mut rng);
        let after: Vec<_> = mesh.triangles().iter().map(|t| t.color()).collect();
        assert_eq!(colors, after);
    }

    #[test]
    fn test_empty_palette_uses_black() {
        let mut mesh = fan_mesh();
        let mut rng = StdRng::from_seed(*SEED);
        DisplayAnimator::new(Vec::new()).initialize(&mut mesh, &mut rng);
        assert!(mesh.triangles().iter().all(|t| t.color() == Color::BLACK));
    }
}
