//! Puts point sampling, triangulation and animation together.

use std::error::Error;
use std::fmt::Display;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::animation::{
    Animator, AnimatorKind, DisplayAnimator, FrontierAnimator, RandomWalkAnimator,
};
use crate::{
    Color, DelaunayTriangles, DrawSurface, PointSampler, SamplingError, TickScheduler,
    TriangleMesh, DEFAULT_PALETTE_BEGIN, DEFAULT_PALETTE_DELTA,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Selects the animation run by a [Moderator].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub enum Mode {
    /// Colors every triangle once.
    #[default]
    Display,
    /// Spreads a color outwards from a single triangle.
    Increase,
    /// Moves the given number of tokens over the mesh.
    Move { tokens: usize },
}

/// Everything needed to set up a [Moderator].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde", default)
)]
pub struct ModeratorConfig {
    pub width: u32,
    pub height: u32,
    pub mode: Mode,
    /// Seed of the random number generator used for sampling and animation.
    pub seed: u64,
    /// Delay between two animation ticks.
    pub update_interval_ms: u64,
    /// One point is sampled per `density_divisor` square units of the drawing area.
    pub density_divisor: u32,
    /// Minimum distance between two sampled points.
    pub min_distance: f64,
    /// Distance between sampled points and the border of the drawing area.
    pub margin: f64,
    pub palette_begin: (u8, u8, u8),
    pub palette_delta: u8,
    /// Consecutive rejected point candidates after which sampling fails.
    pub max_attempts: usize,
}

impl Default for ModeratorConfig {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 800,
            mode: Mode::default(),
            seed: 0,
            update_interval_ms: 500,
            density_divisor: 2048,
            min_distance: 30.0,
            margin: 10.0,
            palette_begin: DEFAULT_PALETTE_BEGIN,
            palette_delta: DEFAULT_PALETTE_DELTA,
            max_attempts: 10_000,
        }
    }
}

impl ModeratorConfig {
    /// The number of points sampled for the drawing area.
    pub fn point_count(&self) -> usize {
        let area = u64::from(self.width) * u64::from(self.height);
        usize::try_from(area / u64::from(self.density_divisor.max(1))).unwrap_or(usize::MAX)
    }

    pub fn sampler(&self) -> PointSampler {
        PointSampler {
            margin: self.margin,
            min_distance: self.min_distance,
            max_attempts: self.max_attempts,
        }
    }

    pub fn palette(&self) -> Vec<Color> {
        if (self.palette_begin, self.palette_delta) == (DEFAULT_PALETTE_BEGIN, DEFAULT_PALETTE_DELTA)
        {
            Color::default_palette().to_vec()
        } else {
            Color::palette(self.palette_begin, self.palette_delta)
        }
    }

    /// Creates the animator selected by [ModeratorConfig::mode].
    pub fn animator(&self) -> AnimatorKind {
        let palette = self.palette();
        match self.mode {
            Mode::Display => DisplayAnimator::new(palette).into(),
            Mode::Increase => FrontierAnimator::new(palette).into(),
            Mode::Move { tokens } => RandomWalkAnimator::with_palette(tokens, palette).into(),
        }
    }
}

/// The error type returned by [Moderator::new].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModeratorError {
    /// The drawing area has no extent.
    InvalidSize { width: u32, height: u32 },
    Sampling(SamplingError),
}

impl Display for ModeratorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModeratorError::InvalidSize { width, height } => {
                write!(f, "invalid drawing area size {}x{}", width, height)
            }
            ModeratorError::Sampling(error) => write!(f, "failed to sample points: {}", error),
        }
    }
}

impl Error for ModeratorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ModeratorError::Sampling(error) => Some(error),
            ModeratorError::InvalidSize { .. } => None,
        }
    }
}

impl From<SamplingError> for ModeratorError {
    fn from(error: SamplingError) -> Self {
        ModeratorError::Sampling(error)
    }
}

/// Owns a mesh and an animation and drives them with a [TickScheduler].
#[derive(Debug, Clone)]
pub struct Moderator {
    config: ModeratorConfig,
    mesh: TriangleMesh,
    animator: AnimatorKind,
    rng: StdRng,
    ticks: u64,
}

impl Moderator {
    /// Samples points, triangulates them and builds the adjacency graph.
    pub fn new(config: ModeratorConfig) -> Result<Self, ModeratorError> {
        if config.width == 0 || config.height == 0 {
            return Err(ModeratorError::InvalidSize {
                width: config.width,
                height: config.height,
            });
        }

        let mut rng = StdRng::seed_from_u64(config.seed);
        let (width, height) = (f64::from(config.width), f64::from(config.height));
        let points = config
            .sampler()
            .sample(&mut rng, width, height, config.point_count())?;

        let mut triangulation = DelaunayTriangles::new(width, height);
        triangulation.triangulate(&points);
        let mesh = triangulation.into_mesh();
        mesh.adjacency();

        tracing::debug!(
            points = points.len(),
            triangles = mesh.len(),
            mode = ?config.mode,
            "created moderator"
        );
        Ok(Self::with_rng(config, mesh, rng))
    }

    /// Creates a moderator for an existing mesh. The drawing area of `config` is not used.
    pub fn with_mesh(config: ModeratorConfig, mesh: TriangleMesh) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self::with_rng(config, mesh, rng)
    }

    fn with_rng(config: ModeratorConfig, mesh: TriangleMesh, rng: StdRng) -> Self {
        let animator = config.animator();
        Self {
            config,
            mesh,
            animator,
            rng,
            ticks: 0,
        }
    }

    pub fn config(&self) -> &ModeratorConfig {
        &self.config
    }

    pub fn mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    pub fn animator(&self) -> &AnimatorKind {
        &self.animator
    }

    /// Number of animation ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Resets all colors and initializes the animation.
    pub fn initialize(&mut self) {
        self.mesh.clear_colors();
        self.ticks = 0;
        self.animator.initialize(&mut self.mesh, &mut self.rng);
    }

    /// Advances the animation by one tick.
    pub fn update(&mut self) {
        self.animator.update(&mut self.mesh, &mut self.rng);
        self.ticks += 1;
    }

    /// Clears the surface and draws the mesh.
    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        surface.clear();
        self.mesh.draw(surface);
    }

    /// Initializes the animation, draws the first frame and schedules the first tick.
    ///
    /// Every tick updates the animation, redraws and schedules the next tick after
    /// [ModeratorConfig::update_interval_ms].
    pub fn execute(&mut self, scheduler: &mut dyn TickScheduler<Self>, surface: &mut dyn DrawSurface) {
        self.initialize();
        self.draw(surface);
        self.schedule_tick(scheduler);
    }

    fn schedule_tick(&self, scheduler: &mut dyn TickScheduler<Self>) {
        scheduler.schedule(self.config.update_interval_ms, Box::new(Self::on_tick));
    }

    fn on_tick(&mut self, scheduler: &mut dyn TickScheduler<Self>, surface: &mut dyn DrawSurface) {
        self.update();
        tracing::trace!(tick = self.ticks, "tick");
        self.draw(surface);
        self.schedule_tick(scheduler);
    }
}

#[cfg(test)]
mod test {
    use super::{Mode, Moderator, ModeratorConfig, ModeratorError};
    use crate::animation::AnimatorKind;
    use crate::test_utilities::two_triangle_mesh;
    use crate::{DrawCall, ManualScheduler, RecordingSurface, SamplingError, UNCOLORED};
    use std::error::Error;

    fn small_config(mode: Mode) -> ModeratorConfig {
        ModeratorConfig {
            width: 400,
            height: 200,
            mode,
            seed: 7,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = ModeratorConfig::default();
        assert_eq!(config.point_count(), 625);
        assert_eq!(config.palette().len(), 13 * 13 * 13);
        assert!(matches!(config.animator(), AnimatorKind::Display(_)));
        assert!(matches!(
            ModeratorConfig {
                mode: Mode::Move { tokens: 3 },
                ..Default::default()
            }
            .animator(),
            AnimatorKind::RandomWalk(_)
        ));
    }

    #[test]
    fn test_new() {
        let moderator = Moderator::new(small_config(Mode::Display)).unwrap();
        assert_eq!(moderator.config().point_count(), 39);
        assert!(!moderator.mesh().is_empty());
        assert!(moderator.mesh().has_adjacency());
    }

    #[test]
    fn test_invalid_size() {
        let config = ModeratorConfig {
            width: 0,
            ..Default::default()
        };
        assert_eq!(
            Moderator::new(config).unwrap_err(),
            ModeratorError::InvalidSize {
                width: 0,
                height: 800
            }
        );
    }

    #[test]
    fn test_sampling_error() {
        let config = ModeratorConfig {
            width: 100,
            height: 100,
            density_divisor: 10,
            max_attempts: 100,
            ..Default::default()
        };
        let error = Moderator::new(config).unwrap_err();
        assert!(matches!(
            error,
            ModeratorError::Sampling(SamplingError::CannotPlacePoint { .. })
        ));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_extreme_size_fails_without_sampling() {
        let config = ModeratorConfig {
            width: u32::MAX,
            height: u32::MAX,
            density_divisor: 1,
            ..Default::default()
        };
        assert!(matches!(
            Moderator::new(config).unwrap_err(),
            ModeratorError::Sampling(SamplingError::CannotPlacePoint { placed: 0, .. })
        ));
    }

    #[test]
    fn test_execute_display() {
        let mut moderator = Moderator::new(small_config(Mode::Display)).unwrap();
        let mut scheduler = ManualScheduler::<Moderator>::new();
        let mut surface = RecordingSurface::new();

        moderator.execute(&mut scheduler, &mut surface);
        let first_frame = surface.polygon_fills();
        assert_eq!(first_frame.len(), moderator.mesh().len());
        assert!(first_frame.iter().all(|color| color.is_colored()));
        assert_eq!(scheduler.num_pending(), 1);

        assert_eq!(scheduler.run(&mut moderator, &mut surface, 3), 3);
        assert_eq!(moderator.ticks(), 3);
        assert_eq!(scheduler.now_ms(), 1500);
        assert_eq!(surface.polygon_fills(), first_frame);
        assert_eq!(
            surface.calls().iter().filter(|call| **call == DrawCall::Clear).count(),
            4
        );
    }

    #[test]
    fn test_execute_increase() {
        let config = ModeratorConfig {
            mode: Mode::Increase,
            update_interval_ms: 10,
            ..Default::default()
        };
        let mut moderator = Moderator::with_mesh(config, two_triangle_mesh());
        let mut scheduler = ManualScheduler::<Moderator>::new();
        let mut surface = RecordingSurface::new();

        moderator.execute(&mut scheduler, &mut surface);
        let colored = |surface: &RecordingSurface| {
            surface
                .polygon_fills()
                .iter()
                .filter(|color| **color != UNCOLORED)
                .count()
        };
        assert_eq!(colored(&surface), 1);

        scheduler.run(&mut moderator, &mut surface, 1);
        assert_eq!(colored(&surface), 1);
        scheduler.run(&mut moderator, &mut surface, 1);
        assert_eq!(colored(&surface), 0);

        scheduler.stop();
        assert_eq!(scheduler.run(&mut moderator, &mut surface, 1), 0);
        assert_eq!(moderator.ticks(), 2);
    }

    #[test]
    fn test_reproducible() {
        let run = || {
            let mut moderator = Moderator::new(small_config(Mode::Move { tokens: 4 })).unwrap();
            let mut scheduler = ManualScheduler::<Moderator>::new();
            let mut surface = RecordingSurface::new();
            moderator.execute(&mut scheduler, &mut surface);
            scheduler.run(&mut moderator, &mut surface, 5);
            surface.polygon_fills()
        };
        assert_eq!(run(), run());
    }
}
