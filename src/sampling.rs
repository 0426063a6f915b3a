//! Random point generators.
//!
//! All generators draw from a caller supplied random number generator. Seeding that generator
//! makes every result reproducible.

use std::error::Error;
use std::fmt::Display;

use rand::Rng;

use crate::Point2;

/// Upper limit for the capacity reserved before sampling starts.
const MAX_PREALLOCATED_POINTS: usize = 1 << 16;

/// The error type returned by [PointSampler].
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum SamplingError {
    /// The margin leaves no room for points within the sampled rectangle.
    InvalidArea { width: f64, height: f64, margin: f64 },

    /// No new point could be placed far enough from all previous points.
    ///
    /// The requested density is too high for the given area and minimum distance.
    CannotPlacePoint {
        placed: usize,
        requested: usize,
        min_distance: f64,
    },
}

impl Display for SamplingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SamplingError::InvalidArea {
                width,
                height,
                margin,
            } => write!(
                f,
                "cannot sample points in a {}x{} area with a margin of {}",
                width, height, margin
            ),
            SamplingError::CannotPlacePoint {
                placed,
                requested,
                min_distance,
            } => write!(
                f,
                "cannot place point {} of {} within distance/area constraints (minimum distance {})",
                placed + 1,
                requested,
                min_distance
            ),
        }
    }
}

impl Error for SamplingError {}

/// Draws points uniformly from a rectangle while keeping a minimum distance between them.
///
/// Candidates are generated by rejection sampling: a candidate too close to any accepted
/// point is thrown away. Sampling gives up after `max_attempts` consecutive rejections.
/// Requests for more points than can possibly keep the minimum distance within the area
/// fail right away.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointSampler {
    /// Distance kept to each border of the rectangle.
    pub margin: f64,
    /// Minimum distance between any two generated points.
    pub min_distance: f64,
    /// Number of consecutive rejected candidates after which sampling fails.
    pub max_attempts: usize,
}

impl Default for PointSampler {
    fn default() -> Self {
        Self {
            margin: 10.0,
            min_distance: 30.0,
            max_attempts: 10_000,
        }
    }
}

impl PointSampler {
    /// Generates `count` points within `[margin, width - margin] x [margin, height - margin]`.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        width: f64,
        height: f64,
        count: usize,
    ) -> Result<Vec<Point2<f64>>, SamplingError> {
        let (low_x, high_x) = (self.margin, width - self.margin);
        let (low_y, high_y) = (self.margin, height - self.margin);
        if !(low_x <= high_x && low_y <= high_y) {
            return Err(SamplingError::InvalidArea {
                width,
                height,
                margin: self.margin,
            });
        }

        if let Some(max_points) = self.max_points(high_x - low_x, high_y - low_y) {
            if count as f64 > max_points {
                tracing::warn!(count, max_points, "requested more points than fit into the area");
                return Err(SamplingError::CannotPlacePoint {
                    placed: 0,
                    requested: count,
                    min_distance: self.min_distance,
                });
            }
        }

        let min_distance_2 = self.min_distance * self.min_distance;
        let mut points: Vec<Point2<f64>> =
            Vec::with_capacity(count.min(MAX_PREALLOCATED_POINTS));
        while points.len() < count {
            let mut attempts = 0;
            let accepted = loop {
                if attempts == self.max_attempts {
                    break None;
                }
                attempts += 1;

                let candidate =
                    Point2::new(rng.gen_range(low_x..=high_x), rng.gen_range(low_y..=high_y));
                if points
                    .iter()
                    .all(|point| point.distance_2(candidate) >= min_distance_2)
                {
                    break Some(candidate);
                }
            };

            match accepted {
                Some(point) => points.push(point),
                None => {
                    return Err(SamplingError::CannotPlacePoint {
                        placed: points.len(),
                        requested: count,
                        min_distance: self.min_distance,
                    })
                }
            }
        }
        Ok(points)
    }

    /// Upper bound for the number of points in a `width x height` rectangle that keep
    /// `min_distance` from each other.
    ///
    /// Disks of radius `min_distance / 2` around such points are disjoint and lie within the
    /// rectangle grown by that radius on every side.
    fn max_points(&self, width: f64, height: f64) -> Option<f64> {
        let d = self.min_distance;
        if d.is_nan() || d <= 0.0 {
            return None;
        }
        let disk = std::f64::consts::FRAC_PI_4 * d * d;
        Some(((width + d) * (height + d) / disk).floor())
    }
}

/// Draws `count` points with integral coordinates uniformly from `[0, width] x [0, height]`.
///
/// Points may repeat.
pub fn random_points<R: Rng + ?Sized>(
    rng: &mut R,
    width: u32,
    height: u32,
    count: usize,
) -> Vec<Point2<f64>> {
    (0..count)
        .map(|_| {
            Point2::new(
                f64::from(rng.gen_range(0..=width)),
                f64::from(rng.gen_range(0..=height)),
            )
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::{random_points, PointSampler, SamplingError};
    use crate::test_utilities::SEED;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_min_distance_and_bounds() {
        let mut rng = StdRng::from_seed(*SEED);
        let sampler = PointSampler::default();
        let points = sampler.sample(&mut rng, 800.0, 400.0, 150).unwrap();
        assert_eq!(points.len(), 150);
        for (i, p) in points.iter().enumerate() {
            assert!((10.0..=790.0).contains(&p.x));
            assert!((10.0..=390.0).contains(&p.y));
            for q in &points[i + 1..] {
                assert!(p.distance(*q) >= 30.0);
            }
        }
    }

    #[test]
    fn test_reproducible() {
        let sampler = PointSampler::default();
        let a = sampler
            .sample(&mut StdRng::from_seed(*SEED), 400.0, 400.0, 40)
            .unwrap();
        let b = sampler
            .sample(&mut StdRng::from_seed(*SEED), 400.0, 400.0, 40)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_infeasible_density_fails() {
        let mut rng = StdRng::from_seed(*SEED);
        let sampler = PointSampler {
            max_attempts: 200,
            ..Default::default()
        };
        // At most four points with distance 30 fit into a 40x40 square.
        let result = sampler.sample(&mut rng, 60.0, 60.0, 6);
        match result {
            Err(SamplingError::CannotPlacePoint {
                placed, requested, ..
            }) => {
                assert!(placed > 0 && placed <= 4);
                assert_eq!(requested, 6);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_impossible_count_fails_immediately() {
        let mut rng = StdRng::from_seed(*SEED);
        let sampler = PointSampler::default();
        for count in [50, 1_000_000, usize::MAX] {
            assert_eq!(
                sampler.sample(&mut rng, 60.0, 60.0, count),
                Err(SamplingError::CannotPlacePoint {
                    placed: 0,
                    requested: count,
                    min_distance: 30.0
                })
            );
        }
        let huge = f64::from(u32::MAX);
        assert!(matches!(
            sampler.sample(&mut rng, huge, huge, usize::MAX),
            Err(SamplingError::CannotPlacePoint { placed: 0, .. })
        ));
    }

    #[test]
    fn test_invalid_area() {
        let mut rng = StdRng::from_seed(*SEED);
        let result = PointSampler::default().sample(&mut rng, 15.0, 100.0, 1);
        assert_eq!(
            result,
            Err(SamplingError::InvalidArea {
                width: 15.0,
                height: 100.0,
                margin: 10.0
            })
        );
        assert!(PointSampler::default()
            .sample(&mut rng, 15.0, 100.0, 0)
            .is_err());
    }

    #[test]
    fn test_random_points() {
        let mut rng = StdRng::from_seed(*SEED);
        let points = random_points(&mut rng, 50, 20, 100);
        assert_eq!(points.len(), 100);
        for p in points {
            assert_eq!(p.x.fract(), 0.0);
            assert!((0.0..=50.0).contains(&p.x));
            assert!((0.0..=20.0).contains(&p.y));
        }
    }
}
