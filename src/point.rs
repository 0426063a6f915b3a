use std::hash::{Hash, Hasher};

use num_traits::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Absolute tolerance used when comparing point coordinates.
///
/// Two points are considered equal if both of their coordinates differ by at most this value.
pub const POINT_TOLERANCE: f64 = 1.0e-9;

/// A coordinate type that can be used for mesh positions.
///
/// Internally, most calculations are performed after converting the type into a `f64`.
/// This type should usually be either `f32` or `f64`.
pub trait MeshNum: Float + Into<f64> + From<f32> + std::fmt::Debug {}

impl<T> MeshNum for T where T: Float + Into<f64> + From<f32> + std::fmt::Debug {}

/// A two dimensional point.
///
/// Points compare equal if their coordinates are equal within [POINT_TOLERANCE]. Their hash
/// is derived from the coordinates rounded to the nearest integer. Points that are almost
/// equal will therefore usually, but not always, share a hash value; any two points within the
/// same unit cell collide. Triangle deduplication relies on exactly this behavior.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct Point2<S> {
    /// The point's x coordinate
    pub x: S,
    /// The point's y coordinate
    pub y: S,
}

impl<S> Point2<S> {
    /// Creates a new point.
    #[inline]
    pub const fn new(x: S, y: S) -> Self {
        Point2 { x, y }
    }
}

impl<S: MeshNum> Point2<S> {
    /// Returns the euclidean distance between this point and another point.
    #[inline]
    pub fn distance(&self, other: Self) -> S {
        self.distance_2(other).sqrt()
    }

    /// Returns the squared distance of this point and another point.
    #[inline]
    pub fn distance_2(&self, other: Self) -> S {
        self.sub(other).length2()
    }

    /// Returns `true` if both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub(crate) fn to_f64(self) -> Point2<f64> {
        Point2::new(self.x.into(), self.y.into())
    }

    /// Returns the coordinates rounded to the nearest integer. Used as hash key.
    pub(crate) fn rounded(&self) -> (i64, i64) {
        let p = self.to_f64();
        (p.x.round() as i64, p.y.round() as i64)
    }

    pub(crate) fn add(&self, other: Self) -> Self {
        Point2 {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    pub(crate) fn sub(&self, other: Self) -> Self {
        Point2 {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    pub(crate) fn mul(&self, factor: S) -> Self {
        Point2 {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    pub(crate) fn length2(&self) -> S {
        self.x * self.x + self.y * self.y
    }

    pub(crate) fn dot(&self, other: Self) -> S {
        self.x * other.x + self.y * other.y
    }
}

/// Computes the euclidean distance between two points.
#[inline]
pub fn distance<S: MeshNum>(a: Point2<S>, b: Point2<S>) -> S {
    a.distance(b)
}

impl<S: MeshNum> PartialEq for Point2<S> {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (self.to_f64(), other.to_f64());
        (a.x - b.x).abs() <= POINT_TOLERANCE && (a.y - b.y).abs() <= POINT_TOLERANCE
    }
}

impl<S: MeshNum> Eq for Point2<S> {}

impl<S: MeshNum> Hash for Point2<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rounded().hash(state);
    }
}

impl<S: MeshNum> From<Point2<S>> for [S; 2] {
    #[inline]
    fn from(point: Point2<S>) -> Self {
        [point.x, point.y]
    }
}

impl<S: MeshNum> From<Point2<S>> for (S, S) {
    #[inline]
    fn from(point: Point2<S>) -> (S, S) {
        (point.x, point.y)
    }
}

impl<S: MeshNum> From<[S; 2]> for Point2<S> {
    #[inline]
    fn from(source: [S; 2]) -> Self {
        Self::new(source[0], source[1])
    }
}

impl<S: MeshNum> From<(S, S)> for Point2<S> {
    #[inline]
    fn from(source: (S, S)) -> Self {
        Self::new(source.0, source.1)
    }
}
