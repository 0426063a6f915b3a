//! Shapes derived from triangles that are only used for geometric queries and debug drawing.

use crate::{Color, DrawSurface, Point2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis aligned rectangle given by its lower and upper corner.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct BoundingBox {
    /// The corner with the smallest coordinates.
    pub lower: Point2<f64>,
    /// The corner with the largest coordinates.
    pub upper: Point2<f64>,
}

impl BoundingBox {
    /// Creates the smallest box containing both corners.
    pub fn from_corners(a: Point2<f64>, b: Point2<f64>) -> Self {
        Self {
            lower: Point2::new(a.x.min(b.x), a.y.min(b.y)),
            upper: Point2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn width(&self) -> f64 {
        self.upper.x - self.lower.x
    }

    pub fn height(&self) -> f64 {
        self.upper.y - self.lower.y
    }

    pub fn center(&self) -> Point2<f64> {
        self.lower.add(self.upper).mul(0.5)
    }
}

/// A circle, usually the circumscribed circle of a triangle.
///
/// The color is only used when the circle is drawn for debugging.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct Circle {
    center: Point2<f64>,
    radius: f64,
    color: Color,
}

impl Circle {
    /// Creates a new circle with the default (white) fill color.
    pub fn new(center: Point2<f64>, radius: f64) -> Self {
        Self::with_color(center, radius, Color::default())
    }

    pub fn with_color(center: Point2<f64>, radius: f64, color: Color) -> Self {
        Self {
            center,
            radius,
            color,
        }
    }

    pub fn center(&self) -> Point2<f64> {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns `true` if the point lies inside or exactly on the circle.
    pub fn contains(&self, point: Point2<f64>) -> bool {
        self.center.distance(point) <= self.radius
    }

    /// Returns the square circumscribing this circle.
    pub fn bounding_box(&self) -> BoundingBox {
        let offset = Point2::new(self.radius, self.radius);
        BoundingBox {
            lower: self.center.sub(offset),
            upper: self.center.add(offset),
        }
    }

    /// Draws the circle as an oval.
    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        surface.draw_oval(self.bounding_box(), self.color);
    }
}
