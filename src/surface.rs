use crate::{BoundingBox, Color, Point2};

/// A 2D canvas that meshes, triangles and circles can be drawn onto.
///
/// This is the only way the crate talks to a renderer. Implementations are free to
/// rasterize immediately, build a scene graph or write a vector image. Nothing is ever read
/// back from a surface.
pub trait DrawSurface {
    /// Draws a closed polygon with an outline and the given fill color.
    fn draw_polygon(&mut self, points: &[Point2<f64>], fill: Color);

    /// Draws a line segment.
    fn draw_line(&mut self, from: Point2<f64>, to: Point2<f64>);

    /// Draws the oval inscribed into `bounds`.
    fn draw_oval(&mut self, bounds: BoundingBox, fill: Color);

    /// Removes everything drawn so far. Called before a full redraw.
    fn clear(&mut self) {}
}

/// A single call received by a [RecordingSurface].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Polygon { points: Vec<Point2<f64>>, fill: Color },
    Line { from: Point2<f64>, to: Point2<f64> },
    Oval { bounds: BoundingBox, fill: Color },
    Clear,
}

/// A surface that only records the draw calls it receives.
///
/// Useful for tests and for replaying a frame onto another surface later.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all calls in the order they were received.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Returns the calls received since the last [DrawSurface::clear].
    pub fn current_frame(&self) -> &[DrawCall] {
        let start = self
            .calls
            .iter()
            .rposition(|call| *call == DrawCall::Clear)
            .map_or(0, |index| index + 1);
        &self.calls[start..]
    }

    /// Returns the fill colors of all polygons of the current frame.
    pub fn polygon_fills(&self) -> Vec<Color> {
        self.current_frame()
            .iter()
            .filter_map(|call| match call {
                DrawCall::Polygon { fill, .. } => Some(*fill),
                _ => None,
            })
            .collect()
    }

    /// Forwards every recorded call to another surface.
    pub fn replay(&self, target: &mut dyn DrawSurface) {
        for call in &self.calls {
            match call {
                DrawCall::Polygon { points, fill } => target.draw_polygon(points, *fill),
                DrawCall::Line { from, to } => target.draw_line(*from, *to),
                DrawCall::Oval { bounds, fill } => target.draw_oval(*bounds, *fill),
                DrawCall::Clear => target.clear(),
            }
        }
    }
}

impl DrawSurface for RecordingSurface {
    fn draw_polygon(&mut self, points: &[Point2<f64>], fill: Color) {
        self.calls.push(DrawCall::Polygon {
            points: points.to_vec(),
            fill,
        });
    }

    fn draw_line(&mut self, from: Point2<f64>, to: Point2<f64>) {
        self.calls.push(DrawCall::Line { from, to });
    }

    fn draw_oval(&mut self, bounds: BoundingBox, fill: Color) {
        self.calls.push(DrawCall::Oval { bounds, fill });
    }

    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }
}
