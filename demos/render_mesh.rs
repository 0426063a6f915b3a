//! Renders a few frames of an animation into SVG files.
//!
//! Usage: `cargo run --example render_mesh -- [display|increase|move] [output directory]`

use anyhow::{bail, Result};
use svg::node::element::{Ellipse, Line, Polygon, Rectangle};
use svg::Document;

use shape_and_color::{
    BoundingBox, Color, DelaunayTriangles, DrawSurface, ManualScheduler, Mode, Moderator,
    ModeratorConfig, Point2, PointSampler,
};

const FRAMES: usize = 8;

struct SvgSurface {
    width: u32,
    height: u32,
    document: Document,
}

impl SvgSurface {
    fn new(width: u32, height: u32) -> Self {
        let mut result = Self {
            width,
            height,
            document: Document::new(),
        };
        result.clear();
        result
    }

    fn save(&self, path: impl AsRef<std::path::Path>) -> std::io::Result<()> {
        svg::save(path, &self.document)
    }
}

impl DrawSurface for SvgSurface {
    fn draw_polygon(&mut self, points: &[Point2<f64>], fill: Color) {
        let points = points
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");
        let polygon = Polygon::new()
            .set("points", points)
            .set("fill", fill.to_hex())
            .set("stroke", Color::BLACK.to_hex())
            .set("stroke-width", 0.5);
        self.document = std::mem::replace(&mut self.document, Document::new()).add(polygon);
    }

    fn draw_line(&mut self, from: Point2<f64>, to: Point2<f64>) {
        let line = Line::new()
            .set("x1", from.x)
            .set("y1", from.y)
            .set("x2", to.x)
            .set("y2", to.y)
            .set("stroke", Color::BLACK.to_hex());
        self.document = std::mem::replace(&mut self.document, Document::new()).add(line);
    }

    fn draw_oval(&mut self, bounds: BoundingBox, fill: Color) {
        let center = bounds.center();
        let ellipse = Ellipse::new()
            .set("cx", center.x)
            .set("cy", center.y)
            .set("rx", bounds.width() / 2.0)
            .set("ry", bounds.height() / 2.0)
            .set("fill", "none")
            .set("stroke", fill.to_hex());
        self.document = std::mem::replace(&mut self.document, Document::new()).add(ellipse);
    }

    fn clear(&mut self) {
        let background = Rectangle::new()
            .set("width", "100%")
            .set("height", "100%")
            .set("fill", "white");
        self.document = Document::new()
            .set("width", self.width)
            .set("height", self.height)
            .set("viewBox", format!("0 0 {} {}", self.width, self.height))
            .add(background);
    }
}

fn parse_mode(name: &str) -> Result<Mode> {
    Ok(match name {
        "display" => Mode::Display,
        "increase" => Mode::Increase,
        "move" => Mode::Move { tokens: 12 },
        other => bail!("unknown mode {:?}, expected display, increase or move", other),
    })
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let mode = parse_mode(args.next().as_deref().unwrap_or("increase"))?;
    let output = std::path::PathBuf::from(args.next().unwrap_or_else(|| "images".to_string()));
    std::fs::create_dir_all(&output)?;

    let config = ModeratorConfig {
        width: 800,
        height: 400,
        mode,
        seed: 2024,
        ..Default::default()
    };

    // A single frame showing the circumcircles of a small triangulation.
    let mut rng = <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(config.seed);
    let points = PointSampler::default().sample(&mut rng, 800.0, 400.0, 30)?;
    let mut triangulation = DelaunayTriangles::new(800.0, 400.0);
    triangulation.triangulate(&points);
    let mut surface = SvgSurface::new(config.width, config.height);
    triangulation.draw(&mut surface);
    triangulation.draw_circumcircles(&mut surface);
    surface.save(output.join("circumcircles.svg"))?;

    let mut moderator = Moderator::new(config)?;
    let mut scheduler = ManualScheduler::<Moderator>::new();
    let mut surface = SvgSurface::new(moderator.config().width, moderator.config().height);

    moderator.execute(&mut scheduler, &mut surface);
    surface.save(output.join("frame_00.svg"))?;
    for frame in 1..FRAMES {
        scheduler.run_next(&mut moderator, &mut surface);
        surface.save(output.join(format!("frame_{:02}.svg", frame)))?;
    }
    scheduler.stop();

    println!(
        "rendered {} triangles into {}",
        moderator.mesh().len(),
        output.display()
    );
    Ok(())
}
