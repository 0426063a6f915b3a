//! # Shape and color
//!
//! Delaunay triangulations of random point sets, together with color animations running over
//! the triangles of the resulting mesh.
//!
//! # Features
//!  * Incremental Delaunay triangulation (Bowyer–Watson) of points within a rectangle, see
//!    [DelaunayTriangles]
//!  * A triangle adjacency graph answering "which triangles share an edge with this one?", see
//!    [AdjacencyGraph]
//!  * Two graph walk animations: an expanding color frontier and randomly walking color
//!    tokens, see [animation]
//!  * Rejection sampling of points with a minimum distance, see [PointSampler]
//!  * A renderer independent drawing interface, see [DrawSurface]
//!  * A [Moderator] that wires all of the above to a tick scheduler
//!
//! # Example
//! ```
//! use shape_and_color::{ManualScheduler, Mode, Moderator, ModeratorConfig, RecordingSurface};
//!
//! let config = ModeratorConfig {
//!     width: 400,
//!     height: 200,
//!     mode: Mode::Move { tokens: 3 },
//!     ..Default::default()
//! };
//!
//! let mut moderator = Moderator::new(config)?;
//! let mut scheduler = ManualScheduler::<Moderator>::new();
//! let mut surface = RecordingSurface::new();
//!
//! moderator.execute(&mut scheduler, &mut surface);
//! scheduler.run(&mut moderator, &mut surface, 10);
//! assert_eq!(moderator.ticks(), 10);
//! # Ok::<(), shape_and_color::ModeratorError>(())
//! ```

#![forbid(unsafe_code)]

mod adjacency;
pub mod animation;
mod color;
mod delaunay_triangles;
pub mod math;
mod mesh;
mod moderator;
mod point;
mod primitives;
mod sampling;
mod scheduler;
mod surface;
mod triangle;

pub use crate::adjacency::{AdjacencyGraph, NeighborList};
pub use crate::color::{Color, DEFAULT_PALETTE_BEGIN, DEFAULT_PALETTE_DELTA, UNCOLORED};
pub use crate::delaunay_triangles::{triangulate, DelaunayTriangles};
pub use crate::mesh::{FixedTriangleHandle, TriangleMesh};
pub use crate::moderator::{Mode, Moderator, ModeratorConfig, ModeratorError};
pub use crate::point::{distance, MeshNum, Point2, POINT_TOLERANCE};
pub use crate::primitives::{BoundingBox, Circle};
pub use crate::sampling::{random_points, PointSampler, SamplingError};
pub use crate::scheduler::{ManualScheduler, TickCallback, TickScheduler};
pub use crate::surface::{DrawCall, DrawSurface, RecordingSurface};
pub use crate::triangle::{Triangle, TriangleError};

#[cfg(test)]
mod test_utilities;
