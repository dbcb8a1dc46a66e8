//! **gridpath-core**: the maze model shared by the gridpath crates.
//!
//! This crate provides geometry primitives, the symbolic map format with its
//! validator, the binary traversability grid the search runs on, and a
//! cooperative cancellation token.

pub mod context;
pub mod geom;
pub mod map;
pub mod maze;

pub use context::Context;
pub use geom::{Point, Range};
pub use map::{CharMap, Glyph, MAX_MAP_SIDE, MapError, MapLimits, PATH_MARK};
pub use maze::{Maze, Tile};
