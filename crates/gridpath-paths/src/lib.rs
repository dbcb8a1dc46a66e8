//! A* shortest-path search on character-map mazes.
//!
//! Searches run through [`PathRange`], which owns and reuses its node arena,
//! heap storage and per-cell state so that repeated queries on same-sized
//! mazes do not reallocate.
//!
//! - [`find_path`] is the one-shot entry point for a [`Maze`].
//! - [`PathRange::astar_path`] searches any [`AstarPather`].
//! - [`SearchTask`] runs a search on a worker thread with cancellation.
//!
//! Results are reported as an [`Outcome`]; only [`Outcome::Found`] carries
//! a [`Path`].
//!
//! # Trait hierarchy
//!
//! | Trait | Provides |
//! |---|---|
//! | [`Pather`] | neighbor enumeration |
//! | [`WeightedPather`] : [`Pather`] | step costs |
//! | [`AstarPather`] : [`WeightedPather`] | the A* heuristic |
//!
//! [`MazePather`] implements all three for a [`Maze`] and a [`Movement`].

mod astar;
mod distance;
mod path;
mod pather;
mod pathrange;
mod search;
mod task;
mod traits;

use gridpath_core::{Maze, Point};

pub use distance::{chebyshev, manhattan};
pub use path::{Direction, EmptyPath, Path, STEPS_PER_LINE};
pub use pather::{MazePather, Movement};
pub use pathrange::{PathRange, SearchStats};
pub use search::{Outcome, SearchConfig, SearchError, SearchLimits};
pub use task::{SearchTask, TaskError};
pub use traits::{AstarPather, Pather, WeightedPather};

/// Search `maze` from `from` to `to` with a fresh [`PathRange`].
///
/// Use a long-lived [`PathRange`] and [`PathRange::maze_path`] instead when
/// running many searches.
pub fn find_path(
    maze: &Maze,
    from: Point,
    to: Point,
    config: &SearchConfig,
) -> Result<Outcome, SearchError> {
    PathRange::new(maze.bounds()).maze_path(maze, from, to, config, None)
}
