use gridpath_core::{Maze, Point};

use crate::distance::manhattan;
use crate::traits::{AstarPather, Pather, WeightedPather};

/// Orthogonal steps as `(Δrow, Δcol)`, in expansion order.
const CARDINAL_STEPS: [Point; 4] = [
    Point::from_row_col(0, -1),
    Point::from_row_col(0, 1),
    Point::from_row_col(-1, 0),
    Point::from_row_col(1, 0),
];

/// Diagonal steps as `(Δrow, Δcol)`, tried after the orthogonal ones.
const DIAGONAL_STEPS: [Point; 4] = [
    Point::from_row_col(-1, -1),
    Point::from_row_col(-1, 1),
    Point::from_row_col(1, -1),
    Point::from_row_col(1, 1),
];

/// Which moves a search may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Movement {
    /// Up, down, left and right.
    #[default]
    Cardinal,
    /// Cardinal moves plus the four diagonals, without cutting corners.
    Diagonal,
}

impl Movement {
    /// `Diagonal` when `diagonal` is set, `Cardinal` otherwise.
    pub const fn from_diagonal(diagonal: bool) -> Self {
        if diagonal {
            Self::Diagonal
        } else {
            Self::Cardinal
        }
    }

    /// Whether diagonal steps are allowed.
    pub const fn is_diagonal(self) -> bool {
        matches!(self, Self::Diagonal)
    }
}

/// Adapts a [`Maze`] to the pather traits.
///
/// Every step costs 1, diagonals included. The heuristic is the Manhattan
/// distance for cardinal movement and zero for diagonal movement, which
/// turns the diagonal search into a uniform-cost search.
#[derive(Debug, Clone, Copy)]
pub struct MazePather<'a> {
    maze: &'a Maze,
    movement: Movement,
}

impl<'a> MazePather<'a> {
    pub fn new(maze: &'a Maze, movement: Movement) -> Self {
        Self { maze, movement }
    }

    pub fn maze(&self) -> &'a Maze {
        self.maze
    }

    pub fn movement(&self) -> Movement {
        self.movement
    }

    /// A diagonal step from `p` by `step` squeezes between two walls when
    /// both orthogonal cells flanking `p` in that direction are blocked.
    fn cuts_corner(&self, p: Point, step: Point) -> bool {
        !self.maze.is_open(p.shift(0, step.y)) && !self.maze.is_open(p.shift(step.x, 0))
    }
}

impl Pather for MazePather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        for step in CARDINAL_STEPS {
            let n = p + step;
            if self.maze.is_open(n) {
                buf.push(n);
            }
        }
        if !self.movement.is_diagonal() {
            return;
        }
        for step in DIAGONAL_STEPS {
            let n = p + step;
            if self.maze.is_open(n) && !self.cuts_corner(p, step) {
                buf.push(n);
            }
        }
    }
}

impl WeightedPather for MazePather<'_> {
    #[inline]
    fn cost(&self, _from: Point, _to: Point) -> i32 {
        1
    }
}

impl AstarPather for MazePather<'_> {
    #[inline]
    fn estimate(&self, from: Point, to: Point) -> i32 {
        match self.movement {
            Movement::Cardinal => manhattan(from, to),
            Movement::Diagonal => 0,
        }
    }
}
