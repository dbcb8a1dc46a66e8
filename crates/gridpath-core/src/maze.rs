//! The binary traversability grid searched by the path engine.

use crate::geom::{Point, Range};
use crate::map::{CharMap, MapError};

/// Traversability of one maze cell.
///
/// The discriminants are the conventional integer encoding (open = 0,
/// blocked = 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Tile {
    #[default]
    Open = 0,
    Blocked = 1,
}

impl Tile {
    /// The integer encoding of the tile.
    #[inline]
    pub const fn value(self) -> u8 {
        self as u8
    }
}

/// A rectangular grid of [`Tile`]s. Dimensions never change after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    tiles: Vec<Tile>,
    bounds: Range,
}

impl Maze {
    /// Create a fully open maze.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Range::sized(width.max(0), height.max(0));
        Self {
            tiles: vec![Tile::Open; bounds.len()],
            bounds,
        }
    }

    /// Convert a symbolic map: walls become [`Tile::Blocked`], every other
    /// glyph (the start and goal markers included) becomes [`Tile::Open`].
    pub fn from_char_map(map: &CharMap) -> Self {
        let mut maze = Self::new(map.width(), map.height());
        for (p, glyph) in map.iter() {
            if glyph.is_solid() {
                maze.set(p, Tile::Blocked);
            }
        }
        maze
    }

    /// Build a maze from rows where `#` is blocked and any other character
    /// is open. Markers are not required.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, MapError> {
        let Some(first) = rows.first() else {
            return Err(MapError::Empty);
        };
        let width = first.as_ref().chars().count();
        if width == 0 {
            return Err(MapError::Empty);
        }
        let mut maze = Self::new(width as i32, rows.len() as i32);
        for (row, line) in rows.iter().enumerate() {
            let found = line.as_ref().chars().count();
            if found != width {
                return Err(MapError::Ragged {
                    row,
                    expected: width,
                    found,
                });
            }
            for (col, c) in line.as_ref().chars().enumerate() {
                if c == '#' {
                    maze.set(Point::new(col as i32, row as i32), Tile::Blocked);
                }
            }
        }
        Ok(maze)
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// The rectangle covered by the maze.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Whether `p` lies inside the maze.
    #[inline]
    pub fn in_bounds(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Whether `p` is inside the maze and open.
    #[inline]
    pub fn is_open(&self, p: Point) -> bool {
        self.tile(p) == Some(Tile::Open)
    }

    /// The tile at `p`, or `None` out of bounds.
    #[inline]
    pub fn tile(&self, p: Point) -> Option<Tile> {
        if !self.in_bounds(p) {
            return None;
        }
        Some(self.tiles[self.index(p)])
    }

    /// Set the tile at `p`. Does nothing out of bounds.
    pub fn set(&mut self, p: Point, tile: Tile) {
        if !self.in_bounds(p) {
            return;
        }
        let i = self.index(p);
        self.tiles[i] = tile;
    }

    /// Number of open tiles.
    pub fn open_count(&self) -> usize {
        self.tiles.iter().filter(|&&t| t == Tile::Open).count()
    }

    #[inline]
    fn index(&self, p: Point) -> usize {
        (p.y * self.bounds.width() + p.x) as usize
    }
}
