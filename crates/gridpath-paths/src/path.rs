//! The result of a successful search and the queries presentation code
//! runs on it.

use std::collections::HashSet;
use std::fmt;

use gridpath_core::{CharMap, Point};

/// Number of step symbols per line in [`Path::step_string`].
pub const STEPS_PER_LINE: usize = 32;

/// A single orthogonal step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Down,
    Up,
    Right,
    Left,
}

impl Direction {
    /// Classify the step from `from` to the adjacent cell `to`.
    ///
    /// Returns `None` unless exactly one coordinate changes by one.
    pub fn between(from: Point, to: Point) -> Option<Self> {
        match (to.row() - from.row(), to.col() - from.col()) {
            (1, 0) => Some(Self::Down),
            (-1, 0) => Some(Self::Up),
            (0, 1) => Some(Self::Right),
            (0, -1) => Some(Self::Left),
            _ => None,
        }
    }

    /// One-letter symbol: `d`, `u`, `r` or `l`.
    pub const fn symbol(self) -> char {
        match self {
            Self::Down => 'd',
            Self::Up => 'u',
            Self::Right => 'r',
            Self::Left => 'l',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Returned when building a [`Path`] from an empty cell list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("a path needs at least one cell")]
pub struct EmptyPath;

/// Ordered cells from start to goal, both included. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Point>", into = "Vec<Point>")
)]
pub struct Path {
    cells: Vec<Point>,
}

impl Path {
    /// Wrap a cell list produced by the search.
    pub(crate) fn from_search(cells: Vec<Point>) -> Self {
        debug_assert!(!cells.is_empty());
        Self { cells }
    }

    /// The cells in start→goal order.
    #[inline]
    pub fn cells(&self) -> &[Point] {
        &self.cells
    }

    /// Number of cells, endpoints included.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`; paths hold at least their start cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of moves (`len() - 1`).
    #[inline]
    pub fn steps(&self) -> usize {
        self.cells.len() - 1
    }

    /// First cell.
    #[inline]
    pub fn start(&self) -> Point {
        self.cells[0]
    }

    /// Last cell.
    #[inline]
    pub fn goal(&self) -> Point {
        self.cells[self.cells.len() - 1]
    }

    /// The cells strictly between start and goal.
    pub fn interior(&self) -> &[Point] {
        match self.cells.len() {
            0..=2 => &[],
            n => &self.cells[1..n - 1],
        }
    }

    /// Whether `(row, col)` is an interior cell of the path.
    pub fn contains_interior(&self, row: i32, col: i32) -> bool {
        self.interior().contains(&Point::from_row_col(row, col))
    }

    /// Iterate over the cells.
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.cells.iter()
    }

    /// The direction of each step, or `None` if any step is diagonal.
    pub fn directions(&self) -> Option<Vec<Direction>> {
        self.cells
            .windows(2)
            .map(|w| Direction::between(w[0], w[1]))
            .collect()
    }

    /// Step symbols joined by commas, with a line break after the separator
    /// that follows every [`STEPS_PER_LINE`]th symbol.
    ///
    /// Returns `None` when the path contains a diagonal step.
    pub fn step_string(&self) -> Option<String> {
        let dirs = self.directions()?;
        let mut out = String::with_capacity(dirs.len() * 2 + dirs.len() / STEPS_PER_LINE);
        for (i, dir) in dirs.iter().enumerate() {
            let n = i + 1;
            out.push(dir.symbol());
            if n < dirs.len() {
                out.push(',');
            }
            if n % STEPS_PER_LINE == 0 {
                out.push('\n');
            }
        }
        Some(out)
    }

    /// Draw `map` with the interior path cells marked.
    pub fn render(&self, map: &CharMap) -> String {
        let marked: HashSet<Point> = self.interior().iter().copied().collect();
        map.render(|p| marked.contains(&p))
    }
}

impl TryFrom<Vec<Point>> for Path {
    type Error = EmptyPath;

    fn try_from(cells: Vec<Point>) -> Result<Self, EmptyPath> {
        if cells.is_empty() {
            return Err(EmptyPath);
        }
        Ok(Self { cells })
    }
}

impl From<Path> for Vec<Point> {
    fn from(path: Path) -> Self {
        path.cells
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridpath_core::MapLimits;

    fn path(cells: &[(i32, i32)]) -> Path {
        Path::try_from(cells.iter().map(|&rc| Point::from(rc)).collect::<Vec<_>>()).unwrap()
    }

    #[test]
    fn interior_excludes_endpoints() {
        let p = path(&[(0, 0), (0, 1), (1, 1), (1, 2)]);
        assert!(!p.contains_interior(0, 0));
        assert!(p.contains_interior(0, 1));
        assert!(p.contains_interior(1, 1));
        assert!(!p.contains_interior(1, 2));
        assert!(!p.contains_interior(5, 5));
    }

    #[test]
    fn short_paths_have_no_interior() {
        assert!(path(&[(2, 2)]).interior().is_empty());
        assert!(path(&[(2, 2), (2, 3)]).interior().is_empty());
        assert_eq!(path(&[(2, 2)]).steps(), 0);
    }

    #[test]
    fn accessors() {
        let p = path(&[(0, 0), (1, 0), (1, 1)]);
        assert_eq!(p.len(), 3);
        assert!(!p.is_empty());
        assert_eq!(p.steps(), 2);
        assert_eq!(p.start(), Point::from_row_col(0, 0));
        assert_eq!(p.goal(), Point::from_row_col(1, 1));
        assert_eq!(p.iter().count(), 3);
        assert_eq!((&p).into_iter().last(), Some(&Point::from_row_col(1, 1)));
    }

    #[test]
    fn empty_cell_list_is_rejected() {
        assert_eq!(Path::try_from(Vec::new()), Err(EmptyPath));
    }

    #[test]
    fn step_string_for_simple_path() {
        let p = path(&[(0, 0), (0, 1), (1, 1)]);
        assert_eq!(p.step_string().as_deref(), Some("r,d"));
    }

    #[test]
    fn step_string_covers_all_directions() {
        let p = path(&[(1, 1), (2, 1), (2, 0), (1, 0), (1, 1)]);
        assert_eq!(p.step_string().as_deref(), Some("d,l,u,r"));
        assert_eq!(path(&[(4, 4)]).step_string().as_deref(), Some(""));
    }

    #[test]
    fn step_string_wraps_every_32_symbols() {
        let cells: Vec<(i32, i32)> = (0..=40).map(|c| (0, c)).collect();
        let got = path(&cells).step_string().unwrap();
        let lines: Vec<&str> = got.split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], vec!["r"; 32].join(",") + ",");
        assert_eq!(lines[1], vec!["r"; 8].join(","));
    }

    #[test]
    fn step_string_ending_on_a_full_line() {
        let cells: Vec<(i32, i32)> = (0..=32).map(|r| (r, 0)).collect();
        let got = path(&cells).step_string().unwrap();
        assert_eq!(got, vec!["d"; 32].join(",") + "\n");
    }

    #[test]
    fn diagonal_paths_have_no_step_string() {
        let p = path(&[(0, 0), (1, 1), (1, 2)]);
        assert_eq!(p.directions(), None);
        assert_eq!(p.step_string(), None);
    }

    #[test]
    fn render_keeps_markers() {
        let map = CharMap::parse("S..\n.##\n..X", &MapLimits::default()).unwrap();
        let p = path(&[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)]);
        assert_eq!(p.render(&map), "S..\n*##\n**X");
    }

    #[test]
    fn direction_between_rejects_non_adjacent() {
        let a = Point::from_row_col(0, 0);
        assert_eq!(Direction::between(a, Point::from_row_col(0, 2)), None);
        assert_eq!(Direction::between(a, a), None);
        assert_eq!(Direction::Left.to_string(), "l");
    }
}
