//! The symbolic maze map: a validated rectangle of [`Glyph`]s.
//!
//! Maps are drawn with four characters:
//!
//! | Char | Glyph | Meaning |
//! |---|---|---|
//! | `#` | [`Glyph::Wall`] | solid, never traversable |
//! | `.` | [`Glyph::Floor`] | open |
//! | `S` | [`Glyph::Start`] | the unique start cell |
//! | `X` | [`Glyph::Goal`] | the unique destination cell |
//!
//! [`CharMap::parse`] rejects anything that is not a rectangle over these
//! characters with exactly one start and one goal, so every `CharMap` value
//! upholds those invariants.

use std::fmt;

use crate::geom::{Point, Range};

/// Character used to draw interior path cells in rendered maps.
pub const PATH_MARK: char = '*';

/// Default cap on either side of a map.
pub const MAX_MAP_SIDE: usize = 256;

/// One cell of a symbolic map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Glyph {
    Wall,
    Floor,
    Start,
    Goal,
}

impl Glyph {
    /// Parse a map character.
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(Self::Wall),
            '.' => Some(Self::Floor),
            'S' => Some(Self::Start),
            'X' => Some(Self::Goal),
            _ => None,
        }
    }

    /// The character this glyph is drawn with.
    pub const fn as_char(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Floor => '.',
            Self::Start => 'S',
            Self::Goal => 'X',
        }
    }

    /// Whether the glyph blocks movement once the map is converted.
    pub const fn is_solid(self) -> bool {
        matches!(self, Self::Wall)
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.as_char())
    }
}

/// Size limits applied while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapLimits {
    pub max_width: usize,
    pub max_height: usize,
}

impl MapLimits {
    /// Limits that accept any map whose sides fit in an `i32`.
    pub const fn unbounded() -> Self {
        Self {
            max_width: i32::MAX as usize,
            max_height: i32::MAX as usize,
        }
    }
}

impl Default for MapLimits {
    fn default() -> Self {
        Self {
            max_width: MAX_MAP_SIDE,
            max_height: MAX_MAP_SIDE,
        }
    }
}

/// Why a map text was rejected. Rows and columns are zero-based.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("the map is empty")]
    Empty,
    #[error("the map is {width} columns wide, the limit is {max}")]
    TooWide { width: usize, max: usize },
    #[error("the map has more than {max} rows")]
    TooTall { max: usize },
    #[error("row {row} has {found} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unexpected character {found:?} at row {row}, column {col}")]
    InvalidGlyph { row: usize, col: usize, found: char },
    #[error("more than one {glyph} marker, the second is at row {row}, column {col}")]
    DuplicateMarker { glyph: Glyph, row: usize, col: usize },
    #[error("the map has no {glyph} marker")]
    MissingMarker { glyph: Glyph },
}

/// A validated rectangular map of glyphs with one start and one goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharMap {
    glyphs: Vec<Glyph>,
    width: i32,
    height: i32,
    start: Point,
    goal: Point,
}

impl CharMap {
    /// Parse map text, one row per line.
    pub fn parse(text: &str, limits: &MapLimits) -> Result<Self, MapError> {
        Self::from_lines(text.lines(), limits)
    }

    /// Build a map from rows. A trailing `\r` on a row is ignored.
    pub fn from_lines<I, S>(lines: I, limits: &MapLimits) -> Result<Self, MapError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut glyphs = Vec::new();
        let mut width = 0usize;
        let mut height = 0usize;
        let mut start = None;
        let mut goal = None;

        for (row, raw) in lines.into_iter().enumerate() {
            let text = raw.as_ref();
            let text = text.strip_suffix('\r').unwrap_or(text);
            let found = text.chars().count();

            if row == 0 {
                if found > limits.max_width {
                    return Err(MapError::TooWide {
                        width: found,
                        max: limits.max_width,
                    });
                }
                width = found;
            } else if found != width {
                return Err(MapError::Ragged {
                    row,
                    expected: width,
                    found,
                });
            }
            if row >= limits.max_height {
                return Err(MapError::TooTall {
                    max: limits.max_height,
                });
            }

            for (col, c) in text.chars().enumerate() {
                let glyph = Glyph::from_char(c).ok_or(MapError::InvalidGlyph {
                    row,
                    col,
                    found: c,
                })?;
                let slot = match glyph {
                    Glyph::Start => &mut start,
                    Glyph::Goal => &mut goal,
                    Glyph::Wall | Glyph::Floor => {
                        glyphs.push(glyph);
                        continue;
                    }
                };
                if slot.is_some() {
                    return Err(MapError::DuplicateMarker { glyph, row, col });
                }
                *slot = Some(Point::new(col as i32, row as i32));
                glyphs.push(glyph);
            }
            height += 1;
        }

        if width == 0 || height == 0 {
            return Err(MapError::Empty);
        }
        let start = start.ok_or(MapError::MissingMarker {
            glyph: Glyph::Start,
        })?;
        let goal = goal.ok_or(MapError::MissingMarker { glyph: Glyph::Goal })?;

        log::debug!("parsed {width}x{height} map, start {start}, goal {goal}");
        Ok(Self {
            glyphs,
            width: width as i32,
            height: height as i32,
            start,
            goal,
        })
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The rectangle covered by the map.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::sized(self.width, self.height)
    }

    /// The start cell.
    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    /// The goal cell.
    #[inline]
    pub fn goal(&self) -> Point {
        self.goal
    }

    /// The glyph at `p`, or `None` outside the map.
    pub fn at(&self, p: Point) -> Option<Glyph> {
        if !self.bounds().contains(p) {
            return None;
        }
        Some(self.glyphs[self.index(p)])
    }

    /// First cell holding `glyph` in row-major order.
    pub fn find(&self, glyph: Glyph) -> Option<Point> {
        self.glyphs
            .iter()
            .position(|&g| g == glyph)
            .map(|i| self.point(i))
    }

    /// Iterate over `(Point, Glyph)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Glyph)> + '_ {
        self.glyphs
            .iter()
            .enumerate()
            .map(|(i, &g)| (self.point(i), g))
    }

    /// Draw the map with [`PATH_MARK`] over every cell `marked` accepts.
    ///
    /// Rows are separated by `\n`; there is no trailing newline.
    pub fn render(&self, marked: impl Fn(Point) -> bool) -> String {
        self.render_with(|p, glyph, out| {
            out.push(if marked(p) { PATH_MARK } else { glyph.as_char() });
        })
    }

    /// Draw the map, letting `paint` write each cell into the output.
    pub fn render_with(&self, mut paint: impl FnMut(Point, Glyph, &mut String)) -> String {
        let mut out = String::with_capacity(self.glyphs.len() + self.height as usize);
        for (i, &glyph) in self.glyphs.iter().enumerate() {
            let p = self.point(i);
            if p.x == 0 && p.y > 0 {
                out.push('\n');
            }
            paint(p, glyph, &mut out);
        }
        out
    }

    #[inline]
    fn index(&self, p: Point) -> usize {
        (p.y * self.width + p.x) as usize
    }

    #[inline]
    fn point(&self, idx: usize) -> Point {
        let w = self.width as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }
}

impl fmt::Display for CharMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(|_| false))
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn glyphs_serialize_by_name() {
        assert_eq!(serde_json::to_string(&Glyph::Goal).unwrap(), r#""Goal""#);
        assert_eq!(serde_json::from_str::<Glyph>(r#""Wall""#).unwrap(), Glyph::Wall);
    }
}
