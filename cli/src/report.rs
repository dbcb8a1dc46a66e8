//! Text reports for a solved, unsolvable or rejected map.

use std::collections::HashSet;
use std::io::{self, Write};
use std::time::Duration;

use crossterm::style::Stylize;
use gridpath_core::{CharMap, MapError, PATH_MARK, Point};
use gridpath_paths::{Outcome, Path};

pub(crate) const CANCELLED_NOTICE: &str = "Search timed out before a path was found.";
pub(crate) const BUDGET_NOTICE: &str = "Search stopped at the expansion limit before a path was found.";

/// How a found path is presented.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Style {
    /// Diagonal searches print a note instead of the step list.
    pub(crate) diagonal: bool,
    /// Draw path marks with terminal colours.
    pub(crate) color: bool,
}

pub(crate) fn write_map_error(out: &mut impl Write, err: &MapError) -> io::Result<()> {
    writeln!(out)?;
    match err {
        MapError::MissingMarker { .. } => writeln!(out, "Start or end point is not defined.")?,
        _ => writeln!(out, "Wrong map format: {err}.")?,
    }
    writeln!(out)
}

pub(crate) fn write_outcome(
    out: &mut impl Write,
    map: &CharMap,
    outcome: &Outcome,
    elapsed: Duration,
    style: &Style,
) -> io::Result<()> {
    writeln!(out)?;
    match outcome {
        Outcome::Found(path) => {
            writeln!(out, "{}", draw(map, path, style.color))?;
            writeln!(out)?;
            writeln!(out, "Path found in {} ms.", elapsed.as_millis())?;
            writeln!(out)?;
            match path.step_string() {
                Some(steps) if !style.diagonal => writeln!(out, "Steps: {steps}")?,
                _ => writeln!(out, "Don't use diagonal option to view the solution steps.")?,
            }
        }
        Outcome::NoPath => writeln!(out, "Path not found.")?,
        Outcome::Cancelled => writeln!(out, "{CANCELLED_NOTICE}")?,
        Outcome::BudgetExceeded => writeln!(out, "{BUDGET_NOTICE}")?,
    }
    writeln!(out)
}

fn draw(map: &CharMap, path: &Path, color: bool) -> String {
    if !color {
        return path.render(map);
    }
    let marked: HashSet<Point> = path.interior().iter().copied().collect();
    map.render_with(|p, glyph, buf| {
        if marked.contains(&p) {
            buf.push_str(&PATH_MARK.yellow().bold().to_string());
        } else {
            buf.push(glyph.as_char());
        }
    })
}
