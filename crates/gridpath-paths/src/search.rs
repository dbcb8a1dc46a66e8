//! Search configuration and results.

use gridpath_core::{Point, Range};

use crate::path::Path;
use crate::pather::Movement;

/// Bounds on how much work one search may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchLimits {
    /// Give up with [`Outcome::BudgetExceeded`] once this many nodes have
    /// been expanded without reaching the goal.
    pub max_expansions: Option<usize>,
}

impl SearchLimits {
    /// No limits.
    pub const fn unlimited() -> Self {
        Self {
            max_expansions: None,
        }
    }

    #[inline]
    pub(crate) fn allows(&self, expanded: usize) -> bool {
        self.max_expansions.is_none_or(|max| expanded < max)
    }
}

/// What a maze search should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchConfig {
    pub movement: Movement,
    pub limits: SearchLimits,
}

impl SearchConfig {
    /// Unlimited search with the given movement.
    pub const fn new(movement: Movement) -> Self {
        Self {
            movement,
            limits: SearchLimits::unlimited(),
        }
    }

    /// Cap the number of node expansions.
    pub fn with_max_expansions(mut self, max: usize) -> Self {
        self.limits.max_expansions = Some(max);
        self
    }
}

/// How a search ended. Only [`Found`](Outcome::Found) carries a path;
/// [`NoPath`](Outcome::NoPath) means the frontier ran dry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Found(Path),
    NoPath,
    /// The cancellation context fired before the search finished.
    Cancelled,
    /// The expansion budget ran out before the search finished.
    BudgetExceeded,
}

impl Outcome {
    /// Whether a path was found.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The path, if one was found.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Found(path) => Some(path),
            _ => None,
        }
    }

    /// Take the path, if one was found.
    pub fn into_path(self) -> Option<Path> {
        match self {
            Self::Found(path) => Some(path),
            _ => None,
        }
    }
}

/// A search was started with arguments that violate its preconditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("{point} lies outside the search range {range}")]
    OutOfBounds { point: Point, range: Range },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_allow_up_to_budget() {
        let limits = SearchLimits {
            max_expansions: Some(2),
        };
        assert!(limits.allows(0));
        assert!(limits.allows(1));
        assert!(!limits.allows(2));
        assert!(SearchLimits::unlimited().allows(usize::MAX));
    }

    #[test]
    fn config_builder() {
        let config = SearchConfig::new(Movement::Diagonal).with_max_expansions(10);
        assert_eq!(config.movement, Movement::Diagonal);
        assert_eq!(config.limits.max_expansions, Some(10));
        assert_eq!(SearchConfig::default().movement, Movement::Cardinal);
    }

    #[test]
    fn outcome_accessors() {
        let path = Path::try_from(vec![Point::ZERO]).unwrap();
        let found = Outcome::Found(path.clone());
        assert!(found.is_found());
        assert_eq!(found.path(), Some(&path));
        assert_eq!(found.into_path(), Some(path));
        assert_eq!(Outcome::NoPath.path(), None);
        assert!(!Outcome::Cancelled.is_found());
    }

    #[test]
    fn out_of_bounds_message() {
        let err = SearchError::OutOfBounds {
            point: Point::from_row_col(5, 1),
            range: Range::sized(3, 3),
        };
        assert_eq!(err.to_string(), "(5, 1) lies outside the search range 3x3 at (0, 0)");
    }
}
