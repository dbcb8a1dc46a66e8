use gridpath_core::{Point, Range};

// ---------------------------------------------------------------------------
// Search nodes
// ---------------------------------------------------------------------------

/// Parent index of the root node.
pub(crate) const NO_PARENT: usize = usize::MAX;

/// One expansion state. Nodes live in an arena indexed by insertion order;
/// `parent` points back into the same arena.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Node {
    pub(crate) pos: Point,
    pub(crate) cell: usize,
    pub(crate) parent: usize,
    pub(crate) g: i32,
}

/// Reference into the node arena, ordered for use in `BinaryHeap`.
///
/// Lower `f` pops first; among equal `f`, the node inserted first pops first.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: i32,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest (f, idx) first.
        other.f.cmp(&self.f).then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Per-cell bookkeeping
// ---------------------------------------------------------------------------

/// Open/closed state of one grid cell, valid only when `generation` matches
/// the current search.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct CellState {
    generation: u32,
    closed: bool,
    best_g: i32,
}

impl CellState {
    #[inline]
    pub(crate) fn is_closed(&self, generation: u32) -> bool {
        self.generation == generation && self.closed
    }

    /// Lowest `g` among open-set entries for this cell.
    #[inline]
    pub(crate) fn open_g(&self, generation: u32) -> Option<i32> {
        (self.generation == generation && !self.closed).then_some(self.best_g)
    }

    #[inline]
    pub(crate) fn open(&mut self, generation: u32, g: i32) {
        self.generation = generation;
        self.closed = false;
        self.best_g = g;
    }

    #[inline]
    pub(crate) fn close(&mut self, generation: u32) {
        self.generation = generation;
        self.closed = true;
    }
}

/// Counters from the most recent search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes moved from the open set to the closed set.
    pub expanded: usize,
    /// Nodes pushed onto the open set, the start node included.
    pub generated: usize,
}

// ---------------------------------------------------------------------------
// PathRange
// ---------------------------------------------------------------------------

/// Central coordinator for pathfinding on a grid rectangle.
///
/// `PathRange` owns the node arena, the open-set heap storage and the
/// per-cell state so that repeated queries reuse their allocations.
pub struct PathRange {
    pub(crate) rng: Range,
    pub(crate) width: usize,
    pub(crate) nodes: Vec<Node>,
    pub(crate) cells: Vec<CellState>,
    pub(crate) generation: u32,
    pub(crate) heap: Vec<NodeRef>,
    pub(crate) stats: SearchStats,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Point>,
}

impl PathRange {
    /// Create a new `PathRange` for the given grid rectangle.
    pub fn new(rng: Range) -> Self {
        Self {
            rng,
            width: rng.width().max(0) as usize,
            nodes: Vec::new(),
            cells: vec![CellState::default(); rng.len()],
            generation: 0,
            heap: Vec::new(),
            stats: SearchStats::default(),
            nbuf: Vec::with_capacity(8),
        }
    }

    /// Replace the underlying range.
    ///
    /// If the new size fits within the existing cell storage it is kept and
    /// only the generation counter is bumped, otherwise it is reallocated.
    pub fn set_range(&mut self, rng: Range) {
        let new_len = rng.len();
        self.rng = rng;
        self.width = rng.width().max(0) as usize;

        if new_len <= self.cells.len() {
            self.next_generation();
            return;
        }

        self.cells.clear();
        self.cells.resize(new_len, CellState::default());
        self.generation = 0;
    }

    /// The grid rectangle being used.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Counters from the most recent search.
    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Start a new search generation, lazily invalidating every cell state.
    pub(crate) fn next_generation(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: stale states could now match, so clear them for real.
            self.cells.fill(CellState::default());
            self.generation = 1;
        }
        self.generation
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let y = (p.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn heap_pops_lowest_f_then_oldest() {
        let mut heap = BinaryHeap::new();
        heap.push(NodeRef { idx: 3, f: 5 });
        heap.push(NodeRef { idx: 1, f: 7 });
        heap.push(NodeRef { idx: 2, f: 5 });
        heap.push(NodeRef { idx: 0, f: 9 });
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|n| n.idx)).collect();
        assert_eq!(order, vec![2, 3, 1, 0]);
    }

    #[test]
    fn cell_state_is_scoped_to_generation() {
        let mut s = CellState::default();
        s.open(1, 4);
        assert_eq!(s.open_g(1), Some(4));
        assert_eq!(s.open_g(2), None);
        s.close(1);
        assert!(s.is_closed(1));
        assert_eq!(s.open_g(1), None);
        assert!(!s.is_closed(2));
    }

    #[test]
    fn idx_is_row_major_and_bounded() {
        let pr = PathRange::new(Range::sized(4, 3));
        assert_eq!(pr.idx(Point::from_row_col(0, 0)), Some(0));
        assert_eq!(pr.idx(Point::from_row_col(1, 2)), Some(6));
        assert_eq!(pr.idx(Point::from_row_col(3, 0)), None);
        assert_eq!(pr.idx(Point::from_row_col(0, -1)), None);
    }

    #[test]
    fn set_range_smaller_preserves_capacity() {
        let mut pr = PathRange::new(Range::sized(20, 20));
        let original_cap = pr.cells.len();

        let small = Range::sized(5, 5);
        pr.set_range(small);
        assert_eq!(pr.range(), small);
        assert_eq!(pr.cells.len(), original_cap);
        assert_eq!(pr.width, 5);
        assert!(pr.generation > 0);
    }

    #[test]
    fn set_range_larger_reallocates() {
        let mut pr = PathRange::new(Range::sized(5, 5));
        let big = Range::sized(20, 20);
        pr.set_range(big);
        assert_eq!(pr.range(), big);
        assert_eq!(pr.cells.len(), 400);
    }

    #[test]
    fn generation_wrap_clears_states() {
        let mut pr = PathRange::new(Range::sized(2, 2));
        pr.generation = u32::MAX;
        pr.cells[0].close(u32::MAX);
        pr.cells[1].close(1);
        assert_eq!(pr.next_generation(), 1);
        assert!(!pr.cells[1].is_closed(1));
    }
}
