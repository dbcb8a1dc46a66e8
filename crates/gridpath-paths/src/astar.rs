use std::collections::BinaryHeap;

use gridpath_core::{Context, Maze, Point};

use crate::PathRange;
use crate::path::Path;
use crate::pather::MazePather;
use crate::pathrange::{NO_PARENT, Node, NodeRef, SearchStats};
use crate::search::{Outcome, SearchConfig, SearchError, SearchLimits};
use crate::traits::AstarPather;

impl PathRange {
    /// Compute the shortest path from `from` to `to` using A*.
    ///
    /// Returns [`Outcome::Found`] with the full path (including both
    /// endpoints) or [`Outcome::NoPath`] if the goal cannot be reached.
    /// Both points must lie inside the current range.
    pub fn astar_path<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
    ) -> Result<Outcome, SearchError> {
        self.astar_path_with(pather, from, to, &SearchLimits::unlimited(), None)
    }

    /// [`astar_path`](Self::astar_path) with an expansion budget and an
    /// optional cancellation context, both checked before every expansion.
    ///
    /// Frontier nodes are expanded by lowest `f = g + h`; ties go to the
    /// node that was discovered first. A cell is re-added to the frontier
    /// only when reached with a strictly lower `g`; the superseded entry
    /// stays in the heap and is skipped once its cell is closed.
    pub fn astar_path_with<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
        limits: &SearchLimits,
        ctx: Option<&Context>,
    ) -> Result<Outcome, SearchError> {
        let start_idx = self.checked_idx(from)?;
        let goal_idx = self.checked_idx(to)?;

        let cur_gen = self.next_generation();
        self.stats = SearchStats {
            expanded: 0,
            generated: 1,
        };

        // The start node has g = h = f = 0.
        self.nodes.clear();
        self.nodes.push(Node {
            pos: from,
            cell: start_idx,
            parent: NO_PARENT,
            g: 0,
        });
        self.cells[start_idx].open(cur_gen, 0);

        let mut open = BinaryHeap::from(std::mem::take(&mut self.heap));
        open.push(NodeRef { idx: 0, f: 0 });

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let outcome = loop {
            let Some(current) = open.pop() else {
                break Outcome::NoPath;
            };
            let node = self.nodes[current.idx];

            // Superseded entry for a cell that is already expanded.
            if self.cells[node.cell].is_closed(cur_gen) {
                continue;
            }
            if ctx.is_some_and(|c| c.is_done()) {
                break Outcome::Cancelled;
            }
            if !limits.allows(self.stats.expanded) {
                break Outcome::BudgetExceeded;
            }

            self.cells[node.cell].close(cur_gen);
            self.stats.expanded += 1;

            if node.cell == goal_idx {
                break Outcome::Found(self.trace(current.idx));
            }

            nbuf.clear();
            pather.neighbors(node.pos, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let state = &mut self.cells[ni];
                if state.is_closed(cur_gen) {
                    continue;
                }
                let g = node.g + pather.cost(node.pos, np);
                if state.open_g(cur_gen).is_some_and(|best| best <= g) {
                    continue;
                }
                state.open(cur_gen, g);

                let f = g + pather.estimate(np, to);
                let idx = self.nodes.len();
                self.nodes.push(Node {
                    pos: np,
                    cell: ni,
                    parent: current.idx,
                    g,
                });
                open.push(NodeRef { idx, f });
                self.stats.generated += 1;
            }
        };

        self.nbuf = nbuf;
        let mut heap = open.into_vec();
        heap.clear();
        self.heap = heap;

        let stats = self.stats;
        match &outcome {
            Outcome::Found(path) => log::debug!(
                "path {from} -> {to}: {} steps, {} expanded, {} generated",
                path.steps(),
                stats.expanded,
                stats.generated
            ),
            Outcome::NoPath => log::debug!(
                "no path {from} -> {to}: {} expanded, {} generated",
                stats.expanded,
                stats.generated
            ),
            Outcome::Cancelled => log::info!(
                "search {from} -> {to} cancelled after {} expansions",
                stats.expanded
            ),
            Outcome::BudgetExceeded => log::warn!(
                "search {from} -> {to} stopped at the budget of {} expansions",
                stats.expanded
            ),
        }
        Ok(outcome)
    }

    /// Search `maze` from `from` to `to` with the movement and limits in
    /// `config`. The range is resized to the maze first if needed.
    pub fn maze_path(
        &mut self,
        maze: &Maze,
        from: Point,
        to: Point,
        config: &SearchConfig,
        ctx: Option<&Context>,
    ) -> Result<Outcome, SearchError> {
        if self.rng != maze.bounds() {
            self.set_range(maze.bounds());
        }
        for p in [from, to] {
            if maze.in_bounds(p) && !maze.is_open(p) {
                log::warn!("search endpoint {p} is on a blocked cell");
            }
        }
        let pather = MazePather::new(maze, config.movement);
        self.astar_path_with(&pather, from, to, &config.limits, ctx)
    }

    fn checked_idx(&self, p: Point) -> Result<usize, SearchError> {
        self.idx(p).ok_or(SearchError::OutOfBounds {
            point: p,
            range: self.rng,
        })
    }

    /// Follow parent links from arena node `idx` back to the root.
    fn trace(&self, mut idx: usize) -> Path {
        let mut cells = Vec::new();
        while idx != NO_PARENT {
            let node = &self.nodes[idx];
            cells.push(node.pos);
            idx = node.parent;
        }
        cells.reverse();
        Path::from_search(cells)
    }
}
