//! Running a search on a worker thread.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use gridpath_core::{Context, Maze, Point};

use crate::PathRange;
use crate::search::{Outcome, SearchConfig, SearchError};

/// Errors from waiting on a [`SearchTask`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error(transparent)]
    Search(#[from] SearchError),
    /// The worker thread ended without sending a result.
    #[error("search worker exited without a result")]
    WorkerLost,
}

/// A maze search running in the background.
///
/// The worker owns its maze and polls the task's [`Context`] before every
/// expansion, so [`cancel`](Self::cancel) takes effect promptly and the
/// result then reads [`Outcome::Cancelled`].
#[derive(Debug)]
pub struct SearchTask {
    ctx: Context,
    rx: Receiver<Result<Outcome, SearchError>>,
    handle: Option<JoinHandle<()>>,
}

impl SearchTask {
    /// Start searching `maze` from `from` to `to` on a new thread.
    pub fn spawn(maze: Maze, from: Point, to: Point, config: SearchConfig) -> Self {
        Self::spawn_with_context(Context::new(), maze, from, to, config)
    }

    /// Like [`spawn`](Self::spawn), observing an existing context. A
    /// deadline on `ctx` bounds the search time.
    pub fn spawn_with_context(
        ctx: Context,
        maze: Maze,
        from: Point,
        to: Point,
        config: SearchConfig,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        let worker_ctx = ctx.clone();
        let handle = thread::spawn(move || {
            let mut pr = PathRange::new(maze.bounds());
            let res = pr.maze_path(&maze, from, to, &config, Some(&worker_ctx));
            // The receiver may be gone if the task was dropped.
            let _ = tx.send(res);
        });
        log::debug!("spawned search {from} -> {to}");
        Self {
            ctx,
            rx,
            handle: Some(handle),
        }
    }

    /// The context observed by the worker.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Ask the worker to stop.
    pub fn cancel(&self) {
        self.ctx.cancel();
    }

    /// Whether the worker has finished.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Block until the worker reports.
    pub fn wait(mut self) -> Result<Outcome, TaskError> {
        let res = self.rx.recv().map_err(|_| TaskError::WorkerLost);
        self.join();
        Ok(res??)
    }

    /// Block for at most `timeout`, then cancel the worker and collect
    /// whatever it reports.
    pub fn wait_timeout(mut self, timeout: Duration) -> Result<Outcome, TaskError> {
        let res = match self.rx.recv_timeout(timeout) {
            Ok(res) => Ok(res),
            Err(RecvTimeoutError::Timeout) => {
                log::info!("search timed out after {timeout:?}, cancelling");
                self.ctx.cancel();
                self.rx.recv().map_err(|_| TaskError::WorkerLost)
            }
            Err(RecvTimeoutError::Disconnected) => Err(TaskError::WorkerLost),
        };
        self.join();
        Ok(res??)
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("search worker panicked");
            }
        }
    }
}

impl Drop for SearchTask {
    fn drop(&mut self) {
        // Stop a worker nobody is waiting for.
        if self.handle.is_some() {
            self.ctx.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pather::Movement;
    use gridpath_core::Range;

    fn rc(row: i32, col: i32) -> Point {
        Point::from_row_col(row, col)
    }

    #[test]
    fn spawned_search_finds_path() {
        let maze = Maze::from_rows(&["...", ".#.", "..."]).unwrap();
        let task = SearchTask::spawn(maze, rc(0, 0), rc(2, 2), SearchConfig::default());
        let outcome = task.wait().unwrap();
        assert_eq!(outcome.path().unwrap().steps(), 4);
    }

    #[test]
    fn search_errors_are_forwarded() {
        let maze = Maze::new(3, 3);
        let task = SearchTask::spawn(maze, rc(0, 0), rc(9, 9), SearchConfig::default());
        assert_eq!(
            task.wait(),
            Err(TaskError::Search(SearchError::OutOfBounds {
                point: rc(9, 9),
                range: Range::sized(3, 3),
            }))
        );
    }

    #[test]
    fn cancelled_before_start() {
        let ctx = Context::new();
        ctx.cancel();
        let maze = Maze::new(50, 50);
        let task = SearchTask::spawn_with_context(
            ctx,
            maze,
            rc(0, 0),
            rc(49, 49),
            SearchConfig::new(Movement::Diagonal),
        );
        assert!(task.context().is_done());
        assert_eq!(task.wait(), Ok(Outcome::Cancelled));
    }

    #[test]
    fn expired_deadline_cancels() {
        let ctx = Context::with_timeout(Duration::ZERO);
        let maze = Maze::new(50, 50);
        let task =
            SearchTask::spawn_with_context(ctx, maze, rc(0, 0), rc(49, 49), SearchConfig::default());
        assert_eq!(task.wait(), Ok(Outcome::Cancelled));
    }

    #[test]
    fn wait_timeout_returns_a_result() {
        // Whether the worker finishes within the window depends on the
        // machine; the outcome is either the path or a cancellation.
        let maze = Maze::new(256, 256);
        let task = SearchTask::spawn(
            maze,
            rc(0, 0),
            rc(255, 255),
            SearchConfig::new(Movement::Diagonal),
        );
        let outcome = task.wait_timeout(Duration::from_millis(1)).unwrap();
        assert!(matches!(outcome, Outcome::Found(_) | Outcome::Cancelled));
    }

    #[test]
    fn generous_timeout_lets_search_finish() {
        let maze = Maze::new(10, 10);
        let task = SearchTask::spawn(maze, rc(0, 0), rc(9, 9), SearchConfig::default());
        let outcome = task.wait_timeout(Duration::from_secs(30)).unwrap();
        assert_eq!(outcome.path().unwrap().steps(), 18);
    }
}
