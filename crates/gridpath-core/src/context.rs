//! Cooperative cancellation for long-running searches.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// A cancellation token backed by an [`AtomicBool`], with an optional
/// deadline.
///
/// Clones share the same flag, so a caller can keep one copy and hand the
/// other to a worker. The worker polls [`is_done`](Self::is_done) between
/// steps; nothing is interrupted preemptively.
#[derive(Clone, Debug)]
pub struct Context {
    done: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl Context {
    /// Create a new, non-cancelled context without a deadline.
    pub fn new() -> Self {
        Self {
            done: Arc::new(AtomicBool::new(false)),
            deadline: None,
        }
    }

    /// Create a context that reports done once `timeout` has elapsed.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            done: Arc::new(AtomicBool::new(false)),
            deadline: Instant::now().checked_add(timeout),
        }
    }

    /// The deadline, if one was set.
    #[inline]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether cancellation was requested or the deadline has passed.
    #[inline]
    pub fn is_done(&self) -> bool {
        if self.done.load(Ordering::Relaxed) {
            return true;
        }
        match self.deadline {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_is_shared_between_clones() {
        let ctx = Context::new();
        let worker = ctx.clone();
        assert!(!worker.is_done());
        ctx.cancel();
        assert!(worker.is_done());
    }

    #[test]
    fn zero_timeout_is_immediately_done() {
        let ctx = Context::with_timeout(Duration::ZERO);
        assert!(ctx.deadline().is_some());
        assert!(ctx.is_done());
    }

    #[test]
    fn long_timeout_is_not_done() {
        let ctx = Context::with_timeout(Duration::from_secs(3600));
        assert!(!ctx.is_done());
    }
}
