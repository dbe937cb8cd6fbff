//! Wall-clock deadline shared by all search workers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Terminates the search after a time limit.
///
/// Workers poll [`check`](Self::check) periodically. The first worker to
/// observe the deadline latches the expired flag so the others stop on
/// their next node without reading the clock.
#[derive(Debug)]
pub struct Deadline {
    start: Instant,
    limit: Duration,
    expired: AtomicBool,
}

impl Deadline {
    pub fn new(limit: Duration) -> Self {
        Self {
            start: Instant::now(),
            limit,
            expired: AtomicBool::new(false),
        }
    }

    /// Reads the clock and latches the flag if the limit has passed.
    pub fn check(&self) -> bool {
        if self.is_expired() {
            return true;
        }
        if self.start.elapsed() >= self.limit {
            self.expired.store(true, Ordering::Relaxed);
            return true;
        }
        false
    }

    /// Whether any worker has observed the deadline.
    pub fn is_expired(&self) -> bool {
        self.expired.load(Ordering::Relaxed)
    }
}
