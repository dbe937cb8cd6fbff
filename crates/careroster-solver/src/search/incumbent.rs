//! Best objective shared between workers.

use std::cmp::Ordering as CmpOrdering;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

/// The best objective vector found by any worker, with its owner.
///
/// Ties are resolved toward the lowest worker index so that the merged
/// result does not depend on which thread got there first.
#[derive(Debug)]
pub struct SharedIncumbent {
    best: Mutex<Option<(Vec<i64>, usize)>>,
    version: AtomicU64,
    floor_owner: AtomicUsize,
}

impl SharedIncumbent {
    pub fn new() -> Self {
        Self {
            best: Mutex::new(None),
            version: AtomicU64::new(0),
            floor_owner: AtomicUsize::new(usize::MAX),
        }
    }

    /// Offers a solution objective. Returns true if it became the incumbent.
    pub fn offer(&self, objective: &[i64], worker: usize) -> bool {
        let Ok(mut best) = self.best.lock() else {
            return false;
        };
        let replace = match best.as_ref() {
            None => true,
            Some((current, owner)) => match objective.cmp(current) {
                CmpOrdering::Less => true,
                CmpOrdering::Equal => worker < *owner,
                CmpOrdering::Greater => false,
            },
        };
        if replace {
            *best = Some((objective.to_vec(), worker));
            self.version.fetch_add(1, Ordering::Release);
        }
        replace
    }

    /// Incremented on every accepted offer.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    pub fn snapshot(&self) -> Option<(Vec<i64>, usize)> {
        self.best.lock().ok().and_then(|best| best.clone())
    }

    /// Records that `worker` found a solution matching the objective floor.
    pub fn claim_floor(&self, worker: usize) {
        self.floor_owner.fetch_min(worker, Ordering::AcqRel);
    }

    /// True once a lower-index worker has reached the floor. Such a worker
    /// wins every tie, so `worker` cannot improve the merged result.
    pub fn is_outranked(&self, worker: usize) -> bool {
        self.floor_owner.load(Ordering::Acquire) < worker
    }
}

impl Default for SharedIncumbent {
    fn default() -> Self {
        Self::new()
    }
}
