//! Search statistics collection and reporting.
//!
//! Workers count nodes locally and flush into a shared
//! [`StatisticsCollector`] when they finish; incumbent improvements are
//! recorded as they happen.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Record of an incumbent improvement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Improvement {
    /// Time since solving started.
    pub time_offset: Duration,
    /// Worker that found the solution.
    pub worker: usize,
    /// The new best objective vector.
    pub objective: Vec<i64>,
}

/// Complete statistics for one `solve()` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolverStatistics {
    /// Wall-clock time spent solving.
    pub elapsed: Duration,
    /// Search nodes visited across all workers.
    pub nodes_explored: u64,
    /// Search nodes visited by each worker, by worker index.
    pub worker_nodes: Vec<u64>,
    /// Nodes cut off by the objective bound.
    pub nodes_pruned: u64,
    /// Complete assignments reached, improving or not for the global best.
    pub solutions_found: u64,
    pub worker_count: usize,
    /// Whether the time budget stopped the search.
    pub timed_out: bool,
    /// Incumbent history, oldest first.
    pub improvements: Vec<Improvement>,
}

impl SolverStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn improvement_count(&self) -> usize {
        self.improvements.len()
    }

    /// The final incumbent objective, if any solution was found.
    pub fn best_objective(&self) -> Option<&[i64]> {
        self.improvements.last().map(|i| i.objective.as_slice())
    }

    pub fn nodes_per_second(&self) -> u64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            (self.nodes_explored as f64 / secs) as u64
        } else {
            0
        }
    }
}

/// Thread-safe collector for search statistics.
///
/// After solving, call [`into_statistics`](Self::into_statistics) to get the
/// final [`SolverStatistics`].
#[derive(Debug)]
pub struct StatisticsCollector {
    start_time: Instant,
    nodes: AtomicU64,
    pruned: AtomicU64,
    solutions: AtomicU64,
    worker_nodes: Mutex<Vec<u64>>,
    improvements: Mutex<Vec<Improvement>>,
}

impl StatisticsCollector {
    /// Creates a collector; the start time is recorded now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            nodes: AtomicU64::new(0),
            pruned: AtomicU64::new(0),
            solutions: AtomicU64::new(0),
            worker_nodes: Mutex::new(Vec::new()),
            improvements: Mutex::new(Vec::new()),
        }
    }

    /// Adds to the total and to the given worker's own count.
    pub fn record_nodes(&self, worker: usize, count: u64) {
        self.nodes.fetch_add(count, Ordering::Relaxed);
        if let Ok(mut per_worker) = self.worker_nodes.lock() {
            if per_worker.len() <= worker {
                per_worker.resize(worker + 1, 0);
            }
            per_worker[worker] += count;
        }
    }

    pub fn record_pruned(&self, count: u64) {
        self.pruned.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_solutions(&self, count: u64) {
        self.solutions.fetch_add(count, Ordering::Relaxed);
    }

    /// Records a new global best.
    pub fn record_improvement(&self, objective: Vec<i64>, worker: usize) {
        let improvement = Improvement {
            time_offset: self.start_time.elapsed(),
            worker,
            objective,
        };
        if let Ok(mut history) = self.improvements.lock() {
            history.push(improvement);
        }
    }

    /// Consumes the collector.
    pub fn into_statistics(self, worker_count: usize, timed_out: bool) -> SolverStatistics {
        let mut worker_nodes = self
            .worker_nodes
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        worker_nodes.resize(worker_nodes.len().max(worker_count), 0);
        SolverStatistics {
            elapsed: self.start_time.elapsed(),
            nodes_explored: self.nodes.load(Ordering::Relaxed),
            worker_nodes,
            nodes_pruned: self.pruned.load(Ordering::Relaxed),
            solutions_found: self.solutions.load(Ordering::Relaxed),
            worker_count,
            timed_out,
            improvements: self
                .improvements
                .into_inner()
                .unwrap_or_else(PoisonError::into_inner),
        }
    }
}

impl Default for StatisticsCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solver_statistics_new() {
        let stats = SolverStatistics::new();
        assert_eq!(stats.nodes_explored, 0);
        assert_eq!(stats.improvement_count(), 0);
        assert!(stats.best_objective().is_none());
        assert_eq!(stats.nodes_per_second(), 0);
    }

    #[test]
    fn test_collector_counts() {
        let collector = StatisticsCollector::new();
        collector.record_nodes(0, 10);
        collector.record_nodes(2, 5);
        collector.record_pruned(3);
        collector.record_solutions(2);

        let stats = collector.into_statistics(4, false);
        assert_eq!(stats.nodes_explored, 15);
        assert_eq!(stats.worker_nodes, vec![10, 0, 5, 0]);
        assert_eq!(stats.nodes_pruned, 3);
        assert_eq!(stats.solutions_found, 2);
        assert_eq!(stats.worker_count, 4);
        assert!(!stats.timed_out);
    }

    #[test]
    fn test_collector_improvements() {
        let collector = StatisticsCollector::new();
        collector.record_improvement(vec![3, 2], 1);
        collector.record_improvement(vec![2, 5], 0);

        let stats = collector.into_statistics(2, true);
        assert_eq!(stats.improvement_count(), 2);
        assert_eq!(stats.best_objective(), Some(&[2, 5][..]));
        assert_eq!(stats.improvements[0].worker, 1);
        assert!(stats.timed_out);
    }

    #[test]
    fn test_collector_thread_safety() {
        let collector = StatisticsCollector::new();

        rayon::scope(|s| {
            for worker in 0..4 {
                let collector = &collector;
                s.spawn(move |_| {
                    for _ in 0..100 {
                        collector.record_nodes(worker, 1);
                    }
                    collector.record_improvement(vec![worker as i64], worker);
                });
            }
        });

        let stats = collector.into_statistics(4, false);
        assert_eq!(stats.nodes_explored, 400);
        assert_eq!(stats.worker_nodes, vec![100; 4]);
        assert_eq!(stats.improvement_count(), 4);
    }
}
