//! Parallel branch-and-bound search.
//!
//! [`solve`] encodes the input and fixes forced decisions at the root: in
//! partial mode visits nobody can serve are skipped, in strict mode visits
//! with a single candidate are assigned. The tree is then expanded level by
//! level until there are eight subtrees per worker (or no open visits
//! remain). The subtrees, listed in depth-first order, are dealt
//! round-robin to `worker_count` workers on a dedicated rayon pool. Each
//! node:
//!
//! 1. Computes the partial objective vector, an optimistic bound since
//!    every objective metric only grows as decisions are added
//! 2. Prunes if the bound is lexicographically worse than the incumbent
//! 3. Picks the open visit with the smallest live domain (first-fail)
//! 4. Tries its caregivers in order of objective impact, forward-checking
//!    overlap and remaining capacity after each assignment
//!
//! Workers share the incumbent objective for pruning. When the search
//! completes, the result is the best objective found, ties going to the
//! lowest worker index and then to the first solution in that worker's DFS
//! order, so repeated runs return the same assignments.
//!
//! # Example
//!
//! ```
//! use careroster_config::SolverConfig;
//! use careroster_core::{Availability, Caregiver, Visit};
//! use careroster_solver::{solve, SolverStatus};
//!
//! let visits = vec![
//!     Visit::parse("V1", "2025-06-23 09:00", "2025-06-23 10:00", "C1", "care", "north").unwrap(),
//! ];
//! let caregivers = vec![
//!     Caregiver::new("CG1", "Alice", 20.0)
//!         .unwrap()
//!         .with_availability([Availability::parse("MONDAY", "08:00", "12:00").unwrap()])
//!         .with_skills(["care"]),
//! ];
//!
//! let result = solve(&visits, &caregivers, &SolverConfig::default());
//! assert_eq!(result.status, SolverStatus::Optimal);
//! assert_eq!(result.assignments.len(), 1);
//! ```

mod domains;
mod frontier;
mod incumbent;
mod state;
mod termination;
mod worker;

use std::fmt;

use careroster_config::SolverConfig;
use careroster_core::{Assignment, Caregiver, Visit};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::encoder::{encode, Aggregation, Decision, EncodedModel};
use crate::statistics::{SolverStatistics, StatisticsCollector};

pub use incumbent::SharedIncumbent;
pub use termination::Deadline;

use frontier::split;
use state::SearchState;
use worker::{Solution, Worker, WorkerOutcome};

/// Worker thread stack size. Search recursion is one frame per visit.
const WORKER_STACK_SIZE: usize = 64 * 1024 * 1024;

/// Subtrees handed to each worker by the root split.
const SUBTREES_PER_WORKER: usize = 8;

/// Outcome class of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverStatus {
    /// The search completed; no better objective exists.
    Optimal,
    /// A solution was found but the time budget ran out first.
    Feasible,
    /// The search completed without finding any solution.
    Infeasible,
    /// The time budget ran out before any solution was found.
    Unknown,
}

impl SolverStatus {
    /// Whether assignments accompany this status.
    pub fn has_solution(self) -> bool {
        matches!(self, SolverStatus::Optimal | SolverStatus::Feasible)
    }
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverStatus::Optimal => write!(f, "OPTIMAL"),
            SolverStatus::Feasible => write!(f, "FEASIBLE"),
            SolverStatus::Infeasible => write!(f, "INFEASIBLE"),
            SolverStatus::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Value of one objective term in the returned solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectiveValue {
    pub name: &'static str,
    pub aggregation: Aggregation,
    pub value: i64,
}

/// Result of [`solve`].
#[derive(Debug, Clone)]
pub struct SolveResult {
    /// One assignment per served visit, in visit input order. Empty unless
    /// the status carries a solution.
    pub assignments: Vec<Assignment>,
    pub status: SolverStatus,
    /// Objective terms in priority order. Empty without a solution.
    pub objective: Vec<ObjectiveValue>,
    pub statistics: SolverStatistics,
}

impl SolveResult {
    /// Looks up an objective term by name.
    pub fn objective_value(&self, name: &str) -> Option<i64> {
        self.objective
            .iter()
            .find(|term| term.name == name)
            .map(|term| term.value)
    }
}

/// Seeded tie-break ranks shared by every worker.
#[derive(Debug)]
pub(crate) struct SearchOrder {
    pub visit_rank: Vec<usize>,
    pub caregiver_rank: Vec<usize>,
}

impl SearchOrder {
    fn seeded(seed: u64, visits: usize, caregivers: usize) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self {
            visit_rank: random_ranks(&mut rng, visits),
            caregiver_rank: random_ranks(&mut rng, caregivers),
        }
    }
}

fn random_ranks(rng: &mut ChaCha8Rng, n: usize) -> Vec<usize> {
    let mut permutation: Vec<usize> = (0..n).collect();
    permutation.shuffle(rng);
    let mut rank = vec![0; n];
    for (position, &item) in permutation.iter().enumerate() {
        rank[item] = position;
    }
    rank
}

/// State shared by all workers of one solve.
pub(crate) struct SearchContext<'m, 'a> {
    pub model: &'m EncodedModel<'a>,
    pub order: SearchOrder,
    pub incumbent: SharedIncumbent,
    pub deadline: Deadline,
    pub statistics: StatisticsCollector,
    pub worker_count: usize,
}

/// Assigns visits to caregivers.
///
/// Never fails: an impossible roster is reported as
/// [`SolverStatus::Infeasible`], an exhausted time budget as
/// [`SolverStatus::Feasible`] or [`SolverStatus::Unknown`].
pub fn solve(visits: &[Visit], caregivers: &[Caregiver], config: &SolverConfig) -> SolveResult {
    let worker_count = config.worker_count.max(1);
    info!(
        event = "solve_start",
        visit_count = visits.len(),
        caregiver_count = caregivers.len(),
        coverage = ?config.coverage,
        worker_count,
        time_limit_secs = config.time_limit_seconds,
    );

    let statistics = StatisticsCollector::new();
    if visits.is_empty() {
        let statistics = statistics.into_statistics(worker_count, false);
        info!(
            event = "solve_end",
            status = %SolverStatus::Optimal,
            nodes = 0u64,
            duration_ms = statistics.elapsed.as_millis() as u64,
        );
        return SolveResult {
            assignments: Vec::new(),
            status: SolverStatus::Optimal,
            objective: Vec::new(),
            statistics,
        };
    }

    let model = encode(visits, caregivers, config);
    debug_assert!(model.validate().is_ok());
    debug!(
        event = "model_encoded",
        constraints = model.constraint_count(),
        overlap_pairs = model.overlap_pairs().len(),
        objectives = model.objectives().len(),
    );

    let context = SearchContext {
        model: &model,
        order: SearchOrder::seeded(config.random_seed, visits.len(), caregivers.len()),
        incumbent: SharedIncumbent::new(),
        deadline: Deadline::new(config.time_limit()),
        statistics,
        worker_count,
    };
    let mut root = SearchState::new(&model);
    let outcomes = if root.propagate(&model) {
        run_workers(&context, &root)
    } else {
        debug!(event = "root_infeasible");
        Vec::new()
    };

    let timed_out = context.deadline.is_expired();
    let proven = outcomes.iter().any(|outcome| outcome.reached_floor);
    let winner = best_solution(&outcomes);
    let status = match (winner.is_some(), timed_out && !proven) {
        (true, false) => SolverStatus::Optimal,
        (true, true) => SolverStatus::Feasible,
        (false, false) => SolverStatus::Infeasible,
        (false, true) => SolverStatus::Unknown,
    };

    let (assignments, objective) = match winner {
        Some(solution) => (
            decode(&model, &solution.decisions),
            model
                .objectives()
                .iter()
                .zip(&solution.objective)
                .map(|(term, &value)| ObjectiveValue {
                    name: term.name(),
                    aggregation: term.aggregation(),
                    value,
                })
                .collect(),
        ),
        None => (Vec::new(), Vec::new()),
    };

    let statistics = context.statistics.into_statistics(worker_count, timed_out);
    info!(
        event = "solve_end",
        status = %status,
        assigned = assignments.len(),
        nodes = statistics.nodes_explored,
        solutions = statistics.solutions_found,
        timed_out,
        duration_ms = statistics.elapsed.as_millis() as u64,
    );

    SolveResult {
        assignments,
        status,
        objective,
        statistics,
    }
}

fn run_workers(context: &SearchContext<'_, '_>, root: &SearchState) -> Vec<WorkerOutcome> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(context.worker_count)
        .stack_size(WORKER_STACK_SIZE)
        .thread_name(|i| format!("careroster-worker-{i}"))
        .build();

    match pool {
        Ok(pool) => pool.install(|| search(context, root)),
        Err(e) => {
            warn!(
                event = "pool_unavailable",
                error = %e,
                "running search workers on the global pool"
            );
            search(context, root)
        }
    }
}

fn search(context: &SearchContext<'_, '_>, root: &SearchState) -> Vec<WorkerOutcome> {
    let target = context.worker_count * SUBTREES_PER_WORKER;
    let subtrees = split(&mut root.clone(), context.model, &context.order, target);
    debug!(
        event = "tree_split",
        subtrees = subtrees.len(),
        depth = subtrees.iter().map(Vec::len).max().unwrap_or(0),
    );

    (0..context.worker_count)
        .into_par_iter()
        .map(|index| Worker::new(context, index, root.clone()).run(&subtrees))
        .collect()
}

/// Lowest objective wins; ties go to the lowest worker index.
fn best_solution(outcomes: &[WorkerOutcome]) -> Option<&Solution> {
    outcomes
        .iter()
        .filter_map(|outcome| outcome.best.as_ref().map(|best| (best, outcome.index)))
        .min_by(|(a, ia), (b, ib)| a.objective.cmp(&b.objective).then(ia.cmp(ib)))
        .map(|(best, _)| best)
}

/// Reads `x[c][v]` back into assignment records, in visit input order.
fn decode(model: &EncodedModel<'_>, decisions: &[Decision]) -> Vec<Assignment> {
    decisions
        .iter()
        .enumerate()
        .filter_map(|(v, decision)| {
            decision.caregiver().map(|c| {
                Assignment::new(model.visits()[v].id(), model.caregivers()[c].id())
            })
        })
        .collect()
}
