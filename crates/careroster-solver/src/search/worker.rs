//! Depth-first branch-and-bound over visit decisions.

use std::cmp::Ordering;

use tracing::debug;

use super::frontier::Subtree;
use super::state::SearchState;
use super::SearchContext;
use crate::encoder::{Decision, EncodedModel};

/// Nodes between clock reads.
const DEADLINE_CHECK_INTERVAL: u64 = 128;

/// A complete assignment and its objective vector.
#[derive(Debug, Clone)]
pub(crate) struct Solution {
    pub objective: Vec<i64>,
    pub decisions: Vec<Decision>,
}

/// What a worker hands back when it stops.
#[derive(Debug)]
pub(crate) struct WorkerOutcome {
    pub index: usize,
    pub best: Option<Solution>,
    pub reached_floor: bool,
}

/// One search thread.
///
/// Every worker receives the same subtree list and explores subtrees
/// `index, index + workers, ...` in list order.
pub(crate) struct Worker<'c, 'a> {
    context: &'c SearchContext<'c, 'a>,
    model: &'c EncodedModel<'a>,
    index: usize,
    state: SearchState,
    floor: Vec<i64>,
    known: Option<(Vec<i64>, usize)>,
    known_version: u64,
    best: Option<Solution>,
    nodes: u64,
    pruned: u64,
    solutions: u64,
    stopped: bool,
    reached_floor: bool,
}

impl<'c, 'a> Worker<'c, 'a> {
    pub fn new(context: &'c SearchContext<'c, 'a>, index: usize, state: SearchState) -> Self {
        let model = context.model;
        Self {
            context,
            model,
            index,
            state,
            floor: model.objective_floor(),
            known: None,
            known_version: 0,
            best: None,
            nodes: 0,
            pruned: 0,
            solutions: 0,
            stopped: false,
            reached_floor: false,
        }
    }

    pub fn run(mut self, subtrees: &[Subtree]) -> WorkerOutcome {
        let workers = self.context.worker_count;
        for subtree in subtrees.iter().skip(self.index).step_by(workers) {
            if self.should_stop() {
                break;
            }
            self.descend(subtree);
        }
        self.finish()
    }

    fn finish(self) -> WorkerOutcome {
        let statistics = &self.context.statistics;
        statistics.record_nodes(self.index, self.nodes);
        statistics.record_pruned(self.pruned);
        statistics.record_solutions(self.solutions);
        debug!(
            event = "worker_end",
            worker = self.index,
            nodes = self.nodes,
            solutions = self.solutions,
            reached_floor = self.reached_floor,
        );
        WorkerOutcome {
            index: self.index,
            best: self.best,
            reached_floor: self.reached_floor,
        }
    }

    /// Replays a subtree's decisions, searches below them, then undoes them.
    fn descend(&mut self, subtree: &Subtree) {
        let model = self.model;
        let mark = self.state.domains.mark();
        let mut applied = 0;
        let mut consistent = true;
        for &(visit, choice) in subtree {
            applied += 1;
            if !self.state.apply(model, visit, choice) {
                consistent = false;
                break;
            }
        }
        if consistent {
            self.explore();
        }
        for &(visit, choice) in subtree[..applied].iter().rev() {
            self.state.retract(model, visit, choice, mark);
        }
    }

    fn explore(&mut self) {
        if self.should_stop() {
            return;
        }
        self.nodes += 1;
        self.refresh_incumbent();

        let bound = self.model.objective_vector(&self.state.decisions);
        if self.is_pruned(&bound) {
            self.pruned += 1;
            return;
        }

        let context = self.context;
        let model = self.model;
        let Some(visit) = self.state.select_visit(&context.order) else {
            self.record(bound);
            return;
        };

        for choice in self.state.ordered_choices(model, &context.order, visit) {
            if self.stopped {
                break;
            }
            let mark = self.state.domains.mark();
            if self.state.apply(model, visit, choice) {
                self.explore();
            }
            self.state.retract(model, visit, choice, mark);
        }
    }

    fn should_stop(&mut self) -> bool {
        if self.stopped {
            return true;
        }
        let deadline = &self.context.deadline;
        let expired = if self.nodes % DEADLINE_CHECK_INTERVAL == 0 {
            deadline.check()
        } else {
            deadline.is_expired()
        };
        self.stopped = expired || self.context.incumbent.is_outranked(self.index);
        self.stopped
    }

    fn refresh_incumbent(&mut self) {
        let version = self.context.incumbent.version();
        if version != self.known_version {
            self.known = self.context.incumbent.snapshot();
            self.known_version = version;
        }
    }

    /// A node is cut when its optimistic bound cannot beat this worker's
    /// own best, or cannot win the merge against the global best.
    fn is_pruned(&self, bound: &[i64]) -> bool {
        if let Some(own) = &self.best {
            if bound >= own.objective.as_slice() {
                return true;
            }
        }
        match &self.known {
            Some((global, owner)) => match bound.cmp(global.as_slice()) {
                Ordering::Greater => true,
                Ordering::Equal => *owner < self.index,
                Ordering::Less => false,
            },
            None => false,
        }
    }

    fn record(&mut self, objective: Vec<i64>) {
        self.solutions += 1;
        if self.context.incumbent.offer(&objective, self.index) {
            debug!(
                event = "solution_improved",
                worker = self.index,
                objective = ?objective,
                nodes = self.nodes,
            );
            self.context
                .statistics
                .record_improvement(objective.clone(), self.index);
        }

        if objective == self.floor {
            self.reached_floor = true;
            self.stopped = true;
            self.context.incumbent.claim_floor(self.index);
        }
        self.best = Some(Solution {
            objective,
            decisions: self.state.decisions.clone(),
        });
    }
}
