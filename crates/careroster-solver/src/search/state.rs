//! Decisions, live domains and remaining capacity at one search node.

use careroster_config::CoverageMode;
use smallvec::SmallVec;

use super::domains::Domains;
use super::SearchOrder;
use crate::encoder::{Decision, EncodedModel};

/// A branching option for one visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Choice {
    Serve(usize),
    Skip,
}

/// Mutable search state. Changes made through [`apply`](Self::apply) are
/// reverted by [`retract`](Self::retract) with the mark taken before them.
#[derive(Debug, Clone)]
pub(crate) struct SearchState {
    pub domains: Domains,
    pub decisions: Vec<Decision>,
    /// Unassigned minutes per caregiver.
    pub remaining: Vec<i64>,
}

impl SearchState {
    pub fn new(model: &EncodedModel<'_>) -> Self {
        Self {
            domains: Domains::new(model),
            decisions: vec![Decision::Open; model.visit_count()],
            remaining: (0..model.caregiver_count())
                .map(|c| model.capacity(c))
                .collect(),
        }
    }

    /// Fixes forced decisions until none are left.
    ///
    /// Under partial coverage a visit without live caregivers is skipped.
    /// Under strict coverage a visit with a single live caregiver is
    /// assigned to it; skipping is not an option there, so the assignment
    /// is forced. Returns false if strict coverage is already impossible.
    pub fn propagate(&mut self, model: &EncodedModel<'_>) -> bool {
        let strict = model.coverage() == CoverageMode::Strict;
        loop {
            let mut changed = false;
            for visit in 0..model.visit_count() {
                if self.decisions[visit] != Decision::Open {
                    continue;
                }
                let choice = match (self.domains.size(visit), strict) {
                    (0, true) => return false,
                    (0, false) => Choice::Skip,
                    (1, true) => match self.domains.values(visit).next() {
                        Some(caregiver) => Choice::Serve(caregiver),
                        None => return false,
                    },
                    _ => continue,
                };
                if !self.apply(model, visit, choice) {
                    return false;
                }
                changed = true;
            }
            if !changed {
                return true;
            }
        }
    }

    /// Makes a decision and forward-checks it. Returns false if some open
    /// visit is left without a caregiver under strict coverage.
    pub fn apply(&mut self, model: &EncodedModel<'_>, visit: usize, choice: Choice) -> bool {
        let caregiver = match choice {
            Choice::Skip => {
                self.decisions[visit] = Decision::Skipped;
                return true;
            }
            Choice::Serve(c) => c,
        };

        self.decisions[visit] = Decision::Assigned(caregiver);
        self.remaining[caregiver] -= model.duration(visit);
        let strict = model.coverage() == CoverageMode::Strict;

        for &other in model.conflicts(visit) {
            if self.prune_value(other, caregiver) && strict && self.domains.size(other) == 0 {
                return false;
            }
        }

        let left = self.remaining[caregiver];
        for other in 0..model.visit_count() {
            if model.duration(other) > left
                && self.prune_value(other, caregiver)
                && strict
                && self.domains.size(other) == 0
            {
                return false;
            }
        }
        true
    }

    /// Removes `caregiver` from an open visit's domain.
    fn prune_value(&mut self, visit: usize, caregiver: usize) -> bool {
        self.decisions[visit] == Decision::Open && self.domains.remove(visit, caregiver)
    }

    pub fn retract(&mut self, model: &EncodedModel<'_>, visit: usize, choice: Choice, mark: usize) {
        if let Choice::Serve(caregiver) = choice {
            self.remaining[caregiver] += model.duration(visit);
        }
        self.decisions[visit] = Decision::Open;
        self.domains.undo(mark);
    }

    /// First-fail: the open visit with the fewest live caregivers, ties
    /// broken by the seeded visit rank.
    pub fn select_visit(&self, order: &SearchOrder) -> Option<usize> {
        (0..self.decisions.len())
            .filter(|&v| self.decisions[v] == Decision::Open)
            .min_by_key(|&v| (self.domains.size(v), order.visit_rank[v]))
    }

    /// Live caregivers ordered by objective impact, term by term in
    /// priority order, then by seeded rank. Skipping comes last.
    pub fn ordered_choices(
        &self,
        model: &EncodedModel<'_>,
        order: &SearchOrder,
        visit: usize,
    ) -> Vec<Choice> {
        let mut keyed: Vec<(SmallVec<[i64; 4]>, usize, usize)> = self
            .domains
            .values(visit)
            .map(|c| {
                let impact = model
                    .objectives()
                    .iter()
                    .map(|term| term.marginal(model, &self.decisions, visit, c))
                    .collect();
                (impact, order.caregiver_rank[c], c)
            })
            .collect();
        keyed.sort_unstable();

        let mut choices: Vec<Choice> = keyed
            .into_iter()
            .map(|(_, _, c)| Choice::Serve(c))
            .collect();
        if model.coverage() == CoverageMode::Partial {
            choices.push(Choice::Skip);
        }
        choices
    }
}
