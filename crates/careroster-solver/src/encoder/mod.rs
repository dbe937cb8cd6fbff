//! Constraint encoder.
//!
//! Turns visits and caregivers into an N x M boolean decision space
//! `x[c][v]` ("caregiver c serves visit v"), the hard constraints over it
//! and the lexicographic objective terms.
//!
//! # Hard constraints
//!
//! - **Coverage**: exactly one (strict) or at most one (partial) caregiver per visit
//! - **Eligibility**: `x[c][v]` fixed false unless c is available and skilled
//! - **Non-overlap**: a caregiver serves at most one of two overlapping visits
//! - **Capacity**: assigned minutes per caregiver stay within `max_hours`
//!
//! Overlapping pairs come from an interval sweep over visits sorted by
//! start, so only pairs that actually overlap produce constraints.

mod constraint;
mod objective;

use std::collections::HashMap;

use careroster_config::{CoverageMode, ObjectiveKind, SolverConfig, TravelAggregation};
use careroster_core::{overlaps, Caregiver, Visit};
use thiserror::Error;

pub use constraint::{Constraint, Ineligibility};
pub use objective::{
    Aggregation, CaregiversPerCustomer, GroupMetric, NeighborhoodSwitches, ObjectiveTerm,
    UnassignedVisits,
};

/// State of one visit's decision during search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Decision {
    /// Not decided yet.
    #[default]
    Open,
    /// Served by the caregiver at this index.
    Assigned(usize),
    /// Deliberately left uncovered (partial coverage only).
    Skipped,
}

impl Decision {
    pub fn caregiver(self) -> Option<usize> {
        match self {
            Decision::Assigned(c) => Some(c),
            _ => None,
        }
    }
}

/// Inconsistency found by [`EncodedModel::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("constraint references visit {0} outside the model")]
    UnknownVisit(usize),

    #[error("constraint references caregiver {0} outside the model")]
    UnknownCaregiver(usize),

    #[error("no-overlap constraint on non-overlapping visits {0} and {1}")]
    SpuriousOverlap(usize, usize),

    #[error("visit {0} lists caregiver {1} as candidate but x[c][v] is fixed false")]
    IneligibleCandidate(usize, usize),
}

/// The encoded decision problem for one solve.
///
/// Borrows the input records; owns every derived index.
#[derive(Debug)]
pub struct EncodedModel<'a> {
    visits: &'a [Visit],
    caregivers: &'a [Caregiver],
    coverage: CoverageMode,
    /// `eligible[c][v]`: false means `x[c][v]` is fixed to 0.
    eligible: Vec<Vec<bool>>,
    candidates: Vec<Vec<usize>>,
    conflicts: Vec<Vec<usize>>,
    overlap_pairs: Vec<(usize, usize)>,
    durations: Vec<i64>,
    capacities: Vec<i64>,
    customer_of: Vec<usize>,
    customer_visits: Vec<Vec<usize>>,
    day_of: Vec<usize>,
    day_visits: Vec<Vec<usize>>,
    neighborhood_of: Vec<usize>,
    /// Descriptive only; see [`EncodedModel::constraints`].
    constraints: Vec<Constraint>,
    objectives: Vec<ObjectiveTerm>,
}

/// Encodes visits and caregivers under the given configuration.
///
/// Objective terms follow `config.objectives` order. In partial coverage
/// mode an [`UnassignedVisits`] term is placed first so that coverage is
/// maximized before any quality objective.
pub fn encode<'a>(
    visits: &'a [Visit],
    caregivers: &'a [Caregiver],
    config: &SolverConfig,
) -> EncodedModel<'a> {
    let n = visits.len();
    let m = caregivers.len();
    let mut constraints = Vec::new();

    for visit in 0..n {
        constraints.push(Constraint::Coverage {
            visit,
            mode: config.coverage,
        });
    }

    let mut eligible = vec![vec![false; n]; m];
    for (c, caregiver) in caregivers.iter().enumerate() {
        for (v, visit) in visits.iter().enumerate() {
            let reason = if !caregiver.has_skill(visit.required_skill()) {
                Some(Ineligibility::MissingSkill)
            } else if !caregiver.is_available(visit) {
                Some(Ineligibility::Unavailable)
            } else {
                None
            };
            match reason {
                None => eligible[c][v] = true,
                Some(reason) => constraints.push(Constraint::Ineligible {
                    caregiver: c,
                    visit: v,
                    reason,
                }),
            }
        }
    }

    let candidates: Vec<Vec<usize>> = (0..n)
        .map(|v| (0..m).filter(|&c| eligible[c][v]).collect())
        .collect();

    let overlap_pairs = sweep_overlaps(visits);
    let mut conflicts = vec![Vec::new(); n];
    for &(a, b) in &overlap_pairs {
        conflicts[a].push(b);
        conflicts[b].push(a);
        for c in 0..m {
            if eligible[c][a] && eligible[c][b] {
                constraints.push(Constraint::NoOverlap {
                    caregiver: c,
                    first: a,
                    second: b,
                });
            }
        }
    }

    let capacities: Vec<i64> = caregivers.iter().map(Caregiver::max_minutes).collect();
    for (caregiver, &limit_minutes) in capacities.iter().enumerate() {
        constraints.push(Constraint::Capacity {
            caregiver,
            limit_minutes,
        });
    }

    let (customer_of, customer_visits) = index_by(visits, |v| v.customer().to_string());
    let (day_of, mut day_visits) = index_by(visits, |v| v.date());
    for day in &mut day_visits {
        day.sort_by_key(|&v| (visits[v].start(), v));
    }
    let (neighborhood_of, _) = index_by(visits, |v| v.neighborhood().to_string());

    let mut objectives = Vec::new();
    if config.coverage == CoverageMode::Partial {
        objectives.push(ObjectiveTerm::minimize_sum(UnassignedVisits));
    }
    for kind in &config.objectives {
        objectives.push(match kind {
            ObjectiveKind::Continuity => ObjectiveTerm::minimize_max(CaregiversPerCustomer),
            ObjectiveKind::TravelEfficiency => match config.travel_aggregation {
                TravelAggregation::Sum => ObjectiveTerm::minimize_sum(NeighborhoodSwitches),
                TravelAggregation::Max => ObjectiveTerm::minimize_max(NeighborhoodSwitches),
            },
        });
    }

    EncodedModel {
        visits,
        caregivers,
        coverage: config.coverage,
        eligible,
        candidates,
        conflicts,
        overlap_pairs,
        durations: visits.iter().map(Visit::duration_minutes).collect(),
        capacities,
        customer_of,
        customer_visits,
        day_of,
        day_visits,
        neighborhood_of,
        constraints,
        objectives,
    }
}

impl<'a> EncodedModel<'a> {
    pub fn visits(&self) -> &'a [Visit] {
        self.visits
    }

    pub fn caregivers(&self) -> &'a [Caregiver] {
        self.caregivers
    }

    pub fn visit_count(&self) -> usize {
        self.visits.len()
    }

    pub fn caregiver_count(&self) -> usize {
        self.caregivers.len()
    }

    /// The active coverage mode.
    pub fn coverage(&self) -> CoverageMode {
        self.coverage
    }

    /// Whether `x[caregiver][visit]` may be true.
    pub fn is_eligible(&self, caregiver: usize, visit: usize) -> bool {
        self.eligible[caregiver][visit]
    }

    /// Eligible caregivers for a visit, ascending.
    pub fn candidates(&self, visit: usize) -> &[usize] {
        &self.candidates[visit]
    }

    /// Visits that overlap the given one in time.
    pub fn conflicts(&self, visit: usize) -> &[usize] {
        &self.conflicts[visit]
    }

    /// All overlapping visit pairs `(a, b)` with `a < b`, sorted.
    pub fn overlap_pairs(&self) -> &[(usize, usize)] {
        &self.overlap_pairs
    }

    pub fn duration(&self, visit: usize) -> i64 {
        self.durations[visit]
    }

    /// Weekly capacity of a caregiver in minutes.
    pub fn capacity(&self, caregiver: usize) -> i64 {
        self.capacities[caregiver]
    }

    pub fn customer_of(&self, visit: usize) -> usize {
        self.customer_of[visit]
    }

    pub fn customer_count(&self) -> usize {
        self.customer_visits.len()
    }

    /// Visits of one customer, in input order.
    pub fn customer_visits(&self, customer: usize) -> &[usize] {
        &self.customer_visits[customer]
    }

    pub fn day_of(&self, visit: usize) -> usize {
        self.day_of[visit]
    }

    pub fn day_count(&self) -> usize {
        self.day_visits.len()
    }

    /// Visits on one calendar day, ordered by start.
    pub fn day_visits(&self, day: usize) -> &[usize] {
        &self.day_visits[day]
    }

    pub fn neighborhood_of(&self, visit: usize) -> usize {
        self.neighborhood_of[visit]
    }

    /// Descriptive list of every hard constraint, used by
    /// [`validate`](Self::validate), logging and inspection. The search
    /// reads the derived eligibility, conflict and capacity indices instead.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Objective terms in lexicographic priority order.
    pub fn objectives(&self) -> &[ObjectiveTerm] {
        &self.objectives
    }

    /// Objective vector of a (possibly partial) set of decisions.
    ///
    /// Every term is monotone non-decreasing as decisions are added, so
    /// this is also an optimistic bound for any completion.
    pub fn objective_vector(&self, decisions: &[Decision]) -> Vec<i64> {
        self.objectives
            .iter()
            .map(|term| term.evaluate(self, decisions))
            .collect()
    }

    /// Lexicographic lower bound that no complete solution can beat.
    pub fn objective_floor(&self) -> Vec<i64> {
        self.objectives.iter().map(|term| term.floor(self)).collect()
    }

    /// Checks that every constraint and index refers to a real visit or
    /// caregiver and that derived indices agree with the constraints.
    pub fn validate(&self) -> Result<(), ModelError> {
        let n = self.visit_count();
        let m = self.caregiver_count();
        let check_visit = |v: usize| {
            if v < n {
                Ok(())
            } else {
                Err(ModelError::UnknownVisit(v))
            }
        };
        let check_caregiver = |c: usize| {
            if c < m {
                Ok(())
            } else {
                Err(ModelError::UnknownCaregiver(c))
            }
        };

        for constraint in &self.constraints {
            match *constraint {
                Constraint::Coverage { visit, .. } => check_visit(visit)?,
                Constraint::Ineligible {
                    caregiver, visit, ..
                } => {
                    check_caregiver(caregiver)?;
                    check_visit(visit)?;
                }
                Constraint::NoOverlap {
                    caregiver,
                    first,
                    second,
                } => {
                    check_caregiver(caregiver)?;
                    check_visit(first)?;
                    check_visit(second)?;
                    if !overlaps(&self.visits[first], &self.visits[second]) {
                        return Err(ModelError::SpuriousOverlap(first, second));
                    }
                }
                Constraint::Capacity { caregiver, .. } => check_caregiver(caregiver)?,
            }
        }

        for (v, candidates) in self.candidates.iter().enumerate() {
            for &c in candidates {
                check_caregiver(c)?;
                if !self.eligible[c][v] {
                    return Err(ModelError::IneligibleCandidate(v, c));
                }
            }
        }
        Ok(())
    }
}

/// Finds every overlapping visit pair with a sweep over start times.
fn sweep_overlaps(visits: &[Visit]) -> Vec<(usize, usize)> {
    let mut order: Vec<usize> = (0..visits.len()).collect();
    order.sort_by_key(|&v| (visits[v].start(), v));

    let mut active: Vec<usize> = Vec::new();
    let mut pairs = Vec::new();
    for &v in &order {
        let start = visits[v].start();
        active.retain(|&a| visits[a].end() > start);
        for &a in &active {
            pairs.push((a.min(v), a.max(v)));
        }
        active.push(v);
    }
    pairs.sort_unstable();
    pairs
}

/// Assigns dense indices to distinct keys in first-seen order.
fn index_by<K, F>(visits: &[Visit], key: F) -> (Vec<usize>, Vec<Vec<usize>>)
where
    K: std::hash::Hash + Eq,
    F: Fn(&Visit) -> K,
{
    let mut ids: HashMap<K, usize> = HashMap::new();
    let mut of = Vec::with_capacity(visits.len());
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for (v, visit) in visits.iter().enumerate() {
        let next = groups.len();
        let id = *ids.entry(key(visit)).or_insert(next);
        if id == next {
            groups.push(Vec::new());
        }
        groups[id].push(v);
        of.push(id);
    }
    (of, groups)
}

#[cfg(test)]
mod tests;
