//! Objective terms for lexicographic optimization.
//!
//! An objective term pairs a [`GroupMetric`] (one quantity per group,
//! e.g. per customer) with an [`Aggregation`]. `MinimizeMax` is the minimax
//! formulation: an upper-bound variable constrained above every group value,
//! then minimized. `MinimizeSum` minimizes the total.
//!
//! The search engine only sees aggregated values, so new objectives are
//! added by implementing [`GroupMetric`].

use std::fmt::{self, Debug};

use smallvec::SmallVec;

use super::{Decision, EncodedModel};

/// How per-group values are combined into one objective value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aggregation {
    /// Minimize the largest group value.
    MinimizeMax,
    /// Minimize the sum of group values.
    MinimizeSum,
}

impl Aggregation {
    /// Combines group values. An empty group set aggregates to 0.
    pub fn apply(self, values: impl IntoIterator<Item = i64>) -> i64 {
        match self {
            Aggregation::MinimizeMax => values.into_iter().max().unwrap_or(0),
            Aggregation::MinimizeSum => values.into_iter().sum(),
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Aggregation::MinimizeMax => write!(f, "MinimizeMax"),
            Aggregation::MinimizeSum => write!(f, "MinimizeSum"),
        }
    }
}

/// A per-group quantity derived from assignment decisions.
///
/// Implementations must be monotone: adding a decision never lowers any
/// group value. Branch-and-bound relies on this to use partial values as
/// optimistic bounds.
pub trait GroupMetric: Send + Sync + Debug {
    /// Short identifier used in logs and results.
    fn name(&self) -> &'static str;

    /// One value per group for the decisions made so far.
    fn group_values(&self, model: &EncodedModel<'_>, decisions: &[Decision]) -> Vec<i64>;

    /// Per-group lower bounds holding for every complete solution.
    fn group_floors(&self, model: &EncodedModel<'_>) -> Vec<i64> {
        let _ = model;
        Vec::new()
    }

    /// Estimated increase if `visit` were assigned to `caregiver`.
    ///
    /// Used only to order values during search.
    fn marginal(
        &self,
        model: &EncodedModel<'_>,
        decisions: &[Decision],
        visit: usize,
        caregiver: usize,
    ) -> i64;
}

/// A metric paired with its aggregation.
#[derive(Debug)]
pub struct ObjectiveTerm {
    metric: Box<dyn GroupMetric>,
    aggregation: Aggregation,
}

impl ObjectiveTerm {
    pub fn new(metric: impl GroupMetric + 'static, aggregation: Aggregation) -> Self {
        Self {
            metric: Box::new(metric),
            aggregation,
        }
    }

    pub fn minimize_max(metric: impl GroupMetric + 'static) -> Self {
        Self::new(metric, Aggregation::MinimizeMax)
    }

    pub fn minimize_sum(metric: impl GroupMetric + 'static) -> Self {
        Self::new(metric, Aggregation::MinimizeSum)
    }

    pub fn name(&self) -> &'static str {
        self.metric.name()
    }

    pub fn aggregation(&self) -> Aggregation {
        self.aggregation
    }

    pub fn evaluate(&self, model: &EncodedModel<'_>, decisions: &[Decision]) -> i64 {
        self.aggregation
            .apply(self.metric.group_values(model, decisions))
    }

    pub fn floor(&self, model: &EncodedModel<'_>) -> i64 {
        self.aggregation.apply(self.metric.group_floors(model))
    }

    pub fn marginal(
        &self,
        model: &EncodedModel<'_>,
        decisions: &[Decision],
        visit: usize,
        caregiver: usize,
    ) -> i64 {
        self.metric.marginal(model, decisions, visit, caregiver)
    }
}

/// Number of visits deliberately left uncovered. Single group.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnassignedVisits;

impl GroupMetric for UnassignedVisits {
    fn name(&self) -> &'static str {
        "unassigned_visits"
    }

    fn group_values(&self, _model: &EncodedModel<'_>, decisions: &[Decision]) -> Vec<i64> {
        let skipped = decisions
            .iter()
            .filter(|d| matches!(d, Decision::Skipped))
            .count();
        vec![skipped as i64]
    }

    fn marginal(&self, _: &EncodedModel<'_>, _: &[Decision], _: usize, _: usize) -> i64 {
        0
    }
}

/// Distinct caregivers serving each customer (continuity of care).
#[derive(Debug, Clone, Copy, Default)]
pub struct CaregiversPerCustomer;

impl GroupMetric for CaregiversPerCustomer {
    fn name(&self) -> &'static str {
        "continuity"
    }

    fn group_values(&self, model: &EncodedModel<'_>, decisions: &[Decision]) -> Vec<i64> {
        (0..model.customer_count())
            .map(|customer| {
                let mut seen: SmallVec<[usize; 8]> = model
                    .customer_visits(customer)
                    .iter()
                    .filter_map(|&v| decisions[v].caregiver())
                    .collect();
                seen.sort_unstable();
                seen.dedup();
                seen.len() as i64
            })
            .collect()
    }

    fn group_floors(&self, model: &EncodedModel<'_>) -> Vec<i64> {
        // Each customer exists because it has a visit, which needs a caregiver
        vec![1; model.customer_count()]
    }

    fn marginal(
        &self,
        model: &EncodedModel<'_>,
        decisions: &[Decision],
        visit: usize,
        caregiver: usize,
    ) -> i64 {
        let already = model
            .customer_visits(model.customer_of(visit))
            .iter()
            .any(|&v| decisions[v] == Decision::Assigned(caregiver));
        i64::from(!already)
    }
}

/// Neighborhood changes between consecutive visits of each caregiver-day.
///
/// Groups are (caregiver, calendar day) pairs with at least one visit.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeighborhoodSwitches;

impl GroupMetric for NeighborhoodSwitches {
    fn name(&self) -> &'static str {
        "travel_efficiency"
    }

    fn group_values(&self, model: &EncodedModel<'_>, decisions: &[Decision]) -> Vec<i64> {
        let m = model.caregiver_count();
        let mut values = Vec::new();
        let mut last: Vec<Option<usize>> = vec![None; m];
        let mut switches: Vec<i64> = vec![0; m];

        for day in 0..model.day_count() {
            last.iter_mut().for_each(|slot| *slot = None);
            switches.iter_mut().for_each(|count| *count = 0);

            for &v in model.day_visits(day) {
                let Some(c) = decisions[v].caregiver() else {
                    continue;
                };
                let here = model.neighborhood_of(v);
                if let Some(previous) = last[c] {
                    if previous != here {
                        switches[c] += 1;
                    }
                }
                last[c] = Some(here);
            }

            for c in 0..m {
                if last[c].is_some() {
                    values.push(switches[c]);
                }
            }
        }
        values
    }

    fn marginal(
        &self,
        model: &EncodedModel<'_>,
        decisions: &[Decision],
        visit: usize,
        caregiver: usize,
    ) -> i64 {
        let day = model.day_visits(model.day_of(visit));
        let position = day.iter().position(|&v| v == visit).unwrap_or(0);
        let served = |v: usize| decisions[v] == Decision::Assigned(caregiver);

        let before = day[..position].iter().rev().find(|&&v| served(v));
        let after = day[position + 1..].iter().find(|&&v| served(v));

        let here = model.neighborhood_of(visit);
        let differs = |v: usize| i64::from(model.neighborhood_of(v) != here);
        match (before, after) {
            (Some(&b), Some(&a)) => {
                let bridged = i64::from(model.neighborhood_of(b) != model.neighborhood_of(a));
                differs(b) + differs(a) - bridged
            }
            (Some(&b), None) => differs(b),
            (None, Some(&a)) => differs(a),
            (None, None) => 0,
        }
    }
}
