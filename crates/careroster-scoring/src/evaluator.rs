//! Re-derivation of violations and metrics from an assignment list.

use std::collections::{HashMap, HashSet};

use careroster_core::{overlaps, Assignment, Caregiver, Visit};

use crate::error::{EvaluationError, Result};
use crate::report::{
    ConstraintViolations, Evaluation, MaxHoursViolation, OptimizationMetrics, OverlapViolation,
};

/// An assignment with both of its records resolved.
#[derive(Debug, Clone, Copy)]
struct Placement<'a> {
    assignment: &'a Assignment,
    visit_index: usize,
    visit: &'a Visit,
    caregiver_index: usize,
    caregiver: &'a Caregiver,
}

/// Evaluates an assignment list against the full visit and caregiver sets.
///
/// Pure: the same inputs always produce the same report.
///
/// # Errors
///
/// Returns [`EvaluationError::ReferentialIntegrity`] for the first
/// assignment naming a visit or caregiver id that is not in the inputs.
pub fn evaluate(
    assignments: &[Assignment],
    visits: &[Visit],
    caregivers: &[Caregiver],
) -> Result<Evaluation> {
    let placements = resolve(assignments, visits, caregivers)?;

    let constraint_violations = ConstraintViolations {
        unassigned_visits: unassigned_visits(&placements, visits),
        availability_violations: placements
            .iter()
            .filter(|p| !p.caregiver.is_available(p.visit))
            .map(|p| p.assignment.clone())
            .collect(),
        skill_violations: placements
            .iter()
            .filter(|p| !p.caregiver.has_skill(p.visit.required_skill()))
            .map(|p| p.assignment.clone())
            .collect(),
        duplicate_assignments: duplicate_assignments(&placements, visits.len()),
        overlap_violations: overlap_violations(&placements),
        max_hours_violations: max_hours_violations(&placements, caregivers),
    };

    let optimization_metrics = OptimizationMetrics {
        continuity_score: continuity_score(&placements),
        travel_efficiency_score: travel_efficiency_score(&placements),
    };

    Ok(Evaluation {
        constraint_violations,
        optimization_metrics,
    })
}

fn resolve<'a>(
    assignments: &'a [Assignment],
    visits: &'a [Visit],
    caregivers: &'a [Caregiver],
) -> Result<Vec<Placement<'a>>> {
    let visit_index: HashMap<&str, usize> =
        visits.iter().enumerate().map(|(i, v)| (v.id(), i)).collect();
    let caregiver_index: HashMap<&str, usize> = caregivers
        .iter()
        .enumerate()
        .map(|(i, c)| (c.id(), i))
        .collect();

    assignments
        .iter()
        .map(|assignment| {
            let visit_index = *visit_index
                .get(assignment.visit_id.as_str())
                .ok_or_else(|| EvaluationError::ReferentialIntegrity {
                    kind: "visit",
                    id: assignment.visit_id.clone(),
                })?;
            let caregiver_index = *caregiver_index
                .get(assignment.caregiver_id.as_str())
                .ok_or_else(|| EvaluationError::ReferentialIntegrity {
                    kind: "caregiver",
                    id: assignment.caregiver_id.clone(),
                })?;
            Ok(Placement {
                assignment,
                visit_index,
                visit: &visits[visit_index],
                caregiver_index,
                caregiver: &caregivers[caregiver_index],
            })
        })
        .collect()
}

fn unassigned_visits(placements: &[Placement<'_>], visits: &[Visit]) -> Vec<String> {
    let mut served = vec![false; visits.len()];
    for p in placements {
        served[p.visit_index] = true;
    }
    visits
        .iter()
        .zip(served)
        .filter(|(_, served)| !served)
        .map(|(visit, _)| visit.id().to_string())
        .collect()
}

fn duplicate_assignments(placements: &[Placement<'_>], visit_count: usize) -> Vec<String> {
    let mut seen = vec![0usize; visit_count];
    let mut duplicates = Vec::new();
    for p in placements {
        seen[p.visit_index] += 1;
        if seen[p.visit_index] == 2 {
            duplicates.push(p.assignment.visit_id.clone());
        }
    }
    duplicates
}

/// Groups items by key, keeping groups and members in first-seen order.
fn group_by<'p, K, F>(placements: &'p [Placement<'p>], key: F) -> Vec<Vec<&'p Placement<'p>>>
where
    K: std::hash::Hash + Eq,
    F: Fn(&Placement<'p>) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<Vec<&Placement<'p>>> = Vec::new();
    for p in placements {
        let next = groups.len();
        let slot = *index.entry(key(p)).or_insert(next);
        if slot == next {
            groups.push(Vec::new());
        }
        groups[slot].push(p);
    }
    groups
}

fn overlap_violations(placements: &[Placement<'_>]) -> Vec<OverlapViolation> {
    let mut violations = Vec::new();
    for group in group_by(placements, |p| p.caregiver_index) {
        for (i, first) in group.iter().enumerate() {
            for second in &group[i + 1..] {
                // Same visit twice is a duplicate, not an overlap
                if first.visit_index == second.visit_index {
                    continue;
                }
                if overlaps(first.visit, second.visit) {
                    violations.push(OverlapViolation {
                        caregiver_id: first.caregiver.id().to_string(),
                        conflicting_visits: [
                            first.assignment.visit_id.clone(),
                            second.assignment.visit_id.clone(),
                        ],
                    });
                }
            }
        }
    }
    violations
}

fn max_hours_violations(
    placements: &[Placement<'_>],
    caregivers: &[Caregiver],
) -> Vec<MaxHoursViolation> {
    let mut minutes = vec![0i64; caregivers.len()];
    for p in placements {
        minutes[p.caregiver_index] += p.visit.duration_minutes();
    }
    caregivers
        .iter()
        .zip(minutes)
        .filter_map(|(caregiver, minutes)| {
            let assigned_hours = minutes as f64 / 60.0;
            (assigned_hours > caregiver.max_hours()).then(|| MaxHoursViolation {
                caregiver_id: caregiver.id().to_string(),
                assigned_hours,
                max_hours: caregiver.max_hours(),
            })
        })
        .collect()
}

/// Mean per-customer continuity over customers with at least one
/// assignment.
///
/// A customer scores `1 - (distinct - 1) / (visits - 1)`: 1.0 when a single
/// caregiver (or a single visit) covers them, 0.0 when every visit has a
/// different caregiver. No assignments scores 0.0.
fn continuity_score(placements: &[Placement<'_>]) -> f64 {
    let groups = group_by(placements, |p| p.visit.customer());
    if groups.is_empty() {
        return 0.0;
    }
    let total: f64 = groups
        .iter()
        .map(|group| {
            let visits = group.len();
            if visits == 1 {
                return 1.0;
            }
            let distinct: HashSet<usize> = group.iter().map(|p| p.caregiver_index).collect();
            1.0 - (distinct.len() - 1) as f64 / (visits - 1) as f64
        })
        .sum();
    total / groups.len() as f64
}

/// `max(0, 1 - avg/2)` where `avg` is the mean number of neighborhood
/// switches per (caregiver, calendar day) with at least one assignment.
/// No assignments scores 0.0.
fn travel_efficiency_score(placements: &[Placement<'_>]) -> f64 {
    let groups = group_by(placements, |p| (p.caregiver_index, p.visit.date()));
    if groups.is_empty() {
        return 0.0;
    }
    let caregiver_days = groups.len();
    let switches: usize = groups
        .into_iter()
        .map(|mut day| {
            day.sort_by_key(|p| (p.visit.start(), p.visit_index));
            day.windows(2)
                .filter(|pair| pair[0].visit.neighborhood() != pair[1].visit.neighborhood())
                .count()
        })
        .sum();
    let average = switches as f64 / caregiver_days as f64;
    (1.0 - average / 2.0).max(0.0)
}
