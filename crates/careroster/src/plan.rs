//! Solve-then-verify pipeline.

use std::collections::BTreeMap;

use careroster_config::SolverConfig;
use careroster_core::{parse_caregivers, parse_visits, Assignment, Caregiver, Visit};
use careroster_scoring::{evaluate, Evaluation};
use careroster_solver::{solve, ObjectiveValue, SolverStatistics, SolverStatus};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::Result;

/// A solved roster together with its independent evaluation.
#[derive(Debug, Clone)]
pub struct Plan {
    pub assignments: Vec<Assignment>,
    pub status: SolverStatus,
    pub objective: Vec<ObjectiveValue>,
    pub statistics: SolverStatistics,
    /// Re-derived from the assignments alone, not taken from the solver.
    pub evaluation: Evaluation,
}

impl Plan {
    /// Process exit code for this plan: 0 when the evaluation is clean.
    pub fn exit_code(&self) -> i32 {
        self.evaluation.exit_code()
    }

    /// Serializable summary of the plan.
    pub fn report(&self) -> PlanReport {
        PlanReport {
            status: self.status.to_string(),
            assignments: self.assignments.clone(),
            objective: self
                .objective
                .iter()
                .map(|term| (term.name.to_string(), term.value))
                .collect(),
            evaluation: self.evaluation.clone(),
        }
    }

    /// Pretty-printed JSON of [`report`](Self::report).
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.report())?)
    }
}

/// JSON shape of a plan.
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub status: String,
    pub assignments: Vec<Assignment>,
    pub objective: BTreeMap<String, i64>,
    pub evaluation: Evaluation,
}

/// Solves the roster, then evaluates the returned assignments.
///
/// An infeasible or timed-out search is not an error; it shows up in
/// [`Plan::status`] and as unassigned visits in the evaluation.
///
/// # Errors
///
/// Fails only if the evaluator cannot resolve an assignment the solver
/// produced.
pub fn plan(visits: &[Visit], caregivers: &[Caregiver], config: &SolverConfig) -> Result<Plan> {
    let result = solve(visits, caregivers, config);
    let evaluation = evaluate(&result.assignments, visits, caregivers)?;

    let violations = evaluation.constraint_violations.count();
    if result.status.has_solution() && violations > 0 {
        warn!(
            event = "plan_violations",
            status = %result.status,
            violations,
            unassigned = evaluation.constraint_violations.unassigned_visits.len(),
        );
    }
    info!(
        event = "plan_end",
        status = %result.status,
        assigned = result.assignments.len(),
        violations,
        continuity = evaluation.optimization_metrics.continuity_score,
        travel_efficiency = evaluation.optimization_metrics.travel_efficiency_score,
    );

    Ok(Plan {
        assignments: result.assignments,
        status: result.status,
        objective: result.objective,
        statistics: result.statistics,
        evaluation,
    })
}

/// Parses JSON visit and caregiver arrays, then runs [`plan`].
///
/// # Errors
///
/// Returns [`CareRosterError::Domain`](crate::CareRosterError::Domain) for
/// malformed or invalid records.
pub fn plan_json(visits_json: &str, caregivers_json: &str, config: &SolverConfig) -> Result<Plan> {
    let visits = parse_visits(visits_json)?;
    let caregivers = parse_caregivers(caregivers_json)?;
    plan(&visits, &caregivers, config)
}
