//! End-to-end tests for the solve-then-verify pipeline.

use careroster::prelude::*;
use careroster::{CareRosterError, CoverageMode, SolverConfig};
use careroster_test::{caregiver, visit, Roster};

fn config() -> SolverConfig {
    SolverConfig::default()
        .with_time_limit_seconds(30)
        .with_worker_count(2)
}

#[test]
fn test_empty_roster_is_optimal_and_clean() {
    let plan = plan(&[], &[], &config()).unwrap();

    assert_eq!(plan.status, SolverStatus::Optimal);
    assert!(plan.assignments.is_empty());
    assert!(plan.evaluation.constraint_violations.is_empty());
    assert_eq!(plan.exit_code(), 0);
}

#[test]
fn test_overlapping_pair_strict_reports_unassigned() {
    let roster = Roster::overlapping_pair();
    let plan = plan(&roster.visits, &roster.caregivers, &config()).unwrap();

    assert_eq!(plan.status, SolverStatus::Infeasible);
    assert!(plan.assignments.is_empty());
    assert_eq!(
        plan.evaluation.constraint_violations.unassigned_visits,
        vec!["V1".to_string(), "V2".to_string()]
    );
    assert_eq!(plan.exit_code(), 1);
}

#[test]
fn test_overlapping_pair_partial_serves_one() {
    let roster = Roster::overlapping_pair();
    let config = config().with_coverage(CoverageMode::Partial);
    let plan = plan(&roster.visits, &roster.caregivers, &config).unwrap();

    assert_eq!(plan.status, SolverStatus::Optimal);
    assert_eq!(plan.assignments.len(), 1);
    let violations = &plan.evaluation.constraint_violations;
    assert_eq!(violations.unassigned_visits.len(), 1);
    assert!(violations.overlap_violations.is_empty());
    assert!(violations.availability_violations.is_empty());
}

#[test]
fn test_capacity_limit_is_respected() {
    let roster = Roster::over_capacity();
    let partial = config().with_coverage(CoverageMode::Partial);
    let plan = plan(&roster.visits, &roster.caregivers, &partial).unwrap();

    assert_eq!(plan.assignments.len(), 1);
    assert!(plan.evaluation.constraint_violations.max_hours_violations.is_empty());
}

#[test]
fn test_single_customer_keeps_one_caregiver() {
    let roster = Roster::single_customer_week();
    let plan = plan(&roster.visits, &roster.caregivers, &config()).unwrap();

    assert_eq!(plan.status, SolverStatus::Optimal);
    assert_eq!(plan.assignments.len(), 3);
    assert_eq!(plan.evaluation.optimization_metrics.continuity_score, 1.0);
    let first = &plan.assignments[0].caregiver_id;
    assert!(plan.assignments.iter().all(|a| &a.caregiver_id == first));
}

#[test]
fn test_travel_groups_neighborhoods() {
    let visits = vec![
        visit("V1", "2025-06-23 08:00", "2025-06-23 09:00")
            .customer("C1")
            .neighborhood("north")
            .build(),
        visit("V2", "2025-06-23 09:00", "2025-06-23 10:00")
            .customer("C2")
            .neighborhood("south")
            .build(),
        visit("V3", "2025-06-23 08:00", "2025-06-23 09:00")
            .customer("C3")
            .neighborhood("south")
            .build(),
        visit("V4", "2025-06-23 09:00", "2025-06-23 10:00")
            .customer("C4")
            .neighborhood("north")
            .build(),
    ];
    let caregivers = vec![
        caregiver("CG1").available_weekdays("07:00", "12:00").build(),
        caregiver("CG2").available_weekdays("07:00", "12:00").build(),
    ];
    let config = config().with_objectives([ObjectiveKind::TravelEfficiency]);

    let plan = plan(&visits, &caregivers, &config).unwrap();

    assert_eq!(plan.status, SolverStatus::Optimal);
    assert_eq!(plan.evaluation.optimization_metrics.travel_efficiency_score, 1.0);
}

#[test]
fn test_skill_mismatch_is_never_assigned() {
    let visits = vec![visit("V1", "2025-06-23 09:00", "2025-06-23 10:00")
        .skill("wound_care")
        .build()];
    let caregivers = vec![caregiver("CG1").available_weekdays("08:00", "18:00").build()];

    let plan = plan(&visits, &caregivers, &config()).unwrap();

    assert_eq!(plan.status, SolverStatus::Infeasible);
    assert!(plan.evaluation.constraint_violations.skill_violations.is_empty());
}

#[test]
fn test_report_json_shape() {
    let roster = Roster::single_customer_week();
    let plan = plan(&roster.visits, &roster.caregivers, &config()).unwrap();

    let json: serde_json::Value = serde_json::from_str(&plan.to_json().unwrap()).unwrap();
    assert_eq!(json["status"], "OPTIMAL");
    assert_eq!(json["assignments"].as_array().unwrap().len(), 3);
    assert_eq!(json["objective"]["continuity"], 1);
    assert!(json["evaluation"]["constraint_violations"]["overlap_violations"]
        .as_array()
        .unwrap()
        .is_empty());
    assert_eq!(
        json["evaluation"]["optimization_metrics"]["continuity_score"],
        1.0
    );
}

#[test]
fn test_error_display() {
    let err = CareRosterError::from(careroster::EvaluationError::ReferentialIntegrity {
        kind: "visit",
        id: "V9".to_string(),
    });
    assert!(err.to_string().starts_with("Evaluation failed"));
}

#[test]
fn test_init_tracing_is_idempotent() {
    careroster::init_tracing();
    careroster::init_tracing();
}
