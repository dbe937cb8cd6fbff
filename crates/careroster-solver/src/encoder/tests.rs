//! Tests for the constraint encoder and objective terms.

use careroster_config::{CoverageMode, ObjectiveKind, SolverConfig, TravelAggregation};
use careroster_test::{caregiver, visit, Roster};

use super::*;

fn count<F: Fn(&Constraint) -> bool>(model: &EncodedModel<'_>, pred: F) -> usize {
    model.constraints().iter().filter(|c| pred(c)).count()
}

#[test]
fn test_encode_counts() {
    let roster = Roster::overlapping_pair();
    let model = encode(&roster.visits, &roster.caregivers, &SolverConfig::default());

    assert_eq!(model.visit_count(), 2);
    assert_eq!(model.caregiver_count(), 1);
    assert_eq!(model.coverage(), CoverageMode::Strict);
    assert_eq!(count(&model, |c| matches!(c, Constraint::Coverage { .. })), 2);
    assert_eq!(count(&model, |c| matches!(c, Constraint::Ineligible { .. })), 0);
    assert_eq!(count(&model, |c| matches!(c, Constraint::NoOverlap { .. })), 1);
    assert_eq!(count(&model, |c| matches!(c, Constraint::Capacity { .. })), 1);
    assert_eq!(model.constraint_count(), 4);
    assert!(model.validate().is_ok());
}

#[test]
fn test_sweep_finds_only_real_overlaps() {
    let visits = vec![
        visit("A", "2025-06-23 09:00", "2025-06-23 10:00").build(),
        visit("B", "2025-06-23 10:00", "2025-06-23 11:00").build(),
        visit("C", "2025-06-23 09:30", "2025-06-23 12:00").build(),
        visit("D", "2025-06-24 09:30", "2025-06-24 12:00").build(),
    ];
    let caregivers = vec![caregiver("CG1").available_weekdays("08:00", "18:00").build()];
    let model = encode(&visits, &caregivers, &SolverConfig::default());

    // A and B only touch; D is on another day
    assert_eq!(model.overlap_pairs(), &[(0, 2), (1, 2)]);
    assert_eq!(model.conflicts(2), &[0, 1]);
    assert!(model.conflicts(3).is_empty());
}

#[test]
fn test_sweep_matches_pairwise_overlaps() {
    let roster = careroster_test::random_roster(11, careroster_test::RosterShape::default());
    let model = encode(&roster.visits, &roster.caregivers, &SolverConfig::default());

    let mut expected = Vec::new();
    for a in 0..roster.visits.len() {
        for b in a + 1..roster.visits.len() {
            if overlaps(&roster.visits[a], &roster.visits[b]) {
                expected.push((a, b));
            }
        }
    }
    assert_eq!(model.overlap_pairs(), expected.as_slice());
}

#[test]
fn test_no_overlap_only_for_caregivers_eligible_for_both() {
    let visits = vec![
        visit("V1", "2025-06-23 09:00", "2025-06-23 11:00").build(),
        visit("V2", "2025-06-23 10:00", "2025-06-23 12:00").build(),
    ];
    let caregivers = vec![
        caregiver("CG1").available_weekdays("08:00", "18:00").build(),
        caregiver("CG2").available("MONDAY", "08:00", "11:00").build(),
    ];
    let model = encode(&visits, &caregivers, &SolverConfig::default());

    let no_overlap: Vec<_> = model
        .constraints()
        .iter()
        .filter(|c| matches!(c, Constraint::NoOverlap { .. }))
        .collect();
    assert_eq!(
        no_overlap,
        vec![&Constraint::NoOverlap {
            caregiver: 0,
            first: 0,
            second: 1
        }]
    );
}

#[test]
fn test_eligibility_reasons() {
    let visits = vec![
        visit("V1", "2025-06-23 09:00", "2025-06-23 10:00").build(),
        visit("V2", "2025-06-28 09:00", "2025-06-28 10:00").build(),
        visit("V3", "2025-06-23 13:00", "2025-06-23 14:00")
            .skill("medication")
            .build(),
    ];
    let caregivers = vec![caregiver("CG1").available_weekdays("08:00", "18:00").build()];
    let model = encode(&visits, &caregivers, &SolverConfig::default());

    assert!(model.is_eligible(0, 0));
    assert!(!model.is_eligible(0, 1));
    assert!(!model.is_eligible(0, 2));
    assert_eq!(model.candidates(0), &[0]);
    assert!(model.candidates(1).is_empty());

    assert!(model.constraints().contains(&Constraint::Ineligible {
        caregiver: 0,
        visit: 1,
        reason: Ineligibility::Unavailable,
    }));
    assert!(model.constraints().contains(&Constraint::Ineligible {
        caregiver: 0,
        visit: 2,
        reason: Ineligibility::MissingSkill,
    }));
}

#[test]
fn test_durations_and_capacities() {
    let roster = Roster::over_capacity();
    let model = encode(&roster.visits, &roster.caregivers, &SolverConfig::default());

    assert_eq!(model.duration(0), 300);
    assert_eq!(model.duration(1), 300);
    assert_eq!(model.capacity(0), 480);
    assert!(model.constraints().contains(&Constraint::Capacity {
        caregiver: 0,
        limit_minutes: 480
    }));
}

#[test]
fn test_group_indices() {
    let visits = vec![
        visit("V1", "2025-06-23 11:00", "2025-06-23 12:00")
            .customer("C1")
            .neighborhood("north")
            .build(),
        visit("V2", "2025-06-24 09:00", "2025-06-24 10:00")
            .customer("C2")
            .neighborhood("south")
            .build(),
        visit("V3", "2025-06-23 08:00", "2025-06-23 09:00")
            .customer("C1")
            .neighborhood("south")
            .build(),
    ];
    let model = encode(&visits, &[], &SolverConfig::default());

    assert_eq!(model.customer_count(), 2);
    assert_eq!(model.customer_visits(0), &[0, 2]);
    assert_eq!(model.customer_of(1), 1);
    assert_eq!(model.day_count(), 2);
    // Ordered by start, not input order
    assert_eq!(model.day_visits(model.day_of(0)), &[2, 0]);
    assert_eq!(model.neighborhood_of(1), model.neighborhood_of(2));
    assert_ne!(model.neighborhood_of(0), model.neighborhood_of(2));
}

#[test]
fn test_default_objectives() {
    let roster = Roster::single_customer_week();
    let model = encode(&roster.visits, &roster.caregivers, &SolverConfig::default());

    let terms: Vec<_> = model
        .objectives()
        .iter()
        .map(|t| (t.name(), t.aggregation()))
        .collect();
    assert_eq!(
        terms,
        vec![
            ("continuity", Aggregation::MinimizeMax),
            ("travel_efficiency", Aggregation::MinimizeSum),
        ]
    );
}

#[test]
fn test_partial_mode_prepends_unassigned_term() {
    let roster = Roster::single_customer_week();
    let config = SolverConfig::new()
        .with_coverage(CoverageMode::Partial)
        .with_objectives([ObjectiveKind::TravelEfficiency])
        .with_travel_aggregation(TravelAggregation::Max);
    let model = encode(&roster.visits, &roster.caregivers, &config);

    let terms: Vec<_> = model
        .objectives()
        .iter()
        .map(|t| (t.name(), t.aggregation()))
        .collect();
    assert_eq!(
        terms,
        vec![
            ("unassigned_visits", Aggregation::MinimizeSum),
            ("travel_efficiency", Aggregation::MinimizeMax),
        ]
    );
    assert_eq!(
        count(&model, |c| matches!(
            c,
            Constraint::Coverage {
                mode: CoverageMode::Partial,
                ..
            }
        )),
        3
    );
}

#[test]
fn test_no_objectives() {
    let roster = Roster::single_customer_week();
    let config = SolverConfig::new().with_objectives(Vec::new());
    let model = encode(&roster.visits, &roster.caregivers, &config);

    assert!(model.objectives().is_empty());
    assert!(model.objective_vector(&[Decision::Open; 3]).is_empty());
    assert!(model.objective_floor().is_empty());
}

#[test]
fn test_continuity_vector() {
    let roster = Roster::single_customer_week();
    let model = encode(&roster.visits, &roster.caregivers, &SolverConfig::default());

    let same = [Decision::Assigned(0); 3];
    let spread = [
        Decision::Assigned(0),
        Decision::Assigned(1),
        Decision::Assigned(2),
    ];
    assert_eq!(model.objective_vector(&same), vec![1, 0]);
    assert_eq!(model.objective_vector(&spread), vec![3, 0]);
    assert_eq!(model.objective_floor(), vec![1, 0]);
}

#[test]
fn test_objective_vector_is_monotone() {
    let roster = Roster::single_customer_week();
    let model = encode(&roster.visits, &roster.caregivers, &SolverConfig::default());

    let mut decisions = [Decision::Open; 3];
    let mut previous = model.objective_vector(&decisions);
    for (v, c) in [(0, 0), (1, 1), (2, 2)] {
        decisions[v] = Decision::Assigned(c);
        let next = model.objective_vector(&decisions);
        assert!(next >= previous);
        previous = next;
    }
}

#[test]
fn test_travel_switches_per_caregiver_day() {
    let visits = vec![
        visit("V1", "2025-06-23 08:00", "2025-06-23 09:00")
            .neighborhood("north")
            .build(),
        visit("V2", "2025-06-23 10:00", "2025-06-23 11:00")
            .neighborhood("south")
            .build(),
        visit("V3", "2025-06-23 12:00", "2025-06-23 13:00")
            .neighborhood("north")
            .build(),
        visit("V4", "2025-06-24 12:00", "2025-06-24 13:00")
            .neighborhood("east")
            .build(),
    ];
    let caregivers = vec![
        caregiver("CG1").available_weekdays("07:00", "19:00").build(),
        caregiver("CG2").available_weekdays("07:00", "19:00").build(),
    ];
    let config = SolverConfig::new().with_objectives([ObjectiveKind::TravelEfficiency]);
    let model = encode(&visits, &caregivers, &config);

    let zigzag = [Decision::Assigned(0); 4];
    assert_eq!(model.objective_vector(&zigzag), vec![2]);

    let split = [
        Decision::Assigned(0),
        Decision::Assigned(1),
        Decision::Assigned(0),
        Decision::Assigned(0),
    ];
    assert_eq!(model.objective_vector(&split), vec![0]);
}

#[test]
fn test_travel_marginal() {
    let visits = vec![
        visit("V1", "2025-06-23 08:00", "2025-06-23 09:00")
            .neighborhood("north")
            .build(),
        visit("V2", "2025-06-23 10:00", "2025-06-23 11:00")
            .neighborhood("south")
            .build(),
        visit("V3", "2025-06-23 12:00", "2025-06-23 13:00")
            .neighborhood("north")
            .build(),
    ];
    let caregivers = vec![caregiver("CG1").available_weekdays("07:00", "19:00").build()];
    let config = SolverConfig::new().with_objectives([ObjectiveKind::TravelEfficiency]);
    let model = encode(&visits, &caregivers, &config);
    let term = &model.objectives()[0];

    let decisions = [Decision::Assigned(0), Decision::Open, Decision::Assigned(0)];
    // north -> south -> north adds two switches to a day with none
    assert_eq!(term.marginal(&model, &decisions, 1, 0), 2);

    let decisions = [Decision::Assigned(0), Decision::Open, Decision::Open];
    assert_eq!(term.marginal(&model, &decisions, 2, 0), 0);
    assert_eq!(term.marginal(&model, &decisions, 1, 0), 1);
}

#[test]
fn test_continuity_marginal() {
    let roster = Roster::single_customer_week();
    let model = encode(&roster.visits, &roster.caregivers, &SolverConfig::default());
    let term = &model.objectives()[0];

    let decisions = [Decision::Assigned(1), Decision::Open, Decision::Open];
    assert_eq!(term.marginal(&model, &decisions, 1, 1), 0);
    assert_eq!(term.marginal(&model, &decisions, 1, 0), 1);
}

#[test]
fn test_unassigned_term_counts_skips() {
    let roster = Roster::overlapping_pair();
    let config = SolverConfig::new()
        .with_coverage(CoverageMode::Partial)
        .with_objectives(Vec::new());
    let model = encode(&roster.visits, &roster.caregivers, &config);

    assert_eq!(
        model.objective_vector(&[Decision::Assigned(0), Decision::Skipped]),
        vec![1]
    );
    assert_eq!(model.objective_floor(), vec![0]);
}

#[test]
fn test_aggregation_apply() {
    assert_eq!(Aggregation::MinimizeMax.apply([3, 1, 2]), 3);
    assert_eq!(Aggregation::MinimizeSum.apply([3, 1, 2]), 6);
    assert_eq!(Aggregation::MinimizeMax.apply(Vec::new()), 0);
    assert_eq!(Aggregation::MinimizeSum.apply(Vec::new()), 0);
}

#[test]
fn test_empty_model() {
    let model = encode(&[], &[], &SolverConfig::default());
    assert_eq!(model.visit_count(), 0);
    assert_eq!(model.constraint_count(), 0);
    assert_eq!(model.objective_vector(&[]), vec![0, 0]);
    assert_eq!(model.objective_floor(), vec![0, 0]);
    assert!(model.validate().is_ok());
}

#[test]
fn test_constraint_display() {
    let constraint = Constraint::NoOverlap {
        caregiver: 1,
        first: 0,
        second: 3,
    };
    assert_eq!(constraint.to_string(), "c1 serves at most one of v0, v3");
}
