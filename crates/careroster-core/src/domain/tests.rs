//! Tests for domain records and predicates.

use chrono::Weekday;

use super::*;
use crate::error::DomainError;

fn visit(id: &str, start: &str, end: &str) -> Visit {
    Visit::parse(id, start, end, "Test Customer", "test", "test").unwrap()
}

fn monday_nine_to_five() -> Caregiver {
    Caregiver::new("CG1", "Alice", 40.0)
        .unwrap()
        .with_availability([Availability::parse("MONDAY", "09:00", "17:00").unwrap()])
        .with_skills(["test"])
}

#[test]
fn test_overlap_partial_start_and_end() {
    let base = visit("base", "2025-06-23 10:00", "2025-06-23 12:00");
    let early = visit("early", "2025-06-23 09:00", "2025-06-23 11:00");
    let late = visit("late", "2025-06-23 11:00", "2025-06-23 13:00");

    assert!(overlaps(&base, &early));
    assert!(overlaps(&early, &base));
    assert!(overlaps(&base, &late));
    assert!(overlaps(&late, &base));
}

#[test]
fn test_overlap_containment() {
    let base = visit("base", "2025-06-23 10:00", "2025-06-23 12:00");
    let containing = visit("containing", "2025-06-23 09:00", "2025-06-23 13:00");

    assert!(overlaps(&base, &containing));
    assert!(overlaps(&containing, &base));
}

#[test]
fn test_overlap_disjoint_and_touching() {
    let base = visit("base", "2025-06-23 10:00", "2025-06-23 12:00");
    let after = visit("after", "2025-06-23 13:00", "2025-06-23 14:00");
    let touching = visit("touching", "2025-06-23 12:00", "2025-06-23 13:00");

    assert!(!overlaps(&base, &after));
    assert!(!overlaps(&after, &base));
    assert!(!overlaps(&base, &touching));
    assert!(!overlaps(&touching, &base));
}

#[test]
fn test_overlap_identical_and_other_day() {
    let base = visit("base", "2025-06-23 10:00", "2025-06-23 12:00");
    let twin = visit("twin", "2025-06-23 10:00", "2025-06-23 12:00");
    let next_day = visit("next", "2025-06-24 10:00", "2025-06-24 12:00");

    assert!(overlaps(&base, &twin));
    assert!(!overlaps(&base, &next_day));
}

#[test]
fn test_overlap_symmetry_grid() {
    let hours = ["08:00", "09:00", "10:00", "11:00", "12:00"];
    let mut visits = Vec::new();
    for (i, start) in hours.iter().enumerate() {
        for end in &hours[i + 1..] {
            visits.push(visit(
                &format!("{start}-{end}"),
                &format!("2025-06-23 {start}"),
                &format!("2025-06-23 {end}"),
            ));
        }
    }

    for a in &visits {
        for b in &visits {
            assert_eq!(overlaps(a, b), overlaps(b, a), "{} vs {}", a.id(), b.id());
        }
    }
}

#[test]
fn test_availability_window() {
    let caregiver = monday_nine_to_five();

    // Monday 10-12 fits inside 9-17
    assert!(is_available(&caregiver, &visit("V1", "2025-06-23 10:00", "2025-06-23 12:00")));
    // Monday 18-20 is after the window
    assert!(!is_available(&caregiver, &visit("V2", "2025-06-23 18:00", "2025-06-23 20:00")));
    // Tuesday
    assert!(!is_available(&caregiver, &visit("V3", "2025-06-24 10:00", "2025-06-24 12:00")));
}

#[test]
fn test_availability_requires_full_containment() {
    let caregiver = monday_nine_to_five();

    assert!(is_available(&caregiver, &visit("edge", "2025-06-23 09:00", "2025-06-23 17:00")));
    assert!(!is_available(&caregiver, &visit("spill", "2025-06-23 16:00", "2025-06-23 18:00")));
    assert!(!is_available(&caregiver, &visit("early", "2025-06-23 08:30", "2025-06-23 09:30")));
}

#[test]
fn test_availability_multiple_windows_per_day() {
    let caregiver = Caregiver::new("CG2", "Bob", 20.0)
        .unwrap()
        .with_availability([
            Availability::parse("MONDAY", "08:00", "10:00").unwrap(),
            Availability::parse("MONDAY", "14:00", "18:00").unwrap(),
        ]);

    assert!(is_available(&caregiver, &visit("am", "2025-06-23 08:00", "2025-06-23 09:00")));
    assert!(is_available(&caregiver, &visit("pm", "2025-06-23 15:00", "2025-06-23 16:00")));
    // Straddles the gap between the two windows
    assert!(!is_available(&caregiver, &visit("gap", "2025-06-23 09:00", "2025-06-23 15:00")));
}

#[test]
fn test_can_serve_checks_skill() {
    let caregiver = monday_nine_to_five();
    let nursing =
        Visit::parse("V9", "2025-06-23 10:00", "2025-06-23 11:00", "C", "nursing", "x").unwrap();

    assert!(caregiver.is_available(&nursing));
    assert!(!caregiver.can_serve(&nursing));
}

#[test]
fn test_visit_rejects_non_positive_duration() {
    let err = Visit::parse("V1", "2025-06-23 12:00", "2025-06-23 12:00", "C", "s", "n")
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidInterval { .. }));

    let err = Visit::parse("V1", "2025-06-23 12:00", "2025-06-23 11:00", "C", "s", "n")
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidInterval { .. }));
}

#[test]
fn test_visit_rejects_midnight_span() {
    let err = Visit::parse("V1", "2025-06-23 22:00", "2025-06-24 01:00", "C", "s", "n")
        .unwrap_err();
    assert!(matches!(err, DomainError::SpansMidnight { .. }));
}

#[test]
fn test_visit_rejects_bad_timestamp_and_empty_id() {
    let err = Visit::parse("V1", "23/06/2025 10:00", "2025-06-23 11:00", "C", "s", "n")
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidTimestamp { .. }));

    let err = Visit::parse("", "2025-06-23 10:00", "2025-06-23 11:00", "C", "s", "n")
        .unwrap_err();
    assert!(matches!(err, DomainError::EmptyId { field: "visit" }));
}

#[test]
fn test_visit_accessors() {
    let v = visit("V1", "2025-06-25 08:15", "2025-06-25 09:45");
    assert_eq!(v.weekday(), Weekday::Wed);
    assert_eq!(v.duration_minutes(), 90);
    assert!((v.duration_hours() - 1.5).abs() < f64::EPSILON);
}

#[test]
fn test_weekday_tags() {
    assert_eq!(parse_weekday("SUNDAY").unwrap(), Weekday::Sun);
    assert!(matches!(
        parse_weekday("Monday"),
        Err(DomainError::UnknownWeekday(tag)) if tag == "Monday"
    ));
    assert!(parse_weekday("MON").is_err());
}

#[test]
fn test_availability_rejects_inverted_window() {
    let err = Availability::parse("MONDAY", "17:00", "09:00").unwrap_err();
    assert!(matches!(err, DomainError::InvalidInterval { .. }));

    let err = Availability::parse("MONDAY", "9am", "17:00").unwrap_err();
    assert!(matches!(err, DomainError::InvalidTime { .. }));
}

#[test]
fn test_caregiver_rejects_negative_hours() {
    let err = Caregiver::new("CG1", "Alice", -1.0).unwrap_err();
    assert!(matches!(err, DomainError::InvalidMaxHours { .. }));
    assert!(Caregiver::new("CG1", "Alice", f64::NAN).is_err());
    assert_eq!(Caregiver::new("CG1", "Alice", 7.5).unwrap().max_minutes(), 450);
}

#[test]
fn test_parse_visit_records() {
    let json = r#"[
        {"id": "V1", "start": "2025-06-23 09:00", "end": "2025-06-23 10:00",
         "customer": "C1", "required_skill": "meds", "neighborhood": "north"},
        {"id": "V2", "start": "2025-06-24 09:00", "end": "2025-06-24 11:00",
         "customer": "C1", "required_skill": "bathing", "neighborhood": "south"}
    ]"#;

    let visits = parse_visits(json).unwrap();
    assert_eq!(visits.len(), 2);
    assert_eq!(visits[1].customer(), "C1");
    assert_eq!(visits[1].duration_minutes(), 120);
    assert_eq!(visits[1].neighborhood(), "south");
}

#[test]
fn test_parse_visit_records_rejects_duplicates() {
    let json = r#"[
        {"id": "V1", "start": "2025-06-23 09:00", "end": "2025-06-23 10:00",
         "customer": "C1", "required_skill": "meds", "neighborhood": "north"},
        {"id": "V1", "start": "2025-06-24 09:00", "end": "2025-06-24 10:00",
         "customer": "C2", "required_skill": "meds", "neighborhood": "north"}
    ]"#;

    assert!(matches!(
        parse_visits(json),
        Err(DomainError::DuplicateId { kind: "visit", .. })
    ));
}

#[test]
fn test_parse_caregiver_records() {
    let json = r#"[
        {"id": "CG1", "name": "Alice", "max_hours": 40,
         "availability": [{"day": "MONDAY", "start": "08:00", "end": "16:00"},
                          {"day": "TUESDAY", "start": "08:00", "end": "12:00"}],
         "skills": ["meds", "bathing"]}
    ]"#;

    let caregivers = parse_caregivers(json).unwrap();
    assert_eq!(caregivers.len(), 1);
    let alice = &caregivers[0];
    assert_eq!(alice.name(), "Alice");
    assert_eq!(alice.availability().len(), 2);
    assert!(alice.has_skill("bathing"));
    assert!((alice.max_hours() - 40.0).abs() < f64::EPSILON);
}

#[test]
fn test_parse_caregiver_records_unknown_day() {
    let json = r#"[
        {"id": "CG1", "name": "Alice", "max_hours": 40,
         "availability": [{"day": "FUNDAY", "start": "08:00", "end": "16:00"}],
         "skills": []}
    ]"#;

    assert!(matches!(
        parse_caregivers(json),
        Err(DomainError::UnknownWeekday(_))
    ));
}

#[test]
fn test_parse_malformed_json() {
    assert!(matches!(parse_visits("{not json"), Err(DomainError::Json(_))));
}

#[test]
fn test_assignment_display() {
    assert_eq!(Assignment::new("V1", "CG1").to_string(), "V1 -> CG1");
}
