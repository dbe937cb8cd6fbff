//! Serde record types mirroring the JSON input shapes.
//!
//! Records carry raw strings; converting them into domain values
//! validates every field. Loading files is left to callers, these
//! helpers only decode already-read JSON text.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::availability::Availability;
use super::caregiver::Caregiver;
use super::visit::{parse_timestamp, Visit};
use crate::error::{DomainError, Result};

/// Raw visit record: `{id, start, end, customer, required_skill, neighborhood}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    pub id: String,
    /// `YYYY-MM-DD HH:MM`
    pub start: String,
    /// `YYYY-MM-DD HH:MM`
    pub end: String,
    pub customer: String,
    pub required_skill: String,
    pub neighborhood: String,
}

/// Raw availability record: `{day, start, end}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRecord {
    /// Uppercase weekday name, e.g. `MONDAY`.
    pub day: String,
    /// `HH:MM`
    pub start: String,
    /// `HH:MM`
    pub end: String,
}

/// Raw caregiver record: `{id, name, max_hours, availability, skills}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaregiverRecord {
    pub id: String,
    pub name: String,
    pub max_hours: f64,
    #[serde(default)]
    pub availability: Vec<AvailabilityRecord>,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl TryFrom<VisitRecord> for Visit {
    type Error = DomainError;

    fn try_from(record: VisitRecord) -> Result<Self> {
        Visit::new(
            record.id,
            parse_timestamp(&record.start)?,
            parse_timestamp(&record.end)?,
            record.customer,
            record.required_skill,
            record.neighborhood,
        )
    }
}

impl TryFrom<AvailabilityRecord> for Availability {
    type Error = DomainError;

    fn try_from(record: AvailabilityRecord) -> Result<Self> {
        Availability::parse(&record.day, &record.start, &record.end)
    }
}

impl TryFrom<CaregiverRecord> for Caregiver {
    type Error = DomainError;

    fn try_from(record: CaregiverRecord) -> Result<Self> {
        let windows = record
            .availability
            .into_iter()
            .map(Availability::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(Caregiver::new(record.id, record.name, record.max_hours)?
            .with_availability(windows)
            .with_skills(record.skills))
    }
}

/// Decodes a JSON array of visit records into validated visits.
///
/// Fails on the first malformed record or on a repeated id.
///
/// ```
/// use careroster_core::parse_visits;
///
/// let visits = parse_visits(r#"[{"id": "V1", "start": "2025-06-23 09:00",
///     "end": "2025-06-23 10:00", "customer": "C1",
///     "required_skill": "meds", "neighborhood": "north"}]"#).unwrap();
/// assert_eq!(visits[0].id(), "V1");
/// ```
pub fn parse_visits(json: &str) -> Result<Vec<Visit>> {
    let records: Vec<VisitRecord> = serde_json::from_str(json)?;
    let visits = records
        .into_iter()
        .map(Visit::try_from)
        .collect::<Result<Vec<_>>>()?;
    ensure_unique("visit", visits.iter().map(Visit::id))?;
    Ok(visits)
}

/// Decodes a JSON array of caregiver records into validated caregivers.
pub fn parse_caregivers(json: &str) -> Result<Vec<Caregiver>> {
    let records: Vec<CaregiverRecord> = serde_json::from_str(json)?;
    let caregivers = records
        .into_iter()
        .map(Caregiver::try_from)
        .collect::<Result<Vec<_>>>()?;
    ensure_unique("caregiver", caregivers.iter().map(Caregiver::id))?;
    Ok(caregivers)
}

fn ensure_unique<'a>(kind: &'static str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(DomainError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}
