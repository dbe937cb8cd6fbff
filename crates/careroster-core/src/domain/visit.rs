//! Visit - a single care appointment needing one caregiver

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};

use crate::error::{DomainError, Result};

/// Timestamp format used by visit records.
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A scheduled care appointment.
///
/// Start and end lie on the same calendar date and `end > start`.
///
/// # Examples
///
/// ```
/// use careroster_core::Visit;
/// use chrono::Weekday;
///
/// let visit = Visit::parse("V1", "2025-06-23 10:00", "2025-06-23 12:30", "C1", "meds", "east").unwrap();
/// assert_eq!(visit.weekday(), Weekday::Mon);
/// assert_eq!(visit.duration_minutes(), 150);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    id: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
    customer: String,
    required_skill: String,
    neighborhood: String,
}

impl Visit {
    /// Creates a visit, rejecting empty ids, non-positive durations and
    /// visits that cross midnight.
    pub fn new(
        id: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        customer: impl Into<String>,
        required_skill: impl Into<String>,
        neighborhood: impl Into<String>,
    ) -> Result<Self> {
        let id = id.into();
        let customer = customer.into();
        if id.is_empty() {
            return Err(DomainError::EmptyId { field: "visit" });
        }
        if customer.is_empty() {
            return Err(DomainError::EmptyId { field: "customer" });
        }
        if end <= start {
            return Err(DomainError::InvalidInterval {
                owner: format!("visit {id}"),
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        if end.date() != start.date() {
            return Err(DomainError::SpansMidnight {
                id,
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        Ok(Self {
            id,
            start,
            end,
            customer,
            required_skill: required_skill.into(),
            neighborhood: neighborhood.into(),
        })
    }

    /// Creates a visit from `YYYY-MM-DD HH:MM` timestamps.
    pub fn parse(
        id: impl Into<String>,
        start: &str,
        end: &str,
        customer: impl Into<String>,
        required_skill: impl Into<String>,
        neighborhood: impl Into<String>,
    ) -> Result<Self> {
        Self::new(
            id,
            parse_timestamp(start)?,
            parse_timestamp(end)?,
            customer,
            required_skill,
            neighborhood,
        )
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn customer(&self) -> &str {
        &self.customer
    }

    pub fn required_skill(&self) -> &str {
        &self.required_skill
    }

    pub fn neighborhood(&self) -> &str {
        &self.neighborhood
    }

    /// Calendar date the visit takes place on.
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Weekday of the visit start.
    pub fn weekday(&self) -> Weekday {
        self.start.weekday()
    }

    /// Visit length in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Visit length in hours.
    pub fn duration_hours(&self) -> f64 {
        self.duration_minutes() as f64 / 60.0
    }
}

pub(crate) fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|source| {
        DomainError::InvalidTimestamp {
            value: value.to_string(),
            source,
        }
    })
}
