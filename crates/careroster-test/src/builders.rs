//! Builders for domain records.
//!
//! Builders panic on invalid input: fixtures are expected to be valid.

use careroster_core::{Availability, Caregiver, Visit};

/// Skill given to visits and caregivers unless a test overrides it.
pub const DEFAULT_SKILL: &str = "personal_care";

const WEEKDAYS: [&str; 5] = ["MONDAY", "TUESDAY", "WEDNESDAY", "THURSDAY", "FRIDAY"];
const ALL_DAYS: [&str; 7] = [
    "MONDAY",
    "TUESDAY",
    "WEDNESDAY",
    "THURSDAY",
    "FRIDAY",
    "SATURDAY",
    "SUNDAY",
];

/// Starts a visit with `YYYY-MM-DD HH:MM` timestamps.
pub fn visit(id: &str, start: &str, end: &str) -> VisitBuilder {
    VisitBuilder {
        id: id.to_string(),
        start: start.to_string(),
        end: end.to_string(),
        customer: "C1".to_string(),
        skill: DEFAULT_SKILL.to_string(),
        neighborhood: "north".to_string(),
    }
}

/// Starts a caregiver with 40 weekly hours, the default skill and no
/// availability.
pub fn caregiver(id: &str) -> CaregiverBuilder {
    CaregiverBuilder {
        id: id.to_string(),
        name: format!("Caregiver {id}"),
        max_hours: 40.0,
        windows: Vec::new(),
        skills: vec![DEFAULT_SKILL.to_string()],
    }
}

#[derive(Debug, Clone)]
pub struct VisitBuilder {
    id: String,
    start: String,
    end: String,
    customer: String,
    skill: String,
    neighborhood: String,
}

impl VisitBuilder {
    pub fn customer(mut self, customer: &str) -> Self {
        self.customer = customer.to_string();
        self
    }

    pub fn skill(mut self, skill: &str) -> Self {
        self.skill = skill.to_string();
        self
    }

    pub fn neighborhood(mut self, neighborhood: &str) -> Self {
        self.neighborhood = neighborhood.to_string();
        self
    }

    pub fn build(self) -> Visit {
        Visit::parse(
            &self.id,
            &self.start,
            &self.end,
            self.customer,
            self.skill,
            self.neighborhood,
        )
        .unwrap_or_else(|e| panic!("invalid fixture visit {}: {e}", self.id))
    }
}

#[derive(Debug, Clone)]
pub struct CaregiverBuilder {
    id: String,
    name: String,
    max_hours: f64,
    windows: Vec<(String, String, String)>,
    skills: Vec<String>,
}

impl CaregiverBuilder {
    pub fn max_hours(mut self, hours: f64) -> Self {
        self.max_hours = hours;
        self
    }

    /// Adds one availability window, e.g. `("MONDAY", "08:00", "12:00")`.
    pub fn available(mut self, day: &str, start: &str, end: &str) -> Self {
        self.windows
            .push((day.to_string(), start.to_string(), end.to_string()));
        self
    }

    /// Adds the same window on Monday through Friday.
    pub fn available_weekdays(self, start: &str, end: &str) -> Self {
        WEEKDAYS
            .iter()
            .fold(self, |builder, day| builder.available(day, start, end))
    }

    /// Available 00:00-23:59 every day of the week.
    pub fn always_available(self) -> Self {
        ALL_DAYS
            .iter()
            .fold(self, |builder, day| builder.available(day, "00:00", "23:59"))
    }

    /// Replaces the skill set.
    pub fn skills(mut self, skills: &[&str]) -> Self {
        self.skills = skills.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn build(self) -> Caregiver {
        let windows = self.windows.iter().map(|(day, start, end)| {
            Availability::parse(day, start, end)
                .unwrap_or_else(|e| panic!("invalid fixture window for {}: {e}", self.id))
        });
        let windows: Vec<Availability> = windows.collect();
        Caregiver::new(&self.id, &self.name, self.max_hours)
            .unwrap_or_else(|e| panic!("invalid fixture caregiver {}: {e}", self.id))
            .with_availability(windows)
            .with_skills(self.skills)
    }
}
