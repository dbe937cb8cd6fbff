//! Caregiver - a person who can be assigned visits

use std::collections::BTreeSet;

use super::availability::Availability;
use super::visit::Visit;
use crate::error::{DomainError, Result};

/// A caregiver with weekly capacity, availability windows and skills.
#[derive(Debug, Clone, PartialEq)]
pub struct Caregiver {
    id: String,
    name: String,
    max_hours: f64,
    availability: Vec<Availability>,
    skills: BTreeSet<String>,
}

impl Caregiver {
    /// Creates a caregiver with no availability and no skills.
    ///
    /// `max_hours` must be finite and non-negative.
    pub fn new(id: impl Into<String>, name: impl Into<String>, max_hours: f64) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(DomainError::EmptyId { field: "caregiver" });
        }
        if !max_hours.is_finite() || max_hours < 0.0 {
            return Err(DomainError::InvalidMaxHours {
                id,
                value: max_hours,
            });
        }
        Ok(Self {
            id,
            name: name.into(),
            max_hours,
            availability: Vec::new(),
            skills: BTreeSet::new(),
        })
    }

    pub fn with_availability(mut self, windows: impl IntoIterator<Item = Availability>) -> Self {
        self.availability.extend(windows);
        self
    }

    pub fn with_skills(mut self, skills: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for skill in skills {
            self.skills.insert(skill.into());
        }
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_hours(&self) -> f64 {
        self.max_hours
    }

    /// Weekly capacity in whole minutes, rounded down.
    pub fn max_minutes(&self) -> i64 {
        (self.max_hours * 60.0).floor() as i64
    }

    pub fn availability(&self) -> &[Availability] {
        &self.availability
    }

    pub fn skills(&self) -> &BTreeSet<String> {
        &self.skills
    }

    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.contains(skill)
    }

    /// True if one availability window fully contains the visit.
    pub fn is_available(&self, visit: &Visit) -> bool {
        self.availability.iter().any(|window| window.covers(visit))
    }

    /// Skill match and availability together: the eligibility rule.
    pub fn can_serve(&self, visit: &Visit) -> bool {
        self.has_skill(visit.required_skill()) && self.is_available(visit)
    }
}
