//! Serializable evaluation report.
//!
//! Field names follow the JSON report shape consumed by reporting tools.

use careroster_core::Assignment;
use serde::{Deserialize, Serialize};

/// Full evaluation of one schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub constraint_violations: ConstraintViolations,
    pub optimization_metrics: OptimizationMetrics,
}

impl Evaluation {
    /// True when any violation list is non-empty, uncovered visits included.
    pub fn has_hard_violations(&self) -> bool {
        !self.constraint_violations.is_empty()
    }

    /// Process exit code for a reporting tool: 0 if clean, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        i32::from(self.has_hard_violations())
    }
}

/// Hard-constraint violations found in a schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstraintViolations {
    /// Visits without any assignment, in visit input order.
    pub unassigned_visits: Vec<String>,
    /// Assignments outside every availability window of the caregiver.
    pub availability_violations: Vec<Assignment>,
    /// Assignments whose caregiver lacks the visit's required skill.
    #[serde(default)]
    pub skill_violations: Vec<Assignment>,
    /// Visits assigned more than once.
    #[serde(default)]
    pub duplicate_assignments: Vec<String>,
    pub overlap_violations: Vec<OverlapViolation>,
    pub max_hours_violations: Vec<MaxHoursViolation>,
}

impl ConstraintViolations {
    pub fn is_empty(&self) -> bool {
        self.unassigned_visits.is_empty()
            && self.availability_violations.is_empty()
            && self.skill_violations.is_empty()
            && self.duplicate_assignments.is_empty()
            && self.overlap_violations.is_empty()
            && self.max_hours_violations.is_empty()
    }

    /// Total number of reported violations.
    pub fn count(&self) -> usize {
        self.unassigned_visits.len()
            + self.availability_violations.len()
            + self.skill_violations.len()
            + self.duplicate_assignments.len()
            + self.overlap_violations.len()
            + self.max_hours_violations.len()
    }
}

/// Two overlapping visits given to the same caregiver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapViolation {
    pub caregiver_id: String,
    pub conflicting_visits: [String; 2],
}

/// A caregiver scheduled beyond their weekly hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxHoursViolation {
    pub caregiver_id: String,
    pub assigned_hours: f64,
    pub max_hours: f64,
}

/// Quality scores in `[0, 1]`, higher is better.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OptimizationMetrics {
    /// Mean over customers of `1 - (distinct - 1) / (visits - 1)`, so one
    /// caregiver across all of a customer's visits scores 1.0. This is not
    /// `1 - distinct / visits`: two visits by one caregiver score 1.0, not 0.5.
    pub continuity_score: f64,
    /// `max(0, 1 - avg / 2)` over neighborhood switches per caregiver-day.
    pub travel_efficiency_score: f64,
}
