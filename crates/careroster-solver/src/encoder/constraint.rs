//! Hard constraints over the `x[c][v]` decision space.

use std::fmt;

use careroster_config::CoverageMode;

/// Why a decision variable is fixed to false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ineligibility {
    /// No availability window contains the visit.
    Unavailable,
    /// The caregiver lacks the visit's required skill.
    MissingSkill,
}

/// A hard constraint of the encoded model.
///
/// Indices refer to positions in the visit and caregiver slices the
/// model was encoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// `sum_c x[c][visit] == 1` (strict) or `<= 1` (partial).
    Coverage { visit: usize, mode: CoverageMode },

    /// `x[caregiver][visit] == 0`.
    Ineligible {
        caregiver: usize,
        visit: usize,
        reason: Ineligibility,
    },

    /// `x[caregiver][first] + x[caregiver][second] <= 1` for two
    /// overlapping visits.
    NoOverlap {
        caregiver: usize,
        first: usize,
        second: usize,
    },

    /// `sum_v minutes[v] * x[caregiver][v] <= limit_minutes`.
    Capacity {
        caregiver: usize,
        limit_minutes: i64,
    },
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Coverage { visit, mode } => match mode {
                CoverageMode::Strict => write!(f, "exactly one caregiver for v{visit}"),
                CoverageMode::Partial => write!(f, "at most one caregiver for v{visit}"),
            },
            Constraint::Ineligible {
                caregiver,
                visit,
                reason,
            } => write!(f, "c{caregiver} cannot serve v{visit} ({reason:?})"),
            Constraint::NoOverlap {
                caregiver,
                first,
                second,
            } => write!(f, "c{caregiver} serves at most one of v{first}, v{second}"),
            Constraint::Capacity {
                caregiver,
                limit_minutes,
            } => write!(f, "c{caregiver} works at most {limit_minutes} minutes"),
        }
    }
}
