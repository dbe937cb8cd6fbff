//! Independent evaluation of CareRoster schedules.
//!
//! [`evaluate`] re-derives every hard-constraint violation and both quality
//! metrics from a plain list of assignments. It only uses the domain
//! records, never solver internals, so it can check any schedule: one from
//! the solver, a hand-made one, or one loaded from disk.
//!
//! # Example
//!
//! ```
//! use careroster_core::{Assignment, Availability, Caregiver, Visit};
//! use careroster_scoring::evaluate;
//!
//! let visits = vec![
//!     Visit::parse("V1", "2025-06-23 09:00", "2025-06-23 10:00", "C1", "care", "north").unwrap(),
//!     Visit::parse("V2", "2025-06-24 09:00", "2025-06-24 10:00", "C1", "care", "north").unwrap(),
//! ];
//! let caregivers = vec![
//!     Caregiver::new("CG1", "Alice", 20.0)
//!         .unwrap()
//!         .with_availability([Availability::parse("MONDAY", "08:00", "12:00").unwrap()])
//!         .with_skills(["care"]),
//! ];
//! let assignments = vec![Assignment::new("V1", "CG1")];
//!
//! let evaluation = evaluate(&assignments, &visits, &caregivers).unwrap();
//! assert_eq!(evaluation.constraint_violations.unassigned_visits, vec!["V2"]);
//! assert_eq!(evaluation.exit_code(), 1);
//! ```

pub mod error;
pub mod evaluator;
pub mod report;

pub use error::{EvaluationError, Result};
pub use evaluator::evaluate;
pub use report::{
    ConstraintViolations, Evaluation, MaxHoursViolation, OptimizationMetrics, OverlapViolation,
};
