//! CareRoster - Home-care visit scheduling
//!
//! Assigns visits to caregivers with an exact, parallel branch-and-bound
//! search, then checks the result with an evaluator that trusts nothing
//! the solver says.
//!
//! # Example
//!
//! ```
//! use careroster::prelude::*;
//!
//! let visits = parse_visits(r#"[
//!     {"id": "V1", "start": "2025-06-23 09:00", "end": "2025-06-23 10:00",
//!      "customer": "C1", "required_skill": "care", "neighborhood": "north"}
//! ]"#).unwrap();
//! let caregivers = parse_caregivers(r#"[
//!     {"id": "CG1", "name": "Alice", "max_hours": 20,
//!      "availability": [{"day": "MONDAY", "start": "08:00", "end": "12:00"}],
//!      "skills": ["care"]}
//! ]"#).unwrap();
//!
//! let plan = plan(&visits, &caregivers, &SolverConfig::default()).unwrap();
//! assert_eq!(plan.status, SolverStatus::Optimal);
//! assert_eq!(plan.evaluation.exit_code(), 0);
//! ```

mod console;
mod error;
mod plan;

pub use console::init_tracing;
pub use error::{CareRosterError, Result};
pub use plan::{plan, plan_json, Plan, PlanReport};

pub use careroster_config::{
    ConfigError, CoverageMode, ObjectiveKind, SolverConfig, TravelAggregation,
};
pub use careroster_core::{
    is_available, overlaps, parse_caregivers, parse_visits, Assignment, Availability, Caregiver,
    DomainError, Visit,
};
pub use careroster_scoring::{
    evaluate, ConstraintViolations, Evaluation, EvaluationError, MaxHoursViolation,
    OptimizationMetrics, OverlapViolation,
};
pub use careroster_solver::{solve, ObjectiveValue, SolveResult, SolverStatistics, SolverStatus};

/// Lower-level access to the encoder and search internals.
pub mod engine {
    pub use careroster_solver::encoder;
    pub use careroster_solver::search;
    pub use careroster_solver::statistics;
}

pub mod prelude {
    pub use super::{parse_caregivers, parse_visits, plan, Plan};
    pub use super::{Assignment, Availability, Caregiver, Visit};
    pub use super::{CoverageMode, ObjectiveKind, SolverConfig, TravelAggregation};
    pub use super::{evaluate, Evaluation, SolverStatus};
}
