//! CareRoster Solver Engine
//!
//! This crate turns a week of visits and caregivers into an assignment:
//! - Constraint encoder ([`encode`]): the `x[c][v]` decision space, hard
//!   constraints and lexicographic objective terms
//! - Search engine ([`solve`]): parallel depth-first branch-and-bound with
//!   forward checking, a wall-clock budget and seeded tie-breaking
//! - Statistics collected across search workers

pub mod encoder;
pub mod search;
pub mod statistics;

pub use encoder::{
    encode, Aggregation, CaregiversPerCustomer, Constraint, Decision, EncodedModel, GroupMetric,
    Ineligibility, ModelError, NeighborhoodSwitches, ObjectiveTerm, UnassignedVisits,
};
pub use search::{solve, Deadline, ObjectiveValue, SharedIncumbent, SolveResult, SolverStatus};
pub use statistics::{Improvement, SolverStatistics, StatisticsCollector};
