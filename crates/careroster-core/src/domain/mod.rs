//! Domain records and scheduling predicates.
//!
//! All records are validated at construction and immutable afterwards.
//! Solvers and evaluators borrow them for the duration of one
//! solve/evaluate cycle.

mod assignment;
mod availability;
mod caregiver;
mod predicates;
mod records;
mod visit;

pub use assignment::Assignment;
pub use availability::{parse_weekday, Availability};
pub use caregiver::Caregiver;
pub use predicates::{is_available, overlaps};
pub use records::{
    parse_caregivers, parse_visits, AvailabilityRecord, CaregiverRecord, VisitRecord,
};
pub use visit::Visit;

#[cfg(test)]
mod tests;
