//! CareRoster Core - Domain model for home-care visit scheduling
//!
//! This crate provides the value types every other CareRoster crate
//! builds on:
//! - [`Visit`], [`Availability`], [`Caregiver`] and [`Assignment`] records
//! - The two scheduling predicates, [`overlaps`] and [`is_available`]
//! - Serde record types mirroring the JSON input shapes, with validating
//!   conversions into the domain types
//!
//! # Example
//!
//! ```
//! use careroster_core::{overlaps, Visit};
//!
//! let morning = Visit::parse("V1", "2025-06-23 09:00", "2025-06-23 11:00", "C1", "bathing", "north").unwrap();
//! let late = Visit::parse("V2", "2025-06-23 11:00", "2025-06-23 12:00", "C2", "bathing", "south").unwrap();
//!
//! // Touching intervals do not overlap
//! assert!(!overlaps(&morning, &late));
//! ```

pub mod domain;
pub mod error;

pub use domain::{
    is_available, overlaps, parse_caregivers, parse_visits, parse_weekday, Assignment,
    Availability, AvailabilityRecord, Caregiver, CaregiverRecord, Visit, VisitRecord,
};
pub use error::{DomainError, Result};
