//! Shared test fixtures for CareRoster crates.
//!
//! This crate provides builders and canned rosters for testing. It only
//! depends on `careroster-core`, so the solver and scoring crates can both
//! use it as a dev-dependency.
//!
//! - [`builders`] - terse constructors for visits and caregivers
//! - [`scenarios`] - fixed rosters and a seeded random roster generator
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! careroster-test = { workspace = true }
//! ```
//!
//! ```
//! use careroster_test::{caregiver, visit};
//!
//! let v = visit("V1", "2025-06-23 09:00", "2025-06-23 10:00").customer("C1").build();
//! let c = caregiver("CG1").available_weekdays("08:00", "18:00").build();
//! assert!(c.can_serve(&v));
//! ```

pub mod builders;
pub mod scenarios;

pub use builders::{caregiver, visit, CaregiverBuilder, VisitBuilder, DEFAULT_SKILL};
pub use scenarios::{random_roster, Roster, RosterShape};
