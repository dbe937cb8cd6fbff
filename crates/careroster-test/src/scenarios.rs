//! Canned rosters and a seeded random roster generator.
//!
//! The random generator uses ChaCha8 so that the same seed yields the same
//! roster on every platform.

use careroster_core::{Availability, Caregiver, Visit};
use chrono::{Duration, NaiveDate, NaiveTime, Weekday};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::builders::{caregiver, visit, DEFAULT_SKILL};

/// Visits and caregivers for one planning week.
#[derive(Debug, Clone)]
pub struct Roster {
    pub visits: Vec<Visit>,
    pub caregivers: Vec<Caregiver>,
}

impl Roster {
    pub fn new(visits: Vec<Visit>, caregivers: Vec<Caregiver>) -> Self {
        Self { visits, caregivers }
    }

    /// Two overlapping Monday visits and one caregiver able to serve both.
    pub fn overlapping_pair() -> Self {
        Self::new(
            vec![
                visit("V1", "2025-06-23 09:00", "2025-06-23 11:00").build(),
                visit("V2", "2025-06-23 10:00", "2025-06-23 12:00").build(),
            ],
            vec![caregiver("CG1").available_weekdays("08:00", "18:00").build()],
        )
    }

    /// Two 5-hour visits on different days for a caregiver limited to 8 hours.
    pub fn over_capacity() -> Self {
        Self::new(
            vec![
                visit("V1", "2025-06-23 08:00", "2025-06-23 13:00").build(),
                visit("V2", "2025-06-24 08:00", "2025-06-24 13:00").build(),
            ],
            vec![caregiver("CG1")
                .max_hours(8.0)
                .available_weekdays("07:00", "19:00")
                .build()],
        )
    }

    /// Three visits of one customer and three interchangeable caregivers.
    pub fn single_customer_week() -> Self {
        Self::new(
            vec![
                visit("V1", "2025-06-23 09:00", "2025-06-23 10:00").build(),
                visit("V2", "2025-06-25 09:00", "2025-06-25 10:00").build(),
                visit("V3", "2025-06-27 09:00", "2025-06-27 10:00").build(),
            ],
            vec![
                caregiver("CG1").available_weekdays("08:00", "18:00").build(),
                caregiver("CG2").available_weekdays("08:00", "18:00").build(),
                caregiver("CG3").available_weekdays("08:00", "18:00").build(),
            ],
        )
    }
}

/// Size and variety of a generated roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterShape {
    pub visits: usize,
    pub caregivers: usize,
    pub customers: usize,
    pub neighborhoods: usize,
    /// Number of consecutive days starting Monday 2025-06-23.
    pub days: usize,
}

impl Default for RosterShape {
    fn default() -> Self {
        Self {
            visits: 8,
            caregivers: 3,
            customers: 3,
            neighborhoods: 3,
            days: 3,
        }
    }
}

const NEIGHBORHOODS: [&str; 4] = ["north", "south", "east", "west"];
const EXTRA_SKILL: &str = "medication";

/// Generates a roster from a seed.
///
/// Visits last 30-150 minutes between 07:00 and 19:00. About one visit in
/// five needs the extra `medication` skill. Caregivers get one or two
/// windows per day and 4-20 weekly hours; some lack the extra skill, so
/// generated rosters are not always feasible.
pub fn random_roster(seed: u64, shape: RosterShape) -> Roster {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let days = shape.days.clamp(1, 7);
    let neighborhoods = shape.neighborhoods.clamp(1, NEIGHBORHOODS.len());
    let monday = NaiveDate::from_ymd_opt(2025, 6, 23).unwrap_or_default();

    let visits = (0..shape.visits)
        .map(|i| {
            let date = monday + Duration::days(rng.random_range(0..days) as i64);
            let start_minute = rng.random_range(7 * 4..17 * 4) * 15;
            let length = rng.random_range(2..=10) * 15;
            let start = date.and_time(time_of(start_minute));
            let end = date.and_time(time_of(start_minute + length));
            let skill = if rng.random_bool(0.2) {
                EXTRA_SKILL
            } else {
                DEFAULT_SKILL
            };
            let customer = format!("C{}", rng.random_range(0..shape.customers.max(1)) + 1);
            let neighborhood = NEIGHBORHOODS[rng.random_range(0..neighborhoods)];
            Visit::new(format!("V{}", i + 1), start, end, customer, skill, neighborhood)
                .unwrap_or_else(|e| panic!("generated invalid visit: {e}"))
        })
        .collect();

    let caregivers = (0..shape.caregivers)
        .map(|i| {
            let mut windows = Vec::new();
            for day in 0..days {
                let weekday = weekday_at(day);
                let first_start = rng.random_range(6..10) * 60;
                let first_end = first_start + rng.random_range(4..9) * 60;
                windows.push(window(weekday, first_start, first_end));
                if rng.random_bool(0.3) && first_end + 60 < 21 * 60 {
                    windows.push(window(weekday, first_end + 60, 21 * 60));
                }
            }
            let mut skills = vec![DEFAULT_SKILL];
            if rng.random_bool(0.6) {
                skills.push(EXTRA_SKILL);
            }
            let hours = f64::from(rng.random_range(4u32..=20));
            Caregiver::new(format!("CG{}", i + 1), format!("Caregiver {}", i + 1), hours)
                .unwrap_or_else(|e| panic!("generated invalid caregiver: {e}"))
                .with_availability(windows)
                .with_skills(skills)
        })
        .collect();

    Roster::new(visits, caregivers)
}

fn time_of(minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(minute / 60, minute % 60, 0).unwrap_or_default()
}

fn weekday_at(offset: usize) -> Weekday {
    (0..offset).fold(Weekday::Mon, |day, _| day.succ())
}

fn window(day: Weekday, start: u32, end: u32) -> Availability {
    Availability::new(day, time_of(start), time_of(end))
        .unwrap_or_else(|e| panic!("generated invalid window: {e}"))
}
