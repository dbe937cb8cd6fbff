//! Availability windows declared by caregivers.

use chrono::{NaiveTime, Weekday};

use super::visit::Visit;
use crate::error::{DomainError, Result};

const TIME_FORMAT: &str = "%H:%M";

/// An open time slot on a given weekday.
///
/// `end > start`; windows never wrap past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Availability {
    day: Weekday,
    start: NaiveTime,
    end: NaiveTime,
}

impl Availability {
    /// Creates an availability window.
    pub fn new(day: Weekday, start: NaiveTime, end: NaiveTime) -> Result<Self> {
        if end <= start {
            return Err(DomainError::InvalidInterval {
                owner: format!("availability on {}", weekday_tag(day)),
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { day, start, end })
    }

    /// Creates a window from an uppercase day tag and `HH:MM` times.
    ///
    /// ```
    /// use careroster_core::Availability;
    ///
    /// let window = Availability::parse("MONDAY", "09:00", "17:00").unwrap();
    /// assert!(Availability::parse("Funday", "09:00", "17:00").is_err());
    /// assert!(window.end() > window.start());
    /// ```
    pub fn parse(day: &str, start: &str, end: &str) -> Result<Self> {
        Self::new(parse_weekday(day)?, parse_time(start)?, parse_time(end)?)
    }

    pub fn day(&self) -> Weekday {
        self.day
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// True if the whole visit fits inside this window on the matching weekday.
    pub fn covers(&self, visit: &Visit) -> bool {
        self.day == visit.weekday()
            && visit.start().time() >= self.start
            && visit.end().time() <= self.end
    }
}

/// Parses an uppercase English weekday name (`MONDAY` .. `SUNDAY`).
///
/// Abbreviations and other casings are rejected.
pub fn parse_weekday(tag: &str) -> Result<Weekday> {
    let day = match tag {
        "MONDAY" => Weekday::Mon,
        "TUESDAY" => Weekday::Tue,
        "WEDNESDAY" => Weekday::Wed,
        "THURSDAY" => Weekday::Thu,
        "FRIDAY" => Weekday::Fri,
        "SATURDAY" => Weekday::Sat,
        "SUNDAY" => Weekday::Sun,
        other => return Err(DomainError::UnknownWeekday(other.to_string())),
    };
    Ok(day)
}

pub(crate) fn weekday_tag(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MONDAY",
        Weekday::Tue => "TUESDAY",
        Weekday::Wed => "WEDNESDAY",
        Weekday::Thu => "THURSDAY",
        Weekday::Fri => "FRIDAY",
        Weekday::Sat => "SATURDAY",
        Weekday::Sun => "SUNDAY",
    }
}

fn parse_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|source| DomainError::InvalidTime {
        value: value.to_string(),
        source,
    })
}
