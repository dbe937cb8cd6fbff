//! Error types for CareRoster domain records

use thiserror::Error;

/// Validation failure while constructing a domain record.
///
/// Malformed input is never coerced: every constructor in this crate
/// returns one of these instead.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An identifier field was empty
    #[error("Empty {field} identifier")]
    EmptyId { field: &'static str },

    /// Two records of the same kind share an identifier
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    /// End does not come strictly after start
    #[error("Invalid interval for {owner}: end {end} is not after start {start}")]
    InvalidInterval {
        owner: String,
        start: String,
        end: String,
    },

    /// Visit ends on a later calendar date than it starts
    #[error("Visit {id} spans midnight ({start} -> {end})")]
    SpansMidnight {
        id: String,
        start: String,
        end: String,
    },

    /// Day tag is not an uppercase English weekday name
    #[error("Unknown weekday tag: {0:?}")]
    UnknownWeekday(String),

    /// Timestamp not in `YYYY-MM-DD HH:MM` form
    #[error("Invalid timestamp {value:?}: {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Time of day not in `HH:MM` form
    #[error("Invalid time of day {value:?}: {source}")]
    InvalidTime {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Weekly hour limit is negative or not a finite number
    #[error("Invalid max_hours for caregiver {id}: {value}")]
    InvalidMaxHours { id: String, value: f64 },

    /// JSON payload could not be decoded into records
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for domain construction
pub type Result<T> = std::result::Result<T, DomainError>;
