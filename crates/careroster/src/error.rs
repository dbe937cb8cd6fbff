//! Error types for the CareRoster facade

use careroster_core::DomainError;
use careroster_scoring::EvaluationError;
use thiserror::Error;

/// Failure of a planning run.
///
/// Search outcomes such as infeasibility are not errors; they are reported
/// through [`SolverStatus`](careroster_solver::SolverStatus).
#[derive(Debug, Error)]
pub enum CareRosterError {
    /// Input records failed validation
    #[error("Invalid input: {0}")]
    Domain(#[from] DomainError),

    /// The evaluator could not resolve an assignment
    #[error("Evaluation failed: {0}")]
    Evaluation(#[from] EvaluationError),

    /// The report could not be serialized
    #[error("Report serialization failed: {0}")]
    Report(#[from] serde_json::Error),
}

/// Result type for CareRoster operations.
pub type Result<T> = std::result::Result<T, CareRosterError>;
