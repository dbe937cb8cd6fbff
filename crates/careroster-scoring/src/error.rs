//! Error types for schedule evaluation

use thiserror::Error;

/// Evaluation failure.
///
/// Constraint violations are report data, not errors: the only failure is
/// an assignment that names a record the evaluator was not given.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("Assignment references unknown {kind} id: {id}")]
    ReferentialIntegrity { kind: &'static str, id: String },
}

/// Result type for evaluation.
pub type Result<T> = std::result::Result<T, EvaluationError>;
