use itertools::Itertools;
use thiserror::Error;

/// A dependency cycle found while scheduling a program.
///
/// `path` starts and ends with the node that was re-entered, e.g. `[A, B, A]`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Circular dependency detected: {}", path.iter().join(" -> "))]
pub struct CircularDependencyError {
    pub path: Vec<String>,
}

/// Fatal errors that abort a dry test. No partial result is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DryTestError {
    #[error(transparent)]
    CircularDependency(#[from] CircularDependencyError),
}

/// Errors raised by a single node evaluator.
///
/// The engine catches these, logs the node as `SKIPPED` and carries on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NodeEvaluationError {
    #[error("{operation} produced a non-finite result ({value})")]
    NonFiniteResult { operation: String, value: f64 },
}

/// Errors that can occur when loading or converting a program definition.
#[derive(Error, Debug, Clone)]
pub enum ProgramConversionError {
    #[error("Failed to parse program JSON: {0}")]
    JsonParseError(String),

    #[error("Node id '{0}' is declared more than once")]
    DuplicateNodeId(String),
}

impl From<serde_json::Error> for ProgramConversionError {
    fn from(err: serde_json::Error) -> Self {
        ProgramConversionError::JsonParseError(err.to_string())
    }
}
