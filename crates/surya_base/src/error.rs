//! Error types for the siddhantic model.

use surya_time::TimeError;

use crate::body::Body;

/// Errors from model computations, configuration and log persistence.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ModelError {
    /// A body name did not match any body of the model.
    #[error("unknown body: {0}")]
    UnknownBody(String),
    /// The body does not carry a parameter the requested stage needs.
    #[error("{body} has no {parameter}")]
    NotApplicable {
        body: Body,
        parameter: &'static str,
    },
    /// Calendar validation failed.
    #[error("time error: {0}")]
    Time(#[from] TimeError),
    /// A configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    /// A self-check found the model inconsistent.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(String),
    /// A persisted log entry is well-formed JSON but internally inconsistent.
    #[error("invalid log entry on line {line}: {reason}")]
    InvalidEntry { line: usize, reason: String },
    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(String),
}

impl From<std::io::Error> for ModelError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}
