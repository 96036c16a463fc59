//! Error types for calendar conversions.

/// Errors from calendar validation and parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum TimeError {
    /// Month outside 1..=12 or day outside the month's length.
    #[error("invalid date {year}-{month:02}-{day:02} in the proleptic Julian calendar")]
    InvalidDate { year: i32, month: u32, day: u32 },
    /// Text could not be read as `YYYY-MM-DD`.
    #[error("date parse error: {0}")]
    Parse(String),
}
