//! Error types for the rotation engine.
//!
//! Only structurally invalid input is an error: unparseable date strings,
//! inverted date ranges, an empty roster where one is required. Coverage
//! gaps and rule violations are ordinary data in the analyzer's output,
//! never `Err`.

use thiserror::Error;

/// Errors raised on structurally invalid input.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// A vacation date string could not be parsed.
    #[error("unparseable date string '{raw}'")]
    DateParse {
        /// The offending input string.
        raw: String,
        /// Underlying parse failure.
        #[source]
        source: chrono::ParseError,
    },

    /// A date interval ends before it starts.
    #[error("invalid date range: {0}")]
    InvalidDateRange(String),

    /// An operation that distributes work was given no doctors.
    #[error("doctor roster is empty")]
    EmptyRoster,
}

/// Result type for engine operations.
pub type EngineResult<T> = std::result::Result<T, ScheduleError>;
