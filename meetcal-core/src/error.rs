//! Error types for meetcal.

use thiserror::Error;

/// Errors that can occur while building a calendar.
#[derive(Error, Debug)]
pub enum MeetcalError {
    #[error("Invalid timestamp '{value}', expected YYYY-MM-DD-HH-MM")]
    Format { value: String },

    #[error("Unsupported output format '{0}', expected one of: ics, json")]
    UnsupportedFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for meetcal operations.
pub type MeetcalResult<T> = Result<T, MeetcalError>;
