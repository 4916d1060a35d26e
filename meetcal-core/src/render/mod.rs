//! Output renderers.
//!
//! `ics` writes the calendar-exchange text, `summary` builds the records of
//! the JSON summary used on websites.

mod ics;
mod summary;

use std::fmt;
use std::str::FromStr;

use crate::error::MeetcalError;

pub use ics::render_ical;
pub use summary::{SummaryRecord, render_summary};

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Ics,
    Json,
}

impl FromStr for OutputFormat {
    type Err = MeetcalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ics" => Ok(OutputFormat::Ics),
            "json" => Ok(OutputFormat::Json),
            other => Err(MeetcalError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Ics => write!(f, "ics"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
