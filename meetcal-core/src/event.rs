//! Calendar events and the row parser that builds them.

use chrono::NaiveDateTime;

use crate::error::{MeetcalError, MeetcalResult};

/// Layout of the timestamp field in an input row, e.g. `2024-06-01-19-30`.
pub const ROW_TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M";

/// A single meeting.
///
/// `start` is a civil wall-clock time in the configured zone, with minute
/// precision. It is never absent: rows without a parseable start are
/// rejected before an `Event` exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub location: String,
    pub summary: String,
    pub description: String,
    pub start: NaiveDateTime,
}

impl Event {
    /// Build an event from the three fields of an input row.
    ///
    /// Location and summary are taken verbatim, empty strings included.
    /// The timestamp must have exactly the `YYYY-MM-DD-HH-MM` shape and name
    /// a real date and time.
    pub fn from_row(location: &str, summary: &str, timestamp: &str) -> MeetcalResult<Self> {
        Ok(Event {
            location: location.to_string(),
            summary: summary.to_string(),
            description: String::new(),
            start: parse_row_timestamp(timestamp)?,
        })
    }

    /// Attach a description, replacing any previous one.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Parse a `YYYY-MM-DD-HH-MM` timestamp.
///
/// chrono alone accepts signs, padding variations and wider years, so the
/// shape is checked first: 16 characters, digits everywhere except dashes at
/// positions 4, 7, 10 and 13.
pub fn parse_row_timestamp(value: &str) -> MeetcalResult<NaiveDateTime> {
    let format_error = || MeetcalError::Format {
        value: value.to_string(),
    };

    if !is_row_timestamp_shape(value) {
        return Err(format_error());
    }

    NaiveDateTime::parse_from_str(value, ROW_TIMESTAMP_FORMAT).map_err(|_| format_error())
}

/// Whether `value` has the `YYYY-MM-DD-HH-MM` shape, without checking that
/// it names a real date.
pub fn is_row_timestamp_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 16
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 | 10 | 13 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_shape_check_ignores_calendar_validity() {
        assert!(is_row_timestamp_shape("2024-13-01-00-00"));
        assert!(is_row_timestamp_shape("2024-06-01-19-30"));
        assert!(!is_row_timestamp_shape("2024-01-01T00-00"));
        assert!(!is_row_timestamp_shape("20240-1-01-00-00"));
        assert!(!is_row_timestamp_shape("2024-6-1-19-30"));
        assert!(!is_row_timestamp_shape("+024-06-01-19-30"));
    }

    #[test]
    fn test_from_row_takes_fields_verbatim() {
        let event = Event::from_row("Chaostreff; Raum 3", "  Treffen ", "2024-06-01-19-30").unwrap();

        assert_eq!(event.location, "Chaostreff; Raum 3");
        assert_eq!(event.summary, "  Treffen ");
        assert_eq!(event.description, "");
        assert_eq!(
            event.start,
            NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(19, 30, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_from_row_allows_empty_location_and_summary() {
        let event = Event::from_row("", "", "2024-01-01-00-00").expect("Empty fields are valid");
        assert!(event.location.is_empty());
        assert!(event.summary.is_empty());
    }

    #[test]
    fn test_invalid_month_is_format_error() {
        let err = Event::from_row("LeineLab", "Treffen", "2024-13-01-00-00").unwrap_err();
        match err {
            MeetcalError::Format { value } => assert_eq!(value, "2024-13-01-00-00"),
            other => panic!("Expected Format error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_malformed_shapes() {
        for bad in [
            "2024-1-01-00-00",
            "2024-01-01 00:00",
            "2024-01-01-00-00 ",
            "+2024-01-01-00-00",
            "2024-01-01-00",
            "2024-02-30-10-00",
            "2024-01-01-24-00",
            "",
        ] {
            assert!(
                matches!(parse_row_timestamp(bad), Err(MeetcalError::Format { .. })),
                "'{}' should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_leap_day_is_accepted() {
        let start = parse_row_timestamp("2024-02-29-18-00").expect("Leap day exists in 2024");
        assert_eq!(start.format("%Y%m%dT%H%M%S").to_string(), "20240229T180000");
    }

    #[test]
    fn test_with_description() {
        let event = Event::from_row("A", "B", "2024-01-01-00-00")
            .unwrap()
            .with_description("Bring snacks");
        assert_eq!(event.description, "Bring snacks");
    }
}
