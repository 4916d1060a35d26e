//! Recency filter: drops events that started too long ago.

use chrono::{Duration, NaiveDateTime};

use crate::event::Event;
use crate::tz;

/// Keeps events starting at or after `now - cutoff`.
///
/// "Now" is captured once when the filter is created, so every decision in a
/// run compares against the same instant.
#[derive(Debug, Clone, Copy)]
pub struct RecencyFilter {
    threshold: NaiveDateTime,
}

impl RecencyFilter {
    /// Filter against the current civil time.
    pub fn new(cutoff: Duration) -> Self {
        Self::at(tz::civil_now(), cutoff)
    }

    /// Filter against a fixed civil time.
    ///
    /// A cutoff reaching past the earliest representable time keeps
    /// everything.
    pub fn at(now: NaiveDateTime, cutoff: Duration) -> Self {
        RecencyFilter {
            threshold: now.checked_sub_signed(cutoff).unwrap_or(NaiveDateTime::MIN),
        }
    }

    /// Oldest start time that is still kept.
    pub fn threshold(&self) -> NaiveDateTime {
        self.threshold
    }

    pub fn keeps(&self, start: NaiveDateTime) -> bool {
        start >= self.threshold
    }

    /// Pass the event through if it is recent enough.
    ///
    /// The result feeds straight into `EventStore::add`.
    pub fn apply(&self, event: Event) -> Option<Event> {
        if self.keeps(event.start) {
            Some(event)
        } else {
            tracing::debug!(
                start = %event.start,
                location = %event.location,
                threshold = %self.threshold,
                "Dropping stale event"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_fourteen_day_cutoff() {
        let filter = RecencyFilter::at(midnight(2024, 6, 15), Duration::days(14));

        assert!(filter.keeps(midnight(2024, 6, 1)), "Exactly 14 days ago is kept");
        assert!(!filter.keeps(midnight(2024, 5, 1)), "A month ago is dropped");
        assert!(filter.keeps(midnight(2024, 7, 1)), "Future events are kept");
    }

    #[test]
    fn test_one_minute_before_threshold_is_dropped() {
        let filter = RecencyFilter::at(midnight(2024, 6, 15), Duration::days(14));
        let just_before = midnight(2024, 6, 1) - Duration::minutes(1);
        assert!(!filter.keeps(just_before));
    }

    #[test]
    fn test_apply_returns_none_for_stale_event() {
        let filter = RecencyFilter::at(midnight(2024, 6, 15), Duration::days(60));

        let recent = Event::from_row("LeineLab", "Treffen", "2024-05-01-19-00").unwrap();
        let stale = Event::from_row("LeineLab", "Treffen", "2024-01-01-19-00").unwrap();

        assert_eq!(filter.apply(recent.clone()), Some(recent));
        assert_eq!(filter.apply(stale), None);
    }

    #[test]
    fn test_threshold() {
        let filter = RecencyFilter::at(midnight(2024, 6, 15), Duration::days(14));
        assert_eq!(filter.threshold(), midnight(2024, 6, 1));
    }

    #[test]
    fn test_huge_cutoff_keeps_everything() {
        let cutoff = Duration::try_days(i64::from(u32::MAX)).unwrap();
        let filter = RecencyFilter::at(midnight(2024, 6, 15), cutoff);

        assert_eq!(filter.threshold(), NaiveDateTime::MIN);
        assert!(filter.keeps(midnight(1970, 1, 1)));
    }
}
