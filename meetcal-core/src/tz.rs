//! Civil time zone rule.
//!
//! The zone is UTC+1 in winter and UTC+2 in summer. Summer time runs from
//! midnight at the start of the last Sunday in March up to (but excluding)
//! midnight at the start of the last Sunday in October, evaluated on the
//! local wall-clock time. No timezone database is consulted.

use chrono::{DateTime, Datelike, Days, Duration, FixedOffset, NaiveDate, NaiveDateTime, Utc};

const STANDARD_OFFSET_HOURS: i32 = 1;
const SUMMER_OFFSET_HOURS: i32 = 2;
const SECONDS_PER_HOUR: i32 = 3600;

/// The last Sunday of `month` in `year`.
///
/// Steps back from the first day of the following month until a Sunday is
/// reached; a following month that starts on a Sunday steps back a full week.
pub fn last_sunday(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    let back = u64::from(first.weekday().num_days_from_monday()) + 1;
    first.checked_sub_days(Days::new(back))
}

/// UTC offset for a local wall-clock time.
pub fn offset_for(local: NaiveDateTime) -> Duration {
    Duration::hours(i64::from(offset_hours(local)))
}

fn offset_hours(local: NaiveDateTime) -> i32 {
    if is_summer_time(local) {
        SUMMER_OFFSET_HOURS
    } else {
        STANDARD_OFFSET_HOURS
    }
}

fn is_summer_time(local: NaiveDateTime) -> bool {
    let year = local.year();
    match (last_sunday(year, 3), last_sunday(year, 10)) {
        // Transitions happen at local midnight, so comparing dates is enough
        (Some(on), Some(off)) => on <= local.date() && local.date() < off,
        _ => false,
    }
}

/// `offset_for` as a chrono `FixedOffset`.
pub fn fixed_offset_for(local: NaiveDateTime) -> FixedOffset {
    FixedOffset::east_opt(offset_hours(local) * SECONDS_PER_HOUR)
        .expect("civil offsets are one or two hours")
}

/// Attach the civil offset to a local wall-clock time.
pub fn localize(local: NaiveDateTime) -> DateTime<FixedOffset> {
    DateTime::from_naive_utc_and_offset(local - offset_for(local), fixed_offset_for(local))
}

/// Convert an instant to civil wall-clock time.
pub fn to_civil(instant: DateTime<Utc>) -> NaiveDateTime {
    let utc = instant.naive_utc();
    let summer = utc + Duration::hours(i64::from(SUMMER_OFFSET_HOURS));
    if is_summer_time(summer) {
        summer
    } else {
        utc + Duration::hours(i64::from(STANDARD_OFFSET_HOURS))
    }
}

/// Current civil wall-clock time.
pub fn civil_now() -> NaiveDateTime {
    to_civil(Utc::now())
}
