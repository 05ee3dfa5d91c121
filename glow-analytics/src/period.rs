//! Reporting-period resolution.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use glow_core::{Period, Timestamp};

/// Resolve a reporting period to a concrete `[start, end]` range.
///
/// Ranges are calendar-aligned: `Day` starts at today's midnight UTC,
/// `Week` on Monday of the current ISO week, `Month` on the 1st, `Year` on
/// January 1st. The end is the last microsecond of the current day rather
/// than `now` itself, so every dashboard read within one day derives the
/// same cache key, and the TTL policy sees a range touching the present.
pub fn period_range(period: Period, now: Timestamp) -> (Timestamp, Timestamp) {
    let today = now.date_naive();
    let start_date = match period {
        Period::Day => today,
        Period::Week => {
            today - Duration::days(today.weekday().num_days_from_monday() as i64)
        }
        Period::Month => today.with_day(1).unwrap_or(today),
        Period::Year => today.with_ordinal(1).unwrap_or(today),
    };
    let start = start_date.and_time(NaiveTime::MIN).and_utc();
    (start, day_end(today))
}

/// Last representable microsecond of the given day.
fn day_end(day: NaiveDate) -> Timestamp {
    let next = day.succ_opt().unwrap_or(day);
    next.and_time(NaiveTime::MIN).and_utc() - Duration::microseconds(1)
}
