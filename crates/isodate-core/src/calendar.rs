//! Calendar-field carry and day-number helpers.
//!
//! chrono rejects out-of-range components outright, while [`Date`](crate::Date)
//! construction must not: month 13 rolls into January of the next year,
//! day 0 into the last day of the previous month, and so on. [`carry`] is the
//! single routine that resolves such components, used both at construction
//! and by calendar-field addition.
//!
//! Results outside chrono's representable range saturate to
//! [`NaiveDate::MIN`] / [`NaiveDate::MAX`].

use chrono::{Datelike, Days, NaiveDate};

/// Seconds in one calendar day in the canonical zone.
pub(crate) const SECONDS_PER_DAY: i64 = 86_400;

/// Nanoseconds in one calendar day in the canonical zone.
pub(crate) const NANOS_PER_DAY: i128 = 86_400_000_000_000;

/// `NaiveDate::num_days_from_ce()` of 1970-01-01.
pub(crate) const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

/// English month names, indexed by `month - 1`.
pub(crate) const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Name of a month given its number, or `None` outside 1..=12.
pub(crate) fn month_name(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(index).copied()
}

/// The zero moment's date, 0001-01-01.
pub(crate) fn zero_date() -> NaiveDate {
    from_days_from_ce(1)
}

/// Resolve possibly out-of-range (year, month, day) into a real date.
///
/// The month is folded into `1..=12` first, moving whole years across, then
/// `day - 1` is applied as an offset from the first of that month.
pub(crate) fn carry(year: i64, month: i64, day: i64) -> NaiveDate {
    let m0 = month.saturating_sub(1);
    let year = year.saturating_add(m0.div_euclid(12));
    // rem_euclid(12) + 1 is always in 1..=12
    let month = (m0.rem_euclid(12) + 1) as u32;

    let first = i32::try_from(year)
        .ok()
        .and_then(|y| NaiveDate::from_ymd_opt(y, month, 1));
    let Some(first) = first else {
        return saturate(year);
    };
    let resolved = offset_days(first, day.saturating_sub(1));
    if resolved.month() != month {
        tracing::trace!(year, month, day, %resolved, "carried out-of-range day");
    }
    resolved
}

/// Move `date` by a signed number of days, saturating at chrono's limits.
pub(crate) fn offset_days(date: NaiveDate, days: i64) -> NaiveDate {
    let moved = if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    moved.unwrap_or_else(|| saturate(days))
}

/// Date for a day number counted like `NaiveDate::num_days_from_ce()`
/// (0001-01-01 is day 1), saturating at chrono's limits.
pub(crate) fn from_days_from_ce(days: i64) -> NaiveDate {
    i32::try_from(days)
        .ok()
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .unwrap_or_else(|| saturate(days))
}

/// Date for a count of days since 1970-01-01.
pub(crate) fn from_unix_days(days: i64) -> NaiveDate {
    from_days_from_ce(days.saturating_add(UNIX_EPOCH_DAYS_FROM_CE))
}

pub(crate) fn saturate(direction: i64) -> NaiveDate {
    if direction > 0 {
        NaiveDate::MAX
    } else {
        NaiveDate::MIN
    }
}
