//! # Date — Midnight-UTC Calendar Dates
//!
//! Defines [`Date`], a calendar date (year, month, day) carried as a
//! `chrono::DateTime<Utc>` pinned to midnight.
//!
//! ## Invariants
//!
//! - The moment's time-of-day is always 00:00:00.000000000.
//! - The moment's zone is always UTC. The zone call-throughs
//!   ([`Date::in_zone`], [`Date::local`], [`Date::utc`]) never change it.
//! - Equality and hashing look only at (year, month, day).
//!
//! Every construction path ends in [`Date::from_moment`] or
//! [`Date::from_naive`], and only `Date::pinned` builds the inner moment,
//! so no entry point can smuggle in a time-of-day or a foreign zone.
//!
//! ## Out-of-range components
//!
//! Construction never fails. Month 13 is January of the next year, day 0 is
//! the last day of the previous month, and so on; see [`Date::from_ymd`].

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};

use chrono::{
    DateTime, Datelike, Local, Month, NaiveDate, NaiveTime, Offset, TimeDelta, TimeZone, Timelike,
    Utc, Weekday,
};

use crate::binary;
use crate::calendar::{self, NANOS_PER_DAY, SECONDS_PER_DAY};
use crate::error::{BinaryError, DateError};

const NANOS_PER_SECOND: i64 = 1_000_000_000;
const MILLIS_PER_DAY: i64 = 86_400_000;
const MICROS_PER_DAY: i64 = 86_400_000_000;

/// Months in calendar order, indexed by `month0`.
const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// A calendar date with no time-of-day and no timezone.
///
/// Internally a `DateTime<Utc>` at midnight. The field is private so a bare
/// moment can never be passed off as a `Date` without going through
/// normalization.
///
/// # Construction
///
/// - [`Date::new()`] / [`Date::from_ymd()`] — from components, with carry.
/// - [`Date::from_moment()`] — from any `DateTime<Tz>`, keeping its wall-clock date.
/// - [`Date::now()`] / [`Date::now_utc()`] — today.
/// - [`Date::parse()`] / [`Date::parse_in_location()`] — from text by layout.
/// - [`Date::from_unix()`] and friends — from Unix timestamps, read in UTC.
/// - [`Date::from_binary()`] — from the moment binary codec.
/// - [`Date::default()`] — the zero date, 0001-01-01.
#[derive(Clone, Copy)]
pub struct Date {
    moment: DateTime<Utc>,
}

impl Date {
    /// Build a date from year, month and day.
    ///
    /// `day` is not validated: day 31 of June is July 1st, day 0 is the last
    /// day of the previous month.
    pub fn new(year: i32, month: Month, day: i32) -> Self {
        Self::pinned(calendar::carry(
            i64::from(year),
            i64::from(month.number_from_month()),
            i64::from(day),
        ))
    }

    /// Build a date from numeric year, month and day, carrying out-of-range
    /// components into adjacent months and years.
    ///
    /// ```ignore
    /// assert_eq!(Date::from_ymd(2024, 13, 1), Date::from_ymd(2025, 1, 1));
    /// assert_eq!(Date::from_ymd(2024, 3, 0), Date::from_ymd(2024, 2, 29));
    /// ```
    ///
    /// Results beyond chrono's range saturate to its first or last date.
    pub fn from_ymd(year: i32, month: i32, day: i32) -> Self {
        Self::pinned(calendar::carry(
            i64::from(year),
            i64::from(month),
            i64::from(day),
        ))
    }

    /// Normalize an arbitrary moment: keep the calendar date as seen on its
    /// own wall clock, drop time-of-day and zone.
    ///
    /// A wall clock past chrono's range saturates to `NaiveDate::MIN` or
    /// `NaiveDate::MAX`.
    pub fn from_moment<Tz: TimeZone>(moment: &DateTime<Tz>) -> Self {
        let offset = moment.offset().fix();
        let wall = match moment.naive_utc().checked_add_offset(offset) {
            Some(wall) => wall.date(),
            None => calendar::saturate(i64::from(offset.local_minus_utc())),
        };
        Self::pinned(calendar::carry(
            i64::from(wall.year()),
            i64::from(wall.month()),
            i64::from(wall.day()),
        ))
    }

    /// Wrap a `NaiveDate`.
    pub fn from_naive(date: NaiveDate) -> Self {
        Self::pinned(date)
    }

    /// Today's date on the local wall clock. Near midnight this can differ
    /// from [`Date::now_utc`] and from the Unix constructors, which read UTC.
    pub fn now() -> Self {
        Self::from_moment(&Local::now())
    }

    /// Today's date in UTC.
    pub fn now_utc() -> Self {
        Self::from_moment(&Utc::now())
    }

    /// The UTC date of a Unix timestamp. `nanos` may lie outside
    /// `[0, 1e9)`; whole seconds in it are carried into `secs`.
    ///
    /// Unlike [`Date::now`], which reads the local wall clock, the Unix
    /// constructors always read the instant in UTC, so the result does not
    /// depend on the host zone. `Date::from_unix(Utc::now().timestamp(), 0)`
    /// matches [`Date::now_utc`], not [`Date::now`].
    pub fn from_unix(secs: i64, nanos: i64) -> Self {
        let secs = secs.saturating_add(nanos.div_euclid(NANOS_PER_SECOND));
        Self::from_naive(calendar::from_unix_days(secs.div_euclid(SECONDS_PER_DAY)))
    }

    /// The UTC date of a Unix timestamp in milliseconds. Read in UTC like
    /// [`Date::from_unix`].
    pub fn from_unix_milli(millis: i64) -> Self {
        Self::from_naive(calendar::from_unix_days(millis.div_euclid(MILLIS_PER_DAY)))
    }

    /// The UTC date of a Unix timestamp in microseconds. Read in UTC like
    /// [`Date::from_unix`].
    pub fn from_unix_micro(micros: i64) -> Self {
        Self::from_naive(calendar::from_unix_days(micros.div_euclid(MICROS_PER_DAY)))
    }

    /// Decode the moment binary form (see [`binary`]) and normalize it.
    ///
    /// # Errors
    ///
    /// Any [`BinaryError`] from [`binary::decode`], unchanged.
    pub fn from_binary(data: &[u8]) -> Result<Self, BinaryError> {
        let moment = binary::decode(data)?;
        if moment.time() != NaiveTime::MIN || moment.offset().local_minus_utc() != 0 {
            tracing::trace!(%moment, "dropping time-of-day and offset from decoded moment");
        }
        Ok(Self::from_moment(&moment))
    }

    fn pinned(date: NaiveDate) -> Self {
        Self {
            moment: date.and_time(NaiveTime::MIN).and_utc(),
        }
    }

    // -- Decomposition ---------------------------------------------------------

    /// Year, month and day.
    pub fn ymd(&self) -> (i32, Month, u32) {
        (self.year(), self.month(), self.day())
    }

    /// The year.
    pub fn year(&self) -> i32 {
        self.moment.year()
    }

    /// The month.
    pub fn month(&self) -> Month {
        // month0() is always in 0..12
        MONTHS[self.moment.month0() as usize]
    }

    /// The day of the month, starting at 1.
    pub fn day(&self) -> u32 {
        self.moment.day()
    }

    /// Hour, minute and second. Always `(0, 0, 0)`.
    pub fn clock(&self) -> (u32, u32, u32) {
        (self.hour(), self.minute(), self.second())
    }

    /// Always 0.
    pub fn hour(&self) -> u32 {
        self.moment.hour()
    }

    /// Always 0.
    pub fn minute(&self) -> u32 {
        self.moment.minute()
    }

    /// Always 0.
    pub fn second(&self) -> u32 {
        self.moment.second()
    }

    /// Always 0.
    pub fn nanosecond(&self) -> u32 {
        self.moment.nanosecond()
    }

    /// ISO 8601 week-numbering year and week.
    pub fn iso_week(&self) -> (i32, u32) {
        let week = self.moment.iso_week();
        (week.year(), week.week())
    }

    pub fn weekday(&self) -> Weekday {
        self.moment.weekday()
    }

    /// Day of the year, starting at 1.
    pub fn ordinal(&self) -> u32 {
        self.moment.ordinal()
    }

    /// True for the zero date, 0001-01-01.
    pub fn is_zero(&self) -> bool {
        self.naive() == calendar::zero_date()
    }

    /// UTC never observes daylight saving time.
    pub fn is_dst(&self) -> bool {
        false
    }

    /// The zone of the inner moment, which is always UTC.
    pub fn location(&self) -> Utc {
        self.moment.timezone()
    }

    /// Zone abbreviation and offset in seconds east of UTC.
    pub fn zone(&self) -> (&'static str, i32) {
        ("UTC", 0)
    }

    /// Start and end of the zone period containing the date. UTC has no
    /// transitions, so both bounds are open.
    pub fn zone_bounds(&self) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        (None, None)
    }

    /// The inner midnight-UTC moment.
    pub fn time(&self) -> DateTime<Utc> {
        self.moment
    }

    pub fn naive(&self) -> NaiveDate {
        self.moment.date_naive()
    }

    /// Seconds since the Unix epoch.
    pub fn unix(&self) -> i64 {
        self.moment.timestamp()
    }

    pub fn unix_milli(&self) -> i64 {
        self.moment.timestamp_millis()
    }

    pub fn unix_micro(&self) -> i64 {
        self.moment.timestamp_micros()
    }

    /// Nanoseconds since the Unix epoch, or `None` outside roughly
    /// 1677-09-21 ..= 2262-04-11.
    pub fn unix_nano(&self) -> Option<i64> {
        self.moment.timestamp_nanos_opt()
    }

    // -- Comparison ------------------------------------------------------------

    /// True when both dates have the same year, month and day.
    pub fn equal(&self, other: &Self) -> bool {
        self.ymd() == other.ymd()
    }

    pub fn before(&self, other: &Self) -> bool {
        self.moment < other.moment
    }

    pub fn after(&self, other: &Self) -> bool {
        self.moment > other.moment
    }

    pub fn compare(&self, other: &Self) -> Ordering {
        self.moment.cmp(&other.moment)
    }

    // -- Arithmetic ------------------------------------------------------------

    /// Add a duration, counted in whole days.
    ///
    /// The duration is truncated to whole hours, then divided by 24 with the
    /// remainder discarded, both toward zero. Anything shorter than a day is
    /// therefore a no-op in either direction: minus one hour does not reach
    /// the previous day, and -47h moves back one day, not two.
    ///
    /// Prefer [`Date::add_date`] for calendar arithmetic.
    pub fn add_duration(self, duration: TimeDelta) -> Self {
        let days = duration.num_hours() / 24;
        Self::from_naive(calendar::offset_days(self.naive(), days))
    }

    /// Add years, months and days, carrying overflow the same way
    /// construction does: January 31st plus one month is March 2nd or 3rd.
    pub fn add_date(self, years: i32, months: i32, days: i32) -> Self {
        Self::pinned(calendar::carry(
            i64::from(self.year()) + i64::from(years),
            i64::from(self.moment.month()) + i64::from(months),
            i64::from(self.day()) + i64::from(days),
        ))
    }

    /// The span from `other` to `self`, always a whole number of days.
    pub fn duration_since(self, other: Self) -> TimeDelta {
        self.moment.signed_duration_since(other.moment)
    }

    /// Round to a multiple of `duration` counted from the zero date,
    /// halfway values rounding up.
    ///
    /// Durations under one day leave the date as is.
    pub fn round(self, duration: TimeDelta) -> Self {
        self.align(duration, |n, r, d| if r + r < d { n - r } else { n + (d - r) })
    }

    /// Truncate to a multiple of `duration` counted from the zero date.
    /// The zero date is a Monday, so whole weeks truncate to Mondays.
    ///
    /// Durations under one day leave the date as is.
    pub fn truncate(self, duration: TimeDelta) -> Self {
        self.align(duration, |n, r, _| n - r)
    }

    fn align(self, duration: TimeDelta, pick: impl Fn(i128, i128, i128) -> i128) -> Self {
        let d = i128::from(duration.num_seconds()) * i128::from(NANOS_PER_SECOND)
            + i128::from(duration.subsec_nanos());
        if d < NANOS_PER_DAY {
            return self;
        }
        let n = i128::from(self.naive().num_days_from_ce() - 1) * NANOS_PER_DAY;
        let aligned = pick(n, n.rem_euclid(d), d);
        let days = aligned.div_euclid(NANOS_PER_DAY) + 1;
        let days = i64::try_from(days).unwrap_or(if days > 0 { i64::MAX } else { i64::MIN });
        Self::from_naive(calendar::from_days_from_ce(days))
    }

    // -- Zone call-throughs ------------------------------------------------------

    /// Always returns the receiver unchanged. Exists so `Date` can stand in
    /// for a `DateTime` in code that calls it.
    pub fn in_zone<Tz: TimeZone>(self, _zone: &Tz) -> Self {
        self
    }

    /// Always returns the receiver unchanged.
    pub fn local(self) -> Self {
        self
    }

    /// Always returns the receiver unchanged.
    pub fn utc(self) -> Self {
        self
    }

    // -- Binary ----------------------------------------------------------------

    /// The moment binary form of the inner midnight-UTC moment.
    pub fn marshal_binary(&self) -> Vec<u8> {
        binary::encode_utc(&self.moment)
    }

    /// Overwrite `self` from the moment binary form. Only the wall-clock
    /// date survives; on error `self` is left untouched.
    ///
    /// # Errors
    ///
    /// [`DateError::Binary`] wrapping the codec's [`BinaryError`].
    pub fn unmarshal_binary(&mut self, data: &[u8]) -> Result<(), DateError> {
        *self = Self::from_binary(data)?;
        Ok(())
    }
}

impl Default for Date {
    /// The zero date, 0001-01-01.
    fn default() -> Self {
        Self::from_naive(calendar::zero_date())
    }
}

impl PartialEq for Date {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl Eq for Date {}

impl Hash for Date {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.year(), self.moment.month(), self.day()).hash(state);
    }
}

impl PartialOrd for Date {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Date {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl Add<TimeDelta> for Date {
    type Output = Date;

    fn add(self, rhs: TimeDelta) -> Date {
        self.add_duration(rhs)
    }
}

impl Sub<TimeDelta> for Date {
    type Output = Date;

    fn sub(self, rhs: TimeDelta) -> Date {
        self.add_duration(-rhs)
    }
}

impl Sub for Date {
    type Output = TimeDelta;

    fn sub(self, rhs: Date) -> TimeDelta {
        self.duration_since(rhs)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Date {
    fn from(moment: DateTime<Tz>) -> Self {
        Self::from_moment(&moment)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Self::from_naive(date)
    }
}

impl From<Date> for DateTime<Utc> {
    fn from(date: Date) -> Self {
        date.moment
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.naive()
    }
}

/// Renders the constructor call that rebuilds the value, e.g.
/// `Date::new(2024, Month::June, 5)`.
impl fmt::Debug for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_constructor(f, self.year(), self.moment.month(), self.day())
    }
}

fn write_constructor(out: &mut impl fmt::Write, year: i32, month: u32, day: u32) -> fmt::Result {
    match calendar::month_name(month) {
        Some(name) => write!(out, "Date::new({year}, Month::{name}, {day})"),
        None => write!(out, "Date::new({year}, {month}, {day})"),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::FixedOffset;
    use proptest::prelude::*;

    /// Moments across years 1..=9999 at any whole-second offset.
    fn any_moment() -> impl Strategy<Value = DateTime<FixedOffset>> {
        (
            -62_135_596_800i64..253_402_300_800i64,
            0u32..1_000_000_000,
            -86_399i32..=86_399,
        )
            .prop_map(|(secs, nanos, offset)| {
                let offset = FixedOffset::east_opt(offset).unwrap();
                DateTime::from_timestamp(secs, nanos)
                    .unwrap()
                    .with_timezone(&offset)
            })
    }

    fn any_date() -> impl Strategy<Value = Date> {
        any_moment().prop_map(|m| Date::from_moment(&m))
    }

    proptest! {
        /// Normalization always lands on midnight UTC of the wall-clock date.
        #[test]
        fn normalization_is_midnight_utc(moment in any_moment()) {
            let d = Date::from_moment(&moment);
            prop_assert_eq!(d.clock(), (0, 0, 0));
            prop_assert_eq!(d.nanosecond(), 0);
            let t = d.time();
            prop_assert_eq!(t.offset(), &Utc);
            prop_assert_eq!(d.naive(), moment.date_naive());
        }

        /// Normalizing a date's own moment changes nothing.
        #[test]
        fn normalization_is_idempotent(d in any_date()) {
            prop_assert_eq!(Date::from_moment(&d.time()).time(), d.time());
        }

        #[test]
        fn add_date_zero_is_equal(d in any_date()) {
            prop_assert!(d.equal(&d.add_date(0, 0, 0)));
            prop_assert!(!d.equal(&d.add_date(0, 0, 1)));
        }

        /// Anything shorter than a day is a no-op, in both directions.
        #[test]
        fn sub_day_duration_is_noop(d in any_date(), millis in -86_399_999i64..86_400_000) {
            prop_assert_eq!(d.add_duration(TimeDelta::milliseconds(millis)), d);
        }

        #[test]
        fn consecutive_days_are_ordered(d in any_date()) {
            let next = d.add_date(0, 0, 1);
            prop_assert!(d.before(&next));
            prop_assert!(next.after(&d));
            prop_assert_eq!(next.duration_since(d), TimeDelta::days(1));
        }
    }
}
