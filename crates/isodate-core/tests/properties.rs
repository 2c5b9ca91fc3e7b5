//! # Round-Trip Properties
//!
//! Every `Date` in years 1..=9999 survives the canonical text, JSON string
//! and binary encodings with its (year, month, day) intact.

use isodate_core::chrono::{DateTime, FixedOffset, NaiveDate, Timelike};
use isodate_core::{binary, Date, DateError};
use proptest::prelude::*;

/// Days from the common era of 0001-01-01 and 9999-12-31.
const FIRST_DAY: i32 = 1;
const LAST_DAY: i32 = 3_652_059;

/// Any real calendar day in years 1..=9999, month ends and Feb 29 included.
fn valid_date() -> impl Strategy<Value = Date> {
    (FIRST_DAY..=LAST_DAY).prop_map(|n| {
        Date::from_naive(NaiveDate::from_num_days_from_ce_opt(n).unwrap())
    })
}

fn any_moment() -> impl Strategy<Value = DateTime<FixedOffset>> {
    (
        -62_135_596_800i64..253_402_300_800i64,
        0u32..1_000_000_000,
        // whole minutes, avoiding -00:01 which has no binary encoding
        prop_oneof![-1439i32..=-2, 0i32..=1439],
    )
        .prop_map(|(secs, nanos, minutes)| {
            let offset = FixedOffset::east_opt(minutes * 60).unwrap();
            DateTime::from_timestamp(secs, nanos)
                .unwrap()
                .with_timezone(&offset)
        })
}

proptest! {
    #[test]
    fn text_roundtrip(d in valid_date()) {
        let mut decoded = Date::default();
        decoded.unmarshal_text(d.marshal_text().as_bytes()).unwrap();
        prop_assert_eq!(decoded.ymd(), d.ymd());
    }

    #[test]
    fn json_roundtrip(d in valid_date()) {
        let mut decoded = Date::default();
        decoded.unmarshal_json(&d.marshal_json()).unwrap();
        prop_assert_eq!(decoded.ymd(), d.ymd());
    }

    #[test]
    fn display_parses_back(d in valid_date()) {
        prop_assert_eq!(d.to_string().parse::<Date>().unwrap(), d);
    }

    #[test]
    fn binary_roundtrip(d in valid_date()) {
        let decoded = Date::from_binary(&d.marshal_binary()).unwrap();
        prop_assert_eq!(decoded.ymd(), d.ymd());
        prop_assert_eq!(decoded.time(), d.time());
    }

    /// A moment encoded with time-of-day and offset decodes into the date on
    /// its wall clock, at midnight UTC.
    #[test]
    fn binary_decode_normalizes(moment in any_moment()) {
        let blob = binary::encode_fixed(&moment).unwrap();
        let d = Date::from_binary(&blob).unwrap();
        prop_assert_eq!(d.naive(), moment.date_naive());
        prop_assert_eq!(d.time().hour(), 0);
        prop_assert_eq!(d.time().minute(), 0);
        prop_assert_eq!(d.time().second(), 0);
    }

    /// Null never touches the receiver.
    #[test]
    fn json_null_keeps_value(d in valid_date()) {
        let mut target = d;
        target.unmarshal_json(b"null").unwrap();
        prop_assert_eq!(target, d);
    }

    /// Month-end days, Feb 29 of leap years included, keep their day.
    #[test]
    fn month_end_roundtrip(year in 1i32..=9999, month in 1u32..=12) {
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let last = next.unwrap().pred_opt().unwrap();
        let d = Date::from_naive(last);
        let mut decoded = Date::default();
        decoded.unmarshal_text(d.marshal_text().as_bytes()).unwrap();
        prop_assert_eq!(decoded.naive(), last);
        prop_assert_eq!(Date::from_binary(&d.marshal_binary()).unwrap().naive(), last);
    }

    /// Unquoted payloads are rejected before parsing.
    #[test]
    fn json_unquoted_rejected(d in valid_date()) {
        let mut target = Date::default();
        let result = target.unmarshal_json(d.marshal_text().as_bytes());
        prop_assert_eq!(result, Err(DateError::NotAString));
        prop_assert!(target.is_zero());
    }
}
