//! # Text Representations
//!
//! Layout-driven formatting and parsing of [`Date`], plus the canonical
//! ISO 8601 calendar-date form (`YYYY-MM-DD`) used for plain text, JSON
//! strings and serde.
//!
//! Layouts are chrono strftime patterns. Parsing keeps the calendar date as
//! written in the text; any time-of-day or offset in it is discarded.
//!
//! ## JSON null
//!
//! [`Date::unmarshal_json`] treats a literal `null` as "nothing to do": the
//! receiver keeps whatever value it had, it is not reset to the zero date.

use std::fmt::{self, Write as _};
use std::str::FromStr;

use chrono::format::{DelayedFormat, ParseError, Parsed, StrftimeItems};
use chrono::TimeZone;

use crate::date::Date;
use crate::error::DateError;

/// Layout of the ISO 8601 calendar date, `YYYY-MM-DD`.
pub const ISO8601_DATE: &str = "%Y-%m-%d";

impl Date {
    /// Format with a strftime layout.
    ///
    /// The result is lazy; an invalid layout surfaces as `fmt::Error` when
    /// it is written.
    pub fn format<'a>(&self, layout: &'a str) -> DelayedFormat<StrftimeItems<'a>> {
        self.time().format(layout)
    }

    /// Append the date formatted with `layout` to `buf`.
    pub fn append_format(&self, buf: &mut String, layout: &str) -> fmt::Result {
        write!(buf, "{}", self.format(layout))
    }

    /// Parse `value` with a strftime layout.
    ///
    /// The layout may describe a full date-time; only the date fields are
    /// kept.
    ///
    /// # Errors
    ///
    /// chrono's [`ParseError`], unchanged, when the text does not match or
    /// does not name a valid date.
    pub fn parse(layout: &str, value: &str) -> Result<Self, ParseError> {
        let parsed = parse_fields(layout, value)?;
        parsed.to_naive_date().map(Self::from_naive)
    }

    /// Parse `value` with a strftime layout, reading a date-time without an
    /// offset in `zone`.
    ///
    /// Text that only carries a date, or whose own offset disagrees with
    /// `zone`, keeps the calendar date as written.
    ///
    /// # Errors
    ///
    /// chrono's [`ParseError`], unchanged.
    pub fn parse_in_location<Tz: TimeZone>(
        layout: &str,
        value: &str,
        zone: &Tz,
    ) -> Result<Self, ParseError> {
        let parsed = parse_fields(layout, value)?;
        match parsed.to_datetime_with_timezone(zone) {
            Ok(moment) => Ok(Self::from_moment(&moment)),
            Err(_) => parsed.to_naive_date().map(Self::from_naive),
        }
    }

    /// The canonical text form: unpadded year, then zero-padded month and day.
    pub fn marshal_text(&self) -> String {
        format!(
            "{}-{:02}-{:02}",
            self.year(),
            self.month().number_from_month(),
            self.day()
        )
    }

    /// Overwrite `self` from the canonical text form.
    ///
    /// # Errors
    ///
    /// [`DateError::NotUtf8`] or [`DateError::Parse`]; `self` is left
    /// untouched on error.
    pub fn unmarshal_text(&mut self, data: &[u8]) -> Result<(), DateError> {
        let text = std::str::from_utf8(data).map_err(|_| DateError::NotUtf8)?;
        *self = Self::parse(ISO8601_DATE, text)?;
        Ok(())
    }

    /// The canonical text form as a JSON string, quotes included.
    pub fn marshal_json(&self) -> Vec<u8> {
        format!("\"{}\"", self.marshal_text()).into_bytes()
    }

    /// Overwrite `self` from a JSON string holding the canonical text form.
    ///
    /// A literal `null` is accepted and leaves `self` unchanged.
    ///
    /// # Errors
    ///
    /// - [`DateError::NotAString`] when the payload is shorter than two
    ///   bytes or not wrapped in double quotes.
    /// - [`DateError::NotUtf8`] or [`DateError::Parse`] for the interior.
    ///
    /// `self` is left untouched on error.
    pub fn unmarshal_json(&mut self, data: &[u8]) -> Result<(), DateError> {
        if data == b"null" {
            tracing::trace!(current = %self, "null date payload, keeping current value");
            return Ok(());
        }
        let [b'"', interior @ .., b'"'] = data else {
            return Err(DateError::NotAString);
        };
        self.unmarshal_text(interior)
    }
}

fn parse_fields(layout: &str, value: &str) -> Result<Parsed, ParseError> {
    let mut parsed = Parsed::new();
    chrono::format::parse(&mut parsed, value, StrftimeItems::new(layout))?;
    Ok(parsed)
}

/// Formats with [`ISO8601_DATE`], e.g. `2024-06-05`.
impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(ISO8601_DATE))
    }
}

impl FromStr for Date {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(ISO8601_DATE, s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Date {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.marshal_text())
    }
}

/// Reads the canonical string form. JSON `null` is accepted and yields the
/// zero date: serde builds a fresh value and cannot see what the field held
/// before, so a freshly decoded field is the closest match to
/// [`Date::unmarshal_json`] leaving its receiver untouched. Wrap the field in
/// `Option<Date>` to tell null apart from the zero date.
#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Date {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match <Option<String> as serde::Deserialize>::deserialize(deserializer)? {
            Some(text) => Self::parse(ISO8601_DATE, &text).map_err(serde::de::Error::custom),
            None => {
                tracing::trace!("null date decoded as the zero date");
                Ok(Self::default())
            }
        }
    }
}
