//! # Moment Binary Codec
//!
//! chrono defines no binary form for `DateTime`, so this module fixes one:
//! a versioned blob carrying the instant and the zone offset it was
//! observed in. [`Date`](crate::Date) passes its moment through here
//! unchanged, which is why a date's bytes are indistinguishable from those
//! of a midnight-UTC moment.
//!
//! ## Layout
//!
//! | offset | size | field |
//! |--------|------|-------|
//! | 0  | 1 | version: `1`, or `2` when the offset has a seconds part |
//! | 1  | 8 | seconds since 0001-01-01T00:00:00Z, big-endian `i64` |
//! | 9  | 4 | nanoseconds, big-endian `i32` |
//! | 13 | 2 | zone offset in minutes, big-endian `i16`; `-1` marks UTC |
//! | 15 | 1 | version 2 only: seconds part of the offset, `0..60` |

use chrono::{DateTime, FixedOffset, Utc};

use crate::error::BinaryError;

/// Seconds between the zero moment (0001-01-01T00:00:00Z) and the Unix epoch.
const ZERO_TO_UNIX_SECONDS: i64 = 62_135_596_800;

const NANOS_PER_SECOND: i64 = 1_000_000_000;

const VERSION_1: u8 = 1;
const VERSION_2: u8 = 2;
const LEN_VERSION_1: usize = 15;
const LEN_VERSION_2: usize = 16;

/// Offset-minutes value reserved for UTC.
const UTC_MARKER: i16 = -1;

/// Encode a UTC moment. Always a 15-byte version 1 blob.
pub fn encode_utc(moment: &DateTime<Utc>) -> Vec<u8> {
    write_blob(
        VERSION_1,
        moment.timestamp(),
        moment.timestamp_subsec_nanos(),
        UTC_MARKER,
        None,
    )
}

/// Encode a moment at a fixed offset.
///
/// # Errors
///
/// Returns [`BinaryError::OutOfRange`] for offsets in `(-00:02, -00:01]`,
/// whose minutes field would collide with the UTC marker.
pub fn encode_fixed(moment: &DateTime<FixedOffset>) -> Result<Vec<u8>, BinaryError> {
    let offset = moment.offset().local_minus_utc();
    let minutes = i16::try_from(offset.div_euclid(60)).map_err(|_| BinaryError::OutOfRange)?;
    if minutes == UTC_MARKER {
        return Err(BinaryError::OutOfRange);
    }
    // rem_euclid(60) is in 0..60
    let seconds = offset.rem_euclid(60) as u8;
    let (version, extra) = if seconds == 0 {
        (VERSION_1, None)
    } else {
        (VERSION_2, Some(seconds))
    };
    Ok(write_blob(
        version,
        moment.timestamp(),
        moment.timestamp_subsec_nanos(),
        minutes,
        extra,
    ))
}

/// Decode a blob into the instant and the offset it was encoded with.
///
/// A UTC blob decodes with a zero offset.
///
/// # Errors
///
/// - [`BinaryError::NoData`] for an empty slice.
/// - [`BinaryError::UnsupportedVersion`] for a version byte other than 1 or 2.
/// - [`BinaryError::InvalidLength`] when the length does not match the version.
/// - [`BinaryError::OutOfRange`] when the instant or offset is not representable.
pub fn decode(data: &[u8]) -> Result<DateTime<FixedOffset>, BinaryError> {
    let Some(&version) = data.first() else {
        return Err(BinaryError::NoData);
    };
    let expected = match version {
        VERSION_1 => LEN_VERSION_1,
        VERSION_2 => LEN_VERSION_2,
        other => return Err(BinaryError::UnsupportedVersion(other)),
    };
    if data.len() != expected {
        return Err(BinaryError::InvalidLength {
            expected,
            actual: data.len(),
        });
    }

    let mut secs = [0u8; 8];
    secs.copy_from_slice(&data[1..9]);
    let mut nanos = [0u8; 4];
    nanos.copy_from_slice(&data[9..13]);
    let mut minutes = [0u8; 2];
    minutes.copy_from_slice(&data[13..15]);

    let secs = i64::from_be_bytes(secs);
    let nanos = i64::from(i32::from_be_bytes(nanos));
    let minutes = i16::from_be_bytes(minutes);
    let extra = if version == VERSION_2 {
        i32::from(data[15])
    } else {
        0
    };

    let unix = secs
        .checked_sub(ZERO_TO_UNIX_SECONDS)
        .and_then(|s| s.checked_add(nanos.div_euclid(NANOS_PER_SECOND)))
        .ok_or(BinaryError::OutOfRange)?;
    // rem_euclid keeps this in 0..1_000_000_000
    let subsec = nanos.rem_euclid(NANOS_PER_SECOND) as u32;
    let instant = DateTime::from_timestamp(unix, subsec).ok_or(BinaryError::OutOfRange)?;

    let offset_secs = if minutes == UTC_MARKER && extra == 0 {
        0
    } else {
        i32::from(minutes) * 60 + extra
    };
    let offset = FixedOffset::east_opt(offset_secs).ok_or(BinaryError::OutOfRange)?;
    // the wall clock at `offset` must be representable too
    if instant.naive_utc().checked_add_offset(offset).is_none() {
        return Err(BinaryError::OutOfRange);
    }
    Ok(instant.with_timezone(&offset))
}

fn write_blob(version: u8, unix: i64, nanos: u32, minutes: i16, extra: Option<u8>) -> Vec<u8> {
    let mut out = Vec::with_capacity(LEN_VERSION_2);
    out.push(version);
    // chrono's range is a few hundred thousand years; this cannot overflow
    out.extend_from_slice(&(unix + ZERO_TO_UNIX_SECONDS).to_be_bytes());
    // leap-second nanos (>= 1e9) still fit in i32
    out.extend_from_slice(&(nanos as i32).to_be_bytes());
    out.extend_from_slice(&minutes.to_be_bytes());
    if let Some(extra) = extra {
        out.push(extra);
    }
    out
}
