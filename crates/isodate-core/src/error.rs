//! # Error Types
//!
//! Errors returned by the decoding entry points of [`Date`](crate::Date).
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Text that does not match a layout surfaces as chrono's own
//!   [`chrono::ParseError`], unwrapped on the `parse` paths and carried
//!   transparently inside [`DateError::Parse`] on the `unmarshal_*` paths.
//! - A JSON payload that is not a quoted string is rejected locally, before
//!   the interior is looked at.
//! - Binary decode failures come from the moment codec in
//!   [`binary`](crate::binary).

use thiserror::Error;

/// Error returned by the `unmarshal_*` entry points of [`Date`](crate::Date).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// The structured payload is shorter than two bytes or is not wrapped
    /// in double quotes.
    #[error("Date::unmarshal_json: input is not a JSON string")]
    NotAString,

    /// The text payload is not valid UTF-8.
    #[error("date text is not valid UTF-8")]
    NotUtf8,

    /// The text does not match the expected layout.
    #[error(transparent)]
    Parse(#[from] chrono::ParseError),

    /// The binary payload could not be decoded.
    #[error(transparent)]
    Binary(#[from] BinaryError),
}

/// Error decoding the binary representation of a moment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BinaryError {
    /// The payload is empty.
    #[error("moment binary: no data")]
    NoData,

    /// The leading version byte is not one this codec understands.
    #[error("moment binary: unsupported version {0}")]
    UnsupportedVersion(u8),

    /// The payload length does not match its version.
    #[error("moment binary: invalid length {actual}, expected {expected}")]
    InvalidLength {
        /// Length required by the version byte.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },

    /// The encoded instant or zone offset cannot be represented.
    #[error("moment binary: timestamp or zone offset out of range")]
    OutOfRange,
}
