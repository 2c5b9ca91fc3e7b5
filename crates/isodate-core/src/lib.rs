//! # isodate-core — Calendar Dates over chrono
//!
//! A date-only value type for exchanging calendar dates (year, month, day;
//! no time-of-day, no timezone) as ISO 8601 text, while reusing chrono's
//! calendar arithmetic and formatting for everything else.
//!
//! ## Key Design Principles
//!
//! 1. **Midnight UTC, always.** [`Date`] wraps a `chrono::DateTime<Utc>`
//!    whose wall clock reads 00:00:00. Every entry point (components,
//!    moments, text, binary, Unix timestamps) normalizes on the way in.
//!
//! 2. **Construction never fails.** Out-of-range months and days carry into
//!    adjacent months and years instead of being rejected.
//!
//! 3. **Lossless round-trips.** The canonical `YYYY-MM-DD` text, its JSON
//!    string form, and the moment binary blob all decode to the same
//!    (year, month, day) they were encoded from.
//!
//! 4. **Drop-in for a moment.** `Date` mirrors the `DateTime` surface that
//!    makes sense for a date; zone-changing calls are kept as no-ops.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `date` | The `Date` type, normalization and arithmetic |
//! | `text` | Layout formatting/parsing, canonical text and JSON forms, serde |
//! | [`binary`] | Versioned binary codec for moments |
//! | [`error`] | Error types |
//!
//! ## Features
//!
//! - `serde` (default) — `Serialize`/`Deserialize` for `Date` as a
//!   `YYYY-MM-DD` string.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod binary;
mod calendar;
mod date;
pub mod error;
mod text;

pub use chrono;
pub use date::Date;
pub use error::{BinaryError, DateError};
pub use text::ISO8601_DATE;
