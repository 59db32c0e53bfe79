// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Date/time codecs for fixed storage formats.
//!
//! This crate converts between a precision-tagged civil date/time value
//! and the numeric encodings used by real file formats, on top of an exact
//! proleptic Gregorian calendrical core.
//!
//! # Core types
//!
//! - [`DateTimeValue`]: a [`Date`], an optional [`Time`] and a [`Precision`].
//! - [`EpochFormat`]: a [`TimeUnit`] plus an epoch offset, with a named
//!   catalog (POSIX, JavaScript, Julian Day Number, Lilian, Rata Die, ...).
//! - [`DateCodec`]: the contract every storage format implements.
//! - [`Format`]: runtime selection over the closed set of formats.
//! - [`ZonedTime`] and [`compare_times`]: precision-bounded time comparison.
//!
//! # Formats
//!
//! | Marker | Encoding | Precision | Years |
//! |--------|----------|-----------|-------|
//! | [`DosDate`] | `u16` | day | 1980–2107 |
//! | [`DosDateTime`] | `u32` | second (2 s steps) | 1980–2107 |
//! | [`NtfsTicks`] | `u64` 100 ns ticks | millisecond | 1601–30828 |
//! | [`JulianDay`] | `f64` days | second | ±1 000 000 |
//! | [`ParadoxDate`] | `i32` days | day | ±5 000 000 |
//!
//! ```
//! use datecodec::{DateCodec, DateTimeValue, Date, DosDateTime, Time};
//!
//! let value = DateTimeValue::at(Date::new(2002, 3, 18)?, Time::new(14, 47, 50, 0)?);
//! assert_eq!(DosDateTime::encode(&value)?, 0x2C72_75F9);
//! # Ok::<(), datecodec::CodecError>(())
//! ```
//!
//! # Epoch conversion
//!
//! [`calendar::to_duration`] and [`calendar::to_date_time`] move between
//! values and integer durations in any supported [`EpochFormat`]:
//!
//! ```
//! use datecodec::{calendar, Date, DateTimeValue, EpochFormat, Time};
//!
//! let value = DateTimeValue::at(Date::new(2024, 6, 25)?, Time::new(13, 49, 25, 50)?);
//! assert_eq!(calendar::to_duration(&value, &EpochFormat::POSIX)?, 1_719_323_365);
//! assert_eq!(calendar::to_duration(&value, &EpochFormat::JULIAN_DAY_NUMBER)?, 2_460_487);
//! # Ok::<(), datecodec::CodecError>(())
//! ```

pub mod calendar;
mod codec;
mod compare;
mod dos;
mod epoch;
mod error;
mod julian;
mod ntfs;
mod paradox;
mod value;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use codec::{CodecDescriptor, DateCodec, Encoded, Format};
pub use compare::{compare_times, ZonedTime};
pub use dos::{DosDate, DosDateTime};
pub use epoch::{EpochFormat, TimeUnit};
pub use error::{CodecError, CodecResult};
pub use julian::{civil_from_julian_day_number, julian_day_number, JulianDay};
pub use ntfs::NtfsTicks;
pub use paradox::{ParadoxDate, JULIAN_DAY_OFFSET as PARADOX_JULIAN_DAY_OFFSET};
pub use value::{Date, DateTimeValue, Precision, Time};
