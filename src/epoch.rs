// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Epoch formats: a time unit plus an offset from the calendrical day zero.
//!
//! The calendrical core counts days from **1970-01-01** (day 0).  An
//! [`EpochFormat`] says which unit an external duration is counted in and
//! where that count starts, expressed in the same unit relative to day 0.
//!
//! | Constant | Unit | Epoch | Offset |
//! |----------|------|-------|--------|
//! | [`EpochFormat::DEFAULT_DAYS`] | days | 1970-01-01 | 0 |
//! | [`EpochFormat::DEFAULT_SECONDS`] | seconds | 1970-01-01 | 0 |
//! | [`EpochFormat::DEFAULT_MILLISECONDS`] | milliseconds | 1970-01-01 | 0 |
//! | [`EpochFormat::POSIX`] | seconds | 1970-01-01T00:00Z | 0 |
//! | [`EpochFormat::JAVASCRIPT`] | milliseconds | 1970-01-01T00:00Z | 0 |
//! | [`EpochFormat::JULIAN_DAY_NUMBER`] | days | −4713-11-24 (JDN 0) | −2 440 588 |
//! | [`EpochFormat::LILIAN`] | days | 1582-10-14 (day 1 = 1582-10-15) | −141 428 |
//! | [`EpochFormat::RATA_DIE`] | days | 0000-12-31 (day 1 = 0001-01-01) | −719 163 |

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::calendar::{self, MS_PER_DAY};
use crate::error::{CodecError, CodecResult};
use crate::value::{Date, Precision};

/// Unit an epoch duration is counted in.
///
/// Every unit is representable, but the calendrical core only converts
/// days, seconds and milliseconds; the others yield
/// [`CodecError::UnsupportedTimeUnit`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    /// How many of this unit make up one day.
    pub fn units_per_day(self) -> CodecResult<i64> {
        match self {
            TimeUnit::Days => Ok(1),
            TimeUnit::Seconds => Ok(86_400),
            TimeUnit::Milliseconds => Ok(MS_PER_DAY),
            other => Err(CodecError::UnsupportedTimeUnit(other)),
        }
    }

    /// Length of one unit in milliseconds.
    pub fn milliseconds_per_unit(self) -> CodecResult<i64> {
        Ok(MS_PER_DAY / self.units_per_day()?)
    }

    /// Precision of values decoded from a duration in this unit.
    pub fn precision(self) -> CodecResult<Precision> {
        match self {
            TimeUnit::Days => Ok(Precision::Day),
            TimeUnit::Seconds => Ok(Precision::Second),
            TimeUnit::Milliseconds => Ok(Precision::Millisecond),
            other => Err(CodecError::UnsupportedTimeUnit(other)),
        }
    }
}

/// A time unit paired with an epoch offset from the calendrical day zero.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EpochFormat {
    unit: TimeUnit,
    epoch: i64,
}

impl EpochFormat {
    pub const DEFAULT_DAYS: Self = Self::with_epoch(TimeUnit::Days, 0);
    pub const DEFAULT_SECONDS: Self = Self::with_epoch(TimeUnit::Seconds, 0);
    pub const DEFAULT_MILLISECONDS: Self = Self::with_epoch(TimeUnit::Milliseconds, 0);

    /// Seconds since 1970-01-01T00:00:00Z.
    pub const POSIX: Self = Self::with_epoch(TimeUnit::Seconds, 0);

    /// Milliseconds since 1970-01-01T00:00:00Z.
    pub const JAVASCRIPT: Self = Self::with_epoch(TimeUnit::Milliseconds, 0);

    /// Integer Julian Day Number of the civil date.
    pub const JULIAN_DAY_NUMBER: Self = Self::with_epoch(TimeUnit::Days, -2_440_588);

    /// Days since the Gregorian reform; 1582-10-15 is Lilian day 1.
    pub const LILIAN: Self = Self::with_epoch(TimeUnit::Days, -141_428);

    /// Rata Die; 0001-01-01 is day 1.
    pub const RATA_DIE: Self = Self::with_epoch(TimeUnit::Days, -719_163);

    /// Named entries, in the order of the module table.
    pub const CATALOG: [(&'static str, Self); 8] = [
        ("default-days", Self::DEFAULT_DAYS),
        ("default-seconds", Self::DEFAULT_SECONDS),
        ("default-milliseconds", Self::DEFAULT_MILLISECONDS),
        ("posix", Self::POSIX),
        ("javascript", Self::JAVASCRIPT),
        ("julian-day-number", Self::JULIAN_DAY_NUMBER),
        ("lilian", Self::LILIAN),
        ("rata-die", Self::RATA_DIE),
    ];

    /// Builds a format; `None` selects the unit's default epoch (day zero).
    #[inline]
    pub const fn new(unit: TimeUnit, epoch: Option<i64>) -> Self {
        match epoch {
            Some(epoch) => Self::with_epoch(unit, epoch),
            None => Self::with_epoch(unit, 0),
        }
    }

    #[inline]
    pub const fn with_epoch(unit: TimeUnit, epoch: i64) -> Self {
        Self { unit, epoch }
    }

    /// A format whose zero falls on midnight UTC of `date`.
    pub fn from_epoch_date(unit: TimeUnit, date: &Date) -> CodecResult<Self> {
        let epoch = calendar::day_number(date)
            .checked_mul(unit.units_per_day()?)
            .ok_or(CodecError::Overflow("epoch offset"))?;
        Ok(Self::with_epoch(unit, epoch))
    }

    /// Looks up a catalog entry by name (case-insensitive).
    pub fn named(name: &str) -> Option<Self> {
        Self::CATALOG
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, format)| *format)
    }

    #[inline]
    pub const fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Offset of this format's zero from day 0, in [`Self::unit`].
    #[inline]
    pub const fn epoch(&self) -> i64 {
        self.epoch
    }
}

impl fmt::Display for EpochFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} since day {}", self.unit, self.epoch)
    }
}
