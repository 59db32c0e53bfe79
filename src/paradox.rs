// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Paradox table dates: a signed 32-bit day count where 0001-01-01 is day 1.
//!
//! Equivalently, `Julian Day Number − 1 721 425`.

use crate::calendar::{day_number, decode_date};
use crate::codec::{CodecDescriptor, DateCodec};
use crate::error::{CodecError, CodecResult};
use crate::value::{DateTimeValue, Precision};

/// Offset between a Paradox day and the Julian Day Number.
pub const JULIAN_DAY_OFFSET: i64 = 1_721_425;

/// Paradox day of the calendrical day 0 (1970-01-01).
const EPOCH_OFFSET: i64 = 719_163;

/// 32-bit Paradox date.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParadoxDate;

impl DateCodec for ParadoxDate {
    type Encoding = i32;

    const NAME: &'static str = "paradox";

    const DESCRIPTOR: CodecDescriptor = CodecDescriptor {
        bit_width: 32,
        precision: Precision::Day,
        min_year: -5_000_000,
        max_year: 5_000_000,
        requires_utc: false,
    };

    fn encode(value: &DateTimeValue) -> CodecResult<i32> {
        Self::DESCRIPTOR.check(value)?;
        i32::try_from(day_number(&value.date()) + EPOCH_OFFSET)
            .map_err(|_| CodecError::Overflow("Paradox day"))
    }

    fn decode(days: i32) -> CodecResult<DateTimeValue> {
        let date = decode_date(i64::from(days) - EPOCH_OFFSET)?;
        Ok(DateTimeValue::date_only(date))
    }
}
