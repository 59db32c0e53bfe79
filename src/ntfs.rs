// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! NTFS / Windows `FILETIME`: unsigned 100 ns ticks since 1601-01-01T00:00:00Z.
//!
//! Values are exposed with millisecond precision; sub-millisecond ticks
//! are truncated on decode.

use crate::calendar::{day_number, decode_date, decode_time};
use crate::codec::{CodecDescriptor, DateCodec};
use crate::error::{CodecError, CodecResult};
use crate::value::{DateTimeValue, Precision};

/// Day number of 1601-01-01.
const EPOCH_DAY: i64 = -134_774;

const TICKS_PER_MILLISECOND: u64 = 10_000;
const TICKS_PER_DAY: u64 = 86_400_000 * TICKS_PER_MILLISECOND;

/// 64-bit NTFS tick count.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NtfsTicks;

impl DateCodec for NtfsTicks {
    type Encoding = u64;

    const NAME: &'static str = "ntfs";

    const DESCRIPTOR: CodecDescriptor = CodecDescriptor {
        bit_width: 64,
        precision: Precision::Millisecond,
        min_year: 1601,
        max_year: 30828,
        requires_utc: true,
    };

    fn encode(value: &DateTimeValue) -> CodecResult<u64> {
        Self::DESCRIPTOR.check(value)?;
        let days = u64::try_from(day_number(&value.date()) - EPOCH_DAY)
            .map_err(|_| CodecError::Overflow("NTFS ticks"))?;
        let ms_of_day = value.time().map_or(0, |t| u64::from(t.millisecond_of_day()));
        days.checked_mul(TICKS_PER_DAY)
            .and_then(|ticks| ticks.checked_add(ms_of_day * TICKS_PER_MILLISECOND))
            .ok_or(CodecError::Overflow("NTFS ticks"))
    }

    fn decode(ticks: u64) -> CodecResult<DateTimeValue> {
        let within_day = ticks % TICKS_PER_DAY;
        if within_day % TICKS_PER_MILLISECOND != 0 {
            log::trace!("truncating {ticks} NTFS ticks to whole milliseconds");
        }
        // Both quotients are far below i64::MAX and u32::MAX respectively.
        let date = decode_date(EPOCH_DAY + (ticks / TICKS_PER_DAY) as i64)?;
        let time = decode_time((within_day / TICKS_PER_MILLISECOND) as u32)?;
        Ok(DateTimeValue::new(date, Some(time), Precision::Millisecond))
    }
}
