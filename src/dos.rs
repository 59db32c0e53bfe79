// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! MS-DOS packed dates, as stored by FAT directory entries and ZIP headers.
//!
//! ```text
//! date word:  15..9 year-1980 | 8..5 month | 4..0 day
//! time word:  15..11 hour     | 10..5 minute | 4..0 second/2
//! date-time:  date word << 16 | time word
//! ```
//!
//! The time word has two-second resolution; odd seconds are truncated.

use crate::codec::{CodecDescriptor, DateCodec};
use crate::error::CodecResult;
use crate::value::{Date, DateTimeValue, Precision, Time};

const EPOCH_YEAR: i32 = 1980;

/// 16-bit DOS date.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DosDate;

/// 32-bit DOS date and time.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DosDateTime;

#[inline]
fn pack_date(date: &Date) -> u16 {
    ((date.year() - EPOCH_YEAR) as u16) << 9 | u16::from(date.month()) << 5 | u16::from(date.day())
}

#[inline]
fn unpack_date(word: u16) -> CodecResult<Date> {
    Date::new(
        EPOCH_YEAR + i32::from(word >> 9),
        ((word >> 5) & 0x0F) as u8,
        (word & 0x1F) as u8,
    )
}

#[inline]
fn pack_time(time: &Time) -> u16 {
    if time.second() % 2 == 1 {
        log::trace!("dropping odd second of {time} in DOS time");
    }
    u16::from(time.hour()) << 11 | u16::from(time.minute()) << 5 | u16::from(time.second() / 2)
}

#[inline]
fn unpack_time(word: u16) -> CodecResult<Time> {
    Time::new(
        (word >> 11) as u8,
        ((word >> 5) & 0x3F) as u8,
        ((word & 0x1F) * 2) as u8,
        0,
    )
}

impl DateCodec for DosDate {
    type Encoding = u16;

    const NAME: &'static str = "dos-date";

    const DESCRIPTOR: CodecDescriptor = CodecDescriptor {
        bit_width: 16,
        precision: Precision::Day,
        min_year: EPOCH_YEAR,
        max_year: EPOCH_YEAR + 127,
        requires_utc: false,
    };

    fn encode(value: &DateTimeValue) -> CodecResult<u16> {
        Self::DESCRIPTOR.check(value)?;
        Ok(pack_date(&value.date()))
    }

    fn decode(word: u16) -> CodecResult<DateTimeValue> {
        Ok(DateTimeValue::date_only(unpack_date(word)?))
    }
}

impl DateCodec for DosDateTime {
    type Encoding = u32;

    const NAME: &'static str = "dos-datetime";

    const DESCRIPTOR: CodecDescriptor = CodecDescriptor {
        bit_width: 32,
        precision: Precision::Second,
        min_year: EPOCH_YEAR,
        max_year: EPOCH_YEAR + 127,
        requires_utc: false,
    };

    /// A missing time of day packs as midnight.
    fn encode(value: &DateTimeValue) -> CodecResult<u32> {
        Self::DESCRIPTOR.check(value)?;
        let date = pack_date(&value.date());
        let time = pack_time(&value.time_or_midnight());
        Ok(u32::from(date) << 16 | u32::from(time))
    }

    fn decode(packed: u32) -> CodecResult<DateTimeValue> {
        let date = unpack_date((packed >> 16) as u16)?;
        let time = unpack_time(packed as u16)?;
        Ok(DateTimeValue::new(date, Some(time), Precision::Second))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;

    fn at(y: i32, mo: u8, d: u8, h: u8, mi: u8, s: u8) -> DateTimeValue {
        DateTimeValue::at(Date::new(y, mo, d).unwrap(), Time::new(h, mi, s, 0).unwrap())
    }

    #[test]
    fn known_datetime_encoding() {
        let v = at(2002, 3, 18, 14, 47, 50);
        assert_eq!(DosDateTime::encode(&v), Ok(0x2C72_75F9));
        assert_eq!(DosDate::encode(&v), Ok(0x2C72));

        let back = DosDateTime::decode(0x2C72_75F9).unwrap();
        assert_eq!(back, v.with_precision(Precision::Second));
        assert!(!back.is_local());
    }

    #[test]
    fn odd_seconds_truncate() {
        let odd = at(2002, 3, 18, 14, 47, 51);
        assert_eq!(DosDateTime::encode(&odd), Ok(0x2C72_75F9));
        let back = DosDateTime::decode(0x2C72_75F9).unwrap();
        assert_eq!(back.time().map(|t| t.second()), Some(50));
    }

    #[test]
    fn year_bounds() {
        assert_eq!(DosDate::minimum_year(), 1980);
        assert_eq!(DosDate::maximum_year(), 2107);
        assert_eq!(DosDateTime::minimum_year(), 1980);
        assert_eq!(DosDateTime::maximum_year(), 2107);

        assert_eq!(DosDate::encode(&at(1980, 1, 1, 0, 0, 0)), Ok(0x0021));
        assert_eq!(DosDate::encode(&at(2107, 12, 31, 0, 0, 0)), Ok(0xFF9F));
        assert_eq!(
            DosDateTime::encode(&at(2107, 12, 31, 23, 59, 58)),
            Ok(0xFF9F_BF7D)
        );
        assert!(matches!(
            DosDate::encode(&at(1979, 12, 31, 0, 0, 0)),
            Err(CodecError::YearOutOfRange { year: 1979, .. })
        ));
        assert!(matches!(
            DosDateTime::encode(&at(2108, 1, 1, 0, 0, 0)),
            Err(CodecError::YearOutOfRange { year: 2108, .. })
        ));
    }

    #[test]
    fn years_before_1980_never_encode() {
        use crate::codec::Format;
        use chrono::{TimeZone, Utc};

        let v = at(1970, 1, 1, 0, 0, 0);
        let zoned = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
        for result in [
            DosDate::encode(&v).map(u32::from),
            DosDate::encode_zoned(&zoned).map(u32::from),
            DosDateTime::encode(&v),
            DosDateTime::encode_zoned(&zoned),
        ] {
            assert!(matches!(
                result,
                Err(CodecError::YearOutOfRange { year: 1970, .. })
            ));
        }
        for format in [Format::DosDate, Format::DosDateTime] {
            assert!(format.encode(&v).unwrap_err().is_range_error());
            assert!(format.encode_zoned(&zoned).unwrap_err().is_range_error());
        }
    }

    #[test]
    fn local_times_are_accepted() {
        let local = DateTimeValue::at(
            Date::new(2002, 3, 18).unwrap(),
            Time::local(14, 47, 50, 0).unwrap(),
        );
        assert_eq!(DosDateTime::encode(&local), Ok(0x2C72_75F9));
    }

    #[test]
    fn date_only_packs_midnight() {
        let v = DateTimeValue::date_only(Date::new(2002, 3, 18).unwrap());
        assert_eq!(DosDateTime::encode(&v), Ok(0x2C72_0000));
        assert_eq!(DosDate::decode(0x2C72), Ok(v));
    }

    #[test]
    fn malformed_words_fail_to_decode() {
        // month 0
        assert!(DosDate::decode(0x0001).unwrap_err().is_range_error());
        // day 0
        assert!(DosDate::decode(0x0020).is_err());
        // hour 24
        assert!(DosDateTime::decode(0x0021_C000).is_err());
        // second field 30 -> 60 s
        assert!(DosDateTime::decode(0x0021_001E).is_err());
    }

    #[test]
    fn even_second_roundtrip() {
        for (y, mo, d) in [(1980, 1, 1), (1999, 12, 31), (2000, 2, 29), (2107, 6, 15)] {
            for (h, mi, s) in [(0, 0, 0), (12, 30, 30), (23, 59, 58)] {
                let v = at(y, mo, d, h, mi, s);
                let back = DosDateTime::decode(DosDateTime::encode(&v).unwrap()).unwrap();
                assert!(back.matches(&v, Precision::Second), "{v}");
            }
        }
    }
}
