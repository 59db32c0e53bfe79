// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Precision-bounded comparison of times of day.

use std::cmp::Ordering;

use chrono::{DateTime, FixedOffset, Offset, TimeZone, Timelike, Utc};

use crate::calendar::{split_millisecond_of_day, MS_PER_DAY};
use crate::error::{CodecError, CodecResult};
use crate::value::{Precision, Time};

/// A time of day with its zone offset, or a zone-less wall-clock reading.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ZonedTime {
    time: Time,
    offset: FixedOffset,
}

impl ZonedTime {
    /// A reading taken in the zone `offset` east of UTC.
    pub fn new(time: Time, offset: FixedOffset) -> Self {
        Self {
            time: time.with_local(false),
            offset,
        }
    }

    /// A zone-less reading.
    pub fn local(time: Time) -> Self {
        Self {
            time: time.with_local(true),
            offset: Utc.fix(),
        }
    }

    /// Time of day of a chrono instant, in its own zone.
    pub fn from_chrono<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Self {
        let local = datetime.naive_local();
        let millisecond = (local.nanosecond() / 1_000_000).min(999) as u16;
        let time = Time::from_parts(
            local.hour() as u8,
            local.minute() as u8,
            local.second() as u8,
            millisecond,
            false,
        );
        Self::new(time, datetime.offset().fix())
    }

    #[inline]
    pub fn time(&self) -> Time {
        self.time
    }

    #[inline]
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    #[inline]
    pub fn is_local(&self) -> bool {
        self.time.is_local()
    }

    /// The same instant as a UTC time of day, wrapping across midnight.
    pub fn to_utc(&self) -> Time {
        if self.is_local() {
            return self.time;
        }
        let offset_ms = i64::from(self.offset.local_minus_utc()) * 1_000;
        let ms = (i64::from(self.time.millisecond_of_day()) - offset_ms).rem_euclid(MS_PER_DAY);
        split_millisecond_of_day(ms as u32)
    }
}

/// Compares two times of day field by field, down to `ceiling`.
///
/// When both readings are zoned they are first normalised to UTC; if
/// either is zone-less the raw fields are compared.  Fields finer than
/// `ceiling` are never inspected.  `ceiling` must be `Minute`, `Second`
/// or `Millisecond`.
pub fn compare_times(a: &ZonedTime, b: &ZonedTime, ceiling: Precision) -> CodecResult<Ordering> {
    if ceiling < Precision::Minute {
        return Err(CodecError::UnsupportedInput(
            "comparison ceiling must be minute or finer",
        ));
    }
    let (x, y) = if a.is_local() || b.is_local() {
        (a.time, b.time)
    } else {
        (a.to_utc(), b.to_utc())
    };

    let mut ordering = x.hour().cmp(&y.hour());
    ordering = ordering.then_with(|| x.minute().cmp(&y.minute()));
    if ceiling >= Precision::Second {
        ordering = ordering.then_with(|| x.second().cmp(&y.second()));
    }
    if ceiling >= Precision::Millisecond {
        ordering = ordering.then_with(|| x.millisecond().cmp(&y.millisecond()));
    }
    Ok(ordering)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn east(hours: i32) -> FixedOffset {
        FixedOffset::east_opt(hours * 3600).unwrap()
    }

    fn t(h: u8, m: u8, s: u8, ms: u16) -> Time {
        Time::new(h, m, s, ms).unwrap()
    }

    #[test]
    fn zoned_readings_normalise_to_utc() {
        let paris = ZonedTime::new(t(13, 0, 0, 0), east(1));
        let london = ZonedTime::new(t(12, 0, 0, 0), east(0));
        assert_eq!(
            compare_times(&paris, &london, Precision::Millisecond),
            Ok(Ordering::Equal)
        );
        assert_eq!(paris.to_utc(), t(12, 0, 0, 0));
    }

    #[test]
    fn normalisation_wraps_midnight() {
        let tokyo = ZonedTime::new(t(0, 30, 0, 0), east(9));
        assert_eq!(tokyo.to_utc(), t(15, 30, 0, 0));
        let west = ZonedTime::new(t(23, 0, 0, 0), east(-3));
        assert_eq!(west.to_utc(), t(2, 0, 0, 0));
    }

    #[test]
    fn normalisation_keeps_every_field() {
        let last = ZonedTime::new(t(23, 59, 59, 999), east(0));
        assert_eq!(last.to_utc(), t(23, 59, 59, 999));

        let half_hour = FixedOffset::west_opt(1_800).unwrap();
        let v = ZonedTime::new(t(23, 45, 12, 345), half_hour);
        assert_eq!(v.to_utc(), t(0, 15, 12, 345));

        let v = ZonedTime::new(t(0, 0, 0, 1), east(14));
        assert_eq!(v.to_utc(), t(10, 0, 0, 1));
    }

    #[test]
    fn zone_less_operand_compares_raw_fields() {
        let local = ZonedTime::local(t(13, 0, 0, 0));
        let zoned = ZonedTime::new(t(12, 0, 0, 0), east(-1));
        assert!(local.is_local());
        assert_eq!(
            compare_times(&local, &zoned, Precision::Second),
            Ok(Ordering::Greater)
        );
        assert_eq!(
            compare_times(&zoned, &local, Precision::Second),
            Ok(Ordering::Less)
        );
    }

    #[test]
    fn ceiling_limits_inspected_fields() {
        let a = ZonedTime::new(t(10, 15, 30, 100), east(0));
        let b = ZonedTime::new(t(10, 15, 45, 900), east(0));
        assert_eq!(compare_times(&a, &b, Precision::Minute), Ok(Ordering::Equal));
        assert_eq!(compare_times(&a, &b, Precision::Second), Ok(Ordering::Less));

        let c = ZonedTime::new(t(10, 15, 30, 999), east(0));
        assert_eq!(compare_times(&a, &c, Precision::Second), Ok(Ordering::Equal));
        assert_eq!(
            compare_times(&a, &c, Precision::Millisecond),
            Ok(Ordering::Less)
        );
    }

    #[test]
    fn hour_dominates_finer_fields() {
        let a = ZonedTime::new(t(9, 59, 59, 999), east(0));
        let b = ZonedTime::new(t(10, 0, 0, 0), east(0));
        assert_eq!(
            compare_times(&a, &b, Precision::Millisecond),
            Ok(Ordering::Less)
        );
    }

    #[test]
    fn coarse_ceilings_are_rejected() {
        let a = ZonedTime::local(t(1, 0, 0, 0));
        for ceiling in [Precision::Year, Precision::Month, Precision::Day] {
            assert!(matches!(
                compare_times(&a, &a, ceiling),
                Err(CodecError::UnsupportedInput(_))
            ));
        }
    }

    #[test]
    fn from_chrono_keeps_zone() {
        let dt = east(2).with_ymd_and_hms(2024, 6, 25, 15, 49, 25).unwrap();
        let zoned = ZonedTime::from_chrono(&dt);
        assert_eq!(zoned.time(), t(15, 49, 25, 0));
        assert_eq!(zoned.offset(), east(2));

        let utc = ZonedTime::from_chrono(&dt.with_timezone(&Utc));
        assert_eq!(
            compare_times(&zoned, &utc, Precision::Millisecond),
            Ok(Ordering::Equal)
        );
    }
}
