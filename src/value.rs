// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Precision-tagged civil date/time values.
//!
//! [`DateTimeValue`] is the currency every codec speaks: a proleptic
//! Gregorian [`Date`] with astronomical year numbering, an optional
//! [`Time`] of day and a [`Precision`] tag.  Values are immutable `Copy`
//! types; decoding always builds a fresh one.
//!
//! Fields finer than the precision tag carry no meaning.  Equality and
//! hashing ignore them, so a `DAY` value decoded from a DOS date equals
//! any other `DAY` value on the same calendar day.

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::calendar;
#[cfg(feature = "serde")]
use crate::error::CodecError;
use crate::error::{check_component, CodecResult};

// ═══════════════════════════════════════════════════════════════════════════
// Precision
// ═══════════════════════════════════════════════════════════════════════════

/// Granularity of a value, ordered from coarsest to finest.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Precision {
    Year,
    /// Not produced by any codec; kept so the ordering has no gaps.
    Month,
    Day,
    Minute,
    Second,
    Millisecond,
}

// ═══════════════════════════════════════════════════════════════════════════
// Date
// ═══════════════════════════════════════════════════════════════════════════

/// A proleptic Gregorian calendar date.
///
/// `year` uses astronomical numbering (year 0 is 1 BC).  Only the field
/// ranges are checked; whether `day` fits `month` is left to
/// [`calendar::validate_date`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawDate"))]
pub struct Date {
    year: i32,
    month: u8,
    day: u8,
}

impl Date {
    /// Builds a date, rejecting `month ∉ 1..=12` and `day ∉ 1..=31`.
    pub fn new(year: i32, month: u8, day: u8) -> CodecResult<Self> {
        check_component("month", month.into(), 1, 12)?;
        check_component("day", day.into(), 1, 31)?;
        Ok(Self { year, month, day })
    }

    /// Builds a date from fields already known to be in range.
    #[inline]
    pub(crate) const fn from_parts(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    #[inline]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    #[inline]
    pub const fn day(&self) -> u8 {
        self.day
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_year(f, self.year)?;
        write!(f, "-{:02}-{:02}", self.month, self.day)
    }
}

fn write_year(f: &mut fmt::Formatter<'_>, year: i32) -> fmt::Result {
    if (0..=9999).contains(&year) {
        write!(f, "{year:04}")
    } else {
        write!(f, "{year:+05}")
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Time
// ═══════════════════════════════════════════════════════════════════════════

/// A time of day with millisecond resolution.
///
/// `is_local` marks a zone-less wall-clock reading.  When it is `false`
/// the fields are already normalised to UTC.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawTime"))]
pub struct Time {
    hour: u8,
    minute: u8,
    second: u8,
    millisecond: u16,
    is_local: bool,
}

impl Time {
    /// 00:00:00.000 UTC.
    pub const MIDNIGHT: Self = Self::from_parts(0, 0, 0, 0, false);

    /// Builds a UTC time of day.
    pub fn new(hour: u8, minute: u8, second: u8, millisecond: u16) -> CodecResult<Self> {
        Self::checked(hour, minute, second, millisecond, false)
    }

    /// Builds a zone-less (wall-clock) time of day.
    pub fn local(hour: u8, minute: u8, second: u8, millisecond: u16) -> CodecResult<Self> {
        Self::checked(hour, minute, second, millisecond, true)
    }

    fn checked(
        hour: u8,
        minute: u8,
        second: u8,
        millisecond: u16,
        is_local: bool,
    ) -> CodecResult<Self> {
        check_component("hour", hour.into(), 0, 23)?;
        check_component("minute", minute.into(), 0, 59)?;
        check_component("second", second.into(), 0, 59)?;
        check_component("millisecond", millisecond.into(), 0, 999)?;
        Ok(Self::from_parts(hour, minute, second, millisecond, is_local))
    }

    #[inline]
    pub(crate) const fn from_parts(
        hour: u8,
        minute: u8,
        second: u8,
        millisecond: u16,
        is_local: bool,
    ) -> Self {
        Self {
            hour,
            minute,
            second,
            millisecond,
            is_local,
        }
    }

    /// Rebuilds a UTC time from milliseconds since midnight.
    ///
    /// Equivalent to [`calendar::decode_time`].
    #[inline]
    pub fn from_millisecond_of_day(ms: u32) -> CodecResult<Self> {
        calendar::decode_time(ms)
    }

    /// Milliseconds elapsed since midnight, `0..86_400_000`.
    #[inline]
    pub const fn millisecond_of_day(&self) -> u32 {
        ((self.hour as u32 * 60 + self.minute as u32) * 60 + self.second as u32) * 1_000
            + self.millisecond as u32
    }

    /// Same reading with the zone-less flag replaced.
    #[inline]
    pub const fn with_local(self, is_local: bool) -> Self {
        Self { is_local, ..self }
    }

    #[inline]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    #[inline]
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    #[inline]
    pub const fn second(&self) -> u8 {
        self.second
    }

    #[inline]
    pub const fn millisecond(&self) -> u16 {
        self.millisecond
    }

    #[inline]
    pub const fn is_local(&self) -> bool {
        self.is_local
    }

    fn write_to(&self, f: &mut fmt::Formatter<'_>, precision: Precision) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)?;
        if precision >= Precision::Second {
            write!(f, ":{:02}", self.second)?;
        }
        if precision >= Precision::Millisecond {
            write!(f, ".{:03}", self.millisecond)?;
        }
        if !self.is_local {
            f.write_str("Z")?;
        }
        Ok(())
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f, Precision::Millisecond)
    }
}

// ── serde ─────────────────────────────────────────────────────────────────

/// Wire shape of [`Date`]; deserialized fields go through [`Date::new`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawDate {
    year: i32,
    month: u8,
    day: u8,
}

#[cfg(feature = "serde")]
impl TryFrom<RawDate> for Date {
    type Error = CodecError;

    fn try_from(raw: RawDate) -> CodecResult<Self> {
        Date::new(raw.year, raw.month, raw.day)
    }
}

/// Wire shape of [`Time`]; deserialized fields go through the checked constructor.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawTime {
    hour: u8,
    minute: u8,
    second: u8,
    millisecond: u16,
    is_local: bool,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTime> for Time {
    type Error = CodecError;

    fn try_from(raw: RawTime) -> CodecResult<Self> {
        Time::checked(
            raw.hour,
            raw.minute,
            raw.second,
            raw.millisecond,
            raw.is_local,
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// DateTimeValue
// ═══════════════════════════════════════════════════════════════════════════

/// A civil date, an optional time of day and the precision they carry.
#[derive(Debug, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DateTimeValue {
    date: Date,
    time: Option<Time>,
    precision: Precision,
}

/// Significant fields of a value, with everything finer than the precision zeroed.
type Key = (i32, u8, u8, u8, u8, u8, u16, bool);

impl DateTimeValue {
    #[inline]
    pub const fn new(date: Date, time: Option<Time>, precision: Precision) -> Self {
        Self {
            date,
            time,
            precision,
        }
    }

    /// A `DAY` precision value without a time of day.
    #[inline]
    pub const fn date_only(date: Date) -> Self {
        Self::new(date, None, Precision::Day)
    }

    /// A `MILLISECOND` precision value.
    #[inline]
    pub const fn at(date: Date, time: Time) -> Self {
        Self::new(date, Some(time), Precision::Millisecond)
    }

    #[inline]
    pub const fn date(&self) -> Date {
        self.date
    }

    #[inline]
    pub const fn time(&self) -> Option<Time> {
        self.time
    }

    /// The time of day, or UTC midnight when absent.
    #[inline]
    pub fn time_or_midnight(&self) -> Time {
        self.time.unwrap_or(Time::MIDNIGHT)
    }

    #[inline]
    pub const fn precision(&self) -> Precision {
        self.precision
    }

    /// `true` when the value carries a zone-less time of day.
    #[inline]
    pub fn is_local(&self) -> bool {
        self.time.is_some_and(|t| t.is_local)
    }

    /// Same fields, different precision tag.
    #[inline]
    pub const fn with_precision(self, precision: Precision) -> Self {
        Self { precision, ..self }
    }

    /// Compares only the fields that are significant at `precision`.
    pub fn matches(&self, other: &Self, precision: Precision) -> bool {
        self.key(precision) == other.key(precision)
    }

    fn key(&self, precision: Precision) -> Key {
        let d = self.date;
        let t = self.time_or_midnight();
        match precision {
            Precision::Year => (d.year, 0, 0, 0, 0, 0, 0, false),
            Precision::Month => (d.year, d.month, 0, 0, 0, 0, 0, false),
            Precision::Day => (d.year, d.month, d.day, 0, 0, 0, 0, false),
            Precision::Minute => (d.year, d.month, d.day, t.hour, t.minute, 0, 0, t.is_local),
            Precision::Second => (
                d.year, d.month, d.day, t.hour, t.minute, t.second, 0, t.is_local,
            ),
            Precision::Millisecond => (
                d.year,
                d.month,
                d.day,
                t.hour,
                t.minute,
                t.second,
                t.millisecond,
                t.is_local,
            ),
        }
    }

    // ── chrono interop ────────────────────────────────────────────────

    /// Captures a zoned instant, normalised to UTC, at `MILLISECOND` precision.
    pub fn from_zoned<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Self {
        Self::from_naive_parts(&datetime.naive_utc(), false)
    }

    /// Captures a zone-less wall-clock reading (`is_local = true`).
    pub fn from_naive(datetime: &NaiveDateTime) -> Self {
        Self::from_naive_parts(datetime, true)
    }

    fn from_naive_parts(datetime: &NaiveDateTime, is_local: bool) -> Self {
        // chrono folds a leap second into nanosecond >= 1e9; keep it in second 59.
        let millisecond = (datetime.nanosecond() / 1_000_000).min(999) as u16;
        let date = Date::from_parts(
            datetime.year(),
            datetime.month() as u8,
            datetime.day() as u8,
        );
        let time = Time::from_parts(
            datetime.hour() as u8,
            datetime.minute() as u8,
            datetime.second() as u8,
            millisecond,
            is_local,
        );
        Self::at(date, time)
    }

    /// Converts to a `chrono::NaiveDateTime`, ignoring the zone flag.
    ///
    /// Returns `None` for dates chrono cannot represent (including
    /// month-length violations such as April 31).
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        let t = self.time_or_midnight();
        NaiveDate::from_ymd_opt(self.date.year, self.date.month.into(), self.date.day.into())?
            .and_hms_milli_opt(
                t.hour.into(),
                t.minute.into(),
                t.second.into(),
                t.millisecond.into(),
            )
    }

    /// Converts to a `chrono::DateTime<Utc>`.
    ///
    /// Returns `None` for zone-less values or dates chrono cannot represent.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        if self.is_local() {
            return None;
        }
        self.to_naive().map(|naive| naive.and_utc())
    }
}

impl PartialEq for DateTimeValue {
    fn eq(&self, other: &Self) -> bool {
        self.precision == other.precision && self.matches(other, self.precision)
    }
}

impl Eq for DateTimeValue {}

impl Hash for DateTimeValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.precision.hash(state);
        self.key(self.precision).hash(state);
    }
}

impl fmt::Display for DateTimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.precision {
            Precision::Year => write_year(f, self.date.year),
            Precision::Month => {
                write_year(f, self.date.year)?;
                write!(f, "-{:02}", self.date.month)
            }
            Precision::Day => write!(f, "{}", self.date),
            precision => {
                write!(f, "{}T", self.date)?;
                self.time_or_midnight().write_to(f, precision)
            }
        }
    }
}

impl From<Date> for DateTimeValue {
    fn from(date: Date) -> Self {
        Self::date_only(date)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use std::collections::HashSet;

    fn ymd(y: i32, m: u8, d: u8) -> Date {
        Date::new(y, m, d).unwrap()
    }

    #[test]
    fn date_rejects_out_of_range_fields() {
        assert!(Date::new(2024, 0, 1).unwrap_err().is_range_error());
        assert!(Date::new(2024, 13, 1).is_err());
        assert!(Date::new(2024, 1, 0).is_err());
        assert!(Date::new(2024, 1, 32).is_err());
        // Month length is not checked here.
        assert!(Date::new(2023, 4, 31).is_ok());
        assert!(Date::new(-4712, 1, 1).is_ok());
    }

    #[test]
    fn time_rejects_out_of_range_fields() {
        assert!(Time::new(24, 0, 0, 0).is_err());
        assert!(Time::new(0, 60, 0, 0).is_err());
        assert!(Time::new(0, 0, 60, 0).is_err());
        assert!(Time::new(0, 0, 0, 1000).is_err());
        let t = Time::local(23, 59, 59, 999).unwrap();
        assert!(t.is_local());
        assert!(!t.with_local(false).is_local());
    }

    #[test]
    fn millisecond_of_day_roundtrip() {
        let t = Time::new(13, 49, 25, 50).unwrap();
        assert_eq!(t.millisecond_of_day(), 49_765_050);
        assert_eq!(Time::from_millisecond_of_day(49_765_050).unwrap(), t);
        assert_eq!(Time::MIDNIGHT.millisecond_of_day(), 0);
    }

    #[test]
    fn precision_orders_by_granularity() {
        assert!(Precision::Year < Precision::Month);
        assert!(Precision::Month < Precision::Day);
        assert!(Precision::Day < Precision::Minute);
        assert!(Precision::Minute < Precision::Second);
        assert!(Precision::Second < Precision::Millisecond);
    }

    #[test]
    fn equality_ignores_fields_finer_than_precision() {
        let d = ymd(2002, 3, 18);
        let a = DateTimeValue::new(d, Some(Time::new(14, 47, 50, 0).unwrap()), Precision::Day);
        let b = DateTimeValue::date_only(d);
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));

        let s1 = DateTimeValue::new(d, Some(Time::new(14, 47, 50, 1).unwrap()), Precision::Second);
        let s2 = DateTimeValue::new(d, Some(Time::new(14, 47, 50, 999).unwrap()), Precision::Second);
        assert_eq!(s1, s2);
        assert_ne!(s1, s1.with_precision(Precision::Millisecond));
    }

    #[test]
    fn matches_compares_at_requested_precision() {
        let d = ymd(2024, 6, 25);
        let a = DateTimeValue::at(d, Time::new(13, 49, 25, 50).unwrap());
        let b = DateTimeValue::at(d, Time::new(13, 49, 24, 0).unwrap());
        assert!(a.matches(&b, Precision::Minute));
        assert!(!a.matches(&b, Precision::Second));
        assert!(a.matches(&DateTimeValue::date_only(ymd(2024, 1, 1)), Precision::Year));
    }

    #[test]
    fn local_flag_is_significant_for_time_precisions() {
        let d = ymd(2024, 6, 25);
        let utc = DateTimeValue::at(d, Time::new(1, 2, 3, 4).unwrap());
        let local = DateTimeValue::at(d, Time::local(1, 2, 3, 4).unwrap());
        assert_ne!(utc, local);
        assert!(utc.matches(&local, Precision::Day));
    }

    #[test]
    fn display_truncates_at_precision() {
        let d = ymd(2024, 6, 25);
        let v = DateTimeValue::at(d, Time::new(13, 49, 25, 50).unwrap());
        assert_eq!(v.to_string(), "2024-06-25T13:49:25.050Z");
        assert_eq!(v.with_precision(Precision::Second).to_string(), "2024-06-25T13:49:25Z");
        assert_eq!(v.with_precision(Precision::Minute).to_string(), "2024-06-25T13:49Z");
        assert_eq!(v.with_precision(Precision::Day).to_string(), "2024-06-25");
        assert_eq!(v.with_precision(Precision::Month).to_string(), "2024-06");
        assert_eq!(v.with_precision(Precision::Year).to_string(), "2024");

        let local = DateTimeValue::at(d, Time::local(8, 0, 0, 0).unwrap());
        assert_eq!(local.to_string(), "2024-06-25T08:00:00.000");
    }

    #[test]
    fn display_signs_years_outside_four_digits() {
        assert_eq!(ymd(0, 1, 1).to_string(), "0000-01-01");
        assert_eq!(ymd(-1, 12, 31).to_string(), "-0001-12-31");
        assert_eq!(ymd(30828, 9, 14).to_string(), "+30828-09-14");
    }

    #[test]
    fn from_zoned_normalises_to_utc() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let zoned = offset.with_ymd_and_hms(2002, 3, 18, 0, 30, 0).unwrap();
        let v = DateTimeValue::from_zoned(&zoned);
        assert_eq!(v.date(), ymd(2002, 3, 17));
        assert_eq!(v.time(), Some(Time::new(22, 30, 0, 0).unwrap()));
        assert_eq!(v.precision(), Precision::Millisecond);
        assert!(!v.is_local());
    }

    #[test]
    fn from_naive_is_local_and_has_no_utc() {
        let naive = NaiveDate::from_ymd_opt(1999, 12, 31)
            .unwrap()
            .and_hms_milli_opt(23, 59, 59, 250)
            .unwrap();
        let v = DateTimeValue::from_naive(&naive);
        assert!(v.is_local());
        assert_eq!(v.to_utc(), None);
        assert_eq!(v.to_naive(), Some(naive));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_goes_through_checked_constructors() {
        let good = r#"{"date":{"year":2024,"month":6,"day":25},"time":null,"precision":"Day"}"#;
        let v: DateTimeValue = serde_json::from_str(good).unwrap();
        assert_eq!(v, DateTimeValue::date_only(ymd(2024, 6, 25)));

        for bad in [
            r#"{"date":{"year":2024,"month":0,"day":1},"time":null,"precision":"Day"}"#,
            r#"{"date":{"year":2024,"month":14,"day":1},"time":null,"precision":"Day"}"#,
            r#"{"date":{"year":2024,"month":1,"day":99},"time":null,"precision":"Day"}"#,
        ] {
            assert!(serde_json::from_str::<DateTimeValue>(bad).is_err(), "{bad}");
        }

        let hour_24 = r#"{"hour":24,"minute":0,"second":0,"millisecond":0,"is_local":false}"#;
        let err = serde_json::from_str::<Time>(hour_24).unwrap_err();
        assert!(err.to_string().contains("hour value 24"));

        let t = Time::local(8, 30, 0, 5).unwrap();
        let back: Time = serde_json::from_str(&serde_json::to_string(&t).unwrap()).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn to_utc_roundtrips_chrono() {
        let dt = Utc.with_ymd_and_hms(2024, 6, 25, 13, 49, 25).unwrap()
            + chrono::Duration::milliseconds(50);
        let v = DateTimeValue::from_zoned(&dt);
        assert_eq!(v.to_utc(), Some(dt));
        assert_eq!(DateTimeValue::date_only(ymd(2023, 4, 31)).to_utc(), None);
    }
}
