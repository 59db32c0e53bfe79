// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Proleptic Gregorian calendrical core.
//!
//! Pure functions converting between civil dates and a signed **day
//! number** counted from 1970-01-01 (day 0), and between
//! [`DateTimeValue`]s and integer durations in an [`EpochFormat`].
//!
//! Years are first folded into whole 400-year cycles (146 097 days each)
//! plus a year in the band `1970..2370`, so the year and month walks stay
//! short for any input.  Negative years fold with floor division, which
//! keeps the band year non-negative.

use crate::epoch::{EpochFormat, TimeUnit};
use crate::error::{check_component, CodecError, CodecResult};
use crate::value::{Date, DateTimeValue, Time};

/// Milliseconds in one civil day.
pub const MS_PER_DAY: i64 = 86_400_000;

/// Days in one 400-year Gregorian cycle.
pub const DAYS_PER_CYCLE: i64 = 146_097;

const YEARS_PER_CYCLE: i64 = 400;

/// First year of the normalised band; its January 1st is day 0.
const BASE_YEAR: i64 = 1970;

/// Days before the first of each month (index 12 is the year length).
#[rustfmt::skip]
const COMMON_YEAR_DAYS: [i64; 13] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334, 365];

#[rustfmt::skip]
const LEAP_YEAR_DAYS: [i64; 13] = [0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335, 366];

// ── leap years ────────────────────────────────────────────────────────────

/// Gregorian leap-year rule, valid for year 0 and negative years.
#[inline]
pub const fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// 365 or 366.
#[inline]
pub const fn days_in_year(year: i64) -> i64 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

#[inline]
const fn month_table(year: i64) -> &'static [i64; 13] {
    if is_leap_year(year) {
        &LEAP_YEAR_DAYS
    } else {
        &COMMON_YEAR_DAYS
    }
}

/// Length of `month` in `year`.
pub fn days_in_month(year: i32, month: u8) -> CodecResult<u8> {
    check_component("month", month.into(), 1, 12)?;
    let table = month_table(year.into());
    let m = usize::from(month);
    Ok((table[m] - table[m - 1]) as u8)
}

/// Strict check that `date.day` exists in its month.
///
/// [`encode_date`] does not perform this check: day 31 of April simply
/// lands on May 1st.
pub fn validate_date(date: &Date) -> CodecResult<()> {
    let last = days_in_month(date.year(), date.month())?;
    check_component("day", date.day().into(), 1, last.into())
}

// ── day numbers ───────────────────────────────────────────────────────────

/// Splits `year` into whole cycles relative to [`BASE_YEAR`] and a year in
/// `BASE_YEAR..BASE_YEAR + 400`.
#[inline]
fn fold_year(year: i64) -> (i64, i64) {
    let offset = year - BASE_YEAR;
    (
        offset.div_euclid(YEARS_PER_CYCLE),
        BASE_YEAR + offset.rem_euclid(YEARS_PER_CYCLE),
    )
}

/// Leap years in `1..=year`, for `year >= 0`.
#[inline]
const fn leap_years_through(year: i64) -> i64 {
    year / 4 - year / 100 + year / 400
}

/// Days from January 1st of [`BASE_YEAR`] to January 1st of `year`, `year >= BASE_YEAR`.
#[inline]
const fn days_before_year(year: i64) -> i64 {
    365 * (year - BASE_YEAR) + leap_years_through(year - 1) - leap_years_through(BASE_YEAR - 1)
}

/// Day number of a date whose fields are already range-checked.
pub fn day_number(date: &Date) -> i64 {
    let (cycles, year) = fold_year(date.year().into());
    let table = month_table(year);
    cycles * DAYS_PER_CYCLE
        + days_before_year(year)
        + table[usize::from(date.month()) - 1]
        + i64::from(date.day())
        - 1
}

/// Day number of `year-month-day`.
///
/// Fails when `month ∉ 1..=12` or `day ∉ 1..=31`.  The day is not checked
/// against the month length (see [`validate_date`]).
pub fn encode_date(year: i32, month: u8, day: u8) -> CodecResult<i64> {
    Ok(day_number(&Date::new(year, month, day)?))
}

/// Inverse of [`encode_date`].
///
/// Fails only when the resulting year does not fit an `i32`.
pub fn decode_date(day_number: i64) -> CodecResult<Date> {
    let cycles = day_number.div_euclid(DAYS_PER_CYCLE);
    let mut remaining = day_number.rem_euclid(DAYS_PER_CYCLE);

    // A year never exceeds 366 days, so this start never overshoots.
    let mut year = BASE_YEAR + remaining / 366;
    remaining -= days_before_year(year);
    while remaining >= days_in_year(year) {
        remaining -= days_in_year(year);
        year += 1;
    }

    let table = month_table(year);
    let mut month = 1;
    while remaining >= table[month] {
        month += 1;
    }
    let day = remaining - table[month - 1] + 1;

    let year = cycles
        .checked_mul(YEARS_PER_CYCLE)
        .and_then(|y| y.checked_add(year))
        .and_then(|y| i32::try_from(y).ok())
        .ok_or(CodecError::component(
            "day number",
            day_number,
            day_number_bound(i32::MIN),
            day_number_bound(i32::MAX),
        ))?;
    Ok(Date::from_parts(year, month as u8, day as u8))
}

/// First (for `i32::MIN`) or last (for `i32::MAX`) day number of a year.
fn day_number_bound(year: i32) -> i64 {
    if year < 0 {
        day_number(&Date::from_parts(year, 1, 1))
    } else {
        day_number(&Date::from_parts(year, 12, 31))
    }
}

// ── time of day ───────────────────────────────────────────────────────────

/// Splits milliseconds since midnight into a UTC [`Time`].
pub fn decode_time(ms_of_day: u32) -> CodecResult<Time> {
    check_component("millisecond of day", ms_of_day.into(), 0, MS_PER_DAY - 1)?;
    Ok(split_millisecond_of_day(ms_of_day))
}

/// Field split behind [`decode_time`]; `ms_of_day` must be below [`MS_PER_DAY`].
pub(crate) fn split_millisecond_of_day(ms_of_day: u32) -> Time {
    let seconds = ms_of_day / 1_000;
    Time::from_parts(
        (seconds / 3_600) as u8,
        (seconds / 60 % 60) as u8,
        (seconds % 60) as u8,
        (ms_of_day % 1_000) as u16,
        false,
    )
}

// ── durations ─────────────────────────────────────────────────────────────

/// Duration of `value` since the epoch of `format`, in `format`'s unit.
///
/// The time of day, if present, is truncated to whole units.
pub fn to_duration(value: &DateTimeValue, format: &EpochFormat) -> CodecResult<i64> {
    let unit = format.unit();
    let per_day = unit.units_per_day()?;
    let of_day = match value.time() {
        Some(time) => i64::from(time.millisecond_of_day()) / unit.milliseconds_per_unit()?,
        None => 0,
    };
    day_number(&value.date())
        .checked_mul(per_day)
        .and_then(|total| total.checked_add(of_day))
        .and_then(|total| total.checked_sub(format.epoch()))
        .ok_or(CodecError::Overflow("duration"))
}

/// Value at `duration` units after the epoch of `format`.
///
/// Negative durations decode with floor division, so `-1` second is
/// 23:59:59 on the previous day.
pub fn to_date_time(duration: i64, format: &EpochFormat) -> CodecResult<DateTimeValue> {
    let unit = format.unit();
    let per_day = unit.units_per_day()?;
    let precision = unit.precision()?;
    let absolute = duration
        .checked_add(format.epoch())
        .ok_or(CodecError::Overflow("duration"))?;

    let date = decode_date(absolute.div_euclid(per_day))?;
    if unit == TimeUnit::Days {
        return Ok(DateTimeValue::date_only(date));
    }
    let ms_of_day = absolute.rem_euclid(per_day) * unit.milliseconds_per_unit()?;
    let time = decode_time(ms_of_day as u32)?;
    Ok(DateTimeValue::new(date, Some(time), precision))
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
