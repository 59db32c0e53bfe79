// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Astronomical Julian Day as a 64-bit float.
//!
//! The integer day comes from the closed-form Fliegel & Van Flandern (1968)
//! Julian Day Number, evaluated with floor division so it also holds before
//! JD 0.  Civil midnight sits half a day before the JDN (which names noon),
//! and the time of day is added as a fraction:
//!
//! ```text
//! JD = JDN − 0.5 + hour/24 + minute/1440 + second/86400
//! ```
//!
//! This deliberately does not go through the shared calendrical core, so
//! the two algorithms check each other in the tests.  Milliseconds are not
//! stored; decode rounds to the nearest second.

use qtty::{Days, Second};

use crate::codec::{CodecDescriptor, DateCodec};
use crate::error::{CodecError, CodecResult};
use crate::value::{Date, DateTimeValue, Precision, Time};

/// Largest |JD| accepted by decode; keeps the recovered year inside `i32`.
const MAX_ABS_JULIAN_DAY: f64 = 5.0e11;

const SECONDS_PER_DAY: i64 = 86_400;

/// Astronomical Julian Day (days since −4713-11-24T12:00Z, proleptic Gregorian).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct JulianDay;

/// Julian Day Number of the civil date (the JD at noon of that day).
pub fn julian_day_number(year: i64, month: i64, day: i64) -> i64 {
    let a = if month <= 2 { -1 } else { 0 };
    (1461 * (year + 4800 + a)).div_euclid(4) + (367 * (month - 2 - 12 * a)).div_euclid(12)
        - (3 * (year + 4900 + a).div_euclid(100)).div_euclid(4)
        + day
        - 32_075
}

/// Inverse of [`julian_day_number`], as `(year, month, day)`.
pub fn civil_from_julian_day_number(jdn: i64) -> (i64, i64, i64) {
    let mut l = jdn + 68_569;
    let n = (4 * l).div_euclid(146_097);
    l -= (146_097 * n + 3).div_euclid(4);
    let i = (4_000 * (l + 1)).div_euclid(1_461_001);
    l = l - (1_461 * i).div_euclid(4) + 31;
    let j = (80 * l).div_euclid(2_447);
    let day = l - (2_447 * j).div_euclid(80);
    l = j.div_euclid(11);
    let month = j + 2 - 12 * l;
    let year = 100 * (n - 49) + i + l;
    (year, month, day)
}

impl JulianDay {
    /// The encoding as a typed day quantity.
    pub fn julian_date(value: &DateTimeValue) -> CodecResult<Days> {
        Self::encode(value).map(Days::new)
    }
}

impl DateCodec for JulianDay {
    type Encoding = f64;

    const NAME: &'static str = "julian-day";

    const DESCRIPTOR: CodecDescriptor = CodecDescriptor {
        bit_width: 64,
        precision: Precision::Second,
        min_year: -1_000_000,
        max_year: 1_000_000,
        requires_utc: true,
    };

    fn encode(value: &DateTimeValue) -> CodecResult<f64> {
        Self::DESCRIPTOR.check(value)?;
        let date = value.date();
        let jdn = julian_day_number(
            date.year().into(),
            date.month().into(),
            date.day().into(),
        );
        let seconds_of_day = match value.time() {
            Some(time) => {
                if time.millisecond() != 0 {
                    log::trace!("dropping milliseconds of {time} in Julian Day");
                }
                time.millisecond_of_day() / 1_000
            }
            None => 0,
        };
        let midnight = Days::new(jdn as f64 - 0.5);
        let fraction = Days::new(f64::from(seconds_of_day) / SECONDS_PER_DAY as f64);
        Ok((midnight + fraction).value())
    }

    fn decode(jd: f64) -> CodecResult<DateTimeValue> {
        if !jd.is_finite() {
            return Err(CodecError::UnsupportedInput("non-finite Julian Day"));
        }
        if jd.abs() > MAX_ABS_JULIAN_DAY {
            return Err(CodecError::component(
                "Julian Day",
                jd as i64,
                -(MAX_ABS_JULIAN_DAY as i64),
                MAX_ABS_JULIAN_DAY as i64,
            ));
        }

        let shifted = jd + 0.5;
        let whole = shifted.floor();
        let mut jdn = whole as i64;
        let mut seconds = Days::new(shifted - whole).to::<Second>().value().round() as i64;
        if seconds >= SECONDS_PER_DAY {
            jdn += 1;
            seconds -= SECONDS_PER_DAY;
        }

        let (year, month, day) = civil_from_julian_day_number(jdn);
        let year = i32::try_from(year).map_err(|_| {
            CodecError::component("year", year, i32::MIN.into(), i32::MAX.into())
        })?;
        let date = Date::new(year, month as u8, day as u8)?;
        let time = Time::from_millisecond_of_day((seconds * 1_000) as u32)?;
        Ok(DateTimeValue::new(date, Some(time), Precision::Second))
    }
}
