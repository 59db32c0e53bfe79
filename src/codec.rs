// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The codec contract and runtime format dispatch.
//!
//! Each storage format is a zero-sized marker implementing [`DateCodec`]:
//! a native encoding type, a fixed [`CodecDescriptor`] and a pair of
//! encode/decode functions.  [`Format`] is the closed set of those markers
//! for callers that pick a format at runtime; it exchanges values through
//! the width-tagged [`Encoded`].
//!
//! Byte order is not this layer's concern: encodings are plain integers or
//! floats and the caller turns them into bytes.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dos::{DosDate, DosDateTime};
use crate::error::{CodecError, CodecResult};
use crate::julian::JulianDay;
use crate::ntfs::NtfsTicks;
use crate::paradox::ParadoxDate;
use crate::value::{DateTimeValue, Precision};

// ═══════════════════════════════════════════════════════════════════════════
// Descriptor and contract
// ═══════════════════════════════════════════════════════════════════════════

/// Fixed metadata of a format.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CodecDescriptor {
    /// Width of the native encoding in bits.
    pub bit_width: u32,
    /// Finest field that survives a round trip.
    pub precision: Precision,
    pub min_year: i32,
    pub max_year: i32,
    /// Whether zone-less (`is_local`) values are rejected by `encode`.
    pub requires_utc: bool,
}

impl CodecDescriptor {
    /// Range and zone checks shared by every `encode`.
    pub fn check(&self, value: &DateTimeValue) -> CodecResult<()> {
        let year = value.date().year();
        if !(self.min_year..=self.max_year).contains(&year) {
            log::debug!(
                "rejecting year {year}: outside {}..={}",
                self.min_year,
                self.max_year
            );
            return Err(CodecError::YearOutOfRange {
                year: year.into(),
                min: self.min_year.into(),
                max: self.max_year.into(),
            });
        }
        if self.requires_utc && value.is_local() {
            log::debug!("rejecting zone-less time {value}: format stores UTC");
            return Err(CodecError::UnsupportedInput(
                "zone-less time where UTC is required",
            ));
        }
        Ok(())
    }
}

/// A fixed date/time storage format.
///
/// Every implementation of [`encode`](DateCodec::encode) starts with
/// `Self::DESCRIPTOR.check(value)?`; the raw bit packing behind it stays
/// private to the format's module.
pub trait DateCodec: Copy + fmt::Debug + 'static {
    /// Native encoding, e.g. `u16` for a DOS date.
    type Encoding: Copy + fmt::Debug + Into<Encoded> + TryFrom<Encoded, Error = CodecError>;

    /// Stable name, also accepted by [`Format::from_str`].
    const NAME: &'static str;

    const DESCRIPTOR: CodecDescriptor;

    /// Decodes a native encoding into a UTC value tagged with the format precision.
    ///
    /// Bit patterns `encode` never produces may fail with a range error.
    fn decode(encoding: Self::Encoding) -> CodecResult<DateTimeValue>;

    /// Encodes `value`, rejecting out-of-range years and, where the format
    /// stores UTC, zone-less times.
    fn encode(value: &DateTimeValue) -> CodecResult<Self::Encoding>;

    /// Encodes a zoned chrono instant after normalising it to UTC.
    fn encode_zoned<Tz: TimeZone>(datetime: &DateTime<Tz>) -> CodecResult<Self::Encoding> {
        Self::encode(&DateTimeValue::from_zoned(datetime))
    }

    #[inline]
    fn precision() -> Precision {
        Self::DESCRIPTOR.precision
    }

    #[inline]
    fn min_bits() -> u32 {
        Self::DESCRIPTOR.bit_width
    }

    #[inline]
    fn minimum_year() -> i32 {
        Self::DESCRIPTOR.min_year
    }

    #[inline]
    fn maximum_year() -> i32 {
        Self::DESCRIPTOR.max_year
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Encoded
// ═══════════════════════════════════════════════════════════════════════════

/// A native encoding tagged with its type.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Encoded {
    U16(u16),
    U32(u32),
    U64(u64),
    I32(i32),
    F64(f64),
}

/// Generates `From<$ty> for Encoded` and `TryFrom<Encoded> for $ty`.
macro_rules! impl_encoded {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        $(
            impl From<$ty> for Encoded {
                #[inline]
                fn from(value: $ty) -> Self {
                    Encoded::$variant(value)
                }
            }

            impl TryFrom<Encoded> for $ty {
                type Error = CodecError;

                #[inline]
                fn try_from(encoded: Encoded) -> Result<Self, Self::Error> {
                    match encoded {
                        Encoded::$variant(value) => Ok(value),
                        _ => Err(CodecError::UnsupportedInput(
                            "encoding type does not match the format",
                        )),
                    }
                }
            }
        )+
    };
}

impl_encoded!(U16(u16), U32(u32), U64(u64), I32(i32), F64(f64));

impl fmt::Display for Encoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoded::U16(v) => write!(f, "{v:#06x}"),
            Encoded::U32(v) => write!(f, "{v:#010x}"),
            Encoded::U64(v) => write!(f, "{v}"),
            Encoded::I32(v) => write!(f, "{v}"),
            Encoded::F64(v) => write!(f, "{v}"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Format
// ═══════════════════════════════════════════════════════════════════════════

/// The closed set of supported formats, for runtime selection.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Format {
    DosDate,
    DosDateTime,
    NtfsTicks,
    JulianDay,
    ParadoxDate,
}

/// Runs `$body` with `$codec` bound to the marker type of `$format`.
macro_rules! with_codec {
    ($format:expr, $codec:ident => $body:expr) => {
        match $format {
            Format::DosDate => {
                type $codec = DosDate;
                $body
            }
            Format::DosDateTime => {
                type $codec = DosDateTime;
                $body
            }
            Format::NtfsTicks => {
                type $codec = NtfsTicks;
                $body
            }
            Format::JulianDay => {
                type $codec = JulianDay;
                $body
            }
            Format::ParadoxDate => {
                type $codec = ParadoxDate;
                $body
            }
        }
    };
}

impl Format {
    pub const ALL: [Format; 5] = [
        Format::DosDate,
        Format::DosDateTime,
        Format::NtfsTicks,
        Format::JulianDay,
        Format::ParadoxDate,
    ];

    pub fn name(self) -> &'static str {
        with_codec!(self, C => C::NAME)
    }

    pub fn descriptor(self) -> CodecDescriptor {
        with_codec!(self, C => C::DESCRIPTOR)
    }

    pub fn encode(self, value: &DateTimeValue) -> CodecResult<Encoded> {
        with_codec!(self, C => C::encode(value).map(Into::into))
    }

    pub fn encode_zoned<Tz: TimeZone>(self, datetime: &DateTime<Tz>) -> CodecResult<Encoded> {
        self.encode(&DateTimeValue::from_zoned(datetime))
    }

    /// Decodes `encoded`; fails if its type is not this format's encoding.
    pub fn decode(self, encoded: Encoded) -> CodecResult<DateTimeValue> {
        with_codec!(self, C => C::decode(encoded.try_into()?))
    }

    #[inline]
    pub fn precision(self) -> Precision {
        self.descriptor().precision
    }

    #[inline]
    pub fn min_bits(self) -> u32 {
        self.descriptor().bit_width
    }

    #[inline]
    pub fn minimum_year(self) -> i32 {
        self.descriptor().min_year
    }

    #[inline]
    pub fn maximum_year(self) -> i32 {
        self.descriptor().max_year
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(s))
            .ok_or(CodecError::UnsupportedInput("unknown format name"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Date, Time};

    fn sample() -> DateTimeValue {
        DateTimeValue::at(
            Date::new(2002, 3, 18).unwrap(),
            Time::new(14, 47, 50, 0).unwrap(),
        )
    }

    #[test]
    fn descriptors_match_marker_metadata() {
        assert_eq!(Format::DosDate.descriptor(), DosDate::DESCRIPTOR);
        assert_eq!(Format::DosDateTime.min_bits(), 32);
        assert_eq!(Format::NtfsTicks.precision(), Precision::Millisecond);
        assert_eq!(Format::JulianDay.min_bits(), 64);
        assert_eq!(Format::ParadoxDate.precision(), Precision::Day);
        assert_eq!(Format::DosDate.minimum_year(), 1980);
        assert_eq!(Format::NtfsTicks.maximum_year(), 30828);
    }

    #[test]
    fn encode_dispatches_to_marker() {
        assert_eq!(
            Format::DosDateTime.encode(&sample()),
            Ok(Encoded::U32(0x2C72_75F9))
        );
        assert_eq!(
            Format::DosDate.encode(&sample()),
            DosDate::encode(&sample()).map(Encoded::U16)
        );
    }

    #[test]
    fn decode_rejects_mismatched_encoding() {
        assert_eq!(
            Format::DosDate.decode(Encoded::U32(0)),
            Err(CodecError::UnsupportedInput(
                "encoding type does not match the format"
            ))
        );
        assert!(Format::ParadoxDate.decode(Encoded::I32(1)).is_ok());
    }

    #[test]
    fn names_roundtrip_through_from_str() {
        for format in Format::ALL {
            assert_eq!(format.to_string().parse::<Format>(), Ok(format));
        }
        assert_eq!("NTFS".parse::<Format>(), Ok(Format::NtfsTicks));
        assert!("unix".parse::<Format>().is_err());
    }

    #[test]
    fn descriptor_check_reports_year_and_zone() {
        let d = DosDate::DESCRIPTOR;
        let early = DateTimeValue::date_only(Date::new(1979, 12, 31).unwrap());
        assert_eq!(
            d.check(&early),
            Err(CodecError::YearOutOfRange {
                year: 1979,
                min: 1980,
                max: 2107
            })
        );
        let local = DateTimeValue::at(
            Date::new(2002, 3, 18).unwrap(),
            Time::local(1, 0, 0, 0).unwrap(),
        );
        assert!(d.check(&local).is_ok());
        assert!(matches!(
            NtfsTicks::DESCRIPTOR.check(&local),
            Err(CodecError::UnsupportedInput(_))
        ));
    }

    #[test]
    fn encoded_display() {
        assert_eq!(Encoded::U32(0x2C72_75F9).to_string(), "0x2c7275f9");
        assert_eq!(Encoded::U16(0x2C72).to_string(), "0x2c72");
        assert_eq!(Encoded::I32(-5).to_string(), "-5");
    }
}
