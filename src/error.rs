// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type shared by the calendrical core and every codec.

use crate::epoch::TimeUnit;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type CodecResult<T> = Result<T, CodecError>;

/// Failures raised by encode/decode and epoch conversion.
///
/// Every error is detected synchronously inside the call that produced it;
/// nothing is partially written, so callers can simply retry with other input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The year lies outside the `[min, max]` range of the target format.
    #[error("year {year} is outside the supported range {min}..={max}")]
    YearOutOfRange { year: i64, min: i64, max: i64 },

    /// A field (month, day, hour, raw encoding, ...) is outside its valid range.
    #[error("{field} value {value} is outside the valid range {min}..={max}")]
    ComponentOutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Intermediate arithmetic left the range of the target integer type.
    #[error("arithmetic overflow while computing {0}")]
    Overflow(&'static str),

    /// Input the operation cannot accept, e.g. a zone-less time where UTC is required.
    #[error("unsupported input: {0}")]
    UnsupportedInput(&'static str),

    /// The epoch format uses a unit the calendrical core does not handle.
    #[error("unsupported time unit {0:?}")]
    UnsupportedTimeUnit(TimeUnit),
}

impl CodecError {
    pub(crate) fn component(field: &'static str, value: i64, min: i64, max: i64) -> Self {
        Self::ComponentOutOfRange {
            field,
            value,
            min,
            max,
        }
    }

    /// `true` for every range-style variant (year, component, overflow).
    pub fn is_range_error(&self) -> bool {
        matches!(
            self,
            Self::YearOutOfRange { .. } | Self::ComponentOutOfRange { .. } | Self::Overflow(_)
        )
    }
}

/// Checks `min <= value <= max` for a single field.
#[inline]
pub(crate) fn check_component(
    field: &'static str,
    value: i64,
    min: i64,
    max: i64,
) -> CodecResult<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(CodecError::component(field, value, min, max))
    }
}
