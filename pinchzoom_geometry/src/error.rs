// Copyright 2025 the Pinchzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Error returned when a geometry operation receives malformed input.
///
/// These indicate a caller bug and are never silently coerced into defaults.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GeometryError {
    /// The rectangle has a missing (NaN) bound.
    InvalidRect,
    /// The transform is absent: its scale is not a finite positive number or
    /// its translation has a missing component.
    InvalidTransform,
    /// A pivot was supplied but one of its coordinates is missing.
    InvalidPivot,
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRect => f.write_str("rectangle has a missing bound"),
            Self::InvalidTransform => f.write_str("transform is missing or malformed"),
            Self::InvalidPivot => f.write_str("pivot has a missing coordinate"),
        }
    }
}

impl core::error::Error for GeometryError {}
