// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Ready-made field adapters.
//!
//! An adapter replaces the default coercion rule of one field:
//!
//! ```rust,ignore
//! #[field(name = "Places", adapter = fieldmap::adapters::locale_int)]
//! pub places: i32,
//! ```
//!
//! Adapters receive the trimmed text, or `""` when the value is absent, and
//! must return a value for every input.

use crate::coerce::{parse_locale_decimal, parse_locale_integer};

/// Value returned by the locale adapters on unreadable text.
pub const LOCALE_FALLBACK: i32 = -1;

/// Read an integer written with decimal comma and digit grouping.
///
/// `"1 024"` reads as `1024`, `"12,7"` as `12`. Text without digits, or a
/// value outside `i32`, yields [`LOCALE_FALLBACK`].
#[must_use]
pub fn locale_int(text: &str) -> i32 {
    parse_locale_integer(text)
        .and_then(|value| i32::try_from(value).ok())
        .unwrap_or(LOCALE_FALLBACK)
}

/// Read a decimal written with decimal comma and digit grouping.
///
/// Unreadable text yields `-1.0`.
#[must_use]
pub fn locale_double(text: &str) -> f64 {
    parse_locale_decimal(text).unwrap_or(f64::from(LOCALE_FALLBACK))
}
