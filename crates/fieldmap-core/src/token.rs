// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Enumerated tokens with a first-class unknown value.

/// A closed set of text tokens mapped onto enum variants.
///
/// Lookups never fail: text that matches no declared token maps to
/// [`Token::UNKNOWN`], and callers are expected to handle that variant like
/// any other.
///
/// Usually derived:
///
/// ```rust,ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Token)]
/// pub enum Theme {
///     #[token("DEPLACEMENT")]
///     Deplacement,
///     #[token(unknown)]
///     Unknown
/// }
/// ```
pub trait Token: Sized + 'static {
    /// Variant used for unmatched or absent text.
    const UNKNOWN: Self;

    /// Map text onto a variant by exact match.
    fn from_token(token: &str) -> Self;

    /// Declared text of this variant.
    fn as_token(&self) -> &'static str;

    /// Check if this is the unknown variant.
    fn is_unknown(&self) -> bool
    where
        Self: PartialEq
    {
        *self == Self::UNKNOWN
    }
}
