// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Explicit coercion kind from `#[field(kind = "...")]`.

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

/// Coercion kind named in a field attribute.
///
/// Mirrors `fieldmap::ScalarKind`; emitted as a path to that enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// `"string"`
    String,
    /// `"integer"`, `"int"`
    Integer,
    /// `"double"`, `"float"`
    Double,
    /// `"boolean"`, `"bool"`
    Boolean,
    /// `"enum"`
    Enum,
    /// `"locale_number"`
    LocaleNumber
}

impl Kind {
    /// Every accepted spelling, for error messages.
    pub const EXPECTED: &'static str =
        "\"string\", \"integer\", \"double\", \"boolean\", \"enum\" or \"locale_number\"";

    /// Parse kind from string.
    ///
    /// Case, `_` and `-` are ignored. Returns `None` for unrecognized values.
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['_', '-'], "").as_str() {
            "string" | "str" => Some(Self::String),
            "integer" | "int" => Some(Self::Integer),
            "double" | "float" => Some(Self::Double),
            "boolean" | "bool" => Some(Self::Boolean),
            "enum" => Some(Self::Enum),
            "localenumber" => Some(Self::LocaleNumber),
            _ => None
        }
    }
}

impl ToTokens for Kind {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let variant = match self {
            Self::String => quote!(String),
            Self::Integer => quote!(Integer),
            Self::Double => quote!(Double),
            Self::Boolean => quote!(Boolean),
            Self::Enum => quote!(Enum),
            Self::LocaleNumber => quote!(LocaleNumber)
        };
        tokens.extend(quote!(::fieldmap::ScalarKind::#variant));
    }
}
