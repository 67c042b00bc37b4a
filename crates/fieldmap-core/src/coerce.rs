// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Raw text to typed value conversion.
//!
//! Coercion never fails. Every [`Scalar`] has a fallback value that is used
//! when the text is absent or cannot be read, so one malformed field never
//! aborts a record, a row or a document.
//!
//! # Default Rules
//!
//! | Kind | Grammar | Fallback |
//! |------|---------|----------|
//! | `String` | identity | `""` |
//! | `Integer` | invariant (`-1234`) | `0` |
//! | `Double` | invariant (`12.5`) | `0.0` |
//! | `Boolean` | configured tokens, case-insensitive | `false` |
//! | `Enum` | exact token match | `UNKNOWN` variant |
//! | `LocaleNumber` | French (`1 234,5`) | `0` / `0.0` |
//!
//! `Option<T>` wraps any scalar; empty, absent and unreadable text give `None`.

use std::fmt;

/// Coercion strategy for one mapped field.
///
/// Declared per field (or inferred from the field type) and passed to
/// [`Scalar::coerce`] so numeric types can switch grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ScalarKind {
    /// Text kept as delivered.
    String,

    /// Whole number, invariant grammar.
    Integer,

    /// Floating point number, invariant grammar.
    Double,

    /// Token matched against the configured true/false sets.
    Boolean,

    /// Token matched against a declared variant set.
    Enum,

    /// Number written with decimal comma and digit grouping.
    LocaleNumber
}

impl ScalarKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::String,
        Self::Integer,
        Self::Double,
        Self::Boolean,
        Self::Enum,
        Self::LocaleNumber
    ];

    /// Attribute spelling of this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Double => "double",
            Self::Boolean => "boolean",
            Self::Enum => "enum",
            Self::LocaleNumber => "locale_number"
        }
    }

    /// Parse a kind from its attribute spelling.
    ///
    /// Matching ignores case and `_`/`-` separators. Returns `None` for
    /// unrecognized names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().replace(['_', '-'], "").as_str() {
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

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tunable parts of the default coercion rules.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CoercionRules {
    /// Tokens read as `true`, compared case-insensitively.
    pub true_tokens: Vec<String>,

    /// Tokens read as `false`, compared case-insensitively.
    pub false_tokens: Vec<String>
}

impl Default for CoercionRules {
    fn default() -> Self {
        Self {
            true_tokens:  ["true", "1", "oui", "yes"].map(String::from).to_vec(),
            false_tokens: ["false", "0", "non", "no"].map(String::from).to_vec()
        }
    }
}

impl CoercionRules {
    /// Replace the set of tokens read as `true`.
    #[must_use]
    pub fn with_true_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>
    {
        self.true_tokens = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the set of tokens read as `false`.
    #[must_use]
    pub fn with_false_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>
    {
        self.false_tokens = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// Read a boolean token.
    ///
    /// Returns `None` when the text is in neither set.
    #[must_use]
    pub fn parse_bool(&self, text: &str) -> Option<bool> {
        let text = text.trim();
        if self.true_tokens.iter().any(|t| t.eq_ignore_ascii_case(text)) {
            Some(true)
        } else if self.false_tokens.iter().any(|t| t.eq_ignore_ascii_case(text)) {
            Some(false)
        } else {
            None
        }
    }
}

/// A field type the engines know how to fill from raw text.
///
/// Implemented here for strings, primitive numbers, `bool` and `Option<T>`;
/// `#[derive(Token)]` implements it for enums.
pub trait Scalar: Sized {
    /// Kind used when a field does not declare one.
    const KIND: ScalarKind;

    /// Read a present text value.
    ///
    /// Returns `None` when the text cannot be read with the given kind.
    fn parse_text(text: &str, kind: ScalarKind, rules: &CoercionRules) -> Option<Self>;

    /// Value used for absent or unreadable text.
    fn fallback() -> Self;

    /// Convert raw text, falling back instead of failing.
    fn coerce(raw: Option<&str>, kind: ScalarKind, rules: &CoercionRules) -> Self {
        raw.and_then(|text| Self::parse_text(text, kind, rules))
            .unwrap_or_else(Self::fallback)
    }
}

impl Scalar for String {
    const KIND: ScalarKind = ScalarKind::String;

    fn parse_text(text: &str, _kind: ScalarKind, _rules: &CoercionRules) -> Option<Self> {
        Some(text.to_owned())
    }

    fn fallback() -> Self {
        Self::new()
    }
}

impl Scalar for bool {
    const KIND: ScalarKind = ScalarKind::Boolean;

    fn parse_text(text: &str, _kind: ScalarKind, rules: &CoercionRules) -> Option<Self> {
        rules.parse_bool(text)
    }

    fn fallback() -> Self {
        false
    }
}

impl<T: Scalar> Scalar for Option<T> {
    const KIND: ScalarKind = T::KIND;

    fn parse_text(text: &str, kind: ScalarKind, rules: &CoercionRules) -> Option<Self> {
        if text.trim().is_empty() {
            return None;
        }
        T::parse_text(text, kind, rules).map(Some)
    }

    fn fallback() -> Self {
        None
    }
}

/// Read a whole number with the grammar selected by `kind`.
fn parse_whole(text: &str, kind: ScalarKind) -> Option<i128> {
    let text = text.trim();
    match kind {
        ScalarKind::LocaleNumber => parse_locale_integer(text),
        _ => text.parse().ok()
    }
}

/// Read a decimal number with the grammar selected by `kind`.
fn parse_real(text: &str, kind: ScalarKind) -> Option<f64> {
    let text = text.trim();
    match kind {
        ScalarKind::LocaleNumber => parse_locale_decimal(text),
        _ => text.parse().ok()
    }
}

macro_rules! integer_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Scalar for $ty {
                const KIND: ScalarKind = ScalarKind::Integer;

                fn parse_text(text: &str, kind: ScalarKind, _rules: &CoercionRules) -> Option<Self> {
                    parse_whole(text, kind).and_then(|value| <$ty>::try_from(value).ok())
                }

                fn fallback() -> Self {
                    0
                }
            }
        )*
    };
}

integer_scalar!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Scalar for f64 {
    const KIND: ScalarKind = ScalarKind::Double;

    fn parse_text(text: &str, kind: ScalarKind, _rules: &CoercionRules) -> Option<Self> {
        parse_real(text, kind)
    }

    fn fallback() -> Self {
        0.0
    }
}

impl Scalar for f32 {
    const KIND: ScalarKind = ScalarKind::Double;

    fn parse_text(text: &str, kind: ScalarKind, _rules: &CoercionRules) -> Option<Self> {
        parse_real(text, kind).map(|value| value as f32)
    }

    fn fallback() -> Self {
        0.0
    }
}

/// Digit grouping separators accepted by the locale grammar.
const GROUPING: [char; 3] = [' ', '\u{a0}', '\u{202f}'];

/// Decimal separator of the locale grammar.
const DECIMAL_COMMA: char = ',';

/// Scan the longest locale number prefix of `text`.
///
/// Returns the sign, integer digits and fraction digits, or `None` when no
/// digit was read. The fraction is only scanned when `fraction` is set.
fn scan_locale(text: &str, fraction: bool) -> Option<(bool, String, String)> {
    let mut chars = text.trim().chars().peekable();
    let negative = match chars.peek() {
        Some('-') => {
            chars.next();
            true
        }
        Some('+') => {
            chars.next();
            false
        }
        _ => false
    };

    let mut whole = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() {
            whole.push(c);
        } else if !(GROUPING.contains(&c) && !whole.is_empty()) {
            break;
        }
        chars.next();
    }

    let mut decimals = String::new();
    if fraction && chars.peek() == Some(&DECIMAL_COMMA) {
        chars.next();
        decimals.extend(chars.take_while(char::is_ascii_digit));
    }

    if whole.is_empty() && decimals.is_empty() {
        return None;
    }
    Some((negative, whole, decimals))
}

/// Read a whole number written with French conventions.
///
/// Grouping separators are skipped and reading stops at the first character
/// that cannot continue the number, so `"12,7"` reads as `12` and
/// `"1 234 m"` as `1234`. Returns `None` when no digit is found.
#[must_use]
pub fn parse_locale_integer(text: &str) -> Option<i128> {
    let (negative, whole, _) = scan_locale(text, false)?;
    let value: i128 = whole.parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Read a decimal number written with French conventions.
///
/// `"1 234,5"` reads as `1234.5`. Reading is prefix-lenient like
/// [`parse_locale_integer`].
#[must_use]
pub fn parse_locale_decimal(text: &str) -> Option<f64> {
    let (negative, whole, decimals) = scan_locale(text, true)?;
    let whole = if whole.is_empty() { "0" } else { whole.as_str() };
    let sign = if negative { "-" } else { "" };
    let canonical = if decimals.is_empty() {
        format!("{sign}{whole}")
    } else {
        format!("{sign}{whole}.{decimals}")
    };
    canonical.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> CoercionRules {
        CoercionRules::default()
    }

    #[test]
    fn kind_names_round_trip() {
        for kind in ScalarKind::ALL {
            assert_eq!(ScalarKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(
            ScalarKind::from_name("Locale-Number"),
            Some(ScalarKind::LocaleNumber)
        );
        assert_eq!(ScalarKind::from_name("decimal"), None);
    }

    #[test]
    fn string_keeps_empty_text() {
        assert_eq!(String::coerce(Some(""), ScalarKind::String, &rules()), "");
        assert_eq!(String::coerce(None, ScalarKind::String, &rules()), "");
        assert_eq!(
            String::coerce(Some(" Feydeau "), ScalarKind::String, &rules()),
            " Feydeau "
        );
    }

    #[test]
    fn integers_fall_back_to_zero() {
        assert_eq!(i32::coerce(Some("42"), ScalarKind::Integer, &rules()), 42);
        assert_eq!(i32::coerce(Some(" -7 "), ScalarKind::Integer, &rules()), -7);
        assert_eq!(i32::coerce(Some("4x"), ScalarKind::Integer, &rules()), 0);
        assert_eq!(i32::coerce(Some(""), ScalarKind::Integer, &rules()), 0);
        assert_eq!(u8::coerce(Some("300"), ScalarKind::Integer, &rules()), 0);
        assert_eq!(i64::coerce(None, ScalarKind::Integer, &rules()), 0);
    }

    #[test]
    fn doubles_use_invariant_grammar() {
        assert_eq!(
            f64::coerce(Some("47.211179655323"), ScalarKind::Double, &rules()),
            47.211179655323
        );
        assert_eq!(f64::coerce(Some("12,5"), ScalarKind::Double, &rules()), 0.0);
    }

    #[test]
    fn locale_numbers() {
        assert_eq!(parse_locale_integer("1 234"), Some(1234));
        assert_eq!(parse_locale_integer("1\u{a0}234"), Some(1234));
        assert_eq!(parse_locale_integer("12,7"), Some(12));
        assert_eq!(parse_locale_integer("-5 places"), Some(-5));
        assert_eq!(parse_locale_integer("n/a"), None);
        assert_eq!(parse_locale_integer(""), None);
        assert_eq!(parse_locale_integer(" 12"), Some(12));

        assert_eq!(parse_locale_decimal("1 234,5"), Some(1234.5));
        assert_eq!(parse_locale_decimal("-0,25"), Some(-0.25));
        assert_eq!(parse_locale_decimal(",5"), Some(0.5));
        assert_eq!(parse_locale_decimal("3"), Some(3.0));
        assert_eq!(parse_locale_decimal(","), None);
    }

    #[test]
    fn locale_kind_switches_numeric_grammar() {
        assert_eq!(
            i32::coerce(Some("1 024"), ScalarKind::LocaleNumber, &rules()),
            1024
        );
        assert_eq!(
            f64::coerce(Some("2,75"), ScalarKind::LocaleNumber, &rules()),
            2.75
        );
    }

    #[test]
    fn booleans_match_tokens_ignoring_case() {
        assert!(bool::coerce(Some("OUI"), ScalarKind::Boolean, &rules()));
        assert!(bool::coerce(Some("true"), ScalarKind::Boolean, &rules()));
        assert!(!bool::coerce(Some("non"), ScalarKind::Boolean, &rules()));
        assert!(!bool::coerce(Some("maybe"), ScalarKind::Boolean, &rules()));
        assert!(!bool::coerce(None, ScalarKind::Boolean, &rules()));

        let custom = CoercionRules::default()
            .with_true_tokens(["ouvert"])
            .with_false_tokens(["ferme"]);
        assert!(bool::coerce(Some("Ouvert"), ScalarKind::Boolean, &custom));
        assert!(!bool::coerce(Some("true"), ScalarKind::Boolean, &custom));
        assert_eq!(custom.parse_bool("true"), None);
    }

    #[test]
    fn options_fall_back_to_none() {
        assert_eq!(
            Option::<i32>::coerce(Some("8"), ScalarKind::Integer, &rules()),
            Some(8)
        );
        assert_eq!(
            Option::<i32>::coerce(Some(""), ScalarKind::Integer, &rules()),
            None
        );
        assert_eq!(Option::<f64>::coerce(None, ScalarKind::Double, &rules()), None);
        assert_eq!(
            Option::<String>::coerce(Some(" "), ScalarKind::String, &rules()),
            None
        );
        assert_eq!(
            Option::<String>::coerce(Some("Pirmil"), ScalarKind::String, &rules()),
            Some("Pirmil".to_owned())
        );
        assert_eq!(<Option<u16> as Scalar>::KIND, ScalarKind::Integer);
    }
}
