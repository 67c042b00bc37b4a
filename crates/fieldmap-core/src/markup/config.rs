// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Markup engine configuration.

use crate::{coerce::CoercionRules, markup::envelope::EnvelopeLayout};

/// Configuration of a [`MarkupEngine`](crate::MarkupEngine).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MarkupConfig {
    /// Envelope element names and success sentinel.
    pub layout:    EnvelopeLayout,
    /// Trim field text before coercion, strings included.
    pub trim_text: bool,
    /// Boolean tokens.
    pub rules:     CoercionRules
}

impl MarkupConfig {
    /// Default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a builder.
    #[must_use]
    pub fn builder() -> MarkupConfigBuilder {
        MarkupConfigBuilder::default()
    }
}

/// Builder for [`MarkupConfig`].
#[derive(Debug, Default)]
pub struct MarkupConfigBuilder {
    envelope:     Option<String>,
    status:       Option<String>,
    data:         Option<String>,
    success_code: Option<String>,
    trim_text:    Option<bool>,
    rules:        Option<CoercionRules>
}

impl MarkupConfigBuilder {
    /// Envelope element name.
    #[must_use]
    pub fn envelope(mut self, name: impl Into<String>) -> Self {
        self.envelope = Some(name.into());
        self
    }

    /// Status element name.
    #[must_use]
    pub fn status(mut self, name: impl Into<String>) -> Self {
        self.status = Some(name.into());
        self
    }

    /// Data list element name.
    #[must_use]
    pub fn data(mut self, name: impl Into<String>) -> Self {
        self.data = Some(name.into());
        self
    }

    /// Status code meaning success.
    #[must_use]
    pub fn success_code(mut self, code: impl Into<String>) -> Self {
        self.success_code = Some(code.into());
        self
    }

    /// Trim field text.
    #[must_use]
    pub const fn trim_text(mut self, trim: bool) -> Self {
        self.trim_text = Some(trim);
        self
    }

    /// Boolean tokens.
    #[must_use]
    pub fn rules(mut self, rules: CoercionRules) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> MarkupConfig {
        let default = MarkupConfig::default();
        MarkupConfig {
            layout:    EnvelopeLayout {
                envelope:     self.envelope.unwrap_or(default.layout.envelope),
                status:       self.status.unwrap_or(default.layout.status),
                data:         self.data.unwrap_or(default.layout.data),
                success_code: self.success_code.unwrap_or(default.layout.success_code)
            },
            trim_text: self.trim_text.unwrap_or(default.trim_text),
            rules:     self.rules.unwrap_or(default.rules)
        }
    }
}
