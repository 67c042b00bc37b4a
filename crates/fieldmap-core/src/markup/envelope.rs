// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Answer envelope: status plus data list, validated all-or-nothing.
//!
//! ```text
//! <opendata>
//!   <answer>                      envelope
//!     <status code="0" message="OK"/>
//!     <data>                      data list
//!       <Troncons>
//!         <Troncon>…</Troncon>    records
//!       </Troncons>
//!     </data>
//!   </answer>
//! </opendata>
//! ```

use std::collections::BTreeMap;

use crate::error::EnvelopeError;

/// Element names and sentinel describing the answer envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnvelopeLayout {
    /// Element wrapping status and data.
    pub envelope:     String,
    /// Status element, child of the envelope.
    pub status:       String,
    /// Data list element, child of the envelope.
    pub data:         String,
    /// Status code meaning success.
    pub success_code: String
}

impl Default for EnvelopeLayout {
    fn default() -> Self {
        Self {
            envelope:     "answer".into(),
            status:       "status".into(),
            data:         "data".into(),
            success_code: "0".into()
        }
    }
}

/// Status reported by the source.
///
/// Filled from the status element's attributes and child elements alike.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Status {
    /// Status code, compared against the success sentinel.
    pub code:    String,
    /// Human-readable message, empty when absent.
    pub message: String,
    /// Any other status fields, by name.
    pub extra:   BTreeMap<String, String>
}

impl Status {
    /// Store one status field.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match name {
            "code" => self.code = value,
            "message" => self.message = value,
            _ => {
                self.extra.insert(name.to_owned(), value);
            }
        }
    }
}

/// Everything a markup pass collected, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    /// Whether the envelope element was seen.
    pub present: bool,
    /// Status, if the status element was seen.
    pub status:  Option<Status>,
    /// Records, in document order.
    pub data:    Vec<T>
}

impl<T> Default for Envelope<T> {
    fn default() -> Self {
        Self {
            present: false,
            status:  None,
            data:    Vec::new()
        }
    }
}

impl<T> Envelope<T> {
    /// Validate the envelope and release its records.
    ///
    /// # Errors
    ///
    /// Fails when the envelope or status is missing, or when the status
    /// code differs from `layout.success_code`. No records are returned in
    /// that case, even well-formed ones.
    pub fn into_data(self, layout: &EnvelopeLayout) -> Result<Vec<T>, EnvelopeError> {
        self.check(layout)?;
        Ok(self.data)
    }

    /// Validate without consuming.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Envelope::into_data`].
    pub fn check(&self, layout: &EnvelopeLayout) -> Result<(), EnvelopeError> {
        if !self.present {
            return Err(EnvelopeError::MissingEnvelope {
                element: layout.envelope.clone()
            });
        }
        let status = self
            .status
            .as_ref()
            .ok_or_else(|| EnvelopeError::MissingStatus {
                element: layout.status.clone()
            })?;
        if status.code != layout.success_code {
            return Err(EnvelopeError::Rejected {
                code:    status.code.clone(),
                message: status.message.clone()
            });
        }
        Ok(())
    }
}
