// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Error types for registry builds and parse passes.
//!
//! Field-level problems (malformed numbers, unknown enum tokens, missing
//! elements) never show up here: they are absorbed by the coercion layer.
//! What remains are the failures that end a call:
//!
//! | Error | Raised when |
//! |-------|-------------|
//! | [`RegistryError`] | a type declares the same external name twice |
//! | [`EnvelopeError`] | the markup answer is missing or reports a failure |
//! | [`ParseError`] | anything that ends a pass, wrapping the two above |

use std::io;

use thiserror::Error;

/// Configuration defect in a type descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two fields of the same type map the same element or column name.
    #[error("type `{type_name}` maps external name `{name}` more than once")]
    DuplicateName {
        /// Rust type name of the record.
        type_name: &'static str,
        /// The repeated external name.
        name:      &'static str
    }
}

/// Top-level answer failure reported by the markup engine.
///
/// Any of these makes the whole call fail, even when records were built
/// before the problem was detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// The document never opened the envelope element.
    #[error("document has no `{element}` envelope")]
    MissingEnvelope {
        /// Expected envelope element name.
        element: String
    },

    /// The envelope carried no status element.
    #[error("envelope has no `{element}` status")]
    MissingStatus {
        /// Expected status element name.
        element: String
    },

    /// The status code is not the success sentinel.
    #[error("source reported status code `{code}`")]
    Rejected {
        /// Code reported by the source.
        code:    String,
        /// Accompanying message, empty when absent.
        message: String
    }
}

/// Failure of a whole parse call.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The source could not be opened or read.
    #[error("could not read source: {0}")]
    Transport(#[from] io::Error),

    /// The markup is not well-formed.
    #[error("malformed markup at byte {position}: {message}")]
    Syntax {
        /// Byte offset reported by the event source.
        position: u64,
        /// Event source message.
        message:  String
    },

    /// The source was read but its answer is missing or failed.
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    /// The target type's descriptor is invalid.
    #[error(transparent)]
    Registry(#[from] RegistryError)
}

impl ParseError {
    /// Check if the source could not be reached or read.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check if the source was reached but reported an error.
    #[must_use]
    pub const fn is_envelope(&self) -> bool {
        matches!(self, Self::Envelope(_))
    }

    /// Check if the markup itself was malformed.
    #[must_use]
    pub const fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax { .. })
    }
}
