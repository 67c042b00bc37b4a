// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Runtime for fieldmap.
//!
//! Target types declare, field by field, which markup element or column
//! feeds them. This crate walks the input once and builds typed records
//! from those declarations. It is used by `#[derive(Record)]` generated
//! code and can be used standalone with hand-written [`Record`] impls.
//!
//! # Overview
//!
//! | Layer | Items |
//! |-------|-------|
//! | Coercion | [`Scalar`], [`ScalarKind`], [`CoercionRules`], [`Token`], [`adapters`] |
//! | Metadata | [`Record`], [`FieldSpec`], [`TypeDescriptor`], [`Registry`] |
//! | Assembly | [`RecordBuilder`] |
//! | Drivers | [`MarkupEngine`], [`TabularEngine`] |
//! | Results | [`Envelope`], [`Status`], [`ParseError`] |
//! | Collaborators | [`Connector`], [`Lookup`] |
//!
//! # Tolerance
//!
//! Malformed or missing fields never fail a pass: each field falls back to
//! its documented default. What does fail a call is structural: an
//! unreadable source, malformed markup, a missing or failed answer
//! envelope, or a type that maps one name twice.
//!
//! # Logging
//!
//! Events are emitted through `tracing`; install a subscriber to see them.
//! Pass summaries go to `debug`, ignored names to `trace`, skipped rows and
//! rejected answers to `warn`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
mod builder;
mod coerce;
mod descriptor;
mod error;
mod lookup;
pub mod markup;
pub mod prelude;
mod registry;
mod source;
mod tabular;
mod token;

pub use self::{
    builder::RecordBuilder,
    coerce::{CoercionRules, Scalar, ScalarKind, parse_locale_decimal, parse_locale_integer},
    descriptor::{FieldSpec, Record, Setter, TypeDescriptor},
    error::{EnvelopeError, ParseError, RegistryError},
    lookup::{Keyed, Lookup},
    markup::{Envelope, EnvelopeLayout, MarkupConfig, MarkupEngine, Status},
    registry::Registry,
    source::{Connector, FileConnector, MemoryConnector},
    tabular::{TabularConfig, TabularConfigBuilder, TabularEngine},
    token::Token
};
