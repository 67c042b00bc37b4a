// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Markup deserialization engine.
//!
//! One pass over a markup document yields an [`Envelope`]: the status
//! reported by the source and every record found below the data list.
//! The envelope is then validated all-or-nothing.
//!
//! # Architecture
//!
//! ```text
//! BufRead ─► reader::drive ─► MarkupEvent ─► MarkupDriver ─► RecordBuilder ─► Vec<T>
//!            (quick-xml)                     (state stack)   (descriptor)       │
//!                                                  │                            │
//!                                                  └────────► Envelope<T> ◄─────┘
//!                                                                 │
//!                                                        into_data(layout)
//! ```
//!
//! # Example
//!
//! ```rust
//! use fieldmap_core::{MarkupEngine, Registry};
//! # use fieldmap_core::{CoercionRules, FieldSpec, Record, Scalar, ScalarKind};
//! # #[derive(Debug, Default)]
//! # struct Segment { id: i32 }
//! # impl Record for Segment {
//! #     const ELEMENT: &'static str = "Troncon";
//! #     fn fields() -> Vec<FieldSpec<Self>> {
//! #         vec![FieldSpec::new("Id", "id", ScalarKind::Integer,
//! #             |r: &mut Self, raw: Option<&str>, rules: &CoercionRules| {
//! #                 r.id = i32::coerce(raw, ScalarKind::Integer, rules);
//! #             })]
//! #     }
//! # }
//!
//! let document = r#"
//!     <opendata><answer>
//!         <status code="0" message="OK"/>
//!         <data><Troncons><Troncon><Id>42</Id></Troncon></Troncons></data>
//!     </answer></opendata>"#;
//!
//! let engine = MarkupEngine::new(Registry::shared());
//! let segments: Vec<Segment> = engine.parse_envelope(document.as_bytes()).unwrap();
//! assert_eq!(segments[0].id, 42);
//! ```

mod config;
mod driver;
mod envelope;
mod reader;

use std::{
    io::{BufRead, BufReader},
    sync::Arc
};

use tracing::{debug, warn};

pub use self::{
    config::{MarkupConfig, MarkupConfigBuilder},
    driver::{MarkupDriver, MarkupEvent, MarkupState},
    envelope::{Envelope, EnvelopeLayout, Status},
    reader::drive
};
use crate::{
    builder::RecordBuilder,
    coerce::CoercionRules,
    descriptor::Record,
    error::ParseError,
    registry::Registry,
    source::{Connector, release_quietly}
};

/// Parses enveloped markup answers into records.
#[derive(Debug, Clone)]
pub struct MarkupEngine {
    registry: Arc<Registry>,
    config:   MarkupConfig,
    rules:    Arc<CoercionRules>
}

impl MarkupEngine {
    /// Create an engine with the default configuration.
    #[must_use]
    pub fn new(registry: Arc<Registry>) -> Self {
        Self::with_config(registry, MarkupConfig::default())
    }

    /// Create an engine with an explicit configuration.
    #[must_use]
    pub fn with_config(registry: Arc<Registry>, config: MarkupConfig) -> Self {
        let rules = Arc::new(config.rules.clone());
        Self {
            registry,
            config,
            rules
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &MarkupConfig {
        &self.config
    }

    /// Registry used to resolve descriptors.
    #[must_use]
    pub const fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Read a whole answer without validating it.
    ///
    /// # Errors
    ///
    /// Transport and syntax failures, or an invalid descriptor for `T`.
    pub fn parse_answer<T: Record, R: BufRead>(&self, source: R) -> Result<Envelope<T>, ParseError> {
        let descriptor = self.registry.descriptor::<T>()?;
        let builder = RecordBuilder::new(descriptor, Arc::clone(&self.rules));
        let mut driver =
            MarkupDriver::new(builder, &self.config.layout).trim_text(self.config.trim_text);

        drive(source, |event| driver.feed(event))?;

        let envelope = driver.into_envelope();
        debug!(
            type_name = std::any::type_name::<T>(),
            records = envelope.data.len(),
            status = envelope.status.as_ref().map(|status| status.code.as_str()),
            "markup pass complete"
        );
        Ok(envelope)
    }

    /// Read an answer and return its records if the status is a success.
    ///
    /// # Errors
    ///
    /// Everything [`MarkupEngine::parse_answer`] reports, plus
    /// [`ParseError::Envelope`] when the envelope or status is missing or
    /// reports a failure. No records are returned in that case.
    pub fn parse_envelope<T: Record, R: BufRead>(&self, source: R) -> Result<Vec<T>, ParseError> {
        let envelope = self.parse_answer(source)?;
        self.validate(envelope)
    }

    /// Open `location`, read its answer and release the stream.
    ///
    /// The stream is released on every path; release failures are logged.
    ///
    /// # Errors
    ///
    /// [`ParseError::Transport`] when the stream cannot be opened, plus
    /// everything [`MarkupEngine::parse_envelope`] reports.
    pub fn fetch_envelope<T: Record, C: Connector>(
        &self,
        connector: &C,
        location: &str
    ) -> Result<Vec<T>, ParseError> {
        let stream = connector.open(location)?;
        let mut reader = BufReader::new(stream);
        let answer = self.parse_answer::<T, _>(&mut reader);
        release_quietly(connector, reader.into_inner(), location);
        self.validate(answer?)
    }

    fn validate<T>(&self, envelope: Envelope<T>) -> Result<Vec<T>, ParseError> {
        envelope.into_data(&self.config.layout).map_err(|err| {
            warn!(error = %err, "markup answer rejected");
            ParseError::from(err)
        })
    }
}
