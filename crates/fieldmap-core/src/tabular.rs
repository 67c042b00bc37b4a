// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Tabular deserialization engine.
//!
//! Reads delimited text with a header row and builds one record per data
//! row. The header fixes the column name of each position; cells are then
//! committed by name, so column order in the file is free.
//!
//! # Row Handling
//!
//! | Situation | Outcome |
//! |-----------|---------|
//! | header column unknown to the target type | column ignored |
//! | row shorter than the header | missing cells are absent |
//! | row longer than the header | extra cells ignored |
//! | blank line | skipped |
//! | row that is not valid UTF-8 | logged, skipped |
//! | read failure | [`ParseError::Transport`], pass aborted |
//! | no header at all | empty result |
//!
//! # Example
//!
//! ```rust
//! use fieldmap_core::{Registry, TabularEngine};
//! # use fieldmap_core::{CoercionRules, FieldSpec, Record, Scalar, ScalarKind};
//! # #[derive(Debug, Default)]
//! # struct Equipment { id: i32, name: String }
//! # impl Record for Equipment {
//! #     const ELEMENT: &'static str = "Equipement";
//! #     fn fields() -> Vec<FieldSpec<Self>> {
//! #         vec![
//! #             FieldSpec::new("id", "id", ScalarKind::Integer,
//! #                 |r: &mut Self, raw: Option<&str>, rules: &CoercionRules| {
//! #                     r.id = i32::coerce(raw, ScalarKind::Integer, rules);
//! #                 }),
//! #             FieldSpec::new("nom", "name", ScalarKind::String,
//! #                 |r: &mut Self, raw: Option<&str>, rules: &CoercionRules| {
//! #                     r.name = String::coerce(raw, ScalarKind::String, rules);
//! #                 }),
//! #         ]
//! #     }
//! # }
//!
//! let file = "id;nom;theme\n3549;Parc en enclos Feydeau;DEPLACEMENT\n";
//!
//! let engine = TabularEngine::new(Registry::shared());
//! let equipments: Vec<Equipment> = engine.parse_list(file.as_bytes()).unwrap();
//! assert_eq!(equipments[0].name, "Parc en enclos Feydeau");
//! ```

use std::{
    io::{self, Read},
    sync::Arc
};

use csv::{ByteRecord, ReaderBuilder, StringRecord, Trim};
use tracing::{debug, trace, warn};

use crate::{
    builder::RecordBuilder,
    coerce::CoercionRules,
    descriptor::Record,
    error::ParseError,
    registry::Registry,
    source::{Connector, release_quietly}
};

const BOM: char = '\u{feff}';

/// Configuration of a [`TabularEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TabularConfig {
    /// Cell delimiter.
    pub delimiter:    u8,
    /// Honor double-quoted cells. Off by default: cells are split on the
    /// delimiter only.
    pub quoting:      bool,
    /// Trim header names.
    pub trim_headers: bool,
    /// Trim cell text, strings included.
    pub trim_cells:   bool,
    /// Boolean tokens.
    pub rules:        CoercionRules
}

impl Default for TabularConfig {
    fn default() -> Self {
        Self {
            delimiter:    b';',
            quoting:      false,
            trim_headers: true,
            trim_cells:   false,
            rules:        CoercionRules::default()
        }
    }
}

impl TabularConfig {
    /// Default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a builder.
    #[must_use]
    pub fn builder() -> TabularConfigBuilder {
        TabularConfigBuilder::default()
    }
}

/// Builder for [`TabularConfig`].
#[derive(Debug, Default)]
pub struct TabularConfigBuilder {
    delimiter:    Option<u8>,
    quoting:      Option<bool>,
    trim_headers: Option<bool>,
    trim_cells:   Option<bool>,
    rules:        Option<CoercionRules>
}

impl TabularConfigBuilder {
    /// Cell delimiter.
    #[must_use]
    pub const fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Honor double-quoted cells.
    #[must_use]
    pub const fn quoting(mut self, quoting: bool) -> Self {
        self.quoting = Some(quoting);
        self
    }

    /// Trim header names.
    #[must_use]
    pub const fn trim_headers(mut self, trim: bool) -> Self {
        self.trim_headers = Some(trim);
        self
    }

    /// Trim cell text.
    #[must_use]
    pub const fn trim_cells(mut self, trim: bool) -> Self {
        self.trim_cells = Some(trim);
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
    pub fn build(self) -> TabularConfig {
        let default = TabularConfig::default();
        TabularConfig {
            delimiter:    self.delimiter.unwrap_or(default.delimiter),
            quoting:      self.quoting.unwrap_or(default.quoting),
            trim_headers: self.trim_headers.unwrap_or(default.trim_headers),
            trim_cells:   self.trim_cells.unwrap_or(default.trim_cells),
            rules:        self.rules.unwrap_or(default.rules)
        }
    }
}

/// Parses delimited text with a header row into records.
#[derive(Debug, Clone)]
pub struct TabularEngine {
    registry: Arc<Registry>,
    config:   TabularConfig,
    rules:    Arc<CoercionRules>
}

impl TabularEngine {
    /// Create an engine with the default configuration.
    #[must_use]
    pub fn new(registry: Arc<Registry>) -> Self {
        Self::with_config(registry, TabularConfig::default())
    }

    /// Create an engine with an explicit configuration.
    #[must_use]
    pub fn with_config(registry: Arc<Registry>, config: TabularConfig) -> Self {
        let rules = Arc::new(config.rules.clone());
        Self {
            registry,
            config,
            rules
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &TabularConfig {
        &self.config
    }

    /// Registry used to resolve descriptors.
    #[must_use]
    pub const fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Build every row and hand each record to `sink`, in file order.
    ///
    /// Returns the number of records built.
    ///
    /// # Errors
    ///
    /// [`ParseError::Transport`] on read failure, or an invalid descriptor
    /// for `T`. Records already handed to `sink` stay delivered.
    pub fn parse_each<T, R, F>(&self, source: R, mut sink: F) -> Result<usize, ParseError>
    where
        T: Record,
        R: Read,
        F: FnMut(T)
    {
        let descriptor = self.registry.descriptor::<T>()?;
        let mut reader = ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .quoting(self.config.quoting)
            .trim(if self.config.trim_cells {
                Trim::Fields
            } else {
                Trim::None
            })
            .has_headers(false)
            .flexible(true)
            .from_reader(source);

        let mut header = ByteRecord::new();
        if !reader.read_byte_record(&mut header).map_err(transport)? {
            debug!(type_name = descriptor.type_name(), "empty tabular source");
            return Ok(0);
        }

        let mut columns = Vec::new();
        for (position, raw) in header.iter().enumerate() {
            let name = String::from_utf8_lossy(raw);
            let name = if position == 0 {
                name.trim_start_matches(BOM)
            } else {
                &*name
            };
            let name = if self.config.trim_headers {
                name.trim()
            } else {
                name
            };
            if descriptor.contains(name) {
                columns.push((position, name.to_owned()));
            } else {
                trace!(
                    type_name = descriptor.type_name(),
                    column = name,
                    "ignoring unmapped column"
                );
            }
        }

        let mut builder = RecordBuilder::new(descriptor, Arc::clone(&self.rules));
        let mut row = StringRecord::new();
        let mut built = 0;
        let mut skipped = 0;
        loop {
            match reader.read_record(&mut row) {
                Ok(false) => break,
                Ok(true) => {
                    builder.begin();
                    for (position, name) in &columns {
                        if let Some(cell) = row.get(*position) {
                            builder.commit(name.as_str(), cell);
                        }
                    }
                    sink(builder.finish());
                    built += 1;
                }
                Err(err) if err.is_io_error() => return Err(transport(err)),
                Err(err) => {
                    skipped += 1;
                    warn!(
                        line = err.position().map(csv::Position::line),
                        error = %err,
                        "skipping undecodable row"
                    );
                }
            }
        }

        debug!(
            type_name = builder.descriptor().type_name(),
            records = built,
            skipped,
            "tabular pass complete"
        );
        Ok(built)
    }

    /// Build every row into a list.
    ///
    /// # Errors
    ///
    /// Same as [`TabularEngine::parse_each`]; no partial list is returned.
    pub fn parse_list<T: Record, R: Read>(&self, source: R) -> Result<Vec<T>, ParseError> {
        let mut records = Vec::new();
        self.parse_each(source, |record| records.push(record))?;
        Ok(records)
    }

    /// Open `location`, build every row and release the stream.
    ///
    /// # Errors
    ///
    /// [`ParseError::Transport`] when the stream cannot be opened, plus
    /// everything [`TabularEngine::parse_list`] reports.
    pub fn fetch_list<T: Record, C: Connector>(
        &self,
        connector: &C,
        location: &str
    ) -> Result<Vec<T>, ParseError> {
        let mut stream = connector.open(location)?;
        let records = self.parse_list(&mut stream);
        release_quietly(connector, stream, location);
        records
    }
}

fn transport(err: csv::Error) -> ParseError {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(err) => ParseError::Transport(err),
        _ => ParseError::Transport(io::Error::new(io::ErrorKind::InvalidData, message))
    }
}
