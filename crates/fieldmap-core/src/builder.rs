// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Accumulation of one record at a time.
//!
//! Stream drivers feed `(name, text)` pairs between [`RecordBuilder::begin`]
//! and [`RecordBuilder::finish`]. Finishing instantiates the target through
//! `Default`, applies every accumulated pair through the descriptor, then
//! applies absent text to every mapped field that received nothing, so
//! declared fallbacks (unknown tokens, adapter fallbacks, default text)
//! hold for missing elements and columns too.
//!
//! Names the descriptor does not know are dropped.

use std::sync::Arc;

use tracing::trace;

use crate::{
    coerce::CoercionRules,
    descriptor::{Record, TypeDescriptor}
};

/// Builds records of `T` from named raw values.
#[derive(Debug)]
pub struct RecordBuilder<T> {
    descriptor: Arc<TypeDescriptor<T>>,
    rules:      Arc<CoercionRules>,
    pending:    Vec<(String, String)>,
    open:       bool
}

impl<T: Record> RecordBuilder<T> {
    /// Create a builder for one parse pass.
    #[must_use]
    pub fn new(descriptor: Arc<TypeDescriptor<T>>, rules: Arc<CoercionRules>) -> Self {
        Self {
            descriptor,
            rules,
            pending: Vec::new(),
            open: false
        }
    }

    /// Descriptor used to apply values.
    #[must_use]
    pub fn descriptor(&self) -> &TypeDescriptor<T> {
        &self.descriptor
    }

    /// Start a new record.
    ///
    /// A record already in progress is discarded: only one record may be
    /// assembled at a time.
    pub fn begin(&mut self) {
        if self.open {
            trace!(
                type_name = self.descriptor.type_name(),
                fields = self.pending.len(),
                "discarding unfinished record"
            );
        }
        self.pending.clear();
        self.open = true;
    }

    /// Drop the record in progress without building it.
    pub fn discard(&mut self) {
        self.pending.clear();
        self.open = false;
    }

    /// Check if a record is in progress.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Number of values accumulated for the current record.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Accumulate one raw value for the current record.
    ///
    /// Later values for the same name override earlier ones.
    pub fn commit(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.pending.push((name.into(), text.into()));
    }

    /// Build the current record and reset for the next one.
    pub fn finish(&mut self) -> T {
        let mut record = T::default();
        let mut applied = vec![false; self.descriptor.len()];

        for (name, text) in self.pending.drain(..) {
            match self.descriptor.position(&name) {
                Some(position) => {
                    self.descriptor.fields()[position].apply(
                        &mut record,
                        Some(text.as_str()),
                        &self.rules
                    );
                    applied[position] = true;
                }
                None => trace!(
                    type_name = self.descriptor.type_name(),
                    external = %name,
                    "ignoring unmapped name"
                )
            }
        }

        for (spec, _) in self
            .descriptor
            .fields()
            .iter()
            .zip(&applied)
            .filter(|(_, applied)| !**applied)
        {
            spec.apply(&mut record, None, &self.rules);
        }

        self.open = false;
        record
    }
}
