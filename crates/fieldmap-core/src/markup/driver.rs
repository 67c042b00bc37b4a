// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Single-pass state machine over markup events.
//!
//! The event source delivers flat begin/text/end events. The driver keeps
//! two stacks to recover structure: the names of currently open elements,
//! and the states entered along with the depth they were entered at.
//! Leaving the element that entered a state pops it.
//!
//! # States
//!
//! ```text
//! SeekingEnvelope ──<answer>──► InEnvelope ──<status>──► InStatus
//!                                    │
//!                                    └──<data>──► InDataList ──<Troncon>──► InRecord
//!                                                      ▲                       │
//!                                                      └────── </Troncon> ─────┘
//! ```
//!
//! Status and data are only recognized as direct children of the envelope.
//! Records are recognized at any depth below the data list, so intermediate
//! containers like `<Troncons>` are transparent. Inside a record or status,
//! each direct child element is one field: its text is accumulated across
//! chunks and committed when the element closes.

use tracing::trace;

use crate::{
    builder::RecordBuilder,
    descriptor::Record,
    markup::envelope::{Envelope, EnvelopeLayout, Status}
};

/// One push event from the markup source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupEvent<'a> {
    /// Start of the document.
    DocumentBegin,

    /// An element opened.
    ElementBegin {
        /// Element name as written.
        name:       &'a str,
        /// Unescaped attributes in document order.
        attributes: &'a [(String, String)]
    },

    /// A chunk of character data; one element may deliver several.
    Text(&'a str),

    /// An element closed.
    ElementEnd {
        /// Element name as written.
        name: &'a str
    },

    /// End of the document.
    DocumentEnd
}

/// Driver state, determined by the innermost recognized element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupState {
    /// Outside the envelope.
    SeekingEnvelope,
    /// Directly inside the envelope.
    InEnvelope,
    /// Inside the status element.
    InStatus,
    /// Inside the data list, outside any record.
    InDataList,
    /// Inside a record element.
    InRecord
}

#[derive(Debug)]
struct PendingField {
    name:  String,
    text:  String,
    depth: usize
}

/// Markup stream driver for records of `T`.
#[derive(Debug)]
pub struct MarkupDriver<'c, T> {
    layout:    &'c EnvelopeLayout,
    trim_text: bool,
    builder:   RecordBuilder<T>,
    open:      Vec<String>,
    states:    Vec<(MarkupState, usize)>,
    pending:   Option<PendingField>,
    envelope:  Envelope<T>
}

impl<'c, T: Record> MarkupDriver<'c, T> {
    /// Create a driver feeding `builder`.
    #[must_use]
    pub fn new(builder: RecordBuilder<T>, layout: &'c EnvelopeLayout) -> Self {
        Self {
            layout,
            trim_text: false,
            builder,
            open: Vec::new(),
            states: Vec::new(),
            pending: None,
            envelope: Envelope::default()
        }
    }

    /// Trim field text before committing it.
    #[must_use]
    pub const fn trim_text(mut self, trim: bool) -> Self {
        self.trim_text = trim;
        self
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> MarkupState {
        self.states
            .last()
            .map_or(MarkupState::SeekingEnvelope, |&(state, _)| state)
    }

    /// Number of currently open elements.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Records finished so far.
    #[must_use]
    pub fn records(&self) -> usize {
        self.envelope.data.len()
    }

    /// Process one event.
    pub fn feed(&mut self, event: MarkupEvent<'_>) {
        match event {
            MarkupEvent::DocumentBegin => self.reset(),
            MarkupEvent::ElementBegin {
                name,
                attributes
            } => self.element_begin(name, attributes),
            MarkupEvent::Text(text) => self.text(text),
            MarkupEvent::ElementEnd {
                name
            } => self.element_end(name),
            MarkupEvent::DocumentEnd => self.document_end()
        }
    }

    /// Everything collected, unvalidated.
    #[must_use]
    pub fn into_envelope(self) -> Envelope<T> {
        self.envelope
    }

    fn reset(&mut self) {
        self.open.clear();
        self.states.clear();
        self.pending = None;
        self.envelope = Envelope::default();
    }

    fn entered_at(&self) -> usize {
        self.states.last().map_or(0, |&(_, depth)| depth)
    }

    fn element_begin(&mut self, name: &str, attributes: &[(String, String)]) {
        let depth = self.open.len();
        let direct_child = !self.states.is_empty() && depth == self.entered_at() + 1;
        self.open.push(name.to_owned());

        match self.state() {
            MarkupState::SeekingEnvelope => {
                if name == self.layout.envelope {
                    self.envelope.present = true;
                    self.states.push((MarkupState::InEnvelope, depth));
                }
            }
            MarkupState::InEnvelope if direct_child => {
                if name == self.layout.status {
                    let mut status = Status::default();
                    for (key, value) in attributes {
                        status.set(key, value.as_str());
                    }
                    self.envelope.status = Some(status);
                    self.states.push((MarkupState::InStatus, depth));
                } else if name == self.layout.data {
                    self.states.push((MarkupState::InDataList, depth));
                }
            }
            MarkupState::InDataList => {
                if name == T::ELEMENT {
                    self.builder.begin();
                    for (key, value) in attributes {
                        self.builder.commit(key.as_str(), value.as_str());
                    }
                    self.states.push((MarkupState::InRecord, depth));
                }
            }
            MarkupState::InStatus | MarkupState::InRecord if direct_child => {
                self.pending = Some(PendingField {
                    name: name.to_owned(),
                    text: String::new(),
                    depth
                });
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        let depth = self.open.len();
        if let Some(pending) = self.pending.as_mut()
            && depth == pending.depth + 1
        {
            pending.text.push_str(text);
        }
    }

    fn element_end(&mut self, name: &str) {
        let closed = self.open.pop();
        if closed.as_deref() != Some(name) {
            trace!(expected = ?closed, found = name, "mismatched end element");
        }
        let depth = self.open.len();

        if let Some(pending) = self.pending.take_if(|pending| pending.depth == depth) {
            self.commit(pending);
        }

        if let Some(&(state, entered)) = self.states.last()
            && entered == depth
        {
            self.states.pop();
            if state == MarkupState::InRecord {
                let record = self.builder.finish();
                self.envelope.data.push(record);
            }
        }
    }

    fn commit(&mut self, pending: PendingField) {
        let text = if self.trim_text {
            pending.text.trim().to_owned()
        } else {
            pending.text
        };
        match self.state() {
            MarkupState::InStatus => {
                if let Some(status) = self.envelope.status.as_mut() {
                    status.set(&pending.name, text);
                }
            }
            MarkupState::InRecord => self.builder.commit(pending.name, text),
            _ => {}
        }
    }

    fn document_end(&mut self) {
        if self.builder.is_open() {
            trace!(open = ?self.open, "dropping unfinished record at document end");
            self.builder.discard();
        }
        self.open.clear();
        self.states.clear();
        self.pending = None;
    }
}
