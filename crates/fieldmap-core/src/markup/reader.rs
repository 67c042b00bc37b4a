// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Pull-to-push adapter over `quick-xml`.
//!
//! | quick-xml event | Delivered as |
//! |-----------------|--------------|
//! | `Start` | `ElementBegin` with unescaped attributes |
//! | `Empty` | `ElementBegin` then `ElementEnd` |
//! | `Text` | `Text`, unescaped |
//! | `CData` | `Text`, verbatim |
//! | `End` | `ElementEnd` |
//! | `Eof` | `DocumentEnd`, or [`ParseError::Syntax`] while elements are open |
//!
//! Declarations, comments, processing instructions and doctypes are
//! skipped.

use std::{
    io::{self, BufRead},
    sync::Arc
};

use quick_xml::{Reader, events::Event};

use crate::{error::ParseError, markup::driver::MarkupEvent};

/// Read `source` to the end, pushing every event into `sink`.
///
/// # Errors
///
/// Read failures map to [`ParseError::Transport`], malformed markup to
/// [`ParseError::Syntax`]. A source ending with elements still open is
/// malformed; `DocumentEnd` is only pushed for complete documents.
pub fn drive<R, F>(source: R, mut sink: F) -> Result<(), ParseError>
where
    R: BufRead,
    F: FnMut(MarkupEvent<'_>)
{
    let mut reader = Reader::from_reader(source);
    reader.config_mut().expand_empty_elements = true;

    let mut buf = Vec::new();
    let mut attributes = Vec::new();
    let mut open: Vec<String> = Vec::new();
    sink(MarkupEvent::DocumentBegin);

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|err| convert(err, position(&reader)))?;
        let empty = matches!(event, Event::Empty(_));
        match event {
            Event::Start(start) | Event::Empty(start) => {
                let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                attributes.clear();
                for attribute in start.attributes() {
                    let attribute = attribute
                        .map_err(|err| convert(err.into(), position(&reader)))?;
                    let value = attribute
                        .unescape_value()
                        .map_err(|err| convert(err, position(&reader)))?;
                    attributes.push((
                        String::from_utf8_lossy(attribute.key.as_ref()).into_owned(),
                        value.into_owned()
                    ));
                }
                sink(MarkupEvent::ElementBegin {
                    name:       &name,
                    attributes: &attributes
                });
                if empty {
                    sink(MarkupEvent::ElementEnd {
                        name: &name
                    });
                } else {
                    open.push(name);
                }
            }
            Event::End(end) => {
                let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                open.pop();
                sink(MarkupEvent::ElementEnd {
                    name: &name
                });
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|err| convert(err, position(&reader)))?;
                sink(MarkupEvent::Text(&text));
            }
            Event::CData(data) => {
                let bytes = data.into_inner();
                sink(MarkupEvent::Text(&String::from_utf8_lossy(&bytes)));
            }
            Event::Eof if !open.is_empty() => {
                return Err(ParseError::Syntax {
                    position: position(&reader),
                    message:  format!("unexpected end of document, unclosed: {}", open.join(" > "))
                });
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    sink(MarkupEvent::DocumentEnd);
    Ok(())
}

fn position<R>(reader: &Reader<R>) -> u64 {
    u64::try_from(reader.buffer_position()).unwrap_or(u64::MAX)
}

fn convert(err: quick_xml::Error, position: u64) -> ParseError {
    match err {
        quick_xml::Error::Io(shared) => ParseError::Transport(
            Arc::try_unwrap(shared)
                .unwrap_or_else(|shared| io::Error::new(shared.kind(), shared.to_string()))
        ),
        other => ParseError::Syntax {
            position,
            message: other.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Seen {
        Begin(String, Vec<(String, String)>),
        Text(String),
        End(String),
        Doc(bool)
    }

    fn collect(document: &str) -> Result<Vec<Seen>, ParseError> {
        let mut seen = Vec::new();
        drive(document.as_bytes(), |event| {
            seen.push(match event {
                MarkupEvent::DocumentBegin => Seen::Doc(true),
                MarkupEvent::ElementBegin {
                    name,
                    attributes
                } => Seen::Begin(name.into(), attributes.to_vec()),
                MarkupEvent::Text(text) => Seen::Text(text.into()),
                MarkupEvent::ElementEnd {
                    name
                } => Seen::End(name.into()),
                MarkupEvent::DocumentEnd => Seen::Doc(false)
            });
        })?;
        Ok(seen)
    }

    #[test]
    fn empty_element_is_begin_then_end() {
        let seen = collect(r#"<status code="0"/>"#).unwrap();
        assert_eq!(
            seen,
            [
                Seen::Doc(true),
                Seen::Begin("status".into(), vec![("code".into(), "0".into())]),
                Seen::End("status".into()),
                Seen::Doc(false),
            ]
        );
    }

    #[test]
    fn entities_are_unescaped() {
        let seen = collect("<a t=\"x &amp; y\">Quai de l&apos;Erdre</a>").unwrap();
        assert_eq!(
            seen[1],
            Seen::Begin("a".into(), vec![("t".into(), "x & y".into())])
        );
        assert_eq!(seen[2], Seen::Text("Quai de l'Erdre".into()));
    }

    #[test]
    fn cdata_is_text() {
        let seen = collect("<a><![CDATA[1 < 2]]></a>").unwrap();
        assert_eq!(seen[2], Seen::Text("1 < 2".into()));
    }

    #[test]
    fn comments_and_declarations_are_skipped() {
        let seen = collect("<?xml version=\"1.0\"?><!-- note --><a/>").unwrap();
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn truncated_document_is_syntax_error() {
        let mut ends = 0;
        let err = drive("<answer><data><Troncon><Id>2".as_bytes(), |event| {
            if event == MarkupEvent::DocumentEnd {
                ends += 1;
            }
        })
        .unwrap_err();

        assert_eq!(ends, 0);
        match err {
            ParseError::Syntax {
                message, ..
            } => assert!(message.contains("answer > data > Troncon > Id"), "{message}"),
            other => panic!("unexpected error: {other:?}")
        }
    }

    #[test]
    fn mismatched_end_is_syntax_error() {
        let err = collect("<a><b></a>").unwrap_err();
        assert!(err.is_syntax(), "{err:?}");
    }

    #[test]
    fn read_failure_is_transport() {
        struct Broken;

        impl io::Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
            }
        }

        let err = drive(io::BufReader::new(Broken), |_| {}).unwrap_err();
        assert!(err.is_transport(), "{err:?}");
    }
}
