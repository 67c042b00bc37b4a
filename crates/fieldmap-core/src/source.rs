// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Byte stream suppliers.
//!
//! The engines never reach the network or the file system on their own.
//! A [`Connector`] opens a stream for a location right before a pass and
//! takes it back right after, on every exit path.
//!
//! | Connector | Locations |
//! |-----------|-----------|
//! | [`FileConnector`] | paths relative to a root directory |
//! | [`MemoryConnector`] | names of in-memory documents |
//!
//! Remote transports implement the trait in the calling crate.

use std::{
    collections::HashMap,
    fs::File,
    io::{self, Cursor, Read},
    path::{Path, PathBuf}
};

use tracing::warn;

/// Supplier of byte streams.
pub trait Connector {
    /// Stream handed to the engines.
    type Stream: Read;

    /// Open the stream for `location`.
    ///
    /// # Errors
    ///
    /// Any failure to reach or open the source.
    fn open(&self, location: &str) -> io::Result<Self::Stream>;

    /// Take the stream back once the pass is over.
    ///
    /// Dropping the stream is enough for most sources.
    ///
    /// # Errors
    ///
    /// Failures are logged by the engines and never reach the caller.
    fn release(&self, stream: Self::Stream) -> io::Result<()> {
        drop(stream);
        Ok(())
    }
}

/// Release `stream`, logging any failure.
pub(crate) fn release_quietly<C: Connector>(connector: &C, stream: C::Stream, location: &str) {
    if let Err(err) = connector.release(stream) {
        warn!(location, error = %err, "could not release source stream");
    }
}

/// Files below a root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileConnector {
    root: PathBuf
}

impl FileConnector {
    /// Resolve locations against `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into()
        }
    }

    /// Root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of `location`.
    #[must_use]
    pub fn resolve(&self, location: &str) -> PathBuf {
        self.root.join(location)
    }
}

impl Connector for FileConnector {
    type Stream = File;

    fn open(&self, location: &str) -> io::Result<File> {
        File::open(self.resolve(location))
    }
}

/// Named documents held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryConnector {
    documents: HashMap<String, Vec<u8>>
}

impl MemoryConnector {
    /// Create an empty connector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a document.
    #[must_use]
    pub fn with(mut self, location: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(location, content);
        self
    }

    /// Add or replace a document in place.
    pub fn insert(&mut self, location: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.documents.insert(location.into(), content.into());
    }

    /// Check if a document exists.
    #[must_use]
    pub fn contains(&self, location: &str) -> bool {
        self.documents.contains_key(location)
    }
}

impl Connector for MemoryConnector {
    type Stream = Cursor<Vec<u8>>;

    fn open(&self, location: &str) -> io::Result<Self::Stream> {
        self.documents
            .get(location)
            .map(|content| Cursor::new(content.clone()))
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no document named `{location}`")
                )
            })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{cell::Cell, env};

    use super::*;

    /// Serves one document and counts releases.
    pub struct Counting {
        document:    Vec<u8>,
        fail_at_end: bool,
        releases:    Cell<usize>
    }

    impl Counting {
        pub fn new(document: impl Into<Vec<u8>>) -> Self {
            Self {
                document:    document.into(),
                fail_at_end: false,
                releases:    Cell::new(0)
            }
        }

        pub fn releases(&self) -> usize {
            self.releases.get()
        }

        /// Fail with a read error once the document is consumed.
        pub fn failing_at_end(mut self) -> Self {
            self.fail_at_end = true;
            self
        }
    }

    pub struct CountingStream {
        data:        Cursor<Vec<u8>>,
        fail_at_end: bool
    }

    impl Read for CountingStream {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let read = self.data.read(buf)?;
            if read == 0 && self.fail_at_end && !buf.is_empty() {
                return Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
            }
            Ok(read)
        }
    }

    impl Connector for Counting {
        type Stream = CountingStream;

        fn open(&self, _: &str) -> io::Result<CountingStream> {
            Ok(CountingStream {
                data:        Cursor::new(self.document.clone()),
                fail_at_end: self.fail_at_end
            })
        }

        fn release(&self, stream: CountingStream) -> io::Result<()> {
            drop(stream);
            self.releases.set(self.releases.get() + 1);
            Ok(())
        }
    }

    #[test]
    fn memory_connector_serves_documents() {
        let connector = MemoryConnector::new().with("parkings.csv", "id;nom\n");
        assert!(connector.contains("parkings.csv"));

        let mut text = String::new();
        connector
            .open("parkings.csv")
            .unwrap()
            .read_to_string(&mut text)
            .unwrap();
        assert_eq!(text, "id;nom\n");
    }

    #[test]
    fn memory_connector_missing_document() {
        let err = MemoryConnector::new().open("absent.xml").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn file_connector_resolves_against_root() {
        let connector = FileConnector::new(env::temp_dir());
        assert_eq!(connector.root(), env::temp_dir());
        assert_eq!(
            connector.resolve("equipements.csv"),
            env::temp_dir().join("equipements.csv")
        );
        assert!(
            connector
                .open("fieldmap-definitely-missing.csv")
                .is_err()
        );
    }

    #[test]
    fn failed_release_is_swallowed() {
        struct Sticky;

        impl Connector for Sticky {
            type Stream = io::Empty;

            fn open(&self, _: &str) -> io::Result<io::Empty> {
                Ok(io::empty())
            }

            fn release(&self, _: io::Empty) -> io::Result<()> {
                Err(io::Error::other("still busy"))
            }
        }

        let stream = Sticky.open("any").unwrap();
        release_quietly(&Sticky, stream, "any");
    }
}
