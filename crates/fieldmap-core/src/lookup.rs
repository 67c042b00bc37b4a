// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Lazily loaded, immutable key to record tables.
//!
//! A [`Lookup`] holds a loader and runs it once, on first access. The
//! resulting table never changes afterwards. A failing loader is logged
//! and leaves the table empty for the rest of the lookup's life; it is not
//! retried.
//!
//! ```rust
//! use fieldmap_core::{Keyed, Lookup};
//!
//! struct Equipment {
//!     id:   i32,
//!     name: &'static str
//! }
//!
//! impl Keyed for Equipment {
//!     type Key = i32;
//!
//!     fn key(&self) -> i32 {
//!         self.id
//!     }
//! }
//!
//! let lookup = Lookup::new(|| {
//!     Ok(vec![Equipment {
//!         id:   3549,
//!         name: "Parc en enclos Feydeau"
//!     }])
//! });
//! assert!(!lookup.is_loaded());
//! assert_eq!(lookup.get(&3549).map(|e| e.name), Some("Parc en enclos Feydeau"));
//! assert!(lookup.get(&1).is_none());
//! ```

use std::{
    collections::HashMap,
    fmt,
    hash::Hash,
    sync::OnceLock
};

use tracing::{debug, warn};

use crate::{
    descriptor::Record,
    error::ParseError,
    source::Connector,
    tabular::TabularEngine
};

/// A record identified by a key.
pub trait Keyed {
    /// Key type.
    type Key: Eq + Hash;

    /// Key of this record.
    fn key(&self) -> Self::Key;
}

type Loader<T> = Box<dyn Fn() -> Result<Vec<T>, ParseError> + Send + Sync>;

/// Build-once table of records by key.
pub struct Lookup<T: Keyed> {
    loader: Loader<T>,
    table:  OnceLock<HashMap<T::Key, T>>
}

impl<T: Keyed> Lookup<T> {
    /// Create a lookup filled by `loader` on first access.
    pub fn new<F>(loader: F) -> Self
    where
        F: Fn() -> Result<Vec<T>, ParseError> + Send + Sync + 'static
    {
        Self {
            loader: Box::new(loader),
            table:  OnceLock::new()
        }
    }

    /// Record stored under `key`.
    pub fn get(&self, key: &T::Key) -> Option<&T> {
        self.table().get(key)
    }

    /// Number of records in the table, loading it if needed.
    pub fn len(&self) -> usize {
        self.table().len()
    }

    /// Check if the table is empty, loading it if needed.
    pub fn is_empty(&self) -> bool {
        self.table().is_empty()
    }

    /// Check if the loader has already run.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.table.get().is_some()
    }

    /// Every record, in no particular order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.table().values()
    }

    fn table(&self) -> &HashMap<T::Key, T> {
        self.table.get_or_init(|| match (self.loader)() {
            Ok(records) => {
                let loaded = records.len();
                let table: HashMap<_, _> = records
                    .into_iter()
                    .map(|record| (record.key(), record))
                    .collect();
                debug!(
                    type_name = std::any::type_name::<T>(),
                    loaded,
                    keys = table.len(),
                    "lookup table loaded"
                );
                table
            }
            Err(err) => {
                warn!(
                    type_name = std::any::type_name::<T>(),
                    error = %err,
                    "lookup load failed, table left empty"
                );
                HashMap::new()
            }
        })
    }
}

impl<T: Keyed + Record> Lookup<T> {
    /// Lookup loaded from a tabular document on first access.
    pub fn from_tabular<C>(engine: TabularEngine, connector: C, location: impl Into<String>) -> Self
    where
        C: Connector + Send + Sync + 'static
    {
        let location = location.into();
        Self::new(move || engine.fetch_list(&connector, &location))
    }
}

impl<T: Keyed> fmt::Debug for Lookup<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lookup")
            .field("loaded", &self.is_loaded())
            .field("len", &self.table.get().map(HashMap::len))
            .finish_non_exhaustive()
    }
}
