// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Build-once cache of type descriptors.
//!
//! The registry is shared state with explicit ownership: engines receive an
//! `Arc<Registry>` at construction and never reach for a global on their own.
//!
//! # Concurrency
//!
//! Lookups take a read lock. On a miss the descriptor is built outside the
//! lock and then published with "first insert wins", so racing first
//! accesses may build twice but every caller ends up holding the same
//! table, and no reader ever sees a partially built one.

use std::{
    any::{Any, TypeId},
    collections::HashMap,
    fmt,
    sync::{Arc, OnceLock, PoisonError, RwLock}
};

use tracing::debug;

use crate::{
    descriptor::{Record, TypeDescriptor},
    error::RegistryError
};

type Table = Arc<dyn Any + Send + Sync>;

/// Cache of [`TypeDescriptor`]s keyed by target type.
#[derive(Default)]
pub struct Registry {
    tables: RwLock<HashMap<TypeId, Table>>
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry ready to be shared.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Process-wide registry for callers that do not manage their own.
    pub fn global() -> &'static Arc<Self> {
        static GLOBAL: OnceLock<Arc<Registry>> = OnceLock::new();
        GLOBAL.get_or_init(Self::shared)
    }

    /// Build or fetch the descriptor of `T`.
    ///
    /// The first successful call builds and caches the table; later calls
    /// return the cached one.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] if `T` maps the same external
    /// name twice. Failed builds are not cached.
    pub fn descriptor<T: Record>(&self) -> Result<Arc<TypeDescriptor<T>>, RegistryError> {
        if let Some(cached) = self.cached::<T>() {
            return Ok(cached);
        }

        let built = Arc::new(TypeDescriptor::<T>::build()?);
        debug!(
            type_name = built.type_name(),
            fields = built.len(),
            "built type descriptor"
        );

        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        let published = tables
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Arc::clone(&built) as Table);
        Ok(Arc::clone(published)
            .downcast::<TypeDescriptor<T>>()
            .unwrap_or(built))
    }

    /// Check if the descriptor of `T` has been built.
    #[must_use]
    pub fn contains<T: Record>(&self) -> bool {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&TypeId::of::<T>())
    }

    /// Number of cached descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Check if no descriptor has been built yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cached<T: Record>(&self) -> Option<Arc<TypeDescriptor<T>>> {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        let table = tables.get(&TypeId::of::<T>())?;
        Arc::clone(table).downcast::<TypeDescriptor<T>>().ok()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("descriptors", &self.len())
            .finish()
    }
}
