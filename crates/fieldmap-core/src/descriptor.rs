// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Per-type field mapping tables.
//!
//! A [`TypeDescriptor`] lists, in declaration order, how each external name
//! (markup element or column header) lands on a field of the target type.
//! Descriptors are built from [`Record::fields`] and are immutable once
//! built; [`Registry`](crate::Registry) caches one per type.
//!
//! # Architecture
//!
//! ```text
//! #[derive(Record)]           hand-written impl
//!        │                           │
//!        └──────► Record::fields() ◄─┘
//!                       │
//!              TypeDescriptor::build()   (duplicate names rejected)
//!                       │
//!                Registry (cached per TypeId)
//! ```

use std::{collections::HashMap, fmt};

use crate::{
    coerce::{CoercionRules, ScalarKind},
    error::RegistryError
};

/// Typed setter: coerce raw text and store it into one field.
pub type Setter<T> = fn(&mut T, Option<&str>, &CoercionRules);

/// A type the engines can build from named raw values.
///
/// Implemented by `#[derive(Record)]`, or by hand:
///
/// ```rust
/// use fieldmap_core::{CoercionRules, FieldSpec, Record, Scalar, ScalarKind};
///
/// #[derive(Debug, Default)]
/// struct Segment {
///     id: i32
/// }
///
/// impl Record for Segment {
///     const ELEMENT: &'static str = "Troncon";
///
///     fn fields() -> Vec<FieldSpec<Self>> {
///         vec![FieldSpec::new(
///             "Id",
///             "id",
///             ScalarKind::Integer,
///             |record: &mut Self, raw: Option<&str>, rules: &CoercionRules| {
///                 record.id = i32::coerce(raw, ScalarKind::Integer, rules);
///             }
///         )]
///     }
/// }
/// ```
pub trait Record: Default + Sized + 'static {
    /// Markup element that delimits one record.
    const ELEMENT: &'static str;

    /// Field mappings in declaration order.
    fn fields() -> Vec<FieldSpec<Self>>;
}

/// Mapping of one external name onto one field.
pub struct FieldSpec<T> {
    name:    &'static str,
    field:   &'static str,
    kind:    ScalarKind,
    adapter: Option<&'static str>,
    default: Option<&'static str>,
    setter:  Setter<T>
}

impl<T> FieldSpec<T> {
    /// Create a mapping from external `name` to the field called `field`.
    pub const fn new(
        name: &'static str,
        field: &'static str,
        kind: ScalarKind,
        setter: Setter<T>
    ) -> Self {
        Self {
            name,
            field,
            kind,
            adapter: None,
            default: None,
            setter
        }
    }

    /// Record that the setter goes through a custom adapter.
    #[must_use]
    pub const fn with_adapter(mut self, adapter: &'static str) -> Self {
        self.adapter = Some(adapter);
        self
    }

    /// Text used when the value is absent or empty.
    #[must_use]
    pub const fn with_default(mut self, text: &'static str) -> Self {
        self.default = Some(text);
        self
    }

    /// External element or column name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Rust field name.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// Declared coercion kind.
    #[must_use]
    pub const fn kind(&self) -> ScalarKind {
        self.kind
    }

    /// Adapter path, if the field has one.
    #[must_use]
    pub const fn adapter(&self) -> Option<&'static str> {
        self.adapter
    }

    /// Default text, if the field declares one.
    #[must_use]
    pub const fn default_text(&self) -> Option<&'static str> {
        self.default
    }

    /// Coerce `raw` and store it into `record`.
    ///
    /// Absent or empty text is replaced by the declared default first.
    pub fn apply(&self, record: &mut T, raw: Option<&str>, rules: &CoercionRules) {
        let raw = match (raw, self.default) {
            (None, Some(default)) => Some(default),
            (Some(text), Some(default)) if text.is_empty() => Some(default),
            _ => raw
        };
        (self.setter)(record, raw, rules);
    }
}

impl<T> Clone for FieldSpec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FieldSpec<T> {}

impl<T> PartialEq for FieldSpec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.field == other.field
            && self.kind == other.kind
            && self.adapter == other.adapter
            && self.default == other.default
    }
}

impl<T> fmt::Debug for FieldSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("field", &self.field)
            .field("kind", &self.kind)
            .field("adapter", &self.adapter)
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}

/// Immutable mapping table for one target type.
pub struct TypeDescriptor<T> {
    type_name: &'static str,
    element:   &'static str,
    fields:    Vec<FieldSpec<T>>,
    index:     HashMap<&'static str, usize>
}

impl<T: Record> TypeDescriptor<T> {
    /// Build the descriptor of `T` from its declared fields.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] if two fields declare the
    /// same external name.
    pub fn build() -> Result<Self, RegistryError> {
        Self::from_specs(std::any::type_name::<T>(), T::ELEMENT, T::fields())
    }
}

impl<T> TypeDescriptor<T> {
    /// Build a descriptor from explicit specs.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] if two specs share a name.
    pub fn from_specs(
        type_name: &'static str,
        element: &'static str,
        fields: Vec<FieldSpec<T>>
    ) -> Result<Self, RegistryError> {
        let mut index = HashMap::with_capacity(fields.len());
        for (position, spec) in fields.iter().enumerate() {
            if index.insert(spec.name, position).is_some() {
                return Err(RegistryError::DuplicateName {
                    type_name,
                    name: spec.name
                });
            }
        }
        Ok(Self {
            type_name,
            element,
            fields,
            index
        })
    }

    /// Rust type name of the target.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Markup element delimiting one record.
    #[must_use]
    pub const fn element(&self) -> &'static str {
        self.element
    }

    /// All mappings in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec<T>] {
        &self.fields
    }

    /// Position of the mapping for an external name.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Mapping for an external name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldSpec<T>> {
        self.position(name).map(|position| &self.fields[position])
    }

    /// Check if an external name is mapped.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of mapped fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if no field is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// External names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(FieldSpec::name)
    }
}

impl<T> PartialEq for TypeDescriptor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name
            && self.element == other.element
            && self.fields == other.fields
    }
}

impl<T> fmt::Debug for TypeDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type_name", &self.type_name)
            .field("element", &self.element)
            .field("fields", &self.fields)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::coerce::Scalar;

    #[derive(Debug, Default, PartialEq)]
    pub struct Segment {
        pub id:       i32,
        pub color_id: i32,
        pub label:    String
    }

    impl Record for Segment {
        const ELEMENT: &'static str = "Troncon";

        fn fields() -> Vec<FieldSpec<Self>> {
            vec![
                FieldSpec::new(
                    "Id",
                    "id",
                    ScalarKind::Integer,
                    |record: &mut Self, raw: Option<&str>, rules: &CoercionRules| {
                        record.id = i32::coerce(raw, ScalarKind::Integer, rules);
                    }
                ),
                FieldSpec::new(
                    "Couleur_TP",
                    "color_id",
                    ScalarKind::Integer,
                    |record: &mut Self, raw: Option<&str>, rules: &CoercionRules| {
                        record.color_id = i32::coerce(raw, ScalarKind::Integer, rules);
                    }
                ),
                FieldSpec::new(
                    "Libelle",
                    "label",
                    ScalarKind::String,
                    |record: &mut Self, raw: Option<&str>, rules: &CoercionRules| {
                        record.label = String::coerce(raw, ScalarKind::String, rules);
                    }
                )
                .with_default("sans nom"),
            ]
        }
    }

    #[derive(Debug, Default)]
    pub struct Clashing {
        pub first: i32
    }

    impl Record for Clashing {
        const ELEMENT: &'static str = "Clash";

        fn fields() -> Vec<FieldSpec<Self>> {
            let setter: Setter<Self> = |record, raw, rules| {
                record.first = i32::coerce(raw, ScalarKind::Integer, rules);
            };
            vec![
                FieldSpec::new("Id", "first", ScalarKind::Integer, setter),
                FieldSpec::new("Id", "second", ScalarKind::Integer, setter),
            ]
        }
    }

    #[test]
    fn build_indexes_names_in_order() {
        let descriptor = TypeDescriptor::<Segment>::build().unwrap();
        assert_eq!(descriptor.element(), "Troncon");
        assert_eq!(descriptor.len(), 3);
        assert_eq!(
            descriptor.names().collect::<Vec<_>>(),
            ["Id", "Couleur_TP", "Libelle"]
        );
        assert_eq!(descriptor.position("Couleur_TP"), Some(1));
        assert_eq!(descriptor.get("Id").map(FieldSpec::field), Some("id"));
        assert!(!descriptor.contains("Unknown"));
        assert!(descriptor.type_name().ends_with("Segment"));
    }

    #[test]
    fn build_rejects_duplicate_names() {
        let err = TypeDescriptor::<Clashing>::build().unwrap_err();
        assert!(matches!(
            err,
            RegistryError::DuplicateName { name: "Id", .. }
        ));
    }

    #[test]
    fn build_twice_yields_identical_tables() {
        let first = TypeDescriptor::<Segment>::build().unwrap();
        let second = TypeDescriptor::<Segment>::build().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn apply_substitutes_default_text() {
        let descriptor = TypeDescriptor::<Segment>::build().unwrap();
        let rules = CoercionRules::default();
        let label = descriptor.get("Libelle").unwrap();
        assert_eq!(label.default_text(), Some("sans nom"));

        let mut segment = Segment::default();
        label.apply(&mut segment, Some(""), &rules);
        assert_eq!(segment.label, "sans nom");
        label.apply(&mut segment, Some("Cours des 50 Otages"), &rules);
        assert_eq!(segment.label, "Cours des 50 Otages");
        label.apply(&mut segment, None, &rules);
        assert_eq!(segment.label, "sans nom");
    }
}
