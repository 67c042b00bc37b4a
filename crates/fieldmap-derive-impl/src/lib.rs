// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

//! # Attribute Quick Reference
//!
//! ## Record-Level `#[record(...)]`
//!
//! ```rust,ignore
//! #[derive(Debug, Default, Record)]
//! #[record(element = "Troncon")] // Optional: defaults to the struct name
//! pub struct SegmentFluency { /* ... */ }
//! ```
//!
//! ## Field-Level `#[field(...)]`
//!
//! ```rust,ignore
//! pub struct Equipment {
//!     pub id: i32,                                  // Column "id", kind from type
//!
//!     #[field(name = "nom")]                        // External name override
//!     pub name: String,
//!
//!     #[field(name = "Places", adapter = fieldmap::adapters::locale_int)]
//!     pub places: i32,                              // Custom coercion
//!
//!     #[field(name = "Grp_complet", kind = "locale_number")]
//!     pub full: i64,                                // Explicit kind
//!
//!     #[field(name = "Commune", default = "NANTES")]
//!     pub city: String,                             // Absent or empty -> "NANTES"
//!
//!     #[field(skip)]
//!     pub cached: Vec<u8>,                          // Not mapped
//! }
//! ```
//!
//! ## Variant-Level `#[token(...)]`
//!
//! ```rust,ignore
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Token)]
//! pub enum Category {
//!     #[token("PARKING_ENCLOS")]
//!     ParkingEnclosure,
//!     #[token(unknown)]
//!     Unknown
//! }
//! ```
//!
//! # Generated Code Overview
//!
//! | Derive | Generated |
//! |--------|-----------|
//! | `Record` | `impl fieldmap::Record`: element name plus one `FieldSpec` per mapped field |
//! | `Token` | `impl fieldmap::Token` and `impl fieldmap::Scalar` with kind `Enum` |
//!
//! Generated code refers to `::fieldmap`, so depend on the `fieldmap` crate
//! rather than on this one.

mod record;
mod token;

use proc_macro::TokenStream;

/// Derive the field mapping table of a record type.
///
/// Each named field is mapped under its Rust name, or the name given with
/// `#[field(name = "...")]`. The coercion kind comes from the field type's
/// `Scalar` impl unless `kind` or `adapter` says otherwise. The type must
/// implement `Default`: records start from it and only mapped fields are
/// overwritten.
///
/// # Record Attributes
///
/// | Attribute | Required | Default | Description |
/// |-----------|----------|---------|-------------|
/// | `element` | No | struct name | Markup element delimiting one record |
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `name = "..."` | External element or column name |
/// | `kind = "..."` | `string`, `integer`, `double`, `boolean`, `enum` or `locale_number` |
/// | `adapter = path` | `fn(&str) -> T` called with trimmed text, `""` when absent |
/// | `default = "..."` | Text used when the value is absent or empty |
/// | `skip` | Leave the field at its `Default` value |
///
/// # Compile Errors
///
/// - enums, unions, tuple and unit structs
/// - unknown `#[field(...)]` keys or `kind` values
/// - two mapped fields with the same external name
///
/// # Example
///
/// ```rust,ignore
/// use fieldmap::Record;
///
/// #[derive(Debug, Default, Record)]
/// #[record(element = "Troncon")]
/// pub struct SegmentFluency {
///     #[field(name = "Id")]
///     pub id: i32,
///
///     #[field(name = "Couleur_TP")]
///     pub color_id: i32
/// }
/// ```
#[proc_macro_derive(Record, attributes(record, field))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive(input)
}

/// Derive a closed token set for a fieldless enum.
///
/// Every variant maps to its name, or to the text in `#[token("...")]`.
/// Exactly one variant must carry `#[token(unknown)]`; unmatched and absent
/// text map to it.
///
/// ```rust,ignore
/// use fieldmap::Token;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Token)]
/// pub enum Theme {
///     #[token("DEPLACEMENT")]
///     Deplacement,
///     #[token(unknown)]
///     Unknown
/// }
/// ```
#[proc_macro_derive(Token, attributes(token))]
pub fn derive_token(input: TokenStream) -> TokenStream {
    token::derive(input)
}
