// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Struct-level attribute parsing with darling.
//!
//! | Attribute | Required | Default | Description |
//! |-----------|----------|---------|-------------|
//! | `element` | No | struct name | Markup element delimiting one record |

use darling::{FromDeriveInput, ast::Data};
use syn::{Field, Generics, Ident};

/// Struct-level attributes parsed from `#[record(...)]`.
///
/// Internal to parsing; generators receive [`RecordDef`](super::RecordDef).
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(record), supports(struct_named))]
pub struct RecordAttrs {
    /// Struct identifier.
    pub ident: Ident,

    /// Struct generics.
    pub generics: Generics,

    /// Named fields; other shapes are rejected by `supports`.
    pub data: Data<(), Field>,

    /// Markup element name.
    #[darling(default)]
    pub element: Option<String>
}
