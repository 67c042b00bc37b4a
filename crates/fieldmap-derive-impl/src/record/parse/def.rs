// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! RecordDef: everything the descriptor generator needs.

use std::collections::HashMap;

use darling::FromDeriveInput;
use syn::{DeriveInput, Generics, Ident};

use super::{RecordAttrs, field::FieldDef};

/// Parsed record definition.
#[derive(Debug)]
pub struct RecordDef {
    /// Struct identifier.
    pub ident: Ident,

    /// Struct generics.
    pub generics: Generics,

    /// Markup element delimiting one record.
    pub element: String,

    /// All named fields, mapped or skipped, in declaration order.
    pub fields: Vec<FieldDef>
}

impl RecordDef {
    /// Parse record definition from syn's `DeriveInput`.
    ///
    /// # Errors
    ///
    /// - Applied to an enum, union, tuple struct or unit struct
    /// - Malformed `#[record(...)]` or `#[field(...)]` attributes
    /// - Two mapped fields with the same external name
    pub fn from_derive_input(input: &DeriveInput) -> darling::Result<Self> {
        let attrs = RecordAttrs::from_derive_input(input)?;

        let fields = attrs
            .data
            .take_struct()
            .map(|data| data.fields)
            .unwrap_or_default()
            .iter()
            .map(FieldDef::from_field)
            .collect::<darling::Result<Vec<_>>>()?;

        check_unique_names(&fields)?;

        let element = attrs.element.unwrap_or_else(|| attrs.ident.to_string());
        Ok(Self {
            ident: attrs.ident,
            generics: attrs.generics,
            element,
            fields
        })
    }

    /// Fields taking part in the mapping.
    pub fn mapped_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|field| field.is_mapped())
    }
}

fn check_unique_names(fields: &[FieldDef]) -> darling::Result<()> {
    let mut errors = darling::Error::accumulator();
    let mut seen: HashMap<String, &Ident> = HashMap::new();

    for field in fields.iter().filter(|field| field.is_mapped()) {
        let name = field.external_name();
        if let Some(first) = seen.get(name.as_str()) {
            errors.push(
                syn::Error::new(
                    field.name_span(),
                    format!("external name `{name}` is already mapped by field `{first}`")
                )
                .into()
            );
        } else {
            seen.insert(name, &field.ident);
        }
    }

    errors.finish()
}
