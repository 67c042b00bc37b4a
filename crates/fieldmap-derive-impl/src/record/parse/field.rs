// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field-level attribute parsing.
//!
//! # Supported Attributes
//!
//! | Attribute | Default | Description |
//! |-----------|---------|-------------|
//! | `name = "..."` | Rust field name | External element or column name |
//! | `kind = "..."` | inferred from the type | Coercion kind |
//! | `adapter = path` | none | `fn(&str) -> FieldType` replacing the default rule |
//! | `default = "..."` | none | Text used when the value is absent or empty |
//! | `skip` | `false` | Field is not mapped |
//!
//! ```rust,ignore
//! #[field(name = "Places", adapter = fieldmap::adapters::locale_int)]
//! pub places: i32,
//!
//! #[field(name = "Commune", default = "NANTES")]
//! pub city: String,
//!
//! #[field(skip)]
//! pub cached: Vec<u8>,
//! ```
//!
//! Unknown keys are compile errors.

use syn::{Attribute, Field, Ident, LitStr, Path, Type};

use super::kind::Kind;

/// Options from `#[field(...)]`.
#[derive(Debug, Clone, Default)]
pub struct FieldConfig {
    /// External name override.
    pub name: Option<LitStr>,

    /// Explicit coercion kind.
    pub kind: Option<Kind>,

    /// Custom coercion function.
    pub adapter: Option<Path>,

    /// Default text for absent or empty values.
    pub default: Option<LitStr>,

    /// Field is not mapped.
    pub skip: bool
}

impl FieldConfig {
    /// Parse from a `#[field(...)]` attribute.
    ///
    /// # Errors
    ///
    /// Unknown keys, malformed values and unknown kinds.
    pub fn from_attr(attr: &Attribute) -> syn::Result<Self> {
        let mut config = Self::default();

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let _: syn::Token![=] = meta.input.parse()?;
                config.name = Some(meta.input.parse()?);
            } else if meta.path.is_ident("kind") {
                let _: syn::Token![=] = meta.input.parse()?;
                let value: LitStr = meta.input.parse()?;
                let kind = Kind::from_str(&value.value()).ok_or_else(|| {
                    syn::Error::new(
                        value.span(),
                        format!("unknown kind, expected one of {}", Kind::EXPECTED)
                    )
                })?;
                config.kind = Some(kind);
            } else if meta.path.is_ident("adapter") {
                let _: syn::Token![=] = meta.input.parse()?;
                config.adapter = Some(if meta.input.peek(LitStr) {
                    meta.input.parse::<LitStr>()?.parse()?
                } else {
                    meta.input.parse()?
                });
            } else if meta.path.is_ident("default") {
                let _: syn::Token![=] = meta.input.parse()?;
                config.default = Some(meta.input.parse()?);
            } else if meta.path.is_ident("skip") {
                config.skip = true;
            } else {
                return Err(meta.error(
                    "unknown field option, expected `name`, `kind`, `adapter`, `default` or `skip`"
                ));
            }
            Ok(())
        })?;

        Ok(config)
    }
}

/// One named field of the target struct.
#[derive(Debug)]
pub struct FieldDef {
    /// Field identifier.
    pub ident: Ident,

    /// Field type.
    pub ty: Type,

    /// Parsed `#[field(...)]` options.
    pub config: FieldConfig
}

impl FieldDef {
    /// Parse field definition from syn's `Field`.
    ///
    /// # Errors
    ///
    /// Unnamed fields and malformed `#[field(...)]` attributes.
    pub fn from_field(field: &Field) -> darling::Result<Self> {
        let ident = field.ident.clone().ok_or_else(|| {
            darling::Error::custom("Record fields must be named").with_span(field)
        })?;

        let mut config = FieldConfig::default();
        for attr in &field.attrs {
            if attr.path().is_ident("field") {
                config = FieldConfig::from_attr(attr)?;
            }
        }

        Ok(Self {
            ident,
            ty: field.ty.clone(),
            config
        })
    }

    /// External element or column name.
    #[must_use]
    pub fn external_name(&self) -> String {
        self.config
            .name
            .as_ref()
            .map_or_else(|| self.rust_name(), LitStr::value)
    }

    /// Rust field name, without raw identifier prefix.
    #[must_use]
    pub fn rust_name(&self) -> String {
        let name = self.ident.to_string();
        name.strip_prefix("r#").map(str::to_owned).unwrap_or(name)
    }

    /// Check if the field takes part in the mapping.
    #[must_use]
    pub fn is_mapped(&self) -> bool {
        !self.config.skip
    }

    /// Span to report name problems at.
    #[must_use]
    pub fn name_span(&self) -> proc_macro2::Span {
        self.config
            .name
            .as_ref()
            .map_or_else(|| self.ident.span(), LitStr::span)
    }
}
