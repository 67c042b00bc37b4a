// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `Record` impl generation.
//!
//! Each mapped field becomes one `FieldSpec` whose setter is a
//! non-capturing closure, coerced to a plain function pointer:
//!
//! ```rust,ignore
//! ::fieldmap::FieldSpec::new(
//!     "Couleur_TP",
//!     "color_id",
//!     <i32 as ::fieldmap::Scalar>::KIND,
//!     |record: &mut Self, raw, rules| {
//!         record.color_id = <i32 as ::fieldmap::Scalar>::coerce(raw, KIND, rules);
//!     }
//! )
//! ```
//!
//! | Field options | Setter body | Kind |
//! |---------------|-------------|------|
//! | none | `Scalar::coerce` | `<T as Scalar>::KIND` |
//! | `kind = "..."` | `Scalar::coerce` | declared |
//! | `adapter = f` | `f(trimmed text or "")` | declared, else `String` |

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::{FieldDef, Kind, RecordDef};

/// Generate `impl ::fieldmap::Record` for the parsed struct.
pub fn generate(record: &RecordDef) -> TokenStream {
    let ident = &record.ident;
    let element = &record.element;
    let (impl_generics, ty_generics, where_clause) = record.generics.split_for_impl();
    let specs = record.mapped_fields().map(field_spec);

    quote! {
        impl #impl_generics ::fieldmap::Record for #ident #ty_generics #where_clause {
            const ELEMENT: &'static str = #element;

            fn fields() -> ::std::vec::Vec<::fieldmap::FieldSpec<Self>> {
                ::std::vec![#(#specs),*]
            }
        }
    }
}

fn field_spec(field: &FieldDef) -> TokenStream {
    let ident = &field.ident;
    let ty = &field.ty;
    let name = field.external_name();
    let rust_name = field.rust_name();

    let (kind, rules, body) = match &field.config.adapter {
        Some(adapter) => {
            let kind = field.config.kind.unwrap_or(Kind::String);
            let body = quote! {
                record.#ident = #adapter(raw.map(str::trim).unwrap_or_default());
            };
            (quote!(#kind), quote!(_rules), body)
        }
        None => {
            let kind = field
                .config
                .kind
                .map_or_else(|| quote!(<#ty as ::fieldmap::Scalar>::KIND), |kind| quote!(#kind));
            let body = quote! {
                record.#ident = <#ty as ::fieldmap::Scalar>::coerce(raw, #kind, rules);
            };
            (kind, quote!(rules), body)
        }
    };

    let adapter = field.config.adapter.as_ref().map(|path| {
        let text = quote!(#path).to_string().replace(' ', "");
        quote!(.with_adapter(#text))
    });
    let default = field
        .config
        .default
        .as_ref()
        .map(|text| quote!(.with_default(#text)));

    quote! {
        ::fieldmap::FieldSpec::new(
            #name,
            #rust_name,
            #kind,
            |record: &mut Self,
             raw: ::core::option::Option<&str>,
             #rules: &::fieldmap::CoercionRules| {
                #body
            }
        )
        #adapter
        #default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(input: syn::DeriveInput) -> String {
        let def = RecordDef::from_derive_input(&input).unwrap();
        generate(&def).to_string()
    }

    #[test]
    fn implements_record_with_element() {
        let code = expand(syn::parse_quote! {
            #[record(element = "Troncon")]
            struct SegmentFluency {
                #[field(name = "Id")]
                id: i32,
            }
        });
        assert!(code.contains("impl :: fieldmap :: Record for SegmentFluency"));
        assert!(code.contains("const ELEMENT : & 'static str = \"Troncon\""));
        assert!(code.contains("\"Id\" , \"id\""));
    }

    #[test]
    fn infers_kind_from_type() {
        let code = expand(syn::parse_quote! {
            struct Parking {
                places: u32,
            }
        });
        assert!(code.contains("< u32 as :: fieldmap :: Scalar > :: KIND"));
        assert!(code.contains("< u32 as :: fieldmap :: Scalar > :: coerce"));
    }

    #[test]
    fn explicit_kind_overrides_type() {
        let code = expand(syn::parse_quote! {
            struct Parking {
                #[field(kind = "locale_number")]
                places: i64,
            }
        });
        assert!(code.contains(":: fieldmap :: ScalarKind :: LocaleNumber"));
        assert!(!code.contains(":: KIND"));
    }

    #[test]
    fn adapter_replaces_coercion() {
        let code = expand(syn::parse_quote! {
            struct Parking {
                #[field(name = "Places", adapter = fieldmap::adapters::locale_int)]
                places: i32,
            }
        });
        assert!(code.contains("fieldmap :: adapters :: locale_int (raw . map (str :: trim)"));
        assert!(code.contains("with_adapter (\"fieldmap::adapters::locale_int\")"));
        assert!(code.contains(":: fieldmap :: ScalarKind :: String"));
        assert!(!code.contains("Scalar > :: coerce"));
    }

    #[test]
    fn default_text_is_attached() {
        let code = expand(syn::parse_quote! {
            struct Equipment {
                #[field(name = "Commune", default = "NANTES")]
                city: String,
            }
        });
        assert!(code.contains("with_default (\"NANTES\")"));
    }

    #[test]
    fn skipped_fields_are_left_out() {
        let code = expand(syn::parse_quote! {
            struct Equipment {
                id: i32,
                #[field(skip)]
                cached: Vec<u8>,
            }
        });
        assert!(code.contains("\"id\""));
        assert!(!code.contains("cached"));
    }

    #[test]
    fn raw_identifier_keeps_prefix_in_setter() {
        let code = expand(syn::parse_quote! {
            struct Equipment {
                r#type: String,
            }
        });
        assert!(code.contains("\"type\" , \"type\""));
        assert!(code.contains("record . r#type ="));
    }

    #[test]
    fn generics_are_forwarded() {
        let code = expand(syn::parse_quote! {
            struct Tagged<T: Default + 'static> {
                id: i32,
                #[field(skip)]
                tag: T,
            }
        });
        assert!(code.starts_with("impl < T"));
        assert!(code.contains(":: fieldmap :: Record for Tagged < T >"));
    }
}
