// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `#[derive(Token)]` implementation.
//!
//! Maps a fieldless enum onto a closed token set and makes it usable as a
//! record field of kind `Enum`.
//!
//! # Example
//!
//! ```rust,ignore
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Token)]
//! pub enum Theme {
//!     #[token("DEPLACEMENT")]
//!     Deplacement,
//!     Culture,
//!     #[token("INCONNU", unknown)]
//!     Unknown
//! }
//! ```
//!
//! Generates `impl ::fieldmap::Token` (exact match, unmatched text yields the
//! unknown variant) and `impl ::fieldmap::Scalar` with kind `Enum`.
//!
//! # Variant Attributes
//!
//! | Attribute | Description |
//! |-----------|-------------|
//! | none | Token is the variant name |
//! | `#[token("...")]` | Explicit token |
//! | `#[token(unknown)]` | Fallback variant, exactly one required |

use std::collections::HashMap;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    DeriveInput, Ident, LitStr,
    parse::{Parse, ParseStream},
    parse_macro_input,
    punctuated::Punctuated
};

/// Main entry point for the Token derive macro.
pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match generate(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into()
    }
}

/// One argument inside `#[token(...)]`.
enum TokenArg {
    Text(LitStr),
    Unknown
}

impl Parse for TokenArg {
    fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
        if input.peek(LitStr) {
            return Ok(Self::Text(input.parse()?));
        }
        let ident: Ident = input.parse()?;
        if ident == "unknown" {
            Ok(Self::Unknown)
        } else {
            Err(syn::Error::new(
                ident.span(),
                "expected a string token or `unknown`"
            ))
        }
    }
}

/// Parsed variant.
struct TokenVariant {
    ident:   Ident,
    token:   LitStr,
    unknown: bool
}

fn parse_variant(variant: &syn::Variant) -> syn::Result<TokenVariant> {
    if !matches!(variant.fields, syn::Fields::Unit) {
        return Err(syn::Error::new_spanned(
            variant,
            "Token variants cannot carry fields"
        ));
    }

    let mut token = None;
    let mut unknown = false;
    for attr in variant.attrs.iter().filter(|a| a.path().is_ident("token")) {
        let args = attr.parse_args_with(Punctuated::<TokenArg, syn::Token![,]>::parse_terminated)?;
        for arg in args {
            match arg {
                TokenArg::Text(text) => token = Some(text),
                TokenArg::Unknown => unknown = true
            }
        }
    }

    Ok(TokenVariant {
        token: token.unwrap_or_else(|| LitStr::new(&variant.ident.to_string(), variant.ident.span())),
        ident: variant.ident.clone(),
        unknown
    })
}

/// Generate the `Token` and `Scalar` impls.
fn generate(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    let variants = match &input.data {
        syn::Data::Enum(data) => &data.variants,
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Token can only be derived for enums"
            ));
        }
    };

    let variants: Vec<TokenVariant> = variants
        .iter()
        .map(parse_variant)
        .collect::<syn::Result<_>>()?;

    let mut seen: HashMap<String, &Ident> = HashMap::new();
    for variant in &variants {
        if let Some(first) = seen.insert(variant.token.value(), &variant.ident) {
            return Err(syn::Error::new(
                variant.token.span(),
                format!("token `{}` is already used by `{first}`", variant.token.value())
            ));
        }
    }

    let mut unknowns = variants.iter().filter(|v| v.unknown);
    let unknown = match (unknowns.next(), unknowns.next()) {
        (Some(unknown), None) => &unknown.ident,
        (None, _) => {
            return Err(syn::Error::new_spanned(
                name,
                "Token requires one variant marked `#[token(unknown)]`"
            ));
        }
        (Some(_), Some(second)) => {
            return Err(syn::Error::new_spanned(
                &second.ident,
                "only one variant can be marked `#[token(unknown)]`"
            ));
        }
    };

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let idents: Vec<&Ident> = variants.iter().map(|v| &v.ident).collect();
    let tokens: Vec<&LitStr> = variants.iter().map(|v| &v.token).collect();

    Ok(quote! {
        impl #impl_generics ::fieldmap::Token for #name #ty_generics #where_clause {
            const UNKNOWN: Self = Self::#unknown;

            fn from_token(token: &str) -> Self {
                match token {
                    #(#tokens => Self::#idents,)*
                    _ => Self::#unknown
                }
            }

            fn as_token(&self) -> &'static str {
                match self {
                    #(Self::#idents => #tokens),*
                }
            }
        }

        impl #impl_generics ::fieldmap::Scalar for #name #ty_generics #where_clause {
            const KIND: ::fieldmap::ScalarKind = ::fieldmap::ScalarKind::Enum;

            fn parse_text(
                text: &str,
                _kind: ::fieldmap::ScalarKind,
                _rules: &::fieldmap::CoercionRules
            ) -> ::core::option::Option<Self> {
                ::core::option::Option::Some(<Self as ::fieldmap::Token>::from_token(text.trim()))
            }

            fn fallback() -> Self {
                <Self as ::fieldmap::Token>::UNKNOWN
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(input: DeriveInput) -> syn::Result<String> {
        generate(&input).map(|tokens| tokens.to_string())
    }

    #[test]
    fn maps_explicit_and_implicit_tokens() {
        let code = expand(syn::parse_quote! {
            enum Theme {
                #[token("DEPLACEMENT")]
                Deplacement,
                Culture,
                #[token(unknown)]
                Unknown
            }
        })
        .unwrap();
        assert!(code.contains("\"DEPLACEMENT\" => Self :: Deplacement"));
        assert!(code.contains("\"Culture\" => Self :: Culture"));
        assert!(code.contains("const UNKNOWN : Self = Self :: Unknown"));
        assert!(code.contains("_ => Self :: Unknown"));
    }

    #[test]
    fn unknown_variant_may_carry_token() {
        let code = expand(syn::parse_quote! {
            enum Category {
                #[token("PARKING_ENCLOS")]
                ParkingEnclosure,
                #[token("INCONNU", unknown)]
                Unknown
            }
        })
        .unwrap();
        assert!(code.contains("Self :: Unknown => \"INCONNU\""));
    }

    #[test]
    fn implements_scalar_with_enum_kind() {
        let code = expand(syn::parse_quote! {
            enum Theme {
                #[token(unknown)]
                Unknown
            }
        })
        .unwrap();
        assert!(code.contains("impl :: fieldmap :: Scalar for Theme"));
        assert!(code.contains(":: fieldmap :: ScalarKind :: Enum"));
    }

    #[test]
    fn rejects_missing_unknown() {
        let err = expand(syn::parse_quote! {
            enum Theme {
                Deplacement
            }
        })
        .unwrap_err();
        assert!(err.to_string().contains("#[token(unknown)]"));
    }

    #[test]
    fn rejects_two_unknowns() {
        let err = expand(syn::parse_quote! {
            enum Theme {
                #[token(unknown)]
                First,
                #[token(unknown)]
                Second
            }
        })
        .unwrap_err();
        assert!(err.to_string().contains("only one variant"));
    }

    #[test]
    fn rejects_duplicate_tokens() {
        let err = expand(syn::parse_quote! {
            enum Theme {
                #[token("A")]
                First,
                #[token("A")]
                Second,
                #[token(unknown)]
                Unknown
            }
        })
        .unwrap_err();
        assert!(err.to_string().contains("token `A` is already used by `First`"));
    }

    #[test]
    fn rejects_data_variants() {
        let err = expand(syn::parse_quote! {
            enum Theme {
                Named(String),
                #[token(unknown)]
                Unknown
            }
        })
        .unwrap_err();
        assert!(err.to_string().contains("cannot carry fields"));
    }

    #[test]
    fn rejects_struct() {
        assert!(expand(syn::parse_quote!(struct Theme;)).is_err());
    }

    #[test]
    fn rejects_bad_argument() {
        let err = expand(syn::parse_quote! {
            enum Theme {
                #[token(fallback)]
                Unknown
            }
        })
        .unwrap_err();
        assert!(err.to_string().contains("expected a string token"));
    }
}
