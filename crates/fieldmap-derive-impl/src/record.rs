// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `#[derive(Record)]` implementation.
//!
//! ```text
//! DeriveInput
//!      │
//!      ▼
//! parse::RecordDef ──► descriptor::generate ──► impl ::fieldmap::Record
//! ```
//!
//! Parsing collects every attribute problem before reporting, so a struct
//! with several bad fields shows all of them in one compile.

mod descriptor;
pub mod parse;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

use self::parse::RecordDef;

/// Main entry point for the Record derive macro.
pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match RecordDef::from_derive_input(&input) {
        Ok(record) => descriptor::generate(&record).into(),
        Err(err) => err.write_errors().into()
    }
}
