// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Attribute parsing for `#[derive(Record)]`.
//!
//! ```text
//! parse.rs (coordinator)
//! ├── attrs.rs  - #[record(...)] via darling
//! ├── field.rs  - #[field(...)] via parse_nested_meta
//! ├── kind.rs   - kind = "..." values
//! └── def.rs    - RecordDef, duplicate name check
//! ```

mod attrs;
mod def;
mod field;
mod kind;

pub use attrs::RecordAttrs;
pub use def::RecordDef;
pub use field::FieldDef;
pub use kind::Kind;
