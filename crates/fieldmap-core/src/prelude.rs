// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! ```rust
//! use fieldmap_core::prelude::*;
//! ```

pub use crate::{
    Connector, Envelope, Keyed, Lookup, MarkupEngine, ParseError, Record, Registry, Scalar,
    ScalarKind, TabularEngine, Token
};
