// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

//! # Quick Navigation
//!
//! - **Derives**: [`Record`](macro@Record), [`Token`](macro@Token)
//! - **Engines**: [`MarkupEngine`], [`TabularEngine`]
//! - **Sources**: [`Connector`], [`FileConnector`], [`MemoryConnector`]
//! - **Reference tables**: [`Lookup`]
//!
//! # Example
//!
//! ```rust
//! use fieldmap::{MarkupEngine, Record, Registry, Token};
//!
//! #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Token)]
//! pub enum Trend {
//!     #[token("HAUSSE")]
//!     Rising,
//!     #[token("BAISSE")]
//!     Falling,
//!     #[default]
//!     #[token(unknown)]
//!     Unknown
//! }
//!
//! #[derive(Debug, Default, Record)]
//! #[record(element = "Troncon")]
//! pub struct SegmentFluency {
//!     #[field(name = "Id")]
//!     pub id:       i32,
//!     #[field(name = "Couleur_TP")]
//!     pub color_id: i32,
//!     #[field(name = "Tendance")]
//!     pub trend:    Trend
//! }
//!
//! let answer = r#"<opendata><answer>
//!     <status code="0" message="OK"/>
//!     <data><Troncons>
//!         <Troncon><Id>42</Id><Couleur_TP>3</Couleur_TP><Tendance>HAUSSE</Tendance></Troncon>
//!     </Troncons></data>
//! </answer></opendata>"#;
//!
//! let engine = MarkupEngine::new(Registry::shared());
//! let segments: Vec<SegmentFluency> = engine.parse_envelope(answer.as_bytes()).unwrap();
//! assert_eq!(segments[0].id, 42);
//! assert_eq!(segments[0].color_id, 3);
//! assert_eq!(segments[0].trend, Trend::Rising);
//! ```

pub use fieldmap_core::*;
pub use fieldmap_derive_impl::{Record, Token};
