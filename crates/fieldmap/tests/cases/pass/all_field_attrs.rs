// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use fieldmap::{Record, ScalarKind, TypeDescriptor};

fn parse_places(text: &str) -> u32 {
    text.parse().unwrap_or(0)
}

#[derive(Debug, Default, Record)]
pub struct Parking {
    #[field(name = "Grp_disponible", adapter = fieldmap::adapters::locale_int)]
    pub available: i32,

    #[field(name = "Grp_complet", kind = "locale_number", default = "0")]
    pub full: i64,

    #[field(name = "Places", adapter = "parse_places", kind = "integer")]
    pub places: u32,

    #[field(name = "Grp_exploitation")]
    pub open: bool,

    #[field(name = "Latitude")]
    pub latitude: Option<f64>,

    pub r#type: String,

    #[field(skip)]
    pub cached: Vec<u8>,
}

fn main() {
    assert_eq!(Parking::ELEMENT, "Parking");

    let descriptor = TypeDescriptor::<Parking>::build().unwrap();
    assert_eq!(descriptor.len(), 6);
    assert!(!descriptor.contains("cached"));

    let available = descriptor.get("Grp_disponible").unwrap();
    assert_eq!(available.kind(), ScalarKind::String);
    assert_eq!(available.adapter(), Some("fieldmap::adapters::locale_int"));

    let full = descriptor.get("Grp_complet").unwrap();
    assert_eq!(full.kind(), ScalarKind::LocaleNumber);
    assert_eq!(full.default_text(), Some("0"));

    assert_eq!(descriptor.get("Places").unwrap().kind(), ScalarKind::Integer);
    assert_eq!(descriptor.get("Latitude").unwrap().kind(), ScalarKind::Double);
    assert_eq!(descriptor.get("type").unwrap().field(), "type");
}
