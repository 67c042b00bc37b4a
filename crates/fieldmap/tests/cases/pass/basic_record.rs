// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use fieldmap::{Record, TypeDescriptor};

#[derive(Debug, Default, Record)]
#[record(element = "Troncon")]
pub struct SegmentFluency {
    #[field(name = "Id")]
    pub id: i32,

    #[field(name = "Couleur_TP")]
    pub color_id: i32,

    pub label: String,
}

fn main() {
    assert_eq!(SegmentFluency::ELEMENT, "Troncon");

    let descriptor = TypeDescriptor::<SegmentFluency>::build().unwrap();
    let names: Vec<_> = descriptor.names().collect();
    assert_eq!(names, ["Id", "Couleur_TP", "label"]);
}
