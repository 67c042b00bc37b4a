// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use fieldmap::Record;

#[derive(Record)]
pub struct Equipment {
    #[field(name = "NOM")]
    pub name:  String,
    #[field(name = "NOM")]
    pub label: String
}

fn main() {}
