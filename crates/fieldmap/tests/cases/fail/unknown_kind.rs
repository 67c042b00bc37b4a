// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use fieldmap::Record;

#[derive(Record)]
pub struct Reading {
    #[field(kind = "decimal")]
    pub speed: f64
}

fn main() {}
