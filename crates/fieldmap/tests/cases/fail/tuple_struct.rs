// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use fieldmap::Record;

#[derive(Record)]
pub struct Pair(pub i32, pub i32);

fn main() {}
