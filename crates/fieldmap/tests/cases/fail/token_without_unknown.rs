// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use fieldmap::Token;

#[derive(Token)]
pub enum Theme {
    #[token("DEPLACEMENT")]
    Travel,
    #[token("CULTURE")]
    Culture
}

fn main() {}
