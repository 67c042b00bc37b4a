// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use fieldmap::{Record, Registry, TabularEngine};

#[derive(Debug, Default, Record)]
pub struct Tagged<T: Default + 'static> {
    pub id: i32,

    #[field(skip)]
    pub tag: T,
}

fn main() {
    let engine = TabularEngine::new(Registry::shared());
    let rows: Vec<Tagged<bool>> = engine.parse_list("id\n7\n".as_bytes()).unwrap();
    assert_eq!(rows[0].id, 7);
    assert!(!rows[0].tag);
}
