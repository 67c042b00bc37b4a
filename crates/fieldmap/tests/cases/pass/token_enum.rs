// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use fieldmap::{CoercionRules, Scalar, ScalarKind, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Token)]
pub enum Theme {
    #[token("DEPLACEMENT")]
    Travel,
    Culture,
    #[token("INCONNU", unknown)]
    Unknown,
}

fn main() {
    assert_eq!(Theme::from_token("DEPLACEMENT"), Theme::Travel);
    assert_eq!(Theme::from_token("Culture"), Theme::Culture);
    assert_eq!(Theme::from_token("deplacement"), Theme::Unknown);
    assert_eq!(Theme::Travel.as_token(), "DEPLACEMENT");
    assert_eq!(Theme::Unknown.as_token(), "INCONNU");
    assert!(Theme::UNKNOWN.is_unknown());

    let rules = CoercionRules::default();
    assert_eq!(<Theme as Scalar>::KIND, ScalarKind::Enum);
    assert_eq!(Theme::coerce(Some(" DEPLACEMENT "), ScalarKind::Enum, &rules), Theme::Travel);
    assert_eq!(Theme::coerce(None, ScalarKind::Enum, &rules), Theme::Unknown);
}
