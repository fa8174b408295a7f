// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Marker formats for list items.

use serde::{Deserialize, Serialize};

/// How the number of an ordered list item is rendered in its marker.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderedListStyleType {
    #[default]
    Decimal,
    LowerAlpha,
    UpperAlpha,
    LowerRoman,
    UpperRoman,
    /// One style per nesting level, cycling when the level exceeds the list.
    Multiple(Vec<OrderedListStyleType>),
}

impl OrderedListStyleType {
    pub fn format(&self, number: usize, level: usize) -> String {
        match self {
            Self::Decimal => number.to_string(),
            Self::LowerAlpha => to_alpha(number),
            Self::UpperAlpha => to_alpha(number).to_uppercase(),
            Self::LowerRoman => to_roman(number).to_lowercase(),
            Self::UpperRoman => to_roman(number),
            Self::Multiple(styles) => match styles.is_empty() {
                true => number.to_string(),
                false => styles[level.saturating_sub(1) % styles.len()]
                    .format(number, level),
            },
        }
    }

    pub fn suffix(&self, _level: usize) -> &'static str {
        ". "
    }
}

/// Bullet symbols for unordered list items, one per nesting level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnorderedListStyleType(pub Vec<String>);

impl Default for UnorderedListStyleType {
    fn default() -> Self {
        Self(vec!["•".into(), "◦".into(), "▪".into()])
    }
}

impl UnorderedListStyleType {
    pub fn symbol(&self, level: usize) -> &str {
        match self.0.is_empty() {
            true => "•",
            false => &self.0[level.saturating_sub(1) % self.0.len()],
        }
    }
}

fn to_alpha(mut number: usize) -> String {
    if number == 0 {
        return "0".into();
    }
    let mut letters = Vec::new();
    while number > 0 {
        number -= 1;
        letters.push((b'a' + (number % 26) as u8) as char);
        number /= 26;
    }
    letters.iter().rev().collect()
}

fn to_roman(mut number: usize) -> String {
    const NUMERALS: [(usize, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    if number == 0 {
        return "0".into();
    }
    let mut out = String::new();
    for (value, numeral) in NUMERALS {
        while number >= value {
            out.push_str(numeral);
            number -= value;
        }
    }
    out
}
