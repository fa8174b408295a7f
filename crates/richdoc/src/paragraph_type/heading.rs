// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use strum_macros::{AsRefStr, EnumString};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, AsRefStr,
    EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    pub fn from_number(number: usize) -> Option<Self> {
        match number {
            1 => Some(Self::H1),
            2 => Some(Self::H2),
            3 => Some(Self::H3),
            4 => Some(Self::H4),
            5 => Some(Self::H5),
            6 => Some(Self::H6),
            _ => None,
        }
    }

    pub fn number(&self) -> usize {
        *self as usize + 1
    }

    /// The `h1`..`h6` tag name.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::H5 => "h5",
            Self::H6 => "h6",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn numbers_and_tags_agree() {
        for n in 1..=6 {
            let level = HeadingLevel::from_number(n).unwrap();
            assert_eq!(level.number(), n);
            assert_eq!(HeadingLevel::from_str(level.tag()), Ok(level));
        }
        assert_eq!(HeadingLevel::from_number(7), None);
    }
}
