// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use super::ConfigurableListLevel;
use crate::config::RichTextConfig;

/// An item of a numbered list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OrderedList {
    pub number: usize,
    level: usize,
}

impl OrderedList {
    pub fn new(number: usize, level: usize) -> Self {
        Self {
            number,
            level: level.max(1),
        }
    }

    /// The marker shown before the item, for example `"3. "`.
    pub fn marker_text(&self, config: &RichTextConfig) -> String {
        let style = &config.ordered_list_style_type;
        format!(
            "{}{}",
            style.format(self.number, self.level),
            style.suffix(self.level)
        )
    }

    /// The item that follows this one in the same list.
    pub fn next(&self) -> Self {
        Self::new(self.number + 1, self.level)
    }
}

impl ConfigurableListLevel for OrderedList {
    fn level(&self) -> usize {
        self.level
    }

    fn set_level(&mut self, level: usize) {
        self.level = level.max(1);
    }

    fn indent(&self, config: &RichTextConfig) -> u32 {
        config.ordered_list_indent()
    }
}
