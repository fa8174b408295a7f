// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use super::ConfigurableListLevel;
use crate::config::RichTextConfig;

/// An item of a bulleted list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UnorderedList {
    level: usize,
}

impl UnorderedList {
    pub fn new(level: usize) -> Self {
        Self {
            level: level.max(1),
        }
    }

    pub fn marker_text(&self, config: &RichTextConfig) -> String {
        format!("{} ", config.unordered_list_style_type.symbol(self.level))
    }
}

impl ConfigurableListLevel for UnorderedList {
    fn level(&self) -> usize {
        self.level
    }

    fn set_level(&mut self, level: usize) {
        self.level = level.max(1);
    }

    fn indent(&self, config: &RichTextConfig) -> u32 {
        config.unordered_list_indent()
    }
}
