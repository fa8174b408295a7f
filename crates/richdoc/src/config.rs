// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Per-session configuration.
//!
//! A [`RichTextConfig`] is always passed explicitly into style resolution
//! (see [`crate::ParagraphType::block_style`]); nothing reads configuration
//! from process-wide state.

use serde::{Deserialize, Serialize};

use crate::paragraph_type::{OrderedListStyleType, UnorderedListStyleType};

pub const DEFAULT_LIST_INDENT: u32 = 38;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RichTextConfig {
    /// Indent added per list nesting level.
    pub list_indent: u32,
    /// Overrides `list_indent` for ordered lists.
    pub ordered_list_indent: Option<u32>,
    /// Overrides `list_indent` for unordered lists.
    pub unordered_list_indent: Option<u32>,
    pub ordered_list_style_type: OrderedListStyleType,
    pub unordered_list_style_type: UnorderedListStyleType,
}

impl Default for RichTextConfig {
    fn default() -> Self {
        Self {
            list_indent: DEFAULT_LIST_INDENT,
            ordered_list_indent: None,
            unordered_list_indent: None,
            ordered_list_style_type: OrderedListStyleType::default(),
            unordered_list_style_type: UnorderedListStyleType::default(),
        }
    }
}

impl RichTextConfig {
    pub fn ordered_list_indent(&self) -> u32 {
        self.ordered_list_indent.unwrap_or(self.list_indent)
    }

    pub fn unordered_list_indent(&self) -> u32 {
        self.unordered_list_indent.unwrap_or(self.list_indent)
    }
}
