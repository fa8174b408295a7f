// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! The structural role of a paragraph.
//!
//! List nesting is not expressed by containment: every list item is a
//! top-level paragraph that records its own nesting level.

mod heading;
mod list_style;
mod ordered_list;
mod unordered_list;

pub use heading::HeadingLevel;
pub use list_style::{OrderedListStyleType, UnorderedListStyleType};
pub use ordered_list::OrderedList;
pub use unordered_list::UnorderedList;

use crate::config::RichTextConfig;
use crate::model::RichSpan;
use crate::style::{heading_block_profile, ParagraphAttr, ParagraphStyle};

/// A list item type whose indentation depends on its nesting level.
pub trait ConfigurableListLevel {
    /// Nesting level, starting at 1.
    fn level(&self) -> usize;

    fn set_level(&mut self, level: usize);

    /// Indent added per nesting level.
    fn indent(&self, config: &RichTextConfig) -> u32;

    fn block_style(&self, config: &RichTextConfig) -> ParagraphStyle {
        let indent = self.indent(config) as usize * self.level();
        ParagraphStyle::new().with(ParagraphAttr::TextIndent, format!("{indent}px"))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ParagraphType {
    #[default]
    Plain,
    OrderedListItem(OrderedList),
    UnorderedListItem(UnorderedList),
    Heading(HeadingLevel),
}

impl ParagraphType {
    pub fn ordered(number: usize, level: usize) -> Self {
        Self::OrderedListItem(OrderedList::new(number, level))
    }

    pub fn unordered(level: usize) -> Self {
        Self::UnorderedListItem(UnorderedList::new(level))
    }

    pub fn as_list(&self) -> Option<&dyn ConfigurableListLevel> {
        match self {
            Self::OrderedListItem(list) => Some(list),
            Self::UnorderedListItem(list) => Some(list),
            Self::Plain | Self::Heading(_) => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut dyn ConfigurableListLevel> {
        match self {
            Self::OrderedListItem(list) => Some(list),
            Self::UnorderedListItem(list) => Some(list),
            Self::Plain | Self::Heading(_) => None,
        }
    }

    pub fn is_list(&self) -> bool {
        self.as_list().is_some()
    }

    /// The list nesting level, or 0 outside lists.
    pub fn level(&self) -> usize {
        self.as_list().map_or(0, |list| list.level())
    }

    /// Block attributes implied by the type under `config`.
    pub fn block_style(&self, config: &RichTextConfig) -> ParagraphStyle {
        match self {
            Self::Plain => ParagraphStyle::new(),
            Self::OrderedListItem(list) => list.block_style(config),
            Self::UnorderedListItem(list) => list.block_style(config),
            Self::Heading(_) => heading_block_profile(),
        }
    }

    /// The part of [`Self::block_style`] that does not depend on
    /// configuration.
    pub fn intrinsic_block_style(&self) -> ParagraphStyle {
        match self {
            Self::Heading(_) => heading_block_profile(),
            _ => ParagraphStyle::new(),
        }
    }

    pub fn marker_text(&self, config: &RichTextConfig) -> String {
        match self {
            Self::OrderedListItem(list) => list.marker_text(config),
            Self::UnorderedListItem(list) => list.marker_text(config),
            Self::Plain | Self::Heading(_) => String::new(),
        }
    }

    /// The prefix span drawn before the paragraph's own content.
    pub fn marker_span(&self, config: &RichTextConfig) -> RichSpan {
        RichSpan::new(self.marker_text(config))
    }

    /// The type a new paragraph gets after a line break in this one.
    pub fn next(&self) -> Self {
        match self {
            Self::OrderedListItem(list) => Self::OrderedListItem(list.next()),
            Self::UnorderedListItem(list) => Self::UnorderedListItem(list.clone()),
            Self::Plain | Self::Heading(_) => Self::Plain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_increments_ordered_items_and_resets_headings() {
        assert_eq!(ParagraphType::ordered(2, 1).next(), ParagraphType::ordered(3, 1));
        assert_eq!(ParagraphType::unordered(2).next(), ParagraphType::unordered(2));
        assert_eq!(
            ParagraphType::Heading(HeadingLevel::H2).next(),
            ParagraphType::Plain
        );
        assert_eq!(ParagraphType::Plain.next(), ParagraphType::Plain);
    }

    #[test]
    fn marker_spans() {
        let config = RichTextConfig::default();
        assert_eq!(ParagraphType::ordered(3, 1).marker_span(&config).text, "3. ");
        assert_eq!(ParagraphType::unordered(1).marker_span(&config).text, "• ");
        assert_eq!(ParagraphType::Heading(HeadingLevel::H1).marker_span(&config).text, "");
    }

    #[test]
    fn block_style_follows_config() {
        let mut config = RichTextConfig::default();
        let item = ParagraphType::unordered(2);
        assert_eq!(
            item.block_style(&config).get(ParagraphAttr::TextIndent),
            Some("76px")
        );

        config.list_indent = 10;
        assert_eq!(
            item.block_style(&config).get(ParagraphAttr::TextIndent),
            Some("20px")
        );
    }

    #[test]
    fn plain_has_no_level() {
        assert_eq!(ParagraphType::Plain.level(), 0);
        assert_eq!(ParagraphType::ordered(1, 3).level(), 3);
    }

    #[test]
    fn set_level_through_trait() {
        let mut item = ParagraphType::unordered(1);
        if let Some(list) = item.as_list_mut() {
            list.set_level(4);
        }
        assert_eq!(item.level(), 4);
    }
}
