// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Styles implied by tags, independent of any `style` attribute.

use strum_macros::{AsRefStr, EnumIter};

use super::{ParagraphAttr, ParagraphStyle, SpanAttr, SpanStyle};
use crate::paragraph_type::HeadingLevel;

/// Inline formats that have a dedicated formatting tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, AsRefStr, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum InlineFormat {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Subscript,
    Superscript,
    Mark,
    Small,
}

impl InlineFormat {
    pub fn style(&self) -> SpanStyle {
        let (key, value) = match self {
            Self::Bold => (SpanAttr::FontWeight, "bold"),
            Self::Italic => (SpanAttr::FontStyle, "italic"),
            Self::Underline => (SpanAttr::TextDecoration, "underline"),
            Self::Strikethrough => (SpanAttr::TextDecoration, "line-through"),
            Self::Subscript => (SpanAttr::VerticalAlign, "sub"),
            Self::Superscript => (SpanAttr::VerticalAlign, "super"),
            Self::Mark => (SpanAttr::BackgroundColor, "yellow"),
            Self::Small => (SpanAttr::FontSize, "0.8em"),
        };
        SpanStyle::new().with(key, value)
    }

    /// The canonical tag written when serializing this format.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Bold => "b",
            Self::Italic => "i",
            Self::Underline => "u",
            Self::Strikethrough => "s",
            Self::Subscript => "sub",
            Self::Superscript => "sup",
            Self::Mark => "mark",
            Self::Small => "small",
        }
    }
}

/// Inline style a heading applies to its text.
pub fn heading_span_profile(level: HeadingLevel) -> SpanStyle {
    let size = match level {
        HeadingLevel::H1 => "2em",
        HeadingLevel::H2 => "1.5em",
        HeadingLevel::H3 => "1.17em",
        HeadingLevel::H4 => "1em",
        HeadingLevel::H5 => "0.83em",
        HeadingLevel::H6 => "0.67em",
    };
    SpanStyle::new()
        .with(SpanAttr::FontSize, size)
        .with(SpanAttr::FontWeight, "bold")
}

/// Block style shared by every heading level.
pub fn heading_block_profile() -> ParagraphStyle {
    ParagraphStyle::new().with(ParagraphAttr::LineHeight, "1.2")
}
