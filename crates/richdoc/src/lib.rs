// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Document model of a structured rich text editor, with HTML and
//! Markdown codecs.
//!
//! A [`RichDocument`] is a list of [`RichParagraph`]s. Each paragraph owns
//! a tree of [`RichSpan`]s plus block attributes and a [`ParagraphType`].

mod codec;
mod config;
mod error;
mod model;
mod paragraph_type;
mod state;
mod style;

pub use crate::codec::{html, markdown};
pub use crate::config::{RichTextConfig, DEFAULT_LIST_INDENT};
pub use crate::error::{Error, Result};
pub use crate::model::{
    CodeSpan, ImageSpan, LinkSpan, ParagraphId, RichDocument, RichParagraph,
    RichSpan, SpanId, SpanVariant, TextRange, ToTree,
};
pub use crate::paragraph_type::{
    ConfigurableListLevel, HeadingLevel, OrderedList, OrderedListStyleType,
    ParagraphType, UnorderedList, UnorderedListStyleType,
};
pub use crate::state::RichTextState;
pub use crate::style::{
    heading_block_profile, heading_span_profile, parse_css_style,
    AttributeMap, InlineFormat, ParagraphAttr, ParagraphStyle, SpanAttr,
    SpanStyle, StyleKey,
};
