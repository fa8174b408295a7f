// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Builds a [`RichDocument`] from a stream of open-tag, close-tag and text
//! events. Both the HTML and the Markdown front-ends drive this builder.
//!
//! Paragraph boundaries are inferred from block tags. Inline tags nest
//! spans under a cursor that follows the tag stack. Line breaks and
//! closed blocks leave empty paragraphs behind; a final pass decides
//! which of those survive.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use super::tags::{HtmlTag, TagKind};
use crate::model::{
    CodeSpan, ImageSpan, RichDocument, RichParagraph, RichSpan, SpanId,
    SpanVariant,
};
use crate::paragraph_type::ParagraphType;
use crate::style::split_css_style;

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t\n\r\x0C]+").unwrap());

struct OpenTag {
    tag: HtmlTag,
    /// Number of the next `li` of an `ol`.
    next_number: usize,
}

impl OpenTag {
    fn new(tag: HtmlTag, attrs: &[(String, String)]) -> Self {
        let next_number = get_attr(attrs, "start")
            .and_then(|start| start.trim().parse().ok())
            .unwrap_or(1);
        Self { tag, next_number }
    }
}

fn get_attr<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(n, _v)| n == name)
        .map(|(_n, v)| v.as_str())
}

pub(crate) struct TreeBuilder {
    paragraphs: Vec<RichParagraph>,
    open_tags: Vec<OpenTag>,
    current_span: Option<SpanId>,
    list_depth: usize,
    /// Last character added to the document, for whitespace trimming.
    last_char: Option<char>,
    /// Paragraphs on either side of a `<br>`.
    line_breaks: BTreeSet<usize>,
    /// Paragraphs left behind by a closed block, or opened by a typed one.
    keep_empty: BTreeSet<usize>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self {
            paragraphs: vec![RichParagraph::default()],
            open_tags: Vec::new(),
            current_span: None,
            list_depth: 0,
            last_char: None,
            line_breaks: BTreeSet::new(),
            keep_empty: BTreeSet::new(),
        }
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, tag: HtmlTag, attrs: Vec<(String, String)>) {
        let skipped =
            self.in_skipped_element() || tag.kind() == TagKind::Skipped;
        if !skipped {
            trace!(?tag, "open");
            self.handle_open(&tag, &attrs);
        }
        if tag.is_void() {
            if !skipped {
                self.handle_close(&tag);
            }
        } else {
            self.open_tags.push(OpenTag::new(tag, &attrs));
        }
    }

    /// Close `tag` and anything opened after it. A close tag with no
    /// matching open tag is ignored.
    pub fn close(&mut self, tag: &HtmlTag) {
        let Some(position) =
            self.open_tags.iter().rposition(|open| &open.tag == tag)
        else {
            debug!(?tag, "ignoring close tag without a matching open tag");
            return;
        };
        let mut skipped = self.open_tags[..position]
            .iter()
            .any(|open| open.tag.kind() == TagKind::Skipped);
        let closed: Vec<(OpenTag, bool)> = self
            .open_tags
            .drain(position..)
            .map(|open| {
                skipped |= open.tag.kind() == TagKind::Skipped;
                (open, skipped)
            })
            .collect();
        for (open, skipped) in closed.into_iter().rev() {
            if !skipped {
                trace!(tag = ?open.tag, "close");
                self.handle_close(&open.tag);
            }
        }
    }

    pub fn text(&mut self, raw: &str) {
        if self.in_skipped_element() {
            return;
        }
        // Only list items matter inside a list container.
        if self
            .open_tags
            .last()
            .is_some_and(|open| open.tag.kind() == TagKind::ListContainer)
        {
            return;
        }
        let collapsed = WHITESPACE.replace_all(raw, " ");
        let text = match self.last_char {
            None | Some(' ') | Some('\n') => collapsed.trim_start_matches(' '),
            Some(_) => &collapsed,
        };
        if text.is_empty() {
            return;
        }
        self.last_char = text.chars().last();

        let cursor = self.current_span;
        let paragraph = self.current();
        let target = cursor.and_then(|id| {
            paragraph.span(id).map(|span| (id, span.children().is_empty()))
        });
        match target {
            Some((id, true)) => {
                if let Some(span) = paragraph.span_mut(id) {
                    span.text.push_str(text);
                }
            }
            Some((id, false)) => {
                paragraph.add_span(RichSpan::new(text), Some(id));
            }
            None => {
                let id = paragraph.add_span(RichSpan::new(text), None);
                self.current_span = Some(id);
            }
        }
    }

    /// Drop the empty paragraphs nobody asked to keep and tidy the span
    /// trees of the rest.
    pub fn finish(self) -> RichDocument {
        let mut paragraphs = self.paragraphs;
        let last = paragraphs.len().saturating_sub(1);
        for index in (0..paragraphs.len()).rev() {
            let keep = self.line_breaks.contains(&index)
                || (self.keep_empty.contains(&index) && index != last);
            if !keep && paragraphs[index].is_blank() {
                debug!(index, "dropping blank paragraph");
                paragraphs.remove(index);
            }
        }
        for paragraph in &mut paragraphs {
            paragraph.remove_empty_children();
            paragraph.normalize();
        }
        let mut document = RichDocument::from_paragraphs(paragraphs);
        document.normalize_list_numbers();
        document
    }

    fn in_skipped_element(&self) -> bool {
        self.open_tags
            .iter()
            .any(|open| open.tag.kind() == TagKind::Skipped)
    }

    fn current_index(&self) -> usize {
        self.paragraphs.len().saturating_sub(1)
    }

    fn current(&mut self) -> &mut RichParagraph {
        if self.paragraphs.is_empty() {
            self.paragraphs.push(RichParagraph::default());
        }
        let index = self.current_index();
        &mut self.paragraphs[index]
    }

    fn handle_open(&mut self, tag: &HtmlTag, attrs: &[(String, String)]) {
        match tag.kind() {
            TagKind::Skipped | TagKind::Transparent => {}
            TagKind::ListContainer => self.list_depth += 1,
            TagKind::LineBreak => self.line_break(),
            TagKind::Block => self.open_block(tag, attrs),
            TagKind::Inline => self.open_inline(tag, attrs),
        }
    }

    fn handle_close(&mut self, tag: &HtmlTag) {
        match tag.kind() {
            TagKind::Skipped | TagKind::Transparent | TagKind::LineBreak => {}
            TagKind::ListContainer => {
                self.list_depth = self.list_depth.saturating_sub(1);
            }
            TagKind::Block => self.close_block(),
            TagKind::Inline => {
                let cursor = self.current_span;
                self.current_span = cursor.and_then(|id| {
                    self.paragraphs.last()?.span(id)?.parent()
                });
            }
        }
    }

    fn open_block(&mut self, tag: &HtmlTag, attrs: &[(String, String)]) {
        self.last_char = Some(' ');
        let (css_span, css_block) = get_attr(attrs, "style")
            .map(split_css_style)
            .unwrap_or_default();

        let current = self.current();
        let blank = current.is_blank();
        let current_type = current.paragraph_type.clone();
        let paragraph_type = if *tag == HtmlTag::Li {
            self.list_item_type()
        } else if let Some(level) = tag.heading_level() {
            ParagraphType::Heading(level)
        } else if blank && current_type.is_list() {
            // A paragraph wrapped directly in a list item.
            current_type
        } else {
            ParagraphType::Plain
        };

        if !blank {
            self.paragraphs.push(RichParagraph::default());
        }
        if paragraph_type != ParagraphType::Plain {
            self.keep_empty.insert(self.current_index());
        }

        let paragraph = self.current();
        paragraph.paragraph_type = paragraph_type;
        paragraph.block_style = paragraph.block_style.merge(&css_block);

        let span_style = tag.intrinsic_span_style().merge(&css_span);
        let cursor = match span_style.is_empty() {
            true => None,
            false => {
                let wrapper = RichSpan::default().with_style(span_style);
                Some(paragraph.add_span(wrapper, None))
            }
        };
        self.current_span = cursor;
    }

    fn list_item_type(&mut self) -> ParagraphType {
        let level = self.list_depth.max(1);
        let container = self
            .open_tags
            .iter_mut()
            .rev()
            .find(|open| open.tag.kind() == TagKind::ListContainer);
        match container {
            Some(open) if open.tag == HtmlTag::Ol => {
                let number = open.next_number;
                open.next_number += 1;
                ParagraphType::ordered(number, level)
            }
            Some(_) => ParagraphType::unordered(level),
            None => ParagraphType::Plain,
        }
    }

    fn close_block(&mut self) {
        let current = self.current();
        if !current.is_blank() || current.paragraph_type != ParagraphType::Plain
        {
            self.paragraphs.push(RichParagraph::default());
            self.keep_empty.insert(self.current_index());
            self.last_char = Some(' ');
        }
        self.current_span = None;
    }

    fn open_inline(&mut self, tag: &HtmlTag, attrs: &[(String, String)]) {
        if let HtmlTag::Other(name) = tag {
            debug!(tag = %name, "unknown tag, treating as a plain span");
        }
        let (css_span, _) = get_attr(attrs, "style")
            .map(split_css_style)
            .unwrap_or_default();
        let variant = match tag {
            HtmlTag::A => {
                SpanVariant::link(get_attr(attrs, "href").unwrap_or_default())
            }
            HtmlTag::Code | HtmlTag::CodeSpan => {
                SpanVariant::Code(CodeSpan::default())
            }
            HtmlTag::Img => image_variant(attrs),
            _ => SpanVariant::Default,
        };
        let span = RichSpan::default()
            .with_style(tag.intrinsic_span_style().merge(&css_span))
            .with_variant(variant);
        let parent = self.current_span;
        let id = self.current().add_span(span, parent);
        self.current_span = Some(id);
    }

    fn line_break(&mut self) {
        self.last_char = Some(' ');
        let index = self.current_index();
        let cursor = self.current_span;
        let in_block = self
            .open_tags
            .last()
            .is_some_and(|open| open.tag.kind() == TagKind::Block);

        let current = self.current();
        let blank = current.is_blank();
        let paragraph_type = match &current.paragraph_type {
            ParagraphType::Heading(level) => ParagraphType::Heading(*level),
            _ => ParagraphType::Plain,
        };
        let block_style = current.block_style.clone();
        let carried = cursor
            .and_then(|id| current.span(id))
            .map(RichSpan::detached);

        self.paragraphs.push(
            RichParagraph::new(paragraph_type).with_block_style(block_style),
        );
        self.line_breaks.insert(index);
        self.line_breaks.insert(index + 1);

        self.current_span = match (in_block && !blank, carried) {
            (true, Some(mut span)) => {
                span.text.clear();
                Some(self.current().add_span(span, None))
            }
            _ => None,
        };
    }
}

fn image_variant(attrs: &[(String, String)]) -> SpanVariant {
    let dimension = |name: &str| {
        get_attr(attrs, name).and_then(|value| {
            value.trim().trim_end_matches("px").trim().parse::<f32>().ok()
        })
    };
    let src = get_attr(attrs, "src").unwrap_or_default();
    let alt = get_attr(attrs, "alt").map(str::to_owned);
    ImageSpan::new(src, dimension("width"), dimension("height"), alt.clone())
        .or_else(|err| {
            debug!(%err, src, "image dimensions fall back to 0x0");
            ImageSpan::new(src, Some(0.0), Some(0.0), alt)
        })
        .map(SpanVariant::Image)
        .unwrap_or_default()
}
