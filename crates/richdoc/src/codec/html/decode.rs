// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Serialization of a [`RichDocument`] to HTML.
//!
//! List item paragraphs are regrouped into `<ul>`/`<ol>` wrappers:
//! - a deeper item opens nested groups inside the still open `<li>`;
//! - a shallower item closes groups until its level is reached;
//! - an item of another kind at the same level replaces the group.
//!
//! Inline formats with a dedicated tag are written as that tag, anything
//! else stays in the `style` attribute of the text-holding `<span>`.

use html_escape::{encode_double_quoted_attribute, encode_text};
use strum::IntoEnumIterator;

use crate::model::{RichDocument, RichParagraph, SpanId, SpanVariant};
use crate::paragraph_type::ParagraphType;
use crate::style::{heading_span_profile, InlineFormat, SpanStyle};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    fn tag(&self) -> &'static str {
        match self {
            ListKind::Ordered => "ol",
            ListKind::Unordered => "ul",
        }
    }
}

struct ListGroup {
    kind: ListKind,
    level: usize,
    li_open: bool,
}

#[derive(Default)]
struct HtmlWriter {
    html: String,
    groups: Vec<ListGroup>,
    /// Closing tag of the `p`/`hN` element still open.
    pending_close: Option<&'static str>,
}

pub fn decode(document: &RichDocument) -> String {
    let mut writer = HtmlWriter::default();
    let paragraphs = document.paragraphs();
    for (index, paragraph) in paragraphs.iter().enumerate() {
        let is_last = index + 1 == paragraphs.len();
        let previous = index.checked_sub(1).map(|i| &paragraphs[i]);
        writer.paragraph(paragraph, previous, is_last);
    }
    writer.close_block();
    writer.close_groups(0);
    writer.html
}

impl HtmlWriter {
    fn paragraph(
        &mut self,
        paragraph: &RichParagraph,
        previous: Option<&RichParagraph>,
        is_last: bool,
    ) {
        let style = paragraph.block_style.to_css();
        match &paragraph.paragraph_type {
            ParagraphType::Plain if paragraph.is_blank() => {
                let previous_empty = previous.is_some_and(|p| p.is_empty());
                match (is_last, previous_empty) {
                    // The break that ends the previous block.
                    (true, false) => self.html.push_str("<br>"),
                    (true, true) => {}
                    (false, _) => {
                        self.close_block();
                        self.close_groups(0);
                        self.html.push_str("<br>");
                    }
                }
            }
            ParagraphType::OrderedListItem(list) => {
                let level = paragraph.paragraph_type.level();
                self.list_item(ListKind::Ordered, level, list.number);
                self.open_tag("li", &style);
                self.spans(paragraph);
            }
            ParagraphType::UnorderedListItem(_) => {
                let level = paragraph.paragraph_type.level();
                self.list_item(ListKind::Unordered, level, 1);
                self.open_tag("li", &style);
                self.spans(paragraph);
            }
            ParagraphType::Plain | ParagraphType::Heading(_) => {
                self.close_block();
                self.close_groups(0);
                let tag = match &paragraph.paragraph_type {
                    ParagraphType::Heading(level) => level.tag(),
                    _ => "p",
                };
                self.open_tag(tag, &style);
                self.spans(paragraph);
                self.pending_close = Some(tag);
            }
        }
    }

    fn open_tag(&mut self, tag: &str, style: &str) {
        self.html.push('<');
        self.html.push_str(tag);
        push_attr(&mut self.html, "style", style);
        self.html.push('>');
    }

    fn close_block(&mut self) {
        if let Some(tag) = self.pending_close.take() {
            self.html.push_str(&format!("</{tag}>"));
        }
    }

    /// Close every group nested deeper than `level`.
    fn close_groups(&mut self, level: usize) {
        while self.groups.last().is_some_and(|g| g.level > level) {
            self.close_group();
        }
    }

    fn close_group(&mut self) {
        if let Some(group) = self.groups.pop() {
            if group.li_open {
                self.html.push_str("</li>");
            }
            self.html.push_str(&format!("</{}>", group.kind.tag()));
        }
    }

    /// Make sure the innermost open group matches `kind` at `level`,
    /// ready for a new `<li>`.
    fn list_item(&mut self, kind: ListKind, level: usize, number: usize) {
        self.close_block();
        self.close_groups(level);
        if self
            .groups
            .last()
            .is_some_and(|g| g.level == level && g.kind != kind)
        {
            self.close_group();
        }

        let same_level = self.groups.last().is_some_and(|g| g.level == level);
        if same_level {
            if let Some(group) = self.groups.last_mut() {
                if group.li_open {
                    self.html.push_str("</li>");
                    group.li_open = false;
                }
            }
        } else {
            let mut current = self.groups.last().map_or(0, |g| g.level);
            while current < level {
                current += 1;
                self.html.push('<');
                self.html.push_str(kind.tag());
                if current == level && kind == ListKind::Ordered && number != 1
                {
                    push_attr(&mut self.html, "start", &number.to_string());
                }
                self.html.push('>');
                self.groups.push(ListGroup {
                    kind,
                    level: current,
                    li_open: false,
                });
            }
        }
        if let Some(group) = self.groups.last_mut() {
            group.li_open = true;
        }
    }

    fn spans(&mut self, paragraph: &RichParagraph) {
        let heading_profile = match &paragraph.paragraph_type {
            ParagraphType::Heading(level) => heading_span_profile(*level),
            _ => SpanStyle::new(),
        };
        for id in paragraph.children() {
            write_span(&mut self.html, paragraph, *id, &heading_profile, &[]);
        }
    }
}

fn push_attr(html: &mut String, name: &str, value: &str) {
    if !value.is_empty() {
        html.push_str(&format!(
            " {name}=\"{}\"",
            encode_double_quoted_attribute(value)
        ));
    }
}

/// Split `style` into the formatting tags it implies and the leftover
/// CSS. Tags in `applied` are not repeated.
fn formatting_tags(
    style: &SpanStyle,
    applied: &[InlineFormat],
) -> (Vec<InlineFormat>, SpanStyle) {
    let mut leftover = style.clone();
    let mut tags = Vec::new();
    for format in InlineFormat::iter() {
        let format_style = format.style();
        if leftover.contains(&format_style) {
            leftover = leftover.diff(&format_style);
            if !applied.contains(&format) {
                tags.push(format);
            }
        }
    }
    (tags, leftover)
}

fn write_span(
    html: &mut String,
    paragraph: &RichParagraph,
    id: SpanId,
    base_style: &SpanStyle,
    applied: &[InlineFormat],
) {
    if paragraph.span_is_empty(id) {
        return;
    }
    let Some(span) = paragraph.span(id) else {
        return;
    };

    let style = span.style.diff(base_style);
    let (tags, leftover) = formatting_tags(&style, applied);

    let outer = match &span.variant {
        SpanVariant::Image(image) if !image.src().is_empty() => {
            html.push_str("<img");
            push_attr(html, "src", image.src());
            if let Some(width) = image.width() {
                push_attr(html, "width", &width.to_string());
            }
            if let Some(height) = image.height() {
                push_attr(html, "height", &height.to_string());
            }
            push_attr(html, "alt", image.alt().unwrap_or_default());
            html.push('>');
            return;
        }
        SpanVariant::Image(image) => {
            // No usable source: keep the description as text.
            html.push_str("<span>");
            html.push_str(&encode_text(image.alt().unwrap_or_default()));
            html.push_str("</span>");
            return;
        }
        SpanVariant::Link(link) => {
            html.push_str("<a");
            push_attr(html, "href", &link.url);
            html.push_str(" target=\"_blank\">");
            Some("a")
        }
        SpanVariant::Code(_) => {
            html.push_str("<code>");
            Some("code")
        }
        SpanVariant::Default => None,
    };

    for tag in &tags {
        html.push_str(&format!("<{}>", tag.tag()));
    }
    html.push_str("<span");
    push_attr(html, "style", &leftover.to_css());
    html.push('>');
    html.push_str(&encode_text(&span.text));

    let mut child_applied = applied.to_vec();
    child_applied.extend(tags.iter().copied());
    for child in span.children() {
        write_span(html, paragraph, *child, &SpanStyle::new(), &child_applied);
    }

    html.push_str("</span>");
    for tag in tags.iter().rev() {
        html.push_str(&format!("</{}>", tag.tag()));
    }
    if let Some(outer) = outer {
        html.push_str(&format!("</{outer}>"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ImageSpan, RichSpan};
    use crate::paragraph_type::HeadingLevel;
    use crate::style::{ParagraphAttr, SpanAttr};

    fn paragraph(paragraph_type: ParagraphType, text: &str) -> RichParagraph {
        let mut paragraph = RichParagraph::new(paragraph_type);
        paragraph.add_span(RichSpan::new(text), None);
        paragraph
    }

    fn decode_paragraphs(paragraphs: Vec<RichParagraph>) -> String {
        decode(&RichDocument::from_paragraphs(paragraphs))
    }

    #[test]
    fn plain_and_heading_paragraphs() {
        let mut heading = RichParagraph::new(ParagraphType::Heading(
            HeadingLevel::H2,
        ));
        heading.add_span(
            RichSpan::new("Title")
                .with_style(heading_span_profile(HeadingLevel::H2)),
            None,
        );
        assert_eq!(
            decode_paragraphs(vec![heading, paragraph(ParagraphType::Plain, "Text")]),
            "<h2><span>Title</span></h2><p><span>Text</span></p>"
        );
    }

    #[test]
    fn formats_become_tags_and_the_rest_stays_css() {
        let mut p = RichParagraph::default();
        p.add_span(
            RichSpan::new("x").with_style(
                SpanStyle::new()
                    .with(SpanAttr::FontWeight, "bold")
                    .with(SpanAttr::TextDecoration, "underline line-through")
                    .with(SpanAttr::Color, "red"),
            ),
            None,
        );
        assert_eq!(
            decode_paragraphs(vec![p]),
            "<p><b><u><s><span style=\"color: red;\">x</span></s></u></b></p>"
        );
    }

    #[test]
    fn ancestors_tags_are_not_repeated() {
        let bold = SpanStyle::new().with(SpanAttr::FontWeight, "bold");
        let mut p = RichParagraph::default();
        let parent = p.add_span(RichSpan::new("a").with_style(bold.clone()), None);
        p.add_span(RichSpan::new("b").with_style(bold), Some(parent));
        assert_eq!(
            decode_paragraphs(vec![p]),
            "<p><b><span>a<span>b</span></span></b></p>"
        );
    }

    #[test]
    fn lists_are_grouped_and_nested() {
        let html = decode_paragraphs(vec![
            paragraph(ParagraphType::ordered(1, 1), "X"),
            paragraph(ParagraphType::unordered(2), "Y"),
            paragraph(ParagraphType::ordered(2, 1), "Z"),
        ]);
        assert_eq!(
            html,
            "<ol><li><span>X</span><ul><li><span>Y</span></li></ul></li>\
             <li><span>Z</span></li></ol>"
        );
    }

    #[test]
    fn kind_change_at_same_level_starts_a_new_group() {
        let html = decode_paragraphs(vec![
            paragraph(ParagraphType::unordered(1), "a"),
            paragraph(ParagraphType::ordered(3, 1), "b"),
        ]);
        assert_eq!(
            html,
            "<ul><li><span>a</span></li></ul>\
             <ol start=\"3\"><li><span>b</span></li></ol>"
        );
    }

    #[test]
    fn dropping_two_levels_closes_both_groups() {
        let html = decode_paragraphs(vec![
            paragraph(ParagraphType::ordered(1, 1), "a"),
            paragraph(ParagraphType::unordered(2), "b"),
            paragraph(ParagraphType::ordered(1, 3), "c"),
            paragraph(ParagraphType::ordered(2, 1), "d"),
            paragraph(ParagraphType::Plain, "e"),
        ]);
        assert_eq!(
            html,
            "<ol><li><span>a</span><ul><li><span>b</span>\
             <ol><li><span>c</span></li></ol></li></ul></li>\
             <li><span>d</span></li></ol><p><span>e</span></p>"
        );
    }

    #[test]
    fn single_blank_paragraph_is_a_break() {
        assert_eq!(decode_paragraphs(vec![RichParagraph::default()]), "<br>");
    }

    #[test]
    fn breaks_for_blank_paragraphs() {
        let html = decode_paragraphs(vec![
            paragraph(ParagraphType::Plain, "A"),
            RichParagraph::default(),
            paragraph(ParagraphType::Plain, "B"),
            RichParagraph::default(),
        ]);
        assert_eq!(
            html,
            "<p><span>A</span></p><br><p><span>B</span><br></p>"
        );
    }

    #[test]
    fn empty_paragraph_with_block_style_is_kept() {
        let styled = RichParagraph::default().with_block_style(
            crate::style::ParagraphStyle::new()
                .with(ParagraphAttr::TextAlign, "right"),
        );
        assert_eq!(
            decode_paragraphs(vec![styled]),
            "<p style=\"text-align: right;\"></p>"
        );
    }

    #[test]
    fn custom_variants() {
        let mut p = RichParagraph::default();
        p.add_span(
            RichSpan::new("site").with_variant(SpanVariant::link("https://a.b/?x=1&y=2")),
            None,
        );
        p.add_span(
            RichSpan::default().with_variant(SpanVariant::Image(
                ImageSpan::new("cat.png", Some(100.0), None, Some("cat".into()))
                    .unwrap(),
            )),
            None,
        );
        assert_eq!(
            decode_paragraphs(vec![p]),
            "<p><a href=\"https://a.b/?x=1&amp;y=2\" target=\"_blank\">\
             <span>site</span></a>\
             <img src=\"cat.png\" width=\"100\" alt=\"cat\"></p>"
        );
    }

    #[test]
    fn text_is_escaped() {
        assert_eq!(
            decode_paragraphs(vec![paragraph(ParagraphType::Plain, "a < b & c")]),
            "<p><span>a &lt; b &amp; c</span></p>"
        );
    }
}
