// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use super::{RichDocument, RichParagraph, SpanId, SpanVariant};
use crate::paragraph_type::{ConfigurableListLevel, ParagraphType};

/// Render a structure as an indented tree, for debugging and tests.
pub trait ToTree {
    fn to_tree(&self) -> String;
}

impl ToTree for RichDocument {
    fn to_tree(&self) -> String {
        let mut out = String::from("\n");
        let count = self.paragraphs().len();
        for (i, paragraph) in self.paragraphs().iter().enumerate() {
            paragraph.write_tree(&mut out, "", i + 1 == count);
        }
        out
    }
}

impl ToTree for RichParagraph {
    fn to_tree(&self) -> String {
        let mut out = String::from("\n");
        self.write_tree(&mut out, "", true);
        out
    }
}

fn line(out: &mut String, prefix: &str, is_last: bool, label: &str) -> String {
    out.push_str(prefix);
    out.push_str(if is_last { "└>" } else { "├>" });
    out.push_str(label);
    out.push('\n');
    format!("{prefix}{}", if is_last { "  " } else { "│ " })
}

impl RichParagraph {
    fn write_tree(&self, out: &mut String, prefix: &str, is_last: bool) {
        let mut label = match &self.paragraph_type {
            ParagraphType::Plain => String::from("p"),
            ParagraphType::Heading(level) => level.tag().to_owned(),
            ParagraphType::OrderedListItem(list) => {
                format!("ol #{} level {}", list.number, list.level())
            }
            ParagraphType::UnorderedListItem(list) => {
                format!("ul level {}", list.level())
            }
        };
        if !self.block_style.is_empty() {
            label.push_str(&format!(" {:?}", self.block_style));
        }
        let child_prefix = line(out, prefix, is_last, &label);
        let count = self.children().len();
        for (i, id) in self.children().iter().enumerate() {
            self.write_span_tree(out, &child_prefix, i + 1 == count, *id);
        }
    }

    fn write_span_tree(
        &self,
        out: &mut String,
        prefix: &str,
        is_last: bool,
        id: SpanId,
    ) {
        let Some(span) = self.span(id) else {
            return;
        };
        let mut label = match &span.variant {
            SpanVariant::Default => String::from("span"),
            SpanVariant::Link(link) => format!("a({})", link.url),
            SpanVariant::Code(_) => String::from("code"),
            SpanVariant::Image(image) => format!("img({})", image.src()),
        };
        if !span.style.is_empty() {
            label.push_str(&format!(" {:?}", span.style));
        }
        if !span.text.is_empty() {
            label.push_str(&format!(" \"{}\"", span.text));
        }
        let child_prefix = line(out, prefix, is_last, &label);
        let count = span.children().len();
        for (i, child) in span.children().iter().enumerate() {
            self.write_span_tree(out, &child_prefix, i + 1 == count, *child);
        }
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::model::RichSpan;
    use crate::style::{SpanAttr, SpanStyle};

    #[test]
    fn renders_nested_spans() {
        let mut first = RichParagraph::default();
        let parent = first.add_span(RichSpan::new("Hello "), None);
        first.add_span(
            RichSpan::new("world")
                .with_style(SpanStyle::new().with(SpanAttr::FontWeight, "bold")),
            Some(parent),
        );
        first.add_span(
            RichSpan::new("!").with_variant(SpanVariant::link("https://x.org")),
            Some(parent),
        );
        let mut second = RichParagraph::new(ParagraphType::unordered(1));
        second.add_span(RichSpan::new("item"), None);

        let document = RichDocument::from_paragraphs(vec![first, second]);
        assert_eq!(
            document.to_tree(),
            indoc! {r#"

                ├>p
                │ └>span "Hello "
                │   ├>span {font-weight: bold;} "world"
                │   └>a(https://x.org) "!"
                └>ul level 1
                  └>span "item"
                "#}
        );
    }
}
