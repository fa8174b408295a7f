// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use tracing::trace;

use crate::codec::builder::TreeBuilder;
use crate::codec::html::scan::scan;
use crate::codec::tags::HtmlTag;
use crate::model::RichDocument;

struct PendingImage {
    src: String,
    alt: String,
}

/// Translates pulldown-cmark events to tree builder events.
struct MarkdownFeeder {
    builder: TreeBuilder,
    image: Option<PendingImage>,
    in_code_block: bool,
    /// A code block line ended and the next text starts a new one.
    code_line_ended: bool,
}

pub fn encode(markdown: &str) -> RichDocument {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let mut feeder = MarkdownFeeder {
        builder: TreeBuilder::new(),
        image: None,
        in_code_block: false,
        code_line_ended: false,
    };
    for event in Parser::new_ext(markdown, options) {
        feeder.event(event);
    }
    feeder.builder.finish()
}

fn heading_tag(level: pulldown_cmark::HeadingLevel) -> HtmlTag {
    HtmlTag::parse(&format!("h{}", level as usize))
}

impl MarkdownFeeder {
    fn event(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                self.builder.open(HtmlTag::Code, Vec::new());
                self.builder.text(&code);
                self.builder.close(&HtmlTag::Code);
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                scan(&mut self.builder, &html)
            }
            Event::SoftBreak => self.text(" "),
            Event::HardBreak => self.builder.open(HtmlTag::Br, Vec::new()),
            Event::Rule => {
                self.builder.open(HtmlTag::Hr, Vec::new());
            }
            other => trace!(?other, "ignoring markdown event"),
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(image) = &mut self.image {
            image.alt.push_str(text);
            return;
        }
        if !self.in_code_block {
            self.builder.text(text);
            return;
        }
        // Keep the lines of a code block apart.
        let mut rest = text;
        while !rest.is_empty() {
            if self.code_line_ended {
                self.builder.close(&HtmlTag::Code);
                self.builder.open(HtmlTag::Br, Vec::new());
                self.builder.open(HtmlTag::Code, Vec::new());
                self.code_line_ended = false;
            }
            match rest.split_once('\n') {
                Some((line, tail)) => {
                    self.builder.text(line);
                    self.code_line_ended = true;
                    rest = tail;
                }
                None => {
                    self.builder.text(rest);
                    rest = "";
                }
            }
        }
    }

    fn start(&mut self, tag: Tag) {
        let (tag, attrs) = match tag {
            Tag::Paragraph => (HtmlTag::P, Vec::new()),
            Tag::Heading { level, .. } => (heading_tag(level), Vec::new()),
            Tag::BlockQuote(_) => (HtmlTag::Blockquote, Vec::new()),
            Tag::CodeBlock(_) => {
                self.in_code_block = true;
                self.builder.open(HtmlTag::Pre, Vec::new());
                (HtmlTag::Code, Vec::new())
            }
            Tag::List(Some(start)) => {
                (HtmlTag::Ol, vec![("start".to_owned(), start.to_string())])
            }
            Tag::List(None) => (HtmlTag::Ul, Vec::new()),
            Tag::Item => (HtmlTag::Li, Vec::new()),
            Tag::Emphasis => (HtmlTag::I, Vec::new()),
            Tag::Strong => (HtmlTag::B, Vec::new()),
            Tag::Strikethrough => (HtmlTag::S, Vec::new()),
            Tag::Link { dest_url, .. } => {
                (HtmlTag::A, vec![("href".to_owned(), dest_url.to_string())])
            }
            Tag::Image { dest_url, .. } => {
                self.image = Some(PendingImage {
                    src: dest_url.to_string(),
                    alt: String::new(),
                });
                return;
            }
            other => {
                trace!(?other, "ignoring markdown block");
                return;
            }
        };
        self.builder.open(tag, attrs);
    }

    fn end(&mut self, tag: TagEnd) {
        let tag = match tag {
            TagEnd::Paragraph => HtmlTag::P,
            TagEnd::Heading(level) => heading_tag(level),
            TagEnd::BlockQuote(_) => HtmlTag::Blockquote,
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.code_line_ended = false;
                self.builder.close(&HtmlTag::Code);
                HtmlTag::Pre
            }
            TagEnd::List(true) => HtmlTag::Ol,
            TagEnd::List(false) => HtmlTag::Ul,
            TagEnd::Item => HtmlTag::Li,
            TagEnd::Emphasis => HtmlTag::I,
            TagEnd::Strong => HtmlTag::B,
            TagEnd::Strikethrough => HtmlTag::S,
            TagEnd::Link => HtmlTag::A,
            TagEnd::Image => {
                if let Some(image) = self.image.take() {
                    let mut attrs = vec![("src".to_owned(), image.src)];
                    if !image.alt.is_empty() {
                        attrs.push(("alt".to_owned(), image.alt));
                    }
                    self.builder.open(HtmlTag::Img, attrs);
                }
                return;
            }
            _ => return,
        };
        self.builder.close(&tag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SpanVariant, ToTree};
    use crate::paragraph_type::{HeadingLevel, ParagraphType};

    fn texts(document: &RichDocument) -> Vec<String> {
        document.paragraphs().iter().map(|p| p.text()).collect()
    }

    #[test]
    fn headings_and_paragraphs() {
        let document = encode("# Title\n\nSome *text*.");
        assert_eq!(texts(&document), vec!["Title", "Some text."]);
        assert_eq!(
            document.paragraphs()[0].paragraph_type,
            ParagraphType::Heading(HeadingLevel::H1)
        );
    }

    #[test]
    fn ordered_list_start_is_kept() {
        let document = encode("3. three\n4. four\n   * nested\n");
        assert_eq!(
            document.to_text(&Default::default()),
            "3. three\n4. four\n◦ nested"
        );
    }

    #[test]
    fn inline_html_formats() {
        let document = encode("a <u>b</u> c");
        assert_eq!(
            document.to_tree(),
            indoc::indoc! {r#"

                └>p
                  └>span "a "
                    ├>span {text-decoration: underline;} "b"
                    └>span " c"
                "#}
        );
    }

    #[test]
    fn images_keep_their_alt_text() {
        let document = encode("![a cat](cat.png)");
        let paragraph = &document.paragraphs()[0];
        let span = paragraph.span(paragraph.children()[0]).unwrap();
        let SpanVariant::Image(image) = &span.variant else {
            panic!("expected an image");
        };
        assert_eq!(image.src(), "cat.png");
        assert_eq!(image.alt(), Some("a cat"));
    }

    #[test]
    fn code_block_lines_become_paragraphs() {
        let document = encode("```\nlet a = 1;\nlet b = 2;\n```\n");
        assert_eq!(texts(&document), vec!["let a = 1;", "let b = 2;"]);
    }
}
