// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use indoc::indoc;
use richdoc::{
    heading_span_profile, html, markdown, HeadingLevel, ParagraphAttr,
    ParagraphType, RichDocument, RichParagraph, RichSpan, RichTextConfig,
    RichTextState, SpanAttr, SpanStyle, ToTree,
};
use speculoos::prelude::*;
use speculoos::{AssertionFailure, Spec};

trait Roundtrips<T> {
    fn roundtrips(&self);
}

impl<'s, T> Roundtrips<T> for Spec<'s, T>
where
    T: AsRef<str>,
{
    fn roundtrips(&self) {
        let subject = self.subject.as_ref();
        let document = html::encode(subject).unwrap();
        let output = html::decode(&document);
        if output != subject {
            AssertionFailure::from_spec(self)
                .with_expected(String::from(subject))
                .with_actual(output)
                .fail();
        }
    }
}

fn encode(markup: &str) -> RichDocument {
    html::encode(markup).unwrap()
}

fn texts(document: &RichDocument) -> Vec<String> {
    document.paragraphs().iter().map(RichParagraph::text).collect()
}

fn list_numbers(document: &RichDocument) -> Vec<usize> {
    document
        .paragraphs()
        .iter()
        .filter_map(|p| match &p.paragraph_type {
            ParagraphType::OrderedListItem(list) => Some(list.number),
            _ => None,
        })
        .collect()
}

#[test]
fn heading_scenario() {
    let document = encode("<h1>Simple</h1>");
    assert_eq!(document.len(), 1);
    let paragraph = &document.paragraphs()[0];
    assert_eq!(
        paragraph.paragraph_type,
        ParagraphType::Heading(HeadingLevel::H1)
    );
    assert_eq!(paragraph.children().len(), 1);
    let span = paragraph.span(paragraph.children()[0]).unwrap();
    assert_eq!(span.text, "Simple");
    assert_eq!(span.style, heading_span_profile(HeadingLevel::H1));
    assert_eq!(html::decode(&document), "<h1><span>Simple</span></h1>");
}

#[test]
fn paragraph_scenario() {
    assert_eq!(
        html::decode(&encode("<p>Text</p>")),
        "<p><span>Text</span></p>"
    );
}

#[test]
fn unordered_list_scenario() {
    let document = encode("<ul><li>A</li><li>B</li></ul>");
    assert_eq!(texts(&document), vec!["A", "B"]);
    for paragraph in document.paragraphs() {
        assert_eq!(paragraph.paragraph_type, ParagraphType::unordered(1));
    }
    assert_eq!(
        html::decode(&document),
        "<ul><li><span>A</span></li><li><span>B</span></li></ul>"
    );
}

#[test]
fn nested_list_scenario() {
    let document = encode("<ol><li>X<ul><li>Y</li></ul></li></ol>");
    assert_eq!(
        document.to_tree(),
        indoc! {r#"

            ├>ol #1 level 1
            │ └>span "X"
            └>ul level 2
              └>span "Y"
            "#}
    );
    assert_eq!(
        html::decode(&document),
        "<ol><li><span>X</span><ul><li><span>Y</span></li></ul></li></ol>"
    );
}

#[test]
fn line_break_splits_and_keeps_block_style() {
    let document =
        encode("<p style=\"text-align: center;\">Hello<br>World</p>");
    assert_eq!(texts(&document), vec!["Hello", "World"]);
    for paragraph in document.paragraphs() {
        assert_eq!(
            paragraph.block_style.get(ParagraphAttr::TextAlign),
            Some("center")
        );
    }
}

#[test]
fn pretty_printed_markup_matches_compact_markup() {
    let pretty = encode(indoc! {"
        <ul>
          <li>A</li>
          <li>B</li>
        </ul>
        <p>
          Some   text
        </p>
    "});
    let compact = encode("<ul><li>A</li><li>B</li></ul><p>Some text </p>");
    assert_eq!(pretty, compact);
}

#[test]
fn canonical_markup_roundtrips() {
    assert_that!("<p><span>Text</span></p>").roundtrips();
    assert_that!("<h1><span>Simple</span></h1>").roundtrips();
    assert_that!(
        "<h2 style=\"text-align: right;\"><span style=\"color: blue;\">Big</span></h2>"
    )
    .roundtrips();
    assert_that!(
        "<p><b><span>bold</span></b><span> and </span><i><span>italic</span></i></p>"
    )
    .roundtrips();
    assert_that!("<p><u><s><span>both</span></s></u></p>").roundtrips();
    assert_that!(
        "<p style=\"text-align: center;\"><span style=\"color: red;\">x</span></p>"
    )
    .roundtrips();
    assert_that!(
        "<p><a href=\"https://matrix.org\" target=\"_blank\"><span>link</span></a></p>"
    )
    .roundtrips();
    assert_that!("<p><code><span>let x</span></code></p>").roundtrips();
    assert_that!(
        "<p><img src=\"cat.png\" width=\"10\" height=\"20\" alt=\"cat\"></p>"
    )
    .roundtrips();
    assert_that!("<ol start=\"3\"><li><span>c</span></li><li><span>d</span></li></ol>")
        .roundtrips();
    assert_that!("<p><span>A</span><br></p>").roundtrips();
    assert_that!("<p><span>A</span></p><br><p><span>B</span></p>").roundtrips();
    assert_that!("<br>").roundtrips();
}

#[test]
fn decoded_markup_encodes_to_an_equal_document() {
    let inputs = [
        "<p>Hello<br>World</p>",
        "<ul><li>a<ol><li>b</li><li>c</li></ol></li><li>d</li></ul><p>end</p>",
        "<p>plain <b>bold <i>both</i></b> <span style=\"color: red\">red</span></p>",
        "<h3>Title<br></h3><p>after</p>",
        "<div>A</div><br><div>B</div>",
        "<ol><li></li><li>x</li><li></li></ol>",
        "<ol><li>a<ul><li>b<ol><li>c</li></ol></li></ul></li><li>d</li></ol><p>e</p>",
        "<p><a href=\"u\"><b>bold link</b></a> <img src=\"i.png\" width=\"5\"></p>",
    ];
    for input in inputs {
        let first = encode(input);
        let second = encode(&html::decode(&first));
        assert_eq!(first, second, "document of {input} changed on roundtrip");
    }
}

#[test]
fn skipped_and_unknown_tags() {
    let document = encode(
        "<html><head><title>T</title><style>p{}</style></head>\
         <body><p><font>kept</font></p><script>var x = '<p>';</script></body></html>",
    );
    assert_eq!(texts(&document), vec!["kept"]);
}

#[test]
fn ordered_runs_count_from_their_first_number() {
    let document = encode(
        "<ol><li>a</li><li>b</li></ol><ol><li>c</li></ol>\
         <p>break</p><ol start=\"5\"><li>d</li><li>e</li></ol>",
    );
    assert_eq!(list_numbers(&document), vec![1, 2, 3, 5, 6]);
}

#[test]
fn remove_empty_children_is_idempotent() {
    let mut paragraph = RichParagraph::default();
    let root = paragraph.add_span(RichSpan::default(), None);
    let inner = paragraph.add_span(RichSpan::default(), Some(root));
    paragraph.add_span(RichSpan::new("x"), Some(inner));
    paragraph.add_span(RichSpan::default(), Some(root));
    paragraph.add_span(RichSpan::default(), None);

    paragraph.remove_empty_children();
    let once = paragraph.to_tree();
    paragraph.remove_empty_children();
    assert_eq!(paragraph.to_tree(), once);
    assert_eq!(
        once,
        indoc! {r#"

            └>p
              └>span
                └>span
                  └>span "x"
            "#}
    );
}

#[test]
fn slicing_preserves_the_text() {
    let original = encode("<p>ab<b>cd<i>ef</i></b>gh</p>");
    let text = original.paragraphs()[0].text();
    for index in 0..=text.chars().count() {
        let mut document = original.clone();
        document.slice_paragraph(0, index, false).unwrap();
        let parts = texts(&document);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts.concat(), text, "slice at {index}");
        assert_eq!(parts[0].chars().count(), index);
    }
}

#[test]
fn slicing_out_of_bounds_fails() {
    let mut document = encode("<p>abc</p>");
    assert_that!(document.slice_paragraph(0, 4, true)).is_err();
}

#[test]
fn markdown_roundtrips() {
    let source = indoc! {"
        # Title

        Some **bold** and *italic* text.

        1. one
        2. two
           * nested

        [link](<https://x.org>)"};
    assert_eq!(markdown::decode(&markdown::encode(source)), source);
}

#[test]
fn markdown_keeps_list_items_that_look_like_markers() {
    let mut paragraphs = Vec::new();
    for (paragraph_type, text) in [
        (ParagraphType::unordered(1), "1. first"),
        (ParagraphType::unordered(1), "- dash"),
        (ParagraphType::unordered(1), "+ plus"),
    ] {
        let mut paragraph = RichParagraph::new(paragraph_type);
        paragraph.add_span(RichSpan::new(text), None);
        paragraphs.push(paragraph);
    }
    let document = RichDocument::from_paragraphs(paragraphs);
    let back = markdown::encode(&markdown::decode(&document));
    assert_eq!(back, document);
}

#[test]
fn markdown_and_html_agree() {
    let from_markdown = markdown::encode("* a\n* b\n\n~~gone~~ <u>under</u>");
    let from_html = encode(
        "<ul><li>a</li><li>b</li></ul><p><s>gone</s> <u>under</u></p>",
    );
    assert_eq!(from_markdown, from_html);
}

#[test]
fn config_is_loaded_from_json() {
    let config: RichTextConfig = serde_json::from_str(
        r#"{
            "unordered_list_indent": 20,
            "ordered_list_style_type": { "multiple": ["decimal", "lower-alpha"] },
            "unordered_list_style_type": ["-", "+"]
        }"#,
    )
    .unwrap();
    let state = RichTextState::from_html(
        "<ol><li>a<ol><li>b</li></ol></li></ol><ul><li>c</li></ul>",
        config,
    )
    .unwrap();
    assert_eq!(state.to_text(), "1. a\na. b\n- c");
    assert_eq!(
        state.block_style(1).map(|s| s.to_css()),
        Some("text-indent: 76px;".to_owned())
    );
    assert_eq!(
        state.block_style(2).map(|s| s.to_css()),
        Some("text-indent: 20px;".to_owned())
    );
}

#[test]
fn heading_overrides_are_the_only_inline_style_written() {
    let mut heading =
        RichParagraph::new(ParagraphType::Heading(HeadingLevel::H3));
    let red = SpanStyle::new().with(SpanAttr::Color, "red");
    heading.add_span(
        RichSpan::new("t")
            .with_style(heading_span_profile(HeadingLevel::H3).merge(&red)),
        None,
    );
    let document = RichDocument::from_paragraphs(vec![heading]);
    assert_eq!(
        html::decode(&document),
        "<h3><span style=\"color: red;\">t</span></h3>"
    );
}

#[cfg(feature = "sys")]
#[test]
fn lexical_errors_are_reported() {
    let result = html::encode("<p class=\"a\"id=\"b\">x</p>");
    assert!(matches!(
        result,
        Err(richdoc::Error::MalformedMarkup { ref parse_errors })
            if !parse_errors.is_empty()
    ));
}
