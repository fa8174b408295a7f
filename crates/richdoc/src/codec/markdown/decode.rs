// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Serialization of a [`RichDocument`] to CommonMark.
//!
//! Formats without a Markdown syntax (underline, sub/superscript, mark,
//! small) are written as inline HTML, which the encoder reads back.
//! Leftover CSS and block styles have no Markdown form and are dropped.

use strum::IntoEnumIterator;

use crate::model::{RichDocument, RichParagraph, SpanId, SpanVariant};
use crate::paragraph_type::ParagraphType;
use crate::style::{heading_span_profile, InlineFormat, SpanStyle};

const LINE_BREAK: &str = "<br />";

pub fn decode(document: &RichDocument) -> String {
    let paragraphs = document.paragraphs();
    let mut markdown = String::new();
    // Width of the last list marker seen at each level.
    let mut marker_widths: Vec<usize> = Vec::new();
    let mut previous_was_list = false;

    for (index, paragraph) in paragraphs.iter().enumerate() {
        let is_last = index + 1 == paragraphs.len();
        let previous = index.checked_sub(1).map(|i| &paragraphs[i]);

        let line = match &paragraph.paragraph_type {
            ParagraphType::Plain if paragraph.is_empty() => {
                match (is_last, previous.is_some_and(|p| p.is_empty())) {
                    (true, false) => {
                        markdown.push_str(LINE_BREAK);
                        continue;
                    }
                    (true, true) => continue,
                    (false, _) => LINE_BREAK.to_owned(),
                }
            }
            ParagraphType::Plain => escape_line_start(inline(paragraph)),
            ParagraphType::Heading(level) => {
                format!("{} {}", "#".repeat(level.number()), inline(paragraph))
            }
            ParagraphType::OrderedListItem(list) => {
                let marker = format!("{}. ", list.number);
                list_line(&mut marker_widths, paragraph, &marker)
            }
            ParagraphType::UnorderedListItem(_) => {
                list_line(&mut marker_widths, paragraph, "* ")
            }
        };

        let is_list = paragraph.paragraph_type.is_list();
        if !is_list {
            marker_widths.clear();
        }
        if !markdown.is_empty() {
            markdown.push_str(if is_list && previous_was_list {
                "\n"
            } else {
                "\n\n"
            });
        }
        markdown.push_str(&line);
        previous_was_list = is_list;
    }
    markdown
}

/// A list item line, indented under the markers of its enclosing items.
fn list_line(
    marker_widths: &mut Vec<usize>,
    paragraph: &RichParagraph,
    marker: &str,
) -> String {
    let level = paragraph.paragraph_type.level();
    marker_widths.resize(level.saturating_sub(1), 2);
    let indent: usize = marker_widths.iter().sum();
    marker_widths.push(marker.chars().count());
    format!(
        "{}{marker}{}",
        " ".repeat(indent),
        escape_line_start(inline(paragraph))
    )
}

fn inline(paragraph: &RichParagraph) -> String {
    let base = match &paragraph.paragraph_type {
        ParagraphType::Heading(level) => heading_span_profile(*level),
        _ => SpanStyle::new(),
    };
    let mut out = String::new();
    for id in paragraph.children() {
        write_span(&mut out, paragraph, *id, &base, &[]);
    }
    out
}

fn delimiters(format: InlineFormat) -> (&'static str, &'static str) {
    match format {
        InlineFormat::Bold => ("**", "**"),
        InlineFormat::Italic => ("*", "*"),
        InlineFormat::Strikethrough => ("~~", "~~"),
        InlineFormat::Underline => ("<u>", "</u>"),
        InlineFormat::Subscript => ("<sub>", "</sub>"),
        InlineFormat::Superscript => ("<sup>", "</sup>"),
        InlineFormat::Mark => ("<mark>", "</mark>"),
        InlineFormat::Small => ("<small>", "</small>"),
    }
}

fn write_span(
    out: &mut String,
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
    let formats: Vec<InlineFormat> = InlineFormat::iter()
        .filter(|f| style.contains(&f.style()) && !applied.contains(f))
        .collect();
    let mut child_applied = applied.to_vec();
    child_applied.extend(formats.iter().copied());

    let mut content = String::new();
    match &span.variant {
        SpanVariant::Image(image) => {
            content.push_str(&format!(
                "![{}](<{}>)",
                escape(image.alt().unwrap_or_default()),
                escape_destination(image.src())
            ));
        }
        SpanVariant::Code(_) => {
            content.push_str(&code(&paragraph.flattened_text(id)));
        }
        SpanVariant::Link(link) => {
            let mut text = escape(&span.text);
            for child in span.children() {
                write_span(
                    &mut text,
                    paragraph,
                    *child,
                    &SpanStyle::new(),
                    &child_applied,
                );
            }
            content.push_str(&format!(
                "[{text}](<{}>)",
                escape_destination(&link.url)
            ));
        }
        SpanVariant::Default => {
            content.push_str(&escape(&span.text));
            for child in span.children() {
                write_span(
                    &mut content,
                    paragraph,
                    *child,
                    &SpanStyle::new(),
                    &child_applied,
                );
            }
        }
    }

    for format in formats.iter().rev() {
        let (open, close) = delimiters(*format);
        content = wrap(&content, open, close);
    }
    out.push_str(&content);
}

/// Surround `content` with delimiters, keeping outer whitespace outside
/// so that emphasis stays left- and right-flanking.
fn wrap(content: &str, open: &str, close: &str) -> String {
    let core = content.trim_matches(' ');
    if core.is_empty() {
        return content.to_owned();
    }
    let leading_len = content.len() - content.trim_start_matches(' ').len();
    let leading = &content[..leading_len];
    let trailing = &content[content.trim_end_matches(' ').len()..];
    format!("{leading}{open}{core}{close}{trailing}")
}

fn code(text: &str) -> String {
    let longest_run = text
        .split(|c: char| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest_run + 1);
    let padding = if text.starts_with('`') || text.ends_with('`') {
        " "
    } else {
        ""
    };
    format!("{fence}{padding}{text}{padding}{fence}")
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(
            c,
            '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '~' | '#' | '&'
                | '|'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn escape_destination(url: &str) -> String {
    url.replace('<', "\\<").replace('>', "\\>")
}

/// Stop a paragraph from being read as a list item or a thematic break.
fn escape_line_start(line: String) -> String {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 && matches!(line[digits..].chars().next(), Some('.' | ')')) {
        return format!("{}\\{}", &line[..digits], &line[digits..]);
    }
    match line.chars().next() {
        Some('-' | '+' | '=') => format!("\\{line}"),
        _ => line,
    }
}
