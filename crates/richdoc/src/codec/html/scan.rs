// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! A lenient, regex based tag scanner.
//!
//! Used for markup fragments that never go through the tokenizer, such
//! as HTML embedded in Markdown, and as the HTML front-end when the
//! `sys` feature is off. It never fails: anything that does not look
//! like a tag is text.

use html_escape::decode_html_entities;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::codec::builder::TreeBuilder;
use crate::codec::tags::HtmlTag;

static MARKUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?s)<!--.*?-->|<![^>]*>|<(/?)([A-Za-z][A-Za-z0-9-]*)((?:[^>"']|"[^"]*"|'[^']*')*?)(/?)>"#,
    )
    .unwrap()
});

static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"([^\s"'<>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#,
    )
    .unwrap()
});

/// Feed every tag and text run of `markup` to `builder`.
pub(crate) fn scan(builder: &mut TreeBuilder, markup: &str) {
    let mut position = 0;
    while let Some(caps) = MARKUP.captures_at(markup, position) {
        let Some(whole) = caps.get(0) else {
            break;
        };
        text(builder, &markup[position..whole.start()]);
        position = whole.end();

        // Comments and doctypes.
        let Some(name) = caps.get(2) else {
            continue;
        };
        let tag = HtmlTag::parse(name.as_str());
        if caps.get(1).is_some_and(|slash| !slash.is_empty()) {
            builder.close(&tag);
            continue;
        }

        let attrs = caps
            .get(3)
            .map(|m| attributes(m.as_str()))
            .unwrap_or_default();
        let self_closing = caps.get(4).is_some_and(|m| !m.is_empty());
        builder.open(tag.clone(), attrs);
        if self_closing && !tag.is_void() {
            builder.close(&tag);
        } else if tag.is_raw_text() {
            // Jump to the matching close tag, the next match closes it.
            position = find_close_tag(markup, position, name.as_str());
        }
    }
    text(builder, &markup[position..]);
}

fn text(builder: &mut TreeBuilder, raw: &str) {
    if !raw.is_empty() {
        builder.text(&decode_html_entities(raw));
    }
}

fn attributes(raw: &str) -> Vec<(String, String)> {
    ATTRIBUTE
        .captures_iter(raw)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str().to_ascii_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| decode_html_entities(m.as_str()).into_owned())
                .unwrap_or_default();
            Some((name, value))
        })
        .collect()
}

fn find_close_tag(markup: &str, from: usize, name: &str) -> usize {
    let needle = format!("</{}", name.to_ascii_lowercase());
    markup[from..]
        .to_ascii_lowercase()
        .find(&needle)
        .map_or(markup.len(), |offset| from + offset)
}
