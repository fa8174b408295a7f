// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::collections::BTreeMap;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::{ParagraphAttr, ParagraphStyle, SpanAttr, SpanStyle};

static DECLARATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-z-]+)\s*:\s*([^;]*)").unwrap());

/// Split the value of a `style` attribute into property/value pairs.
///
/// Property names are lower-cased. Numeric font weights are mapped to
/// their keyword so that `700` and `bold` compare equal.
pub fn parse_css_style(raw: &str) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for caps in DECLARATION.captures_iter(raw) {
        let name = caps[1].trim().to_ascii_lowercase();
        let value = caps[2].trim();
        if value.is_empty() {
            continue;
        }
        let value = match (name.as_str(), value) {
            ("font-weight", "700") => "bold",
            ("font-weight", "400") => "normal",
            _ => value,
        };
        map.insert(name, value.to_owned());
    }
    map
}

/// Parse a `style` attribute into its inline and block halves.
pub(crate) fn split_css_style(raw: &str) -> (SpanStyle, ParagraphStyle) {
    let mut span = SpanStyle::new();
    let mut block = ParagraphStyle::new();
    for (name, value) in parse_css_style(raw) {
        if let Ok(key) = SpanAttr::from_str(&name) {
            span.set(key, value);
        } else if let Ok(key) = ParagraphAttr::from_str(&name) {
            block.set(key, value);
        } else {
            debug!(property = %name, "ignoring unsupported css property");
        }
    }
    (span, block)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_declarations() {
        let map = parse_css_style("color: red;Font-Size:12px ; ;");
        assert_eq!(map.get("color").map(String::as_str), Some("red"));
        assert_eq!(map.get("font-size").map(String::as_str), Some("12px"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn last_declaration_has_no_semicolon() {
        let map = parse_css_style("text-align: center");
        assert_eq!(map.get("text-align").map(String::as_str), Some("center"));
    }

    #[test]
    fn numeric_font_weights_become_keywords() {
        let map = parse_css_style("font-weight: 700");
        assert_eq!(map.get("font-weight").map(String::as_str), Some("bold"));
    }

    #[test]
    fn split_routes_properties_to_their_bundle() {
        let (span, block) =
            split_css_style("color: red; text-align: right; float: left;");
        assert_eq!(span.to_css(), "color: red;");
        assert_eq!(block.to_css(), "text-align: right;");
    }
}
