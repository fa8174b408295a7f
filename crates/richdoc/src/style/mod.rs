// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Inline and block attribute bundles.
//!
//! Both bundles are ordered property maps keyed by a closed set of CSS
//! property names. The codecs never look inside the values except for
//! `text-decoration`, whose space separated tokens combine on merge.

mod css;
mod presets;

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::str::FromStr;

use strum_macros::{AsRefStr, EnumString};

pub use css::parse_css_style;
pub(crate) use css::split_css_style;
pub use presets::{heading_block_profile, heading_span_profile, InlineFormat};

/// A key usable in an [`AttributeMap`].
pub trait StyleKey: Copy + Debug + Ord + AsRef<str> + FromStr {
    /// Whether the value is a space separated token list that is
    /// unioned on merge rather than replaced.
    fn is_token_list(&self) -> bool {
        false
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, AsRefStr,
    EnumString,
)]
#[strum(serialize_all = "kebab-case")]
pub enum SpanAttr {
    Color,
    BackgroundColor,
    FontFamily,
    FontSize,
    FontStyle,
    FontWeight,
    LetterSpacing,
    TextDecoration,
    VerticalAlign,
}

impl StyleKey for SpanAttr {
    fn is_token_list(&self) -> bool {
        matches!(self, SpanAttr::TextDecoration)
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, AsRefStr,
    EnumString,
)]
#[strum(serialize_all = "kebab-case")]
pub enum ParagraphAttr {
    Direction,
    LineHeight,
    TextAlign,
    TextIndent,
}

impl StyleKey for ParagraphAttr {}

/// An ordered key to value record that can be merged and diffed.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AttributeMap<K: StyleKey> {
    entries: BTreeMap<K, String>,
}

pub type SpanStyle = AttributeMap<SpanAttr>;
pub type ParagraphStyle = AttributeMap<ParagraphAttr>;

impl<K: StyleKey> Default for AttributeMap<K> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<K: StyleKey> Debug for AttributeMap<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.to_css())
    }
}

impl<K: StyleKey> AttributeMap<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder style setter.
    pub fn with(mut self, key: K, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: K, value: impl Into<String>) {
        self.entries.insert(key, value.into());
    }

    pub fn get(&self, key: K) -> Option<&str> {
        self.entries.get(&key).map(String::as_str)
    }

    pub fn remove(&mut self, key: K) -> Option<String> {
        self.entries.remove(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Combine two bundles. Entries in `other` win, except token lists,
    /// which keep every token from both sides.
    pub fn merge(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        for (key, value) in other.iter() {
            let value = match (key.is_token_list(), self.get(key)) {
                (true, Some(existing)) => union_tokens(existing, value),
                _ => value.to_owned(),
            };
            merged.entries.insert(key, value);
        }
        merged
    }

    /// The entries of `self` that `base` does not already provide.
    pub fn diff(&self, base: &Self) -> Self {
        let mut out = Self::new();
        for (key, value) in self.iter() {
            match (key.is_token_list(), base.get(key)) {
                (_, None) => out.set(key, value),
                (true, Some(base_value)) => {
                    let rest = subtract_tokens(value, base_value);
                    if !rest.is_empty() {
                        out.set(key, rest);
                    }
                }
                (false, Some(base_value)) if base_value != value => {
                    out.set(key, value)
                }
                (false, Some(_)) => {}
            }
        }
        out
    }

    /// True if every entry of `other` is present in `self`.
    pub fn contains(&self, other: &Self) -> bool {
        other.iter().all(|(key, value)| match self.get(key) {
            None => false,
            Some(own) if key.is_token_list() => {
                let own: Vec<&str> = own.split_whitespace().collect();
                value.split_whitespace().all(|t| own.contains(&t))
            }
            Some(own) => own == value,
        })
    }

    /// Serialize as the body of a `style` attribute.
    pub fn to_css(&self) -> String {
        self.iter()
            .map(|(key, value)| format!("{}: {};", key.as_ref(), value))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Build a bundle from parsed CSS properties, dropping the ones this
    /// bundle has no key for.
    pub fn from_css_map(map: &BTreeMap<String, String>) -> Self {
        let mut out = Self::new();
        for (name, value) in map {
            if let Ok(key) = K::from_str(name) {
                out.set(key, value.clone());
            }
        }
        out
    }
}

fn union_tokens(existing: &str, added: &str) -> String {
    let mut tokens: Vec<&str> = existing.split_whitespace().collect();
    for token in added.split_whitespace() {
        if !tokens.contains(&token) {
            tokens.push(token);
        }
    }
    tokens.join(" ")
}

fn subtract_tokens(value: &str, removed: &str) -> String {
    let removed: Vec<&str> = removed.split_whitespace().collect();
    value
        .split_whitespace()
        .filter(|token| !removed.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}
