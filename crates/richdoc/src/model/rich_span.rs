// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use super::{SpanVariant, TextRange};
use crate::style::SpanStyle;

/// Index of a span inside its paragraph's arena.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpanId(pub usize);

/// Index of a paragraph inside its document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParagraphId(pub usize);

/// A node of a paragraph's span tree.
///
/// Spans live in an arena owned by their [`super::RichParagraph`]; the
/// `children`, `parent` and `paragraph` links are plain indices.
#[derive(Clone, Debug, Default)]
pub struct RichSpan {
    pub text: String,
    pub style: SpanStyle,
    pub variant: SpanVariant,
    pub(crate) children: Vec<SpanId>,
    pub(crate) parent: Option<SpanId>,
    pub(crate) paragraph: ParagraphId,
    pub(crate) text_range: TextRange,
}

impl RichSpan {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_style(mut self, style: SpanStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_variant(mut self, variant: SpanVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn children(&self) -> &[SpanId] {
        &self.children
    }

    pub fn parent(&self) -> Option<SpanId> {
        self.parent
    }

    pub fn paragraph(&self) -> ParagraphId {
        self.paragraph
    }

    /// Offsets of the flattened text of this span within its paragraph.
    pub fn text_range(&self) -> TextRange {
        self.text_range
    }

    /// Offsets of this span's own text, excluding its children.
    pub fn own_text_range(&self) -> TextRange {
        let start = self.text_range.start;
        TextRange::new(start, start + self.text.chars().count())
    }

    /// A copy of this span's text, style and variant, detached from any
    /// tree.
    pub fn detached(&self) -> Self {
        Self {
            text: self.text.clone(),
            style: self.style.clone(),
            variant: self.variant.clone(),
            ..Default::default()
        }
    }
}

/// An owned span subtree, used while a paragraph is restructured.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct SpanNode {
    pub text: String,
    pub style: SpanStyle,
    pub variant: SpanVariant,
    pub children: Vec<SpanNode>,
}

impl SpanNode {
    /// A span is empty when neither it nor any descendant shows
    /// anything. Images are never empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
            && !matches!(self.variant, SpanVariant::Image(_))
            && self.children.iter().all(SpanNode::is_empty)
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
            + self.children.iter().map(SpanNode::char_len).sum::<usize>()
    }

    pub fn flattened_text(&self, out: &mut String) {
        out.push_str(&self.text);
        for child in &self.children {
            child.flattened_text(out);
        }
    }

    fn empty_like(&self) -> Self {
        Self {
            text: String::new(),
            style: self.style.clone(),
            variant: self.variant.clone(),
            children: Vec::new(),
        }
    }
}

/// Drop every empty span, bottom up.
pub(crate) fn prune_empty(nodes: Vec<SpanNode>) -> Vec<SpanNode> {
    nodes
        .into_iter()
        .filter_map(|mut node| {
            node.children = prune_empty(node.children);
            (!node.is_empty()).then_some(node)
        })
        .collect()
}

/// Collapse wrapper spans into their only child and merge adjacent
/// plain leaves with equal style.
pub(crate) fn normalize_nodes(nodes: Vec<SpanNode>) -> Vec<SpanNode> {
    let mut out: Vec<SpanNode> = Vec::with_capacity(nodes.len());
    for mut node in nodes {
        node.children = normalize_nodes(node.children);
        node = collapse_single_child(node);

        if let Some(prev) = out.last_mut() {
            let mergeable = prev.children.is_empty()
                && node.children.is_empty()
                && prev.variant.is_default()
                && node.variant.is_default()
                && prev.style == node.style;
            if mergeable {
                prev.text.push_str(&node.text);
                continue;
            }
        }
        out.push(node);
    }
    out
}

fn collapse_single_child(mut node: SpanNode) -> SpanNode {
    if !node.text.is_empty() || node.children.len() != 1 {
        return node;
    }
    let child = &node.children[0];
    let both_custom = !node.variant.is_default() && !child.variant.is_default();
    if both_custom || matches!(child.variant, SpanVariant::Image(_)) {
        return node;
    }
    let Some(child) = node.children.pop() else {
        return node;
    };
    let variant = match node.variant.is_default() {
        true => child.variant,
        false => node.variant,
    };
    SpanNode {
        text: child.text,
        style: node.style.merge(&child.style),
        variant,
        children: child.children,
    }
}

/// Split `nodes` at the paragraph offset `index`. `pos` is the offset at
/// which `nodes` start. Returns the content before and from `index`, each
/// side keeping the style and variant of every span it takes a part of.
pub(crate) fn split_nodes(
    nodes: Vec<SpanNode>,
    index: usize,
    pos: &mut usize,
) -> (Vec<SpanNode>, Vec<SpanNode>) {
    let mut before = Vec::new();
    let mut after = Vec::new();
    for node in nodes {
        let start = *pos;
        let end = start + node.char_len();
        *pos = end;

        if start >= index {
            after.push(node);
        } else if end <= index {
            before.push(node);
        } else {
            let mut left = node.empty_like();
            let mut right = node.empty_like();
            let own_len = node.text.chars().count();
            let cut = index - start;
            if cut <= own_len {
                left.text = node.text.chars().take(cut).collect();
                right.text = node.text.chars().skip(cut).collect();
                right.children = node.children;
            } else {
                left.text = node.text;
                let mut child_pos = start + own_len;
                let (l, r) = split_nodes(node.children, index, &mut child_pos);
                left.children = l;
                right.children = r;
            }
            before.push(left);
            after.push(right);
        }
    }
    (before, after)
}
