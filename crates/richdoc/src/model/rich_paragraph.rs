// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use super::rich_span::{normalize_nodes, prune_empty, split_nodes, SpanNode};
use super::{ParagraphId, RichSpan, SpanId, SpanVariant, TextRange};
use crate::error::{Error, Result};
use crate::paragraph_type::ParagraphType;
use crate::style::ParagraphStyle;

/// A block of the document: a forest of spans plus block attributes.
#[derive(Clone, Debug, Default)]
pub struct RichParagraph {
    spans: Vec<RichSpan>,
    children: Vec<SpanId>,
    pub block_style: ParagraphStyle,
    pub paragraph_type: ParagraphType,
    id: ParagraphId,
}

impl RichParagraph {
    pub fn new(paragraph_type: ParagraphType) -> Self {
        Self {
            paragraph_type,
            ..Default::default()
        }
    }

    pub fn with_block_style(mut self, block_style: ParagraphStyle) -> Self {
        self.block_style = block_style;
        self
    }

    pub fn id(&self) -> ParagraphId {
        self.id
    }

    /// Root spans, in order.
    pub fn children(&self) -> &[SpanId] {
        &self.children
    }

    pub fn span(&self, id: SpanId) -> Option<&RichSpan> {
        self.spans.get(id.0)
    }

    pub(crate) fn span_mut(&mut self, id: SpanId) -> Option<&mut RichSpan> {
        self.spans.get_mut(id.0)
    }

    /// Attach `span` under `parent`, or as a new root when `parent` is
    /// `None`. Text ranges are refreshed.
    pub fn add_span(&mut self, mut span: RichSpan, parent: Option<SpanId>) -> SpanId {
        let id = SpanId(self.spans.len());
        span.children.clear();
        span.parent = parent.filter(|p| p.0 < self.spans.len());
        span.paragraph = self.id;
        match span.parent {
            Some(parent) => self.spans[parent.0].children.push(id),
            None => self.children.push(id),
        }
        self.spans.push(span);
        self.update_text_ranges();
        id
    }

    /// Every span reachable from the roots, depth first, pre-order.
    pub fn descendants(&self) -> Vec<SpanId> {
        let mut out = Vec::new();
        let mut stack: Vec<SpanId> = self.children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(span) = self.span(id) {
                stack.extend(span.children.iter().rev());
            }
        }
        out
    }

    pub fn flattened_text(&self, id: SpanId) -> String {
        let mut out = String::new();
        if let Some(node) = self.node(id) {
            node.flattened_text(&mut out);
        }
        out
    }

    pub fn text(&self) -> String {
        self.children
            .iter()
            .map(|id| self.flattened_text(*id))
            .collect()
    }

    /// Length of the flattened text, in characters.
    pub fn text_len(&self) -> usize {
        self.to_nodes().iter().map(SpanNode::char_len).sum()
    }

    pub fn span_is_empty(&self, id: SpanId) -> bool {
        self.node(id).is_none_or(|node| node.is_empty())
    }

    /// True when no span shows anything.
    pub fn is_empty(&self) -> bool {
        self.to_nodes().iter().all(SpanNode::is_empty)
    }

    /// True when empty and without block attributes beyond those the
    /// paragraph type implies.
    pub fn is_blank(&self) -> bool {
        self.is_empty()
            && self
                .block_style
                .diff(&self.paragraph_type.intrinsic_block_style())
                .is_empty()
    }

    /// The first span, depth first, with non-empty own text.
    pub fn get_first_non_empty_child(&self) -> Option<SpanId> {
        self.descendants()
            .into_iter()
            .find(|id| !self.spans[id.0].text.is_empty())
    }

    /// Remove every span that shows nothing. The first root survives if
    /// all of them would go, so that a cursor can still be placed.
    pub fn remove_empty_children(&mut self) {
        let nodes = self.to_nodes();
        let mut pruned = prune_empty(nodes.clone());
        if pruned.is_empty() {
            if let Some(mut first) = nodes.into_iter().next() {
                first.children.clear();
                pruned.push(first);
            }
        }
        self.set_nodes(pruned);
    }

    /// Find the span whose own text covers `text_index`, with the
    /// paragraph starting at `offset`. An index at the very end of the
    /// paragraph resolves to the last span with text.
    ///
    /// Returns the offset just past this paragraph's text along with the
    /// span.
    pub fn get_rich_span_by_text_index(
        &self,
        text_index: usize,
        offset: usize,
    ) -> (usize, Option<SpanId>) {
        let end = offset + self.text_len();
        let mut last = None;
        for id in self.descendants() {
            let span = &self.spans[id.0];
            let range = span.own_text_range().shifted(offset);
            if range.is_empty() {
                continue;
            }
            if range.contains(text_index) {
                return (end, Some(id));
            }
            last = Some(id);
        }
        match text_index == end {
            true => (end, last),
            false => (end, None),
        }
    }

    /// Every span with text that overlaps `range`, whole, with the
    /// paragraph starting at `offset`.
    pub fn get_rich_span_list_by_text_range(
        &self,
        range: TextRange,
        offset: usize,
    ) -> (usize, Vec<SpanId>) {
        let end = offset + self.text_len();
        let spans = self
            .descendants()
            .into_iter()
            .filter(|id| {
                let own = self.spans[id.0].own_text_range().shifted(offset);
                !own.is_empty() && own.intersects(&range)
            })
            .collect();
        (end, spans)
    }

    /// Split the paragraph at the character offset `index`, which must lie
    /// inside the tree rooted above `from_span`. Everything from `index`
    /// on moves to the returned paragraph; `self` keeps the rest.
    ///
    /// With `preserve_style` the new paragraph inherits the block style
    /// and continues the paragraph type (the next list number, say).
    pub fn slice(
        &mut self,
        index: usize,
        from_span: SpanId,
        preserve_style: bool,
    ) -> Result<RichParagraph> {
        let len = self.text_len();
        let invalid = Error::InvalidOffset { offset: index, len };
        if index > len {
            return Err(invalid);
        }
        self.update_text_ranges();
        let root = self.root_of(from_span).ok_or(invalid.clone())?;
        let range = self.spans[root.0].text_range;
        if index < range.start || index > range.end {
            return Err(invalid);
        }

        let (before, after) = split_nodes(self.to_nodes(), index, &mut 0);
        self.set_nodes(before);
        let mut new_paragraph = self.next_paragraph(preserve_style);
        new_paragraph.set_nodes(after);
        Ok(new_paragraph)
    }

    /// An empty paragraph to follow this one.
    pub(crate) fn next_paragraph(&self, preserve_style: bool) -> RichParagraph {
        let mut next = match preserve_style {
            true => RichParagraph::new(self.paragraph_type.next())
                .with_block_style(self.block_style.clone()),
            false => RichParagraph::default(),
        };
        next.id = self.id;
        next
    }

    /// A deep copy sharing no spans with `self`.
    pub fn copy(&self) -> RichParagraph {
        let mut copy = RichParagraph::new(self.paragraph_type.clone())
            .with_block_style(self.block_style.clone());
        copy.id = self.id;
        copy.set_nodes(self.to_nodes());
        copy
    }

    /// Point every span's owning-paragraph link at `paragraph`.
    pub fn update_children_paragraph(&mut self, paragraph: ParagraphId) {
        self.id = paragraph;
        for span in &mut self.spans {
            span.paragraph = paragraph;
        }
    }

    /// Recompute every span's cached text range.
    pub(crate) fn update_text_ranges(&mut self) {
        let mut pos = 0;
        for id in self.children.clone() {
            pos = self.assign_range(id, pos);
        }
    }

    fn assign_range(&mut self, id: SpanId, start: usize) -> usize {
        let Some(span) = self.spans.get(id.0) else {
            return start;
        };
        let mut pos = start + span.text.chars().count();
        for child in span.children.clone() {
            pos = self.assign_range(child, pos);
        }
        self.spans[id.0].text_range = TextRange::new(start, pos);
        pos
    }

    fn root_of(&self, id: SpanId) -> Option<SpanId> {
        let mut current = id;
        let mut steps = 0;
        while let Some(parent) = self.span(current)?.parent {
            current = parent;
            steps += 1;
            if steps > self.spans.len() {
                return None;
            }
        }
        self.children.contains(&current).then_some(current)
    }

    /// Collapse wrappers, merge equal neighbours and drop detached spans.
    pub(crate) fn normalize(&mut self) {
        let nodes = normalize_nodes(self.to_nodes());
        self.set_nodes(nodes);
    }

    fn node(&self, id: SpanId) -> Option<SpanNode> {
        let span = self.span(id)?;
        Some(SpanNode {
            text: span.text.clone(),
            style: span.style.clone(),
            variant: span.variant.clone(),
            children: span.children.iter().filter_map(|c| self.node(*c)).collect(),
        })
    }

    pub(crate) fn to_nodes(&self) -> Vec<SpanNode> {
        self.children.iter().filter_map(|id| self.node(*id)).collect()
    }

    pub(crate) fn set_nodes(&mut self, nodes: Vec<SpanNode>) {
        self.spans.clear();
        self.children.clear();
        for node in nodes {
            self.push_node(node, None);
        }
        self.update_text_ranges();
    }

    fn push_node(&mut self, node: SpanNode, parent: Option<SpanId>) {
        let id = SpanId(self.spans.len());
        self.spans.push(RichSpan {
            text: node.text,
            style: node.style,
            variant: node.variant,
            children: Vec::new(),
            parent,
            paragraph: self.id,
            text_range: TextRange::default(),
        });
        match parent {
            Some(parent) => self.spans[parent.0].children.push(id),
            None => self.children.push(id),
        }
        for child in node.children {
            self.push_node(child, Some(id));
        }
    }

    /// The span forest without empty spans, for structural comparison.
    pub(crate) fn shape(&self) -> Vec<SpanNode> {
        prune_empty(self.to_nodes())
    }

    /// True when any span, reachable or not, is an image.
    pub fn has_image(&self) -> bool {
        self.spans
            .iter()
            .any(|span| matches!(span.variant, SpanVariant::Image(_)))
    }
}

/// Paragraphs are equal when their type, block style and visible spans
/// are. Cached text ranges and empty spans are not compared.
impl PartialEq for RichParagraph {
    fn eq(&self, other: &Self) -> bool {
        self.paragraph_type == other.paragraph_type
            && self.block_style == other.block_style
            && self.shape() == other.shape()
    }
}
