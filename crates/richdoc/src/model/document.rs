// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use tracing::trace;

use super::{ParagraphId, RichParagraph, SpanId, TextRange};
use crate::config::RichTextConfig;
use crate::error::{Error, Result};
use crate::paragraph_type::{ConfigurableListLevel, ParagraphType};
use crate::style::ParagraphStyle;

/// An ordered list of paragraphs.
///
/// Document-wide offsets count each paragraph's list marker and one
/// separator between consecutive paragraphs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RichDocument {
    paragraphs: Vec<RichParagraph>,
}

impl RichDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_paragraphs(paragraphs: Vec<RichParagraph>) -> Self {
        let mut document = Self { paragraphs };
        document.reindex();
        document
    }

    pub fn paragraphs(&self) -> &[RichParagraph] {
        &self.paragraphs
    }

    pub fn paragraph(&self, index: usize) -> Option<&RichParagraph> {
        self.paragraphs.get(index)
    }

    pub fn paragraph_mut(&mut self, index: usize) -> Option<&mut RichParagraph> {
        self.paragraphs.get_mut(index)
    }

    pub fn push(&mut self, mut paragraph: RichParagraph) {
        paragraph.update_children_paragraph(ParagraphId(self.paragraphs.len()));
        self.paragraphs.push(paragraph);
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    pub fn into_paragraphs(self) -> Vec<RichParagraph> {
        self.paragraphs
    }

    fn reindex(&mut self) {
        for (index, paragraph) in self.paragraphs.iter_mut().enumerate() {
            paragraph.update_children_paragraph(ParagraphId(index));
        }
    }

    /// Renumber ordered list items so every run counts up by one from its
    /// first item. A run continues across deeper nested items and ends at
    /// a shallower item, an unordered item of the same level or any
    /// paragraph outside a list.
    pub fn normalize_list_numbers(&mut self) {
        // Last number seen at each level, indexed by level.
        let mut counters: Vec<Option<usize>> = Vec::new();
        for paragraph in &mut self.paragraphs {
            match &mut paragraph.paragraph_type {
                ParagraphType::OrderedListItem(list) => {
                    let level = list.level();
                    counters.resize(level + 1, None);
                    if let Some(previous) = counters[level] {
                        list.number = previous + 1;
                    }
                    counters[level] = Some(list.number);
                }
                ParagraphType::UnorderedListItem(list) => {
                    counters.truncate(list.level());
                }
                ParagraphType::Plain | ParagraphType::Heading(_) => {
                    counters.clear();
                }
            }
        }
    }

    /// The block style a paragraph is displayed with: the style implied
    /// by its type under `config`, overridden by its own block style.
    pub fn resolved_block_style(
        &self,
        index: usize,
        config: &RichTextConfig,
    ) -> Option<ParagraphStyle> {
        let paragraph = self.paragraphs.get(index)?;
        Some(
            paragraph
                .paragraph_type
                .block_style(config)
                .merge(&paragraph.block_style),
        )
    }

    /// Plain text with list markers, one line per paragraph.
    pub fn to_text(&self, config: &RichTextConfig) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.paragraph_type.marker_text(config) + &p.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Split paragraph `paragraph_index` at the paragraph-relative
    /// character offset `text_index`, inserting the tail right after it.
    pub fn slice_paragraph(
        &mut self,
        paragraph_index: usize,
        text_index: usize,
        preserve_style: bool,
    ) -> Result<()> {
        let len = self.paragraphs.len();
        let paragraph = self.paragraphs.get_mut(paragraph_index).ok_or(
            Error::InvalidOffset {
                offset: paragraph_index,
                len,
            },
        )?;
        let (_, span) = paragraph.get_rich_span_by_text_index(text_index, 0);
        let tail = match span.or_else(|| paragraph.children().first().copied()) {
            Some(from_span) => {
                paragraph.slice(text_index, from_span, preserve_style)?
            }
            None if text_index == 0 => {
                paragraph.next_paragraph(preserve_style)
            }
            None => {
                return Err(Error::InvalidOffset {
                    offset: text_index,
                    len: 0,
                })
            }
        };
        trace!(paragraph_index, text_index, "sliced paragraph");
        self.paragraphs.insert(paragraph_index + 1, tail);
        self.reindex();
        Ok(())
    }

    /// Document offsets at which each paragraph's text starts.
    fn text_offsets(&self, config: &RichTextConfig) -> Vec<usize> {
        let mut offsets = Vec::with_capacity(self.paragraphs.len());
        let mut offset = 0;
        for paragraph in &self.paragraphs {
            offset += paragraph.paragraph_type.marker_text(config).chars().count();
            offsets.push(offset);
            offset += paragraph.text_len() + 1;
        }
        offsets
    }

    /// The span at a document-wide character offset.
    pub fn rich_span_at(
        &self,
        text_index: usize,
        config: &RichTextConfig,
    ) -> Option<(usize, SpanId)> {
        self.paragraphs
            .iter()
            .zip(self.text_offsets(config))
            .enumerate()
            .find_map(|(index, (paragraph, offset))| {
                let (_, span) =
                    paragraph.get_rich_span_by_text_index(text_index, offset);
                span.map(|span| (index, span))
            })
    }

    /// Every span overlapping a document-wide range, as
    /// `(paragraph index, span)` pairs.
    pub fn rich_spans_in_range(
        &self,
        range: TextRange,
        config: &RichTextConfig,
    ) -> Vec<(usize, SpanId)> {
        self.paragraphs
            .iter()
            .zip(self.text_offsets(config))
            .enumerate()
            .flat_map(|(index, (paragraph, offset))| {
                let (_, spans) =
                    paragraph.get_rich_span_list_by_text_range(range, offset);
                spans.into_iter().map(move |span| (index, span))
            })
            .collect()
    }
}
