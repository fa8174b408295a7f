// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use tracing::debug;

use crate::codec::{html, markdown};
use crate::config::RichTextConfig;
use crate::error::Result;
use crate::model::RichDocument;
use crate::style::ParagraphStyle;

/// One editing session: a document together with the configuration it
/// is displayed with.
///
/// The state is not shared; whoever owns it serializes access to it.
#[derive(Clone, Debug, Default)]
pub struct RichTextState {
    document: RichDocument,
    config: RichTextConfig,
}

impl RichTextState {
    pub fn new(config: RichTextConfig) -> Self {
        Self {
            document: RichDocument::new(),
            config,
        }
    }

    pub fn from_html(html: &str, config: RichTextConfig) -> Result<Self> {
        Ok(Self {
            document: html::encode(html)?,
            config,
        })
    }

    pub fn from_markdown(markdown: &str, config: RichTextConfig) -> Self {
        Self {
            document: markdown::encode(markdown),
            config,
        }
    }

    /// Replace the whole document. On error the current document is kept.
    pub fn set_html(&mut self, html: &str) -> Result<()> {
        self.document = html::encode(html)?;
        debug!(paragraphs = self.document.len(), "document replaced");
        Ok(())
    }

    pub fn set_markdown(&mut self, markdown: &str) {
        self.document = markdown::encode(markdown);
        debug!(paragraphs = self.document.len(), "document replaced");
    }

    pub fn to_html(&self) -> String {
        html::decode(&self.document)
    }

    pub fn to_markdown(&self) -> String {
        markdown::decode(&self.document)
    }

    /// Plain text, list markers included.
    pub fn to_text(&self) -> String {
        self.document.to_text(&self.config)
    }

    pub fn document(&self) -> &RichDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut RichDocument {
        &mut self.document
    }

    pub fn config(&self) -> &RichTextConfig {
        &self.config
    }

    /// Stored styles never depend on the configuration, so nothing has to
    /// be recomputed here; readers resolve them on demand.
    pub fn set_config(&mut self, config: RichTextConfig) {
        self.config = config;
    }

    /// Block style of paragraph `index` as displayed under the current
    /// configuration.
    pub fn block_style(&self, index: usize) -> Option<ParagraphStyle> {
        self.document.resolved_block_style(index, &self.config)
    }
}
