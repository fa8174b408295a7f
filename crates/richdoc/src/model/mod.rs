// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! The paragraph and span tree.

mod document;
mod rich_paragraph;
mod rich_span;
mod span_variant;
mod text_range;
mod to_tree;

pub use document::RichDocument;
pub use rich_paragraph::RichParagraph;
pub use rich_span::{ParagraphId, RichSpan, SpanId};
pub use span_variant::{CodeSpan, ImageSpan, LinkSpan, SpanVariant};
pub use text_range::TextRange;
pub use to_tree::ToTree;
