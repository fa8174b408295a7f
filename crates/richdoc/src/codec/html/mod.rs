// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! HTML codec.

mod decode;
pub(crate) mod scan;
#[cfg(feature = "sys")]
mod sink;

pub use decode::decode;

use crate::error::Result;
use crate::model::RichDocument;

/// Build a document from HTML markup.
///
/// With the `sys` feature the markup goes through html5ever's tokenizer
/// and lexical errors fail with [`crate::Error::MalformedMarkup`].
/// Without it a lenient scanner is used that never fails.
pub fn encode(html: &str) -> Result<RichDocument> {
    cfg_if::cfg_if! {
        if #[cfg(feature = "sys")] {
            sink::BuilderSink::parse(html)
        } else {
            let mut builder = crate::codec::builder::TreeBuilder::new();
            scan::scan(&mut builder, html);
            Ok(builder.finish())
        }
    }
}
