// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    /// A slice or range query referred to a position outside the
    /// paragraph (or document) it was applied to.
    #[error("offset {offset} is outside the valid range 0..={len}")]
    InvalidOffset { offset: usize, len: usize },

    /// The tokenizer rejected the input.
    #[error("malformed markup: {}", parse_errors.join("; "))]
    MalformedMarkup { parse_errors: Vec<String> },

    #[error(
        "an image needs at least one finite, non-negative width or height"
    )]
    UnsupportedImageDimensions,
}
