// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Markdown codec. Parsing never fails: anything pulldown-cmark accepts
//! becomes a document.

mod decode;
mod encode;

pub use decode::decode;
pub use encode::encode;
