// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Conversion between markup and [`crate::RichDocument`].
//!
//! Both front-ends reduce their input to open-tag, close-tag and text
//! events for the shared tree builder.

mod builder;
pub mod html;
pub mod markdown;
mod tags;
