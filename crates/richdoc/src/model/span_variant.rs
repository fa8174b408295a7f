// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::error::{Error, Result};

/// A special, non-styling role a span can play.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SpanVariant {
    #[default]
    Default,
    Link(LinkSpan),
    Code(CodeSpan),
    Image(ImageSpan),
}

impl SpanVariant {
    pub fn link(url: impl Into<String>) -> Self {
        Self::Link(LinkSpan { url: url.into() })
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }

    /// Whether typing at either edge of the span extends it. When false,
    /// new text goes into an adjacent sibling instead.
    pub fn accept_new_text_in_the_edges(&self) -> bool {
        match self {
            Self::Default | Self::Code(_) => true,
            Self::Link(_) | Self::Image(_) => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkSpan {
    pub url: String,
}

/// Decoration parameters for inline code, in points.
#[derive(Clone, Debug, PartialEq)]
pub struct CodeSpan {
    pub corner_radius: f32,
    pub stroke_width: f32,
    pub padding: f32,
}

impl Default for CodeSpan {
    fn default() -> Self {
        Self {
            corner_radius: 6.0,
            stroke_width: 1.0,
            padding: 2.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImageSpan {
    src: String,
    width: Option<f32>,
    height: Option<f32>,
    alt: Option<String>,
}

impl ImageSpan {
    /// Fails with [`Error::UnsupportedImageDimensions`] unless at least one
    /// of `width` and `height` is finite and non-negative.
    pub fn new(
        src: impl Into<String>,
        width: Option<f32>,
        height: Option<f32>,
        alt: Option<String>,
    ) -> Result<Self> {
        let valid = |d: Option<f32>| d.is_some_and(|d| d.is_finite() && d >= 0.0);
        if !valid(width) && !valid(height) {
            return Err(Error::UnsupportedImageDimensions);
        }
        Ok(Self {
            src: src.into(),
            width: width.filter(|d| d.is_finite() && *d >= 0.0),
            height: height.filter(|d| d.is_finite() && *d >= 0.0),
            alt,
        })
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn width(&self) -> Option<f32> {
        self.width
    }

    pub fn height(&self) -> Option<f32> {
        self.height
    }

    pub fn alt(&self) -> Option<&str> {
        self.alt.as_deref()
    }
}
