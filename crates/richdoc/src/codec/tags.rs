// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! The finite set of tags the codecs know about, and what each one means
//! to the tree builder.

use strum_macros::EnumString;

use crate::paragraph_type::HeadingLevel;
use crate::style::{heading_span_profile, InlineFormat, SpanStyle};

#[derive(Clone, Debug, PartialEq, Eq, Hash, EnumString)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum HtmlTag {
    // Document structure
    Html,
    Body,
    Head,
    Title,
    Style,
    Script,
    Meta,
    Link,
    Noscript,
    Template,
    Textarea,
    Base,

    // Lists
    Ul,
    Ol,
    Li,

    // Blocks
    P,
    Div,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Address,
    Article,
    Aside,
    Blockquote,
    Dd,
    Dl,
    Dt,
    Fieldset,
    Figcaption,
    Figure,
    Footer,
    Form,
    Header,
    Hr,
    Main,
    Nav,
    Pre,
    Section,
    Table,

    // Line break
    Br,

    // Inline
    A,
    Code,
    #[strum(serialize = "code-span")]
    CodeSpan,
    Img,
    B,
    Strong,
    I,
    Em,
    U,
    Ins,
    S,
    Strike,
    Del,
    Sub,
    Sup,
    Mark,
    Small,
    Span,

    // Other void elements
    Area,
    Col,
    Embed,
    Input,
    Source,
    Track,
    Wbr,

    #[strum(default)]
    Other(String),
}

/// How the tree builder treats a tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TagKind {
    /// The tag and everything inside it is ignored.
    Skipped,
    /// The tag itself is ignored, its content is not.
    Transparent,
    /// `ul`/`ol`: only tracks list nesting.
    ListContainer,
    /// Starts a paragraph.
    Block,
    LineBreak,
    Inline,
}

impl HtmlTag {
    pub fn parse(name: &str) -> Self {
        let name = name.to_ascii_lowercase();
        name.parse().unwrap_or(HtmlTag::Other(name))
    }

    pub fn kind(&self) -> TagKind {
        use HtmlTag::*;
        match self {
            Head | Title | Style | Script | Meta | Link | Noscript | Template
            | Textarea | Base => TagKind::Skipped,
            Html | Body => TagKind::Transparent,
            Ul | Ol => TagKind::ListContainer,
            P | Div | H1 | H2 | H3 | H4 | H5 | H6 | Li | Address | Article
            | Aside | Blockquote | Dd | Dl | Dt | Fieldset | Figcaption
            | Figure | Footer | Form | Header | Hr | Main | Nav | Pre
            | Section | Table => TagKind::Block,
            Br => TagKind::LineBreak,
            _ => TagKind::Inline,
        }
    }

    /// Elements that never have content or a closing tag.
    pub fn is_void(&self) -> bool {
        use HtmlTag::*;
        matches!(
            self,
            Area | Base | Br | Col | Embed | Hr | Img | Input | Link | Meta
                | Source | Track | Wbr
        )
    }

    /// Elements whose content is raw text rather than markup.
    pub fn is_raw_text(&self) -> bool {
        use HtmlTag::*;
        matches!(self, Style | Script | Title | Textarea)
    }

    pub fn heading_level(&self) -> Option<HeadingLevel> {
        match self {
            HtmlTag::H1 => Some(HeadingLevel::H1),
            HtmlTag::H2 => Some(HeadingLevel::H2),
            HtmlTag::H3 => Some(HeadingLevel::H3),
            HtmlTag::H4 => Some(HeadingLevel::H4),
            HtmlTag::H5 => Some(HeadingLevel::H5),
            HtmlTag::H6 => Some(HeadingLevel::H6),
            _ => None,
        }
    }

    pub fn inline_format(&self) -> Option<InlineFormat> {
        use HtmlTag::*;
        match self {
            B | Strong => Some(InlineFormat::Bold),
            I | Em => Some(InlineFormat::Italic),
            U | Ins => Some(InlineFormat::Underline),
            S | Strike | Del => Some(InlineFormat::Strikethrough),
            Sub => Some(InlineFormat::Subscript),
            Sup => Some(InlineFormat::Superscript),
            Mark => Some(InlineFormat::Mark),
            Small => Some(InlineFormat::Small),
            _ => None,
        }
    }

    /// Inline style the tag implies for the span it opens.
    pub fn intrinsic_span_style(&self) -> SpanStyle {
        if let Some(level) = self.heading_level() {
            heading_span_profile(level)
        } else if let Some(format) = self.inline_format() {
            format.style()
        } else {
            SpanStyle::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(HtmlTag::parse("STRONG"), HtmlTag::Strong);
        assert_eq!(HtmlTag::parse("code-span"), HtmlTag::CodeSpan);
        assert_eq!(HtmlTag::parse("h3"), HtmlTag::H3);
    }

    #[test]
    fn unknown_tags_fall_back_to_inline() {
        let tag = HtmlTag::parse("font");
        assert_eq!(tag, HtmlTag::Other("font".into()));
        assert_eq!(tag.kind(), TagKind::Inline);
        assert!(tag.intrinsic_span_style().is_empty());
    }

    #[test]
    fn aliases_share_a_format() {
        assert_eq!(HtmlTag::Em.inline_format(), HtmlTag::I.inline_format());
        assert_eq!(HtmlTag::Del.inline_format(), Some(InlineFormat::Strikethrough));
        assert_eq!(HtmlTag::Ins.inline_format(), Some(InlineFormat::Underline));
    }

    #[test]
    fn kinds() {
        assert_eq!(HtmlTag::Li.kind(), TagKind::Block);
        assert_eq!(HtmlTag::Ol.kind(), TagKind::ListContainer);
        assert_eq!(HtmlTag::Script.kind(), TagKind::Skipped);
        assert_eq!(HtmlTag::Br.kind(), TagKind::LineBreak);
        assert!(HtmlTag::Img.is_void());
        assert!(!HtmlTag::Span.is_void());
        assert!(HtmlTag::Textarea.is_raw_text());
    }
}
