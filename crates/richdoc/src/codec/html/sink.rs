// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::cell::RefCell;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer,
    TokenizerOpts, TokenizerResult,
};
use tracing::warn;

use crate::codec::builder::TreeBuilder;
use crate::codec::tags::HtmlTag;
use crate::error::{Error, Result};
use crate::model::RichDocument;

#[derive(Default)]
struct SinkState {
    builder: TreeBuilder,
    parse_errors: Vec<String>,
}

/// Token sink feeding html5ever's tokenizer output to a [`TreeBuilder`].
pub(crate) struct BuilderSink {
    state: RefCell<SinkState>,
}

impl Default for BuilderSink {
    fn default() -> Self {
        Self {
            state: RefCell::new(SinkState::default()),
        }
    }
}

impl BuilderSink {
    pub fn parse(html: &str) -> Result<RichDocument> {
        let tokenizer =
            Tokenizer::new(BuilderSink::default(), TokenizerOpts::default());
        let input = BufferQueue::default();
        input.push_back(StrTendril::from_slice(html));
        // Resume after a script pause; this sink never requests one.
        while let TokenizerResult::Script(()) = tokenizer.feed(&input) {}
        tokenizer.end();

        let state = std::mem::take(&mut *tokenizer.sink.state.borrow_mut());
        if state.parse_errors.is_empty() {
            Ok(state.builder.finish())
        } else {
            warn!(errors = ?state.parse_errors, "malformed markup");
            Err(Error::MalformedMarkup {
                parse_errors: state.parse_errors,
            })
        }
    }
}

impl SinkState {
    fn tag(&mut self, tag: Tag) -> TokenSinkResult<()> {
        let name = HtmlTag::parse(&tag.name);
        match tag.kind {
            TagKind::StartTag => {
                let attrs = tag
                    .attrs
                    .iter()
                    .map(|attr| {
                        (attr.name.local.to_string(), attr.value.to_string())
                    })
                    .collect();
                let raw_kind = match name {
                    HtmlTag::Script => Some(RawKind::ScriptData),
                    HtmlTag::Style => Some(RawKind::Rawtext),
                    HtmlTag::Title | HtmlTag::Textarea => Some(RawKind::Rcdata),
                    _ => None,
                };
                self.builder.open(name.clone(), attrs);
                if tag.self_closing && !name.is_void() {
                    self.builder.close(&name);
                } else if let Some(kind) = raw_kind {
                    return TokenSinkResult::RawData(kind);
                }
            }
            TagKind::EndTag => self.builder.close(&name),
        }
        TokenSinkResult::Continue
    }
}

impl TokenSink for BuilderSink {
    type Handle = ();

    fn process_token(
        &self,
        token: Token,
        _line_number: u64,
    ) -> TokenSinkResult<Self::Handle> {
        let mut state = self.state.borrow_mut();
        match token {
            Token::TagToken(tag) => return state.tag(tag),
            Token::CharacterTokens(text) => state.builder.text(&text),
            Token::ParseError(error) => {
                state.parse_errors.push(error.into_owned())
            }
            _ => {}
        }
        TokenSinkResult::Continue
    }
}
