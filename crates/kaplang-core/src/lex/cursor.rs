// Dweve Kaplang - Type and Method Definition Language
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Character cursor shared by the tokenizer and the grammar parser.

use crate::lex::span::{SourcePos, Span};

/// Returns `true` if `ch` may start an identifier: `[A-Za-z_]`.
#[inline]
pub fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

/// Returns `true` if `ch` may continue an identifier: `[A-Za-z0-9_]`.
#[inline]
pub fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Checks if a whole string is a valid identifier.
///
/// ```
/// use kaplang_core::lex::is_valid_identifier;
///
/// assert!(is_valid_identifier("User"));
/// assert!(is_valid_identifier("_id2"));
/// assert!(!is_valid_identifier("2fast"));
/// assert!(!is_valid_identifier("my-type"));
/// ```
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if is_identifier_start(first) => chars.all(is_identifier_char),
        _ => false,
    }
}

/// Forward-only cursor over source text tracking byte offset and position.
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    src: &'a str,
    offset: usize,
    pos: SourcePos,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Self {
            src,
            offset: 0,
            pos: SourcePos::start(),
        }
    }

    #[inline]
    pub(crate) fn pos(&self) -> SourcePos {
        self.pos
    }

    #[inline]
    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.offset >= self.src.len()
    }

    #[inline]
    pub(crate) fn rest(&self) -> &'a str {
        &self.src[self.offset..]
    }

    #[inline]
    pub(crate) fn slice(&self, from: usize) -> &'a str {
        &self.src[from..self.offset]
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    #[inline]
    pub(crate) fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    /// Span from `start` to the current position.
    #[inline]
    pub(crate) fn span_from(&self, start: SourcePos) -> Span {
        Span::new(start, self.pos)
    }

    /// Span covering the next character, or a point at end of input.
    pub(crate) fn next_char_span(&self) -> Span {
        let mut end = self.pos;
        if let Some(ch) = self.peek() {
            end.advance(ch);
        }
        Span::new(self.pos, end)
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.offset += ch.len_utf8();
        self.pos.advance(ch);
        Some(ch)
    }

    pub(crate) fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    pub(crate) fn eat_str(&mut self, expected: &str) -> bool {
        if !self.starts_with(expected) {
            return false;
        }
        for _ in expected.chars() {
            self.bump();
        }
        true
    }

    /// Consumes characters while `pred` holds and returns them.
    pub(crate) fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) -> &'a str {
        let start = self.offset;
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.bump();
        }
        self.slice(start)
    }

    /// Consumes an identifier if one starts here.
    pub(crate) fn identifier(&mut self) -> Option<&'a str> {
        match self.peek() {
            Some(ch) if is_identifier_start(ch) => Some(self.eat_while(is_identifier_char)),
            _ => None,
        }
    }

    /// First character after any whitespace, without consuming anything.
    pub(crate) fn peek_past_whitespace(&self) -> Option<char> {
        self.rest().chars().find(|c| !c.is_whitespace())
    }

    /// Returns `true` if a `#` or `//` comment starts here.
    pub(crate) fn at_comment(&self) -> bool {
        self.starts_with("#") || self.starts_with("//")
    }
}
