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

//! Permissive tokenizer for editor tooling.
//!
//! Unlike the grammar parser, the tokenizer never fails. Every character of
//! the input ends up in exactly one token, so concatenating the token values
//! reproduces the source. Identifiers are classified from their immediate
//! neighbourhood, which keeps classification useful on truncated or
//! unbalanced input while the user is still typing.
//!
//! # Examples
//!
//! ```
//! use kaplang_core::lex::{tokenize, TokenKind};
//!
//! let tokens = tokenize("enum Color {");
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     vec![
//!         TokenKind::Keyword,
//!         TokenKind::Whitespace,
//!         TokenKind::EnumName,
//!         TokenKind::Whitespace,
//!         TokenKind::SpecialStart,
//!     ]
//! );
//! ```

use std::fmt;

use crate::lex::cursor::{is_identifier_char, Cursor};

/// Reserved words of the language.
pub const KEYWORDS: &[&str] = &["enum"];

/// Classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TokenKind {
    Whitespace,
    Comment,
    Id,
    Keyword,
    AnnotationType,
    String,
    MethodName,
    ReturnType,
    EnumName,
    DatatypeName,
    SpecialStart,
    SpecialEnd,
    SpecialColon,
    SpecialOther,
}

impl TokenKind {
    /// Snake-case name used by editor integrations.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Whitespace => "whitespace",
            Self::Comment => "comment",
            Self::Id => "id",
            Self::Keyword => "keyword",
            Self::AnnotationType => "annotation_type",
            Self::String => "string",
            Self::MethodName => "method_name",
            Self::ReturnType => "return_type",
            Self::EnumName => "enum_name",
            Self::DatatypeName => "datatype_name",
            Self::SpecialStart => "special_start",
            Self::SpecialEnd => "special_end",
            Self::SpecialColon => "special_colon",
            Self::SpecialOther => "special_other",
        }
    }

    /// Whitespace and comments carry no syntax.
    pub fn is_trivia(&self) -> bool {
        matches!(self, Self::Whitespace | Self::Comment)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified slice of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: TokenKind,
    pub value: String,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// Splits `text` into classified tokens. Never fails.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut cursor = Cursor::new(text);
    let mut tokens: Vec<Token> = Vec::new();
    // Index of the last non-trivia token, used for left-context rules.
    let mut last_significant: Option<usize> = None;

    while let Some(ch) = cursor.peek() {
        let start = cursor.offset();
        let kind = if ch.is_whitespace() {
            cursor.eat_while(char::is_whitespace);
            TokenKind::Whitespace
        } else if cursor.at_comment() {
            cursor.eat_while(|c| c != '\n');
            TokenKind::Comment
        } else if ch == '@' {
            cursor.bump();
            cursor.eat_while(is_identifier_char);
            TokenKind::AnnotationType
        } else if ch == '"' || ch == '\'' {
            scan_string(&mut cursor, ch);
            TokenKind::String
        } else if is_identifier_char(ch) {
            let word = cursor.eat_while(is_identifier_char);
            let previous = last_significant.map(|i| &tokens[i]);
            classify_word(word, previous, cursor.peek_past_whitespace())
        } else {
            cursor.bump();
            match ch {
                '{' => TokenKind::SpecialStart,
                '}' => TokenKind::SpecialEnd,
                ':' => TokenKind::SpecialColon,
                _ => TokenKind::SpecialOther,
            }
        };

        if !kind.is_trivia() {
            last_significant = Some(tokens.len());
        }
        tokens.push(Token::new(kind, cursor.slice(start)));
    }

    tokens
}

/// Names of data types and enums declared in `text`, in declaration order.
///
/// Works on incomplete input, which makes it suitable for completion lists
/// while the buffer does not parse.
///
/// ```
/// use kaplang_core::lex::declared_names;
///
/// let names = declared_names("User {\n\tid: string\n}\nenum Role {\n\tADMIN,");
/// assert_eq!(names, vec!["User".to_string(), "Role".to_string()]);
/// ```
pub fn declared_names(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for token in tokenize(text) {
        if matches!(token.kind, TokenKind::DatatypeName | TokenKind::EnumName)
            && !names.contains(&token.value)
        {
            names.push(token.value);
        }
    }
    names
}

fn classify_word(word: &str, previous: Option<&Token>, next: Option<char>) -> TokenKind {
    if KEYWORDS.contains(&word) {
        return TokenKind::Keyword;
    }
    if next == Some('(') {
        return TokenKind::MethodName;
    }
    match previous {
        Some(prev) if prev.kind == TokenKind::Keyword && prev.value == "enum" => {
            TokenKind::EnumName
        }
        _ if next == Some('{') => TokenKind::DatatypeName,
        Some(prev) if prev.kind == TokenKind::SpecialColon => TokenKind::ReturnType,
        _ => TokenKind::Id,
    }
}

/// Consumes a quoted string. Unterminated strings stop at end of line.
fn scan_string(cursor: &mut Cursor<'_>, quote: char) {
    cursor.bump();
    while let Some(ch) = cursor.peek() {
        match ch {
            '\n' => break,
            '\\' => {
                cursor.bump();
                if cursor.peek().is_some_and(|c| c != '\n') {
                    cursor.bump();
                }
            }
            _ => {
                cursor.bump();
                if ch == quote {
                    break;
                }
            }
        }
    }
}
