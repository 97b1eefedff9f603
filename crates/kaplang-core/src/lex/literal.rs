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

//! Literal scanning and quoting.
//!
//! Literals appear as annotation arguments (`@Header("X-Id")`), annotation
//! options (`@Query(optional = true)`) and property defaults
//! (`age: integer = 18`). Strings use JSON escapes and may be delimited by
//! either double or single quotes.

use crate::lex::cursor::{is_identifier_char, Cursor};

/// A scanned literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Decoded string contents.
    String(String),
    /// Number in its source spelling.
    Number(String),
    Bool(bool),
    Null,
}

impl Literal {
    /// The literal as a plain string: decoded contents for strings, source
    /// spelling for everything else.
    pub fn into_value(self) -> String {
        match self {
            Literal::String(s) | Literal::Number(s) => s,
            Literal::Bool(b) => b.to_string(),
            Literal::Null => "null".to_string(),
        }
    }
}

/// Why a literal could not be scanned. The cursor is left on the offending
/// character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LiteralFailure {
    /// Nothing literal-like starts here.
    Missing,
    /// A string reached end of line or input before its closing quote.
    Unterminated(char),
    /// Malformed escape sequence.
    BadEscape,
    /// A digit was required.
    BadNumber,
}

/// Scans one literal at the cursor.
pub(crate) fn scan_literal(cursor: &mut Cursor<'_>) -> Result<Literal, LiteralFailure> {
    match cursor.peek() {
        Some(q @ ('"' | '\'')) => scan_string(cursor, q).map(Literal::String),
        Some(c) if c == '-' || c.is_ascii_digit() => scan_number(cursor).map(Literal::Number),
        Some(_) => {
            let rest = cursor.rest();
            for (word, literal) in [
                ("true", Literal::Bool(true)),
                ("false", Literal::Bool(false)),
                ("null", Literal::Null),
            ] {
                if !rest.starts_with(word) {
                    continue;
                }
                let boundary = rest[word.len()..]
                    .chars()
                    .next()
                    .map_or(true, |c| !is_identifier_char(c));
                if boundary {
                    cursor.eat_str(word);
                    return Ok(literal);
                }
            }
            Err(LiteralFailure::Missing)
        }
        None => Err(LiteralFailure::Missing),
    }
}

fn scan_string(cursor: &mut Cursor<'_>, quote: char) -> Result<String, LiteralFailure> {
    cursor.bump();
    let mut out = String::new();
    loop {
        match cursor.peek() {
            None | Some('\n') => return Err(LiteralFailure::Unterminated(quote)),
            Some(c) if c == quote => {
                cursor.bump();
                return Ok(out);
            }
            Some('\\') => {
                cursor.bump();
                let escaped = match cursor.peek() {
                    Some('n') => '\n',
                    Some('t') => '\t',
                    Some('r') => '\r',
                    Some('b') => '\u{8}',
                    Some('f') => '\u{c}',
                    Some('u') => {
                        cursor.bump();
                        out.push(scan_unicode_escape(cursor)?);
                        continue;
                    }
                    Some(c @ ('"' | '\'' | '\\' | '/')) => c,
                    _ => return Err(LiteralFailure::BadEscape),
                };
                cursor.bump();
                out.push(escaped);
            }
            Some(c) => {
                cursor.bump();
                out.push(c);
            }
        }
    }
}

fn scan_unicode_escape(cursor: &mut Cursor<'_>) -> Result<char, LiteralFailure> {
    let mut code = 0u32;
    for _ in 0..4 {
        let digit = cursor
            .peek()
            .and_then(|c| c.to_digit(16))
            .ok_or(LiteralFailure::BadEscape)?;
        cursor.bump();
        code = code * 16 + digit;
    }
    char::from_u32(code).ok_or(LiteralFailure::BadEscape)
}

fn scan_number(cursor: &mut Cursor<'_>) -> Result<String, LiteralFailure> {
    let start = cursor.offset();
    cursor.eat('-');
    if cursor.eat_while(|c| c.is_ascii_digit()).is_empty() {
        return Err(LiteralFailure::BadNumber);
    }
    if cursor.peek() == Some('.') && cursor.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) {
        cursor.bump();
        cursor.eat_while(|c| c.is_ascii_digit());
    }
    if matches!(cursor.peek(), Some('e' | 'E')) {
        cursor.bump();
        if !cursor.eat('+') {
            cursor.eat('-');
        }
        if cursor.eat_while(|c| c.is_ascii_digit()).is_empty() {
            return Err(LiteralFailure::BadNumber);
        }
    }
    Ok(cursor.slice(start).to_string())
}

/// Encodes `s` as a double-quoted string literal with JSON escapes.
///
/// ```
/// use kaplang_core::lex::quote;
///
/// assert_eq!(quote("My-Header"), "\"My-Header\"");
/// assert_eq!(quote("a\"b\n"), "\"a\\\"b\\n\"");
/// ```
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
