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

//! Source positions and spans.
//!
//! Every parsed entity and every error or diagnostic carries a [`Span`]
//! made of two 1-based [`SourcePos`] values, so editor tooling can map
//! results straight back onto the buffer.
//!
//! # Examples
//!
//! ```
//! use kaplang_core::lex::{SourcePos, Span};
//!
//! let span = Span::new(SourcePos::new(2, 1), SourcePos::new(2, 14));
//! assert!(span.is_single_line());
//! assert!(span.contains(SourcePos::new(2, 5)));
//! ```

use std::fmt;

/// A 1-based line/column position in DSL source text.
///
/// Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourcePos {
    line: usize,
    column: usize,
}

impl SourcePos {
    /// Creates a new source position.
    #[inline]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// The first character of a document (line 1, column 1).
    #[inline]
    pub const fn start() -> Self {
        Self { line: 1, column: 1 }
    }

    /// Returns the line number.
    #[inline]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Returns the column number.
    #[inline]
    pub const fn column(&self) -> usize {
        self.column
    }

    /// Moves the position past `ch`.
    #[inline]
    pub fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A half-open range `[start, end)` of source positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    start: SourcePos,
    end: SourcePos,
}

impl Span {
    /// Creates a new span from start and end positions.
    #[inline]
    pub const fn new(start: SourcePos, end: SourcePos) -> Self {
        Self { start, end }
    }

    /// Creates a zero-width span at a single position.
    #[inline]
    pub const fn point(pos: SourcePos) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Start position (inclusive).
    #[inline]
    pub const fn start(&self) -> SourcePos {
        self.start
    }

    /// End position (exclusive).
    #[inline]
    pub const fn end(&self) -> SourcePos {
        self.end
    }

    /// Checks if this span is on a single line.
    #[inline]
    pub const fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }

    /// Returns `true` when `pos` falls inside the span.
    ///
    /// A zero-width span contains its own position.
    pub fn contains(&self, pos: SourcePos) -> bool {
        if self.start == self.end {
            return pos == self.start;
        }
        self.start <= pos && pos < self.end
    }

    /// Smallest span covering both `self` and `other`.
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_line() {
            write!(
                f,
                "{}:{}-{}",
                self.start.line, self.start.column, self.end.column
            )
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_columns_and_lines() {
        let mut pos = SourcePos::start();
        pos.advance('a');
        pos.advance('b');
        assert_eq!(pos, SourcePos::new(1, 3));
        pos.advance('\n');
        assert_eq!(pos, SourcePos::new(2, 1));
    }

    #[test]
    fn test_position_ordering_is_line_major() {
        assert!(SourcePos::new(1, 40) < SourcePos::new(2, 1));
        assert!(SourcePos::new(3, 2) < SourcePos::new(3, 5));
    }

    #[test]
    fn test_contains() {
        let span = Span::new(SourcePos::new(1, 5), SourcePos::new(2, 3));
        assert!(span.contains(SourcePos::new(1, 5)));
        assert!(span.contains(SourcePos::new(1, 99)));
        assert!(span.contains(SourcePos::new(2, 2)));
        assert!(!span.contains(SourcePos::new(2, 3)));
        assert!(!span.contains(SourcePos::new(1, 4)));
    }

    #[test]
    fn test_point_contains_itself() {
        let pos = SourcePos::new(4, 4);
        assert!(Span::point(pos).contains(pos));
    }

    #[test]
    fn test_merge() {
        let a = Span::new(SourcePos::new(1, 5), SourcePos::new(2, 10));
        let b = Span::new(SourcePos::new(3, 1), SourcePos::new(4, 5));
        let merged = a.merge(b);
        assert_eq!(merged.start(), SourcePos::new(1, 5));
        assert_eq!(merged.end(), SourcePos::new(4, 5));
    }

    #[test]
    fn test_display() {
        let single = Span::new(SourcePos::new(5, 10), SourcePos::new(5, 20));
        assert_eq!(single.to_string(), "5:10-20");
        let multi = Span::new(SourcePos::new(5, 10), SourcePos::new(7, 5));
        assert_eq!(multi.to_string(), "line 5, column 10-line 7, column 5");
    }
}
