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

//! Lexical layer for Kaplang.
//!
//! - [`span`] - source positions and spans for entities, errors and diagnostics
//! - [`tokenizer`] - the fault-tolerant tokenizer used by editor tooling
//! - [`literal`] - string and scalar literal scanning shared with the parser
//!
//! The cursor that drives both the tokenizer and the grammar parser is
//! crate-private; only the identifier predicates are exported.

pub(crate) mod cursor;
pub mod literal;
pub mod span;
pub mod tokenizer;

pub use cursor::{is_identifier_char, is_identifier_start, is_valid_identifier};
pub use literal::{quote, Literal};
pub use span::{SourcePos, Span};
pub use tokenizer::{declared_names, tokenize, Token, TokenKind, KEYWORDS};
