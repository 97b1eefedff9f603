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

//! Error types for Kaplang parsing.

use std::fmt;
use thiserror::Error;

use crate::diagnostic::Diagnostic;
use crate::lex::Span;

/// The kind of error that stopped a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Grammar violation, or a declaration kind the options do not permit.
    Syntax,
    /// Type resolution, annotation vocabulary, generic arity or REST path
    /// violation raised in strict mode.
    Semantic,
    /// Nesting limit exceeded.
    Security,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax => write!(f, "SyntaxError"),
            Self::Semantic => write!(f, "SemanticError"),
            Self::Security => write!(f, "SecurityError"),
        }
    }
}

/// An error that aborted a parse.
///
/// `message` is the bare human-readable text (for example
/// `Type not found: "MyType"`); the location is kept separately so callers
/// can underline the offending range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at {}: {message}", .location.start())]
pub struct KaplangError {
    /// The kind of error.
    pub kind: ErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Source range the error refers to.
    pub location: Span,
}

impl KaplangError {
    /// Create a new error.
    pub fn new(kind: ErrorKind, message: impl Into<String>, location: Span) -> Self {
        Self {
            kind,
            message: message.into(),
            location,
        }
    }

    pub fn syntax(message: impl Into<String>, location: Span) -> Self {
        Self::new(ErrorKind::Syntax, message, location)
    }

    pub fn semantic(message: impl Into<String>, location: Span) -> Self {
        Self::new(ErrorKind::Semantic, message, location)
    }

    pub fn security(message: impl Into<String>, location: Span) -> Self {
        Self::new(ErrorKind::Security, message, location)
    }

    pub fn is_syntax(&self) -> bool {
        self.kind == ErrorKind::Syntax
    }
}

impl From<Diagnostic> for KaplangError {
    /// Promotes a diagnostic to a fatal semantic error (strict mode).
    fn from(diagnostic: Diagnostic) -> Self {
        Self::semantic(diagnostic.message(), diagnostic.location())
    }
}

/// Result type for Kaplang operations.
pub type KaplangResult<T> = Result<T, KaplangError>;
