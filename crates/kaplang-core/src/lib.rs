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

//! Core parser and entity model for the Kaplang definition language.
//!
//! Kaplang describes data types, enums and (REST) methods:
//!
//! ```text
//! // A registered user
//! User {
//!     id: string
//!     roles: Role[]
//!     address: {
//!         city: string
//!     }
//! }
//!
//! enum Role { ADMIN, MEMBER }
//!
//! @GET("/users/{id}")
//! getUser(@Path id: string): User
//! ```
//!
//! This crate provides:
//!
//! - [`lex`] - the lossless tokenizer used by editors, spans and literals
//! - [`parse`] - the grammar parser with interleaved semantic validation
//! - [`model`] - the entity tree
//! - [`validate_rest_path`] - REST path template consistency checks
//!
//! Canonical writing lives in `kaplang-c14n`, schema conversion in
//! `kaplang-schema`.

mod diagnostic;
mod error;
pub mod lex;
pub mod model;
mod options;
mod parser;
pub mod rest;
pub mod validate;

pub use diagnostic::{Diagnostic, Severity};
pub use error::{ErrorKind, KaplangError, KaplangResult};
pub use lex::{tokenize, SourcePos, Span, Token, TokenKind};
pub use model::{
    Annotation, Comment, DataType, DefaultValue, Entity, EntityKind, Enum, Method, Parameter,
    Property, TypeRef, OBJECT_TYPE,
};
pub use options::{ParseOptions, ParseOptionsBuilder, DEFAULT_MAX_NESTING_DEPTH};
pub use parser::{parse, parse_type_reference, ParseResult};
pub use rest::{
    validate_rest_path, validate_rest_path_at, RestPathError, RestVerb, Transport,
    STRINGABLE_TYPES,
};
pub use validate::{TypeRegistry, BUILTIN_TYPES};
