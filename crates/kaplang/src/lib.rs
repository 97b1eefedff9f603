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

//! # Kaplang - Type and Method Definition Language
//!
//! Kaplang declares enumerations, structured data types and method
//! signatures, optionally bound to REST endpoints through annotations.
//!
//! ## Quick Start
//!
//! ```rust
//! use kaplang::{parse, write, ParseOptions};
//!
//! let source = r#"
//! // A user
//! User {
//!     id: string
//!     tags: string[]
//! }
//!
//! @GET("/users/{id}")
//! getUser(@Path id: string): User
//! "#;
//!
//! let result = parse(source, &ParseOptions::permissive()).expect("Failed to parse");
//! assert_eq!(result.data_types().count(), 1);
//!
//! // Canonical text
//! let text = write(&result.entities);
//! assert!(text.starts_with("// A user\nUser {"));
//! ```
//!
//! ## Modules
//!
//! - [`lex`]: Tokenizer and literal scanning
//! - [`rest`]: REST path validation
//! - [`validate`](mod@validate): Type registry and built-in types
//! - [`c14n`](mod@c14n): Canonical writer
//! - [`cache`]: Optional read-through parse cache
//!
//! ### Optional (feature-gated)
//!
//! - `schema`: external schema conversion (feature = "schema")

pub use kaplang_core::{
    // Functions
    parse,
    parse_type_reference,
    tokenize,
    validate_rest_path,
    validate_rest_path_at,
    // Model
    Annotation,
    Comment,
    DataType,
    DefaultValue,
    Entity,
    EntityKind,
    Enum,
    Method,
    Parameter,
    Property,
    TypeRef,
    // Options and results
    ParseOptions,
    ParseOptionsBuilder,
    ParseResult,
    // Diagnostics and errors
    Diagnostic,
    ErrorKind,
    KaplangError,
    KaplangResult,
    RestPathError,
    Severity,
    // Tokens
    SourcePos,
    Span,
    Token,
    TokenKind,
    // REST
    RestVerb,
    Transport,
};

pub use kaplang_core::{lex, rest, validate};

pub mod cache;
pub use cache::{CacheKey, CacheStatistics, ParseCache};

// Re-export canonicalization
pub mod c14n {
    //! Canonical writer
    pub use kaplang_c14n::{
        format, format_annotation, write, write_entity, write_with_config, CanonicalConfig,
        CanonicalWriter, Indentation,
    };
}

/// External schema conversion (requires `schema` feature)
#[cfg(feature = "schema")]
pub mod schema {
    pub use kaplang_schema::{
        from_schema, from_schema_json, schema_json_to_entities, source_to_schema, to_schema,
        to_schema_json, ExternalSchema, PropertyBag, RestArgument, RestMethod, SchemaEntity,
        SchemaError, SchemaProperty, SchemaType,
    };
}

/// Writes entities in canonical form.
///
/// # Examples
///
/// ```rust
/// use kaplang::{write, Entity, Enum};
///
/// let text = write(&[Entity::Enum(Enum::new("Flag", ["ON", "OFF"]))]);
/// assert_eq!(text, "enum Flag {\n\tON,\n\tOFF\n}");
/// ```
#[inline]
pub fn write(entities: &[Entity]) -> String {
    kaplang_c14n::write(entities)
}

/// Parses and rewrites `text` in canonical form.
#[inline]
pub fn format(text: &str, options: &ParseOptions) -> KaplangResult<String> {
    kaplang_c14n::format(text, options)
}

/// Checks `text` without keeping the entities.
///
/// Returns the collected diagnostics (always empty in strict mode).
///
/// ```rust
/// use kaplang::{validate, ParseOptions};
///
/// assert!(validate("Point { x: double }", &ParseOptions::permissive()).is_ok());
/// assert!(validate("Point { x: double }", &ParseOptions::default()).is_err());
/// ```
#[inline]
pub fn validate(text: &str, options: &ParseOptions) -> KaplangResult<Vec<Diagnostic>> {
    parse(text, options).map(|result| result.diagnostics)
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_write() {
        let opts = ParseOptions::builder().types(true).build();
        let result = parse("A { b: string }", &opts).unwrap();
        assert_eq!(write(&result.entities), "A {\n\tb: string\n}");
    }

    #[test]
    fn test_format() {
        let opts = ParseOptions::builder().methods(true).build();
        assert_eq!(format("f( a :string ):void", &opts).unwrap(), "f(a:string):void");
    }

    #[test]
    fn test_validate_soft_returns_diagnostics() {
        let opts = ParseOptions::builder()
            .types(true)
            .soft_errors(true)
            .build();
        let diagnostics = validate("A { b: Missing }", &opts).unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert!(!diagnostics[0].is_error());
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
