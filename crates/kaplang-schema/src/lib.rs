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

//! Kaplang Schema Conversion
//!
//! Bidirectional mapping between Kaplang entities and an external structural
//! schema made of ordered property bags.
//!
//! # Features
//!
//! - **Ordered bags**: properties and arguments keep declaration order in JSON
//! - **Type encoding**: built-in names stay strings, other names become `$ref`,
//!   lists become `{"type": "array", "items": ...}`
//! - **REST metadata**: verb, path template and per-argument transport
//!
//! Comments have no schema counterpart and are dropped.
//!
//! # Examples
//!
//! ```rust
//! use kaplang_core::{parse, ParseOptions};
//! use kaplang_schema::{from_schema, to_schema, to_schema_json};
//!
//! let opts = ParseOptions::permissive();
//! let result = parse("User { name: string }\n@GET(\"/u\")\nlist():User[]", &opts).unwrap();
//! let schema = to_schema(&result.entities);
//! assert_eq!(schema.methods[0].path.as_deref(), Some("/u"));
//!
//! let json = to_schema_json(&schema, false).unwrap();
//! assert!(json.starts_with(r#"{"types":[{"type":"dto","name":"User""#));
//! assert_eq!(from_schema(&schema).len(), 2);
//! ```

mod from_schema;
mod schema;
mod to_schema;

pub use from_schema::from_schema;
pub use schema::{
    ArgumentBag, ArrayTag, ExternalSchema, OrderedBag, PropertyBag, RestArgument, RestMethod,
    SchemaDto, SchemaEntity, SchemaEnum, SchemaProperty, SchemaType,
};
pub use to_schema::to_schema;

use kaplang_core::{parse, Entity, KaplangError, ParseOptions};

/// Errors from schema conversion
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Schema JSON could not be read
    #[error("Schema JSON parse error: {0}")]
    ParseError(String),

    /// Schema could not be written as JSON
    #[error("Schema JSON serialization error: {0}")]
    SerializeError(String),

    /// The Kaplang source did not parse
    #[error(transparent)]
    Kaplang(#[from] KaplangError),
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        SchemaError::ParseError(err.to_string())
    }
}

/// Serializes a schema as JSON text.
pub fn to_schema_json(schema: &ExternalSchema, pretty: bool) -> Result<String, SchemaError> {
    let text = if pretty {
        serde_json::to_string_pretty(schema)
    } else {
        serde_json::to_string(schema)
    };
    text.map_err(|e| SchemaError::SerializeError(e.to_string()))
}

/// Reads a schema from JSON text.
pub fn from_schema_json(json: &str) -> Result<ExternalSchema, SchemaError> {
    Ok(serde_json::from_str(json)?)
}

/// Parses Kaplang source and converts it to a schema.
pub fn source_to_schema(text: &str, options: &ParseOptions) -> Result<ExternalSchema, SchemaError> {
    let result = parse(text, options)?;
    Ok(to_schema(&result.entities))
}

/// Reads schema JSON and converts it to entities.
pub fn schema_json_to_entities(json: &str) -> Result<Vec<Entity>, SchemaError> {
    Ok(from_schema(&from_schema_json(json)?))
}
