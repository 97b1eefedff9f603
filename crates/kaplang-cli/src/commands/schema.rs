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

//! Schema commands - Kaplang to/from external schema JSON

use super::{read_file, write_output};
use crate::error::CliError;
use kaplang_c14n::write;
use kaplang_core::ParseOptions;
use kaplang_schema::{schema_json_to_entities, source_to_schema, to_schema_json};
use tracing::debug;

/// Convert a Kaplang file to external schema JSON.
///
/// Comments have no schema counterpart and are dropped.
///
/// # Examples
///
/// ```no_run
/// use kaplang_cli::commands::to_schema;
/// use kaplang_core::ParseOptions;
///
/// # fn main() -> Result<(), kaplang_cli::error::CliError> {
/// to_schema("api.kap", Some("api.json"), true, &ParseOptions::permissive())?;
/// # Ok(())
/// # }
/// ```
pub fn to_schema(
    file: &str,
    output: Option<&str>,
    pretty: bool,
    options: &ParseOptions,
) -> Result<(), CliError> {
    let content = read_file(file)?;
    let schema = source_to_schema(&content, options)?;
    debug!(
        types = schema.types.len(),
        methods = schema.methods.len(),
        "converted to schema"
    );
    let json = to_schema_json(&schema, pretty)?;
    write_output(&json, output)
}

/// Convert external schema JSON to canonical Kaplang text.
pub fn from_schema(file: &str, output: Option<&str>) -> Result<(), CliError> {
    let content = read_file(file)?;
    let entities = schema_json_to_entities(&content)?;
    debug!(entities = entities.len(), "converted from schema");
    write_output(&write(&entities), output)
}
