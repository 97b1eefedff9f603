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

//! Kaplang Canonicalization
//!
//! Deterministic text output for Kaplang entity trees. Canonical output
//! ensures stable diffs and round trips:
//!
//! - **Deterministic output**: the same entities always produce the same text
//! - **Round-trip preservation**: `parse(write(parse(s))) == parse(s)`
//! - **Idempotency**: `format(format(s)) == format(s)`
//!
//! # Examples
//!
//! ```
//! use kaplang_c14n::format;
//! use kaplang_core::ParseOptions;
//!
//! let opts = ParseOptions::builder().types(true).build();
//! let text = format("Point{x:double y:double}", &opts).unwrap();
//! assert_eq!(text, "Point {\n\tx: double\n\ty: double\n}");
//! ```

mod config;
mod writer;

pub use config::{CanonicalConfig, Indentation};
pub use writer::{format_annotation, CanonicalWriter};

use kaplang_core::{parse, Entity, KaplangResult, ParseOptions};

/// Writes entities in canonical form.
pub fn write(entities: &[Entity]) -> String {
    write_with_config(entities, &CanonicalConfig::default())
}

/// Writes entities with a custom configuration.
pub fn write_with_config(entities: &[Entity], config: &CanonicalConfig) -> String {
    let mut writer = CanonicalWriter::new(config.clone());
    writer.write_entities(entities);
    writer.finish()
}

/// Writes a single entity as one block.
pub fn write_entity(entity: &Entity) -> String {
    write(std::slice::from_ref(entity))
}

/// Parses `text` and writes it back in canonical form.
///
/// # Errors
///
/// Any error [`kaplang_core::parse`] reports.
pub fn format(text: &str, options: &ParseOptions) -> KaplangResult<String> {
    let result = parse(text, options)?;
    Ok(write(&result.entities))
}
