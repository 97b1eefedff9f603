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

//! Kaplang CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! ## Validation & Formatting
//!
//! - **validate**: Parse a file and report entity counts and diagnostics
//! - **format**: Rewrite a file in canonical form, or check that it is
//! - **tokens**: Dump the editor token stream
//!
//! ## Schema Conversion
//!
//! - **to-schema/from-schema**: external structural schema as JSON
//!
//! # Parser Flags
//!
//! Nothing but comments is accepted unless enabled: `--types`, `--methods`
//! and `--rest` (or `--all`). `--soft` collects diagnostics instead of
//! stopping at the first; `--valid-type` and the `--*-annotation` lists
//! extend the vocabulary.
//!
//! # Examples
//!
//! ```no_run
//! use kaplang_cli::commands::{to_schema, validate};
//! use kaplang_core::ParseOptions;
//!
//! # fn main() -> Result<(), kaplang_cli::error::CliError> {
//! let opts = ParseOptions::permissive();
//! validate("api.kap", &opts)?;
//! to_schema("api.kap", None, true, &opts)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Security
//!
//! Inputs larger than `KAPLANG_MAX_FILE_SIZE` bytes (default 64 MB) are
//! rejected before reading.

pub mod cli;
pub mod commands;
pub mod error;
