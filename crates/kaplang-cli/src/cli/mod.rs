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

//! CLI command definitions and argument parsing.
//!
//! - [`core`]: validate, format, tokens
//! - [`conversion`]: to-schema, from-schema
//! - [`ParserArgs`]: parser flags shared by every command that reads source

mod conversion;
mod core;

use clap::{Args, Subcommand};
use kaplang_core::{ParseOptions, DEFAULT_MAX_NESTING_DEPTH};

use crate::error::CliError;

pub use conversion::ConversionCommands;
pub use core::CoreCommands;

/// Top-level CLI commands.
///
/// ```text
/// Commands
/// ├── Core (validate, format, tokens)
/// └── Conversion (to-schema, from-schema)
/// ```
#[derive(Subcommand)]
pub enum Commands {
    #[command(flatten)]
    Core(CoreCommands),

    #[command(flatten)]
    Conversion(ConversionCommands),
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if file I/O, parsing, validation or conversion fails.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Core(cmd) => cmd.execute(),
            Commands::Conversion(cmd) => cmd.execute(),
        }
    }
}

/// Parser flags.
///
/// Every declaration kind is rejected unless enabled; `--all` enables
/// methods, types and REST checks together.
#[derive(Args, Debug, Clone, Default)]
pub struct ParserArgs {
    /// Allow method declarations
    #[arg(long)]
    pub methods: bool,

    /// Allow enum and data type declarations
    #[arg(long)]
    pub types: bool,

    /// Validate REST annotations and path templates
    #[arg(long)]
    pub rest: bool,

    /// Shorthand for --methods --types --rest
    #[arg(short, long)]
    pub all: bool,

    /// Predeclared type, e.g. `UUID` or `Map<*,*>` (repeatable)
    #[arg(long = "valid-type", value_name = "TYPE")]
    pub valid_types: Vec<String>,

    /// Collect diagnostics instead of stopping at the first one
    #[arg(long)]
    pub soft: bool,

    /// Allowed method annotation (repeatable)
    #[arg(long = "method-annotation", value_name = "NAME")]
    pub method_annotations: Vec<String>,

    /// Allowed parameter annotation (repeatable)
    #[arg(long = "parameter-annotation", value_name = "NAME")]
    pub parameter_annotations: Vec<String>,

    /// Allowed type annotation (repeatable)
    #[arg(long = "type-annotation", value_name = "NAME")]
    pub type_annotations: Vec<String>,

    /// Allowed field annotation (repeatable)
    #[arg(long = "field-annotation", value_name = "NAME")]
    pub field_annotations: Vec<String>,

    /// Maximum nesting depth of inline objects and generic arguments
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_NESTING_DEPTH)]
    pub max_depth: usize,
}

impl ParserArgs {
    /// Builds the parse options these flags describe.
    pub fn to_options(&self) -> ParseOptions {
        let mut builder = ParseOptions::builder()
            .methods(self.methods || self.all)
            .types(self.types || self.all)
            .rest(self.rest || self.all)
            .valid_types(self.valid_types.iter().cloned())
            .soft_errors(self.soft)
            .max_nesting_depth(self.max_depth);
        for name in &self.method_annotations {
            builder = builder.method_annotation(name.as_str());
        }
        for name in &self.parameter_annotations {
            builder = builder.parameter_annotation(name.as_str());
        }
        for name in &self.type_annotations {
            builder = builder.type_annotation(name.as_str());
        }
        for name in &self.field_annotations {
            builder = builder.field_annotation(name.as_str());
        }
        builder.build()
    }
}
