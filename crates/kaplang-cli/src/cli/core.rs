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

//! Core Kaplang commands for validation, formatting and token dumps.

use super::ParserArgs;
use crate::commands;
use crate::error::CliError;
use clap::Subcommand;

/// Core Kaplang commands.
#[derive(Subcommand)]
pub enum CoreCommands {
    /// Validate a Kaplang file
    ///
    /// Parses the file, prints entity counts and any diagnostics. Exits
    /// non-zero on a fatal error, or on error diagnostics in soft mode.
    Validate {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: String,

        #[command(flatten)]
        parser: ParserArgs,
    },

    /// Format a Kaplang file to canonical form
    Format {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: String,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Check only (exit 1 if not canonical)
        #[arg(short, long)]
        check: bool,

        /// Indent with this many spaces instead of tabs
        #[arg(long, value_name = "N")]
        indent: Option<usize>,

        #[command(flatten)]
        parser: ParserArgs,
    },

    /// Dump the token stream
    ///
    /// Prints one `kind<TAB>value` line per token, with the value
    /// JSON-escaped.
    Tokens {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: String,

        /// Print the tokens as a JSON array instead
        #[arg(long)]
        json: bool,
    },
}

impl CoreCommands {
    /// Execute the core command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the command execution fails.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            CoreCommands::Validate { file, parser } => {
                commands::validate(&file, &parser.to_options())
            }
            CoreCommands::Format {
                file,
                output,
                check,
                indent,
                parser,
            } => commands::format(&file, output.as_deref(), check, indent, &parser.to_options()),
            CoreCommands::Tokens { file, json } => commands::tokens(&file, json),
        }
    }
}
