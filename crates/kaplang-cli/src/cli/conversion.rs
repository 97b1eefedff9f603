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

//! Schema conversion commands.

use super::ParserArgs;
use crate::commands;
use crate::error::CliError;
use clap::Subcommand;

/// Conversion between Kaplang source and the external schema JSON.
#[derive(Subcommand)]
pub enum ConversionCommands {
    /// Convert Kaplang to external schema JSON
    ToSchema {
        /// Input Kaplang file
        #[arg(value_name = "FILE")]
        file: String,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Pretty-print JSON
        #[arg(short, long)]
        pretty: bool,

        #[command(flatten)]
        parser: ParserArgs,
    },

    /// Convert external schema JSON to Kaplang
    FromSchema {
        /// Input JSON file
        #[arg(value_name = "FILE")]
        file: String,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl ConversionCommands {
    /// Execute the conversion command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if reading, parsing, conversion or writing fails.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            ConversionCommands::ToSchema {
                file,
                output,
                pretty,
                parser,
            } => commands::to_schema(&file, output.as_deref(), pretty, &parser.to_options()),
            ConversionCommands::FromSchema { file, output } => {
                commands::from_schema(&file, output.as_deref())
            }
        }
    }
}
