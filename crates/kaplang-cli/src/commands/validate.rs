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

//! Validate command - Kaplang syntax and semantic validation

use super::read_file;
use crate::error::CliError;
use colored::Colorize;
use kaplang_core::{parse, Diagnostic, EntityKind, ParseOptions, Severity};

/// Validate a Kaplang file.
///
/// # Output
///
/// Prints to stdout:
/// - File validation status (✓ or ✗)
/// - Count of enums, data types, methods and comments
/// - Each diagnostic with its line, warnings in yellow and errors in red
///
/// # Errors
///
/// Returns `Err` if the file cannot be read, the parse fails, or a soft
/// parse reports error diagnostics.
///
/// # Examples
///
/// ```no_run
/// use kaplang_cli::commands::validate;
/// use kaplang_core::ParseOptions;
///
/// # fn main() -> Result<(), kaplang_cli::error::CliError> {
/// validate("api.kap", &ParseOptions::permissive())?;
/// # Ok(())
/// # }
/// ```
pub fn validate(file: &str, options: &ParseOptions) -> Result<(), CliError> {
    let content = read_file(file)?;

    let result = match parse(&content, options) {
        Ok(result) => result,
        Err(e) => {
            println!("{} {}", "✗".red().bold(), file);
            return Err(e.into());
        }
    };

    let errors = result.diagnostics.iter().filter(|d| d.is_error()).count();
    if errors == 0 {
        println!("{} {}", "✓".green().bold(), file);
    } else {
        println!("{} {}", "✗".red().bold(), file);
    }

    let count = |kind: EntityKind| result.entities.iter().filter(|e| e.kind() == kind).count();
    println!("  Enums: {}", count(EntityKind::Enum));
    println!("  Data types: {}", count(EntityKind::DataType));
    println!("  Methods: {}", count(EntityKind::Method));
    println!("  Comments: {}", count(EntityKind::Comment));

    for diagnostic in &result.diagnostics {
        println!("  {}", render(diagnostic));
    }

    if errors > 0 {
        return Err(CliError::ValidationFailed(errors));
    }
    Ok(())
}

fn render(diagnostic: &Diagnostic) -> String {
    let text = diagnostic.to_string();
    match diagnostic.severity() {
        Severity::Warning => text.yellow().to_string(),
        Severity::Error => text.red().to_string(),
    }
}
