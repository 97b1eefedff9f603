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

//! Format command - Kaplang canonicalization

use super::{read_file, write_output};
use crate::error::CliError;
use kaplang_c14n::{write_with_config, CanonicalConfig, Indentation};
use kaplang_core::{parse, ParseOptions};

/// Format a Kaplang file to canonical form.
///
/// # Arguments
///
/// * `file` - Path to the Kaplang file to format
/// * `output` - Optional output file path. If `None`, writes to stdout
/// * `check` - If `true`, only checks whether the file is already canonical
/// * `indent` - Indent with this many spaces; tabs when `None`
/// * `options` - Parser options
///
/// # Errors
///
/// Returns `Err` if the file cannot be read or parsed, if `check` finds a
/// difference, or if the output cannot be written.
///
/// # Examples
///
/// ```no_run
/// use kaplang_cli::commands::format;
/// use kaplang_core::ParseOptions;
///
/// # fn main() -> Result<(), kaplang_cli::error::CliError> {
/// let opts = ParseOptions::permissive();
/// format("api.kap", Some("api.formatted.kap"), false, None, &opts)?;
/// format("api.kap", None, true, Some(4), &opts)?;
/// # Ok(())
/// # }
/// ```
pub fn format(
    file: &str,
    output: Option<&str>,
    check: bool,
    indent: Option<usize>,
    options: &ParseOptions,
) -> Result<(), CliError> {
    let content = read_file(file)?;
    let result = parse(&content, options)?;

    let config = match indent {
        Some(0) => return Err(CliError::invalid_input("--indent must be at least 1")),
        Some(spaces) => CanonicalConfig::new().with_indentation(Indentation::Spaces(spaces)),
        None => CanonicalConfig::default(),
    };
    let canonical = write_with_config(&result.entities, &config);

    if check {
        let normalized_original = content.replace("\r\n", "\n");
        if canonical.trim() != normalized_original.trim() {
            return Err(CliError::NotCanonical);
        }
        println!("File is in canonical form");
        Ok(())
    } else {
        write_output(&canonical, output)
    }
}
