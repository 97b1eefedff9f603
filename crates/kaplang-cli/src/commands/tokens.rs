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

//! Tokens command - token stream dump for editor debugging

use super::{read_file, write_output};
use crate::error::CliError;
use kaplang_core::{tokenize, Token};

/// Print the token stream of a file.
///
/// Each token becomes a `kind<TAB>value` line where the value is a JSON
/// string literal, so whitespace and newlines stay visible. With `json`,
/// the whole stream is printed as a JSON array of `{"type", "value"}`.
///
/// # Errors
///
/// Returns `Err` if the file cannot be read or the output cannot be written.
pub fn tokens(file: &str, json: bool) -> Result<(), CliError> {
    let content = read_file(file)?;
    let tokens = tokenize(&content);
    let text = if json {
        serde_json::to_string_pretty(&tokens)?
    } else {
        render_lines(&tokens)?
    };
    write_output(&text, None)
}

fn render_lines(tokens: &[Token]) -> Result<String, CliError> {
    let mut out = String::new();
    for token in tokens {
        out.push_str(token.kind.as_str());
        out.push('\t');
        out.push_str(&serde_json::to_string(&token.value)?);
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_escape_values() {
        let text = render_lines(&tokenize("enum E {\n}")).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "keyword\t\"enum\"");
        assert!(lines.contains(&"whitespace\t\"\\n\""));
    }
}
