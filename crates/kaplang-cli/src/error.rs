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

//! Structured error types for the Kaplang CLI.
//!
//! All commands return `Result<(), CliError>`.

use kaplang_core::KaplangError;
use kaplang_schema::SchemaError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Kaplang CLI operations.
///
/// # Examples
///
/// ```rust,no_run
/// use kaplang_cli::error::CliError;
///
/// fn read(path: &str) -> Result<String, CliError> {
///     std::fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))
/// }
/// ```
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// File read, write, or metadata access failed.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// File size exceeds the configured limit.
    #[error("File '{path}' is too large ({actual} bytes). Maximum allowed: {max} bytes ({max_mb} MB)")]
    FileTooLarge {
        path: PathBuf,
        actual: u64,
        max: u64,
        max_mb: u64,
    },

    /// The source did not parse.
    #[error("Parse error: {0}")]
    Parse(#[from] KaplangError),

    /// Soft-mode parse finished with error diagnostics.
    #[error("Validation failed with {0} error(s)")]
    ValidationFailed(usize),

    /// Schema conversion error.
    #[error("Schema conversion error: {0}")]
    Schema(String),

    /// JSON serialization error.
    #[error("JSON format error: {message}")]
    JsonFormat {
        /// The error message
        message: String,
    },

    /// `format --check` found a difference.
    #[error("File is not in canonical form")]
    NotCanonical,

    /// Invalid command-line input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Wraps an I/O error with the path it happened on.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    pub fn file_too_large(path: impl Into<PathBuf>, actual: u64, max: u64) -> Self {
        Self::FileTooLarge {
            path: path.into(),
            actual,
            max,
            max_mb: max / (1024 * 1024),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl From<SchemaError> for CliError {
    fn from(source: SchemaError) -> Self {
        match source {
            SchemaError::Kaplang(err) => CliError::Parse(err),
            other => CliError::Schema(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(source: serde_json::Error) -> Self {
        Self::JsonFormat {
            message: source.to_string(),
        }
    }
}
