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

//! REST vocabulary and path template checking.
//!
//! A REST method carries a verb annotation whose first argument is a path
//! template such as `/users/{id}/posts/{slug:[a-z-]+}`. Each `{name}` in the
//! template binds to a parameter annotated `@Path` (or `@Path("name")`).

use std::fmt;

use regex::Regex;
use thiserror::Error;

use crate::error::{KaplangError, KaplangResult};
use crate::lex::Span;
use crate::model::{Annotation, Method, Parameter, TypeRef};

/// Types that can be bound from a URL path segment.
pub const STRINGABLE_TYPES: &[&str] = &[
    "string", "integer", "long", "float", "double", "char", "byte", "boolean", "date",
];

/// HTTP verbs recognized as method annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum RestVerb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
}

impl RestVerb {
    pub const ALL: [RestVerb; 6] = [
        RestVerb::Get,
        RestVerb::Post,
        RestVerb::Put,
        RestVerb::Patch,
        RestVerb::Delete,
        RestVerb::Head,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RestVerb::Get => "GET",
            RestVerb::Post => "POST",
            RestVerb::Put => "PUT",
            RestVerb::Patch => "PATCH",
            RestVerb::Delete => "DELETE",
            RestVerb::Head => "HEAD",
        }
    }

    /// Maps an annotation name (`@GET`, `get`) to a verb.
    pub fn from_annotation(name: &str) -> Option<RestVerb> {
        let name = name.trim_start_matches('@');
        Self::ALL
            .into_iter()
            .find(|verb| verb.as_str().eq_ignore_ascii_case(name))
    }

    /// The annotation spelling, `@GET`.
    pub fn annotation_name(&self) -> String {
        format!("@{}", self.as_str())
    }
}

impl fmt::Display for RestVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a REST parameter is bound from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Transport {
    Path,
    Header,
    #[default]
    Query,
    Body,
}

impl Transport {
    pub const ALL: [Transport; 4] = [
        Transport::Path,
        Transport::Header,
        Transport::Query,
        Transport::Body,
    ];

    /// The annotation name without `@`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Transport::Path => "Path",
            Transport::Header => "Header",
            Transport::Query => "Query",
            Transport::Body => "Body",
        }
    }

    /// Maps an annotation name (`@Path`, `path`) to a transport.
    pub fn from_annotation(name: &str) -> Option<Transport> {
        let name = name.trim_start_matches('@');
        Self::ALL
            .into_iter()
            .find(|transport| transport.as_str().eq_ignore_ascii_case(name))
    }

    /// The transport annotation on a parameter, if any.
    pub fn find(annotations: &[Annotation]) -> Option<(Transport, &Annotation)> {
        annotations
            .iter()
            .find_map(|a| Self::from_annotation(&a.type_name).map(|t| (t, a)))
    }

    /// The parameter's transport; [`Transport::Query`] when none is given.
    pub fn of(parameter: &Parameter) -> Transport {
        Self::find(&parameter.annotations)
            .map(|(transport, _)| transport)
            .unwrap_or_default()
    }

    pub fn annotation_name(&self) -> String {
        format!("@{}", self.as_str())
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A REST path template problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestPathError {
    #[error("Invalid URL path specified: \"{path}\". Paths must start with \"/\" and must not end with \"/\"")]
    InvalidPath { path: String },

    #[error("Path variable not found in parameters {name}")]
    VariableNotFound { name: String },

    #[error("Invalid regular expression provided as pattern: {pattern}. Error: {detail}")]
    InvalidPattern { pattern: String, detail: String },

    #[error("Parameter defines path variable \"{id}\" which is never used in path")]
    UnusedParameter { id: String },

    #[error("Invalid type for path variable \"{id}\": \"{type_name}\". Supported types are: {}", STRINGABLE_TYPES.join(", "))]
    UnsupportedType { id: String, type_name: String },
}

impl RestPathError {
    /// Attaches a source location, turning the finding into a semantic
    /// [`KaplangError`].
    pub fn at(self, location: Span) -> KaplangError {
        KaplangError::semantic(self.to_string(), location)
    }
}

/// A `{name}` or `{name:pattern}` segment of a path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathVariable {
    pub name: String,
    pub pattern: Option<String>,
}

/// Extracts the variables of a path template in one left-to-right pass.
///
/// Braces inside a pattern nest, so `{code:[0-9]{3}}` is one variable. An
/// unclosed `{` is treated as literal text.
pub fn path_variables(path: &str) -> Vec<PathVariable> {
    let mut variables = Vec::new();
    let mut chars = path.char_indices();
    while let Some((start, ch)) = chars.next() {
        if ch != '{' {
            continue;
        }
        let mut depth = 1usize;
        let mut end = None;
        for (i, c) in chars.by_ref() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        end = Some(i);
                        break;
                    }
                }
                _ => {}
            }
        }
        let Some(end) = end else {
            break;
        };
        let body = &path[start + 1..end];
        let variable = match body.split_once(':') {
            Some((name, pattern)) => PathVariable {
                name: name.trim().to_string(),
                pattern: Some(pattern.to_string()),
            },
            None => PathVariable {
                name: body.trim().to_string(),
                pattern: None,
            },
        };
        variables.push(variable);
    }
    variables
}

/// The path variable a parameter binds: its `@Path` argument, or its own
/// name for a bare `@Path`. `None` when the parameter is not path-bound.
pub fn path_parameter_id(parameter: &Parameter) -> Option<&str> {
    match Transport::find(&parameter.annotations) {
        Some((Transport::Path, annotation)) => {
            Some(annotation.first_argument().unwrap_or(&parameter.name))
        }
        _ => None,
    }
}

fn is_stringable(type_ref: &TypeRef) -> bool {
    type_ref.is_simple() && STRINGABLE_TYPES.contains(&type_ref.name.as_str())
}

fn check_path_shape(path: &str) -> Result<(), RestPathError> {
    let valid = path == "/" || (path.starts_with('/') && !path.ends_with('/'));
    if valid {
        Ok(())
    } else {
        Err(RestPathError::InvalidPath {
            path: path.to_string(),
        })
    }
}

/// Checks that a REST method's path template and its `@Path` parameters
/// agree. Methods without a verb annotation pass trivially.
///
/// A verb annotation without an argument has no template; any `@Path`
/// parameter is then reported as unused.
pub fn validate_rest_path(method: &Method) -> Result<(), RestPathError> {
    let Some((_, annotation)) = method.rest_verb() else {
        return Ok(());
    };
    let path = annotation.first_argument();
    if let Some(path) = path {
        check_path_shape(path)?;
    }
    let variables = path.map(path_variables).unwrap_or_default();

    for variable in &variables {
        let bound = method
            .parameters
            .iter()
            .any(|p| path_parameter_id(p) == Some(variable.name.as_str()));
        if !bound {
            return Err(RestPathError::VariableNotFound {
                name: variable.name.clone(),
            });
        }
        if let Some(pattern) = &variable.pattern {
            if let Err(err) = Regex::new(pattern) {
                return Err(RestPathError::InvalidPattern {
                    pattern: pattern.clone(),
                    detail: err.to_string(),
                });
            }
        }
    }

    for parameter in &method.parameters {
        let Some(id) = path_parameter_id(parameter) else {
            continue;
        };
        if !variables.iter().any(|v| v.name == id) {
            return Err(RestPathError::UnusedParameter { id: id.to_string() });
        }
        if !is_stringable(&parameter.type_ref) {
            return Err(RestPathError::UnsupportedType {
                id: id.to_string(),
                type_name: parameter.type_ref.to_string(),
            });
        }
    }
    Ok(())
}

/// [`validate_rest_path`] with the failure located at `location`, usually
/// the method's entry in [`ParseResult::spans`](crate::ParseResult::spans).
pub fn validate_rest_path_at(method: &Method, location: Span) -> KaplangResult<()> {
    validate_rest_path(method).map_err(|err| err.at(location))
}
