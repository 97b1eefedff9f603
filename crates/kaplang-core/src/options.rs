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

//! Parser configuration.

/// Default maximum nesting depth for inline objects and generic arguments.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 64;

/// Options controlling which constructs a parse accepts and how semantic
/// findings are reported.
///
/// ParseOptions provides both direct field access and a fluent builder API.
/// The defaults accept nothing but comments: callers opt in to methods, data
/// types and the REST vocabulary.
///
/// # Using the builder
///
/// ```
/// use kaplang_core::ParseOptions;
///
/// let opts = ParseOptions::builder()
///     .methods(true)
///     .rest(true)
///     .valid_type("Map<*,*>")
///     .soft_errors(true)
///     .build();
/// assert!(opts.rest);
/// assert_eq!(opts.valid_types, vec!["Map<*,*>".to_string()]);
/// ```
///
/// # Direct field access
///
/// ```
/// use kaplang_core::ParseOptions;
///
/// let mut opts = ParseOptions::default();
/// opts.types = true;
/// opts.field_annotations.push("@Required".into());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Accept method declarations.
    pub methods: bool,
    /// Accept data type and enum declarations.
    pub types: bool,
    /// Enable the REST verb and transport annotations and path validation.
    pub rest: bool,
    /// Extra type names. A `<*,...>` suffix declares the generic arity.
    pub valid_types: Vec<String>,
    /// Annotations allowed on methods (with or without `@`).
    pub method_annotations: Vec<String>,
    /// Annotations allowed on method parameters.
    pub parameter_annotations: Vec<String>,
    /// Annotations allowed on enum and data type declarations.
    pub type_annotations: Vec<String>,
    /// Annotations allowed on data type fields.
    pub field_annotations: Vec<String>,
    /// Collect semantic diagnostics instead of failing on the first one.
    pub soft_errors: bool,
    /// Maximum depth of inline objects and nested generic arguments.
    pub max_nesting_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            methods: false,
            types: false,
            rest: false,
            valid_types: Vec::new(),
            method_annotations: Vec::new(),
            parameter_annotations: Vec::new(),
            type_annotations: Vec::new(),
            field_annotations: Vec::new(),
            soft_errors: false,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

impl ParseOptions {
    /// Create a new builder for ParseOptions.
    pub fn builder() -> ParseOptionsBuilder {
        ParseOptionsBuilder::new()
    }

    /// Options accepting every declaration kind, with REST enabled.
    pub fn permissive() -> Self {
        Self {
            methods: true,
            types: true,
            rest: true,
            ..Self::default()
        }
    }
}

/// Builder for ergonomic construction of ParseOptions.
#[derive(Debug, Clone, Default)]
pub struct ParseOptionsBuilder {
    options: ParseOptions,
}

impl ParseOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn methods(mut self, value: bool) -> Self {
        self.options.methods = value;
        self
    }

    pub fn types(mut self, value: bool) -> Self {
        self.options.types = value;
        self
    }

    pub fn rest(mut self, value: bool) -> Self {
        self.options.rest = value;
        self
    }

    /// Add one valid type name.
    pub fn valid_type(mut self, name: impl Into<String>) -> Self {
        self.options.valid_types.push(name.into());
        self
    }

    /// Replace the valid type list.
    pub fn valid_types<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.valid_types = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn method_annotation(mut self, name: impl Into<String>) -> Self {
        self.options.method_annotations.push(name.into());
        self
    }

    pub fn parameter_annotation(mut self, name: impl Into<String>) -> Self {
        self.options.parameter_annotations.push(name.into());
        self
    }

    pub fn type_annotation(mut self, name: impl Into<String>) -> Self {
        self.options.type_annotations.push(name.into());
        self
    }

    pub fn field_annotation(mut self, name: impl Into<String>) -> Self {
        self.options.field_annotations.push(name.into());
        self
    }

    pub fn soft_errors(mut self, value: bool) -> Self {
        self.options.soft_errors = value;
        self
    }

    pub fn max_nesting_depth(mut self, depth: usize) -> Self {
        self.options.max_nesting_depth = depth;
        self
    }

    /// Build the ParseOptions.
    pub fn build(self) -> ParseOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_accept_nothing() {
        let opts = ParseOptions::default();
        assert!(!opts.methods);
        assert!(!opts.types);
        assert!(!opts.rest);
        assert!(!opts.soft_errors);
        assert_eq!(opts.max_nesting_depth, DEFAULT_MAX_NESTING_DEPTH);
    }

    #[test]
    fn test_builder_sets_fields() {
        let opts = ParseOptions::builder()
            .types(true)
            .method_annotation("@Deprecated")
            .parameter_annotation("NotNull")
            .type_annotation("@Entity")
            .field_annotation("@Required")
            .valid_types(["A", "B"])
            .max_nesting_depth(4)
            .build();
        assert!(opts.types);
        assert_eq!(opts.method_annotations, vec!["@Deprecated"]);
        assert_eq!(opts.parameter_annotations, vec!["NotNull"]);
        assert_eq!(opts.type_annotations, vec!["@Entity"]);
        assert_eq!(opts.field_annotations, vec!["@Required"]);
        assert_eq!(opts.valid_types, vec!["A", "B"]);
        assert_eq!(opts.max_nesting_depth, 4);
    }

    #[test]
    fn test_permissive() {
        let opts = ParseOptions::permissive();
        assert!(opts.methods && opts.types && opts.rest);
        assert!(!opts.soft_errors);
    }
}
