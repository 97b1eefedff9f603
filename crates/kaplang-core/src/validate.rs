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

//! Semantic checks run while parsing.
//!
//! The validator owns the set of resolvable type names and the diagnostic
//! list. Every finding goes through [`Validator::report`], which either
//! records it (soft mode) or turns it into a fatal [`KaplangError`].

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::diagnostic::Diagnostic;
use crate::error::{KaplangError, KaplangResult};
use crate::lex::Span;
use crate::model::{Annotation, Method, TypeRef};
use crate::options::ParseOptions;
use crate::rest::{validate_rest_path, RestVerb, Transport};

/// Types that always resolve.
pub const BUILTIN_TYPES: &[&str] = &[
    "void", "integer", "double", "float", "long", "char", "byte", "string", "boolean", "date",
];

/// Resolvable type names with their generic arity.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    arities: HashMap<String, usize>,
}

impl TypeRegistry {
    /// Built-ins plus the given valid types.
    ///
    /// An entry like `Map<*,*>` registers `Map` with arity 2; a plain name
    /// has arity 0.
    pub fn new<S: AsRef<str>>(valid_types: &[S]) -> Self {
        let mut registry = Self::default();
        for name in BUILTIN_TYPES {
            registry.declare(name);
        }
        for entry in valid_types {
            let (name, arity) = parse_type_signature(entry.as_ref());
            registry.arities.insert(name.to_string(), arity);
        }
        registry
    }

    /// Registers a declared data type or enum.
    pub fn declare(&mut self, name: &str) {
        self.arities.entry(name.to_string()).or_insert(0);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.arities.contains_key(name)
    }

    pub fn arity(&self, name: &str) -> Option<usize> {
        self.arities.get(name).copied()
    }

    /// Findings for one type reference, generic arguments included.
    pub fn check(&self, type_ref: &TypeRef, location: Span) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        self.check_into(type_ref, location, &mut out);
        out
    }

    fn check_into(&self, type_ref: &TypeRef, location: Span, out: &mut Vec<Diagnostic>) {
        match self.arity(&type_ref.name) {
            None => out.push(Diagnostic::warning(
                format!("Type not found: \"{}\"", type_ref.name),
                location,
            )),
            Some(0) if !type_ref.generics.is_empty() => out.push(Diagnostic::error(
                format!(
                    "Generic arguments not supported for type: \"{}\"",
                    type_ref.name
                ),
                location,
            )),
            Some(arity) if arity != type_ref.generics.len() => out.push(Diagnostic::error(
                format!("Invalid number of generic arguments: \"{}\"", type_ref.name),
                location,
            )),
            Some(_) => {}
        }
        for generic in &type_ref.generics {
            self.check_into(generic, location, out);
        }
    }
}

fn parse_type_signature(entry: &str) -> (&str, usize) {
    let entry = entry.trim();
    match entry.split_once('<') {
        Some((name, rest)) => {
            let params = rest.trim_end_matches('>');
            let arity = if params.trim().is_empty() {
                0
            } else {
                params.split(',').count()
            };
            (name.trim(), arity)
        }
        None => (entry, 0),
    }
}

/// A place annotations can appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationSite {
    Method,
    Parameter,
    Type,
    Field,
}

impl AnnotationSite {
    pub fn singular(&self) -> &'static str {
        match self {
            Self::Method => "method",
            Self::Parameter => "parameter",
            Self::Type => "type",
            Self::Field => "field",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            Self::Method => "methods",
            Self::Parameter => "parameters",
            Self::Type => "types",
            Self::Field => "fields",
        }
    }
}

impl fmt::Display for AnnotationSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

/// Allowed annotation names per site, normalized to `@Name`.
#[derive(Debug, Clone, Default)]
struct Vocabulary {
    methods: Vec<String>,
    parameters: Vec<String>,
    types: Vec<String>,
    fields: Vec<String>,
}

fn normalize(name: &str) -> String {
    format!("@{}", name.trim().trim_start_matches('@'))
}

impl Vocabulary {
    fn from_options(options: &ParseOptions) -> Self {
        fn list(names: &[String]) -> Vec<String> {
            names.iter().map(|n| normalize(n)).collect()
        }
        let mut vocabulary = Self {
            methods: list(&options.method_annotations),
            parameters: list(&options.parameter_annotations),
            types: list(&options.type_annotations),
            fields: list(&options.field_annotations),
        };
        if options.rest {
            vocabulary
                .methods
                .extend(RestVerb::ALL.iter().map(RestVerb::annotation_name));
            vocabulary
                .parameters
                .extend(Transport::ALL.iter().map(Transport::annotation_name));
        }
        vocabulary
    }

    fn allowed(&self, site: AnnotationSite) -> &[String] {
        match site {
            AnnotationSite::Method => &self.methods,
            AnnotationSite::Parameter => &self.parameters,
            AnnotationSite::Type => &self.types,
            AnnotationSite::Field => &self.fields,
        }
    }
}

/// Semantic checker driven by the parser.
pub(crate) struct Validator<'o> {
    options: &'o ParseOptions,
    registry: TypeRegistry,
    vocabulary: Vocabulary,
    diagnostics: Vec<Diagnostic>,
}

impl<'o> Validator<'o> {
    pub(crate) fn new(options: &'o ParseOptions) -> Self {
        Self {
            options,
            registry: TypeRegistry::new(options.valid_types.as_slice()),
            vocabulary: Vocabulary::from_options(options),
            diagnostics: Vec::new(),
        }
    }

    pub(crate) fn declare(&mut self, name: &str) {
        debug!(name, "declared type");
        self.registry.declare(name);
    }

    /// Records a finding, or fails with it in strict mode.
    pub(crate) fn report(&mut self, diagnostic: Diagnostic) -> KaplangResult<()> {
        if self.options.soft_errors {
            debug!(%diagnostic, "collected diagnostic");
            self.diagnostics.push(diagnostic);
            Ok(())
        } else {
            Err(KaplangError::from(diagnostic))
        }
    }

    pub(crate) fn check_type(&mut self, type_ref: &TypeRef, location: Span) -> KaplangResult<()> {
        for diagnostic in self.registry.check(type_ref, location) {
            self.report(diagnostic)?;
        }
        Ok(())
    }

    /// Checks annotations against the site's vocabulary. `spans` runs
    /// parallel to `annotations`.
    pub(crate) fn check_annotations(
        &mut self,
        site: AnnotationSite,
        annotations: &[Annotation],
        spans: &[Span],
    ) -> KaplangResult<()> {
        for (annotation, span) in annotations.iter().zip(spans) {
            let allowed = self.vocabulary.allowed(site);
            let message = if allowed.is_empty() {
                format!("Annotations not allowed on {}", site.plural())
            } else if allowed.iter().any(|name| annotation.is(name)) {
                continue;
            } else {
                format!(
                    "Invalid {} annotation - must be one of {}",
                    site.singular(),
                    allowed.join(", ")
                )
            };
            self.report(Diagnostic::error(message, *span))?;
        }
        Ok(())
    }

    /// REST path consistency for a method carrying a verb annotation.
    pub(crate) fn check_rest(&mut self, method: &Method, location: Span) -> KaplangResult<()> {
        if !self.options.rest {
            return Ok(());
        }
        match validate_rest_path(method) {
            Ok(()) => Ok(()),
            Err(err) => self.report(Diagnostic::error(err.to_string(), location)),
        }
    }

    pub(crate) fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Severity;
    use crate::error::ErrorKind;

    #[test]
    fn test_type_signature() {
        assert_eq!(parse_type_signature("Map<*,*>"), ("Map", 2));
        assert_eq!(parse_type_signature(" List<*> "), ("List", 1));
        assert_eq!(parse_type_signature("MyType"), ("MyType", 0));
    }

    #[test]
    fn test_registry_resolution() {
        let mut registry = TypeRegistry::new(&["MyType"]);
        assert!(registry.contains("string"));
        assert!(registry.contains("MyType"));
        assert!(!registry.contains("User"));
        registry.declare("User");
        assert_eq!(registry.arity("User"), Some(0));
    }

    #[test]
    fn test_registry_arity_checks() {
        let registry = TypeRegistry::new(&["Map<*,*>"]);
        let ok = TypeRef::simple("Map")
            .with_generics(vec![TypeRef::simple("string"), TypeRef::simple("string")]);
        assert!(registry.check(&ok, Span::default()).is_empty());

        let short = TypeRef::simple("Map").with_generics(vec![TypeRef::simple("string")]);
        let found = registry.check(&short, Span::default());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].message(), "Invalid number of generic arguments: \"Map\"");

        let unsupported = TypeRef::simple("string").with_generics(vec![TypeRef::simple("x")]);
        let found = registry.check(&unsupported, Span::default());
        assert_eq!(
            found[0].message(),
            "Generic arguments not supported for type: \"string\""
        );
        assert_eq!(found[1].message(), "Type not found: \"x\"");
        assert_eq!(found[1].severity(), Severity::Warning);
    }

    #[test]
    fn test_vocabulary_with_rest() {
        let opts = ParseOptions::builder().rest(true).method_annotation("Deprecated").build();
        let vocabulary = Vocabulary::from_options(&opts);
        assert_eq!(vocabulary.methods[0], "@Deprecated");
        assert!(vocabulary.methods.contains(&"@GET".to_string()));
        assert!(vocabulary.parameters.contains(&"@Path".to_string()));
        assert!(vocabulary.types.is_empty());
    }

    #[test]
    fn test_annotation_messages() {
        let opts = ParseOptions::builder()
            .soft_errors(true)
            .field_annotation("@Required")
            .build();
        let mut validator = Validator::new(&opts);
        let spans = [Span::default()];
        validator
            .check_annotations(AnnotationSite::Method, &[Annotation::new("@X")], &spans)
            .unwrap();
        validator
            .check_annotations(AnnotationSite::Field, &[Annotation::new("@required")], &spans)
            .unwrap();
        validator
            .check_annotations(AnnotationSite::Field, &[Annotation::new("@Other")], &spans)
            .unwrap();
        let messages: Vec<_> = validator
            .into_diagnostics()
            .into_iter()
            .map(|d| d.message().to_string())
            .collect();
        assert_eq!(
            messages,
            vec![
                "Annotations not allowed on methods".to_string(),
                "Invalid field annotation - must be one of @Required".to_string(),
            ]
        );
    }

    #[test]
    fn test_strict_mode_fails_fast() {
        let opts = ParseOptions::default();
        let mut validator = Validator::new(&opts);
        let err = validator
            .check_type(&TypeRef::simple("Nope"), Span::default())
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Semantic);
        assert_eq!(err.message, "Type not found: \"Nope\"");
    }
}
