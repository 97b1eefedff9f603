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

//! Canonical Kaplang writer.
//!
//! Each top-level entity becomes one block; blocks are separated by a blank
//! line. Descriptions and annotations sit on their own lines directly above
//! the construct they belong to, which is exactly where the parser picks
//! them up again.

use crate::config::CanonicalConfig;
use kaplang_core::lex::quote;
use kaplang_core::{Annotation, DataType, Entity, Enum, Method, Parameter, Property};

/// Initial buffer capacity for output string.
const INITIAL_OUTPUT_BUFFER_CAPACITY: usize = 1024;

/// Writer for canonical Kaplang output.
///
/// # Examples
///
/// ```
/// use kaplang_c14n::CanonicalWriter;
/// use kaplang_core::{Entity, Enum};
///
/// let mut writer = CanonicalWriter::default();
/// writer.write_entity(&Entity::Enum(Enum::new("Color", ["RED", "GREEN"])));
/// assert_eq!(writer.finish(), "enum Color {\n\tRED,\n\tGREEN\n}");
/// ```
#[derive(Debug, Clone)]
pub struct CanonicalWriter {
    indent: String,
    out: String,
}

impl Default for CanonicalWriter {
    fn default() -> Self {
        Self::new(CanonicalConfig::default())
    }
}

impl CanonicalWriter {
    pub fn new(config: CanonicalConfig) -> Self {
        Self {
            indent: config.indentation.unit(),
            out: String::with_capacity(INITIAL_OUTPUT_BUFFER_CAPACITY),
        }
    }

    /// Appends all entities.
    pub fn write_entities(&mut self, entities: &[Entity]) {
        for entity in entities {
            self.write_entity(entity);
        }
    }

    /// Appends one entity as its own block.
    pub fn write_entity(&mut self, entity: &Entity) {
        if !self.out.is_empty() {
            self.out.push_str("\n\n");
        }
        match entity {
            Entity::Comment(comment) => {
                self.out.push('#');
                self.out.push_str(&comment.text);
            }
            Entity::Enum(enumeration) => self.write_enum(enumeration),
            Entity::DataType(data_type) => self.write_data_type(data_type),
            Entity::Method(method) => self.write_method(method),
        }
    }

    /// The accumulated output, trimmed.
    pub fn finish(self) -> String {
        self.out.trim().to_string()
    }

    fn write_indent(&mut self, depth: usize) {
        for _ in 0..depth {
            self.out.push_str(&self.indent);
        }
    }

    /// Description and annotation lines above a construct.
    fn write_preamble(&mut self, description: Option<&str>, annotations: &[Annotation], depth: usize) {
        if let Some(description) = description {
            for line in description.split('\n') {
                self.write_indent(depth);
                self.out.push_str("//");
                self.out.push_str(line);
                self.out.push('\n');
            }
        }
        for annotation in annotations {
            self.write_indent(depth);
            self.out.push_str(&format_annotation(annotation));
            self.out.push('\n');
        }
    }

    fn write_enum(&mut self, enumeration: &Enum) {
        self.write_preamble(
            enumeration.description.as_deref(),
            &enumeration.annotations,
            0,
        );
        self.out.push_str("enum ");
        self.out.push_str(&enumeration.name);
        if enumeration.values.is_empty() {
            self.out.push_str(" {}");
            return;
        }
        self.out.push_str(" {\n");
        for (i, value) in enumeration.values.iter().enumerate() {
            self.write_indent(1);
            self.out.push_str(value);
            if i + 1 < enumeration.values.len() {
                self.out.push(',');
            }
            self.out.push('\n');
        }
        self.out.push('}');
    }

    fn write_data_type(&mut self, data_type: &DataType) {
        self.write_preamble(data_type.description.as_deref(), &data_type.annotations, 0);
        self.out.push_str(&data_type.name);
        self.out.push(' ');
        self.write_body(&data_type.properties, 0);
    }

    /// `{ ... }` with properties one level deeper than `depth`.
    fn write_body(&mut self, properties: &[Property], depth: usize) {
        if properties.is_empty() {
            self.out.push_str("{}");
            return;
        }
        self.out.push_str("{\n");
        for property in properties {
            self.write_property(property, depth + 1);
            self.out.push('\n');
        }
        self.write_indent(depth);
        self.out.push('}');
    }

    fn write_property(&mut self, property: &Property, depth: usize) {
        self.write_preamble(property.description.as_deref(), &property.annotations, depth);
        self.write_indent(depth);
        self.out.push_str(&property.name);
        self.out.push_str(": ");
        match &property.properties {
            Some(nested) if property.type_ref.list => {
                self.out.push('[');
                self.write_body(nested, depth);
                self.out.push(']');
            }
            Some(nested) => self.write_body(nested, depth),
            None => self.out.push_str(&property.type_ref.to_string()),
        }
        if let Some(default) = &property.default_value {
            self.out.push_str(" = ");
            self.out.push_str(default.as_str());
        }
    }

    fn write_method(&mut self, method: &Method) {
        self.write_preamble(method.description.as_deref(), &method.annotations, 0);
        self.out.push_str(&method.name);
        self.out.push('(');
        let parameters: Vec<String> = method.parameters.iter().map(format_parameter).collect();
        self.out.push_str(&parameters.join(", "));
        self.out.push_str("):");
        self.out.push_str(&method.return_type.to_string());
    }
}

/// `@Name` or `@Name("arg", key = "value")`.
pub fn format_annotation(annotation: &Annotation) -> String {
    let mut out = annotation.type_name.clone();
    if annotation.arguments.is_empty() && annotation.options.is_empty() {
        return out;
    }
    let items: Vec<String> = annotation
        .arguments
        .iter()
        .map(|argument| quote(argument))
        .chain(
            annotation
                .options
                .iter()
                .map(|(key, value)| format!("{} = {}", key, quote(value))),
        )
        .collect();
    out.push('(');
    out.push_str(&items.join(", "));
    out.push(')');
    out
}

fn format_parameter(parameter: &Parameter) -> String {
    let mut out = String::new();
    for annotation in &parameter.annotations {
        out.push_str(&format_annotation(annotation));
        out.push(' ');
    }
    out.push_str(&parameter.name);
    out.push(':');
    out.push_str(&parameter.type_ref.to_string());
    out
}
