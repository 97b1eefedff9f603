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

//! Entity model produced by the parser.
//!
//! The model is plain immutable data. Source locations are not part of it;
//! [`crate::ParseResult`] keeps them in a parallel list so that two trees
//! parsed from differently formatted text compare equal.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::KaplangError;
use crate::rest::RestVerb;

/// Type name used for inline object properties.
pub const OBJECT_TYPE: &str = "object";

#[cfg(feature = "serde")]
fn is_false(value: &bool) -> bool {
    !*value
}

/// A reference to a type: `string`, `User[]`, `Map<string, User>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeRef {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "is_false"))]
    pub list: bool,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub generics: Vec<TypeRef>,
}

impl TypeRef {
    /// A bare type name.
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            list: false,
            generics: Vec::new(),
        }
    }

    /// An array of a bare type name (`name[]`).
    pub fn list_of(name: impl Into<String>) -> Self {
        Self {
            list: true,
            ..Self::simple(name)
        }
    }

    pub fn with_generics(mut self, generics: Vec<TypeRef>) -> Self {
        self.generics = generics;
        self
    }

    pub fn as_list(mut self) -> Self {
        self.list = true;
        self
    }

    /// The same type without the array marker.
    pub fn element(&self) -> TypeRef {
        Self {
            list: false,
            ..self.clone()
        }
    }

    /// True for a bare name with no array marker and no generics.
    pub fn is_simple(&self) -> bool {
        !self.list && self.generics.is_empty()
    }

    pub fn is_object(&self) -> bool {
        self.name == OBJECT_TYPE && self.generics.is_empty()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.generics.is_empty() {
            f.write_str("<")?;
            for (i, generic) in self.generics.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", generic)?;
            }
            f.write_str(">")?;
        }
        if self.list {
            f.write_str("[]")?;
        }
        Ok(())
    }
}

impl FromStr for TypeRef {
    type Err = KaplangError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_type_reference(s)
    }
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        TypeRef::simple(name)
    }
}

impl PartialEq<str> for TypeRef {
    fn eq(&self, other: &str) -> bool {
        self.is_simple() && self.name == other
    }
}

impl PartialEq<&str> for TypeRef {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

/// `@Name`, `@Name("arg")` or `@Name(key = value)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Annotation {
    /// Name including the leading `@`.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub type_name: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub arguments: Vec<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "BTreeMap::is_empty")
    )]
    pub options: BTreeMap<String, String>,
}

impl Annotation {
    /// Creates a bare annotation; a missing `@` is added.
    pub fn new(type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        let type_name = if type_name.starts_with('@') {
            type_name
        } else {
            format!("@{}", type_name)
        };
        Self {
            type_name,
            arguments: Vec::new(),
            options: BTreeMap::new(),
        }
    }

    pub fn with_argument(mut self, argument: impl Into<String>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Name without the leading `@`.
    pub fn name(&self) -> &str {
        self.type_name.trim_start_matches('@')
    }

    /// Case-insensitive name comparison; `@` on `name` is optional.
    pub fn is(&self, name: &str) -> bool {
        self.name().eq_ignore_ascii_case(name.trim_start_matches('@'))
    }

    pub fn first_argument(&self) -> Option<&str> {
        self.arguments.first().map(String::as_str)
    }

    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }
}

/// A method parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parameter {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub type_ref: TypeRef,
    #[cfg_attr(feature = "serde", serde(default))]
    pub annotations: Vec<Annotation>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_ref: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            type_ref: type_ref.into(),
            annotations: Vec::new(),
        }
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// First annotation with the given name.
    pub fn annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.is(name))
    }
}

/// A property default. Literals keep their source spelling, so `"18"` and
/// `18` stay distinct.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", content = "value", rename_all = "lowercase")
)]
pub enum DefaultValue {
    Literal(String),
}

impl DefaultValue {
    pub fn as_str(&self) -> &str {
        match self {
            DefaultValue::Literal(text) => text,
        }
    }
}

/// A data-type field. Inline objects have type `object` (or `object[]`)
/// and carry nested `properties`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Property {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub type_ref: TypeRef,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub description: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub default_value: Option<DefaultValue>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub annotations: Vec<Annotation>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub properties: Option<Vec<Property>>,
}

impl Property {
    pub fn new(name: impl Into<String>, type_ref: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            type_ref: type_ref.into(),
            description: None,
            default_value: None,
            annotations: Vec::new(),
            properties: None,
        }
    }

    /// An inline `{ ... }` object.
    pub fn object(name: impl Into<String>, properties: Vec<Property>) -> Self {
        Self {
            properties: Some(properties),
            ..Self::new(name, TypeRef::simple(OBJECT_TYPE))
        }
    }

    /// An inline `[{ ... }]` array of objects.
    pub fn object_list(name: impl Into<String>, properties: Vec<Property>) -> Self {
        Self {
            properties: Some(properties),
            ..Self::new(name, TypeRef::list_of(OBJECT_TYPE))
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_default(mut self, literal: impl Into<String>) -> Self {
        self.default_value = Some(DefaultValue::Literal(literal.into()));
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// True when the property carries nested properties.
    pub fn is_object(&self) -> bool {
        self.properties.is_some()
    }
}

/// A free-standing comment line.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Comment {
    pub text: String,
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// `enum Name { A, B }`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enum {
    pub name: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub description: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub annotations: Vec<Annotation>,
    pub values: Vec<String>,
}

impl Enum {
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            description: None,
            annotations: Vec::new(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// `Name { field: type ... }`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataType {
    pub name: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub description: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub annotations: Vec<Annotation>,
    pub properties: Vec<Property>,
}

impl DataType {
    pub fn new(name: impl Into<String>, properties: Vec<Property>) -> Self {
        Self {
            name: name.into(),
            description: None,
            annotations: Vec::new(),
            properties,
        }
    }
}

/// `name(param: Type, ...): ReturnType`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Method {
    pub name: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub description: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub annotations: Vec<Annotation>,
    pub return_type: TypeRef,
    pub parameters: Vec<Parameter>,
}

impl Method {
    pub fn new(name: impl Into<String>, return_type: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            description: None,
            annotations: Vec::new(),
            return_type: return_type.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// The first REST verb annotation, if any.
    pub fn rest_verb(&self) -> Option<(RestVerb, &Annotation)> {
        self.annotations
            .iter()
            .find_map(|a| RestVerb::from_annotation(&a.type_name).map(|verb| (verb, a)))
    }
}

/// Discriminant of [`Entity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Comment,
    Enum,
    DataType,
    Method,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Comment => write!(f, "COMMENT"),
            Self::Enum => write!(f, "ENUM"),
            Self::DataType => write!(f, "DATATYPE"),
            Self::Method => write!(f, "METHOD"),
        }
    }
}

/// One top-level construct.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum Entity {
    #[cfg_attr(feature = "serde", serde(rename = "COMMENT"))]
    Comment(Comment),
    #[cfg_attr(feature = "serde", serde(rename = "ENUM"))]
    Enum(Enum),
    #[cfg_attr(feature = "serde", serde(rename = "DATATYPE"))]
    DataType(DataType),
    #[cfg_attr(feature = "serde", serde(rename = "METHOD"))]
    Method(Method),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Comment(_) => EntityKind::Comment,
            Entity::Enum(_) => EntityKind::Enum,
            Entity::DataType(_) => EntityKind::DataType,
            Entity::Method(_) => EntityKind::Method,
        }
    }

    /// Declared name; comments have none.
    pub fn name(&self) -> Option<&str> {
        match self {
            Entity::Comment(_) => None,
            Entity::Enum(e) => Some(&e.name),
            Entity::DataType(d) => Some(&d.name),
            Entity::Method(m) => Some(&m.name),
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Entity::Comment(_) => None,
            Entity::Enum(e) => e.description.as_deref(),
            Entity::DataType(d) => d.description.as_deref(),
            Entity::Method(m) => m.description.as_deref(),
        }
    }

    pub fn annotations(&self) -> &[Annotation] {
        match self {
            Entity::Comment(_) => &[],
            Entity::Enum(e) => &e.annotations,
            Entity::DataType(d) => &d.annotations,
            Entity::Method(m) => &m.annotations,
        }
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, Entity::Comment(_))
    }
}

impl From<Comment> for Entity {
    fn from(value: Comment) -> Self {
        Entity::Comment(value)
    }
}

impl From<Enum> for Entity {
    fn from(value: Enum) -> Self {
        Entity::Enum(value)
    }
}

impl From<DataType> for Entity {
    fn from(value: DataType) -> Self {
        Entity::DataType(value)
    }
}

impl From<Method> for Entity {
    fn from(value: Method) -> Self {
        Entity::Method(value)
    }
}
