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

//! External schema to Kaplang entities
//!
//! Verb and transport annotations are rebuilt in front of the remaining
//! annotations. Every argument of a REST method gets an explicit transport
//! annotation; plain methods only get one when the argument is not a plain
//! query argument.

use crate::schema::{
    ExternalSchema, PropertyBag, RestArgument, RestMethod, SchemaEntity, SchemaProperty,
};
use crate::to_schema::OPTIONAL_KEY;
use kaplang_core::{
    Annotation, DataType, DefaultValue, Entity, Enum, Method, Parameter, Property, Transport,
};

/// Converts the external schema back to entities: types first, then
/// methods, each in schema order.
pub fn from_schema(schema: &ExternalSchema) -> Vec<Entity> {
    let mut entities = Vec::with_capacity(schema.types.len() + schema.methods.len());
    for entity in &schema.types {
        entities.push(match entity {
            SchemaEntity::Dto(dto) => Entity::DataType(DataType {
                name: dto.name.clone(),
                description: dto.description.clone(),
                annotations: dto.annotations.clone(),
                properties: bag_to_properties(&dto.properties),
            }),
            SchemaEntity::Enum(enumeration) => Entity::Enum(Enum {
                name: enumeration.name.clone(),
                description: enumeration.description.clone(),
                annotations: enumeration.annotations.clone(),
                values: enumeration.values.clone(),
            }),
        });
    }
    entities.extend(schema.methods.iter().map(|m| Entity::Method(method_from_schema(m))));
    entities
}

fn bag_to_properties(bag: &PropertyBag) -> Vec<Property> {
    bag.iter()
        .map(|(name, property)| property_from_schema(name, property))
        .collect()
}

fn property_from_schema(name: &str, property: &SchemaProperty) -> Property {
    let type_ref = property.schema_type.to_type_ref();
    Property {
        name: name.to_string(),
        type_ref,
        description: property.description.clone(),
        default_value: property.default_value.clone().map(DefaultValue::Literal),
        annotations: property.annotations.clone(),
        properties: property.properties.as_ref().map(bag_to_properties),
    }
}

fn method_from_schema(rest: &RestMethod) -> Method {
    let mut annotations = Vec::with_capacity(rest.annotations.len() + 1);
    if let Some(verb) = rest.method {
        let mut verb_annotation = Annotation::new(verb.annotation_name());
        if let Some(path) = &rest.path {
            verb_annotation = verb_annotation.with_argument(path.clone());
        }
        annotations.push(verb_annotation);
    }
    annotations.extend(rest.annotations.iter().cloned());
    let is_rest = rest.method.is_some();
    Method {
        name: rest.name.clone(),
        description: rest.description.clone(),
        annotations,
        return_type: rest.response_type.to_type_ref(),
        parameters: rest
            .arguments
            .iter()
            .map(|(name, argument)| parameter_from_schema(name, argument, is_rest))
            .collect(),
    }
}

fn parameter_from_schema(name: &str, argument: &RestArgument, is_rest: bool) -> Parameter {
    let explicit = is_rest
        || argument.transport != Transport::Query
        || argument.id.is_some()
        || argument.optional;
    let mut annotations = Vec::with_capacity(argument.annotations.len() + 1);
    if explicit {
        let mut transport = Annotation::new(argument.transport.annotation_name());
        if let Some(id) = &argument.id {
            transport = transport.with_argument(id.clone());
        }
        if argument.optional {
            transport = transport.with_option(OPTIONAL_KEY, "true");
        }
        annotations.push(transport);
    }
    annotations.extend(argument.annotations.iter().cloned());
    Parameter {
        name: name.to_string(),
        type_ref: argument.schema_type.to_type_ref(),
        annotations,
    }
}
