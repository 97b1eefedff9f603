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

//! Kaplang entities to external schema

use crate::schema::{
    ArgumentBag, ExternalSchema, PropertyBag, RestArgument, RestMethod, SchemaDto, SchemaEntity,
    SchemaEnum, SchemaProperty, SchemaType,
};
use kaplang_core::{Annotation, DataType, Entity, Enum, Method, Parameter, Property, Transport};
use tracing::{trace, warn};

/// Option key on a transport annotation that marks the argument optional.
pub(crate) const OPTIONAL_KEY: &str = "optional";

/// Converts entities to the external schema. Comments are dropped.
///
/// Types and methods land in separate lists, so their relative order in
/// the source is not kept; [`from_schema`](fn@crate::from_schema) emits all
/// types before all methods. Property and argument names are bag keys: of
/// two members with the same name only the last survives, in the first
/// one's position, and a warning is logged.
pub fn to_schema(entities: &[Entity]) -> ExternalSchema {
    let mut schema = ExternalSchema::default();
    for entity in entities {
        match entity {
            Entity::Comment(comment) => trace!(text = %comment.text, "dropping comment"),
            Entity::Enum(enumeration) => schema.types.push(enum_to_schema(enumeration)),
            Entity::DataType(data_type) => schema.types.push(dto_to_schema(data_type)),
            Entity::Method(method) => schema.methods.push(method_to_schema(method)),
        }
    }
    schema
}

fn enum_to_schema(enumeration: &Enum) -> SchemaEntity {
    SchemaEntity::Enum(SchemaEnum {
        name: enumeration.name.clone(),
        description: enumeration.description.clone(),
        annotations: enumeration.annotations.clone(),
        values: enumeration.values.clone(),
    })
}

fn dto_to_schema(data_type: &DataType) -> SchemaEntity {
    SchemaEntity::Dto(SchemaDto {
        name: data_type.name.clone(),
        description: data_type.description.clone(),
        annotations: data_type.annotations.clone(),
        properties: properties_to_bag(&data_type.properties),
    })
}

fn properties_to_bag(properties: &[Property]) -> PropertyBag {
    let mut bag = PropertyBag::new();
    for property in properties {
        if bag
            .insert(property.name.clone(), property_to_schema(property))
            .is_some()
        {
            warn!(name = %property.name, "duplicate property collapsed in schema");
        }
    }
    bag
}

fn property_to_schema(property: &Property) -> SchemaProperty {
    SchemaProperty {
        schema_type: SchemaType::from_type_ref(&property.type_ref),
        description: property.description.clone(),
        default_value: property
            .default_value
            .as_ref()
            .map(|value| value.as_str().to_string()),
        annotations: property.annotations.clone(),
        properties: property.properties.as_deref().map(properties_to_bag),
    }
}

fn method_to_schema(method: &Method) -> RestMethod {
    let verb = method.rest_verb();
    let mut annotations = method.annotations.clone();
    if let Some((_, verb_annotation)) = verb {
        // the verb annotation is carried by `method` and `path`
        if let Some(index) = annotations.iter().position(|a| a == verb_annotation) {
            annotations.remove(index);
        }
    }
    let mut arguments = ArgumentBag::new();
    for parameter in &method.parameters {
        if arguments
            .insert(parameter.name.clone(), argument_to_schema(parameter))
            .is_some()
        {
            warn!(
                method = %method.name,
                name = %parameter.name,
                "duplicate parameter collapsed in schema"
            );
        }
    }
    RestMethod {
        name: method.name.clone(),
        description: method.description.clone(),
        method: verb.map(|(verb, _)| verb),
        path: verb.and_then(|(_, a)| a.first_argument().map(str::to_string)),
        arguments,
        response_type: SchemaType::from_type_ref(&method.return_type),
        annotations,
    }
}

fn argument_to_schema(parameter: &Parameter) -> RestArgument {
    let found = Transport::find(&parameter.annotations);
    let annotations: Vec<Annotation> = match found {
        Some((_, transport_annotation)) => parameter
            .annotations
            .iter()
            .filter(|a| !std::ptr::eq(*a, transport_annotation))
            .cloned()
            .collect(),
        None => parameter.annotations.clone(),
    };
    RestArgument {
        schema_type: SchemaType::from_type_ref(&parameter.type_ref),
        transport: found.map(|(t, _)| t).unwrap_or_default(),
        id: found.and_then(|(_, a)| a.first_argument().map(str::to_string)),
        optional: found
            .and_then(|(_, a)| a.option(OPTIONAL_KEY))
            .is_some_and(|value| value.eq_ignore_ascii_case("true")),
        annotations,
    }
}
