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

//! Property-based tests for write → parse round trips.
//!
//! # Properties Tested
//!
//! 1. **Entity Preservation**: parsing written entities yields the same entities
//! 2. **Canonicalization Idempotency**: writing the re-parsed entities is a no-op
//! 3. **Indentation Independence**: every indentation setting parses back the same

use kaplang_c14n::{write, write_with_config, CanonicalConfig, Indentation};
use kaplang_core::lex::quote;
use kaplang_core::{
    parse, Annotation, Comment, DataType, Entity, Enum, Method, ParseOptions, Parameter, Property,
    TypeRef, BUILTIN_TYPES,
};
use proptest::collection::{btree_map, vec};
use proptest::option;
use proptest::prelude::*;
use proptest::sample::select;

fn options() -> ParseOptions {
    ParseOptions::builder()
        .methods(true)
        .types(true)
        .rest(true)
        .soft_errors(true)
        .build()
}

fn lower_ident() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9_]{0,8}".prop_filter("keyword", |s| s != "enum")
}

fn upper_ident() -> impl Strategy<Value = String> {
    "[A-Z][a-zA-Z0-9_]{0,8}"
}

/// Comment text without trailing whitespace.
fn line_text() -> impl Strategy<Value = String> {
    "( ?[a-zA-Z0-9#/.,-]){0,10}"
}

fn description() -> impl Strategy<Value = Option<String>> {
    option::of(vec(line_text(), 1..3).prop_map(|lines| lines.join("\n")))
}

fn type_ref() -> impl Strategy<Value = TypeRef> {
    let simple = (select(BUILTIN_TYPES), any::<bool>()).prop_map(|(name, list)| TypeRef {
        name: name.to_string(),
        list,
        generics: Vec::new(),
    });
    let generic = (upper_ident(), vec(select(BUILTIN_TYPES), 1..3), any::<bool>()).prop_map(
        |(name, args, list)| TypeRef {
            name,
            list,
            generics: args.into_iter().map(TypeRef::simple).collect(),
        },
    );
    prop_oneof![4 => simple, 1 => generic]
}

fn annotation() -> impl Strategy<Value = Annotation> {
    (
        upper_ident(),
        vec("\\PC{0,8}", 0..3),
        btree_map("[a-z]{1,5}", "\\PC{0,5}", 0..2),
    )
        .prop_map(|(name, arguments, options)| Annotation {
            type_name: format!("@{}", name),
            arguments,
            options,
        })
}

fn literal() -> impl Strategy<Value = String> {
    prop_oneof![
        (-1000i64..1000).prop_map(|n| n.to_string()),
        "[a-z ]{0,6}".prop_map(|s| quote(&s)),
        Just("true".to_string()),
        Just("null".to_string()),
    ]
}

fn leaf_property() -> impl Strategy<Value = Property> {
    (
        lower_ident(),
        type_ref(),
        description(),
        option::of(literal()),
        vec(annotation(), 0..2),
    )
        .prop_map(|(name, type_ref, description, default, annotations)| {
            let mut property = Property::new(name, type_ref);
            property.description = description;
            property.annotations = annotations;
            if let Some(literal) = default {
                property = property.with_default(literal);
            }
            property
        })
}

fn property() -> impl Strategy<Value = Property> {
    prop_oneof![
        3 => leaf_property(),
        1 => (lower_ident(), vec(leaf_property(), 0..3), any::<bool>()).prop_map(
            |(name, nested, list)| if list {
                Property::object_list(name, nested)
            } else {
                Property::object(name, nested)
            }
        ),
    ]
}

fn entity() -> impl Strategy<Value = Entity> {
    let comment = line_text().prop_map(|text| Entity::Comment(Comment::new(text)));
    let enumeration = (
        upper_ident(),
        description(),
        vec(annotation(), 0..2),
        vec(upper_ident(), 0..4),
    )
        .prop_map(|(name, description, annotations, values)| {
            Entity::Enum(Enum {
                name,
                description,
                annotations,
                values,
            })
        });
    let data_type = (
        upper_ident(),
        description(),
        vec(annotation(), 0..2),
        vec(property(), 0..4),
    )
        .prop_map(|(name, description, annotations, properties)| {
            Entity::DataType(DataType {
                name,
                description,
                annotations,
                properties,
            })
        });
    let parameter = (lower_ident(), type_ref(), vec(annotation(), 0..2)).prop_map(
        |(name, type_ref, annotations)| Parameter {
            name,
            type_ref,
            annotations,
        },
    );
    let method = (
        lower_ident(),
        description(),
        vec(annotation(), 0..2),
        vec(parameter, 0..3),
        type_ref(),
    )
        .prop_map(|(name, description, annotations, parameters, return_type)| {
            Entity::Method(Method {
                name,
                description,
                annotations,
                return_type,
                parameters,
            })
        });
    prop_oneof![comment, enumeration, data_type, method]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Property: written entities parse back unchanged.
    #[test]
    fn prop_write_parse_roundtrip(entities in vec(entity(), 0..6)) {
        let text = write(&entities);
        let parsed = parse(&text, &options());
        prop_assert!(parsed.is_ok(), "failed to parse:\n{}\n{:?}", text, parsed);
        prop_assert_eq!(parsed.unwrap().entities, entities, "text:\n{}", text);
    }

    /// Property: writing is idempotent over a parse.
    #[test]
    fn prop_write_idempotent(entities in vec(entity(), 0..6)) {
        let first = write(&entities);
        let reparsed = parse(&first, &options()).unwrap();
        let second = write(&reparsed.entities);
        prop_assert_eq!(first, second);
    }

    /// Property: indentation does not change the parsed entities.
    #[test]
    fn prop_indentation_independent(
        entities in vec(entity(), 1..4),
        spaces in 1usize..8
    ) {
        let config = CanonicalConfig::new().with_indentation(Indentation::Spaces(spaces));
        let text = write_with_config(&entities, &config);
        let parsed = parse(&text, &options()).unwrap();
        prop_assert_eq!(parsed.entities, entities);
    }
}
