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

//! Canonical output invariants on hand-written documents.

use kaplang_c14n::{format, write, write_entity};
use kaplang_core::{parse, DataType, Entity, ParseOptions, Property};

const PETSTORE: &str = r#"
# Pet store API

// Kinds of pet
enum Kind { DOG, CAT, }

// A pet
@Entity
Pet {
    id: string
    // Display name
    @Required
    name: string = "unnamed"
    kind: Kind
    age: integer = 0
    owner: {
        name: string
        phones: string[]
    }
    tags: [{ label: string }]
}

// Loads one pet
@GET("/pets/{id}")
getPet(@Path id: string, @Header("X-Trace") trace: string): Pet

@POST("/pets")
addPet(@Body pet: Pet, @Query(optional = true) dryRun: boolean): Pet
"#;

fn options() -> ParseOptions {
    ParseOptions::builder()
        .methods(true)
        .types(true)
        .rest(true)
        .type_annotation("Entity")
        .field_annotation("Required")
        .build()
}

#[test]
fn test_document_roundtrip() {
    let original = parse(PETSTORE, &options()).unwrap();
    let text = write(&original.entities);
    let reparsed = parse(&text, &options()).unwrap();
    assert_eq!(reparsed.entities, original.entities);
    assert!(reparsed.diagnostics.is_empty());
}

#[test]
fn test_canonical_text() {
    let text = format(PETSTORE, &options()).unwrap();
    let expected = "\
# Pet store API

// Kinds of pet
enum Kind {
\tDOG,
\tCAT
}

// A pet
@Entity
Pet {
\tid: string
\t// Display name
\t@Required
\tname: string = \"unnamed\"
\tkind: Kind
\tage: integer = 0
\towner: {
\t\tname: string
\t\tphones: string[]
\t}
\ttags: [{
\t\tlabel: string
\t}]
}

// Loads one pet
@GET(\"/pets/{id}\")
getPet(@Path id:string, @Header(\"X-Trace\") trace:string):Pet

@POST(\"/pets\")
addPet(@Body pet:Pet, @Query(optional = \"true\") dryRun:boolean):Pet";
    assert_eq!(text, expected);
}

#[test]
fn test_format_is_idempotent() {
    let once = format(PETSTORE, &options()).unwrap();
    let twice = format(&once, &options()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_later_property_descriptions_roundtrip() {
    let entities = vec![Entity::DataType(DataType::new(
        "A",
        vec![
            Property::new("a", "void"),
            Property::new("a", "void").with_description(""),
            Property::object(
                "inner",
                vec![
                    Property::new("x", "string"),
                    Property::new("y", "string").with_description("second\nline"),
                ],
            ),
            Property::new("z", "integer").with_description(" after object"),
        ],
    ))];
    let text = write(&entities);
    assert_eq!(
        text,
        "A {\n\ta: void\n\t//\n\ta: void\n\tinner: {\n\t\tx: string\n\t\t//second\n\t\t//line\n\t\ty: string\n\t}\n\t// after object\n\tz: integer\n}"
    );
    let parsed = parse(&text, &ParseOptions::builder().types(true).build()).unwrap();
    assert_eq!(parsed.entities, entities);
}

#[test]
fn test_comment_runs_stay_separate() {
    let opts = ParseOptions::builder().methods(true).build();
    let text = format("#A\n#B\n//C\nfoo():void", &opts).unwrap();
    assert_eq!(text, "#A\n\n#B\n\n//C\nfoo():void");
}

#[test]
fn test_output_is_trimmed() {
    let result = parse("\n\n#x\n\n", &ParseOptions::default()).unwrap();
    assert_eq!(write(&result.entities), "#x");
    assert_eq!(write(&[]), "");
}

#[test]
fn test_write_entity_single_block() {
    let result = parse("a():void\nb():void", &ParseOptions::builder().methods(true).build())
        .unwrap();
    assert_eq!(write_entity(&result.entities[1]), "b():void");
}

#[test]
fn test_format_propagates_errors() {
    assert!(format("Broken {", &options()).is_err());
}
