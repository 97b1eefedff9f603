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

//! Conversion tests between Kaplang source and the external schema.

use kaplang_c14n::write;
use kaplang_core::{parse, Entity, ParseOptions, RestVerb, Transport};
use kaplang_schema::{
    from_schema, from_schema_json, schema_json_to_entities, source_to_schema, to_schema,
    to_schema_json, SchemaEntity, SchemaError, SchemaType,
};
use serde_json::{json, Value as JsonValue};

const SOURCE: &str = r#"
# dropped
// Account role
enum Role { ADMIN, USER }

// An account
@Entity
Account {
    // Primary key
    id: string
    zeta: integer = 0
    alpha: Role[]
    settings: Map<string, string>
    profile: {
        nick: string
    }
}

// Loads an account
@GET("/accounts/{id}")
getAccount(@Path id: string, @Header("X-Trace", optional = "true") trace: string): Account

@PUT("/accounts")
saveAll(@Body accounts: Account[], dryRun: boolean): void

sum(a: integer, b: integer): integer
"#;

fn options() -> ParseOptions {
    ParseOptions::builder()
        .methods(true)
        .types(true)
        .rest(true)
        .valid_type("Map<*,*>")
        .type_annotation("Entity")
        .build()
}

fn entities() -> Vec<Entity> {
    parse(SOURCE, &options()).unwrap().entities
}

// =============================================================================
// Kaplang -> Schema
// =============================================================================

#[test]
fn test_types_and_methods_split() {
    let schema = to_schema(&entities());
    let names: Vec<&str> = schema.types.iter().map(SchemaEntity::name).collect();
    assert_eq!(names, vec!["Role", "Account"]);
    let methods: Vec<&str> = schema.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(methods, vec!["getAccount", "saveAll", "sum"]);
}

#[test]
fn test_json_shape() {
    let schema = to_schema(&entities());
    let value: JsonValue = serde_json::from_str(&to_schema_json(&schema, true).unwrap()).unwrap();

    assert_eq!(
        value["types"][0],
        json!({
            "type": "enum",
            "name": "Role",
            "description": " Account role",
            "values": ["ADMIN", "USER"]
        })
    );

    let account = &value["types"][1];
    assert_eq!(account["type"], "dto");
    assert_eq!(account["annotations"][0]["type"], "@Entity");
    assert_eq!(
        account["properties"]["alpha"]["type"],
        json!({"type": "array", "items": {"$ref": "Role"}})
    );
    assert_eq!(
        account["properties"]["settings"]["type"],
        json!({"$ref": "Map<string, string>"})
    );
    assert_eq!(account["properties"]["zeta"]["defaultValue"], "0");
    assert_eq!(account["properties"]["profile"]["type"], "object");
    assert_eq!(
        account["properties"]["profile"]["properties"]["nick"]["type"],
        "string"
    );

    let get = &value["methods"][0];
    assert_eq!(get["method"], "GET");
    assert_eq!(get["path"], "/accounts/{id}");
    assert_eq!(get["responseType"], json!({"$ref": "Account"}));
    assert_eq!(
        get["arguments"]["trace"],
        json!({"type": "string", "transport": "HEADER", "id": "X-Trace", "optional": true})
    );
}

#[test]
fn test_property_order_survives_json() {
    let schema = to_schema(&entities());
    let text = to_schema_json(&schema, false).unwrap();
    let zeta = text.find("\"zeta\"").unwrap();
    let alpha = text.find("\"alpha\"").unwrap();
    assert!(zeta < alpha);

    let back = from_schema_json(&text).unwrap();
    let SchemaEntity::Dto(account) = back.find_type("Account").unwrap() else {
        panic!("expected dto");
    };
    assert_eq!(
        account.properties.keys().collect::<Vec<_>>(),
        vec!["id", "zeta", "alpha", "settings", "profile"]
    );
}

#[test]
fn test_argument_transports() {
    let schema = to_schema(&entities());
    let save = schema.find_method("saveAll").unwrap();
    assert_eq!(save.method, Some(RestVerb::Put));
    let accounts = save.arguments.get("accounts").unwrap();
    assert_eq!(accounts.transport, Transport::Body);
    assert_eq!(
        accounts.schema_type,
        SchemaType::array(SchemaType::reference("Account"))
    );
    assert_eq!(save.arguments.get("dryRun").unwrap().transport, Transport::Query);

    let sum = schema.find_method("sum").unwrap();
    assert_eq!(sum.method, None);
    assert_eq!(sum.path, None);
}

// =============================================================================
// Schema -> Kaplang
// =============================================================================

#[test]
fn test_roundtrip_without_comments() {
    let original = entities();
    let back = from_schema(&to_schema(&original));
    let expected: Vec<Entity> = original
        .iter()
        .filter(|e| !e.is_comment())
        .cloned()
        .collect();
    assert_eq!(back.len(), expected.len());
    // plain methods and declared transports survive unchanged
    for (got, want) in back.iter().zip(&expected) {
        if got.name() == Some("saveAll") {
            continue;
        }
        assert_eq!(got, want);
    }
}

#[test]
fn test_rest_method_gains_explicit_transport() {
    let back = from_schema(&to_schema(&entities()));
    let text = write(&back);
    assert!(text.contains("saveAll(@Body accounts:Account[], @Query dryRun:boolean):void"));
    assert!(text.contains("sum(a:integer, b:integer):integer"));
    // the regenerated text parses under the same options
    let reparsed = parse(&text, &options()).unwrap();
    assert!(reparsed.diagnostics.is_empty());
}

#[test]
fn test_roundtrip_groups_types_before_methods() {
    let source = "ping(): void\nPoint { x: double }\npong(p: Point): void";
    let original = parse(source, &ParseOptions::permissive()).unwrap().entities;
    let back = from_schema(&to_schema(&original));
    let names: Vec<_> = back.iter().filter_map(Entity::name).collect();
    assert_eq!(names, vec!["Point", "ping", "pong"]);
}

#[test]
fn test_schema_json_to_entities() {
    let json = r#"{
        "types": [
            {"type": "dto", "name": "Point", "properties": {
                "y": {"type": "double"},
                "x": {"type": "double", "defaultValue": "0"}
            }}
        ],
        "methods": [
            {"name": "move", "arguments": {"to": {"type": {"$ref": "Point"}, "transport": "BODY"}},
             "responseType": "void"}
        ]
    }"#;
    let entities = schema_json_to_entities(json).unwrap();
    assert_eq!(
        write(&entities),
        "Point {\n\ty: double\n\tx: double = 0\n}\n\nmove(@Body to:Point):void"
    );
}

#[test]
fn test_source_to_schema() {
    let schema = source_to_schema("Empty {}", &ParseOptions::permissive()).unwrap();
    assert_eq!(schema.types.len(), 1);
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_invalid_json_rejected() {
    let err = from_schema_json("{\"types\": [ {\"type\": \"table\"} ]}").unwrap_err();
    assert!(matches!(err, SchemaError::ParseError(_)));
    assert!(err.to_string().starts_with("Schema JSON parse error"));
}

#[test]
fn test_source_errors_propagate() {
    let err = source_to_schema("Broken {", &ParseOptions::permissive()).unwrap_err();
    assert!(matches!(err, SchemaError::Kaplang(_)));
}
