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

//! Kaplang conformance tests: comments, descriptions, declarations, type
//! resolution, annotation vocabularies, REST paths and soft errors.

use kaplang_core::{
    parse, Comment, DefaultValue, Entity, ErrorKind, ParseOptions, Property, Severity, SourcePos,
    TypeRef,
};

fn methods() -> ParseOptions {
    ParseOptions::builder().methods(true).build()
}

fn types() -> ParseOptions {
    ParseOptions::builder().types(true).build()
}

fn rest() -> ParseOptions {
    ParseOptions::builder().methods(true).rest(true).build()
}

fn comment(text: &str) -> Entity {
    Entity::Comment(Comment::new(text))
}

// =============================================================================
// Comments and descriptions
// =============================================================================

#[test]
fn test_comment_lines_are_separate_entities() {
    let result = parse("#A\n\n//B\n//C\n", &ParseOptions::default()).unwrap();
    assert_eq!(result.entities, vec![comment("A"), comment("B"), comment("C")]);
}

#[test]
fn test_description_attaches_to_method() {
    let result = parse("//Some\n//description\nmyMethod():void", &methods()).unwrap();
    assert_eq!(result.entities.len(), 1);
    let method = result.methods().next().unwrap();
    assert_eq!(method.name, "myMethod");
    assert_eq!(method.description.as_deref(), Some("Some\ndescription"));
    assert_eq!(method.return_type, "void");
}

#[test]
fn test_blank_line_breaks_description_run() {
    let result = parse("//A\n\n//B\nfoo():void", &methods()).unwrap();
    assert_eq!(result.entities.len(), 2);
    assert_eq!(result.entities[0], comment("A"));
    assert_eq!(result.entities[1].description(), Some("B"));
}

#[test]
fn test_hash_comment_is_never_description() {
    let result = parse("#x\nfoo():void", &methods()).unwrap();
    assert_eq!(result.entities[0], comment("x"));
    assert_eq!(result.entities[1].description(), None);
}

#[test]
fn test_description_precedes_annotations() {
    let opts = ParseOptions::builder()
        .methods(true)
        .method_annotation("Deprecated")
        .build();
    let result = parse("// Old API\n@Deprecated\nold():void", &opts).unwrap();
    assert_eq!(result.entities.len(), 1);
    assert_eq!(result.entities[0].description(), Some(" Old API"));
    assert_eq!(result.entities[0].annotations()[0].type_name, "@Deprecated");
}

#[test]
fn test_comments_after_last_declaration() {
    let result = parse("foo():void\n#end", &methods()).unwrap();
    assert_eq!(result.entities.len(), 2);
    assert_eq!(result.entities[1], comment("end"));
}

// =============================================================================
// Declarations
// =============================================================================

#[test]
fn test_data_type_with_nested_objects_and_defaults() {
    let source = "User {\n\
                  \t// the name\n\
                  \tname: string = \"anon\"\n\
                  \tage: integer = 18\n\
                  \taddress: {\n\
                  \t\tcity: string\n\
                  \t}\n\
                  \ttags: [{\n\
                  \t\tlabel: string\n\
                  \t}]\n\
                  }";
    let result = parse(source, &types()).unwrap();
    let user = result.data_types().next().unwrap();
    assert_eq!(user.name, "User");
    assert_eq!(user.properties.len(), 4);

    let name = &user.properties[0];
    assert_eq!(name.description.as_deref(), Some(" the name"));
    assert_eq!(
        name.default_value,
        Some(DefaultValue::Literal("\"anon\"".into()))
    );
    assert_eq!(user.properties[1].default_value.as_ref().map(|d| d.as_str()), Some("18"));

    assert_eq!(
        user.properties[2],
        Property::object("address", vec![Property::new("city", "string")])
    );
    assert_eq!(
        user.properties[3],
        Property::object_list("tags", vec![Property::new("label", "string")])
    );
}

#[test]
fn test_descriptions_on_later_properties() {
    let source = "A {\n\
                  \tx: string\n\
                  \t//second\n\
                  \ty: string,\n\
                  \t// third\n\
                  \t// more\n\
                  \tz: integer;\n\
                  \tinner: {\n\
                  \t\tfirst: string\n\
                  \t\t//nested\n\
                  \t\tsecond: string\n\
                  \t}\n\
                  \t//after object\n\
                  \tlast: boolean\n\
                  }";
    let result = parse(source, &types()).unwrap();
    let a = result.data_types().next().unwrap();
    let descriptions: Vec<_> = a
        .properties
        .iter()
        .map(|p| p.description.as_deref())
        .collect();
    assert_eq!(
        descriptions,
        vec![None, Some("second"), Some(" third\n more"), None, Some("after object")]
    );
    let nested = a.properties[3].properties.as_ref().unwrap();
    assert_eq!(nested[0].description, None);
    assert_eq!(nested[1].description.as_deref(), Some("nested"));
}

#[test]
fn test_trailing_property_comment_is_dropped() {
    let result = parse("A {\n\tx: string // note\n\ty: string\n}", &types()).unwrap();
    let a = result.data_types().next().unwrap();
    assert_eq!(a.properties.len(), 2);
    assert!(a.properties.iter().all(|p| p.description.is_none()));
}

#[test]
fn test_property_separators_are_optional() {
    let result = parse("P { a: string, b: integer; c: boolean }", &types()).unwrap();
    let p = result.data_types().next().unwrap();
    let names: Vec<_> = p.properties.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn test_enum_declaration() {
    let opts = ParseOptions::builder()
        .types(true)
        .type_annotation("Entity")
        .build();
    let result = parse("// Colors\n@Entity\nenum Color {\n\tRED,\n\tGREEN,\n}", &opts).unwrap();
    let color = result.enums().next().unwrap();
    assert_eq!(color.name, "Color");
    assert_eq!(color.values, vec!["RED", "GREEN"]);
    assert_eq!(color.description.as_deref(), Some(" Colors"));
    assert_eq!(color.annotations.len(), 1);
}

#[test]
fn test_declared_types_resolve_later() {
    let source = "enum Role { ADMIN }\nUser { role: Role, roles: Role[] }";
    let result = parse(source, &types()).unwrap();
    assert!(result.diagnostics.is_empty());
    let user = result.data_types().next().unwrap();
    assert_eq!(user.properties[1].type_ref, TypeRef::list_of("Role"));
}

#[test]
fn test_data_type_can_reference_itself() {
    let result = parse("Node { next: Node, children: Node[] }", &types()).unwrap();
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_method_parameters() {
    let opts = ParseOptions::builder()
        .methods(true)
        .types(true)
        .parameter_annotation("NotNull")
        .build();
    let source = "User { id: string }\nfind(@NotNull id: string, limit : integer):User[]";
    let result = parse(source, &opts).unwrap();
    let find = result.methods().next().unwrap();
    assert_eq!(find.parameters.len(), 2);
    assert_eq!(find.parameters[0].annotations[0].name(), "NotNull");
    assert_eq!(find.parameters[1].type_ref, "integer");
    assert_eq!(find.return_type, TypeRef::list_of("User"));
}

// =============================================================================
// Construct permissions
// =============================================================================

#[test]
fn test_methods_not_allowed_by_default() {
    let err = parse("foo():void", &ParseOptions::default()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Syntax);
    assert_eq!(err.message, "Method definitions not allowed");
}

#[test]
fn test_types_not_allowed_by_default() {
    let err = parse("Foo { }", &methods()).unwrap_err();
    assert_eq!(err.message, "Data type definitions not allowed");
    let err = parse("enum E { A }", &methods()).unwrap_err();
    assert_eq!(err.message, "Enum definitions not allowed");
    assert!(err.is_syntax());
}

#[test]
fn test_permission_errors_ignore_soft_mode() {
    let opts = ParseOptions::builder().soft_errors(true).build();
    assert!(parse("foo():void", &opts).is_err());
}

// =============================================================================
// Syntax errors
// =============================================================================

#[test]
fn test_unbalanced_braces() {
    let err = parse("Foo {\n a: string\n", &types()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Syntax);
    assert_eq!(
        err.message,
        "Expected \"@\", \"}\", comment, or identifier but end of input found."
    );
    assert_eq!(err.location.start(), SourcePos::new(3, 1));
}

#[test]
fn test_missing_return_type() {
    let err = parse("foo()", &methods()).unwrap_err();
    assert_eq!(err.message, "Expected \":\" but end of input found.");
}

#[test]
fn test_unterminated_annotation_string() {
    let opts = ParseOptions::builder()
        .methods(true)
        .method_annotation("Doc")
        .build();
    let err = parse("@Doc(\"open\nfoo():void", &opts).unwrap_err();
    assert_eq!(
        err.message,
        "Expected \"\\\"\" or character but \"\\n\" found."
    );
    assert_eq!(err.location.start(), SourcePos::new(1, 11));
}

// =============================================================================
// Type resolution
// =============================================================================

#[test]
fn test_unknown_type_is_fatal_in_strict_mode() {
    let err = parse("doGet():MyType", &methods()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Semantic);
    assert_eq!(err.message, "Type not found: \"MyType\"");
}

#[test]
fn test_valid_types_resolve() {
    let opts = ParseOptions::builder()
        .methods(true)
        .valid_type("MyType")
        .build();
    let result = parse("doGet():MyType", &opts).unwrap();
    assert_eq!(result.methods().next().unwrap().return_type, "MyType");
}

#[test]
fn test_generic_arity() {
    let opts = ParseOptions::builder()
        .methods(true)
        .valid_type("MyType<*,*>")
        .build();
    let result = parse("doGet():MyType<string,string>", &opts).unwrap();
    let method = result.methods().next().unwrap();
    assert_eq!(method.return_type.generics.len(), 2);

    let err = parse("doGet():MyType<string>", &opts).unwrap_err();
    assert_eq!(err.message, "Invalid number of generic arguments: \"MyType\"");
}

#[test]
fn test_generics_on_plain_type() {
    let err = parse("doGet():string<integer>", &methods()).unwrap_err();
    assert_eq!(
        err.message,
        "Generic arguments not supported for type: \"string\""
    );
}

#[test]
fn test_generic_arguments_are_checked() {
    let opts = ParseOptions::builder()
        .methods(true)
        .valid_type("List<*>")
        .build();
    let err = parse("doGet():List<Missing>", &opts).unwrap_err();
    assert_eq!(err.message, "Type not found: \"Missing\"");
}

// =============================================================================
// Annotation vocabularies
// =============================================================================

#[test]
fn test_annotations_not_allowed_without_vocabulary() {
    let err = parse("@Deprecated foo():void", &methods()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Semantic);
    assert_eq!(err.message, "Annotations not allowed on methods");

    let err = parse("foo(@Path id: string):void", &methods()).unwrap_err();
    assert_eq!(err.message, "Annotations not allowed on parameters");
}

#[test]
fn test_invalid_field_annotation() {
    let opts = ParseOptions::builder()
        .types(true)
        .field_annotation("Required")
        .build();
    assert!(parse("A { @required a: string }", &opts).is_ok());
    let err = parse("A { @Other a: string }", &opts).unwrap_err();
    assert_eq!(err.message, "Invalid field annotation - must be one of @Required");
}

#[test]
fn test_rest_vocabulary_lists_verbs() {
    let err = parse("@FETCH(\"/\") foo():void", &rest()).unwrap_err();
    assert_eq!(
        err.message,
        "Invalid method annotation - must be one of @GET, @POST, @PUT, @PATCH, @DELETE, @HEAD"
    );
}

// =============================================================================
// REST paths
// =============================================================================

#[test]
fn test_rest_path_consistent() {
    let result = parse("@GET(\"/x/{id}\")\ngetX(@Path id: string):void", &rest()).unwrap();
    let method = result.methods().next().unwrap();
    assert_eq!(method.annotations[0].first_argument(), Some("/x/{id}"));
}

#[test]
fn test_rest_path_missing_parameter() {
    let err = parse("@GET(\"/x/{id}\")\ngetX():void", &rest()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Semantic);
    assert_eq!(err.message, "Path variable not found in parameters id");
}

#[test]
fn test_rest_path_unused_parameter() {
    let source = "@GET(\"/x/{id}\")\ngetX(@Path id: string, @Path other: string):void";
    let err = parse(source, &rest()).unwrap_err();
    assert_eq!(
        err.message,
        "Parameter defines path variable \"other\" which is never used in path"
    );
}

#[test]
fn test_rest_path_shape() {
    let err = parse("@POST(\"users/\")\naddUser():void", &rest()).unwrap_err();
    assert!(err.message.starts_with("Invalid URL path specified: \"users/\""));
}

#[test]
fn test_rest_checks_need_rest_option() {
    let opts = ParseOptions::builder()
        .methods(true)
        .method_annotation("GET")
        .build();
    assert!(parse("@GET(\"/x/{id}\")\ngetX():void", &opts).is_ok());
}

// =============================================================================
// Soft errors
// =============================================================================

#[test]
fn test_soft_errors_collect_and_continue() {
    let opts = ParseOptions::builder()
        .methods(true)
        .soft_errors(true)
        .build();
    let result = parse("@DoesntExist doGet():MyType\n", &opts).unwrap();
    assert_eq!(result.entities.len(), 1);
    assert_eq!(result.methods().next().unwrap().name, "doGet");

    assert_eq!(result.diagnostics.len(), 2);
    assert_eq!(result.diagnostics[0].severity(), Severity::Error);
    assert_eq!(
        result.diagnostics[0].message(),
        "Annotations not allowed on methods"
    );
    assert_eq!(result.diagnostics[1].severity(), Severity::Warning);
    assert_eq!(result.diagnostics[1].message(), "Type not found: \"MyType\"");
    assert!(result.has_errors());
}

#[test]
fn test_soft_errors_keep_later_entities() {
    let opts = ParseOptions::builder()
        .methods(true)
        .types(true)
        .rest(true)
        .soft_errors(true)
        .build();
    let source = "a():X\n@GET(\"/{id}\") b():void\nC { c: Y }";
    let result = parse(source, &opts).unwrap();
    assert_eq!(result.entities.len(), 3);
    let messages: Vec<_> = result.diagnostics.iter().map(|d| d.message()).collect();
    assert_eq!(
        messages,
        vec![
            "Type not found: \"X\"",
            "Path variable not found in parameters id",
            "Type not found: \"Y\"",
        ]
    );
    assert_eq!(result.diagnostics[2].location().start(), SourcePos::new(3, 8));
}

#[test]
fn test_forward_reference_warns() {
    let opts = ParseOptions::builder()
        .types(true)
        .soft_errors(true)
        .build();
    let result = parse("A { b: B }\nB { x: string }", &opts).unwrap();
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].severity(), Severity::Warning);
    assert!(!result.has_errors());
}
