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

//! Recursive-descent parser for Kaplang source.
//!
//! The parser builds the entity tree directly and runs the semantic checks
//! of [`crate::validate`] as each construct completes. Grammar errors stop
//! the parse immediately; semantic findings follow
//! [`ParseOptions::soft_errors`].
//!
//! # Comments
//!
//! A run of `//` lines directly above a declaration (or its first
//! annotation), with no blank line in between, becomes that declaration's
//! description. Every other top-level comment line is emitted as its own
//! [`Entity::Comment`]. Inside data type bodies the same rule attaches
//! descriptions to properties and drops all other comments.

use tracing::{debug, trace};

use crate::diagnostic::Diagnostic;
use crate::error::{KaplangError, KaplangResult};
use crate::lex::cursor::{is_identifier_char, Cursor};
use crate::lex::literal::{quote, scan_literal, Literal, LiteralFailure};
use crate::lex::{SourcePos, Span};
use crate::model::{
    Annotation, Comment, DataType, DefaultValue, Entity, Enum, Method, Parameter, Property,
    TypeRef,
};
use crate::options::ParseOptions;
use crate::validate::{AnnotationSite, Validator};

/// Output of a successful parse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseResult {
    /// Top-level entities in source order.
    pub entities: Vec<Entity>,
    /// Source span of each entity, parallel to `entities`.
    pub spans: Vec<Span>,
    /// Semantic findings collected in soft-error mode, in discovery order.
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseResult {
    /// Entities paired with their spans.
    pub fn iter(&self) -> impl Iterator<Item = (&Entity, Span)> {
        self.entities.iter().zip(self.spans.iter().copied())
    }

    /// True if any collected diagnostic has error severity.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.entities.iter().filter_map(|e| match e {
            Entity::Method(m) => Some(m),
            _ => None,
        })
    }

    pub fn data_types(&self) -> impl Iterator<Item = &DataType> {
        self.entities.iter().filter_map(|e| match e {
            Entity::DataType(d) => Some(d),
            _ => None,
        })
    }

    pub fn enums(&self) -> impl Iterator<Item = &Enum> {
        self.entities.iter().filter_map(|e| match e {
            Entity::Enum(e) => Some(e),
            _ => None,
        })
    }

    /// The first entity whose span contains `pos`.
    pub fn entity_at(&self, pos: SourcePos) -> Option<&Entity> {
        self.iter()
            .find(|(_, span)| span.contains(pos))
            .map(|(entity, _)| entity)
    }
}

/// Parses Kaplang source.
///
/// # Examples
///
/// ```
/// use kaplang_core::{parse, Entity, ParseOptions};
///
/// let opts = ParseOptions::builder().methods(true).build();
/// let result = parse("//Some\n//description\nmyMethod():void", &opts).unwrap();
/// match &result.entities[0] {
///     Entity::Method(m) => assert_eq!(m.description.as_deref(), Some("Some\ndescription")),
///     other => panic!("unexpected entity {:?}", other),
/// }
/// ```
pub fn parse(text: &str, options: &ParseOptions) -> KaplangResult<ParseResult> {
    debug!(len = text.len(), soft = options.soft_errors, "parsing kaplang source");
    let parser = Parser::new(text, options);
    let result = parser.document()?;
    debug!(
        entities = result.entities.len(),
        diagnostics = result.diagnostics.len(),
        "parse finished"
    );
    Ok(result)
}

/// Parses a standalone type reference such as `Map<string, User[]>[]`.
///
/// No name resolution is performed.
///
/// ```
/// use kaplang_core::{parse_type_reference, TypeRef};
///
/// let t = parse_type_reference("User[]").unwrap();
/// assert_eq!(t, TypeRef::list_of("User"));
/// assert!(parse_type_reference("User[").is_err());
/// ```
pub fn parse_type_reference(text: &str) -> KaplangResult<TypeRef> {
    let mut cursor = Cursor::new(text);
    cursor.eat_while(char::is_whitespace);
    let type_ref = read_type_ref(&mut cursor, 0, crate::options::DEFAULT_MAX_NESTING_DEPTH)?;
    cursor.eat_while(char::is_whitespace);
    if !cursor.is_eof() {
        return Err(expected(&cursor, &["\"<\"", "\"[]\"", "end of input"]));
    }
    Ok(type_ref)
}

/// Builds a `Expected a, b, or c but "x" found.` syntax error at the cursor.
fn expected(cursor: &Cursor<'_>, items: &[&str]) -> KaplangError {
    let list = match items {
        [] => "nothing".to_string(),
        [one] => (*one).to_string(),
        [first, second] => format!("{} or {}", first, second),
        [init @ .., last] => format!("{}, or {}", init.join(", "), last),
    };
    let found = match cursor.peek() {
        Some(ch) => quote(&ch.to_string()),
        None => "end of input".to_string(),
    };
    KaplangError::syntax(
        format!("Expected {} but {} found.", list, found),
        cursor.next_char_span(),
    )
}

fn literal_error(cursor: &Cursor<'_>, failure: LiteralFailure) -> KaplangError {
    match failure {
        LiteralFailure::Missing => expected(
            cursor,
            &["\"false\"", "\"null\"", "\"true\"", "number", "string"],
        ),
        LiteralFailure::Unterminated(q) => {
            let quote_char = quote(&q.to_string());
            expected(cursor, &[quote_char.as_str(), "character"])
        }
        LiteralFailure::BadEscape => expected(cursor, &["escape sequence"]),
        LiteralFailure::BadNumber => expected(cursor, &["digit"]),
    }
}

fn nesting_error(cursor: &Cursor<'_>, max: usize) -> KaplangError {
    KaplangError::security(
        format!("Maximum nesting depth of {} exceeded", max),
        cursor.next_char_span(),
    )
}

fn read_identifier<'a>(cursor: &mut Cursor<'a>, also: &[&str]) -> KaplangResult<&'a str> {
    match cursor.identifier() {
        Some(id) => Ok(id),
        None => {
            let mut items = also.to_vec();
            items.push("identifier");
            Err(expected(cursor, &items))
        }
    }
}

/// `ID ["<" type ("," type)* ">"] ["[]"]`, whitespace allowed inside `<>`.
fn read_type_ref(cursor: &mut Cursor<'_>, depth: usize, max: usize) -> KaplangResult<TypeRef> {
    if depth > max {
        return Err(nesting_error(cursor, max));
    }
    let name = read_identifier(cursor, &[])?;
    let mut type_ref = TypeRef::simple(name);
    if cursor.eat('<') {
        loop {
            cursor.eat_while(char::is_whitespace);
            type_ref
                .generics
                .push(read_type_ref(cursor, depth + 1, max)?);
            cursor.eat_while(char::is_whitespace);
            if cursor.eat('>') {
                break;
            }
            if !cursor.eat(',') {
                return Err(expected(cursor, &["\",\"", "\">\""]));
            }
        }
    }
    if cursor.eat('[') {
        if !cursor.eat(']') {
            return Err(expected(cursor, &["\"]\""]));
        }
        type_ref.list = true;
    }
    Ok(type_ref)
}

struct PendingComment {
    text: String,
    slash: bool,
    standalone: bool,
    span: Span,
}

/// Removes the description run ending on the line before `line` from
/// `pending` and returns its joined text.
fn take_description(pending: &mut Vec<PendingComment>, line: usize) -> Option<String> {
    let mut split = pending.len();
    let mut expected_line = line;
    while split > 0 {
        let comment = &pending[split - 1];
        if comment.slash && comment.standalone && comment.span.start().line() + 1 == expected_line
        {
            expected_line -= 1;
            split -= 1;
        } else {
            break;
        }
    }
    if split == pending.len() {
        return None;
    }
    let run = pending.split_off(split);
    Some(
        run.into_iter()
            .map(|c| c.text)
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

struct Parser<'a, 'o> {
    cursor: Cursor<'a>,
    options: &'o ParseOptions,
    validator: Validator<'o>,
    depth: usize,
}

impl<'a, 'o> Parser<'a, 'o> {
    fn new(text: &'a str, options: &'o ParseOptions) -> Self {
        Self {
            cursor: Cursor::new(text),
            options,
            validator: Validator::new(options),
            depth: 0,
        }
    }

    fn document(mut self) -> KaplangResult<ParseResult> {
        let mut result = ParseResult::default();
        let mut pending: Vec<PendingComment> = Vec::new();
        let mut last_code_line = 0;

        loop {
            self.skip_whitespace();
            if self.cursor.is_eof() {
                break;
            }
            if self.cursor.at_comment() {
                pending.push(self.comment(last_code_line));
                continue;
            }
            if !matches!(self.cursor.peek(), Some(c) if c == '@' || is_identifier_char(c)) {
                return Err(expected(
                    &self.cursor,
                    &["\"@\"", "comment", "end of input", "identifier"],
                ));
            }

            let start = self.cursor.pos();
            let description = take_description(&mut pending, start.line());
            for comment in pending.drain(..) {
                push_comment(&mut result, comment);
            }
            let entity = self.declaration(description)?;
            let span = self.cursor.span_from(start);
            trace!(kind = %entity.kind(), name = ?entity.name(), "parsed entity");
            result.entities.push(entity);
            result.spans.push(span);
            last_code_line = self.cursor.pos().line();
        }

        for comment in pending {
            push_comment(&mut result, comment);
        }
        result.diagnostics = self.validator.into_diagnostics();
        Ok(result)
    }

    fn skip_whitespace(&mut self) {
        self.cursor.eat_while(char::is_whitespace);
    }

    /// Skips whitespace and comments.
    fn skip_trivia(&mut self) {
        loop {
            self.skip_whitespace();
            if !self.cursor.at_comment() {
                break;
            }
            self.cursor.eat_while(|c| c != '\n');
        }
    }

    /// Reads one comment line; the cursor is on `#` or `//`.
    fn comment(&mut self, last_code_line: usize) -> PendingComment {
        let start = self.cursor.pos();
        let slash = self.cursor.eat_str("//");
        if !slash {
            self.cursor.eat('#');
        }
        let text = self.cursor.eat_while(|c| c != '\n');
        PendingComment {
            text: text.strip_suffix('\r').unwrap_or(text).to_string(),
            slash,
            standalone: start.line() > last_code_line,
            span: self.cursor.span_from(start),
        }
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        self.cursor.starts_with(keyword)
            && !self.cursor.rest()[keyword.len()..]
                .chars()
                .next()
                .is_some_and(is_identifier_char)
    }

    fn declaration(&mut self, description: Option<String>) -> KaplangResult<Entity> {
        let (annotations, annotation_spans) = self.annotations()?;
        self.skip_trivia();

        if self.at_keyword("enum") {
            let keyword_span = self.cursor.next_char_span();
            if !self.options.types {
                return Err(KaplangError::syntax(
                    "Enum definitions not allowed",
                    keyword_span,
                ));
            }
            self.cursor.eat_str("enum");
            self.validator
                .check_annotations(AnnotationSite::Type, &annotations, &annotation_spans)?;
            let mut enumeration = self.enum_body()?;
            enumeration.description = description;
            enumeration.annotations = annotations;
            return Ok(Entity::Enum(enumeration));
        }

        let name_start = self.cursor.pos();
        let name = read_identifier(&mut self.cursor, &["\"@\"", "\"enum\""])?;
        let name_span = self.cursor.span_from(name_start);
        self.skip_trivia();

        match self.cursor.peek() {
            Some('{') => {
                if !self.options.types {
                    return Err(KaplangError::syntax(
                        "Data type definitions not allowed",
                        name_span,
                    ));
                }
                self.validator
                    .check_annotations(AnnotationSite::Type, &annotations, &annotation_spans)?;
                self.validator.declare(name);
                self.cursor.bump();
                let properties = self.properties()?;
                Ok(Entity::DataType(DataType {
                    name: name.to_string(),
                    description,
                    annotations,
                    properties,
                }))
            }
            Some('(') => {
                if !self.options.methods {
                    return Err(KaplangError::syntax(
                        "Method definitions not allowed",
                        name_span,
                    ));
                }
                self.cursor.bump();
                let mut method = self.method(name, annotations, annotation_spans, name_span)?;
                method.description = description;
                Ok(Entity::Method(method))
            }
            _ => Err(expected(&self.cursor, &["\"(\"", "\"{\""])),
        }
    }

    /// Zero or more annotations, each followed by trivia.
    fn annotations(&mut self) -> KaplangResult<(Vec<Annotation>, Vec<Span>)> {
        let mut annotations = Vec::new();
        let mut spans = Vec::new();
        loop {
            self.skip_trivia();
            if self.cursor.peek() != Some('@') {
                break;
            }
            let start = self.cursor.pos();
            annotations.push(self.annotation()?);
            spans.push(self.cursor.span_from(start));
        }
        Ok((annotations, spans))
    }

    /// `"@" ID ["(" [arg ("," arg)*] ")"]`
    fn annotation(&mut self) -> KaplangResult<Annotation> {
        self.cursor.bump();
        let name = read_identifier(&mut self.cursor, &[])?;
        let mut annotation = Annotation::new(format!("@{}", name));
        if !self.cursor.eat('(') {
            return Ok(annotation);
        }
        self.skip_whitespace();
        if self.cursor.eat(')') {
            return Ok(annotation);
        }
        loop {
            self.skip_whitespace();
            self.annotation_argument(&mut annotation)?;
            self.skip_whitespace();
            if self.cursor.eat(')') {
                return Ok(annotation);
            }
            if !self.cursor.eat(',') {
                return Err(expected(&self.cursor, &["\")\"", "\",\""]));
            }
        }
    }

    /// `literal | ID "=" literal`
    fn annotation_argument(&mut self, annotation: &mut Annotation) -> KaplangResult<()> {
        let checkpoint = self.cursor.clone();
        if let Some(key) = self.cursor.identifier() {
            self.skip_whitespace();
            if self.cursor.eat('=') {
                self.skip_whitespace();
                let value = self.literal()?.into_value();
                annotation.options.insert(key.to_string(), value);
                return Ok(());
            }
            self.cursor = checkpoint;
        }
        let value = self.literal()?.into_value();
        annotation.arguments.push(value);
        Ok(())
    }

    fn literal(&mut self) -> KaplangResult<Literal> {
        scan_literal(&mut self.cursor).map_err(|failure| literal_error(&self.cursor, failure))
    }

    fn type_ref(&mut self) -> KaplangResult<(TypeRef, Span)> {
        let start = self.cursor.pos();
        let type_ref = read_type_ref(&mut self.cursor, self.depth, self.options.max_nesting_depth)?;
        Ok((type_ref, self.cursor.span_from(start)))
    }

    fn expect_char(&mut self, ch: char) -> KaplangResult<()> {
        if self.cursor.eat(ch) {
            Ok(())
        } else {
            let literal = quote(&ch.to_string());
            Err(expected(&self.cursor, &[literal.as_str()]))
        }
    }

    /// After `enum`: `ID "{" [ID ("," ID)* [","]] "}"`.
    fn enum_body(&mut self) -> KaplangResult<Enum> {
        self.skip_trivia();
        let name = read_identifier(&mut self.cursor, &[])?.to_string();
        self.validator.declare(&name);
        self.skip_trivia();
        self.expect_char('{')?;

        let mut values = Vec::new();
        loop {
            self.skip_trivia();
            if self.cursor.eat('}') {
                break;
            }
            values.push(read_identifier(&mut self.cursor, &["\"}\""])?.to_string());
            self.skip_trivia();
            if self.cursor.eat('}') {
                break;
            }
            if !self.cursor.eat(',') {
                return Err(expected(&self.cursor, &["\",\"", "\"}\""]));
            }
        }
        Ok(Enum {
            name,
            description: None,
            annotations: Vec::new(),
            values,
        })
    }

    /// Properties up to and including the closing `}`.
    fn properties(&mut self) -> KaplangResult<Vec<Property>> {
        self.depth += 1;
        if self.depth > self.options.max_nesting_depth {
            return Err(nesting_error(&self.cursor, self.options.max_nesting_depth));
        }

        let mut properties = Vec::new();
        let mut pending: Vec<PendingComment> = Vec::new();
        let mut last_code_line = self.cursor.pos().line();
        loop {
            self.skip_whitespace();
            if self.cursor.at_comment() {
                pending.push(self.comment(last_code_line));
                continue;
            }
            if self.cursor.eat('}') {
                break;
            }
            if !matches!(self.cursor.peek(), Some(c) if c == '@' || is_identifier_char(c)) {
                return Err(expected(
                    &self.cursor,
                    &["\"@\"", "\"}\"", "comment", "identifier"],
                ));
            }
            let description = take_description(&mut pending, self.cursor.pos().line());
            pending.clear();
            let mut property = self.property()?;
            property.description = description;
            properties.push(property);

            // The property's own line, not that of a following comment.
            last_code_line = self.cursor.pos().line();
            self.skip_whitespace();
            if self.cursor.eat(',') || self.cursor.eat(';') {
                last_code_line = self.cursor.pos().line();
            }
        }

        self.depth -= 1;
        Ok(properties)
    }

    /// `annotation* ID ":" (type | object | "[" object "]") ["=" literal]`
    fn property(&mut self) -> KaplangResult<Property> {
        let (annotations, annotation_spans) = self.annotations()?;
        self.validator
            .check_annotations(AnnotationSite::Field, &annotations, &annotation_spans)?;
        let name = read_identifier(&mut self.cursor, &["\"@\"", "\"}\""])?.to_string();
        self.skip_whitespace();
        self.expect_char(':')?;
        self.skip_whitespace();

        let mut property = match self.cursor.peek() {
            Some('{') => {
                self.cursor.bump();
                Property::object(name, self.properties()?)
            }
            Some('[') => {
                self.cursor.bump();
                self.skip_whitespace();
                self.expect_char('{')?;
                let nested = self.properties()?;
                self.skip_whitespace();
                self.expect_char(']')?;
                Property::object_list(name, nested)
            }
            _ => {
                let (type_ref, span) = self.type_ref()?;
                self.validator.check_type(&type_ref, span)?;
                Property::new(name, type_ref)
            }
        };
        property.annotations = annotations;

        let checkpoint = self.cursor.clone();
        self.skip_whitespace();
        if self.cursor.eat('=') {
            self.skip_whitespace();
            let start = self.cursor.offset();
            self.literal()?;
            let source = self.cursor.slice(start);
            property.default_value = Some(DefaultValue::Literal(source.to_string()));
        } else {
            self.cursor = checkpoint;
        }
        Ok(property)
    }

    /// After `name(`: parameters, `)`, `:` and the return type. Semantic
    /// checks run once the signature is complete.
    fn method(
        &mut self,
        name: &str,
        annotations: Vec<Annotation>,
        annotation_spans: Vec<Span>,
        name_span: Span,
    ) -> KaplangResult<Method> {
        let mut parameters = Vec::new();
        let mut parameter_checks = Vec::new();
        self.skip_trivia();
        if !self.cursor.eat(')') {
            loop {
                let (param_annotations, param_spans) = self.annotations()?;
                let param_name =
                    read_identifier(&mut self.cursor, &["\"@\"", "\")\""])?.to_string();
                self.skip_trivia();
                self.expect_char(':')?;
                self.skip_trivia();
                let (type_ref, type_span) = self.type_ref()?;
                parameter_checks.push((param_spans, type_span));
                parameters.push(Parameter {
                    name: param_name,
                    type_ref,
                    annotations: param_annotations,
                });
                self.skip_trivia();
                if self.cursor.eat(')') {
                    break;
                }
                if !self.cursor.eat(',') {
                    return Err(expected(&self.cursor, &["\")\"", "\",\""]));
                }
                self.skip_trivia();
            }
        }
        self.skip_trivia();
        self.expect_char(':')?;
        self.skip_trivia();
        let (return_type, return_span) = self.type_ref()?;

        let method = Method {
            name: name.to_string(),
            description: None,
            annotations,
            return_type,
            parameters,
        };

        self.validator
            .check_annotations(AnnotationSite::Method, &method.annotations, &annotation_spans)?;
        for (parameter, (spans, type_span)) in method.parameters.iter().zip(&parameter_checks) {
            self.validator
                .check_annotations(AnnotationSite::Parameter, &parameter.annotations, spans)?;
            self.validator.check_type(&parameter.type_ref, *type_span)?;
        }
        self.validator.check_type(&method.return_type, return_span)?;
        if method.rest_verb().is_some() {
            self.validator
                .check_rest(&method, name_span.merge(return_span))?;
        }
        Ok(method)
    }
}

fn push_comment(result: &mut ParseResult, comment: PendingComment) {
    result.entities.push(Entity::Comment(Comment::new(comment.text)));
    result.spans.push(comment.span);
}
