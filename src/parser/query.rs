use super::combinators::{choice, many, maybe, sep_by, token, Alt, Res};
use super::types::parse_type;
use super::values::parse_value;
use super::{start, ParserConfig, ParserError};
use crate::lexer::{self, Lexer};
use crate::{required, Document, OpName, OpType, Operation, Value, Variable, VariableName};
use crate::TokenValue::*;

pub fn parse_document(text: &str) -> Result<Document<'_>, ParserError> {
    parse_document_with_config(text, ParserConfig::default())
}

pub fn parse_document_with_config(
    text: &str,
    config: ParserConfig,
) -> Result<Document<'_>, ParserError> {
    let lx = start(text, &config)?;
    let (definitions, rest) = many(lx, parse_definition)?;
    if !rest.is_eof() {
        log::debug!(
            "ignoring {} bytes of trailing input at {}",
            rest.rest().len(),
            rest.pos()
        );
    }
    let mut doc = Document::new();
    doc.operations = definitions.into_iter().flatten().collect();
    log::trace!("parsed document with {} operation(s)", doc.operations.len());
    Ok(doc)
}

// A query yields an operation. A mutation is recognized but yields nothing.
fn parse_definition<'a>(lx: Lexer<'a>) -> Res<'a, Option<Operation<'a>>> {
    let alternatives: [Alt<'_, 'a, Option<Operation<'a>>>; 2] =
        [&parse_query_definition, &parse_mutation];
    choice(lx, &alternatives)
}

fn parse_query_definition<'a>(lx: Lexer<'a>) -> Res<'a, Option<Operation<'a>>> {
    let (op, lx) = parse_query(lx)?;
    log::trace!("parsed query {:?} at {}", op.name.map(|n| n.as_str()), op.pos);
    Ok((Some(op), lx))
}

/// The `{ name }` shorthand first, then `query name(...) {`.
pub fn parse_query<'a>(lx: Lexer<'a>) -> Res<'a, Operation<'a>> {
    let alternatives: [Alt<'_, 'a, Operation<'a>>; 2] =
        [&parse_implicit_query, &parse_explicit_query];
    choice(lx, &alternatives)
}

fn parse_implicit_query<'a>(lx: Lexer<'a>) -> Res<'a, Operation<'a>> {
    let pos = lx.pos();
    let lx = required!(lx, OpenCurly);
    let (name, lx) = lexer::name(lx)?;
    let lx = required!(lx, CloseCurly);
    let op = Operation::new(pos, OpType::Query, Some(OpName(name)), Vec::new());
    Ok((op, lx))
}

fn parse_explicit_query<'a>(lx: Lexer<'a>) -> Res<'a, Operation<'a>> {
    let pos = lx.pos();
    let lx = required!(lx, Query);
    let (name, lx) = lexer::name(lx)?;
    let (variables, lx) = maybe(lx, parse_variable_definitions)?;
    // the operation ends at the opening brace of its selection set; the
    // selection set itself is not parsed.
    let lx = required!(lx, OpenCurly);
    let op = Operation::new(
        pos,
        OpType::Query,
        Some(OpName(name)),
        variables.unwrap_or_default(),
    );
    Ok((op, lx))
}

fn parse_mutation<'a>(lx: Lexer<'a>) -> Res<'a, Option<Operation<'a>>> {
    let pos = lx.pos();
    let lx = required!(lx, Mutation);
    log::debug!("skipping mutation at {pos}: mutations do not produce operations");
    Ok((None, lx))
}

/// `( $name: Type = default, ... )`
pub fn parse_variable_definitions<'a>(lx: Lexer<'a>) -> Res<'a, Vec<Variable<'a>>> {
    let lx = required!(lx, OpenParen);
    let (variables, lx) = sep_by(lx, parse_variable_definition, token(Comma))?;
    let lx = required!(lx, CloseParen);
    Ok((variables, lx))
}

fn parse_variable_definition<'a>(lx: Lexer<'a>) -> Res<'a, Variable<'a>> {
    let pos = lx.pos();
    let lx = required!(lx, Dollar);
    let (name, lx) = lexer::name(lx)?;
    let lx = required!(lx, Colon);
    let (var_type, lx) = parse_type(lx)?;
    let (default_value, lx) = maybe(lx, parse_default_value)?;
    let variable = Variable {
        pos,
        name: VariableName(name),
        var_type,
        default_value,
    };
    Ok((variable, lx))
}

fn parse_default_value<'a>(lx: Lexer<'a>) -> Res<'a, Value> {
    let lx = required!(lx, EqualSign);
    parse_value(lx)
}

#[cfg(test)]
use crate::{Map, NonNullType, Pos, Type, TypeName};

#[cfg(test)]
fn only_operation<'a>(doc: &'a Document<'a>) -> &'a Operation<'a> {
    assert_eq!(doc.operations.len(), 1, "operations: {:?}", doc.operations);
    assert!(doc.fragments.is_empty());
    &doc.operations[0]
}

#[test]
fn parses_implicit_query() {
    let doc = parse_document("{ myquery }").unwrap();
    let op = only_operation(&doc);
    assert_eq!(op.pos, Pos { line: 1, col: 1 });
    assert_eq!(op.op_type, OpType::Query);
    assert_eq!(op.name, Some(OpName("myquery")));
    assert_eq!(op.variables, vec![]);
    assert_eq!(op.directives, None);
    assert_eq!(op.selection_set, None);
}

#[test]
fn parses_explicit_query_with_one_variable() {
    let doc = parse_document("query myquery($participant: uuid!) {").unwrap();
    let op = only_operation(&doc);
    assert_eq!(op.op_type, OpType::Query);
    assert_eq!(op.name, Some(OpName("myquery")));
    assert_eq!(
        op.variables,
        vec![Variable {
            pos: Pos { line: 1, col: 15 },
            name: VariableName("participant"),
            var_type: Type::NonNull(NonNullType::Named(TypeName("uuid"))),
            default_value: None,
        }]
    );
}

#[test]
fn parses_explicit_query_spread_over_lines() {
    let text = r#"
    query myquery(
      $participant:uuid!
    ) {
    "#;
    let doc = parse_document(text).unwrap();
    let op = only_operation(&doc);
    assert_eq!(op.pos, Pos { line: 2, col: 5 });
    assert_eq!(op.name, Some(OpName("myquery")));
    let variable = op.variable("participant").unwrap();
    assert_eq!(variable.pos, Pos { line: 3, col: 7 });
    assert_eq!(variable.var_type.to_string(), "uuid!");
}

#[test]
fn parses_explicit_query_without_variables() {
    let doc = parse_document("query plain {").unwrap();
    let op = only_operation(&doc);
    assert_eq!(op.name, Some(OpName("plain")));
    assert!(op.variables.is_empty());

    let doc = parse_document("query empty() {").unwrap();
    assert!(only_operation(&doc).variables.is_empty());
}

#[test]
fn parses_variables_with_defaults() {
    let text = r#"query q($limit: Int = 10, $ids: [ID!]! = [], $where: Filter = {"a": {"b": null}}, $on: Boolean = true) {"#;
    let doc = parse_document(text).unwrap();
    let op = only_operation(&doc);
    let names: Vec<_> = op.variables.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["limit", "ids", "where", "on"]);

    assert_eq!(op.variables[0].default_value, Some(Value::Number(10.0)));
    assert_eq!(op.variables[1].var_type.to_string(), "[ID!]!");
    assert_eq!(op.variables[1].default_value, Some(Value::List(vec![])));

    let mut inner = Map::new();
    inner.insert("b".to_string(), Value::Null);
    let mut outer = Map::new();
    outer.insert("a".to_string(), Value::Object(inner));
    assert_eq!(op.variables[2].default_value, Some(Value::Object(outer)));
    assert_eq!(op.variables[3].default_value, Some(Value::Boolean(true)));
}

#[test]
fn assembles_back_to_back_queries_in_order() {
    let doc = parse_document("{a}{b}").unwrap();
    let names: Vec<_> = doc.operations.iter().map(|op| op.name).collect();
    assert_eq!(names, vec![Some(OpName("a")), Some(OpName("b"))]);
    assert!(doc.fragments.is_empty());
}

#[test]
fn parses_empty_document() {
    assert_eq!(parse_document("").unwrap(), Document::new());
    assert_eq!(parse_document(" \n\t ").unwrap(), Document::new());
}

#[test]
fn mutations_are_recognized_but_skipped() {
    let doc = parse_document("mutation {a} mutation").unwrap();
    let op = only_operation(&doc);
    assert_eq!(op.name, Some(OpName("a")));
    assert_eq!(op.pos, Pos { line: 1, col: 10 });
}

#[test]
fn trailing_input_that_starts_no_operation_is_ignored() {
    let doc = parse_document("{a} trailing garbage").unwrap();
    assert_eq!(only_operation(&doc).name, Some(OpName("a")));

    let doc = parse_document("{a}}").unwrap();
    assert_eq!(only_operation(&doc).name, Some(OpName("a")));
}

#[test]
fn trailing_operation_that_breaks_off_is_an_error() {
    let err = parse_document("{a} query (").unwrap_err();
    assert_eq!(err, ParserError::syntax(10, Pos { line: 1, col: 11 }, "identifier"));
}

#[test]
fn missing_query_name_is_a_syntax_error() {
    let err = parse_document("query (").unwrap_err();
    assert_eq!(err, ParserError::syntax(6, Pos { line: 1, col: 7 }, "identifier"));
}

#[test]
fn implicit_query_needs_a_name() {
    let err = parse_document("{ }").unwrap_err();
    assert_eq!(err, ParserError::syntax(2, Pos { line: 1, col: 3 }, "identifier"));
}

#[test]
fn implicit_query_does_not_parse_selections() {
    let err = parse_document("{ a b }").unwrap_err();
    assert_eq!(err, ParserError::syntax(4, Pos { line: 1, col: 5 }, "'}'"));
}

#[test]
fn explicit_query_needs_its_opening_brace() {
    let err = parse_document("query q($a: Int)").unwrap_err();
    assert_eq!(err, ParserError::syntax(16, Pos { line: 1, col: 17 }, "'{'"));
}

#[test]
fn variable_definition_errors_point_at_the_mismatch() {
    let err = parse_document("query q($a Int) {").unwrap_err();
    assert_eq!(err, ParserError::syntax(11, Pos { line: 1, col: 12 }, "':'"));

    let err = parse_document("query q($a: ) {").unwrap_err();
    assert_eq!(
        err.to_string(),
        "syntax error at 1:13 (offset 12): expected one of identifier, '['"
    );

    let err = parse_document("query q($a: Int = ) {").unwrap_err();
    assert!(err.is_syntax());
    assert_eq!(err.pos(), Some(Pos { line: 1, col: 19 }));
}

#[test]
fn query_keyword_must_stand_alone() {
    // `queryx` is a name, so no operation starts here
    let doc = parse_document("queryx q {").unwrap();
    assert!(doc.operations.is_empty());
}

#[test]
fn text_size_limit_is_enforced() {
    let config = ParserConfig::default().with_text_size_limit(4);
    let err = parse_document_with_config("{abc}", config).unwrap_err();
    assert_eq!(
        err,
        ParserError::TextSizeLimitExceeded {
            limit: 4,
            text_size: 5
        }
    );
    assert!(parse_document_with_config("{ab}", config).is_ok());
}
