use super::combinators::{choice, nested, Alt, Res};
use crate::lexer::{self, Lexer};
use crate::{optional, required, NonNullType, Type, TypeName};

/// A named type, else a list type. Either may carry a trailing `!`.
pub fn parse_type<'a>(lx: Lexer<'a>) -> Res<'a, Type<'a>> {
    let alternatives: [Alt<'_, 'a, Type<'a>>; 2] = [&parse_named_type, &parse_list_type];
    choice(lx, &alternatives)
}

fn parse_named_type<'a>(lx: Lexer<'a>) -> Res<'a, Type<'a>> {
    let (name, lx) = lexer::name(lx)?;
    let name = TypeName(name);
    let (non_null, lx) = optional!(lx, Bang);
    let ty = if non_null {
        Type::NonNull(NonNullType::Named(name))
    } else {
        Type::Named(name)
    };
    Ok((ty, lx))
}

fn parse_list_type<'a>(lx: Lexer<'a>) -> Res<'a, Type<'a>> {
    let lx = required!(lx, OpenBracket);
    nested(lx, |lx| {
        let (of, lx) = parse_type(lx)?;
        let lx = required!(lx, CloseBracket);
        let of = Box::new(of);
        let (non_null, lx) = optional!(lx, Bang);
        let ty = if non_null {
            Type::NonNull(NonNullType::List(of))
        } else {
            Type::List(of)
        };
        Ok((ty, lx))
    })
}

#[cfg(test)]
use crate::{parse_type_ref, ParserError, Pos};

#[cfg(test)]
fn non_null_named(name: &str) -> Type<'_> {
    Type::NonNull(NonNullType::Named(TypeName(name)))
}

#[test]
fn parses_named_types() {
    assert_eq!(parse_type_ref("Int").unwrap(), Type::named("Int"));
    assert_eq!(parse_type_ref("Int!").unwrap(), non_null_named("Int"));
    assert_eq!(parse_type_ref("  uuid ! ").unwrap(), non_null_named("uuid"));
}

#[test]
fn parses_list_types() {
    assert_eq!(
        parse_type_ref("[Int]").unwrap(),
        Type::list(Type::named("Int"))
    );
    assert_eq!(
        parse_type_ref("[Int!]!").unwrap(),
        Type::NonNull(NonNullType::List(Box::new(non_null_named("Int"))))
    );
    assert_eq!(
        parse_type_ref("[[String]!]").unwrap(),
        Type::list(Type::NonNull(NonNullType::List(Box::new(Type::named(
            "String"
        )))))
    );
}

#[test]
fn double_bang_is_rejected() {
    let err = parse_type_ref("Int!!").unwrap_err();
    assert_eq!(err, ParserError::syntax(4, Pos { line: 1, col: 5 }, "end of input"));
}

#[test]
fn unclosed_list_type_is_rejected() {
    let err = parse_type_ref("[Int").unwrap_err();
    assert_eq!(err, ParserError::syntax(4, Pos { line: 1, col: 5 }, "']'"));
}

#[test]
fn missing_type_lists_both_forms() {
    let err = parse_type_ref("!").unwrap_err();
    assert_eq!(
        err.to_string(),
        "syntax error at 1:1 (offset 0): expected one of identifier, '['"
    );
}

#[test]
fn depth_limit_applies_to_list_types() {
    let config = crate::ParserConfig::default().with_depth_limit(1);
    assert!(crate::parse_type_ref_with_config("[Int]", config).is_ok());
    let err = crate::parse_type_ref_with_config("[[Int]]", config).unwrap_err();
    assert_eq!(
        err,
        ParserError::DepthLimitExceeded {
            limit: 1,
            pos: Pos { line: 1, col: 3 }
        }
    );
}
