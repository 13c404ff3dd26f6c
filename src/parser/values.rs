use super::combinators::{choice, nested, sep_by, token, Alt, Res};
use crate::lexer::{self, Lexer};
use crate::{required, Map, TokenValue, Value};
use TokenValue::*;

/// number | object | list | true | false | null, tried in that order.
///
/// A bare quoted string is not a value here; strings only appear as object keys.
pub fn parse_value<'a>(lx: Lexer<'a>) -> Res<'a, Value> {
    let alternatives: [Alt<'_, 'a, Value>; 6] = [
        &parse_number,
        &parse_object,
        &parse_list,
        &parse_true,
        &parse_false,
        &parse_null,
    ];
    choice(lx, &alternatives)
}

fn parse_number<'a>(lx: Lexer<'a>) -> Res<'a, Value> {
    let (n, lx) = lexer::number(lx)?;
    Ok((Value::Number(n), lx))
}

fn parse_list<'a>(lx: Lexer<'a>) -> Res<'a, Value> {
    let lx = required!(lx, OpenBracket);
    nested(lx, |lx| {
        let (items, lx) = sep_by(lx, parse_value, token(Comma))?;
        let lx = required!(lx, CloseBracket);
        Ok((Value::List(items), lx))
    })
}

fn parse_object<'a>(lx: Lexer<'a>) -> Res<'a, Value> {
    let lx = required!(lx, OpenCurly);
    nested(lx, |lx| {
        let (pairs, lx) = sep_by(lx, parse_object_pair, token(Comma))?;
        let lx = required!(lx, CloseCurly);
        // duplicate keys: the last value wins, the first position stays
        let map: Map = pairs.into_iter().collect();
        Ok((Value::Object(map), lx))
    })
}

fn parse_object_pair<'a>(lx: Lexer<'a>) -> Res<'a, (String, Value)> {
    let (key, lx) = lexer::quoted(lx)?;
    let lx = required!(lx, Colon);
    let (value, lx) = parse_value(lx)?;
    Ok(((key, value), lx))
}

fn parse_true<'a>(lx: Lexer<'a>) -> Res<'a, Value> {
    let lx = required!(lx, True);
    Ok((Value::Boolean(true), lx))
}

fn parse_false<'a>(lx: Lexer<'a>) -> Res<'a, Value> {
    let lx = required!(lx, False);
    Ok((Value::Boolean(false), lx))
}

fn parse_null<'a>(lx: Lexer<'a>) -> Res<'a, Value> {
    let lx = required!(lx, Null);
    Ok((Value::Null, lx))
}
