//! Building blocks shared by every grammar rule.
//!
//! A rule is any `Fn(Lexer<'a>) -> Res<'a, T>`. Rules never mutate anything: a
//! failed attempt is undone by handing the next attempt the same cursor.
//!
//! A failure counts as "did not match" only while the rule has not consumed
//! anything past its starting offset. Once a rule got past its first lexeme the
//! failure is real and it propagates through `choice`, `maybe`, `many` and
//! `sep_by` unchanged. Every alternative in this grammar is decided by its first
//! lexeme, so this accepts the same documents as unlimited backtracking while
//! keeping the error at the real mismatch.

use super::ParserError;
use crate::lexer::{self, Lexer};
use crate::TokenValue;

pub type Res<'a, T> = Result<(T, Lexer<'a>), ParserError>;

/// One alternative of an ordered choice.
pub type Alt<'r, 'a, T> = &'r dyn Fn(Lexer<'a>) -> Res<'a, T>;

/// Consumes a required token or returns early with a syntax error.
#[macro_export]
macro_rules! required {
    ($lx:expr, $tv:ident) => {
        $crate::lexer::token($lx, $crate::TokenValue::$tv)?.1
    };
}

/// Consumes a token if it is next. Evaluates to `(was_present, lexer)`.
#[macro_export]
macro_rules! optional {
    ($lx:expr, $tv:ident) => {{
        let lx = $lx;
        match $crate::lexer::token(lx, $crate::TokenValue::$tv) {
            Ok(((), next)) => (true, next),
            Err(_) => (false, lx),
        }
    }};
}

/// A rule matching a single punctuation or keyword token.
pub fn token<'a>(tv: TokenValue) -> impl Fn(Lexer<'a>) -> Res<'a, ()> {
    move |lx| Ok(lexer::token(lx, tv)?)
}

/// Ordered choice: the first alternative that matches wins.
///
/// When every alternative fails at the starting position the error lists what
/// each of them expected.
pub fn choice<'a, T>(lx: Lexer<'a>, alternatives: &[Alt<'_, 'a, T>]) -> Res<'a, T> {
    let mut failure: Option<ParserError> = None;
    for alternative in alternatives {
        match alternative(lx) {
            Ok(matched) => return Ok(matched),
            Err(err) if err.is_backtrackable_at(lx.offset()) => {
                failure = Some(match failure {
                    Some(prev) => prev.merge(err),
                    None => err,
                });
            }
            Err(err) => return Err(err),
        }
    }
    Err(failure.unwrap_or_else(|| ParserError::syntax(lx.offset(), lx.pos(), "alternative")))
}

/// Zero or one `rule`.
pub fn maybe<'a, T>(lx: Lexer<'a>, rule: impl Fn(Lexer<'a>) -> Res<'a, T>) -> Res<'a, Option<T>> {
    match rule(lx) {
        Ok((value, next)) => Ok((Some(value), next)),
        Err(err) if err.is_backtrackable_at(lx.offset()) => Ok((None, lx)),
        Err(err) => Err(err),
    }
}

/// Zero or more `rule`, stopping at the first non-match.
pub fn many<'a, T>(lx: Lexer<'a>, rule: impl Fn(Lexer<'a>) -> Res<'a, T>) -> Res<'a, Vec<T>> {
    let mut items = Vec::new();
    let mut cur = lx;
    loop {
        match rule(cur) {
            // a match that consumed nothing would repeat forever
            Ok((_, next)) if next.offset() == cur.offset() => break,
            Ok((item, next)) => {
                items.push(item);
                cur = next;
            }
            Err(err) if err.is_backtrackable_at(cur.offset()) => break,
            Err(err) => return Err(err),
        }
    }
    Ok((items, cur))
}

/// Zero or more `item` separated by `sep`. A trailing separator is not part of
/// the match.
pub fn sep_by<'a, T, S>(
    lx: Lexer<'a>,
    item: impl Fn(Lexer<'a>) -> Res<'a, T>,
    sep: impl Fn(Lexer<'a>) -> Res<'a, S>,
) -> Res<'a, Vec<T>> {
    let (first, mut cur) = match maybe(lx, &item)? {
        (Some(first), next) => (first, next),
        (None, lx) => return Ok((Vec::new(), lx)),
    };
    let mut items = vec![first];
    loop {
        match maybe(cur, &sep)? {
            (Some(_), next) => {
                let (value, next) = item(next)?;
                items.push(value);
                cur = next;
            }
            (None, _) => break,
        }
    }
    Ok((items, cur))
}

/// Runs `rule` one nesting level deeper, failing hard once the configured depth
/// limit is reached.
pub fn nested<'a, T>(lx: Lexer<'a>, rule: impl Fn(Lexer<'a>) -> Res<'a, T>) -> Res<'a, T> {
    let depth = lx.depth();
    if depth >= lx.depth_limit() {
        return Err(ParserError::DepthLimitExceeded {
            limit: lx.depth_limit(),
            pos: lx.pos(),
        });
    }
    let (value, next) = rule(lx.with_depth(depth + 1))?;
    Ok((value, next.with_depth(depth)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pos;
    use TokenValue::*;

    fn name<'a>(lx: Lexer<'a>) -> Res<'a, &'a str> {
        Ok(lexer::name(lx)?)
    }

    fn pair<'a>(lx: Lexer<'a>) -> Res<'a, (&'a str, &'a str)> {
        let (left, lx) = name(lx)?;
        let lx = required!(lx, Colon);
        let (right, lx) = name(lx)?;
        Ok(((left, right), lx))
    }

    fn pos(line: usize, col: usize) -> Pos {
        Pos { line, col }
    }

    fn colon<'a>(lx: Lexer<'a>) -> Res<'a, &'a str> {
        let lx = required!(lx, Colon);
        Ok(("colon", lx))
    }

    #[test]
    fn choice_takes_the_first_match() {
        let alternatives: [Alt<'_, '_, &str>; 2] = [&colon, &name];
        let (value, _) = choice(Lexer::new(": b"), &alternatives).unwrap();
        assert_eq!(value, "colon");
        let (value, rest) = choice(Lexer::new("b :"), &alternatives).unwrap();
        assert_eq!(value, "b");
        assert_eq!(rest.rest(), ":");
    }

    #[test]
    fn choice_merges_expectations_of_failed_alternatives() {
        let open = token(OpenParen);
        let close = token(CloseParen);
        let alternatives: [Alt<'_, '_, ()>; 2] = [&open, &close];
        let err = choice(Lexer::new("x"), &alternatives).unwrap_err();
        assert_eq!(err.to_string(), "syntax error at 1:1 (offset 0): expected one of '(', ')'");
    }

    #[test]
    fn choice_does_not_retry_after_progress() {
        let alternatives: [Alt<'_, '_, (&str, &str)>; 2] =
            [&pair, &|lx| Ok((("fallback", ""), lx))];
        let err = choice(Lexer::new("a: :"), &alternatives).unwrap_err();
        assert_eq!(err, ParserError::syntax(3, pos(1, 4), "identifier"));
    }

    #[test]
    fn maybe_restores_the_cursor() {
        let lx = Lexer::new("(rest");
        let (found, next) = maybe(lx, token(CloseParen)).unwrap();
        assert_eq!(found, None);
        assert_eq!(next.offset(), 0);
    }

    #[test]
    fn many_stops_at_the_first_non_match() {
        let (names, rest) = many(Lexer::new("a b c ("), name).unwrap();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(rest.rest(), "(");
    }

    #[test]
    fn sep_by_allows_zero_items() {
        let (names, rest) = sep_by(Lexer::new("]"), name, token(Comma)).unwrap();
        assert!(names.is_empty());
        assert_eq!(rest.offset(), 0);
    }

    #[test]
    fn sep_by_rejects_a_dangling_separator() {
        let (names, _) = sep_by(Lexer::new("a, b,c"), name, token(Comma)).unwrap();
        assert_eq!(names, vec!["a", "b", "c"]);
        let err = sep_by(Lexer::new("a, ]"), name, token(Comma)).unwrap_err();
        assert_eq!(err, ParserError::syntax(3, pos(1, 4), "identifier"));
    }

    #[test]
    fn nested_enforces_the_depth_limit() {
        let lx = Lexer::with_depth_limit("a", 1);
        let (value, next) = nested(lx, name).unwrap();
        assert_eq!(value, "a");
        assert_eq!(next.depth(), 0);

        let deep = lx.with_depth(1);
        let err = nested(deep, name).unwrap_err();
        assert_eq!(
            err,
            ParserError::DepthLimitExceeded {
                limit: 1,
                pos: pos(1, 1)
            }
        );
    }
}
