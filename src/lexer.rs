//! The lexer represents the first major step in the parsing process.
//!
//! The lexer here is not a token iterator. A [`Lexer`] is a small `Copy` cursor into
//! the source text and every lexeme function takes one cursor and hands back the
//! recognized value plus an advanced cursor. The whitespace that follows a lexeme is
//! always consumed along with it, so the grammar rules above never deal with spacing.
//!
//! A lexeme that does not match returns a [`LexerError`] and the caller still owns
//! the cursor it started from. Retrying another alternative is just reusing that
//! older cursor.

use std::fmt;

use thiserror::Error as ThisError;

#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub line: usize,
    pub col: usize,
}

impl Pos {
    fn update_char(mut self, c: char) -> Pos {
        match c {
            '\u{FEFF}' | '\r' => (),
            '\t' => self.col += 8,
            '\n' => {
                // go to the next line and cr back to column 1
                self.col = 1;
                self.line += 1;
            }
            _ => self.col += 1,
        }
        self
    }
}

impl Default for Pos {
    fn default() -> Self {
        Pos { line: 1, col: 1 }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

#[inline(always)]
fn char_starts_name(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

#[inline(always)]
fn char_continues_name(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

#[inline(always)]
fn count_digits(bytes: &[u8], start: usize) -> usize {
    bytes
        .get(start..)
        .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
}

/// The fixed-text lexemes of the grammar: punctuation and keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenValue {
    OpenParen,
    CloseParen,
    OpenCurly,
    CloseCurly,
    OpenBracket,
    CloseBracket,
    Colon,
    Comma,
    // $
    Dollar,
    // =
    EqualSign,
    // !
    Bang,
    True,
    False,
    Null,
    Query,
    Mutation,
}

impl TokenValue {
    pub fn as_str(&self) -> &'static str {
        use TokenValue::*;
        match self {
            OpenParen => "(",
            CloseParen => ")",
            OpenCurly => "{",
            CloseCurly => "}",
            OpenBracket => "[",
            CloseBracket => "]",
            Colon => ":",
            Comma => ",",
            Dollar => "$",
            EqualSign => "=",
            Bang => "!",
            True => "true",
            False => "false",
            Null => "null",
            Query => "query",
            Mutation => "mutation",
        }
    }

    /// How the token shows up in an "expected ..." message.
    pub fn label(&self) -> &'static str {
        use TokenValue::*;
        match self {
            OpenParen => "'('",
            CloseParen => "')'",
            OpenCurly => "'{'",
            CloseCurly => "'}'",
            OpenBracket => "'['",
            CloseBracket => "']'",
            Colon => "':'",
            Comma => "','",
            Dollar => "'$'",
            EqualSign => "'='",
            Bang => "'!'",
            True => "'true'",
            False => "'false'",
            Null => "'null'",
            Query => "'query'",
            Mutation => "'mutation'",
        }
    }

    pub fn is_keyword(&self) -> bool {
        use TokenValue::*;
        matches!(self, True | False | Null | Query | Mutation)
    }
}

/// A lexeme did not match at `pos`. Nothing was consumed past `offset`.
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
#[error("expected {expected} at {pos}")]
pub struct LexerError {
    pub offset: usize,
    pub pos: Pos,
    pub expected: &'static str,
}

pub type LexResult<'a, T> = Result<(T, Lexer<'a>), LexerError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct State {
    offset: usize,
    pos: Pos,
    depth: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct Lexer<'a> {
    text: &'a str,
    state: State,
    depth_limit: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Lexer<'a> {
        Lexer::with_depth_limit(text, usize::MAX)
    }

    pub fn with_depth_limit(text: &'a str, depth_limit: usize) -> Lexer<'a> {
        Lexer {
            text,
            state: State::default(),
            depth_limit,
        }
    }

    pub fn offset(&self) -> usize {
        self.state.offset
    }

    pub fn pos(&self) -> Pos {
        self.state.pos
    }

    /// How many lists, objects or list types enclose the cursor.
    pub fn depth(&self) -> usize {
        self.state.depth
    }

    pub fn depth_limit(&self) -> usize {
        self.depth_limit
    }

    pub(crate) fn with_depth(mut self, depth: usize) -> Lexer<'a> {
        self.state.depth = depth;
        self
    }

    /// The not yet consumed part of the source text.
    pub fn rest(&self) -> &'a str {
        &self.text[self.state.offset..]
    }

    pub fn is_eof(&self) -> bool {
        self.state.offset >= self.text.len()
    }

    pub(crate) fn mismatch(&self, expected: &'static str) -> LexerError {
        LexerError {
            offset: self.state.offset,
            pos: self.state.pos,
            expected,
        }
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn next_char(self) -> Option<(char, Lexer<'a>)> {
        let c = self.peek()?;
        Some((c, self.advance(c.len_utf8())))
    }

    // `len` must land on a char boundary of the remaining text.
    fn advance(mut self, len: usize) -> Lexer<'a> {
        let consumed = &self.text[self.state.offset..self.state.offset + len];
        for c in consumed.chars() {
            self.state.pos = self.state.pos.update_char(c);
        }
        self.state.offset += len;
        self
    }

    fn consume_while<F: Fn(char) -> bool>(self, f: F) -> (&'a str, Lexer<'a>) {
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|(_, c)| !f(*c))
            .map_or(rest.len(), |(idx, _)| idx);
        (&rest[..len], self.advance(len))
    }

    /// Skips zero or more whitespace characters, newlines included.
    pub fn skip_whitespace(self) -> Lexer<'a> {
        self.consume_while(char::is_whitespace).1
    }

    fn lexeme<T>(self, value: T) -> LexResult<'a, T> {
        Ok((value, self.skip_whitespace()))
    }
}

/// Recognizes one fixed punctuation or keyword lexeme.
///
/// Keywords must not run into an identifier: `queryName` is a name, never the
/// `query` keyword followed by `Name`.
pub fn token<'a>(lx: Lexer<'a>, tv: TokenValue) -> LexResult<'a, ()> {
    let text = tv.as_str();
    if !lx.rest().starts_with(text) {
        return Err(lx.mismatch(tv.label()));
    }
    let next = lx.advance(text.len());
    if tv.is_keyword() && next.peek().is_some_and(char_continues_name) {
        return Err(lx.mismatch(tv.label()));
    }
    next.lexeme(())
}

/// `[_A-Za-z][_0-9A-Za-z]*`
pub fn name<'a>(lx: Lexer<'a>) -> LexResult<'a, &'a str> {
    match lx.peek() {
        Some(c) if char_starts_name(c) => {
            let (name, next) = lx.consume_while(char_continues_name);
            next.lexeme(name)
        }
        _ => Err(lx.mismatch("identifier")),
    }
}

/// `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`, always decoded to `f64`.
///
/// A fraction or exponent that is not followed by digits is left in the input.
pub fn number<'a>(lx: Lexer<'a>) -> LexResult<'a, f64> {
    let bytes = lx.rest().as_bytes();
    let mut len = usize::from(bytes.first() == Some(&b'-'));
    match bytes.get(len) {
        Some(b'0') => len += 1,
        Some(b'1'..=b'9') => len += count_digits(bytes, len),
        _ => return Err(lx.mismatch("number")),
    }
    if bytes.get(len) == Some(&b'.') {
        let fraction = count_digits(bytes, len + 1);
        if fraction > 0 {
            len += 1 + fraction;
        }
    }
    if matches!(bytes.get(len), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(len + 1), Some(b'+' | b'-')));
        let exponent = count_digits(bytes, len + 1 + sign);
        if exponent > 0 {
            len += 1 + sign + exponent;
        }
    }
    let value = lx.rest()[..len]
        .parse::<f64>()
        .map_err(|_| lx.mismatch("number"))?;
    lx.advance(len).lexeme(value)
}

/// A double-quoted string with its escape sequences decoded.
pub fn quoted<'a>(lx: Lexer<'a>) -> LexResult<'a, String> {
    let mut cur = match lx.next_char() {
        Some(('"', next)) => next,
        _ => return Err(lx.mismatch("string")),
    };
    let mut body = String::new();
    loop {
        match cur.peek() {
            None => return Err(cur.mismatch("'\"'")),
            Some('"') => return cur.advance(1).lexeme(body),
            Some('\\') => {
                let (c, next) = escape(cur)?;
                body.push(c);
                cur = next;
            }
            Some(_) => {
                let (part, next) = cur.consume_while(|c| c != '"' && c != '\\');
                body.push_str(part);
                cur = next;
            }
        }
    }
}

// `lx` sits on the backslash.
fn escape<'a>(lx: Lexer<'a>) -> Result<(char, Lexer<'a>), LexerError> {
    let lx = lx.advance(1);
    let c = match lx.peek() {
        Some('\\') => '\\',
        Some('/') => '/',
        Some('"') => '"',
        Some('b') => '\u{8}',
        Some('f') => '\u{C}',
        Some('n') => '\n',
        Some('r') => '\r',
        Some('t') => '\t',
        Some('u') => return unicode_escape(lx),
        _ => return Err(lx.mismatch("escape sequence")),
    };
    Ok((c, lx.advance(1)))
}

// `\uXXXX` names exactly one code point. Surrogate halves have no `char` and
// surrogate pairs are not combined, so both are rejected here.
fn unicode_escape<'a>(lx: Lexer<'a>) -> Result<(char, Lexer<'a>), LexerError> {
    let hex = lx
        .rest()
        .get(1..5)
        .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
        .ok_or_else(|| lx.mismatch("four hex digits"))?;
    let c = u32::from_str_radix(hex, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| lx.mismatch("unicode escape outside the surrogate range"))?;
    Ok((c, lx.advance(5)))
}

/// Succeeds only when nothing but whitespace is left.
pub fn end_of_input<'a>(lx: Lexer<'a>) -> LexResult<'a, ()> {
    let lx = lx.skip_whitespace();
    if lx.is_eof() {
        Ok(((), lx))
    } else {
        Err(lx.mismatch("end of input"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TokenValue::*;

    fn pos(line: usize, col: usize) -> Pos {
        Pos { line, col }
    }

    fn mismatch(offset: usize, pos: Pos, expected: &'static str) -> LexerError {
        LexerError {
            offset,
            pos,
            expected,
        }
    }

    macro_rules! test_alone {
        ($lexeme:expr, $text:expr, $val:expr) => {{
            let (val, rest) = $lexeme(Lexer::new($text)).unwrap();
            assert_eq!(val, $val);
            assert!(rest.is_eof(), "leftover input: {:?}", rest.rest());
        }};
    }

    #[test]
    fn lexer_name() {
        test_alone!(name, "yep", "yep");
        test_alone!(name, "Yep", "Yep");
        test_alone!(name, "YEP", "YEP");
        test_alone!(name, "_YEP", "_YEP");
        test_alone!(name, "_yep", "_yep");
        test_alone!(name, "__yep9", "__yep9");
    }

    #[test]
    fn lexer_name_cannot_start_with_a_digit() {
        let lx = Lexer::new("9lives");
        assert_eq!(name(lx).unwrap_err(), mismatch(0, pos(1, 1), "identifier"));
    }

    #[test]
    fn lexer_punctuation_alone() {
        for tv in [
            OpenParen,
            CloseParen,
            OpenCurly,
            CloseCurly,
            OpenBracket,
            CloseBracket,
            Colon,
            Comma,
            Dollar,
            EqualSign,
            Bang,
        ] {
            test_alone!(|lx| token(lx, tv), tv.as_str(), ());
        }
    }

    #[test]
    fn lexer_keywords_alone() {
        test_alone!(|lx| token(lx, True), "true", ());
        test_alone!(|lx| token(lx, False), "false", ());
        test_alone!(|lx| token(lx, Null), "null", ());
        test_alone!(|lx| token(lx, Query), "query", ());
        test_alone!(|lx| token(lx, Mutation), "mutation", ());
    }

    #[test]
    fn lexer_keyword_touching_a_name_is_not_a_keyword() {
        let lx = Lexer::new("queryName");
        assert_eq!(
            token(lx, Query).unwrap_err(),
            mismatch(0, pos(1, 1), "'query'")
        );
        test_alone!(name, "queryName", "queryName");
    }

    #[test]
    fn lexer_keyword_followed_by_punctuation() {
        let (_, rest) = token(Lexer::new("null]"), Null).unwrap();
        assert_eq!(rest.rest(), "]");
    }

    #[test]
    fn lexer_consumes_trailing_whitespace() {
        let (_, rest) = token(Lexer::new("(  \n\t  )"), OpenParen).unwrap();
        assert_eq!(rest.rest(), ")");
        assert_eq!(rest.offset(), 7);
        assert_eq!(rest.pos(), pos(2, 11));
    }

    #[test]
    fn lexer_failure_consumes_nothing() {
        let lx = Lexer::new("  {").skip_whitespace();
        let err = token(lx, OpenParen).unwrap_err();
        assert_eq!(err, mismatch(2, pos(1, 3), "'('"));
        assert_eq!(lx.rest(), "{");
    }

    #[test]
    fn lexer_cr_does_not_change_pos() {
        let lx = Lexer::new("\r\r  x").skip_whitespace();
        assert_eq!(lx.pos(), pos(1, 3));
        assert_eq!(lx.rest(), "x");
    }

    #[test]
    fn lexer_int_alone() {
        test_alone!(number, "0", 0.0);
        test_alone!(number, "123", 123.0);
        test_alone!(number, "-123", -123.0);
        test_alone!(number, "-0", 0.0);
    }

    #[test]
    fn lexer_float_alone() {
        test_alone!(number, "1.23", 1.23);
        test_alone!(number, "-1.23", -1.23);
        test_alone!(number, "-0.5e+2", -50.0);
        test_alone!(number, "1.23e33", 1.23e33);
        test_alone!(number, "-1.23E-33", -1.23e-33);
        test_alone!(number, "1e50", 1e50);
    }

    #[test]
    fn lexer_number_leaves_incomplete_parts_behind() {
        let (val, rest) = number(Lexer::new("1.e5")).unwrap();
        assert_eq!(val, 1.0);
        assert_eq!(rest.rest(), ".e5");

        let (val, rest) = number(Lexer::new("2e+")).unwrap();
        assert_eq!(val, 2.0);
        assert_eq!(rest.rest(), "e+");
    }

    #[test]
    fn lexer_number_has_no_leading_zeros() {
        let (val, rest) = number(Lexer::new("0123")).unwrap();
        assert_eq!(val, 0.0);
        assert_eq!(rest.rest(), "123");
    }

    #[test]
    fn lexer_lone_minus_is_not_a_number() {
        let lx = Lexer::new("-x");
        assert_eq!(number(lx).unwrap_err(), mismatch(0, pos(1, 1), "number"));
    }

    #[test]
    fn lexer_string_lit_alone() {
        test_alone!(quoted, "\"thing\"", "thing".to_string());
        test_alone!(quoted, "\"\"", String::new());
    }

    #[test]
    fn lexer_string_escapes() {
        test_alone!(quoted, r#""a\tb""#, "a\tb".to_string());
        test_alone!(quoted, r#""\u0041""#, "A".to_string());
        test_alone!(quoted, r#""\"\\\/""#, "\"\\/".to_string());
        test_alone!(quoted, r#""\b\f\n\r""#, "\u{8}\u{C}\n\r".to_string());
        test_alone!(quoted, r#""café ok""#, "café ok".to_string());
    }

    #[test]
    fn lexer_unclosed_string() {
        let err = quoted(Lexer::new("\"abc")).unwrap_err();
        assert_eq!(err, mismatch(4, pos(1, 5), "'\"'"));
    }

    #[test]
    fn lexer_invalid_escape() {
        let err = quoted(Lexer::new(r#""a\qb""#)).unwrap_err();
        assert_eq!(err, mismatch(3, pos(1, 4), "escape sequence"));
    }

    #[test]
    fn lexer_short_unicode_escape() {
        let err = quoted(Lexer::new(r#""\u00G1""#)).unwrap_err();
        assert_eq!(err, mismatch(2, pos(1, 3), "four hex digits"));
    }

    #[test]
    fn lexer_surrogate_escape_is_rejected() {
        let err = quoted(Lexer::new(r#""\uD83D\uDE00""#)).unwrap_err();
        assert_eq!(
            err,
            mismatch(2, pos(1, 3), "unicode escape outside the surrogate range")
        );
    }

    #[test]
    fn lexer_end_of_input() {
        assert!(end_of_input(Lexer::new("  \n ")).is_ok());
        let err = end_of_input(Lexer::new("  x")).unwrap_err();
        assert_eq!(err, mismatch(2, pos(1, 3), "end of input"));
    }
}
