mod config;
pub use config::ParserConfig;

mod error;
pub use error::{Expected, ParserError};

mod combinators;
use combinators::Res;

mod values;

mod types;

mod query;
pub use query::{parse_document, parse_document_with_config};

use crate::lexer::{self, Lexer};
use crate::{Type, Value};

// Checks the limits and positions a cursor on the first lexeme.
fn start<'a>(text: &'a str, config: &ParserConfig) -> Result<Lexer<'a>, ParserError> {
    config.check_text_size(text)?;
    Ok(Lexer::with_depth_limit(text, config.depth_limit).skip_whitespace())
}

fn parse_complete<'a, T>(
    text: &'a str,
    config: ParserConfig,
    rule: impl Fn(Lexer<'a>) -> Res<'a, T>,
) -> Result<T, ParserError> {
    let lx = start(text, &config)?;
    let (parsed, rest) = rule(lx)?;
    lexer::end_of_input(rest)?;
    Ok(parsed)
}

/// Parses one literal value, e.g. a default value, surrounded only by whitespace.
pub fn parse_literal(text: &str) -> Result<Value, ParserError> {
    parse_literal_with_config(text, ParserConfig::default())
}

pub fn parse_literal_with_config(text: &str, config: ParserConfig) -> Result<Value, ParserError> {
    parse_complete(text, config, values::parse_value)
}

/// Parses one type reference such as `[Int!]!`, surrounded only by whitespace.
pub fn parse_type_ref(text: &str) -> Result<Type<'_>, ParserError> {
    parse_type_ref_with_config(text, ParserConfig::default())
}

pub fn parse_type_ref_with_config(
    text: &str,
    config: ParserConfig,
) -> Result<Type<'_>, ParserError> {
    parse_complete(text, config, types::parse_type)
}
