//! Parses GraphQL-like request documents into a typed AST.
//!
//! ```
//! use jiku_docparse::{parse_document, OpName, OpType};
//!
//! let doc = parse_document("query myquery($participant: uuid!) {").unwrap();
//! let op = &doc.operations[0];
//! assert_eq!(op.op_type, OpType::Query);
//! assert_eq!(op.name, Some(OpName("myquery")));
//! assert_eq!(op.variables[0].var_type.to_string(), "uuid!");
//! ```

// recognizes single lexemes at a cursor into the source text, skipping the
// whitespace that follows each one.
mod lexer;
pub use lexer::{Lexer, LexerError, Pos, TokenValue};

// The ast representation of a parsed document. There are many data structures,
// but not many functions; building them is the parser's job.
mod lang;
pub use lang::*;

// the grammar: literal values, type references, variable definitions,
// operations and the document assembler on top.
mod parser;
pub use parser::*;
