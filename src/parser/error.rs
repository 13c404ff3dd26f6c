use std::fmt;

use crate::{LexerError, Pos};

use thiserror::Error as ThisError;

/// The labels of every construct that could have matched where parsing stopped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expected(Vec<&'static str>);

impl Expected {
    pub fn one(label: &'static str) -> Expected {
        Expected(vec![label])
    }

    pub fn labels(&self) -> &[&'static str] {
        &self.0
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|l| *l == label)
    }

    fn merge(&mut self, other: Expected) {
        for label in other.0 {
            if !self.contains(label) {
                self.0.push(label);
            }
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [] => f.write_str("nothing"),
            [label] => f.write_str(label),
            labels => write!(f, "one of {}", labels.join(", ")),
        }
    }
}

#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum ParserError {
    #[error("text size limit exceeded - limit: {limit:?}, text_size: {text_size:?}")]
    TextSizeLimitExceeded { limit: usize, text_size: usize },

    #[error("depth limit exceeded - limit: {limit:?} at {pos}")]
    DepthLimitExceeded { limit: usize, pos: Pos },

    #[error("syntax error at {pos} (offset {offset}): expected {expected}")]
    SyntaxError {
        offset: usize,
        pos: Pos,
        expected: Expected,
    },
}

impl ParserError {
    pub fn syntax(offset: usize, pos: Pos, expected: &'static str) -> ParserError {
        ParserError::SyntaxError {
            offset,
            pos,
            expected: Expected::one(expected),
        }
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, ParserError::SyntaxError { .. })
    }

    pub fn pos(&self) -> Option<Pos> {
        match self {
            ParserError::SyntaxError { pos, .. } | ParserError::DepthLimitExceeded { pos, .. } => {
                Some(*pos)
            }
            ParserError::TextSizeLimitExceeded { .. } => None,
        }
    }

    /// True for a syntax error that happened before anything past `start` was
    /// consumed. Only those are retried by the next alternative.
    pub(crate) fn is_backtrackable_at(&self, start: usize) -> bool {
        matches!(self, ParserError::SyntaxError { offset, .. } if *offset == start)
    }

    /// Folds the expectations of two alternatives that failed at the same place.
    pub(crate) fn merge(self, other: ParserError) -> ParserError {
        match (self, other) {
            (
                ParserError::SyntaxError {
                    offset,
                    pos,
                    mut expected,
                },
                ParserError::SyntaxError {
                    offset: other_offset,
                    expected: other_expected,
                    ..
                },
            ) if offset == other_offset => {
                expected.merge(other_expected);
                ParserError::SyntaxError {
                    offset,
                    pos,
                    expected,
                }
            }
            (first, _) => first,
        }
    }
}

impl From<LexerError> for ParserError {
    fn from(err: LexerError) -> Self {
        ParserError::syntax(err.offset, err.pos, err.expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(line: usize, col: usize) -> Pos {
        Pos { line, col }
    }

    #[test]
    fn merge_collects_labels_at_the_same_offset() {
        let a = ParserError::syntax(3, pos(1, 4), "number");
        let b = ParserError::syntax(3, pos(1, 4), "'['");
        let c = ParserError::syntax(3, pos(1, 4), "number");
        let merged = a.merge(b).merge(c);
        assert_eq!(
            merged,
            ParserError::SyntaxError {
                offset: 3,
                pos: pos(1, 4),
                expected: Expected(vec!["number", "'['"]),
            }
        );
        assert_eq!(
            merged.to_string(),
            "syntax error at 1:4 (offset 3): expected one of number, '['"
        );
    }

    #[test]
    fn only_syntax_errors_at_the_start_backtrack() {
        let err = ParserError::syntax(5, pos(1, 6), "identifier");
        assert!(err.is_backtrackable_at(5));
        assert!(!err.is_backtrackable_at(0));
        let depth = ParserError::DepthLimitExceeded {
            limit: 1,
            pos: pos(1, 1),
        };
        assert!(!depth.is_backtrackable_at(0));
    }

    #[test]
    fn lexer_errors_become_syntax_errors() {
        let lex = LexerError {
            offset: 2,
            pos: pos(1, 3),
            expected: "identifier",
        };
        let err = ParserError::from(lex);
        assert_eq!(err, ParserError::syntax(2, pos(1, 3), "identifier"));
        assert_eq!(err.pos(), Some(pos(1, 3)));
    }
}
