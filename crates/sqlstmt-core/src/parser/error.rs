//! Parser error types.

use serde::Serialize;

use crate::lexer::{Position, Span};

/// A positioned lexical or syntax error.
///
/// `line` already includes the baseline the text was parsed with, so it
/// points into the host document rather than into the fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message} at line {line}, column {column}")]
pub struct ParseError {
    /// The error message.
    pub message: String,
    /// Line of the offending token.
    pub line: usize,
    /// Column (1-based, in characters) of the offending token.
    pub column: usize,
    /// Byte range of the offending token.
    pub span: Span,
    /// Expected tokens (if applicable).
    pub expected: Option<String>,
    /// The text of the token actually found.
    pub found: Option<String>,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span, position: Position) -> Self {
        Self {
            message: message.into(),
            line: position.line,
            column: position.column,
            span,
            expected: None,
            found: None,
        }
    }

    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(
        expected: impl Into<String>,
        found: impl Into<String>,
        span: Span,
        position: Position,
    ) -> Self {
        let expected: String = expected.into();
        let found: String = found.into();
        Self {
            message: format!("Unexpected token: expected {expected}, found '{found}'"),
            line: position.line,
            column: position.column,
            span,
            expected: Some(expected),
            found: Some(found),
        }
    }

    /// Creates an "unexpected end of input" error.
    #[must_use]
    pub fn unexpected_eof(expected: impl Into<String>, span: Span, position: Position) -> Self {
        let expected: String = expected.into();
        Self {
            message: format!("Unexpected end of input: expected {expected}"),
            line: position.line,
            column: position.column,
            span,
            expected: Some(expected),
            found: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_position() {
        let err =
            ParseError::unexpected("expression", "FROM", Span::new(7, 11), Position::new(3, 8, 7));
        assert_eq!(
            err.to_string(),
            "Unexpected token: expected expression, found 'FROM' at line 3, column 8"
        );
        assert_eq!(err.found.as_deref(), Some("FROM"));
    }

    #[test]
    fn test_unexpected_eof() {
        let err = ParseError::unexpected_eof("')'", Span::empty(4), Position::new(1, 5, 4));
        assert_eq!(err.expected.as_deref(), Some("')'"));
        assert!(err.found.is_none());
        assert!(err.to_string().starts_with("Unexpected end of input"));
    }
}
