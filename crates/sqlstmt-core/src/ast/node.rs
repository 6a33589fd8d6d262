//! The source record every AST value owns.

use serde::Serialize;

use crate::dialect::DialectKind;
use crate::lexer::{Position, Span};

/// Source span, raw text and dialect of one AST value.
///
/// `text` is always the slice of the parsed input between `start.offset`
/// and `stop.offset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub start: Position,
    /// Exclusive end.
    pub stop: Position,
    pub text: String,
    pub dialect: DialectKind,
}

impl Node {
    #[must_use]
    pub const fn new(start: Position, stop: Position, text: String, dialect: DialectKind) -> Self {
        Self {
            start,
            stop,
            text,
            dialect,
        }
    }

    /// The byte range this node covers in the parsed input.
    #[must_use]
    pub const fn span(&self) -> Span {
        Span::new(self.start.offset, self.stop.offset)
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A production kept as raw text rather than destructured.
///
/// Every AST family has a variant holding one of these, so callers can tell
/// "not decomposed" apart from any structured shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unstructured {
    pub node: Node,
    /// Grammar production the text was matched by, e.g. `BetweenPredicate`.
    pub production: &'static str,
}

impl Unstructured {
    #[must_use]
    pub const fn new(node: Node, production: &'static str) -> Self {
        Self { node, production }
    }
}
