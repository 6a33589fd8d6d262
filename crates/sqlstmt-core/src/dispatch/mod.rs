//! Shared support for the dialect dispatchers.
//!
//! A dispatcher walks a concrete tree top-down and builds AST values. The
//! [`DispatchContext`] turns tree spans into [`Node`] records and produces
//! the [`Unstructured`] fallback for productions that are not destructured.

use tracing::trace;

use crate::ast::{FullId, IdentifierValue, Node, Unstructured};
use crate::cst::{Rule, SyntaxNode};
use crate::dialect::DialectKind;
use crate::lexer::{LineIndex, Span, Token, TokenKind};

/// Source and position state shared by every step of one dispatch.
#[derive(Debug, Clone)]
pub struct DispatchContext<'a> {
    source: &'a str,
    lines: LineIndex<'a>,
    dialect: DialectKind,
}

impl<'a> DispatchContext<'a> {
    /// Creates a context numbering the first line of `source` as `baseline`.
    #[must_use]
    pub fn new(source: &'a str, baseline: usize, dialect: DialectKind) -> Self {
        Self {
            source,
            lines: LineIndex::new(source, baseline),
            dialect,
        }
    }

    #[must_use]
    pub const fn source(&self) -> &'a str {
        self.source
    }

    #[must_use]
    pub const fn dialect(&self) -> DialectKind {
        self.dialect
    }

    /// Builds the node record for a byte range.
    #[must_use]
    pub fn node(&self, span: Span) -> Node {
        let (start, stop) = self.lines.span_positions(span);
        Node::new(start, stop, span.slice(self.source).to_string(), self.dialect)
    }

    /// Builds the node record covering a concrete production.
    #[must_use]
    pub fn node_of<R: Rule>(&self, syntax: &SyntaxNode<R>) -> Node {
        self.node(syntax.span())
    }

    /// Keeps a production as raw text.
    #[must_use]
    pub fn unstructured<R: Rule>(&self, syntax: &SyntaxNode<R>) -> Unstructured {
        trace!(
            production = syntax.rule().name(),
            offset = syntax.span().start,
            "kept as unstructured"
        );
        Unstructured::new(self.node_of(syntax), syntax.rule().name())
    }

    /// Keeps an arbitrary range as raw text under the given production name.
    #[must_use]
    pub fn unstructured_span(&self, span: Span, production: &'static str) -> Unstructured {
        trace!(production, offset = span.start, "kept as unstructured");
        Unstructured::new(self.node(span), production)
    }

    #[must_use]
    pub fn text<R: Rule>(&self, syntax: &SyntaxNode<R>) -> &'a str {
        syntax.text(self.source)
    }

    #[must_use]
    pub fn token_text(&self, token: &Token) -> &'a str {
        token.text(self.source)
    }

    /// Reads a dotted name whose components are the direct tokens of
    /// `syntax`, separated by `.` tokens.
    #[must_use]
    pub fn full_id<R: Rule>(&self, syntax: &SyntaxNode<R>) -> FullId {
        let parts = syntax
            .tokens()
            .filter(|token| token.kind != TokenKind::Dot)
            .map(|token| self.token_text(token).to_string())
            .collect();
        FullId {
            node: self.node_of(syntax),
            parts,
        }
    }

    /// Reads a single name from the first token of `syntax`.
    #[must_use]
    pub fn identifier<R: Rule>(&self, syntax: &SyntaxNode<R>) -> IdentifierValue {
        IdentifierValue::from_raw(self.text(syntax))
    }

    /// Reads an unsigned integer literal; anything else is `None`.
    #[must_use]
    pub fn integer(&self, token: &Token) -> Option<u64> {
        match token.kind {
            TokenKind::Integer => self.token_text(token).parse().ok(),
            _ => None,
        }
    }
}
