//! Bottom-up construction of syntax trees.

use super::{Rule, SyntaxElement, SyntaxNode};
use crate::lexer::{Span, Token};

/// A position in the builder's pending children, used to wrap already
/// built siblings into a new parent (left-recursive productions).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// Builds a [`SyntaxNode`] tree from start/token/finish events.
#[derive(Debug)]
pub struct TreeBuilder<R> {
    /// Open productions and the index of their first pending child.
    open: Vec<(R, usize)>,
    /// Finished children not yet attached to a parent.
    pending: Vec<SyntaxElement<R>>,
    /// End offset of the last token, for zero-width productions.
    offset: usize,
}

impl<R: Rule> Default for TreeBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rule> TreeBuilder<R> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            open: Vec::new(),
            pending: Vec::new(),
            offset: 0,
        }
    }

    /// Marks the current position so a later production can adopt
    /// everything built after it.
    #[must_use]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.pending.len())
    }

    /// Opens a production; children added until [`Self::finish_node`] belong to it.
    pub fn start_node(&mut self, rule: R) {
        self.open.push((rule, self.pending.len()));
    }

    /// Opens a production that adopts every child added since `checkpoint`.
    pub fn start_node_at(&mut self, checkpoint: Checkpoint, rule: R) {
        let floor = self.open.last().map_or(0, |(_, first)| *first);
        self.open.push((rule, checkpoint.0.max(floor)));
    }

    /// Adds a token to the innermost open production.
    pub fn token(&mut self, token: Token) {
        self.offset = token.span.end;
        self.pending.push(SyntaxElement::Token(token));
    }

    /// Closes the innermost open production.
    pub fn finish_node(&mut self) {
        let Some((rule, first)) = self.open.pop() else {
            return;
        };
        let children: Vec<_> = self.pending.drain(first..).collect();
        let span = match (children.first(), children.last()) {
            (Some(head), Some(tail)) => Span::new(head.span().start, tail.span().end),
            _ => Span::empty(self.offset),
        };
        self.pending
            .push(SyntaxElement::Node(SyntaxNode::new(rule, span, children)));
    }

    /// Sets the offset used for zero-width productions opened before any token.
    pub fn set_offset(&mut self, offset: usize) {
        self.offset = offset;
    }

    /// Closes every open production and returns the outermost node.
    ///
    /// Returns `None` if nothing was built.
    #[must_use]
    pub fn finish(mut self) -> Option<SyntaxNode<R>> {
        while !self.open.is_empty() {
            self.finish_node();
        }
        match self.pending.pop() {
            Some(SyntaxElement::Node(node)) if self.pending.is_empty() => Some(node),
            _ => None,
        }
    }
}
