//! Concrete syntax trees.
//!
//! A grammar engine records every production it matches as a [`SyntaxNode`]
//! tagged with a dialect-specific [`Rule`]. Nodes keep their tokens, so the
//! tree covers the statement text exactly; dispatchers read it through the
//! accessors here and never look at the token stream directly.

mod builder;

pub use builder::{Checkpoint, TreeBuilder};

use core::fmt;

use crate::lexer::{Keyword, Span, Token, TokenKind};

/// A grammar production kind.
pub trait Rule: Copy + Eq + fmt::Debug {
    /// The production name, used for `Unstructured` leaves and diagnostics.
    fn name(self) -> &'static str;
}

/// A child of a syntax node: either a nested production or a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxElement<R> {
    Node(SyntaxNode<R>),
    Token(Token),
}

impl<R: Rule> SyntaxElement<R> {
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Node(node) => node.span,
            Self::Token(token) => token.span,
        }
    }

    #[must_use]
    pub const fn as_node(&self) -> Option<&SyntaxNode<R>> {
        match self {
            Self::Node(node) => Some(node),
            Self::Token(_) => None,
        }
    }

    #[must_use]
    pub const fn as_token(&self) -> Option<&Token> {
        match self {
            Self::Token(token) => Some(token),
            Self::Node(_) => None,
        }
    }
}

/// One matched production with its ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode<R> {
    rule: R,
    span: Span,
    children: Vec<SyntaxElement<R>>,
}

impl<R: Rule> SyntaxNode<R> {
    /// Creates a node. The span is expected to cover all children.
    #[must_use]
    pub const fn new(rule: R, span: Span, children: Vec<SyntaxElement<R>>) -> Self {
        Self {
            rule,
            span,
            children,
        }
    }

    /// The production this node was built from.
    #[must_use]
    pub const fn rule(&self) -> R {
        self.rule
    }

    /// The byte range the production matched.
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    /// Children in source order.
    #[must_use]
    pub fn children(&self) -> &[SyntaxElement<R>] {
        &self.children
    }

    /// The raw source text of this node.
    #[must_use]
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        self.span.slice(source)
    }

    /// Child productions in source order, skipping tokens.
    pub fn child_nodes(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(SyntaxElement::as_node)
    }

    /// Direct child tokens in source order.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.children.iter().filter_map(SyntaxElement::as_token)
    }

    /// The first child production, if any.
    #[must_use]
    pub fn first_child(&self) -> Option<&Self> {
        self.child_nodes().next()
    }

    /// The first child production of the given rule.
    #[must_use]
    pub fn child(&self, rule: R) -> Option<&Self> {
        self.child_nodes().find(|node| node.rule == rule)
    }

    /// All child productions of the given rule.
    pub fn children_of(&self, rule: R) -> impl Iterator<Item = &Self> {
        self.child_nodes().filter(move |node| node.rule == rule)
    }

    /// The first child production matching a predicate.
    pub fn find_child(&self, pred: impl Fn(R) -> bool) -> Option<&Self> {
        self.child_nodes().find(|node| pred(node.rule))
    }

    /// The first direct child token matching a predicate.
    pub fn find_token(&self, pred: impl Fn(&TokenKind) -> bool) -> Option<&Token> {
        self.tokens().find(|token| pred(&token.kind))
    }

    /// Returns true if a direct child token is the given keyword.
    #[must_use]
    pub fn has_keyword(&self, keyword: Keyword) -> bool {
        self.tokens().any(|token| token.is(keyword))
    }

    /// Returns true if a direct child token has the given kind.
    #[must_use]
    pub fn has_token(&self, kind: &TokenKind) -> bool {
        self.tokens().any(|token| token.kind == *kind)
    }

    /// Collects this node and all descendant productions, breadth-first.
    #[must_use]
    pub fn descendants(&self) -> Vec<&Self> {
        let mut out = vec![self];
        let mut index = 0;
        while index < out.len() {
            let node = out[index];
            out.extend(node.child_nodes());
            index += 1;
        }
        out
    }
}

/// A parsed input: the root production plus the token stream it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree<R> {
    root: SyntaxNode<R>,
    tokens: Vec<Token>,
}

impl<R: Rule> SyntaxTree<R> {
    #[must_use]
    pub const fn new(root: SyntaxNode<R>, tokens: Vec<Token>) -> Self {
        Self { root, tokens }
    }

    #[must_use]
    pub const fn root(&self) -> &SyntaxNode<R> {
        &self.root
    }

    /// All tokens of the input, ending with `Eof`.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Renders the tree as an indented outline, one production or token per line.
    #[must_use]
    pub fn outline(&self, source: &str) -> String {
        let mut out = String::new();
        write_outline(&self.root, source, 0, &mut out);
        out
    }
}

fn write_outline<R: Rule>(node: &SyntaxNode<R>, source: &str, depth: usize, out: &mut String) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(node.rule.name());
    out.push('\n');
    for child in &node.children {
        match child {
            SyntaxElement::Node(inner) => write_outline(inner, source, depth + 1, out),
            SyntaxElement::Token(token) => {
                out.push_str(&"  ".repeat(depth + 1));
                out.push_str(token.text(source));
                out.push('\n');
            }
        }
    }
}
