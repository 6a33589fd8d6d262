//! Expressions, predicates and expression atoms.
//!
//! Only logical connectives, comparisons, `IN` and constants/columns are
//! destructured; every other form is an [`Unstructured`] leaf.

use core::fmt;

use serde::Serialize;

use super::{ColumnName, Node, SelectStmt, Unstructured};

/// A boolean-valued expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    Logical(LogicalExpr),
    Predicate(PredicateExpr),
    Unstructured(Unstructured),
}

/// `AND`, `OR` or `XOR` over two or more operands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogicalExpr {
    pub node: Node,
    pub operator: LogicalOperator,
    pub exprs: Vec<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LogicalOperator {
    And,
    Or,
    Xor,
}

impl LogicalOperator {
    /// Maps `AND`/`&&`, `OR`/`||` and `XOR`.
    #[must_use]
    pub fn from_text(text: &str) -> Option<Self> {
        match text.to_ascii_uppercase().as_str() {
            "AND" | "&&" => Some(Self::And),
            "OR" | "||" => Some(Self::Or),
            "XOR" => Some(Self::Xor),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An expression consisting of a single predicate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredicateExpr {
    pub node: Node,
    pub predicate: Predicate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Predicate {
    BinaryComparison(BinaryComparisonPredicate),
    In(InPredicate),
    ExprAtom(ExprAtomPredicate),
    Unstructured(Unstructured),
}

/// `left <op> right` with `<op>` one of `=`, `<>`, `!=`, `<`, `<=`, `>`, `>=`, `<=>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryComparisonPredicate {
    pub node: Node,
    pub left: Box<Predicate>,
    pub right: Box<Predicate>,
    /// Operator as written.
    pub operator: String,
}

/// `predicate [NOT] IN (...)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InPredicate {
    pub node: Node,
    pub predicate: Box<Predicate>,
    pub negated: bool,
    pub source: InSource,
}

/// The right-hand side of `IN`: a value list or a subquery, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum InSource {
    Exprs(Vec<Expr>),
    Select(Box<SelectStmt>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExprAtomPredicate {
    pub node: Node,
    pub atom: ExprAtom,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExprAtom {
    Constant(ExprAtomConstant),
    Column(ColumnName),
    Unstructured(Unstructured),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExprAtomConstant {
    pub node: Node,
    pub constant: Constant,
}

/// A literal; `value` is the raw text, quotes and sign included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Constant {
    pub node: Node,
    pub value: String,
}

impl Expr {
    #[must_use]
    pub const fn node(&self) -> &Node {
        match self {
            Self::Logical(e) => &e.node,
            Self::Predicate(e) => &e.node,
            Self::Unstructured(e) => &e.node,
        }
    }

    /// The predicate of a single-predicate expression.
    #[must_use]
    pub const fn as_predicate(&self) -> Option<&Predicate> {
        match self {
            Self::Predicate(e) => Some(&e.predicate),
            _ => None,
        }
    }
}

impl Predicate {
    #[must_use]
    pub const fn node(&self) -> &Node {
        match self {
            Self::BinaryComparison(p) => &p.node,
            Self::In(p) => &p.node,
            Self::ExprAtom(p) => &p.node,
            Self::Unstructured(p) => &p.node,
        }
    }
}

impl ExprAtom {
    #[must_use]
    pub const fn node(&self) -> &Node {
        match self {
            Self::Constant(a) => &a.node,
            Self::Column(a) => &a.node,
            Self::Unstructured(a) => &a.node,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logical_operator_from_text() {
        assert_eq!(LogicalOperator::from_text("and"), Some(LogicalOperator::And));
        assert_eq!(LogicalOperator::from_text("&&"), Some(LogicalOperator::And));
        assert_eq!(LogicalOperator::from_text("||"), Some(LogicalOperator::Or));
        assert_eq!(LogicalOperator::from_text("Xor"), Some(LogicalOperator::Xor));
        assert_eq!(LogicalOperator::from_text("NOT"), None);
        assert_eq!(LogicalOperator::Or.to_string(), "OR");
    }
}
