//! Binding powers for the PostgreSQL expression layers.
//!
//! `a_expr` is parsed in three layers: the boolean connectives, the
//! predicates (`IS`, comparisons, `IN`, `BETWEEN`, pattern matching) and
//! the operand operators. Powers follow the operator precedence table of
//! the PostgreSQL manual. Higher binds tighter.

use sqlstmt_core::{Keyword, TokenKind};

/// Binding power of the `NOT` prefix.
pub const NOT_BINDING_POWER: u8 = 5;

/// Binding power of `AT TIME ZONE`.
pub const AT_TIME_ZONE_BINDING_POWER: u8 = 18;

/// Binding power of the `COLLATE` postfix.
pub const COLLATE_BINDING_POWER: u8 = 20;

/// Binding power of prefix `+`, `-` and prefix operators.
pub const UNARY_BINDING_POWER: u8 = 22;

/// Infix binding power of a boolean connective.
#[must_use]
pub const fn logical_binding_power(kind: &TokenKind) -> Option<(u8, u8)> {
    match kind {
        TokenKind::Keyword(Keyword::Or) => Some((1, 2)),
        TokenKind::Keyword(Keyword::And) => Some((3, 4)),
        _ => None,
    }
}

/// Predicate operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateOp {
    /// `IS [NOT] NULL|TRUE|FALSE|UNKNOWN|DISTINCT FROM x`, `ISNULL`, `NOTNULL`
    Is,
    /// `= <> != < <= > >=`, optionally quantified with `ANY|ALL|SOME`
    Comparison,
    /// `[NOT] IN (...)`
    In,
    /// `[NOT] BETWEEN [SYMMETRIC] a AND b`
    Between,
    /// `[NOT] LIKE|ILIKE|SIMILAR TO x [ESCAPE y]`
    Like,
}

impl PredicateOp {
    /// Left binding power; the right side binds at `power + 1`.
    #[must_use]
    pub const fn binding_power(self) -> u8 {
        match self {
            Self::Is => 8,
            Self::Comparison => 10,
            Self::In | Self::Between | Self::Like => 12,
        }
    }
}

/// Returns true for the comparison operator tokens.
#[must_use]
pub const fn is_comparison(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Eq
            | TokenKind::NotEq
            | TokenKind::Lt
            | TokenKind::LtEq
            | TokenKind::Gt
            | TokenKind::GtEq
    )
}

/// Operator families between operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtomOp {
    /// Any operator without a precedence of its own (`||`, `@>`, `->>`, ...).
    Qual,
    /// `+ - * / % ^`
    Math,
}

/// Infix binding power of an operator between operands.
#[must_use]
pub const fn atom_binding_power(kind: &TokenKind) -> Option<(AtomOp, u8, u8)> {
    match kind {
        TokenKind::Operator
        | TokenKind::Concat
        | TokenKind::LogicalAnd
        | TokenKind::BitAnd
        | TokenKind::BitOr
        | TokenKind::BitNot
        | TokenKind::Bang
        | TokenKind::LeftShift
        | TokenKind::RightShift
        | TokenKind::Arrow
        | TokenKind::LongArrow
        | TokenKind::Question => Some((AtomOp::Qual, 10, 11)),
        TokenKind::Plus | TokenKind::Minus => Some((AtomOp::Math, 12, 13)),
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some((AtomOp::Math, 14, 15)),
        TokenKind::Caret => Some((AtomOp::Math, 16, 17)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logical_precedence_ordering() {
        let (or_bp, _) = logical_binding_power(&TokenKind::Keyword(Keyword::Or)).unwrap();
        let (and_bp, _) = logical_binding_power(&TokenKind::Keyword(Keyword::And)).unwrap();
        assert!(or_bp < and_bp);
        assert!(and_bp < NOT_BINDING_POWER);
        assert_eq!(logical_binding_power(&TokenKind::Keyword(Keyword::Xor)), None);
        assert_eq!(logical_binding_power(&TokenKind::LogicalAnd), None);
    }

    #[test]
    fn test_predicate_precedence_ordering() {
        assert!(NOT_BINDING_POWER < PredicateOp::Is.binding_power());
        assert!(PredicateOp::Is.binding_power() < PredicateOp::Comparison.binding_power());
        assert!(PredicateOp::Comparison.binding_power() < PredicateOp::Like.binding_power());
        assert_eq!(PredicateOp::In.binding_power(), PredicateOp::Between.binding_power());
        assert!(!is_comparison(&TokenKind::NullSafeEq));
    }

    #[test]
    fn test_operand_precedence_ordering() {
        let (op, qual_bp, _) = atom_binding_power(&TokenKind::Concat).unwrap();
        assert_eq!(op, AtomOp::Qual);
        let (_, add_bp, _) = atom_binding_power(&TokenKind::Minus).unwrap();
        let (_, mul_bp, _) = atom_binding_power(&TokenKind::Percent).unwrap();
        let (_, exp_bp, _) = atom_binding_power(&TokenKind::Caret).unwrap();
        assert!(qual_bp < add_bp);
        assert!(add_bp < mul_bp);
        assert!(mul_bp < exp_bp);
        assert!(exp_bp < AT_TIME_ZONE_BINDING_POWER);
        assert!(AT_TIME_ZONE_BINDING_POWER < COLLATE_BINDING_POWER);
        assert!(COLLATE_BINDING_POWER < UNARY_BINDING_POWER);
    }
}
