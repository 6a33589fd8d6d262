//! Binding powers for the MySQL expression layers.
//!
//! MySQL parses expressions in three layers: logical connectives over
//! predicates, predicates over expression atoms, and arithmetic/bit
//! operators inside atoms. Each layer is a Pratt loop driven by the
//! tables here.
//!
//! Higher binding power binds tighter. Left associative operators use
//! `(l, l + 1)`.

use sqlstmt_core::{Keyword, TokenKind};

/// Binding power of the `NOT` prefix in the logical layer.
pub const NOT_BINDING_POWER: u8 = 7;

/// Binding power of unary operators inside expression atoms.
pub const UNARY_BINDING_POWER: u8 = 22;

/// Binding power of the `COLLATE` postfix.
pub const COLLATE_BINDING_POWER: u8 = 26;

/// Infix binding power of a logical connective.
#[must_use]
pub const fn logical_binding_power(kind: &TokenKind) -> Option<(u8, u8)> {
    match kind {
        TokenKind::Keyword(Keyword::Or) | TokenKind::Concat => Some((1, 2)),
        TokenKind::Keyword(Keyword::Xor) => Some((3, 4)),
        TokenKind::Keyword(Keyword::And) | TokenKind::LogicalAnd => Some((5, 6)),
        _ => None,
    }
}

/// Predicate operators, keyed by the token that introduces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateOp {
    /// `[NOT] IN (...)`
    In,
    /// `IS [NOT] NULL`
    IsNull,
    /// `= <> != < <= > >= <=>`, optionally followed by `ALL|ANY|SOME (subquery)`
    Comparison,
    /// `[NOT] BETWEEN a AND b`
    Between,
    /// `SOUNDS LIKE`
    SoundsLike,
    /// `[NOT] LIKE x [ESCAPE y]`
    Like,
    /// `[NOT] REGEXP|RLIKE x`
    Regexp,
    /// `MEMBER OF (json)`
    MemberOf,
}

impl PredicateOp {
    /// Left binding power; the right side binds at `power + 1`.
    #[must_use]
    pub const fn binding_power(self) -> u8 {
        match self {
            Self::In => 20,
            Self::IsNull => 18,
            Self::Comparison => 16,
            Self::Between => 14,
            Self::SoundsLike => 12,
            Self::Like => 10,
            Self::Regexp => 8,
            Self::MemberOf => 6,
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
            | TokenKind::NullSafeEq
    )
}

/// Operator families inside expression atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtomOp {
    Bit,
    Math,
    Json,
}

/// Infix binding power of an operator inside an expression atom.
#[must_use]
pub const fn atom_binding_power(kind: &TokenKind) -> Option<(AtomOp, u8, u8)> {
    match kind {
        TokenKind::BitOr => Some((AtomOp::Bit, 10, 11)),
        TokenKind::BitAnd => Some((AtomOp::Bit, 12, 13)),
        TokenKind::LeftShift | TokenKind::RightShift => Some((AtomOp::Bit, 14, 15)),
        TokenKind::Plus | TokenKind::Minus => Some((AtomOp::Math, 16, 17)),
        TokenKind::Star
        | TokenKind::Slash
        | TokenKind::Percent
        | TokenKind::Keyword(Keyword::Div | Keyword::Mod) => Some((AtomOp::Math, 18, 19)),
        TokenKind::Caret => Some((AtomOp::Bit, 20, 21)),
        TokenKind::Arrow | TokenKind::LongArrow => Some((AtomOp::Json, 24, 25)),
        _ => None,
    }
}
