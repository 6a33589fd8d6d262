//! PostgreSQL grammar engine.
//!
//! A recursive-descent parser over [`TokenCursor`] recording one [`PgRule`]
//! node per matched production. Production names follow the PostgreSQL
//! grammar (`simple_select`, `target_el`, `a_expr`, ...) in upper camel
//! case.

mod dml;
mod expression;
mod precedence;
mod select;
mod statements;

use sqlstmt_core::cst::{Rule, SyntaxTree};
use sqlstmt_core::grammar::TokenCursor;
use sqlstmt_core::{ParseError, ParseOptions};

use crate::PostgresDialect;

pub(crate) type Parser<'a> = TokenCursor<'a, PgRule>;
pub(crate) type PResult = Result<(), ParseError>;

macro_rules! rules {
    ($($name:ident),* $(,)?) => {
        /// Productions of the PostgreSQL grammar.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum PgRule {
            $($name),*
        }

        impl Rule for PgRule {
            fn name(self) -> &'static str {
                match self {
                    $(Self::$name => stringify!($name)),*
                }
            }
        }
    };
}

rules! {
    // Statements
    Root,
    Stmtmulti,
    Stmt,
    EmptyStmt,
    SelectStmt,
    InsertStmt,
    UpdateStmt,
    DeleteStmt,
    WithStmt,
    CallStmt,
    MergeStmt,
    ValuesStmt,
    CreatedbStmt,
    DdlStmt,
    VariableShowStmt,
    ExplainStmt,
    VariableSetStmt,
    TransactionStmt,
    PrepareStmt,
    GrantStmt,
    UtilityStmt,

    // Select
    PlainSelect,
    SetOperationSelect,
    ParenthesizedSelect,
    SelectWithParens,
    SimpleSelectPrimary,
    SetOperationPart,
    DistinctClause,
    TargetList,
    TargetEl,
    TargetStar,
    ColLabel,
    IntoClause,
    FromClause,
    FromList,
    WhereClause,
    GroupClause,
    HavingClause,
    WindowClause,
    SortClause,
    SortBy,
    SelectLimit,
    LimitClause,
    OffsetClause,
    FetchClause,
    ForLockingClause,

    // Table references
    TableRef,
    RelationRef,
    SubqueryRef,
    DerivedTableRef,
    JoinedTableRef,
    FuncTableRef,
    QualifiedName,
    AliasClause,
    ColId,
    NameList,
    InnerJoin,
    OuterJoin,
    NaturalJoin,
    JoinQual,

    // Data manipulation
    InsertTarget,
    InsertColumnList,
    DefaultValues,
    ValuesClause,
    ValuesRow,
    SetToDefault,
    OnConflictClause,
    ReturningClause,
    SetClause,
    MultiSetClause,
    SetTarget,
    UsingClause,

    // Boolean layer
    AExprOr,
    AExprAnd,
    AExprNot,
    AExprPredicate,

    // Predicates
    AExprCompare,
    CompareOp,
    AExprSubqueryCompare,
    AExprIn,
    InList,
    AExprIsNull,
    AExprIs,
    AExprBetween,
    AExprLike,
    AExprPrimary,

    // Operands
    AexprConst,
    Columnref,
    FuncExpr,
    OverClause,
    CaseExpr,
    ParamRef,
    CExprExists,
    CExprSubquery,
    CExprNested,
    CExprRow,
    CExprArray,
    CExprIndirection,
    AExprTypecast,
    AExprCollate,
    AExprAtTimeZone,
    AExprUnary,
    AExprMath,
    AExprQualOp,
    Typename,
}

impl PgRule {
    /// `PlainSelect`, `SetOperationSelect` or `ParenthesizedSelect`.
    #[must_use]
    pub const fn is_select(self) -> bool {
        matches!(
            self,
            Self::PlainSelect | Self::SetOperationSelect | Self::ParenthesizedSelect
        )
    }

    /// Productions of the boolean layer.
    #[must_use]
    pub const fn is_expression(self) -> bool {
        matches!(
            self,
            Self::AExprOr | Self::AExprAnd | Self::AExprNot | Self::AExprPredicate
        )
    }

    /// Productions of the predicate layer.
    #[must_use]
    pub const fn is_predicate(self) -> bool {
        matches!(
            self,
            Self::AExprCompare
                | Self::AExprSubqueryCompare
                | Self::AExprIn
                | Self::AExprIsNull
                | Self::AExprIs
                | Self::AExprBetween
                | Self::AExprLike
                | Self::AExprPrimary
        )
    }

    /// Operand productions.
    #[must_use]
    pub const fn is_atom(self) -> bool {
        matches!(
            self,
            Self::AexprConst
                | Self::Columnref
                | Self::FuncExpr
                | Self::CaseExpr
                | Self::ParamRef
                | Self::CExprExists
                | Self::CExprSubquery
                | Self::CExprNested
                | Self::CExprRow
                | Self::CExprArray
                | Self::CExprIndirection
                | Self::AExprTypecast
                | Self::AExprCollate
                | Self::AExprAtTimeZone
                | Self::AExprUnary
                | Self::AExprMath
                | Self::AExprQualOp
        )
    }

    /// Join productions.
    #[must_use]
    pub const fn is_join(self) -> bool {
        matches!(self, Self::InnerJoin | Self::OuterJoin | Self::NaturalJoin)
    }

    /// Items that may start a `TableRef` or follow a join keyword.
    #[must_use]
    pub const fn is_table_item(self) -> bool {
        matches!(
            self,
            Self::RelationRef
                | Self::SubqueryRef
                | Self::DerivedTableRef
                | Self::JoinedTableRef
                | Self::FuncTableRef
        )
    }
}

/// Parses `sql` into a PostgreSQL concrete syntax tree.
///
/// # Errors
///
/// Returns the first lexical or syntax error.
pub fn parse_tree(sql: &str, options: &ParseOptions) -> Result<SyntaxTree<PgRule>, ParseError> {
    let dialect = PostgresDialect::new();
    let mut p = Parser::new(sql, &dialect, options)?;
    statements::root(&mut p)?;
    p.into_tree()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outline(sql: &str) -> String {
        parse_tree(sql, &ParseOptions::default())
            .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e}"))
            .outline(sql)
    }

    #[test]
    fn test_rule_names() {
        assert_eq!(PgRule::SimpleSelectPrimary.name(), "SimpleSelectPrimary");
        assert_eq!(PgRule::AexprConst.name(), "AexprConst");
    }

    #[test]
    fn test_tree_shape() {
        let tree = outline("SELECT a FROM t");
        let expected = "\
Root
  Stmtmulti
    Stmt
      SelectStmt
        PlainSelect
          SimpleSelectPrimary
            SELECT
            TargetList
              TargetEl
                AExprPredicate
                  AExprPrimary
                    Columnref
                      a
            FromClause
              FROM
              FromList
                TableRef
                  RelationRef
                    QualifiedName
                      t
";
        assert_eq!(tree, expected);
    }

    #[test]
    fn test_tree_covers_whole_input() {
        let sql = "SELECT 1; /* outer /* nested */ comment */";
        let tree = parse_tree(sql, &ParseOptions::default()).unwrap();
        assert_eq!(tree.root().span().start, 0);
        assert_eq!(tree.root().text(sql), "SELECT 1;");
    }
}
