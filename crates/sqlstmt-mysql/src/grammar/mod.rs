//! MySQL grammar engine.
//!
//! A recursive-descent parser over [`TokenCursor`] that records one
//! [`MySqlRule`] node per matched production. Production names follow the
//! usual MySQL grammar (`querySpecification`, `tableSourceBase`, ...), so
//! the tree reads like the output of a generated MySQL parser.

mod dml;
mod expression;
mod precedence;
mod select;
mod statements;

use sqlstmt_core::cst::{Rule, SyntaxTree};
use sqlstmt_core::grammar::TokenCursor;
use sqlstmt_core::{ParseError, ParseOptions};

use crate::MySqlDialect;

pub(crate) type Parser<'a> = TokenCursor<'a, MySqlRule>;
pub(crate) type PResult = Result<(), ParseError>;

macro_rules! rules {
    ($($name:ident),* $(,)?) => {
        /// Productions of the MySQL grammar.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum MySqlRule {
            $($name),*
        }

        impl Rule for MySqlRule {
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
    SqlStatements,
    SqlStatement,
    EmptyStatement,
    DmlStatement,
    DdlStatement,
    TransactionStatement,
    ReplicationStatement,
    PreparedStatement,
    AdministrationStatement,
    UtilityStatement,
    CreateDatabase,
    ShowStatement,
    SimpleDescribeStatement,
    FullDescribeStatement,

    // Select
    SimpleSelect,
    ParenthesisSelect,
    UnionSelect,
    UnionStatement,
    QueryExpression,
    QuerySpecification,
    SelectSpec,
    SelectElements,
    SelectStarElement,
    SelectColumnElement,
    SelectFunctionElement,
    SelectExpressionElement,
    SelectIntoExpression,
    FromClause,
    GroupByClause,
    GroupByItem,
    HavingClause,
    WindowClause,
    OrderByClause,
    OrderByExpression,
    LimitClause,
    LimitClauseAtom,
    LockClause,

    // Table sources
    TableSources,
    TableSourceBase,
    TableJson,
    AtomTableItem,
    SubqueryTableItem,
    TableSourcesItem,
    IndexHint,
    InnerJoin,
    StraightJoin,
    OuterJoin,
    NaturalJoin,
    JoinSpec,

    // Data manipulation
    InsertStatement,
    InsertStatementValue,
    ExpressionsWithDefaults,
    DefaultExpression,
    UidList,
    DuplicateKeyUpdate,
    UpdatedElement,
    SingleUpdateStatement,
    MultipleUpdateStatement,
    SingleDeleteStatement,
    MultipleDeleteStatement,

    // Expressions
    Expressions,
    NotExpression,
    LogicalExpression,
    LogicalOperator,
    IsExpression,
    PredicateExpression,

    // Predicates
    InPredicate,
    IsNullPredicate,
    BinaryComparisonPredicate,
    ComparisonOperator,
    SubqueryComparisonPredicate,
    BetweenPredicate,
    SoundsLikePredicate,
    LikePredicate,
    RegexpPredicate,
    JsonMemberOfPredicate,
    ExpressionAtomPredicate,

    // Expression atoms
    ConstantExpressionAtom,
    FullColumnNameExpressionAtom,
    FunctionCallExpressionAtom,
    CollateExpressionAtom,
    MysqlVariableExpressionAtom,
    ParameterExpressionAtom,
    UnaryExpressionAtom,
    BinaryExpressionAtom,
    VariableAssignExpressionAtom,
    NestedExpressionAtom,
    NestedRowExpressionAtom,
    ExistsExpressionAtom,
    SubqueryExpressionAtom,
    IntervalExpressionAtom,
    BitExpressionAtom,
    MathExpressionAtom,
    JsonExpressionAtom,

    // Leaves
    FunctionCall,
    OverClause,
    Constant,
    FullId,
    FullColumnName,
    TableName,
    Uid,
}

impl MySqlRule {
    /// `SimpleSelect`, `UnionSelect` or `ParenthesisSelect`.
    #[must_use]
    pub const fn is_select(self) -> bool {
        matches!(
            self,
            Self::SimpleSelect | Self::UnionSelect | Self::ParenthesisSelect
        )
    }

    /// Productions of the `expression` family.
    #[must_use]
    pub const fn is_expression(self) -> bool {
        matches!(
            self,
            Self::NotExpression
                | Self::LogicalExpression
                | Self::IsExpression
                | Self::PredicateExpression
        )
    }

    /// Productions of the `predicate` family.
    #[must_use]
    pub const fn is_predicate(self) -> bool {
        matches!(
            self,
            Self::InPredicate
                | Self::IsNullPredicate
                | Self::BinaryComparisonPredicate
                | Self::SubqueryComparisonPredicate
                | Self::BetweenPredicate
                | Self::SoundsLikePredicate
                | Self::LikePredicate
                | Self::RegexpPredicate
                | Self::JsonMemberOfPredicate
                | Self::ExpressionAtomPredicate
        )
    }

    /// Productions of the `expressionAtom` family.
    #[must_use]
    pub const fn is_atom(self) -> bool {
        matches!(
            self,
            Self::ConstantExpressionAtom
                | Self::FullColumnNameExpressionAtom
                | Self::FunctionCallExpressionAtom
                | Self::CollateExpressionAtom
                | Self::MysqlVariableExpressionAtom
                | Self::ParameterExpressionAtom
                | Self::UnaryExpressionAtom
                | Self::BinaryExpressionAtom
                | Self::VariableAssignExpressionAtom
                | Self::NestedExpressionAtom
                | Self::NestedRowExpressionAtom
                | Self::ExistsExpressionAtom
                | Self::SubqueryExpressionAtom
                | Self::IntervalExpressionAtom
                | Self::BitExpressionAtom
                | Self::MathExpressionAtom
                | Self::JsonExpressionAtom
        )
    }

    /// Join productions.
    #[must_use]
    pub const fn is_join(self) -> bool {
        matches!(
            self,
            Self::InnerJoin | Self::StraightJoin | Self::OuterJoin | Self::NaturalJoin
        )
    }
}

/// Parses `sql` into a MySQL concrete syntax tree.
///
/// # Errors
///
/// Returns the first lexical or syntax error.
pub fn parse_tree(sql: &str, options: &ParseOptions) -> Result<SyntaxTree<MySqlRule>, ParseError> {
    let dialect = MySqlDialect::new();
    let mut p = Parser::new(sql, &dialect, options)?;
    statements::root(&mut p)?;
    p.into_tree()
}
