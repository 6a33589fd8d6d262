//! Dialect-independent statement AST.
//!
//! Every value owns one [`Node`] recording its span, raw text and dialect.
//! Families are closed enums; constructs that are recognized but not
//! destructured are kept as [`Unstructured`] leaves in their own family.

mod expression;
mod identifier;
mod node;
mod statement;
mod table;
pub mod visit;

pub use expression::{
    BinaryComparisonPredicate, Constant, Expr, ExprAtom, ExprAtomConstant, ExprAtomPredicate,
    InPredicate, InSource, LogicalExpr, LogicalOperator, Predicate, PredicateExpr,
};
pub use identifier::{ColumnName, FullId, IdentifierValue, TableName};
pub use node::{Node, Unstructured};
pub use statement::{
    CreateDatabase, DdlStmt, DeleteStmt, DmlStmt, InsertSource, InsertStmt, InsertValues, Limit,
    OtherReadStmt, ParenthesisSelect, QueryExpr, QueryExprBody, QueryOperand, QuerySpecification,
    SelectColumnElement, SelectElement, SelectElements, SelectStarElement, SelectStmt,
    SimpleSelect, Stmt, UnionPart, UnionSelect, UpdateStmt, UpdatedElement,
};
pub use table::{
    AtomTableItem, InnerJoin, JoinPart, JoinSide, JoinSpec, NaturalJoin, OuterJoin, StraightJoin,
    SubqueryTableItem, TableSource, TableSourceBase, TableSourceItem, TableSources,
};
