//! Statements and query shapes.

use serde::Serialize;

use super::{ColumnName, Expr, FullId, IdentifierValue, Node, TableName, TableSources, Unstructured};

/// One top-level statement slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    SimpleSelect(SimpleSelect),
    UnionSelect(UnionSelect),
    ParenthesisSelect(ParenthesisSelect),
    Insert(InsertStmt),
    Update(UpdateStmt),
    Delete(DeleteStmt),
    Ddl(DdlStmt),
    /// Data manipulation kept opaque (WITH queries, REPLACE, CALL, ...).
    Dml(DmlStmt),
    CreateDatabase(CreateDatabase),
    /// SHOW, DESCRIBE, EXPLAIN and other read-only administration.
    OtherRead(OtherReadStmt),
    Unclassified(Unstructured),
    /// A `;` with no statement before it.
    Empty(Node),
}

/// A select statement in a nested position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SelectStmt {
    Simple(SimpleSelect),
    Union(UnionSelect),
    Parenthesis(ParenthesisSelect),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimpleSelect {
    pub node: Node,
    pub query: QuerySpecification,
    /// `FOR UPDATE`, `LOCK IN SHARE MODE`, ...
    pub lock: Option<Unstructured>,
}

/// `SELECT ... [FROM ...] [WHERE ...] ...`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuerySpecification {
    pub node: Node,
    pub distinct: bool,
    pub select_elements: SelectElements,
    pub from: Option<TableSources>,
    pub where_clause: Option<Expr>,
    pub group_by: Option<Unstructured>,
    pub having: Option<Expr>,
    pub order_by: Option<Unstructured>,
    pub limit: Option<Limit>,
}

/// The select list. A leading bare `*` sets `star` instead of adding an element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectElements {
    pub node: Node,
    pub star: bool,
    pub elements: Vec<SelectElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SelectElement {
    Star(SelectStarElement),
    Column(SelectColumnElement),
    Function(Unstructured),
    Expression(Unstructured),
}

/// `t.*`, or a bare `*` that is not first in the list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectStarElement {
    pub node: Node,
    pub qualifier: Option<FullId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectColumnElement {
    pub node: Node,
    pub column: ColumnName,
    pub alias: Option<String>,
}

/// A chain of set operations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnionSelect {
    pub node: Node,
    pub first: QueryOperand,
    pub union_parts: Vec<UnionPart>,
    pub order_by: Option<Unstructured>,
    pub limit: Option<Limit>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnionPart {
    pub node: Node,
    /// Keyword text as written, e.g. `UNION ALL`.
    pub union_type: String,
    pub operand: QueryOperand,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum QueryOperand {
    Specification(QuerySpecification),
    Expression(QueryExpr),
    /// A tighter-binding set operation, e.g. the `INTERSECT` in
    /// `a UNION b INTERSECT c`.
    Union(Box<UnionSelect>),
    Unstructured(Unstructured),
}

/// A select wrapped in parentheses at statement level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParenthesisSelect {
    pub node: Node,
    pub query_expr: QueryExpr,
    pub order_by: Option<Unstructured>,
    pub limit: Option<Limit>,
}

/// `( body )`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryExpr {
    pub node: Node,
    pub body: QueryExprBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum QueryExprBody {
    Specification(QuerySpecification),
    Union(Box<UnionSelect>),
    Nested(Box<QueryExpr>),
}

/// `LIMIT`/`OFFSET`/`FETCH`. Counts that are not integer literals are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Limit {
    pub node: Node,
    pub row_count: Option<u64>,
    pub offset: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsertStmt {
    pub node: Node,
    pub table_name: TableName,
    pub columns: Vec<String>,
    pub source: InsertSource,
    /// MySQL `ON DUPLICATE KEY UPDATE` assignments.
    pub on_duplicate: Vec<UpdatedElement>,
    pub on_conflict: Option<Unstructured>,
    pub returning: Option<Unstructured>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum InsertSource {
    Values(InsertValues),
    Select(Box<SelectStmt>),
    /// MySQL `INSERT ... SET col = value`.
    Set(Vec<UpdatedElement>),
    DefaultValues(Node),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsertValues {
    pub node: Node,
    pub rows: Vec<Vec<Expr>>,
}

/// `column = value` in SET lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdatedElement {
    pub node: Node,
    pub column: ColumnName,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateStmt {
    pub node: Node,
    pub table_sources: TableSources,
    pub updated_elements: Vec<UpdatedElement>,
    pub where_clause: Option<Expr>,
    pub order_by: Option<Unstructured>,
    pub limit: Option<Limit>,
    pub returning: Option<Unstructured>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteStmt {
    pub node: Node,
    pub table_sources: TableSources,
    /// Tables rows are deleted from in MySQL multi-table form.
    pub targets: Vec<TableName>,
    pub where_clause: Option<Expr>,
    pub order_by: Option<Unstructured>,
    pub limit: Option<Limit>,
    pub returning: Option<Unstructured>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateDatabase {
    pub node: Node,
    pub name: IdentifierValue,
    pub if_not_exists: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DdlStmt {
    pub body: Unstructured,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DmlStmt {
    pub body: Unstructured,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OtherReadStmt {
    pub body: Unstructured,
}

impl Stmt {
    #[must_use]
    pub const fn node(&self) -> &Node {
        match self {
            Self::SimpleSelect(s) => &s.node,
            Self::UnionSelect(s) => &s.node,
            Self::ParenthesisSelect(s) => &s.node,
            Self::Insert(s) => &s.node,
            Self::Update(s) => &s.node,
            Self::Delete(s) => &s.node,
            Self::Ddl(s) => &s.body.node,
            Self::Dml(s) => &s.body.node,
            Self::CreateDatabase(s) => &s.node,
            Self::OtherRead(s) => &s.body.node,
            Self::Unclassified(s) => &s.node,
            Self::Empty(node) => node,
        }
    }

    /// Short variant name, e.g. `UnionSelect`.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SimpleSelect(_) => "SimpleSelect",
            Self::UnionSelect(_) => "UnionSelect",
            Self::ParenthesisSelect(_) => "ParenthesisSelect",
            Self::Insert(_) => "Insert",
            Self::Update(_) => "Update",
            Self::Delete(_) => "Delete",
            Self::Ddl(_) => "Ddl",
            Self::Dml(_) => "Dml",
            Self::CreateDatabase(_) => "CreateDatabase",
            Self::OtherRead(_) => "OtherRead",
            Self::Unclassified(_) => "Unclassified",
            Self::Empty(_) => "Empty",
        }
    }

    #[must_use]
    pub const fn is_select(&self) -> bool {
        matches!(
            self,
            Self::SimpleSelect(_) | Self::UnionSelect(_) | Self::ParenthesisSelect(_)
        )
    }
}

impl SelectStmt {
    #[must_use]
    pub const fn node(&self) -> &Node {
        match self {
            Self::Simple(s) => &s.node,
            Self::Union(s) => &s.node,
            Self::Parenthesis(s) => &s.node,
        }
    }
}

impl From<SelectStmt> for Stmt {
    fn from(select: SelectStmt) -> Self {
        match select {
            SelectStmt::Simple(s) => Self::SimpleSelect(s),
            SelectStmt::Union(s) => Self::UnionSelect(s),
            SelectStmt::Parenthesis(s) => Self::ParenthesisSelect(s),
        }
    }
}

impl TryFrom<Stmt> for SelectStmt {
    type Error = Stmt;

    fn try_from(stmt: Stmt) -> Result<Self, Self::Error> {
        match stmt {
            Stmt::SimpleSelect(s) => Ok(Self::Simple(s)),
            Stmt::UnionSelect(s) => Ok(Self::Union(s)),
            Stmt::ParenthesisSelect(s) => Ok(Self::Parenthesis(s)),
            other => Err(other),
        }
    }
}

impl SelectElement {
    #[must_use]
    pub const fn node(&self) -> &Node {
        match self {
            Self::Star(e) => &e.node,
            Self::Column(e) => &e.node,
            Self::Function(e) | Self::Expression(e) => &e.node,
        }
    }
}

impl QueryOperand {
    #[must_use]
    pub const fn node(&self) -> &Node {
        match self {
            Self::Specification(q) => &q.node,
            Self::Expression(q) => &q.node,
            Self::Union(q) => &q.node,
            Self::Unstructured(q) => &q.node,
        }
    }
}
