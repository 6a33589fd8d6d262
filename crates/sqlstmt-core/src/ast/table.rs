//! Table sources and joins.

use serde::Serialize;

use super::{Expr, Node, SelectStmt, TableName, Unstructured};

/// A comma-separated list of table sources.
///
/// Element 0 is the primary source; later elements are cross-joined. UPDATE
/// and DELETE always expose their targets through this list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSources {
    pub node: Node,
    pub sources: Vec<TableSource>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TableSource {
    Base(TableSourceBase),
    Unstructured(Unstructured),
}

/// One primary item followed by its joins, in source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSourceBase {
    pub node: Node,
    pub item: TableSourceItem,
    pub joins: Vec<JoinPart>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TableSourceItem {
    Atom(AtomTableItem),
    Subquery(SubqueryTableItem),
    /// A parenthesized list of table sources.
    Nested(TableSources),
    Unstructured(Unstructured),
}

/// A named table with an optional alias.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtomTableItem {
    pub node: Node,
    pub table_name: TableName,
    pub alias: Option<String>,
}

/// A derived table, `[LATERAL] (SELECT ...) [AS] alias`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubqueryTableItem {
    pub node: Node,
    pub lateral: bool,
    pub select: Box<SelectStmt>,
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum JoinPart {
    /// `[INNER | CROSS] JOIN`.
    Inner(InnerJoin),
    /// MySQL `STRAIGHT_JOIN`.
    Straight(StraightJoin),
    /// `LEFT | RIGHT | FULL [OUTER] JOIN`.
    Outer(OuterJoin),
    Natural(NaturalJoin),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InnerJoin {
    pub node: Node,
    pub item: TableSourceItem,
    pub condition: Option<JoinSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StraightJoin {
    pub node: Node,
    pub item: TableSourceItem,
    pub condition: Option<JoinSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OuterJoin {
    pub node: Node,
    pub side: JoinSide,
    pub item: TableSourceItem,
    pub condition: Option<JoinSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NaturalJoin {
    pub node: Node,
    /// `None` for a plain `NATURAL JOIN`.
    pub side: Option<JoinSide>,
    pub item: TableSourceItem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum JoinSide {
    Left,
    Right,
    Full,
}

/// The condition attached to a join.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum JoinSpec {
    On { node: Node, expr: Expr },
    Using { node: Node, columns: Vec<String> },
}

impl TableSource {
    #[must_use]
    pub const fn node(&self) -> &Node {
        match self {
            Self::Base(base) => &base.node,
            Self::Unstructured(u) => &u.node,
        }
    }
}

impl TableSourceItem {
    #[must_use]
    pub const fn node(&self) -> &Node {
        match self {
            Self::Atom(item) => &item.node,
            Self::Subquery(item) => &item.node,
            Self::Nested(item) => &item.node,
            Self::Unstructured(item) => &item.node,
        }
    }
}

impl JoinPart {
    #[must_use]
    pub const fn node(&self) -> &Node {
        match self {
            Self::Inner(j) => &j.node,
            Self::Straight(j) => &j.node,
            Self::Outer(j) => &j.node,
            Self::Natural(j) => &j.node,
        }
    }

    /// The joined item.
    #[must_use]
    pub const fn item(&self) -> &TableSourceItem {
        match self {
            Self::Inner(j) => &j.item,
            Self::Straight(j) => &j.item,
            Self::Outer(j) => &j.item,
            Self::Natural(j) => &j.item,
        }
    }

    #[must_use]
    pub const fn condition(&self) -> Option<&JoinSpec> {
        match self {
            Self::Inner(j) => j.condition.as_ref(),
            Self::Straight(j) => j.condition.as_ref(),
            Self::Outer(j) => j.condition.as_ref(),
            Self::Natural(_) => None,
        }
    }
}

impl JoinSpec {
    #[must_use]
    pub const fn node(&self) -> &Node {
        match self {
            Self::On { node, .. } | Self::Using { node, .. } => node,
        }
    }
}
