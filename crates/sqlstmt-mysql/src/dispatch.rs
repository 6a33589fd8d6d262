//! MySQL concrete tree to statement AST.
//!
//! One method per production that carries an AST node of its own;
//! alternative productions (`SqlStatement`, `DmlStatement`, ...) are
//! walked through. A shape the grammar never produces falls back to an
//! [`Unstructured`] leaf instead of failing.

use sqlstmt_core::ast::{
    AtomTableItem, BinaryComparisonPredicate, ColumnName, Constant, CreateDatabase, DdlStmt,
    DeleteStmt, DmlStmt, Expr, ExprAtom, ExprAtomConstant, ExprAtomPredicate, InPredicate,
    InSource, InnerJoin, InsertSource, InsertStmt, InsertValues, JoinPart, JoinSide, JoinSpec,
    Limit, LogicalExpr, LogicalOperator, NaturalJoin, OtherReadStmt, OuterJoin,
    ParenthesisSelect, Predicate, PredicateExpr, QueryExpr, QueryExprBody, QueryOperand,
    QuerySpecification, SelectColumnElement, SelectElement, SelectElements, SelectStarElement,
    SelectStmt, SimpleSelect, Stmt, StraightJoin, SubqueryTableItem, TableName, TableSource,
    TableSourceBase, TableSourceItem, TableSources, UnionPart, UnionSelect, Unstructured,
    UpdateStmt, UpdatedElement,
};
use sqlstmt_core::cst::{SyntaxNode, SyntaxTree};
use sqlstmt_core::dispatch::DispatchContext;
use sqlstmt_core::{DialectKind, Keyword, TokenKind};

use crate::grammar::MySqlRule;

type Syntax = SyntaxNode<MySqlRule>;

/// Builds statements from a MySQL syntax tree.
#[derive(Debug, Clone)]
pub struct MySqlDispatcher<'a> {
    ctx: DispatchContext<'a>,
}

impl<'a> MySqlDispatcher<'a> {
    /// Creates a dispatcher for trees parsed from `source`, numbering its
    /// first line as `baseline`.
    #[must_use]
    pub fn new(source: &'a str, baseline: usize) -> Self {
        Self {
            ctx: DispatchContext::new(source, baseline, DialectKind::MySql),
        }
    }

    /// One statement per top-level statement slot, in source order.
    #[must_use]
    pub fn dispatch(&self, tree: &SyntaxTree<MySqlRule>) -> Vec<Stmt> {
        let Some(statements) = tree.root().child(MySqlRule::SqlStatements) else {
            return Vec::new();
        };
        statements
            .child_nodes()
            .map(|node| match node.rule() {
                MySqlRule::EmptyStatement => Stmt::Empty(self.ctx.node_of(node)),
                _ => self.sql_statement(node),
            })
            .collect()
    }

    fn sql_statement(&self, node: &Syntax) -> Stmt {
        let Some(inner) = node.first_child() else {
            return Stmt::Unclassified(self.ctx.unstructured(node));
        };
        match inner.rule() {
            MySqlRule::DmlStatement => self.dml_statement(inner),
            MySqlRule::DdlStatement => match inner.child(MySqlRule::CreateDatabase) {
                Some(create) => self
                    .create_database(create)
                    .map_or_else(
                        || Stmt::Ddl(DdlStmt { body: self.ctx.unstructured(inner) }),
                        Stmt::CreateDatabase,
                    ),
                None => Stmt::Ddl(DdlStmt {
                    body: self.ctx.unstructured(inner),
                }),
            },
            MySqlRule::AdministrationStatement => match inner.child(MySqlRule::ShowStatement) {
                Some(show) => Stmt::OtherRead(OtherReadStmt {
                    body: self.ctx.unstructured(show),
                }),
                None => Stmt::Unclassified(self.ctx.unstructured(inner)),
            },
            MySqlRule::UtilityStatement => {
                let describe = inner.find_child(|rule| {
                    matches!(
                        rule,
                        MySqlRule::SimpleDescribeStatement | MySqlRule::FullDescribeStatement
                    )
                });
                match describe {
                    Some(describe) => Stmt::OtherRead(OtherReadStmt {
                        body: self.ctx.unstructured(describe),
                    }),
                    None => Stmt::Unclassified(self.ctx.unstructured(inner)),
                }
            }
            _ => Stmt::Unclassified(self.ctx.unstructured(inner)),
        }
    }

    fn dml_statement(&self, node: &Syntax) -> Stmt {
        let statement = node.first_child().and_then(|child| match child.rule() {
            rule if rule.is_select() => self.select_statement(child).map(Stmt::from),
            MySqlRule::InsertStatement => self.insert(child).map(Stmt::Insert),
            MySqlRule::SingleUpdateStatement | MySqlRule::MultipleUpdateStatement => {
                self.update(child).map(Stmt::Update)
            }
            MySqlRule::SingleDeleteStatement | MySqlRule::MultipleDeleteStatement => {
                self.delete(child).map(Stmt::Delete)
            }
            _ => None,
        });
        statement.unwrap_or_else(|| {
            Stmt::Dml(DmlStmt {
                body: self.ctx.unstructured(node),
            })
        })
    }

    fn create_database(&self, node: &Syntax) -> Option<CreateDatabase> {
        Some(CreateDatabase {
            node: self.ctx.node_of(node),
            name: self.ctx.identifier(node.child(MySqlRule::Uid)?),
            if_not_exists: node.has_keyword(Keyword::If),
        })
    }

    // Selects

    fn select_statement(&self, node: &Syntax) -> Option<SelectStmt> {
        match node.rule() {
            MySqlRule::SimpleSelect => Some(SelectStmt::Simple(SimpleSelect {
                node: self.ctx.node_of(node),
                query: self.query_specification(node.child(MySqlRule::QuerySpecification)?)?,
                lock: self.optional_unstructured(node, MySqlRule::LockClause),
            })),
            MySqlRule::UnionSelect => self.union_select(node).map(SelectStmt::Union),
            MySqlRule::ParenthesisSelect => Some(SelectStmt::Parenthesis(ParenthesisSelect {
                node: self.ctx.node_of(node),
                query_expr: self.query_expr(node.child(MySqlRule::QueryExpression)?)?,
                order_by: self.optional_unstructured(node, MySqlRule::OrderByClause),
                limit: node.child(MySqlRule::LimitClause).map(|l| self.limit(l)),
            })),
            _ => None,
        }
    }

    fn query_specification(&self, node: &Syntax) -> Option<QuerySpecification> {
        let from_clause = node.child(MySqlRule::FromClause);
        Some(QuerySpecification {
            node: self.ctx.node_of(node),
            distinct: node.children_of(MySqlRule::SelectSpec).any(|spec| {
                spec.has_keyword(Keyword::Distinct) || spec.has_keyword(Keyword::Distinctrow)
            }),
            select_elements: self.select_elements(node.child(MySqlRule::SelectElements)?),
            from: from_clause
                .and_then(|from| from.child(MySqlRule::TableSources))
                .map(|sources| self.table_sources(sources)),
            where_clause: from_clause.and_then(|from| self.child_expression(from)),
            group_by: self.optional_unstructured(node, MySqlRule::GroupByClause),
            having: node
                .child(MySqlRule::HavingClause)
                .and_then(|having| self.child_expression(having)),
            order_by: self.optional_unstructured(node, MySqlRule::OrderByClause),
            limit: node.child(MySqlRule::LimitClause).map(|l| self.limit(l)),
        })
    }

    fn select_elements(&self, node: &Syntax) -> SelectElements {
        SelectElements {
            node: self.ctx.node_of(node),
            star: node.has_token(&TokenKind::Star),
            elements: node
                .child_nodes()
                .filter_map(|element| self.select_element(element))
                .collect(),
        }
    }

    fn select_element(&self, node: &Syntax) -> Option<SelectElement> {
        let element = match node.rule() {
            MySqlRule::SelectStarElement => SelectElement::Star(SelectStarElement {
                node: self.ctx.node_of(node),
                qualifier: node.child(MySqlRule::FullId).map(|id| self.ctx.full_id(id)),
            }),
            MySqlRule::SelectColumnElement => SelectElement::Column(SelectColumnElement {
                node: self.ctx.node_of(node),
                column: self.column_name(node.child(MySqlRule::FullColumnName)?),
                alias: self.alias(node),
            }),
            MySqlRule::SelectFunctionElement => {
                SelectElement::Function(self.ctx.unstructured(node))
            }
            MySqlRule::SelectExpressionElement => {
                SelectElement::Expression(self.ctx.unstructured(node))
            }
            _ => return None,
        };
        Some(element)
    }

    fn union_select(&self, node: &Syntax) -> Option<UnionSelect> {
        let first = node.find_child(|rule| {
            matches!(rule, MySqlRule::QuerySpecification | MySqlRule::QueryExpression)
        })?;
        Some(UnionSelect {
            node: self.ctx.node_of(node),
            first: self.query_operand(first),
            union_parts: node
                .children_of(MySqlRule::UnionStatement)
                .filter_map(|part| self.union_part(part))
                .collect(),
            order_by: self.optional_unstructured(node, MySqlRule::OrderByClause),
            limit: node.child(MySqlRule::LimitClause).map(|l| self.limit(l)),
        })
    }

    fn union_part(&self, node: &Syntax) -> Option<UnionPart> {
        let first = node.tokens().next()?;
        let last = node.tokens().last().unwrap_or(first);
        let union_type = first.span.merge(last.span).slice(self.ctx.source()).to_string();
        Some(UnionPart {
            node: self.ctx.node_of(node),
            union_type,
            operand: self.query_operand(node.first_child()?),
        })
    }

    fn query_operand(&self, node: &Syntax) -> QueryOperand {
        let operand = match node.rule() {
            MySqlRule::QuerySpecification => {
                self.query_specification(node).map(QueryOperand::Specification)
            }
            MySqlRule::QueryExpression => self.query_expr(node).map(QueryOperand::Expression),
            _ => None,
        };
        operand.unwrap_or_else(|| QueryOperand::Unstructured(self.ctx.unstructured(node)))
    }

    fn query_expr(&self, node: &Syntax) -> Option<QueryExpr> {
        let inner = node.first_child()?;
        let body = match inner.rule() {
            MySqlRule::QuerySpecification => {
                QueryExprBody::Specification(self.query_specification(inner)?)
            }
            MySqlRule::UnionSelect => QueryExprBody::Union(Box::new(self.union_select(inner)?)),
            MySqlRule::QueryExpression => QueryExprBody::Nested(Box::new(self.query_expr(inner)?)),
            _ => return None,
        };
        Some(QueryExpr {
            node: self.ctx.node_of(node),
            body,
        })
    }

    /// `LIMIT n`, `LIMIT offset, n` or `LIMIT n OFFSET offset`.
    fn limit(&self, node: &Syntax) -> Limit {
        let atoms: Vec<_> = node
            .children_of(MySqlRule::LimitClauseAtom)
            .map(|atom| atom.tokens().next().and_then(|token| self.ctx.integer(token)))
            .collect();
        let first = atoms.first().copied().flatten();
        let second = atoms.get(1).copied().flatten();
        let (row_count, offset) = if node.has_keyword(Keyword::Offset) {
            (first, second)
        } else if node.has_token(&TokenKind::Comma) {
            (second, first)
        } else {
            (first, None)
        };
        Limit {
            node: self.ctx.node_of(node),
            row_count,
            offset,
        }
    }

    // Tables

    fn table_sources(&self, node: &Syntax) -> TableSources {
        TableSources {
            node: self.ctx.node_of(node),
            sources: node
                .child_nodes()
                .map(|source| self.table_source(source))
                .collect(),
        }
    }

    fn table_source(&self, node: &Syntax) -> TableSource {
        let base = match node.rule() {
            MySqlRule::TableSourceBase => node.first_child().map(|item| TableSourceBase {
                node: self.ctx.node_of(node),
                item: self.table_source_item(item),
                joins: node
                    .child_nodes()
                    .filter(|join| join.rule().is_join())
                    .filter_map(|join| self.join_part(join))
                    .collect(),
            }),
            _ => None,
        };
        base.map_or_else(
            || TableSource::Unstructured(self.ctx.unstructured(node)),
            TableSource::Base,
        )
    }

    fn table_source_item(&self, node: &Syntax) -> TableSourceItem {
        let item = match node.rule() {
            MySqlRule::AtomTableItem => node.child(MySqlRule::TableName).and_then(|name| {
                Some(TableSourceItem::Atom(AtomTableItem {
                    node: self.ctx.node_of(node),
                    table_name: self.table_name(name)?,
                    alias: self.alias(node),
                }))
            }),
            MySqlRule::SubqueryTableItem => node
                .find_child(MySqlRule::is_select)
                .and_then(|select| self.select_statement(select))
                .map(|select| {
                    TableSourceItem::Subquery(SubqueryTableItem {
                        node: self.ctx.node_of(node),
                        lateral: node.has_keyword(Keyword::Lateral),
                        select: Box::new(select),
                        alias: self.alias(node),
                    })
                }),
            MySqlRule::TableSourcesItem => node
                .child(MySqlRule::TableSources)
                .map(|sources| TableSourceItem::Nested(self.table_sources(sources))),
            _ => None,
        };
        item.unwrap_or_else(|| TableSourceItem::Unstructured(self.ctx.unstructured(node)))
    }

    fn join_part(&self, node: &Syntax) -> Option<JoinPart> {
        let item = self.table_source_item(node.find_child(|rule| {
            matches!(
                rule,
                MySqlRule::AtomTableItem
                    | MySqlRule::SubqueryTableItem
                    | MySqlRule::TableSourcesItem
            )
        })?);
        let condition = node
            .child(MySqlRule::JoinSpec)
            .and_then(|spec| self.join_spec(spec));
        let node_record = self.ctx.node_of(node);
        let join = match node.rule() {
            MySqlRule::InnerJoin => JoinPart::Inner(InnerJoin {
                node: node_record,
                item,
                condition,
            }),
            MySqlRule::StraightJoin => JoinPart::Straight(StraightJoin {
                node: node_record,
                item,
                condition,
            }),
            MySqlRule::OuterJoin => JoinPart::Outer(OuterJoin {
                node: node_record,
                side: if node.has_keyword(Keyword::Left) {
                    JoinSide::Left
                } else {
                    JoinSide::Right
                },
                item,
                condition,
            }),
            MySqlRule::NaturalJoin => JoinPart::Natural(NaturalJoin {
                node: node_record,
                side: if node.has_keyword(Keyword::Left) {
                    Some(JoinSide::Left)
                } else if node.has_keyword(Keyword::Right) {
                    Some(JoinSide::Right)
                } else {
                    None
                },
                item,
            }),
            _ => return None,
        };
        Some(join)
    }

    fn join_spec(&self, node: &Syntax) -> Option<JoinSpec> {
        if node.has_keyword(Keyword::On) {
            Some(JoinSpec::On {
                node: self.ctx.node_of(node),
                expr: self.child_expression(node)?,
            })
        } else {
            Some(JoinSpec::Using {
                node: self.ctx.node_of(node),
                columns: self.uid_list(node.child(MySqlRule::UidList)?),
            })
        }
    }

    fn table_name(&self, node: &Syntax) -> Option<TableName> {
        Some(TableName::from_full_id(
            self.ctx.full_id(node.child(MySqlRule::FullId)?),
        ))
    }

    fn column_name(&self, node: &Syntax) -> ColumnName {
        ColumnName::from_full_id(self.ctx.full_id(node))
    }

    fn alias(&self, node: &Syntax) -> Option<String> {
        node.child(MySqlRule::Uid)
            .map(|uid| self.ctx.identifier(uid).value)
    }

    fn uid_list(&self, node: &Syntax) -> Vec<String> {
        node.children_of(MySqlRule::Uid)
            .map(|uid| self.ctx.identifier(uid).value)
            .collect()
    }

    /// The one-element table list of a single-table UPDATE or DELETE,
    /// spanning the table name and its alias.
    fn single_table_sources(&self, node: &Syntax) -> Option<TableSources> {
        let name = node.child(MySqlRule::TableName)?;
        let alias = node.child(MySqlRule::Uid);
        let span = alias.map_or(name.span(), |alias| name.span().merge(alias.span()));
        let record = self.ctx.node(span);
        let item = TableSourceItem::Atom(AtomTableItem {
            node: record.clone(),
            table_name: self.table_name(name)?,
            alias: alias.map(|alias| self.ctx.identifier(alias).value),
        });
        Some(TableSources {
            node: record.clone(),
            sources: vec![TableSource::Base(TableSourceBase {
                node: record,
                item,
                joins: Vec::new(),
            })],
        })
    }

    // Data manipulation

    fn insert(&self, node: &Syntax) -> Option<InsertStmt> {
        let source = match node.child(MySqlRule::InsertStatementValue) {
            Some(value) => match value.find_child(MySqlRule::is_select) {
                Some(select) => InsertSource::Select(Box::new(self.select_statement(select)?)),
                None => InsertSource::Values(InsertValues {
                    node: self.ctx.node_of(value),
                    rows: value
                        .children_of(MySqlRule::ExpressionsWithDefaults)
                        .map(|row| {
                            row.child_nodes().map(|e| self.expression_or_default(e)).collect()
                        })
                        .collect(),
                }),
            },
            None => InsertSource::Set(self.updated_elements(node)),
        };
        Some(InsertStmt {
            node: self.ctx.node_of(node),
            table_name: self.table_name(node.child(MySqlRule::TableName)?)?,
            columns: node
                .child(MySqlRule::UidList)
                .map(|list| self.uid_list(list))
                .unwrap_or_default(),
            source,
            on_duplicate: node
                .child(MySqlRule::DuplicateKeyUpdate)
                .map(|update| self.updated_elements(update))
                .unwrap_or_default(),
            on_conflict: None,
            returning: None,
        })
    }

    fn updated_elements(&self, node: &Syntax) -> Vec<UpdatedElement> {
        node.children_of(MySqlRule::UpdatedElement)
            .filter_map(|element| {
                let value = element.find_child(|rule| {
                    rule.is_expression() || rule == MySqlRule::DefaultExpression
                })?;
                Some(UpdatedElement {
                    node: self.ctx.node_of(element),
                    column: self.column_name(element.child(MySqlRule::FullColumnName)?),
                    value: self.expression_or_default(value),
                })
            })
            .collect()
    }

    fn update(&self, node: &Syntax) -> Option<UpdateStmt> {
        let table_sources = if node.rule() == MySqlRule::SingleUpdateStatement {
            self.single_table_sources(node)?
        } else {
            self.table_sources(node.child(MySqlRule::TableSources)?)
        };
        Some(UpdateStmt {
            node: self.ctx.node_of(node),
            table_sources,
            updated_elements: self.updated_elements(node),
            where_clause: self.child_expression(node),
            order_by: self.optional_unstructured(node, MySqlRule::OrderByClause),
            limit: node.child(MySqlRule::LimitClause).map(|l| self.limit(l)),
            returning: None,
        })
    }

    fn delete(&self, node: &Syntax) -> Option<DeleteStmt> {
        let (table_sources, targets) = if node.rule() == MySqlRule::SingleDeleteStatement {
            (self.single_table_sources(node)?, Vec::new())
        } else {
            let targets = node
                .children_of(MySqlRule::TableName)
                .filter_map(|name| self.table_name(name))
                .collect();
            (self.table_sources(node.child(MySqlRule::TableSources)?), targets)
        };
        Some(DeleteStmt {
            node: self.ctx.node_of(node),
            table_sources,
            targets,
            where_clause: self.child_expression(node),
            order_by: self.optional_unstructured(node, MySqlRule::OrderByClause),
            limit: node.child(MySqlRule::LimitClause).map(|l| self.limit(l)),
            returning: None,
        })
    }

    // Expressions

    /// The direct child expression of a clause node (`WHERE`, `HAVING`, `ON`).
    fn child_expression(&self, node: &Syntax) -> Option<Expr> {
        node.find_child(MySqlRule::is_expression)
            .map(|expr| self.expression(expr))
    }

    fn expression_or_default(&self, node: &Syntax) -> Expr {
        if node.rule() == MySqlRule::DefaultExpression {
            Expr::Unstructured(self.ctx.unstructured(node))
        } else {
            self.expression(node)
        }
    }

    fn expression(&self, node: &Syntax) -> Expr {
        let expr = match node.rule() {
            MySqlRule::LogicalExpression => node
                .child(MySqlRule::LogicalOperator)
                .and_then(|op| LogicalOperator::from_text(self.ctx.text(op)))
                .map(|operator| {
                    Expr::Logical(LogicalExpr {
                        node: self.ctx.node_of(node),
                        operator,
                        exprs: node
                            .child_nodes()
                            .filter(|child| child.rule().is_expression())
                            .map(|child| self.expression(child))
                            .collect(),
                    })
                }),
            MySqlRule::PredicateExpression => node.first_child().map(|predicate| {
                Expr::Predicate(PredicateExpr {
                    node: self.ctx.node_of(node),
                    predicate: self.predicate(predicate),
                })
            }),
            _ => None,
        };
        expr.unwrap_or_else(|| Expr::Unstructured(self.ctx.unstructured(node)))
    }

    fn predicate(&self, node: &Syntax) -> Predicate {
        let predicate = match node.rule() {
            MySqlRule::BinaryComparisonPredicate => self.binary_comparison(node),
            MySqlRule::InPredicate => self.in_predicate(node),
            MySqlRule::ExpressionAtomPredicate => {
                node.find_child(MySqlRule::is_atom).map(|atom| {
                    Predicate::ExprAtom(ExprAtomPredicate {
                        node: self.ctx.node_of(node),
                        atom: self.expr_atom(atom),
                    })
                })
            }
            _ => None,
        };
        predicate.unwrap_or_else(|| Predicate::Unstructured(self.ctx.unstructured(node)))
    }

    fn binary_comparison(&self, node: &Syntax) -> Option<Predicate> {
        let mut operands = node
            .child_nodes()
            .filter(|child| child.rule().is_predicate());
        let left = operands.next()?;
        let right = operands.next()?;
        Some(Predicate::BinaryComparison(BinaryComparisonPredicate {
            node: self.ctx.node_of(node),
            left: Box::new(self.predicate(left)),
            right: Box::new(self.predicate(right)),
            operator: self
                .ctx
                .text(node.child(MySqlRule::ComparisonOperator)?)
                .to_string(),
        }))
    }

    fn in_predicate(&self, node: &Syntax) -> Option<Predicate> {
        let subject = node.find_child(MySqlRule::is_predicate)?;
        let source = match node.find_child(MySqlRule::is_select) {
            Some(select) => InSource::Select(Box::new(self.select_statement(select)?)),
            None => InSource::Exprs(
                node.child(MySqlRule::Expressions)?
                    .child_nodes()
                    .map(|expr| self.expression(expr))
                    .collect(),
            ),
        };
        Some(Predicate::In(InPredicate {
            node: self.ctx.node_of(node),
            predicate: Box::new(self.predicate(subject)),
            negated: node.has_keyword(Keyword::Not),
            source,
        }))
    }

    fn expr_atom(&self, node: &Syntax) -> ExprAtom {
        let atom = match node.rule() {
            MySqlRule::ConstantExpressionAtom => node.child(MySqlRule::Constant).map(|constant| {
                ExprAtom::Constant(ExprAtomConstant {
                    node: self.ctx.node_of(node),
                    constant: Constant {
                        node: self.ctx.node_of(constant),
                        value: self.ctx.text(constant).to_string(),
                    },
                })
            }),
            MySqlRule::FullColumnNameExpressionAtom => node
                .child(MySqlRule::FullColumnName)
                .map(|name| ExprAtom::Column(self.column_name(name))),
            _ => None,
        };
        atom.unwrap_or_else(|| ExprAtom::Unstructured(self.ctx.unstructured(node)))
    }

    fn optional_unstructured(&self, node: &Syntax, rule: MySqlRule) -> Option<Unstructured> {
        node.child(rule).map(|child| self.ctx.unstructured(child))
    }
}

#[cfg(test)]
mod tests {
    use sqlstmt_core::ParseOptions;

    use super::*;
    use crate::grammar::parse_tree;

    fn dispatch(sql: &str) -> Vec<Stmt> {
        let tree = parse_tree(sql, &ParseOptions::default())
            .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e}"));
        MySqlDispatcher::new(sql, 1).dispatch(&tree)
    }

    #[test]
    fn test_single_update_synthesizes_table_sources() {
        let stmts = dispatch("UPDATE db.t AS x SET a = 1");
        let Stmt::Update(update) = &stmts[0] else {
            panic!("expected update, got {:?}", stmts[0]);
        };
        assert_eq!(update.table_sources.node.text, "db.t AS x");
        assert_eq!(update.table_sources.sources.len(), 1);
        let TableSource::Base(base) = &update.table_sources.sources[0] else {
            panic!("expected base source");
        };
        let TableSourceItem::Atom(atom) = &base.item else {
            panic!("expected atom item");
        };
        assert_eq!(atom.table_name.owner.as_deref(), Some("db"));
        assert_eq!(atom.table_name.identifier, "t");
        assert_eq!(atom.alias.as_deref(), Some("x"));
    }

    #[test]
    fn test_limit_offset_forms() {
        let limit = |sql: &str| match &dispatch(sql)[0] {
            Stmt::SimpleSelect(select) => select.query.limit.clone().unwrap(),
            other => panic!("expected select, got {other:?}"),
        };
        let plain = limit("SELECT 1 LIMIT 5");
        assert_eq!((plain.row_count, plain.offset), (Some(5), None));
        let comma = limit("SELECT 1 LIMIT 10, 5");
        assert_eq!((comma.row_count, comma.offset), (Some(5), Some(10)));
        let keyword = limit("SELECT 1 LIMIT 5 OFFSET 10");
        assert_eq!((keyword.row_count, keyword.offset), (Some(5), Some(10)));
        let variable = limit("SELECT 1 LIMIT ?");
        assert_eq!((variable.row_count, variable.offset), (None, None));
    }

    #[test]
    fn test_opaque_families() {
        let stmts =
            dispatch("CREATE TABLE t (a INT); SHOW TABLES; SET a = 1; REPLACE INTO t VALUES (1)");
        let kinds: Vec<_> = stmts.iter().map(Stmt::kind).collect();
        assert_eq!(kinds, vec!["Ddl", "OtherRead", "Unclassified", "Dml"]);
    }
}
