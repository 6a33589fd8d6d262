//! PostgreSQL concrete tree to statement AST.
//!
//! Follows the MySQL dispatcher: one method per production carrying an AST
//! node, with [`Unstructured`] leaves for anything else. PostgreSQL has no
//! dedicated productions for select elements or table atoms, so target-list
//! entries and `UPDATE`/`DELETE` targets are classified here by shape.

use sqlstmt_core::ast::{
    AtomTableItem, BinaryComparisonPredicate, ColumnName, Constant, CreateDatabase, DdlStmt,
    DeleteStmt, DmlStmt, Expr, ExprAtom, ExprAtomConstant, ExprAtomPredicate, FullId,
    IdentifierValue, InPredicate, InSource, InnerJoin, InsertSource, InsertStmt, InsertValues,
    JoinPart, JoinSide, JoinSpec, Limit, LogicalExpr, LogicalOperator, NaturalJoin,
    OtherReadStmt, OuterJoin, ParenthesisSelect, Predicate, PredicateExpr, QueryExpr,
    QueryExprBody, QueryOperand, QuerySpecification, SelectColumnElement, SelectElement,
    SelectElements, SelectStarElement, SelectStmt, SimpleSelect, Stmt, SubqueryTableItem,
    TableName, TableSource, TableSourceBase, TableSourceItem, TableSources, UnionPart,
    UnionSelect, Unstructured, UpdateStmt, UpdatedElement,
};
use sqlstmt_core::cst::{SyntaxNode, SyntaxTree};
use sqlstmt_core::dispatch::DispatchContext;
use sqlstmt_core::{DialectKind, Keyword, Span, Token, TokenKind};

use crate::grammar::PgRule;

type Syntax = SyntaxNode<PgRule>;

/// Builds statements from a PostgreSQL syntax tree.
#[derive(Debug, Clone)]
pub struct PgDispatcher<'a> {
    ctx: DispatchContext<'a>,
}

impl<'a> PgDispatcher<'a> {
    /// Creates a dispatcher for trees parsed from `source`, numbering its
    /// first line as `baseline`.
    #[must_use]
    pub fn new(source: &'a str, baseline: usize) -> Self {
        Self {
            ctx: DispatchContext::new(source, baseline, DialectKind::PostgreSql),
        }
    }

    /// One statement per top-level statement slot, in source order.
    #[must_use]
    pub fn dispatch(&self, tree: &SyntaxTree<PgRule>) -> Vec<Stmt> {
        let Some(statements) = tree.root().child(PgRule::Stmtmulti) else {
            return Vec::new();
        };
        statements
            .child_nodes()
            .map(|node| match node.rule() {
                PgRule::EmptyStmt => Stmt::Empty(self.ctx.node_of(node)),
                _ => self.stmt(node),
            })
            .collect()
    }

    fn stmt(&self, node: &Syntax) -> Stmt {
        let Some(inner) = node.first_child() else {
            return Stmt::Unclassified(self.ctx.unstructured(node));
        };
        let structured = match inner.rule() {
            PgRule::SelectStmt => inner
                .first_child()
                .and_then(|select| self.select_statement(select))
                .map(Stmt::from),
            PgRule::InsertStmt => self.insert(inner).map(Stmt::Insert),
            PgRule::UpdateStmt => self.update(inner).map(Stmt::Update),
            PgRule::DeleteStmt => self.delete(inner).map(Stmt::Delete),
            PgRule::CreatedbStmt => self.create_database(inner).map(Stmt::CreateDatabase),
            _ => None,
        };
        if let Some(stmt) = structured {
            return stmt;
        }
        let body = self.ctx.unstructured(inner);
        match inner.rule() {
            PgRule::DdlStmt | PgRule::CreatedbStmt => Stmt::Ddl(DdlStmt { body }),
            PgRule::VariableShowStmt | PgRule::ExplainStmt => {
                Stmt::OtherRead(OtherReadStmt { body })
            }
            PgRule::SelectStmt
            | PgRule::InsertStmt
            | PgRule::UpdateStmt
            | PgRule::DeleteStmt
            | PgRule::WithStmt
            | PgRule::CallStmt
            | PgRule::MergeStmt
            | PgRule::ValuesStmt => Stmt::Dml(DmlStmt { body }),
            _ => Stmt::Unclassified(body),
        }
    }

    fn create_database(&self, node: &Syntax) -> Option<CreateDatabase> {
        Some(CreateDatabase {
            node: self.ctx.node_of(node),
            name: self.ctx.identifier(node.child(PgRule::ColId)?),
            if_not_exists: node.has_keyword(Keyword::If),
        })
    }

    // Selects

    fn select_statement(&self, node: &Syntax) -> Option<SelectStmt> {
        match node.rule() {
            PgRule::PlainSelect => Some(SelectStmt::Simple(SimpleSelect {
                node: self.ctx.node_of(node),
                query: self.query_specification(node.child(PgRule::SimpleSelectPrimary)?)?,
                lock: self.optional_unstructured(node, PgRule::ForLockingClause),
            })),
            PgRule::SetOperationSelect => self.union_select(node).map(SelectStmt::Union),
            PgRule::ParenthesizedSelect => Some(SelectStmt::Parenthesis(ParenthesisSelect {
                node: self.ctx.node_of(node),
                query_expr: self.query_expr(node.child(PgRule::SelectWithParens)?)?,
                order_by: self.optional_unstructured(node, PgRule::SortClause),
                limit: node.child(PgRule::SelectLimit).map(|l| self.limit(l)),
            })),
            _ => None,
        }
    }

    fn query_specification(&self, node: &Syntax) -> Option<QuerySpecification> {
        Some(QuerySpecification {
            node: self.ctx.node_of(node),
            distinct: node.child(PgRule::DistinctClause).is_some(),
            select_elements: self.select_elements(node.child(PgRule::TargetList)?),
            from: node
                .child(PgRule::FromClause)
                .and_then(|from| from.child(PgRule::FromList))
                .map(|list| self.table_sources(list)),
            where_clause: node
                .child(PgRule::WhereClause)
                .and_then(|clause| self.child_expression(clause)),
            group_by: self.optional_unstructured(node, PgRule::GroupClause),
            having: node
                .child(PgRule::HavingClause)
                .and_then(|having| self.child_expression(having)),
            order_by: self.optional_unstructured(node, PgRule::SortClause),
            limit: node.child(PgRule::SelectLimit).map(|l| self.limit(l)),
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

    /// Classifies a target entry by the shape of its expression: `*`,
    /// `t.*`, a bare column reference, a function call or anything else.
    fn select_element(&self, node: &Syntax) -> Option<SelectElement> {
        if node.rule() == PgRule::TargetStar {
            return Some(SelectElement::Star(SelectStarElement {
                node: self.ctx.node_of(node),
                qualifier: None,
            }));
        }
        if node.rule() != PgRule::TargetEl {
            return None;
        }
        let element = match bare_atom(node.find_child(PgRule::is_expression)?) {
            Some(atom) if atom.rule() == PgRule::Columnref => {
                if atom.has_token(&TokenKind::Star) {
                    SelectElement::Star(SelectStarElement {
                        node: self.ctx.node_of(node),
                        qualifier: self.star_qualifier(atom),
                    })
                } else {
                    SelectElement::Column(SelectColumnElement {
                        node: self.ctx.node_of(node),
                        column: self.column_name(atom),
                        alias: node
                            .child(PgRule::ColLabel)
                            .map(|label| self.ctx.identifier(label).value),
                    })
                }
            }
            Some(atom) if atom.rule() == PgRule::FuncExpr => {
                SelectElement::Function(self.ctx.unstructured(node))
            }
            _ => SelectElement::Expression(self.ctx.unstructured(node)),
        };
        Some(element)
    }

    /// The `t` of `t.*`, spanning the name tokens only.
    fn star_qualifier(&self, columnref: &Syntax) -> Option<FullId> {
        let names: Vec<&Token> = columnref
            .tokens()
            .filter(|token| !matches!(token.kind, TokenKind::Dot | TokenKind::Star))
            .collect();
        let first = names.first()?;
        let last = names.last()?;
        Some(FullId {
            node: self.ctx.node(first.span.merge(last.span)),
            parts: names
                .iter()
                .map(|token| self.ctx.token_text(token).to_string())
                .collect(),
        })
    }

    fn union_select(&self, node: &Syntax) -> Option<UnionSelect> {
        let first = node.find_child(is_set_operand)?;
        Some(UnionSelect {
            node: self.ctx.node_of(node),
            first: self.query_operand(first),
            union_parts: node
                .children_of(PgRule::SetOperationPart)
                .filter_map(|part| self.union_part(part))
                .collect(),
            order_by: self.optional_unstructured(node, PgRule::SortClause),
            limit: node.child(PgRule::SelectLimit).map(|l| self.limit(l)),
        })
    }

    /// `union_type` keeps the operator as written: `UNION ALL`, `INTERSECT`,
    /// `EXCEPT DISTINCT`, ...
    fn union_part(&self, node: &Syntax) -> Option<UnionPart> {
        let first = node.tokens().next()?;
        let last = node.tokens().last().unwrap_or(first);
        let union_type = first.span.merge(last.span).slice(self.ctx.source()).to_string();
        Some(UnionPart {
            node: self.ctx.node_of(node),
            union_type,
            operand: self.query_operand(node.find_child(is_set_operand)?),
        })
    }

    fn query_operand(&self, node: &Syntax) -> QueryOperand {
        let operand = match node.rule() {
            PgRule::SimpleSelectPrimary => {
                self.query_specification(node).map(QueryOperand::Specification)
            }
            PgRule::SelectWithParens => self.query_expr(node).map(QueryOperand::Expression),
            PgRule::SetOperationSelect => self
                .union_select(node)
                .map(|union| QueryOperand::Union(Box::new(union))),
            _ => None,
        };
        operand.unwrap_or_else(|| QueryOperand::Unstructured(self.ctx.unstructured(node)))
    }

    fn query_expr(&self, node: &Syntax) -> Option<QueryExpr> {
        let inner = node.first_child()?;
        let body = match inner.rule() {
            PgRule::SimpleSelectPrimary => {
                QueryExprBody::Specification(self.query_specification(inner)?)
            }
            PgRule::SetOperationSelect => QueryExprBody::Union(Box::new(self.union_select(inner)?)),
            PgRule::SelectWithParens => QueryExprBody::Nested(Box::new(self.query_expr(inner)?)),
            _ => return None,
        };
        Some(QueryExpr {
            node: self.ctx.node_of(node),
            body,
        })
    }

    /// `LIMIT n|ALL`, `OFFSET n [ROWS]` and `FETCH FIRST [n] ROWS ONLY`;
    /// a `FETCH` without a count means one row.
    fn limit(&self, node: &Syntax) -> Limit {
        let count = |clause: &Syntax| {
            clause
                .find_child(PgRule::is_expression)
                .and_then(|expr| self.ctx.text(expr).parse::<u64>().ok())
        };
        let row_count = match node.child(PgRule::LimitClause) {
            Some(limit) => count(limit),
            None => node.child(PgRule::FetchClause).and_then(|fetch| {
                if fetch.find_child(PgRule::is_expression).is_some() {
                    count(fetch)
                } else {
                    Some(1)
                }
            }),
        };
        Limit {
            node: self.ctx.node_of(node),
            row_count,
            offset: node.child(PgRule::OffsetClause).and_then(count),
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
            PgRule::TableRef => node.first_child().map(|item| TableSourceBase {
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
            PgRule::RelationRef => self.relation(node).map(TableSourceItem::Atom),
            PgRule::SubqueryRef => node
                .find_child(PgRule::is_select)
                .and_then(|select| self.select_statement(select))
                .map(|select| {
                    TableSourceItem::Subquery(SubqueryTableItem {
                        node: self.ctx.node_of(node),
                        lateral: node.has_keyword(Keyword::Lateral),
                        select: Box::new(select),
                        alias: self.alias(node),
                    })
                }),
            PgRule::JoinedTableRef => node
                .child(PgRule::FromList)
                .map(|list| TableSourceItem::Nested(self.table_sources(list))),
            _ => None,
        };
        item.unwrap_or_else(|| TableSourceItem::Unstructured(self.ctx.unstructured(node)))
    }

    fn relation(&self, node: &Syntax) -> Option<AtomTableItem> {
        Some(AtomTableItem {
            node: self.ctx.node_of(node),
            table_name: self.table_name(node.child(PgRule::QualifiedName)?),
            alias: self.alias(node),
        })
    }

    fn join_part(&self, node: &Syntax) -> Option<JoinPart> {
        let item = self.table_source_item(node.find_child(PgRule::is_table_item)?);
        let condition = node
            .child(PgRule::JoinQual)
            .and_then(|qual| self.join_spec(qual));
        let node_record = self.ctx.node_of(node);
        let join = match node.rule() {
            PgRule::InnerJoin => JoinPart::Inner(InnerJoin {
                node: node_record,
                item,
                condition,
            }),
            PgRule::OuterJoin => JoinPart::Outer(OuterJoin {
                node: node_record,
                side: join_side(node)?,
                item,
                condition,
            }),
            PgRule::NaturalJoin => JoinPart::Natural(NaturalJoin {
                node: node_record,
                side: join_side(node),
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
                columns: self.name_list(node.child(PgRule::NameList)?),
            })
        }
    }

    fn table_name(&self, node: &Syntax) -> TableName {
        TableName::from_full_id(self.ctx.full_id(node))
    }

    fn column_name(&self, node: &Syntax) -> ColumnName {
        ColumnName::from_full_id(self.ctx.full_id(node))
    }

    /// The column named by an assignment target; subscripts are dropped.
    fn set_target(&self, node: &Syntax) -> Option<ColumnName> {
        let names: Vec<&Token> = node
            .tokens()
            .take_while(|token| token.kind != TokenKind::LeftBracket)
            .filter(|token| token.kind != TokenKind::Dot)
            .collect();
        let span = names.first()?.span.merge(names.last()?.span);
        Some(ColumnName::from_full_id(FullId {
            node: self.ctx.node(span),
            parts: names
                .iter()
                .map(|token| self.ctx.token_text(token).to_string())
                .collect(),
        }))
    }

    fn alias(&self, node: &Syntax) -> Option<String> {
        node.child(PgRule::AliasClause)
            .and_then(|alias| alias.child(PgRule::ColId))
            .map(|id| self.ctx.identifier(id).value)
    }

    fn name_list(&self, node: &Syntax) -> Vec<String> {
        node.children_of(PgRule::ColId)
            .map(|id| self.ctx.identifier(id).value)
            .collect()
    }

    /// The target relation of an UPDATE or DELETE followed by the
    /// `FROM`/`USING` sources, as one table list.
    fn target_sources(&self, node: &Syntax, extra: Option<&Syntax>) -> Option<TableSources> {
        let relation = node.child(PgRule::RelationRef)?;
        let mut sources = vec![TableSource::Base(TableSourceBase {
            node: self.ctx.node_of(relation),
            item: TableSourceItem::Atom(self.relation(relation)?),
            joins: Vec::new(),
        })];
        let mut span: Span = relation.span();
        if let Some(list) = extra {
            sources.extend(list.child_nodes().map(|source| self.table_source(source)));
            span = span.merge(list.span());
        }
        Some(TableSources {
            node: self.ctx.node(span),
            sources,
        })
    }

    // Data manipulation

    fn insert(&self, node: &Syntax) -> Option<InsertStmt> {
        let source = if let Some(values) = node.child(PgRule::ValuesClause) {
            InsertSource::Values(InsertValues {
                node: self.ctx.node_of(values),
                rows: values
                    .children_of(PgRule::ValuesRow)
                    .map(|row| row.child_nodes().map(|e| self.expression_or_default(e)).collect())
                    .collect(),
            })
        } else if let Some(default) = node.child(PgRule::DefaultValues) {
            InsertSource::DefaultValues(self.ctx.node_of(default))
        } else {
            InsertSource::Select(Box::new(
                self.select_statement(node.find_child(PgRule::is_select)?)?,
            ))
        };
        let target = node.child(PgRule::InsertTarget)?;
        Some(InsertStmt {
            node: self.ctx.node_of(node),
            table_name: self.table_name(target.child(PgRule::QualifiedName)?),
            columns: node
                .child(PgRule::InsertColumnList)
                .map(|list| {
                    list.children_of(PgRule::SetTarget)
                        .filter_map(|target| target.tokens().next())
                        .map(|token| IdentifierValue::from_raw(self.ctx.token_text(token)).value)
                        .collect()
                })
                .unwrap_or_default(),
            source,
            on_duplicate: Vec::new(),
            on_conflict: self.optional_unstructured(node, PgRule::OnConflictClause),
            returning: self.optional_unstructured(node, PgRule::ReturningClause),
        })
    }

    fn updated_elements(&self, node: &Syntax) -> Vec<UpdatedElement> {
        let mut elements = Vec::new();
        for clause in node.child_nodes() {
            match clause.rule() {
                PgRule::SetClause => {
                    let Some(target) = clause.child(PgRule::SetTarget) else {
                        continue;
                    };
                    let value = clause.find_child(|rule| {
                        rule.is_expression() || rule == PgRule::SetToDefault
                    });
                    if let (Some(column), Some(value)) = (self.set_target(target), value) {
                        elements.push(UpdatedElement {
                            node: self.ctx.node_of(clause),
                            column,
                            value: self.expression_or_default(value),
                        });
                    }
                }
                PgRule::MultiSetClause => elements.extend(self.multi_set(clause)),
                _ => {}
            }
        }
        elements
    }

    /// `(a, b) = (x, y)` pairs each target with its row item; any other
    /// right-hand side is shared by every target.
    fn multi_set(&self, node: &Syntax) -> Vec<UpdatedElement> {
        let targets: Vec<&Syntax> = node.children_of(PgRule::SetTarget).collect();
        let Some(rhs) = node.find_child(PgRule::is_expression) else {
            return Vec::new();
        };
        let row: Vec<&Syntax> = bare_atom(rhs)
            .filter(|atom| atom.rule() == PgRule::CExprNested)
            .map(|nested| {
                nested
                    .child_nodes()
                    .filter(|child| child.rule().is_expression())
                    .collect()
            })
            .unwrap_or_default();
        targets
            .iter()
            .enumerate()
            .filter_map(|(i, target)| {
                let value = if row.len() == targets.len() {
                    row[i]
                } else {
                    rhs
                };
                Some(UpdatedElement {
                    node: self.ctx.node_of(node),
                    column: self.set_target(target)?,
                    value: self.expression(value),
                })
            })
            .collect()
    }

    fn update(&self, node: &Syntax) -> Option<UpdateStmt> {
        let from = node
            .child(PgRule::FromClause)
            .and_then(|from| from.child(PgRule::FromList));
        Some(UpdateStmt {
            node: self.ctx.node_of(node),
            table_sources: self.target_sources(node, from)?,
            updated_elements: self.updated_elements(node),
            where_clause: node
                .child(PgRule::WhereClause)
                .and_then(|clause| self.child_expression(clause)),
            order_by: None,
            limit: None,
            returning: self.optional_unstructured(node, PgRule::ReturningClause),
        })
    }

    fn delete(&self, node: &Syntax) -> Option<DeleteStmt> {
        let using = node
            .child(PgRule::UsingClause)
            .and_then(|using| using.child(PgRule::FromList));
        Some(DeleteStmt {
            node: self.ctx.node_of(node),
            table_sources: self.target_sources(node, using)?,
            targets: Vec::new(),
            where_clause: node
                .child(PgRule::WhereClause)
                .and_then(|clause| self.child_expression(clause)),
            order_by: None,
            limit: None,
            returning: self.optional_unstructured(node, PgRule::ReturningClause),
        })
    }

    // Expressions

    /// The direct child expression of a clause node (`WHERE`, `HAVING`, `ON`).
    fn child_expression(&self, node: &Syntax) -> Option<Expr> {
        node.find_child(PgRule::is_expression)
            .map(|expr| self.expression(expr))
    }

    fn expression_or_default(&self, node: &Syntax) -> Expr {
        if node.rule() == PgRule::SetToDefault {
            Expr::Unstructured(self.ctx.unstructured(node))
        } else {
            self.expression(node)
        }
    }

    fn expression(&self, node: &Syntax) -> Expr {
        let operator = match node.rule() {
            PgRule::AExprAnd => Some(LogicalOperator::And),
            PgRule::AExprOr => Some(LogicalOperator::Or),
            _ => None,
        };
        let expr = match (node.rule(), operator) {
            (_, Some(operator)) => Some(Expr::Logical(LogicalExpr {
                node: self.ctx.node_of(node),
                operator,
                exprs: node
                    .child_nodes()
                    .filter(|child| child.rule().is_expression())
                    .map(|child| self.expression(child))
                    .collect(),
            })),
            (PgRule::AExprPredicate, None) => node.first_child().map(|predicate| {
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
            PgRule::AExprCompare => self.binary_comparison(node),
            PgRule::AExprIn => self.in_predicate(node),
            PgRule::AExprPrimary => node.first_child().map(|atom| {
                Predicate::ExprAtom(ExprAtomPredicate {
                    node: self.ctx.node_of(node),
                    atom: self.expr_atom(atom),
                })
            }),
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
            operator: self.ctx.text(node.child(PgRule::CompareOp)?).to_string(),
        }))
    }

    fn in_predicate(&self, node: &Syntax) -> Option<Predicate> {
        let subject = node.find_child(PgRule::is_predicate)?;
        let source = match node.find_child(PgRule::is_select) {
            Some(select) => InSource::Select(Box::new(self.select_statement(select)?)),
            None => InSource::Exprs(
                node.child(PgRule::InList)?
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
        match node.rule() {
            PgRule::AexprConst => ExprAtom::Constant(ExprAtomConstant {
                node: self.ctx.node_of(node),
                constant: Constant {
                    node: self.ctx.node_of(node),
                    value: self.ctx.text(node).to_string(),
                },
            }),
            PgRule::Columnref if !node.has_token(&TokenKind::Star) => {
                ExprAtom::Column(self.column_name(node))
            }
            _ => ExprAtom::Unstructured(self.ctx.unstructured(node)),
        }
    }

    fn optional_unstructured(&self, node: &Syntax, rule: PgRule) -> Option<Unstructured> {
        node.child(rule).map(|child| self.ctx.unstructured(child))
    }
}

fn is_set_operand(rule: PgRule) -> bool {
    matches!(
        rule,
        PgRule::SimpleSelectPrimary | PgRule::SelectWithParens | PgRule::SetOperationSelect
    )
}

/// The operand of an expression made of a single operand and nothing else.
fn bare_atom(expr: &Syntax) -> Option<&Syntax> {
    if expr.rule() != PgRule::AExprPredicate {
        return None;
    }
    let primary = expr.first_child()?;
    if primary.rule() != PgRule::AExprPrimary {
        return None;
    }
    primary.first_child()
}

fn join_side(node: &Syntax) -> Option<JoinSide> {
    if node.has_keyword(Keyword::Left) {
        Some(JoinSide::Left)
    } else if node.has_keyword(Keyword::Right) {
        Some(JoinSide::Right)
    } else if node.has_keyword(Keyword::Full) {
        Some(JoinSide::Full)
    } else {
        None
    }
}
