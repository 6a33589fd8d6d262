//! AST traversal.
//!
//! Implement [`Visitor`] and override the methods you care about. Every
//! default method delegates to the matching `walk_*` function, which visits
//! the children in source order; call it from an override to keep descending.
//! [`Visitor::visit_node`] sees the [`Node`] of every value exactly once.

use super::{
    ColumnName, CreateDatabase, DeleteStmt, Expr, ExprAtom, FullId, InSource, InsertSource,
    InsertStmt, JoinPart, JoinSpec, Limit, Node, ParenthesisSelect, Predicate, QueryExpr,
    QueryExprBody, QueryOperand, QuerySpecification, SelectElement, SelectElements, SelectStmt,
    SimpleSelect, Stmt, TableName, TableSource, TableSourceItem, TableSources, UnionSelect,
    Unstructured, UpdateStmt, UpdatedElement,
};

pub trait Visitor {
    fn visit_node(&mut self, _node: &Node) {}

    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt);
    }
    fn visit_select_stmt(&mut self, select: &SelectStmt) {
        walk_select_stmt(self, select);
    }
    fn visit_simple_select(&mut self, select: &SimpleSelect) {
        walk_simple_select(self, select);
    }
    fn visit_union_select(&mut self, select: &UnionSelect) {
        walk_union_select(self, select);
    }
    fn visit_parenthesis_select(&mut self, select: &ParenthesisSelect) {
        walk_parenthesis_select(self, select);
    }
    fn visit_query_specification(&mut self, query: &QuerySpecification) {
        walk_query_specification(self, query);
    }
    fn visit_query_operand(&mut self, operand: &QueryOperand) {
        walk_query_operand(self, operand);
    }
    fn visit_query_expr(&mut self, query: &QueryExpr) {
        walk_query_expr(self, query);
    }
    fn visit_select_elements(&mut self, elements: &SelectElements) {
        walk_select_elements(self, elements);
    }
    fn visit_select_element(&mut self, element: &SelectElement) {
        walk_select_element(self, element);
    }
    fn visit_table_sources(&mut self, sources: &TableSources) {
        walk_table_sources(self, sources);
    }
    fn visit_table_source(&mut self, source: &TableSource) {
        walk_table_source(self, source);
    }
    fn visit_table_source_item(&mut self, item: &TableSourceItem) {
        walk_table_source_item(self, item);
    }
    fn visit_join_part(&mut self, join: &JoinPart) {
        walk_join_part(self, join);
    }
    fn visit_join_spec(&mut self, spec: &JoinSpec) {
        walk_join_spec(self, spec);
    }
    fn visit_insert(&mut self, insert: &InsertStmt) {
        walk_insert(self, insert);
    }
    fn visit_update(&mut self, update: &UpdateStmt) {
        walk_update(self, update);
    }
    fn visit_delete(&mut self, delete: &DeleteStmt) {
        walk_delete(self, delete);
    }
    fn visit_updated_element(&mut self, element: &UpdatedElement) {
        walk_updated_element(self, element);
    }
    fn visit_create_database(&mut self, create: &CreateDatabase) {
        self.visit_node(&create.node);
    }
    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }
    fn visit_predicate(&mut self, predicate: &Predicate) {
        walk_predicate(self, predicate);
    }
    fn visit_expr_atom(&mut self, atom: &ExprAtom) {
        walk_expr_atom(self, atom);
    }
    fn visit_table_name(&mut self, name: &TableName) {
        self.visit_node(&name.node);
    }
    fn visit_column_name(&mut self, name: &ColumnName) {
        self.visit_node(&name.node);
    }
    fn visit_full_id(&mut self, id: &FullId) {
        self.visit_node(&id.node);
    }
    fn visit_limit(&mut self, limit: &Limit) {
        self.visit_node(&limit.node);
    }
    fn visit_unstructured(&mut self, unstructured: &Unstructured) {
        self.visit_node(&unstructured.node);
    }
}

pub fn walk_stmt<V: Visitor + ?Sized>(v: &mut V, stmt: &Stmt) {
    match stmt {
        Stmt::SimpleSelect(s) => v.visit_simple_select(s),
        Stmt::UnionSelect(s) => v.visit_union_select(s),
        Stmt::ParenthesisSelect(s) => v.visit_parenthesis_select(s),
        Stmt::Insert(s) => v.visit_insert(s),
        Stmt::Update(s) => v.visit_update(s),
        Stmt::Delete(s) => v.visit_delete(s),
        Stmt::Ddl(s) => v.visit_unstructured(&s.body),
        Stmt::Dml(s) => v.visit_unstructured(&s.body),
        Stmt::OtherRead(s) => v.visit_unstructured(&s.body),
        Stmt::CreateDatabase(s) => v.visit_create_database(s),
        Stmt::Unclassified(s) => v.visit_unstructured(s),
        Stmt::Empty(node) => v.visit_node(node),
    }
}

pub fn walk_select_stmt<V: Visitor + ?Sized>(v: &mut V, select: &SelectStmt) {
    match select {
        SelectStmt::Simple(s) => v.visit_simple_select(s),
        SelectStmt::Union(s) => v.visit_union_select(s),
        SelectStmt::Parenthesis(s) => v.visit_parenthesis_select(s),
    }
}

fn walk_tail<V: Visitor + ?Sized>(
    v: &mut V,
    order_by: Option<&Unstructured>,
    limit: Option<&Limit>,
) {
    if let Some(order_by) = order_by {
        v.visit_unstructured(order_by);
    }
    if let Some(limit) = limit {
        v.visit_limit(limit);
    }
}

pub fn walk_simple_select<V: Visitor + ?Sized>(v: &mut V, select: &SimpleSelect) {
    v.visit_node(&select.node);
    v.visit_query_specification(&select.query);
    if let Some(lock) = &select.lock {
        v.visit_unstructured(lock);
    }
}

pub fn walk_union_select<V: Visitor + ?Sized>(v: &mut V, select: &UnionSelect) {
    v.visit_node(&select.node);
    v.visit_query_operand(&select.first);
    for part in &select.union_parts {
        v.visit_node(&part.node);
        v.visit_query_operand(&part.operand);
    }
    walk_tail(v, select.order_by.as_ref(), select.limit.as_ref());
}

pub fn walk_parenthesis_select<V: Visitor + ?Sized>(v: &mut V, select: &ParenthesisSelect) {
    v.visit_node(&select.node);
    v.visit_query_expr(&select.query_expr);
    walk_tail(v, select.order_by.as_ref(), select.limit.as_ref());
}

pub fn walk_query_specification<V: Visitor + ?Sized>(v: &mut V, query: &QuerySpecification) {
    v.visit_node(&query.node);
    v.visit_select_elements(&query.select_elements);
    if let Some(from) = &query.from {
        v.visit_table_sources(from);
    }
    if let Some(expr) = &query.where_clause {
        v.visit_expr(expr);
    }
    if let Some(group_by) = &query.group_by {
        v.visit_unstructured(group_by);
    }
    if let Some(having) = &query.having {
        v.visit_expr(having);
    }
    walk_tail(v, query.order_by.as_ref(), query.limit.as_ref());
}

pub fn walk_query_operand<V: Visitor + ?Sized>(v: &mut V, operand: &QueryOperand) {
    match operand {
        QueryOperand::Specification(q) => v.visit_query_specification(q),
        QueryOperand::Expression(q) => v.visit_query_expr(q),
        QueryOperand::Union(u) => v.visit_union_select(u),
        QueryOperand::Unstructured(u) => v.visit_unstructured(u),
    }
}

pub fn walk_query_expr<V: Visitor + ?Sized>(v: &mut V, query: &QueryExpr) {
    v.visit_node(&query.node);
    match &query.body {
        QueryExprBody::Specification(q) => v.visit_query_specification(q),
        QueryExprBody::Union(u) => v.visit_union_select(u),
        QueryExprBody::Nested(q) => v.visit_query_expr(q),
    }
}

pub fn walk_select_elements<V: Visitor + ?Sized>(v: &mut V, elements: &SelectElements) {
    v.visit_node(&elements.node);
    for element in &elements.elements {
        v.visit_select_element(element);
    }
}

pub fn walk_select_element<V: Visitor + ?Sized>(v: &mut V, element: &SelectElement) {
    match element {
        SelectElement::Star(star) => {
            v.visit_node(&star.node);
            if let Some(qualifier) = &star.qualifier {
                v.visit_full_id(qualifier);
            }
        }
        SelectElement::Column(column) => {
            v.visit_node(&column.node);
            v.visit_column_name(&column.column);
        }
        SelectElement::Function(u) | SelectElement::Expression(u) => v.visit_unstructured(u),
    }
}

pub fn walk_table_sources<V: Visitor + ?Sized>(v: &mut V, sources: &TableSources) {
    v.visit_node(&sources.node);
    for source in &sources.sources {
        v.visit_table_source(source);
    }
}

pub fn walk_table_source<V: Visitor + ?Sized>(v: &mut V, source: &TableSource) {
    match source {
        TableSource::Base(base) => {
            v.visit_node(&base.node);
            v.visit_table_source_item(&base.item);
            for join in &base.joins {
                v.visit_join_part(join);
            }
        }
        TableSource::Unstructured(u) => v.visit_unstructured(u),
    }
}

pub fn walk_table_source_item<V: Visitor + ?Sized>(v: &mut V, item: &TableSourceItem) {
    match item {
        TableSourceItem::Atom(atom) => {
            v.visit_node(&atom.node);
            v.visit_table_name(&atom.table_name);
        }
        TableSourceItem::Subquery(sub) => {
            v.visit_node(&sub.node);
            v.visit_select_stmt(&sub.select);
        }
        TableSourceItem::Nested(sources) => v.visit_table_sources(sources),
        TableSourceItem::Unstructured(u) => v.visit_unstructured(u),
    }
}

pub fn walk_join_part<V: Visitor + ?Sized>(v: &mut V, join: &JoinPart) {
    v.visit_node(join.node());
    v.visit_table_source_item(join.item());
    if let Some(spec) = join.condition() {
        v.visit_join_spec(spec);
    }
}

pub fn walk_join_spec<V: Visitor + ?Sized>(v: &mut V, spec: &JoinSpec) {
    v.visit_node(spec.node());
    if let JoinSpec::On { expr, .. } = spec {
        v.visit_expr(expr);
    }
}

pub fn walk_insert<V: Visitor + ?Sized>(v: &mut V, insert: &InsertStmt) {
    v.visit_node(&insert.node);
    v.visit_table_name(&insert.table_name);
    match &insert.source {
        InsertSource::Values(values) => {
            v.visit_node(&values.node);
            for expr in values.rows.iter().flatten() {
                v.visit_expr(expr);
            }
        }
        InsertSource::Select(select) => v.visit_select_stmt(select),
        InsertSource::Set(elements) => {
            for element in elements {
                v.visit_updated_element(element);
            }
        }
        InsertSource::DefaultValues(node) => v.visit_node(node),
    }
    for element in &insert.on_duplicate {
        v.visit_updated_element(element);
    }
    for clause in [&insert.on_conflict, &insert.returning].into_iter().flatten() {
        v.visit_unstructured(clause);
    }
}

pub fn walk_update<V: Visitor + ?Sized>(v: &mut V, update: &UpdateStmt) {
    v.visit_node(&update.node);
    v.visit_table_sources(&update.table_sources);
    for element in &update.updated_elements {
        v.visit_updated_element(element);
    }
    if let Some(expr) = &update.where_clause {
        v.visit_expr(expr);
    }
    walk_tail(v, update.order_by.as_ref(), update.limit.as_ref());
    if let Some(returning) = &update.returning {
        v.visit_unstructured(returning);
    }
}

pub fn walk_delete<V: Visitor + ?Sized>(v: &mut V, delete: &DeleteStmt) {
    v.visit_node(&delete.node);
    for target in &delete.targets {
        v.visit_table_name(target);
    }
    v.visit_table_sources(&delete.table_sources);
    if let Some(expr) = &delete.where_clause {
        v.visit_expr(expr);
    }
    walk_tail(v, delete.order_by.as_ref(), delete.limit.as_ref());
    if let Some(returning) = &delete.returning {
        v.visit_unstructured(returning);
    }
}

pub fn walk_updated_element<V: Visitor + ?Sized>(v: &mut V, element: &UpdatedElement) {
    v.visit_node(&element.node);
    v.visit_column_name(&element.column);
    v.visit_expr(&element.value);
}

pub fn walk_expr<V: Visitor + ?Sized>(v: &mut V, expr: &Expr) {
    match expr {
        Expr::Logical(logical) => {
            v.visit_node(&logical.node);
            for operand in &logical.exprs {
                v.visit_expr(operand);
            }
        }
        Expr::Predicate(predicate) => {
            v.visit_node(&predicate.node);
            v.visit_predicate(&predicate.predicate);
        }
        Expr::Unstructured(u) => v.visit_unstructured(u),
    }
}

pub fn walk_predicate<V: Visitor + ?Sized>(v: &mut V, predicate: &Predicate) {
    match predicate {
        Predicate::BinaryComparison(cmp) => {
            v.visit_node(&cmp.node);
            v.visit_predicate(&cmp.left);
            v.visit_predicate(&cmp.right);
        }
        Predicate::In(in_predicate) => {
            v.visit_node(&in_predicate.node);
            v.visit_predicate(&in_predicate.predicate);
            match &in_predicate.source {
                InSource::Exprs(exprs) => {
                    for expr in exprs {
                        v.visit_expr(expr);
                    }
                }
                InSource::Select(select) => v.visit_select_stmt(select),
            }
        }
        Predicate::ExprAtom(atom) => {
            v.visit_node(&atom.node);
            v.visit_expr_atom(&atom.atom);
        }
        Predicate::Unstructured(u) => v.visit_unstructured(u),
    }
}

pub fn walk_expr_atom<V: Visitor + ?Sized>(v: &mut V, atom: &ExprAtom) {
    match atom {
        ExprAtom::Constant(constant) => {
            v.visit_node(&constant.node);
            v.visit_node(&constant.constant.node);
        }
        ExprAtom::Column(column) => v.visit_column_name(column),
        ExprAtom::Unstructured(u) => v.visit_unstructured(u),
    }
}

/// Collects table names in the order they are visited.
#[derive(Debug, Default)]
struct TableCollector {
    tables: Vec<TableName>,
}

impl Visitor for TableCollector {
    fn visit_table_name(&mut self, name: &TableName) {
        self.tables.push(name.clone());
    }
}

impl Stmt {
    /// Tables named anywhere in the statement's structured parts, in source
    /// order. Tables inside opaque leaves are not reported.
    #[must_use]
    pub fn referenced_tables(&self) -> Vec<TableName> {
        let mut collector = TableCollector::default();
        collector.visit_stmt(self);
        collector.tables
    }
}
