//! Tests for INSERT, UPDATE and DELETE.

mod common;
use common::*;

use sqlstmt_core::ast::{Expr, InsertSource, SelectStmt, TableSource, TableSourceItem};

fn atom_names(sources: &[TableSource]) -> Vec<String> {
    sources
        .iter()
        .map(|source| match source {
            TableSource::Base(base) => match &base.item {
                TableSourceItem::Atom(atom) => atom.table_name.qualified(),
                other => panic!("Expected atom, got {other:?}"),
            },
            other => panic!("Expected base, got {other:?}"),
        })
        .collect()
}

#[test]
fn insert_values() {
    let insert = parse_insert("INSERT INTO public.t (a, \"B\") VALUES (1, DEFAULT), (2, 'x')");
    assert_eq!(insert.table_name.qualified(), "public.t");
    assert_eq!(insert.columns, vec!["a", "B"]);
    let InsertSource::Values(values) = &insert.source else {
        panic!("expected VALUES source");
    };
    assert_eq!(values.rows.len(), 2);
    assert!(matches!(values.rows[0][1], Expr::Unstructured(_)));
    assert_eq!(values.rows[1][1].node().text, "'x'");
    assert!(insert.on_duplicate.is_empty());
    assert!(insert.on_conflict.is_none());
}

#[test]
fn insert_select() {
    let insert = parse_insert("INSERT INTO t SELECT a FROM u UNION SELECT b FROM v");
    assert!(insert.columns.is_empty());
    let InsertSource::Select(select) = &insert.source else {
        panic!("expected SELECT source");
    };
    assert!(matches!(select.as_ref(), SelectStmt::Union(_)));
}

#[test]
fn insert_default_values() {
    let insert = parse_insert("INSERT INTO t DEFAULT VALUES RETURNING id");
    let InsertSource::DefaultValues(node) = &insert.source else {
        panic!("expected DEFAULT VALUES");
    };
    assert_eq!(node.text, "DEFAULT VALUES");
    assert_eq!(insert.returning.unwrap().node.text, "RETURNING id");
}

#[test]
fn insert_on_conflict_and_returning() {
    let insert = parse_insert(
        "INSERT INTO t AS x (id, n) VALUES (1, 2) \
         ON CONFLICT (id) DO UPDATE SET n = x.n + excluded.n WHERE x.n < 10 \
         RETURNING *",
    );
    assert_eq!(insert.table_name.identifier, "t");
    assert_eq!(
        insert.on_conflict.unwrap().node.text,
        "ON CONFLICT (id) DO UPDATE SET n = x.n + excluded.n WHERE x.n < 10"
    );
    assert_eq!(insert.returning.unwrap().node.text, "RETURNING *");
}

#[test]
fn insert_column_with_subscript() {
    let insert = parse_insert("INSERT INTO t (arr[1], rec.f) VALUES (1, 2)");
    assert_eq!(insert.columns, vec!["arr", "rec"]);
}

#[test]
fn update_simple() {
    let update = parse_update("UPDATE t SET a = 1, b = DEFAULT WHERE id = 3 RETURNING a");
    assert_eq!(atom_names(&update.table_sources.sources), vec!["t"]);
    assert_eq!(update.table_sources.node.text, "t");
    let columns: Vec<_> = update
        .updated_elements
        .iter()
        .map(|e| e.column.identifier.as_str())
        .collect();
    assert_eq!(columns, vec!["a", "b"]);
    assert!(matches!(update.updated_elements[1].value, Expr::Unstructured(_)));
    assert!(update.where_clause.is_some());
    assert!(update.order_by.is_none());
    assert!(update.limit.is_none());
    assert_eq!(update.returning.unwrap().node.text, "RETURNING a");
}

#[test]
fn update_from_lists_target_first() {
    let update = parse_update(
        "UPDATE ONLY accounts a SET balance = a.balance + t.amount \
         FROM transfers t, audit.log l WHERE t.account_id = a.id",
    );
    assert_eq!(
        atom_names(&update.table_sources.sources),
        vec!["accounts", "transfers", "audit.log"]
    );
    let TableSource::Base(target) = &update.table_sources.sources[0] else {
        panic!("expected base");
    };
    let TableSourceItem::Atom(atom) = &target.item else {
        panic!("expected atom");
    };
    assert_eq!(atom.alias.as_deref(), Some("a"));
}

#[test]
fn update_multi_column_assignment() {
    let update = parse_update("UPDATE t SET (a, b) = (1, 2), (c, d) = (SELECT 3, 4)");
    let pairs: Vec<_> = update
        .updated_elements
        .iter()
        .map(|e| (e.column.identifier.as_str(), e.value.node().text.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("a", "1"),
            ("b", "2"),
            ("c", "(SELECT 3, 4)"),
            ("d", "(SELECT 3, 4)"),
        ]
    );
}

#[test]
fn update_qualified_target_column() {
    let update = parse_update("UPDATE t SET rec.f = 1, arr[2] = 3");
    let first = &update.updated_elements[0].column;
    assert_eq!(first.owner.as_deref(), Some("rec"));
    assert_eq!(first.identifier, "f");
    assert_eq!(update.updated_elements[1].column.identifier, "arr");
}

#[test]
fn delete_simple() {
    let delete = parse_delete("DELETE FROM s.t WHERE a = 1");
    assert_eq!(atom_names(&delete.table_sources.sources), vec!["s.t"]);
    assert!(delete.targets.is_empty());
    assert!(delete.where_clause.is_some());
    assert!(delete.returning.is_none());
}

#[test]
fn delete_using_lists_target_first() {
    let delete = parse_delete(
        "DELETE FROM orders o USING customers c WHERE o.customer_id = c.id RETURNING o.id",
    );
    assert_eq!(
        atom_names(&delete.table_sources.sources),
        vec!["orders", "customers"]
    );
    assert_eq!(delete.table_sources.node.text, "orders o USING customers c");
    assert_eq!(delete.returning.unwrap().node.text, "RETURNING o.id");
}

#[test]
fn delete_where_current_of() {
    let delete = parse_delete("DELETE FROM t WHERE CURRENT OF cur");
    assert!(delete.where_clause.is_none());
}
