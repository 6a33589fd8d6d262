//! Tests for INSERT, UPDATE and DELETE.

mod common;
use common::*;

use sqlstmt_core::ast::{Expr, InsertSource, JoinPart, TableSource, TableSourceItem, TableSources};

fn atom_names(sources: &TableSources) -> Vec<String> {
    sources
        .sources
        .iter()
        .map(|source| match source {
            TableSource::Base(base) => match &base.item {
                TableSourceItem::Atom(atom) => atom.table_name.qualified(),
                other => panic!("Expected atom, got {other:?}"),
            },
            TableSource::Unstructured(u) => panic!("Unexpected {u:?}"),
        })
        .collect()
}

#[test]
fn insert_values() {
    let i = parse_insert("INSERT INTO db.t (a, b) VALUES (1, 'x'), (2, DEFAULT)");
    assert_eq!(i.table_name.qualified(), "db.t");
    assert_eq!(i.columns, vec!["a", "b"]);
    let InsertSource::Values(values) = &i.source else {
        panic!("expected VALUES");
    };
    assert_eq!(values.rows.len(), 2);
    assert!(values.rows.iter().all(|row| row.len() == 2));
    assert!(matches!(
        &values.rows[1][1],
        Expr::Unstructured(u) if u.production == "DefaultExpression"
    ));
    assert!(i.on_duplicate.is_empty());
}

#[test]
fn insert_without_column_list() {
    let i = parse_insert("INSERT t VALUE (1)");
    assert!(i.columns.is_empty());
    assert_eq!(i.table_name.identifier, "t");
}

#[test]
fn insert_select() {
    let i = parse_insert("INSERT INTO t (a) SELECT b FROM u WHERE c = 1");
    let InsertSource::Select(select) = &i.source else {
        panic!("expected SELECT source");
    };
    assert_eq!(select.node().text, "SELECT b FROM u WHERE c = 1");
}

#[test]
fn insert_set() {
    let i = parse_insert("INSERT INTO t SET a = 1, b = DEFAULT");
    let InsertSource::Set(elements) = &i.source else {
        panic!("expected SET source");
    };
    let columns: Vec<_> = elements.iter().map(|e| e.column.identifier.as_str()).collect();
    assert_eq!(columns, vec!["a", "b"]);
}

#[test]
fn insert_on_duplicate_key_update() {
    let i = parse_insert(
        "INSERT INTO t (a, b) VALUES (1, 2) AS new ON DUPLICATE KEY UPDATE b = new.b, a = a + 1",
    );
    let columns: Vec<_> = i.on_duplicate.iter().map(|e| e.column.identifier.as_str()).collect();
    assert_eq!(columns, vec!["b", "a"]);
    assert_eq!(i.on_duplicate[0].value.node().text, "new.b");
}

#[test]
fn single_table_update() {
    let u = parse_update("UPDATE t SET a = 1, b = b + 1 WHERE id = 3 ORDER BY id LIMIT 1");
    assert_eq!(atom_names(&u.table_sources), vec!["t"]);
    let columns: Vec<_> = u
        .updated_elements
        .iter()
        .map(|e| e.column.identifier.as_str())
        .collect();
    assert_eq!(columns, vec!["a", "b"]);
    assert!(u.where_clause.is_some());
    assert!(u.order_by.is_some());
    assert_eq!(u.limit.unwrap().row_count, Some(1));
}

#[test]
fn multi_table_update() {
    let u = parse_update("UPDATE t, db.u SET t.a = u.a WHERE t.id = u.id");
    assert_eq!(atom_names(&u.table_sources), vec!["t", "db.u"]);
    assert_eq!(u.updated_elements[0].column.owner.as_deref(), Some("t"));
    assert!(u.where_clause.is_some());
}

#[test]
fn update_with_join() {
    let u = parse_update("UPDATE t JOIN u ON t.id = u.id SET t.a = 1");
    let TableSource::Base(base) = &u.table_sources.sources[0] else {
        panic!("expected base");
    };
    assert!(matches!(base.joins[0], JoinPart::Inner(_)));
    assert!(u.where_clause.is_none());
}

#[test]
fn single_table_delete() {
    let d = parse_delete("DELETE FROM t WHERE x = 1");
    assert_eq!(atom_names(&d.table_sources), vec!["t"]);
    assert!(d.targets.is_empty());
    assert!(d.where_clause.is_some());
}

#[test]
fn multi_table_delete() {
    let d = parse_delete("DELETE t FROM t JOIN u ON u.id = t.id WHERE x = 1");
    assert_eq!(d.table_sources.sources.len(), 1);
    let TableSource::Base(base) = &d.table_sources.sources[0] else {
        panic!("expected base");
    };
    assert_eq!(base.joins.len(), 1);
    let targets: Vec<_> = d.targets.iter().map(|t| t.identifier.as_str()).collect();
    assert_eq!(targets, vec!["t"]);
    assert!(d.where_clause.is_some());
}

#[test]
fn multi_table_delete_using() {
    let d = parse_delete("DELETE FROM t1.*, t2 USING t1 JOIN t2 JOIN t3 WHERE t1.id = t2.id");
    let targets: Vec<_> = d.targets.iter().map(|t| t.identifier.as_str()).collect();
    assert_eq!(targets, vec!["t1", "t2"]);
    assert_eq!(atom_names(&d.table_sources), vec!["t1"]);
}

#[test]
fn delete_table_sources_are_never_empty() {
    for sql in [
        "DELETE FROM t WHERE x = 1",
        "DELETE t FROM t JOIN u ON u.id = t.id WHERE x = 1",
        "DELETE LOW_PRIORITY QUICK FROM t",
        "DELETE FROM t AS x ORDER BY id LIMIT 10",
    ] {
        assert!(!parse_delete(sql).table_sources.sources.is_empty(), "{sql}");
    }
}

#[test]
fn single_delete_alias_span() {
    let d = parse_delete("DELETE FROM db.t AS x WHERE x.id = 1");
    assert_eq!(d.table_sources.node.text, "db.t AS x");
    let TableSource::Base(base) = &d.table_sources.sources[0] else {
        panic!("expected base");
    };
    let TableSourceItem::Atom(atom) = &base.item else {
        panic!("expected atom");
    };
    assert_eq!(atom.alias.as_deref(), Some("x"));
}
