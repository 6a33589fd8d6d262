#![allow(dead_code)]

use sqlstmt_core::ast::visit::Visitor;
use sqlstmt_core::ast::{
    DeleteStmt, Expr, InsertStmt, Node, Predicate, QuerySpecification, SimpleSelect, UnionSelect,
    UpdateStmt,
};
use sqlstmt_core::{ParseError, ParseOptions, SqlParser, Stmt};
use sqlstmt_mysql::MySqlParser;

pub fn parse(sql: &str) -> Vec<Stmt> {
    MySqlParser::new()
        .parse(sql)
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e}"))
}

pub fn parse_with_baseline(sql: &str, baseline: usize) -> Vec<Stmt> {
    MySqlParser::new()
        .parse_with(sql, &ParseOptions::new().with_baseline_line(baseline))
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    MySqlParser::new()
        .parse(sql)
        .expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn parse_one(sql: &str) -> Stmt {
    let mut stmts = parse(sql);
    assert_eq!(stmts.len(), 1, "Expected one statement for: {sql}");
    stmts.remove(0)
}

pub fn parse_select(sql: &str) -> SimpleSelect {
    match parse_one(sql) {
        Stmt::SimpleSelect(s) => s,
        other => panic!("Expected SimpleSelect, got {other:?}"),
    }
}

pub fn parse_query(sql: &str) -> QuerySpecification {
    parse_select(sql).query
}

pub fn parse_union(sql: &str) -> UnionSelect {
    match parse_one(sql) {
        Stmt::UnionSelect(s) => s,
        other => panic!("Expected UnionSelect, got {other:?}"),
    }
}

pub fn parse_insert(sql: &str) -> InsertStmt {
    match parse_one(sql) {
        Stmt::Insert(i) => i,
        other => panic!("Expected Insert, got {other:?}"),
    }
}

pub fn parse_update(sql: &str) -> UpdateStmt {
    match parse_one(sql) {
        Stmt::Update(u) => u,
        other => panic!("Expected Update, got {other:?}"),
    }
}

pub fn parse_delete(sql: &str) -> DeleteStmt {
    match parse_one(sql) {
        Stmt::Delete(d) => d,
        other => panic!("Expected Delete, got {other:?}"),
    }
}

/// The WHERE expression of a single select.
pub fn parse_where(sql: &str) -> Expr {
    parse_query(sql)
        .where_clause
        .unwrap_or_else(|| panic!("Expected WHERE in: {sql}"))
}

/// The predicate of a WHERE clause that is a single predicate.
pub fn parse_predicate(sql: &str) -> Predicate {
    match parse_where(sql) {
        Expr::Predicate(p) => p.predicate,
        other => panic!("Expected predicate expression, got {other:?}"),
    }
}

struct SpanChecker<'a> {
    source: &'a str,
    seen: usize,
}

impl Visitor for SpanChecker<'_> {
    fn visit_node(&mut self, node: &Node) {
        let slice = &self.source[node.start.offset..node.stop.offset];
        assert_eq!(slice, node.text, "span/text mismatch in {:?}", self.source);
        self.seen += 1;
    }
}

/// Asserts that every node of every statement slices back to its text.
/// Returns the number of nodes checked.
pub fn assert_spans_round_trip(sql: &str) -> usize {
    let mut checker = SpanChecker {
        source: sql,
        seen: 0,
    };
    for stmt in parse(sql) {
        checker.visit_stmt(&stmt);
    }
    checker.seen
}
