//! Tests for parser error cases.

mod common;
use common::*;

use sqlstmt_core::{ParseOptions, SqlParser};
use sqlstmt_pgsql::PgParser;

#[test]
fn error_select_without_targets() {
    let err = parse_err("SELECT FROM t");
    assert_eq!(err.line, 1);
    assert_eq!(err.column, 8);
    assert_eq!(err.found.as_deref(), Some("FROM"));
}

#[test]
fn error_discards_earlier_statements() {
    let err = parse_err("SELECT 1;\nSELECT FROM t;\nSELECT 2");
    assert_eq!(err.line, 2);
    assert_eq!(err.column, 8);
}

#[test]
fn error_line_includes_baseline() {
    let err = PgParser::new()
        .parse_with("SELECT 1;\nSELECT FROM", &ParseOptions::new().with_baseline_line(10))
        .unwrap_err();
    assert_eq!(err.line, 11);
}

#[test]
fn error_incomplete_select() {
    let err = parse_err("SELECT");
    assert!(err.message.starts_with("Unexpected end of input"), "{err}");
}

#[test]
fn error_join_without_condition() {
    let err = parse_err("SELECT * FROM a JOIN b WHERE a.id = 1");
    assert_eq!(err.expected.as_deref(), Some("ON or USING"));
}

#[test]
fn error_fetch_without_rows() {
    let err = parse_err("SELECT 1 FETCH FIRST 5 ONLY");
    assert_eq!(err.expected.as_deref(), Some("ROW or ROWS"));
}

#[test]
fn error_missing_separator() {
    let err = parse_err("SELECT 1 SELECT 2");
    assert_eq!(err.column, 10);
}

#[test]
fn error_unknown_statement() {
    let err = parse_err("FROBNICATE everything");
    assert_eq!(err.expected.as_deref(), Some("statement"));
}

#[test]
fn error_unterminated_dollar_string() {
    let _ = parse_err("SELECT $$abc");
}

#[test]
fn error_unclosed_nested_comment() {
    let _ = parse_err("SELECT 1 /* outer /* inner */");
}

#[test]
fn error_insert_without_source() {
    let err = parse_err("INSERT INTO t (a)");
    assert_eq!(
        err.expected.as_deref(),
        Some("VALUES, SELECT or DEFAULT VALUES")
    );
}

#[test]
fn error_update_without_set() {
    let _ = parse_err("UPDATE t WHERE a = 1");
}

#[test]
fn error_nesting_limit() {
    let sql = format!("SELECT {}1{}", "(".repeat(30), ")".repeat(30));
    let err = PgParser::new()
        .parse_with(&sql, &ParseOptions::new().with_max_depth(20))
        .unwrap_err();
    assert!(err.message.contains("nested too deeply"), "{err}");
    assert!(PgParser::new().parse(&sql).is_ok());
}

#[test]
fn error_display() {
    let err = parse_err("SELECT FROM t");
    assert_eq!(
        err.to_string(),
        "Unexpected token: expected expression, found 'FROM' at line 1, column 8"
    );
}

#[test]
fn error_long_comparison_chain() {
    let sql = format!("SELECT * FROM t WHERE a{}", " = 1".repeat(20000));
    let err = parse_err(&sql);
    assert!(err.message.contains("nested too deeply"), "{err}");
    assert_eq!(err.line, 1);
}
