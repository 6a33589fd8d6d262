//! Rendering of parsed statements.

use serde::Serialize;
use sqlstmt_core::{DialectKind, ParseError, Stmt};

/// JSON document printed for a successful parse.
#[derive(Serialize)]
struct Report<'a> {
    dialect: DialectKind,
    statements: &'a [Stmt],
}

/// JSON document printed when the input does not parse.
#[derive(Serialize)]
struct ErrorReport<'a> {
    dialect: DialectKind,
    error: &'a ParseError,
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

pub fn json(dialect: DialectKind, statements: &[Stmt], pretty: bool) -> serde_json::Result<String> {
    to_json(&Report { dialect, statements }, pretty)
}

pub fn json_error(
    dialect: DialectKind,
    error: &ParseError,
    pretty: bool,
) -> serde_json::Result<String> {
    to_json(&ErrorReport { dialect, error }, pretty)
}

/// One line per statement: position, kind and referenced tables.
#[must_use]
pub fn summary(statements: &[Stmt]) -> String {
    statements
        .iter()
        .map(summary_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn summary_line(stmt: &Stmt) -> String {
    let start = stmt.node().start;
    let tables: Vec<_> = stmt
        .referenced_tables()
        .iter()
        .map(sqlstmt_core::ast::TableName::qualified)
        .collect();
    if tables.is_empty() {
        format!("{}:{} {}", start.line, start.column, stmt.kind())
    } else {
        format!(
            "{}:{} {} {}",
            start.line,
            start.column,
            stmt.kind(),
            tables.join(",")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlstmt_core::{ParseOptions, SqlParser};
    use sqlstmt_mysql::MySqlParser;
    use sqlstmt_pgsql::PgParser;

    #[test]
    fn test_summary_lines() {
        let stmts = MySqlParser::new()
            .parse("SELECT * FROM a JOIN db.b ON a.id = b.id;\nSHOW TABLES;\n;")
            .unwrap();
        assert_eq!(
            summary(&stmts),
            "1:1 SimpleSelect a,db.b\n2:1 OtherRead\n3:1 Empty"
        );
    }

    #[test]
    fn test_summary_uses_baseline() {
        let stmts = PgParser::new()
            .parse_with("DELETE FROM t", &ParseOptions::new().with_baseline_line(7))
            .unwrap();
        assert_eq!(summary(&stmts), "7:1 Delete t");
    }

    #[test]
    fn test_json_report() {
        let stmts = PgParser::new().parse("SELECT 1").unwrap();
        let text = json(DialectKind::PostgreSql, &stmts, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["dialect"], "postgresql");
        assert_eq!(value["statements"].as_array().unwrap().len(), 1);
        assert!(value["statements"][0].get("SimpleSelect").is_some());
    }

    #[test]
    fn test_json_error_report() {
        let err = MySqlParser::new().parse("SELECT FROM").unwrap_err();
        let text = json_error(DialectKind::MySql, &err, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["dialect"], "mysql");
        assert_eq!(value["error"]["line"], 1);
        assert_eq!(value["error"]["column"], 8);
        assert_eq!(value["error"]["found"], "FROM");
    }
}
