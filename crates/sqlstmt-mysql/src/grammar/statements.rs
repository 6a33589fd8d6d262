//! Statement lists and top-level statement classification.

use sqlstmt_core::{Keyword, TokenKind};

use super::dml::{delete_statement, insert_statement, update_statement};
use super::select::{select_statement, uid};
use super::{MySqlRule, PResult, Parser};

/// DML statements kept as token runs.
const OPAQUE_DML: &[Keyword] = &[
    Keyword::Replace,
    Keyword::Call,
    Keyword::Do,
    Keyword::Handler,
    Keyword::Load,
    Keyword::With,
    Keyword::Values,
    Keyword::Table,
];

const DDL: &[Keyword] = &[
    Keyword::Create,
    Keyword::Alter,
    Keyword::Drop,
    Keyword::Rename,
    Keyword::Truncate,
];

const ADMINISTRATION: &[Keyword] = &[
    Keyword::Grant,
    Keyword::Revoke,
    Keyword::Kill,
    Keyword::Analyze,
    Keyword::Optimize,
    Keyword::Repair,
    Keyword::Check,
    Keyword::Set,
    Keyword::Reset,
];

const ADMINISTRATION_WORDS: &[&str] = &[
    "FLUSH",
    "INSTALL",
    "UNINSTALL",
    "BINLOG",
    "CACHE",
    "CHECKSUM",
    "SHUTDOWN",
    "RESTART",
];

const REPLICATION_WORDS: &[&str] = &["CHANGE", "PURGE", "STOP"];

const TRANSACTION: &[Keyword] = &[
    Keyword::Start,
    Keyword::Begin,
    Keyword::Commit,
    Keyword::Rollback,
    Keyword::Savepoint,
    Keyword::Release,
    Keyword::Lock,
    Keyword::Unlock,
];

const PREPARED: &[Keyword] = &[Keyword::Prepare, Keyword::Execute, Keyword::Deallocate];

/// `Root: SqlStatements?`; statements are separated by `;`.
pub(super) fn root(p: &mut Parser<'_>) -> PResult {
    p.start(MySqlRule::Root);
    if !p.at_eof() {
        p.start(MySqlRule::SqlStatements);
        while !p.at_eof() {
            if p.at(&TokenKind::Semicolon) {
                p.start(MySqlRule::EmptyStatement);
                p.bump();
                p.finish();
                continue;
            }
            sql_statement(p)?;
            if !p.eat(&TokenKind::Semicolon) && !p.at_eof() {
                return Err(p.unexpected("';' or end of input"));
            }
        }
        p.finish();
    }
    p.finish();
    Ok(())
}

fn sql_statement(p: &mut Parser<'_>) -> PResult {
    p.start(MySqlRule::SqlStatement);
    if p.at_any_keyword(&[Keyword::Select, Keyword::Insert, Keyword::Update, Keyword::Delete])
        || p.at(&TokenKind::LeftParen)
        || p.at_any_keyword(OPAQUE_DML)
    {
        dml_statement(p)?;
    } else if p.at_any_keyword(DDL) {
        ddl_statement(p)?;
    } else if (p.at_keyword(Keyword::Start) && (p.nth_word(1, "SLAVE") || p.nth_word(1, "REPLICA")))
        || REPLICATION_WORDS.iter().any(|word| p.at_word(word))
    {
        opaque(p, MySqlRule::ReplicationStatement)?;
    } else if p.at_keyword(Keyword::Show) {
        p.start(MySqlRule::AdministrationStatement);
        opaque(p, MySqlRule::ShowStatement)?;
        p.finish();
    } else if p.at_any_keyword(ADMINISTRATION)
        || ADMINISTRATION_WORDS.iter().any(|word| p.at_word(word))
    {
        opaque(p, MySqlRule::AdministrationStatement)?;
    } else if p.at_any_keyword(&[Keyword::Describe, Keyword::Desc, Keyword::Explain]) {
        p.start(MySqlRule::UtilityStatement);
        let simple = p.nth_is_identifier(1) && !p.nth_at(2, &TokenKind::Eq);
        let rule = if simple {
            MySqlRule::SimpleDescribeStatement
        } else {
            MySqlRule::FullDescribeStatement
        };
        opaque(p, rule)?;
        p.finish();
    } else if p.at_keyword(Keyword::Use) || p.at_word("HELP") {
        opaque(p, MySqlRule::UtilityStatement)?;
    } else if p.at_any_keyword(TRANSACTION) || p.at_word("XA") {
        opaque(p, MySqlRule::TransactionStatement)?;
    } else if p.at_any_keyword(PREPARED) {
        opaque(p, MySqlRule::PreparedStatement)?;
    } else {
        return Err(p.unexpected("statement"));
    }
    p.finish();
    Ok(())
}

fn dml_statement(p: &mut Parser<'_>) -> PResult {
    p.start(MySqlRule::DmlStatement);
    match p.current().as_keyword() {
        Some(Keyword::Insert) => insert_statement(p)?,
        Some(Keyword::Update) => update_statement(p)?,
        Some(Keyword::Delete) => delete_statement(p)?,
        Some(Keyword::Select) => select_statement(p)?,
        _ if p.at(&TokenKind::LeftParen) => select_statement(p)?,
        _ => p.bump_balanced_until(|_| false)?,
    }
    p.finish();
    Ok(())
}

fn ddl_statement(p: &mut Parser<'_>) -> PResult {
    p.start(MySqlRule::DdlStatement);
    let database = p.nth_keyword(1, Keyword::Database) || p.nth_keyword(1, Keyword::Schema);
    if p.at_keyword(Keyword::Create) && database {
        p.start(MySqlRule::CreateDatabase);
        p.bump_n(2);
        if p.eat_keyword(Keyword::If) {
            p.expect_keyword(Keyword::Not)?;
            p.expect_keyword(Keyword::Exists)?;
        }
        uid(p)?;
        p.bump_balanced_until(|_| false)?;
        p.finish();
    } else {
        p.bump_balanced_until(|_| false)?;
    }
    p.finish();
    Ok(())
}

/// A statement kept as a balanced token run up to the next top-level `;`.
fn opaque(p: &mut Parser<'_>, rule: MySqlRule) -> PResult {
    p.start(rule);
    p.bump_balanced_until(|_| false)?;
    p.finish();
    Ok(())
}

#[cfg(test)]
mod tests {
    use sqlstmt_core::ParseOptions;

    use super::super::parse_tree;

    fn rules(sql: &str) -> Vec<String> {
        parse_tree(sql, &ParseOptions::default())
            .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e}"))
            .outline(sql)
            .lines()
            .map(|line| line.trim().to_string())
            .collect()
    }

    #[test]
    fn test_statement_families() {
        for (sql, rule) in [
            ("CREATE TABLE t (a INT, PRIMARY KEY (a))", "DdlStatement"),
            ("CREATE DATABASE IF NOT EXISTS db CHARACTER SET utf8mb4", "CreateDatabase"),
            ("SHOW TABLES", "ShowStatement"),
            ("GRANT SELECT ON db.* TO 'u'@'%'", "AdministrationStatement"),
            ("DESCRIBE t", "SimpleDescribeStatement"),
            ("EXPLAIN SELECT 1", "FullDescribeStatement"),
            ("USE db", "UtilityStatement"),
            ("START TRANSACTION", "TransactionStatement"),
            ("PREPARE s FROM 'SELECT 1'", "PreparedStatement"),
            ("REPLACE INTO t VALUES (1)", "DmlStatement"),
            ("CHANGE MASTER TO MASTER_HOST = 'h'", "ReplicationStatement"),
        ] {
            assert!(rules(sql).iter().any(|l| l == rule), "{sql} lacks {rule}");
        }
    }

    #[test]
    fn test_empty_statements() {
        let lines = rules(";SELECT 1;;");
        assert_eq!(lines.iter().filter(|l| *l == "EmptyStatement").count(), 2);
        assert_eq!(lines.iter().filter(|l| *l == "SqlStatement").count(), 1);
    }

    #[test]
    fn test_empty_input() {
        let tree = parse_tree("  -- nothing\n", &ParseOptions::default()).unwrap();
        assert_eq!(tree.root().child_nodes().count(), 0);
    }

    #[test]
    fn test_statements_need_separator() {
        let err = parse_tree("SELECT 1 SELECT 2", &ParseOptions::default()).unwrap_err();
        assert_eq!(err.expected.as_deref(), Some("';' or end of input"));
        assert_eq!(err.column, 10);
    }

    #[test]
    fn test_unknown_statement() {
        let err = parse_tree("FROB t", &ParseOptions::default()).unwrap_err();
        assert_eq!(err.expected.as_deref(), Some("statement"));
    }
}
