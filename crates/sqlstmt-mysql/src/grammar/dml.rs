//! INSERT, UPDATE and DELETE.

use sqlstmt_core::{Keyword, TokenKind};

use super::expression::{expression, full_column_name};
use super::select::{
    alias, limit_clause, order_by_clause, select_statement, table_name, table_sources, uid,
    uid_list,
};
use super::{MySqlRule, PResult, Parser};

const INSERT_MODIFIERS: &[Keyword] = &[
    Keyword::LowPriority,
    Keyword::Delayed,
    Keyword::HighPriority,
    Keyword::Ignore,
];

pub(super) fn insert_statement(p: &mut Parser<'_>) -> PResult {
    p.start(MySqlRule::InsertStatement);
    p.bump();
    while p.at_any_keyword(INSERT_MODIFIERS) {
        p.bump();
    }
    p.eat_keyword(Keyword::Into);
    table_name(p)?;
    if p.at_keyword(Keyword::Partition) {
        p.bump();
        p.bump_group()?;
    }
    if p.at(&TokenKind::LeftParen) && !p.nth_is_subquery(0, &[Keyword::Select]) {
        p.bump();
        if !p.at(&TokenKind::RightParen) {
            uid_list(p)?;
        }
        p.expect(&TokenKind::RightParen)?;
    }

    if p.eat_keyword(Keyword::Set) {
        updated_elements(p)?;
    } else {
        insert_statement_value(p)?;
    }

    // Row alias: `AS new [(a, b)]`.
    if p.eat_keyword(Keyword::As) {
        uid(p)?;
        if p.at(&TokenKind::LeftParen) {
            p.bump_group()?;
        }
    }
    if p.at_keyword(Keyword::On) && p.nth_word(1, "DUPLICATE") {
        p.start(MySqlRule::DuplicateKeyUpdate);
        p.bump_n(2);
        p.expect_keyword(Keyword::Key)?;
        p.expect_keyword(Keyword::Update)?;
        updated_elements(p)?;
        p.finish();
    }
    p.finish();
    Ok(())
}

fn insert_statement_value(p: &mut Parser<'_>) -> PResult {
    p.start(MySqlRule::InsertStatementValue);
    if p.at_any_keyword(&[Keyword::Values, Keyword::Value]) {
        p.bump();
        loop {
            p.eat_keyword(Keyword::Row);
            p.expect(&TokenKind::LeftParen)?;
            expressions_with_defaults(p)?;
            p.expect(&TokenKind::RightParen)?;
            if !p.eat(&TokenKind::Comma) {
                break;
            }
        }
    } else if p.at_keyword(Keyword::Select) || p.at(&TokenKind::LeftParen) {
        select_statement(p)?;
    } else {
        return Err(p.unexpected("VALUES, SELECT or SET"));
    }
    p.finish();
    Ok(())
}

/// One row of a VALUES list; empty for `()`.
fn expressions_with_defaults(p: &mut Parser<'_>) -> PResult {
    p.start(MySqlRule::ExpressionsWithDefaults);
    if !p.at(&TokenKind::RightParen) {
        loop {
            expression_or_default(p)?;
            if !p.eat(&TokenKind::Comma) {
                break;
            }
        }
    }
    p.finish();
    Ok(())
}

fn expression_or_default(p: &mut Parser<'_>) -> PResult {
    if p.at_keyword(Keyword::Default) && !p.nth_at(1, &TokenKind::LeftParen) {
        p.start(MySqlRule::DefaultExpression);
        p.bump();
        p.finish();
        Ok(())
    } else {
        expression(p)
    }
}

fn updated_elements(p: &mut Parser<'_>) -> PResult {
    updated_element(p)?;
    while p.eat(&TokenKind::Comma) {
        updated_element(p)?;
    }
    Ok(())
}

/// `fullColumnName '=' (expression | DEFAULT)`.
fn updated_element(p: &mut Parser<'_>) -> PResult {
    p.start(MySqlRule::UpdatedElement);
    full_column_name(p)?;
    p.expect(&TokenKind::Eq)?;
    expression_or_default(p)?;
    p.finish();
    Ok(())
}

/// Skips leading modifiers starting at lookahead `n`.
fn skip_modifiers(p: &Parser<'_>, mut n: usize, words: &[&str]) -> usize {
    loop {
        let keyword = p
            .nth(n)
            .as_keyword()
            .is_some_and(|kw| matches!(kw, Keyword::LowPriority | Keyword::Ignore));
        if keyword || words.iter().any(|word| p.nth_word(n, word)) {
            n += 1;
        } else {
            return n;
        }
    }
}

/// Lookahead index past `name(.name){0,2} (AS? alias)?` starting at `n`,
/// or `None` if no table name starts there.
fn aliased_name_extent(p: &Parser<'_>, n: usize) -> Option<usize> {
    if !p.nth_is_identifier(n) {
        return None;
    }
    let mut n = n + 1;
    let mut parts = 1;
    while parts < 3 && p.nth_at(n, &TokenKind::Dot) && p.nth_is_name_part(n + 1) {
        n += 2;
        parts += 1;
    }
    if p.nth_keyword(n, Keyword::As) {
        n += 1;
    }
    if p.nth_is_identifier(n) {
        n += 1;
    }
    Some(n)
}

pub(super) fn update_statement(p: &mut Parser<'_>) -> PResult {
    let first = skip_modifiers(p, 1, &[]);
    let single = aliased_name_extent(p, first).is_some_and(|end| p.nth_keyword(end, Keyword::Set));

    if single {
        p.start(MySqlRule::SingleUpdateStatement);
        p.bump_n(first);
        table_name(p)?;
        alias(p)?;
    } else {
        p.start(MySqlRule::MultipleUpdateStatement);
        p.bump_n(first);
        table_sources(p)?;
    }
    p.expect_keyword(Keyword::Set)?;
    updated_elements(p)?;
    if p.eat_keyword(Keyword::Where) {
        expression(p)?;
    }
    if single {
        if p.at_keyword(Keyword::Order) {
            order_by_clause(p)?;
        }
        if p.at_keyword(Keyword::Limit) {
            limit_clause(p)?;
        }
    }
    p.finish();
    Ok(())
}

pub(super) fn delete_statement(p: &mut Parser<'_>) -> PResult {
    let first = skip_modifiers(p, 1, &["QUICK"]);
    let single = p.nth_keyword(first, Keyword::From)
        && aliased_name_extent(p, first + 1).is_some_and(|end| {
            matches!(p.nth_kind(end), TokenKind::Semicolon | TokenKind::Eof)
                || p.nth(end).as_keyword().is_some_and(|kw| {
                    matches!(
                        kw,
                        Keyword::Partition | Keyword::Where | Keyword::Order | Keyword::Limit
                    )
                })
        });

    if single {
        p.start(MySqlRule::SingleDeleteStatement);
        p.bump_n(first + 1);
        table_name(p)?;
        alias(p)?;
        if p.at_keyword(Keyword::Partition) {
            p.bump();
            p.bump_group()?;
        }
        if p.eat_keyword(Keyword::Where) {
            expression(p)?;
        }
        if p.at_keyword(Keyword::Order) {
            order_by_clause(p)?;
        }
        if p.at_keyword(Keyword::Limit) {
            limit_clause(p)?;
        }
    } else {
        p.start(MySqlRule::MultipleDeleteStatement);
        p.bump_n(first);
        if p.eat_keyword(Keyword::From) {
            delete_targets(p)?;
            p.expect_keyword(Keyword::Using)?;
        } else {
            delete_targets(p)?;
            p.expect_keyword(Keyword::From)?;
        }
        table_sources(p)?;
        if p.eat_keyword(Keyword::Where) {
            expression(p)?;
        }
    }
    p.finish();
    Ok(())
}

/// `tableName ('.' '*')? (',' tableName ('.' '*')?)*`.
fn delete_targets(p: &mut Parser<'_>) -> PResult {
    loop {
        table_name(p)?;
        if p.at(&TokenKind::Dot) && p.nth_at(1, &TokenKind::Star) {
            p.bump_n(2);
        }
        if !p.eat(&TokenKind::Comma) {
            return Ok(());
        }
    }
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

    fn has(sql: &str, rule: &str) -> bool {
        rules(sql).iter().any(|l| l == rule)
    }

    #[test]
    fn test_single_and_multiple_update() {
        assert!(has("UPDATE t SET a = 1 WHERE b = 2 ORDER BY c LIMIT 3", "SingleUpdateStatement"));
        assert!(has("UPDATE LOW_PRIORITY db.t AS x SET x.a = DEFAULT", "SingleUpdateStatement"));
        assert!(has("UPDATE t, u SET t.a = u.a WHERE t.id = u.id", "MultipleUpdateStatement"));
        assert!(has("UPDATE t JOIN u ON t.id = u.id SET t.a = 1", "MultipleUpdateStatement"));
    }

    #[test]
    fn test_single_and_multiple_delete() {
        assert!(has("DELETE FROM t WHERE x = 1", "SingleDeleteStatement"));
        assert!(has("DELETE QUICK IGNORE FROM t LIMIT 1", "SingleDeleteStatement"));
        assert!(has("DELETE FROM t", "SingleDeleteStatement"));
        assert!(has(
            "DELETE t FROM t JOIN u ON u.id = t.id WHERE x = 1",
            "MultipleDeleteStatement"
        ));
        assert!(has("DELETE FROM t.*, u USING t JOIN u ON t.id = u.id", "MultipleDeleteStatement"));
    }

    #[test]
    fn test_insert_forms() {
        assert!(has("INSERT INTO t (a, b) VALUES (1, DEFAULT), ()", "DefaultExpression"));
        assert!(has("INSERT t SET a = 1", "UpdatedElement"));
        assert!(has("INSERT INTO t SELECT * FROM u", "SimpleSelect"));
        assert!(has(
            "INSERT INTO t VALUES (1) AS new ON DUPLICATE KEY UPDATE a = new.a",
            "DuplicateKeyUpdate"
        ));
        assert!(has("INSERT INTO t (SELECT 1)", "ParenthesisSelect"));
    }

    #[test]
    fn test_insert_requires_source() {
        assert!(parse_tree("INSERT INTO t", &ParseOptions::default()).is_err());
    }
}
