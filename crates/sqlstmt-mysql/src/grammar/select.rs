//! Select statements, clauses and table sources.

use sqlstmt_core::{Keyword, TokenKind};

use super::expression::{
    at_introduced_string, expression, full_column_name, function_call, function_extent,
};
use super::{MySqlRule, PResult, Parser};

/// Words that may follow a complete select element.
const ELEMENT_END_KEYWORDS: &[Keyword] = &[
    Keyword::From,
    Keyword::Into,
    Keyword::As,
    Keyword::Union,
    Keyword::Where,
    Keyword::Group,
    Keyword::Having,
    Keyword::Order,
    Keyword::Limit,
    Keyword::Window,
    Keyword::For,
    Keyword::Lock,
];

/// Select modifiers written as identifiers.
const SELECT_SPEC_WORDS: &[&str] = &[
    "SQL_SMALL_RESULT",
    "SQL_BIG_RESULT",
    "SQL_BUFFER_RESULT",
    "SQL_CACHE",
    "SQL_NO_CACHE",
    "SQL_CALC_FOUND_ROWS",
];

/// Parses `SimpleSelect`, `UnionSelect` or `ParenthesisSelect`.
pub(super) fn select_statement(p: &mut Parser<'_>) -> PResult {
    p.enter()?;
    if p.top_level_any(|t| t.is(Keyword::Union)) {
        union_select(p)?;
    } else if p.at(&TokenKind::LeftParen) {
        parenthesis_select(p)?;
    } else {
        p.start(MySqlRule::SimpleSelect);
        query_specification(p, true)?;
        if at_lock_clause(p) {
            lock_clause(p)?;
        }
        p.finish();
    }
    p.exit();
    Ok(())
}

fn parenthesis_select(p: &mut Parser<'_>) -> PResult {
    p.start(MySqlRule::ParenthesisSelect);
    query_expression(p)?;
    select_tail(p)?;
    p.finish();
    Ok(())
}

fn union_select(p: &mut Parser<'_>) -> PResult {
    p.start(MySqlRule::UnionSelect);
    union_operand(p)?;
    while p.at_keyword(Keyword::Union) {
        p.start(MySqlRule::UnionStatement);
        p.bump();
        if p.at_any_keyword(&[Keyword::All, Keyword::Distinct]) {
            p.bump();
        }
        union_operand(p)?;
        p.finish();
    }
    select_tail(p)?;
    p.finish();
    Ok(())
}

/// `ORDER BY`, `LIMIT` and locking clauses following a union or a
/// parenthesized select.
fn select_tail(p: &mut Parser<'_>) -> PResult {
    if p.at_keyword(Keyword::Order) {
        order_by_clause(p)?;
    }
    if p.at_keyword(Keyword::Limit) {
        limit_clause(p)?;
    }
    if at_lock_clause(p) {
        lock_clause(p)?;
    }
    Ok(())
}

fn union_operand(p: &mut Parser<'_>) -> PResult {
    if p.at(&TokenKind::LeftParen) {
        query_expression(p)
    } else {
        query_specification(p, false)
    }
}

/// `'(' (querySpecification | queryExpression | unionSelect) ')'`.
fn query_expression(p: &mut Parser<'_>) -> PResult {
    p.enter()?;
    p.start(MySqlRule::QueryExpression);
    p.expect(&TokenKind::LeftParen)?;
    if p.top_level_any(|t| t.is(Keyword::Union)) {
        union_select(p)?;
    } else if p.at(&TokenKind::LeftParen) {
        query_expression(p)?;
    } else {
        query_specification(p, true)?;
    }
    p.expect(&TokenKind::RightParen)?;
    p.finish();
    p.exit();
    Ok(())
}

/// Parses one `SELECT ...` block. `ORDER BY` and `LIMIT` are left to the
/// enclosing union when `with_tail` is false.
pub(super) fn query_specification(p: &mut Parser<'_>, with_tail: bool) -> PResult {
    p.start(MySqlRule::QuerySpecification);
    p.expect_keyword(Keyword::Select)?;

    while at_select_spec(p) {
        p.start(MySqlRule::SelectSpec);
        p.bump();
        p.finish();
    }
    select_elements(p)?;

    if p.at_keyword(Keyword::Into) {
        select_into(p)?;
    }
    if p.at_keyword(Keyword::From) || p.at_keyword(Keyword::Where) {
        from_clause(p)?;
    }
    if p.at_keyword(Keyword::Group) {
        group_by_clause(p)?;
    }
    if p.at_keyword(Keyword::Having) {
        p.start(MySqlRule::HavingClause);
        p.bump();
        expression(p)?;
        p.finish();
    }
    if p.at_keyword(Keyword::Window) {
        p.start(MySqlRule::WindowClause);
        p.bump();
        p.bump_balanced_until(|p| {
            p.at_any_keyword(&[
                Keyword::Order,
                Keyword::Limit,
                Keyword::Union,
                Keyword::Into,
                Keyword::For,
                Keyword::Lock,
            ])
        })?;
        p.finish();
    }
    if with_tail {
        if p.at_keyword(Keyword::Order) {
            order_by_clause(p)?;
        }
        if p.at_keyword(Keyword::Limit) {
            limit_clause(p)?;
        }
    }
    if p.at_keyword(Keyword::Into) {
        select_into(p)?;
    }
    p.finish();
    Ok(())
}

fn at_select_spec(p: &Parser<'_>) -> bool {
    p.at_any_keyword(&[
        Keyword::All,
        Keyword::Distinct,
        Keyword::Distinctrow,
        Keyword::HighPriority,
        Keyword::StraightJoin,
    ]) || SELECT_SPEC_WORDS.iter().any(|word| p.at_word(word))
}

fn select_elements(p: &mut Parser<'_>) -> PResult {
    p.start(MySqlRule::SelectElements);
    if !p.eat(&TokenKind::Star) {
        select_element(p)?;
    }
    while p.eat(&TokenKind::Comma) {
        select_element(p)?;
    }
    p.finish();
    Ok(())
}

/// True if a select element ending before lookahead `n` is complete.
fn element_ends_at(p: &Parser<'_>, n: usize) -> bool {
    match p.nth_kind(n) {
        TokenKind::Comma
        | TokenKind::RightParen
        | TokenKind::Semicolon
        | TokenKind::Eof
        | TokenKind::String => true,
        TokenKind::Keyword(kw) if ELEMENT_END_KEYWORDS.contains(kw) => true,
        _ => {
            p.nth_is_identifier(n)
                && !(p.nth_word(n, "SOUNDS") && p.nth_keyword(n + 1, Keyword::Like))
                && !(p.nth_word(n, "MEMBER") && p.nth_keyword(n + 1, Keyword::Of))
        }
    }
}

/// Lookahead index of the `*` of a `name(.name)*.*` element.
fn star_extent(p: &Parser<'_>) -> Option<usize> {
    if p.at(&TokenKind::Star) {
        return Some(0);
    }
    let mut n = 0;
    while p.nth_is_name_part(n) && p.nth_at(n + 1, &TokenKind::Dot) {
        n += 2;
        if p.nth_at(n, &TokenKind::Star) {
            return Some(n);
        }
    }
    None
}

/// Lookahead index just past a column reference of up to three parts.
fn column_extent(p: &Parser<'_>) -> Option<usize> {
    if !p.at_identifier() || at_introduced_string(p) {
        return None;
    }
    let mut n = 1;
    let mut parts = 1;
    while parts < 3 && p.nth_at(n, &TokenKind::Dot) && p.nth_is_name_part(n + 1) {
        n += 2;
        parts += 1;
    }
    Some(n)
}

fn select_element(p: &mut Parser<'_>) -> PResult {
    if let Some(star) = star_extent(p) {
        p.start(MySqlRule::SelectStarElement);
        if star > 0 {
            p.start(MySqlRule::FullId);
            p.bump_n(star - 1);
            p.finish();
            p.bump();
        }
        p.bump();
        p.finish();
        return Ok(());
    }

    if function_extent(p, 0).is_some_and(|end| element_ends_at(p, end)) {
        p.start(MySqlRule::SelectFunctionElement);
        function_call(p)?;
    } else if column_extent(p).is_some_and(|end| element_ends_at(p, end)) {
        p.start(MySqlRule::SelectColumnElement);
        full_column_name(p)?;
    } else {
        p.start(MySqlRule::SelectExpressionElement);
        expression(p)?;
    }
    alias(p)?;
    p.finish();
    Ok(())
}

/// `(AS? uid)?`.
pub(super) fn alias(p: &mut Parser<'_>) -> PResult {
    if p.eat_keyword(Keyword::As) || p.at_identifier() || p.at(&TokenKind::String) {
        uid(p)?;
    }
    Ok(())
}

/// A single name: identifier, quoted identifier or string.
pub(super) fn uid(p: &mut Parser<'_>) -> PResult {
    p.start(MySqlRule::Uid);
    if p.at_identifier() || p.at(&TokenKind::String) {
        p.bump();
    } else {
        return Err(p.unexpected("identifier"));
    }
    p.finish();
    Ok(())
}

/// `uid (',' uid)*`.
pub(super) fn uid_list(p: &mut Parser<'_>) -> PResult {
    p.start(MySqlRule::UidList);
    uid(p)?;
    while p.eat(&TokenKind::Comma) {
        uid(p)?;
    }
    p.finish();
    Ok(())
}

fn select_into(p: &mut Parser<'_>) -> PResult {
    p.start(MySqlRule::SelectIntoExpression);
    p.bump();
    p.bump_balanced_until(|p| {
        p.at_any_keyword(&[
            Keyword::From,
            Keyword::Where,
            Keyword::Group,
            Keyword::Having,
            Keyword::Window,
            Keyword::Order,
            Keyword::Limit,
            Keyword::For,
            Keyword::Lock,
            Keyword::Union,
        ])
    })?;
    p.finish();
    Ok(())
}

/// `(FROM tableSources)? (WHERE expression)?`.
fn from_clause(p: &mut Parser<'_>) -> PResult {
    p.start(MySqlRule::FromClause);
    if p.eat_keyword(Keyword::From) {
        table_sources(p)?;
    }
    if p.eat_keyword(Keyword::Where) {
        expression(p)?;
    }
    p.finish();
    Ok(())
}

fn group_by_clause(p: &mut Parser<'_>) -> PResult {
    p.start(MySqlRule::GroupByClause);
    p.bump();
    p.expect_keyword(Keyword::By)?;
    loop {
        p.start(MySqlRule::GroupByItem);
        expression(p)?;
        if p.at_any_keyword(&[Keyword::Asc, Keyword::Desc]) {
            p.bump();
        }
        p.finish();
        if !p.eat(&TokenKind::Comma) {
            break;
        }
    }
    if p.at_keyword(Keyword::With) && p.nth_word(1, "ROLLUP") {
        p.bump_n(2);
    }
    p.finish();
    Ok(())
}

pub(super) fn order_by_clause(p: &mut Parser<'_>) -> PResult {
    p.start(MySqlRule::OrderByClause);
    p.bump();
    p.expect_keyword(Keyword::By)?;
    loop {
        p.start(MySqlRule::OrderByExpression);
        expression(p)?;
        if p.at_any_keyword(&[Keyword::Asc, Keyword::Desc]) {
            p.bump();
        }
        p.finish();
        if !p.eat(&TokenKind::Comma) {
            break;
        }
    }
    p.finish();
    Ok(())
}

/// `LIMIT count`, `LIMIT offset, count` or `LIMIT count OFFSET offset`.
pub(super) fn limit_clause(p: &mut Parser<'_>) -> PResult {
    p.start(MySqlRule::LimitClause);
    p.bump();
    limit_atom(p)?;
    if p.eat(&TokenKind::Comma) || p.eat_keyword(Keyword::Offset) {
        limit_atom(p)?;
    }
    p.finish();
    Ok(())
}

fn limit_atom(p: &mut Parser<'_>) -> PResult {
    p.start(MySqlRule::LimitClauseAtom);
    let valid = matches!(
        p.kind(),
        TokenKind::Integer | TokenKind::Variable | TokenKind::Question
    ) || p.at_identifier();
    if !valid {
        return Err(p.unexpected("limit value"));
    }
    p.bump();
    p.finish();
    Ok(())
}

fn at_lock_clause(p: &Parser<'_>) -> bool {
    p.at_keyword(Keyword::For) || (p.at_keyword(Keyword::Lock) && p.nth_keyword(1, Keyword::In))
}

fn lock_clause(p: &mut Parser<'_>) -> PResult {
    p.start(MySqlRule::LockClause);
    p.bump();
    p.bump_balanced_until(|p| p.at_keyword(Keyword::Union) || p.at_keyword(Keyword::Into))?;
    p.finish();
    Ok(())
}

/// `tableSource (',' tableSource)*`.
pub(super) fn table_sources(p: &mut Parser<'_>) -> PResult {
    p.start(MySqlRule::TableSources);
    table_source(p)?;
    while p.eat(&TokenKind::Comma) {
        table_source(p)?;
    }
    p.finish();
    Ok(())
}

fn table_source(p: &mut Parser<'_>) -> PResult {
    if p.at_word("JSON_TABLE") && p.nth_at(1, &TokenKind::LeftParen) {
        p.start(MySqlRule::TableJson);
        p.bump();
        p.bump_group()?;
        alias(p)?;
        p.finish();
        return Ok(());
    }

    p.start(MySqlRule::TableSourceBase);
    table_source_item(p)?;
    while join_part(p)? {}
    p.finish();
    Ok(())
}

fn table_source_item(p: &mut Parser<'_>) -> PResult {
    p.enter()?;
    let lateral = p.at_keyword(Keyword::Lateral) && p.nth_at(1, &TokenKind::LeftParen);
    if lateral || (p.at(&TokenKind::LeftParen) && p.nth_is_subquery(0, &[Keyword::Select])) {
        p.start(MySqlRule::SubqueryTableItem);
        p.eat_keyword(Keyword::Lateral);
        p.bump();
        select_statement(p)?;
        p.expect(&TokenKind::RightParen)?;
        p.eat_keyword(Keyword::As);
        uid(p)?;
        if p.at(&TokenKind::LeftParen) {
            p.bump();
            uid_list(p)?;
            p.expect(&TokenKind::RightParen)?;
        }
        p.finish();
    } else if p.at(&TokenKind::LeftParen) {
        p.start(MySqlRule::TableSourcesItem);
        p.bump();
        table_sources(p)?;
        p.expect(&TokenKind::RightParen)?;
        p.finish();
    } else {
        p.start(MySqlRule::AtomTableItem);
        table_name(p)?;
        if p.at_keyword(Keyword::Partition) {
            p.bump();
            p.bump_group()?;
        }
        alias(p)?;
        while at_index_hint(p) {
            index_hint(p)?;
        }
        p.finish();
    }
    p.exit();
    Ok(())
}

fn at_index_hint(p: &Parser<'_>) -> bool {
    p.at_any_keyword(&[Keyword::Use, Keyword::Ignore, Keyword::Force])
        && (p.nth_keyword(1, Keyword::Index) || p.nth_keyword(1, Keyword::Key))
}

/// `(USE | IGNORE | FORCE) (INDEX | KEY) (FOR (JOIN | ORDER BY | GROUP BY))? '(' ... ')'`.
fn index_hint(p: &mut Parser<'_>) -> PResult {
    p.start(MySqlRule::IndexHint);
    p.bump_n(2);
    if p.eat_keyword(Keyword::For) && !p.eat_keyword(Keyword::Join) {
        p.bump();
        p.expect_keyword(Keyword::By)?;
    }
    p.bump_group()?;
    p.finish();
    Ok(())
}

/// A table name of up to three dotted parts.
pub(super) fn table_name(p: &mut Parser<'_>) -> PResult {
    p.start(MySqlRule::TableName);
    p.start(MySqlRule::FullId);
    p.expect_identifier()?;
    let mut parts = 1;
    while parts < 3 && p.at(&TokenKind::Dot) && p.nth_is_name_part(1) {
        p.bump_n(2);
        parts += 1;
    }
    p.finish();
    p.finish();
    Ok(())
}

/// Parses one join following a table source item; returns false if none starts here.
fn join_part(p: &mut Parser<'_>) -> Result<bool, sqlstmt_core::ParseError> {
    match p.current().as_keyword() {
        Some(Keyword::Inner | Keyword::Cross | Keyword::Join) => {
            p.start(MySqlRule::InnerJoin);
            if !p.at_keyword(Keyword::Join) {
                p.bump();
            }
            p.expect_keyword(Keyword::Join)?;
            table_source_item(p)?;
            while p.at_keyword(Keyword::On) || p.at_keyword(Keyword::Using) {
                join_spec(p)?;
            }
        }
        Some(Keyword::StraightJoin) => {
            p.start(MySqlRule::StraightJoin);
            p.bump();
            table_source_item(p)?;
            if p.at_keyword(Keyword::On) {
                join_spec(p)?;
            }
        }
        Some(Keyword::Left | Keyword::Right) => {
            p.start(MySqlRule::OuterJoin);
            p.bump();
            p.eat_keyword(Keyword::Outer);
            p.expect_keyword(Keyword::Join)?;
            table_source_item(p)?;
            if !(p.at_keyword(Keyword::On) || p.at_keyword(Keyword::Using)) {
                return Err(p.unexpected("ON or USING"));
            }
            join_spec(p)?;
        }
        Some(Keyword::Natural) => {
            p.start(MySqlRule::NaturalJoin);
            p.bump();
            if p.at_any_keyword(&[Keyword::Left, Keyword::Right]) {
                p.bump();
                p.eat_keyword(Keyword::Outer);
            }
            p.expect_keyword(Keyword::Join)?;
            table_source_item(p)?;
        }
        _ => return Ok(false),
    }
    p.finish();
    Ok(true)
}

/// `ON expression` or `USING '(' uidList ')'`.
fn join_spec(p: &mut Parser<'_>) -> PResult {
    p.start(MySqlRule::JoinSpec);
    if p.eat_keyword(Keyword::On) {
        expression(p)?;
    } else {
        p.bump();
        p.expect(&TokenKind::LeftParen)?;
        uid_list(p)?;
        p.expect(&TokenKind::RightParen)?;
    }
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

    fn count(lines: &[String], rule: &str) -> usize {
        lines.iter().filter(|l| *l == rule).count()
    }

    #[test]
    fn test_select_shape_alternatives() {
        assert_eq!(count(&rules("SELECT 1"), "SimpleSelect"), 1);
        assert_eq!(count(&rules("(SELECT 1)"), "ParenthesisSelect"), 1);
        let union = rules("SELECT 1 UNION (SELECT 2) UNION ALL SELECT 3 ORDER BY 1");
        assert_eq!(count(&union, "UnionSelect"), 1);
        assert_eq!(count(&union, "UnionStatement"), 2);
        assert_eq!(count(&union, "QueryExpression"), 1);
    }

    #[test]
    fn test_element_classification() {
        let lines =
            rules("SELECT *, t.*, a, t.b AS x, COUNT(*), NOW() n, a + 1, CURRENT_TIMESTAMP FROM t");
        assert_eq!(count(&lines, "SelectStarElement"), 1);
        assert_eq!(count(&lines, "SelectColumnElement"), 2);
        assert_eq!(count(&lines, "SelectFunctionElement"), 3);
        assert_eq!(count(&lines, "SelectExpressionElement"), 1);
    }

    #[test]
    fn test_joins() {
        let lines = rules(
            "SELECT 1 FROM a INNER JOIN b ON a.id = b.id LEFT JOIN c USING (id) \
             STRAIGHT_JOIN d NATURAL RIGHT JOIN e CROSS JOIN f",
        );
        assert_eq!(count(&lines, "InnerJoin"), 2);
        assert_eq!(count(&lines, "OuterJoin"), 1);
        assert_eq!(count(&lines, "StraightJoin"), 1);
        assert_eq!(count(&lines, "NaturalJoin"), 1);
        assert_eq!(count(&lines, "JoinSpec"), 2);
    }

    #[test]
    fn test_table_items() {
        let lines = rules(
            "SELECT 1 FROM t1 AS x USE INDEX (i1), (SELECT 1) AS s, (a JOIN b ON true)",
        );
        assert_eq!(count(&lines, "IndexHint"), 1);
        assert_eq!(count(&lines, "SubqueryTableItem"), 1);
        assert_eq!(count(&lines, "TableSourcesItem"), 1);
    }

    #[test]
    fn test_outer_join_requires_condition() {
        assert!(parse_tree("SELECT 1 FROM a LEFT JOIN b", &ParseOptions::default()).is_err());
    }

    #[test]
    fn test_limit_forms() {
        for sql in ["SELECT 1 LIMIT 5", "SELECT 1 LIMIT 5, 10", "SELECT 1 LIMIT 10 OFFSET 5"] {
            let lines = rules(sql);
            assert_eq!(count(&lines, "LimitClause"), 1, "{sql}");
        }
    }

    #[test]
    fn test_where_without_from() {
        let lines = rules("SELECT 1 WHERE 1 = 1");
        assert_eq!(count(&lines, "FromClause"), 1);
        assert_eq!(count(&lines, "TableSources"), 0);
    }
}
