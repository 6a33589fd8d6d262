//! `select_stmt`, its clauses and `FROM` items.

use sqlstmt_core::cst::Checkpoint;
use sqlstmt_core::{Keyword, ParseError, Token, TokenKind};

use super::expression::{a_expr, function_open_paren};
use super::{PResult, Parser, PgRule};

/// Keywords that end an opaque clause of a select.
const CLAUSE_END: &[Keyword] = &[
    Keyword::Having,
    Keyword::Window,
    Keyword::Order,
    Keyword::Limit,
    Keyword::Offset,
    Keyword::Fetch,
    Keyword::For,
    Keyword::Union,
    Keyword::Intersect,
    Keyword::Except,
    Keyword::Into,
    Keyword::On,
    Keyword::Returning,
];

fn is_set_operation(token: &Token) -> bool {
    token.is(Keyword::Union) || token.is(Keyword::Intersect) || token.is(Keyword::Except)
}

/// Parses `PlainSelect`, `SetOperationSelect` or `ParenthesizedSelect`.
pub(super) fn select_statement(p: &mut Parser<'_>) -> PResult {
    p.enter()?;
    if p.top_level_any(is_set_operation) {
        set_operation_select(p)?;
    } else if p.at(&TokenKind::LeftParen) {
        p.start(PgRule::ParenthesizedSelect);
        select_with_parens(p)?;
        select_tail(p)?;
        p.finish();
    } else {
        p.start(PgRule::PlainSelect);
        simple_select(p, true)?;
        if p.at_keyword(Keyword::For) {
            for_locking_clause(p)?;
        }
        p.finish();
    }
    p.exit();
    Ok(())
}

/// `UNION` and `EXCEPT` chains; `INTERSECT` binds tighter and is grouped
/// into a nested `SetOperationSelect` when the two are mixed.
fn set_operation_select(p: &mut Parser<'_>) -> PResult {
    p.start(PgRule::SetOperationSelect);
    let mixed = p.top_level_any(|t| t.is(Keyword::Union) || t.is(Keyword::Except));

    let checkpoint = p.checkpoint();
    set_operand(p)?;
    if mixed {
        intersect_chain(p, checkpoint)?;
    }
    while p.at_any_keyword(&[Keyword::Union, Keyword::Intersect, Keyword::Except]) {
        p.start(PgRule::SetOperationPart);
        set_operator(p);
        let checkpoint = p.checkpoint();
        set_operand(p)?;
        if mixed {
            intersect_chain(p, checkpoint)?;
        }
        p.finish();
    }
    select_tail(p)?;
    p.finish();
    Ok(())
}

fn intersect_chain(p: &mut Parser<'_>, checkpoint: Checkpoint) -> PResult {
    if !p.at_keyword(Keyword::Intersect) {
        return Ok(());
    }
    p.start_at(checkpoint, PgRule::SetOperationSelect);
    while p.at_keyword(Keyword::Intersect) {
        p.start(PgRule::SetOperationPart);
        set_operator(p);
        set_operand(p)?;
        p.finish();
    }
    p.finish();
    Ok(())
}

/// `UNION|INTERSECT|EXCEPT [ALL|DISTINCT]`.
fn set_operator(p: &mut Parser<'_>) {
    p.bump();
    if p.at_any_keyword(&[Keyword::All, Keyword::Distinct]) {
        p.bump();
    }
}

fn set_operand(p: &mut Parser<'_>) -> PResult {
    if p.at(&TokenKind::LeftParen) {
        select_with_parens(p)
    } else {
        simple_select(p, false)
    }
}

/// `ORDER BY`, `LIMIT`/`OFFSET`/`FETCH` and locking after a set operation
/// or a parenthesized select.
fn select_tail(p: &mut Parser<'_>) -> PResult {
    if p.at_keyword(Keyword::Order) {
        sort_clause(p)?;
    }
    if at_select_limit(p) {
        select_limit(p)?;
    }
    if p.at_keyword(Keyword::For) {
        for_locking_clause(p)?;
    }
    Ok(())
}

/// `'(' select ')'`.
fn select_with_parens(p: &mut Parser<'_>) -> PResult {
    p.enter()?;
    p.start(PgRule::SelectWithParens);
    p.expect(&TokenKind::LeftParen)?;
    if p.top_level_any(is_set_operation) {
        set_operation_select(p)?;
    } else if p.at(&TokenKind::LeftParen) {
        select_with_parens(p)?;
        select_tail(p)?;
    } else {
        simple_select(p, true)?;
        if p.at_keyword(Keyword::For) {
            for_locking_clause(p)?;
        }
    }
    p.expect(&TokenKind::RightParen)?;
    p.finish();
    p.exit();
    Ok(())
}

/// One `SELECT ...` block. Sorting and limits are left to the enclosing
/// set operation when `with_tail` is false.
fn simple_select(p: &mut Parser<'_>, with_tail: bool) -> PResult {
    p.start(PgRule::SimpleSelectPrimary);
    p.expect_keyword(Keyword::Select)?;
    if !p.eat_keyword(Keyword::All) && p.at_keyword(Keyword::Distinct) {
        p.start(PgRule::DistinctClause);
        p.bump();
        if p.eat_keyword(Keyword::On) {
            p.bump_group()?;
        }
        p.finish();
    }
    target_list(p)?;

    if p.at_keyword(Keyword::Into) {
        into_clause(p)?;
    }
    if p.at_keyword(Keyword::From) {
        from_clause(p)?;
    }
    if p.at_keyword(Keyword::Where) {
        where_clause(p)?;
    }
    if p.at_keyword(Keyword::Group) {
        p.start(PgRule::GroupClause);
        p.bump();
        p.expect_keyword(Keyword::By)?;
        p.bump_balanced_until(|p| p.at_any_keyword(CLAUSE_END))?;
        p.finish();
    }
    if p.at_keyword(Keyword::Having) {
        p.start(PgRule::HavingClause);
        p.bump();
        a_expr(p)?;
        p.finish();
    }
    if p.at_keyword(Keyword::Window) {
        p.start(PgRule::WindowClause);
        p.bump();
        p.bump_balanced_until(|p| p.at_any_keyword(CLAUSE_END))?;
        p.finish();
    }
    if with_tail {
        if p.at_keyword(Keyword::Order) {
            sort_clause(p)?;
        }
        if at_select_limit(p) {
            select_limit(p)?;
        }
    }
    p.finish();
    Ok(())
}

/// A non-empty target list. A leading bare `*` stays a direct token.
fn target_list(p: &mut Parser<'_>) -> PResult {
    p.start(PgRule::TargetList);
    if !p.eat(&TokenKind::Star) {
        target_el(p)?;
    }
    while p.eat(&TokenKind::Comma) {
        target_el(p)?;
    }
    p.finish();
    Ok(())
}

fn target_el(p: &mut Parser<'_>) -> PResult {
    if p.at(&TokenKind::Star) {
        p.start(PgRule::TargetStar);
        p.bump();
        p.finish();
        return Ok(());
    }
    p.start(PgRule::TargetEl);
    a_expr(p)?;
    if p.eat_keyword(Keyword::As) {
        p.start(PgRule::ColLabel);
        if !p.nth_is_name_part(0) {
            return Err(p.unexpected("column label"));
        }
        p.bump();
        p.finish();
    } else if p.at_identifier() {
        p.start(PgRule::ColLabel);
        p.bump();
        p.finish();
    }
    p.finish();
    Ok(())
}

/// `INTO [TEMP|TEMPORARY|UNLOGGED] [TABLE] name`.
fn into_clause(p: &mut Parser<'_>) -> PResult {
    p.start(PgRule::IntoClause);
    p.bump();
    if !p.eat_word("TEMPORARY") && !p.eat_word("TEMP") {
        p.eat_word("UNLOGGED");
    }
    p.eat_keyword(Keyword::Table);
    qualified_name(p)?;
    p.finish();
    Ok(())
}

pub(super) fn from_clause(p: &mut Parser<'_>) -> PResult {
    p.start(PgRule::FromClause);
    p.bump();
    from_list(p)?;
    p.finish();
    Ok(())
}

/// `WHERE a_expr` or `WHERE CURRENT OF cursor`.
pub(super) fn where_clause(p: &mut Parser<'_>) -> PResult {
    p.start(PgRule::WhereClause);
    p.bump();
    if p.at_word("CURRENT") && p.nth_keyword(1, Keyword::Of) {
        p.bump_n(2);
        col_id(p)?;
    } else {
        a_expr(p)?;
    }
    p.finish();
    Ok(())
}

fn sort_clause(p: &mut Parser<'_>) -> PResult {
    p.start(PgRule::SortClause);
    p.bump();
    p.expect_keyword(Keyword::By)?;
    loop {
        p.start(PgRule::SortBy);
        a_expr(p)?;
        if p.at_any_keyword(&[Keyword::Asc, Keyword::Desc]) {
            p.bump();
        } else if p.eat_keyword(Keyword::Using) {
            if p.at_statement_end() {
                return Err(p.unexpected("operator"));
            }
            p.bump();
        }
        if p.at_word("NULLS") && (p.nth_keyword(1, Keyword::First) || p.nth_word(1, "LAST")) {
            p.bump_n(2);
        }
        p.finish();
        if !p.eat(&TokenKind::Comma) {
            break;
        }
    }
    p.finish();
    Ok(())
}

fn at_select_limit(p: &Parser<'_>) -> bool {
    p.at_any_keyword(&[Keyword::Limit, Keyword::Offset, Keyword::Fetch])
}

/// `LIMIT`, `OFFSET` and `FETCH` in any order.
fn select_limit(p: &mut Parser<'_>) -> PResult {
    p.start(PgRule::SelectLimit);
    loop {
        if p.at_keyword(Keyword::Limit) {
            p.start(PgRule::LimitClause);
            p.bump();
            if !p.eat_keyword(Keyword::All) {
                a_expr(p)?;
            }
            p.finish();
        } else if p.at_keyword(Keyword::Offset) {
            p.start(PgRule::OffsetClause);
            p.bump();
            a_expr(p)?;
            if p.at_any_keyword(&[Keyword::Row, Keyword::Rows]) {
                p.bump();
            }
            p.finish();
        } else if p.at_keyword(Keyword::Fetch) {
            fetch_clause(p)?;
        } else {
            break;
        }
    }
    p.finish();
    Ok(())
}

/// `FETCH FIRST|NEXT [count] ROW|ROWS ONLY|WITH TIES`.
fn fetch_clause(p: &mut Parser<'_>) -> PResult {
    p.start(PgRule::FetchClause);
    p.bump();
    if !p.at_any_keyword(&[Keyword::First, Keyword::Next]) {
        return Err(p.unexpected("FIRST or NEXT"));
    }
    p.bump();
    if !p.at_any_keyword(&[Keyword::Row, Keyword::Rows]) {
        a_expr(p)?;
    }
    if !p.at_any_keyword(&[Keyword::Row, Keyword::Rows]) {
        return Err(p.unexpected("ROW or ROWS"));
    }
    p.bump();
    if p.at_keyword(Keyword::With) && p.nth_word(1, "TIES") {
        p.bump_n(2);
    } else {
        p.expect_keyword(Keyword::Only)?;
    }
    p.finish();
    Ok(())
}

fn for_locking_clause(p: &mut Parser<'_>) -> PResult {
    p.start(PgRule::ForLockingClause);
    p.bump();
    p.bump_balanced_until(|p| {
        p.at_any_keyword(&[Keyword::Union, Keyword::Intersect, Keyword::Except])
    })?;
    p.finish();
    Ok(())
}

/// `table_ref (',' table_ref)*`.
pub(super) fn from_list(p: &mut Parser<'_>) -> PResult {
    p.start(PgRule::FromList);
    table_ref(p)?;
    while p.eat(&TokenKind::Comma) {
        table_ref(p)?;
    }
    p.finish();
    Ok(())
}

fn table_ref(p: &mut Parser<'_>) -> PResult {
    p.start(PgRule::TableRef);
    table_item(p)?;
    while join_part(p)? {}
    p.finish();
    Ok(())
}

fn table_item(p: &mut Parser<'_>) -> PResult {
    p.enter()?;
    let lateral = usize::from(p.at_keyword(Keyword::Lateral));
    let derived = p.nth_at(lateral, &TokenKind::LeftParen)
        && (p.nth_keyword(lateral + 1, Keyword::Values)
            || p.nth_keyword(lateral + 1, Keyword::With));

    if p.nth_at(lateral, &TokenKind::LeftParen) && p.nth_is_subquery(lateral, &[Keyword::Select])
    {
        p.start(PgRule::SubqueryRef);
        p.eat_keyword(Keyword::Lateral);
        p.bump();
        select_statement(p)?;
        p.expect(&TokenKind::RightParen)?;
        alias_clause(p)?;
        p.finish();
    } else if derived {
        p.start(PgRule::DerivedTableRef);
        p.eat_keyword(Keyword::Lateral);
        p.bump_group()?;
        alias_clause(p)?;
        p.finish();
    } else if lateral == 0 && p.at(&TokenKind::LeftParen) {
        p.start(PgRule::JoinedTableRef);
        p.bump();
        from_list(p)?;
        p.expect(&TokenKind::RightParen)?;
        alias_clause(p)?;
        p.finish();
    } else if let Some(open) = function_open_paren(p, lateral) {
        p.start(PgRule::FuncTableRef);
        p.bump_n(open);
        p.bump_group()?;
        if p.at_keyword(Keyword::With) && p.nth_word(1, "ORDINALITY") {
            p.bump_n(2);
        }
        alias_clause(p)?;
        p.finish();
    } else if lateral == 0 {
        relation_ref(p)?;
    } else {
        p.bump();
        return Err(p.unexpected("subquery or function after LATERAL"));
    }
    p.exit();
    Ok(())
}

/// `[ONLY] qualified_name [*] [alias] [TABLESAMPLE method (args) [REPEATABLE (seed)]]`.
pub(super) fn relation_ref(p: &mut Parser<'_>) -> PResult {
    p.start(PgRule::RelationRef);
    p.eat_keyword(Keyword::Only);
    qualified_name(p)?;
    p.eat(&TokenKind::Star);
    alias_clause(p)?;
    if p.at_word("TABLESAMPLE") {
        p.bump();
        p.expect_identifier()?;
        p.bump_group()?;
        if p.eat_word("REPEATABLE") {
            p.bump_group()?;
        }
    }
    p.finish();
    Ok(())
}

/// `[AS] alias [(column, ...)]`; absent unless `AS` or a bare name follows.
fn alias_clause(p: &mut Parser<'_>) -> PResult {
    let bare = p.at_identifier() && !p.at_word("TABLESAMPLE");
    if !p.at_keyword(Keyword::As) && !bare {
        return Ok(());
    }
    p.start(PgRule::AliasClause);
    p.eat_keyword(Keyword::As);
    col_id(p)?;
    if p.at(&TokenKind::LeftParen) {
        p.bump();
        name_list(p)?;
        p.expect(&TokenKind::RightParen)?;
    }
    p.finish();
    Ok(())
}

/// A possibly qualified relation name: `[catalog.][schema.]name`.
pub(super) fn qualified_name(p: &mut Parser<'_>) -> PResult {
    p.start(PgRule::QualifiedName);
    p.expect_identifier()?;
    while p.at(&TokenKind::Dot) && p.nth_is_name_part(1) {
        p.bump_n(2);
    }
    p.finish();
    Ok(())
}

/// A single unqualified name.
pub(super) fn col_id(p: &mut Parser<'_>) -> PResult {
    p.start(PgRule::ColId);
    p.expect_identifier()?;
    p.finish();
    Ok(())
}

/// `ColId (',' ColId)*`.
pub(super) fn name_list(p: &mut Parser<'_>) -> PResult {
    p.start(PgRule::NameList);
    col_id(p)?;
    while p.eat(&TokenKind::Comma) {
        col_id(p)?;
    }
    p.finish();
    Ok(())
}

/// Parses one join following a table item; returns false if none starts here.
fn join_part(p: &mut Parser<'_>) -> Result<bool, ParseError> {
    match p.current().as_keyword() {
        Some(Keyword::Cross) => {
            p.start(PgRule::InnerJoin);
            p.bump();
            p.expect_keyword(Keyword::Join)?;
            table_item(p)?;
        }
        Some(Keyword::Inner | Keyword::Join) => {
            p.start(PgRule::InnerJoin);
            p.eat_keyword(Keyword::Inner);
            p.expect_keyword(Keyword::Join)?;
            table_item(p)?;
            join_qual(p)?;
        }
        Some(Keyword::Left | Keyword::Right | Keyword::Full) => {
            p.start(PgRule::OuterJoin);
            p.bump();
            p.eat_keyword(Keyword::Outer);
            p.expect_keyword(Keyword::Join)?;
            table_item(p)?;
            join_qual(p)?;
        }
        Some(Keyword::Natural) => {
            p.start(PgRule::NaturalJoin);
            p.bump();
            if p.at_any_keyword(&[Keyword::Left, Keyword::Right, Keyword::Full]) {
                p.bump();
                p.eat_keyword(Keyword::Outer);
            } else {
                p.eat_keyword(Keyword::Inner);
            }
            p.expect_keyword(Keyword::Join)?;
            table_item(p)?;
        }
        _ => return Ok(false),
    }
    p.finish();
    Ok(true)
}

/// `ON a_expr` or `USING (name, ...) [AS alias]`.
fn join_qual(p: &mut Parser<'_>) -> PResult {
    if !p.at_keyword(Keyword::On) && !p.at_keyword(Keyword::Using) {
        return Err(p.unexpected("ON or USING"));
    }
    p.start(PgRule::JoinQual);
    if p.eat_keyword(Keyword::On) {
        a_expr(p)?;
    } else {
        p.bump();
        p.expect(&TokenKind::LeftParen)?;
        name_list(p)?;
        p.expect(&TokenKind::RightParen)?;
        if p.eat_keyword(Keyword::As) {
            col_id(p)?;
        }
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
        assert_eq!(count(&rules("SELECT 1"), "PlainSelect"), 1);
        assert_eq!(count(&rules("(SELECT 1) LIMIT 1"), "ParenthesizedSelect"), 1);
        let union = rules("SELECT 1 UNION (SELECT 2) EXCEPT ALL SELECT 3 ORDER BY 1");
        assert_eq!(count(&union, "SetOperationSelect"), 1);
        assert_eq!(count(&union, "SetOperationPart"), 2);
        assert_eq!(count(&union, "SelectWithParens"), 1);
    }

    #[test]
    fn test_intersect_groups_inside_union() {
        let lines = rules("SELECT 1 UNION SELECT 2 INTERSECT SELECT 3");
        assert_eq!(count(&lines, "SetOperationSelect"), 2);
        assert_eq!(count(&lines, "SetOperationPart"), 2);
        let flat = rules("SELECT 1 INTERSECT SELECT 2 INTERSECT SELECT 3");
        assert_eq!(count(&flat, "SetOperationSelect"), 1);
    }

    #[test]
    fn test_target_list() {
        let lines = rules("SELECT *, t.*, a, b AS x, c y, count(*), a + 1 FROM t");
        assert_eq!(count(&lines, "TargetEl"), 6);
        assert_eq!(count(&lines, "ColLabel"), 2);
        let later_star = rules("SELECT a, * FROM t");
        assert_eq!(count(&later_star, "TargetStar"), 1);
    }

    #[test]
    fn test_joins() {
        let lines = rules(
            "SELECT 1 FROM a INNER JOIN b ON a.id = b.id LEFT JOIN c USING (id) \
             FULL OUTER JOIN d ON true NATURAL JOIN e CROSS JOIN f",
        );
        assert_eq!(count(&lines, "InnerJoin"), 2);
        assert_eq!(count(&lines, "OuterJoin"), 2);
        assert_eq!(count(&lines, "NaturalJoin"), 1);
        assert_eq!(count(&lines, "JoinQual"), 3);
    }

    #[test]
    fn test_table_items() {
        let lines = rules(
            "SELECT 1 FROM ONLY t1 AS x, LATERAL (SELECT 1) s, (a JOIN b ON true), \
             generate_series(1, 3) WITH ORDINALITY g(n), (VALUES (1)) v(a), \
             big TABLESAMPLE SYSTEM (10)",
        );
        assert_eq!(count(&lines, "RelationRef"), 4);
        assert_eq!(count(&lines, "SubqueryRef"), 1);
        assert_eq!(count(&lines, "JoinedTableRef"), 1);
        assert_eq!(count(&lines, "FuncTableRef"), 1);
        assert_eq!(count(&lines, "DerivedTableRef"), 1);
        assert_eq!(count(&lines, "AliasClause"), 4);
    }

    #[test]
    fn test_join_requires_condition() {
        let err = parse_tree("SELECT 1 FROM a JOIN b", &ParseOptions::default()).unwrap_err();
        assert_eq!(err.expected.as_deref(), Some("ON or USING"));
    }

    #[test]
    fn test_limit_forms() {
        for sql in [
            "SELECT 1 LIMIT 5",
            "SELECT 1 LIMIT ALL OFFSET 2",
            "SELECT 1 OFFSET 10 ROWS FETCH FIRST 5 ROWS ONLY",
            "SELECT 1 FETCH NEXT ROW WITH TIES",
        ] {
            assert_eq!(count(&rules(sql), "SelectLimit"), 1, "{sql}");
        }
    }

    #[test]
    fn test_clauses() {
        let lines = rules(
            "SELECT DISTINCT ON (a) a INTO TEMP x FROM t WHERE b GROUP BY ROLLUP (a) \
             HAVING count(*) > 1 WINDOW w AS (PARTITION BY a) ORDER BY a DESC NULLS LAST \
             FOR UPDATE SKIP LOCKED",
        );
        for rule in [
            "DistinctClause",
            "IntoClause",
            "WhereClause",
            "GroupClause",
            "HavingClause",
            "WindowClause",
            "SortClause",
            "ForLockingClause",
        ] {
            assert_eq!(count(&lines, rule), 1, "{rule}");
        }
    }
}
