//! INSERT, UPDATE and DELETE.

use sqlstmt_core::{Keyword, TokenKind};

use super::expression::a_expr;
use super::select::{
    col_id, from_clause, from_list, qualified_name, relation_ref, select_statement, where_clause,
};
use super::{PResult, Parser, PgRule};

/// `INSERT INTO target [(columns)] [OVERRIDING ... VALUE] source
/// [ON CONFLICT ...] [RETURNING ...]`.
pub(super) fn insert_stmt(p: &mut Parser<'_>) -> PResult {
    p.start(PgRule::InsertStmt);
    p.bump();
    p.expect_keyword(Keyword::Into)?;

    p.start(PgRule::InsertTarget);
    qualified_name(p)?;
    if p.eat_keyword(Keyword::As) {
        col_id(p)?;
    }
    p.finish();

    if p.at(&TokenKind::LeftParen) && !p.nth_is_subquery(0, &[Keyword::Select]) {
        p.start(PgRule::InsertColumnList);
        p.bump();
        set_target(p)?;
        while p.eat(&TokenKind::Comma) {
            set_target(p)?;
        }
        p.expect(&TokenKind::RightParen)?;
        p.finish();
    }
    if p.at_word("OVERRIDING") {
        p.bump_n(2);
        p.expect_keyword(Keyword::Value)?;
    }

    if p.at_keyword(Keyword::Default) && p.nth_keyword(1, Keyword::Values) {
        p.start(PgRule::DefaultValues);
        p.bump_n(2);
        p.finish();
    } else if p.at_keyword(Keyword::Values) {
        values_clause(p)?;
    } else if p.at_keyword(Keyword::Select) || p.at(&TokenKind::LeftParen) {
        select_statement(p)?;
    } else {
        return Err(p.unexpected("VALUES, SELECT or DEFAULT VALUES"));
    }

    if p.at_keyword(Keyword::On) && p.nth_word(1, "CONFLICT") {
        p.start(PgRule::OnConflictClause);
        p.bump_n(2);
        p.bump_balanced_until(|p| p.at_keyword(Keyword::Returning))?;
        p.finish();
    }
    returning_clause(p)?;
    p.finish();
    Ok(())
}

/// `VALUES (row), ...`; items are expressions or `DEFAULT`.
fn values_clause(p: &mut Parser<'_>) -> PResult {
    p.start(PgRule::ValuesClause);
    p.bump();
    loop {
        p.start(PgRule::ValuesRow);
        p.expect(&TokenKind::LeftParen)?;
        expr_or_default(p)?;
        while p.eat(&TokenKind::Comma) {
            expr_or_default(p)?;
        }
        p.expect(&TokenKind::RightParen)?;
        p.finish();
        if !p.eat(&TokenKind::Comma) {
            break;
        }
    }
    p.finish();
    Ok(())
}

fn expr_or_default(p: &mut Parser<'_>) -> PResult {
    if p.at_keyword(Keyword::Default) {
        p.start(PgRule::SetToDefault);
        p.bump();
        p.finish();
        Ok(())
    } else {
        a_expr(p)
    }
}

/// A column name with optional field and subscript indirection.
fn set_target(p: &mut Parser<'_>) -> PResult {
    p.start(PgRule::SetTarget);
    p.expect_identifier()?;
    loop {
        if p.at(&TokenKind::Dot) && p.nth_is_name_part(1) {
            p.bump_n(2);
        } else if p.at(&TokenKind::LeftBracket) {
            p.bump_group()?;
        } else {
            break;
        }
    }
    p.finish();
    Ok(())
}

/// `UPDATE relation SET ... [FROM ...] [WHERE ...] [RETURNING ...]`.
pub(super) fn update_stmt(p: &mut Parser<'_>) -> PResult {
    p.start(PgRule::UpdateStmt);
    p.bump();
    relation_ref(p)?;
    p.expect_keyword(Keyword::Set)?;
    set_clause(p)?;
    while p.eat(&TokenKind::Comma) {
        set_clause(p)?;
    }
    if p.at_keyword(Keyword::From) {
        from_clause(p)?;
    }
    if p.at_keyword(Keyword::Where) {
        where_clause(p)?;
    }
    returning_clause(p)?;
    p.finish();
    Ok(())
}

/// `target = expr` or `(target, ...) = row_expr`.
fn set_clause(p: &mut Parser<'_>) -> PResult {
    if p.at(&TokenKind::LeftParen) {
        p.start(PgRule::MultiSetClause);
        p.bump();
        set_target(p)?;
        while p.eat(&TokenKind::Comma) {
            set_target(p)?;
        }
        p.expect(&TokenKind::RightParen)?;
        p.expect(&TokenKind::Eq)?;
        a_expr(p)?;
    } else {
        p.start(PgRule::SetClause);
        set_target(p)?;
        p.expect(&TokenKind::Eq)?;
        expr_or_default(p)?;
    }
    p.finish();
    Ok(())
}

/// `DELETE FROM relation [USING ...] [WHERE ...] [RETURNING ...]`.
pub(super) fn delete_stmt(p: &mut Parser<'_>) -> PResult {
    p.start(PgRule::DeleteStmt);
    p.bump();
    p.expect_keyword(Keyword::From)?;
    relation_ref(p)?;
    if p.at_keyword(Keyword::Using) {
        p.start(PgRule::UsingClause);
        p.bump();
        from_list(p)?;
        p.finish();
    }
    if p.at_keyword(Keyword::Where) {
        where_clause(p)?;
    }
    returning_clause(p)?;
    p.finish();
    Ok(())
}

fn returning_clause(p: &mut Parser<'_>) -> PResult {
    if p.at_keyword(Keyword::Returning) {
        p.start(PgRule::ReturningClause);
        p.bump();
        p.bump_balanced_until(|_| false)?;
        p.finish();
    }
    Ok(())
}
