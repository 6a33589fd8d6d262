//! Statement lists and top-level statement classification.

use sqlstmt_core::{Keyword, TokenKind};

use super::dml::{delete_stmt, insert_stmt, update_stmt};
use super::select::{col_id, select_statement};
use super::{PResult, Parser, PgRule};

const DDL: &[Keyword] = &[
    Keyword::Create,
    Keyword::Alter,
    Keyword::Drop,
    Keyword::Truncate,
    Keyword::Comment,
];

const TRANSACTION: &[Keyword] = &[
    Keyword::Begin,
    Keyword::Start,
    Keyword::Commit,
    Keyword::Rollback,
    Keyword::Savepoint,
    Keyword::Release,
    Keyword::End,
];

const PREPARED: &[Keyword] = &[Keyword::Prepare, Keyword::Execute, Keyword::Deallocate];

const UTILITY: &[Keyword] = &[
    Keyword::Copy,
    Keyword::Vacuum,
    Keyword::Analyze,
    Keyword::Lock,
    Keyword::Do,
    Keyword::Load,
];

const UTILITY_WORDS: &[&str] = &[
    "CHECKPOINT",
    "LISTEN",
    "NOTIFY",
    "UNLISTEN",
    "DISCARD",
    "REINDEX",
    "CLUSTER",
    "REFRESH",
];

/// `Root: Stmtmulti?`; statements are separated by `;`.
pub(super) fn root(p: &mut Parser<'_>) -> PResult {
    p.start(PgRule::Root);
    if !p.at_eof() {
        p.start(PgRule::Stmtmulti);
        while !p.at_eof() {
            if p.at(&TokenKind::Semicolon) {
                p.start(PgRule::EmptyStmt);
                p.bump();
                p.finish();
                continue;
            }
            stmt(p)?;
            if !p.eat(&TokenKind::Semicolon) && !p.at_eof() {
                return Err(p.unexpected("';' or end of input"));
            }
        }
        p.finish();
    }
    p.finish();
    Ok(())
}

fn stmt(p: &mut Parser<'_>) -> PResult {
    p.start(PgRule::Stmt);
    match p.current().as_keyword() {
        Some(Keyword::Select) => select_stmt(p)?,
        _ if p.at(&TokenKind::LeftParen) => select_stmt(p)?,
        Some(Keyword::Insert) => insert_stmt(p)?,
        Some(Keyword::Update) => update_stmt(p)?,
        Some(Keyword::Delete) => delete_stmt(p)?,
        Some(Keyword::With) => opaque(p, PgRule::WithStmt)?,
        Some(Keyword::Call) => opaque(p, PgRule::CallStmt)?,
        Some(Keyword::Merge) => opaque(p, PgRule::MergeStmt)?,
        Some(Keyword::Values | Keyword::Table) => opaque(p, PgRule::ValuesStmt)?,
        Some(Keyword::Create)
            if p.nth_keyword(1, Keyword::Database) || p.nth_keyword(1, Keyword::Schema) =>
        {
            createdb_stmt(p)?;
        }
        Some(kw) if DDL.contains(&kw) => opaque(p, PgRule::DdlStmt)?,
        Some(Keyword::Show) => opaque(p, PgRule::VariableShowStmt)?,
        Some(Keyword::Explain) => opaque(p, PgRule::ExplainStmt)?,
        Some(Keyword::Set | Keyword::Reset) => opaque(p, PgRule::VariableSetStmt)?,
        Some(kw) if TRANSACTION.contains(&kw) => opaque(p, PgRule::TransactionStmt)?,
        Some(kw) if PREPARED.contains(&kw) => opaque(p, PgRule::PrepareStmt)?,
        Some(Keyword::Grant | Keyword::Revoke) => opaque(p, PgRule::GrantStmt)?,
        Some(kw) if UTILITY.contains(&kw) => opaque(p, PgRule::UtilityStmt)?,
        _ if p.at_word("ABORT") => opaque(p, PgRule::TransactionStmt)?,
        _ if UTILITY_WORDS.iter().any(|word| p.at_word(word)) => {
            opaque(p, PgRule::UtilityStmt)?;
        }
        _ => return Err(p.unexpected("statement")),
    }
    p.finish();
    Ok(())
}

fn select_stmt(p: &mut Parser<'_>) -> PResult {
    p.start(PgRule::SelectStmt);
    select_statement(p)?;
    p.finish();
    Ok(())
}

/// `CREATE DATABASE name [[WITH] option ...]`.
///
/// `CREATE SCHEMA` shares the node; the dispatcher only structures the
/// `DATABASE` form.
fn createdb_stmt(p: &mut Parser<'_>) -> PResult {
    if p.nth_keyword(1, Keyword::Schema) {
        return opaque(p, PgRule::DdlStmt);
    }
    p.start(PgRule::CreatedbStmt);
    p.bump_n(2);
    if p.eat_keyword(Keyword::If) {
        p.expect_keyword(Keyword::Not)?;
        p.expect_keyword(Keyword::Exists)?;
    }
    col_id(p)?;
    p.bump_balanced_until(|_| false)?;
    p.finish();
    Ok(())
}

/// A statement kept as a balanced token run up to the next top-level `;`.
fn opaque(p: &mut Parser<'_>, rule: PgRule) -> PResult {
    p.start(rule);
    p.bump_balanced_until(|_| false)?;
    p.finish();
    Ok(())
}
