//! Expressions, predicates and expression atoms.

use sqlstmt_core::{Keyword, TokenKind};

use super::precedence::{
    atom_binding_power, is_comparison, logical_binding_power, AtomOp, PredicateOp,
    COLLATE_BINDING_POWER, NOT_BINDING_POWER, UNARY_BINDING_POWER,
};
use super::select::select_statement;
use super::{MySqlRule, PResult, Parser};

/// Reserved words that still name built-in functions when followed by `(`.
const FUNCTION_KEYWORDS: &[Keyword] = &[
    Keyword::If,
    Keyword::Left,
    Keyword::Right,
    Keyword::Replace,
    Keyword::Insert,
    Keyword::Values,
    Keyword::Default,
    Keyword::Mod,
    Keyword::Database,
    Keyword::Schema,
    Keyword::Cast,
];

/// Functions that are called without parentheses.
const NILADIC_FUNCTIONS: &[&str] = &[
    "CURRENT_DATE",
    "CURRENT_TIME",
    "CURRENT_TIMESTAMP",
    "CURRENT_USER",
    "LOCALTIME",
    "LOCALTIMESTAMP",
    "UTC_DATE",
    "UTC_TIME",
    "UTC_TIMESTAMP",
];

/// Parses a full expression.
pub(super) fn expression(p: &mut Parser<'_>) -> PResult {
    logical(p, 0)
}

/// Parses `expression (',' expression)*` into an `Expressions` node.
pub(super) fn expressions(p: &mut Parser<'_>) -> PResult {
    p.start(MySqlRule::Expressions);
    expression(p)?;
    while p.eat(&TokenKind::Comma) {
        expression(p)?;
    }
    p.finish();
    Ok(())
}

fn logical(p: &mut Parser<'_>, min_bp: u8) -> PResult {
    p.enter()?;
    let checkpoint = p.checkpoint();

    if p.at_keyword(Keyword::Not) {
        p.start(MySqlRule::NotExpression);
        p.bump();
        logical(p, NOT_BINDING_POWER)?;
        p.finish();
    } else {
        predicate_expression(p)?;
    }

    // A run of one connective (`a AND b AND c`) stays a single node with
    // one operand per term.
    let mut open: Option<u8> = None;
    while let Some((l_bp, r_bp)) = logical_binding_power(p.kind()) {
        if l_bp < min_bp {
            break;
        }
        if open != Some(l_bp) {
            if open.is_some() {
                p.finish();
            }
            p.start_at(checkpoint, MySqlRule::LogicalExpression);
            open = Some(l_bp);
        }
        p.start(MySqlRule::LogicalOperator);
        p.bump();
        p.finish();
        logical(p, r_bp)?;
    }
    if open.is_some() {
        p.finish();
    }

    p.exit();
    Ok(())
}

/// `predicate IS [NOT] TRUE|FALSE|UNKNOWN`, or a bare predicate.
fn predicate_expression(p: &mut Parser<'_>) -> PResult {
    let checkpoint = p.checkpoint();
    predicate(p, 0)?;

    if at_truth_test(p) {
        p.start_at(checkpoint, MySqlRule::IsExpression);
        p.bump();
        p.eat_keyword(Keyword::Not);
        p.bump();
    } else {
        p.start_at(checkpoint, MySqlRule::PredicateExpression);
    }
    p.finish();
    Ok(())
}

fn at_truth_test(p: &Parser<'_>) -> bool {
    if !p.at_keyword(Keyword::Is) {
        return false;
    }
    let n = if p.nth_keyword(1, Keyword::Not) { 2 } else { 1 };
    p.nth_keyword(n, Keyword::True) || p.nth_keyword(n, Keyword::False) || p.nth_word(n, "UNKNOWN")
}

/// Identifies the predicate operator at the cursor, if any.
fn predicate_op(p: &Parser<'_>) -> Option<PredicateOp> {
    let negatable = if p.at_keyword(Keyword::Not) { 1 } else { 0 };
    let keyword = p.nth(negatable).as_keyword();
    match keyword {
        Some(Keyword::In) => return Some(PredicateOp::In),
        Some(Keyword::Between) => return Some(PredicateOp::Between),
        Some(Keyword::Like) => return Some(PredicateOp::Like),
        Some(Keyword::Regexp | Keyword::Rlike) => return Some(PredicateOp::Regexp),
        _ if negatable == 1 => return None,
        _ => {}
    }

    if p.at_keyword(Keyword::Is) {
        let n = if p.nth_keyword(1, Keyword::Not) { 2 } else { 1 };
        return p.nth_keyword(n, Keyword::Null).then_some(PredicateOp::IsNull);
    }
    if is_comparison(p.kind()) {
        return Some(PredicateOp::Comparison);
    }
    if p.at_word("SOUNDS") && p.nth_keyword(1, Keyword::Like) {
        return Some(PredicateOp::SoundsLike);
    }
    if p.at_word("MEMBER") && p.nth_keyword(1, Keyword::Of) {
        return Some(PredicateOp::MemberOf);
    }
    None
}

/// Parses a predicate whose operators bind at least as tight as `min_bp`.
pub(super) fn predicate(p: &mut Parser<'_>, min_bp: u8) -> PResult {
    p.enter()?;
    let checkpoint = p.checkpoint();

    p.start(MySqlRule::ExpressionAtomPredicate);
    atom(p, 0)?;
    p.finish();

    let mut wraps = 0;
    while let Some(op) = predicate_op(p) {
        let bp = op.binding_power();
        if bp < min_bp {
            break;
        }
        // Every operator nests the predicate built so far one level deeper.
        p.enter()?;
        wraps += 1;
        match op {
            PredicateOp::In => {
                p.start_at(checkpoint, MySqlRule::InPredicate);
                p.eat_keyword(Keyword::Not);
                p.bump();
                p.expect(&TokenKind::LeftParen)?;
                if at_in_subquery(p) {
                    select_statement(p)?;
                } else {
                    expressions(p)?;
                }
                p.expect(&TokenKind::RightParen)?;
            }
            PredicateOp::IsNull => {
                p.start_at(checkpoint, MySqlRule::IsNullPredicate);
                p.bump();
                p.eat_keyword(Keyword::Not);
                p.expect_keyword(Keyword::Null)?;
            }
            PredicateOp::Comparison => {
                let quantified = p.nth(1).as_keyword().is_some_and(|kw| {
                    matches!(kw, Keyword::All | Keyword::Any | Keyword::Some)
                }) && p.nth_at(2, &TokenKind::LeftParen);
                if quantified {
                    p.start_at(checkpoint, MySqlRule::SubqueryComparisonPredicate);
                    comparison_operator(p);
                    p.bump();
                    p.bump();
                    select_statement(p)?;
                    p.expect(&TokenKind::RightParen)?;
                } else {
                    p.start_at(checkpoint, MySqlRule::BinaryComparisonPredicate);
                    comparison_operator(p);
                    predicate(p, bp + 1)?;
                }
            }
            PredicateOp::Between => {
                p.start_at(checkpoint, MySqlRule::BetweenPredicate);
                p.eat_keyword(Keyword::Not);
                p.bump();
                predicate(p, bp + 1)?;
                p.expect_keyword(Keyword::And)?;
                predicate(p, bp + 1)?;
            }
            PredicateOp::SoundsLike => {
                p.start_at(checkpoint, MySqlRule::SoundsLikePredicate);
                p.bump_n(2);
                predicate(p, bp + 1)?;
            }
            PredicateOp::Like => {
                p.start_at(checkpoint, MySqlRule::LikePredicate);
                p.eat_keyword(Keyword::Not);
                p.bump();
                predicate(p, bp + 1)?;
                if p.eat_keyword(Keyword::Escape) {
                    p.expect(&TokenKind::String)?;
                }
            }
            PredicateOp::Regexp => {
                p.start_at(checkpoint, MySqlRule::RegexpPredicate);
                p.eat_keyword(Keyword::Not);
                p.bump();
                predicate(p, bp + 1)?;
            }
            PredicateOp::MemberOf => {
                p.start_at(checkpoint, MySqlRule::JsonMemberOfPredicate);
                p.bump_n(2);
                p.expect(&TokenKind::LeftParen)?;
                predicate(p, 0)?;
                p.expect(&TokenKind::RightParen)?;
            }
        }
        p.finish();
    }

    for _ in 0..=wraps {
        p.exit();
    }
    Ok(())
}

fn comparison_operator(p: &mut Parser<'_>) {
    p.start(MySqlRule::ComparisonOperator);
    p.bump();
    p.finish();
}

/// After `IN (`: a subquery, unless the parenthesized select is only the
/// first item of a value list.
fn at_in_subquery(p: &Parser<'_>) -> bool {
    if p.at_keyword(Keyword::Select) {
        return true;
    }
    p.nth_is_subquery(0, &[Keyword::Select])
        && p
            .matching_paren(0)
            .is_some_and(|close| !p.nth_at(close + 1, &TokenKind::Comma))
}

/// Parses an expression atom and the arithmetic, bit and JSON operators
/// binding at least as tight as `min_bp`.
pub(super) fn atom(p: &mut Parser<'_>, min_bp: u8) -> PResult {
    p.enter()?;
    let checkpoint = p.checkpoint();
    primary(p)?;

    // Operators of one precedence level chain inside a single node. Each
    // COLLATE nests one level.
    let mut wraps = 0;
    let mut open: Option<(MySqlRule, u8)> = None;
    loop {
        if p.at_keyword(Keyword::Collate) {
            if COLLATE_BINDING_POWER < min_bp {
                break;
            }
            if open.take().is_some() {
                p.finish();
            }
            p.enter()?;
            wraps += 1;
            p.start_at(checkpoint, MySqlRule::CollateExpressionAtom);
            p.bump();
            if p.at_identifier() || p.at(&TokenKind::String) {
                p.bump();
            } else {
                return Err(p.unexpected("collation name"));
            }
            p.finish();
            continue;
        }

        let Some((op, l_bp, r_bp)) = atom_binding_power(p.kind()) else {
            break;
        };
        if l_bp < min_bp {
            break;
        }
        let rule = match op {
            AtomOp::Bit => MySqlRule::BitExpressionAtom,
            AtomOp::Math => MySqlRule::MathExpressionAtom,
            AtomOp::Json => MySqlRule::JsonExpressionAtom,
        };
        if open != Some((rule, l_bp)) {
            if open.is_some() {
                p.finish();
            }
            p.start_at(checkpoint, rule);
            open = Some((rule, l_bp));
        }
        p.bump();
        atom(p, r_bp)?;
    }
    if open.is_some() {
        p.finish();
    }

    for _ in 0..=wraps {
        p.exit();
    }
    Ok(())
}

fn primary(p: &mut Parser<'_>) -> PResult {
    match p.kind() {
        TokenKind::Integer
        | TokenKind::Float
        | TokenKind::String
        | TokenKind::HexString
        | TokenKind::BitString
        | TokenKind::Keyword(Keyword::Null | Keyword::True | Keyword::False) => constant(p),
        TokenKind::Minus | TokenKind::Plus
            if matches!(p.nth_kind(1), TokenKind::Integer | TokenKind::Float) =>
        {
            constant(p)
        }
        TokenKind::Identifier(_) if at_introduced_string(p) => constant(p),
        TokenKind::Minus
        | TokenKind::Plus
        | TokenKind::BitNot
        | TokenKind::Bang
        | TokenKind::Keyword(Keyword::Not) => {
            p.start(MySqlRule::UnaryExpressionAtom);
            p.bump();
            atom(p, UNARY_BINDING_POWER)?;
            p.finish();
            Ok(())
        }
        TokenKind::Keyword(Keyword::Binary) => {
            p.start(MySqlRule::BinaryExpressionAtom);
            p.bump();
            atom(p, UNARY_BINDING_POWER)?;
            p.finish();
            Ok(())
        }
        TokenKind::Variable if p.nth_at(1, &TokenKind::Assign) => {
            p.start(MySqlRule::VariableAssignExpressionAtom);
            p.bump_n(2);
            atom(p, 0)?;
            p.finish();
            Ok(())
        }
        TokenKind::Variable => leaf(p, MySqlRule::MysqlVariableExpressionAtom),
        TokenKind::Question => leaf(p, MySqlRule::ParameterExpressionAtom),
        TokenKind::LeftParen => parenthesized(p),
        TokenKind::Keyword(Keyword::Row) if p.nth_at(1, &TokenKind::LeftParen) => {
            p.start(MySqlRule::NestedRowExpressionAtom);
            p.bump_n(2);
            expression(p)?;
            while p.eat(&TokenKind::Comma) {
                expression(p)?;
            }
            p.expect(&TokenKind::RightParen)?;
            p.finish();
            Ok(())
        }
        TokenKind::Keyword(Keyword::Exists) => {
            p.start(MySqlRule::ExistsExpressionAtom);
            p.bump();
            p.expect(&TokenKind::LeftParen)?;
            select_statement(p)?;
            p.expect(&TokenKind::RightParen)?;
            p.finish();
            Ok(())
        }
        TokenKind::Keyword(Keyword::Interval) => {
            p.start(MySqlRule::IntervalExpressionAtom);
            p.bump();
            expression(p)?;
            if !p.nth_is_name_part(0) {
                return Err(p.unexpected("interval unit"));
            }
            p.bump();
            p.finish();
            Ok(())
        }
        _ if function_extent(p, 0).is_some() => {
            p.start(MySqlRule::FunctionCallExpressionAtom);
            function_call(p)?;
            p.finish();
            Ok(())
        }
        _ if p.at_identifier() => {
            p.start(MySqlRule::FullColumnNameExpressionAtom);
            full_column_name(p)?;
            p.finish();
            Ok(())
        }
        _ => Err(p.unexpected("expression")),
    }
}

fn leaf(p: &mut Parser<'_>, rule: MySqlRule) -> PResult {
    p.start(rule);
    p.bump();
    p.finish();
    Ok(())
}

/// `_utf8mb4'text'` or `N'text'`.
pub(super) fn at_introduced_string(p: &Parser<'_>) -> bool {
    let text = p.nth_text(0);
    p.nth_at(1, &TokenKind::String) && (text.starts_with('_') || text.eq_ignore_ascii_case("N"))
}

/// A literal, including a signed number and adjacent string literals.
fn constant(p: &mut Parser<'_>) -> PResult {
    p.start(MySqlRule::ConstantExpressionAtom);
    p.start(MySqlRule::Constant);
    if matches!(p.kind(), TokenKind::Minus | TokenKind::Plus | TokenKind::Identifier(_)) {
        p.bump();
    }
    if p.at(&TokenKind::String) {
        while p.at(&TokenKind::String) {
            p.bump();
        }
    } else {
        p.bump();
    }
    p.finish();
    p.finish();
    Ok(())
}

fn parenthesized(p: &mut Parser<'_>) -> PResult {
    if p.nth_is_subquery(0, &[Keyword::Select]) {
        p.start(MySqlRule::SubqueryExpressionAtom);
        p.bump();
        select_statement(p)?;
    } else {
        p.start(MySqlRule::NestedExpressionAtom);
        p.bump();
        expression(p)?;
        while p.eat(&TokenKind::Comma) {
            expression(p)?;
        }
    }
    p.expect(&TokenKind::RightParen)?;
    p.finish();
    Ok(())
}

/// Lookahead index just past the function call starting at lookahead `n`,
/// or `None` if no call starts there.
pub(super) fn function_extent(p: &Parser<'_>, n: usize) -> Option<usize> {
    if p.nth_keyword(n, Keyword::Case) {
        return p.case_extent(n);
    }
    let niladic = NILADIC_FUNCTIONS.iter().any(|word| p.nth_word(n, word));
    if niladic && !p.nth_at(n + 1, &TokenKind::LeftParen) {
        return Some(n + 1);
    }

    let named = p.nth_is_identifier(n)
        || p.nth(n)
            .as_keyword()
            .is_some_and(|kw| FUNCTION_KEYWORDS.contains(&kw));
    if !named {
        return None;
    }
    let mut open = n + 1;
    if p.nth_at(open, &TokenKind::Dot) && p.nth_is_name_part(open + 1) {
        open += 2;
    }
    let mut end = p.matching_paren(open)? + 1;

    if p.nth_word(end, "AGAINST") {
        end = p.matching_paren(end + 1)? + 1;
    }
    if p.nth_keyword(end, Keyword::Over) {
        end = if p.nth_at(end + 1, &TokenKind::LeftParen) {
            p.matching_paren(end + 1)? + 1
        } else {
            end + 2
        };
    }
    Some(end)
}

/// Parses a `FunctionCall` node. The argument list, `CASE` bodies and
/// `OVER` windows are kept as balanced token runs.
pub(super) fn function_call(p: &mut Parser<'_>) -> PResult {
    p.start(MySqlRule::FunctionCall);
    if p.at_keyword(Keyword::Case) {
        p.bump_case()?;
        p.finish();
        return Ok(());
    }
    p.bump();
    if !p.at(&TokenKind::LeftParen) && !p.at(&TokenKind::Dot) {
        p.finish();
        return Ok(());
    }
    if p.eat(&TokenKind::Dot) {
        p.bump();
    }
    p.bump_group()?;
    if p.at_word("AGAINST") {
        p.bump();
        p.bump_group()?;
    }
    if p.at_keyword(Keyword::Over) {
        p.start(MySqlRule::OverClause);
        p.bump();
        if p.at(&TokenKind::LeftParen) {
            p.bump_group()?;
        } else {
            p.expect_identifier()?;
        }
        p.finish();
    }
    p.finish();
    Ok(())
}

/// `uid ('.' dottedId){0,2}`.
pub(super) fn full_column_name(p: &mut Parser<'_>) -> PResult {
    p.start(MySqlRule::FullColumnName);
    p.expect_identifier()?;
    let mut parts = 1;
    while parts < 3 && p.at(&TokenKind::Dot) && p.nth_is_name_part(1) {
        p.bump_n(2);
        parts += 1;
    }
    p.finish();
    Ok(())
}
