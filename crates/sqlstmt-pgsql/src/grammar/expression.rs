//! `a_expr`: boolean connectives, predicates and operands.

use sqlstmt_core::cst::Checkpoint;
use sqlstmt_core::{Keyword, TokenKind};

use super::precedence::{
    atom_binding_power, is_comparison, logical_binding_power, AtomOp, PredicateOp,
    AT_TIME_ZONE_BINDING_POWER, COLLATE_BINDING_POWER, NOT_BINDING_POWER, UNARY_BINDING_POWER,
};
use super::select::select_statement;
use super::{PResult, Parser, PgRule};

/// Reserved words that still name functions when followed by `(`.
const FUNCTION_KEYWORDS: &[Keyword] = &[Keyword::Left, Keyword::Right, Keyword::Cast];

/// SQL-standard functions written without parentheses.
const NILADIC_FUNCTIONS: &[&str] = &[
    "CURRENT_DATE",
    "CURRENT_TIME",
    "CURRENT_TIMESTAMP",
    "CURRENT_USER",
    "CURRENT_ROLE",
    "CURRENT_SCHEMA",
    "CURRENT_CATALOG",
    "SESSION_USER",
    "LOCALTIME",
    "LOCALTIMESTAMP",
    "USER",
];

const INTERVAL_FIELDS: &[&str] = &["YEAR", "MONTH", "DAY", "HOUR", "MINUTE", "SECOND"];

/// Parses a full `a_expr`.
pub(super) fn a_expr(p: &mut Parser<'_>) -> PResult {
    logical(p, 0)
}

/// `a_expr (',' a_expr)*` without a wrapping node.
pub(super) fn expr_list(p: &mut Parser<'_>) -> PResult {
    a_expr(p)?;
    while p.eat(&TokenKind::Comma) {
        a_expr(p)?;
    }
    Ok(())
}

fn logical(p: &mut Parser<'_>, min_bp: u8) -> PResult {
    p.enter()?;
    let checkpoint = p.checkpoint();

    if p.at_keyword(Keyword::Not) {
        p.start(PgRule::AExprNot);
        p.bump();
        logical(p, NOT_BINDING_POWER)?;
        p.finish();
    } else {
        p.start(PgRule::AExprPredicate);
        predicate(p, 0)?;
        p.finish();
    }

    // `a AND b AND c` is one AExprAnd with three operands.
    let mut open = None;
    while let Some((l_bp, r_bp)) = logical_binding_power(p.kind()) {
        if l_bp < min_bp {
            break;
        }
        let rule = if p.at_keyword(Keyword::Or) {
            PgRule::AExprOr
        } else {
            PgRule::AExprAnd
        };
        if open != Some(rule) {
            if open.is_some() {
                p.finish();
            }
            p.start_at(checkpoint, rule);
            open = Some(rule);
        }
        p.bump();
        logical(p, r_bp)?;
    }
    if open.is_some() {
        p.finish();
    }

    p.exit();
    Ok(())
}

fn predicate_op(p: &Parser<'_>) -> Option<PredicateOp> {
    let negatable = usize::from(p.at_keyword(Keyword::Not));
    match p.nth(negatable).as_keyword() {
        Some(Keyword::In) => return Some(PredicateOp::In),
        Some(Keyword::Between) => return Some(PredicateOp::Between),
        Some(Keyword::Like | Keyword::Ilike) => return Some(PredicateOp::Like),
        Some(Keyword::Similar) if p.nth_keyword(negatable + 1, Keyword::To) => {
            return Some(PredicateOp::Like);
        }
        _ if negatable == 1 => return None,
        _ => {}
    }
    if p.at_keyword(Keyword::Is) || p.at_word("ISNULL") || p.at_word("NOTNULL") {
        return Some(PredicateOp::Is);
    }
    is_comparison(p.kind()).then_some(PredicateOp::Comparison)
}

/// Parses a predicate whose operators bind at least as tight as `min_bp`.
fn predicate(p: &mut Parser<'_>, min_bp: u8) -> PResult {
    p.enter()?;
    let checkpoint = p.checkpoint();

    p.start(PgRule::AExprPrimary);
    operand(p, 0)?;
    p.finish();

    let mut wraps = 0;
    while let Some(op) = predicate_op(p) {
        let bp = op.binding_power();
        if bp < min_bp {
            break;
        }
        // Each operator nests the predicate built so far one level deeper.
        p.enter()?;
        wraps += 1;
        match op {
            PredicateOp::In => {
                p.start_at(checkpoint, PgRule::AExprIn);
                p.eat_keyword(Keyword::Not);
                p.bump();
                p.expect(&TokenKind::LeftParen)?;
                if at_in_subquery(p) {
                    select_statement(p)?;
                } else {
                    p.start(PgRule::InList);
                    expr_list(p)?;
                    p.finish();
                }
                p.expect(&TokenKind::RightParen)?;
            }
            PredicateOp::Is => is_test(p, checkpoint, bp)?,
            PredicateOp::Comparison => {
                let quantified = p
                    .nth(1)
                    .as_keyword()
                    .is_some_and(|kw| matches!(kw, Keyword::All | Keyword::Any | Keyword::Some))
                    && p.nth_at(2, &TokenKind::LeftParen);
                if quantified {
                    p.start_at(checkpoint, PgRule::AExprSubqueryCompare);
                    compare_op(p);
                    p.bump();
                    if p.nth_is_subquery(0, &[Keyword::Select]) {
                        p.bump();
                        select_statement(p)?;
                    } else {
                        p.bump();
                        a_expr(p)?;
                    }
                    p.expect(&TokenKind::RightParen)?;
                } else {
                    p.start_at(checkpoint, PgRule::AExprCompare);
                    compare_op(p);
                    predicate(p, bp + 1)?;
                }
            }
            PredicateOp::Between => {
                p.start_at(checkpoint, PgRule::AExprBetween);
                p.eat_keyword(Keyword::Not);
                p.bump();
                if !p.eat_word("SYMMETRIC") {
                    p.eat_word("ASYMMETRIC");
                }
                predicate(p, bp + 1)?;
                p.expect_keyword(Keyword::And)?;
                predicate(p, bp + 1)?;
            }
            PredicateOp::Like => {
                p.start_at(checkpoint, PgRule::AExprLike);
                p.eat_keyword(Keyword::Not);
                p.eat_keyword(Keyword::Similar);
                p.bump();
                predicate(p, bp + 1)?;
                if p.eat_keyword(Keyword::Escape) {
                    predicate(p, bp + 1)?;
                }
            }
        }
        p.finish();
    }

    for _ in 0..=wraps {
        p.exit();
    }
    Ok(())
}

/// `ISNULL`, `NOTNULL`, or `IS [NOT] NULL|TRUE|FALSE|UNKNOWN|DISTINCT FROM x`.
fn is_test(p: &mut Parser<'_>, checkpoint: Checkpoint, bp: u8) -> PResult {
    if !p.at_keyword(Keyword::Is) {
        p.start_at(checkpoint, PgRule::AExprIsNull);
        p.bump();
        return Ok(());
    }
    let n = if p.nth_keyword(1, Keyword::Not) { 2 } else { 1 };
    if p.nth_keyword(n, Keyword::Null) {
        p.start_at(checkpoint, PgRule::AExprIsNull);
        p.bump_n(n + 1);
        return Ok(());
    }
    p.start_at(checkpoint, PgRule::AExprIs);
    p.bump_n(n);
    if p.at_any_keyword(&[Keyword::True, Keyword::False]) || p.at_word("UNKNOWN") {
        p.bump();
    } else if p.eat_keyword(Keyword::Distinct) {
        p.expect_keyword(Keyword::From)?;
        predicate(p, bp + 1)?;
    } else {
        return Err(p.unexpected("NULL, TRUE, FALSE, UNKNOWN or DISTINCT FROM"));
    }
    Ok(())
}

fn compare_op(p: &mut Parser<'_>) {
    p.start(PgRule::CompareOp);
    p.bump();
    p.finish();
}

/// After `IN (`: a subquery, unless a parenthesized select only opens a
/// value list.
fn at_in_subquery(p: &Parser<'_>) -> bool {
    if p.at_keyword(Keyword::Select) {
        return true;
    }
    p.nth_is_subquery(0, &[Keyword::Select])
        && p
            .matching_paren(0)
            .is_some_and(|close| !p.nth_at(close + 1, &TokenKind::Comma))
}

/// Parses an operand and the operators binding at least as tight as
/// `min_bp`. Subscripts, field selection and `::` casts always apply.
fn operand(p: &mut Parser<'_>, min_bp: u8) -> PResult {
    p.enter()?;
    let checkpoint = p.checkpoint();
    primary(p)?;

    // Postfix forms nest one level per application. Infix operators of one
    // precedence level chain inside a single node.
    let mut wraps = 0;
    let mut open: Option<(PgRule, u8)> = None;
    loop {
        let postfix = match p.kind() {
            TokenKind::DoubleColon => Some(PgRule::AExprTypecast),
            TokenKind::LeftBracket => Some(PgRule::CExprIndirection),
            TokenKind::Dot if p.nth_is_name_part(1) || p.nth_at(1, &TokenKind::Star) => {
                Some(PgRule::CExprIndirection)
            }
            _ if p.at_keyword(Keyword::Collate) && COLLATE_BINDING_POWER >= min_bp => {
                Some(PgRule::AExprCollate)
            }
            _ if p.at_word("AT")
                && p.nth_word(1, "TIME")
                && p.nth_word(2, "ZONE")
                && AT_TIME_ZONE_BINDING_POWER >= min_bp =>
            {
                Some(PgRule::AExprAtTimeZone)
            }
            _ => None,
        };
        if let Some(rule) = postfix {
            if open.take().is_some() {
                p.finish();
            }
            p.enter()?;
            wraps += 1;
            p.start_at(checkpoint, rule);
            match rule {
                PgRule::AExprTypecast => {
                    p.bump();
                    typename(p)?;
                }
                PgRule::AExprCollate => {
                    p.bump();
                    any_name(p, "collation name")?;
                }
                PgRule::AExprAtTimeZone => {
                    p.bump_n(3);
                    operand(p, AT_TIME_ZONE_BINDING_POWER + 1)?;
                }
                _ if p.at(&TokenKind::LeftBracket) => p.bump_group()?,
                _ => p.bump_n(2),
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
            AtomOp::Qual => PgRule::AExprQualOp,
            AtomOp::Math => PgRule::AExprMath,
        };
        if open != Some((rule, l_bp)) {
            if open.is_some() {
                p.finish();
            }
            p.start_at(checkpoint, rule);
            open = Some((rule, l_bp));
        }
        p.bump();
        operand(p, r_bp)?;
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
        TokenKind::Keyword(Keyword::Interval) if p.nth_at(1, &TokenKind::String) => constant(p),
        TokenKind::Identifier(_) if p.nth_at(1, &TokenKind::String) => constant(p),
        TokenKind::Minus | TokenKind::Plus | TokenKind::BitNot | TokenKind::Operator => {
            p.start(PgRule::AExprUnary);
            p.bump();
            operand(p, UNARY_BINDING_POWER)?;
            p.finish();
            Ok(())
        }
        TokenKind::Parameter => {
            p.start(PgRule::ParamRef);
            p.bump();
            p.finish();
            Ok(())
        }
        TokenKind::LeftParen => parenthesized(p),
        TokenKind::Keyword(Keyword::Row) if p.nth_at(1, &TokenKind::LeftParen) => {
            p.start(PgRule::CExprRow);
            p.bump_n(2);
            if !p.at(&TokenKind::RightParen) {
                expr_list(p)?;
            }
            p.expect(&TokenKind::RightParen)?;
            p.finish();
            Ok(())
        }
        TokenKind::Keyword(Keyword::Array)
            if p.nth_at(1, &TokenKind::LeftBracket) || p.nth_at(1, &TokenKind::LeftParen) =>
        {
            p.start(PgRule::CExprArray);
            p.bump();
            p.bump_group()?;
            p.finish();
            Ok(())
        }
        TokenKind::Keyword(Keyword::Exists) => {
            p.start(PgRule::CExprExists);
            p.bump();
            p.expect(&TokenKind::LeftParen)?;
            select_statement(p)?;
            p.expect(&TokenKind::RightParen)?;
            p.finish();
            Ok(())
        }
        TokenKind::Keyword(Keyword::Case) => {
            p.start(PgRule::CaseExpr);
            p.bump_case()?;
            p.finish();
            Ok(())
        }
        _ if at_niladic_function(p) => {
            p.start(PgRule::FuncExpr);
            p.bump();
            p.finish();
            Ok(())
        }
        _ if function_open_paren(p, 0).is_some() => func_expr(p),
        _ if p.at_identifier() => columnref(p),
        _ => Err(p.unexpected("expression")),
    }
}

/// A literal: number, string, bit or hex string, boolean, `NULL`, a signed
/// number, `type 'text'` or `INTERVAL 'text' [fields]`.
fn constant(p: &mut Parser<'_>) -> PResult {
    p.start(PgRule::AexprConst);
    if p.at_keyword(Keyword::Interval) {
        p.bump_n(2);
        while INTERVAL_FIELDS.iter().any(|field| p.at_word(field))
            || (p.at_keyword(Keyword::To)
                && INTERVAL_FIELDS.iter().any(|field| p.nth_word(1, field)))
        {
            p.bump();
        }
        p.finish();
        return Ok(());
    }
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
    Ok(())
}

fn parenthesized(p: &mut Parser<'_>) -> PResult {
    if p.nth_is_subquery(0, &[Keyword::Select]) {
        p.start(PgRule::CExprSubquery);
        p.bump();
        select_statement(p)?;
        p.expect(&TokenKind::RightParen)?;
    } else if p.nth_keyword(1, Keyword::With) || p.nth_keyword(1, Keyword::Values) {
        p.start(PgRule::CExprSubquery);
        p.bump_group()?;
    } else {
        p.start(PgRule::CExprNested);
        p.bump();
        expr_list(p)?;
        p.expect(&TokenKind::RightParen)?;
    }
    p.finish();
    Ok(())
}

fn at_niladic_function(p: &Parser<'_>) -> bool {
    NILADIC_FUNCTIONS.iter().any(|word| p.at_word(word))
        && !p.nth_at(1, &TokenKind::LeftParen)
        && !p.nth_at(1, &TokenKind::Dot)
}

/// Lookahead index of the `(` after a possibly qualified function name
/// starting at `n`, or `None` if no call starts there.
pub(super) fn function_open_paren(p: &Parser<'_>, n: usize) -> Option<usize> {
    let named = p.nth_is_identifier(n)
        || p.nth(n)
            .as_keyword()
            .is_some_and(|kw| FUNCTION_KEYWORDS.contains(&kw));
    if !named {
        return None;
    }
    let mut open = n + 1;
    while p.nth_at(open, &TokenKind::Dot) && p.nth_is_name_part(open + 1) {
        open += 2;
    }
    p.nth_at(open, &TokenKind::LeftParen).then_some(open)
}

/// `func_name '(' ... ')' [WITHIN GROUP (...)] [FILTER (...)] [OVER ...]`.
/// The argument list is kept as a balanced token run.
fn func_expr(p: &mut Parser<'_>) -> PResult {
    p.start(PgRule::FuncExpr);
    p.bump();
    while p.at(&TokenKind::Dot) {
        p.bump_n(2);
    }
    p.bump_group()?;
    if p.at_word("WITHIN") && p.nth_keyword(1, Keyword::Group) {
        p.bump_n(2);
        p.bump_group()?;
    }
    if p.at_word("FILTER") && p.nth_at(1, &TokenKind::LeftParen) {
        p.bump();
        p.bump_group()?;
    }
    if p.at_keyword(Keyword::Over) {
        p.start(PgRule::OverClause);
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

/// `ColId ('.' attr_name)* ('.' '*')?`.
pub(super) fn columnref(p: &mut Parser<'_>) -> PResult {
    p.start(PgRule::Columnref);
    p.expect_identifier()?;
    while p.at(&TokenKind::Dot) {
        if p.nth_at(1, &TokenKind::Star) {
            p.bump_n(2);
            break;
        }
        if !p.nth_is_name_part(1) {
            break;
        }
        p.bump_n(2);
    }
    p.finish();
    Ok(())
}

/// A dotted name such as a collation or operator class.
fn any_name(p: &mut Parser<'_>, expected: &str) -> PResult {
    if !p.nth_is_name_part(0) {
        return Err(p.unexpected(expected));
    }
    p.bump();
    while p.at(&TokenKind::Dot) && p.nth_is_name_part(1) {
        p.bump_n(2);
    }
    Ok(())
}

/// The target type of a `::` cast, including multi-word names, modifiers
/// and array bounds.
fn typename(p: &mut Parser<'_>) -> PResult {
    p.start(PgRule::Typename);
    if p.at_word("DOUBLE") && p.nth_word(1, "PRECISION") {
        p.bump_n(2);
    } else if (p.at_word("CHARACTER") || p.at_word("CHAR")) && p.nth_word(1, "VARYING") {
        p.bump_n(2);
    } else {
        any_name(p, "type name")?;
    }
    if p.at(&TokenKind::LeftParen) {
        p.bump_group()?;
    }
    if (p.at_keyword(Keyword::With) || p.at_word("WITHOUT"))
        && p.nth_word(1, "TIME")
        && p.nth_word(2, "ZONE")
    {
        p.bump_n(3);
    }
    while p.at(&TokenKind::LeftBracket) {
        p.bump_group()?;
    }
    p.finish();
    Ok(())
}

#[cfg(test)]
mod tests {
    use sqlstmt_core::ParseOptions;

    use super::super::parse_tree;

    fn outline(sql: &str) -> String {
        parse_tree(sql, &ParseOptions::default())
            .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e}"))
            .outline(sql)
    }

    fn rules(sql: &str) -> Vec<String> {
        outline(sql)
            .lines()
            .map(|line| line.trim().to_string())
            .collect()
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let lines = rules("SELECT 1 FROM t WHERE a = 1 OR b = 2 AND c = 3");
        let or_at = lines.iter().position(|l| l == "AExprOr").unwrap();
        let and_at = lines.iter().position(|l| l == "AExprAnd").unwrap();
        assert!(or_at < and_at);
    }

    #[test]
    fn test_connective_run_is_one_node() {
        let lines = rules("SELECT 1 FROM t WHERE a = 1 OR b = 2 OR c = 3 OR d = 4");
        assert_eq!(lines.iter().filter(|l| *l == "AExprOr").count(), 1);
        assert_eq!(lines.iter().filter(|l| *l == "OR").count(), 3);
    }

    #[test]
    fn test_same_level_math_is_one_node() {
        let lines = rules("SELECT a || b || c || d");
        assert_eq!(lines.iter().filter(|l| *l == "AExprQualOp").count(), 1);
    }

    #[test]
    fn test_not_in_predicate() {
        let lines = rules("SELECT 1 FROM t WHERE a NOT IN (1, 2)");
        assert!(lines.contains(&"AExprIn".to_string()));
        assert!(lines.contains(&"InList".to_string()));
        assert!(!lines.contains(&"AExprNot".to_string()));
    }

    #[test]
    fn test_math_precedence() {
        let tree = outline("SELECT 1 + 2 * 3");
        let math: Vec<_> = tree
            .lines()
            .filter(|l| l.trim() == "AExprMath")
            .map(|l| l.len() - l.trim_start().len())
            .collect();
        assert_eq!(math.len(), 2);
        assert!(math[0] < math[1]);
    }

    #[test]
    fn test_typecast_binds_tighter_than_unary_minus() {
        let tree = outline("SELECT -a::int");
        let unary = tree.lines().position(|l| l.trim() == "AExprUnary").unwrap();
        let cast = tree.lines().position(|l| l.trim() == "AExprTypecast").unwrap();
        assert!(unary < cast);
    }

    #[test]
    fn test_predicate_kinds() {
        for (sql, rule) in [
            ("SELECT 1 FROM t WHERE a BETWEEN SYMMETRIC 1 AND 2", "AExprBetween"),
            ("SELECT 1 FROM t WHERE a ILIKE 'x%'", "AExprLike"),
            ("SELECT 1 FROM t WHERE a NOT SIMILAR TO 'x' ESCAPE '!'", "AExprLike"),
            ("SELECT 1 FROM t WHERE a IS NOT NULL", "AExprIsNull"),
            ("SELECT 1 FROM t WHERE a ISNULL", "AExprIsNull"),
            ("SELECT 1 FROM t WHERE a IS DISTINCT FROM b", "AExprIs"),
            ("SELECT 1 FROM t WHERE a IS UNKNOWN", "AExprIs"),
            ("SELECT 1 FROM t WHERE a = ANY (ARRAY[1, 2])", "AExprSubqueryCompare"),
            ("SELECT 1 FROM t WHERE a > ALL (SELECT b FROM u)", "AExprSubqueryCompare"),
            ("SELECT 1 FROM t WHERE NOT EXISTS (SELECT 1)", "AExprNot"),
        ] {
            assert!(rules(sql).contains(&rule.to_string()), "{sql} lacks {rule}");
        }
    }

    #[test]
    fn test_operand_kinds() {
        for (sql, rule) in [
            ("SELECT -a", "AExprUnary"),
            ("SELECT -1", "AexprConst"),
            ("SELECT date '2024-01-01'", "AexprConst"),
            ("SELECT INTERVAL '1' DAY", "AexprConst"),
            ("SELECT $1", "ParamRef"),
            ("SELECT a || b", "AExprQualOp"),
            ("SELECT j ->> 'k'", "AExprQualOp"),
            ("SELECT tags @> ARRAY['a']", "CExprArray"),
            ("SELECT (a).b", "CExprIndirection"),
            ("SELECT a[1]", "CExprIndirection"),
            ("SELECT x::numeric(10, 2)[]", "Typename"),
            ("SELECT x::double precision", "AExprTypecast"),
            ("SELECT ts AT TIME ZONE 'UTC'", "AExprAtTimeZone"),
            ("SELECT a COLLATE \"C\"", "AExprCollate"),
            ("SELECT ROW(1, 2)", "CExprRow"),
            ("SELECT EXISTS (SELECT 1)", "CExprExists"),
            ("SELECT (SELECT 1) + 1", "CExprSubquery"),
            ("SELECT (1, 2)", "CExprNested"),
            ("SELECT CASE WHEN a THEN 1 END", "CaseExpr"),
            ("SELECT CURRENT_TIMESTAMP", "FuncExpr"),
            ("SELECT pg_catalog.now()", "FuncExpr"),
            ("SELECT count(*) FILTER (WHERE a) OVER w", "OverClause"),
            ("SELECT percentile_cont(0.5) WITHIN GROUP (ORDER BY a)", "FuncExpr"),
        ] {
            assert!(rules(sql).contains(&rule.to_string()), "{sql} lacks {rule}");
        }
    }

    #[test]
    fn test_reserved_word_is_not_an_expression() {
        let err = parse_tree("SELECT FROM t", &ParseOptions::default()).unwrap_err();
        assert_eq!(err.found.as_deref(), Some("FROM"));
        assert_eq!(err.column, 8);
    }
}
