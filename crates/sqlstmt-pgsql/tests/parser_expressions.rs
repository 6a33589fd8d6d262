//! Tests for WHERE expressions, predicates and atoms.

mod common;
use common::*;

use rstest::rstest;
use sqlstmt_core::ast::{Expr, ExprAtom, InSource, LogicalOperator, Predicate};

#[test]
fn binary_comparison() {
    let Predicate::BinaryComparison(cmp) = parse_predicate("SELECT 1 FROM t WHERE t.a >= 10") else {
        panic!("expected comparison");
    };
    assert_eq!(cmp.operator, ">=");
    let Predicate::ExprAtom(left) = cmp.left.as_ref() else {
        panic!("expected atom on the left");
    };
    let ExprAtom::Column(column) = &left.atom else {
        panic!("expected column");
    };
    assert_eq!(column.owner.as_deref(), Some("t"));
    assert_eq!(column.identifier, "a");
    let Predicate::ExprAtom(right) = cmp.right.as_ref() else {
        panic!("expected atom on the right");
    };
    let ExprAtom::Constant(constant) = &right.atom else {
        panic!("expected constant");
    };
    assert_eq!(constant.constant.value, "10");
}

#[rstest]
#[case("=")]
#[case("<>")]
#[case("!=")]
#[case("<")]
#[case("<=")]
#[case(">")]
#[case(">=")]
fn comparison_operators(#[case] op: &str) {
    let sql = format!("SELECT 1 FROM t WHERE a {op} b");
    let Predicate::BinaryComparison(cmp) = parse_predicate(&sql) else {
        panic!("expected comparison for {sql}");
    };
    assert_eq!(cmp.operator, op);
}

#[rstest]
#[case("a = 1 AND b = 2", LogicalOperator::And)]
#[case("a = 1 or b = 2", LogicalOperator::Or)]
fn logical_operators(#[case] condition: &str, #[case] operator: LogicalOperator) {
    let Expr::Logical(logical) = parse_where(&format!("SELECT 1 FROM t WHERE {condition}")) else {
        panic!("expected logical expression for {condition}");
    };
    assert_eq!(logical.operator, operator);
    assert_eq!(logical.exprs.len(), 2);
}

#[test]
fn and_binds_tighter_than_or() {
    let Expr::Logical(or) = parse_where("SELECT 1 FROM t WHERE a = 1 OR b = 2 AND c = 3") else {
        panic!("expected logical expression");
    };
    assert_eq!(or.operator, LogicalOperator::Or);
    let Expr::Logical(and) = &or.exprs[1] else {
        panic!("expected AND on the right");
    };
    assert_eq!(and.operator, LogicalOperator::And);
    assert_eq!(and.node.text, "b = 2 AND c = 3");
}

#[test]
fn pipes_concatenate_instead_of_or() {
    let Predicate::BinaryComparison(cmp) = parse_predicate("SELECT 1 FROM t WHERE a || b = 'xy'")
    else {
        panic!("expected comparison");
    };
    assert!(matches!(
        cmp.left.as_ref(),
        Predicate::ExprAtom(atom) if matches!(atom.atom, ExprAtom::Unstructured(_))
    ));
}

#[test]
fn in_list() {
    let Predicate::In(in_pred) = parse_predicate("SELECT 1 FROM t WHERE a NOT IN (1, 2, 3)") else {
        panic!("expected IN predicate");
    };
    assert!(in_pred.negated);
    let InSource::Exprs(exprs) = &in_pred.source else {
        panic!("expected expression list");
    };
    assert_eq!(exprs.len(), 3);
}

#[test]
fn in_subquery() {
    let Predicate::In(in_pred) =
        parse_predicate("SELECT 1 FROM t WHERE a IN (SELECT b FROM u UNION SELECT c FROM v)")
    else {
        panic!("expected IN predicate");
    };
    assert!(!in_pred.negated);
    assert!(matches!(in_pred.source, InSource::Select(_)));
}

#[test]
fn parenthesized_select_in_value_list() {
    let Predicate::In(in_pred) =
        parse_predicate("SELECT 1 FROM t WHERE a IN ((SELECT 1), 2)")
    else {
        panic!("expected IN predicate");
    };
    let InSource::Exprs(exprs) = &in_pred.source else {
        panic!("expected expression list");
    };
    assert_eq!(exprs.len(), 2);
}

#[rstest]
#[case("a IS NULL")]
#[case("a IS NOT NULL")]
#[case("a ISNULL")]
#[case("a IS DISTINCT FROM b")]
#[case("a IS NOT TRUE")]
#[case("a BETWEEN 1 AND 2")]
#[case("a NOT BETWEEN SYMMETRIC 2 AND 1")]
#[case("a LIKE 'x%'")]
#[case("a NOT ILIKE 'x%' ESCAPE '!'")]
#[case("a SIMILAR TO 'x'")]
#[case("a = ANY (ARRAY[1, 2])")]
#[case("a > ALL (SELECT b FROM u)")]
fn other_predicates_stay_unstructured(#[case] condition: &str) {
    let predicate = parse_predicate(&format!("SELECT 1 FROM t WHERE {condition}"));
    assert!(
        matches!(predicate, Predicate::Unstructured(_)),
        "{condition}: {predicate:?}"
    );
}

#[rstest]
#[case("a @> b", "@>")]
#[case("a ~* 'x'", "~*")]
#[case("data ->> 'k'", "->>")]
#[case("ts AT TIME ZONE 'UTC'", "AT TIME ZONE")]
#[case("a::int", "::")]
#[case("arr[1]", "[")]
#[case("-a", "-")]
#[case("EXISTS (SELECT 1)", "EXISTS")]
#[case("(a, b)", ",")]
#[case("ROW(1, 2)", "ROW")]
#[case("f(a)", "(")]
#[case("$1", "$1")]
fn non_column_atoms_stay_unstructured(#[case] operand: &str, #[case] fragment: &str) {
    let Predicate::ExprAtom(atom) = parse_predicate(&format!("SELECT 1 FROM t WHERE {operand}"))
    else {
        panic!("expected bare atom for {operand}");
    };
    let ExprAtom::Unstructured(raw) = &atom.atom else {
        panic!("expected unstructured atom for {operand}, got {:?}", atom.atom);
    };
    assert_eq!(raw.node.text, operand);
    assert!(raw.node.text.contains(fragment));
}

#[rstest]
#[case("'text'")]
#[case("E'esc\\n'")]
#[case("$$dollar$$")]
#[case("1.5e3")]
#[case("NULL")]
#[case("TRUE")]
#[case("-42")]
#[case("DATE '2024-01-01'")]
#[case("INTERVAL '1' DAY")]
fn constants(#[case] literal: &str) {
    let Predicate::ExprAtom(atom) = parse_predicate(&format!("SELECT 1 FROM t WHERE {literal}"))
    else {
        panic!("expected atom for {literal}");
    };
    let ExprAtom::Constant(constant) = &atom.atom else {
        panic!("expected constant for {literal}, got {:?}", atom.atom);
    };
    assert_eq!(constant.constant.value, literal);
}

#[test]
fn not_stays_unstructured() {
    let expr = parse_where("SELECT 1 FROM t WHERE NOT a = 1");
    assert!(matches!(expr, Expr::Unstructured(_)));
}

#[test]
fn typecast_binds_tighter_than_comparison() {
    let Predicate::BinaryComparison(cmp) =
        parse_predicate("SELECT 1 FROM t WHERE a::date = '2024-01-01'::date")
    else {
        panic!("expected comparison");
    };
    assert_eq!(cmp.left.node().text, "a::date");
    assert_eq!(cmp.right.node().text, "'2024-01-01'::date");
}

#[test]
fn long_connective_chains_stay_flat() {
    let terms: Vec<_> = (0..5000).map(|i| format!("id = {i}")).collect();
    let Expr::Logical(or) = parse_where(&format!("SELECT * FROM t WHERE {}", terms.join(" OR ")))
    else {
        panic!("expected logical expression");
    };
    assert_eq!(or.operator, LogicalOperator::Or);
    assert_eq!(or.exprs.len(), 5000);
    assert!(matches!(or.exprs[4999], Expr::Predicate(_)));
}

#[test]
fn long_mixed_connective_chain() {
    let terms: Vec<_> = (0..3000).map(|i| format!("a = {i} AND b <> {i}")).collect();
    let Expr::Logical(or) = parse_where(&format!("SELECT * FROM t WHERE {}", terms.join(" OR ")))
    else {
        panic!("expected logical expression");
    };
    assert_eq!(or.exprs.len(), 3000);
    let Expr::Logical(and) = &or.exprs[1234] else {
        panic!("expected AND operand");
    };
    assert_eq!(and.operator, LogicalOperator::And);
    assert_eq!(and.node.text, "a = 1234 AND b <> 1234");
}

#[test]
fn long_arithmetic_chain() {
    let sql = format!("SELECT * FROM t WHERE a = 0{}", " + 1 - 2".repeat(10000));
    let Predicate::BinaryComparison(cmp) = parse_predicate(&sql) else {
        panic!("expected comparison");
    };
    assert!(cmp.right.node().text.ends_with("+ 1 - 2"));
}
