//! Tests for simple selects: target lists, FROM items, joins and limits.

mod common;
use common::*;

use rstest::rstest;
use sqlstmt_core::ast::{
    JoinPart, JoinSide, JoinSpec, SelectElement, TableSource, TableSourceBase, TableSourceItem,
};

fn sources(sql: &str) -> Vec<TableSourceBase> {
    parse_query(sql)
        .from
        .unwrap_or_else(|| panic!("Expected FROM in: {sql}"))
        .sources
        .into_iter()
        .map(|source| match source {
            TableSource::Base(base) => base,
            other => panic!("Expected table source base, got {other:?}"),
        })
        .collect()
}

fn base(sql: &str) -> TableSourceBase {
    sources(sql).remove(0)
}

fn element_kinds(sql: &str) -> Vec<&'static str> {
    parse_query(sql)
        .select_elements
        .elements
        .iter()
        .map(|element| match element {
            SelectElement::Star(_) => "star",
            SelectElement::Column(_) => "column",
            SelectElement::Function(_) => "function",
            SelectElement::Expression(_) => "expression",
        })
        .collect()
}

#[test]
fn columns_keep_source_order_and_qualification() {
    let q = parse_query("SELECT s.t.col, t.col, col FROM s.t");
    let columns: Vec<_> = q
        .select_elements
        .elements
        .iter()
        .map(|element| match element {
            SelectElement::Column(c) => c.column.clone(),
            other => panic!("Expected column, got {other:?}"),
        })
        .collect();
    assert_eq!(columns[0].owner.as_deref(), Some("s"));
    assert_eq!(columns[0].identifier, "t");
    assert_eq!(columns[0].nested_object_attrs, vec!["col"]);
    assert_eq!(columns[1].owner.as_deref(), Some("t"));
    assert_eq!(columns[1].identifier, "col");
    assert_eq!(columns[2].owner, None);
    assert_eq!(columns[2].identifier, "col");
}

#[rstest]
#[case("SELECT a FROM t", vec!["column"])]
#[case("SELECT t.* FROM t", vec!["star"])]
#[case("SELECT a, * FROM t", vec!["column", "star"])]
#[case("SELECT lower(a) FROM t", vec!["function"])]
#[case("SELECT pg_catalog.now()", vec!["function"])]
#[case("SELECT count(*) OVER (PARTITION BY a) FROM t", vec!["function"])]
#[case("SELECT CURRENT_DATE", vec!["function"])]
#[case("SELECT a::text FROM t", vec!["expression"])]
#[case("SELECT a || b FROM t", vec!["expression"])]
#[case("SELECT 1, 'x', $1", vec!["expression", "expression", "expression"])]
#[case("SELECT (a).f FROM t", vec!["expression"])]
#[case("SELECT CASE WHEN a THEN 1 END FROM t", vec!["expression"])]
#[case("SELECT a = 1 FROM t", vec!["expression"])]
fn target_entries_are_classified_by_shape(#[case] sql: &str, #[case] expected: Vec<&str>) {
    assert_eq!(element_kinds(sql), expected, "{sql}");
}

#[test]
fn bare_star_sets_the_flag_only() {
    let q = parse_query("SELECT * FROM t");
    assert!(q.select_elements.star);
    assert!(q.select_elements.elements.is_empty());
    assert!(!parse_query("SELECT a FROM t").select_elements.star);
}

#[test]
fn aliases_with_and_without_as() {
    let q = parse_query(r#"SELECT a AS x, b y, c AS "Mixed" FROM t"#);
    let aliases: Vec<_> = q
        .select_elements
        .elements
        .iter()
        .map(|element| match element {
            SelectElement::Column(c) => c.alias.clone(),
            other => panic!("Expected column, got {other:?}"),
        })
        .collect();
    assert_eq!(
        aliases,
        vec![Some("x".to_string()), Some("y".to_string()), Some("Mixed".to_string())]
    );
}

#[test]
fn distinct_and_distinct_on() {
    assert!(parse_query("SELECT DISTINCT a FROM t").distinct);
    assert!(parse_query("SELECT DISTINCT ON (a) a, b FROM t").distinct);
    assert!(!parse_query("SELECT ALL a FROM t").distinct);
}

#[test]
fn relation_with_schema_and_alias() {
    let b = base("SELECT 1 FROM ONLY public.users AS u");
    let TableSourceItem::Atom(atom) = &b.item else {
        panic!("expected atom, got {:?}", b.item);
    };
    assert_eq!(atom.table_name.owner.as_deref(), Some("public"));
    assert_eq!(atom.table_name.identifier, "users");
    assert_eq!(atom.alias.as_deref(), Some("u"));
    assert_eq!(atom.table_name.node.text, "public.users");
}

#[test]
fn quoted_relation_names_are_unquoted() {
    let b = base(r#"SELECT 1 FROM "My Schema"."Orders" o"#);
    let TableSourceItem::Atom(atom) = &b.item else {
        panic!("expected atom");
    };
    assert_eq!(atom.table_name.owner.as_deref(), Some("My Schema"));
    assert_eq!(atom.table_name.identifier, "Orders");
}

#[test]
fn comma_separated_sources() {
    assert_eq!(sources("SELECT 1 FROM a, b AS x, c").len(), 3);
}

#[test]
fn join_kinds_and_conditions() {
    let b = base(
        "SELECT 1 FROM a JOIN b ON a.id = b.id LEFT OUTER JOIN c USING (id, k) \
         RIGHT JOIN d ON true FULL JOIN e ON false CROSS JOIN f NATURAL LEFT JOIN g",
    );
    assert_eq!(b.joins.len(), 6);

    let JoinPart::Inner(inner) = &b.joins[0] else {
        panic!("expected inner join");
    };
    assert!(matches!(inner.condition, Some(JoinSpec::On { .. })));

    let sides: Vec<_> = b
        .joins
        .iter()
        .filter_map(|join| match join {
            JoinPart::Outer(outer) => Some(outer.side),
            _ => None,
        })
        .collect();
    assert_eq!(sides, vec![JoinSide::Left, JoinSide::Right, JoinSide::Full]);

    let JoinPart::Outer(left) = &b.joins[1] else {
        panic!("expected outer join");
    };
    let Some(JoinSpec::Using { columns, .. }) = &left.condition else {
        panic!("expected USING");
    };
    assert_eq!(columns, &vec!["id".to_string(), "k".to_string()]);

    let JoinPart::Inner(cross) = &b.joins[4] else {
        panic!("expected cross join as inner");
    };
    assert!(cross.condition.is_none());

    let JoinPart::Natural(natural) = &b.joins[5] else {
        panic!("expected natural join");
    };
    assert_eq!(natural.side, Some(JoinSide::Left));
}

#[test]
fn subquery_and_lateral_items() {
    let items = sources("SELECT 1 FROM (SELECT a FROM t) s, LATERAL (SELECT s.a) AS l");
    let TableSourceItem::Subquery(plain) = &items[0].item else {
        panic!("expected subquery");
    };
    assert!(!plain.lateral);
    assert_eq!(plain.alias.as_deref(), Some("s"));
    let TableSourceItem::Subquery(lateral) = &items[1].item else {
        panic!("expected lateral subquery");
    };
    assert!(lateral.lateral);
    assert_eq!(lateral.alias.as_deref(), Some("l"));
}

#[test]
fn parenthesized_join_is_nested() {
    let b = base("SELECT 1 FROM (a JOIN b ON a.id = b.id) JOIN c ON true");
    let TableSourceItem::Nested(nested) = &b.item else {
        panic!("expected nested sources");
    };
    assert_eq!(nested.sources.len(), 1);
    assert_eq!(b.joins.len(), 1);
}

#[rstest]
#[case("SELECT 1 FROM generate_series(1, 10) AS g(n)")]
#[case("SELECT 1 FROM unnest(ARRAY[1, 2]) WITH ORDINALITY u")]
#[case("SELECT 1 FROM (VALUES (1, 2)) AS v(a, b)")]
fn function_and_values_items_stay_unstructured(#[case] sql: &str) {
    assert!(matches!(base(sql).item, TableSourceItem::Unstructured(_)), "{sql}");
}

#[rstest]
#[case("SELECT 1 FROM t LIMIT 5", Some(5), None)]
#[case("SELECT 1 FROM t LIMIT 5 OFFSET 10", Some(5), Some(10))]
#[case("SELECT 1 FROM t OFFSET 10 LIMIT 5", Some(5), Some(10))]
#[case("SELECT 1 FROM t LIMIT ALL", None, None)]
#[case("SELECT 1 FROM t OFFSET 3 ROWS", None, Some(3))]
#[case("SELECT 1 FROM t FETCH FIRST 7 ROWS ONLY", Some(7), None)]
#[case("SELECT 1 FROM t FETCH FIRST ROW ONLY", Some(1), None)]
#[case("SELECT 1 FROM t LIMIT $1", None, None)]
fn limit_forms(#[case] sql: &str, #[case] row_count: Option<u64>, #[case] offset: Option<u64>) {
    let limit = parse_query(sql).limit.unwrap();
    assert_eq!((limit.row_count, limit.offset), (row_count, offset), "{sql}");
}

#[test]
fn clauses_are_recorded() {
    let q = parse_query(
        "SELECT a, count(*) FROM t WHERE b > 1 GROUP BY a HAVING count(*) > 2 \
         ORDER BY a DESC NULLS LAST",
    );
    assert!(q.where_clause.is_some());
    assert_eq!(q.group_by.unwrap().node.text, "GROUP BY a");
    assert!(q.having.is_some());
    assert_eq!(q.order_by.unwrap().node.text, "ORDER BY a DESC NULLS LAST");
}

#[test]
fn locking_clause_is_kept() {
    let select = parse_select("SELECT * FROM t WHERE id = 1 FOR UPDATE SKIP LOCKED");
    assert_eq!(select.lock.unwrap().node.text, "FOR UPDATE SKIP LOCKED");
}

#[test]
fn select_without_from() {
    let q = parse_query("SELECT 1 + 1");
    assert!(q.from.is_none());
    assert!(q.where_clause.is_none());
}
