//! Tests for the ranking engine.

use dash_ingest::{RawRecord, normalize};
use dash_model::{ModelError, SortSpec, Table};
use dash_rank::{NO_LIMIT, RankKey, rank, rank_with_key};
use proptest::prelude::*;
use serde_json::{Value as JsonValue, json};

fn table(rows: Vec<(&str, Vec<(&str, JsonValue)>)>) -> Table {
    let records = rows.into_iter().map(|(id, fields)| {
        fields
            .into_iter()
            .fold(RawRecord::new(id), |record, (name, value)| {
                record.with_field(name, value)
            })
    });
    normalize(records).expect("normalize")
}

fn best_sellers_spec() -> SortSpec {
    SortSpec::new()
        .then_numeric_desc("Total Price")
        .then_numeric_desc("Units Sold")
}

#[test]
fn ranks_by_declared_numeric_key() {
    let t = table(vec![
        ("r1", vec![("Product Name", json!("A")), ("Total Price", json!(50))]),
        ("r2", vec![("Product Name", json!("B")), ("Total Price", json!(120))]),
    ]);
    let spec = SortSpec::new().then_numeric_desc("Total Price");

    let ranked = rank(&t, &spec, 10).expect("rank");

    insta::assert_snapshot!(ranked.ids().join(", "), @"r2, r1");
    assert_eq!(ranked.columns(), t.columns());
}

#[test]
fn second_candidate_used_when_first_is_absent() {
    let t = table(vec![
        ("a", vec![("Product Name", json!("A")), ("Units Sold", json!(3))]),
        ("b", vec![("Product Name", json!("B")), ("Units Sold", json!(11))]),
        ("c", vec![("Product Name", json!("C")), ("Units Sold", json!(7))]),
    ]);

    let ranked = rank_with_key(&t, &best_sellers_spec(), 10).expect("rank");

    assert_eq!(ranked.table.ids(), vec!["b", "c", "a"]);
    assert_eq!(ranked.key.column(), Some("Units Sold"));
}

#[test]
fn candidate_missing_on_one_row_is_skipped() {
    let t = table(vec![
        (
            "a",
            vec![
                ("Total Price", json!(900)),
                ("Units Sold", json!(1)),
                ("Discount", json!(50)),
            ],
        ),
        ("b", vec![("Units Sold", json!(5)), ("Discount", json!(10))]),
    ]);

    let ranked = rank_with_key(&t, &best_sellers_spec(), NO_LIMIT).expect("rank");

    assert_eq!(ranked.key.column(), Some("Units Sold"));
    assert_eq!(ranked.table.ids(), vec!["b", "a"]);
}

#[test]
fn numeric_fallback_uses_first_column_numeric_on_every_row() {
    let t = table(vec![
        (
            "a",
            vec![
                ("Operator Name", json!("Sam")),
                ("Shift", json!(1)),
                ("Voided Items", json!(2)),
            ],
        ),
        (
            "b",
            vec![
                ("Operator Name", json!("Kim")),
                ("Shift", json!("late")),
                ("Voided Items", json!(8)),
            ],
        ),
    ]);

    let ranked = rank_with_key(&t, &best_sellers_spec(), NO_LIMIT).expect("rank");

    assert_eq!(ranked.key, RankKey::Fallback("Voided Items".to_string()));
    assert_eq!(ranked.table.ids(), vec!["b", "a"]);
}

#[test]
fn no_usable_key_keeps_input_order() {
    let t = table(vec![
        ("z", vec![("Operator Name", json!("Zed"))]),
        ("a", vec![("Operator Name", json!("Amy"))]),
    ]);

    let ranked = rank_with_key(&t, &best_sellers_spec(), NO_LIMIT).expect("rank");

    assert_eq!(ranked.key, RankKey::Unranked);
    assert_eq!(ranked.table.ids(), vec!["z", "a"]);
}

#[test]
fn disabled_fallback_keeps_input_order() {
    let t = table(vec![
        ("a", vec![("Units Sold", json!(1))]),
        ("b", vec![("Units Sold", json!(2))]),
    ]);
    let spec = SortSpec::new().then_numeric_desc("Total Price").without_fallback();

    let ranked = rank_with_key(&t, &spec, NO_LIMIT).expect("rank");

    assert_eq!(ranked.key, RankKey::Unranked);
    assert_eq!(ranked.table.ids(), vec!["a", "b"]);
}

#[test]
fn lexicographic_key_sorts_case_insensitively() {
    let t = table(vec![
        ("1", vec![("Product Name", json!("banana"))]),
        ("2", vec![("Product Name", json!("Apple"))]),
        ("3", vec![("Product Name", json!("cherry"))]),
        ("4", vec![("Product Name", json!("apple"))]),
    ]);
    let spec = SortSpec::new().then_lexicographic_asc("Product Name");

    let ranked = rank(&t, &spec, 20).expect("rank");

    assert_eq!(ranked.ids(), vec!["4", "2", "1", "3"]);
}

#[test]
fn accented_names_sort_with_their_base_letter() {
    let t = table(vec![
        ("z", vec![("Product Name", json!("Zucchini"))]),
        ("e", vec![("Product Name", json!("Éclair"))]),
        ("a", vec![("Product Name", json!("Apple"))]),
        ("e2", vec![("Product Name", json!("eclair"))]),
    ]);
    let spec = SortSpec::new().then_lexicographic_asc("Product Name");

    let ranked = rank(&t, &spec, NO_LIMIT).expect("rank");

    assert_eq!(ranked.ids(), vec!["a", "e2", "e", "z"]);
}

#[test]
fn present_but_null_cells_count_as_present_and_sort_last() {
    let t = table(vec![
        ("a", vec![("Total Price", json!(null))]),
        ("b", vec![("Total Price", json!(3))]),
        ("c", vec![("Total Price", json!(7))]),
    ]);

    let ranked = rank_with_key(&t, &best_sellers_spec(), NO_LIMIT).expect("rank");

    assert_eq!(ranked.key.column(), Some("Total Price"));
    assert_eq!(ranked.table.ids(), vec!["c", "b", "a"]);
}

#[test]
fn limit_truncates_and_zero_means_unbounded() {
    let rows: Vec<_> = (0..15)
        .map(|i| RawRecord::new(format!("r{i}")).with_field("Units Sold", i))
        .collect();
    let t = normalize(rows).expect("normalize");
    let spec = SortSpec::new().then_numeric_desc("Units Sold");

    let top = rank(&t, &spec, 10).expect("rank");
    assert_eq!(top.len(), 10);
    assert_eq!(top.ids()[0], "r14");
    assert_eq!(top.ids()[9], "r5");

    assert_eq!(rank(&t, &spec, NO_LIMIT).expect("rank").len(), 15);
}

#[test]
fn empty_table_ranks_to_empty_table() {
    let t = normalize(Vec::new()).expect("normalize");
    let ranked = rank(&t, &best_sellers_spec(), 10).expect("rank");
    assert!(ranked.is_empty());
}

#[test]
fn malformed_spec_fails_fast() {
    let t = Table::empty();
    let err = rank(&t, &SortSpec::new().without_fallback(), 10).unwrap_err();
    assert!(matches!(err, ModelError::InvalidSpec(_)));
}

#[test]
fn input_table_is_not_modified() {
    let t = table(vec![
        ("a", vec![("Units Sold", json!(1))]),
        ("b", vec![("Units Sold", json!(2))]),
    ]);
    let before = t.clone();
    let _ = rank(&t, &best_sellers_spec(), 1).expect("rank");
    assert_eq!(t, before);
}

fn homogeneous_table() -> impl Strategy<Value = Table> {
    (
        prop::collection::vec((0u8..4, 0i64..5, 0i64..1000), 0..30),
        any::<bool>(),
    )
        .prop_map(|(rows, with_price)| {
            let records = rows
                .into_iter()
                .enumerate()
                .map(|(index, (name, units, price))| {
                    let record = RawRecord::new(format!("r{index}"))
                        .with_field("Product Name", format!("P{name}"))
                        .with_field("Units Sold", units);
                    if with_price {
                        record.with_field("Total Price", price)
                    } else {
                        record
                    }
                })
                .collect::<Vec<_>>();
            normalize(records).expect("normalize")
        })
}

fn any_spec() -> impl Strategy<Value = SortSpec> {
    prop_oneof![
        Just(best_sellers_spec()),
        Just(SortSpec::new().then_lexicographic_asc("Product Name")),
        Just(SortSpec::new()),
        Just(SortSpec::new().then_numeric_desc("Missing")),
    ]
}

fn input_index(id: &str) -> usize {
    id.trim_start_matches('r').parse().expect("numeric id suffix")
}

proptest! {
    #[test]
    fn ranking_is_idempotent(t in homogeneous_table(), spec in any_spec(), limit in 0usize..40) {
        let once = rank(&t, &spec, limit).expect("rank");
        let twice = rank(&once, &spec, limit).expect("rank");
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn truncation_is_bounded(t in homogeneous_table(), spec in any_spec(), limit in 1usize..40) {
        let ranked = rank(&t, &spec, limit).expect("rank");
        prop_assert_eq!(ranked.len(), t.len().min(limit));
    }

    #[test]
    fn equal_keys_keep_input_order(t in homogeneous_table()) {
        let spec = SortSpec::new().then_numeric_desc("Units Sold");
        let ranked = rank(&t, &spec, NO_LIMIT).expect("rank");
        for pair in ranked.rows().windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let (ka, kb) = (a.get("Units Sold"), b.get("Units Sold"));
            if ka == kb {
                prop_assert!(input_index(a.id.as_str()) < input_index(b.id.as_str()));
            } else {
                prop_assert!(ka.as_number() > kb.as_number());
            }
        }
    }

    #[test]
    fn ranking_preserves_row_identity(t in homogeneous_table(), spec in any_spec()) {
        let ranked = rank(&t, &spec, NO_LIMIT).expect("rank");
        let mut before: Vec<_> = t.rows().to_vec();
        let mut after: Vec<_> = ranked.rows().to_vec();
        before.sort_by(|a, b| a.id.cmp(&b.id));
        after.sort_by(|a, b| a.id.cmp(&b.id));
        prop_assert_eq!(before, after);
    }
}
