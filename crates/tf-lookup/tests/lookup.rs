//! Lookup invariants over arbitrary registries.

use proptest::prelude::*;
use tf_ingest::{Registry, build_registry};
use tf_lookup::{LookupOptions, find_matches, rank};
use tf_model::{ColumnMapping, GuestRecord, NameField};

fn name() -> impl Strategy<Value = String> {
    "[A-Za-z]{0,8}"
}

fn registry_strategy() -> impl Strategy<Value = Registry> {
    proptest::collection::vec((name(), name(), "[0-9]{0,2}"), 0..20).prop_map(|rows| {
        rows.into_iter()
            .map(|(first, last, table)| GuestRecord::new(first, last, table))
            .collect()
    })
}

fn field_strategy() -> impl Strategy<Value = NameField> {
    prop_oneof![Just(NameField::First), Just(NameField::Last)]
}

proptest! {
    #[test]
    fn short_queries_never_match(
        registry in registry_strategy(),
        query in "[A-Za-z ]{0,1}",
        field in field_strategy(),
        threshold in 0.0f64..=1.0,
        limit in 1usize..10,
    ) {
        prop_assert!(find_matches(&registry, &query, field, threshold, limit).is_empty());
    }

    #[test]
    fn results_respect_limit_threshold_and_order(
        registry in registry_strategy(),
        query in "[A-Za-z]{2,6}",
        field in field_strategy(),
        threshold in 0.0f64..=1.0,
        limit in 1usize..10,
    ) {
        let options = LookupOptions::default()
            .with_field(field)
            .with_threshold(threshold)
            .with_limit(limit);
        let matches = rank(&registry, &query, &options);

        prop_assert!(matches.len() <= limit);
        for m in &matches {
            prop_assert!(m.score >= threshold);
        }
        for pair in matches.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                let pos = |record: &GuestRecord| {
                    registry.iter().position(|r| std::ptr::eq(r, record))
                };
                prop_assert!(pos(pair[0].record) < pos(pair[1].record));
            }
        }
    }

    #[test]
    fn empty_registry_never_matches(
        query in "[A-Za-z]{0,6}",
        field in field_strategy(),
        threshold in 0.0f64..=1.0,
    ) {
        prop_assert!(find_matches(&Registry::default(), &query, field, threshold, 5).is_empty());
    }
}

#[test]
fn end_to_end_from_csv() {
    let csv = b"Name,Surname,Seat\nKatie,Davis,3\nKate,Davison,2\nBob,Smith,Family Table\n";
    let registry =
        build_registry(csv, &ColumnMapping::new("Name", "Surname", "Seat")).expect("build");

    let by_first = find_matches(&registry, "Kat", NameField::First, 0.6, 5);
    assert_eq!(by_first.len(), 2);
    assert_eq!(by_first[0].first_name, "Kate");
    assert_eq!(by_first[1].first_name, "Katie");

    assert!(find_matches(&registry, "xq", NameField::First, 0.7, 5).is_empty());

    let by_last = find_matches(&registry, "smyth", NameField::Last, 0.6, 5);
    assert_eq!(by_last.len(), 1);
    assert_eq!(by_last[0].table, "Family Table");
}

#[test]
fn ties_keep_registry_order() {
    let registry = Registry::new(vec![
        GuestRecord::new("Ann", "Lee", "1"),
        GuestRecord::new("Ann", "Park", "2"),
        GuestRecord::new("Ann", "Wu", "3"),
    ]);
    let matches = find_matches(&registry, "Ann", NameField::First, 0.9, 2);
    let tables: Vec<&str> = matches.iter().map(|g| g.table.as_str()).collect();
    assert_eq!(tables, vec!["1", "2"]);
}
