//! Filter compilation against a populated store, plus identifier properties.

use person_store::{compile, group_query_pairs, Person, RecordId, Seeder, Store, StoreError};
use proptest::prelude::*;
use std::collections::HashSet;

fn people_store() -> Store {
    let store = Store::in_memory();
    let rows = [
        ("Ann", "Lee", "Paris", "France"),
        ("Bo", "Ray", "Rome", "Italy"),
        ("Cy", "Lee", "Oslo", "Norway"),
        ("Di", "Kim", "Paris", "France"),
        ("Ed", "Ray", "Lyon", "France"),
    ];
    for (first, last, city, country) in rows {
        store
            .create(Person::new(first, last).with_location(city, country))
            .unwrap();
    }
    store.create(Person::new("Fy", "Lee")).unwrap();
    store
}

fn names(store: &Store, pairs: &[(&str, &str)]) -> HashSet<String> {
    let filter = compile(&group_query_pairs(pairs.iter().copied()));
    store
        .list(&filter)
        .unwrap()
        .into_iter()
        .map(|p| p.firstname)
        .collect()
}

fn set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_comma_and_repeated_forms_agree() {
    let store = people_store();
    let split = names(&store, &[("city", "Paris,Rome")]);
    let repeated = names(&store, &[("city", "Paris"), ("city", "Rome")]);

    assert_eq!(split, repeated);
    assert_eq!(split, set(&["Ann", "Bo", "Di"]));
}

#[test]
fn test_criteria_are_conjunctive() {
    let store = people_store();
    assert_eq!(
        names(&store, &[("country", "France"), ("lastname", "Ray,Kim")]),
        set(&["Di", "Ed"])
    );
}

#[test]
fn test_records_without_location_never_match_location_criteria() {
    let store = people_store();
    assert!(!names(&store, &[("country", "France,Italy,Norway")]).contains("Fy"));
    assert!(names(&store, &[("lastname", "Lee")]).contains("Fy"));
}

#[test]
fn test_unknown_criteria_are_ignored() {
    let store = people_store();
    assert_eq!(names(&store, &[("age", "30")]).len(), 6);
}

#[test]
fn test_no_match_is_empty_not_error() {
    let store = people_store();
    assert!(names(&store, &[("city", "Atlantis")]).is_empty());
}

#[test]
fn test_filter_over_seeded_store() {
    let store = Store::in_memory();
    Seeder::new(100).with_seed(11).seed_if_empty(&store).unwrap();

    let filter = compile(&group_query_pairs([("city", "Paris,Rome,Oslo")]));
    for person in store.list(&filter).unwrap() {
        let city = person.location.unwrap().city;
        assert!(["Paris", "Rome", "Oslo"].contains(&city.as_str()));
    }
}

// --- Identifier Properties ---

proptest! {
    #[test]
    fn prop_record_id_text_roundtrip(bytes in proptest::array::uniform12(any::<u8>())) {
        let id = RecordId::from_bytes(bytes);
        prop_assert_eq!(RecordId::parse(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn prop_wrong_length_is_invalid(text in "[0-9a-f]{0,40}") {
        prop_assume!(text.len() != 24);
        prop_assert!(matches!(RecordId::parse(&text), Err(StoreError::InvalidArgument(_))));
    }

    #[test]
    fn prop_non_hex_is_invalid(prefix in "[0-9a-f]{0,23}", bad in "[g-zG-Z_\\-]") {
        let mut text = prefix.clone();
        text.push_str(&bad);
        while text.len() < 24 {
            text.push('0');
        }
        prop_assert!(matches!(RecordId::parse(&text), Err(StoreError::InvalidArgument(_))));
    }
}

#[test]
fn test_generated_ids_parse_back() {
    for _ in 0..1000 {
        let id = RecordId::generate();
        assert_eq!(RecordId::parse(&id.to_string()).unwrap(), id);
    }
}
