#![allow(unused)]
//! Search integration harness: the fuzzy matcher driven through
//! `RecordFilter` and `RecordStore::query`.
//!
//! # What this covers
//!
//! - **Typo tolerance**: the worked examples over the demo dataset (`Emly`
//!   finds Emily Carter, `Emlxy` finds nothing).
//! - **Word policy**: every query word must match some field word, in any
//!   order; short words must match exactly.
//! - **Field OR**: diagnosis, doctor and hospital are each searched.
//! - **Facets and dates**: exact facets and the inclusive date range narrow
//!   text results.
//! - **Property: results ⊆ store**, date-sorted, and narrowing never grows the
//!   result set.
//!
//! # What this does NOT cover
//!
//! - Live search in the TUI (see the app unit tests)
//!
//! # Running
//!
//! ```sh
//! cargo test --test search_harness
//! ```

mod common;
use common::*;

use carebook_core::{
    dataset::demo_records,
    matcher::{edit_distance, fuzzy_matches, FuzzyQuery},
    Category, RecordFilter, RecordStore, SortOrder,
};
use proptest::prelude::*;
use rstest::rstest;

fn demo_store() -> RecordStore {
    RecordStore::new(demo_records())
}

fn search(store: &RecordStore, text: &str) -> Vec<String> {
    diagnoses(&store.query(&RecordFilter::new().text(text)))
}

// ---------------------------------------------------------------------------
// Typo tolerance over the demo dataset
// ---------------------------------------------------------------------------

#[test]
fn one_typo_in_doctor_name_still_matches() {
    let store = demo_store();
    assert_diagnoses!(store.query(&RecordFilter::new().text("Emly")), ["Acute Bronchitis"]);
}

#[test]
fn two_typos_in_short_word_do_not_match() {
    let store = demo_store();
    assert!(store.query(&RecordFilter::new().text("Emlxy")).is_empty());
}

#[rstest]
#[case::exact_diagnosis("bronchitis", &["Acute Bronchitis"])]
#[case::transposed_long_word("bronchitsi", &["Acute Bronchitis"])]
#[case::typo_and_hyphen_split("chek up", &["Annual Check-up"])]
#[case::hospital_substring("hospital", &["Acute Bronchitis"])]
#[case::two_edits_on_long_word("hospitaxx", &["Acute Bronchitis"])]
#[case::words_out_of_order("sprain ankle", &["Minor Ankle Sprain"])]
#[case::short_word_exact("lee", &["Annual Check-up"])]
#[case::case_insensitive("SOPHIA", &["Minor Ankle Sprain"])]
#[case::every_word_must_match("bronchitis sprain", &[])]
#[case::empty_matches_all("", &["Acute Bronchitis", "Annual Check-up", "Minor Ankle Sprain"])]
fn demo_queries(#[case] query: &str, #[case] expected: &[&str]) {
    pretty_assertions::assert_eq!(search(&demo_store(), query), expected);
}

#[test]
fn short_words_allow_no_typos() {
    // "leo" is one edit from "lee" but three-letter words must match exactly
    assert!(search(&demo_store(), "leo").is_empty());
    assert_eq!(edit_distance("leo", "lee"), 1);
}

// ---------------------------------------------------------------------------
// Field OR and facets
// ---------------------------------------------------------------------------

#[test]
fn text_matches_any_searchable_field() {
    let store = store_of([
        RecordBuilder::new("rec1").diagnosis("Migraine").doctor("Ada Park").build(),
        RecordBuilder::new("rec2").diagnosis("Sprain").doctor("Omar Haddad").build(),
        RecordBuilder::new("rec3")
            .diagnosis("Flu")
            .doctor("Li Wei")
            .hospital("Parkside Clinic")
            .build(),
    ]);
    assert_eq!(ids(&store.query(&RecordFilter::new().text("park"))), ["rec1", "rec3"]);
    // symptoms are not searched
    let with_symptom = store_of([RecordBuilder::new("rec1").symptoms(&["Fever"]).build()]);
    assert!(with_symptom.query(&RecordFilter::new().text("fever")).is_empty());
}

#[test]
fn facets_narrow_text_results() {
    let store = demo_store();
    let filter = RecordFilter::new().text("a").category(Category::Consultation);
    assert_diagnoses!(store.query(&filter), ["Acute Bronchitis", "Minor Ankle Sprain"]);

    let filter = filter.doctor("Sophia Rodriguez");
    assert_diagnoses!(store.query(&filter), ["Minor Ankle Sprain"]);

    // exact facet: a near-miss name does not count
    let filter = RecordFilter::new().doctor("Sophia Rodrigues");
    assert!(store.query(&filter).is_empty());
}

#[test]
fn date_range_is_inclusive() {
    let store = demo_store();
    let day = ymd(2024, 1, 5);
    let filter = RecordFilter::new().from_date(day).to_date(day);
    assert_diagnoses!(store.query(&filter), ["Annual Check-up"]);

    let filter = RecordFilter::new().from_date(ymd(2024, 3, 16));
    assert!(store.query(&filter).is_empty());
}

#[test]
fn clear_facets_keeps_text_and_order() {
    let mut filter = RecordFilter::new()
        .text("chek")
        .hospital("Nowhere")
        .from_date(ymd(2030, 1, 1))
        .order(SortOrder::OldestFirst);
    assert!(demo_store().query(&filter).is_empty());

    filter.clear_facets();
    assert!(!filter.has_facets());
    assert_eq!(filter.order, SortOrder::OldestFirst);
    assert_diagnoses!(demo_store().query(&filter), ["Annual Check-up"]);
}

#[test]
fn equal_dates_keep_store_order() {
    let store = store_of([
        RecordBuilder::new("rec1").date(2024, 5, 1).diagnosis("First").build(),
        RecordBuilder::new("rec2").date(2024, 5, 1).diagnosis("Second").build(),
        RecordBuilder::new("rec3").date(2024, 6, 1).diagnosis("Latest").build(),
    ]);
    assert_diagnoses!(store.query(&RecordFilter::new()), ["Latest", "First", "Second"]);
    let oldest = RecordFilter::new().order(SortOrder::OldestFirst);
    assert_diagnoses!(store.query(&oldest), ["First", "Second", "Latest"]);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn results_are_a_sorted_subset_of_the_store(query in "[a-z ]{0,12}", newest in any::<bool>()) {
        let store = RecordStore::new(generated_corpus(40));
        let order = if newest { SortOrder::NewestFirst } else { SortOrder::OldestFirst };
        let results = store.query(&RecordFilter::new().text(query).order(order));

        for r in &results {
            prop_assert!(store.get(&r.id).is_some());
        }
        if newest {
            assert_date_sorted!(results, desc);
        } else {
            assert_date_sorted!(results, asc);
        }
    }

    #[test]
    fn adding_a_facet_never_grows_results(query in "[a-z]{0,6}", cat in 0usize..6) {
        let store = RecordStore::new(generated_corpus(40));
        let base = RecordFilter::new().text(query);
        let narrowed = base.clone().category(Category::ALL[cat]);
        let all = ids(&store.query(&base));
        let some = ids(&store.query(&narrowed));
        prop_assert!(some.iter().all(|id| all.contains(id)));
    }

    #[test]
    fn any_field_matches_itself(field in "[A-Za-z][A-Za-z ,.-]{0,30}") {
        prop_assert!(fuzzy_matches(&field, &field));
        prop_assert!(FuzzyQuery::new("").matches(&field));
    }
}
