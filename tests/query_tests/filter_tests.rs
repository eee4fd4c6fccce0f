//! Tests for filtering
//!
//! These tests verify:
//! - Free-text search across name, first name and ID
//! - Exact stage/source/responsible filters
//! - Day filter on `Created`, including unparsable dates
//! - Filter composition and distinct values

use chrono::NaiveDate;
use leadtable::query::{distinct_values, filter, FilterCriteria};
use leadtable::{Field, Record};

// =============================================================================
// Helper Functions
// =============================================================================

fn sample() -> Vec<Record> {
    vec![
        Record::new()
            .with("ID", "1")
            .with("Stage", "NEW")
            .with("Lead Name", "Lead Smith")
            .with("Source", "Web")
            .with("Responsible", "Ana")
            .with("Created", "05/03/2024"),
        Record::new()
            .with("ID", "2")
            .with("Stage", "NEW")
            .with("Lead Name", "Bob")
            .with("First Name", "Leadbetter")
            .with("Source", "Referral")
            .with("Responsible", "Ana")
            .with("Created", "06/03/2024 14:30"),
        Record::new()
            .with("ID", "3")
            .with("Stage", "CUSTOMER")
            .with("Lead Name", "Lead Jones")
            .with("Source", "Web")
            .with("Responsible", "Raj")
            .with("Created", "not a date"),
        Record::new()
            .with("ID", "12")
            .with("Stage", "ATTEMPT")
            .with("Lead Name", "Carol"),
    ]
}

fn ids(records: &[Record]) -> Vec<&str> {
    records.iter().map(|r| r.id()).collect()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// =============================================================================
// Search Tests
// =============================================================================

#[test]
fn test_empty_criteria_keeps_everything_in_order() {
    let records = sample();

    let view = filter(&records, &FilterCriteria::new());

    assert_eq!(ids(&view), vec!["1", "2", "3", "12"]);
    assert!(FilterCriteria::new().is_empty());
}

#[test]
fn test_search_is_case_insensitive_over_names() {
    let records = sample();

    let view = filter(&records, &FilterCriteria::new().search("LEAD"));

    // "Lead Smith", first name "Leadbetter" (record 2 matches only there), "Lead Jones"
    assert_eq!(ids(&view), vec!["1", "2", "3"]);
}

#[test]
fn test_search_matches_id_substring() {
    let records = sample();

    let view = filter(&records, &FilterCriteria::new().search("2"));

    assert_eq!(ids(&view), vec!["2", "12"]);
}

#[test]
fn test_search_matches_id_verbatim() {
    let records = vec![
        Record::new().with("ID", "AB12").with("Lead Name", "Dana"),
        Record::new().with("ID", "cd34").with("Lead Name", "Eve"),
    ];

    assert_eq!(ids(&filter(&records, &FilterCriteria::new().search("AB1"))), vec!["AB12"]);
    assert!(filter(&records, &FilterCriteria::new().search("ab1")).is_empty());
    assert!(filter(&records, &FilterCriteria::new().search("CD3")).is_empty());
}

#[test]
fn test_search_without_match() {
    let records = sample();

    assert!(filter(&records, &FilterCriteria::new().search("zzz")).is_empty());
}

// =============================================================================
// Field Filter Tests
// =============================================================================

#[test]
fn test_stage_and_search_compose() {
    let records = vec![
        Record::new().with("ID", "1").with("Stage", "NEW").with("Lead Name", "Lead Smith"),
        Record::new().with("ID", "2").with("Stage", "NEW").with("Lead Name", "Bob"),
        Record::new().with("ID", "3").with("Stage", "CUSTOMER").with("Lead Name", "Lead Jones"),
    ];

    let view = filter(&records, &FilterCriteria::new().stage("NEW").search("lead"));

    assert_eq!(ids(&view), vec!["1"]);
}

#[test]
fn test_exact_filters_are_case_sensitive() {
    let records = sample();

    assert!(filter(&records, &FilterCriteria::new().stage("new")).is_empty());
    assert_eq!(
        ids(&filter(&records, &FilterCriteria::new().source("Web"))),
        vec!["1", "3"]
    );
}

#[test]
fn test_source_and_responsible() {
    let records = sample();

    let criteria = FilterCriteria::new().source("Web").responsible("Ana");

    assert_eq!(ids(&filter(&records, &criteria)), vec!["1"]);
}

#[test]
fn test_empty_string_filter_is_inactive() {
    let records = sample();
    let criteria = FilterCriteria {
        stage: Some(String::new()),
        ..FilterCriteria::default()
    };

    assert!(criteria.is_empty());
    assert_eq!(filter(&records, &criteria).len(), 4);
}

// =============================================================================
// Date Filter Tests
// =============================================================================

#[test]
fn test_date_filter_matches_same_day() {
    let records = sample();

    let view = filter(&records, &FilterCriteria::new().date(day(2024, 3, 5)));

    assert_eq!(ids(&view), vec!["1"]);
}

#[test]
fn test_date_filter_ignores_time_of_day() {
    let records = sample();

    let view = filter(&records, &FilterCriteria::new().date(day(2024, 3, 6)));

    assert_eq!(ids(&view), vec!["2"]);
}

#[test]
fn test_date_filter_skips_missing_and_invalid_dates() {
    let records = sample();

    // Record 3 has an unparsable date, record 12 has none
    let view = filter(&records, &FilterCriteria::new().date(day(1970, 1, 1)));

    assert!(view.is_empty());
}

#[test]
fn test_filter_does_not_touch_collection() {
    let records = sample();
    let before = records.clone();

    let _ = filter(&records, &FilterCriteria::new().stage("NEW"));

    assert_eq!(records, before);
}

// =============================================================================
// Distinct Values Tests
// =============================================================================

#[test]
fn test_distinct_values_sorted_non_empty() {
    let records = sample();

    assert_eq!(distinct_values(&records, Field::Source), vec!["Referral", "Web"]);
    assert_eq!(
        distinct_values(&records, Field::Stage),
        vec!["ATTEMPT", "CUSTOMER", "NEW"]
    );
}
