use std::time::{Duration, Instant};

use chrono::NaiveDate;
use wanderstay::filters::FilterState;
use wanderstay::filters::dates::{DatePicker, DateRangeError, default_window, ensure_date_window};
use wanderstay::filters::query::{foreign_pairs, merge_query, parse_query, serialize};
use wanderstay::filters::sync::{FilterSync, Navigation};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

const TODAY: &str = "2025-06-15";

/// Short windows so the tests do not sleep.
fn sync_with(query: &str) -> (FilterSync, Option<Navigation>) {
    FilterSync::with_windows(
        query,
        date(TODAY),
        Duration::from_millis(40),
        Duration::from_millis(20),
    )
}

fn settled(start: Instant) -> Instant {
    start + Duration::from_millis(100)
}

#[test]
fn query_round_trip_reproduces_the_state() {
    let mut state = FilterState::default();
    state.bedrooms = 3;
    state.search = "Lisbon".to_string();

    let query = serialize(&state, &[]);
    let parsed = parse_query(&query);

    assert_eq!(parsed, state);
    assert!(parsed.property_types.is_empty());
    assert_eq!(parsed.guests, 1);
    assert_eq!(parsed.page, 1);
    assert_eq!(parsed.start_date, None);
}

#[test]
fn sentinels_are_omitted_from_the_query() {
    let state = FilterState::default();
    assert_eq!(serialize(&state, &[]), "");

    let mut state = FilterState::default();
    state.guests = 1;
    state.page = 1;
    state.search = String::new();
    assert_eq!(serialize(&state, &[]), "");
}

#[test]
fn property_types_serialize_as_repeated_keys() {
    let mut state = FilterState::default();
    state.property_types = vec!["cabin".to_string(), "villa".to_string()];

    let query = serialize(&state, &[]);
    assert_eq!(query, "property_type=cabin&property_type=villa");

    let parsed = parse_query(&query);
    assert_eq!(parsed.property_types, vec!["cabin", "villa"]);
    assert!(parsed.has_property_type("villa"));
}

#[test]
fn malformed_numbers_read_as_defaults() {
    let parsed = parse_query("min_price=abc&bedrooms=-2&guests=0&page=x&max_price=250");
    assert_eq!(parsed.min_price, None);
    assert_eq!(parsed.max_price, Some(250));
    assert_eq!(parsed.bedrooms, 1);
    assert_eq!(parsed.guests, 1);
    assert_eq!(parsed.page, 1);
}

#[test]
fn end_date_before_start_reads_as_absent() {
    let parsed = parse_query("start_date=2025-07-10&end_date=2025-07-01");
    assert_eq!(parsed.start_date, Some(date("2025-07-10")));
    assert_eq!(parsed.end_date, None);
}

#[test]
fn foreign_parameters_survive_rewrites() {
    let query = "utm_source=mail&search=Lisbon&session_hint=abc";
    assert_eq!(
        foreign_pairs(query),
        vec![
            ("utm_source".to_string(), "mail".to_string()),
            ("session_hint".to_string(), "abc".to_string()),
        ]
    );

    let mut state = parse_query(query);
    state.search = "Porto".to_string();
    let rewritten = merge_query(query, &state);

    assert!(rewritten.contains("search=Porto"));
    assert!(rewritten.contains("utm_source=mail"));
    assert!(rewritten.contains("session_hint=abc"));
}

#[test]
fn default_window_is_tomorrow_plus_three() {
    let (check_in, check_out) = default_window(date(TODAY));
    assert_eq!(check_in, date("2025-06-16"));
    assert_eq!(check_out, date("2025-06-19"));
}

#[test]
fn missing_dates_are_filled_via_replace() {
    let rewritten = ensure_date_window("search=Lisbon", date(TODAY)).unwrap();
    let parsed = parse_query(&rewritten);

    assert_eq!(parsed.start_date, Some(date("2025-06-16")));
    assert_eq!(parsed.end_date, Some(date("2025-06-19")));
    assert_eq!(parsed.search, "Lisbon");

    // Already complete: nothing to rewrite, no history churn.
    assert_eq!(ensure_date_window(&rewritten, date(TODAY)), None);
}

#[test]
fn sync_initializes_dates_with_a_replace_navigation() {
    let (sync, navigation) = sync_with("search=Lisbon");

    let Some(Navigation::Replace(query)) = navigation else {
        panic!("expected a replace navigation");
    };
    let parsed = parse_query(&query);
    assert_eq!(parsed.start_date, Some(date("2025-06-16")));
    assert_eq!(parsed.end_date, Some(date("2025-06-19")));
    assert_eq!(sync.state().search, "Lisbon");
}

#[test]
fn debounced_edit_pushes_once() {
    let (mut sync, _) = sync_with("start_date=2025-07-01&end_date=2025-07-04");
    let t0 = Instant::now();

    sync.edit(t0, |state| state.search = "Li".to_string());
    sync.edit(t0 + Duration::from_millis(10), |state| {
        state.search = "Lisbon".to_string();
    });

    // Still inside the debounce window of the second edit.
    assert_eq!(sync.poll(t0 + Duration::from_millis(30)), None);

    let Some(Navigation::Push(query)) = sync.poll(settled(t0)) else {
        panic!("expected a push navigation");
    };
    assert!(query.contains("search=Lisbon"));

    // Nothing further pending.
    assert_eq!(sync.poll(settled(t0) + Duration::from_millis(100)), None);
}

#[test]
fn pushing_the_same_tuple_twice_navigates_once() {
    let (mut sync, _) = sync_with("start_date=2025-07-01&end_date=2025-07-04");
    let t0 = Instant::now();

    sync.edit(t0, |state| state.search = "Lisbon".to_string());
    assert!(sync.poll(settled(t0)).is_some());

    // Re-entering the identical value must not produce a second entry.
    let t1 = settled(t0);
    sync.edit(t1, |state| state.search = "Lisbon".to_string());
    assert_eq!(sync.poll(settled(t1)), None);
}

#[test]
fn filter_edits_reset_the_page() {
    let (mut sync, _) =
        sync_with("page=4&search=Lisbon&start_date=2025-07-01&end_date=2025-07-04");
    let t0 = Instant::now();

    sync.edit(t0, |state| state.bedrooms = 3);

    let Some(Navigation::Push(query)) = sync.poll(settled(t0)) else {
        panic!("expected a push navigation");
    };
    let parsed = parse_query(&query);
    assert_eq!(parsed.bedrooms, 3);
    assert_eq!(parsed.page, 1);
}

#[test]
fn date_edits_keep_the_page() {
    let (mut sync, _) =
        sync_with("page=4&search=Lisbon&start_date=2025-07-01&end_date=2025-07-04");
    let t0 = Instant::now();

    sync.edit(t0, |state| state.end_date = Some(date("2025-07-08")));

    let Some(Navigation::Push(query)) = sync.poll(settled(t0)) else {
        panic!("expected a push navigation");
    };
    let parsed = parse_query(&query);
    assert_eq!(parsed.end_date, Some(date("2025-07-08")));
    assert_eq!(parsed.page, 4);
}

#[test]
fn external_change_is_adopted_and_guarded() {
    let (mut sync, _) = sync_with("start_date=2025-07-01&end_date=2025-07-04");
    let t0 = Instant::now();

    sync.edit(t0, |state| state.search = "Lisbon".to_string());

    // A pagination click lands before the debounce fires.
    sync.sync_from_url(
        "page=2&start_date=2025-07-01&end_date=2025-07-04",
        t0 + Duration::from_millis(5),
    );
    assert_eq!(sync.state().page, 2);
    assert_eq!(sync.state().search, "");

    // The write-back is suppressed: nothing fires after the guard either.
    assert_eq!(sync.poll(t0 + Duration::from_millis(10)), None);
    assert_eq!(sync.poll(settled(t0)), None);
}

#[test]
fn foreign_params_survive_a_sync_push() {
    let (mut sync, _) =
        sync_with("utm_source=mail&start_date=2025-07-01&end_date=2025-07-04");
    let t0 = Instant::now();

    sync.edit(t0, |state| state.search = "Lisbon".to_string());

    let Some(Navigation::Push(query)) = sync.poll(settled(t0)) else {
        panic!("expected a push navigation");
    };
    assert!(query.contains("utm_source=mail"));
    assert!(query.contains("start_date=2025-07-01"));
}

#[test]
fn end_picker_rejects_dates_before_start() {
    let mut picker = DatePicker::new(
        date(TODAY),
        Some(date("2025-07-10")),
        Some(date("2025-07-14")),
    );

    assert!(picker.end_disabled(date("2025-07-09")));
    assert_eq!(
        picker.select_end(date("2025-07-09")),
        Err(DateRangeError::BeforeStart)
    );
    // The rejected selection changed nothing, never swapped.
    assert_eq!(picker.end(), Some(date("2025-07-14")));
}

#[test]
fn end_picker_without_start_rejects_past_dates() {
    let mut picker = DatePicker::new(date(TODAY), None, None);
    assert_eq!(
        picker.select_end(date("2025-06-01")),
        Err(DateRangeError::BeforeToday)
    );
    assert!(picker.select_end(date("2025-06-20")).is_ok());
}

#[test]
fn late_start_opens_end_picker_without_clearing_end() {
    let mut picker = DatePicker::new(
        date(TODAY),
        Some(date("2025-07-01")),
        Some(date("2025-07-04")),
    );

    picker.select_start(date("2025-07-10")).unwrap();

    assert!(picker.end_open());
    assert_eq!(picker.end(), Some(date("2025-07-04")));

    picker.select_end(date("2025-07-12")).unwrap();
    assert!(!picker.end_open());
}
