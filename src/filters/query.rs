//! Query-string codec for [`FilterState`].
//!
//! Parameter names are load-bearing: the server-rendered listings page and
//! the backend search endpoint read exactly these keys. Parsing is
//! tolerant (malformed numbers fall back to the default) and serializing
//! omits every field sitting at its sentinel so URLs stay short. Query
//! parameters this module does not own are carried through every rewrite
//! untouched.

use chrono::NaiveDate;
use url::form_urlencoded;

use crate::filters::FilterState;
use crate::filters::dates::{format_iso_date, parse_iso_date};

/// Parameters owned by the filter state; everything else is foreign.
pub const TRACKED_PARAMS: [&str; 12] = [
    "search",
    "country",
    "city",
    "property_type",
    "min_price",
    "max_price",
    "guests",
    "bedrooms",
    "bathrooms",
    "start_date",
    "end_date",
    "page",
];

fn is_tracked(key: &str) -> bool {
    TRACKED_PARAMS.contains(&key)
}

/// Decoded `key=value` pairs of a query string, in order.
pub fn query_pairs(query: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Pairs this codec does not own, preserved verbatim across rewrites.
pub fn foreign_pairs(query: &str) -> Vec<(String, String)> {
    query_pairs(query)
        .into_iter()
        .filter(|(k, _)| !is_tracked(k))
        .collect()
}

fn first<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Positive integer with `1` as the "any" sentinel; malformed → default.
fn parse_count(value: Option<&str>) -> u32 {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|n| *n >= 1)
        .unwrap_or(1)
}

/// Non-negative price bound; malformed values are treated as absent.
fn parse_price(value: Option<&str>) -> Option<u32> {
    value.and_then(|v| v.trim().parse::<u32>().ok())
}

fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    value.and_then(parse_iso_date)
}

/// Reads a [`FilterState`] out of a query string. Absent or malformed
/// parameters fall back to their defaults; this function never fails.
pub fn parse_query(query: &str) -> FilterState {
    parse_pairs(&query_pairs(query))
}

/// Same as [`parse_query`] over already-decoded pairs (e.g. a posted
/// filter form).
pub fn parse_pairs(pairs: &[(String, String)]) -> FilterState {
    let mut state = FilterState {
        search: first(pairs, "search").unwrap_or_default().to_string(),
        country: first(pairs, "country").unwrap_or_default().to_string(),
        city: first(pairs, "city").unwrap_or_default().to_string(),
        property_types: pairs
            .iter()
            .filter(|(k, v)| k == "property_type" && !v.trim().is_empty())
            .map(|(_, v)| v.clone())
            .collect(),
        min_price: parse_price(first(pairs, "min_price")),
        max_price: parse_price(first(pairs, "max_price")),
        guests: parse_count(first(pairs, "guests")),
        bedrooms: parse_count(first(pairs, "bedrooms")),
        bathrooms: parse_count(first(pairs, "bathrooms")),
        start_date: parse_date(first(pairs, "start_date")),
        end_date: parse_date(first(pairs, "end_date")),
        page: parse_count(first(pairs, "page")),
    };

    // An end date before the start date cannot be expressed by the pickers;
    // a hand-crafted URL carrying one reads as "no end date".
    if let (Some(start), Some(end)) = (state.start_date, state.end_date)
        && end < start
    {
        state.end_date = None;
    }

    state
}

/// Serializes the state plus the given foreign pairs into a query string.
/// Fields at their sentinel (empty string, `1`, no date) are omitted, and
/// property types come out as repeated keys.
pub fn serialize(state: &FilterState, foreign: &[(String, String)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    let mut push = |key: &str, value: &str| {
        serializer.append_pair(key, value);
    };

    if !state.search.is_empty() {
        push("search", &state.search);
    }
    if !state.country.is_empty() {
        push("country", &state.country);
    }
    if !state.city.is_empty() {
        push("city", &state.city);
    }
    for property_type in &state.property_types {
        push("property_type", property_type);
    }
    if let Some(min_price) = state.min_price {
        push("min_price", &min_price.to_string());
    }
    if let Some(max_price) = state.max_price {
        push("max_price", &max_price.to_string());
    }
    if state.guests > 1 {
        push("guests", &state.guests.to_string());
    }
    if state.bedrooms > 1 {
        push("bedrooms", &state.bedrooms.to_string());
    }
    if state.bathrooms > 1 {
        push("bathrooms", &state.bathrooms.to_string());
    }
    if let Some(start_date) = state.start_date {
        push("start_date", &format_iso_date(start_date));
    }
    if let Some(end_date) = state.end_date {
        push("end_date", &format_iso_date(end_date));
    }
    if state.page > 1 {
        push("page", &state.page.to_string());
    }

    for (key, value) in foreign {
        serializer.append_pair(key, value);
    }

    serializer.finish()
}

/// Rewrites `query` with the tracked fields taken from `state`, keeping
/// every foreign parameter already present in `query`.
pub fn merge_query(query: &str, state: &FilterState) -> String {
    serialize(state, &foreign_pairs(query))
}
