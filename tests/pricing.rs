use chrono::NaiveDate;
use wanderstay::backend::stub::sample_activity;
use wanderstay::pricing::{PriceQuote, quote};

fn date(s: &str) -> Option<NaiveDate> {
    Some(NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap())
}

#[test]
fn no_dates_falls_back_to_per_night() {
    let quote = quote(100.0, None, None, &[]);
    assert_eq!(quote, PriceQuote::PerNight { rate: 100.0 });
    assert_eq!(quote.display(), "€100.00 / night");
}

#[test]
fn zero_nights_falls_back_to_per_night() {
    let quote = quote(100.0, date("2025-01-01"), date("2025-01-01"), &[]);
    assert_eq!(quote, PriceQuote::PerNight { rate: 100.0 });
}

#[test]
fn end_before_start_falls_back_to_per_night() {
    let quote = quote(100.0, date("2025-01-04"), date("2025-01-01"), &[]);
    assert_eq!(quote, PriceQuote::PerNight { rate: 100.0 });
}

#[test]
fn stay_total_includes_paid_activities_only() {
    let cart = vec![sample_activity(1, "20.00"), sample_activity(2, "0.00")];
    let quote = quote(50.0, date("2025-01-01"), date("2025-01-04"), &cart);

    assert_eq!(
        quote,
        PriceQuote::Stay {
            total: 170.0,
            nights: 3,
            paid_activities: 1,
        }
    );
    assert_eq!(quote.display(), "€170.00 for 3 days and 1 activity");
}

#[test]
fn free_cart_drops_the_activity_suffix() {
    let cart = vec![sample_activity(1, "0.00")];
    let quote = quote(50.0, date("2025-01-01"), date("2025-01-02"), &cart);

    assert_eq!(quote.label(), "for 1 day");
    assert_eq!(quote.amount(), 50.0);
}

#[test]
fn several_paid_activities_pluralize() {
    let cart = vec![
        sample_activity(1, "20.00"),
        sample_activity(2, "5.50"),
        sample_activity(3, "0.00"),
    ];
    let quote = quote(10.0, date("2025-01-01"), date("2025-01-03"), &cart);

    assert_eq!(quote.amount(), 45.5);
    assert_eq!(quote.label(), "for 2 days and 2 activities");
}

#[test]
fn malformed_amounts_read_as_free() {
    let cart = vec![sample_activity(1, "not-a-number")];
    let quote = quote(10.0, date("2025-01-01"), date("2025-01-02"), &cart);

    assert_eq!(quote.amount(), 10.0);
    assert_eq!(quote.label(), "for 1 day");
}
