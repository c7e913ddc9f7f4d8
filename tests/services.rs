use std::sync::Arc;

use tempfile::TempDir;
use wanderstay::backend::stub::{StubBackend, sample_activity, sample_house};
use wanderstay::cart::{CartRegistry, FileCartStorage};
use wanderstay::domain::types::HouseId;
use wanderstay::filters::FilterState;
use wanderstay::filters::query::parse_query;
use wanderstay::forms::auth::{LoginForm, RegisterForm};
use wanderstay::pricing::PriceQuote;
use wanderstay::services::{ServiceError, auth, house, listings};

fn house_id(id: i64) -> HouseId {
    HouseId::new(id).unwrap()
}

#[actix_web::test]
async fn listings_forward_search_as_city() {
    let backend = StubBackend::with_houses(3);
    let filters = parse_query("search=Lisbon&bedrooms=3&property_type=cabin");

    let data = listings::load_listings_page(&backend, &filters, None)
        .await
        .unwrap();
    assert_eq!(data.total, 3);

    let queries = backend.seen_queries.lock().unwrap();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].city.as_deref(), Some("Lisbon"));
    assert_eq!(queries[0].bedrooms, Some(3));
    assert_eq!(
        queries[0].to_pairs(),
        vec![
            ("city".to_string(), "Lisbon".to_string()),
            ("bedrooms".to_string(), "3".to_string()),
            ("property_type[]".to_string(), "cabin".to_string()),
        ]
    );
}

#[actix_web::test]
async fn listings_surface_backend_failures() {
    let backend = StubBackend {
        fail_listing: true,
        ..StubBackend::default()
    };

    let result = listings::load_listings_page(&backend, &FilterState::default(), None).await;
    assert!(matches!(result, Err(ServiceError::Api(_))));
}

#[actix_web::test]
async fn house_page_collects_activities_cart_and_quote() {
    let dir = TempDir::new().unwrap();
    let carts = CartRegistry::new(Arc::new(FileCartStorage::new(dir.path())));
    carts
        .cart(Some(house_id(1)))
        .add(sample_activity(7, "20.00"));

    let mut backend = StubBackend::with_houses(1);
    backend.activities = vec![sample_activity(7, "20.00"), sample_activity(8, "0.00")];

    let filters = parse_query("start_date=2025-01-01&end_date=2025-01-04");
    let data = house::load_house_page(
        &backend,
        "http://localhost:8080",
        &carts,
        house_id(1),
        &filters,
        None,
    )
    .await
    .unwrap();

    assert_eq!(data.activities.len(), 2);
    assert_eq!(data.cart.len(), 1);
    // Sample houses cost 50.00 a night; three nights plus one paid activity.
    assert_eq!(
        data.quote,
        PriceQuote::Stay {
            total: 170.0,
            nights: 3,
            paid_activities: 1,
        }
    );
    // Images come back sorted by their order column, resolved to URLs.
    assert_eq!(
        data.images.iter().map(|i| i.url.as_str()).collect::<Vec<_>>(),
        vec![
            "http://localhost:8080/storage/houses/a.jpg",
            "http://localhost:8080/storage/houses/b.jpg",
        ]
    );
}

#[actix_web::test]
async fn unknown_house_is_not_found() {
    let dir = TempDir::new().unwrap();
    let carts = CartRegistry::new(Arc::new(FileCartStorage::new(dir.path())));
    let backend = StubBackend::with_houses(1);

    let result = house::load_house_page(
        &backend,
        "http://localhost:8080",
        &carts,
        house_id(99),
        &FilterState::default(),
        None,
    )
    .await;

    assert!(matches!(result, Err(ServiceError::NotFound)));
}

#[actix_web::test]
async fn favorite_toggle_returns_the_new_state() {
    let backend = StubBackend::with_houses(1);

    let state = house::toggle_favorite(&backend, house_id(1), false, "token")
        .await
        .unwrap();
    assert!(state);

    let state = house::toggle_favorite(&backend, house_id(1), true, "token")
        .await
        .unwrap();
    assert!(!state);
}

#[actix_web::test]
async fn favorite_toggle_propagates_rejection() {
    let backend = StubBackend {
        fail_favorite: true,
        ..StubBackend::default()
    };

    let result = house::toggle_favorite(&backend, house_id(1), false, "token").await;
    assert!(result.is_err());
}

#[actix_web::test]
async fn login_returns_the_backend_token() {
    let backend = StubBackend::with_houses(0);

    let token = auth::login(
        &backend,
        LoginForm {
            email: "ana@example.com".to_string(),
            password: "correct horse".to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(token, "stub-token");
}

#[actix_web::test]
async fn login_maps_field_errors() {
    let backend = StubBackend::with_houses(0);

    let result = auth::login(
        &backend,
        LoginForm {
            email: "ana@example.com".to_string(),
            password: "wrong".to_string(),
        },
    )
    .await;

    let Err(ServiceError::Validation { errors, .. }) = result else {
        panic!("expected field errors");
    };
    assert!(errors.contains_key("password"));
}

#[actix_web::test]
async fn invalid_login_form_never_reaches_the_backend() {
    let backend = StubBackend::with_houses(0);

    let result = auth::login(
        &backend,
        LoginForm {
            email: "not-an-email".to_string(),
            password: "x".to_string(),
        },
    )
    .await;

    assert!(matches!(result, Err(ServiceError::Form(_))));
}

#[actix_web::test]
async fn register_validates_password_confirmation() {
    let backend = StubBackend::with_houses(0);

    let result = auth::register(
        &backend,
        RegisterForm {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "long-enough-password".to_string(),
            password_confirmation: "different".to_string(),
            role: "Traveller".to_string(),
        },
    )
    .await;

    let Err(ServiceError::Validation { errors, .. }) = result else {
        panic!("expected field errors");
    };
    assert!(errors.contains_key("password_confirmation"));
}

#[actix_web::test]
async fn register_accepts_a_valid_form() {
    let backend = StubBackend::with_houses(0);

    auth::register(
        &backend,
        RegisterForm {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "long-enough-password".to_string(),
            password_confirmation: "long-enough-password".to_string(),
            role: "Host".to_string(),
        },
    )
    .await
    .unwrap();
}

#[test]
fn sample_house_shape_matches_the_backend_payload() {
    let house = sample_house(4);
    assert_eq!(house.id, house_id(4));
    assert_eq!(house.nightly_rate(), 50.0);
    let orders: Vec<i32> = house.sorted_images().iter().map(|i| i.order).collect();
    assert_eq!(orders, vec![1, 2]);
}
