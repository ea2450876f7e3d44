// Integration test for the revenue summary flow
//
// Real HTTP server (actix-test) in front of the in-memory store, queried
// through AdminApiClient:
// 1. Period selection reaches the store and the aggregate comes back
// 2. The client unwraps success envelopes into typed summaries
// 3. Failure envelopes surface the server's message and retryability

#[path = "../helpers/mod.rs"]
mod helpers;

use rust_decimal_macros::dec;
use std::sync::Arc;
use std::time::Duration;

use rental_revenue::client::{AdminApiClient, SummaryView};
use rental_revenue::core::AppError;
use rental_revenue::revenue::Period;

use helpers::*;

fn client_for(srv: &TestServer, api_key: &str) -> AdminApiClient {
    AdminApiClient::with_options(srv.url("/"), api_key, Duration::from_secs(5), 0).unwrap()
}

#[actix_web::test]
async fn test_client_receives_typed_summary() {
    let store = MemoryStore::new(vec![
        TestDataFactory::recent("property", dec!(1500), 30),
        TestDataFactory::recent("gcash", dec!(250.25), 20),
        TestDataFactory::recent("property", dec!(500), 10),
    ]);
    let srv = spawn_test_server(TestState::with_store(Arc::new(store)));
    let client = client_for(&srv, TEST_API_KEY);

    let summary = client.revenue_summary(Period::All).await.unwrap();

    assert_eq!(summary.summary.total_fees, dec!(2250.25));
    assert_eq!(summary.summary.total_bookings, 3);
    assert_eq!(summary.by_payment_method.len(), 2);
    assert_eq!(summary.by_payment_method[0].label, "Pay at Property");
    assert_eq!(summary.by_payment_method[0].total_fees, dec!(2000));

    let view = SummaryView::from_summary(&summary).unwrap();
    assert_eq!(view.card("Total Platform Revenue"), Some("₱2,250.25"));
    assert_eq!(view.card("Average Fee per Booking"), Some("₱750.08"));
}

#[actix_web::test]
async fn test_each_period_is_accepted() {
    let store = Arc::new(MemoryStore::new(vec![TestDataFactory::recent(
        "card",
        dec!(10),
        0,
    )]));
    let srv = spawn_test_server(TestState::with_store(store.clone()));
    let client = client_for(&srv, TEST_API_KEY);

    for period in Period::ALL {
        let summary = client.revenue_summary(period).await.unwrap();
        assert_eq!(summary.summary.total_bookings, 1, "period {}", period);
    }
    assert_eq!(store.calls(), Period::ALL.len());
}

#[actix_web::test]
async fn test_store_outage_is_retryable_remote_error() {
    let srv = spawn_test_server(TestState::with_store(Arc::new(MemoryStore::failing())));
    let client = client_for(&srv, TEST_API_KEY);

    let err = client.revenue_summary(Period::Month).await.unwrap_err();

    assert!(matches!(err, AppError::Remote { ref code, .. } if code == "DATA_UNAVAILABLE"));
    assert!(err.to_string().contains("connection refused"));
    assert!(err.is_retryable());
}

#[actix_web::test]
async fn test_wrong_api_key_is_not_retryable() {
    let srv = spawn_test_server(TestState::with_store(Arc::new(MemoryStore::empty())));
    let client = client_for(&srv, "not-the-key");

    let err = client.revenue_summary(Period::Month).await.unwrap_err();

    assert!(matches!(err, AppError::Remote { ref code, .. } if code == "UNAUTHORIZED"));
    assert!(!err.is_retryable());
}

#[actix_web::test]
async fn test_unknown_period_over_the_wire() {
    let srv = spawn_test_server(TestState::with_store(Arc::new(MemoryStore::empty())));

    let mut response = srv
        .get("/api/admin/revenue-summary?period=fortnight")
        .insert_header(("X-API-Key", TEST_API_KEY))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let body: serde_json::Value = response.json().await.unwrap();
    let message = assert_envelope_failure(&body, "INVALID_PERIOD");
    assert!(message.contains("fortnight"));
}
