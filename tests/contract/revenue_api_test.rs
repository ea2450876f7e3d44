// Contract tests for the admin revenue API
//
// Checks the {success, data|message} envelope, camelCase field names,
// decimal-as-string amounts and the status codes for each error kind.
// Uses the in-memory store, no database required.

#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::{test, App};
use rust_decimal_macros::dec;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use helpers::*;

macro_rules! init_app {
    ($state:expr) => {{
        let state = $state;
        test::init_service(App::new().configure(move |cfg| state.configure(cfg))).await
    }};
}

fn get(uri: &str) -> test::TestRequest {
    test::TestRequest::get()
        .uri(uri)
        .insert_header(("X-API-Key", TEST_API_KEY))
}

#[actix_web::test]
async fn test_revenue_summary_success_envelope() {
    let store = MemoryStore::new(vec![
        TestDataFactory::recent("card", dec!(100), 5),
        TestDataFactory::recent("gcash", dec!(50), 4),
        TestDataFactory::recent("card", dec!(200), 3),
    ]);
    let app = init_app!(TestState::with_store(Arc::new(store)));

    let resp = test::call_service(&app, get("/api/admin/revenue-summary?period=all").to_request()).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    let data = assert_envelope_success(&body);

    assert_amount(&data["summary"]["totalFees"], "350");
    assert_eq!(data["summary"]["totalBookings"], 3);
    assert!(data["summary"]["avgFee"].is_string());

    let methods = data["byPaymentMethod"].as_array().unwrap();
    assert_eq!(methods.len(), 2);
    assert_eq!(methods[0]["method"], "card");
    assert_eq!(methods[0]["label"], "Credit Card");
    assert_eq!(methods[0]["count"], 2);
    assert_amount(&methods[0]["totalFees"], "300");
    assert_amount(&methods[0]["avgPerBooking"], "150");

    let trend = data["monthlyTrend"].as_array().unwrap();
    assert!(!trend.is_empty());
    assert!(trend[0]["year"].is_i64());
    assert!(trend[0]["month"].is_u64());
}

#[actix_web::test]
async fn test_missing_period_defaults_to_month() {
    let store = Arc::new(MemoryStore::new(vec![TestDataFactory::transaction(
        "maya",
        dec!(75),
        chrono::Utc::now() - chrono::Duration::days(800),
    )]));
    let app = init_app!(TestState::with_store(store.clone()));

    let resp = test::call_service(&app, get("/api/admin/revenue-summary").to_request()).await;
    let body: Value = test::read_body_json(resp).await;
    let data = assert_envelope_success(&body);

    // the old transaction is outside the current month
    assert_eq!(data["summary"]["totalBookings"], 0);
    assert_eq!(store.calls(), 1);
}

#[actix_web::test]
async fn test_empty_period_is_zero_summary_not_error() {
    let app = init_app!(TestState::with_store(Arc::new(MemoryStore::empty())));

    let resp = test::call_service(&app, get("/api/admin/revenue-summary?period=today").to_request()).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    let data = assert_envelope_success(&body);
    assert_amount(&data["summary"]["totalFees"], "0");
    assert_amount(&data["summary"]["avgFee"], "0");
    assert_eq!(data["byPaymentMethod"], serde_json::json!([]));
    assert_eq!(data["monthlyTrend"], serde_json::json!([]));
}

#[actix_web::test]
async fn test_invalid_period_is_rejected_before_querying() {
    let store = Arc::new(MemoryStore::empty());
    let app = init_app!(TestState::with_store(store.clone()));

    let resp = test::call_service(&app, get("/api/admin/revenue-summary?period=decade").to_request()).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    let message = assert_envelope_failure(&body, "INVALID_PERIOD");
    assert!(message.contains("decade"));
    assert_eq!(store.calls(), 0);
}

#[actix_web::test]
async fn test_store_failure_is_data_unavailable() {
    let app = init_app!(TestState::with_store(Arc::new(MemoryStore::failing())));

    let resp = test::call_service(&app, get("/api/admin/revenue-summary?period=year").to_request()).await;
    assert_eq!(resp.status(), 503);

    let body: Value = test::read_body_json(resp).await;
    let message = assert_envelope_failure(&body, "DATA_UNAVAILABLE");
    assert!(message.contains("connection refused"));
}

#[actix_web::test]
async fn test_slow_store_times_out_as_data_unavailable() {
    let store = MemoryStore::empty().with_delays([Duration::from_secs(30)]);
    let state = TestState::new(Arc::new(store), lazy_pool(), Duration::from_millis(100));
    let app = init_app!(state);

    let resp = test::call_service(&app, get("/api/admin/revenue-summary?period=week").to_request()).await;
    assert_eq!(resp.status(), 503);

    let body: Value = test::read_body_json(resp).await;
    let message = assert_envelope_failure(&body, "DATA_UNAVAILABLE");
    assert!(message.contains("timed out"));
}

#[actix_web::test]
async fn test_invalid_query_parameter_is_validation_envelope() {
    let app = init_app!(TestState::with_store(Arc::new(MemoryStore::empty())));

    let resp = test::call_service(&app, get("/api/admin/top-hosts?limit=lots").to_request()).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_envelope_failure(&body, "VALIDATION_ERROR");
}

#[actix_web::test]
async fn test_admin_routes_require_api_key() {
    let app = init_app!(TestState::with_store(Arc::new(MemoryStore::empty())));

    let req = test::TestRequest::get()
        .uri("/api/admin/revenue-summary")
        .to_request();
    let err = test::try_call_service(&app, req).await.unwrap_err();
    assert_eq!(err.as_response_error().status_code(), 401);

    let resp = err.error_response();
    let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_envelope_failure(&body, "UNAUTHORIZED");
}

#[actix_web::test]
async fn test_health_is_public() {
    let app = init_app!(TestState::with_store(Arc::new(MemoryStore::empty())));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), 200);
}
