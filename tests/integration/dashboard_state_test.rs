// Integration test for the dashboard state container
//
// A slow response for an earlier period must never replace the state of
// a later period change. Uses a real server whose store delays the first
// query.

#[path = "../helpers/mod.rs"]
mod helpers;

use rust_decimal_macros::dec;
use std::sync::Arc;
use std::time::Duration;

use rental_revenue::client::{AdminApiClient, DashboardView, RevenueDashboard};
use rental_revenue::revenue::Period;

use helpers::*;

fn client_for(srv: &TestServer) -> AdminApiClient {
    AdminApiClient::with_options(srv.url("/"), TEST_API_KEY, Duration::from_secs(5), 0).unwrap()
}

#[actix_web::test]
async fn test_slow_stale_response_is_discarded() {
    let store = MemoryStore::new(vec![
        TestDataFactory::recent("card", dec!(100), 0),
        TestDataFactory::transaction(
            "gcash",
            dec!(900),
            chrono::Utc::now() - chrono::Duration::days(500),
        ),
    ])
    .with_delays([Duration::from_millis(800)]);
    let srv = spawn_test_server(TestState::with_store(Arc::new(store)));
    let client = client_for(&srv);
    let dashboard = RevenueDashboard::new();

    let (all_applied, today_applied) = tokio::join!(
        dashboard.refresh(&client, Period::All),
        async {
            tokio::time::sleep(Duration::from_millis(150)).await;
            dashboard.refresh(&client, Period::Today).await
        }
    );

    assert!(!all_applied, "stale 'all' response must be discarded");
    assert!(today_applied);
    assert_eq!(dashboard.generation(), 2);

    match dashboard.view() {
        DashboardView::Ready { period, view } => {
            assert_eq!(period, Period::Today);
            assert_eq!(view.card("Total Platform Revenue"), Some("₱100.00"));
        }
        other => panic!("unexpected view: {:?}", other),
    }
}

#[actix_web::test]
async fn test_sequential_refreshes_all_apply() {
    let store = MemoryStore::new(vec![TestDataFactory::recent("maya", dec!(42), 0)]);
    let srv = spawn_test_server(TestState::with_store(Arc::new(store)));
    let client = client_for(&srv);
    let dashboard = RevenueDashboard::new();

    assert!(dashboard.refresh(&client, Period::Week).await);
    assert!(dashboard.refresh(&client, Period::Year).await);

    assert_eq!(dashboard.current_period(), Some(Period::Year));
}

#[actix_web::test]
async fn test_outage_shows_retry_then_recovers() {
    let store = MemoryStore::new(vec![TestDataFactory::recent("card", dec!(10), 0)]).failing_first(1);
    let srv = spawn_test_server(TestState::with_store(Arc::new(store)));
    let client = client_for(&srv);
    let dashboard = RevenueDashboard::new();

    assert!(dashboard.refresh(&client, Period::Month).await);
    match dashboard.view() {
        DashboardView::Failed {
            period,
            message,
            retryable,
        } => {
            assert_eq!(period, Period::Month);
            assert!(message.contains("Data unavailable"));
            assert!(retryable);
        }
        other => panic!("expected failure, got {:?}", other),
    }

    assert!(dashboard.retry(&client).await);
    assert!(matches!(
        dashboard.view(),
        DashboardView::Ready {
            period: Period::Month,
            ..
        }
    ));
}
