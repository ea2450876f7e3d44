// Test Data Factory
//
// Builds transactions relative to "now" so period filters always see them,
// plus SQL seeding for database-backed tests. Uses UUIDs for isolation.

use chrono::{DateTime, Duration, FixedOffset, Utc};
use rust_decimal::Decimal;
use sqlx::MySqlPool;
use uuid::Uuid;

use rental_revenue::core::PaymentMethod;
use rental_revenue::transactions::Transaction;

pub const TEST_API_KEY: &str = "test-admin-key";

/// Platform offset used throughout the tests (Manila, UTC+8)
pub fn manila() -> FixedOffset {
    FixedOffset::east_opt(8 * 3600).unwrap()
}

/// Test data factory for generating unique test data
pub struct TestDataFactory;

impl TestDataFactory {
    /// Unique ID in format "TEST-{uuid}"
    pub fn random_id() -> String {
        format!("TEST-{}", Uuid::new_v4())
    }

    /// Completed transaction with a 10x amount-to-fee ratio
    pub fn transaction(
        method: &str,
        platform_fee: Decimal,
        created_at: DateTime<Utc>,
    ) -> Transaction {
        Transaction::completed(
            Self::random_id(),
            "host-1",
            platform_fee * Decimal::from(10),
            platform_fee,
            PaymentMethod::from(method),
            created_at,
        )
        .expect("valid test transaction")
    }

    /// Completed transaction settled `minutes` ago
    pub fn recent(method: &str, platform_fee: Decimal, minutes: i64) -> Transaction {
        Self::transaction(method, platform_fee, Utc::now() - Duration::minutes(minutes))
    }
}

/// Insert a host row
pub async fn seed_host(pool: &MySqlPool, name: &str) -> String {
    let host_id = TestDataFactory::random_id();

    sqlx::query("INSERT INTO hosts (id, name, email) VALUES (?, ?, ?)")
        .bind(&host_id)
        .bind(name)
        .bind(format!("{}@example.test", host_id.to_lowercase()))
        .execute(pool)
        .await
        .unwrap_or_else(|e| panic!("Failed to seed host {}: {}", host_id, e));

    host_id
}

/// Insert a completed transaction for `host_id`; returns its ID
pub async fn seed_transaction(
    pool: &MySqlPool,
    host_id: &str,
    method: &str,
    amount: Decimal,
    platform_fee: Decimal,
    created_at: DateTime<Utc>,
) -> String {
    let transaction = Transaction::completed(
        TestDataFactory::random_id(),
        host_id,
        amount,
        platform_fee,
        PaymentMethod::from(method),
        created_at,
    )
    .expect("valid test transaction");

    sqlx::query(
        r#"
        INSERT INTO transactions
            (id, booking_id, host_id, amount, platform_fee, payment_method, status, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&transaction.id)
    .bind(&transaction.booking_id)
    .bind(&transaction.host_id)
    .bind(transaction.amount)
    .bind(transaction.platform_fee)
    .bind(transaction.payment_method.code())
    .bind(transaction.status.to_string())
    .bind(transaction.created_at)
    .execute(pool)
    .await
    .unwrap_or_else(|e| panic!("Failed to seed transaction: {}", e));

    transaction.id
}

/// Insert a pending earning for `transaction_id`; returns its ID
pub async fn seed_pending_earning(
    pool: &MySqlPool,
    host_id: &str,
    transaction_id: &str,
    amount: Decimal,
) -> String {
    let earning_id = TestDataFactory::random_id();

    sqlx::query(
        "INSERT INTO host_earnings (id, host_id, transaction_id, amount, status) \
         VALUES (?, ?, ?, ?, 'pending')",
    )
    .bind(&earning_id)
    .bind(host_id)
    .bind(transaction_id)
    .bind(amount)
    .execute(pool)
    .await
    .unwrap_or_else(|e| panic!("Failed to seed earning: {}", e));

    earning_id
}
