use chrono::{DateTime, Utc};
use sqlx::{MySql, MySqlPool, QueryBuilder};

use super::super::models::{Transaction, TransactionFilter, TransactionStatus};
use crate::core::Result;

const TRANSACTION_COLUMNS: &str = "id, booking_id, host_id, amount, platform_fee, \
     payment_method, status, created_at";

/// Repository for booking payment transactions
pub struct TransactionRepository {
    pool: MySqlPool,
}

impl TransactionRepository {
    /// Create a new TransactionRepository
    ///
    /// # Arguments
    /// * `pool` - Database connection pool
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Get the database connection pool
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Completed transactions settled in `[from, until]`, oldest first.
    ///
    /// `from = None` means no lower bound.
    pub async fn find_settled(
        &self,
        from: Option<DateTime<Utc>>,
        until: DateTime<Utc>,
    ) -> std::result::Result<Vec<Transaction>, sqlx::Error> {
        let mut query: QueryBuilder<MySql> = QueryBuilder::new(format!(
            "SELECT {} FROM transactions WHERE status = ",
            TRANSACTION_COLUMNS
        ));
        query.push_bind(TransactionStatus::Completed.to_string());

        if let Some(from) = from {
            query.push(" AND created_at >= ").push_bind(from);
        }
        query.push(" AND created_at <= ").push_bind(until);
        query.push(" ORDER BY created_at ASC, id ASC");

        query.build_query_as::<Transaction>().fetch_all(&self.pool).await
    }

    /// One page of transactions matching `filter`, newest first, plus the total match count
    pub async fn list(&self, filter: &TransactionFilter) -> Result<(Vec<Transaction>, u64)> {
        let mut count_query: QueryBuilder<MySql> =
            QueryBuilder::new("SELECT COUNT(*) FROM transactions WHERE 1 = 1");
        push_filters(&mut count_query, filter);
        let total = count_query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        let mut page_query: QueryBuilder<MySql> = QueryBuilder::new(format!(
            "SELECT {} FROM transactions WHERE 1 = 1",
            TRANSACTION_COLUMNS
        ));
        push_filters(&mut page_query, filter);
        page_query
            .push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(filter.limit)
            .push(" OFFSET ")
            .push_bind(filter.offset());

        let transactions = page_query
            .build_query_as::<Transaction>()
            .fetch_all(&self.pool)
            .await?;

        Ok((transactions, total.max(0) as u64))
    }
}

fn push_filters(query: &mut QueryBuilder<'_, MySql>, filter: &TransactionFilter) {
    if let Some(method) = &filter.payment_method {
        query
            .push(" AND payment_method = ")
            .push_bind(method.code().to_string());
    }
    if let Some(from) = filter.from {
        query.push(" AND created_at >= ").push_bind(from);
    }
    if let Some(until) = filter.until {
        query.push(" AND created_at < ").push_bind(until);
    }
}

// Queries against a live database are exercised by the #[ignore]d tests in tests/integration/
