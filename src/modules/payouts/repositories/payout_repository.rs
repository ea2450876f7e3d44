use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{MySql, MySqlConnection, MySqlPool, QueryBuilder};

use crate::core::{AppError, Result};
use crate::modules::payouts::models::{
    verify_earnings, EarningStatus, Host, HostEarning, PayoutMethod, PayoutSettlement,
};

const EARNING_COLUMNS: &str = "id, host_id, transaction_id, amount, status, \
     payout_method, payout_reference, paid_at, created_at";

/// Storage for hosts and their earnings
#[async_trait]
pub trait PayoutStore: Send + Sync {
    async fn find_host(&self, host_id: &str) -> Result<Option<Host>>;

    /// Pending earnings for a host, oldest first
    async fn pending_for_host(&self, host_id: &str) -> Result<Vec<HostEarning>>;

    async fn total_paid_for_host(&self, host_id: &str) -> Result<Decimal>;

    /// Verify the settlement with [`verify_earnings`] and mark its earnings
    /// paid as one atomic step. Returns the payout total.
    ///
    /// Nothing is written when verification fails.
    async fn settle(&self, settlement: &PayoutSettlement<'_>) -> Result<Decimal>;
}

/// MySQL persistence for host earnings and payouts
pub struct PayoutRepository {
    pool: MySqlPool,
}

impl PayoutRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Lock the given earnings (`FOR UPDATE`) inside the caller's transaction
    async fn lock_earnings(
        conn: &mut MySqlConnection,
        earning_ids: &[String],
    ) -> Result<Vec<HostEarning>> {
        let mut query: QueryBuilder<MySql> = QueryBuilder::new(format!(
            "SELECT {} FROM host_earnings WHERE id IN (",
            EARNING_COLUMNS
        ));
        let mut ids = query.separated(", ");
        for id in earning_ids {
            ids.push_bind(id.clone());
        }
        ids.push_unseparated(") FOR UPDATE");

        let earnings = query
            .build_query_as::<HostEarning>()
            .fetch_all(&mut *conn)
            .await?;

        Ok(earnings)
    }

    /// Mark earnings as paid; returns the number of rows updated
    async fn mark_paid(
        conn: &mut MySqlConnection,
        earning_ids: &[String],
        method: PayoutMethod,
        reference: &str,
        paid_at: DateTime<Utc>,
    ) -> Result<u64> {
        let mut query: QueryBuilder<MySql> = QueryBuilder::new("UPDATE host_earnings SET status = ");
        query
            .push_bind(EarningStatus::Paid.to_string())
            .push(", payout_method = ")
            .push_bind(method.as_str())
            .push(", payout_reference = ")
            .push_bind(reference.to_string())
            .push(", paid_at = ")
            .push_bind(paid_at)
            .push(" WHERE status = ")
            .push_bind(EarningStatus::Pending.to_string())
            .push(" AND id IN (");

        let mut ids = query.separated(", ");
        for id in earning_ids {
            ids.push_bind(id.clone());
        }
        ids.push_unseparated(")");

        let result = query.build().execute(&mut *conn).await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl PayoutStore for PayoutRepository {
    async fn find_host(&self, host_id: &str) -> Result<Option<Host>> {
        let host = sqlx::query_as::<_, Host>("SELECT id, name, email FROM hosts WHERE id = ?")
            .bind(host_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(host)
    }

    async fn pending_for_host(&self, host_id: &str) -> Result<Vec<HostEarning>> {
        let earnings = sqlx::query_as::<_, HostEarning>(&format!(
            "SELECT {} FROM host_earnings WHERE host_id = ? AND status = ? \
             ORDER BY created_at ASC, id ASC",
            EARNING_COLUMNS
        ))
        .bind(host_id)
        .bind(EarningStatus::Pending.to_string())
        .fetch_all(&self.pool)
        .await?;

        Ok(earnings)
    }

    async fn total_paid_for_host(&self, host_id: &str) -> Result<Decimal> {
        let total: Decimal = sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount), 0) FROM host_earnings WHERE host_id = ? AND status = ?",
        )
        .bind(host_id)
        .bind(EarningStatus::Paid.to_string())
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    async fn settle(&self, settlement: &PayoutSettlement<'_>) -> Result<Decimal> {
        let mut tx = self.pool.begin().await?;

        let locked = Self::lock_earnings(&mut tx, settlement.earning_ids).await?;
        let total = match verify_earnings(settlement.host_id, settlement.earning_ids, &locked) {
            Ok(total) => total,
            Err(e) => {
                tx.rollback().await?;
                return Err(e);
            }
        };

        let updated = Self::mark_paid(
            &mut tx,
            settlement.earning_ids,
            settlement.method,
            settlement.reference,
            settlement.paid_at,
        )
        .await?;

        if updated != settlement.earning_ids.len() as u64 {
            tx.rollback().await?;
            return Err(AppError::conflict(
                "Earnings changed while the payout was being processed",
            ));
        }

        tx.commit().await?;

        Ok(total)
    }
}
