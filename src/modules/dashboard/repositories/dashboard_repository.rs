use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{MySql, MySqlPool, QueryBuilder};

use crate::core::Result;
use crate::modules::dashboard::models::HostRevenueRow;
use crate::modules::revenue::models::DateRange;

/// Aggregate queries backing the dashboard counters and host ranking
pub struct DashboardRepository {
    pool: MySqlPool,
}

/// Raw all-time totals over completed transactions
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BookingTotals {
    pub total_bookings: i64,
    pub total_revenue: Decimal,
    pub total_platform_fees: Decimal,
    pub active_hosts: i64,
}

impl DashboardRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn booking_totals(&self) -> Result<BookingTotals> {
        let totals = sqlx::query_as::<_, BookingTotals>(
            r#"
            SELECT
                COUNT(*) AS total_bookings,
                COALESCE(SUM(amount), 0) AS total_revenue,
                COALESCE(SUM(platform_fee), 0) AS total_platform_fees,
                COUNT(DISTINCT host_id) AS active_hosts
            FROM transactions
            WHERE status = 'completed'
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(totals)
    }

    /// Completed bookings settled at or after `since`
    pub async fn bookings_since(&self, since: DateTime<Utc>) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM transactions
            WHERE status = 'completed' AND created_at >= ?
            "#,
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// `(count, amount)` of host earnings still waiting for payout
    pub async fn pending_payouts(&self) -> Result<(i64, Decimal)> {
        let row: (i64, Decimal) = sqlx::query_as(
            r#"
            SELECT COUNT(*), COALESCE(SUM(amount), 0)
            FROM host_earnings
            WHERE status = 'pending'
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Hosts ordered by gross booking revenue within `range`, highest first
    pub async fn top_hosts(&self, range: &DateRange, limit: u32) -> Result<Vec<HostRevenueRow>> {
        let mut query: QueryBuilder<MySql> = QueryBuilder::new(
            r#"
            SELECT
                t.host_id AS host_id,
                h.name AS host_name,
                SUM(t.amount) AS total_revenue,
                SUM(t.platform_fee) AS total_platform_fees,
                COUNT(*) AS booking_count
            FROM transactions t
            LEFT JOIN hosts h ON h.id = t.host_id
            WHERE t.status = 'completed'
            "#,
        );

        if let Some(start) = range.start {
            query.push(" AND t.created_at >= ").push_bind(start);
        }
        query
            .push(" AND t.created_at <= ")
            .push_bind(range.end)
            .push(" GROUP BY t.host_id, h.name ORDER BY total_revenue DESC, t.host_id ASC LIMIT ")
            .push_bind(limit);

        let rows = query
            .build_query_as::<HostRevenueRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}
