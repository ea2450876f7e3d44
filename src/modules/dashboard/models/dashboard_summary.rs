use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::{AppError, Result};
use crate::modules::revenue::models::Period;

pub const DEFAULT_TOP_HOSTS: u32 = 10;
pub const MAX_TOP_HOSTS: u32 = 100;

/// Headline counts for the admin dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Completed bookings, all time
    pub total_bookings: u64,
    /// Gross booking revenue, all time
    pub total_revenue: Decimal,
    pub total_platform_fees: Decimal,
    /// Hosts with at least one completed booking
    pub active_hosts: u64,
    /// Completed bookings since local midnight
    pub bookings_today: u64,
    pub pending_payout_amount: Decimal,
    pub pending_payout_count: u64,
}

/// Raw query string of `GET /top-hosts`
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TopHostsQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
}

impl TopHostsQuery {
    /// Validated `(limit, period)`; defaults are 10 hosts over the current month
    pub fn resolve(&self) -> Result<(u32, Period)> {
        let limit = self.limit.unwrap_or(DEFAULT_TOP_HOSTS);
        if limit == 0 || limit > MAX_TOP_HOSTS {
            return Err(AppError::validation(format!(
                "limit must be between 1 and {}",
                MAX_TOP_HOSTS
            )));
        }

        let period = Period::from_query(self.period.as_deref())?;
        Ok((limit, period))
    }
}

/// Per-host revenue row as returned by the ranking query
#[derive(Debug, Clone, FromRow)]
pub struct HostRevenueRow {
    pub host_id: String,
    pub host_name: Option<String>,
    pub total_revenue: Decimal,
    pub total_platform_fees: Decimal,
    pub booking_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopHost {
    /// 1-based rank by gross booking revenue
    pub rank: u32,
    pub host_id: String,
    pub host_name: String,
    pub total_revenue: Decimal,
    pub total_platform_fees: Decimal,
    pub booking_count: u64,
}

impl TopHost {
    /// Rank rows that are already ordered by revenue
    pub fn rank_rows(rows: Vec<HostRevenueRow>) -> Vec<TopHost> {
        rows.into_iter()
            .zip(1u32..)
            .map(|(row, rank)| TopHost {
                rank,
                host_name: row.host_name.unwrap_or_else(|| row.host_id.clone()),
                host_id: row.host_id,
                total_revenue: row.total_revenue,
                total_platform_fees: row.total_platform_fees,
                booking_count: row.booking_count.max(0) as u64,
            })
            .collect()
    }
}
