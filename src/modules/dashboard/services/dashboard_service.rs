use tracing::info;

use crate::core::Result;
use crate::modules::dashboard::models::{DashboardSummary, TopHost, TopHostsQuery};
use crate::modules::dashboard::repositories::DashboardRepository;
use crate::modules::revenue::models::{Period, PeriodFilter};

/// Dashboard counters and host ranking
pub struct DashboardService {
    dashboard_repo: DashboardRepository,
    periods: PeriodFilter,
}

impl DashboardService {
    pub fn new(dashboard_repo: DashboardRepository, periods: PeriodFilter) -> Self {
        Self {
            dashboard_repo,
            periods,
        }
    }

    /// Headline counts shown above the revenue charts
    pub async fn get_dashboard_summary(&self) -> Result<DashboardSummary> {
        let totals = self.dashboard_repo.booking_totals().await?;

        let today = self.periods.resolve(Period::Today);
        let bookings_today = match today.start {
            Some(midnight) => self.dashboard_repo.bookings_since(midnight).await?,
            None => totals.total_bookings,
        };

        let (pending_count, pending_amount) = self.dashboard_repo.pending_payouts().await?;

        Ok(DashboardSummary {
            total_bookings: totals.total_bookings.max(0) as u64,
            total_revenue: totals.total_revenue,
            total_platform_fees: totals.total_platform_fees,
            active_hosts: totals.active_hosts.max(0) as u64,
            bookings_today: bookings_today.max(0) as u64,
            pending_payout_amount: pending_amount,
            pending_payout_count: pending_count.max(0) as u64,
        })
    }

    /// Hosts ranked by gross booking revenue for the requested period
    ///
    /// # Errors
    /// * `Validation` - limit outside 1..=100
    /// * `InvalidPeriod` - unknown period selector
    pub async fn get_top_hosts(&self, query: &TopHostsQuery) -> Result<Vec<TopHost>> {
        let (limit, period) = query.resolve()?;
        let range = self.periods.resolve(period);

        let rows = self.dashboard_repo.top_hosts(&range, limit).await?;

        info!(period = %period, limit, hosts = rows.len(), "Top hosts ranked");

        Ok(TopHost::rank_rows(rows))
    }
}
