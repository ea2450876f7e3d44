use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::core::{AppError, Result};
use crate::modules::revenue::models::{Period, PeriodFilter, RevenueSummary};
use crate::modules::revenue::repositories::TransactionStore;
use crate::modules::revenue::services::RevenueAggregator;

/// Orchestrates period resolution, the store query and aggregation.
///
/// Identical `(period, store state)` pairs always produce the same summary;
/// the service holds no mutable state.
pub struct RevenueService {
    store: Arc<dyn TransactionStore>,
    periods: PeriodFilter,
    aggregator: RevenueAggregator,
    query_timeout: Duration,
}

impl RevenueService {
    /// Create a new revenue service
    ///
    /// # Arguments
    /// * `store` - Settled transaction source
    /// * `periods` - Period resolver bound to the platform offset
    /// * `query_timeout` - Upper bound on the store query
    pub fn new(
        store: Arc<dyn TransactionStore>,
        periods: PeriodFilter,
        query_timeout: Duration,
    ) -> Self {
        Self {
            store,
            aggregator: RevenueAggregator::new(periods.offset()),
            periods,
            query_timeout,
        }
    }

    /// Summarize platform revenue for `period`
    ///
    /// # Errors
    /// `DataUnavailable` when the store fails or does not answer within the
    /// query timeout. No partial summary is ever returned.
    pub async fn get_platform_revenue_summary(&self, period: Period) -> Result<RevenueSummary> {
        let range = self.periods.resolve(period);

        let transactions =
            match tokio::time::timeout(self.query_timeout, self.store.settled_transactions(&range))
                .await
            {
                Ok(Ok(transactions)) => transactions,
                Ok(Err(AppError::DataUnavailable(msg))) => {
                    return Err(AppError::DataUnavailable(msg));
                }
                Ok(Err(other)) => {
                    return Err(AppError::data_unavailable(other.to_string()));
                }
                Err(_) => {
                    warn!(
                        period = %period,
                        timeout_ms = self.query_timeout.as_millis() as u64,
                        "Revenue query timed out"
                    );
                    return Err(AppError::data_unavailable(format!(
                        "Revenue query timed out after {} ms",
                        self.query_timeout.as_millis()
                    )));
                }
            };

        let summary = self.aggregator.aggregate(&transactions);
        if summary.is_empty() {
            debug!(period = %period, "No settled transactions in range");
            return Ok(summary);
        }

        info!(
            period = %period,
            bookings = summary.summary.total_bookings,
            total_fees = %summary.summary.total_fees,
            "Revenue summary computed"
        );

        Ok(summary)
    }
}
