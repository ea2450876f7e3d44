use async_trait::async_trait;
use tracing::error;

use crate::core::{AppError, Result};
use crate::modules::revenue::models::DateRange;
use crate::modules::transactions::{Transaction, TransactionRepository};

/// Source of settled transactions for revenue aggregation
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Completed transactions whose `created_at` falls inside `range`.
    ///
    /// Failures are reported as [`AppError::DataUnavailable`].
    async fn settled_transactions(&self, range: &DateRange) -> Result<Vec<Transaction>>;
}

#[async_trait]
impl TransactionStore for TransactionRepository {
    async fn settled_transactions(&self, range: &DateRange) -> Result<Vec<Transaction>> {
        self.find_settled(range.start, range.end).await.map_err(|e| {
            error!("Settled transaction query failed: {}", e);
            AppError::data_unavailable(format!("Transaction store query failed: {}", e))
        })
    }
}
