use chrono::FixedOffset;
use tracing::debug;

use super::super::models::{
    Pagination, TransactionFilter, TransactionListQuery, TransactionPage, TransactionView,
};
use super::super::repositories::TransactionRepository;
use crate::core::Result;

/// Transaction listing for the admin dashboard
pub struct TransactionService {
    transaction_repo: TransactionRepository,
    offset: FixedOffset,
}

impl TransactionService {
    /// Create a new TransactionService
    ///
    /// # Arguments
    /// * `transaction_repo` - Transaction repository
    /// * `offset` - Platform UTC offset used to interpret `startDate`/`endDate`
    pub fn new(transaction_repo: TransactionRepository, offset: FixedOffset) -> Self {
        Self {
            transaction_repo,
            offset,
        }
    }

    /// List transactions page by page, newest first
    ///
    /// # Errors
    /// * `Validation` - malformed page, limit or date parameters
    /// * `Database` - query failure
    pub async fn list_transactions(&self, query: &TransactionListQuery) -> Result<TransactionPage> {
        let filter = TransactionFilter::from_query(query, self.offset)?;

        let (transactions, total) = self.transaction_repo.list(&filter).await?;

        debug!(
            page = filter.page,
            limit = filter.limit,
            total,
            "Listed transactions"
        );

        Ok(TransactionPage {
            transactions: transactions.into_iter().map(TransactionView::from).collect(),
            pagination: Pagination::new(filter.page, filter.limit, total),
        })
    }
}
