use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::{AppError, Result};
use crate::modules::payouts::models::{
    HostPayoutOverview, PayoutReceipt, PayoutSettlement, ProcessPayoutRequest,
};
use crate::modules::payouts::repositories::PayoutStore;

/// Host payout workflow
pub struct PayoutService {
    store: Arc<dyn PayoutStore>,
}

impl PayoutService {
    pub fn new(store: Arc<dyn PayoutStore>) -> Self {
        Self { store }
    }

    /// Pending earnings and payout totals for one host
    ///
    /// # Errors
    /// * `NotFound` - unknown host
    pub async fn get_host_payout(&self, host_id: &str) -> Result<HostPayoutOverview> {
        let host = self
            .store
            .find_host(host_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Host '{}' not found", host_id)))?;

        let pending_earnings = self.store.pending_for_host(host_id).await?;
        let total_paid = self.store.total_paid_for_host(host_id).await?;
        let total_pending: Decimal = pending_earnings.iter().map(|e| e.amount).sum();

        Ok(HostPayoutOverview {
            host_id: host.id,
            host_name: host.name,
            pending_count: pending_earnings.len() as u64,
            pending_earnings,
            total_pending,
            total_paid,
        })
    }

    /// Mark a host's pending earnings as paid
    ///
    /// The store locks the earnings so two admins cannot pay the same
    /// earning twice. Nothing is written unless every requested earning
    /// belongs to the host and is still pending.
    ///
    /// # Errors
    /// * `Validation` - malformed request or earnings owned by another host
    /// * `NotFound` - unknown host or earning
    /// * `Conflict` - an earning was already paid
    pub async fn process_payout(&self, request: ProcessPayoutRequest) -> Result<PayoutReceipt> {
        let method = request.validate()?;

        if self.store.find_host(&request.host_id).await?.is_none() {
            return Err(AppError::not_found(format!(
                "Host '{}' not found",
                request.host_id
            )));
        }

        let settlement = PayoutSettlement {
            host_id: &request.host_id,
            earning_ids: &request.earning_ids,
            method,
            reference: request.reference.trim(),
            paid_at: Utc::now(),
        };

        let total_amount = match self.store.settle(&settlement).await {
            Ok(total) => total,
            Err(e) => {
                warn!(host_id = %request.host_id, error = %e, "Payout rejected");
                return Err(e);
            }
        };

        info!(
            host_id = %request.host_id,
            earnings = request.earning_ids.len(),
            total = %total_amount,
            method = %method,
            "Payout processed"
        );

        let paid_at = settlement.paid_at;
        let reference = settlement.reference.to_string();

        Ok(PayoutReceipt {
            host_id: request.host_id,
            earning_ids: request.earning_ids,
            total_amount,
            method,
            reference,
            paid_at,
        })
    }
}
