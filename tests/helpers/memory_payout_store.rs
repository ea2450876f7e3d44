// In-memory Payout Store
//
// Hosts and earnings held in a mutex. `settle` runs the same verification
// as the MySQL store and writes nothing when it fails.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rental_revenue::core::Result;
use rental_revenue::payouts::models::{
    verify_earnings, EarningStatus, Host, HostEarning, PayoutSettlement,
};
use rental_revenue::payouts::PayoutStore;

#[derive(Default)]
pub struct MemoryPayoutStore {
    hosts: Vec<Host>,
    earnings: Mutex<Vec<HostEarning>>,
    settlements: AtomicUsize,
}

impl MemoryPayoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, id: &str, name: &str) -> Self {
        self.hosts.push(Host {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{}@example.test", id),
        });
        self
    }

    pub fn with_pending(self, id: &str, host_id: &str, amount: Decimal) -> Self {
        self.earnings.lock().unwrap().push(HostEarning {
            id: id.to_string(),
            host_id: host_id.to_string(),
            transaction_id: format!("tx-{}", id),
            amount,
            status: EarningStatus::Pending,
            payout_method: None,
            payout_reference: None,
            paid_at: None,
            created_at: Utc::now(),
        });
        self
    }

    pub fn earning(&self, id: &str) -> Option<HostEarning> {
        self.earnings
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned()
    }

    /// Number of `settle` calls that reached the store
    pub fn settlements(&self) -> usize {
        self.settlements.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PayoutStore for MemoryPayoutStore {
    async fn find_host(&self, host_id: &str) -> Result<Option<Host>> {
        Ok(self.hosts.iter().find(|h| h.id == host_id).cloned())
    }

    async fn pending_for_host(&self, host_id: &str) -> Result<Vec<HostEarning>> {
        Ok(self
            .earnings
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.host_id == host_id && e.status == EarningStatus::Pending)
            .cloned()
            .collect())
    }

    async fn total_paid_for_host(&self, host_id: &str) -> Result<Decimal> {
        Ok(self
            .earnings
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.host_id == host_id && e.status == EarningStatus::Paid)
            .map(|e| e.amount)
            .sum())
    }

    async fn settle(&self, settlement: &PayoutSettlement<'_>) -> Result<Decimal> {
        self.settlements.fetch_add(1, Ordering::SeqCst);
        let mut earnings = self.earnings.lock().unwrap();

        let locked: Vec<HostEarning> = earnings
            .iter()
            .filter(|e| settlement.earning_ids.contains(&e.id))
            .cloned()
            .collect();
        let total = verify_earnings(settlement.host_id, settlement.earning_ids, &locked)?;

        for earning in earnings
            .iter_mut()
            .filter(|e| settlement.earning_ids.contains(&e.id))
        {
            earning.status = EarningStatus::Paid;
            earning.payout_method = Some(settlement.method.to_string());
            earning.payout_reference = Some(settlement.reference.to_string());
            earning.paid_at = Some(settlement.paid_at);
        }

        Ok(total)
    }
}
