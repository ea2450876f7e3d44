// In-memory Transaction Store
//
// Stands in for MySQL when a test needs controlled latency or failures.
// Applies the same range filter as the SQL query.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use rental_revenue::core::{AppError, Result};
use rental_revenue::revenue::{DateRange, TransactionStore};
use rental_revenue::transactions::Transaction;

/// Transaction store backed by a fixed snapshot
///
/// # Behavior
/// - Returns settled transactions inside the requested range, oldest first
/// - Each call sleeps for the next queued delay (none once the queue is empty)
/// - `failing()` stores report `DataUnavailable` on every call,
///   `failing_first(n)` only on the first `n`
pub struct MemoryStore {
    transactions: Vec<Transaction>,
    delays: Mutex<VecDeque<Duration>>,
    failures_left: AtomicUsize,
    calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions,
            delays: Mutex::new(VecDeque::new()),
            failures_left: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn failing() -> Self {
        Self::empty().failing_first(usize::MAX)
    }

    pub fn failing_first(self, failures: usize) -> Self {
        self.failures_left.store(failures, Ordering::SeqCst);
        self
    }

    /// Queue per-call delays, consumed in call order
    pub fn with_delays(self, delays: impl IntoIterator<Item = Duration>) -> Self {
        self.delays.lock().unwrap().extend(delays);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn settled_transactions(&self, range: &DateRange) -> Result<Vec<Transaction>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let delay = self.delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let failing = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if failing {
            return Err(AppError::data_unavailable("connection refused"));
        }

        let mut matching: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|t| t.is_settled() && range.contains(t.created_at))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        Ok(matching)
    }
}
