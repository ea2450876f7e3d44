use std::sync::{Mutex, MutexGuard, PoisonError};

use super::api_client::AdminApiClient;
use super::presentation::SummaryView;
use crate::core::Result;
use crate::modules::revenue::{Period, RevenueSummary};

/// What the revenue page currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardView {
    Idle,
    Loading {
        period: Period,
    },
    Ready {
        period: Period,
        view: SummaryView,
    },
    /// `retryable` drives the retry button; it is set for operational
    /// failures such as an unreachable transaction store.
    Failed {
        period: Period,
        message: String,
        retryable: bool,
    },
}

/// Identifies one revenue-summary request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    generation: u64,
    period: Period,
}

impl RequestToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn period(&self) -> Period {
        self.period
    }
}

struct DashboardState {
    latest: u64,
    view: DashboardView,
}

/// State container for the revenue page
///
/// Each period change starts a new generation. A response is applied only
/// if its token still carries the latest generation, so a slow response for
/// an older period never overwrites newer state.
pub struct RevenueDashboard {
    state: Mutex<DashboardState>,
}

impl Default for RevenueDashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl RevenueDashboard {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(DashboardState {
                latest: 0,
                view: DashboardView::Idle,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DashboardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a request for `period`, superseding any request in flight
    pub fn begin_request(&self, period: Period) -> RequestToken {
        let mut state = self.lock();
        state.latest += 1;
        state.view = DashboardView::Loading { period };

        RequestToken {
            generation: state.latest,
            period,
        }
    }

    /// Apply a response; returns `false` when the token is stale and the
    /// response was discarded
    pub fn apply(&self, token: RequestToken, result: Result<RevenueSummary>) -> bool {
        let next = match result.and_then(|summary| SummaryView::from_summary(&summary)) {
            Ok(view) => DashboardView::Ready {
                period: token.period,
                view,
            },
            Err(e) => DashboardView::Failed {
                period: token.period,
                message: e.to_string(),
                retryable: e.is_retryable(),
            },
        };

        let mut state = self.lock();
        if token.generation != state.latest {
            tracing::debug!(
                generation = token.generation,
                latest = state.latest,
                period = %token.period,
                "Discarding stale revenue summary response"
            );
            return false;
        }

        state.view = next;
        true
    }

    /// Fetch and apply the summary for `period`
    pub async fn refresh(&self, client: &AdminApiClient, period: Period) -> bool {
        let token = self.begin_request(period);
        let result = client.revenue_summary(period).await;
        self.apply(token, result)
    }

    /// Re-issue the request for the period currently shown
    pub async fn retry(&self, client: &AdminApiClient) -> bool {
        let period = self.current_period().unwrap_or_default();
        self.refresh(client, period).await
    }

    pub fn view(&self) -> DashboardView {
        self.lock().view.clone()
    }

    pub fn generation(&self) -> u64 {
        self.lock().latest
    }

    pub fn current_period(&self) -> Option<Period> {
        match &self.lock().view {
            DashboardView::Idle => None,
            DashboardView::Loading { period }
            | DashboardView::Ready { period, .. }
            | DashboardView::Failed { period, .. } => Some(*period),
        }
    }
}
