//! Admin dashboard client side: HTTP client for the admin API, the
//! stale-response-safe dashboard state container and display shaping.

pub mod api_client;
pub mod dashboard_state;
pub mod presentation;

pub use api_client::AdminApiClient;
pub use dashboard_state::{DashboardView, RequestToken, RevenueDashboard};
pub use presentation::{MethodRow, SummaryCard, SummaryView, TrendPoint};
