use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Url};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::core::{ApiResponse, AppError, Result};
use crate::middleware::API_KEY_HEADER;
use crate::modules::dashboard::models::{DashboardSummary, TopHost};
use crate::modules::payouts::models::{HostPayoutOverview, PayoutReceipt, ProcessPayoutRequest};
use crate::modules::revenue::{Period, RevenueSummary};
use crate::modules::transactions::models::{TransactionListQuery, TransactionPage};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_MAX_RETRIES: u32 = 3;

/// Client for the `/api/admin` endpoints
///
/// Every response is read through the `{success, data|message}` envelope;
/// a failure envelope becomes `AppError::Remote` carrying the server's
/// message. Reads are retried on transient failures, payouts are not.
#[derive(Clone)]
pub struct AdminApiClient {
    reads: ClientWithMiddleware,
    writes: ClientWithMiddleware,
    base_url: Url,
}

impl AdminApiClient {
    pub fn new(base_url: impl Into<String>, api_key: &str) -> Result<Self> {
        Self::with_options(base_url, api_key, DEFAULT_TIMEOUT, DEFAULT_MAX_RETRIES)
    }

    /// # Arguments
    /// * `base_url` - server root, e.g. `http://localhost:8080`
    /// * `api_key` - admin key sent as `X-API-Key`
    /// * `timeout` - per-attempt request timeout
    /// * `max_retries` - retries for reads on transient errors
    pub fn with_options(
        base_url: impl Into<String>,
        api_key: &str,
        timeout: Duration,
        max_retries: u32,
    ) -> Result<Self> {
        let base_url: String = base_url.into();
        let base_url = Url::parse(&base_url)
            .map_err(|e| AppError::Configuration(format!("Invalid base URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Configuration(format!(
                "Base URL '{}' cannot carry a path",
                base_url
            )));
        }

        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(api_key)
            .map_err(|_| AppError::Configuration("API key is not a valid header value".to_string()))?;
        key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key);

        let http = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(max_retries);
        let reads = ClientBuilder::new(http.clone())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();
        let writes = ClientBuilder::new(http).build();

        Ok(Self {
            reads,
            writes,
            base_url,
        })
    }

    /// Admin endpoint URL; each segment is percent-encoded
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(["api", "admin"]).extend(segments);
        }
        url
    }

    /// GET /revenue-summary?period=...
    pub async fn revenue_summary(&self, period: Period) -> Result<RevenueSummary> {
        let response = self
            .reads
            .get(self.url(&["revenue-summary"]))
            .query(&[("period", period.as_str())])
            .send()
            .await?;

        read_envelope(response).await
    }

    /// GET /dashboard-summary
    pub async fn dashboard_summary(&self) -> Result<DashboardSummary> {
        let response = self.reads.get(self.url(&["dashboard-summary"])).send().await?;

        read_envelope(response).await
    }

    /// GET /top-hosts?limit=...&period=...
    pub async fn top_hosts(&self, limit: u32, period: Period) -> Result<Vec<TopHost>> {
        let response = self
            .reads
            .get(self.url(&["top-hosts"]))
            .query(&[("limit", limit.to_string()), ("period", period.to_string())])
            .send()
            .await?;

        read_envelope(response).await
    }

    /// GET /transactions
    pub async fn transactions(&self, query: &TransactionListQuery) -> Result<TransactionPage> {
        let response = self
            .reads
            .get(self.url(&["transactions"]))
            .query(query)
            .send()
            .await?;

        read_envelope(response).await
    }

    /// GET /host-payout/{host_id}
    pub async fn host_payout(&self, host_id: &str) -> Result<HostPayoutOverview> {
        let response = self
            .reads
            .get(self.url(&["host-payout", host_id]))
            .send()
            .await?;

        read_envelope(response).await
    }

    /// POST /process-payout
    pub async fn process_payout(&self, request: &ProcessPayoutRequest) -> Result<PayoutReceipt> {
        let body = serde_json::to_vec(request)?;
        let response = self
            .writes
            .post(self.url(&["process-payout"]))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        read_envelope(response).await
    }
}

/// Decode an envelope regardless of HTTP status; `success` decides the outcome
async fn read_envelope<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.bytes().await?;

    match serde_json::from_slice::<ApiResponse<T>>(&body) {
        Ok(envelope) => envelope.into_result(),
        Err(e) if status.is_success() => Err(AppError::Json(e)),
        Err(_) => Err(AppError::from_remote(
            Some("UPSTREAM_ERROR"),
            format!("Unexpected response from server ({})", status),
        )),
    }
}
