use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::transaction::Transaction;
use crate::core::timezone::local_midnight;
use crate::core::{AppError, PaymentMethod, Result};

pub const DEFAULT_PAGE_LIMIT: u32 = 20;
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Raw query string of `GET /transactions`
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    /// Inclusive local start day (YYYY-MM-DD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Inclusive local end day (YYYY-MM-DD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// Validated listing filter with UTC bounds
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFilter {
    pub page: u32,
    pub limit: u32,
    pub payment_method: Option<PaymentMethod>,
    /// Inclusive lower bound
    pub from: Option<DateTime<Utc>>,
    /// Exclusive upper bound (local midnight after the end day)
    pub until: Option<DateTime<Utc>>,
}

impl TransactionFilter {
    /// Validate the query and resolve dates into UTC instants using the platform offset
    pub fn from_query(query: &TransactionListQuery, offset: FixedOffset) -> Result<Self> {
        let page = query.page.unwrap_or(1);
        if page == 0 {
            return Err(AppError::validation("page must be 1 or greater"));
        }

        let limit = query.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        if limit == 0 || limit > MAX_PAGE_LIMIT {
            return Err(AppError::validation(format!(
                "limit must be between 1 and {}",
                MAX_PAGE_LIMIT
            )));
        }

        let start_day = parse_day("startDate", query.start_date.as_deref())?;
        let end_day = parse_day("endDate", query.end_date.as_deref())?;

        if let (Some(start), Some(end)) = (start_day, end_day) {
            if start > end {
                return Err(AppError::validation(format!(
                    "startDate ({}) must be before or equal to endDate ({})",
                    start, end
                )));
            }
        }

        let payment_method = query
            .payment_method
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(PaymentMethod::from);

        Ok(Self {
            page,
            limit,
            payment_method,
            from: start_day.map(|day| local_midnight(day, offset)),
            until: end_day.map(|day| local_midnight(day + Duration::days(1), offset)),
        })
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

fn parse_day(field: &str, value: Option<&str>) -> Result<Option<NaiveDate>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                AppError::validation(format!(
                    "Invalid {} format: '{}'. Expected YYYY-MM-DD",
                    field, raw
                ))
            }),
    }
}

/// Transaction row as listed to admins
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionView {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub payment_method_label: String,
}

impl From<Transaction> for TransactionView {
    fn from(transaction: Transaction) -> Self {
        let payment_method_label = transaction.payment_method.label().to_string();
        Self {
            transaction,
            payment_method_label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
}

impl Pagination {
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        Self {
            page,
            limit,
            total,
            total_pages: total.div_ceil(u64::from(limit.max(1))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    pub transactions: Vec<TransactionView>,
    pub pagination: Pagination,
}
