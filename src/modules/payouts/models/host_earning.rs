use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::core::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EarningStatus {
    Pending,
    Paid,
}

impl fmt::Display for EarningStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EarningStatus::Pending => write!(f, "pending"),
            EarningStatus::Paid => write!(f, "paid"),
        }
    }
}

impl TryFrom<String> for EarningStatus {
    type Error = AppError;

    fn try_from(s: String) -> Result<Self> {
        match s.as_str() {
            "pending" => Ok(EarningStatus::Pending),
            "paid" => Ok(EarningStatus::Paid),
            _ => Err(AppError::internal(format!("Invalid earning status: {}", s))),
        }
    }
}

/// How accumulated earnings are transferred to a host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutMethod {
    BankTransfer,
    #[serde(rename = "gcash")]
    GCash,
    Maya,
    Cash,
}

impl PayoutMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayoutMethod::BankTransfer => "bank_transfer",
            PayoutMethod::GCash => "gcash",
            PayoutMethod::Maya => "maya",
            PayoutMethod::Cash => "cash",
        }
    }
}

impl fmt::Display for PayoutMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayoutMethod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bank_transfer" => Ok(PayoutMethod::BankTransfer),
            "gcash" => Ok(PayoutMethod::GCash),
            "maya" => Ok(PayoutMethod::Maya),
            "cash" => Ok(PayoutMethod::Cash),
            _ => Err(AppError::validation(format!(
                "Invalid payout method: '{}'. Expected bank_transfer, gcash, maya or cash",
                s
            ))),
        }
    }
}

/// Host's share of one completed transaction, as stored in `host_earnings`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct HostEarning {
    pub id: String,
    pub host_id: String,
    pub transaction_id: String,
    pub amount: Decimal,
    #[sqlx(try_from = "String")]
    pub status: EarningStatus,
    pub payout_method: Option<String>,
    pub payout_reference: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Host {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Outstanding and historical payout figures for one host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostPayoutOverview {
    pub host_id: String,
    pub host_name: String,
    pub pending_earnings: Vec<HostEarning>,
    pub total_pending: Decimal,
    pub pending_count: u64,
    pub total_paid: Decimal,
}

/// Body of `POST /process-payout`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessPayoutRequest {
    pub host_id: String,
    pub earning_ids: Vec<String>,
    pub method: String,
    pub reference: String,
}

impl ProcessPayoutRequest {
    /// Shape checks that need no database access
    pub fn validate(&self) -> Result<PayoutMethod> {
        if self.host_id.trim().is_empty() {
            return Err(AppError::validation("hostId is required"));
        }

        if self.earning_ids.is_empty() {
            return Err(AppError::validation("earningIds must not be empty"));
        }

        let mut seen = HashSet::with_capacity(self.earning_ids.len());
        for id in &self.earning_ids {
            if id.trim().is_empty() {
                return Err(AppError::validation("earningIds must not contain blank ids"));
            }
            if !seen.insert(id.as_str()) {
                return Err(AppError::validation(format!("Duplicate earning id: {}", id)));
            }
        }

        if self.reference.trim().is_empty() {
            return Err(AppError::validation("reference is required"));
        }

        self.method.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutReceipt {
    pub host_id: String,
    pub earning_ids: Vec<String>,
    pub total_amount: Decimal,
    pub method: PayoutMethod,
    pub reference: String,
    pub paid_at: DateTime<Utc>,
}

/// One payout as handed to the store: already shape-checked, not yet
/// verified against the stored earnings
#[derive(Debug, Clone)]
pub struct PayoutSettlement<'a> {
    pub host_id: &'a str,
    pub earning_ids: &'a [String],
    pub method: PayoutMethod,
    pub reference: &'a str,
    pub paid_at: DateTime<Utc>,
}

/// Checks that the locked earnings are exactly the requested ones, all belong
/// to `host_id` and are still pending. Returns the payout total.
pub fn verify_earnings(
    host_id: &str,
    requested_ids: &[String],
    locked: &[HostEarning],
) -> Result<Decimal> {
    for id in requested_ids {
        if !locked.iter().any(|earning| &earning.id == id) {
            return Err(AppError::not_found(format!("Earning '{}' not found", id)));
        }
    }

    if let Some(foreign) = locked.iter().find(|earning| earning.host_id != host_id) {
        return Err(AppError::validation(format!(
            "Earning '{}' does not belong to host '{}'",
            foreign.id, host_id
        )));
    }

    if let Some(paid) = locked
        .iter()
        .find(|earning| earning.status != EarningStatus::Pending)
    {
        return Err(AppError::conflict(format!(
            "Earning '{}' has already been paid out",
            paid.id
        )));
    }

    Ok(locked.iter().map(|earning| earning.amount).sum())
}
