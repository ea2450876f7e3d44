use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;

use crate::core::{AppError, PaymentMethod, Result};

/// Booking payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Payment initiated but not settled
    Pending,

    /// Payment settled; the only status counted in revenue
    Completed,

    /// Payment failed
    Failed,

    /// Payment refunded to the guest
    Refunded,
}

impl Default for TransactionStatus {
    fn default() -> Self {
        TransactionStatus::Pending
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Pending => write!(f, "pending"),
            TransactionStatus::Completed => write!(f, "completed"),
            TransactionStatus::Failed => write!(f, "failed"),
            TransactionStatus::Refunded => write!(f, "refunded"),
        }
    }
}

impl FromStr for TransactionStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(TransactionStatus::Pending),
            "completed" => Ok(TransactionStatus::Completed),
            "failed" => Ok(TransactionStatus::Failed),
            "refunded" => Ok(TransactionStatus::Refunded),
            _ => Err(AppError::internal(format!("Invalid transaction status: {}", s))),
        }
    }
}

impl TryFrom<String> for TransactionStatus {
    type Error = AppError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// One booking payment as recorded in the `transactions` table.
///
/// Read-only input to revenue aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique transaction ID (UUID)
    pub id: String,

    /// Booking this payment settles
    pub booking_id: String,

    /// Host that owns the booked listing
    pub host_id: String,

    /// Total amount paid by the guest
    pub amount: Decimal,

    /// Portion of `amount` retained by the platform
    pub platform_fee: Decimal,

    #[sqlx(try_from = "String")]
    pub payment_method: PaymentMethod,

    #[sqlx(try_from = "String")]
    pub status: TransactionStatus,

    /// Settlement timestamp; period filtering is based on this field
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a settled (completed) transaction
    ///
    /// # Errors
    /// Returns a validation error if the fee invariant does not hold or an ID is blank
    pub fn completed(
        booking_id: impl Into<String>,
        host_id: impl Into<String>,
        amount: Decimal,
        platform_fee: Decimal,
        payment_method: PaymentMethod,
        created_at: DateTime<Utc>,
    ) -> Result<Self> {
        let transaction = Self {
            id: uuid::Uuid::new_v4().to_string(),
            booking_id: booking_id.into(),
            host_id: host_id.into(),
            amount,
            platform_fee,
            payment_method,
            status: TransactionStatus::Completed,
            created_at,
        };

        transaction.validate()?;
        Ok(transaction)
    }

    /// Checks `0 <= platform_fee <= amount` and required references
    pub fn validate(&self) -> Result<()> {
        if self.platform_fee < Decimal::ZERO {
            return Err(AppError::validation("Platform fee must be non-negative"));
        }

        if self.platform_fee > self.amount {
            return Err(AppError::validation(format!(
                "Platform fee {} exceeds payment amount {}",
                self.platform_fee, self.amount
            )));
        }

        if self.booking_id.trim().is_empty() {
            return Err(AppError::validation("Booking ID cannot be empty"));
        }

        if self.host_id.trim().is_empty() {
            return Err(AppError::validation("Host ID cannot be empty"));
        }

        Ok(())
    }

    pub fn is_settled(&self) -> bool {
        self.status == TransactionStatus::Completed
    }
}
