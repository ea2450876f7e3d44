use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::PaymentMethod;

/// Platform revenue derived from settled transactions.
///
/// Computed fresh for every query; never persisted or cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSummary {
    pub summary: SummaryTotals,
    pub by_payment_method: Vec<PaymentMethodRevenue>,
    pub monthly_trend: Vec<MonthlyRevenue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTotals {
    /// Sum of platform fees
    pub total_fees: Decimal,
    pub total_bookings: u64,
    /// `total_fees / total_bookings`, zero when there are no bookings
    pub avg_fee: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodRevenue {
    pub method: PaymentMethod,
    pub label: String,
    pub total_fees: Decimal,
    pub count: u64,
    pub avg_per_booking: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRevenue {
    pub year: i32,
    /// Calendar month, 1..=12
    pub month: u32,
    pub revenue: Decimal,
}

/// Average guarded against division by zero
pub fn average(total: Decimal, count: u64) -> Decimal {
    if count == 0 {
        Decimal::ZERO
    } else {
        total / Decimal::from(count)
    }
}

impl SummaryTotals {
    pub fn new(total_fees: Decimal, total_bookings: u64) -> Self {
        Self {
            total_fees,
            total_bookings,
            avg_fee: average(total_fees, total_bookings),
        }
    }
}

impl PaymentMethodRevenue {
    pub fn new(method: PaymentMethod, total_fees: Decimal, count: u64) -> Self {
        Self {
            label: method.label().to_string(),
            method,
            total_fees,
            count,
            avg_per_booking: average(total_fees, count),
        }
    }
}

impl RevenueSummary {
    pub fn empty() -> Self {
        Self {
            summary: SummaryTotals::new(Decimal::ZERO, 0),
            by_payment_method: Vec::new(),
            monthly_trend: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.summary.total_bookings == 0
    }
}
