use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{AppError, Result};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Full English month name for a 1-based month number
pub fn month_name(month: u32) -> Result<&'static str> {
    match month {
        1..=12 => Ok(MONTH_NAMES[(month - 1) as usize]),
        _ => Err(AppError::InvalidMonth(month)),
    }
}

/// Payment method recorded on a booking payment.
///
/// Codes the platform does not know yet are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentMethod {
    Property,
    Card,
    GCash,
    Maya,
    Other(String),
}

impl PaymentMethod {
    pub fn code(&self) -> &str {
        match self {
            PaymentMethod::Property => "property",
            PaymentMethod::Card => "card",
            PaymentMethod::GCash => "gcash",
            PaymentMethod::Maya => "maya",
            PaymentMethod::Other(code) => code,
        }
    }

    /// Human-readable label shown on the dashboard
    pub fn label(&self) -> &str {
        match self {
            PaymentMethod::Property => "Pay at Property",
            PaymentMethod::Card => "Credit Card",
            PaymentMethod::GCash => "GCash",
            PaymentMethod::Maya => "Maya",
            PaymentMethod::Other(code) => code,
        }
    }
}

impl From<String> for PaymentMethod {
    fn from(code: String) -> Self {
        match code.as_str() {
            "property" => PaymentMethod::Property,
            "card" => PaymentMethod::Card,
            "gcash" => PaymentMethod::GCash,
            "maya" => PaymentMethod::Maya,
            _ => PaymentMethod::Other(code),
        }
    }
}

impl From<&str> for PaymentMethod {
    fn from(code: &str) -> Self {
        PaymentMethod::from(code.to_string())
    }
}

impl From<PaymentMethod> for String {
    fn from(method: PaymentMethod) -> Self {
        match method {
            PaymentMethod::Other(code) => code,
            known => known.code().to_string(),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Label for a raw payment-method code; unknown codes pass through unchanged
pub fn payment_method_label(code: &str) -> String {
    PaymentMethod::from(code).label().to_string()
}
