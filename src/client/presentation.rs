use serde::Serialize;

use crate::core::format::{format_count, format_currency};
use crate::core::labels::month_name;
use crate::core::Result;
use crate::modules::revenue::RevenueSummary;

/// One headline card on the revenue page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryCard {
    pub title: &'static str,
    pub value: String,
}

/// One row of the payment-method breakdown table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodRow {
    pub label: String,
    pub total_fees: String,
    pub bookings: String,
    pub avg_per_booking: String,
}

/// One bar of the monthly revenue chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    /// e.g. `March 2025`
    pub label: String,
    pub revenue: String,
}

/// Display-ready rendering of a `RevenueSummary`
///
/// Holds only formatted strings; all figures come from the summary as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryView {
    pub cards: Vec<SummaryCard>,
    pub methods: Vec<MethodRow>,
    pub trend: Vec<TrendPoint>,
}

impl SummaryView {
    /// # Errors
    /// * `InvalidMonth` - a trend entry carries a month outside 1..=12
    pub fn from_summary(summary: &RevenueSummary) -> Result<Self> {
        let totals = &summary.summary;
        let cards = vec![
            SummaryCard {
                title: "Total Platform Revenue",
                value: format_currency(totals.total_fees),
            },
            SummaryCard {
                title: "Total Bookings",
                value: format_count(totals.total_bookings),
            },
            SummaryCard {
                title: "Average Fee per Booking",
                value: format_currency(totals.avg_fee),
            },
        ];

        let methods = summary
            .by_payment_method
            .iter()
            .map(|m| MethodRow {
                label: m.label.clone(),
                total_fees: format_currency(m.total_fees),
                bookings: format_count(m.count),
                avg_per_booking: format_currency(m.avg_per_booking),
            })
            .collect();

        let trend = summary
            .monthly_trend
            .iter()
            .map(|point| {
                Ok(TrendPoint {
                    label: format!("{} {}", month_name(point.month)?, point.year),
                    revenue: format_currency(point.revenue),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            cards,
            methods,
            trend,
        })
    }

    pub fn card(&self, title: &str) -> Option<&str> {
        self.cards
            .iter()
            .find(|card| card.title == title)
            .map(|card| card.value.as_str())
    }
}
