use chrono::{Datelike, FixedOffset};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

use crate::core::timezone::to_platform_time;
use crate::core::PaymentMethod;
use crate::modules::revenue::models::{
    MonthlyRevenue, PaymentMethodRevenue, RevenueSummary, SummaryTotals,
};
use crate::modules::transactions::Transaction;

/// Reduces settled transactions into a [`RevenueSummary`].
///
/// The reduction is a single pass over a borrowed snapshot and never fails:
/// an empty slice yields the zero summary. Months are taken from
/// `created_at` in the platform offset.
#[derive(Debug, Clone, Copy)]
pub struct RevenueAggregator {
    offset: FixedOffset,
}

impl RevenueAggregator {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn aggregate(&self, transactions: &[Transaction]) -> RevenueSummary {
        let mut total_fees = Decimal::ZERO;

        // first-seen order of payment methods
        let mut method_index: HashMap<&PaymentMethod, usize> = HashMap::new();
        let mut methods: Vec<(&PaymentMethod, Decimal, u64)> = Vec::new();

        let mut months: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();

        for tx in transactions {
            total_fees += tx.platform_fee;

            let slot = *method_index.entry(&tx.payment_method).or_insert_with(|| {
                methods.push((&tx.payment_method, Decimal::ZERO, 0));
                methods.len() - 1
            });
            methods[slot].1 += tx.platform_fee;
            methods[slot].2 += 1;

            let local = to_platform_time(tx.created_at, self.offset);
            *months
                .entry((local.year(), local.month()))
                .or_insert(Decimal::ZERO) += tx.platform_fee;
        }

        RevenueSummary {
            summary: SummaryTotals::new(total_fees, transactions.len() as u64),
            by_payment_method: methods
                .into_iter()
                .map(|(method, fees, count)| PaymentMethodRevenue::new(method.clone(), fees, count))
                .collect(),
            monthly_trend: months
                .into_iter()
                .map(|((year, month), revenue)| MonthlyRevenue {
                    year,
                    month,
                    revenue,
                })
                .collect(),
        }
    }
}
