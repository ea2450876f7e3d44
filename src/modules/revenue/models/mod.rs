pub mod period;
pub mod revenue_summary;

pub use period::{DateRange, Period, PeriodFilter};
pub use revenue_summary::{MonthlyRevenue, PaymentMethodRevenue, RevenueSummary, SummaryTotals};
