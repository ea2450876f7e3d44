pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{DateRange, Period, PeriodFilter, RevenueSummary};
pub use repositories::TransactionStore;
pub use services::{RevenueAggregator, RevenueService};
