mod revenue_controller;

pub use revenue_controller::{configure, get_revenue_summary, RevenueSummaryQuery};
