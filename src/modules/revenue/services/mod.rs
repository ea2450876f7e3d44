pub mod aggregator;
pub mod revenue_service;

pub use aggregator::RevenueAggregator;
pub use revenue_service::RevenueService;
