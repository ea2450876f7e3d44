pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{HostPayoutOverview, PayoutReceipt, ProcessPayoutRequest};
pub use repositories::PayoutStore;
pub use services::PayoutService;
