pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{DashboardSummary, TopHost};
pub use services::DashboardService;
