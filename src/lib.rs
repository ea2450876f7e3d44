//! Rental Revenue Admin API Library
//!
//! Platform revenue aggregation for a short-term rental admin dashboard:
//! period resolution, fee aggregation, display formatting, the admin HTTP
//! endpoints and the client-side dashboard state.

pub mod client;
pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

use actix_web::web;

// Re-export commonly used types
pub use modules::dashboard;
pub use modules::payouts;
pub use modules::revenue;
pub use modules::transactions;

/// Admin endpoints, mounted under `/api/admin` by the binary
pub fn configure_admin_api(cfg: &mut web::ServiceConfig) {
    cfg.configure(modules::revenue::controllers::configure)
        .configure(modules::dashboard::controllers::configure)
        .configure(modules::transactions::controllers::configure)
        .configure(modules::payouts::controllers::configure);
}

/// Extractor settings that turn malformed input into validation envelopes
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(middleware::query_error_handler))
        .app_data(
            web::JsonConfig::default()
                .limit(64 * 1024)
                .error_handler(middleware::json_error_handler),
        )
        .app_data(web::PathConfig::default().error_handler(middleware::path_error_handler));
}
