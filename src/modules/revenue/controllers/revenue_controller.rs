use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::{ApiResponse, AppError};
use crate::modules::revenue::models::Period;
use crate::modules::revenue::services::RevenueService;

/// Query parameters for the revenue summary endpoint
#[derive(Debug, Deserialize)]
pub struct RevenueSummaryQuery {
    /// One of today, week, month, year, all (default: month)
    #[serde(default)]
    pub period: Option<String>,
}

/// GET /revenue-summary?period=
///
/// Returns platform fee totals, the payment-method breakdown and the monthly
/// trend for the selected period.
pub async fn get_revenue_summary(
    service: web::Data<RevenueService>,
    query: web::Query<RevenueSummaryQuery>,
) -> Result<HttpResponse, AppError> {
    let period = Period::from_query(query.period.as_deref())?;

    let summary = service.get_platform_revenue_summary(period).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(summary)))
}

/// Configure revenue routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/revenue-summary", web::get().to(get_revenue_summary));
}
