use actix_web::{web, HttpResponse};

use crate::core::{ApiResponse, AppError};
use crate::modules::dashboard::models::TopHostsQuery;
use crate::modules::dashboard::services::DashboardService;

/// GET /dashboard-summary
pub async fn get_dashboard_summary(
    service: web::Data<DashboardService>,
) -> Result<HttpResponse, AppError> {
    let summary = service.get_dashboard_summary().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(summary)))
}

/// GET /top-hosts?limit&period
pub async fn get_top_hosts(
    service: web::Data<DashboardService>,
    query: web::Query<TopHostsQuery>,
) -> Result<HttpResponse, AppError> {
    let hosts = service.get_top_hosts(&query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(hosts)))
}

/// Configure dashboard routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/dashboard-summary", web::get().to(get_dashboard_summary))
        .route("/top-hosts", web::get().to(get_top_hosts));
}
