use actix_web::{web, HttpResponse};

use crate::core::{ApiResponse, AppError};
use crate::modules::transactions::models::TransactionListQuery;
use crate::modules::transactions::services::TransactionService;

/// List booking transactions
/// GET /transactions?page&limit&paymentMethod&startDate&endDate
pub async fn list_transactions(
    service: web::Data<TransactionService>,
    query: web::Query<TransactionListQuery>,
) -> Result<HttpResponse, AppError> {
    let page = service.list_transactions(&query).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(page)))
}

/// Configure transaction routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/transactions", web::get().to(list_transactions));
}
