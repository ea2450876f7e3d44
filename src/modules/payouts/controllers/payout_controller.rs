use actix_web::{web, HttpResponse};

use crate::core::{ApiResponse, AppError};
use crate::modules::payouts::models::ProcessPayoutRequest;
use crate::modules::payouts::services::PayoutService;

/// GET /host-payout/{host_id}
pub async fn get_host_payout(
    service: web::Data<PayoutService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let host_id = path.into_inner();

    let overview = service.get_host_payout(&host_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(overview)))
}

/// POST /process-payout
pub async fn process_payout(
    service: web::Data<PayoutService>,
    body: web::Json<ProcessPayoutRequest>,
) -> Result<HttpResponse, AppError> {
    let receipt = service.process_payout(body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(receipt)))
}

/// Configure payout routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/host-payout/{host_id}", web::get().to(get_host_payout))
        .route("/process-payout", web::post().to(process_payout));
}
