use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rental_revenue::config::Config;
use rental_revenue::middleware::{AdminAuth, ErrorHandler, RequestId};
use rental_revenue::modules::dashboard::repositories::DashboardRepository;
use rental_revenue::modules::dashboard::DashboardService;
use rental_revenue::modules::health;
use rental_revenue::modules::payouts::repositories::PayoutRepository;
use rental_revenue::modules::payouts::PayoutService;
use rental_revenue::modules::revenue::{PeriodFilter, RevenueService};
use rental_revenue::modules::transactions::{TransactionRepository, TransactionService};
use rental_revenue::{configure_admin_api, configure_extractors};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing; RUST_LOG wins over LOG_LEVEL
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("rental_revenue={},actix_web=info", config.app.log_level).into()
    });
    let registry = tracing_subscriber::registry().with(filter);
    if config.app.env == "production" {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }

    config.validate()?;

    tracing::info!("Starting Rental Revenue Admin API");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    let offset = config.revenue.offset()?;
    let db_pool = config.database.create_pool()?;

    tracing::info!(
        "Database pool initialized ({} connections, UTC{:+})",
        config.database.pool_size,
        config.revenue.utc_offset_hours
    );

    let periods = PeriodFilter::new(offset);
    let transaction_repo = Arc::new(TransactionRepository::new(db_pool.clone()));

    let revenue_service = web::Data::new(RevenueService::new(
        transaction_repo.clone(),
        periods,
        config.revenue.query_timeout(),
    ));
    let transaction_service = web::Data::new(TransactionService::new(
        TransactionRepository::new(db_pool.clone()),
        offset,
    ));
    let dashboard_service = web::Data::new(DashboardService::new(
        DashboardRepository::new(db_pool.clone()),
        periods,
    ));
    let payout_service = web::Data::new(PayoutService::new(Arc::new(PayoutRepository::new(
        db_pool.clone(),
    ))));

    let pool_data = web::Data::new(db_pool);
    let admin_auth = AdminAuth::new(config.security.admin_api_key_hash.as_str());

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(ErrorHandler)
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST"])
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(pool_data.clone())
            .app_data(revenue_service.clone())
            .app_data(transaction_service.clone())
            .app_data(dashboard_service.clone())
            .app_data(payout_service.clone())
            .configure(configure_extractors)
            .configure(health::configure)
            .service(
                web::scope("/api/admin")
                    .wrap(admin_auth.clone())
                    .configure(configure_admin_api),
            )
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}
