use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http::header, web, App, HttpResponse, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bizdesk::config::{Config, LogFormat};
use bizdesk::core::TenantRepository;
use bizdesk::middleware::{ApiKeyAuth, RateLimiter, RequestId};
use bizdesk::modules::{
    self,
    clients::{Client, ClientService, MySqlClientRepository},
    dashboard::{DashboardService, MySqlDashboardRepository},
    invoices::{InvoiceRepository, InvoiceService, MySqlInvoiceRepository},
    products::{MySqlProductRepository, Product, ProductService},
    quotes::{MySqlQuoteRepository, QuoteService},
};

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("bizdesk={},actix_web=info", config.app.log_level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    match config.app.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

fn cors(origin: Option<&str>) -> Cors {
    let cors = match origin {
        Some(origin) => Cors::default().allowed_origin(origin),
        None => Cors::default().allow_any_origin(),
    };

    cors.allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE"])
        .allowed_headers(vec![
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::HeaderName::from_static("x-api-key"),
        ])
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;

    init_tracing(&config);

    tracing::info!("Starting Bizdesk invoicing backend");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Create database connection pool
    let db_pool = config
        .database
        .create_pool()
        .await
        .context("Failed to create database pool")?;

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.pool_size
    );

    let client_repo: Arc<dyn TenantRepository<Client>> =
        Arc::new(MySqlClientRepository::new(db_pool.clone()));
    let product_repo: Arc<dyn TenantRepository<Product>> =
        Arc::new(MySqlProductRepository::new(db_pool.clone()));
    let invoice_repo: Arc<dyn InvoiceRepository> =
        Arc::new(MySqlInvoiceRepository::new(db_pool.clone()));

    let client_service = Arc::new(ClientService::new(
        client_repo.clone(),
        config.app.default_currency,
    ));
    let product_service = Arc::new(ProductService::new(
        product_repo.clone(),
        config.app.default_currency,
    ));
    let invoice_service = Arc::new(InvoiceService::new(
        invoice_repo.clone(),
        client_repo.clone(),
        product_repo.clone(),
        config.app.invoice_due_days,
    ));
    let quote_service = Arc::new(QuoteService::new(
        Arc::new(MySqlQuoteRepository::new(db_pool.clone())),
        client_repo.clone(),
        product_repo.clone(),
        config.app.quote_validity_days,
    ));
    let dashboard_service = Arc::new(DashboardService::new(
        Arc::new(MySqlDashboardRepository::new(db_pool.clone())),
        invoice_repo,
        client_repo,
        product_repo,
    ));

    let rate_limiter = RateLimiter::new(config.security.rate_limit_per_minute)
        .context("Failed to build rate limiter")?;
    let cors_origin = config.security.cors_allowed_origin.clone();

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(client_service.clone()))
            .app_data(web::Data::new(product_service.clone()))
            .app_data(web::Data::new(invoice_service.clone()))
            .app_data(web::Data::new(quote_service.clone()))
            .app_data(web::Data::new(dashboard_service.clone()))
            // Registered last-to-first: CORS runs outermost, auth innermost
            .wrap(ApiKeyAuth::new(db_pool.clone()))
            .wrap(rate_limiter.clone())
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .wrap(cors(cors_origin.as_deref()))
            .route("/", web::get().to(index))
            .configure(modules::configure)
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "service": "Bizdesk",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}
