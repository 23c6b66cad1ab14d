//! RegDesk Backend Server
//!
//! Serves the pricing API to the service-page frontends and guards the
//! customer dashboard and admin console routes.

use actix_cors::Cors;
use actix_web::{http::header, middleware, web, App, HttpResponse, HttpServer};
use anyhow::Context;
use regdesk_api::{configure_health, configure_pricing};
use regdesk_auth::{CredentialExtractor, RouteGuard, RouteGuardMiddleware};
use regdesk_core::AppConfig;
use regdesk_pricing::{PricingCatalog, PricingResolver};
use std::env;
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Configure API routes
fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            // Health check
            .configure(configure_health)
            // Service pricing
            .configure(configure_pricing),
    );
}

/// Initialize tracing/logging
fn init_tracing() {
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "regdesk={},regdesk_api={},regdesk_auth={},regdesk_pricing={},actix_web=info",
            log_level, log_level, log_level, log_level
        ))
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Build the pricing catalog, failing before the server binds
fn load_catalog(config: &AppConfig) -> anyhow::Result<PricingCatalog> {
    let catalog = match &config.pricing.catalog_path {
        Some(path) => PricingCatalog::from_path(path)
            .with_context(|| format!("Failed to load pricing catalog from {}", path))?,
        None => PricingCatalog::builtin().context("Failed to load built-in pricing catalog")?,
    };

    Ok(catalog)
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    init_tracing();

    info!("Starting RegDesk Backend v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Immutable for the life of the process
    let catalog = Arc::new(load_catalog(&config)?);
    let resolver = PricingResolver::new(catalog);
    info!(
        services = resolver.catalog().len(),
        aliases = resolver.catalog().aliases().len(),
        "Pricing catalog ready"
    );

    let guard = Arc::new(
        RouteGuard::from_config(&config.auth.policies).context("Invalid route guard policy")?,
    );
    let credentials = Arc::new(
        CredentialExtractor::from_config(&config.auth).context("Invalid auth configuration")?,
    );
    info!(
        mode = ?credentials.mode(),
        policies = guard.policies().len(),
        "Route guard ready"
    );

    let bind_addr = config.server_addr();
    let workers = config.server.workers;
    let cors_origins = config.server.cors_origins.clone();
    info!(
        "Starting HTTP server on {} with {} workers",
        bind_addr, workers
    );

    HttpServer::new(move || {
        // Configure CORS - clone cors_origins for each worker
        let cors_origins_inner = cors_origins.clone();
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _req_head| {
                let origins: Vec<&str> = cors_origins_inner.split(',').collect();
                if let Ok(origin_str) = origin.to_str() {
                    origins.iter().any(|o| o.trim() == origin_str)
                } else {
                    false
                }
            })
            .allowed_methods(vec!["GET", "OPTIONS"])
            .allowed_headers(vec![
                header::AUTHORIZATION,
                header::ACCEPT,
                header::CONTENT_TYPE,
                header::COOKIE,
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(resolver.clone()))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                let error_message = err.to_string();
                actix_web::error::InternalError::from_response(
                    err,
                    HttpResponse::BadRequest().json(serde_json::json!({
                        "error": "invalid_query",
                        "message": error_message
                    })),
                )
                .into()
            }))
            // Middleware: the last one registered runs first
            .wrap(RouteGuardMiddleware::new(guard.clone(), credentials.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::new("%a \"%r\" %s %b %Dms"))
            .wrap(TracingLogger::default())
            .wrap(middleware::Compress::default())
            .wrap(middleware::NormalizePath::trim())
            // Configure routes
            .configure(configure_routes)
            // Root redirect to health
            .route(
                "/",
                web::get().to(|| async {
                    HttpResponse::Found()
                        .append_header(("Location", "/api/v1/health"))
                        .finish()
                }),
            )
    })
    .workers(workers)
    .bind(&bind_addr)?
    .run()
    .await?;

    Ok(())
}
