//! Health check handler

use actix_web::{web, HttpResponse};
use regdesk_pricing::PricingResolver;

/// Health check endpoint
///
/// GET /api/v1/health
pub async fn health_check(resolver: web::Data<PricingResolver>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "regdesk",
        "version": env!("CARGO_PKG_VERSION"),
        "catalog_services": resolver.catalog().len(),
    }))
}

/// Configure health routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}
