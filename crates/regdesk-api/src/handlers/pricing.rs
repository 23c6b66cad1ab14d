//! Pricing handlers
//!
//! HTTP handlers for the service pricing endpoints. Every endpoint is a
//! read-only lookup against the catalog loaded at startup.

use crate::dto::pricing::{
    CatalogResponse, LabelResponse, PackageView, PricingQuery, PricingResponse,
};
use crate::dto::ApiResponse;
use actix_web::{web, HttpResponse};
use regdesk_core::AppError;
use regdesk_pricing::{format_package_label, PricingResolver};
use tracing::{debug, instrument};
use validator::Validate;

/// Trimmed service name, held to the `PricingQuery` length rule on every route
fn service_name(raw: &str) -> Result<&str, AppError> {
    let name = raw.trim();
    PricingQuery {
        service: name.to_string(),
    }
    .validate()?;
    Ok(name)
}

/// Resolve a name or fail with the "Price not available" error
fn quote(resolver: &PricingResolver, service: &str) -> Result<PricingResponse, AppError> {
    let name = service_name(service)?;
    let key = resolver.resolve(name);
    let pricing = resolver
        .get_service_pricing(name)
        .ok_or_else(|| AppError::PricingNotFound(name.to_string()))?;

    Ok(PricingResponse::new(name, key, pricing))
}

/// List catalog services
///
/// GET /api/v1/pricing
#[instrument(skip(resolver))]
pub async fn list_services(resolver: web::Data<PricingResolver>) -> HttpResponse {
    let services: Vec<String> = resolver
        .catalog()
        .service_keys()
        .into_iter()
        .map(str::to_string)
        .collect();

    debug!(total = services.len(), "Listing catalog services");

    let total = services.len();
    HttpResponse::Ok().json(ApiResponse::success(CatalogResponse { services, total }))
}

/// Price quote for a free-text service name
///
/// GET /api/v1/pricing/quote?service={name}
#[instrument(skip(resolver))]
pub async fn get_quote(
    resolver: web::Data<PricingResolver>,
    query: web::Query<PricingQuery>,
) -> Result<HttpResponse, AppError> {
    let response = quote(&resolver, &query.service)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

/// Price quote with the service name in the path
///
/// GET /api/v1/pricing/services/{name}
#[instrument(skip(resolver))]
pub async fn get_service(
    resolver: web::Data<PricingResolver>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = path.into_inner();

    let response = quote(&resolver, &service)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

/// Package tiers for a service
///
/// GET /api/v1/pricing/services/{name}/packages
#[instrument(skip(resolver))]
pub async fn get_packages(
    resolver: web::Data<PricingResolver>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let service = path.into_inner();
    let name = service_name(&service)?;

    if resolver.get_service_pricing(name).is_none() {
        return Err(AppError::PricingNotFound(name.to_string()));
    }

    let packages = PackageView::list(resolver.get_packages(name));
    let response = if packages.is_empty() {
        ApiResponse::with_message(packages, "Service is not sold in packages")
    } else {
        ApiResponse::success(packages)
    };
    Ok(HttpResponse::Ok().json(response))
}

/// Display label for a package tier
///
/// GET /api/v1/pricing/labels/{label}
pub async fn get_label(path: web::Path<String>) -> HttpResponse {
    let input = path.into_inner();
    let label = format_package_label(&input);

    HttpResponse::Ok().json(ApiResponse::success(LabelResponse { input, label }))
}

/// Configure pricing routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/pricing")
            .route("", web::get().to(list_services))
            .route("/quote", web::get().to(get_quote))
            .route("/services/{name}", web::get().to(get_service))
            .route("/services/{name}/packages", web::get().to(get_packages))
            .route("/labels/{label}", web::get().to(get_label)),
    );
}
