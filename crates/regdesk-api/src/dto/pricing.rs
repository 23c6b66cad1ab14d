//! Pricing DTOs
//!
//! Request and response types for the pricing endpoints.

use regdesk_core::models::{PackageTier, ServicePackages, ServicePricing};
use regdesk_pricing::format_package_label;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Pricing lookup by free-text service name
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PricingQuery {
    /// Service name as written on the page
    #[validate(length(min = 1, max = 200, message = "Service name is required"))]
    pub service: String,
}

/// One offered package tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageView {
    /// Tier wire name (`BASIC`, `STANDARD`, `PREMIUM`)
    pub tier: PackageTier,
    /// Tier name for display
    pub label: String,
    /// Display price
    pub price: String,
}

impl PackageView {
    /// Offered tiers in display order
    pub fn list(packages: Option<&ServicePackages>) -> Vec<Self> {
        packages
            .into_iter()
            .flat_map(ServicePackages::iter)
            .map(|(tier, price)| Self {
                tier,
                label: format_package_label(tier.as_str()),
                price: price.to_string(),
            })
            .collect()
    }
}

/// Price quote for a service
#[derive(Debug, Clone, Serialize)]
pub struct PricingResponse {
    /// Service name as requested
    pub service: String,
    /// Canonical catalog key the name resolved to
    pub key: String,
    /// Default display price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_price: Option<String>,
    /// Offered package tiers; empty when the service is not sold in tiers
    pub packages: Vec<PackageView>,
}

impl PricingResponse {
    /// Build a quote from a resolved catalog entry
    pub fn new(service: impl Into<String>, key: impl Into<String>, pricing: &ServicePricing) -> Self {
        Self {
            service: service.into(),
            key: key.into(),
            base_price: pricing.base_price.clone(),
            packages: PackageView::list(pricing.packages.as_ref()),
        }
    }
}

/// Catalog listing
#[derive(Debug, Clone, Serialize)]
pub struct CatalogResponse {
    /// Canonical service keys, sorted
    pub services: Vec<String>,
    /// Number of services
    pub total: usize,
}

/// Formatted tier label
#[derive(Debug, Clone, Serialize)]
pub struct LabelResponse {
    /// Label as requested
    pub input: String,
    /// Label for display
    pub label: String,
}
