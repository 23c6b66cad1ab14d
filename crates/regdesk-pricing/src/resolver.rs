//! Pricing resolver
//!
//! Maps free-text service names, as written on service pages and booking
//! buttons, to catalog entries.

use crate::catalog::PricingCatalog;
use crate::normalize::normalize;
use regdesk_core::models::{ServicePackages, ServicePricing};
use std::sync::Arc;
use tracing::debug;

/// Read-only lookups over an injected catalog
///
/// Cheap to clone; clones share the same catalog.
#[derive(Debug, Clone)]
pub struct PricingResolver {
    catalog: Arc<PricingCatalog>,
}

impl PricingResolver {
    /// Create a resolver over the given catalog
    pub fn new(catalog: Arc<PricingCatalog>) -> Self {
        Self { catalog }
    }

    /// The catalog this resolver reads
    pub fn catalog(&self) -> &PricingCatalog {
        &self.catalog
    }

    /// Canonical key for a service name
    ///
    /// Normalizes, then follows at most one alias. Names that are neither a
    /// service nor an alias come back normalized and unchanged.
    pub fn resolve(&self, name: &str) -> String {
        let key = normalize(name);
        match self.catalog.aliases().target(&key) {
            Some(target) => target.to_string(),
            None => key,
        }
    }

    /// Pricing for a service name, `None` when the service is unknown
    ///
    /// An unknown service has no price. Callers show "Price not available"
    /// instead of a zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use regdesk_pricing::{PricingCatalog, PricingResolver};
    /// use std::sync::Arc;
    ///
    /// let resolver = PricingResolver::new(Arc::new(PricingCatalog::builtin()?));
    /// assert_eq!(
    ///     resolver.get_service_pricing("GST"),
    ///     resolver.get_service_pricing("GST Filing"),
    /// );
    /// assert!(resolver.get_service_pricing("Nonexistent Service").is_none());
    /// # Ok::<(), regdesk_core::AppError>(())
    /// ```
    pub fn get_service_pricing(&self, name: &str) -> Option<&ServicePricing> {
        let key = self.resolve(name);
        let pricing = self.catalog.get(&key);

        if pricing.is_none() {
            debug!(service = %name, key = %key, "No pricing for service");
        }

        pricing
    }

    /// Base price for a service name
    pub fn get_base_price(&self, name: &str) -> Option<&str> {
        self.get_service_pricing(name)?.base_price.as_deref()
    }

    /// Tiered packages for a service name
    pub fn get_packages(&self, name: &str) -> Option<&ServicePackages> {
        self.get_service_pricing(name)?.packages.as_ref()
    }
}
