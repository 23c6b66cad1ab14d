//! Service pricing model
//!
//! Price quotes shown on service pages and booking buttons. Prices are
//! display strings (already currency-formatted), never amounts to compute with.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Package tier enumeration
///
/// Closed set. Ordering follows declaration order, so packages always list
/// BASIC, STANDARD, PREMIUM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PackageTier {
    Basic,
    /// Older catalog files spell this tier `STANDRAD`
    #[serde(alias = "STANDRAD")]
    Standard,
    Premium,
}

impl PackageTier {
    /// All tiers in display order
    pub const ALL: [PackageTier; 3] = [
        PackageTier::Basic,
        PackageTier::Standard,
        PackageTier::Premium,
    ];

    /// Wire name of the tier
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageTier::Basic => "BASIC",
            PackageTier::Standard => "STANDARD",
            PackageTier::Premium => "PREMIUM",
        }
    }
}

impl fmt::Display for PackageTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tiered package prices for a service
///
/// A tier that is missing is not offered. It is never "free".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServicePackages(BTreeMap<PackageTier, String>);

impl ServicePackages {
    /// Create an empty package set
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, tier: PackageTier, price: impl Into<String>) -> Self {
        self.0.insert(tier, price.into());
        self
    }

    /// Price for a tier, if offered
    pub fn get(&self, tier: PackageTier) -> Option<&str> {
        self.0.get(&tier).map(String::as_str)
    }

    /// Check whether a tier is offered
    pub fn offers(&self, tier: PackageTier) -> bool {
        self.0.contains_key(&tier)
    }

    /// Offered tiers with their prices, in display order
    pub fn iter(&self) -> impl Iterator<Item = (PackageTier, &str)> {
        self.0.iter().map(|(tier, price)| (*tier, price.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(PackageTier, String)> for ServicePackages {
    fn from_iter<I: IntoIterator<Item = (PackageTier, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Price quote for one named service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePricing {
    /// Default/current display price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_price: Option<String>,

    /// Tiered packages, only for services sold in tiers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packages: Option<ServicePackages>,
}

impl ServicePricing {
    /// Pricing with only a base price
    pub fn base(price: impl Into<String>) -> Self {
        Self {
            base_price: Some(price.into()),
            packages: None,
        }
    }

    /// Pricing with only tiered packages
    pub fn tiered(packages: ServicePackages) -> Self {
        Self {
            base_price: None,
            packages: Some(packages),
        }
    }

    /// Add tiered packages to this pricing
    pub fn with_packages(mut self, packages: ServicePackages) -> Self {
        self.packages = Some(packages);
        self
    }

    /// Drop an empty package map so that "no packages" has one representation
    pub fn normalized(mut self) -> Self {
        if self.packages.as_ref().is_some_and(ServicePackages::is_empty) {
            self.packages = None;
        }
        self
    }

    /// Check if this entry carries any price at all
    ///
    /// Entries failing this check are not stored in a catalog.
    pub fn is_priced(&self) -> bool {
        self.base_price.is_some() || self.packages.as_ref().is_some_and(|p| !p.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering() {
        let packages = ServicePackages::new()
            .with(PackageTier::Premium, "₹9,999")
            .with(PackageTier::Basic, "₹2,999")
            .with(PackageTier::Standard, "₹5,999");

        let tiers: Vec<_> = packages.iter().map(|(tier, _)| tier).collect();
        assert_eq!(tiers, PackageTier::ALL.to_vec());
    }

    #[test]
    fn test_tier_deserialization_accepts_legacy_spelling() {
        let packages: ServicePackages =
            serde_json::from_str(r#"{"BASIC": "₹999", "STANDRAD": "₹1,999"}"#).unwrap();
        assert_eq!(packages.get(PackageTier::Standard), Some("₹1,999"));
        assert!(!packages.offers(PackageTier::Premium));
    }

    #[test]
    fn test_tier_deserialization_rejects_unknown_tier() {
        let result = serde_json::from_str::<ServicePackages>(r#"{"GOLD": "₹999"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_is_priced() {
        assert!(ServicePricing::base("₹1,499").is_priced());
        assert!(
            ServicePricing::tiered(ServicePackages::new().with(PackageTier::Basic, "₹999"))
                .is_priced()
        );
        assert!(!ServicePricing::default().is_priced());
        assert!(!ServicePricing::tiered(ServicePackages::new()).is_priced());
    }

    #[test]
    fn test_normalized_drops_empty_packages() {
        let pricing = ServicePricing::base("₹499")
            .with_packages(ServicePackages::new())
            .normalized();
        assert_eq!(pricing.packages, None);
        assert_eq!(pricing.base_price.as_deref(), Some("₹499"));
    }

    #[test]
    fn test_serialization_skips_absent_fields() {
        let json = serde_json::to_value(ServicePricing::base("₹1,499")).unwrap();
        assert_eq!(json, serde_json::json!({ "base_price": "₹1,499" }));
    }
}
