//! Service pricing for RegDesk
//!
//! Resolves free-text service names to price quotes. The catalog and its
//! alias table are built once at startup and shared read-only.
//!
//! # Examples
//!
//! ```
//! use regdesk_pricing::{format_package_label, PricingCatalog, PricingResolver};
//! use regdesk_core::models::ServicePricing;
//! use std::sync::Arc;
//!
//! let catalog = PricingCatalog::builder()
//!     .service("GST Filing", ServicePricing::base("₹1,499"))
//!     .alias("GST Registration", "GST Filing")
//!     .build()?;
//! let resolver = PricingResolver::new(Arc::new(catalog));
//!
//! assert_eq!(resolver.get_base_price("  gst registration "), Some("₹1,499"));
//! assert_eq!(format_package_label("standrad"), "Standard");
//! # Ok::<(), regdesk_core::AppError>(())
//! ```

pub mod catalog;
pub mod labels;
pub mod normalize;
pub mod resolver;

pub use catalog::{AliasTable, CatalogBuilder, CatalogFile, PricingCatalog};
pub use labels::format_package_label;
pub use normalize::normalize;
pub use resolver::PricingResolver;
