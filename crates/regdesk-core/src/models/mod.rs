//! Domain models for RegDesk
//!
//! This module contains the core domain models shared across the workspace.

pub mod pricing;
pub mod route;
pub mod user;

pub use pricing::{PackageTier, ServicePackages, ServicePricing};
pub use route::{AuthDecision, RouteRequest};
pub use user::UserRole;
