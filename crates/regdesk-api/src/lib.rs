//! API layer for RegDesk
//!
//! HTTP handlers exposing the service pricing catalog to the page-rendering
//! frontends, plus the health endpoint.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    missing_docs
)]

pub mod dto;
pub mod handlers;

// Re-export DTOs (common types)
pub use dto::ApiResponse;

// Re-export handler configuration functions
pub use handlers::{configure_health, configure_pricing};
