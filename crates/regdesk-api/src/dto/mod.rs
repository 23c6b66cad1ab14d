//! Data Transfer Objects (DTOs) for API requests and responses

pub mod common;
pub mod pricing;

pub use common::*;
pub use pricing::*;
