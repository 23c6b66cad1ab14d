//! RegDesk Core Library
//!
//! This crate provides the foundational types and error handling shared by
//! the RegDesk services. It includes:
//!
//! - Domain models (service pricing, route decisions, user roles)
//! - Unified error handling with HTTP response mapping
//! - Application configuration

pub mod config;
pub mod error;
pub mod models;

pub use config::AppConfig;
pub use error::AppError;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
