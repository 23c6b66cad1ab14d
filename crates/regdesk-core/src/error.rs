//! Unified error handling for RegDesk
//!
//! This module provides the error type shared by every RegDesk crate, with
//! automatic HTTP response mapping for the API layer.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Main application error type
///
/// Lookup misses inside the pricing library are `Option::None`; this type only
/// appears once a miss has to be reported over HTTP, or when startup
/// configuration is rejected.
#[derive(Error, Debug)]
pub enum AppError {
    // ==================== Authentication Errors ====================
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    // ==================== Business Logic Errors ====================
    #[error("Price not available: {0}")]
    PricingNotFound(String),

    // ==================== Validation Errors ====================
    #[error("Validation error: {0}")]
    Validation(String),

    // ==================== Startup Errors ====================
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            AppError::Validation(_) => StatusCode::BAD_REQUEST,

            // 401 Unauthorized
            AppError::InvalidToken(_) | AppError::TokenExpired => StatusCode::UNAUTHORIZED,

            // 404 Not Found
            AppError::PricingNotFound(_) => StatusCode::NOT_FOUND,

            // 500 Internal Server Error
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::TokenExpired => "token_expired",
            AppError::InvalidToken(_) => "invalid_token",
            AppError::PricingNotFound(_) => "pricing_not_found",
            AppError::Validation(_) => "validation_error",
            AppError::Config(_) => "config_error",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        AppError::status_code(self)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = json!({
            "error": self.error_code(),
            "message": self.to_string(),
            "status": status.as_u16(),
        });

        HttpResponse::build(status).json(body)
    }
}

// ==================== From implementations ====================

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AppError::TokenExpired.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::PricingNotFound("Nonexistent Service".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Config("bad alias".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Validation("service".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::PricingNotFound("x".to_string()).error_code(),
            "pricing_not_found"
        );
        assert_eq!(
            AppError::Validation("x".to_string()).error_code(),
            "validation_error"
        );
    }

    #[test]
    fn test_pricing_not_found_message() {
        let err = AppError::PricingNotFound("Nonexistent Service".to_string());
        assert_eq!(err.to_string(), "Price not available: Nonexistent Service");
    }

    #[test]
    fn test_config_error_conversion() {
        let err: AppError = config::ConfigError::Message("missing port".to_string()).into();
        assert!(matches!(err, AppError::Config(ref message) if message.contains("missing port")));
        assert_eq!(err.error_code(), "config_error");
    }
}
