//! Application configuration
//!
//! This module provides centralized configuration management using the `config` crate.
//! Configuration can be loaded from environment variables and config files.

use crate::AppResult;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::env;
use tracing::debug;

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

/// HTTP server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Comma-separated list of allowed CORS origins
    #[serde(default = "default_cors_origins")]
    pub cors_origins: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9001
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_cors_origins() -> String {
    "http://localhost:3000,http://127.0.0.1:3000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
            cors_origins: default_cors_origins(),
        }
    }
}

/// Pricing catalog configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PricingConfig {
    /// JSON catalog file; the built-in catalog is used when unset
    pub catalog_path: Option<String>,
}

/// How the route guard reads credentials from cookies
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CredentialMode {
    /// Any non-empty token cookie counts; admin role from the `"true"` flag cookie
    #[default]
    Presence,
    /// Token must be a valid signed JWT; admin role from its `role` claim
    Jwt,
}

/// Authentication configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Credential extraction mode
    #[serde(default)]
    pub mode: CredentialMode,

    /// JWT signing secret, required in `jwt` mode
    pub jwt_secret: Option<String>,

    /// JWT token expiration in seconds
    #[serde(default = "default_jwt_expiration")]
    pub jwt_expiration_secs: i64,

    /// Cookie holding the session token
    #[serde(default = "default_token_cookie")]
    pub token_cookie: String,

    /// Cookie holding the admin role flag
    #[serde(default = "default_role_cookie")]
    pub role_cookie: String,

    /// Guard policies, evaluated in order
    #[serde(default = "default_policies")]
    pub policies: Vec<GuardPolicyConfig>,
}

fn default_jwt_expiration() -> i64 {
    1800 // 30 minutes
}

fn default_token_cookie() -> String {
    "token".to_string()
}

fn default_role_cookie() -> String {
    "isAdmin".to_string()
}

fn default_policies() -> Vec<GuardPolicyConfig> {
    vec![GuardPolicyConfig::customer(), GuardPolicyConfig::admin()]
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            mode: CredentialMode::default(),
            jwt_secret: None,
            jwt_expiration_secs: default_jwt_expiration(),
            token_cookie: default_token_cookie(),
            role_cookie: default_role_cookie(),
            policies: default_policies(),
        }
    }
}

/// Route rules for one application
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct GuardPolicyConfig {
    /// Name used in logs
    pub name: String,

    /// Path prefixes that require an authenticated caller
    pub protected_prefixes: Vec<String>,

    /// Where unauthenticated callers are sent
    pub login_path: String,

    /// Login/home paths that send an authenticated caller to the dashboard
    #[serde(default)]
    pub entry_paths: Vec<String>,

    /// Where authenticated callers land
    pub dashboard_path: String,

    /// Whether the admin role is needed on top of a token
    #[serde(default)]
    pub require_admin: bool,
}

impl GuardPolicyConfig {
    /// Customer dashboard rules
    pub fn customer() -> Self {
        Self {
            name: "customer".to_string(),
            protected_prefixes: vec!["/dashboard".to_string()],
            login_path: "/auth".to_string(),
            entry_paths: vec!["/auth".to_string()],
            dashboard_path: "/dashboard".to_string(),
            require_admin: false,
        }
    }

    /// Admin console rules
    pub fn admin() -> Self {
        Self {
            name: "admin".to_string(),
            protected_prefixes: vec![
                "/admin/dashboard".to_string(),
                "/admin/users".to_string(),
                "/admin/services".to_string(),
                "/admin/support".to_string(),
            ],
            login_path: "/admin/login".to_string(),
            entry_paths: vec!["/admin".to_string(), "/admin/login".to_string()],
            dashboard_path: "/admin/dashboard".to_string(),
            require_admin: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and optional config file
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when a source cannot be read or a value
    /// has the wrong type.
    pub fn load() -> AppResult<Self> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        debug!(run_mode = %run_mode, "Loading configuration");

        let config = Config::builder()
            // Start with default values
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port() as i64)?
            .set_default("server.workers", default_workers() as i64)?
            .set_default("server.cors_origins", default_cors_origins())?
            .set_default("auth.mode", "presence")?
            .set_default("auth.jwt_expiration_secs", default_jwt_expiration())?
            .set_default("auth.token_cookie", default_token_cookie())?
            .set_default("auth.role_cookie", default_role_cookie())?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables with REGDESK_ prefix
            .add_source(
                Environment::with_prefix("REGDESK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Get the server bind address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
