//! Route authorization model
//!
//! The guard's input and output. Neither type depends on a web framework:
//! the HTTP layer reads cookies into a `RouteRequest` and turns an
//! `AuthDecision` into a response.

use serde::{Deserialize, Serialize};

/// Everything the guard looks at for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRequest {
    /// Request path, without query string
    pub path: String,

    /// Whether a usable auth token accompanied the request
    pub has_token: bool,

    /// Whether the caller carries the admin role
    pub has_admin_role: bool,
}

impl RouteRequest {
    /// Request without any credentials
    pub fn anonymous(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            has_token: false,
            has_admin_role: false,
        }
    }

    /// Request carrying a token but no admin role
    pub fn with_token(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            has_token: true,
            has_admin_role: false,
        }
    }

    /// Request carrying a token and the admin role
    pub fn admin(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            has_token: true,
            has_admin_role: true,
        }
    }
}

/// Outcome of the route guard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", content = "location", rename_all = "snake_case")]
pub enum AuthDecision {
    /// Pass the request through
    Allow,
    /// Answer with a redirect to this path
    RedirectTo(String),
}

impl AuthDecision {
    pub fn is_allow(&self) -> bool {
        matches!(self, AuthDecision::Allow)
    }

    /// Redirect target, if any
    pub fn location(&self) -> Option<&str> {
        match self {
            AuthDecision::Allow => None,
            AuthDecision::RedirectTo(path) => Some(path),
        }
    }
}
