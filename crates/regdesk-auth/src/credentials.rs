//! Credential extraction
//!
//! Turns the cookies on an incoming request into a `RouteRequest`. Nothing
//! here fails: unreadable, empty or invalid values count as absent.

use crate::jwt::JwtService;
use actix_web::HttpRequest;
use regdesk_core::config::{AuthConfig, CredentialMode};
use regdesk_core::models::RouteRequest;
use regdesk_core::{AppError, AppResult};
use std::sync::Arc;
use tracing::debug;

/// Interpret the admin role flag cookie
///
/// Only the exact string `"true"` grants the role.
pub fn parse_role_flag(value: Option<&str>) -> bool {
    value == Some("true")
}

/// Extract a bearer token from the Authorization header
fn bearer_token(req: &HttpRequest) -> Option<String> {
    let header = req.headers().get("Authorization")?.to_str().ok()?;
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Reads session credentials according to the configured mode
#[derive(Debug, Clone)]
pub struct CredentialExtractor {
    token_cookie: String,
    role_cookie: String,
    jwt: Option<Arc<JwtService>>,
}

impl CredentialExtractor {
    /// Token presence plus the `"true"` role flag cookie
    pub fn presence(token_cookie: impl Into<String>, role_cookie: impl Into<String>) -> Self {
        Self {
            token_cookie: token_cookie.into(),
            role_cookie: role_cookie.into(),
            jwt: None,
        }
    }

    /// Signed token whose `role` claim carries the admin role
    pub fn jwt(token_cookie: impl Into<String>, jwt: Arc<JwtService>) -> Self {
        Self {
            token_cookie: token_cookie.into(),
            role_cookie: String::new(),
            jwt: Some(jwt),
        }
    }

    /// Build from configuration
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when `jwt` mode is selected without a secret.
    pub fn from_config(config: &AuthConfig) -> AppResult<Self> {
        match config.mode {
            CredentialMode::Presence => Ok(Self::presence(
                config.token_cookie.clone(),
                config.role_cookie.clone(),
            )),
            CredentialMode::Jwt => {
                let secret = config
                    .jwt_secret
                    .as_deref()
                    .filter(|secret| !secret.is_empty())
                    .ok_or_else(|| {
                        AppError::Config("auth.jwt_secret is required in jwt mode".to_string())
                    })?;
                let jwt = Arc::new(JwtService::new(secret, config.jwt_expiration_secs));
                Ok(Self::jwt(config.token_cookie.clone(), jwt))
            }
        }
    }

    pub fn mode(&self) -> CredentialMode {
        if self.jwt.is_some() {
            CredentialMode::Jwt
        } else {
            CredentialMode::Presence
        }
    }

    /// Build the guard input for an HTTP request
    pub fn route_request(&self, req: &HttpRequest) -> RouteRequest {
        let cookie_token = req
            .cookie(&self.token_cookie)
            .map(|cookie| cookie.value().to_string());

        match self.jwt {
            Some(_) => {
                let token = bearer_token(req).or(cookie_token);
                self.evaluate(req.path(), token.as_deref(), None)
            }
            None => {
                let role_flag = req
                    .cookie(&self.role_cookie)
                    .map(|cookie| cookie.value().to_string());
                self.evaluate(req.path(), cookie_token.as_deref(), role_flag.as_deref())
            }
        }
    }

    /// Build the guard input from raw credential values
    ///
    /// `role_flag` is ignored in `jwt` mode; the role comes from the token.
    pub fn evaluate(&self, path: &str, token: Option<&str>, role_flag: Option<&str>) -> RouteRequest {
        let token = token.filter(|token| !token.trim().is_empty());

        let (has_token, has_admin_role) = match (&self.jwt, token) {
            (_, None) => (false, false),
            (None, Some(_)) => (true, parse_role_flag(role_flag)),
            (Some(jwt), Some(token)) => match jwt.verify(token) {
                Ok(claims) => (true, claims.is_admin()),
                Err(e) => {
                    debug!(path = %path, error = %e, "Ignoring unusable session token");
                    (false, false)
                }
            },
        };

        RouteRequest {
            path: path.to_string(),
            has_token,
            has_admin_role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{cookie::Cookie, test::TestRequest};
    use regdesk_core::models::UserRole;

    const TEST_SECRET: &str = "credentials-test-secret";

    fn jwt_extractor() -> (CredentialExtractor, Arc<JwtService>) {
        let jwt = Arc::new(JwtService::new(TEST_SECRET, 3600));
        (CredentialExtractor::jwt("token", jwt.clone()), jwt)
    }

    #[test]
    fn test_parse_role_flag() {
        assert!(parse_role_flag(Some("true")));
        assert!(!parse_role_flag(Some("TRUE")));
        assert!(!parse_role_flag(Some("1")));
        assert!(!parse_role_flag(Some(" true")));
        assert!(!parse_role_flag(Some("")));
        assert!(!parse_role_flag(None));
    }

    #[test]
    fn test_presence_mode_values() {
        let extractor = CredentialExtractor::presence("token", "isAdmin");

        let req = extractor.evaluate("/dashboard", Some("abc"), None);
        assert!(req.has_token);
        assert!(!req.has_admin_role);

        let req = extractor.evaluate("/admin/dashboard", Some("abc"), Some("true"));
        assert!(req.has_token);
        assert!(req.has_admin_role);

        let req = extractor.evaluate("/admin/dashboard", Some("abc"), Some("yes"));
        assert!(!req.has_admin_role);
    }

    #[test]
    fn test_blank_token_is_absent() {
        let extractor = CredentialExtractor::presence("token", "isAdmin");
        let req = extractor.evaluate("/dashboard", Some("   "), Some("true"));
        assert!(!req.has_token);
        assert!(!req.has_admin_role);
    }

    #[test]
    fn test_presence_mode_reads_cookies() {
        let extractor = CredentialExtractor::presence("token", "isAdmin");
        let http_req = TestRequest::get()
            .uri("/admin/dashboard?tab=users")
            .cookie(Cookie::new("token", "opaque-session"))
            .cookie(Cookie::new("isAdmin", "true"))
            .to_http_request();

        let req = extractor.route_request(&http_req);
        assert_eq!(req.path, "/admin/dashboard");
        assert!(req.has_token);
        assert!(req.has_admin_role);
    }

    #[test]
    fn test_presence_mode_ignores_bearer_header() {
        let extractor = CredentialExtractor::presence("token", "isAdmin");
        let http_req = TestRequest::get()
            .uri("/dashboard")
            .insert_header(("Authorization", "Bearer something"))
            .to_http_request();

        assert!(!extractor.route_request(&http_req).has_token);
    }

    #[test]
    fn test_jwt_mode_role_from_claims() {
        let (extractor, jwt) = jwt_extractor();
        let admin = jwt.issue_for("ops", UserRole::Admin).unwrap();
        let customer = jwt
            .issue_for("priya", UserRole::Customer)
            .unwrap();

        let req = extractor.evaluate("/admin/dashboard", Some(&admin), None);
        assert!(req.has_token && req.has_admin_role);

        // the flag cookie cannot promote a customer token
        let req = extractor.evaluate("/admin/dashboard", Some(&customer), Some("true"));
        assert!(req.has_token);
        assert!(!req.has_admin_role);
    }

    #[test]
    fn test_jwt_mode_invalid_token_is_absent() {
        let (extractor, _) = jwt_extractor();
        let req = extractor.evaluate("/dashboard", Some("not-a-jwt"), None);
        assert!(!req.has_token);

        let foreign = JwtService::new("other-secret", 3600)
            .issue_for("x", UserRole::Admin)
            .unwrap();
        let req = extractor.evaluate("/admin/dashboard", Some(&foreign), None);
        assert!(!req.has_token);
        assert!(!req.has_admin_role);
    }

    #[test]
    fn test_jwt_mode_reads_bearer_then_cookie() {
        let (extractor, jwt) = jwt_extractor();
        let token = jwt.issue_for("ops", UserRole::Admin).unwrap();

        let http_req = TestRequest::get()
            .uri("/admin/users")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_http_request();
        assert!(extractor.route_request(&http_req).has_admin_role);

        let http_req = TestRequest::get()
            .uri("/admin/users")
            .cookie(Cookie::new("token", token))
            .to_http_request();
        assert!(extractor.route_request(&http_req).has_admin_role);
    }

    #[test]
    fn test_from_config() {
        let mut config = AuthConfig::default();
        let extractor = CredentialExtractor::from_config(&config).unwrap();
        assert_eq!(extractor.mode(), CredentialMode::Presence);

        config.mode = CredentialMode::Jwt;
        assert!(matches!(
            CredentialExtractor::from_config(&config),
            Err(AppError::Config(_))
        ));

        config.jwt_secret = Some("s3cret".to_string());
        let extractor = CredentialExtractor::from_config(&config).unwrap();
        assert_eq!(extractor.mode(), CredentialMode::Jwt);
    }
}
