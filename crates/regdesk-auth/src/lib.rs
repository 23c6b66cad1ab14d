//! Route authorization for RegDesk
//!
//! This crate decides which pages a visitor may open: the customer dashboard
//! needs a session token, the admin console additionally needs the admin
//! role, and signed-in visitors on a login page are sent to their dashboard.
//!
//! # Features
//!
//! - Framework-free guard decisions over an explicit `RouteRequest`
//! - Cookie credential extraction in legacy `presence` mode or signed `jwt` mode
//! - Signed session tokens (HS256) for `jwt` mode
//! - Actix-web middleware issuing `302 Found` redirects
//!
//! # Examples
//!
//! ```
//! use regdesk_auth::RouteGuard;
//! use regdesk_core::config::GuardPolicyConfig;
//! use regdesk_core::models::{AuthDecision, RouteRequest};
//!
//! let guard = RouteGuard::from_config(&[
//!     GuardPolicyConfig::customer(),
//!     GuardPolicyConfig::admin(),
//! ])?;
//!
//! assert_eq!(
//!     guard.decide(&RouteRequest::with_token("/admin/dashboard")),
//!     AuthDecision::RedirectTo("/admin/login".to_string()),
//! );
//! # Ok::<(), regdesk_core::AppError>(())
//! ```

pub mod claims;
pub mod credentials;
pub mod guard;
pub mod jwt;
pub mod middleware;

pub use claims::Claims;
pub use credentials::{parse_role_flag, CredentialExtractor};
pub use guard::{is_protected, GuardPolicy, RouteGuard};
pub use jwt::JwtService;
pub use middleware::RouteGuardMiddleware;
