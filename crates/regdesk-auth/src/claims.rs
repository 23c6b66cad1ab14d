//! Session token claims
//!
//! The role travels inside the signed token, so the guard never has to trust
//! a free-standing role cookie in `jwt` mode.

use chrono::{Duration, Utc};
use regdesk_core::models::UserRole;
use serde::{Deserialize, Serialize};

/// JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// User role
    pub role: UserRole,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Claims for a subject and role
    ///
    /// The expiration is left at zero and filled in by `JwtService`.
    ///
    /// # Examples
    ///
    /// ```
    /// use regdesk_auth::Claims;
    /// use regdesk_core::models::UserRole;
    ///
    /// let claims = Claims::new("priya@example.com", UserRole::Customer);
    /// assert_eq!(claims.sub, "priya@example.com");
    /// assert!(!claims.is_admin());
    /// ```
    pub fn new(subject: &str, role: UserRole) -> Self {
        Self {
            sub: subject.to_string(),
            role,
            iat: Utc::now().timestamp(),
            exp: 0,
        }
    }

    /// Create new claims expiring `expires_in_secs` from now
    pub fn with_expiration(subject: &str, role: UserRole, expires_in_secs: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::seconds(expires_in_secs);

        Self {
            sub: subject.to_string(),
            role,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.exp <= Utc::now().timestamp()
    }

    /// Check if the holder may enter the admin console
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_creation() {
        let claims = Claims::new("testuser", UserRole::Customer);
        assert_eq!(claims.sub, "testuser");
        assert_eq!(claims.role, UserRole::Customer);
        assert!(claims.iat > 0);
        assert_eq!(claims.exp, 0);
    }

    #[test]
    fn test_claims_with_expiration() {
        let claims = Claims::with_expiration("admin", UserRole::Admin, 3600);
        assert!(!claims.is_expired());

        let now = Utc::now().timestamp();
        assert!(claims.exp > now);
        assert!(claims.exp <= now + 3600);
    }

    #[test]
    fn test_expired_claims() {
        let mut claims = Claims::new("user", UserRole::Customer);
        claims.exp = (Utc::now() - Duration::hours(1)).timestamp();
        assert!(claims.is_expired());
    }

    #[test]
    fn test_role_checks() {
        assert!(!Claims::new("c", UserRole::Customer).is_admin());
        assert!(!Claims::new("s", UserRole::Support).is_admin());
        assert!(Claims::new("a", UserRole::Admin).is_admin());
    }
}
