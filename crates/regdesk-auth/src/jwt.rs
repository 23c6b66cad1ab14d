//! Signed session tokens
//!
//! In `jwt` credential mode the `token` cookie holds an HS256 token whose
//! `role` claim decides admin console access. The login flow issues tokens;
//! the route guard only verifies them.

use crate::claims::Claims;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use regdesk_core::error::AppError;
use regdesk_core::models::UserRole;
use tracing::{debug, warn};

/// Issues and verifies session tokens with one shared secret
#[derive(Clone)]
pub struct JwtService {
    session_lifetime: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    /// Keys for `secret`; tokens issued without an expiry live `lifetime_secs`
    pub fn new(secret: &str, lifetime_secs: i64) -> Self {
        Self {
            session_lifetime: Duration::seconds(lifetime_secs),
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Sign a session token
    ///
    /// Claims with `exp == 0` expire one session lifetime from now.
    pub fn issue(&self, claims: &Claims) -> Result<String, AppError> {
        let mut claims = claims.clone();
        if claims.exp == 0 {
            claims.exp = (Utc::now() + self.session_lifetime).timestamp();
        }

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InvalidToken(format!("Cannot sign session: {}", e)))
    }

    /// Sign a session token for a visitor with `role`
    pub fn issue_for(&self, subject: &str, role: UserRole) -> Result<String, AppError> {
        self.issue(&Claims::new(subject, role))
    }

    /// Check signature and expiry and return the session claims
    ///
    /// # Errors
    ///
    /// `AppError::TokenExpired` for a session past its `exp`, otherwise
    /// `AppError::InvalidToken`. The guard treats both as "no token".
    ///
    /// # Examples
    ///
    /// ```
    /// use regdesk_auth::JwtService;
    /// use regdesk_core::models::UserRole;
    ///
    /// let sessions = JwtService::new("secret", 1800);
    /// let token = sessions.issue_for("ops@regdesk.test", UserRole::Admin)?;
    /// assert!(sessions.verify(&token)?.is_admin());
    /// # Ok::<(), regdesk_core::AppError>(())
    /// ```
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => {
                    warn!(error = %e, "Rejected session token");
                    AppError::InvalidToken(e.to_string())
                }
            })?
            .claims;

        // jsonwebtoken allows 60s of leeway past exp
        if claims.is_expired() {
            debug!(subject = %claims.sub, "Session expired");
            return Err(AppError::TokenExpired);
        }

        Ok(claims)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("session_lifetime_secs", &self.session_lifetime.num_seconds())
            .finish_non_exhaustive()
    }
}
