//! User roles
//!
//! Roles carried in signed session tokens.

use serde::{Deserialize, Serialize};
use std::fmt;

/// User role enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Customer using the dashboard
    #[default]
    Customer,
    /// Support agent using the chat console
    Support,
    /// Administrator using the admin console
    Admin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Customer => write!(f, "customer"),
            UserRole::Support => write!(f, "support"),
            UserRole::Admin => write!(f, "admin"),
        }
    }
}

impl UserRole {
    /// Check if role may enter the admin console
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_permissions() {
        assert!(!UserRole::Customer.is_admin());
        assert!(!UserRole::Support.is_admin());
        assert!(UserRole::Admin.is_admin());
    }

    #[test]
    fn test_role_display_roundtrips_through_serde() {
        let json = serde_json::to_string(&UserRole::Support).unwrap();
        assert_eq!(json, format!("\"{}\"", UserRole::Support));
    }
}
