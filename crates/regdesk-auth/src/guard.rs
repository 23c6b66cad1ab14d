//! Route authorization guard
//!
//! Decides per request whether to serve the page, send the visitor to the
//! login page, or send an already signed-in visitor on to their dashboard.
//! Decisions depend only on the `RouteRequest` and the policies loaded at
//! startup.

use regdesk_core::config::GuardPolicyConfig;
use regdesk_core::models::{AuthDecision, RouteRequest};
use regdesk_core::{AppError, AppResult};
use tracing::{debug, info, warn};

/// Check whether `path` falls under one of the protected prefixes
///
/// A prefix matches the path itself and anything below it on a segment
/// boundary: `/dashboard` covers `/dashboard/profile` but not `/dashboardX`
/// or `/dashboard-other`.
pub fn is_protected<S: AsRef<str>>(path: &str, prefixes: &[S]) -> bool {
    prefixes.iter().any(|prefix| {
        let prefix = prefix.as_ref();
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

/// Route rules for one application (customer dashboard, admin console, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardPolicy {
    name: String,
    protected_prefixes: Vec<String>,
    login_path: String,
    entry_paths: Vec<String>,
    dashboard_path: String,
    require_admin: bool,
}

impl GuardPolicy {
    /// Build and validate a policy from configuration
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` for relative paths, prefixes with a
    /// trailing slash, or rules that would redirect in a loop.
    pub fn new(config: &GuardPolicyConfig) -> AppResult<Self> {
        let policy = Self {
            name: config.name.clone(),
            protected_prefixes: config.protected_prefixes.clone(),
            login_path: config.login_path.clone(),
            entry_paths: config.entry_paths.clone(),
            dashboard_path: config.dashboard_path.clone(),
            require_admin: config.require_admin,
        };
        policy.validate()?;
        Ok(policy)
    }

    fn validate(&self) -> AppResult<()> {
        let config_error =
            |message: String| Err(AppError::Config(format!("Guard policy '{}': {}", self.name, message)));

        for prefix in &self.protected_prefixes {
            if !prefix.starts_with('/') || prefix.ends_with('/') {
                return config_error(format!(
                    "protected prefix '{}' must start with '/' and not end with '/'",
                    prefix
                ));
            }
        }

        for path in self
            .entry_paths
            .iter()
            .chain([&self.login_path, &self.dashboard_path])
        {
            if !path.starts_with('/') {
                return config_error(format!("path '{}' must start with '/'", path));
            }
        }

        if self.is_protected(&self.login_path) {
            return config_error(format!(
                "login path '{}' is itself protected",
                self.login_path
            ));
        }

        if self.is_entry(&self.dashboard_path) {
            return config_error(format!(
                "dashboard path '{}' is also an entry path",
                self.dashboard_path
            ));
        }

        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn dashboard_path(&self) -> &str {
        &self.dashboard_path
    }

    /// Check whether this policy protects `path`
    pub fn is_protected(&self, path: &str) -> bool {
        is_protected(path, &self.protected_prefixes)
    }

    /// Check whether `path` is a login/home page of this application
    pub fn is_entry(&self, path: &str) -> bool {
        self.entry_paths.iter().any(|entry| entry == path)
    }

    /// Check whether the request carries what this application needs
    ///
    /// A token alone is not enough when the admin role is required.
    pub fn is_authenticated(&self, request: &RouteRequest) -> bool {
        request.has_token && (!self.require_admin || request.has_admin_role)
    }

    /// Decide what to do with one request
    ///
    /// # Examples
    ///
    /// ```
    /// use regdesk_auth::GuardPolicy;
    /// use regdesk_core::config::GuardPolicyConfig;
    /// use regdesk_core::models::{AuthDecision, RouteRequest};
    ///
    /// let policy = GuardPolicy::new(&GuardPolicyConfig::customer())?;
    /// assert_eq!(
    ///     policy.decide(&RouteRequest::anonymous("/dashboard/profile")),
    ///     AuthDecision::RedirectTo("/auth".to_string()),
    /// );
    /// assert_eq!(
    ///     policy.decide(&RouteRequest::with_token("/dashboard/profile")),
    ///     AuthDecision::Allow,
    /// );
    /// # Ok::<(), regdesk_core::AppError>(())
    /// ```
    pub fn decide(&self, request: &RouteRequest) -> AuthDecision {
        let authenticated = self.is_authenticated(request);

        if !authenticated && self.is_protected(&request.path) {
            return AuthDecision::RedirectTo(self.login_path.clone());
        }

        if authenticated && self.is_entry(&request.path) {
            return AuthDecision::RedirectTo(self.dashboard_path.clone());
        }

        AuthDecision::Allow
    }
}

/// Ordered set of policies applied to every request
#[derive(Debug, Clone, Default)]
pub struct RouteGuard {
    policies: Vec<GuardPolicy>,
}

impl RouteGuard {
    /// Build a guard from already validated policies
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when one policy would bounce requests
    /// arriving from another: a login page protected by any policy, or a
    /// dashboard that is some policy's entry page.
    pub fn new(policies: Vec<GuardPolicy>) -> AppResult<Self> {
        for policy in &policies {
            for other in &policies {
                if other.is_protected(policy.login_path()) {
                    return Err(AppError::Config(format!(
                        "Login path '{}' of policy '{}' is protected by policy '{}'",
                        policy.login_path(),
                        policy.name(),
                        other.name()
                    )));
                }
                if other.is_entry(policy.dashboard_path()) {
                    return Err(AppError::Config(format!(
                        "Dashboard path '{}' of policy '{}' is an entry path of policy '{}'",
                        policy.dashboard_path(),
                        policy.name(),
                        other.name()
                    )));
                }
            }
        }

        if policies.is_empty() {
            warn!("Route guard has no policies; every request is allowed");
        } else {
            info!(policies = policies.len(), "Route guard configured");
        }

        Ok(Self { policies })
    }

    /// Build a guard straight from configuration
    pub fn from_config(configs: &[GuardPolicyConfig]) -> AppResult<Self> {
        let policies = configs
            .iter()
            .map(GuardPolicy::new)
            .collect::<AppResult<Vec<_>>>()?;
        Self::new(policies)
    }

    pub fn policies(&self) -> &[GuardPolicy] {
        &self.policies
    }

    /// First redirect produced by any policy, in order; otherwise `Allow`
    pub fn decide(&self, request: &RouteRequest) -> AuthDecision {
        for policy in &self.policies {
            let decision = policy.decide(request);
            if let AuthDecision::RedirectTo(ref location) = decision {
                debug!(
                    policy = %policy.name(),
                    path = %request.path,
                    location = %location,
                    "Route guard redirect"
                );
                return decision;
            }
        }

        AuthDecision::Allow
    }
}
