//! Endpoint, key, and timing configuration for the reconciliation core.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use crate::retry::RetryPolicy;
use crate::status::DomainPolicy;
use crate::store::{IntentKeys, StoreKeys};

pub const DEFAULT_LOCAL_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_PRODUCTION_API_URL: &str = "https://writified-backend.onrender.com";

pub const STATUS_PATH: &str = "/auth/status";
pub const LOGOUT_PATH: &str = "/auth/logout";
pub const OAUTH_START_PATH: &str = "/auth/google";
pub const DELETE_ACCOUNT_PATH: &str = "/api/delete-account";

pub const DEFAULT_ALLOWED_EMAIL_SUFFIX: &str = "@student.iul.ac.in";
pub const DEFAULT_THEME_KEY: &str = "darkMode";
pub const DEFAULT_AUTH_PAYLOAD_KEYS: [&str; 4] = ["user", "token", "auth", "session"];

pub const DEFAULT_LOGOUT_FALLBACK_MS: u64 = 1_500;
pub const DEFAULT_LOGIN_SETTLE_MS: u64 = 100;

/// Absolute URLs of the backend endpoints the client consumes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    pub status: String,
    pub logout: String,
    pub oauth_start: String,
    pub delete_account: String,
}

impl Endpoints {
    pub fn new(api_base: &str) -> Self {
        let base = api_base.trim().trim_end_matches('/');
        Self {
            status: format!("{base}{STATUS_PATH}"),
            logout: format!("{base}{LOGOUT_PATH}"),
            oauth_start: format!("{base}{OAUTH_START_PATH}"),
            delete_account: format!("{base}{DELETE_ACCOUNT_PATH}"),
        }
    }
}

/// Pick the API base URL for the page's host.
///
/// An explicit, non-empty override wins. Otherwise `localhost` talks to the
/// local backend and every other host to the hosted one.
pub fn resolve_api_base(hostname: &str, override_url: Option<&str>) -> String {
    if let Some(url) = override_url.map(str::trim).filter(|u| !u.is_empty()) {
        return url.trim_end_matches('/').to_owned();
    }
    if hostname == "localhost" {
        DEFAULT_LOCAL_API_URL.to_owned()
    } else {
        DEFAULT_PRODUCTION_API_URL.to_owned()
    }
}

/// Everything the reconciler needs besides its backends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthConfig {
    pub endpoints: Endpoints,
    pub policy: DomainPolicy,
    pub retry: RetryPolicy,
    pub keys: StoreKeys,
    /// Views that render only for an authenticated session.
    pub protected_paths: Vec<String>,
    /// Upper bound on waiting for the server logout call.
    pub logout_fallback: Duration,
    /// Pause between clearing local state and leaving for the OAuth provider.
    pub login_settle: Duration,
}

impl AuthConfig {
    pub fn new(api_base: &str) -> Self {
        Self {
            endpoints: Endpoints::new(api_base),
            policy: DomainPolicy::new(DEFAULT_ALLOWED_EMAIL_SUFFIX),
            retry: RetryPolicy::default(),
            keys: StoreKeys {
                intent: IntentKeys::default(),
                preserved: vec![DEFAULT_THEME_KEY.to_owned()],
                auth_payload: DEFAULT_AUTH_PAYLOAD_KEYS.iter().map(|k| (*k).to_owned()).collect(),
            },
            protected_paths: Vec::new(),
            logout_fallback: Duration::from_millis(DEFAULT_LOGOUT_FALLBACK_MS),
            login_settle: Duration::from_millis(DEFAULT_LOGIN_SETTLE_MS),
        }
    }

    #[must_use]
    pub fn with_protected_paths(mut self, paths: &[&str]) -> Self {
        self.protected_paths = paths.iter().map(|p| (*p).to_owned()).collect();
        self
    }

    #[must_use]
    pub fn with_allowed_suffix(mut self, suffix: &str) -> Self {
        self.policy = DomainPolicy::new(suffix);
        self
    }
}
