//! Decides and publishes the auth status for each page load and navigation.
//!
//! SYSTEM CONTEXT
//! ==============
//! Three sources of truth can disagree: the server session cookie (seen only
//! through the status oracle) and the logout markers in the two storage
//! scopes. A recorded logout always wins. The oracle is consulted only when no
//! marker exists, and the markers are read again after it answers because
//! another tab may have logged out in the meantime.
//!
//! ERROR HANDLING
//! ==============
//! Every failure ends in `AuthStatus::Unauthenticated`. Transient oracle
//! failures are retried under `RetryPolicy`; everything else resolves at once.
//! A domain-policy violation is handled as a forced logout.

#[cfg(test)]
#[path = "reconciler_test.rs"]
mod reconciler_test;

use std::sync::Arc;

use futures::future::{self, Either};

use crate::api::{AuthApi, Navigator};
use crate::config::AuthConfig;
use crate::cookies::CookieJar;
use crate::error::NavigationError;
use crate::retry::{Clock, Timer, with_timeout};
use crate::status::{AuthStatus, Identity, StatusResponse, Verdict};
use crate::storage::KeyValueStore;
use crate::store::AuthStateStore;
use crate::view::{LOGIN_PATH, View};

/// Banner shown on the login view after a non-institutional sign-in.
pub const UNAUTHORIZED_MESSAGE: &str = "Only university students with .student.iul.ac.in email can sign up!";
/// Banner shown when the OAuth redirect cannot be started.
pub const LOGIN_FAILED_MESSAGE: &str = "Failed to connect to authentication service";

/// Host implementations of every seam, supplied once at startup.
pub struct Backends {
    pub durable: Arc<dyn KeyValueStore>,
    pub transient: Arc<dyn KeyValueStore>,
    pub cookies: Arc<dyn CookieJar>,
    pub api: Arc<dyn AuthApi>,
    pub navigator: Arc<dyn Navigator>,
    pub timer: Arc<dyn Timer>,
    pub clock: Arc<dyn Clock>,
}

/// Explicit session context threaded through the app instead of ambient
/// global storage reads.
#[derive(Clone)]
pub struct SessionContext {
    pub config: Arc<AuthConfig>,
    pub store: Arc<AuthStateStore>,
    pub reconciler: Arc<AuthReconciler>,
}

impl SessionContext {
    pub fn new(config: AuthConfig, backends: Backends) -> Self {
        let config = Arc::new(config);
        let store = Arc::new(AuthStateStore::new(
            backends.durable,
            backends.transient,
            backends.cookies,
            backends.clock,
            config.keys.clone(),
        ));
        let reconciler = Arc::new(AuthReconciler {
            config: config.clone(),
            store: store.clone(),
            api: backends.api,
            navigator: backends.navigator,
            timer: backends.timer,
        });
        Self { config, store, reconciler }
    }

    /// Classify a location using the configured protected-view set.
    pub fn view_for(&self, path: &str, query: &str) -> View {
        View::resolve(path, query, &self.config.protected_paths)
    }
}

/// Result of a status reconciliation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    pub status: AuthStatus,
    /// Present only when `status` is `Authenticated`.
    pub identity: Option<Identity>,
}

/// What the logout protocol did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogoutOutcome {
    /// The server acknowledged the logout inside the fallback window.
    pub server_confirmed: bool,
    /// Login entry point the browser was sent to.
    pub target: String,
    pub navigated: bool,
}

pub struct AuthReconciler {
    config: Arc<AuthConfig>,
    store: Arc<AuthStateStore>,
    api: Arc<dyn AuthApi>,
    navigator: Arc<dyn Navigator>,
    timer: Arc<dyn Timer>,
}

impl AuthReconciler {
    // =========================================================================
    // STARTUP
    // =========================================================================

    /// Establish the status for a fresh page load of `view`.
    pub async fn reconcile(&self, view: &View) -> Resolution {
        if view.ends_session() {
            log::info!("{view:?} ends the session, skipping status check");
            return self.resolve(AuthStatus::Unauthenticated, None);
        }

        if self.store.has_logout_intent() || view.forces_logout() {
            log::info!("logout intent present, skipping status check");
            self.store.scrub_cookies();
            if view.is_plain_login() {
                log::info!("login view reached, clearing logout intent to allow a fresh login");
                self.store.clear_logout_intent();
            } else {
                self.store.set_logout_intent();
            }
            return self.resolve(AuthStatus::Unauthenticated, None);
        }

        self.check_status().await
    }

    async fn check_status(&self) -> Resolution {
        let policy = self.config.retry;
        let mut attempt: u32 = 0;
        loop {
            if self.store.has_logout_intent() {
                log::info!("logout intent appeared, abandoning status check");
                return self.resolve(AuthStatus::Unauthenticated, None);
            }

            log::debug!("checking auth status (attempt {}/{})", attempt + 1, policy.max_attempts());
            let result = with_timeout(self.timer.as_ref(), policy.attempt_timeout, self.api.status()).await;
            match result {
                Ok(response) => return self.apply(response),
                Err(e) if policy.should_retry(attempt, &e) => {
                    log::warn!("auth check failed: {e}; retrying ({}/{})", attempt + 1, policy.max_retries);
                    self.timer.sleep(policy.backoff).await;
                    attempt += 1;
                }
                Err(e) => {
                    log::warn!("auth check failed: {e}; treating as signed out");
                    return self.resolve(AuthStatus::Unauthenticated, None);
                }
            }
        }
    }

    fn apply(&self, response: StatusResponse) -> Resolution {
        match self.config.policy.evaluate(response) {
            Verdict::DomainRejected { email } => {
                log::warn!("session email outside {} ({email}), forcing logout", self.config.policy.suffix());
                self.reject_domain();
                Resolution { status: AuthStatus::Unauthenticated, identity: None }
            }
            Verdict::NotAuthenticated => {
                log::info!("server reports no session, recording logout intent");
                self.store.set_logout_intent();
                self.resolve(AuthStatus::Unauthenticated, None)
            }
            Verdict::Authenticated(identity) => {
                if self.store.has_logout_intent() {
                    log::info!("logout recorded during status check, keeping signed out");
                    return self.resolve(AuthStatus::Unauthenticated, None);
                }
                let resolution = self.resolve(AuthStatus::Authenticated, identity);
                if resolution.status.is_authenticated() {
                    self.store.clear_logout_intent();
                }
                resolution
            }
        }
    }

    fn reject_domain(&self) {
        self.store.set_logout_intent();
        self.store.scrub_cookies();
        self.store.publish(AuthStatus::Unauthenticated);
        let target = format!("{LOGIN_PATH}?error=unauthorized&force=true");
        if let Err(e) = self.navigator.redirect(&target) {
            log::error!("redirect to {target} failed: {e}");
        }
    }

    fn resolve(&self, status: AuthStatus, identity: Option<Identity>) -> Resolution {
        let status = self.store.publish(status);
        Resolution { status, identity: identity.filter(|_| status.is_authenticated()) }
    }

    // =========================================================================
    // NAVIGATION
    // =========================================================================

    /// Side effects of arriving at `view`. Returns a banner for the view to
    /// display, if any.
    pub fn enter_view(&self, view: &View) -> Option<&'static str> {
        match view {
            View::AccountDeleted => {
                self.store.publish(AuthStatus::Unauthenticated);
                self.store.clear_logout_intent();
                self.store.scrub_cookies();
                None
            }
            View::Login(query) if query.unauthorized() => {
                self.store.publish(AuthStatus::Unauthenticated);
                self.store.set_logout_intent();
                self.store.scrub_cookies();
                Some(UNAUTHORIZED_MESSAGE)
            }
            View::Login(query) if query.force => {
                self.store.set_logout_intent();
                self.store.scrub_cookies();
                None
            }
            View::Login(_) => {
                self.store.clear_logout_intent();
                None
            }
            View::Protected(_) | View::Other(_) => None,
        }
    }

    // =========================================================================
    // LOGOUT / LOGIN
    // =========================================================================

    /// Sign out. Always ends with a navigation to the login entry point,
    /// at most `logout_fallback` after the call starts.
    pub async fn logout(&self) -> LogoutOutcome {
        self.store.set_logout_intent();

        let server_confirmed = match future::select(self.api.logout(), self.timer.sleep(self.config.logout_fallback)).await {
            Either::Left((Ok(()), _)) => true,
            Either::Left((Err(e), _)) => {
                log::warn!("server logout failed, continuing with local logout: {e}");
                false
            }
            Either::Right(((), _)) => {
                log::warn!("server logout still pending after {:?}, continuing", self.config.logout_fallback);
                false
            }
        };

        self.store.scrub_all(true);
        self.store.scrub_cookies();
        self.store.publish(AuthStatus::Unauthenticated);

        let target = format!("{LOGIN_PATH}?t={}&force=true", self.store.now_millis());
        let navigated = match self.navigator.redirect(&target) {
            Ok(()) => true,
            Err(e) => {
                log::error!("redirect to {target} failed: {e}");
                false
            }
        };
        LogoutOutcome { server_confirmed, target, navigated }
    }

    /// Start an OAuth sign-in from a clean slate. Returns the provider URL.
    ///
    /// # Errors
    ///
    /// Returns the navigation error if the browser refuses the redirect; the
    /// login view then shows [`LOGIN_FAILED_MESSAGE`].
    pub async fn begin_login(&self) -> Result<String, NavigationError> {
        self.store.scrub_cookies();
        self.store.clear_logout_intent();
        self.store.remove_auth_keys();
        self.timer.sleep(self.config.login_settle).await;

        let url = format!("{}?t={}", self.config.endpoints.oauth_start, self.store.now_millis());
        self.navigator.redirect(&url)?;
        Ok(url)
    }
}
