//! Logout intents and the in-memory auth status.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthStateStore` is the only code that touches the two storage scopes and
//! the cookie jar. Earlier releases of the app wrote differently named logout
//! markers; `IntentKeys` maps the logical intent onto the canonical key plus
//! the legacy aliases that must still be honored on read.
//!
//! ERROR HANDLING
//! ==============
//! Storage can throw at any time (quota, disabled storage, private mode).
//! Every failure is logged and absorbed here; a failed read counts as
//! "marker absent". Callers never see a storage error, so logout and redirect
//! always run to completion.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::{Arc, Mutex, PoisonError};

use crate::cookies::{CookieJar, ScrubPlan, cookie_names};
use crate::retry::Clock;
use crate::status::AuthStatus;
use crate::storage::{KeyValueStore, Scope};

pub const CANONICAL_INTENT_KEY: &str = "FORCE_LOGOUT";
pub const LEGACY_DURABLE_INTENT_KEY: &str = "user_logged_out";
pub const LEGACY_TRANSIENT_INTENT_KEY: &str = "manual_logout";

/// A previous-generation logout marker: present when `key` in `scope` holds
/// exactly `value`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegacyAlias {
    pub scope: Scope,
    pub key: String,
    pub value: String,
}

/// Physical keys backing the logout intent.
///
/// The canonical key is written to both scopes with a timestamp and counts
/// when non-empty. Legacy aliases are read and cleared, never written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntentKeys {
    pub canonical: String,
    pub legacy: Vec<LegacyAlias>,
}

impl Default for IntentKeys {
    fn default() -> Self {
        Self::new(CANONICAL_INTENT_KEY)
            .with_alias(Scope::Durable, LEGACY_DURABLE_INTENT_KEY, "true")
            .with_alias(Scope::Transient, LEGACY_TRANSIENT_INTENT_KEY, "true")
    }
}

impl IntentKeys {
    pub fn new(canonical: &str) -> Self {
        Self { canonical: canonical.to_owned(), legacy: Vec::new() }
    }

    #[must_use]
    pub fn with_alias(mut self, scope: Scope, key: &str, value: &str) -> Self {
        self.legacy.push(LegacyAlias { scope, key: key.to_owned(), value: value.to_owned() });
        self
    }
}

/// Key lists the store needs besides the intent markers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoreKeys {
    pub intent: IntentKeys,
    /// Survive `scrub_all` (display preferences).
    pub preserved: Vec<String>,
    /// Cached auth payloads dropped before a fresh login.
    pub auth_payload: Vec<String>,
}

type StatusObserver = Arc<dyn Fn(AuthStatus) + Send + Sync>;

/// Single source of truth for logout intents and the current [`AuthStatus`].
pub struct AuthStateStore {
    durable: Arc<dyn KeyValueStore>,
    transient: Arc<dyn KeyValueStore>,
    cookies: Arc<dyn CookieJar>,
    clock: Arc<dyn Clock>,
    keys: StoreKeys,
    status: Mutex<AuthStatus>,
    observers: Mutex<Vec<StatusObserver>>,
}

impl AuthStateStore {
    pub fn new(
        durable: Arc<dyn KeyValueStore>,
        transient: Arc<dyn KeyValueStore>,
        cookies: Arc<dyn CookieJar>,
        clock: Arc<dyn Clock>,
        keys: StoreKeys,
    ) -> Self {
        Self {
            durable,
            transient,
            cookies,
            clock,
            keys,
            status: Mutex::new(AuthStatus::Unknown),
            observers: Mutex::new(Vec::new()),
        }
    }

    // =========================================================================
    // LOGOUT INTENT
    // =========================================================================

    /// True if either scope holds a canonical or legacy logout marker.
    ///
    /// Reads storage on every call; never cache the answer across an await.
    pub fn has_logout_intent(&self) -> bool {
        let canonical = &self.keys.intent.canonical;
        Scope::ALL
            .into_iter()
            .any(|scope| self.read(scope, canonical).is_some_and(|v| !v.is_empty()))
            || self
                .keys
                .intent
                .legacy
                .iter()
                .any(|alias| self.read(alias.scope, &alias.key).is_some_and(|v| v == alias.value))
    }

    /// Write a freshly timestamped canonical marker to both scopes.
    pub fn set_logout_intent(&self) {
        let stamp = self.clock.now_millis().to_string();
        for scope in Scope::ALL {
            self.write(scope, &self.keys.intent.canonical, &stamp);
        }
    }

    /// Remove canonical and legacy markers from both scopes. Idempotent.
    pub fn clear_logout_intent(&self) {
        for scope in Scope::ALL {
            self.remove(scope, &self.keys.intent.canonical);
        }
        for alias in &self.keys.intent.legacy {
            self.remove(alias.scope, &alias.key);
        }
    }

    // =========================================================================
    // SCRUB
    // =========================================================================

    /// Clear both scopes except the preserved keys, then optionally re-assert
    /// the logout marker so it survives the scrub that the same logout caused.
    pub fn scrub_all(&self, reassert_intent: bool) {
        for scope in Scope::ALL {
            let kept: Vec<(&str, String)> = self
                .keys
                .preserved
                .iter()
                .filter_map(|key| self.read(scope, key).map(|value| (key.as_str(), value)))
                .collect();

            if let Err(e) = self.scope(scope).clear() {
                log::warn!("{scope} storage clear failed, removing known keys: {e}");
                self.remove_known_keys(scope);
            }

            for (key, value) in kept {
                self.write(scope, key, &value);
            }
        }

        if reassert_intent {
            self.set_logout_intent();
        }
    }

    /// Expire every script-visible cookie across the domain/path variants.
    /// Returns the number of directives the jar accepted.
    pub fn scrub_cookies(&self) -> usize {
        let raw = match self.cookies.cookie_string() {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("cookie read failed, skipping cookie scrub: {e}");
                return 0;
            }
        };
        let names = cookie_names(&raw);
        if names.is_empty() {
            return 0;
        }

        let plan = ScrubPlan::for_host(&self.cookies.host());
        let mut written = 0;
        for name in &names {
            for directive in plan.directives(name) {
                match self.cookies.write(&directive) {
                    Ok(()) => written += 1,
                    Err(e) => log::debug!("cookie expiry rejected for {name}: {e}"),
                }
            }
        }
        log::debug!("expired {} cookie(s) with {written} directive(s)", names.len());
        written
    }

    /// Drop cached auth payloads (`user`, `token`, ...) from both scopes.
    pub fn remove_auth_keys(&self) {
        for scope in Scope::ALL {
            for key in &self.keys.auth_payload {
                self.remove(scope, key);
            }
        }
    }

    // =========================================================================
    // STATUS
    // =========================================================================

    pub fn status(&self) -> AuthStatus {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a new status and notify observers. Returns the status actually
    /// stored.
    ///
    /// `Authenticated` is downgraded to `Unauthenticated` while a logout
    /// intent exists, and `Unknown` is ignored once anything was published.
    pub fn publish(&self, proposed: AuthStatus) -> AuthStatus {
        if proposed == AuthStatus::Unknown {
            return self.status();
        }

        let effective = if proposed == AuthStatus::Authenticated && self.has_logout_intent() {
            log::warn!("refusing to publish Authenticated while a logout intent is present");
            AuthStatus::Unauthenticated
        } else {
            proposed
        };

        *self.status.lock().unwrap_or_else(PoisonError::into_inner) = effective;

        let observers = self.observers.lock().unwrap_or_else(PoisonError::into_inner).clone();
        for observer in observers {
            observer(effective);
        }
        effective
    }

    /// Call `observer` after every publish.
    pub fn subscribe(&self, observer: impl Fn(AuthStatus) + Send + Sync + 'static) {
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(observer));
    }

    pub fn now_millis(&self) -> u64 {
        self.clock.now_millis()
    }

    // =========================================================================
    // STORAGE ACCESS
    // =========================================================================

    fn scope(&self, scope: Scope) -> &dyn KeyValueStore {
        match scope {
            Scope::Durable => self.durable.as_ref(),
            Scope::Transient => self.transient.as_ref(),
        }
    }

    fn read(&self, scope: Scope, key: &str) -> Option<String> {
        match self.scope(scope).get(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("{scope} storage read of {key} failed: {e}");
                None
            }
        }
    }

    fn write(&self, scope: Scope, key: &str, value: &str) {
        if let Err(e) = self.scope(scope).set(key, value) {
            log::warn!("{scope} storage write of {key} failed: {e}");
        }
    }

    fn remove(&self, scope: Scope, key: &str) {
        if let Err(e) = self.scope(scope).remove(key) {
            log::warn!("{scope} storage remove of {key} failed: {e}");
        }
    }

    fn remove_known_keys(&self, scope: Scope) {
        self.remove(scope, &self.keys.intent.canonical);
        for alias in self.keys.intent.legacy.iter().filter(|a| a.scope == scope) {
            self.remove(scope, &alias.key);
        }
        for key in &self.keys.auth_payload {
            self.remove(scope, key);
        }
    }
}
