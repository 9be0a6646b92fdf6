//! Browser implementations of the reconciliation core's seams.
//!
//! SYSTEM CONTEXT
//! ==============
//! `localStorage` and `sessionStorage` back the durable and transient scopes,
//! `document.cookie` backs the cookie jar, `location.href` performs full
//! navigations, and `gloo-timers` provides sleeps on the event loop.
//!
//! None of these types hold a web-sys handle. Each call looks the handle up
//! again, which keeps them `Send + Sync` for Leptos context.
//!
//! TRADE-OFFS
//! ==========
//! Off-browser (SSR and native tests) every storage, cookie and navigation
//! call fails with `Unavailable`. The core already absorbs those failures,
//! and the startup reconciliation only runs after hydration.

#[cfg(test)]
#[path = "browser_test.rs"]
mod browser_test;

use std::sync::Arc;
use std::time::Duration;

use authstate::{
    AuthConfig, Backends, Clock, CookieJar, KeyValueStore, NavigationError, Scope, SessionContext, StorageError,
    Timer, resolve_api_base,
};
use futures::FutureExt;
use futures::future::LocalBoxFuture;

use crate::app::PROTECTED_PATHS;
use crate::net::api::HttpAuthApi;

#[cfg(not(feature = "hydrate"))]
const NO_BROWSER: &str = "no browser window";

/// Build the page's session context from the current host.
pub fn session_context() -> SessionContext {
    let api_base = resolve_api_base(&current_hostname(), option_env!("WRITIFY_API_URL"));
    let config = AuthConfig::new(&api_base).with_protected_paths(&PROTECTED_PATHS);
    let api = HttpAuthApi::new(config.endpoints.clone());
    SessionContext::new(
        config,
        Backends {
            durable: Arc::new(BrowserStorage::new(Scope::Durable)),
            transient: Arc::new(BrowserStorage::new(Scope::Transient)),
            cookies: Arc::new(DocumentCookies),
            api: Arc::new(api),
            navigator: Arc::new(LocationNavigator),
            timer: Arc::new(BrowserTimer),
            clock: Arc::new(BrowserClock),
        },
    )
}

/// `location.hostname`, or empty off-browser.
pub fn current_hostname() -> String {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.location().hostname().ok())
            .unwrap_or_default()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        String::new()
    }
}

/// Readable message for a thrown JS value.
#[cfg(feature = "hydrate")]
pub(crate) fn js_error_message(value: &wasm_bindgen::JsValue) -> String {
    use wasm_bindgen::JsCast;

    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return format!("{}: {}", String::from(err.name()), String::from(err.message()));
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

// =============================================================================
// STORAGE
// =============================================================================

/// `localStorage` (durable) or `sessionStorage` (transient).
pub struct BrowserStorage {
    scope: Scope,
}

impl BrowserStorage {
    pub fn new(scope: Scope) -> Self {
        Self { scope }
    }

    #[cfg(feature = "hydrate")]
    fn handle(&self) -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".to_owned()))?;
        let storage = match self.scope {
            Scope::Durable => window.local_storage(),
            Scope::Transient => window.session_storage(),
        };
        match storage {
            Ok(Some(storage)) => Ok(storage),
            Ok(None) => Err(StorageError::Unavailable(format!("{} storage missing", self.scope))),
            Err(e) => Err(StorageError::Unavailable(js_error_message(&e))),
        }
    }

    #[cfg(not(feature = "hydrate"))]
    fn handle(&self) -> Result<(), StorageError> {
        Err(StorageError::Unavailable(format!("{} storage: {NO_BROWSER}", self.scope)))
    }
}

#[cfg(feature = "hydrate")]
fn op_error(op: &'static str, key: &str, e: &wasm_bindgen::JsValue) -> StorageError {
    StorageError::Operation { op, key: key.to_owned(), reason: js_error_message(e) }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        #[cfg(feature = "hydrate")]
        {
            self.handle()?.get_item(key).map_err(|e| op_error("get", key, &e))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            self.handle().map(|()| None)
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            self.handle()?.set_item(key, value).map_err(|e| op_error("set", key, &e))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
            self.handle()
        }
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            self.handle()?.remove_item(key).map_err(|e| op_error("remove", key, &e))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            self.handle()
        }
    }

    fn clear(&self) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            self.handle()?.clear().map_err(|e| op_error("clear", "*", &e))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            self.handle()
        }
    }
}

// =============================================================================
// COOKIES
// =============================================================================

/// `document.cookie` of the current page.
pub struct DocumentCookies;

#[cfg(feature = "hydrate")]
fn html_document() -> Result<web_sys::HtmlDocument, StorageError> {
    use wasm_bindgen::JsCast;

    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|doc| doc.dyn_into::<web_sys::HtmlDocument>().ok())
        .ok_or_else(|| StorageError::Unavailable("no html document".to_owned()))
}

impl CookieJar for DocumentCookies {
    fn host(&self) -> String {
        current_hostname()
    }

    fn cookie_string(&self) -> Result<String, StorageError> {
        #[cfg(feature = "hydrate")]
        {
            html_document()?.cookie().map_err(|e| op_error("get", "document.cookie", &e))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(StorageError::Unavailable(NO_BROWSER.to_owned()))
        }
    }

    fn write(&self, directive: &str) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            html_document()?
                .set_cookie(directive)
                .map_err(|e| op_error("set", "document.cookie", &e))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = directive;
            Err(StorageError::Unavailable(NO_BROWSER.to_owned()))
        }
    }
}

// =============================================================================
// NAVIGATION / TIME
// =============================================================================

/// Full-page navigation through `location.href`.
pub struct LocationNavigator;

impl authstate::Navigator for LocationNavigator {
    fn redirect(&self, url: &str) -> Result<(), NavigationError> {
        #[cfg(feature = "hydrate")]
        {
            let window = web_sys::window().ok_or_else(|| NavigationError::Unavailable("no window".to_owned()))?;
            window
                .location()
                .set_href(url)
                .map_err(|e| NavigationError::Unavailable(js_error_message(&e)))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = url;
            Err(NavigationError::Unavailable(NO_BROWSER.to_owned()))
        }
    }
}

pub struct BrowserTimer;

impl Timer for BrowserTimer {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        #[cfg(feature = "hydrate")]
        {
            gloo_timers::future::sleep(duration).boxed_local()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = duration;
            futures::future::ready(()).boxed_local()
        }
    }
}

pub struct BrowserClock;

impl Clock for BrowserClock {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn now_millis(&self) -> u64 {
        #[cfg(feature = "hydrate")]
        {
            js_sys::Date::now() as u64
        }
        #[cfg(not(feature = "hydrate"))]
        {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map_or(0, |d| d.as_millis() as u64)
        }
    }
}
