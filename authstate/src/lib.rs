//! Client-side authentication-state reconciliation for Writify.
//!
//! Decides, on every page load and navigation, whether the browser is signed
//! in by reconciling the server session (via the status oracle) with logout
//! intents persisted in durable and transient browser storage. Also owns the
//! logout protocol and the cookie/storage scrub.
//!
//! The crate has no browser dependency. Hosts plug in storage, cookies, HTTP,
//! navigation, timers, and a clock through the traits re-exported here; the
//! `client` crate provides the web-sys implementations.

pub mod api;
pub mod config;
pub mod cookies;
pub mod error;
pub mod reconciler;
pub mod retry;
pub mod status;
pub mod storage;
pub mod store;
pub mod view;

#[cfg(test)]
#[path = "test_support.rs"]
mod test_support;

pub use api::{AuthApi, Navigator};
pub use config::{AuthConfig, Endpoints, resolve_api_base};
pub use cookies::{CookieJar, ScrubPlan};
pub use error::{NavigationError, OracleError, StorageError};
pub use reconciler::{
    AuthReconciler, Backends, LOGIN_FAILED_MESSAGE, LogoutOutcome, Resolution, SessionContext, UNAUTHORIZED_MESSAGE,
};
pub use retry::{Clock, RetryPolicy, Timer};
pub use status::{AuthStatus, DomainPolicy, Identity, StatusResponse};
pub use storage::{KeyValueStore, MemoryStore, Scope};
pub use store::{AuthStateStore, IntentKeys, StoreKeys};
pub use view::{Guard, LoginQuery, View, guard};
