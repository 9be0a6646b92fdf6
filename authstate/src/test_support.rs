//! In-memory fakes for every seam of the core.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use crate::api::{AuthApi, Navigator};
use crate::config::AuthConfig;
use crate::cookies::CookieJar;
use crate::error::{NavigationError, OracleError, StorageError};
use crate::reconciler::{Backends, SessionContext};
use crate::retry::{Clock, Timer};
use crate::status::{Identity, StatusResponse};
use crate::storage::{KeyValueStore, MemoryStore};

pub const TEST_API: &str = "https://api.test";

/// Store whose every operation fails, like a browser with storage disabled.
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Operation { op: "get", key: key.to_owned(), reason: "SecurityError".to_owned() })
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Operation { op: "set", key: key.to_owned(), reason: "QuotaExceededError".to_owned() })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Err(StorageError::Operation { op: "remove", key: key.to_owned(), reason: "SecurityError".to_owned() })
    }

    fn clear(&self) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage disabled".to_owned()))
    }
}

/// Cookie jar that records every directive written to it.
pub struct RecordingCookies {
    host: String,
    raw: Mutex<String>,
    writes: Mutex<Vec<String>>,
}

impl RecordingCookies {
    pub fn new(host: &str, raw: &str) -> Self {
        Self { host: host.to_owned(), raw: Mutex::new(raw.to_owned()), writes: Mutex::new(Vec::new()) }
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

impl CookieJar for RecordingCookies {
    fn host(&self) -> String {
        self.host.clone()
    }

    fn cookie_string(&self) -> Result<String, StorageError> {
        Ok(self.raw.lock().unwrap().clone())
    }

    fn write(&self, directive: &str) -> Result<(), StorageError> {
        self.writes.lock().unwrap().push(directive.to_owned());
        Ok(())
    }
}

pub struct FixedClock(AtomicU64);

impl FixedClock {
    pub fn new(now: u64) -> Self {
        Self(AtomicU64::new(now))
    }

    pub fn advance(&self, by: u64) {
        self.0.fetch_add(by, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Timer whose sleeps complete immediately; records requested durations.
#[derive(Default)]
pub struct InstantTimer {
    sleeps: Mutex<Vec<Duration>>,
}

impl InstantTimer {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

impl Timer for InstantTimer {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        self.sleeps.lock().unwrap().push(duration);
        futures::future::ready(()).boxed_local()
    }
}

/// One scripted answer of the fake status oracle.
pub enum Scripted {
    Respond(Result<StatusResponse, OracleError>),
    /// Never resolves; only a timeout ends the attempt.
    Hang,
    /// Another tab records a logout intent while the request is in flight.
    IntentDuringCall(Arc<dyn KeyValueStore>, StatusResponse),
}

pub enum LogoutBehavior {
    Succeed,
    Fail,
    Hang,
}

pub struct ScriptedApi {
    script: Mutex<VecDeque<Scripted>>,
    logout: LogoutBehavior,
    status_calls: AtomicUsize,
    logout_calls: AtomicUsize,
}

impl ScriptedApi {
    pub fn new(script: Vec<Scripted>) -> Self {
        Self::with_logout(script, LogoutBehavior::Succeed)
    }

    pub fn with_logout(script: Vec<Scripted>, logout: LogoutBehavior) -> Self {
        Self {
            script: Mutex::new(script.into()),
            logout,
            status_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
        }
    }

    /// Append an answer after construction, for steps that need harness handles.
    pub fn push(&self, step: Scripted) {
        self.script.lock().unwrap().push_back(step);
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn logout_calls(&self) -> usize {
        self.logout_calls.load(Ordering::SeqCst)
    }
}

impl AuthApi for ScriptedApi {
    fn status(&self) -> LocalBoxFuture<'_, Result<StatusResponse, OracleError>> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Respond(result)) => futures::future::ready(result).boxed_local(),
            Some(Scripted::Hang) => futures::future::pending().boxed_local(),
            Some(Scripted::IntentDuringCall(store, response)) => {
                store.set("FORCE_LOGOUT", "1").unwrap();
                futures::future::ready(Ok(response)).boxed_local()
            }
            None => futures::future::ready(Err(OracleError::Network("script exhausted".to_owned()))).boxed_local(),
        }
    }

    fn logout(&self) -> LocalBoxFuture<'_, Result<(), OracleError>> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        match self.logout {
            LogoutBehavior::Succeed => futures::future::ready(Ok(())).boxed_local(),
            LogoutBehavior::Fail => {
                futures::future::ready(Err(OracleError::Network("CORS request did not succeed".to_owned()))).boxed_local()
            }
            LogoutBehavior::Hang => futures::future::pending().boxed_local(),
        }
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    urls: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingNavigator {
    pub fn failing() -> Self {
        Self { urls: Mutex::new(Vec::new()), fail: true }
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, url: &str) -> Result<(), NavigationError> {
        if self.fail {
            return Err(NavigationError::Unavailable("location blocked".to_owned()));
        }
        self.urls.lock().unwrap().push(url.to_owned());
        Ok(())
    }
}

pub fn authenticated(email: &str) -> StatusResponse {
    StatusResponse {
        is_authenticated: true,
        user: Some(Identity { email: Some(email.to_owned()), ..Identity::default() }),
    }
}

pub fn unauthenticated() -> StatusResponse {
    StatusResponse { is_authenticated: false, user: None }
}

/// A full session wired to fakes, with handles kept for assertions.
pub struct Harness {
    pub durable: Arc<MemoryStore>,
    pub transient: Arc<MemoryStore>,
    pub cookies: Arc<RecordingCookies>,
    pub api: Arc<ScriptedApi>,
    pub navigator: Arc<RecordingNavigator>,
    pub timer: Arc<InstantTimer>,
    pub clock: Arc<FixedClock>,
    pub session: SessionContext,
}

impl Harness {
    pub fn new(api: ScriptedApi) -> Self {
        Self::with_navigator(api, RecordingNavigator::default())
    }

    pub fn with_navigator(api: ScriptedApi, navigator: RecordingNavigator) -> Self {
        let durable = Arc::new(MemoryStore::new());
        let transient = Arc::new(MemoryStore::new());
        let cookies = Arc::new(RecordingCookies::new("www.writify.example.com", "connect.sid=s%3Aabc; theme=dark"));
        let api = Arc::new(api);
        let navigator = Arc::new(navigator);
        let timer = Arc::new(InstantTimer::default());
        let clock = Arc::new(FixedClock::new(1_700_000_000_000));
        let config = AuthConfig::new(TEST_API).with_protected_paths(&["/dashboard", "/profile"]);
        let session = SessionContext::new(
            config,
            Backends {
                durable: durable.clone(),
                transient: transient.clone(),
                cookies: cookies.clone(),
                api: api.clone(),
                navigator: navigator.clone(),
                timer: timer.clone(),
                clock: clock.clone(),
            },
        );
        Self { durable, transient, cookies, api, navigator, timer, clock, session }
    }

    pub fn set_intent(&self) {
        self.session.store.set_logout_intent();
    }

    pub fn has_intent(&self) -> bool {
        self.session.store.has_logout_intent()
    }
}
