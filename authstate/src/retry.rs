//! Time seams and the bounded retry policy for the status check.
//!
//! The core never depends on an executor. Timeouts are a race between the
//! request future and a `Timer` sleep, so the same code runs on the browser
//! event loop (`gloo-timers`) and under `futures::executor` in tests.

#[cfg(test)]
#[path = "retry_test.rs"]
mod retry_test;

use std::time::Duration;

use futures::future::{self, Either, LocalBoxFuture};

use crate::error::OracleError;

pub const DEFAULT_STATUS_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 1_000;
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Non-blocking sleep on the host event loop.
pub trait Timer: Send + Sync {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}

/// Wall clock used for intent timestamps and cache-busting markers.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}

/// Fixed-backoff retry budget for the status oracle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first one.
    pub max_retries: u32,
    /// Pause between attempts.
    pub backoff: Duration,
    /// Budget for each individual attempt.
    pub attempt_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            backoff: Duration::from_millis(DEFAULT_RETRY_BACKOFF_MS),
            attempt_timeout: Duration::from_millis(DEFAULT_STATUS_TIMEOUT_MS),
        }
    }
}

impl RetryPolicy {
    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// Whether attempt number `attempt` (zero-based) may be followed by another.
    pub fn should_retry(&self, attempt: u32, err: &OracleError) -> bool {
        attempt < self.max_retries && err.retryable()
    }
}

/// Resolve `request`, or fail with [`OracleError::Timeout`] once `limit`
/// elapses. The losing future is dropped, which cancels it.
pub async fn with_timeout<'a, T>(
    timer: &dyn Timer,
    limit: Duration,
    request: LocalBoxFuture<'a, Result<T, OracleError>>,
) -> Result<T, OracleError> {
    match future::select(request, timer.sleep(limit)).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(OracleError::Timeout),
    }
}
