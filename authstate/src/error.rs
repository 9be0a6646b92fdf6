//! Error types for the reconciliation core.
//!
//! ERROR HANDLING
//! ==============
//! None of these errors cross into the rendering layer. The store logs and
//! absorbs `StorageError`, the reconciler folds `OracleError` into
//! `AuthStatus::Unauthenticated`, and `NavigationError` is only reported back
//! to the caller that asked for the navigation.

/// Failure of a status-oracle or logout-endpoint call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    /// The call did not finish inside its time budget and was abandoned.
    #[error("status request timed out")]
    Timeout,

    /// The request never produced an HTTP response (offline, DNS, CORS).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success HTTP status.
    #[error("auth check failed with status: {status}")]
    Status { status: u16 },

    /// The response body was not a valid status payload.
    #[error("malformed status response: {0}")]
    Malformed(String),
}

impl OracleError {
    /// Whether the failure is transient and worth another attempt.
    ///
    /// Only timeouts and network-class failures qualify; a server that
    /// answered (even with an error) is not asked again.
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Timeout | Self::Network(_))
    }
}

/// Failure of a browser storage or cookie operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The storage scope cannot be reached at all (disabled, sandboxed, SSR).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A single operation was rejected (quota exceeded, security error).
    #[error("storage {op} failed for key {key}: {reason}")]
    Operation { op: &'static str, key: String, reason: String },
}

/// Failure to hand a URL to the browser for full-page navigation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("navigation unavailable: {0}")]
    Unavailable(String),
}
