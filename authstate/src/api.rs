//! Outbound seams: the auth backend and full-page navigation.

use futures::future::LocalBoxFuture;

use crate::error::{NavigationError, OracleError};
use crate::status::StatusResponse;

/// The server's session endpoints, treated as a black box.
///
/// Both calls must send credentials (the session cookie). Futures are local
/// because browser fetch futures are not `Send`.
pub trait AuthApi: Send + Sync {
    /// `GET <status-endpoint>`; non-2xx is [`OracleError::Status`].
    fn status(&self) -> LocalBoxFuture<'_, Result<StatusResponse, OracleError>>;

    /// `GET <logout-endpoint>`; the result never drives control flow.
    fn logout(&self) -> LocalBoxFuture<'_, Result<(), OracleError>>;
}

/// Full-page navigation that reloads the application.
pub trait Navigator: Send + Sync {
    fn redirect(&self, url: &str) -> Result<(), NavigationError>;
}
