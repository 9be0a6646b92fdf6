//! HTTP calls to the Writify backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, always with
//! credentials so the session cookie travels cross-origin.
//! Server-side (SSR): stubs returning errors since these endpoints are only
//! meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Fetch failures are classified into `OracleError` so the reconciler's retry
//! policy can tell an aborted or dropped request (retried) from a bad status
//! or body (not retried). A request future dropped by the timeout race aborts
//! its fetch through `AbortOnDrop`.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use authstate::{AuthApi, Endpoints, OracleError, StatusResponse};
use futures::FutureExt;
use futures::future::LocalBoxFuture;
#[cfg(any(test, feature = "hydrate"))]
use serde::Deserialize;

/// Token the backend requires in the deletion body.
pub const DELETE_CONFIRMATION: &str = "DELETE_MY_ACCOUNT_PERMANENTLY";

/// Shown when the backend rejects a deletion without a message.
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete account";
/// Shown when the deletion request never reaches the backend.
pub const DELETE_UNREACHABLE_MESSAGE: &str = "Failed to delete account. Please try again later.";

#[cfg(not(feature = "hydrate"))]
const NOT_AVAILABLE: &str = "not available on server";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AccountError {
    #[error("account deletion rejected: {0}")]
    Rejected(String),
    #[error("account deletion request failed: {0}")]
    Transport(String),
}

impl AccountError {
    /// Text for the profile view.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected(message) => message.clone(),
            Self::Transport(_) => DELETE_UNREACHABLE_MESSAGE.to_owned(),
        }
    }
}

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Map a thrown fetch exception onto the retry taxonomy.
#[cfg(any(test, feature = "hydrate"))]
fn classify_js_failure(name: &str, message: &str) -> OracleError {
    match name {
        "AbortError" | "TimeoutError" => OracleError::Timeout,
        "TypeError" | "NetworkError" => OracleError::Network(message.to_owned()),
        _ => OracleError::Malformed(format!("{name}: {message}")),
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn parse_status_body(body: &str) -> Result<StatusResponse, OracleError> {
    serde_json::from_str(body).map_err(|e| OracleError::Malformed(e.to_string()))
}

/// JSON body of `DELETE /api/delete-account`.
#[cfg(any(test, feature = "hydrate"))]
fn delete_request_body() -> serde_json::Value {
    serde_json::json!({ "confirmDelete": DELETE_CONFIRMATION })
}

#[cfg(any(test, feature = "hydrate"))]
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// The backend's `{"error": "..."}` message, or the generic fallback.
#[cfg(any(test, feature = "hydrate"))]
fn rejection_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| DELETE_FAILED_MESSAGE.to_owned())
}

#[cfg(feature = "hydrate")]
fn from_gloo(err: gloo_net::Error) -> OracleError {
    match err {
        gloo_net::Error::JsError(js) => classify_js_failure(&js.name, &js.message),
        gloo_net::Error::SerdeError(e) => OracleError::Malformed(e.to_string()),
        other => OracleError::Network(other.to_string()),
    }
}

// =============================================================================
// FETCH
// =============================================================================

/// Aborts the fetch it was attached to unless disarmed first.
#[cfg(feature = "hydrate")]
struct AbortOnDrop {
    controller: web_sys::AbortController,
    armed: bool,
}

#[cfg(feature = "hydrate")]
impl AbortOnDrop {
    fn new() -> Option<Self> {
        web_sys::AbortController::new()
            .ok()
            .map(|controller| Self { controller, armed: true })
    }

    fn signal(&self) -> web_sys::AbortSignal {
        self.controller.signal()
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

#[cfg(feature = "hydrate")]
impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        if self.armed {
            self.controller.abort();
        }
    }
}

/// Send `builder` with credentials and an optional JSON body, then read the
/// response body. The abort guard lives until the body is complete.
#[cfg(feature = "hydrate")]
async fn send_with_credentials(
    builder: gloo_net::http::RequestBuilder,
    json: Option<&serde_json::Value>,
) -> Result<(u16, String), OracleError> {
    let guard = AbortOnDrop::new();
    let signal = guard.as_ref().map(AbortOnDrop::signal);
    let builder = builder
        .credentials(web_sys::RequestCredentials::Include)
        .header("Accept", "application/json")
        .abort_signal(signal.as_ref());
    let response = match json {
        // `json` also sets `Content-Type: application/json`.
        Some(body) => builder.json(body).map_err(from_gloo)?.send().await,
        None => builder.send().await,
    }
    .map_err(from_gloo)?;
    let status = response.status();
    let body = response.text().await.map_err(from_gloo)?;
    if let Some(guard) = guard {
        guard.disarm();
    }
    Ok((status, body))
}

/// `GET /auth/status`.
async fn fetch_status(url: &str) -> Result<StatusResponse, OracleError> {
    #[cfg(feature = "hydrate")]
    {
        let (status, body) = send_with_credentials(gloo_net::http::Request::get(url), None).await?;
        if !(200..300).contains(&status) {
            return Err(OracleError::Status { status });
        }
        parse_status_body(&body)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = url;
        Err(OracleError::Network(NOT_AVAILABLE.to_owned()))
    }
}

/// `GET /auth/logout`. The body is ignored.
async fn request_logout(url: &str) -> Result<(), OracleError> {
    #[cfg(feature = "hydrate")]
    {
        let (status, _) = send_with_credentials(gloo_net::http::Request::get(url), None).await?;
        if !(200..300).contains(&status) {
            return Err(OracleError::Status { status });
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = url;
        Err(OracleError::Network(NOT_AVAILABLE.to_owned()))
    }
}

/// Delete the signed-in user's account via `DELETE /api/delete-account`,
/// sending the confirmation token as JSON.
///
/// # Errors
///
/// Returns `Rejected` with the backend's message for a non-2xx answer and
/// `Transport` when the request could not be made.
pub async fn delete_account(url: &str) -> Result<(), AccountError> {
    #[cfg(feature = "hydrate")]
    {
        let body = delete_request_body();
        let (status, body) = send_with_credentials(gloo_net::http::Request::delete(url), Some(&body))
            .await
            .map_err(|e| AccountError::Transport(e.to_string()))?;
        if (200..300).contains(&status) {
            Ok(())
        } else {
            Err(AccountError::Rejected(rejection_message(&body)))
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = url;
        Err(AccountError::Transport(NOT_AVAILABLE.to_owned()))
    }
}

// =============================================================================
// ORACLE
// =============================================================================

/// The backend as the reconciler's status oracle.
pub struct HttpAuthApi {
    endpoints: Endpoints,
}

impl HttpAuthApi {
    pub fn new(endpoints: Endpoints) -> Self {
        Self { endpoints }
    }
}

impl AuthApi for HttpAuthApi {
    fn status(&self) -> LocalBoxFuture<'_, Result<StatusResponse, OracleError>> {
        fetch_status(&self.endpoints.status).boxed_local()
    }

    fn logout(&self) -> LocalBoxFuture<'_, Result<(), OracleError>> {
        request_logout(&self.endpoints.logout).boxed_local()
    }
}
