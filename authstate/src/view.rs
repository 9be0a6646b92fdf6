//! Views as the reconciler sees them, and the route guard.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use crate::status::AuthStatus;

pub const LOGIN_PATH: &str = "/login";
pub const ACCOUNT_DELETED_PATH: &str = "/account-deleted";
pub const DEFAULT_AUTHENTICATED_PATH: &str = "/dashboard";

/// Query parameters the login view reacts to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginQuery {
    /// `error=...`; only `unauthorized` has a meaning.
    pub error: Option<String>,
    /// `force=true`: keep (re-assert) the logout intent instead of clearing it.
    pub force: bool,
}

impl LoginQuery {
    /// Parse a URL query string, with or without the leading `?`.
    pub fn parse(query: &str) -> Self {
        let mut parsed = Self::default();
        for pair in query.trim_start_matches('?').split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "error" if !value.is_empty() => parsed.error = Some(value.to_owned()),
                "force" => parsed.force = value == "true",
                _ => {}
            }
        }
        parsed
    }

    pub fn unauthorized(&self) -> bool {
        self.error.as_deref() == Some("unauthorized")
    }
}

/// A location classified for reconciliation and guarding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum View {
    Login(LoginQuery),
    AccountDeleted,
    /// One of the application's protected views.
    Protected(String),
    /// `/` and any path the application does not know.
    Other(String),
}

impl View {
    pub fn resolve(path: &str, query: &str, protected_paths: &[String]) -> Self {
        let path = normalize_path(path);
        match path.as_str() {
            LOGIN_PATH => Self::Login(LoginQuery::parse(query)),
            ACCOUNT_DELETED_PATH => Self::AccountDeleted,
            p if protected_paths.iter().any(|candidate| candidate == p) => Self::Protected(path),
            _ => Self::Other(path),
        }
    }

    /// Login view carrying `force=true`.
    pub fn forces_logout(&self) -> bool {
        matches!(self, Self::Login(q) if q.force)
    }

    /// The login view without `force=true`: the entry point that re-enables
    /// login by clearing intents.
    pub fn is_plain_login(&self) -> bool {
        matches!(self, Self::Login(q) if !q.force)
    }

    /// Views whose entry always signs the page out, whatever the server
    /// would say.
    pub fn ends_session(&self) -> bool {
        match self {
            Self::AccountDeleted => true,
            Self::Login(q) => q.unauthorized(),
            Self::Protected(_) | Self::Other(_) => false,
        }
    }
}

fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_owned()
    } else if trimmed.starts_with('/') {
        trimmed.to_owned()
    } else {
        format!("/{trimmed}")
    }
}

/// What a view should do for the current status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
    Render,
    /// Show the loading affordance; the status is not known yet.
    Loading,
    Redirect(&'static str),
}

pub fn guard(view: &View, status: AuthStatus) -> Guard {
    match (view, status) {
        (View::AccountDeleted, _) => Guard::Render,
        (_, AuthStatus::Unknown) => Guard::Loading,
        (View::Login(_), AuthStatus::Authenticated) => Guard::Redirect(DEFAULT_AUTHENTICATED_PATH),
        (View::Login(_), AuthStatus::Unauthenticated) => Guard::Render,
        (View::Protected(_), AuthStatus::Authenticated) => Guard::Render,
        (View::Protected(_) | View::Other(_), AuthStatus::Unauthenticated) => Guard::Redirect(LOGIN_PATH),
        (View::Other(_), AuthStatus::Authenticated) => Guard::Redirect(DEFAULT_AUTHENTICATED_PATH),
    }
}
