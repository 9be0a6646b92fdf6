//! Authentication status, oracle payloads, and the email-domain policy.
//!
//! DESIGN
//! ======
//! `AuthStatus` is never stored durably. It is recomputed on every page load
//! from logout-intent presence, the latest oracle answer, and the domain
//! check implemented here.

#[cfg(test)]
#[path = "status_test.rs"]
mod status_test;

use serde::{Deserialize, Serialize};

/// Current belief about whether the browser holds a valid session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthStatus {
    /// Before the first reconciliation of this page load finishes.
    #[default]
    Unknown,
    Authenticated,
    Unauthenticated,
}

impl AuthStatus {
    pub fn is_resolved(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    pub fn is_authenticated(self) -> bool {
        matches!(self, Self::Authenticated)
    }
}

/// Identity reported by the status oracle for the session's user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Identity {
    /// Best human-readable label for headers and greetings.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.name.as_deref())
            .or(self.email.as_deref())
            .filter(|s| !s.trim().is_empty())
            .unwrap_or("Student")
    }
}

/// Body of `GET /auth/status`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub is_authenticated: bool,
    #[serde(default)]
    pub user: Option<Identity>,
}

/// Restricts accepted identities to one institutional email domain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainPolicy {
    suffix: String,
}

impl DomainPolicy {
    /// Build a policy from an email suffix such as `@student.iul.ac.in`.
    pub fn new(suffix: &str) -> Self {
        Self { suffix: suffix.trim().to_lowercase() }
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Case-insensitive suffix match on the full address.
    pub fn allows(&self, email: &str) -> bool {
        let email = email.trim().to_lowercase();
        email.len() > self.suffix.len() && email.ends_with(&self.suffix)
    }

    /// Classify an oracle answer.
    ///
    /// The domain check only applies to sessions the server considers
    /// authenticated and that carry an email; an authenticated session
    /// without an email is taken at face value.
    pub fn evaluate(&self, response: StatusResponse) -> Verdict {
        if !response.is_authenticated {
            return Verdict::NotAuthenticated;
        }
        match response.user {
            Some(identity) => match identity.email.as_deref() {
                Some(email) if !self.allows(email) => Verdict::DomainRejected { email: email.to_owned() },
                _ => Verdict::Authenticated(Some(identity)),
            },
            None => Verdict::Authenticated(None),
        }
    }
}

/// Outcome of checking one oracle answer against the domain policy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Authenticated(Option<Identity>),
    NotAuthenticated,
    /// The server accepted a login whose email is outside the allowed domain.
    DomainRejected { email: String },
}
