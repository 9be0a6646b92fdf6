//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! A read model of `AuthStateStore`: the store's publish hook writes
//! `status`, and the reconciler's resolution fills in `identity`. Route
//! guards and the header render from this signal only.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use authstate::{AuthStatus, Identity};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub status: AuthStatus,
    /// Present only while `status` is `Authenticated`.
    pub identity: Option<Identity>,
    /// Inline message for the login view.
    pub banner: Option<String>,
}

impl AuthState {
    /// Record a published status. Leaving `Authenticated` drops the identity.
    pub fn apply_status(&mut self, status: AuthStatus) {
        self.status = status;
        if !status.is_authenticated() {
            self.identity = None;
        }
    }

    /// Attach the reconciler's identity. Ignored unless signed in.
    pub fn set_identity(&mut self, identity: Option<Identity>) {
        self.identity = identity.filter(|_| self.status.is_authenticated());
    }

    pub fn loading(&self) -> bool {
        !self.status.is_resolved()
    }

    pub fn display_name(&self) -> String {
        self.identity
            .as_ref()
            .map_or_else(|| "Student".to_owned(), |identity| identity.label().to_owned())
    }

    pub fn email(&self) -> Option<&str> {
        self.identity.as_ref().and_then(|identity| identity.email.as_deref())
    }
}
