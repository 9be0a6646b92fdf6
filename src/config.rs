//! Host configuration from the environment.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::error::HostError;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostConfig {
    pub port: u16,
    /// Overrides the Leptos site root (where `pkg/` is served from).
    pub site_root: Option<String>,
}

impl HostConfig {
    /// Read `PORT` and `WRITIFY_SITE_ROOT`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEnv` if `PORT` is set but not a valid port number.
    pub fn from_env() -> Result<Self, HostError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, HostError> {
        let port = match lookup("PORT").map(|raw| raw.trim().to_owned()).filter(|raw| !raw.is_empty()) {
            Some(raw) => raw
                .parse()
                .map_err(|_| HostError::InvalidEnv { key: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };
        let site_root = lookup("WRITIFY_SITE_ROOT").filter(|root| !root.trim().is_empty());
        Ok(Self { port, site_root })
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
